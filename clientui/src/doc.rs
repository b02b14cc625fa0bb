//! OpenAPI document exposed by Swagger UI in debug builds.

use utoipa::OpenApi;

/// Aggregated OpenAPI description of the page surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::login::login_form,
        crate::inbound::http::login::login,
        crate::inbound::http::login::logout,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::enroll,
        crate::inbound::http::courses::unenroll,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::inbound::http::login::LoginForm,
        crate::inbound::http::login::LoginPage,
        crate::inbound::http::courses::EnrollForm,
        crate::inbound::http::courses::UnenrollForm,
        crate::domain::UserId,
        crate::domain::CourseId,
        crate::domain::EnrollmentId,
        crate::domain::Course,
        crate::domain::CourseView,
        crate::domain::CoursesPage,
        crate::domain::CourseEnrollment,
        crate::domain::EnrollmentStatus,
        crate::domain::ProgressPercent,
        crate::domain::UserSummary,
        crate::domain::ProblemDocument,
        crate::domain::Error,
        crate::domain::ErrorCode,
    )),
    tags(
        (name = "auth", description = "Login session establishment"),
        (name = "courses", description = "Course listing and enrollment actions"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
