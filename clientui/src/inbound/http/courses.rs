//! Course page handlers.
//!
//! ```text
//! GET  /courses            catalogue annotated for the current viewer
//! POST /courses/enroll     form field course_id
//! POST /courses/unenroll   form fields enrollment_id, course_id
//! ```
//!
//! The handlers resolve the viewer from the session and delegate to the
//! enrollment workflow, which owns ordering, idempotency, and degradation
//! rules. Anonymous browsing is allowed; the action endpoints answer with a
//! notice instead of an error when no viewer is identified.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::CoursesPage;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Enroll form fields for `POST /courses/enroll`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
pub struct EnrollForm {
    /// Course to enroll the current user in.
    pub course_id: i64,
}

/// Unenroll form fields for `POST /courses/unenroll`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UnenrollForm {
    /// Enrollment record to delete.
    pub enrollment_id: i64,
    /// Course the record belongs to; used for post-condition verification.
    pub course_id: i64,
}

/// Render the course listing for the current viewer.
#[utoipa::path(
    get,
    path = "/courses",
    responses((status = 200, description = "Course listing", body = CoursesPage)),
    tags = ["courses"],
    operation_id = "listCourses",
    security([])
)]
#[get("/courses")]
pub async fn list_courses(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> HttpResponse {
    let viewer = session.current_user_id();
    let page = state.workflow.view_courses(viewer).await;
    HttpResponse::Ok().json(page)
}

/// Enroll the current user in a course.
#[utoipa::path(
    post,
    path = "/courses/enroll",
    request_body(content = EnrollForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Refreshed course listing", body = CoursesPage)),
    tags = ["courses"],
    operation_id = "enroll"
)]
#[post("/courses/enroll")]
pub async fn enroll(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<EnrollForm>,
) -> HttpResponse {
    let viewer = session.current_user_id();
    let page = state.workflow.enroll(viewer, form.course_id).await;
    HttpResponse::Ok().json(page)
}

/// Remove one of the current user's enrollments.
#[utoipa::path(
    post,
    path = "/courses/unenroll",
    request_body(content = UnenrollForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Refreshed course listing", body = CoursesPage)),
    tags = ["courses"],
    operation_id = "unenroll"
)]
#[post("/courses/unenroll")]
pub async fn unenroll(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<UnenrollForm>,
) -> HttpResponse {
    let viewer = session.current_user_id();
    let page = state
        .workflow
        .unenroll(viewer, form.enrollment_id, form.course_id)
        .await;
    HttpResponse::Ok().json(page)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse as TestResponse, test, web as aweb};
    use serde_json::Value;

    use super::*;
    use crate::domain::enrollment_service::messages;
    use crate::domain::ports::{
        FixtureAuthGateway, FixtureCourseGateway, FixtureEnrollmentGateway,
    };
    use crate::domain::{EnrollmentWorkflow, SessionUser, UserId};
    use crate::inbound::http::session::SessionContext;
    use crate::inbound::http::test_utils::test_session_middleware;

    fn fixture_state() -> aweb::Data<HttpState> {
        let workflow = EnrollmentWorkflow::new(
            Arc::new(FixtureCourseGateway),
            Arc::new(FixtureEnrollmentGateway),
        );
        aweb::Data::new(HttpState::new(
            Arc::new(FixtureAuthGateway),
            Arc::new(workflow),
        ))
    }

    fn courses_app(
        state: aweb::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .app_data(state)
            .service(list_courses)
            .service(enroll)
            .service(unenroll)
            .route(
                "/test/signin",
                aweb::get().to(|session: SessionContext| async move {
                    let user = SessionUser {
                        id: UserId::new(7).expect("valid id"),
                        email: "ada@example.com".to_owned(),
                        roles: vec!["Student".to_owned()],
                    };
                    session.persist_user(&user)?;
                    Ok::<_, crate::domain::Error>(TestResponse::Ok())
                }),
            )
    }

    async fn page_json(response: actix_web::dev::ServiceResponse) -> Value {
        let body = test::read_body(response).await;
        serde_json::from_slice(&body).expect("courses page payload")
    }

    #[actix_web::test]
    async fn anonymous_listing_has_no_viewer_annotations() {
        let app = test::init_service(courses_app(fixture_state())).await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/courses").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let page = page_json(response).await;
        assert!(page.get("currentUserId").is_none());
        let courses = page.get("courses").and_then(Value::as_array).expect("courses");
        assert_eq!(courses.len(), 2);
        assert!(courses.iter().all(|course| course.get("enrollment").is_none()));
    }

    #[actix_web::test]
    async fn authenticated_listing_carries_the_viewer_id() {
        let app = test::init_service(courses_app(fixture_state())).await;

        let signin = test::call_service(
            &app,
            test::TestRequest::get().uri("/test/signin").to_request(),
        )
        .await;
        let cookie = signin
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie");

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/courses")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let page = page_json(response).await;
        assert_eq!(page.get("currentUserId"), Some(&Value::from(7)));
    }

    #[actix_web::test]
    async fn anonymous_enroll_gets_the_login_notice() {
        let app = test::init_service(courses_app(fixture_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/courses/enroll")
                .set_form(EnrollForm { course_id: 1 })
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let page = page_json(response).await;
        assert_eq!(
            page.get("notice").and_then(Value::as_str),
            Some(messages::UNIDENTIFIED_USER)
        );
    }

    #[actix_web::test]
    async fn authenticated_enroll_reports_success() {
        let app = test::init_service(courses_app(fixture_state())).await;

        let signin = test::call_service(
            &app,
            test::TestRequest::get().uri("/test/signin").to_request(),
        )
        .await;
        let cookie = signin
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie");

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/courses/enroll")
                .cookie(cookie)
                .set_form(EnrollForm { course_id: 1 })
                .to_request(),
        )
        .await;

        let page = page_json(response).await;
        assert_eq!(
            page.get("success").and_then(Value::as_str),
            Some(messages::ENROLL_SUCCESS)
        );
    }

    #[actix_web::test]
    async fn unenroll_with_invalid_id_reports_the_validation_notice() {
        let app = test::init_service(courses_app(fixture_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/courses/unenroll")
                .set_form(UnenrollForm {
                    enrollment_id: 0,
                    course_id: 1,
                })
                .to_request(),
        )
        .await;

        let page = page_json(response).await;
        assert_eq!(
            page.get("notice").and_then(Value::as_str),
            Some(messages::INVALID_ENROLLMENT)
        );
    }
}
