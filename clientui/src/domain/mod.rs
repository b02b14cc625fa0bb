//! Domain primitives, ports, and the enrollment workflow.
//!
//! Purpose: define strongly typed models shared by the HTTP handlers and
//! the outbound gateway adapters, keep types immutable, and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.

pub mod auth;
pub mod course;
pub mod enrollment;
pub mod enrollment_service;
pub mod error;
pub mod ports;
pub mod problem;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginSession, LoginValidationError};
pub use self::course::{Course, CourseView, CoursesPage};
pub use self::enrollment::{
    CourseEnrollment, EnrollmentStatus, ProgressPercent, ProgressValidationError,
};
pub use self::enrollment_service::EnrollmentWorkflow;
pub use self::error::{Error, ErrorCode};
pub use self::problem::ProblemDocument;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{CourseId, EnrollmentId, IdValidationError, SessionUser, UserId, UserSummary};


/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use clientui::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
