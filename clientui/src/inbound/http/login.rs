//! Login and logout page handlers.
//!
//! ```text
//! GET  /login            render the login form view model
//! POST /login            email/password form fields
//! POST /logout           destroy the session
//! ```
//!
//! A failed login re-renders the form view model with a message and leaves
//! the session anonymous; a successful one persists the identity claims and
//! redirects to the course page.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ApiResult, LoginCredentials, LoginValidationError, SessionUser};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Path the login handler redirects to after success.
pub const LANDING_PATH: &str = "/courses";

/// Login form fields for `POST /login`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginForm {
    /// Submitted email address.
    pub email: String,
    /// Submitted password.
    pub password: String,
}

/// View model backing the login form.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPage {
    /// Message describing why the last attempt failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginPage {
    fn empty() -> Self {
        Self { error: None }
    }

    fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}

/// Render the login form.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form", body = LoginPage)),
    tags = ["auth"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login")]
pub async fn login_form() -> HttpResponse {
    HttpResponse::Ok().json(LoginPage::empty())
}

/// Authenticate against the remote API and establish a session.
///
/// Validation failures and remote rejections both re-render the form view
/// model with a message; only transport details are withheld from the user.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login failed; form re-rendered", body = LoginPage),
        (
            status = 303,
            description = "Login success",
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let credentials = match LoginCredentials::try_from_parts(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(error) => {
            return Ok(
                HttpResponse::Ok().json(LoginPage::with_error(validation_message(&error)))
            );
        }
    };

    match state.auth.login(&credentials).await {
        Ok(seed) => {
            let user = SessionUser::from(&seed.user);
            session.persist_user(&user)?;
            tracing::info!(user_id = %user.id, "login succeeded; session established");
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, LANDING_PATH))
                .finish())
        }
        Err(error) => {
            tracing::info!(email = %credentials.email(), %error, "login rejected");
            Ok(HttpResponse::Ok().json(LoginPage::with_error(error.message())))
        }
    }
}

/// Destroy the session and return to the login form.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 303, description = "Session destroyed")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/login"))
        .finish()
}

fn validation_message(error: &LoginValidationError) -> String {
    match error {
        LoginValidationError::EmptyEmail => "Email must not be empty.".to_owned(),
        LoginValidationError::MalformedEmail => "Email must be a valid address.".to_owned(),
        LoginValidationError::EmptyPassword => "Password must not be empty.".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        FixtureAuthGateway, FixtureCourseGateway, FixtureEnrollmentGateway, GatewayError,
        MockAuthGateway,
    };
    use crate::domain::{EnrollmentWorkflow, ProblemDocument};
    use crate::inbound::http::test_utils::test_session_middleware;

    fn state_with_auth(auth: Arc<dyn crate::domain::ports::AuthGateway>) -> web::Data<HttpState> {
        let workflow = EnrollmentWorkflow::new(
            Arc::new(FixtureCourseGateway),
            Arc::new(FixtureEnrollmentGateway),
        );
        web::Data::new(HttpState::new(auth, Arc::new(workflow)))
    }

    fn login_app(
        state: web::Data<HttpState>,
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
            .service(login_form)
            .service(login)
            .service(logout)
    }

    async fn error_text(response: actix_web::dev::ServiceResponse) -> String {
        let body = test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("login page payload");
        value
            .get("error")
            .and_then(Value::as_str)
            .expect("error field")
            .to_owned()
    }

    #[actix_web::test]
    async fn successful_login_sets_a_session_and_redirects() {
        let app =
            test::init_service(login_app(state_with_auth(Arc::new(FixtureAuthGateway)))).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form(LoginForm {
                    email: "admin@example.com".to_owned(),
                    password: "password".to_owned(),
                })
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some(LANDING_PATH)
        );
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session" && !cookie.value().is_empty()),
            "session cookie must be set"
        );
    }

    #[actix_web::test]
    async fn rejected_login_surfaces_the_problem_detail() {
        let mut auth = MockAuthGateway::new();
        auth.expect_login().returning(|_| {
            let problem = ProblemDocument {
                title: Some("Unauthorized".to_owned()),
                status: Some(401),
                detail: Some("Invalid credentials".to_owned()),
                ..ProblemDocument::default()
            };
            Err(GatewayError::rejected("Invalid credentials", Some(problem)))
        });
        let app = test::init_service(login_app(state_with_auth(Arc::new(auth)))).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form(LoginForm {
                    email: "a@b.com".to_owned(),
                    password: "wrong".to_owned(),
                })
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            !response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session" && !cookie.value().is_empty()),
            "failed login must not establish a session"
        );
        assert_eq!(error_text(response).await, "Invalid credentials");
    }

    #[actix_web::test]
    async fn blank_form_re_renders_without_calling_the_gateway() {
        let mut auth = MockAuthGateway::new();
        auth.expect_login().never();
        let app = test::init_service(login_app(state_with_auth(Arc::new(auth)))).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form(LoginForm {
                    email: String::new(),
                    password: "pw".to_owned(),
                })
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(error_text(response).await, "Email must not be empty.");
    }

    #[actix_web::test]
    async fn transport_failure_shows_the_generic_message() {
        let mut auth = MockAuthGateway::new();
        auth.expect_login()
            .returning(|_| Err(GatewayError::unreachable()));
        let app = test::init_service(login_app(state_with_auth(Arc::new(auth)))).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form(LoginForm {
                    email: "a@b.com".to_owned(),
                    password: "pw".to_owned(),
                })
                .to_request(),
        )
        .await;

        assert_eq!(
            error_text(response).await,
            crate::domain::ports::UNREACHABLE_MESSAGE
        );
    }

    #[actix_web::test]
    async fn logout_redirects_to_the_login_form() {
        let app =
            test::init_service(login_app(state_with_auth(Arc::new(FixtureAuthGateway)))).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post().uri("/logout").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/login")
        );
    }
}
