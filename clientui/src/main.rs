//! Application entry point: tracing init, configuration, server bootstrap.

use actix_web::web;
use mockable::DefaultEnv;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use clientui::inbound::http::health::HealthState;
use clientui::inbound::http::session_config::{BuildMode, session_settings_from_env};
use clientui::outbound::lms::LmsApiConfig;
use clientui::server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::default();
    let mode = BuildMode::from_debug_assertions();
    let session = session_settings_from_env(&env, mode).map_err(std::io::Error::other)?;
    let api =
        LmsApiConfig::from_env(&env, mode == BuildMode::Release).map_err(std::io::Error::other)?;

    let config = ServerConfig::new(session, api, ([0, 0, 0, 0], 8080).into());
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
