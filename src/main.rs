use log::*;
use provider_auth::oauth::{generate_state, providers, Provider, SessionState};
use service::{config::Config, logging::Logger};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::new();
    Logger::init_logger(&config);

    info!(
        "Starting oauth_gate with the {} provider ({} environment)",
        config.provider,
        config.runtime_env()
    );

    // Configuration problems stop the process before anything is served.
    let provider = match providers::from_config(config.provider_settings()) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Invalid provider configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = generate_state();
    let login_url = provider.login_url(config.redirect_url(), &state);
    info!("Login URL issued with state {}", state);
    println!("{}", login_url);

    match config.access_token() {
        Some(token) => {
            let mut session = SessionState::new(token);
            if let Some(expires_on) = config.access_token_expires_on() {
                session = session.with_expires_on(expires_on);
            }
            check_session(provider.as_ref(), &session).await
        }
        None => ExitCode::SUCCESS,
    }
}

/// Resolves the user behind an access token and checks the token is still accepted.
async fn check_session(provider: &dyn Provider, session: &SessionState) -> ExitCode {
    if session.is_expired() {
        warn!("Access token expired, not contacting the provider");
        return ExitCode::FAILURE;
    }

    match provider.email_address(session).await {
        Ok(email) => info!("Access token belongs to {}", email),
        Err(e) => warn!("Unable to resolve email for access token: {}", e),
    }

    if provider.validate_session(session).await {
        info!("Session is valid");
        ExitCode::SUCCESS
    } else {
        warn!("Session is no longer valid");
        ExitCode::FAILURE
    }
}
