use crate::cli::CredentialArgs;
use crate::error::ShibespaceError;
use crate::state::AppState;

use models::{Credentials, User, UserInfo};

use log::{info, warn};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub base_url: String,
    pub healthy: bool,
}

pub async fn health(state: &AppState) -> Result<HealthReport, ShibespaceError> {
    let healthy = state.client.health().await?;

    Ok(HealthReport {
        base_url: state.client.base_url().to_string(),
        healthy,
    })
}

pub async fn signup(state: &AppState, args: CredentialArgs) -> Result<UserInfo, ShibespaceError> {
    let credentials = Credentials::new(args.username, args.password);
    Ok(state.client.create_user(&credentials).await?)
}

/// Authenticate, then record the session and re-check it so it is exposed at once.
pub async fn login(state: &AppState, args: CredentialArgs) -> Result<User, ShibespaceError> {
    let credentials = Credentials::new(args.username, args.password);
    let user = state.client.authenticate(&credentials).await?;

    state.tracker.record_login(&user.username)?;
    state.tracker.trigger_recheck();
    state.persist_credential()?;

    info!("Logged in as '{}'", user.username);
    Ok(user)
}

/// Clear the local session even when the API cannot be reached.
pub async fn logout(state: &AppState) -> Result<(), ShibespaceError> {
    if let Err(e) = state.client.logout().await {
        warn!("API logout failed, clearing local session anyway: {e}");
    }

    state.tracker.record_logout()?;
    state.clear_credential()?;
    Ok(())
}

pub fn whoami(state: &AppState) -> Option<String> {
    state.tracker.current_username()
}

/// Report the current username, then every change until the session ends.
pub async fn watch(
    state: &AppState,
    mut on_change: impl FnMut(Option<&str>),
) -> Result<(), ShibespaceError> {
    let mut rx = state.tracker.subscribe();

    let current = rx.borrow_and_update().clone();
    on_change(current.as_deref());
    if current.is_none() {
        return Err(ShibespaceError::not_logged_in());
    }

    while rx.changed().await.is_ok() {
        let username = rx.borrow_and_update().clone();
        on_change(username.as_deref());

        if username.is_none() {
            break;
        }
    }

    Ok(())
}
