use crate::error::ShibespaceError;

use client_core::ShibespaceClient;
use client_core::config::ClientConfig;
use client_core::session::{Clock, FileStorage, LocalStorage, SessionTracker, SystemClock};

use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};

/// Storage key holding the exported credential cookie.
pub const CREDENTIAL_STORAGE_KEY: &str = "credential";

/// Everything a command needs: the API client, the session tracker and the
/// storage both of them persist into.
///
/// Each CLI invocation is a fresh process, so the credential cookie is
/// restored from storage on open and saved back after login.
pub struct AppState {
    pub config: ClientConfig,
    pub client: ShibespaceClient,
    pub tracker: SessionTracker,
    storage: Arc<dyn LocalStorage>,
}

impl AppState {
    /// Open state backed by `{data_dir}/local_storage.json` and the system clock.
    pub fn open(config: ClientConfig, data_dir: &Path) -> Result<Self, ShibespaceError> {
        let storage: Arc<dyn LocalStorage> = Arc::new(FileStorage::new(data_dir));
        Self::with_parts(config, storage, Arc::new(SystemClock))
    }

    pub fn with_parts(
        config: ClientConfig,
        storage: Arc<dyn LocalStorage>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ShibespaceError> {
        let client = ShibespaceClient::from_config(&config.api)?;
        let tracker = SessionTracker::start(
            Arc::clone(&storage),
            clock,
            config.session_settings(),
        );

        let state = Self {
            config,
            client,
            tracker,
            storage,
        };
        state.restore_credential();

        Ok(state)
    }

    /// Username of the logged-in user, or [`ShibespaceError::NotLoggedIn`].
    #[track_caller]
    pub fn require_login(&self) -> Result<String, ShibespaceError> {
        self.tracker
            .current_username()
            .ok_or_else(|| ShibespaceError::not_logged_in())
    }

    /// Save the client's cookie so the next invocation is authenticated too.
    pub fn persist_credential(&self) -> Result<(), ShibespaceError> {
        match self.client.credential_cookie() {
            Some(cookie) => {
                self.storage.set(CREDENTIAL_STORAGE_KEY, &cookie)?;
                debug!("Credential cookie persisted");
            }
            None => warn!("Login succeeded but the API did not set a credential cookie"),
        }
        Ok(())
    }

    pub fn clear_credential(&self) -> Result<(), ShibespaceError> {
        self.storage.remove(CREDENTIAL_STORAGE_KEY)?;
        Ok(())
    }

    /// Load the stored cookie into the client, unless the session has expired.
    fn restore_credential(&self) {
        if !self.tracker.is_logged_in() {
            // The server-side cookie has the same lifetime, so it is stale as well
            if let Err(e) = self.storage.remove(CREDENTIAL_STORAGE_KEY) {
                warn!("Failed to remove stale credential: {e}");
            }
            return;
        }

        match self.storage.get(CREDENTIAL_STORAGE_KEY) {
            Ok(Some(cookie)) => {
                self.client.restore_credential_cookie(&cookie);
                info!("Restored credential for {:?}", self.tracker.current_username());
            }
            Ok(None) => debug!("No stored credential"),
            Err(e) => warn!("Failed to read stored credential: {e}"),
        }
    }
}
