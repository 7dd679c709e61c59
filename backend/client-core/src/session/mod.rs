//! Client-side session tracking.
//!
//! The API authenticates with an httponly `jwt` cookie this code never sees.
//! To know who is logged in, the client keeps a [`SessionRecord`] next to it
//! with the same one hour lifetime and watches the clock.
//!
//! # Lifecycle
//!
//! - [`SessionTracker::start`] reads the record once (the initial check)
//! - [`SessionTracker::record_login`] writes a fresh record after the API accepted credentials
//! - [`SessionTracker::trigger_recheck`] re-reads the record immediately
//! - while a record is valid, one background task re-checks the clock every
//!   poll interval and clears the record once it has expired
//! - [`SessionTracker::record_logout`] removes the record explicitly
//!
//! The exposed username is advisory. It decides which affordances to show;
//! the server decides what is allowed.

pub mod clock;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use storage::{FileStorage, LocalStorage, MemoryStorage};

use crate::error::session::SessionError;

use common::ErrorLocation;
use models::SessionRecord;

use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

pub const SESSION_STORAGE_KEY: &str = "session";
pub const DEFAULT_VALIDITY_WINDOW: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Storage key holding the serialized record.
    pub storage_key: String,
    /// Lifetime of a record, matching the server credential.
    pub validity_window: Duration,
    /// How often a valid session re-checks the clock.
    pub poll_interval: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            storage_key: SESSION_STORAGE_KEY.to_string(),
            validity_window: DEFAULT_VALIDITY_WINDOW,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Tracks whether a user is logged in on this client.
///
/// Owns at most one expiry poll task. Every recheck aborts the previous task
/// before deciding whether to start a new one, and dropping the tracker
/// aborts it as well.
///
/// Must be used from within a Tokio runtime for expiry polling; without one
/// the initial check still works but expiry is only noticed on the next recheck.
pub struct SessionTracker {
    storage: Arc<dyn LocalStorage>,
    clock: Arc<dyn Clock>,
    settings: SessionSettings,
    username_tx: Arc<watch::Sender<Option<String>>>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl SessionTracker {
    /// Create a tracker without reading storage yet. Username starts as `None`.
    pub fn new(
        storage: Arc<dyn LocalStorage>,
        clock: Arc<dyn Clock>,
        settings: SessionSettings,
    ) -> Self {
        let (username_tx, _) = watch::channel(None);

        Self {
            storage,
            clock,
            settings,
            username_tx: Arc::new(username_tx),
            poll_task: Mutex::new(None),
        }
    }

    /// Create a tracker and run the initial check.
    pub fn start(
        storage: Arc<dyn LocalStorage>,
        clock: Arc<dyn Clock>,
        settings: SessionSettings,
    ) -> Self {
        let tracker = Self::new(storage, clock, settings);
        tracker.trigger_recheck();
        tracker
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Persist a record for `username` valid for one validity window from now.
    ///
    /// Only writes storage. Call [`trigger_recheck`](Self::trigger_recheck)
    /// afterwards to expose the new username.
    #[track_caller]
    pub fn record_login(&self, username: &str) -> Result<SessionRecord, SessionError> {
        if username.is_empty() {
            return Err(SessionError::EmptyUsername {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let validity_ms = i64::try_from(self.settings.validity_window.as_millis()).unwrap_or(i64::MAX);
        let record = SessionRecord::new(username, self.clock.now_millis(), validity_ms);
        let serialized = serde_json::to_string(&record)?;

        self.storage.set(&self.settings.storage_key, &serialized)?;

        info!(
            "Session recorded for '{}' until {}",
            record.username, record.expires_at_epoch_ms
        );
        Ok(record)
    }

    /// Remove the stored record and publish the logged-out state.
    #[track_caller]
    pub fn record_logout(&self) -> Result<(), SessionError> {
        self.storage.remove(&self.settings.storage_key)?;
        info!("Session record cleared on logout");
        self.trigger_recheck();
        Ok(())
    }

    /// Re-read the stored record now instead of waiting for the next poll.
    ///
    /// The poll slot stays locked from cancelling the old task until the new
    /// one is stored, so concurrent rechecks leave exactly one task behind.
    pub fn trigger_recheck(&self) {
        let mut poll_task = self.lock_poll_task();
        abort_poll(&mut poll_task);

        let Some(record) = read_record(self.storage.as_ref(), &self.settings.storage_key) else {
            publish(&self.username_tx, None);
            return;
        };

        let now = self.clock.now_millis();
        if record.is_expired_at(now) {
            info!("Stored session for '{}' has expired", record.username);
            remove_record(self.storage.as_ref(), &self.settings.storage_key);
            publish(&self.username_tx, None);
            return;
        }

        publish(&self.username_tx, Some(record.username.clone()));
        *poll_task = self.spawn_poll(record);
    }

    /// Username of the logged-in user, if the session is believed valid.
    pub fn current_username(&self) -> Option<String> {
        self.username_tx.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.username_tx.borrow().is_some()
    }

    /// Receiver notified whenever the exposed username changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.username_tx.subscribe()
    }

    /// Whether an expiry poll task is currently running.
    pub fn is_polling(&self) -> bool {
        match self.poll_task.lock() {
            Ok(guard) => guard.as_ref().is_some_and(|task| !task.is_finished()),
            Err(_) => false,
        }
    }

    /// Stop the expiry poll without touching storage or the exposed username.
    pub fn shutdown(&self) {
        self.cancel_poll();
    }

    fn cancel_poll(&self) {
        abort_poll(&mut self.lock_poll_task());
    }

    fn lock_poll_task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        match self.poll_task.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn spawn_poll(&self, record: SessionRecord) -> Option<JoinHandle<()>> {
        let Ok(runtime) = Handle::try_current() else {
            warn!("No Tokio runtime available, session expiry will not be polled");
            return None;
        };

        let task = runtime.spawn(poll_expiry(
            Arc::clone(&self.storage),
            Arc::clone(&self.clock),
            self.settings.storage_key.clone(),
            self.settings.poll_interval,
            record,
            Arc::clone(&self.username_tx),
        ));
        debug!("Session poll task started");
        Some(task)
    }
}

impl Drop for SessionTracker {
    fn drop(&mut self) {
        self.cancel_poll();
    }
}

fn abort_poll(slot: &mut Option<JoinHandle<()>>) {
    if let Some(task) = slot.take() {
        task.abort();
        debug!("Session poll task cancelled");
    }
}

/// Re-check the clock every `poll_interval` until `record` expires.
async fn poll_expiry(
    storage: Arc<dyn LocalStorage>,
    clock: Arc<dyn Clock>,
    storage_key: String,
    poll_interval: Duration,
    record: SessionRecord,
    username_tx: Arc<watch::Sender<Option<String>>>,
) {
    let mut ticker = interval_at(Instant::now() + poll_interval, poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        if record.is_valid_at(clock.now_millis()) {
            continue;
        }

        info!("Session for '{}' expired", record.username);

        // A newer login may have replaced the record without a recheck
        match read_record(storage.as_ref(), &storage_key) {
            Some(stored) if stored != record => {
                debug!("Stored session changed since polling began, leaving it in place");
            }
            _ => remove_record(storage.as_ref(), &storage_key),
        }

        publish(&username_tx, None);
        break;
    }
}

/// Load and decode the record. Missing, unreadable or malformed all mean "logged out".
fn read_record(storage: &dyn LocalStorage, key: &str) -> Option<SessionRecord> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read session record, treating as logged out: {e}");
            return None;
        }
    };

    match serde_json::from_str::<SessionRecord>(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("Malformed session record, treating as logged out: {e}");
            None
        }
    }
}

fn remove_record(storage: &dyn LocalStorage, key: &str) {
    if let Err(e) = storage.remove(key) {
        warn!("Failed to remove expired session record: {e}");
    }
}

fn publish(username_tx: &watch::Sender<Option<String>>, next: Option<String>) {
    let changed = username_tx.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });

    if changed {
        match username_tx.borrow().as_deref() {
            Some(username) => info!("Logged in as '{username}'"),
            None => info!("Logged out"),
        }
    }
}
