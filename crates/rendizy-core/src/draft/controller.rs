//! Debounced draft persistence controller.
//!
//! `DraftPersistenceController` receives the current form state on every
//! tick (`update`), schedules a remote save once edits have been quiet for
//! the configured debounce interval, and reports progress through a
//! `SaveStatus` watch channel and an optional `Notifier`.
//!
//! Every save attempt first writes the draft to the local `DraftStore`, and
//! dropping (or disposing) the controller flushes the current draft there
//! unconditionally. Remote failures never escape: they surface as
//! `SaveStatus::Error`, `SaveOutcome::Failed` and an error notice.
//!
//! Attempts are serialized by an in-flight lock. An attempt that was queued
//! behind another re-checks the last saved snapshot before calling the
//! target, so a manual checkpoint racing an automatic save of the same
//! payload does not reach the backend twice.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use rendizy_types::config::AutoSaveConfig;
use rendizy_types::draft::{DraftKey, SaveOutcome, SaveStatus};
use rendizy_types::error::SaveError;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::notifier::{Notifier, TracingNotifier};
use super::snapshot::snapshot;
use super::store::DraftStore;
use super::target::SaveTarget;

const SAVING_MESSAGE: &str = "Saving...";
const SAVED_MESSAGE: &str = "Changes saved";
const FAILED_MESSAGE: &str = "Could not save changes. Your data is kept locally.";

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

/// A scheduled save that has not fired yet.
struct PendingSave {
    id: u64,
    cancel: CancellationToken,
}

struct ControllerState<D> {
    current: D,
    current_snapshot: String,
    last_saved: String,
    pending: Option<PendingSave>,
    next_pending_id: u64,
    status_reset: Option<JoinHandle<()>>,
    /// Bumped on every status change so a stale reset timer cannot
    /// overwrite a newer status.
    status_generation: u64,
    enabled: bool,
    /// Set by teardown. The flushed draft is final; in-flight attempts
    /// must not overwrite it.
    disposed: bool,
}

struct Shared<D, T, S> {
    key: DraftKey,
    target: T,
    store: S,
    notifier: Arc<dyn Notifier>,
    config: AutoSaveConfig,
    state: Mutex<ControllerState<D>>,
    status: watch::Sender<SaveStatus>,
    in_flight: tokio::sync::Mutex<()>,
}

impl<D, T, S> Shared<D, T, S> {
    fn lock_state(&self) -> MutexGuard<'_, ControllerState<D>> {
        self.state.lock().expect("draft controller lock poisoned")
    }

    fn cancel_pending(state: &mut ControllerState<D>) {
        if let Some(pending) = state.pending.take() {
            pending.cancel.cancel();
        }
    }

    /// Change the status, invalidating any scheduled reset.
    fn set_status(&self, state: &mut ControllerState<D>, status: SaveStatus) {
        state.status_generation += 1;
        if let Some(handle) = state.status_reset.take() {
            handle.abort();
        }
        self.status.send_replace(status);
    }
}

impl<D, T, S: DraftStore> Shared<D, T, S> {
    fn write_local(&self, snapshot: &str) {
        if let Err(e) = self.store.set(self.key.as_str(), snapshot) {
            warn!(key = %self.key, error = %e, "failed to write local draft");
        }
    }

    /// Teardown: cancel timers and leave the current draft in the local store.
    fn flush(&self) {
        let mut state = self.lock_state();
        Self::cancel_pending(&mut state);
        if let Some(handle) = state.status_reset.take() {
            handle.abort();
        }
        state.disposed = true;
        self.write_local(&state.current_snapshot);
        debug!(key = %self.key, "draft flushed to local store");
    }
}

impl<D, T, S> Shared<D, T, S>
where
    D: Serialize + Clone + Send + Sync + 'static,
    T: SaveTarget<D> + 'static,
    S: DraftStore + 'static,
{
    /// Schedule an automatic save `debounce` from now, replacing any pending one.
    fn schedule(self: &Arc<Self>, state: &mut ControllerState<D>) {
        Self::cancel_pending(state);

        state.next_pending_id += 1;
        let id = state.next_pending_id;
        let cancel = CancellationToken::new();
        state.pending = Some(PendingSave {
            id,
            cancel: cancel.clone(),
        });

        let shared = Arc::clone(self);
        let delay = self.config.debounce();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }

            let (draft, snapshot) = {
                let mut state = shared.lock_state();
                match &state.pending {
                    Some(pending) if pending.id == id => {}
                    _ => return,
                }
                state.pending = None;
                (state.current.clone(), state.current_snapshot.clone())
            };

            debug!(key = %shared.key, "debounce elapsed, saving draft");
            shared.attempt(draft, snapshot).await;
        });
    }

    /// Return the status to idle once `after` has elapsed, unless it changes first.
    fn schedule_reset(self: &Arc<Self>, state: &mut ControllerState<D>, after: Duration) {
        let generation = state.status_generation;
        let weak: Weak<Self> = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if let Some(shared) = weak.upgrade() {
                let mut state = shared.lock_state();
                if state.status_generation == generation {
                    state.status_reset = None;
                    shared.status.send_replace(SaveStatus::Idle);
                }
            }
        });
        if let Some(previous) = state.status_reset.replace(handle) {
            previous.abort();
        }
    }

    /// One save attempt, shared by automatic and manual triggers.
    async fn attempt(self: &Arc<Self>, draft: D, snapshot: String) -> SaveOutcome {
        let _in_flight = self.in_flight.lock().await;

        let unchanged = self.lock_state().last_saved == snapshot;
        if unchanged {
            debug!(key = %self.key, "draft matches last saved snapshot, skipping");
            return SaveOutcome::Unchanged;
        }

        {
            let mut state = self.lock_state();
            if !state.disposed {
                self.write_local(&snapshot);
            }
            self.set_status(&mut state, SaveStatus::Saving);
        }
        if self.config.notify {
            self.notifier.notify_info(SAVING_MESSAGE);
        }

        match self.target.save(&draft).await {
            Ok(()) => {
                {
                    let mut state = self.lock_state();
                    if state.disposed {
                        state.last_saved = snapshot;
                        info!(key = %self.key, "draft saved after teardown");
                        return SaveOutcome::Saved;
                    }
                    self.write_local(&snapshot);
                    state.last_saved = snapshot;
                    self.set_status(&mut state, SaveStatus::Saved);
                    self.schedule_reset(&mut state, self.config.saved_display());
                }
                if self.config.notify {
                    self.notifier.notify_success(SAVED_MESSAGE);
                }
                info!(key = %self.key, "draft saved");
                SaveOutcome::Saved
            }
            Err(e) => {
                {
                    let mut state = self.lock_state();
                    self.set_status(&mut state, SaveStatus::Error);
                    self.schedule_reset(&mut state, self.config.error_display());
                }
                if self.config.notify {
                    self.notifier.notify_error(FAILED_MESSAGE);
                }
                warn!(key = %self.key, error = %e, "remote save failed, draft kept locally");
                SaveOutcome::Failed
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Public controller
// ---------------------------------------------------------------------------

/// Debounced persistence of one entity's draft.
///
/// Must be used from within a Tokio runtime: scheduling spawns timer tasks.
/// Dropping the controller is its teardown (see [`dispose`](Self::dispose)).
pub struct DraftPersistenceController<D, T, S>
where
    D: Serialize + Clone + Send + Sync + 'static,
    T: SaveTarget<D> + 'static,
    S: DraftStore + 'static,
{
    shared: Arc<Shared<D, T, S>>,
    disposed: bool,
}

impl<D, T, S> DraftPersistenceController<D, T, S>
where
    D: Serialize + Clone + Send + Sync + 'static,
    T: SaveTarget<D> + 'static,
    S: DraftStore + 'static,
{
    /// Create a controller that reports notices to the tracing log.
    ///
    /// `initial` becomes the last saved snapshot, so data the caller just
    /// loaded is never saved back.
    pub fn new(
        key: DraftKey,
        initial: D,
        target: T,
        store: S,
        config: AutoSaveConfig,
    ) -> Result<Self, SaveError> {
        Self::with_notifier(key, initial, target, store, config, Arc::new(TracingNotifier))
    }

    /// Create a controller with an explicit notifier.
    pub fn with_notifier(
        key: DraftKey,
        initial: D,
        target: T,
        store: S,
        config: AutoSaveConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, SaveError> {
        let initial_snapshot = snapshot(&initial)?;
        let (status, _) = watch::channel(SaveStatus::Idle);

        let state = ControllerState {
            current: initial,
            current_snapshot: initial_snapshot.clone(),
            last_saved: initial_snapshot,
            pending: None,
            next_pending_id: 0,
            status_reset: None,
            status_generation: 0,
            enabled: config.enabled,
            disposed: false,
        };

        debug!(key = %key, debounce_ms = config.debounce_ms, "draft controller created");

        Ok(Self {
            shared: Arc::new(Shared {
                key,
                target,
                store,
                notifier,
                config,
                state: Mutex::new(state),
                status,
                in_flight: tokio::sync::Mutex::new(()),
            }),
            disposed: false,
        })
    }

    /// Feed the current form state (one "tick").
    ///
    /// When the draft differs from the previous tick, any pending save is
    /// cancelled and, if the draft also differs from the last saved snapshot,
    /// a new save is scheduled one debounce interval from now.
    pub fn update(&self, draft: D) {
        let draft_snapshot = match snapshot(&draft) {
            Ok(s) => s,
            Err(e) => {
                warn!(key = %self.shared.key, error = %e, "draft could not be serialized, tick ignored");
                return;
            }
        };

        let mut state = self.shared.lock_state();
        if state.current_snapshot == draft_snapshot {
            return;
        }
        state.current = draft;
        state.current_snapshot = draft_snapshot;

        Shared::<D, T, S>::cancel_pending(&mut state);
        if state.enabled && state.current_snapshot != state.last_saved {
            self.shared.schedule(&mut state);
        }
    }

    /// Save now, bypassing the debounce.
    ///
    /// Cancels any pending automatic save. Returns `Unchanged` without
    /// touching the status when the draft matches the last saved snapshot.
    pub async fn trigger_save(&self) -> SaveOutcome {
        let (draft, draft_snapshot) = {
            let mut state = self.shared.lock_state();
            Shared::<D, T, S>::cancel_pending(&mut state);
            if state.current_snapshot == state.last_saved {
                return SaveOutcome::Unchanged;
            }
            (state.current.clone(), state.current_snapshot.clone())
        };

        self.shared.attempt(draft, draft_snapshot).await
    }

    /// Force the status back to idle immediately.
    pub fn reset_status(&self) {
        let mut state = self.shared.lock_state();
        self.shared.set_status(&mut state, SaveStatus::Idle);
    }

    /// Turn automatic saving on or off.
    ///
    /// Disabling cancels a pending save. Re-enabling with unsaved changes
    /// schedules one.
    pub fn set_enabled(&self, enabled: bool) {
        let mut state = self.shared.lock_state();
        if state.enabled == enabled {
            return;
        }
        state.enabled = enabled;

        if enabled {
            if state.current_snapshot != state.last_saved {
                self.shared.schedule(&mut state);
            }
        } else {
            Shared::<D, T, S>::cancel_pending(&mut state);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.lock_state().enabled
    }

    pub fn status(&self) -> SaveStatus {
        *self.shared.status.borrow()
    }

    /// Subscribe to status changes.
    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.shared.status.subscribe()
    }

    /// Whether the current draft differs from the last saved snapshot.
    pub fn is_dirty(&self) -> bool {
        let state = self.shared.lock_state();
        state.current_snapshot != state.last_saved
    }

    /// Whether an automatic save is scheduled and has not fired yet.
    pub fn has_pending_save(&self) -> bool {
        self.shared.lock_state().pending.is_some()
    }

    pub fn last_saved_snapshot(&self) -> String {
        self.shared.lock_state().last_saved.clone()
    }

    pub fn current_draft(&self) -> D {
        self.shared.lock_state().current.clone()
    }

    pub fn key(&self) -> &DraftKey {
        &self.shared.key
    }

    /// Tear the controller down.
    ///
    /// Cancels any pending save and writes the current draft to the local
    /// store whether or not it was saved remotely. Dropping the controller
    /// does the same.
    pub fn dispose(mut self) {
        self.shared.flush();
        self.disposed = true;
    }
}

impl<D, T, S> Drop for DraftPersistenceController<D, T, S>
where
    D: Serialize + Clone + Send + Sync + 'static,
    T: SaveTarget<D> + 'static,
    S: DraftStore + 'static,
{
    fn drop(&mut self) {
        if !self.disposed {
            self.shared.flush();
        }
    }
}
