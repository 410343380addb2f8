//! Saving wizard progress step by step.
//!
//! "Save and next" persists the whole form together with the progress
//! bookkeeping, and only advances once the save succeeded. Moving back or
//! jumping between steps never saves.

use std::marker::PhantomData;

use rendizy_types::draft::{DraftKey, SaveOutcome};
use rendizy_types::error::WizardError;
use rendizy_types::wizard::WizardSubmission;
use serde::Serialize;
use tracing::{info, warn};

use super::state::{Advance, WizardState};
use crate::draft::controller::DraftPersistenceController;
use crate::draft::discard::DraftDiscardHelper;
use crate::draft::store::DraftStore;
use crate::draft::target::SaveTarget;

/// A wizard bound to a save target and the entity's local draft record.
pub struct WizardSession<D, T, S>
where
    T: SaveTarget<WizardSubmission<D>>,
    S: DraftStore,
{
    state: WizardState,
    target: T,
    discard: DraftDiscardHelper<S>,
    key: DraftKey,
    _draft: PhantomData<fn(D)>,
}

impl<D, T, S> WizardSession<D, T, S>
where
    D: Serialize + Send + Sync,
    T: SaveTarget<WizardSubmission<D>>,
    S: DraftStore,
{
    pub fn new(state: WizardState, target: T, store: S, key: DraftKey) -> Self {
        Self {
            state,
            target,
            discard: DraftDiscardHelper::new(store),
            key,
            _draft: PhantomData,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Persist `data` with the current step counted as completed, then move
    /// forward. On failure the position and completed set are unchanged.
    pub async fn save_and_advance(&mut self, data: D) -> Result<Advance, WizardError> {
        self.submit(data).await?;
        let advance = self.state.next();
        if advance == Advance::Finished {
            info!(key = %self.key, "all wizard steps completed");
        }
        Ok(advance)
    }

    /// Persist `data` from the final step and return what was sent.
    pub async fn finish(&mut self, data: D) -> Result<WizardSubmission<D>, WizardError> {
        let submission = self.submit(data).await?;
        let id = self.state.current_step().id;
        self.state.mark_completed(id);
        info!(
            key = %self.key,
            completion = submission.completion_percentage,
            "wizard finished"
        );
        Ok(submission)
    }

    /// Step back without saving.
    pub fn previous(&mut self) -> bool {
        self.state.previous()
    }

    /// Jump to a step without saving.
    pub fn go_to(&mut self, block_id: &str, step_index: usize) -> Result<(), WizardError> {
        self.state.go_to(block_id, step_index)
    }

    async fn submit(&mut self, data: D) -> Result<WizardSubmission<D>, WizardError> {
        let step = self.state.current_step().id;
        let (completed_steps, completion_percentage) = self.state.completed_with_current();
        let submission = WizardSubmission {
            data,
            completion_percentage,
            completed_steps,
        };

        if let Err(source) = self.target.save(&submission).await {
            warn!(key = %self.key, step, error = %source, "wizard step save failed");
            return Err(WizardError::Save {
                step: step.to_string(),
                source,
            });
        }

        // New entities keep their draft until they exist upstream.
        if !self.key.is_new_entity() {
            self.discard.discard(&self.key);
        }
        Ok(submission)
    }
}

/// Flush the controller's pending edits, then advance on success.
///
/// Used when the wizard form is itself driven by a
/// [`DraftPersistenceController`]: the step only advances once the current
/// draft is persisted (or was already up to date).
pub async fn advance_after_checkpoint<D, T, S>(
    state: &mut WizardState,
    controller: &DraftPersistenceController<D, T, S>,
) -> Result<Advance, WizardError>
where
    D: Serialize + Clone + Send + Sync + 'static,
    T: SaveTarget<D> + 'static,
    S: DraftStore + 'static,
{
    match controller.trigger_save().await {
        SaveOutcome::Unchanged | SaveOutcome::Saved => Ok(state.next()),
        SaveOutcome::Failed => Err(WizardError::Checkpoint {
            step: state.current_step().id.to_string(),
        }),
    }
}
