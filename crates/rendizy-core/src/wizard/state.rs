//! Wizard navigation state.
//!
//! Tracks the current block and step plus the set of steps the user has
//! completed. Navigation never performs I/O; saving happens in
//! [`super::session`].

use rendizy_types::error::WizardError;
use rendizy_types::wizard::{Modality, StepValidation, WizardBlock, WizardStep};

use super::structure::{PROPERTY_WIZARD, effective_validation, total_steps};

/// Where the wizard landed after advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next step of the same block.
    Step,
    /// Crossed into the first step of the next block.
    NextBlock,
    /// Already on the last step of the last block.
    Finished,
}

#[derive(Debug, Clone)]
pub struct WizardState {
    blocks: &'static [WizardBlock],
    block_index: usize,
    step_index: usize,
    completed: Vec<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// Start at the first step of the property wizard.
    pub fn new() -> Self {
        Self::with_structure(PROPERTY_WIZARD)
    }

    /// Start at the first step of a custom block layout.
    ///
    /// `blocks` must be non-empty and every block must hold at least one step.
    pub fn with_structure(blocks: &'static [WizardBlock]) -> Self {
        debug_assert!(blocks.iter().all(|b| !b.steps.is_empty()));
        Self {
            blocks,
            block_index: 0,
            step_index: 0,
            completed: Vec::new(),
        }
    }

    /// Restore previously completed steps (e.g. from a saved entity).
    /// Unknown ids are dropped.
    pub fn restore_completed<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            if let Some(step) = self.find_step(id.as_ref()) {
                self.mark_completed(step.id);
            }
        }
    }

    pub fn blocks(&self) -> &'static [WizardBlock] {
        self.blocks
    }

    pub fn current_block(&self) -> &'static WizardBlock {
        let blocks = self.blocks;
        &blocks[self.block_index]
    }

    pub fn current_step(&self) -> &'static WizardStep {
        &self.current_block().steps[self.step_index]
    }

    /// 1-based position of the current step across all blocks.
    pub fn current_step_number(&self) -> usize {
        let before: usize = self.blocks[..self.block_index]
            .iter()
            .map(|b| b.steps.len())
            .sum();
        before + self.step_index + 1
    }

    pub fn total_steps(&self) -> usize {
        total_steps(self.blocks)
    }

    pub fn completed_steps(&self) -> &[String] {
        &self.completed
    }

    pub fn is_completed(&self, step_id: &str) -> bool {
        self.completed.iter().any(|id| id == step_id)
    }

    /// Record a step as completed. Repeated calls are no-ops.
    pub fn mark_completed(&mut self, step_id: &str) {
        if !self.is_completed(step_id) {
            self.completed.push(step_id.to_string());
        }
    }

    /// Share of completed steps, in percent.
    pub fn progress(&self) -> f64 {
        let total = self.total_steps();
        if total == 0 {
            return 0.0;
        }
        self.completed.len() as f64 / total as f64 * 100.0
    }

    /// Share of completed steps within one block, in percent.
    pub fn block_progress(&self, block_id: &str) -> Option<f64> {
        let block = self.blocks.iter().find(|b| b.id == block_id)?;
        let done = block
            .steps
            .iter()
            .filter(|s| self.is_completed(s.id))
            .count();
        Some(done as f64 / block.steps.len() as f64 * 100.0)
    }

    /// Rounded progress as sent upstream.
    pub fn completion_percentage(&self) -> u8 {
        self.progress().round().clamp(0.0, 100.0) as u8
    }

    /// Completed steps plus the current one, without mutating state.
    ///
    /// This is what a save of the current step reports before the step is
    /// actually marked complete.
    pub fn completed_with_current(&self) -> (Vec<String>, u8) {
        let mut ids = self.completed.clone();
        let current = self.current_step().id;
        if !ids.iter().any(|id| id == current) {
            ids.push(current.to_string());
        }
        let total = self.total_steps().max(1);
        let pct = (ids.len() as f64 / total as f64 * 100.0).round() as u8;
        (ids, pct.min(100))
    }

    pub fn is_first_step(&self) -> bool {
        self.block_index == 0 && self.step_index == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.block_index == self.blocks.len() - 1
            && self.step_index == self.current_block().steps.len() - 1
    }

    /// Mark the current step complete and move forward, crossing block
    /// boundaries. On the final step the position is unchanged.
    pub fn next(&mut self) -> Advance {
        let id = self.current_step().id;
        self.mark_completed(id);

        if self.step_index + 1 < self.current_block().steps.len() {
            self.step_index += 1;
            Advance::Step
        } else if self.block_index + 1 < self.blocks.len() {
            self.block_index += 1;
            self.step_index = 0;
            Advance::NextBlock
        } else {
            Advance::Finished
        }
    }

    /// Move back one step, crossing into the previous block's last step.
    /// Returns `false` on the first step.
    pub fn previous(&mut self) -> bool {
        if self.step_index > 0 {
            self.step_index -= 1;
            true
        } else if self.block_index > 0 {
            self.block_index -= 1;
            self.step_index = self.current_block().steps.len() - 1;
            true
        } else {
            false
        }
    }

    /// Jump directly to a step.
    pub fn go_to(&mut self, block_id: &str, step_index: usize) -> Result<(), WizardError> {
        let unknown = || WizardError::UnknownStep {
            block: block_id.to_string(),
            index: step_index,
        };
        let block_index = self
            .blocks
            .iter()
            .position(|b| b.id == block_id)
            .ok_or_else(unknown)?;
        if step_index >= self.blocks[block_index].steps.len() {
            return Err(unknown());
        }
        self.block_index = block_index;
        self.step_index = step_index;
        Ok(())
    }

    /// Required steps (under `modalities`) that are not completed yet.
    pub fn missing_required(&self, modalities: &[Modality]) -> Vec<&'static WizardStep> {
        let blocks = self.blocks;
        blocks
            .iter()
            .flat_map(|b| b.steps.iter())
            .filter(|s| effective_validation(s, modalities) == StepValidation::Required)
            .filter(|s| !self.is_completed(s.id))
            .collect()
    }

    fn find_step(&self, step_id: &str) -> Option<&'static WizardStep> {
        let blocks = self.blocks;
        blocks
            .iter()
            .flat_map(|b| b.steps.iter())
            .find(|s| s.id == step_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_at_first_step() {
        let state = WizardState::new();
        assert_eq!(state.current_block().id, "content");
        assert_eq!(state.current_step().id, "content-type");
        assert_eq!(state.current_step_number(), 1);
        assert!(state.is_first_step());
        assert!(!state.is_last_step());
        assert_eq!(state.completion_percentage(), 0);
    }

    #[test]
    fn test_next_crosses_block_boundary() {
        let mut state = WizardState::new();
        for _ in 0..6 {
            assert_eq!(state.next(), Advance::Step);
        }
        assert_eq!(state.current_step().id, "content-description");

        assert_eq!(state.next(), Advance::NextBlock);
        assert_eq!(state.current_block().id, "financial");
        assert_eq!(state.current_step().id, "financial-contract");
        assert_eq!(state.current_step_number(), 8);
        assert_eq!(state.completed_steps().len(), 7);
        assert_eq!(state.block_progress("content"), Some(100.0));
    }

    #[test]
    fn test_next_on_last_step_finishes() {
        let mut state = WizardState::new();
        state.go_to("settings", 4).unwrap();
        assert!(state.is_last_step());

        assert_eq!(state.next(), Advance::Finished);
        assert_eq!(state.current_step().id, "settings-otas");
        assert!(state.is_completed("settings-otas"));
    }

    #[test]
    fn test_previous_crosses_back_without_completing() {
        let mut state = WizardState::new();
        state.go_to("financial", 0).unwrap();

        assert!(state.previous());
        assert_eq!(state.current_step().id, "content-description");
        assert!(state.completed_steps().is_empty());

        state.go_to("content", 0).unwrap();
        assert!(!state.previous());
        assert!(state.is_first_step());
    }

    #[test]
    fn test_go_to_unknown_step() {
        let mut state = WizardState::new();
        assert!(matches!(
            state.go_to("nope", 0),
            Err(WizardError::UnknownStep { .. })
        ));
        assert!(state.go_to("settings", 5).is_err());
        assert_eq!(state.current_step().id, "content-type");
    }

    #[test]
    fn test_mark_completed_is_idempotent() {
        let mut state = WizardState::new();
        state.mark_completed("content-type");
        state.mark_completed("content-type");
        assert_eq!(state.completed_steps(), ["content-type".to_string()]);
        assert_eq!(state.completion_percentage(), 6);
    }

    #[test]
    fn test_completed_with_current_does_not_mutate() {
        let mut state = WizardState::new();
        state.mark_completed("content-type");
        state.go_to("content", 1).unwrap();

        let (ids, pct) = state.completed_with_current();
        assert_eq!(ids, vec!["content-type", "content-location"]);
        assert_eq!(pct, 12);
        assert_eq!(state.completed_steps().len(), 1);
    }

    #[test]
    fn test_restore_completed_drops_unknown_ids() {
        let mut state = WizardState::new();
        state.restore_completed(["content-type", "bogus", "settings-rules"]);
        assert_eq!(state.completed_steps().len(), 2);
        assert_eq!(state.block_progress("settings"), Some(20.0));
        assert_eq!(state.block_progress("bogus"), None);
    }

    #[test]
    fn test_missing_required_depends_on_modality() {
        let state = WizardState::new();
        let base = state.missing_required(&[Modality::BuySell]).len();
        let str_ = state.missing_required(&[Modality::ShortTermRental]).len();
        // content-type, content-location, content-description, financial-contract,
        // financial-pricing, settings-rules
        assert_eq!(base, 6);
        assert_eq!(str_, 10);
    }
}
