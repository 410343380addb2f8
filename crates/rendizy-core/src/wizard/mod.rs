//! Property editor wizard: structure, navigation and step saving.

pub mod session;
pub mod state;
pub mod structure;

pub use session::{WizardSession, advance_after_checkpoint};
pub use state::{Advance, WizardState};
pub use structure::{PROPERTY_WIZARD, effective_validation};
