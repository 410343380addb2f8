//! Debounced draft persistence.
//!
//! The controller persists a continuously-edited draft to a remote
//! `SaveTarget` after a quiet period, keeps a copy in a local `DraftStore`
//! as a crash-safety net, and reports progress through `SaveStatus` and an
//! optional `Notifier`. The recovery and discard helpers read and delete
//! those local copies.

pub mod controller;
pub mod discard;
pub mod memory;
pub mod notifier;
pub mod recovery;
pub mod snapshot;
pub mod store;
pub mod target;
