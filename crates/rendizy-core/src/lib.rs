//! Draft persistence logic and port trait definitions for Rendizy.
//!
//! This crate defines the "ports" (`DraftStore`, `SaveTarget`, `Notifier`)
//! that the infrastructure layer implements, the debounced
//! `DraftPersistenceController`, and the property wizard lifecycle. It
//! depends only on `rendizy-types` -- never on `rendizy-infra` or any
//! filesystem/HTTP crate.

pub mod draft;
pub mod wizard;
