//! Shared domain types for Rendizy draft persistence.
//!
//! This crate contains the types shared by the controller, the wizard and
//! the adapters: save status, draft keys, notices, wizard structure, global
//! configuration and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, thiserror.

pub mod config;
pub mod draft;
pub mod error;
pub mod notice;
pub mod wizard;
