//! Infrastructure layer for Rendizy.
//!
//! Contains implementations of the ports defined in `rendizy-core`: a
//! file-backed `DraftStore`, an HTTP `SaveTarget`, and the `config.toml`
//! loader.

pub mod config;
pub mod filesystem;
pub mod http;
