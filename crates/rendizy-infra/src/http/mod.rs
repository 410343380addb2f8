//! HTTP adapters.

pub mod save_target;

pub use save_target::HttpSaveTarget;
