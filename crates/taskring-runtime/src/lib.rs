//! # taskring-runtime
//!
//! Threaded runtime for the taskring dispatcher.
//!
//! This crate provides:
//! - `Dispatcher`: bounded ring + worker pool + drain/shutdown protocol
//! - Worker thread loop
//! - `DispatcherConfig` with environment overrides
//! - Platform thread identity for logging

pub mod config;
pub mod dispatcher;
pub mod platform;
mod worker;

// Re-exports
pub use config::DispatcherConfig;
pub use dispatcher::{Dispatcher, DispatcherState, DispatcherStats};
pub use platform::thread_id;
