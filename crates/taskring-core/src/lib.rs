//! # taskring-core
//!
//! Core types for the taskring dispatcher.
//!
//! This crate has no threads and no locks. The runtime crate layers the
//! dispatcher's synchronization on top of these types.
//!
//! ## Modules
//!
//! - `ring` - Fixed-capacity circular buffer
//! - `task` - Task trait and job/payload envelope
//! - `error` - Error types
//! - `kprint` - Leveled stderr logging macros
//! - `env` - Environment variable utilities

pub mod ring;
pub mod task;
pub mod error;
pub mod kprint;
pub mod env;

// Re-exports for convenience
pub use ring::BoundedQueue;
pub use task::{BoxedTask, Task, TaskEnvelope};
pub use error::{DispatchError, DispatchResult, TrySubmitError, WorkerError};
pub use env::{env_get, env_get_bool, env_get_opt};

/// Shared constants
pub mod constants {
    /// Queue capacity used when nothing else is configured
    pub const DEFAULT_QUEUE_CAPACITY: usize = 8;

    /// Upper bound on workers accepted by config validation
    pub const MAX_WORKERS: usize = 64;

    /// Worker thread name prefix
    pub const DEFAULT_THREAD_NAME: &str = "taskring-worker";
}
