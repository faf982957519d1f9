//! Dispatcher configuration
//!
//! Compile-time defaults with runtime environment overrides.
//!
//! # Example
//!
//! ```rust,ignore
//! use taskring_runtime::DispatcherConfig;
//!
//! // Defaults with env overrides
//! let config = DispatcherConfig::from_env();
//!
//! // Or fully programmatic
//! let config = DispatcherConfig::new()
//!     .queue_capacity(8)
//!     .num_workers(4);
//! ```

use taskring_core::constants::{DEFAULT_QUEUE_CAPACITY, DEFAULT_THREAD_NAME, MAX_WORKERS};
use taskring_core::env::{env_get, env_get_opt};
use taskring_core::{DispatchError, DispatchResult};

/// Dispatcher configuration with builder pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Fixed capacity of the task ring
    pub queue_capacity: usize,
    /// Workers started by `Dispatcher::start`
    pub num_workers: usize,
    /// Worker thread name prefix; threads are named `<prefix>-<index>`
    pub thread_name: String,
    /// Worker stack size in bytes (`None` = std default)
    pub stack_size: Option<usize>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl DispatcherConfig {
    /// Library defaults, no environment lookup.
    pub fn new() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            num_workers: default_num_workers(),
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            stack_size: None,
        }
    }

    /// Library defaults with environment overrides.
    ///
    /// Environment variables (all optional):
    /// - `TR_QUEUE_CAPACITY` - Task ring capacity
    /// - `TR_NUM_WORKERS` - Workers started by `Dispatcher::start`
    /// - `TR_THREAD_NAME` - Worker thread name prefix
    /// - `TR_STACK_SIZE` - Worker stack size in bytes (0 = std default)
    pub fn from_env() -> Self {
        let defaults = Self::new();
        Self {
            queue_capacity: env_get("TR_QUEUE_CAPACITY", defaults.queue_capacity),
            num_workers: env_get("TR_NUM_WORKERS", defaults.num_workers),
            thread_name: env_get("TR_THREAD_NAME", defaults.thread_name),
            stack_size: env_get_opt::<usize>("TR_STACK_SIZE").filter(|&n| n > 0),
        }
    }

    pub fn queue_capacity(mut self, n: usize) -> Self {
        self.queue_capacity = n;
        self
    }

    pub fn num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    pub fn thread_name(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name = prefix.into();
        self
    }

    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> DispatchResult<()> {
        if self.queue_capacity == 0 {
            return Err(DispatchError::Config("queue_capacity must be at least 1"));
        }
        if self.num_workers == 0 {
            return Err(DispatchError::Config("num_workers must be at least 1"));
        }
        if self.num_workers > MAX_WORKERS {
            return Err(DispatchError::Config("num_workers exceeds maximum"));
        }
        if self.thread_name.is_empty() {
            return Err(DispatchError::Config("thread_name must not be empty"));
        }
        Ok(())
    }
}

fn default_num_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .min(MAX_WORKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = DispatcherConfig::new();
        assert_eq!(c.queue_capacity, 8);
        assert!(c.num_workers >= 1 && c.num_workers <= MAX_WORKERS);
        assert_eq!(c.thread_name, "taskring-worker");
        assert_eq!(c.stack_size, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let c = DispatcherConfig::new()
            .queue_capacity(16)
            .num_workers(3)
            .thread_name("pool")
            .stack_size(256 * 1024);
        assert_eq!(c.queue_capacity, 16);
        assert_eq!(c.num_workers, 3);
        assert_eq!(c.thread_name, "pool");
        assert_eq!(c.stack_size, Some(256 * 1024));
    }

    #[test]
    fn test_validate_rejects() {
        let c = DispatcherConfig::new().queue_capacity(0);
        assert_eq!(
            c.validate(),
            Err(DispatchError::Config("queue_capacity must be at least 1"))
        );

        let c = DispatcherConfig::new().num_workers(0);
        assert!(c.validate().is_err());

        let c = DispatcherConfig::new().num_workers(MAX_WORKERS + 1);
        assert!(c.validate().is_err());

        let c = DispatcherConfig::new().thread_name("");
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("TR_QUEUE_CAPACITY", "32");
        std::env::set_var("TR_STACK_SIZE", "0");
        let c = DispatcherConfig::from_env();
        std::env::remove_var("TR_QUEUE_CAPACITY");
        std::env::remove_var("TR_STACK_SIZE");

        assert_eq!(c.queue_capacity, 32);
        assert_eq!(c.stack_size, None);
    }
}
