//! Error types for the taskring dispatcher

use core::fmt;

/// Result type for dispatcher operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors returned by dispatcher operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Shutdown was already requested; no new work or workers are accepted
    ShutDown,

    /// `spawn_workers` was asked for zero threads
    InvalidWorkerCount,

    /// Configuration rejected by `validate()`
    Config(&'static str),

    /// Worker thread error
    Worker(WorkerError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::ShutDown => write!(f, "dispatcher is shut down"),
            DispatchError::InvalidWorkerCount => write!(f, "worker count must be at least 1"),
            DispatchError::Config(msg) => write!(f, "invalid config: {}", msg),
            DispatchError::Worker(e) => write!(f, "worker error: {}", e),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Worker thread related errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    /// Failed to spawn worker thread
    SpawnFailed,

    /// Worker thread panicked outside of job execution
    Panicked,
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerError::SpawnFailed => write!(f, "failed to spawn worker thread"),
            WorkerError::Panicked => write!(f, "worker thread panicked"),
        }
    }
}

impl From<WorkerError> for DispatchError {
    fn from(e: WorkerError) -> Self {
        DispatchError::Worker(e)
    }
}

/// Error returned by a non-blocking submit; hands the task back
#[derive(Clone, PartialEq, Eq)]
pub enum TrySubmitError<T> {
    /// Queue is at capacity
    Full(T),

    /// Shutdown was already requested
    ShutDown(T),
}

impl<T> TrySubmitError<T> {
    /// Recover the rejected task
    pub fn into_inner(self) -> T {
        match self {
            TrySubmitError::Full(t) | TrySubmitError::ShutDown(t) => t,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, TrySubmitError::Full(_))
    }
}

impl<T> fmt::Debug for TrySubmitError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrySubmitError::Full(_) => write!(f, "Full(..)"),
            TrySubmitError::ShutDown(_) => write!(f, "ShutDown(..)"),
        }
    }
}

impl<T> fmt::Display for TrySubmitError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrySubmitError::Full(_) => write!(f, "task queue full"),
            TrySubmitError::ShutDown(_) => write!(f, "dispatcher is shut down"),
        }
    }
}

impl<T> std::error::Error for TrySubmitError<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = DispatchError::ShutDown;
        assert_eq!(format!("{}", e), "dispatcher is shut down");

        let e = DispatchError::Worker(WorkerError::SpawnFailed);
        assert_eq!(format!("{}", e), "worker error: failed to spawn worker thread");

        let e = DispatchError::Config("queue_capacity must be at least 1");
        assert_eq!(format!("{}", e), "invalid config: queue_capacity must be at least 1");
    }

    #[test]
    fn test_error_conversion() {
        let err: DispatchError = WorkerError::SpawnFailed.into();
        assert!(matches!(err, DispatchError::Worker(WorkerError::SpawnFailed)));
    }

    #[test]
    fn test_try_submit_error_returns_task() {
        let e = TrySubmitError::Full(42u32);
        assert!(e.is_full());
        assert_eq!(format!("{}", e), "task queue full");
        assert_eq!(e.into_inner(), 42);

        let e = TrySubmitError::ShutDown("job");
        assert!(!e.is_full());
        assert_eq!(format!("{:?}", e), "ShutDown(..)");
        assert_eq!(e.into_inner(), "job");
    }
}
