//! # taskring - Fixed-capacity task dispatcher
//!
//! A bounded ring buffer feeding a fixed pool of OS worker threads.
//!
//! - **Backpressure**: `add_task` blocks while the ring is full
//! - **Drain barrier**: `sync_workers` returns once every previously
//!   submitted task has finished executing
//! - **Shutdown**: `join_workers` drains, stops and joins every worker
//! - **Typed payloads**: a job and its payload are paired at compile time
//! - **Panic isolation**: a panicking job is counted and logged; its worker
//!   keeps running
//!
//! ## Quick Start
//!
//! ```ignore
//! use taskring::{Dispatcher, DispatcherConfig};
//!
//! fn main() -> taskring::DispatchResult<()> {
//!     let dispatcher = Dispatcher::new(DispatcherConfig::new().queue_capacity(8))?;
//!     dispatcher.spawn_workers(4)?;
//!
//!     for i in 0..20u64 {
//!         dispatcher.add_task(|n: u64| println!("sum: {}", (0..n).sum::<u64>()), 10 * i)?;
//!     }
//!     dispatcher.sync_workers();
//!
//!     dispatcher.join_workers()
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  add_task   ┌──────────────────────────┐
//! │  Producers   │ ──────────▶ │  Mutex<DispatchState>    │
//! └──────────────┘  (blocks    │  ring · in_flight · flag │
//! ┌──────────────┐   if full)  └──────────────────────────┘
//! │  Controller  │ sync/join        │ work_available   ▲ consumer_ready
//! └──────────────┘                  ▼                  │
//!                      ┌────────┐ ┌────────┐ ┌────────┐
//!                      │ Worker │ │ Worker │ │ Worker │
//!                      └────────┘ └────────┘ └────────┘
//! ```

// Re-export core types
pub use taskring_core::{
    BoundedQueue,
    BoxedTask,
    Task,
    TaskEnvelope,
    DispatchError,
    DispatchResult,
    TrySubmitError,
    WorkerError,
};
pub use taskring_core::constants;

// Re-export logging macros
pub use taskring_core::{kprintln, kerror, kwarn, kinfo, kdebug, ktrace};
pub use taskring_core::kprint::{LogLevel, init as init_logging, set_log_level, set_flush_enabled};

// Re-export env utilities
pub use taskring_core::{env_get, env_get_bool, env_get_opt};

// Runtime
pub use taskring_runtime::{Dispatcher, DispatcherConfig, DispatcherState, DispatcherStats};
