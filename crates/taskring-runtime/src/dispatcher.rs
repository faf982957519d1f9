//! Bounded task dispatcher
//!
//! A single `Mutex<DispatchState>` guards the ring, the in-flight counter
//! and the shutdown flag together, so compound conditions such as
//! "queue empty AND nobody executing" are evaluated atomically.
//!
//! Two condition variables hang off that mutex:
//!
//! - `work_available`: producers signal it after a push; idle workers wait
//!   on it. Shutdown broadcasts it so idle workers can exit.
//! - `consumer_ready`: workers signal it after a pop (space freed) and after
//!   finishing a task (drain progress). Producers blocked on a full queue and
//!   controllers blocked in `sync_workers` wait on it.
//!
//! ```text
//!  producers ──add_task──▶ [ ring ] ──pop──▶ worker ──execute──▶ done
//!      ▲   (wait if full)                     │                   │
//!      └────────────── consumer_ready ◀───────┴───────────────────┘
//! ```
//!
//! # Lifecycle
//!
//! `Active` ⇄ `Draining` (someone is inside `sync_workers`) →
//! `ShuttingDown` (`join_workers` drained and raised the flag) →
//! `Terminated` (all workers joined). Nothing leaves `Terminated`.

use crate::config::DispatcherConfig;
use crate::worker::worker_loop;

use taskring_core::{
    kdebug, kinfo, kwarn, BoundedQueue, BoxedTask, DispatchError, DispatchResult, Task,
    TaskEnvelope, TrySubmitError, WorkerError,
};

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Everything the workers and the controller share, behind one lock.
pub(crate) struct DispatchState {
    pub(crate) queue: BoundedQueue<BoxedTask>,
    /// Tasks claimed by a worker and not yet finished
    pub(crate) in_flight: usize,
    pub(crate) peak_in_flight: usize,
    /// Monotonic: never reset once set
    pub(crate) shutdown: bool,
    pub(crate) terminated: bool,
    /// Callers currently blocked in `sync_workers`
    pub(crate) drain_waiters: usize,
    pub(crate) live_workers: usize,
    pub(crate) submitted: u64,
    pub(crate) completed: u64,
    pub(crate) panicked: u64,
}

impl DispatchState {
    #[inline]
    fn is_drained(&self) -> bool {
        self.queue.is_empty() && self.in_flight == 0
    }
}

/// Shared between the `Dispatcher` handle and its worker threads.
pub(crate) struct Shared {
    state: Mutex<DispatchState>,
    pub(crate) work_available: Condvar,
    pub(crate) consumer_ready: Condvar,
}

impl Shared {
    fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(DispatchState {
                queue: BoundedQueue::with_capacity(capacity),
                in_flight: 0,
                peak_in_flight: 0,
                shutdown: false,
                terminated: false,
                drain_waiters: 0,
                live_workers: 0,
                submitted: 0,
                completed: 0,
                panicked: 0,
            }),
            work_available: Condvar::new(),
            consumer_ready: Condvar::new(),
        }
    }

    /// Poison-tolerant: jobs never run under this lock.
    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, DispatchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until there is a task to claim or shutdown was requested.
    pub(crate) fn wait_for_work<'a>(
        &self,
        guard: MutexGuard<'a, DispatchState>,
    ) -> MutexGuard<'a, DispatchState> {
        self.work_available
            .wait_while(guard, |s| s.queue.is_empty() && !s.shutdown)
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_for_space<'a>(
        &self,
        guard: MutexGuard<'a, DispatchState>,
    ) -> MutexGuard<'a, DispatchState> {
        self.consumer_ready
            .wait_while(guard, |s| s.queue.is_full() && !s.shutdown)
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Observable dispatcher lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    /// Accepting work
    Active,
    /// At least one caller is blocked in `sync_workers`
    Draining,
    /// Shutdown flag raised, workers exiting
    ShuttingDown,
    /// All workers joined
    Terminated,
}

/// Point-in-time counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatcherStats {
    /// Tasks waiting in the ring
    pub queued: usize,
    /// Tasks currently executing
    pub in_flight: usize,
    /// Highest `in_flight` ever observed
    pub peak_in_flight: usize,
    /// Worker threads that have not exited
    pub workers: usize,
    pub submitted: u64,
    /// Tasks that returned normally
    pub completed: u64,
    /// Tasks whose job panicked
    pub panicked: u64,
}

/// Fixed-capacity task dispatcher backed by a pool of OS threads.
///
/// All operations take `&self`; share it by reference across scoped
/// threads or wrap it in an `Arc`.
///
/// # Example
///
/// ```ignore
/// let dispatcher = Dispatcher::default();
/// dispatcher.spawn_workers(4)?;
/// for i in 0..20 {
///     dispatcher.add_task(|n: u64| println!("{}", n * 2), i)?;
/// }
/// dispatcher.sync_workers();
/// dispatcher.join_workers()?;
/// ```
pub struct Dispatcher {
    shared: Arc<Shared>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    config: DispatcherConfig,
}

impl Default for Dispatcher {
    /// Capacity 8, no workers yet.
    fn default() -> Self {
        Self::with_config_unchecked(DispatcherConfig::new())
    }
}

impl Dispatcher {
    /// Create a dispatcher with no workers.
    pub fn new(config: DispatcherConfig) -> DispatchResult<Self> {
        config.validate()?;
        Ok(Self::with_config_unchecked(config))
    }

    /// Create a dispatcher and spawn `config.num_workers` workers.
    pub fn start(config: DispatcherConfig) -> DispatchResult<Self> {
        let n = config.num_workers;
        let dispatcher = Self::new(config)?;
        dispatcher.spawn_workers(n)?;
        Ok(dispatcher)
    }

    fn with_config_unchecked(config: DispatcherConfig) -> Self {
        Self {
            shared: Arc::new(Shared::new(config.queue_capacity)),
            workers: Mutex::new(Vec::new()),
            config,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Add `count` worker threads to the pool.
    ///
    /// May be called more than once to grow the pool. Fails with
    /// `ShutDown` once shutdown has been requested.
    pub fn spawn_workers(&self, count: usize) -> DispatchResult<()> {
        if count == 0 {
            return Err(DispatchError::InvalidWorkerCount);
        }

        let mut handles = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
        for _ in 0..count {
            {
                let mut state = self.shared.lock();
                if state.shutdown {
                    return Err(DispatchError::ShutDown);
                }
                state.live_workers += 1;
            }

            let index = handles.len();
            let mut builder =
                thread::Builder::new().name(format!("{}-{}", self.config.thread_name, index));
            if let Some(size) = self.config.stack_size {
                builder = builder.stack_size(size);
            }

            let shared = Arc::clone(&self.shared);
            match builder.spawn(move || worker_loop(shared, index)) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    self.shared.lock().live_workers -= 1;
                    kwarn!("failed to spawn worker {}: {}", index, e);
                    return Err(WorkerError::SpawnFailed.into());
                }
            }
        }

        kdebug!("spawned {} workers ({} total)", count, handles.len());
        Ok(())
    }

    /// Queue `job(payload)`, blocking while the ring is full.
    pub fn add_task<F, P>(&self, job: F, payload: P) -> DispatchResult<()>
    where
        F: FnOnce(P) + Send + 'static,
        P: Send + 'static,
    {
        self.submit(TaskEnvelope::new(job, payload))
    }

    /// Queue any `Task`, blocking while the ring is full.
    pub fn submit<T: Task>(&self, task: T) -> DispatchResult<()> {
        self.submit_boxed(Box::new(task))
    }

    /// Queue an already-boxed task, blocking while the ring is full.
    ///
    /// Returns `ShutDown` if shutdown is requested before space frees up.
    pub fn submit_boxed(&self, task: BoxedTask) -> DispatchResult<()> {
        {
            let mut state = self.shared.wait_for_space(self.shared.lock());
            if state.shutdown {
                return Err(DispatchError::ShutDown);
            }
            state.queue.push(task);
            state.submitted += 1;
        }
        self.shared.work_available.notify_one();
        Ok(())
    }

    /// Queue `task` only if there is room right now.
    pub fn try_submit<T: Task>(&self, task: T) -> Result<(), TrySubmitError<T>> {
        {
            let mut state = self.shared.lock();
            if state.shutdown {
                return Err(TrySubmitError::ShutDown(task));
            }
            if state.queue.is_full() {
                return Err(TrySubmitError::Full(task));
            }
            state.queue.push(Box::new(task));
            state.submitted += 1;
        }
        self.shared.work_available.notify_one();
        Ok(())
    }

    /// Block until the ring is empty and no task is executing.
    ///
    /// Every task submitted before this call has finished when it returns.
    /// Concurrent producers can add work behind it. With no workers and a
    /// non-empty ring this never returns.
    pub fn sync_workers(&self) {
        let mut state = self.shared.lock();
        state.drain_waiters += 1;
        state = self
            .shared
            .consumer_ready
            .wait_while(state, |s| !s.is_drained())
            .unwrap_or_else(PoisonError::into_inner);
        state.drain_waiters -= 1;
    }

    /// `sync_workers` with a deadline. Returns `true` if drained in time.
    pub fn sync_workers_timeout(&self, timeout: Duration) -> bool {
        let mut state = self.shared.lock();
        state.drain_waiters += 1;
        let (mut state, result) = self
            .shared
            .consumer_ready
            .wait_timeout_while(state, timeout, |s| !s.is_drained())
            .unwrap_or_else(PoisonError::into_inner);
        state.drain_waiters -= 1;
        !result.timed_out()
    }

    /// Drain, then stop and join every worker.
    ///
    /// After this returns no worker thread is running and all submissions
    /// are rejected. Calling it again is a no-op.
    pub fn join_workers(&self) -> DispatchResult<()> {
        self.sync_workers();
        self.shutdown_and_join()
    }

    /// Raise the shutdown flag, wake everyone, join the threads.
    ///
    /// Workers still run whatever is queued before exiting.
    fn shutdown_and_join(&self) -> DispatchResult<()> {
        let first = {
            let mut state = self.shared.lock();
            let first = !state.shutdown;
            state.shutdown = true;
            first
        };
        self.shared.work_available.notify_all();
        self.shared.consumer_ready.notify_all();

        // Held until `terminated` is stored; concurrent joiners wait here.
        let mut handles = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
        let count = handles.len();
        let mut result = Ok(());
        for handle in handles.drain(..) {
            if handle.join().is_err() {
                result = Err(WorkerError::Panicked.into());
            }
        }

        let stats = {
            let mut state = self.shared.lock();
            state.terminated = true;
            stats_of(&state)
        };
        drop(handles);

        if first {
            kinfo!(
                "dispatcher shut down: {} workers joined, {} completed, {} panicked",
                count,
                stats.completed,
                stats.panicked
            );
        }
        result
    }

    pub fn state(&self) -> DispatcherState {
        let state = self.shared.lock();
        if state.terminated {
            DispatcherState::Terminated
        } else if state.shutdown {
            DispatcherState::ShuttingDown
        } else if state.drain_waiters > 0 {
            DispatcherState::Draining
        } else {
            DispatcherState::Active
        }
    }

    pub fn stats(&self) -> DispatcherStats {
        stats_of(&self.shared.lock())
    }

    /// Fixed ring capacity
    pub fn capacity(&self) -> usize {
        self.shared.lock().queue.capacity()
    }
}

fn stats_of(state: &DispatchState) -> DispatcherStats {
    DispatcherStats {
        queued: state.queue.len(),
        in_flight: state.in_flight,
        peak_in_flight: state.peak_in_flight,
        workers: state.live_workers,
        submitted: state.submitted,
        completed: state.completed,
        panicked: state.panicked,
    }
}

impl Drop for Dispatcher {
    /// Stops workers without waiting for a drain first; workers still run
    /// queued tasks before exiting. Tasks left with no worker are dropped.
    fn drop(&mut self) {
        if self.shared.lock().terminated {
            return;
        }
        if let Err(e) = self.shutdown_and_join() {
            kwarn!("dispatcher dropped with error: {}", e);
        }
    }
}
