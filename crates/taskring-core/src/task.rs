//! Units of work carried through the dispatcher
//!
//! A task is anything that can be executed exactly once on a worker thread.
//! `TaskEnvelope` pairs a job with the payload it operates on; because both
//! are typed, a job can never be handed a payload it does not understand.

use std::fmt;

/// Something a worker can run once.
pub trait Task: Send + 'static {
    /// Consume the task and run it on the calling thread.
    fn execute(self: Box<Self>);
}

/// Type-erased task as stored in the dispatcher queue.
pub type BoxedTask = Box<dyn Task>;

impl<F> Task for F
where
    F: FnOnce() + Send + 'static,
{
    #[inline]
    fn execute(self: Box<Self>) {
        (*self)()
    }
}

/// A job paired with its payload.
///
/// Immutable once built; the payload is moved into the job when the
/// envelope executes.
pub struct TaskEnvelope<F, P> {
    job: F,
    payload: P,
}

impl<F, P> TaskEnvelope<F, P>
where
    F: FnOnce(P) + Send + 'static,
    P: Send + 'static,
{
    pub fn new(job: F, payload: P) -> Self {
        Self { job, payload }
    }

    /// Payload this envelope will hand to its job.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Erase the concrete types for queueing.
    pub fn boxed(self) -> BoxedTask {
        Box::new(self)
    }
}

impl<F, P> Task for TaskEnvelope<F, P>
where
    F: FnOnce(P) + Send + 'static,
    P: Send + 'static,
{
    #[inline]
    fn execute(self: Box<Self>) {
        let TaskEnvelope { job, payload } = *self;
        job(payload)
    }
}

impl<F, P: fmt::Debug> fmt::Debug for TaskEnvelope<F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskEnvelope")
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct AddUpTo(u64);

    #[test]
    fn test_envelope_passes_payload_to_job() {
        let out = Arc::new(AtomicU64::new(0));
        let out2 = Arc::clone(&out);

        let env = TaskEnvelope::new(
            move |AddUpTo(n): AddUpTo| {
                out2.store((0..n).sum(), Ordering::SeqCst);
            },
            AddUpTo(10),
        );
        assert_eq!(env.payload().0, 10);

        env.boxed().execute();
        assert_eq!(out.load(Ordering::SeqCst), 45);
    }

    #[test]
    fn test_closure_is_a_task() {
        let out = Arc::new(AtomicU64::new(0));
        let out2 = Arc::clone(&out);

        let task: BoxedTask = Box::new(move || {
            out2.fetch_add(7, Ordering::SeqCst);
        });
        task.execute();
        assert_eq!(out.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_envelope_debug_shows_payload() {
        let env = TaskEnvelope::new(|_: AddUpTo| {}, AddUpTo(3));
        let s = format!("{:?}", env);
        assert!(s.contains("AddUpTo(3)"));
    }
}
