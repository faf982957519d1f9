//! Worker thread body
//!
//! Each worker repeats: wait for work (or shutdown) under the state lock,
//! claim the head task, run it with no lock held, then report completion.
//!
//! A worker exits only when the queue is empty and shutdown has been
//! requested, so tasks queued before shutdown are always run.

use crate::dispatcher::Shared;
use crate::platform::thread_id;

use taskring_core::{kdebug, kerror, ktrace};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Worker thread main loop.
pub(crate) fn worker_loop(shared: Arc<Shared>, index: usize) {
    kdebug!("worker {} started (tid {})", index, thread_id());

    loop {
        let task = {
            let mut state = shared.wait_for_work(shared.lock());
            if state.queue.is_empty() {
                // Woken for shutdown with nothing left to run.
                state.live_workers -= 1;
                break;
            }
            let task = state.queue.pop();
            state.in_flight += 1;
            state.peak_in_flight = state.peak_in_flight.max(state.in_flight);
            task
        };
        // A slot just opened up.
        shared.consumer_ready.notify_all();

        ktrace!("worker {} executing task", index);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| task.execute()));

        {
            let mut state = shared.lock();
            state.in_flight -= 1;
            if outcome.is_ok() {
                state.completed += 1;
            } else {
                state.panicked += 1;
            }
        }
        shared.consumer_ready.notify_all();

        if let Err(payload) = outcome {
            kerror!("worker {}: task panicked: {}", index, panic_message(&*payload));
        }
    }

    kdebug!("worker {} exiting", index);
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        let p = panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(&*p), "boom");

        let p = panic::catch_unwind(|| panic!("job {} failed", 7)).unwrap_err();
        assert_eq!(panic_message(&*p), "job 7 failed");

        let p = panic::catch_unwind(|| std::panic::panic_any(42u8)).unwrap_err();
        assert_eq!(panic_message(&*p), "<non-string panic payload>");
    }
}
