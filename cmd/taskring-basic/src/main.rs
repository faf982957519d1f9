//! Basic taskring example
//!
//! Four workers, a ring of eight slots: twenty summation jobs, a drain,
//! ten product jobs, then shutdown.
//!
//! # Environment Variables
//!
//! - `TR_LOG_LEVEL=debug` - Show worker start/exit lines
//! - `TR_QUEUE_CAPACITY=<n>` - Override the ring size
//! - `TR_FLUSH_EPRINT=1` - Flush log output after every line

use taskring::{kinfo, Dispatcher, DispatcherConfig, DispatchResult};

use crossbeam_queue::SegQueue;
use std::sync::Arc;

const WORKERS: usize = 4;

/// The job kinds this demo knows how to run.
#[derive(Debug, Clone, Copy)]
enum Arith {
    /// Sum of 0..n
    SumBelow(u64),
    /// Product of 1..n
    ProductBelow(u64),
}

impl Arith {
    fn eval(self) -> u64 {
        match self {
            Arith::SumBelow(n) => (0..n).sum(),
            Arith::ProductBelow(n) => (1..n).product(),
        }
    }

    fn closed_form(self) -> u64 {
        match self {
            Arith::SumBelow(n) => n * n.saturating_sub(1) / 2,
            Arith::ProductBelow(n) => (2..n).fold(1, |acc, k| acc * k),
        }
    }
}

// TR_LOG_LEVEL=debug cargo run -p taskring-basic
fn main() -> DispatchResult<()> {
    println!("=== taskring Basic Example ===\n");

    let cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    println!("Starting on {} cores", cores);

    let config = DispatcherConfig::from_env().num_workers(WORKERS);
    let dispatcher = Dispatcher::start(config)?;
    kinfo!("{} workers, ring capacity {}", WORKERS, dispatcher.capacity());

    let results = Arc::new(SegQueue::new());
    let run = |job: Arith| {
        let results = Arc::clone(&results);
        dispatcher.add_task(
            move |job: Arith| {
                let value = job.eval();
                match job {
                    Arith::SumBelow(_) => println!("Sum: {}", value),
                    Arith::ProductBelow(_) => println!("Prod: {}", value),
                }
                results.push((job, value));
            },
            job,
        )
    };

    for i in 0..20 {
        run(Arith::SumBelow(10 * i))?;
    }
    dispatcher.sync_workers();
    println!("\n-- sums drained ({} done) --\n", results.len());

    for i in 0..10 {
        run(Arith::ProductBelow(i))?;
    }
    dispatcher.join_workers()?;

    let mut mismatches = 0;
    let total = results.len();
    while let Some((job, value)) = results.pop() {
        if value != job.closed_form() {
            eprintln!("MISMATCH: {:?} gave {}", job, value);
            mismatches += 1;
        }
    }

    let stats = dispatcher.stats();
    println!("\nJobs run:         {}", total);
    println!("Mismatches:       {}", mismatches);
    println!("Peak concurrency: {} (of {} workers)", stats.peak_in_flight, WORKERS);
    println!("Panicked jobs:    {}", stats.panicked);

    println!("\n=== Example Complete ===");
    Ok(())
}
