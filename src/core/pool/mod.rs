//! # Worker Pool
//!
//! A fixed set of worker threads hashing images from a bounded
//! crossbeam-channel queue.
//!
//! - `submit` enqueues one input and hands back a [`PendingHash`]
//! - `process_all` hashes a batch and returns results in input order
//! - `shutdown` closes the queue, lets queued jobs finish, and joins every
//!   worker; dropping the pool does the same
//!
//! Submitting blocks while the queue is full, which bounds memory when a
//! caller feeds in more inputs than the workers can keep up with.

use super::calculator::{HashCalculator, HashInput};
use super::decoder::Decoder;
use super::hasher::ImageHashSet;
use super::result::{ErrorDescriptor, ProcessResult};
use crate::error::{ErrorKind, HashError};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Sizing for [`HashWorkerPool`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    workers: usize,
    queue_capacity: usize,
}

impl PoolConfig {
    /// One worker per available core, four queued jobs per worker
    pub fn new() -> Self {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            workers,
            queue_capacity: workers * 4,
        }
    }

    /// Set the number of worker threads (at least 1)
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set how many jobs may wait in the queue (at least 1)
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }

    pub fn capacity(&self) -> usize {
        self.queue_capacity
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

struct Job {
    input: HashInput,
    reply: Sender<ProcessResult<ImageHashSet>>,
}

/// Handle to a submitted job
pub struct PendingHash {
    receiver: Receiver<ProcessResult<ImageHashSet>>,
}

impl PendingHash {
    /// Block until the job's result is available
    pub fn wait(self) -> ProcessResult<ImageHashSet> {
        self.receiver.recv().unwrap_or_else(|_| {
            ProcessResult::failure(
                ErrorDescriptor::new(
                    ErrorKind::InternalComputationError,
                    "worker exited before replying",
                ),
                None,
            )
        })
    }
}

/// Fixed-size pool of hashing threads with explicit shutdown
pub struct HashWorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl HashWorkerPool {
    /// Start the workers. Each one shares `calculator`.
    pub fn new<D>(calculator: Arc<HashCalculator<D>>, config: PoolConfig) -> Result<Self, HashError>
    where
        D: Decoder + 'static,
    {
        let (sender, receiver) = bounded::<Job>(config.capacity());
        let mut workers = Vec::with_capacity(config.worker_count());

        for index in 0..config.worker_count() {
            let receiver = receiver.clone();
            let calculator = Arc::clone(&calculator);

            let handle = thread::Builder::new()
                .name(format!("hash-worker-{}", index))
                .spawn(move || {
                    for job in receiver.iter() {
                        let result = calculator.process(job.input);
                        // The submitter may have dropped its handle; that's fine
                        let _ = job.reply.send(result);
                    }
                    debug!(worker = index, "hash worker exiting");
                })
                .map_err(|e| HashError::WorkerPool(format!("failed to spawn worker: {}", e)))?;

            workers.push(handle);
        }

        info!(
            workers = config.worker_count(),
            queue_capacity = config.capacity(),
            "hash worker pool started"
        );

        Ok(Self {
            sender: Some(sender),
            workers,
        })
    }

    /// Number of worker threads
    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    /// Queue one input. Blocks while the queue is full.
    pub fn submit(&self, input: impl Into<HashInput>) -> Result<PendingHash, HashError> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| HashError::WorkerPool("worker pool is shut down".to_string()))?;

        let (reply, receiver) = bounded(1);
        sender
            .send(Job {
                input: input.into(),
                reply,
            })
            .map_err(|_| HashError::WorkerPool("worker pool is shut down".to_string()))?;

        Ok(PendingHash { receiver })
    }

    /// Hash every input and return the results in input order
    pub fn process_all<I>(&self, inputs: I) -> Vec<ProcessResult<ImageHashSet>>
    where
        I: IntoIterator,
        I::Item: Into<HashInput>,
    {
        let pending: Vec<Result<PendingHash, HashError>> =
            inputs.into_iter().map(|input| self.submit(input)).collect();

        pending
            .into_iter()
            .map(|job| match job {
                Ok(pending) => pending.wait(),
                Err(error) => ProcessResult::failure(ErrorDescriptor::from(&error), None),
            })
            .collect()
    }

    /// Stop accepting work, finish queued jobs, and join all workers
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        // Dropping the only sender ends every worker's receive loop
        if self.sender.take().is_none() {
            return;
        }

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("hash worker panicked during shutdown");
            }
        }

        info!("hash worker pool shut down");
    }
}

impl Drop for HashWorkerPool {
    fn drop(&mut self) {
        self.stop();
    }
}
