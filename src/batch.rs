//! Parallel batch processing over a collection.
//!
//! [`batch`](Collection::batch) partitions a collection into fixed-size
//! batches and runs one task per element: jobs within a batch run
//! concurrently, batches run strictly sequentially. The scope join at the
//! end of each batch is the batch barrier; batch N + 1 is never dispatched
//! before every task of batch N has finished.
//!
//! Three variants share the same partitioning:
//!
//! - [`batch`](Collection::batch) fires side-effecting tasks and collects
//!   nothing.
//! - [`try_batch`](Collection::try_batch) collects per-task outputs into a
//!   new collection and aggregates every failure of the failing batch into
//!   a [`BatchError`] before stopping.
//! - [`try_batch_with`](Collection::try_batch_with) additionally checks a
//!   [`CancelToken`] before dispatching each batch.
//!
//! The processor provides no synchronization beyond the barrier. Tasks
//! receive `&T`; shared mutable state goes through the caller's own
//! `Mutex` or atomics.
//!
//! ```
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! use fluentseq::Collection;
//!
//! let jobs: Collection<u32> = (1..=10).collect();
//! let total = AtomicU32::new(0);
//!
//! jobs.batch(4, |_batch, _job, item| {
//!     total.fetch_add(*item, Ordering::Relaxed);
//! });
//!
//! assert_eq!(total.load(Ordering::Relaxed), 55);
//! ```

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::Collection;

/// A single failed task from a hardened batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure<E> {
    /// Zero-based index of the batch the task ran in.
    pub batch: usize,
    /// Index of the task within its batch, as handed to the task closure.
    pub job: usize,
    /// The error the task returned.
    pub error: E,
}

impl<E: fmt::Display> fmt::Display for TaskFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job {} in batch {}: {}", self.job, self.batch, self.error)
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for TaskFailure<E> {}

/// Error from [`try_batch`](Collection::try_batch) and
/// [`try_batch_with`](Collection::try_batch_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchError<E> {
    /// One or more tasks of a batch failed.
    ///
    /// Carries every failure from the failing batch, in task order. No
    /// later batch was dispatched.
    Failed(Vec<TaskFailure<E>>),
    /// Cancellation was requested before every batch had run.
    Cancelled {
        /// Number of batches that completed before the stop.
        completed_batches: usize,
    },
}

impl<E> BatchError<E> {
    /// Returns the collected task failures, empty for the cancelled case.
    pub fn failures(&self) -> &[TaskFailure<E>] {
        match self {
            Self::Failed(failures) => failures,
            Self::Cancelled { .. } => &[],
        }
    }
}

impl<E> fmt::Display for BatchError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(failures) => match failures.first() {
                Some(first) => write!(
                    f,
                    "{} task(s) failed in batch {}",
                    failures.len(),
                    first.batch
                ),
                None => write!(f, "batch failed"),
            },
            Self::Cancelled { completed_batches } => {
                write!(f, "cancelled after {completed_batches} completed batch(es)")
            }
        }
    }
}

impl<E: fmt::Debug> std::error::Error for BatchError<E> {}

/// Cooperative cancellation signal for batch processing.
///
/// Cloning shares the underlying flag, so one clone handed to another
/// thread can stop a run started with a different clone. The processor
/// checks the token between batches; tasks that want faster reaction can
/// poll [`is_cancelled`](Self::is_cancelled) themselves.
///
/// # Example
///
/// ```
/// use fluentseq::{BatchError, CancelToken, Collection};
///
/// let token = CancelToken::new();
/// token.cancel();
///
/// let jobs: Collection<u32> = (0..8).collect();
/// let result = jobs.try_batch_with(2, &token, |_, _, item| Ok::<u32, String>(*item));
///
/// assert_eq!(result, Err(BatchError::Cancelled { completed_batches: 0 }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Requests cancellation. Idempotent; there is no way back.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl<T: Sync> Collection<T> {
    /// Runs `f` once per element, partitioned into batches of
    /// `batch_size` jobs: jobs within a batch run concurrently on scoped
    /// threads, batches run strictly one after another. Chainable.
    ///
    /// `f` receives `(batch_index, job_index, element)`, the job index
    /// being the task's position within its own batch; it starts from
    /// zero again in every batch. A `batch_size` of zero is treated as
    /// one; a value larger than the length is clamped to the length, and
    /// the final batch may be short.
    ///
    /// The waiting at the end of each batch is the only synchronization
    /// the processor provides. If a task panics, the panic is propagated
    /// after its batch has joined.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Mutex;
    ///
    /// use fluentseq::Collection;
    ///
    /// let names = Collection::from(["apple", "orange", "strawberry"]);
    /// let seen = Mutex::new(Vec::new());
    ///
    /// names.batch(2, |batch, job, name| {
    ///     seen.lock().unwrap().push((batch, job, *name));
    /// });
    ///
    /// let mut seen = seen.into_inner().unwrap();
    /// seen.sort();
    /// assert_eq!(
    ///     seen,
    ///     vec![(0, 0, "apple"), (0, 1, "orange"), (1, 0, "strawberry")]
    /// );
    /// ```
    pub fn batch<F>(&self, batch_size: usize, f: F) -> &Self
    where
        F: Fn(usize, usize, &T) + Sync,
    {
        let size = clamp_batch_size(batch_size, self.len());
        if size == 0 {
            return self;
        }
        for (batch_index, chunk) in self.items().chunks(size).enumerate() {
            thread::scope(|scope| {
                for (job_index, item) in chunk.iter().enumerate() {
                    let f = &f;
                    scope.spawn(move || f(batch_index, job_index, item));
                }
            });
        }
        self
    }

    /// Like [`batch`](Self::batch), but every task returns a result: the
    /// outputs are collected in element order into a new collection, and
    /// failures stop the run at the end of the failing batch.
    ///
    /// Failure handling is collect-all, not fail-fast. The barrier waits
    /// for every task of the failing batch regardless, so all of that
    /// batch's failures are gathered into [`BatchError::Failed`]; no
    /// later batch is dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Failed`] with one [`TaskFailure`] per failed
    /// task of the first batch that had any.
    ///
    /// # Example
    ///
    /// ```
    /// use fluentseq::Collection;
    ///
    /// let jobs: Collection<u32> = (0..100).collect();
    ///
    /// let doubled = jobs
    ///     .try_batch(5, |_, _, item| Ok::<u32, String>(item * 2))
    ///     .unwrap();
    ///
    /// assert_eq!(doubled.len(), 100);
    /// assert_eq!(doubled.at(21), Some(&42));
    /// ```
    pub fn try_batch<U, E, F>(
        &self,
        batch_size: usize,
        f: F,
    ) -> Result<Collection<U>, BatchError<E>>
    where
        U: Send,
        E: Send,
        F: Fn(usize, usize, &T) -> Result<U, E> + Sync,
    {
        self.run_batches(batch_size, None, f)
    }

    /// Like [`try_batch`](Self::try_batch), but checks `cancel` before
    /// dispatching each batch, the first included.
    ///
    /// Tasks already dispatched are never interrupted; a cancellation
    /// requested mid-batch takes effect at the next batch boundary.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Cancelled`] with the number of completed
    /// batches when the token fires first, otherwise as
    /// [`try_batch`](Self::try_batch).
    pub fn try_batch_with<U, E, F>(
        &self,
        batch_size: usize,
        cancel: &CancelToken,
        f: F,
    ) -> Result<Collection<U>, BatchError<E>>
    where
        U: Send,
        E: Send,
        F: Fn(usize, usize, &T) -> Result<U, E> + Sync,
    {
        self.run_batches(batch_size, Some(cancel), f)
    }

    fn run_batches<U, E, F>(
        &self,
        batch_size: usize,
        cancel: Option<&CancelToken>,
        f: F,
    ) -> Result<Collection<U>, BatchError<E>>
    where
        U: Send,
        E: Send,
        F: Fn(usize, usize, &T) -> Result<U, E> + Sync,
    {
        let size = clamp_batch_size(batch_size, self.len());
        let mut outputs = Vec::with_capacity(self.len());
        if size == 0 {
            return Ok(Collection::from(outputs));
        }
        for (batch_index, chunk) in self.items().chunks(size).enumerate() {
            if let Some(token) = cancel {
                if token.is_cancelled() {
                    return Err(BatchError::Cancelled {
                        completed_batches: batch_index,
                    });
                }
            }
            let joined = thread::scope(|scope| {
                let handles: Vec<_> = chunk
                    .iter()
                    .enumerate()
                    .map(|(job_index, item)| {
                        let f = &f;
                        scope.spawn(move || f(batch_index, job_index, item))
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| handle.join())
                    .collect::<Vec<_>>()
            });

            let mut failures = Vec::new();
            for (job_index, result) in joined.into_iter().enumerate() {
                match result {
                    Ok(Ok(output)) => outputs.push(output),
                    Ok(Err(error)) => failures.push(TaskFailure {
                        batch: batch_index,
                        job: job_index,
                        error,
                    }),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            if !failures.is_empty() {
                return Err(BatchError::Failed(failures));
            }
        }
        Ok(Collection::from(outputs))
    }
}

/// Zero batch sizes act as one; oversized batches clamp to the length.
fn clamp_batch_size(batch_size: usize, len: usize) -> usize {
    batch_size.max(1).min(len)
}
