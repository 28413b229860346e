//! Fluent, chainable operations over an ordered in-memory sequence.
//!
//! This crate provides [`Collection<T>`], a convenience wrapper around a
//! growable sequence for application code that wants expressive, composable
//! sequence operations without hand-writing loops.
//!
//! # Design Philosophy
//!
//! `Vec<T>` gives you storage; `Collection<T>` gives you vocabulary:
//!
//! ```text
//! Vec<T>          - push/pop/insert, everything else is a loop
//! Collection<T>   - search, count, quantify, transform, slice, batch
//! ```
//!
//! The rules the API follows:
//!
//! - **Total operations**: reads that can miss return [`Option`]; positional
//!   inserts and slicing clamp out-of-range indices. No public method panics
//!   on bad input.
//! - **Chainable mutation**: in-place mutators return `&mut Self`, so
//!   `items.clear().push(1)` and `items.reverse().concat(more)` compose.
//! - **Derived collections are copies**: [`filter`](Collection::filter),
//!   [`map`](Collection::map), [`slice`](Collection::slice), and batch
//!   results own their elements outright. A derived collection never aliases
//!   its parent's storage, so mutating one cannot disturb the other.
//! - **Bounds live on methods, not the type**: `Collection<T>` itself
//!   requires nothing of `T`. Equality search wants `T: PartialEq`, copying
//!   transforms want `T: Clone`, natural sort wants `T: Ord`, and a type
//!   without those capabilities still gets the rest of the surface.
//!
//! # Quick Start
//!
//! ```
//! use fluentseq::Collection;
//!
//! let mut fruits = Collection::from(["apple", "orange", "strawberry"]);
//!
//! fruits.push("cherry");
//! assert_eq!(fruits.len(), 4);
//! assert!(fruits.contains(&"orange"));
//!
//! // Transforms return new, independent collections.
//! let upper = fruits.map(|_, name| name.to_uppercase());
//! assert_eq!(upper.items(), ["APPLE", "ORANGE", "STRAWBERRY", "CHERRY"]);
//!
//! // Mutators chain.
//! fruits.reverse().concat(["banana"]);
//! assert_eq!(fruits.last(), Some(&"banana"));
//! ```
//!
//! # Batch Processing
//!
//! The one concurrent corner of the crate: [`batch`](Collection::batch)
//! partitions the collection into fixed-size batches and runs a task per
//! element, jobs concurrent within a batch, batches strictly sequential.
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use fluentseq::Collection;
//!
//! let jobs: Collection<u32> = (0..100).collect();
//! let processed = AtomicUsize::new(0);
//!
//! jobs.batch(5, |_batch, _job, _item| {
//!     processed.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! assert_eq!(processed.load(Ordering::Relaxed), 100);
//! ```
//!
//! The hardened variant [`try_batch`](Collection::try_batch) collects
//! per-task outputs into a new collection and aggregates every failure of
//! the failing batch into a [`BatchError`];
//! [`try_batch_with`](Collection::try_batch_with) additionally honors a
//! [`CancelToken`] between batches.
//!
//! # Serialization
//!
//! `Collection<T>` serializes as a plain ordered sequence (a JSON array
//! under `serde_json`) whenever `T: Serialize`, and deserializes from the
//! same shape. [`to_json`](Collection::to_json) and
//! [`from_json`](Collection::from_json) cover the common string case;
//! encoding failures propagate as errors.
//!
//! # Operations
//!
//! | Group | Operations |
//! |-------|------------|
//! | Ends | [`push`](Collection::push), [`push_all`](Collection::push_all), [`pop`](Collection::pop), [`shift`](Collection::shift), [`unshift`](Collection::unshift) |
//! | Positional | [`at`](Collection::at), [`first`](Collection::first), [`last`](Collection::last), [`insert_at`](Collection::insert_at), [`insert_before`](Collection::insert_before), [`insert_after`](Collection::insert_after), [`slice`](Collection::slice) |
//! | Search | [`contains`](Collection::contains), [`contains_by`](Collection::contains_by), [`count`](Collection::count), [`count_by`](Collection::count_by), [`find`](Collection::find), [`find_index`](Collection::find_index), [`last_index_of`](Collection::last_index_of) |
//! | Quantifiers | [`some`](Collection::some), [`none`](Collection::none), [`all`](Collection::all) |
//! | Transform | [`map`](Collection::map), [`filter`](Collection::filter), [`reduce`](Collection::reduce), [`reverse`](Collection::reverse), [`sort`](Collection::sort), [`sort_by`](Collection::sort_by), [`concat`](Collection::concat), [`each`](Collection::each) |
//! | Dedup | [`push_distinct`](Collection::push_distinct) |
//! | Random | [`random`](Collection::random), [`random_index`](Collection::random_index), [`random_with`](Collection::random_with), [`random_index_with`](Collection::random_index_with) |
//! | Batch | [`batch`](Collection::batch), [`try_batch`](Collection::try_batch), [`try_batch_with`](Collection::try_batch_with) |
//!
//! # Thread Safety
//!
//! `Collection<T>` is not a concurrent container. It holds no internal
//! synchronization; `Send`/`Sync` follow from `T` as they do for `Vec<T>`,
//! and sharing one across threads for mutation needs external locking. The
//! batch processor borrows the collection immutably for its whole run, so
//! the borrow checker already rules out concurrent mutation during a batch.

#![warn(missing_docs)]

pub mod batch;
pub mod collection;

pub use batch::{BatchError, CancelToken, TaskFailure};
pub use collection::Collection;
