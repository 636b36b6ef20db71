//! # Store crate — the keyed query cache
//!
//! A small, explicit cache for server reads. Entries are keyed by a
//! [`QueryKey`] (an ordered tuple of string segments, filters included),
//! hold one type-erased value each, and move through a simple lifecycle:
//! set on fetch success, marked stale by a related mutation's invalidation,
//! refetched on next access. Subscribers are notified on every set and
//! invalidation so UI hooks can re-render.
//!
//! There is deliberately no durability: the cache lives and dies with the
//! process, and the server stays the owner of every entity.

mod cache;
mod key;

pub use cache::{QueryCache, Subscription};
pub use key::QueryKey;
