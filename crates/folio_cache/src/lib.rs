//! Filename to locator memoization.
//!
//! Resolving a filename against a tree-document backend is slow, so resolved
//! locators are remembered per filename. Entries are never checked against the
//! backend again; a file deleted out of band keeps resolving to its old locator
//! until the entry is invalidated.

#![warn(missing_docs)]

mod cache;
mod eviction;

pub use cache::{CacheStats, ResourceLocatorCache};
pub use eviction::{EvictionPolicy, LruPolicy, Unbounded};
