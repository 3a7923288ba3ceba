//! # Usage Cache
//!
//! An in-process, thread-safe key/value cache for memoizing values of
//! varying size under memory pressure:
//! - **Size-bounded capacity** (accounted payload bytes, not item count)
//! - **Usage-count eviction**: entries that are read least are evicted first
//! - **Immune writes**: the key being written is never evicted to make room
//!   for itself, and no value is ever rejected
//! - **Read-optimized concurrency**: one reader/writer lock, with reads and
//!   eviction scans running alongside each other
//!
//! ## Quick Start
//!
//! ```rust
//! use usage_cache::Cache;
//!
//! // 6 bytes of room
//! let cache: Cache = Cache::new(6);
//!
//! cache.set("key1", b"value1".to_vec());
//! assert_eq!(cache.get("key1").as_deref(), Some(&b"value1".to_vec()));
//!
//! // The second write does not fit, so the other entry is evicted.
//! cache.set("key2", b"value2".to_vec());
//! assert!(cache.get("key1").is_none());
//! assert!(cache.get("key2").is_some());
//! assert_eq!(cache.len(), 1);
//! ```
//!
//! ## Custom values
//!
//! Any type implementing [`CacheValue`] can be stored. Implementations are
//! provided for byte and string buffers, where the accounted size is the
//! payload length.
//!
//! ## Thread Safety
//!
//! The cache is `Send + Sync` and can be shared across threads via `Arc`:
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use usage_cache::Cache;
//!
//! let cache: Arc<Cache<String>> = Arc::new(Cache::new(1024 * 1024));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|i| {
//!         let cache = cache.clone();
//!         thread::spawn(move || {
//!             cache.set(format!("key-{i}"), format!("value-{i}"));
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 4);
//! ```

mod builder;
mod cache;
mod entry;
mod error;
mod eviction;
#[cfg(feature = "metrics")]
mod metrics;
mod traits;

pub use builder::CacheBuilder;
pub use cache::Cache;
pub use error::{ConfigError, InvariantError};
pub use eviction::Ranking;
#[cfg(feature = "metrics")]
pub use metrics::CacheMetrics;
pub use traits::CacheValue;
