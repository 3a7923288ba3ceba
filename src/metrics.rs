//! Cache performance metrics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Performance metrics for the cache.
///
/// This struct provides insights into cache behavior including hit rates,
/// eviction counts, and memory utilization.
///
/// # Example
///
/// ```
/// use usage_cache::Cache;
///
/// let cache: Cache = Cache::new(1024 * 1024);
/// cache.set("greeting", b"hello".to_vec());
/// cache.get("greeting");
/// cache.get("missing");
///
/// let metrics = cache.metrics();
/// assert_eq!(metrics.hits, 1);
/// assert_eq!(metrics.misses, 1);
/// println!("Hit rate: {:.2}%", metrics.hit_rate() * 100.0);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
	/// Number of successful lookups.
	pub hits: u64,
	/// Number of lookups for absent keys.
	pub misses: u64,
	/// Number of writes that created a new key.
	pub inserts: u64,
	/// Number of writes that replaced an existing key.
	pub updates: u64,
	/// Number of entries evicted to make room.
	pub evictions: u64,
	/// Number of eviction passes that ran, triggered by writes or by hand.
	pub eviction_runs: u64,
	/// Number of entries explicitly removed via `remove()`.
	pub removals: u64,
	/// Current total accounted size in bytes.
	pub current_size_bytes: usize,
	/// Configured limit in bytes.
	pub capacity_bytes: usize,
	/// Current number of entries.
	pub entry_count: usize,
}

impl CacheMetrics {
	/// Calculate the cache hit rate as a ratio between 0.0 and 1.0.
	///
	/// Returns 0.0 if there have been no cache accesses.
	pub fn hit_rate(&self) -> f64 {
		let total = self.total_accesses();
		if total == 0 {
			0.0
		} else {
			self.hits as f64 / total as f64
		}
	}

	/// Fraction of the limit currently in use.
	///
	/// May exceed 1.0 while the cache holds an overage. A zero limit reports
	/// 0.0.
	pub fn utilization(&self) -> f64 {
		if self.capacity_bytes == 0 {
			0.0
		} else {
			self.current_size_bytes as f64 / self.capacity_bytes as f64
		}
	}

	/// Hits plus misses.
	pub fn total_accesses(&self) -> u64 {
		self.hits + self.misses
	}

	/// Inserts plus updates.
	pub fn total_writes(&self) -> u64 {
		self.inserts + self.updates
	}
}

/// Live counters behind [`CacheMetrics`].
#[derive(Default)]
pub(crate) struct MetricsRecorder {
	hits: AtomicU64,
	misses: AtomicU64,
	inserts: AtomicU64,
	updates: AtomicU64,
	evictions: AtomicU64,
	eviction_runs: AtomicU64,
	removals: AtomicU64,
}

impl MetricsRecorder {
	pub fn record_hit(&self) {
		self.hits.fetch_add(1, Ordering::Relaxed);
	}

	pub fn record_miss(&self) {
		self.misses.fetch_add(1, Ordering::Relaxed);
	}

	pub fn record_insert(&self) {
		self.inserts.fetch_add(1, Ordering::Relaxed);
	}

	pub fn record_update(&self) {
		self.updates.fetch_add(1, Ordering::Relaxed);
	}

	pub fn record_eviction_run(&self, evicted: usize) {
		self.eviction_runs.fetch_add(1, Ordering::Relaxed);
		self.evictions.fetch_add(evicted as u64, Ordering::Relaxed);
	}

	pub fn record_removal(&self) {
		self.removals.fetch_add(1, Ordering::Relaxed);
	}

	pub fn snapshot(
		&self,
		current_size_bytes: usize,
		capacity_bytes: usize,
		entry_count: usize,
	) -> CacheMetrics {
		CacheMetrics {
			hits: self.hits.load(Ordering::Relaxed),
			misses: self.misses.load(Ordering::Relaxed),
			inserts: self.inserts.load(Ordering::Relaxed),
			updates: self.updates.load(Ordering::Relaxed),
			evictions: self.evictions.load(Ordering::Relaxed),
			eviction_runs: self.eviction_runs.load(Ordering::Relaxed),
			removals: self.removals.load(Ordering::Relaxed),
			current_size_bytes,
			capacity_bytes,
			entry_count,
		}
	}
}
