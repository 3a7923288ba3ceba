use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use ahash::RandomState;
use parking_lot::{RwLock, RwLockUpgradableReadGuard, RwLockWriteGuard};

use crate::entry::Entry;
use crate::error::InvariantError;
use crate::eviction::{self, Ranking};
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, MetricsRecorder};
use crate::traits::CacheValue;

type Map<V> = HashMap<Arc<str>, Entry<V>, RandomState>;

/// Thread-safe, size-bounded cache with usage-count eviction.
///
/// The cache can be shared across threads via `Arc<Cache<V>>`. All methods
/// are synchronous but safe to call from async contexts, since no lock is
/// ever held past the end of a call.
///
/// # Eviction
///
/// Every entry carries the accounted size of its value and a counter of read
/// hits. When [`set`](Cache::set) would push the total size over the limit,
/// the cache first evicts other entries, least-used first, until the size
/// delta of the write is freed. The key being written is never a victim.
/// The write then proceeds regardless, so the cache may hold an overage: a
/// single value larger than the limit is kept as the only entry.
///
/// How "least-used" is determined depends on the configured [`Ranking`].
///
/// # Locking
///
/// One reader/writer lock guards the map.
///
/// - Reads take the shared lock and bump usage counters atomically.
/// - Writes and evictions take an upgradable lock: the ranking scan runs
///   alongside plain readers, and the guard is upgraded to exclusive to
///   remove victims and insert.
/// - The size and count counters are atomics so [`len`](Cache::len) and
///   [`size`](Cache::size) never block, but they are only modified under the
///   exclusive guard. Anyone holding the lock sees counters that match the
///   map. A lock-free reader may see the two counters at slightly different
///   instants relative to each other.
pub struct Cache<V = Vec<u8>> {
	/// Key to entry map
	entries: RwLock<Map<V>>,
	/// Sum of all entry sizes
	current_size: AtomicUsize,
	/// Number of keys in the map
	entry_count: AtomicUsize,
	/// Next insertion stamp
	next_sequence: AtomicU64,
	/// Capacity ceiling in bytes
	limit: usize,
	/// Candidate ordering used by eviction
	ranking: Ranking,
	#[cfg(feature = "metrics")]
	metrics: MetricsRecorder,
}

impl<V: CacheValue> Cache<V> {
	/// Create a cache holding at most `limit` bytes, modulo overage.
	///
	/// A limit of 0 is allowed: every write then evicts everything else.
	pub fn new(limit: usize) -> Self {
		Self::with_config(limit, Ranking::default(), 0)
	}

	/// Create with full custom configuration.
	///
	/// # Arguments
	///
	/// * `limit` - Maximum accounted size in bytes
	/// * `ranking` - Candidate ordering used when evicting
	/// * `initial_capacity` - Number of entries to pre-allocate room for
	///
	/// This is primarily used by [`CacheBuilder`](crate::CacheBuilder).
	pub fn with_config(limit: usize, ranking: Ranking, initial_capacity: usize) -> Self {
		Self {
			entries: RwLock::new(HashMap::with_capacity_and_hasher(
				initial_capacity,
				RandomState::new(),
			)),
			current_size: AtomicUsize::new(0),
			entry_count: AtomicUsize::new(0),
			next_sequence: AtomicU64::new(0),
			limit,
			ranking,
			#[cfg(feature = "metrics")]
			metrics: MetricsRecorder::default(),
		}
	}

	/// Insert or replace the value for `key`.
	///
	/// If the write would take the total size over the limit, other entries
	/// are evicted first, trying to free as many bytes as the write adds.
	/// Never fails. A replaced entry's usage counter starts over at zero.
	///
	/// # Runtime Complexity
	///
	/// O(1) expected without eviction. With eviction, O(n) for
	/// [`Ranking::Approximate`] and O(n log n) for [`Ranking::Exact`], where n
	/// is the number of entries.
	pub fn set(&self, key: impl Into<Arc<str>>, value: V) {
		let key: Arc<str> = key.into();
		let entries = self.entries.upgradable_read();

		// Stamped under the guard so sequence order is commit order.
		let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
		let entry = Entry::new(value, sequence);
		let new_size = entry.size;
		let old_size = entries.get(&*key).map_or(0, |old| old.size);

		// The tracked total always includes `old_size` while we hold the guard.
		let current = self.current_size.load(Ordering::Relaxed);
		let projected = current.saturating_sub(old_size).saturating_add(new_size);

		let mut entries = if projected > self.limit {
			let space = signed(new_size).saturating_sub(signed(old_size));
			self.evict_locked(entries, &key, space)
		} else {
			RwLockUpgradableReadGuard::upgrade(entries)
		};

		match entries.insert(Arc::clone(&key), entry) {
			Some(old) => {
				if new_size >= old.size {
					self.current_size.fetch_add(new_size - old.size, Ordering::Relaxed);
				} else {
					self.current_size.fetch_sub(old.size - new_size, Ordering::Relaxed);
				}
				#[cfg(feature = "metrics")]
				self.metrics.record_update();
			}
			None => {
				self.current_size.fetch_add(new_size, Ordering::Relaxed);
				self.entry_count.fetch_add(1, Ordering::Relaxed);
				#[cfg(feature = "metrics")]
				self.metrics.record_insert();
			}
		}

		let total = self.current_size.load(Ordering::Relaxed);
		if total > self.limit {
			tracing::debug!(
				key = %key,
				size = new_size,
				total,
				limit = self.limit,
				"cache holds an overage after write"
			);
		}
	}

	/// Retrieve the value for `key`, recording one use on a hit.
	///
	/// Returns an `Arc` so the value can be held without keeping any lock.
	pub fn get(&self, key: &str) -> Option<Arc<V>> {
		let entries = self.entries.read();
		let Some(entry) = entries.get(key) else {
			#[cfg(feature = "metrics")]
			self.metrics.record_miss();
			return None;
		};

		entry.record_use();
		#[cfg(feature = "metrics")]
		self.metrics.record_hit();

		Some(Arc::clone(&entry.value))
	}

	/// Retrieve a cloned value, recording one use on a hit.
	pub fn get_clone(&self, key: &str) -> Option<V>
	where
		V: Clone,
	{
		self.get(key).map(|value| (*value).clone())
	}

	/// Free at least `space` bytes without touching `immunity`.
	///
	/// This is the same pass [`set`](Cache::set) runs under pressure. Victims
	/// are taken from the least-used end of the ranking until `space` bytes
	/// are queued, so slightly more may be freed. If every other entry
	/// together is smaller than `space`, all of them are evicted. A
	/// non-positive `space` evicts nothing.
	pub fn evict(&self, immunity: &str, space: isize) {
		if space <= 0 {
			return;
		}
		let entries = self.entries.upgradable_read();
		drop(self.evict_locked(entries, immunity, space));
	}

	/// Remove `key`, returning its value if it was present.
	pub fn remove(&self, key: &str) -> Option<Arc<V>> {
		let mut entries = self.entries.write();
		let entry = entries.remove(key)?;

		self.current_size.fetch_sub(entry.size, Ordering::Relaxed);
		self.entry_count.fetch_sub(1, Ordering::Relaxed);
		#[cfg(feature = "metrics")]
		self.metrics.record_removal();

		Some(entry.value)
	}

	/// Check if a key exists without recording a use.
	pub fn contains(&self, key: &str) -> bool {
		self.entries.read().contains_key(key)
	}

	/// Number of hits recorded for `key` since it was last written.
	pub fn usage(&self, key: &str) -> Option<u64> {
		self.entries.read().get(key).map(Entry::usage)
	}

	/// Drop every entry.
	pub fn clear(&self) {
		let mut entries = self.entries.write();
		let dropped = entries.len();
		entries.clear();
		self.current_size.store(0, Ordering::Relaxed);
		self.entry_count.store(0, Ordering::Relaxed);
		tracing::debug!(dropped, "cache cleared");
	}

	/// Verify that the size and count counters match the map.
	///
	/// Takes the read lock, so it observes a state between two writes.
	pub fn check_invariants(&self) -> Result<(), InvariantError> {
		let entries = self.entries.read();

		let tracked = self.entry_count.load(Ordering::Relaxed);
		if tracked != entries.len() {
			return Err(InvariantError::CountMismatch {
				tracked,
				actual: entries.len(),
			});
		}

		let tracked = self.current_size.load(Ordering::Relaxed);
		let actual: usize = entries.values().map(|entry| entry.size).sum();
		if tracked != actual {
			return Err(InvariantError::SizeMismatch {
				tracked,
				actual,
			});
		}

		Ok(())
	}

	/// Snapshot of the cache's counters.
	#[cfg(feature = "metrics")]
	pub fn metrics(&self) -> CacheMetrics {
		self.metrics.snapshot(self.size(), self.limit, self.len())
	}

	/// Rank, select and remove victims, returning the exclusive guard.
	fn evict_locked<'a>(
		&'a self,
		entries: RwLockUpgradableReadGuard<'a, Map<V>>,
		immunity: &str,
		space: isize,
	) -> RwLockWriteGuard<'a, Map<V>> {
		let ranked = self.ranking.rank(eviction::candidates(entries.iter(), immunity));
		let victims = eviction::select(&ranked, space);

		let mut entries = RwLockUpgradableReadGuard::upgrade(entries);
		let (mut evicted, mut freed) = (0usize, 0usize);
		for key in &victims {
			if let Some(entry) = entries.remove(key) {
				evicted += 1;
				freed += entry.size;
			}
		}

		self.entry_count.fetch_sub(evicted, Ordering::Relaxed);
		self.current_size.fetch_sub(freed, Ordering::Relaxed);
		#[cfg(feature = "metrics")]
		self.metrics.record_eviction_run(evicted);

		tracing::trace!(
			immunity,
			space,
			candidates = ranked.len(),
			evicted,
			freed,
			"evicted entries"
		);

		entries
	}
}

impl<V> Cache<V> {
	/// Current total accounted size in bytes.
	pub fn size(&self) -> usize {
		self.current_size.load(Ordering::Relaxed)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entry_count.load(Ordering::Relaxed)
	}

	/// Check if cache is empty.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Configured limit in bytes.
	pub fn limit(&self) -> usize {
		self.limit
	}

	/// Candidate ordering used by eviction.
	pub fn ranking(&self) -> Ranking {
		self.ranking
	}
}

impl<V> fmt::Debug for Cache<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Cache")
			.field("limit", &self.limit)
			.field("size", &self.size())
			.field("len", &self.len())
			.field("ranking", &self.ranking)
			.finish_non_exhaustive()
	}
}

fn signed(size: usize) -> isize {
	isize::try_from(size).unwrap_or(isize::MAX)
}
