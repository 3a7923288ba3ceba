use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::traits::CacheValue;

/// A stored value with its accounted size and read counter.
///
/// `size` and `sequence` are fixed at creation. `usage` is only ever bumped,
/// and only by read hits, so it can be updated under a shared lock.
pub(crate) struct Entry<V> {
	/// Payload, shared with readers via `Arc`.
	pub value: Arc<V>,
	/// Cached `CacheValue::size()` result
	pub size: usize,
	/// Insertion stamp, used to break usage ties in exact ranking
	pub sequence: u64,
	/// Successful reads since this entry was created
	usage: AtomicU64,
}

impl<V: CacheValue> Entry<V> {
	/// Create a new entry, computing its size once.
	pub fn new(value: V, sequence: u64) -> Self {
		let size = value.size();
		Self {
			value: Arc::new(value),
			size,
			sequence,
			usage: AtomicU64::new(0),
		}
	}
}

impl<V> Entry<V> {
	/// Record one read hit.
	#[inline]
	pub fn record_use(&self) {
		self.usage.fetch_add(1, Ordering::Relaxed);
	}

	/// Current number of recorded hits.
	#[inline]
	pub fn usage(&self) -> u64 {
		self.usage.load(Ordering::Relaxed)
	}
}
