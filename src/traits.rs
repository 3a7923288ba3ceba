use std::sync::Arc;

/// A payload that can be stored in a [`Cache`](crate::Cache).
///
/// The cache bounds memory by the sum of [`size`](CacheValue::size) over all
/// live entries, so `size` should report the payload's byte length, not the
/// footprint of the handle that owns it.
///
/// # Example
///
/// ```
/// use usage_cache::{Cache, CacheValue};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Rendered {
///     html: String,
///     etag: u64,
/// }
///
/// impl CacheValue for Rendered {
///     fn size(&self) -> usize {
///         self.html.len() + std::mem::size_of::<u64>()
///     }
/// }
///
/// let cache: Cache<Rendered> = Cache::new(4096);
/// cache.set("index", Rendered { html: "<p>hi</p>".into(), etag: 7 });
/// assert_eq!(cache.size(), 17);
/// ```
pub trait CacheValue: Send + Sync + 'static {
	/// Accounted byte cost of this value.
	///
	/// Called exactly once, when the value is inserted.
	fn size(&self) -> usize;
}

impl CacheValue for Vec<u8> {
	fn size(&self) -> usize {
		self.len()
	}
}

impl CacheValue for Box<[u8]> {
	fn size(&self) -> usize {
		self.len()
	}
}

impl CacheValue for Arc<[u8]> {
	fn size(&self) -> usize {
		self.len()
	}
}

impl CacheValue for &'static [u8] {
	fn size(&self) -> usize {
		self.len()
	}
}

impl CacheValue for String {
	fn size(&self) -> usize {
		self.len()
	}
}

impl CacheValue for Box<str> {
	fn size(&self) -> usize {
		self.len()
	}
}

impl CacheValue for &'static str {
	fn size(&self) -> usize {
		self.len()
	}
}
