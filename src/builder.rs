use crate::cache::Cache;
use crate::eviction::Ranking;
use crate::traits::CacheValue;

/// Builder for configuring a Cache.
///
/// # Example
///
/// ```
/// use usage_cache::{Cache, CacheBuilder, Ranking};
///
/// let cache: Cache<String> = CacheBuilder::new(1024 * 1024 * 64) // 64 MB
///     .ranking(Ranking::Exact)
///     .initial_capacity(10_000)
///     .build();
///
/// assert_eq!(cache.ranking(), Ranking::Exact);
/// ```
///
/// The ranking can also come from a configuration string:
///
/// ```
/// use usage_cache::{Cache, CacheBuilder, Ranking};
///
/// let ranking: Ranking = "exact".parse()?;
/// let cache: Cache = CacheBuilder::new(4096).ranking(ranking).build();
/// # Ok::<(), usage_cache::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CacheBuilder {
	limit: usize,
	ranking: Ranking,
	initial_capacity: usize,
}

impl CacheBuilder {
	/// Create a new builder with the given limit in bytes.
	pub fn new(limit: usize) -> Self {
		Self {
			limit,
			ranking: Ranking::default(),
			initial_capacity: 0,
		}
	}

	/// Set how eviction candidates are ordered.
	///
	/// Default: [`Ranking::Approximate`]
	pub fn ranking(mut self, ranking: Ranking) -> Self {
		self.ranking = ranking;
		self
	}

	/// Pre-allocate room for this many entries.
	///
	/// Default: 0
	pub fn initial_capacity(mut self, entries: usize) -> Self {
		self.initial_capacity = entries;
		self
	}

	/// Build the cache with the configured settings.
	pub fn build<V: CacheValue>(self) -> Cache<V> {
		Cache::with_config(self.limit, self.ranking, self.initial_capacity)
	}
}

impl Default for CacheBuilder {
	/// Create a builder with default settings and 1GB capacity.
	fn default() -> Self {
		Self::new(1024 * 1024 * 1024) // 1 GB
	}
}
