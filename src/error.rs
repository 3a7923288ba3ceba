//! Error types.
//!
//! Cache operations themselves never fail. Errors only surface when parsing
//! configuration and when explicitly asking the cache to audit itself.

use thiserror::Error;

/// Invalid cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
	/// The ranking name is neither `approximate` nor `exact`.
	#[error("unknown ranking mode `{0}`, expected `approximate` or `exact`")]
	UnknownRanking(String),
}

/// A bookkeeping counter disagrees with the cache's contents.
///
/// Returned by [`Cache::check_invariants`](crate::Cache::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
	/// The tracked entry count is not the number of keys in the map.
	#[error("entry count is {tracked} but the map holds {actual} keys")]
	CountMismatch { tracked: usize, actual: usize },
	/// The tracked total size is not the sum of the entries' sizes.
	#[error("total size is {tracked} bytes but entries sum to {actual} bytes")]
	SizeMismatch { tracked: usize, actual: usize },
}
