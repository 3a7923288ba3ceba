//! Victim selection.
//!
//! Eviction runs as a three stage pipeline over a snapshot of the map:
//! rank every non-immune entry by usage, walk the ranking from its
//! least-used end until enough space is queued, then hand the victim keys
//! back to the cache for removal. Nothing here holds state between runs.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::entry::Entry;
use crate::error::ConfigError;

/// How eviction candidates are ordered before victims are picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ranking {
	/// Single adjacent-swap pass while collecting candidates.
	///
	/// Each candidate is swapped with its predecessor if the predecessor has
	/// fewer uses. Local inversions are fixed, but the list is not globally
	/// sorted, so the least-used end is only approximately least-used. O(n)
	/// per eviction with no sort.
	#[default]
	Approximate,
	/// Full sort: lowest usage is evicted first, and among equal usage the
	/// oldest insertion goes first. O(n log n) per eviction.
	Exact,
}

impl Ranking {
	/// Order candidates usage-descending, least-used end last.
	pub(crate) fn rank(self, candidates: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
		match self {
			Ranking::Approximate => {
				let mut ranked: Vec<Candidate> = Vec::new();
				for candidate in candidates {
					ranked.push(candidate);
					let current = ranked.len() - 1;
					if current > 0 && ranked[current - 1].usage < ranked[current].usage {
						ranked.swap(current - 1, current);
					}
				}
				ranked
			}
			Ranking::Exact => {
				let mut ranked: Vec<Candidate> = candidates.into_iter().collect();
				ranked.sort_unstable_by(|a, b| {
					b.usage.cmp(&a.usage).then_with(|| b.sequence.cmp(&a.sequence))
				});
				ranked
			}
		}
	}
}

impl fmt::Display for Ranking {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Ranking::Approximate => f.write_str("approximate"),
			Ranking::Exact => f.write_str("exact"),
		}
	}
}

impl FromStr for Ranking {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"approximate" => Ok(Ranking::Approximate),
			"exact" => Ok(Ranking::Exact),
			_ => Err(ConfigError::UnknownRanking(s.to_string())),
		}
	}
}

/// Snapshot of one entry taken during the ranking scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
	pub key: Arc<str>,
	pub usage: u64,
	pub size: usize,
	pub sequence: u64,
}

/// Snapshot every entry except `immunity`.
pub(crate) fn candidates<'a, V, I>(
	entries: I,
	immunity: &'a str,
) -> impl Iterator<Item = Candidate> + 'a
where
	I: IntoIterator<Item = (&'a Arc<str>, &'a Entry<V>)>,
	I::IntoIter: 'a,
	V: 'a,
{
	entries.into_iter().filter(move |(key, _)| &***key != immunity).map(|(key, entry)| Candidate {
		key: Arc::clone(key),
		usage: entry.usage(),
		size: entry.size,
		sequence: entry.sequence,
	})
}

/// Pick victims from the least-used end of `ranked`.
///
/// A candidate is taken while the bytes already queued are below `space`,
/// so the last victim may overshoot. Non-positive `space` selects nothing.
pub(crate) fn select(ranked: &[Candidate], space: isize) -> Vec<Arc<str>> {
	let Ok(space) = usize::try_from(space) else {
		return Vec::new();
	};

	let mut queued = 0usize;
	let mut victims = Vec::new();
	for candidate in ranked.iter().rev() {
		if queued >= space {
			break;
		}
		victims.push(Arc::clone(&candidate.key));
		queued = queued.saturating_add(candidate.size);
	}
	victims
}
