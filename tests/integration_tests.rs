use usage_cache::{Cache, CacheBuilder, CacheValue, Ranking};

#[derive(Clone, Debug, PartialEq)]
struct Blob {
	label: &'static str,
	bytes: usize,
}

impl CacheValue for Blob {
	fn size(&self) -> usize {
		self.bytes
	}
}

fn blob(label: &'static str, bytes: usize) -> Blob {
	Blob {
		label,
		bytes,
	}
}

#[test]
fn test_basic_round_trip() {
	let cache: Cache = Cache::new(1024);

	cache.set("key", b"value".to_vec());

	assert_eq!(cache.get_clone("key"), Some(b"value".to_vec()));
}

#[test]
fn test_miss_on_absent_key() {
	let cache: Cache = Cache::new(1024);
	cache.set("present", b"value".to_vec());

	assert!(cache.get("absent").is_none());
}

#[test]
fn test_length_accounting() {
	let cache: Cache = Cache::new(1024 * 1024);

	for i in 0..50 {
		cache.set(format!("key_{i}"), format!("value_{i}").into_bytes());
	}
	assert_eq!(cache.len(), 50);

	// Overwrites do not add keys
	for i in 0..50 {
		cache.set(format!("key_{i}"), b"other".to_vec());
	}
	assert_eq!(cache.len(), 50);
	assert_eq!(cache.size(), 50 * 5);
}

#[test]
fn test_eviction_triggers_under_pressure() {
	let cache: Cache = Cache::new(6);

	cache.set("key1", b"value1".to_vec());
	cache.set("key2", b"value2".to_vec());

	assert!(cache.get("key1").is_none());
	assert_eq!(cache.get_clone("key2"), Some(b"value2".to_vec()));
}

#[test]
fn test_immunity_when_overwriting_large_key() {
	let cache: Cache<Blob> = Cache::new(100);
	cache.set("big", blob("v1", 90));
	cache.set("small", blob("s", 5));
	cache.get("small");
	cache.get("small");

	// Growing "big" needs room. The only candidate is "small", however often
	// it was read; "big" itself must survive.
	cache.set("big", blob("v2", 99));

	assert_eq!(cache.get_clone("big"), Some(blob("v2", 99)));
	assert!(!cache.contains("small"));
	assert!(cache.check_invariants().is_ok());
}

#[test]
fn test_immunity_with_manual_evict() {
	let cache: Cache<Blob> = Cache::new(1024);
	cache.set("keep", blob("k", 10));
	cache.set("drop", blob("d", 10));

	cache.evict("keep", 1000);

	assert!(cache.contains("keep"));
	assert!(!cache.contains("drop"));
	assert_eq!(cache.len(), 1);
	assert_eq!(cache.size(), 10);
}

#[test]
fn test_usage_increments_by_one_per_hit() {
	let cache: Cache = Cache::new(1024);
	cache.set("key", b"value".to_vec());

	let mut last = cache.usage("key").unwrap();
	for _ in 0..20 {
		cache.get("key");
		let now = cache.usage("key").unwrap();
		assert_eq!(now, last + 1);
		last = now;
	}

	// Misses touch nothing
	cache.get("other");
	assert_eq!(cache.usage("key"), Some(last));
}

#[test]
fn test_no_space_requested_no_eviction() {
	let cache: Cache = Cache::new(1024);
	for i in 0..10 {
		cache.set(format!("key_{i}"), vec![0u8; 10]);
	}

	cache.evict("", 0);
	cache.evict("", -100);
	cache.evict("key_0", isize::MIN);

	assert_eq!(cache.len(), 10);
	assert_eq!(cache.size(), 100);
}

#[test]
fn test_evict_everything_when_space_is_unreachable() {
	let cache: Cache = Cache::new(1024);
	for i in 0..10 {
		cache.set(format!("key_{i}"), vec![0u8; 10]);
	}

	cache.evict("key_3", 10_000);

	assert_eq!(cache.len(), 1);
	assert!(cache.contains("key_3"));
	assert!(cache.check_invariants().is_ok());
}

#[test]
fn test_eviction_frees_the_write_delta() {
	let cache: Cache<Blob> = CacheBuilder::new(30).ranking(Ranking::Exact).build();
	for label in ["a", "b", "c"] {
		cache.set(label, blob(label, 10));
	}

	// Adds 15 bytes, so two 10 byte entries must go even though 5 would fit.
	cache.set("d", blob("d", 15));

	assert_eq!(cache.len(), 2);
	assert!(cache.contains("c"));
	assert!(cache.contains("d"));
	assert_eq!(cache.size(), 25);
}

#[test]
fn test_exact_ranking_evicts_least_used_then_oldest() {
	let cache: Cache<Blob> = CacheBuilder::new(40).ranking(Ranking::Exact).build();
	cache.set("first", blob("first", 10));
	cache.set("second", blob("second", 10));
	cache.set("third", blob("third", 10));
	cache.set("fourth", blob("fourth", 10));

	cache.get("first");
	cache.get("first");
	cache.get("third");

	cache.set("fifth", blob("fifth", 10));
	assert!(!cache.contains("second"));

	cache.set("sixth", blob("sixth", 10));
	assert!(!cache.contains("fourth"));

	// Both survivors with reads are still here, next in line is the fresh entry
	cache.set("seventh", blob("seventh", 10));
	assert!(!cache.contains("fifth"));
	assert!(cache.contains("first"));
	assert!(cache.contains("third"));
}

#[test]
fn test_approximate_ranking_still_bounds_size() {
	let cache: Cache<Blob> = Cache::new(100);

	for i in 0..200 {
		let key = format!("key_{i}");
		cache.set(key.as_str(), blob("x", 10));
		if i % 3 == 0 {
			cache.get(&key);
		}
		assert!(cache.size() <= 100);
	}

	assert_eq!(cache.len(), 10);
	assert!(cache.check_invariants().is_ok());
}

#[test]
fn test_oversized_value_is_not_rejected() {
	let cache: Cache = Cache::new(16);
	cache.set("a", vec![0u8; 8]);

	cache.set("huge", vec![0u8; 1000]);

	assert_eq!(cache.len(), 1);
	assert_eq!(cache.size(), 1000);
	assert_eq!(cache.get("huge").map(|v| v.len()), Some(1000));

	// The next write pushes the oversized entry out again
	cache.set("b", vec![0u8; 8]);
	assert!(!cache.contains("huge"));
	assert_eq!(cache.size(), 8);
}

#[test]
fn test_string_and_static_values() {
	let strings: Cache<String> = Cache::new(1024);
	strings.set("greeting", "hello".to_string());
	assert_eq!(strings.size(), 5);

	let statics: Cache<&'static str> = Cache::new(1024);
	statics.set("greeting", "hello world");
	assert_eq!(statics.get("greeting").as_deref(), Some(&"hello world"));
	assert_eq!(statics.size(), 11);
}

#[test]
fn test_no_panics_on_empty_operations() {
	let cache: Cache = Cache::new(0);

	assert!(cache.get("missing").is_none());
	assert!(cache.remove("missing").is_none());
	assert!(!cache.contains("missing"));
	assert_eq!(cache.len(), 0);
	assert_eq!(cache.size(), 0);
	cache.evict("missing", 100);
	cache.clear();
	assert!(cache.check_invariants().is_ok());
}

#[test]
fn test_empty_value_with_zero_limit() {
	let cache: Cache = Cache::new(0);
	cache.set("a", Vec::new());
	cache.set("b", Vec::new());

	// Empty values never push the total over the limit
	assert_eq!(cache.len(), 2);
	assert_eq!(cache.size(), 0);
}
