//! Memoizes rendered pages in a small cache: pages that are read often
//! survive, rarely read pages are evicted to make room.

use usage_cache::{Cache, CacheBuilder, CacheValue, Ranking};

#[derive(Clone, Debug, PartialEq)]
struct Page {
	path: String,
	body: String,
}

impl CacheValue for Page {
	fn size(&self) -> usize {
		self.path.len() + self.body.len()
	}
}

fn render(path: &str) -> Page {
	Page {
		path: path.to_string(),
		body: format!("<html><body>{}</body></html>", path.repeat(4)),
	}
}

fn fetch(cache: &Cache<Page>, path: &str) -> Page {
	if let Some(page) = cache.get_clone(path) {
		return page;
	}
	let page = render(path);
	cache.set(path, page.clone());
	page
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "usage_cache=trace".into()),
		)
		.init();

	// Room for a handful of pages
	let cache: Cache<Page> = CacheBuilder::new(400).ranking(Ranking::Exact).build();

	// The home page is popular
	for _ in 0..5 {
		fetch(&cache, "/");
	}

	// A crawl over rarely visited pages fills the cache
	for i in 0..20 {
		fetch(&cache, &format!("/archive/{i}"));
	}

	if cache.contains("/") {
		println!("✓ Home page (read often) survived eviction");
	} else {
		println!("✗ Home page was evicted (unexpected)");
	}

	if cache.contains("/archive/0") {
		println!("✓ First archive page still in cache");
	} else {
		println!("✗ First archive page was evicted (expected, never read again)");
	}

	println!("\nCache stats:");
	println!("  Entries: {}", cache.len());
	println!("  Size: {} / {} bytes", cache.size(), cache.limit());
	println!("  Home page reads: {:?}", cache.usage("/"));
}
