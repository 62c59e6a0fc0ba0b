use crate::{error::Error, route::CompiledRoute};
use std::{
	collections::HashMap,
	sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Compiled routes keyed by their pattern string.
///
/// Holds at most `size` routes; once full, new patterns are compiled on every
/// call and not retained.
#[derive(Debug)]
pub struct RouteCache {
	buffer: Mutex<HashMap<String, Arc<CompiledRoute>>>,
	size: usize,
}

impl RouteCache {
	pub fn new(size: usize) -> Self {
		Self {
			buffer: Default::default(),
			size,
		}
	}

	pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<CompiledRoute>, Error> {
		if let Some(route) = self.lock().get(pattern) {
			return Ok(Arc::clone(route));
		}

		let route = Arc::new(CompiledRoute::compile(pattern)?);
		let mut buf = self.lock();
		if buf.len() < self.size {
			buf.entry(pattern.to_owned())
				.or_insert_with(|| Arc::clone(&route));
		}
		Ok(route)
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<CompiledRoute>>> {
		// routes are immutable once inserted, so a poisoned map is still consistent
		self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

impl Default for RouteCache {
	fn default() -> Self {
		Self::new(64)
	}
}

#[cfg(test)]
mod test {
	use super::RouteCache;
	use std::sync::Arc;

	#[test]
	fn reuses_compiled_routes() {
		let cache = RouteCache::new(4);
		let first = cache.get_or_compile("/products/:id").unwrap();
		let second = cache.get_or_compile("/products/:id").unwrap();

		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn stops_retaining_when_full() {
		let cache = RouteCache::new(1);
		cache.get_or_compile("/a").unwrap();
		let route = cache.get_or_compile("/b/:id").unwrap();

		assert_eq!(route.expression(), "^/b/([^/]+)/?$");
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn shared_between_threads() {
		let cache = Arc::new(RouteCache::default());
		let handles: Vec<_> = (0..4)
			.map(|_| {
				let cache = Arc::clone(&cache);
				std::thread::spawn(move || cache.get_or_compile("/:lang/items[?:tag]").unwrap())
			})
			.collect();

		for handle in handles {
			assert_eq!(handle.join().unwrap().params().len(), 2);
		}
		assert_eq!(cache.len(), 1);
	}
}
