use crate::{
	cache::RouteCache,
	decompose::{decompose, StructuredUrl},
	error::Error,
	params::{Parameters, PositionalParameter},
	response::{Handler, Response},
	route::CompiledRoute,
};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Matches one url against one route pattern and hands the result to a
/// handler.
///
/// Holds no per-call state, so a single resolver can be shared between
/// threads. With [`Resolver::with_cache`] compiled patterns are kept around.
#[derive(Debug, Default)]
pub struct Resolver {
	cache: Option<RouteCache>,
}

impl Resolver {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_cache(size: usize) -> Self {
		Self {
			cache: Some(RouteCache::new(size)),
		}
	}

	pub fn compile(&self, pattern: &str) -> Result<Arc<CompiledRoute>, Error> {
		let route = match &self.cache {
			Some(cache) => cache.get_or_compile(pattern)?,
			None => Arc::new(CompiledRoute::compile(pattern)?),
		};

		debug!(
			pattern,
			expression = route.expression(),
			params = route.params().len(),
			"compiled route"
		);
		Ok(route)
	}

	/// Resolve `url` against `pattern` and run `handler` on the outcome.
	///
	/// A url that does not fit the pattern is not an error: the handler gets
	/// [`StructuredUrl::empty`]. A url that cannot be parsed never reaches the
	/// handler; the response carries [`Error::MalformedUrl`] instead.
	pub fn resolve<H: Handler>(&self, pattern: &str, url: &str, handler: H) -> Response {
		let mut structured = match decompose(url) {
			Ok(structured) => structured,
			Err(e) => {
				warn!(url, error = %e, "could not decompose url");
				return Response::failed(e);
			}
		};

		let route = match self.compile(pattern) {
			Ok(route) => route,
			Err(e) => {
				warn!(pattern, error = %e, "could not compile route");
				return Response::failed(e);
			}
		};

		match Self::match_path(&route, structured.raw_path()) {
			Some(params) => structured.set_parameters(params),
			None => {
				debug!(pattern, path = structured.raw_path(), "path does not match route");
				structured = StructuredUrl::empty();
			}
		}

		Response::from(handler.handle(structured))
	}

	/// Match a raw path and bind the captured groups to the route's
	/// parameters. `None` if the path does not match.
	///
	/// Optional parameters that are missing from the path are left out rather
	/// than bound to an empty value.
	///
	/// # Panics
	///
	/// If a declared parameter points past the captures of the route's regex.
	/// Routes built by [`CompiledRoute::compile`] never do.
	pub fn match_path(route: &CompiledRoute, path: &str) -> Option<Parameters> {
		let captures = route.regex().captures(path)?;
		let mut params = Parameters::new();

		for declared in route.params() {
			if declared.pos >= captures.len() {
				panic!(
					"route regex generation problem: the positional parameter `{}` (group {}) is not found in path `{}` matched by `{}`",
					declared.name,
					declared.pos,
					path,
					route.expression()
				);
			}

			match captures.get(declared.pos) {
				Some(value) if !value.as_str().is_empty() => {
					trace!(name = %declared.name, value = value.as_str(), "bound parameter");
					params.push(PositionalParameter::new(
						declared.name.as_str(),
						value.as_str(),
						declared.pos,
					));
				}
				_ => {}
			}
		}

		Some(params)
	}
}
