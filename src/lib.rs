//! A dead simple regex-based route pattern resolver.
//!
//! ```
//! use grout_resolve::{json_handler, Resolver};
//!
//! let resolver = Resolver::new();
//! let response = resolver.resolve(
//! 	"/:lang/products/:id/compare/:compareId",
//! 	"https://ya.ru/en/products/418/compare/420",
//! 	json_handler,
//! );
//!
//! assert_eq!(response.data(), r#"{"lang":"en","id":"418","compareId":"420"}"#);
//! ```
//!
//! Segments written `:name` are required and match anything up to the next `/`. A segment may
//! end with `[?:name]` to accept one more, optional, path segment: `/items[?:tag]` matches both
//! `/items` and `/items/red`. Parameters are bound in the order they are declared.
//!
//! A url that does not fit the pattern is handed to the handler as [`StructuredUrl::empty`]. Urls
//! that cannot be parsed, and errors returned by handlers, are carried in the [`Response`].

mod cache;
mod decompose;
mod error;
mod params;
mod response;

/// Parsing route patterns and compiling them into matching expressions.
pub mod route;

/// Contains the resolver that ties decomposition, compilation and matching together.
pub mod router;

pub use cache::RouteCache;
pub use decompose::{decompose, StructuredUrl};
pub use error::Error;
pub use params::{Parameters, PositionalParameter};
pub use response::{full_json_handler, json_handler, Handler, Response};
pub use route::*;
pub use router::*;
