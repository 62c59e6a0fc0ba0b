use crate::{error::Error, params::PositionalParameter};
use regex::Regex;

const REQUIRED_GROUP: &str = "/([^/]+)";
const OPTIONAL_GROUP: &str = "(?:/([^/]+))?";
const OPTIONAL_MARKERS: [&str; 2] = ["[?:", "[/:"];

/// One piece of a route pattern, in the order it appears.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PathSegment<'a> {
	/// Matched verbatim.
	Static(&'a str),
	/// `:name`, always present when the pattern matches.
	Required(&'a str),
	/// `[?:name]` (or `[/:name]`), may be missing from the path.
	Optional(&'a str),
}

/// Break a pattern into its segments.
///
/// A pattern segment can yield up to two [`PathSegment`]s: `:id[?:extra]` is a
/// required `id` followed by an optional `extra`. Empty segments are skipped,
/// so the root pattern (`/` or `""`) has none.
pub fn parse(pattern: &str) -> Vec<PathSegment<'_>> {
	let mut segments = Vec::new();

	for part in split(pattern) {
		let (rest, optional) = split_optional(part);

		match rest.strip_prefix(':') {
			Some(name) if !name.is_empty() && !name.contains('[') => {
				segments.push(PathSegment::Required(name))
			}
			_ if rest.is_empty() => {}
			_ => segments.push(PathSegment::Static(rest)),
		}

		if let Some(name) = optional {
			segments.push(PathSegment::Optional(name));
		}
	}

	segments
}

// `/` separates segments, except inside the `[/:name]` spelling of an optional marker.
fn split(pattern: &str) -> Vec<&str> {
	let mut parts = Vec::new();
	let mut start = 0;

	for (i, c) in pattern.char_indices() {
		if c != '/' {
			continue;
		}

		let in_marker = pattern[..i].ends_with('[') && pattern[i + 1..].starts_with(':');
		if !in_marker {
			parts.push(&pattern[start..i]);
			start = i + 1;
		}
	}
	parts.push(&pattern[start..]);

	parts.retain(|part| !part.is_empty());
	parts
}

fn split_optional(part: &str) -> (&str, Option<&str>) {
	if let Some(body) = part.strip_suffix(']') {
		for marker in OPTIONAL_MARKERS.iter() {
			if let Some(at) = body.rfind(marker) {
				let name = &body[at + marker.len()..];
				if !name.is_empty() && !name.contains('[') {
					return (&part[..at], Some(name));
				}
			}
		}
	}

	(part, None)
}

/// A route pattern turned into an anchored regex, together with the
/// parameters its capture groups bind to.
///
/// The only way to get one is [`CompiledRoute::compile`], which builds the
/// expression and the declarations in the same pass: declaration `n` always
/// names capture group `n`.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
	pattern: String,
	regex: Regex,
	params: Vec<PositionalParameter>,
}

impl CompiledRoute {
	pub fn compile(pattern: &str) -> Result<Self, Error> {
		let mut expression = String::from("^");
		let mut params = Vec::new();

		for segment in parse(pattern) {
			match segment {
				PathSegment::Static(text) => {
					expression.push('/');
					expression.push_str(&regex::escape(text));
				}
				PathSegment::Required(name) => {
					expression.push_str(REQUIRED_GROUP);
					params.push(PositionalParameter::declare(name, params.len() + 1));
				}
				PathSegment::Optional(name) => {
					expression.push_str(OPTIONAL_GROUP);
					params.push(PositionalParameter::declare(name, params.len() + 1));
				}
			}
		}

		// with no segments this leaves `^/?$`, matching both "" and "/"
		expression.push_str("/?$");

		let regex = Regex::new(&expression).map_err(|source| Error::Pattern {
			pattern: pattern.to_owned(),
			source,
		})?;

		let route = Self {
			pattern: pattern.to_owned(),
			regex,
			params,
		};
		debug_assert_eq!(route.group_count(), route.params.len());
		Ok(route)
	}

	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// The anchored matching expression.
	pub fn expression(&self) -> &str {
		self.regex.as_str()
	}

	/// Parameter declarations in capture group order. Values are unset.
	pub fn params(&self) -> &[PositionalParameter] {
		&self.params
	}

	pub fn group_count(&self) -> usize {
		self.regex.captures_len() - 1
	}

	pub(crate) fn regex(&self) -> &Regex {
		&self.regex
	}

	/// Pairs an arbitrary expression with arbitrary declarations, bypassing
	/// the compiler. Only for exercising the binding checks.
	#[cfg(test)]
	pub(crate) fn from_parts(expression: &str, params: Vec<PositionalParameter>) -> Self {
		Self {
			pattern: expression.to_owned(),
			regex: Regex::new(expression).unwrap(),
			params,
		}
	}
}
