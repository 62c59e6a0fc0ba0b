use crate::{error::Error, params::Parameters};
use serde::Serialize;
use url::{ParseError, Url};

/// A url split into the parts a route pattern cares about, plus the
/// parameters bound while matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredUrl {
	scheme: String,
	host: String,
	path: String,
	#[serde(skip)]
	raw_path: String,
	parameters: Parameters,
}

impl StructuredUrl {
	/// The "nothing matched" sentinel.
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.scheme.is_empty()
			&& self.host.is_empty()
			&& self.path.is_empty()
			&& self.parameters.is_empty()
	}

	pub fn scheme(&self) -> &str {
		&self.scheme
	}

	pub fn host(&self) -> &str {
		&self.host
	}

	/// Decoded path, with `?query` appended when the url had one. For display only.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Undecoded path component. This is what gets matched.
	pub fn raw_path(&self) -> &str {
		&self.raw_path
	}

	pub fn parameters(&self) -> &Parameters {
		&self.parameters
	}

	pub(crate) fn set_parameters(&mut self, parameters: Parameters) {
		self.parameters = parameters;
	}
}

/// Split an absolute or relative url into a [`StructuredUrl`] with no
/// parameters bound yet.
///
/// The path and query are taken from `raw` as written; the `url` crate only
/// validates the url and supplies scheme and host.
pub fn decompose(raw: &str) -> Result<StructuredUrl, Error> {
	if raw.chars().any(|c| c.is_ascii_control()) {
		return Err(Error::malformed(raw, "control character in url"));
	}

	let (scheme, host, reference) = match Url::parse(raw) {
		Ok(url) => {
			// the scheme is everything before the first `:`
			let after_scheme = raw.find(':').map_or(raw, |at| &raw[at + 1..]);
			(url.scheme().to_owned(), host_of(&url), strip_authority(after_scheme))
		}
		Err(ParseError::RelativeUrlWithoutBase) if raw.starts_with("//") => {
			let url = Url::parse(&format!("http:{}", raw))
				.map_err(|e| Error::malformed(raw, e.to_string()))?;
			(String::new(), host_of(&url), strip_authority(raw))
		}
		Err(ParseError::RelativeUrlWithoutBase) => (String::new(), String::new(), raw),
		Err(e) => return Err(Error::malformed(raw, e.to_string())),
	};

	let (raw_path, query) = split_reference(reference);
	check_escapes(raw_path).map_err(|reason| Error::malformed(raw, reason))?;
	let decoded = urlencoding::decode(raw_path)
		.map_err(|_| Error::malformed(raw, "path is not valid utf-8 once decoded"))?;

	let mut path = decoded.into_owned();
	if !query.is_empty() {
		path.push('?');
		path.push_str(query);
	}

	Ok(StructuredUrl {
		scheme,
		host,
		path,
		raw_path: raw_path.to_owned(),
		parameters: Parameters::new(),
	})
}

fn host_of(url: &Url) -> String {
	match (url.host_str(), url.port()) {
		(Some(host), Some(port)) => format!("{}:{}", host, port),
		(Some(host), None) => host.to_owned(),
		(None, _) => String::new(),
	}
}

fn strip_authority(reference: &str) -> &str {
	match reference.strip_prefix("//") {
		Some(rest) => {
			let end = rest
				.find(|c: char| matches!(c, '/' | '?' | '#'))
				.unwrap_or_else(|| rest.len());
			&rest[end..]
		}
		None => reference,
	}
}

// path and query of a reference with its scheme and authority already removed
fn split_reference(reference: &str) -> (&str, &str) {
	let reference = reference.split('#').next().unwrap_or_default();
	match reference.find('?') {
		Some(at) => (&reference[..at], &reference[at + 1..]),
		None => (reference, ""),
	}
}

fn check_escapes(path: &str) -> Result<(), String> {
	let bytes = path.as_bytes();
	for (i, byte) in bytes.iter().enumerate() {
		if *byte != b'%' {
			continue;
		}

		let escape = bytes.get(i + 1..i + 3);
		match escape {
			Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {}
			_ => {
				let end = (i + 3).min(path.len());
				return Err(format!(
					"invalid percent escape `{}`",
					String::from_utf8_lossy(&bytes[i..end])
				));
			}
		}
	}
	Ok(())
}

#[cfg(test)]
mod test {
	use super::decompose;
	use crate::error::Error;

	#[test]
	fn splits_absolute_urls() {
		let url = decompose("https://ya.ru/en/products/418?sort=asc").unwrap();

		assert_eq!(url.scheme(), "https");
		assert_eq!(url.host(), "ya.ru");
		assert_eq!(url.raw_path(), "/en/products/418");
		assert_eq!(url.path(), "/en/products/418?sort=asc");
		assert!(url.parameters().is_empty());
	}

	#[test]
	fn keeps_explicit_ports() {
		let url = decompose("http://localhost:8080/a").unwrap();
		assert_eq!(url.host(), "localhost:8080");

		let url = decompose("http://localhost:80/a").unwrap();
		assert_eq!(url.host(), "localhost");
	}

	#[test]
	fn bare_host_has_empty_path() {
		let url = decompose("https://ya.ru").unwrap();
		assert_eq!(url.raw_path(), "");
	}

	#[test]
	fn absolute_paths_are_kept_as_written() {
		let pairs = [
			("https://ya.ru/en/../products/418", "/en/../products/418"),
			("https://ya.ru/a b", "/a b"),
			("HTTP://ya.ru:8080/x%2Fy?q=1#frag", "/x%2Fy"),
		];

		for (absolute, expected) in pairs.iter() {
			assert_eq!(decompose(absolute).unwrap().raw_path(), *expected);
			assert_eq!(decompose(expected).unwrap().raw_path(), *expected);
		}
	}

	#[test]
	fn splits_protocol_relative_urls() {
		let url = decompose("//ya.ru:8080/products/418?x=1").unwrap();

		assert_eq!(url.scheme(), "");
		assert_eq!(url.host(), "ya.ru:8080");
		assert_eq!(url.raw_path(), "/products/418");
		assert_eq!(url.path(), "/products/418?x=1");

		let url = decompose("//ya.ru").unwrap();
		assert_eq!(url.host(), "ya.ru");
		assert_eq!(url.raw_path(), "");

		assert!(matches!(
			decompose("//exa mple.com/"),
			Err(Error::MalformedUrl { .. })
		));
	}

	#[test]
	fn accepts_spaces_in_paths() {
		assert_eq!(decompose("/a b").unwrap().path(), "/a b");
	}

	#[test]
	fn splits_relative_urls() {
		let url = decompose("/products/418?x=1#top").unwrap();

		assert_eq!(url.scheme(), "");
		assert_eq!(url.host(), "");
		assert_eq!(url.raw_path(), "/products/418");
		assert_eq!(url.path(), "/products/418?x=1");
	}

	#[test]
	fn empty_url_is_empty_relative_path() {
		let url = decompose("").unwrap();
		assert_eq!(url.raw_path(), "");
		assert!(url.is_empty());
	}

	#[test]
	fn decodes_display_path_only() {
		let url = decompose("/caf%C3%A9/a%20b").unwrap();

		assert_eq!(url.raw_path(), "/caf%C3%A9/a%20b");
		assert_eq!(url.path(), "/café/a b");
	}

	#[test]
	fn rejects_bad_escapes() {
		for raw in &["/a%zz", "/a%2", "https://ya.ru/%g0"] {
			match decompose(raw) {
				Err(Error::MalformedUrl { url, .. }) => assert_eq!(url, *raw),
				other => panic!("expected malformed url for {}, got {:?}", raw, other),
			}
		}
	}

	#[test]
	fn rejects_bad_authority_and_control_characters() {
		assert!(matches!(
			decompose("http://exa mple.com/"),
			Err(Error::MalformedUrl { .. })
		));
		assert!(matches!(
			decompose("/a\u{7f}b"),
			Err(Error::MalformedUrl { .. })
		));
		assert!(matches!(
			decompose("http://ya.ru/a\tb"),
			Err(Error::MalformedUrl { .. })
		));
	}

	#[test]
	fn rejects_escapes_that_are_not_utf8() {
		assert!(matches!(decompose("/%ff"), Err(Error::MalformedUrl { .. })));
	}
}
