use crate::{decompose::StructuredUrl, error::Error};
use anyhow::Result;
use std::io::Write;

/// Turns a resolved url into output. This is the extension point for custom
/// formats; any `Fn(StructuredUrl) -> anyhow::Result<String>` is a handler, so
/// closures can carry whatever data source they need.
pub trait Handler {
	fn handle(&self, url: StructuredUrl) -> Result<String>;
}

impl<F> Handler for F
where
	F: Fn(StructuredUrl) -> Result<String>,
{
	fn handle(&self, url: StructuredUrl) -> Result<String> {
		self(url)
	}
}

/// Serializes just the bound parameters: `{"id":"418"}`.
pub fn json_handler(url: StructuredUrl) -> Result<String> {
	if url.is_empty() {
		return Ok("{}".to_owned());
	}

	Ok(serde_json::to_string(url.parameters())?)
}

/// Serializes scheme, host, display path and parameters.
pub fn full_json_handler(url: StructuredUrl) -> Result<String> {
	if url.is_empty() {
		return Ok("{}".to_owned());
	}

	Ok(serde_json::to_string(&url)?)
}

/// Output of a resolution: either the handler's data or an error.
#[derive(Debug, Default)]
pub struct Response {
	data: String,
	error: Option<Error>,
}

impl Response {
	pub fn new(data: String) -> Self {
		Self { data, error: None }
	}

	pub fn failed(error: Error) -> Self {
		Self {
			data: String::new(),
			error: Some(error),
		}
	}

	pub fn data(&self) -> &str {
		&self.data
	}

	pub fn error(&self) -> Option<&Error> {
		self.error.as_ref()
	}

	pub fn is_err(&self) -> bool {
		self.error.is_some()
	}

	pub fn into_result(self) -> Result<String, Error> {
		match self.error {
			Some(e) => Err(e),
			None => Ok(self.data),
		}
	}

	/// Write the data followed by a newline. A response carrying an error writes
	/// nothing and hands the error back, to be treated as fatal by the caller.
	pub fn render<W: Write>(self, out: &mut W) -> Result<()> {
		let data = self.into_result()?;
		writeln!(out, "{}", data)?;
		Ok(())
	}
}

impl From<Result<String>> for Response {
	fn from(result: Result<String>) -> Self {
		match result {
			Ok(data) => Self::new(data),
			Err(e) => Self::failed(Error::Handler(e)),
		}
	}
}
