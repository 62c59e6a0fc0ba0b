use thiserror::Error;

/// Recoverable failures of a resolution. These are carried inside a
/// [`Response`](crate::Response) rather than aborting the caller.
#[derive(Debug, Error)]
pub enum Error {
	/// The URL could not be split into its parts.
	#[error("malformed url `{url}`: {reason}")]
	MalformedUrl { url: String, reason: String },

	/// The regex engine refused the expression generated for a pattern.
	#[error("invalid route pattern `{pattern}`: {source}")]
	Pattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	/// Whatever the handler returned, untouched.
	#[error(transparent)]
	Handler(#[from] anyhow::Error),
}

impl Error {
	pub(crate) fn malformed(url: &str, reason: impl Into<String>) -> Self {
		Error::MalformedUrl {
			url: url.to_owned(),
			reason: reason.into(),
		}
	}
}
