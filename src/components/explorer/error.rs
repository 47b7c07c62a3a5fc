use thiserror::Error;

/// Errors raised by the explorer model.
#[derive(Debug, Error)]
pub enum ExplorerError {
	/// The neighbour fetcher could not produce a result.
	#[error("neighbour fetch failed: {0}")]
	Fetch(String),

	/// A style sheet payload was not valid JSON of the expected shape.
	#[error("invalid style sheet: {0}")]
	StyleSheet(#[source] serde_json::Error),

	/// A settings payload could not be parsed.
	#[error("invalid explorer config: {0}")]
	Config(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
