/// Errors surfaced by chain construction, snapshots and the ingestion adapter.
///
/// An empty generated text is not an error: generation and trimming return
/// `""` and callers treat it as "no usable output".
#[derive(Debug, thiserror::Error)]
pub enum MarkovError {
	/// The source identifier does not end in `.txt`. No I/O was attempted.
	#[error("unsupported file type: {identifier}")]
	UnsupportedSource { identifier: String },

	#[error("could not read {identifier}: {source}")]
	Io {
		identifier: String,
		#[source]
		source: std::io::Error,
	},

	#[error("could not retrieve {identifier}: {source}")]
	Http {
		identifier: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("prefix length must be >= 1, got {0}")]
	InvalidPrefixLength(usize),

	#[error("prefix length mismatch: expected {expected}, found {found}")]
	PrefixLengthMismatch { expected: usize, found: usize },

	#[error("parallel build lost workers: expected {expected} partial chains, received {received}")]
	WorkerFailed { expected: usize, received: usize },

	#[error("snapshot encoding failed: {0}")]
	Snapshot(#[from] postcard::Error),

	#[error("invalid configuration: {reason}")]
	Config { reason: String },
}

impl MarkovError {
	/// Wraps an I/O error with the identifier that caused it.
	pub(crate) fn io(identifier: impl Into<String>, source: std::io::Error) -> Self {
		Self::Io { identifier: identifier.into(), source }
	}
}

pub type Result<T> = std::result::Result<T, MarkovError>;
