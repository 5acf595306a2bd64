use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MarkovError, Result};
use crate::trim::TrimMode;

/// Prefix length used by the file / URL convenience functions.
pub const DEFAULT_PREFIX_LEN: usize = 2;

pub const DEFAULT_MAX_WORDS: usize = 100;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Parameters for one trained-then-generated text.
///
/// Every field has a default, so a TOML file only needs the keys it
/// overrides:
///
/// ```toml
/// prefix_len = 3
/// max_words = 250
/// seed = 42
/// trim = "best_effort"
/// ```
///
/// # Invariants
/// - `prefix_len` >= 1 once validated
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
	/// Number of words per prefix.
	pub prefix_len: usize,

	/// Upper bound on generated words (before trimming).
	pub max_words: usize,

	/// Fixed seed for reproducible output; `None` uses OS entropy.
	pub seed: Option<u64>,

	/// Sentence trimming applied to the generated text.
	pub trim: TrimMode,

	/// Timeout for URL sources.
	pub request_timeout_secs: u64,

	/// Reuse / write a binary snapshot next to file sources.
	pub cache_snapshots: bool,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			prefix_len: DEFAULT_PREFIX_LEN,
			max_words: DEFAULT_MAX_WORDS,
			seed: None,
			trim: TrimMode::Strict,
			request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
			cache_snapshots: false,
		}
	}
}

impl GenerationConfig {
	/// Default settings producing at most `max_words` words.
	pub fn with_max_words(max_words: usize) -> Self {
		Self { max_words, ..Self::default() }
	}

	/// Parses and validates a TOML document.
	pub fn from_toml(toml_str: &str) -> Result<Self> {
		let config: Self = toml::from_str(toml_str).map_err(|e| MarkovError::Config { reason: e.to_string() })?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| MarkovError::io(path.display().to_string(), e))?;
		Self::from_toml(&content)
	}

	/// # Errors
	/// Returns an error if `prefix_len` is 0.
	pub fn validate(&self) -> Result<()> {
		if self.prefix_len == 0 {
			return Err(MarkovError::Config { reason: "prefix_len must be >= 1".to_owned() });
		}
		Ok(())
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}
}
