use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::GenerationConfig;
use crate::error::{MarkovError, Result};
use crate::model::chain::Chain;
use crate::model::generator::Generator;
use crate::trim::trim;

/// Only identifiers ending with this suffix (case-sensitive) are accepted.
pub const SUPPORTED_EXTENSION: &str = ".txt";

/// Returns whether `identifier` names a supported text source.
pub fn is_supported(identifier: &str) -> bool {
	identifier.ends_with(SUPPORTED_EXTENSION)
}

/// Where training text comes from.
///
/// Constructors validate the identifier, so a `Source` always names a
/// `.txt` resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
	File(PathBuf),
	Url(String),
}

impl Source {
	/// Classifies `identifier` as a URL (`http://` or `https://`, in any
	/// case) or a path.
	///
	/// # Errors
	/// `UnsupportedSource` if the identifier does not end with `.txt`.
	pub fn parse(identifier: &str) -> Result<Self> {
		let scheme = identifier.get(..8).unwrap_or(identifier).to_ascii_lowercase();
		if scheme.starts_with("http://") || scheme.starts_with("https://") {
			Self::url(identifier)
		} else {
			Self::file(identifier)
		}
	}

	pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		match path.to_str() {
			Some(s) if is_supported(s) => Ok(Self::File(path.to_path_buf())),
			_ => Err(MarkovError::UnsupportedSource { identifier: path.display().to_string() }),
		}
	}

	pub fn url(url: &str) -> Result<Self> {
		if !is_supported(url) {
			return Err(MarkovError::UnsupportedSource { identifier: url.to_owned() });
		}
		Ok(Self::Url(url.to_owned()))
	}

	/// The path or URL, as given.
	pub fn identifier(&self) -> String {
		match self {
			Self::File(path) => path.display().to_string(),
			Self::Url(url) => url.clone(),
		}
	}

	/// Opens the byte stream behind this source.
	///
	/// - Files are opened read-only.
	/// - URLs are fetched with a blocking GET; non-success statuses fail.
	pub fn open(&self, timeout: Duration) -> Result<Box<dyn Read>> {
		match self {
			Self::File(path) => {
				let file = File::open(path).map_err(|e| MarkovError::io(self.identifier(), e))?;
				Ok(Box::new(file))
			}
			Self::Url(url) => {
				let http_error = |source| MarkovError::Http { identifier: url.clone(), source };
				let client = Client::builder().timeout(timeout).build().map_err(http_error)?;
				let response = client
					.get(url)
					.send()
					.and_then(|response| response.error_for_status())
					.map_err(http_error)?;
				Ok(Box::new(response))
			}
		}
	}
}

/// Trains a fresh chain on `source` and returns trimmed generated text.
///
/// # Behavior
/// - Validates `config` before touching the source.
/// - File sources go through the snapshot cache when
///   `config.cache_snapshots` is set.
/// - The generator is seeded from `config.seed` when present.
/// - The output is trimmed with `config.trim`; an empty string means no
///   usable text was produced.
pub fn generate_from(source: &Source, config: &GenerationConfig) -> Result<String> {
	config.validate()?;

	let chain = match source {
		Source::File(path) if config.cache_snapshots => Chain::load_or_train(path, config.prefix_len)?,
		_ => {
			let mut chain = Chain::new(config.prefix_len)?;
			let words = chain.train(source.open(config.request_timeout())?);
			log::debug!("read {} words from {}", words, source.identifier());
			chain
		}
	};

	let text = match config.seed {
		Some(seed) => Generator::with_seed(&chain, seed).generate(config.max_words),
		None => Generator::new(&chain).generate(config.max_words),
	};

	let trimmed = trim(&text, config.trim);
	if trimmed.is_empty() {
		log::debug!("no sentence-terminated text generated from {}", source.identifier());
	}
	Ok(trimmed)
}

/// Generates up to `text_length` words from a local `.txt` file, trimmed
/// to the last full sentence.
pub fn from_file<P: AsRef<Path>>(path: P, text_length: usize) -> Result<String> {
	generate_from(&Source::file(path)?, &GenerationConfig::with_max_words(text_length))
}

/// Generates up to `text_length` words from a remote `.txt` file, trimmed
/// to the last full sentence.
pub fn from_url(url: &str, text_length: usize) -> Result<String> {
	generate_from(&Source::url(url)?, &GenerationConfig::with_max_words(text_length))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn suffix_check_is_case_sensitive() {
		assert!(is_supported("notes.txt"));
		assert!(is_supported(".txt"));
		assert!(!is_supported("notes.TXT"));
		assert!(!is_supported("notes.txt.gz"));
		assert!(!is_supported("data.csv"));
	}

	#[test]
	fn parse_classifies_urls_and_paths() {
		assert_eq!(
			Source::parse("https://example.com/book.txt").unwrap(),
			Source::Url("https://example.com/book.txt".to_owned())
		);
		assert_eq!(Source::parse("corpus/book.txt").unwrap(), Source::File(PathBuf::from("corpus/book.txt")));
	}

	#[test]
	fn parse_ignores_scheme_case() {
		assert_eq!(
			Source::parse("HTTPS://Example.com/Book.txt").unwrap(),
			Source::Url("HTTPS://Example.com/Book.txt".to_owned())
		);
		assert!(matches!(Source::parse("Http://host/a.txt").unwrap(), Source::Url(_)));
	}

	#[test]
	fn parse_rejects_before_io() {
		let err = Source::parse("http://example.com/data.csv").unwrap_err();
		assert!(matches!(err, MarkovError::UnsupportedSource { ref identifier } if identifier == "http://example.com/data.csv"));
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let source = Source::file(dir.path().join("absent.txt")).unwrap();
		assert!(matches!(source.open(Duration::from_secs(1)), Err(MarkovError::Io { .. })));
	}
}
