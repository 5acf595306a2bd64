use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use serde::{Deserialize, Serialize};

use super::generator::Generator;
use super::prefix::Prefix;
use crate::error::{MarkovError, Result};
use crate::io::{build_output_path, Words};

/// A word-level Markov chain.
///
/// Maps the key of a prefix (its words joined by single spaces) to every
/// word observed right after it, in observation order.
///
/// # Responsibilities
/// - Accumulate suffixes from one or more byte streams
/// - Expose the suffix list of a prefix for sampling
/// - Merge with another chain of the same prefix length
/// - Save to / load from a binary snapshot
///
/// # Invariants
/// - `prefix_len` is >= 1 and never changes
/// - Suffix lists keep duplicates: a word seen N times after a prefix
///   appears N times, which is what weights random selection
/// - Entries are only ever appended to
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Chain {
	/// Number of words in a prefix
	prefix_len: usize,

	/// Prefix key → suffix words (duplicates retained)
	chain: HashMap<String, Vec<String>>,
}

impl Chain {
	/// Creates an empty chain with prefixes of `prefix_len` words.
	///
	/// # Errors
	/// Returns an error if `prefix_len` is 0.
	pub fn new(prefix_len: usize) -> Result<Self> {
		if prefix_len == 0 {
			return Err(MarkovError::InvalidPrefixLength(prefix_len));
		}
		Ok(Self { prefix_len, chain: HashMap::new() })
	}

	pub fn prefix_len(&self) -> usize {
		self.prefix_len
	}

	/// Number of distinct prefixes seen during training.
	pub fn len(&self) -> usize {
		self.chain.len()
	}

	pub fn is_empty(&self) -> bool {
		self.chain.is_empty()
	}

	/// Iterates over every known prefix key, in no particular order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.chain.keys().map(String::as_str)
	}

	/// Returns the suffixes recorded for a prefix key.
	///
	/// Unknown keys yield an empty slice.
	pub fn suffixes(&self, key: &str) -> &[String] {
		self.chain.get(key).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Reads whitespace-delimited words from `reader` and records, for each
	/// one, the prefix of words that preceded it.
	///
	/// Each call starts from a prefix of empty words, so several calls
	/// accumulate independent passes into the same chain.
	///
	/// # Notes
	/// - Reading stops at end of stream or at the first read error; an error
	///   is not reported, training just ends with what was read so far.
	/// - Returns the number of words consumed.
	pub fn train<R: Read>(&mut self, reader: R) -> usize {
		let mut prefix = Prefix::new(self.prefix_len);
		let mut count = 0;

		for word in Words::new(BufReader::new(reader)) {
			let key = prefix.key();
			prefix.shift(&word);
			self.chain.entry(key).or_default().push(word);
			count += 1;
		}

		log::debug!("trained {} words, chain now holds {} prefixes", count, self.chain.len());
		count
	}

	/// Trains the chain from an in-memory text.
	pub fn train_str(&mut self, text: &str) -> usize {
		self.train(text.as_bytes())
	}

	/// Generates at most `max_words` words with a freshly seeded generator.
	///
	/// See [`Generator`] for seeded or injected randomness.
	pub fn generate(&self, max_words: usize) -> String {
		Generator::new(self).generate(max_words)
	}

	/// Merges another chain into this one.
	///
	/// Suffix lists of shared keys are concatenated (this chain's first),
	/// missing keys are cloned.
	///
	/// # Errors
	/// Returns an error if the prefix lengths differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.prefix_len != other.prefix_len {
			return Err(MarkovError::PrefixLengthMismatch {
				expected: self.prefix_len,
				found: other.prefix_len,
			});
		}

		for (key, suffixes) in &other.chain {
			if let Some(existing) = self.chain.get_mut(key) {
				existing.extend(suffixes.iter().cloned());
			} else {
				self.chain.insert(key.clone(), suffixes.clone());
			}
		}

		Ok(())
	}

	/// Trains one pass per document, spreading documents over worker threads.
	///
	/// # Behavior
	/// - Splits documents into chunks (based on CPU cores * factor).
	/// - Each thread trains a private chain on its chunk.
	/// - Partial chains are merged back in document order, so the result is
	///   the same as calling [`Chain::train_str`] on every document in turn.
	///
	/// # Errors
	/// Returns an error if `prefix_len` is 0 or a worker thread died.
	pub fn build_parallel(prefix_len: usize, documents: &[String]) -> Result<Self> {
		let mut final_chain = Self::new(prefix_len)?;
		if documents.is_empty() {
			return Ok(final_chain);
		}

		let factor = 8;
		let chunks = num_cpus::get() * factor;
		let chunk_size = documents.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		let mut expected = 0;
		for (index, chunk) in documents.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();
			expected += 1;

			thread::spawn(move || {
				let mut partial = Chain { prefix_len, chain: HashMap::new() };
				for document in &chunk {
					partial.train_str(document);
				}
				// The receiver only goes away if the caller already bailed out.
				let _ = tx.send((index, partial));
			});
		}
		drop(tx);

		let mut partials: Vec<(usize, Chain)> = rx.iter().collect();
		if partials.len() != expected {
			return Err(MarkovError::WorkerFailed { expected, received: partials.len() });
		}
		partials.sort_by_key(|(index, _)| *index);

		for (_, partial) in &partials {
			final_chain.merge(partial)?;
		}

		log::debug!("built chain from {} documents in {} chunks", documents.len(), expected);
		Ok(final_chain)
	}

	/// Serializes the chain to `path` using `postcard`.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let path = path.as_ref();
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(path, bytes).map_err(|e| MarkovError::io(path.display().to_string(), e))
	}

	/// Loads a chain previously written by [`Chain::save`].
	///
	/// # Errors
	/// Returns an error on I/O or decoding failure, or if the stored
	/// prefix length is 0.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let bytes = std::fs::read(path).map_err(|e| MarkovError::io(path.display().to_string(), e))?;
		let chain: Chain = postcard::from_bytes(&bytes)?;
		if chain.prefix_len == 0 {
			return Err(MarkovError::InvalidPrefixLength(0));
		}
		Ok(chain)
	}

	/// Loads the snapshot next to `text_path` if one exists, otherwise
	/// trains from the text file and writes the snapshot.
	///
	/// - `notes.txt` is cached as `notes.bin` in the same directory.
	/// - A snapshot older than the text, with another prefix length, or one
	///   that fails to decode, is ignored and overwritten.
	pub fn load_or_train<P: AsRef<Path>>(text_path: P, prefix_len: usize) -> Result<Self> {
		let text_path = text_path.as_ref();
		let identifier = text_path.display().to_string();
		let snapshot_path = build_output_path(text_path, "bin").map_err(|e| MarkovError::io(&identifier, e))?;

		if snapshot_path.exists() && !is_stale(text_path, &snapshot_path) {
			match Self::load(&snapshot_path) {
				Ok(chain) if chain.prefix_len == prefix_len => {
					log::info!("reusing snapshot {}", snapshot_path.display());
					return Ok(chain);
				}
				Ok(chain) => log::warn!(
					"snapshot {} has prefix length {}, expected {}; retraining",
					snapshot_path.display(),
					chain.prefix_len,
					prefix_len
				),
				Err(e) => log::warn!("ignoring snapshot {}: {}", snapshot_path.display(), e),
			}
		}

		let mut chain = Self::new(prefix_len)?;
		let file = File::open(text_path).map_err(|e| MarkovError::io(&identifier, e))?;
		chain.train(file);
		chain.save(&snapshot_path)?;
		log::info!("wrote snapshot {}", snapshot_path.display());

		Ok(chain)
	}
}

/// Whether the text at `text_path` was modified after `snapshot_path`.
///
/// A snapshot whose age cannot be read is stale; a text whose age cannot be
/// read leaves the snapshot as the only usable data.
fn is_stale(text_path: &Path, snapshot_path: &Path) -> bool {
	let modified = |path: &Path| std::fs::metadata(path).and_then(|m| m.modified());
	match (modified(text_path), modified(snapshot_path)) {
		(Ok(text), Ok(snapshot)) if text > snapshot => {
			log::info!("{} changed since its snapshot; retraining", text_path.display());
			true
		}
		(_, Err(_)) => true,
		_ => false,
	}
}
