use std::fmt;

/// A Markov chain prefix of one or more words.
///
/// The prefix starts as `len` empty words and advances with [`Prefix::shift`].
/// It is exclusively owned by the training pass or generation call that
/// created it and is mutated in place.
///
/// # Invariants
/// - The number of words never changes after construction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefix {
	words: Vec<String>,
}

impl Prefix {
	/// Creates a prefix of `len` empty words.
	pub fn new(len: usize) -> Self {
		Self { words: vec![String::new(); len] }
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	pub fn words(&self) -> &[String] {
		&self.words
	}

	/// Returns the canonical chain key: words joined with single spaces.
	///
	/// The initial two-word prefix therefore has the key `" "`.
	pub fn key(&self) -> String {
		self.words.join(" ")
	}

	/// Removes the first word and appends `word` at the end.
	pub fn shift(&mut self, word: &str) {
		if self.words.is_empty() {
			return;
		}
		self.words.rotate_left(1);
		if let Some(last) = self.words.last_mut() {
			last.clear();
			last.push_str(word);
		}
	}
}

impl fmt::Display for Prefix {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.key())
	}
}
