use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::chain::Chain;
use super::prefix::Prefix;

/// Random walk over a trained [`Chain`].
///
/// # Responsibilities
/// - Own the random source used to pick suffixes (no global state)
/// - Produce at most `max_words` words per call, starting every call from
///   the empty prefix
///
/// The default source is seeded from OS entropy; use
/// [`Generator::with_seed`] for reproducible output or
/// [`Generator::with_rng`] to inject any `rand::Rng`.
#[derive(Debug)]
pub struct Generator<'a, R = StdRng> {
	chain: &'a Chain,
	rng: R,
}

impl<'a> Generator<'a, StdRng> {
	/// Creates a generator with a freshly seeded random source.
	pub fn new(chain: &'a Chain) -> Self {
		Self { chain, rng: StdRng::from_os_rng() }
	}

	/// Creates a generator whose output is fully determined by `seed`.
	pub fn with_seed(chain: &'a Chain, seed: u64) -> Self {
		Self { chain, rng: StdRng::seed_from_u64(seed) }
	}
}

impl<'a, R: Rng> Generator<'a, R> {
	pub fn with_rng(chain: &'a Chain, rng: R) -> Self {
		Self { chain, rng }
	}

	/// Walks the chain for at most `max_words` steps.
	///
	/// # Behavior
	/// - Looks up the suffixes of the current prefix.
	/// - Stops early when there are none (the walk reached a prefix that was
	///   never followed by anything during training).
	/// - Otherwise picks one suffix uniformly over the list, so frequent
	///   continuations win proportionally more often, and shifts the prefix.
	pub fn generate_words(&mut self, max_words: usize) -> Vec<&'a str> {
		let chain: &'a Chain = self.chain;
		let mut prefix = Prefix::new(chain.prefix_len());
		let mut words = Vec::new();

		for _ in 0..max_words {
			let choices = chain.suffixes(&prefix.key());
			if choices.is_empty() {
				break;
			}
			let next = choices[self.rng.random_range(0..choices.len())].as_str();
			words.push(next);
			prefix.shift(next);
		}

		words
	}

	/// Same walk as [`Generator::generate_words`], joined with single spaces.
	pub fn generate(&mut self, max_words: usize) -> String {
		self.generate_words(max_words).join(" ")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::RngCore;

	/// Always returns zero, which makes every pick select index 0.
	struct ZeroRng;

	impl RngCore for ZeroRng {
		fn next_u32(&mut self) -> u32 {
			0
		}

		fn next_u64(&mut self) -> u64 {
			0
		}

		fn fill_bytes(&mut self, dst: &mut [u8]) {
			dst.fill(0);
		}
	}

	fn trained(prefix_len: usize, text: &str) -> Chain {
		let mut chain = Chain::new(prefix_len).unwrap();
		chain.train_str(text);
		chain
	}

	#[test]
	fn first_choice_walk_is_stable() {
		let chain = trained(2, "the cat sat on the mat the cat ran");
		let mut generator = Generator::with_rng(&chain, ZeroRng);
		assert_eq!(generator.generate(12), "the cat sat on the mat the cat sat on the mat");
	}

	#[test]
	fn zero_words_is_empty() {
		let chain = trained(2, "the cat sat on the mat");
		assert_eq!(Generator::with_seed(&chain, 7).generate(0), "");
	}

	#[test]
	fn untrained_chain_is_empty() {
		let chain = Chain::new(2).unwrap();
		assert_eq!(Generator::new(&chain).generate(50), "");
		assert_eq!(chain.generate(50), "");
	}

	#[test]
	fn stops_when_prefixes_run_out() {
		let chain = trained(2, "one two three four five");
		let words = Generator::with_seed(&chain, 1).generate_words(1000);
		assert_eq!(words, vec!["one", "two", "three", "four", "five"]);
	}

	#[test]
	fn same_seed_same_text() {
		let chain = trained(1, "a b a c a d b a c b d a b c a");
		let first = Generator::with_seed(&chain, 42).generate(40);
		let second = Generator::with_seed(&chain, 42).generate(40);
		assert_eq!(first, second);
	}

	#[test]
	fn each_call_restarts_from_empty_prefix() {
		let chain = trained(2, "start here and stop");
		let mut generator = Generator::with_seed(&chain, 3);
		assert_eq!(generator.generate(2), "start here");
		assert_eq!(generator.generate(2), "start here");
	}

	#[test]
	fn picks_follow_suffix_frequency() {
		let mut chain = Chain::new(2).unwrap();
		for _ in 0..3 {
			chain.train_str("x y often");
		}
		chain.train_str("x y rarely");
		assert_eq!(chain.suffixes("x y").len(), 4);

		let mut generator = Generator::with_seed(&chain, 2024);
		let samples = 10_000;
		let hits = (0..samples)
			.filter(|_| generator.generate_words(3).last() == Some(&"often"))
			.count();
		let ratio = hits as f64 / samples as f64;
		assert!((0.72..=0.78).contains(&ratio), "ratio was {ratio}");
	}
}
