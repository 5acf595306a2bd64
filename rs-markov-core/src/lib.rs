//! Word-level Markov-chain text generation library.
//!
//! This crate provides:
//! - A trainable word chain mapping fixed-length prefixes to suffix lists
//! - A generator walking the chain with an owned, seedable random source
//! - Sentence trimming of generated text
//! - A stream ingestion adapter reading `.txt` files or URLs
//!
//! The chain and generator never touch the outside world; only the
//! `source` module does.

/// Chain model, prefixes and generation.
pub mod model;

/// Post-processing of generated text.
pub mod trim;

/// Stream ingestion adapter (file / URL → generated text).
pub mod source;

/// Generation settings, loadable from TOML.
pub mod config;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (tokenizing reader, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use config::GenerationConfig;
pub use error::{MarkovError, Result};
pub use model::chain::Chain;
pub use model::generator::Generator;
pub use model::prefix::Prefix;
pub use source::{from_file, from_url, generate_from, Source};
pub use trim::{trim, trim_to_sentence, TrimMode};
