//! Top-level module for the word chain system.
//!
//! - Fixed-length word windows (`Prefix`)
//! - The trained prefix → suffixes mapping (`Chain`)
//! - A random walk over a chain (`Generator`)

/// Fixed-length word window used as the Markov state key.
pub mod prefix;

/// Trainable mapping from prefixes to observed suffix words.
///
/// Supports stream training, merging, parallel construction
/// and binary snapshots.
pub mod chain;

/// Bounded random walk over a trained `Chain`.
///
/// Owns its random source, which can be seeded or injected.
pub mod generator;
