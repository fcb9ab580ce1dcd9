//! Error types for training, generation and reporting.

use thiserror::Error;

/// Errors returned by the Markov model operations.
///
/// Every variant is recoverable by the caller: fix the input, train the
/// model, or pick another seed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkovError {
	#[error("Corpus too small for order {order}. Need at least {required} words, got {actual}.")]
	InsufficientCorpus { order: usize, required: usize, actual: usize },

	#[error("Model not trained. Call train() first.")]
	ModelNotTrained,

	#[error(
		"Seed word(s) '{seed}' not found in the trained corpus. Try words that exist in the text, such as: {}",
		.samples.join(", ")
	)]
	SeedNotFound { seed: String, samples: Vec<String> },

	#[error("Invalid parameter: {0}")]
	InvalidParameter(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MarkovError>;
