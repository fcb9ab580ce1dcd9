//! Word-level Markov chain text generation library.
//!
//! This crate provides:
//! - Variable-order (1 to 10 words) Markov chains built from a text corpus
//! - Random-walk generation, optionally anchored on seed words
//! - Model statistics and n-gram frequency rankings
//! - Descriptive statistics over arbitrary text
//! - Corpus files with title/author metadata
//!
//! The entry point is [`MarkovModel`], a handle owned by the caller.

/// Markov chain model, generation and reporting.
pub mod model;

/// Text analysis independent of any trained model.
pub mod analysis;

/// Error type shared by all fallible operations.
pub mod error;

/// Named corpora stored as text files.
pub mod corpus;

/// I/O utilities (file reading, folder listing).
pub mod io;

pub use analysis::{Analysis, WordCount, analyze};
pub use error::{MarkovError, Result};
pub use model::generation_input::{GenerationInput, StartSeed};
pub use model::markov_model::MarkovModel;
pub use model::statistics::{NGramFrequency, Statistics};
