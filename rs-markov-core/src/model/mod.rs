//! Word-level Markov chain text model.
//!
//! This module provides:
//! - Whitespace tokenization (`tokenizer`)
//! - Interned token storage (`Vocabulary`)
//! - Chain construction (`MarkovChain`, `State`)
//! - Generation configuration (`GenerationInput`)
//! - Random-walk generation (`Generator`)
//! - Model metrics and n-gram rankings (`statistics`)
//! - The caller-owned model handle (`MarkovModel`)

/// Caller-owned model handle exposing train, generate and reporting.
///
/// Holds at most one trained chain and the corpus it was built from.
pub mod markov_model;

/// Fixed-order word chain built from a token sequence.
///
/// Records transitions per state and the states a walk may start from.
pub mod chain;

/// Bounded random walk over a trained chain, with optional seeding.
pub mod generator;

/// Validated parameters of a generation walk.
pub mod generation_input;

/// Aggregate metrics and n-gram frequency rankings.
pub mod statistics;

/// Whitespace tokenizer and sentence-end detection.
pub mod tokenizer;

/// One transition-table entry: a token window and its next-token candidates.
pub mod state;

/// Arena of interned tokens.
pub mod vocabulary;
