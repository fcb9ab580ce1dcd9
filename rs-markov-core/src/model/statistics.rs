use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::chain::MarkovChain;
use super::tokenizer::tokenize;

/// Largest n-gram width accepted by [`ngram_frequencies`].
pub const MAX_NGRAM_SIZE: usize = 10;

/// Largest number of entries returned by [`ngram_frequencies`].
pub const MAX_NGRAM_LIMIT: usize = 100;

/// Aggregate metrics of a trained chain.
///
/// Serialized with the field names of the HTTP API.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Statistics {
	pub order: usize,
	pub word_count: usize,
	#[serde(rename = "unique_words")]
	pub unique_word_count: usize,
	#[serde(rename = "states")]
	pub state_count: usize,
	#[serde(rename = "transitions")]
	pub transition_count: usize,
	#[serde(rename = "average_transitions")]
	pub average_transitions_per_state: f64,
	#[serde(rename = "vocabulary_richness")]
	pub vocabulary_richness_percent: f64,
}

impl Statistics {
	/// Computes the metrics of `chain`.
	pub fn of(chain: &MarkovChain) -> Self {
		let word_count = chain.word_count();
		let unique_word_count = chain.vocabulary().len();
		let state_count = chain.state_count();
		let transition_count = chain.transition_count();

		Self {
			order: chain.order(),
			word_count,
			unique_word_count,
			state_count,
			transition_count,
			average_transitions_per_state: round2(ratio(transition_count, state_count)),
			vocabulary_richness_percent: round2(ratio(unique_word_count, word_count) * 100.0),
		}
	}
}

/// One entry of an n-gram frequency ranking.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NGramFrequency {
	pub ngram: String,
	pub count: usize,
}

/// Counts every contiguous window of `n` tokens in `text`.
///
/// Returns at most `limit` entries sorted by count (descending); equal counts
/// keep the order in which the n-grams first appear. Yields nothing when `n`
/// is 0 or larger than the token count.
pub fn ngram_frequencies(text: &str, n: usize, limit: usize) -> Vec<NGramFrequency> {
	let tokens = tokenize(text);
	if n == 0 || n > tokens.len() {
		return Vec::new();
	}

	let mut positions: HashMap<String, usize> = HashMap::new();
	let mut counts: Vec<NGramFrequency> = Vec::new();

	for window in tokens.windows(n) {
		let ngram = window.join(" ");
		match positions.get(&ngram).copied() {
			Some(position) => counts[position].count += 1,
			None => {
				positions.insert(ngram.clone(), counts.len());
				counts.push(NGramFrequency { ngram, count: 1 });
			}
		}
	}

	// Stable sort, ties stay in first-seen order
	counts.sort_by(|a, b| b.count.cmp(&a.count));
	counts.truncate(limit);
	counts
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub(crate) fn ratio(numerator: usize, denominator: usize) -> f64 {
	if denominator == 0 { 0.0 } else { numerator as f64 / denominator as f64 }
}

/// Rounds to two decimals, exact halves to the even neighbour.
pub(crate) fn round2(value: f64) -> f64 {
	(value * 100.0).round_ties_even() / 100.0
}
