//! Descriptive statistics over arbitrary text.
//!
//! Independent of any trained model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::statistics::{ratio, round2};
use crate::model::tokenizer::{SENTENCE_TERMINATORS, tokenize};

/// Number of entries in [`Analysis::top_words`].
pub const TOP_WORDS: usize = 10;

/// Punctuation trimmed from both ends of a word before counting it.
const WORD_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Frequency of one normalized word.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WordCount {
	pub word: String,
	pub count: usize,
}

/// Result of [`analyze`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Analysis {
	pub word_count: usize,
	pub sentence_count: usize,
	pub character_count: usize,
	#[serde(rename = "unique_words")]
	pub unique_word_count: usize,
	pub average_word_length: f64,
	pub average_sentence_length: f64,
	#[serde(rename = "vocabulary_richness")]
	pub vocabulary_richness_percent: f64,
	pub top_words: Vec<WordCount>,
}

/// Lower-cases `word` and trims surrounding punctuation.
fn normalize(word: &str) -> String {
	word.to_lowercase().trim_matches(WORD_PUNCTUATION).to_owned()
}

/// Analyzes `text`.
///
/// - Words are whitespace separated, punctuation included.
/// - Sentences are the non-blank fragments between runs of `.`, `!`, `?`.
/// - Characters are the non-whitespace characters.
/// - Unique words and `top_words` use the normalized form (lower case,
///   `.,!?;:` trimmed); ties keep first-seen order.
///
/// Total: an empty text yields zeroed metrics.
pub fn analyze(text: &str) -> Analysis {
	let words = tokenize(text);
	let sentence_count = text
		.split(SENTENCE_TERMINATORS)
		.filter(|fragment| !fragment.trim().is_empty())
		.count();
	let character_count = text.chars().filter(|c| !c.is_whitespace()).count();

	let mut positions: HashMap<String, usize> = HashMap::new();
	let mut frequencies: Vec<WordCount> = Vec::new();
	for word in &words {
		let normalized = normalize(word);
		match positions.get(&normalized).copied() {
			Some(position) => frequencies[position].count += 1,
			None => {
				positions.insert(normalized.clone(), frequencies.len());
				frequencies.push(WordCount { word: normalized, count: 1 });
			}
		}
	}
	let unique_word_count = frequencies.len();

	let total_word_length: usize = words.iter().map(|word| word.chars().count()).sum();

	frequencies.sort_by(|a, b| b.count.cmp(&a.count));
	frequencies.truncate(TOP_WORDS);

	Analysis {
		word_count: words.len(),
		sentence_count,
		character_count,
		unique_word_count,
		average_word_length: round2(ratio(total_word_length, words.len())),
		average_sentence_length: round2(ratio(words.len(), sentence_count)),
		vocabulary_richness_percent: round2(ratio(unique_word_count, words.len()) * 100.0),
		top_words: frequencies,
	}
}
