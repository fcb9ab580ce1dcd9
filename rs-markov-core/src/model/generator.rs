use std::collections::HashSet;

use log::{debug, warn};
use rand::Rng;
use rand::seq::IndexedRandom;

use super::chain::MarkovChain;
use super::generation_input::{GenerationInput, StartSeed};
use super::state::State;
use super::tokenizer::{ends_sentence, tokenize};
use super::vocabulary::TokenId;
use crate::error::{MarkovError, Result};

/// Number of vocabulary words suggested when a seed is not found.
const SEED_SAMPLE_SIZE: usize = 5;

/// Random walk over a trained [`MarkovChain`].
///
/// # Responsibilities
/// - Resolve the initial state from a seed or from the start states
/// - Walk the chain, restarting on dead ends and occasionally on sentence ends
/// - Bound the walk with the iteration cap of the [`GenerationInput`]
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
	chain: &'a MarkovChain,
}

impl<'a> Generator<'a> {
	pub fn new(chain: &'a MarkovChain) -> Self {
		Self { chain }
	}

	/// Generates text of approximately `input.length()` words.
	///
	/// # Behavior
	/// - The output starts with the tokens of the initial state.
	/// - On a dead end, an empty token (rendered as an extra space) is
	///   appended, followed by the tokens of a random start state.
	/// - After a sentence end, the walk may jump to a random start state
	///   without touching the output.
	/// - Stops once the length is reached or after `input.max_iterations()`
	///   steps, so the output may be shorter or longer than requested.
	///
	/// # Errors
	/// Returns `SeedNotFound` if a custom seed shares no word with the corpus.
	pub fn generate<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<String> {
		let chain = self.chain;
		let order = chain.order();
		let length = input.length();
		let threshold = input.resentence_threshold();

		let initial = match &input.start_seed {
			StartSeed::Random => chain.random_start_state(rng),
			StartSeed::Custom(seed) => self.seed_state(seed, rng)?,
		};
		debug!("Initial state: '{}'", initial.text(chain.vocabulary()));

		let mut current: Vec<TokenId> = initial.key().to_vec();
		let mut result: Vec<&str> = chain.tokens_of(initial).collect();
		let mut generated_words = result.len();

		let max_iterations = input.max_iterations();
		let mut iterations = 0;

		while generated_words < length && iterations < max_iterations {
			iterations += 1;

			let next = match chain.state(&current).and_then(|state| state.predict(&mut *rng)) {
				Some(next) => next,
				None => {
					// Dead end, start a new sentence
					let restart = chain.random_start_state(rng);
					debug!("Dead end, restarting from '{}'", restart.text(chain.vocabulary()));
					result.push("");
					result.extend(chain.tokens_of(restart));
					current = restart.key().to_vec();
					generated_words = result.len();
					continue;
				}
			};

			let token = chain.vocabulary().resolve(next);
			result.push(token);
			generated_words += 1;

			// Slide the window
			current.remove(0);
			current.push(next);

			if ends_sentence(token) && rng.random::<f64>() > threshold && generated_words + order < length {
				current = chain.random_start_state(rng).key().to_vec();
			}
		}

		debug!("Generated {} tokens in {} iterations", result.len(), iterations);
		Ok(result.join(" ").trim().to_owned())
	}

	/// Resolves the initial state for a custom seed.
	///
	/// # Behavior
	/// - Keeps the seed words found (case-insensitively) in the vocabulary.
	/// - Uses the last `order` seed words, or left-pads a shorter seed with
	///   the first words of a random start state.
	/// - Falls back to a random state containing a matched word, then to a
	///   random start state.
	fn seed_state<R: Rng + ?Sized>(&self, seed: &str, rng: &mut R) -> Result<&'a State> {
		let chain = self.chain;
		let order = chain.order();
		let vocabulary = chain.vocabulary();
		let seed_tokens = tokenize(seed);

		let lowered_vocabulary: HashSet<String> = vocabulary.iter().map(str::to_lowercase).collect();
		let matched: Vec<String> = seed_tokens
			.iter()
			.map(|token| token.to_lowercase())
			.filter(|token| lowered_vocabulary.contains(token))
			.collect();

		if matched.is_empty() {
			return Err(MarkovError::SeedNotFound {
				seed: seed.to_owned(),
				samples: vocabulary.iter().take(SEED_SAMPLE_SIZE).map(str::to_owned).collect(),
			});
		}

		let state_tokens: Vec<&str> = if seed_tokens.len() >= order {
			seed_tokens[seed_tokens.len() - order..].to_vec()
		} else {
			let padding = chain.random_start_state(rng);
			chain
				.tokens_of(padding)
				.take(order - seed_tokens.len())
				.chain(seed_tokens.iter().copied())
				.collect()
		};

		if let Some(state) = chain.state_of(&state_tokens) {
			return Ok(state);
		}

		let matching: Vec<&State> = chain
			.states()
			.filter(|state| {
				chain.tokens_of(state).any(|token| {
					let token = token.to_lowercase();
					matched.iter().any(|word| token.contains(word.as_str()))
				})
			})
			.collect();

		match matching.choose(rng) {
			Some(state) => Ok(*state),
			None => {
				warn!("No state contains seed '{}', starting from a random start state", seed);
				Ok(chain.random_start_state(rng))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn chain(text: &str, order: usize) -> MarkovChain {
		MarkovChain::build(&tokenize(text), order).unwrap()
	}

	#[test]
	fn unseeded_walk_starts_with_a_start_state() {
		let chain = chain("The cat sat. The dog ran. A bird sang.", 1);
		let input = GenerationInput::new(20).unwrap();
		let mut rng = StdRng::seed_from_u64(3);

		for _ in 0..20 {
			let text = Generator::new(&chain).generate(&input, &mut rng).unwrap();
			let first = tokenize(&text)[0];
			assert!(chain.start_states().any(|s| s.text(chain.vocabulary()) == first));
		}
	}

	#[test]
	fn dead_end_inserts_double_space() {
		// "b." has no successor, the walk must restart from "a".
		let chain = chain("a b.", 1);
		let mut input = GenerationInput::new(5).unwrap();
		input.set_resentence_threshold(1.0).unwrap();
		let text = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(1)).unwrap();
		assert!(text.starts_with("a b.  a"));
	}

	#[test]
	fn walk_is_bounded_by_the_iteration_cap() {
		let chain = chain("a b.", 1);
		let mut input = GenerationInput::new(500).unwrap();
		input.set_iteration_factor(1).unwrap();
		let text = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(1)).unwrap();
		// Each iteration appends at most `order + 1` tokens.
		assert!(text.split(' ').count() <= 1 + 2 * 500);
	}

	#[test]
	fn length_one_returns_initial_state_only() {
		let chain = chain("alpha beta gamma delta", 2);
		let input = GenerationInput::new(1).unwrap();
		let text = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(9)).unwrap();
		assert_eq!(text, "alpha beta");
	}

	#[test]
	fn exact_seed_state_anchors_the_walk() {
		let chain = chain("one two three four five six", 2);
		let input = GenerationInput::new(4).unwrap().with_seed(Some("three four"));
		let text = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(5)).unwrap();
		assert_eq!(text, "three four five six");
	}

	#[test]
	fn longer_seed_uses_its_last_words() {
		let chain = chain("one two three four five six", 2);
		let input = GenerationInput::new(3).unwrap().with_seed(Some("xyz four five"));
		let text = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(5)).unwrap();
		assert_eq!(text, "four five six");
	}

	#[test]
	fn seed_matching_is_case_insensitive() {
		let chain = chain("The cat sat on the mat.", 1);
		let input = GenerationInput::new(2).unwrap().with_seed(Some("CAT"));
		let text = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(2)).unwrap();
		// "CAT" is not a state, the fallback picks the state containing "cat".
		assert_eq!(text, "cat sat");
	}

	#[test]
	fn unknown_seed_is_rejected_with_samples() {
		let chain = chain("a b c d e f g h", 1);
		let input = GenerationInput::new(10).unwrap().with_seed(Some("zzqqxx"));
		let err = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(1)).unwrap_err();
		match err {
			MarkovError::SeedNotFound { seed, samples } => {
				assert_eq!(seed, "zzqqxx");
				assert_eq!(samples, vec!["a", "b", "c", "d", "e"]);
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[test]
	fn whitespace_seed_is_rejected() {
		let chain = chain("The cat sat. The dog ran.", 1);
		let input = GenerationInput::new(5).unwrap().with_seed(Some("   "));
		let err = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(1)).unwrap_err();
		assert!(matches!(err, MarkovError::SeedNotFound { ref seed, .. } if seed == "   "));
	}

	#[test]
	fn short_seed_is_padded_from_a_start_state() {
		// Both start states begin with "The", so the padding is always "The".
		let chain = chain("The cat sat. The dog ran.", 2);
		let input = GenerationInput::new(3).unwrap().with_seed(Some("cat"));

		for seed in 0..10 {
			let text = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(seed)).unwrap();
			assert_eq!(text, "The cat sat.");
		}
	}

	#[test]
	fn sentence_end_jumps_while_length_allows() {
		// "b." continues with "a" or "c", a jump restarts at "a" which yields "b." again.
		let chain = chain("a b. a b. c", 1);
		let mut input = GenerationInput::new(6).unwrap();
		input.set_resentence_threshold(0.0).unwrap();

		for seed in 0..10 {
			let text = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(seed)).unwrap();
			let tokens = tokenize(&text);
			assert_eq!(tokens.len(), 6);
			assert_eq!(tokens[..5], ["a", "b.", "b.", "b.", "b."]);
			// 5 + order is not below 6, the last sentence end keeps its successor.
			assert!(tokens[5] == "a" || tokens[5] == "c", "unexpected text: {text}");
		}
	}

	#[test]
	fn sentence_end_never_jumps_at_threshold_one() {
		let chain = chain("a b. a b. c", 1);
		let mut input = GenerationInput::new(3).unwrap();
		input.set_resentence_threshold(1.0).unwrap();

		for seed in 0..10 {
			let text = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(seed)).unwrap();
			let tokens = tokenize(&text);
			assert_eq!(tokens[..2], ["a", "b."]);
			assert_ne!(tokens[2], "b.");
		}
	}

	#[test]
	fn same_rng_same_text() {
		let chain = chain(
			"The cat sat. The dog ran. The cat ran. A dog sat on the cat. The bird sang!",
			1,
		);
		let input = GenerationInput::new(40).unwrap();
		let first = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(42)).unwrap();
		let second = Generator::new(&chain).generate(&input, &mut StdRng::seed_from_u64(42)).unwrap();
		assert_eq!(first, second);
	}
}
