//! Property tests over randomly generated corpora.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::model::tokenizer::tokenize;
use rs_markov_core::{GenerationInput, MarkovError, MarkovModel};

fn corpus() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec("[a-dA-D]{1,3}[.!?,]?", 0..60)
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn every_state_has_order_tokens(words in corpus(), order in 1usize..=10) {
		let text = words.join(" ");
		let mut model = MarkovModel::new();

		match model.train(&text, order) {
			Ok(statistics) => {
				prop_assert!(words.len() > order);
				prop_assert_eq!(statistics.word_count, words.len());

				let chain = model.chain().unwrap();
				prop_assert!(chain.states().all(|state| state.key().len() == order));
				prop_assert!(chain.states().all(|state| !state.candidates().is_empty()));
				prop_assert!(chain.start_states().count() >= 1);
				prop_assert_eq!(statistics.transition_count, words.len() - order);
			}
			Err(MarkovError::InsufficientCorpus { required, actual, .. }) => {
				prop_assert!(words.len() <= order);
				prop_assert_eq!(required, order + 1);
				prop_assert_eq!(actual, words.len());
			}
			Err(other) => prop_assert!(false, "unexpected error: {}", other),
		}
	}

	#[test]
	fn unseeded_output_starts_with_a_start_state(
		words in prop::collection::vec("[a-dA-D]{1,3}[.!?,]?", 12..60),
		order in 1usize..=3,
		length in 1usize..80,
		seed in any::<u64>(),
	) {
		let mut model = MarkovModel::new();
		model.train(&words.join(" "), order).unwrap();
		let chain = model.chain().unwrap();

		let input = GenerationInput::new(length).unwrap();
		let text = model.generate_with_rng(&input, &mut StdRng::seed_from_u64(seed)).unwrap();
		let tokens = tokenize(&text);

		prop_assert!(tokens.len() >= order);
		let prefix = tokens[..order].join(" ");
		prop_assert!(chain.start_states().any(|state| state.text(chain.vocabulary()) == prefix));
	}

	#[test]
	fn seeded_rng_is_reproducible(
		words in prop::collection::vec("[a-dA-D]{1,3}[.!?,]?", 12..60),
		seed in any::<u64>(),
	) {
		let mut model = MarkovModel::new();
		model.train(&words.join(" "), 1).unwrap();

		let input = GenerationInput::new(60).unwrap();
		let first = model.generate_with_rng(&input, &mut StdRng::seed_from_u64(seed)).unwrap();
		let second = model.generate_with_rng(&input, &mut StdRng::seed_from_u64(seed)).unwrap();
		prop_assert_eq!(first, second);
	}
}
