use rand::Rng;
use rand::seq::IndexedRandom;

use super::vocabulary::{TokenId, Vocabulary};

/// Key of a state: `order` consecutive token ids.
pub type StateKey = Box<[TokenId]>;

/// Represents a state in the word-level Markov chain.
///
/// A `State` corresponds to a window of `order` consecutive tokens (`key`)
/// and stores every token observed right after that window.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges are
/// weighted by repetition: a candidate observed three times appears three
/// times in `candidates`.
///
/// ## Invariants
/// - `key.len()` equals the order of the owning chain
/// - `candidates` is never empty once the state is in a chain
#[derive(Clone, Debug)]
pub struct State {
	/// Token window identifying the state.
	key: StateKey,
	/// Observed next tokens, in corpus order, duplicates retained.
	candidates: Vec<TokenId>,
}

impl State {
	/// Creates a new state without candidates.
	pub fn new(key: StateKey) -> Self {
		Self { key, candidates: Vec::new() }
	}

	/// Records one occurrence of `next` following this state.
	pub fn add_transition(&mut self, next: TokenId) {
		self.candidates.push(next);
	}

	pub fn key(&self) -> &[TokenId] {
		&self.key
	}

	pub fn candidates(&self) -> &[TokenId] {
		&self.candidates
	}

	/// Number of recorded transitions (duplicates included).
	pub fn transition_count(&self) -> usize {
		self.candidates.len()
	}

	/// Picks the next token uniformly among the recorded candidates.
	///
	/// Since duplicates are kept, the probability of a token is proportional
	/// to the number of times it was observed.
	///
	/// Returns `None` if the state has no transitions.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<TokenId> {
		self.candidates.choose(rng).copied()
	}

	/// Renders the key as its space-joined text form.
	pub fn text(&self, vocabulary: &Vocabulary) -> String {
		self.key.iter().map(|id| vocabulary.resolve(*id)).collect::<Vec<_>>().join(" ")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn empty_state_predicts_nothing() {
		let state = State::new(vec![0].into_boxed_slice());
		assert_eq!(state.predict(&mut StdRng::seed_from_u64(1)), None);
	}

	#[test]
	fn prediction_is_one_of_the_candidates() {
		let mut state = State::new(vec![0].into_boxed_slice());
		state.add_transition(1);
		state.add_transition(2);
		state.add_transition(1);
		assert_eq!(state.transition_count(), 3);

		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..50 {
			let next = state.predict(&mut rng);
			assert!(matches!(next, Some(1) | Some(2)));
		}
	}

	#[test]
	fn text_joins_tokens_with_spaces() {
		let mut vocabulary = Vocabulary::new();
		let key = vec![vocabulary.intern("The"), vocabulary.intern("cat")];
		let state = State::new(key.into_boxed_slice());
		assert_eq!(state.text(&vocabulary), "The cat");
	}
}
