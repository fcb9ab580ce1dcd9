use std::collections::HashMap;

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{State, StateKey};
use super::tokenizer::ends_sentence;
use super::vocabulary::{TokenId, Vocabulary};
use crate::error::{MarkovError, Result};

/// Smallest accepted chain order.
pub const MIN_ORDER: usize = 1;

/// Largest accepted chain order.
pub const MAX_ORDER: usize = 10;

/// Word-level Markov chain of a fixed order.
///
/// The `MarkovChain` maps each window of `order` consecutive tokens to the
/// tokens observed right after it, and remembers which windows may begin a
/// generated text.
///
/// # Responsibilities
/// - Build the transition table from a tokenized corpus
/// - Record start states (corpus start and sentence starts)
/// - Resolve states from token windows
///
/// # Invariants
/// - `order` is in `MIN_ORDER..=MAX_ORDER`
/// - Every state key holds exactly `order` token ids
/// - Every state has at least one candidate
/// - `start_states` is never empty and only holds valid indices into `states`
#[derive(Clone, Debug)]
pub struct MarkovChain {
	/// Number of tokens in a state.
	order: usize,

	/// Interned tokens of the corpus.
	vocabulary: Vocabulary,

	/// States in first-seen order.
	states: Vec<State>,

	/// Position of each state in `states`.
	index: HashMap<StateKey, usize>,

	/// Indices of the states a walk may start from (duplicates retained).
	start_states: Vec<usize>,

	/// Number of tokens in the training corpus.
	word_count: usize,
}

impl MarkovChain {
	/// Builds a chain of order `order` from a tokenized corpus.
	///
	/// # Errors
	/// - `InvalidParameter` if `order` is outside `MIN_ORDER..=MAX_ORDER`.
	/// - `InsufficientCorpus` if fewer than `order + 1` tokens are supplied.
	pub fn build(tokens: &[&str], order: usize) -> Result<Self> {
		if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
			return Err(MarkovError::InvalidParameter(format!(
				"Order must be an integer between {} and {}",
				MIN_ORDER, MAX_ORDER
			)));
		}
		if tokens.len() < order + 1 {
			return Err(MarkovError::InsufficientCorpus {
				order,
				required: order + 1,
				actual: tokens.len(),
			});
		}

		let mut chain = Self {
			order,
			vocabulary: Vocabulary::new(),
			states: Vec::new(),
			index: HashMap::new(),
			start_states: Vec::new(),
			word_count: tokens.len(),
		};

		// Every token takes part in at least one window, so interning them
		// all up front yields the same set as interning window by window.
		let ids: Vec<TokenId> = tokens.iter().map(|token| chain.vocabulary.intern(token)).collect();

		for i in 0..ids.len() - order {
			let key: StateKey = ids[i..i + order].into();
			let next = ids[i + order];

			let position = match chain.index.get(&key).copied() {
				Some(position) => position,
				None => {
					chain.states.push(State::new(key.clone()));
					chain.index.insert(key, chain.states.len() - 1);
					chain.states.len() - 1
				}
			};
			chain.states[position].add_transition(next);

			if i == 0 || ends_sentence(tokens[i - 1]) {
				chain.start_states.push(position);
			}
		}

		if chain.start_states.is_empty() {
			chain.start_states.push(0);
		}

		debug!(
			"Built order-{} chain: {} tokens, {} states, {} start states",
			order,
			chain.word_count,
			chain.states.len(),
			chain.start_states.len()
		);

		Ok(chain)
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	pub fn word_count(&self) -> usize {
		self.word_count
	}

	/// Iterates over states in first-seen order.
	pub fn states(&self) -> impl Iterator<Item = &State> {
		self.states.iter()
	}

	pub fn state_count(&self) -> usize {
		self.states.len()
	}

	/// Total number of recorded transitions (duplicates included).
	pub fn transition_count(&self) -> usize {
		self.states.iter().map(State::transition_count).sum()
	}

	/// Iterates over start states in registration order.
	pub fn start_states(&self) -> impl Iterator<Item = &State> {
		self.start_states.iter().map(|position| &self.states[*position])
	}

	/// Finds the state identified by `key`.
	pub fn state(&self, key: &[TokenId]) -> Option<&State> {
		self.index.get(key).map(|position| &self.states[*position])
	}

	/// Finds the state whose tokens are exactly `tokens`.
	///
	/// Returns `None` if a token is unknown or the window was never observed.
	pub fn state_of(&self, tokens: &[&str]) -> Option<&State> {
		let key = tokens
			.iter()
			.map(|token| self.vocabulary.id(token))
			.collect::<Option<Vec<_>>>()?;
		self.state(&key)
	}

	/// Returns the candidates recorded for the space-joined state `text`.
	pub fn candidates(&self, text: &str) -> Option<Vec<&str>> {
		let tokens: Vec<&str> = text.split(' ').collect();
		let state = self.state_of(&tokens)?;
		Some(state.candidates().iter().map(|id| self.vocabulary.resolve(*id)).collect())
	}

	/// Picks a start state uniformly (weighted by registration count).
	pub fn random_start_state<R: Rng + ?Sized>(&self, rng: &mut R) -> &State {
		// `start_states` is never empty, index 0 is unreachable in practice.
		let position = self.start_states.choose(rng).copied().unwrap_or(0);
		&self.states[position]
	}

	/// Resolves the tokens of a state.
	pub fn tokens_of<'a>(&'a self, state: &'a State) -> impl Iterator<Item = &'a str> + 'a {
		state.key().iter().map(|id| self.vocabulary.resolve(*id))
	}
}
