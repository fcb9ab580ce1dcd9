use log::info;
use rand::Rng;

use super::chain::MarkovChain;
use super::generation_input::GenerationInput;
use super::generator::Generator;
use super::statistics::{MAX_NGRAM_LIMIT, MAX_NGRAM_SIZE, NGramFrequency, Statistics, ngram_frequencies};
use super::tokenizer::tokenize;
use crate::error::{MarkovError, Result};

/// Chain and corpus produced by one training call.
#[derive(Clone, Debug)]
struct Trained {
	chain: MarkovChain,
	corpus: String,
}

/// Caller-owned Markov text model.
///
/// This struct is the entry point of the crate:
/// - `train` builds the chain from a corpus, replacing any previous one
/// - `generate` walks the chain
/// - `get_statistics` and `get_ngram_frequencies` report on the trained state
///
/// Each session owns its own instance. Training needs `&mut self` and every
/// read needs `&self`, so sharing one model across threads requires an
/// external lock (the HTTP server wraps it in a `Mutex`).
#[derive(Clone, Debug, Default)]
pub struct MarkovModel {
	trained: Option<Trained>,
}

impl MarkovModel {
	/// Returns an empty, untrained model.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_trained(&self) -> bool {
		self.trained.is_some()
	}

	/// Returns the trained chain, if any.
	pub fn chain(&self) -> Option<&MarkovChain> {
		self.trained.as_ref().map(|trained| &trained.chain)
	}

	/// Returns the corpus of the last successful training call.
	pub fn corpus_text(&self) -> Option<&str> {
		self.trained.as_ref().map(|trained| trained.corpus.as_str())
	}

	/// Trains the model on `text` with chains of `order` words.
	///
	/// # Behavior
	/// - Builds a new chain and replaces the previous one wholesale.
	/// - On failure, the previous model is left untouched.
	///
	/// # Errors
	/// - `InvalidParameter` if `order` is outside `1..=10`.
	/// - `InsufficientCorpus` if `text` has fewer than `order + 1` words.
	pub fn train(&mut self, text: &str, order: usize) -> Result<Statistics> {
		let chain = MarkovChain::build(&tokenize(text), order)?;
		let statistics = Statistics::of(&chain);
		self.trained = Some(Trained { chain, corpus: text.to_owned() });

		info!(
			"Model trained: order {}, {} words, {} states",
			statistics.order, statistics.word_count, statistics.state_count
		);
		Ok(statistics)
	}

	/// Generates text using the thread-local random generator.
	///
	/// # Errors
	/// - `ModelNotTrained` if `train` never succeeded.
	/// - `SeedNotFound` if the custom seed shares no word with the corpus.
	pub fn generate(&self, input: &GenerationInput) -> Result<String> {
		self.generate_with_rng(input, &mut rand::rng())
	}

	/// Generates text drawing randomness from `rng`.
	///
	/// With a seeded generator (ex. `StdRng::seed_from_u64`) the output is
	/// reproducible.
	pub fn generate_with_rng<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<String> {
		let trained = self.trained.as_ref().ok_or(MarkovError::ModelNotTrained)?;
		Generator::new(&trained.chain).generate(input, rng)
	}

	/// Returns the metrics of the trained chain.
	///
	/// # Errors
	/// Returns `ModelNotTrained` if `train` never succeeded.
	pub fn get_statistics(&self) -> Result<Statistics> {
		self.chain().map(Statistics::of).ok_or(MarkovError::ModelNotTrained)
	}

	/// Ranks the n-grams of width `n` of the training corpus.
	///
	/// Independent of the chain order.
	///
	/// # Errors
	/// - `InvalidParameter` if `n` is outside `1..=10` or `limit` outside `1..=100`.
	/// - `ModelNotTrained` if `train` never succeeded.
	pub fn get_ngram_frequencies(&self, n: usize, limit: usize) -> Result<Vec<NGramFrequency>> {
		if !(1..=MAX_NGRAM_SIZE).contains(&n) {
			return Err(MarkovError::InvalidParameter(format!(
				"N must be an integer between 1 and {}",
				MAX_NGRAM_SIZE
			)));
		}
		if !(1..=MAX_NGRAM_LIMIT).contains(&limit) {
			return Err(MarkovError::InvalidParameter(format!(
				"Limit must be an integer between 1 and {}",
				MAX_NGRAM_LIMIT
			)));
		}
		let corpus = self.corpus_text().ok_or(MarkovError::ModelNotTrained)?;
		Ok(ngram_frequencies(corpus, n, limit))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn untrained_model_rejects_reads() {
		let model = MarkovModel::new();
		assert!(!model.is_trained());
		let input = GenerationInput::new(10).unwrap();
		assert_eq!(model.generate(&input), Err(MarkovError::ModelNotTrained));
		assert_eq!(model.get_statistics(), Err(MarkovError::ModelNotTrained));
		assert_eq!(model.get_ngram_frequencies(2, 10), Err(MarkovError::ModelNotTrained));
	}

	#[test]
	fn train_returns_statistics() {
		let mut model = MarkovModel::new();
		let statistics = model.train("The cat sat. The dog ran.", 1).unwrap();
		assert_eq!(statistics, model.get_statistics().unwrap());
		assert_eq!(model.corpus_text(), Some("The cat sat. The dog ran."));
	}

	#[test]
	fn retraining_replaces_the_chain() {
		let mut model = MarkovModel::new();
		model.train("The cat sat. The dog ran.", 1).unwrap();
		model.train("one two three four", 2).unwrap();

		let chain = model.chain().unwrap();
		assert_eq!(chain.order(), 2);
		assert_eq!(chain.candidates("The"), None);
		assert_eq!(chain.vocabulary().len(), 4);
	}

	#[test]
	fn failed_training_keeps_previous_model() {
		let mut model = MarkovModel::new();
		model.train("The cat sat. The dog ran.", 1).unwrap();
		let err = model.train("too short", 5).unwrap_err();
		assert!(matches!(err, MarkovError::InsufficientCorpus { required: 6, actual: 2, .. }));
		assert_eq!(model.chain().unwrap().order(), 1);
	}

	#[test]
	fn ngram_parameters_are_validated() {
		let mut model = MarkovModel::new();
		model.train("a b c d", 1).unwrap();
		assert!(matches!(model.get_ngram_frequencies(0, 10), Err(MarkovError::InvalidParameter(_))));
		assert!(matches!(model.get_ngram_frequencies(11, 10), Err(MarkovError::InvalidParameter(_))));
		assert!(matches!(model.get_ngram_frequencies(2, 0), Err(MarkovError::InvalidParameter(_))));
		assert!(matches!(model.get_ngram_frequencies(2, 101), Err(MarkovError::InvalidParameter(_))));
		assert_eq!(model.get_ngram_frequencies(2, 100).unwrap().len(), 3);
	}
}
