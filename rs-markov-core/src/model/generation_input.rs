use crate::error::{MarkovError, Result};

/// Largest number of words a single generation may request.
pub const MAX_LENGTH: usize = 500;

/// Default multiplier applied to `length` to bound the walk.
pub const DEFAULT_ITERATION_FACTOR: usize = 3;

/// Default threshold above which a sentence end triggers a jump to a new
/// start state.
pub const DEFAULT_RESENTENCE_THRESHOLD: f64 = 0.3;

/// Strategy used to select the starting state when generating text.
///
/// # Variants
/// - `Random`: start from a random start state.
/// - `Custom(String)`: anchor the walk on the given seed words.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StartSeed {
	#[default]
	Random,
	Custom(String),
}

impl StartSeed {
	/// Builds a seed from an optional string, an empty string meaning no seed.
	///
	/// Whitespace-only input is still a seed, it matches no corpus word.
	pub fn from_option(seed: Option<&str>) -> Self {
		match seed {
			Some(s) if !s.is_empty() => StartSeed::Custom(s.to_owned()),
			_ => StartSeed::Random,
		}
	}
}

/// Input parameters for one generation walk.
///
/// # Responsibilities
/// - Track the requested length and the start seed
/// - Track the walk tuning knobs (`iteration_factor`, `resentence_threshold`)
///
/// # Invariants
/// - `length` is in `1..=MAX_LENGTH`
/// - `iteration_factor >= 1`
/// - `resentence_threshold` is in `[0.0, 1.0]`
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
	/// Approximate number of words to generate.
	length: usize,

	/// Optional starting seed for generation.
	pub start_seed: StartSeed,

	/// The walk stops after `iteration_factor * length` steps.
	iteration_factor: usize,

	/// A sentence end jumps to a new start state when a uniform draw exceeds
	/// this value (0.0 = almost always, 1.0 = never).
	resentence_threshold: f64,
}

impl GenerationInput {
	/// Creates an unseeded input with default tuning.
	///
	/// # Errors
	/// Returns an error if `length` is outside `1..=MAX_LENGTH`.
	pub fn new(length: usize) -> Result<Self> {
		let mut input = Self {
			length: 1,
			start_seed: StartSeed::Random,
			iteration_factor: DEFAULT_ITERATION_FACTOR,
			resentence_threshold: DEFAULT_RESENTENCE_THRESHOLD,
		};
		input.set_length(length)?;
		Ok(input)
	}

	/// Sets the start seed, builder style.
	pub fn with_seed(mut self, seed: Option<&str>) -> Self {
		self.start_seed = StartSeed::from_option(seed);
		self
	}

	pub fn length(&self) -> usize {
		self.length
	}

	pub fn iteration_factor(&self) -> usize {
		self.iteration_factor
	}

	pub fn resentence_threshold(&self) -> f64 {
		self.resentence_threshold
	}

	/// Upper bound on walk iterations.
	pub fn max_iterations(&self) -> usize {
		self.length.saturating_mul(self.iteration_factor)
	}

	/// Sets the requested length.
	///
	/// # Errors
	/// Returns an error if the value is outside `1..=MAX_LENGTH`.
	pub fn set_length(&mut self, length: usize) -> Result<()> {
		if !(1..=MAX_LENGTH).contains(&length) {
			return Err(MarkovError::InvalidParameter(format!(
				"Length must be an integer between 1 and {}",
				MAX_LENGTH
			)));
		}
		self.length = length;
		Ok(())
	}

	/// Sets the iteration cap multiplier.
	///
	/// # Errors
	/// Returns an error if the value is 0.
	pub fn set_iteration_factor(&mut self, iteration_factor: usize) -> Result<()> {
		if iteration_factor == 0 {
			return Err(MarkovError::InvalidParameter("Iteration factor must be at least 1".to_owned()));
		}
		self.iteration_factor = iteration_factor;
		Ok(())
	}

	/// Sets the resentencing threshold (0.0..1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_resentence_threshold(&mut self, threshold: f64) -> Result<()> {
		if !(0.0..=1.0).contains(&threshold) {
			return Err(MarkovError::InvalidParameter(
				"Resentence threshold must be between 0.0 and 1.0".to_owned(),
			));
		}
		self.resentence_threshold = threshold;
		Ok(())
	}
}
