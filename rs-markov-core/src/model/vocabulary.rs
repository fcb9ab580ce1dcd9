use std::collections::HashMap;

/// Index of a token inside a [`Vocabulary`].
pub type TokenId = u32;

/// Arena of interned tokens.
///
/// Each distinct token (case-sensitive) is stored once and addressed by a
/// dense `TokenId`. Ids are assigned in first-seen order, so iterating the
/// arena is deterministic.
///
/// # Invariants
/// - `tokens[ids[t]] == t` for every interned token `t`
/// - Ids are contiguous, starting at 0
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
	tokens: Vec<String>,
	ids: HashMap<String, TokenId>,
}

impl Vocabulary {
	/// Creates an empty vocabulary.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the id of `token`, interning it if it is new.
	pub fn intern(&mut self, token: &str) -> TokenId {
		if let Some(id) = self.ids.get(token) {
			return *id;
		}
		let id = self.tokens.len() as TokenId;
		self.tokens.push(token.to_owned());
		self.ids.insert(token.to_owned(), id);
		id
	}

	/// Looks up an already interned token.
	pub fn id(&self, token: &str) -> Option<TokenId> {
		self.ids.get(token).copied()
	}

	/// Resolves an id back to its token.
	///
	/// # Panics
	/// Panics if `id` was not produced by this vocabulary.
	pub fn resolve(&self, id: TokenId) -> &str {
		&self.tokens[id as usize]
	}

	/// Number of distinct tokens.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Iterates over tokens in first-seen order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.tokens.iter().map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn interning_is_idempotent_and_case_sensitive() {
		let mut vocabulary = Vocabulary::new();
		let the = vocabulary.intern("The");
		let cat = vocabulary.intern("cat");
		assert_eq!(vocabulary.intern("The"), the);
		assert_ne!(vocabulary.intern("the"), the);
		assert_eq!(vocabulary.len(), 3);
		assert_eq!(vocabulary.resolve(cat), "cat");
		assert_eq!(vocabulary.id("dog"), None);
	}

	#[test]
	fn iteration_follows_first_seen_order() {
		let mut vocabulary = Vocabulary::new();
		for token in ["b", "a", "b", "c"] {
			vocabulary.intern(token);
		}
		assert_eq!(vocabulary.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
	}
}
