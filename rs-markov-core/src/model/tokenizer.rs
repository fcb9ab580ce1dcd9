/// Characters that close a sentence when they end a token.
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Splits text into word tokens.
///
/// - Splits on runs of whitespace (leading/trailing whitespace is ignored)
/// - Keeps punctuation attached to words
/// - Performs no case normalization
pub fn tokenize(text: &str) -> Vec<&str> {
	text.split_whitespace().collect()
}

/// Returns `true` if the token ends with `.`, `!` or `?`.
pub fn ends_sentence(token: &str) -> bool {
	token.ends_with(SENTENCE_TERMINATORS)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_whitespace_runs() {
		assert_eq!(tokenize("  The cat\tsat.\n\nThe  dog "), vec!["The", "cat", "sat.", "The", "dog"]);
	}

	#[test]
	fn empty_and_blank_text_yield_no_tokens() {
		assert!(tokenize("").is_empty());
		assert!(tokenize(" \t\n ").is_empty());
	}

	#[test]
	fn punctuation_and_case_are_kept() {
		assert_eq!(tokenize("Hello, World!"), vec!["Hello,", "World!"]);
	}

	#[test]
	fn sentence_end_detection() {
		assert!(ends_sentence("sat."));
		assert!(ends_sentence("what?"));
		assert!(ends_sentence("!"));
		assert!(!ends_sentence("Mr.Smith"));
		assert!(!ends_sentence("hello,"));
		assert!(!ends_sentence(""));
	}
}
