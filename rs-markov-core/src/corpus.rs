use std::io;
use std::path::Path;

use crate::io::{get_filename, list_files, read_text};
use crate::model::tokenizer::tokenize;
use serde::{Deserialize, Serialize};

/// Extension of corpus files in the data folder.
pub const CORPUS_EXTENSION: &str = "txt";

const TITLE_HEADER: &str = "Title:";
const AUTHOR_HEADER: &str = "Author:";
const UNKNOWN_AUTHOR: &str = "Unknown";

/// A named training text.
///
/// Loaded from `<data_folder>/<key>.txt`. Leading `Title:` and `Author:`
/// lines are metadata, everything after them is the text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Corpus {
	pub key: String,
	pub title: String,
	pub author: String,
	pub text: String,
}

/// Catalogue entry of a corpus, without its text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CorpusSummary {
	pub key: String,
	pub title: String,
	pub author: String,
	pub word_count: usize,
}

impl Corpus {
	/// Splits a corpus file into metadata and text.
	pub fn parse(key: &str, content: &str) -> Self {
		let mut title = None;
		let mut author = None;
		let mut rest = content;

		loop {
			let (line, remainder) = rest.split_once('\n').unwrap_or((rest, ""));
			let line = line.trim();
			if let Some(value) = line.strip_prefix(TITLE_HEADER) {
				title = Some(value.trim().to_owned());
			} else if let Some(value) = line.strip_prefix(AUTHOR_HEADER) {
				author = Some(value.trim().to_owned());
			} else {
				break;
			}
			rest = remainder;
		}

		Self {
			key: key.to_owned(),
			title: title.unwrap_or_else(|| key.to_owned()),
			author: author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_owned()),
			text: rest.trim().to_owned(),
		}
	}

	pub fn summary(&self) -> CorpusSummary {
		CorpusSummary {
			key: self.key.clone(),
			title: self.title.clone(),
			author: self.author.clone(),
			word_count: tokenize(&self.text).len(),
		}
	}
}

/// Loads every corpus of `folder`, sorted by key.
pub fn list_corpora<P: AsRef<Path>>(folder: P) -> io::Result<Vec<Corpus>> {
	let folder = folder.as_ref();
	let mut corpora = Vec::new();
	for file in list_files(folder, CORPUS_EXTENSION)? {
		let key = get_filename(&file)?;
		corpora.push(Corpus::parse(&key, &read_text(folder.join(&file))?));
	}
	Ok(corpora)
}

/// Loads the corpus named `key`, if the folder lists it.
///
/// Only keys of listed files are accepted, so `key` cannot escape `folder`.
pub fn load_corpus<P: AsRef<Path>>(folder: P, key: &str) -> io::Result<Option<Corpus>> {
	let folder = folder.as_ref();
	let file = format!("{}.{}", key, CORPUS_EXTENSION);
	if !list_files(folder, CORPUS_EXTENSION)?.contains(&file) {
		return Ok(None);
	}
	Ok(Some(Corpus::parse(key, &read_text(folder.join(file))?)))
}
