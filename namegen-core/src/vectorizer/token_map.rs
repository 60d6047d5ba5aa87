use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::error::NameGenError;
use crate::io::{build_output_path, read_file};
use crate::vectorizer::tokenize;

/// Bijective mapping between tokens and integer codes.
///
/// A `TokenMap` holds both directions of the vocabulary mapping
/// (token → code and code → token) plus a dedicated out-of-dictionary
/// token standing in for anything outside the known vocabulary.
///
/// # Responsibilities
/// - Build the vocabulary deterministically from a corpus
/// - Persist and restore the mapping pair (postcard)
/// - Reject inconsistent mapping tables at load time
///
/// # Invariants
/// - Every token has a unique code in `[0, vocab_size)`
/// - The two mappings are exact inverses of each other
/// - The out-of-dictionary token is always a vocabulary member
/// - Immutable after construction; safe to share read-only across
///   concurrent generation calls
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TokenMap {
	/// token → code table.
	token_code: HashMap<String, usize>,
	/// code → token table, exact inverse of `token_code`.
	code_token: HashMap<usize, String>,
	/// Reserved token standing in for out-of-vocabulary input.
	ood_token: String,
}

impl TokenMap {
	/// Builds a vocabulary from a corpus of texts.
	///
	/// # Parameters
	/// - `corpus`: Collection of texts; items are joined with a single
	///   space before tokenization, so the space token is part of the
	///   vocabulary whenever the corpus has more than one item.
	/// - `char_level`: Character-level tokens if true, whitespace-split
	///   word tokens otherwise. Text is lowercased either way.
	/// - `ood_token`: Reserved out-of-dictionary token.
	///
	/// # Behavior
	/// Codes are assigned by sorting the full vocabulary (distinct
	/// corpus tokens plus the out-of-dictionary token) lexicographically
	/// and numbering it `0..vocab_size`.
	///
	/// # Errors
	/// Returns a `Configuration` error if `ood_token` already occurs in
	/// the corpus token set.
	pub fn build<S: AsRef<str>>(corpus: &[S], char_level: bool, ood_token: &str) -> Result<Self, NameGenError> {
		let joined = corpus.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(" ");
		let distinct: HashSet<String> = tokenize(&joined, char_level).into_iter().collect();
		Self::assemble(distinct, ood_token)
	}

	/// Builds a vocabulary from a corpus file, one entry per line.
	///
	/// # Behavior
	/// - If a `.bin` file exists next to the corpus file, loads the
	///   mapping from it instead of rebuilding (fast path).
	/// - Otherwise splits the lines into chunks (CPU cores * factor),
	///   collects distinct tokens per chunk on separate threads, merges
	///   the partial sets, and serializes the result to the `.bin`
	///   side-cache for future fast loading.
	///
	/// # Errors
	/// - File I/O failures.
	/// - `Configuration` if the out-of-dictionary token collides.
	/// - `CorruptedState` if an existing side-cache is inconsistent.
	pub fn from_corpus_file<P: AsRef<Path>>(
		filepath: P,
		char_level: bool,
		ood_token: &str,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let binary_data_path = build_output_path(&filepath, "bin")?;
		if binary_data_path.exists() {
			let bytes = std::fs::read(binary_data_path)?;
			return Ok(Self::from_bytes(&bytes)?);
		}

		let lines = read_file(&filepath)?;
		let map = Self::build_parallel(&lines, char_level, ood_token)?;
		std::fs::write(binary_data_path, map.to_bytes()?)?;
		Ok(map)
	}

	/// Collects the distinct token set of `lines` in parallel, then
	/// assembles the vocabulary.
	///
	/// # Notes
	/// - Uses MPSC channels to collect partial token sets from threads.
	/// - Set union is order-independent, so the chunked build yields the
	///   same vocabulary as a sequential pass.
	fn build_parallel(lines: &[String], char_level: bool, ood_token: &str) -> Result<Self, NameGenError> {
		if lines.is_empty() {
			return Self::assemble(HashSet::new(), ood_token);
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = (lines.len() + chunks - 1) / chunks;

		let (tx, rx) = mpsc::channel();
		for chunk in lines.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			thread::spawn(move || {
				let mut partial: HashSet<String> = HashSet::new();
				for line in chunk {
					partial.extend(tokenize(&line, char_level));
				}
				tx.send(partial).expect("Failed to send from thread");
			});
		}
		drop(tx);

		let mut distinct = HashSet::new();
		for partial in rx.iter() {
			distinct.extend(partial);
		}

		// Joining corpus entries implies a separating space between them
		if char_level && lines.len() > 1 {
			distinct.insert(" ".to_owned());
		}

		Self::assemble(distinct, ood_token)
	}

	/// Assigns codes to the distinct token set plus the
	/// out-of-dictionary token.
	fn assemble(distinct: HashSet<String>, ood_token: &str) -> Result<Self, NameGenError> {
		if distinct.contains(ood_token) {
			return Err(NameGenError::Configuration(format!(
				"out-of-dictionary token {ood_token:?} already occurs in the corpus"
			)));
		}

		let mut tokens: Vec<String> = distinct.into_iter().collect();
		tokens.push(ood_token.to_owned());
		tokens.sort();

		let mut token_code = HashMap::new();
		let mut code_token = HashMap::new();
		for (code, token) in tokens.into_iter().enumerate() {
			token_code.insert(token.clone(), code);
			code_token.insert(code, token);
		}

		Ok(Self {
			token_code,
			code_token,
			ood_token: ood_token.to_owned(),
		})
	}

	/// Reassembles a `TokenMap` from previously extracted mapping tables.
	///
	/// # Errors
	/// Returns a `CorruptedState` error if the two tables are not exact
	/// inverses of each other, or if the out-of-dictionary token is
	/// missing from the vocabulary.
	pub fn from_parts(
		token_code: HashMap<String, usize>,
		code_token: HashMap<usize, String>,
		ood_token: String,
	) -> Result<Self, NameGenError> {
		let map = Self { token_code, code_token, ood_token };
		map.check_consistency()?;
		Ok(map)
	}

	/// Serializes the mapping pair into an opaque binary blob.
	pub fn to_bytes(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
		Ok(postcard::to_stdvec(self)?)
	}

	/// Restores a `TokenMap` from a blob produced by `to_bytes`.
	///
	/// # Errors
	/// Returns a `CorruptedState` error if the blob cannot be decoded or
	/// if the decoded mapping tables are not exact inverses.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, NameGenError> {
		let map: Self = postcard::from_bytes(bytes)
			.map_err(|e| NameGenError::CorruptedState(format!("undecodable vocabulary blob: {e}")))?;
		map.check_consistency()?;
		Ok(map)
	}

	/// Writes the serialized mapping pair to a file.
	pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
		std::fs::write(path, self.to_bytes()?)?;
		Ok(())
	}

	/// Loads a `TokenMap` from a file written by `save_to`.
	pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
		let bytes = std::fs::read(path)?;
		Ok(Self::from_bytes(&bytes)?)
	}

	/// Verifies that the two mapping tables are exact inverses and that
	/// the out-of-dictionary token is a vocabulary member.
	fn check_consistency(&self) -> Result<(), NameGenError> {
		if self.token_code.len() != self.code_token.len() {
			return Err(NameGenError::CorruptedState(format!(
				"mapping tables disagree in size: {} tokens vs {} codes",
				self.token_code.len(),
				self.code_token.len()
			)));
		}
		for (token, code) in &self.token_code {
			match self.code_token.get(code) {
				Some(t) if t == token => (),
				_ => {
					return Err(NameGenError::CorruptedState(format!(
						"code {code} does not map back to token {token:?}"
					)));
				}
			}
		}
		if !self.token_code.contains_key(&self.ood_token) {
			return Err(NameGenError::CorruptedState(format!(
				"out-of-dictionary token {:?} missing from the vocabulary",
				self.ood_token
			)));
		}
		Ok(())
	}

	/// Count of all codes, the out-of-dictionary entry included.
	pub fn vocab_size(&self) -> usize {
		self.token_code.len()
	}

	/// Returns the code of `token`, or `None` if it is not in the
	/// vocabulary.
	pub fn code_of(&self, token: &str) -> Option<usize> {
		self.token_code.get(token).copied()
	}

	/// Returns the token carrying `code`, or `None` if out of range.
	pub fn token_of(&self, code: usize) -> Option<&str> {
		self.code_token.get(&code).map(String::as_str)
	}

	/// Code of the out-of-dictionary token.
	pub fn ood_code(&self) -> usize {
		// Membership is a construction/load invariant
		self.token_code[&self.ood_token]
	}

	/// The reserved out-of-dictionary token.
	pub fn ood_token(&self) -> &str {
		&self.ood_token
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn build_sorts_full_vocabulary_lexicographically() {
		let map = TokenMap::build(&["ab$"], true, "?").unwrap();
		assert_eq!(map.vocab_size(), 4);
		assert_eq!(map.code_of("$"), Some(0));
		assert_eq!(map.code_of("?"), Some(1));
		assert_eq!(map.code_of("a"), Some(2));
		assert_eq!(map.code_of("b"), Some(3));
		assert_eq!(map.token_of(3), Some("b"));
		assert_eq!(map.ood_code(), 1);
	}

	#[test]
	fn build_lowercases_and_joins_corpus_items() {
		let map = TokenMap::build(&["AB", "ba"], true, "?").unwrap();
		// a, b, space and the out-of-dictionary token
		assert_eq!(map.vocab_size(), 4);
		assert!(map.code_of(" ").is_some());
		assert!(map.code_of("A").is_none());
		assert!(map.code_of("a").is_some());
	}

	#[test]
	fn build_word_level_splits_on_whitespace() {
		let map = TokenMap::build(&["Alice  Liddell", "alice"], false, "<ood>").unwrap();
		assert_eq!(map.vocab_size(), 3);
		assert!(map.code_of("alice").is_some());
		assert!(map.code_of("liddell").is_some());
		assert!(map.code_of(" ").is_none());
	}

	#[test]
	fn build_rejects_ood_collision() {
		let result = TokenMap::build(&["ab?"], true, "?");
		assert!(matches!(result, Err(NameGenError::Configuration(_))));
	}

	#[test]
	fn blob_round_trip_preserves_both_directions() {
		let map = TokenMap::build(&["alice", "bob"], true, "?").unwrap();
		let bytes = map.to_bytes().unwrap();
		let restored = TokenMap::from_bytes(&bytes).unwrap();
		assert_eq!(map, restored);
	}

	#[test]
	fn from_parts_rejects_non_inverse_tables() {
		let token_code: HashMap<String, usize> =
			[("a".to_owned(), 0), ("?".to_owned(), 1)].into_iter().collect();
		// Code 0 maps back to the wrong token
		let code_token: HashMap<usize, String> =
			[(0, "b".to_owned()), (1, "?".to_owned())].into_iter().collect();
		let result = TokenMap::from_parts(token_code, code_token, "?".to_owned());
		assert!(matches!(result, Err(NameGenError::CorruptedState(_))));
	}

	#[test]
	fn from_parts_rejects_orphan_codes() {
		let token_code: HashMap<String, usize> =
			[("a".to_owned(), 0), ("?".to_owned(), 1)].into_iter().collect();
		let code_token: HashMap<usize, String> =
			[(0, "a".to_owned()), (1, "?".to_owned()), (2, "b".to_owned())]
				.into_iter()
				.collect();
		let result = TokenMap::from_parts(token_code, code_token, "?".to_owned());
		assert!(matches!(result, Err(NameGenError::CorruptedState(_))));
	}

	#[test]
	fn from_parts_requires_ood_membership() {
		let token_code: HashMap<String, usize> = [("a".to_owned(), 0)].into_iter().collect();
		let code_token: HashMap<usize, String> = [(0, "a".to_owned())].into_iter().collect();
		let result = TokenMap::from_parts(token_code, code_token, "?".to_owned());
		assert!(matches!(result, Err(NameGenError::CorruptedState(_))));
	}

	#[test]
	fn corpus_file_build_matches_in_memory_build_and_caches() {
		let dir = std::env::temp_dir().join(format!("namegen-map-{}", std::process::id()));
		std::fs::create_dir_all(&dir).unwrap();
		let corpus_path = dir.join("names.txt");
		std::fs::write(&corpus_path, "alice\nbob\ncharlie\n").unwrap();

		let from_file = TokenMap::from_corpus_file(&corpus_path, true, "?").unwrap();
		let in_memory = TokenMap::build(&["alice", "bob", "charlie"], true, "?").unwrap();
		assert_eq!(from_file, in_memory);

		// Second load goes through the side-cache
		let cache_path = dir.join("names.bin");
		assert!(cache_path.exists());
		let cached = TokenMap::from_corpus_file(&corpus_path, true, "?").unwrap();
		assert_eq!(cached, in_memory);

		std::fs::remove_dir_all(&dir).unwrap();
	}
}
