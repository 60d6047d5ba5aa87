//! Top-level module for vocabulary and sequence vectorization.
//!
//! This module turns raw text into a stable vocabulary and numeric
//! training/inference inputs:
//! - Token mapping (`TokenMap`)
//! - Sliding-window extraction (`windower`)
//! - One-hot encoding (`SequenceVectorizer`)

/// One-hot encoding of token windows using a `TokenMap`.
///
/// Unknown tokens degrade to the out-of-dictionary code rather than
/// failing, so the predictor always receives a well-formed vector.
pub mod encoder;

/// Bijective token ↔ code vocabulary built from a corpus.
///
/// Supports postcard persistence with inverse-consistency checks,
/// and parallel construction from a corpus file.
pub mod token_map;

/// Pure sliding-window extraction of `(window, next_token)` pairs.
///
/// Vocabulary-agnostic: unknown-token substitution is an encoder
/// responsibility.
pub mod windower;

/// Brings text to lowercase and splits it into tokens.
///
/// - `char_level` true: every character is a token (spaces included).
/// - `char_level` false: splits on whitespace into word tokens.
pub(crate) fn tokenize(text: &str, char_level: bool) -> Vec<String> {
	let text = text.to_lowercase();
	if char_level {
		text.chars().map(|c| c.to_string()).collect()
	} else {
		text.split_whitespace().map(str::to_owned).collect()
	}
}
