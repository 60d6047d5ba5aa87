use crate::error::NameGenError;
use crate::vectorizer::token_map::TokenMap;
use crate::vectorizer::windower::windows;
use crate::vectorizer::tokenize;

/// One-hot vector over the vocabulary: exactly one entry is `1.0`.
pub type OneHot = Vec<f32>;

/// One-hot matrix of a token window, `maxlen` rows of `vocab_size`
/// columns, one row per window position.
pub type EncodedWindow = Vec<OneHot>;

/// Encodes token windows as one-hot numeric inputs for a predictor.
///
/// # Responsibilities
/// - Tokenize raw text consistently with the owned `TokenMap`
/// - Encode windows and next-tokens as one-hot vectors
/// - Substitute the out-of-dictionary code for unseen tokens
///
/// Encoding never fails on unseen input: anything outside the
/// vocabulary degrades to the out-of-dictionary code, so the predictor
/// always receives a well-formed vector.
#[derive(Clone, Debug)]
pub struct SequenceVectorizer {
	map: TokenMap,
	char_level: bool,
}

impl SequenceVectorizer {
	/// Wraps an existing vocabulary.
	pub fn new(map: TokenMap, char_level: bool) -> Self {
		Self { map, char_level }
	}

	/// Builds the vocabulary from a corpus and wraps it.
	///
	/// # Errors
	/// Same as [`TokenMap::build`].
	pub fn from_corpus<S: AsRef<str>>(
		corpus: &[S],
		char_level: bool,
		ood_token: &str,
	) -> Result<Self, NameGenError> {
		Ok(Self::new(TokenMap::build(corpus, char_level, ood_token)?, char_level))
	}

	/// Read-only access to the underlying vocabulary.
	pub fn map(&self) -> &TokenMap {
		&self.map
	}

	/// Count of all codes, the out-of-dictionary entry included.
	pub fn vocab_size(&self) -> usize {
		self.map.vocab_size()
	}

	/// Whether tokenization is character-level.
	pub fn char_level(&self) -> bool {
		self.char_level
	}

	/// Splits a text into tokens the same way the vocabulary was built.
	pub fn tokenize(&self, text: &str) -> Vec<String> {
		tokenize(text, self.char_level)
	}

	/// Resolves a token to its code, falling back to the
	/// out-of-dictionary code for unseen tokens.
	pub fn resolve(&self, token: &str) -> usize {
		self.map.code_of(token).unwrap_or_else(|| self.map.ood_code())
	}

	/// Encodes a single token as a one-hot vector.
	pub fn encode_token(&self, token: &str) -> OneHot {
		let mut one_hot = vec![0.0; self.vocab_size()];
		one_hot[self.resolve(token)] = 1.0;
		one_hot
	}

	/// Encodes a token window as a one-hot matrix.
	///
	/// Row `t` has a single `1.0` at the column of `window[t]`'s code.
	pub fn encode_window<S: AsRef<str>>(&self, window: &[S]) -> EncodedWindow {
		window.iter().map(|token| self.encode_token(token.as_ref())).collect()
	}

	/// Extracts and encodes all training pairs of a text.
	///
	/// # Parameters
	/// - `text`: Raw text, typically already padded with sentinels
	///   (see [`pad`](crate::vectorizer::windower::pad)).
	/// - `maxlen`: Window length.
	/// - `step`: Stride between consecutive windows.
	///
	/// # Returns
	/// One `(EncodedWindow, OneHot)` pair per window: the encoded window
	/// and the one-hot vector of the token that follows it.
	///
	/// # Errors
	/// Returns a `Configuration` error if `maxlen` or `step` is zero.
	pub fn vectorize(
		&self,
		text: &str,
		maxlen: usize,
		step: usize,
	) -> Result<Vec<(EncodedWindow, OneHot)>, NameGenError> {
		let stream = self.tokenize(text);
		let mut pairs = Vec::new();
		for (window, next_token) in windows(&stream, maxlen, step)? {
			pairs.push((self.encode_window(window), self.encode_token(next_token)));
		}
		Ok(pairs)
	}
}
