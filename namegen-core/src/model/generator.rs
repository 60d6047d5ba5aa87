use std::path::Path;

use rand::Rng;

use crate::error::NameGenError;
use crate::model::generation_input::GenerationInput;
use crate::model::predictor::Predictor;
use crate::sampler::sample;
use crate::vectorizer::encoder::SequenceVectorizer;
use crate::vectorizer::token_map::TokenMap;

/// High-level generator producing names from an external predictor.
///
/// # Responsibilities
/// - Own the vocabulary for the lifetime of the generator
/// - Run the per-step loop: encode window, query the predictor, sample
///   a code, reject out-of-dictionary draws, update the window
/// - Enforce the minimum-length rule and sentinel-based termination
/// - Finalize the accumulated output into a presentable name
#[derive(Debug)]
pub struct NameGenerator {
	vectorizer: SequenceVectorizer,
}

/// Mutable state of a single generation call.
///
/// Created when the call starts and dropped when it returns; never
/// shared across concurrent calls. Concurrency, if wanted, is one
/// state per thread over the same read-only vocabulary.
struct GenerationState {
	/// Current context window, always exactly `maxlen` tokens.
	window: Vec<String>,
	/// Accumulated generated text.
	generated: String,
	/// Count of word-boundary characters produced so far.
	spaces: usize,
}

impl GenerationState {
	/// Warmup state: the window is `maxlen` copies of the start token
	/// and nothing has been emitted yet.
	fn new(start_token: &str, maxlen: usize) -> Self {
		Self {
			window: vec![start_token.to_owned(); maxlen],
			generated: String::new(),
			spaces: 0,
		}
	}

	/// Whether the accumulated output ends with a sentinel.
	fn is_done(&self, input: &GenerationInput) -> bool {
		!self.generated.is_empty()
			&& (self.generated.ends_with(&input.start_token) || self.generated.ends_with(&input.end_token))
	}

	/// Appends a resolved token and shifts the window left by one
	/// position, preserving its length.
	fn advance(&mut self, token: &str) {
		self.spaces += token.matches(' ').count();
		self.generated.push_str(token);
		self.window.remove(0);
		self.window.push(token.to_owned());
	}
}

impl NameGenerator {
	/// Creates a generator over an existing vectorizer.
	pub fn new(vectorizer: SequenceVectorizer) -> Self {
		Self { vectorizer }
	}

	/// Creates a generator by building (or cache-loading) the
	/// vocabulary from a corpus file, one entry per line.
	///
	/// # Errors
	/// Same as [`TokenMap::from_corpus_file`].
	pub fn from_corpus_file<P: AsRef<Path>>(
		filepath: P,
		char_level: bool,
		ood_token: &str,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let map = TokenMap::from_corpus_file(filepath, char_level, ood_token)?;
		Ok(Self::new(SequenceVectorizer::new(map, char_level)))
	}

	/// Read-only access to the vectorizer and its vocabulary.
	pub fn vectorizer(&self) -> &SequenceVectorizer {
		&self.vectorizer
	}

	/// Count of all codes, the out-of-dictionary entry included.
	pub fn vocab_size(&self) -> usize {
		self.vectorizer.vocab_size()
	}

	/// Creates a new `GenerationInput` with default parameters.
	pub fn make_generation_input(&self) -> GenerationInput {
		GenerationInput::new()
	}

	/// Generates one name using the thread-local random source.
	///
	/// See [`generate_with_rng`](Self::generate_with_rng).
	pub fn generate<P: Predictor>(
		&self,
		predictor: &mut P,
		input: &GenerationInput,
	) -> Result<String, NameGenError> {
		self.generate_with_rng(predictor, input, &mut rand::rng())
	}

	/// Generates one name, drawing randomness from `rng`.
	///
	/// # Behavior
	/// Starting from a window of `maxlen` start tokens, each step
	/// encodes the window, queries the predictor, and samples a code
	/// under the configured diversity. Out-of-dictionary draws are
	/// rejected and resampled from the same distribution, up to
	/// `input.ood_retry_limit` times. A premature end token is replaced
	/// by a single space until the output holds at least
	/// `min_name_length` words. The loop stops once the accumulated
	/// output ends with a sentinel; the trailing sentinel is then
	/// dropped and every word is capitalized.
	///
	/// # Errors
	/// - `Configuration`: zero `maxlen` or an empty sentinel token.
	/// - `Predictor`: the predictor call failed.
	/// - `InvalidDistribution`: the predictor output is malformed.
	/// - `OodRetriesExhausted`: the rejection loop hit its limit.
	///
	/// A failure mid-loop discards the accumulated output; there is no
	/// partial result and no retry at this level.
	pub fn generate_with_rng<P: Predictor, R: Rng + ?Sized>(
		&self,
		predictor: &mut P,
		input: &GenerationInput,
		rng: &mut R,
	) -> Result<String, NameGenError> {
		if input.maxlen == 0 {
			return Err(NameGenError::Configuration("maxlen must be at least 1".to_owned()));
		}
		if input.start_token.is_empty() || input.end_token.is_empty() {
			return Err(NameGenError::Configuration("sentinel tokens must not be empty".to_owned()));
		}

		let ood_code = self.vectorizer.map().ood_code();
		let mut state = GenerationState::new(&input.start_token, input.maxlen);

		while !state.is_done(input) {
			let encoded = self.vectorizer.encode_window(&state.window);
			let preds = predictor
				.predict(&encoded)
				.map_err(|e| NameGenError::Predictor(e.to_string()))?;
			if preds.len() != self.vocab_size() {
				return Err(NameGenError::InvalidDistribution(format!(
					"predictor returned {} probabilities for a vocabulary of {}",
					preds.len(),
					self.vocab_size()
				)));
			}

			// Resample from the same distribution until the draw is a
			// real token, within the retry budget
			let mut code = sample(&preds, input.diversity(), rng)?;
			let mut retries = 0;
			while code == ood_code {
				retries += 1;
				if retries >= input.ood_retry_limit {
					return Err(NameGenError::OodRetriesExhausted(input.ood_retry_limit));
				}
				code = sample(&preds, input.diversity(), rng)?;
			}

			let mut token = match self.vectorizer.map().token_of(code) {
				Some(t) => t.to_owned(),
				None => {
					return Err(NameGenError::CorruptedState(format!(
						"sampled code {code} has no token in the vocabulary"
					)));
				}
			};

			// A premature end token becomes a word boundary instead,
			// forcing generation up to the minimum word count
			if token == input.end_token && state.spaces + 1 < input.min_name_length {
				token = " ".to_owned();
			}

			state.advance(&token);
		}

		Ok(Self::finalize(&state.generated, input))
	}

	/// Strips one trailing sentinel and capitalizes every word.
	fn finalize(generated: &str, input: &GenerationInput) -> String {
		let mut generated = generated.to_owned();
		if generated.ends_with(&input.start_token) {
			generated.truncate(generated.len() - input.start_token.len());
		} else if generated.ends_with(&input.end_token) {
			generated.truncate(generated.len() - input.end_token.len());
		}

		generated
			.split_whitespace()
			.map(Self::capitalize)
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Uppercases the first letter of a word, leaving the rest as is.
	fn capitalize(word: &str) -> String {
		let mut chars = word.chars();
		match chars.next() {
			Some(first) => first.to_uppercase().chain(chars).collect(),
			None => String::new(),
		}
	}
}
