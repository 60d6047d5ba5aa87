use std::fmt;

/// Errors produced by the generation engine.
///
/// All error kinds abort the current operation (vocabulary build/load,
/// or generation step) immediately; none are recovered or retried
/// inside the engine. Retry and backoff policy belongs to the caller.
///
/// # Variants
/// - `Configuration`: invalid build or generation parameters, such as
///   an out-of-dictionary token colliding with a corpus token, a zero
///   window length, or a non-positive temperature.
/// - `CorruptedState`: a loaded vocabulary whose two mapping tables are
///   not exact inverses of each other, or a malformed persisted blob.
/// - `InvalidDistribution`: predictor output that is not a valid
///   probability vector (NaN, negative entry, non-positive total, or
///   wrong length).
/// - `Predictor`: the external predictor call itself failed; the
///   message carries the predictor's own error text.
/// - `OodRetriesExhausted`: the out-of-dictionary rejection loop hit
///   its retry limit within a single generation step.
#[derive(Debug, Clone, PartialEq)]
pub enum NameGenError {
	/// Invalid build or generation parameters.
	Configuration(String),

	/// Persisted vocabulary is malformed or internally inconsistent.
	CorruptedState(String),

	/// Predictor output is not a valid probability vector.
	InvalidDistribution(String),

	/// The external predictor call failed.
	Predictor(String),

	/// Sampling drew the out-of-dictionary code too many times in a row.
	OodRetriesExhausted(usize),
}

impl fmt::Display for NameGenError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NameGenError::Configuration(msg) => write!(f, "configuration error: {msg}"),
			NameGenError::CorruptedState(msg) => write!(f, "corrupted state: {msg}"),
			NameGenError::InvalidDistribution(msg) => write!(f, "invalid distribution: {msg}"),
			NameGenError::Predictor(msg) => write!(f, "predictor error: {msg}"),
			NameGenError::OodRetriesExhausted(limit) => {
				write!(f, "out-of-dictionary token drawn {limit} times in a row, giving up")
			}
		}
	}
}

impl std::error::Error for NameGenError {}
