use crate::vectorizer::encoder::EncodedWindow;

/// Opaque, already-trained next-token predictor.
///
/// The engine calls this once per generation step with the one-hot
/// encoding of the current window and expects a probability
/// distribution over the whole vocabulary: `vocab_size` non-negative
/// values summing to approximately 1.
///
/// Conditioning inputs beyond the window (for instance precomputed
/// image features) are state of the implementation, captured when the
/// predictor is constructed. The engine itself stays free of any
/// model-runtime dependency.
///
/// # Errors
/// A failed call aborts the whole generation; the engine never retries
/// a predictor. Retries, if any, belong to the caller.
pub trait Predictor {
	/// Produces a probability distribution over the vocabulary for the
	/// token following `window`.
	fn predict(&mut self, window: &EncodedWindow) -> Result<Vec<f32>, Box<dyn std::error::Error>>;
}
