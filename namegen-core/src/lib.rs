//! Character-level name generation library.
//!
//! This crate provides the tokenization and autoregressive generation
//! engine behind a name generator:
//! - Deterministic vocabulary construction with a reserved
//!   out-of-dictionary token
//! - Sliding-window sequence extraction and one-hot encoding
//! - Temperature-scaled categorical sampling
//! - A generation loop driven by an external, already-trained predictor
//!
//! The predictor itself (model training, image features, transport) is
//! out of scope: the engine only consumes its probability output.

/// Crate-wide error type covering vocabulary construction, persistence,
/// sampling and generation failures.
pub mod error;

/// Generation logic: the predictor capability, generation parameters
/// and the high-level name generator.
pub mod model;

/// Temperature-scaled categorical sampling over a probability vector.
pub mod sampler;

/// Vocabulary mapping, sequence windowing and one-hot encoding.
pub mod vectorizer;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
