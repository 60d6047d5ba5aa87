//! Top-level module for the generation state machine.
//!
//! This module drives autoregressive name generation:
//! - The predictor capability boundary (`Predictor`)
//! - Generation parameters (`GenerationInput`)
//! - The high-level generation interface (`NameGenerator`)

/// High-level interface for generating names from a predictor.
///
/// Owns the vocabulary and runs the sample/append/shift loop with
/// minimum-length enforcement and sentinel-based termination.
pub mod generator;

/// Generation parameters.
///
/// Stores window length, sentinels, minimum length, retry limit and
/// the validated diversity (temperature) setting.
pub mod generation_input;

/// External predictor capability.
///
/// The engine treats the trained model as an opaque synchronous
/// function from an encoded window to a probability distribution.
pub mod predictor;
