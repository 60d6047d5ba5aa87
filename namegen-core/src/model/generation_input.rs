use crate::error::NameGenError;

/// Input parameters for one generation call.
///
/// `GenerationInput` contains both configuration parameters (window
/// length, sentinels, minimum length, retry limit) and the validated
/// diversity setting controlling sampling sharpness.
///
/// # Invariants
/// - `diversity` is always a positive finite number (enforced by the
///   setter)
/// - Sentinel tokens are non-empty (enforced at generation time)
pub struct GenerationInput {
	/// Window length; the model context holds exactly this many tokens.
	pub maxlen: usize,

	/// Minimum number of whitespace-delimited words a generated name
	/// must contain before the end sentinel is accepted.
	pub min_name_length: usize,

	/// Sentinel token seeding the window before the first step.
	pub start_token: String,

	/// Sentinel token terminating a generated name.
	pub end_token: String,

	/// Upper bound on consecutive out-of-dictionary draws within one
	/// step before the generation is abandoned.
	pub ood_retry_limit: usize,

	/// Sampling temperature (0 = excluded; < 1 sharpens, > 1 flattens).
	diversity: f64,
}

impl GenerationInput {
	/// Creates a `GenerationInput` with the default parameters.
	///
	/// # Visibility
	/// - `pub(crate)` to prevent construction outside the crate; use
	///   `NameGenerator::make_generation_input`.
	pub(crate) fn new() -> Self {
		Self {
			maxlen: 3,
			min_name_length: 2,
			start_token: "@".to_owned(),
			end_token: "$".to_owned(),
			ood_retry_limit: 1000,
			diversity: 1.2,
		}
	}

	/// Returns the current diversity (temperature) factor.
	pub fn diversity(&self) -> f64 {
		self.diversity
	}

	/// Sets the diversity factor.
	///
	/// # Errors
	/// Returns an error unless the value is a positive finite number.
	pub fn set_diversity(&mut self, diversity: f64) -> Result<(), NameGenError> {
		if !diversity.is_finite() || diversity <= 0.0 {
			return Err(NameGenError::Configuration(format!(
				"diversity must be a positive finite number, got {diversity}"
			)));
		}
		self.diversity = diversity;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_the_reference_settings() {
		let input = GenerationInput::new();
		assert_eq!(input.maxlen, 3);
		assert_eq!(input.min_name_length, 2);
		assert_eq!(input.start_token, "@");
		assert_eq!(input.end_token, "$");
		assert_eq!(input.diversity(), 1.2);
	}

	#[test]
	fn diversity_setter_validates() {
		let mut input = GenerationInput::new();
		assert!(input.set_diversity(0.5).is_ok());
		assert_eq!(input.diversity(), 0.5);

		assert!(matches!(input.set_diversity(0.0), Err(NameGenError::Configuration(_))));
		assert!(matches!(input.set_diversity(-2.0), Err(NameGenError::Configuration(_))));
		assert!(matches!(input.set_diversity(f64::NAN), Err(NameGenError::Configuration(_))));
		assert_eq!(input.diversity(), 0.5);
	}
}
