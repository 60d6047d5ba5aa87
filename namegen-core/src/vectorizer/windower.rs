use crate::error::NameGenError;

/// Lazy iterator over `(window, next_token)` pairs of a token stream.
///
/// Yields `(stream[i..i + maxlen], stream[i + maxlen])` for `i` in
/// `0, step, 2 * step, …` while a following token exists. A stream of
/// `maxlen` tokens or fewer yields nothing.
///
/// Windowing is pure and restartable: the iterator borrows the stream
/// and holds no state beyond its cursor. It is also
/// vocabulary-agnostic; tokens outside a vocabulary are substituted
/// later, by the encoder.
#[derive(Debug)]
pub struct Windows<'a, T> {
	stream: &'a [T],
	maxlen: usize,
	step: usize,
	pos: usize,
}

impl<'a, T> Iterator for Windows<'a, T> {
	type Item = (&'a [T], &'a T);

	fn next(&mut self) -> Option<Self::Item> {
		if self.pos + self.maxlen >= self.stream.len() {
			return None;
		}
		let window = &self.stream[self.pos..self.pos + self.maxlen];
		let next_token = &self.stream[self.pos + self.maxlen];
		self.pos += self.step;
		Some((window, next_token))
	}
}

/// Slices a token stream into fixed-length `(window, next_token)` pairs.
///
/// # Parameters
/// - `stream`: The ordered token sequence to window.
/// - `maxlen`: Window length; every yielded window has exactly this
///   many tokens.
/// - `step`: Stride between consecutive windows (`1` for maximally
///   overlapping windows).
///
/// # Errors
/// Returns a `Configuration` error if `maxlen` or `step` is zero.
pub fn windows<T>(stream: &[T], maxlen: usize, step: usize) -> Result<Windows<'_, T>, NameGenError> {
	if maxlen == 0 {
		return Err(NameGenError::Configuration("maxlen must be at least 1".to_owned()));
	}
	if step == 0 {
		return Err(NameGenError::Configuration("step must be at least 1".to_owned()));
	}
	Ok(Windows { stream, maxlen, step, pos: 0 })
}

/// Pads a text with sentinel tokens for training-pair extraction.
///
/// Produces `start_token` repeated `maxlen` times, the text, then
/// `end_token`, so that the first window is all start tokens and the
/// last window is followed by the end token.
pub fn pad(text: &str, start_token: &str, end_token: &str, maxlen: usize) -> String {
	let mut padded = start_token.repeat(maxlen);
	padded.push_str(text);
	padded.push_str(end_token);
	padded
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::vectorizer::tokenize;

	#[test]
	fn window_count_is_stream_length_minus_maxlen() {
		let stream: Vec<String> = tokenize("abcde", true);
		assert_eq!(windows(&stream, 2, 1).unwrap().count(), 3);
		assert_eq!(windows(&stream, 4, 1).unwrap().count(), 1);
	}

	#[test]
	fn short_stream_yields_nothing() {
		let stream: Vec<String> = tokenize("ab", true);
		assert_eq!(windows(&stream, 2, 1).unwrap().count(), 0);
		assert_eq!(windows(&stream, 5, 1).unwrap().count(), 0);
	}

	#[test]
	fn padded_stream_windows() {
		let padded = pad("ab$", "@", "", 2);
		assert_eq!(padded, "@@ab$");

		let stream = tokenize(&padded, true);
		let pairs: Vec<(String, &String)> = windows(&stream, 2, 1)
			.unwrap()
			.map(|(window, next_token)| (window.concat(), next_token))
			.collect();
		assert_eq!(pairs.len(), 3);
		assert_eq!(pairs[0], ("@@".to_owned(), &"a".to_owned()));
		assert_eq!(pairs[1], ("@a".to_owned(), &"b".to_owned()));
		assert_eq!(pairs[2], ("ab".to_owned(), &"$".to_owned()));
	}

	#[test]
	fn step_skips_windows() {
		let stream: Vec<String> = tokenize("abcdef", true);
		let starts: Vec<String> = windows(&stream, 2, 2)
			.unwrap()
			.map(|(window, _)| window[0].clone())
			.collect();
		assert_eq!(starts, vec!["a", "c", "e"]);
	}

	#[test]
	fn windowing_is_restartable() {
		let stream: Vec<String> = tokenize("abcd", true);
		let first: Vec<String> = windows(&stream, 2, 1).unwrap().map(|(w, _)| w.concat()).collect();
		let second: Vec<String> = windows(&stream, 2, 1).unwrap().map(|(w, _)| w.concat()).collect();
		assert_eq!(first, second);
	}

	#[test]
	fn zero_parameters_are_rejected() {
		let stream: Vec<String> = tokenize("abc", true);
		assert!(matches!(windows(&stream, 0, 1), Err(NameGenError::Configuration(_))));
		assert!(matches!(windows(&stream, 2, 0), Err(NameGenError::Configuration(_))));
	}
}
