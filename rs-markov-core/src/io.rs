use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Iterator over whitespace-delimited words of a buffered byte stream.
///
/// - Splits on Unicode whitespace (`char::is_whitespace`), runs of
///   separators produce no empty words
/// - Separators are recognised once their UTF-8 sequence is complete, so a
///   multi-byte space straddling two buffer fills still splits
/// - Bytes are decoded (lossily) once a word is complete
/// - A word terminated by end of stream is yielded
/// - `Interrupted` reads are retried; any other read error ends the
///   iteration silently and the word being accumulated is dropped
pub(crate) struct Words<R> {
	reader: R,
	done: bool,
}

impl<R: BufRead> Words<R> {
	pub(crate) fn new(reader: R) -> Self {
		Self { reader, done: false }
	}
}

impl<R: BufRead> Iterator for Words<R> {
	type Item = String;

	fn next(&mut self) -> Option<String> {
		if self.done {
			return None;
		}

		let mut word: Vec<u8> = Vec::new();
		loop {
			let (consumed, complete) = match self.reader.fill_buf() {
				Ok([]) => {
					self.done = true;
					return if word.is_empty() { None } else { Some(decode(&word)) };
				}
				Ok(buf) => scan(buf, &mut word),
				Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
				Err(e) => {
					log::debug!("stream read failed, stopping ({} pending bytes dropped): {}", word.len(), e);
					self.done = true;
					return None;
				}
			};

			self.reader.consume(consumed);
			if complete {
				return Some(decode(&word));
			}
		}
	}
}

/// Appends bytes of `buf` to `word` until a whitespace character closes it.
///
/// The separator itself is removed from `word`. Returns the number of bytes
/// consumed and whether the word is complete.
fn scan(buf: &[u8], word: &mut Vec<u8>) -> (usize, bool) {
	for (i, byte) in buf.iter().enumerate() {
		word.push(*byte);
		if let Some(len) = trailing_whitespace(word) {
			word.truncate(word.len() - len);
			if !word.is_empty() {
				return (i + 1, true);
			}
		}
	}
	(buf.len(), false)
}

/// Byte length of the whitespace character ending `bytes`, if the last
/// UTF-8 sequence is complete and is whitespace.
fn trailing_whitespace(bytes: &[u8]) -> Option<usize> {
	// A UTF-8 sequence is at most 4 bytes; look for its lead byte.
	let from = bytes.len().saturating_sub(4);
	let start = from + bytes[from..].iter().rposition(|b| b & 0xC0 != 0x80)?;
	let tail = &bytes[start..];

	let mut chars = std::str::from_utf8(tail).ok()?.chars();
	match (chars.next(), chars.next()) {
		(Some(c), None) if c.is_whitespace() => Some(tail.len()),
		_ => None,
	}
}

fn decode(bytes: &[u8]) -> String {
	String::from_utf8_lossy(bytes).into_owned()
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/input.txt` + `"bin"` → `data/input.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}
