use serde::{Deserialize, Serialize};

/// How generated text is cut back to a sentence boundary.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrimMode {
	/// Cut after the last `.`; text without any `.` becomes empty.
	#[default]
	Strict,
	/// Cut after the last `.`; text without any `.` is kept as is.
	BestEffort,
}

/// Returns `text` up to and including its last full stop.
///
/// Returns an empty string when `text` contains no `.` at all: unterminated
/// output is discarded rather than returned.
pub fn trim_to_sentence(text: &str) -> String {
	match text.rfind('.') {
		Some(i) => text[..=i].to_owned(),
		None => String::new(),
	}
}

/// Applies `mode` to `text`.
pub fn trim(text: &str, mode: TrimMode) -> String {
	match mode {
		TrimMode::Strict => trim_to_sentence(text),
		TrimMode::BestEffort if text.contains('.') => trim_to_sentence(text),
		TrimMode::BestEffort => text.to_owned(),
	}
}
