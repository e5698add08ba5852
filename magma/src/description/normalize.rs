//! Length and sentence-boundary normalisation for generated text.
//!
//! Rules, applied to the trimmed input in order:
//!
//! 1. Shorter than [`MIN_DESCRIPTION_CHARS`]: append [`FILLER_SENTENCE`].
//! 2. Longer than [`MAX_DESCRIPTION_CHARS`]: cut after the last sentence
//!    terminator within the limit. With no terminator there, nothing is kept.
//! 3. Not ending on a terminator: cut back to the last terminator, if any.
//!
//! Rule 1 is checked again at the end so a cut never leaves a short text.
//! Lengths count Unicode scalar values, not bytes.
//!
//! The output is a fixed point: normalising it again changes nothing.

/// Texts shorter than this are padded.
pub const MIN_DESCRIPTION_CHARS: usize = 100;

/// Texts are never longer than this.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Appended to descriptions that are too short to stand alone.
pub const FILLER_SENTENCE: &str = "Additional geological analysis is needed for a complete understanding of this location's features and history.";

/// A normalised description ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionResult {
    pub text: String,
    /// True when content from the service was cut off.
    pub truncated: bool,
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn ends_with_terminator(text: &str) -> bool {
    text.chars().next_back().is_some_and(is_terminator)
}

/// Prefix of `text` up to and including its last terminator.
fn through_last_terminator(text: &str) -> Option<&str> {
    text.char_indices()
        .rev()
        .find(|&(_, c)| is_terminator(c))
        .map(|(idx, c)| &text[..idx + c.len_utf8()])
}

fn pad_short(text: String) -> String {
    if text.chars().count() >= MIN_DESCRIPTION_CHARS {
        text
    } else if text.is_empty() {
        FILLER_SENTENCE.to_string()
    } else {
        format!("{} {}", text, FILLER_SENTENCE)
    }
}

/// Normalises raw generated text.
///
/// # Example
///
/// ```
/// use magma::description::{normalize, FILLER_SENTENCE};
///
/// let result = normalize("Sandstone.");
/// assert_eq!(result.text, format!("Sandstone. {}", FILLER_SENTENCE));
/// assert_eq!(normalize(&result.text).text, result.text);
/// ```
pub fn normalize(raw: &str) -> DescriptionResult {
    let mut truncated = false;
    let mut text = pad_short(raw.trim().to_string());

    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        let head_end = text
            .char_indices()
            .nth(MAX_DESCRIPTION_CHARS)
            .map_or(text.len(), |(idx, _)| idx);
        text = through_last_terminator(&text[..head_end])
            .unwrap_or_default()
            .to_string();
        truncated = true;
    }

    if !ends_with_terminator(&text) {
        if let Some(cut) = through_last_terminator(&text) {
            text = cut.to_string();
            truncated = true;
        }
    }

    DescriptionResult {
        text: pad_short(text),
        truncated,
    }
}
