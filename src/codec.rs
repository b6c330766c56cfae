//! Entry text codec.
//!
//! Raw user text is stored in an HTML-ish encoded form: angle brackets are
//! escaped and every line is wrapped in a `<textarea>` segment followed by a
//! `<br>` marker. The encoded form renders directly in the read view and is
//! decoded back to plain text for editing.

const SEGMENT_OPEN: &str = "<textarea>";
const SEGMENT_CLOSE: &str = "</textarea>";
const LINE_BREAK: &str = "<br>";

/// Returns true when `text` has no non-whitespace characters.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Encodes raw multi-line text for storage.
///
/// An empty input still produces one (empty) segment.
pub fn encode(raw: &str) -> String {
    let escaped = raw.replace('<', "&lt;").replace('>', "&gt;");

    escaped
        .split('\n')
        .map(|line| format!("{SEGMENT_OPEN}{line}{SEGMENT_CLOSE}{LINE_BREAK}"))
        .collect()
}

/// Removes the segment markup from encoded text.
///
/// Every `<br>` becomes a newline, so the result keeps the newline that
/// terminates the last line.
pub fn strip_markup(encoded: &str) -> String {
    encoded
        .replace(SEGMENT_OPEN, "")
        .replace(SEGMENT_CLOSE, "")
        .replace(LINE_BREAK, "\n")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

/// Decodes stored text back into the raw text it was encoded from.
pub fn decode(encoded: &str) -> String {
    let mut plain = strip_markup(encoded);
    if plain.ends_with('\n') {
        plain.pop();
    }
    plain
}
