//! Line terminators

/// Convert every line break in `text` to CRLF when the reference contains a
/// CRLF anywhere, otherwise to LF
pub fn normalize_line_endings(text: &str, reference: &str) -> String {
    let unix = text.replace("\r\n", "\n");
    if reference.contains("\r\n") {
        unix.replace('\n', "\r\n")
    } else {
        unix
    }
}
