//! Trailing semicolons
//!
//! Lines are paired by position inside the block. Terminators and trailing
//! blanks are kept where they were.

use super::{is_blank, split_terminator};

fn ends_with_semicolon(line: &str) -> bool {
    let (content, _) = split_terminator(line);
    content.trim_end_matches(is_blank).ends_with(';')
}

fn adjust(line: &str, want_semicolon: bool) -> String {
    let (content, terminator) = split_terminator(line);
    let body = content.trim_end_matches(is_blank);
    let trailing = &content[body.len()..];

    if body.is_empty() {
        return line.to_string();
    }

    match (want_semicolon, body.ends_with(';')) {
        (true, false) => format!("{body};{trailing}{terminator}"),
        (false, true) => format!("{}{trailing}{terminator}", body.trim_end_matches(';')),
        _ => line.to_string(),
    }
}

/// Add or strip trailing `;` on each line of `text` to match the paired
/// reference line
///
/// Lines past the end of the reference are left alone.
pub fn normalize_semicolons(text: &str, reference: &str) -> String {
    let reference_lines: Vec<&str> = reference.split_inclusive('\n').collect();

    text.split_inclusive('\n')
        .enumerate()
        .map(|(i, line)| match reference_lines.get(i) {
            Some(paired) => adjust(line, ends_with_semicolon(paired)),
            None => line.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_semicolon() {
        assert_eq!(normalize_semicolons("x = 1", "x = 1;"), "x = 1;");
    }

    #[test]
    fn test_strip_semicolon() {
        assert_eq!(normalize_semicolons("x = 1;", "x = 1"), "x = 1");
        assert_eq!(normalize_semicolons("x = 1;;", "x = 1"), "x = 1");
    }

    #[test]
    fn test_terminator_and_trailing_blanks_are_kept() {
        assert_eq!(normalize_semicolons("x = 1  \r\n", "x = 2;\n"), "x = 1;  \r\n");
        assert_eq!(normalize_semicolons("x = 1; \n", "y\n"), "x = 1 \n");
    }

    #[test]
    fn test_lines_paired_by_position() {
        let reference = "a;\nb\n";
        let text = "a\nb;\nc;\n";
        assert_eq!(normalize_semicolons(text, reference), "a;\nb\nc;\n");
    }

    #[test]
    fn test_blank_lines_untouched() {
        assert_eq!(normalize_semicolons("\n  \n", "a;\nb;\n"), "\n  \n");
    }

    #[test]
    fn test_empty_reference_leaves_text() {
        assert_eq!(normalize_semicolons("x = 1;\n", ""), "x = 1;\n");
    }
}
