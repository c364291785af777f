//! Whitespace collapsing

use super::{is_blank, split_terminator};

/// Trim each line and collapse internal runs of spaces and tabs to one space
///
/// Line terminators are preserved. The reference plays no part here.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        let (content, terminator) = split_terminator(line);
        let mut first = true;
        for word in content.split(is_blank).filter(|w| !w.is_empty()) {
            if !first {
                out.push(' ');
            }
            out.push_str(word);
            first = false;
        }
        out.push_str(terminator);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_collapse() {
        assert_eq!(normalize_whitespace("  x   =\t\t1;  "), "x = 1;");
    }

    #[test]
    fn test_per_line_with_terminators() {
        assert_eq!(
            normalize_whitespace("    a  b\r\n\tc \n"),
            "a b\r\nc\n"
        );
    }

    #[test]
    fn test_blank_lines_become_empty() {
        assert_eq!(normalize_whitespace("a\n   \nb"), "a\n\nb");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize_whitespace(""), "");
    }
}
