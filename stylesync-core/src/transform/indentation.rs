//! Indentation unit

use super::{is_blank, split_terminator};

/// One level of indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentUnit {
    /// A single tab
    Tab,
    /// A fixed number of spaces
    Spaces(usize),
}

impl IndentUnit {
    /// Width of one level in columns
    pub fn columns(self, tab_width: usize) -> usize {
        match self {
            IndentUnit::Tab => tab_width,
            IndentUnit::Spaces(n) => n,
        }
    }

    /// Leading whitespace for `depth` levels
    pub fn render(self, depth: usize) -> String {
        match self {
            IndentUnit::Tab => "\t".repeat(depth),
            IndentUnit::Spaces(n) => " ".repeat(n * depth),
        }
    }
}

fn leading(content: &str) -> &str {
    &content[..content.len() - content.trim_start_matches(is_blank).len()]
}

fn indent_columns(indent: &str, tab_width: usize) -> usize {
    indent
        .chars()
        .map(|ch| if ch == '\t' { tab_width } else { 1 })
        .sum()
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Leading whitespace of every indented, non-blank line of `text`
fn indented_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split_inclusive('\n').filter_map(|line| {
        let (content, _) = split_terminator(line);
        let indent = leading(content);
        (!indent.is_empty() && indent.len() < content.len()).then_some(indent)
    })
}

/// Infer the indentation unit of `text`
///
/// A tab-led indented line makes the unit a tab; otherwise the unit is the
/// GCD of the indentation widths. `None` when no line is indented.
pub fn detect_unit(text: &str, tab_width: usize) -> Option<IndentUnit> {
    let mut width = 0;
    for indent in indented_lines(text) {
        if indent.starts_with('\t') {
            return Some(IndentUnit::Tab);
        }
        width = gcd(width, indent_columns(indent, tab_width));
    }
    (width > 0).then_some(IndentUnit::Spaces(width))
}

/// Re-indent `text` with the reference's indentation unit
///
/// Depth is read from `original`, the text as it was before any earlier
/// rewrite trimmed it, when it has the same number of lines as `text`;
/// otherwise from `text` itself. Depth is measured in the source's own unit
/// and rounded to the nearest level. Blank lines are left alone, as is
/// everything when the reference or the source has no indentation.
pub fn normalize_indentation(
    text: &str,
    reference: &str,
    original: &str,
    tab_width: usize,
) -> String {
    let tab_width = tab_width.max(1);
    let Some(target) = detect_unit(reference, tab_width) else {
        return text.to_string();
    };

    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let original_lines: Vec<&str> = original.split_inclusive('\n').collect();
    let (source, source_lines) = if original_lines.len() == lines.len() {
        (original, &original_lines)
    } else {
        (text, &lines)
    };
    let Some(unit) = detect_unit(source, tab_width) else {
        return text.to_string();
    };
    let unit_columns = unit.columns(tab_width);

    lines
        .iter()
        .zip(source_lines)
        .map(|(line, source_line)| {
            let (content, terminator) = split_terminator(line);
            let rest = content.trim_start_matches(is_blank);
            if rest.is_empty() {
                return line.to_string();
            }
            let (source_content, _) = split_terminator(source_line);
            let columns = indent_columns(leading(source_content), tab_width);
            let depth = (columns + unit_columns / 2) / unit_columns;
            format!("{}{rest}{terminator}", target.render(depth))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_spaces() {
        assert_eq!(
            detect_unit("a\n    b\n        c\n", 4),
            Some(IndentUnit::Spaces(4))
        );
        assert_eq!(
            detect_unit("a\n  b\n    c\n      d\n", 4),
            Some(IndentUnit::Spaces(2))
        );
    }

    #[test]
    fn test_detect_tab() {
        assert_eq!(detect_unit("a\n\tb\n", 4), Some(IndentUnit::Tab));
    }

    #[test]
    fn test_detect_none() {
        assert_eq!(detect_unit("a\nb\n", 4), None);
        assert_eq!(detect_unit("a\n    \nb\n", 4), None);
    }

    #[test]
    fn test_two_spaces_to_four() {
        let reference = "fn a() {\n    b();\n}\n";
        let text = "if x {\n  y();\n    z();\n}\n";
        assert_eq!(
            normalize_indentation(text, reference, text, 4),
            "if x {\n    y();\n        z();\n}\n"
        );
    }

    #[test]
    fn test_spaces_to_tabs() {
        let reference = "a\n\tb\n";
        let text = "    c\n        d\n";
        assert_eq!(normalize_indentation(text, reference, text, 4), "\tc\n\t\td\n");
    }

    #[test]
    fn test_tabs_to_spaces() {
        let reference = "a\n  b\n";
        let text = "\tc\r\n\t\td\r\n";
        assert_eq!(
            normalize_indentation(text, reference, text, 4),
            "  c\r\n    d\r\n"
        );
    }

    #[test]
    fn test_reference_without_indent_leaves_text() {
        let text = "  a\n";
        assert_eq!(normalize_indentation(text, "b\n", text, 4), text);
        assert_eq!(normalize_indentation(text, "", text, 4), text);
    }

    #[test]
    fn test_blank_lines_untouched() {
        let reference = "a\n    b\n";
        let text = "  c\n   \n";
        assert_eq!(normalize_indentation(text, reference, text, 4), "    c\n   \n");
    }

    #[test]
    fn test_depth_from_original_after_trim() {
        let reference = "a\n\tb\n";
        let original = "x\n    y\n        z\n";
        let trimmed = "x\ny\nz\n";
        assert_eq!(
            normalize_indentation(trimmed, reference, original, 4),
            "x\n\ty\n\t\tz\n"
        );
    }

    #[test]
    fn test_line_count_mismatch_uses_text() {
        let reference = "a\n    b\n";
        let original = "x\n";
        let text = "x\n  y\n";
        assert_eq!(
            normalize_indentation(text, reference, original, 4),
            "x\n    y\n"
        );
    }

    #[test]
    fn test_render() {
        assert_eq!(IndentUnit::Tab.render(2), "\t\t");
        assert_eq!(IndentUnit::Spaces(2).render(3), "      ");
        assert_eq!(IndentUnit::Spaces(4).render(0), "");
    }
}
