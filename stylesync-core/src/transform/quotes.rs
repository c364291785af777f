//! Quote style

/// The reference's dominant quote character; ties (including none) favour `"`
pub fn dominant_quote(reference: &str) -> char {
    let (double, single) = reference.chars().fold((0usize, 0usize), |(d, s), ch| match ch {
        '"' => (d + 1, s),
        '\'' => (d, s + 1),
        _ => (d, s),
    });

    if single > double {
        '\''
    } else {
        '"'
    }
}

/// Replace every `"` and `'` in `text` with the reference's dominant quote
pub fn normalize_quotes(text: &str, reference: &str) -> String {
    let quote = dominant_quote(reference);
    text.chars()
        .map(|ch| if ch == '"' || ch == '\'' { quote } else { ch })
        .collect()
}
