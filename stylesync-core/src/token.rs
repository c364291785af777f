//! Format-agnostic tokenizer
//!
//! Text is cut into three kinds of tokens: maximal runs of "word" characters,
//! maximal runs of whitespace, and single structural delimiters. Quote
//! characters are word characters, so `"hi"` and `'hi'` stay distinct.

/// Structural delimiters, each emitted as its own single-character token
pub const DELIMITERS: &[char] = &[
    '{', '}', '[', ']', '(', ')', ',', ';', ':', '+', '-', '*', '/', '%', '=', '<', '>', '!', '&',
    '|', '^', '~', '?',
];

/// Check whether a character is a structural delimiter
#[inline]
pub fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Word,
    Space,
    Delimiter,
}

impl Class {
    fn of(ch: char) -> Self {
        if ch.is_whitespace() {
            Class::Space
        } else if is_delimiter(ch) {
            Class::Delimiter
        } else {
            Class::Word
        }
    }
}

/// Split text into tokens, in document order
///
/// Tokens borrow from `text`; duplicates are kept.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<Class> = None;

    for (pos, ch) in text.char_indices() {
        let class = Class::of(ch);
        match current {
            Some(prev) if prev == class && class != Class::Delimiter => {}
            Some(_) => {
                tokens.push(&text[start..pos]);
                start = pos;
            }
            None => start = pos,
        }
        current = Some(class);
    }

    if current.is_some() {
        tokens.push(&text[start..]);
    }

    tokens
}
