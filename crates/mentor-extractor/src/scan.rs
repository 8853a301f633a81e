//! Character scanning that skips JSON string literals.
//!
//! Code reviews quote code, and code is full of braces. Counting those would
//! make a perfectly valid reply look truncated.

/// Iterate `(byte_index, char)` for every character outside a JSON string
/// literal. Quote characters themselves are not yielded.
pub(crate) fn structural_chars(text: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut in_string = false;
    let mut escaped = false;

    text.char_indices().filter(move |&(_, c)| {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            false
        } else if c == '"' {
            in_string = true;
            false
        } else {
            true
        }
    })
}

/// Whether `{` and `}` outside strings occur equally often.
pub(crate) fn braces_balanced(text: &str) -> bool {
    let (open, close) = structural_chars(text).fold((0usize, 0usize), |(o, c), (_, ch)| match ch {
        '{' => (o + 1, c),
        '}' => (o, c + 1),
        _ => (o, c),
    });
    open == close
}

/// Byte index of the `]` that closes an array whose opening `[` has already
/// been consumed, if the text contains it.
pub(crate) fn closing_bracket(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in structural_chars(text) {
        match c {
            '[' => depth += 1,
            ']' if depth == 0 => return Some(idx),
            ']' => depth -= 1,
            _ => {}
        }
    }
    None
}
