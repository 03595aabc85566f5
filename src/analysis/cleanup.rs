//! Text cleanup applied to titles and headings before emission.

use unicode_normalization::UnicodeNormalization;

/// Typographic ligatures that extractors commonly leave in place.
const LIGATURES: &[(char, &str)] = &[
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
];

/// Clean heading text for output.
///
/// NFC-normalizes, expands ligatures, drops private-use and replacement
/// characters, and collapses every whitespace run (newlines included) to a
/// single space.
pub fn clean_heading_text(text: &str) -> String {
    let normalized: String = text.nfc().collect();

    let mut expanded = String::with_capacity(normalized.len());
    for c in normalized.chars() {
        match LIGATURES.iter().find(|(lig, _)| *lig == c) {
            Some((_, replacement)) => expanded.push_str(replacement),
            None if is_private_use(c) || c == '\u{FFFD}' => {}
            None => expanded.push(c),
        }
    }

    expanded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_private_use(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}
