//! Text and font-name patterns shared by the analysis stages.

use once_cell::sync::Lazy;
use regex::Regex;

/// Font-name fragments that indicate a heavy weight.
const BOLD_MARKERS: &[&str] = &["bold", "black", "heavy", "demi", "semibold", "extrabold"];

/// Font-name fragments that indicate a slanted style.
const ITALIC_MARKERS: &[&str] = &["italic", "oblique"];

/// Glyphs treated as list bullets.
pub const BULLET_GLYPHS: &[char] = &[
    '•', '●', '○', '◦', '▪', '■', '□', '►', '➢', '*', '-', '–', '—',
];

/// Numbering or bullet at the start of a line: `1.`, `1.1.2`, `(3)`, `[4]`,
/// `A.`, `b)`, full-width `１．２`, or a bullet glyph.
static NUMBERING_OR_BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^\s*(?:",
        r"(?:\d+\.)+\d*",
        r"|\(\d+\)|\[\d+\]",
        r"|[A-Za-z][.)](?:\s|$)",
        r"|[０-９]+(?:．[０-９]+)*",
        r"|[•●○◦▪■□►➢*\-–—]",
        r")"
    ))
    .unwrap()
});

/// Page, figure and table references such as "Page 3", "fig. 2", "Table 1".
static LAYOUT_ARTIFACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:page|p\.|pg\.|fig\.?|figure|table|tab\.)\s*\d+").unwrap()
});

/// A bare number token: "12", "3.", "4)", "(5)", "iv".
static NUMBER_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:\(?\d+(?:[.,]\d+)*[.)]?",
        r"|m{0,3}(?:cm|cd|d?c{0,3})(?:xc|xl|l?x{0,3})(?:ix|iv|v?i{0,3})\.?)$"
    ))
    .unwrap()
});

/// Whether a font name suggests a bold weight. Case-insensitive.
pub fn is_bold_font(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    BOLD_MARKERS.iter().any(|m| lower.contains(m))
}

/// Whether a font name suggests an italic or oblique style. Case-insensitive.
pub fn is_italic_font(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    ITALIC_MARKERS.iter().any(|m| lower.contains(m))
}

/// Whether text opens with a numbering scheme or bullet glyph.
pub fn starts_with_numbering_or_bullet(text: &str) -> bool {
    NUMBERING_OR_BULLET.is_match(text)
}

/// Whether text opens with a page, figure or table reference.
pub fn is_layout_artifact(text: &str) -> bool {
    LAYOUT_ARTIFACT.is_match(text)
}

/// Whether a whitespace-free token is a lone bullet glyph.
pub fn is_bullet_token(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if BULLET_GLYPHS.contains(&c))
}

/// Whether a whitespace-free token is a bare number.
pub fn is_number_token(token: &str) -> bool {
    token.chars().any(|c| c.is_alphanumeric()) && NUMBER_TOKEN.is_match(token)
}

/// Whether every cased character is uppercase and at least one exists.
pub fn is_all_caps(text: &str) -> bool {
    let mut cased = text.chars().filter(|c| c.is_uppercase() || c.is_lowercase());
    let mut any = false;
    let all_upper = cased.all(|c| {
        any = true;
        c.is_uppercase()
    });
    any && all_upper
}
