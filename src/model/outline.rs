//! Inferred document outline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used by call sites that prefer a placeholder over an empty title.
pub const UNTITLED: &str = "Untitled Document";

/// Heading level. Hierarchy depth is capped at three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading (and anything deeper)
    H3,
}

impl HeadingLevel {
    /// Map a zero-based depth to a level, capping at H3.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Zero-based depth of this level.
    pub fn depth(&self) -> usize {
        match self {
            HeadingLevel::H1 => 0,
            HeadingLevel::H2 => 1,
            HeadingLevel::H3 => 2,
        }
    }

    /// Parse labels such as "H2" or "h4"; levels past H3 collapse to H3.
    pub fn parse(label: &str) -> Option<Self> {
        let digits = label.trim().strip_prefix(['H', 'h'])?;
        let n: usize = digits.parse().ok()?;
        (n >= 1).then(|| Self::from_depth(n - 1))
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadingLevel::H1 => write!(f, "H1"),
            HeadingLevel::H2 => write!(f, "H2"),
            HeadingLevel::H3 => write!(f, "H3"),
        }
    }
}

/// One outline entry. Carries no geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Cleaned heading text
    pub text: String,
    /// 1-based page number
    pub page: u32,
}

impl OutlineEntry {
    /// Create an outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title plus ordered outline, serialized as
/// `{"title": ..., "outline": [{"level", "text", "page"}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title (may be empty)
    pub title: String,
    /// Headings in reading order
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Create an outline.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Outline with the placeholder title and no entries.
    pub fn untitled() -> Self {
        Self::new(UNTITLED, Vec::new())
    }

    /// Whether no headings were found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Whether the title is empty or a placeholder.
    pub fn has_placeholder_title(&self) -> bool {
        let title = self.title.trim().to_lowercase();
        title.is_empty() || title == "untitled" || title == UNTITLED.to_lowercase()
    }

    /// Replace an empty or placeholder title.
    ///
    /// Uses the first heading's text when there is one, otherwise a title
    /// derived from `file_stem` ("annual_report-2024" -> "Annual Report 2024").
    pub fn backfill_title(&mut self, file_stem: &str) {
        if !self.has_placeholder_title() {
            return;
        }
        self.title = match self.outline.first() {
            Some(first) => first.text.clone(),
            None => title_from_stem(file_stem),
        };
    }
}

fn title_from_stem(stem: &str) -> String {
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
