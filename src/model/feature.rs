//! Per-line feature records, the unit the heading engine operates on.

use serde::{Deserialize, Serialize};

use super::BBox;

/// Normalized typographic and geometric measurements of one visual line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineFeature {
    /// Concatenated span text, trimmed
    pub text: String,
    /// 1-based page number
    pub page: u32,
    /// Line bounding box
    pub bbox: BBox,
    /// Width of the page the line sits on
    pub page_width: f32,
    /// Height of the page the line sits on
    pub page_height: f32,
    /// Most frequent span size, rounded to one decimal
    pub font_size: f32,
    /// Font name of the first span
    pub font_name: String,
    /// Fill color of the first span (0xRRGGBB)
    pub font_color: u32,
    /// Any span uses a bold-weight font
    pub is_bold: bool,
    /// Any span uses an italic or oblique font
    pub is_italic: bool,
    /// Every cased character is uppercase
    pub is_all_caps: bool,
    /// Text opens with a numbering scheme or bullet glyph
    pub starts_with_pattern: bool,
    /// Length in characters
    pub text_length: usize,
    /// Whitespace-separated word count
    pub word_count: usize,
    /// Horizontal midpoint lies near the page midpoint
    pub is_centered: bool,
    /// Gap from the previous retained line's bottom edge on the same page
    pub space_above: f32,
}

impl LineFeature {
    /// Left edge, used for indentation comparison.
    pub fn x0(&self) -> f32 {
        self.bbox.x0
    }

    /// Top edge, used for reading order.
    pub fn y0(&self) -> f32 {
        self.bbox.y0
    }

    /// Lower-cased, trimmed text used to match running furniture.
    pub fn normalized_text(&self) -> String {
        self.text.trim().to_lowercase()
    }
}
