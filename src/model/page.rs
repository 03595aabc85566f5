//! Raw page records as produced by a PDF text extractor.
//!
//! The layout mirrors the block/line/span dictionaries common to PDF text
//! extraction libraries, so a JSON dump of such output deserializes
//! directly. Every field defaults when absent.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in top-left page coordinates (y grows down).
///
/// Serialized as `[x0, y0, x1, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its edges.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Horizontal midpoint.
    pub fn center_x(&self) -> f32 {
        (self.x0 + self.x1) / 2.0
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

impl From<[f32; 4]> for BBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f32; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// Kind of a layout block.
///
/// Serialized as the integer block type used by extractors: `0` for text,
/// anything else for non-text (images, vector drawings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum BlockKind {
    /// Text block
    #[default]
    Text,
    /// Image or other non-text block
    Other(u8),
}

impl From<u8> for BlockKind {
    fn from(v: u8) -> Self {
        match v {
            0 => BlockKind::Text,
            other => BlockKind::Other(other),
        }
    }
}

impl From<BlockKind> for u8 {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Text => 0,
            BlockKind::Other(v) => v,
        }
    }
}

/// A run of text sharing one font, size and color.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSpan {
    /// Text content
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font: String,
    /// Fill color as packed sRGB (0xRRGGBB)
    pub color: u32,
}

impl RawSpan {
    /// Create a span with black text.
    pub fn new(text: impl Into<String>, size: f32, font: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size,
            font: font.into(),
            color: 0,
        }
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }
}

/// A visual line: spans sharing one baseline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLine {
    /// Line bounding box
    pub bbox: BBox,
    /// Spans in left-to-right order
    pub spans: Vec<RawSpan>,
}

impl RawLine {
    /// Create a line from its bounding box and spans.
    pub fn new(bbox: BBox, spans: Vec<RawSpan>) -> Self {
        Self { bbox, spans }
    }
}

/// A layout block grouping consecutive lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBlock {
    /// Block bounding box
    pub bbox: BBox,
    /// Block type (0 = text)
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Lines of a text block
    pub lines: Vec<RawLine>,
}

impl RawBlock {
    /// Create a text block. The bounding box is the union of the lines.
    pub fn text(lines: Vec<RawLine>) -> Self {
        let bbox = lines
            .iter()
            .map(|l| l.bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self {
            bbox,
            kind: BlockKind::Text,
            lines,
        }
    }

    /// Whether this block carries text.
    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }
}

/// One page of extractor output. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRecord {
    /// 1-based page number; 0 when a dump leaves it out
    #[serde(default, alias = "page_number")]
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Layout blocks
    pub blocks: Vec<RawBlock>,
}

impl PageRecord {
    /// Create an empty page.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create a US Letter page (612 x 792 points).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Append a block.
    pub fn add_block(&mut self, block: RawBlock) {
        self.blocks.push(block);
    }
}

impl Default for PageRecord {
    fn default() -> Self {
        Self::letter(1)
    }
}
