//! Body-text baseline estimation.

use crate::model::LineFeature;

use super::config::ClassifierConfig;
use super::stats::{mode, round1};

/// The document's dominant body style, the anchor for "larger" and "bolder".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    /// Body font size in points
    pub font_size: f32,
    /// Body fill color (0xRRGGBB)
    pub font_color: u32,
}

impl Baseline {
    /// Create a baseline.
    pub fn new(font_size: f32, font_color: u32) -> Self {
        Self {
            font_size,
            font_color,
        }
    }

    /// Estimate the baseline from a document's lines.
    ///
    /// Only lines with several words and a plausible body size vote, which
    /// keeps headings and title-sized outliers out. Falls back to all lines
    /// and then to the configured default size.
    pub fn estimate(lines: &[LineFeature], config: &ClassifierConfig) -> Self {
        let body: Vec<&LineFeature> = lines
            .iter()
            .filter(|l| {
                l.word_count > config.body_min_words
                    && l.font_size >= config.body_min_size
                    && l.font_size <= config.body_max_size
            })
            .collect();

        let font_size = mode(body.iter().map(|l| round1(l.font_size)))
            .or_else(|| mode(lines.iter().map(|l| round1(l.font_size))))
            .unwrap_or(config.default_body_size);

        let voters: Vec<&LineFeature> = if body.is_empty() {
            lines.iter().collect()
        } else {
            body
        };
        let regular: Vec<&&LineFeature> = voters.iter().filter(|l| !l.is_bold).collect();
        let font_color = if regular.is_empty() {
            mode(voters.iter().map(|l| l.font_color))
        } else {
            mode(regular.iter().map(|l| l.font_color))
        }
        .unwrap_or(0);

        log::debug!(
            "Body baseline: size {:.1}pt, color #{:06x}",
            font_size,
            font_color
        );

        Self::new(font_size, font_color)
    }

    /// Whether a color differs from the body color.
    pub fn is_distinct_color(&self, color: u32) -> bool {
        color != self.font_color
    }
}

impl Default for Baseline {
    fn default() -> Self {
        Self::new(ClassifierConfig::default().default_body_size, 0)
    }
}
