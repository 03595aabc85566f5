//! Line feature extraction.
//!
//! Turns raw page records into one [`LineFeature`] per non-empty visual
//! line, in reading order: blocks by (top, left), lines within a block by
//! top edge. `space_above` is carried through each page as a fold over the
//! previous retained line's bottom edge and resets at every page.

use std::cmp::Ordering;

use crate::model::{BBox, LineFeature, PageRecord, RawLine};

use super::config::ClassifierConfig;
use super::patterns;
use super::stats::{mode, round1};

/// Extract line features for every page, in reading order.
pub fn extract_features(pages: &[PageRecord], config: &ClassifierConfig) -> Vec<LineFeature> {
    pages
        .iter()
        .flat_map(|page| extract_page_features(page, config))
        .collect()
}

/// Extract line features for a single page.
pub fn extract_page_features(page: &PageRecord, config: &ClassifierConfig) -> Vec<LineFeature> {
    let mut blocks: Vec<_> = page.blocks.iter().filter(|b| b.is_text()).collect();
    blocks.sort_by(|a, b| cmp_top_left(&a.bbox, &b.bbox));

    let ordered_lines = blocks.into_iter().flat_map(|block| {
        let mut lines: Vec<&RawLine> = block.lines.iter().collect();
        lines.sort_by(|a, b| cmp_f32(a.bbox.y0, b.bbox.y0));
        lines
    });

    let (features, _) = ordered_lines.fold(
        (Vec::new(), None::<f32>),
        |(mut features, prev_bottom), line| match line_feature(line, page, prev_bottom, config) {
            Some(feature) => {
                let bottom = feature.bbox.y1;
                features.push(feature);
                (features, Some(bottom))
            }
            None => (features, prev_bottom),
        },
    );

    features
}

/// Build the feature record for one line, or `None` if it has no text.
fn line_feature(
    line: &RawLine,
    page: &PageRecord,
    prev_bottom: Option<f32>,
    config: &ClassifierConfig,
) -> Option<LineFeature> {
    let first = line.spans.first()?;

    let text: String = line.spans.iter().map(|s| s.text.as_str()).collect();
    let text = text.trim().to_string();
    if text.is_empty() {
        return None;
    }

    let font_size = mode(line.spans.iter().map(|s| round1(s.size))).unwrap_or(0.0);
    let space_above = prev_bottom.map_or(0.0, |bottom| line.bbox.y0 - bottom);

    Some(LineFeature {
        page: page.number,
        bbox: line.bbox,
        page_width: page.width,
        page_height: page.height,
        font_size,
        font_name: first.font.clone(),
        font_color: first.color,
        is_bold: line.spans.iter().any(|s| patterns::is_bold_font(&s.font)),
        is_italic: line.spans.iter().any(|s| patterns::is_italic_font(&s.font)),
        is_all_caps: patterns::is_all_caps(&text),
        starts_with_pattern: patterns::starts_with_numbering_or_bullet(&text),
        text_length: text.chars().count(),
        word_count: text.split_whitespace().count(),
        is_centered: is_centered(&line.bbox, page.width, config.center_tolerance_ratio),
        space_above,
        text,
    })
}

/// Whether a box's horizontal midpoint lies within `tolerance_ratio * page_width`
/// of the page midpoint.
pub fn is_centered(bbox: &BBox, page_width: f32, tolerance_ratio: f32) -> bool {
    (bbox.center_x() - page_width / 2.0).abs() < page_width * tolerance_ratio
}

fn cmp_top_left(a: &BBox, b: &BBox) -> Ordering {
    cmp_f32(a.y0, b.y0).then_with(|| cmp_f32(a.x0, b.x0))
}

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
