//! Visual style clustering and heading-level assignment.
//!
//! Candidates are grouped into styles of (size, weight, indentation bucket,
//! color). Styles are ranked by prominence and walked once; each step that
//! looks visually subordinate to the previous style opens the next level.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{HeadingLevel, LineFeature};

use super::config::ClassifierConfig;

/// Left-edge positions grouped by sequential gap clustering.
///
/// Values are processed once in ascending order; a new bucket starts when a
/// value lies more than `gap` beyond the current bucket's first value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndentBuckets {
    anchors: Vec<f32>,
}

impl IndentBuckets {
    /// Cluster x positions.
    pub fn cluster<I>(xs: I, gap: f32) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let mut sorted: Vec<f32> = xs.into_iter().filter(|x| x.is_finite()).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let anchors = sorted.into_iter().fold(Vec::<f32>::new(), |mut anchors, x| {
            match anchors.last() {
                Some(&anchor) if x <= anchor + gap => {}
                _ => anchors.push(x),
            }
            anchors
        });

        Self { anchors }
    }

    /// Bucket anchors, ascending.
    pub fn anchors(&self) -> &[f32] {
        &self.anchors
    }

    /// Index of the anchor nearest to `x`. Zero when there are no buckets.
    pub fn bucket_of(&self, x: f32) -> usize {
        self.anchors
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (x - **a)
                    .abs()
                    .partial_cmp(&(x - **b).abs())
                    .unwrap_or(Ordering::Equal)
            })
            .map_or(0, |(i, _)| i)
    }

    /// Anchor x of a bucket.
    pub fn anchor(&self, bucket: usize) -> f32 {
        self.anchors.get(bucket).copied().unwrap_or(0.0)
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether no positions were clustered.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// Visual style of a heading candidate.
///
/// The size is kept in tenths of a point so keys hash and compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleKey {
    /// Font size in tenths of a point
    pub size_tenths: i32,
    /// Bold weight
    pub bold: bool,
    /// Indentation bucket index, ascending with x
    pub bucket: usize,
    /// Anchor x of the bucket, whole units
    pub indent: i32,
    /// Fill color (0xRRGGBB)
    pub color: u32,
}

impl StyleKey {
    /// Style of a line given the candidates' indentation buckets.
    pub fn of(line: &LineFeature, buckets: &IndentBuckets) -> Self {
        let bucket = buckets.bucket_of(line.x0());
        Self {
            size_tenths: (line.font_size * 10.0).round() as i32,
            bold: line.is_bold,
            bucket,
            indent: buckets.anchor(bucket).round() as i32,
            color: line.font_color,
        }
    }

    /// Font size in points.
    pub fn size(&self) -> f32 {
        self.size_tenths as f32 / 10.0
    }

    /// Prominence order: larger, then bold, then left-most, then higher color value.
    pub fn prominence(&self, other: &Self) -> Ordering {
        other
            .size_tenths
            .cmp(&self.size_tenths)
            .then_with(|| other.bold.cmp(&self.bold))
            .then_with(|| self.bucket.cmp(&other.bucket))
            .then_with(|| other.color.cmp(&self.color))
    }

    /// Whether this style sits one level below `prev` when it directly
    /// follows it in prominence order.
    fn opens_level_after(&self, prev: &Self, config: &ClassifierConfig) -> bool {
        if self.size() < prev.size() * config.level_size_ratio {
            return true;
        }
        if self.size_tenths != prev.size_tenths {
            return false;
        }
        if prev.bold && !self.bold {
            return true;
        }
        if self.bold != prev.bold {
            return false;
        }
        if (self.indent - prev.indent) as f32 > config.level_indent_step {
            return true;
        }
        self.bucket == prev.bucket && self.color != prev.color
    }
}

/// Distinct styles sorted by prominence.
pub fn rank_styles<I>(styles: I) -> Vec<StyleKey>
where
    I: IntoIterator<Item = StyleKey>,
{
    let mut ranked: Vec<StyleKey> = Vec::new();
    for style in styles {
        if !ranked.contains(&style) {
            ranked.push(style);
        }
    }
    ranked.sort_by(StyleKey::prominence);
    ranked
}

/// Map each distinct style to a heading level, capped at H3.
///
/// The map is monotonic along prominence order: a more prominent style never
/// gets a deeper level than a less prominent one.
pub fn assign_levels(
    styles: &[StyleKey],
    config: &ClassifierConfig,
) -> HashMap<StyleKey, HeadingLevel> {
    let ranked = rank_styles(styles.iter().copied());

    let (levels, _) = ranked.iter().fold(
        (HashMap::new(), None::<(StyleKey, usize)>),
        |(mut levels, prev), style| {
            let depth = match prev {
                Some((prev_style, depth)) if style.opens_level_after(&prev_style, config) => {
                    depth + 1
                }
                Some((_, depth)) => depth,
                None => 0,
            };
            levels.insert(*style, HeadingLevel::from_depth(depth));
            (levels, Some((*style, depth)))
        },
    );

    levels
}

/// Map the three most prominent styles to H1, H2 and H3 in order.
/// Less prominent styles are left unmapped.
pub fn top_levels(styles: &[StyleKey]) -> HashMap<StyleKey, HeadingLevel> {
    rank_styles(styles.iter().copied())
        .into_iter()
        .take(3)
        .enumerate()
        .map(|(depth, style)| (style, HeadingLevel::from_depth(depth)))
        .collect()
}
