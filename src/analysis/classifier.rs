//! Heading classification.
//!
//! [`Classifier`] is the capability shared by every strategy that turns
//! line features into a title and outline. [`HeuristicClassifier`] is the
//! rule-based strategy:
//!
//! 1. pick the title from page 1
//! 2. select heading candidates by strong visual signals
//! 3. cluster candidates into styles
//! 4. rank styles and assign levels
//! 5. emit entries in reading order

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::model::{DocumentOutline, HeadingLevel, LineFeature, OutlineEntry};

use super::baseline::Baseline;
use super::cleanup::clean_heading_text;
use super::config::ClassifierConfig;
use super::furniture::detect_furniture;
use super::noise::NoiseFilter;
use super::styles::{assign_levels, top_levels, IndentBuckets, StyleKey};
use super::title::select_title;

/// A strategy that infers a document's title and heading outline.
pub trait Classifier {
    /// Classify the lines of one document.
    fn classify(&self, lines: &[LineFeature], page_count: usize) -> DocumentOutline;

    /// Short strategy name for logs.
    fn name(&self) -> &str;
}

/// Rule-based classifier driven by font size, weight, color, position and
/// spacing relative to the body baseline.
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier {
    config: ClassifierConfig,
}

impl HeuristicClassifier {
    /// Create a classifier with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom thresholds.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify with a precomputed furniture set and baseline.
    pub fn classify_with(
        &self,
        lines: &[LineFeature],
        furniture: &HashSet<String>,
        baseline: &Baseline,
    ) -> DocumentOutline {
        let config = &self.config;
        let noise = NoiseFilter::new(config);

        let title_line = select_title(lines, furniture, &noise, baseline, config);
        let title = title_line
            .map(|l| clean_heading_text(&l.text))
            .unwrap_or_default();

        let eligible: Vec<&LineFeature> = lines
            .iter()
            .filter(|l| !title_line.is_some_and(|t| std::ptr::eq(*l, t)))
            .filter(|l| title.is_empty() || clean_heading_text(&l.text) != title)
            .filter(|l| !furniture.contains(&l.normalized_text()))
            .filter(|l| !noise.is_noise(&l.text))
            .collect();

        let candidates: Vec<&LineFeature> = eligible
            .iter()
            .copied()
            .filter(|l| self.is_candidate(l, baseline))
            .filter(|l| !self.is_emphasized_body(l, baseline))
            .collect();

        let (headings, buckets, levels) = if candidates.is_empty() {
            let fallback: Vec<&LineFeature> = eligible
                .iter()
                .copied()
                .filter(|l| differs_from_body(l, baseline))
                .collect();
            let (buckets, styles) = self.styles_of(&fallback);
            log::debug!(
                "No heading candidates; falling back to {} prominent styles",
                styles.len().min(3)
            );
            let levels = top_levels(&styles);
            (fallback, buckets, levels)
        } else {
            let (buckets, styles) = self.styles_of(&candidates);
            let levels = assign_levels(&styles, config);
            (candidates, buckets, levels)
        };

        let outline = emit(&headings, &buckets, &levels, &noise, &title);

        log::debug!(
            "Classified {} lines: title {:?}, {} headings",
            lines.len(),
            title,
            outline.len()
        );

        DocumentOutline::new(title, outline)
    }

    /// Whether a line shows at least one strong heading signal.
    fn is_candidate(&self, line: &LineFeature, baseline: &Baseline) -> bool {
        let config = &self.config;
        let body = baseline.font_size;

        line.font_size >= body * config.candidate_size_ratio
            || (line.is_bold && baseline.is_distinct_color(line.font_color))
            || (line.is_bold && line.font_size >= body * config.candidate_bold_size_ratio)
            || line.space_above >= body * config.candidate_space_ratio
            || (line.starts_with_pattern && line.word_count < config.candidate_pattern_max_words)
    }

    /// Long bold lines in the body color are emphasized prose.
    fn is_emphasized_body(&self, line: &LineFeature, baseline: &Baseline) -> bool {
        line.is_bold
            && line.word_count > self.config.emphasized_body_min_words
            && !baseline.is_distinct_color(line.font_color)
    }

    fn styles_of(&self, lines: &[&LineFeature]) -> (IndentBuckets, Vec<StyleKey>) {
        let buckets =
            IndentBuckets::cluster(lines.iter().map(|l| l.x0()), self.config.indent_cluster_gap);
        let styles = lines.iter().map(|l| StyleKey::of(l, &buckets)).collect();
        (buckets, styles)
    }
}

impl Classifier for HeuristicClassifier {
    fn classify(&self, lines: &[LineFeature], page_count: usize) -> DocumentOutline {
        if lines.is_empty() {
            return DocumentOutline::new("", Vec::new());
        }

        let furniture = detect_furniture(lines, page_count, &self.config);
        let baseline = Baseline::estimate(lines, &self.config);
        self.classify_with(lines, &furniture, &baseline)
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

fn differs_from_body(line: &LineFeature, baseline: &Baseline) -> bool {
    line.font_size > baseline.font_size
        || line.is_bold
        || baseline.is_distinct_color(line.font_color)
}

/// Map lines to levels, drop noise and title repeats, and sort by (page, top).
fn emit(
    lines: &[&LineFeature],
    buckets: &IndentBuckets,
    levels: &HashMap<StyleKey, HeadingLevel>,
    noise: &NoiseFilter,
    title: &str,
) -> Vec<OutlineEntry> {
    let mut placed: Vec<(u32, f32, OutlineEntry)> = lines
        .iter()
        .filter_map(|line| {
            let level = *levels.get(&StyleKey::of(line, buckets))?;
            let text = clean_heading_text(&line.text);
            if text.is_empty() || noise.is_noise(&text) || (!title.is_empty() && text == title) {
                return None;
            }
            Some((line.page, line.y0(), OutlineEntry::new(level, text, line.page)))
        })
        .collect();

    placed.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
    });

    placed.into_iter().map(|(_, _, entry)| entry).collect()
}
