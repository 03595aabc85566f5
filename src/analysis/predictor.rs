//! Model-backed classification strategy.
//!
//! A trained line classifier is plugged in through [`LinePredictor`]; this
//! module only turns its per-line predictions into a title and outline. No
//! model format or ML runtime is assumed.

use serde::{Deserialize, Serialize};

use crate::model::{DocumentOutline, HeadingLevel, LineFeature, OutlineEntry, UNTITLED};

use super::classifier::Classifier;
use super::cleanup::clean_heading_text;
use super::noise::NoiseFilter;

/// Default minimum title probability.
pub const DEFAULT_TITLE_THRESHOLD: f32 = 0.70;

/// Feature vector seen by a line model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelFeatures {
    pub font_size: f32,
    pub is_bold: bool,
    pub is_centered: bool,
    pub space_above: f32,
    pub x0: f32,
    pub word_count: usize,
}

impl From<&LineFeature> for ModelFeatures {
    fn from(line: &LineFeature) -> Self {
        Self {
            font_size: line.font_size,
            is_bold: line.is_bold,
            is_centered: line.is_centered,
            space_above: line.space_above,
            x0: line.x0(),
            word_count: line.word_count,
        }
    }
}

/// Predicted class of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLabel {
    Title,
    Heading(HeadingLevel),
    Body,
}

impl LineLabel {
    /// Parse a model class name: "Title", "H1".."H6" (H4+ fold into H3),
    /// anything else is body.
    pub fn from_class(name: &str) -> Self {
        if name.eq_ignore_ascii_case("title") {
            return LineLabel::Title;
        }
        HeadingLevel::parse(name).map_or(LineLabel::Body, LineLabel::Heading)
    }
}

/// One line's prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrediction {
    /// Most likely class
    pub label: LineLabel,
    /// Probability of the title class
    pub title_probability: f32,
}

impl LinePrediction {
    pub fn new(label: LineLabel, title_probability: f32) -> Self {
        Self {
            label,
            title_probability,
        }
    }
}

/// A trained per-line classifier.
pub trait LinePredictor {
    fn predict(&self, features: &ModelFeatures) -> LinePrediction;
}

impl<F> LinePredictor for F
where
    F: Fn(&ModelFeatures) -> LinePrediction,
{
    fn predict(&self, features: &ModelFeatures) -> LinePrediction {
        self(features)
    }
}

/// [`Classifier`] backed by a [`LinePredictor`].
///
/// The title is the page-1 line with the highest title probability, if that
/// probability exceeds the threshold. Every other line predicted as a
/// heading is emitted in reading order after the noise filter.
#[derive(Debug, Clone)]
pub struct PredictorClassifier<P> {
    predictor: P,
    title_threshold: f32,
    noise: NoiseFilter,
}

impl<P: LinePredictor> PredictorClassifier<P> {
    pub fn new(predictor: P) -> Self {
        Self {
            predictor,
            title_threshold: DEFAULT_TITLE_THRESHOLD,
            noise: NoiseFilter::default(),
        }
    }

    /// Set the minimum title probability.
    pub fn with_title_threshold(mut self, threshold: f32) -> Self {
        self.title_threshold = threshold;
        self
    }

    /// Use a custom noise filter.
    pub fn with_noise_filter(mut self, noise: NoiseFilter) -> Self {
        self.noise = noise;
        self
    }
}

impl<P: LinePredictor> Classifier for PredictorClassifier<P> {
    fn classify(&self, lines: &[LineFeature], _page_count: usize) -> DocumentOutline {
        if lines.is_empty() {
            return DocumentOutline::untitled();
        }

        let predictions: Vec<LinePrediction> = lines
            .iter()
            .map(|line| self.predictor.predict(&ModelFeatures::from(line)))
            .collect();

        let title_index = lines
            .iter()
            .zip(&predictions)
            .enumerate()
            .filter(|(_, (line, _))| line.page == 1)
            .fold(None::<(usize, f32)>, |best, (i, (_, p))| match best {
                Some((_, best_p)) if p.title_probability <= best_p => best,
                _ => Some((i, p.title_probability)),
            })
            .filter(|(_, p)| *p > self.title_threshold)
            .map(|(i, _)| i);

        let title = title_index
            .map(|i| clean_heading_text(&lines[i].text))
            .unwrap_or_default();

        let outline = lines
            .iter()
            .zip(&predictions)
            .enumerate()
            .filter(|(i, _)| Some(*i) != title_index)
            .filter_map(|(_, (line, p))| match p.label {
                LineLabel::Heading(level) => {
                    let text = clean_heading_text(&line.text);
                    (!text.is_empty() && !self.noise.is_noise(&text))
                        .then(|| OutlineEntry::new(level, text, line.page))
                }
                _ => None,
            })
            .collect();

        let title = if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title
        };

        DocumentOutline::new(title, outline)
    }

    fn name(&self) -> &str {
        "predictor"
    }
}
