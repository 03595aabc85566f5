//! Tunable thresholds for heading inference.
//!
//! These are heuristics, not invariants. The defaults work across reports,
//! forms, slide decks and multi-column layouts; individual corpora may
//! want different values.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thresholds used by every stage of the heuristic classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Max distance of a line's midpoint from the page midpoint, as a
    /// fraction of page width, for the line to count as centered
    pub center_tolerance_ratio: f32,

    /// Fraction of pages a (text, position) pair must repeat on to be furniture.
    /// At least two occurrences are always required, so in a two-page
    /// document only lines found on both pages qualify.
    pub furniture_min_repetition: f32,
    /// Furniture candidates shorter than this many characters are ignored
    pub furniture_min_chars: usize,
    /// Furniture candidates longer than this many words are ignored
    pub furniture_max_words: usize,
    /// Vertical positions are rounded to multiples of this
    pub furniture_position_quantum: f32,

    /// Only lines with more words than this inform the body baseline
    pub body_min_words: usize,
    /// Smallest plausible body font size
    pub body_min_size: f32,
    /// Largest plausible body font size
    pub body_max_size: f32,
    /// Body size when nothing qualifies
    pub default_body_size: f32,

    /// Lines with more words than this are never headings
    pub noise_max_words: usize,
    /// Lines whose share of letters is below this are never headings
    pub noise_min_alpha_ratio: f32,

    /// Size ratio to body that makes a line a candidate on its own
    pub candidate_size_ratio: f32,
    /// Size ratio to body that makes a bold line a candidate
    pub candidate_bold_size_ratio: f32,
    /// Gap above, in body sizes, that makes a line a candidate
    pub candidate_space_ratio: f32,
    /// Numbered or bulleted lines below this word count are candidates
    pub candidate_pattern_max_words: usize,
    /// Bold body-colored lines above this word count are emphasized prose
    pub emphasized_body_min_words: usize,

    /// Sorted x positions further than this from the bucket anchor start a new bucket
    pub indent_cluster_gap: f32,
    /// A style smaller than this fraction of the previous one starts a new level
    pub level_size_ratio: f32,
    /// Indentation increase that starts a new level at equal size and weight
    pub level_indent_step: f32,

    /// Title candidates closer than this many body sizes count as the same height
    pub title_height_tolerance: f32,
    /// Title candidates need at least this many words
    pub title_min_words: usize,
    /// Title candidates need at least this many characters
    pub title_min_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            center_tolerance_ratio: 0.05,
            furniture_min_repetition: 0.5,
            furniture_min_chars: 5,
            furniture_max_words: 10,
            furniture_position_quantum: 10.0,
            body_min_words: 4,
            body_min_size: 5.0,
            body_max_size: 25.0,
            default_body_size: 10.0,
            noise_max_words: 12,
            noise_min_alpha_ratio: 0.2,
            candidate_size_ratio: 1.15,
            candidate_bold_size_ratio: 1.05,
            candidate_space_ratio: 0.8,
            candidate_pattern_max_words: 10,
            emphasized_body_min_words: 15,
            indent_cluster_gap: 15.0,
            level_size_ratio: 0.9,
            level_indent_step: 10.0,
            title_height_tolerance: 0.5,
            title_min_words: 2,
            title_min_chars: 5,
        }
    }
}

impl ClassifierConfig {
    /// Create a config with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the centering tolerance.
    pub fn with_center_tolerance(mut self, ratio: f32) -> Self {
        self.center_tolerance_ratio = ratio;
        self
    }

    /// Set the furniture repetition ratio.
    pub fn with_furniture_repetition(mut self, ratio: f32) -> Self {
        self.furniture_min_repetition = ratio;
        self
    }

    /// Set the fallback body size.
    pub fn with_default_body_size(mut self, size: f32) -> Self {
        self.default_body_size = size;
        self
    }

    /// Set the heading word ceiling of the noise filter.
    pub fn with_noise_max_words(mut self, words: usize) -> Self {
        self.noise_max_words = words;
        self
    }

    /// Set the size ratio for stand-alone candidates.
    pub fn with_candidate_size_ratio(mut self, ratio: f32) -> Self {
        self.candidate_size_ratio = ratio;
        self
    }

    /// Set the indentation clustering gap.
    pub fn with_indent_cluster_gap(mut self, gap: f32) -> Self {
        self.indent_cluster_gap = gap;
        self
    }

    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        let unit_ratios = [
            ("center_tolerance_ratio", self.center_tolerance_ratio),
            ("furniture_min_repetition", self.furniture_min_repetition),
            ("noise_min_alpha_ratio", self.noise_min_alpha_ratio),
            ("level_size_ratio", self.level_size_ratio),
        ];
        for (name, value) in unit_ratios {
            if !(value > 0.0 && value <= 1.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }

        let positive = [
            ("furniture_position_quantum", self.furniture_position_quantum),
            ("default_body_size", self.default_body_size),
            ("candidate_size_ratio", self.candidate_size_ratio),
            ("candidate_bold_size_ratio", self.candidate_bold_size_ratio),
            ("candidate_space_ratio", self.candidate_space_ratio),
            ("indent_cluster_gap", self.indent_cluster_gap),
            ("level_indent_step", self.level_indent_step),
            ("title_height_tolerance", self.title_height_tolerance),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.body_min_size >= self.body_max_size {
            return Err(Error::InvalidConfig(format!(
                "body size range is empty: {}..{}",
                self.body_min_size, self.body_max_size
            )));
        }

        if self.noise_max_words == 0 {
            return Err(Error::InvalidConfig(
                "noise_max_words must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ClassifierConfig::new()
            .with_center_tolerance(0.1)
            .with_furniture_repetition(0.75)
            .with_indent_cluster_gap(20.0);

        assert_eq!(config.center_tolerance_ratio, 0.1);
        assert_eq!(config.furniture_min_repetition, 0.75);
        assert_eq!(config.indent_cluster_gap, 20.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let config = ClassifierConfig::new().with_furniture_repetition(1.5);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = ClassifierConfig::new().with_indent_cluster_gap(0.0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ClassifierConfig::from_json(r#"{"noise_max_words": 10}"#).unwrap();
        assert_eq!(config.noise_max_words, 10);
        assert_eq!(config.candidate_size_ratio, 1.15);
    }

    #[test]
    fn test_invalid_json_config_rejected() {
        assert!(ClassifierConfig::from_json(r#"{"level_size_ratio": 0.0}"#).is_err());
    }
}
