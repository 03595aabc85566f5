//! Heading inference over line features.
//!
//! Stages, in pipeline order:
//! - [`features`]: page records to per-line features
//! - [`furniture`]: running header/footer detection
//! - [`baseline`]: dominant body size and color
//! - [`noise`]: lines that can never be headings
//! - [`classifier`]: title, candidates, styles, levels, emission

pub mod baseline;
pub mod classifier;
mod cleanup;
pub mod config;
pub mod features;
pub mod furniture;
pub mod noise;
mod patterns;
pub mod predictor;
mod stats;
pub mod styles;
mod title;

pub use baseline::Baseline;
pub use classifier::{Classifier, HeuristicClassifier};
pub use cleanup::clean_heading_text;
pub use config::ClassifierConfig;
pub use features::{extract_features, extract_page_features};
pub use furniture::detect_furniture;
pub use noise::{is_noise, NoiseFilter};
pub use predictor::{
    LineLabel, LinePrediction, LinePredictor, ModelFeatures, PredictorClassifier,
    DEFAULT_TITLE_THRESHOLD,
};
pub use styles::{assign_levels, IndentBuckets, StyleKey};
pub use title::select_title;
