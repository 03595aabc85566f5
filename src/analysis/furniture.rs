//! Running header and footer detection.
//!
//! Lines that repeat at a stable vertical position across a large share of
//! pages are page furniture, not structure.

use std::collections::{HashMap, HashSet};

use crate::model::LineFeature;

use super::config::ClassifierConfig;

/// Normalized texts of lines that behave as running headers or footers.
///
/// A (text, position) pair must occur on at least `furniture_min_repetition`
/// of the pages, and at least twice. Always empty for documents with fewer
/// than two pages.
pub fn detect_furniture(
    lines: &[LineFeature],
    page_count: usize,
    config: &ClassifierConfig,
) -> HashSet<String> {
    if page_count < 2 {
        return HashSet::new();
    }

    let quantum = config.furniture_position_quantum;
    let mut tallies: HashMap<String, HashMap<i64, usize>> = HashMap::new();

    for line in lines {
        let text = line.normalized_text();
        if text.chars().count() < config.furniture_min_chars
            || line.word_count > config.furniture_max_words
        {
            continue;
        }

        let position = (line.y0() / quantum).round() as i64;
        *tallies.entry(text).or_default().entry(position).or_insert(0) += 1;
    }

    // A line seen once is not repeated, however short the document
    let min_count = (page_count as f32 * config.furniture_min_repetition).max(2.0);

    let furniture: HashSet<String> = tallies
        .into_iter()
        .filter(|(_, positions)| positions.values().any(|&count| count as f32 >= min_count))
        .map(|(text, _)| text)
        .collect();

    log::debug!(
        "Detected {} running header/footer texts over {} pages",
        furniture.len(),
        page_count
    );

    furniture
}
