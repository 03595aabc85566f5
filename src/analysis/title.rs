//! Document title selection.

use std::collections::HashSet;

use crate::model::LineFeature;

use super::baseline::Baseline;
use super::config::ClassifierConfig;
use super::noise::NoiseFilter;

/// Pick the title line from page 1.
///
/// A greedy single pass keeps one running best. A challenger wins when it is
/// higher on the page by more than the height tolerance. At comparable
/// height the priority is larger size, then bold, then centered, then a
/// color distinct from the body.
pub fn select_title<'a>(
    lines: &'a [LineFeature],
    furniture: &HashSet<String>,
    noise: &NoiseFilter,
    baseline: &Baseline,
    config: &ClassifierConfig,
) -> Option<&'a LineFeature> {
    let tolerance = config.title_height_tolerance * baseline.font_size;

    lines
        .iter()
        .filter(|l| l.page == 1)
        .filter(|l| l.word_count >= config.title_min_words)
        .filter(|l| l.text.trim().chars().count() >= config.title_min_chars)
        .filter(|l| !furniture.contains(&l.normalized_text()))
        .filter(|l| !noise.is_noise(&l.text))
        .fold(None, |best: Option<&LineFeature>, line| match best {
            Some(incumbent) if !outranks(line, incumbent, baseline, tolerance) => Some(incumbent),
            _ => Some(line),
        })
}

fn outranks(
    challenger: &LineFeature,
    incumbent: &LineFeature,
    baseline: &Baseline,
    tolerance: f32,
) -> bool {
    let dy = challenger.y0() - incumbent.y0();
    if dy < -tolerance {
        return true;
    }
    if dy > tolerance {
        return false;
    }

    if challenger.font_size != incumbent.font_size {
        return challenger.font_size > incumbent.font_size;
    }
    if challenger.is_bold != incumbent.is_bold {
        return challenger.is_bold;
    }
    if challenger.is_centered != incumbent.is_centered {
        return challenger.is_centered;
    }
    baseline.is_distinct_color(challenger.font_color)
        && !baseline.is_distinct_color(incumbent.font_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn line(text: &str, page: u32, y0: f32, size: f32) -> LineFeature {
        LineFeature {
            text: text.to_string(),
            page,
            bbox: BBox::new(72.0, y0, 400.0, y0 + size),
            font_size: size,
            word_count: text.split_whitespace().count(),
            ..Default::default()
        }
    }

    fn pick<'a>(lines: &'a [LineFeature]) -> Option<&'a str> {
        select_title(
            lines,
            &HashSet::new(),
            &NoiseFilter::default(),
            &Baseline::new(10.0, 0),
            &ClassifierConfig::default(),
        )
        .map(|l| l.text.as_str())
    }

    #[test]
    fn test_higher_line_wins() {
        let lines = vec![
            line("Second Line Here", 1, 200.0, 20.0),
            line("Top Line Here", 1, 80.0, 14.0),
        ];
        assert_eq!(pick(&lines), Some("Top Line Here"));
    }

    #[test]
    fn test_larger_size_at_comparable_height() {
        let lines = vec![
            line("Small Caption", 1, 100.0, 12.0),
            line("Quarterly Review", 1, 103.0, 24.0),
        ];
        assert_eq!(pick(&lines), Some("Quarterly Review"));
    }

    #[test]
    fn test_tie_breaks() {
        let mut plain = line("Plain Title", 1, 100.0, 18.0);
        let mut bold = line("Bold Title", 1, 101.0, 18.0);
        bold.is_bold = true;
        assert_eq!(pick(&[plain.clone(), bold.clone()]), Some("Bold Title"));

        let mut centered = line("Centered Title", 1, 101.0, 18.0);
        centered.is_centered = true;
        assert_eq!(pick(&[plain.clone(), centered]), Some("Centered Title"));

        let mut colored = line("Colored Title", 1, 101.0, 18.0);
        colored.font_color = 0x1F4E79;
        assert_eq!(pick(&[plain.clone(), colored]), Some("Colored Title"));

        // Bold outranks centered
        plain.is_centered = true;
        assert_eq!(pick(&[plain, bold]), Some("Bold Title"));
    }

    #[test]
    fn test_incumbent_kept_on_full_tie() {
        let lines = vec![
            line("First Title", 1, 100.0, 18.0),
            line("Second Title", 1, 100.0, 18.0),
        ];
        assert_eq!(pick(&lines), Some("First Title"));
    }

    #[test]
    fn test_only_page_one_and_qualifying_lines() {
        let lines = vec![
            line("Later Page Title", 2, 10.0, 30.0),
            line("Short", 1, 10.0, 30.0),
            line("Hi", 1, 20.0, 30.0),
            line("A full sentence here.", 1, 30.0, 30.0),
            line("Report Overview", 1, 300.0, 16.0),
        ];
        assert_eq!(pick(&lines), Some("Report Overview"));
    }

    #[test]
    fn test_furniture_excluded() {
        let lines = vec![
            line("Acme Corp Confidential", 1, 20.0, 9.0),
            line("Design Review", 1, 120.0, 22.0),
        ];
        let furniture: HashSet<String> = ["acme corp confidential".to_string()].into();
        let title = select_title(
            &lines,
            &furniture,
            &NoiseFilter::default(),
            &Baseline::new(10.0, 0),
            &ClassifierConfig::default(),
        );
        assert_eq!(title.map(|l| l.text.as_str()), Some("Design Review"));
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(pick(&[]), None);
        assert_eq!(pick(&[line("Page 1", 1, 10.0, 20.0)]), None);
    }
}
