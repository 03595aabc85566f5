//! Diagnostic font-style report.
//!
//! Aggregates the distinct visual styles seen across one or more documents,
//! with character and line totals and a few sample lines per style. Useful
//! for tuning thresholds against a corpus; not needed for classification.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::LineFeature;

const MAX_SAMPLES: usize = 5;
const SAMPLE_CHARS: usize = 70;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct StyleKey {
    size_tenths: i32,
    font_name: String,
    bold: bool,
    italic: bool,
    centered: bool,
    x: i32,
    color: u32,
}

#[derive(Debug, Clone, Default)]
struct StyleStats {
    chars: usize,
    lines: usize,
    samples: Vec<String>,
}

/// One row of the report, serialized with the CSV column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontReportRow {
    #[serde(rename = "Font_Size")]
    pub font_size: String,
    #[serde(rename = "Font_Name")]
    pub font_name: String,
    #[serde(rename = "Is_Bold")]
    pub is_bold: bool,
    #[serde(rename = "Is_Italic")]
    pub is_italic: bool,
    #[serde(rename = "Is_Centered")]
    pub is_centered: bool,
    #[serde(rename = "X_Position_Approx")]
    pub x_position: i32,
    #[serde(rename = "Font_Color")]
    pub font_color: String,
    #[serde(rename = "Total_Chars")]
    pub total_chars: usize,
    #[serde(rename = "Total_Lines")]
    pub total_lines: usize,
    #[serde(rename = "Sample_Text_Lines")]
    pub samples: String,
}

/// Style aggregator.
#[derive(Debug, Clone, Default)]
pub struct FontReport {
    styles: BTreeMap<StyleKey, StyleStats>,
}

impl FontReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every line of a document.
    pub fn add_lines(&mut self, lines: &[LineFeature]) {
        for line in lines {
            self.add_line(line);
        }
    }

    /// Add one line.
    pub fn add_line(&mut self, line: &LineFeature) {
        let key = StyleKey {
            size_tenths: (line.font_size * 10.0).round() as i32,
            font_name: line.font_name.clone(),
            bold: line.is_bold,
            italic: line.is_italic,
            centered: line.is_centered,
            x: line.x0().round() as i32,
            color: line.font_color,
        };

        let stats = self.styles.entry(key).or_default();
        stats.chars += line.text_length;
        stats.lines += 1;
        if stats.samples.len() < MAX_SAMPLES {
            stats.samples.push(sample(&line.text));
        }
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: FontReport) {
        for (key, theirs) in other.styles {
            let ours = self.styles.entry(key).or_default();
            ours.chars += theirs.chars;
            ours.lines += theirs.lines;
            let room = MAX_SAMPLES.saturating_sub(ours.samples.len());
            ours.samples.extend(theirs.samples.into_iter().take(room));
        }
    }

    /// Number of distinct styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Rows sorted by descending (size, name, bold).
    pub fn rows(&self) -> Vec<FontReportRow> {
        let mut entries: Vec<(&StyleKey, &StyleStats)> = self.styles.iter().collect();
        entries.sort_by(|(a, _), (b, _)| {
            b.size_tenths
                .cmp(&a.size_tenths)
                .then_with(|| b.font_name.cmp(&a.font_name))
                .then_with(|| b.bold.cmp(&a.bold))
        });

        entries
            .into_iter()
            .map(|(key, stats)| FontReportRow {
                font_size: format!("{:.1}", key.size_tenths as f32 / 10.0),
                font_name: key.font_name.clone(),
                is_bold: key.bold,
                is_italic: key.italic,
                is_centered: key.centered,
                x_position: key.x,
                font_color: format!("#{:06x}", key.color),
                total_chars: stats.chars,
                total_lines: stats.lines,
                samples: stats.samples.join(" | "),
            })
            .collect()
    }

    /// Write the report as CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in self.rows() {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Render the report as a CSV string.
    pub fn to_csv(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::Render(e.to_string()))
    }
}

/// Report shared across worker threads.
#[derive(Debug, Default)]
pub struct SharedFontReport {
    inner: Mutex<FontReport>,
}

impl SharedFontReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every line of a document under the lock.
    pub fn add_lines(&self, lines: &[LineFeature]) {
        // Build outside the lock, merge inside
        let mut local = FontReport::new();
        local.add_lines(lines);
        self.lock().merge(local);
    }

    /// Take the accumulated report.
    pub fn into_inner(self) -> FontReport {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FontReport> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn sample(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > SAMPLE_CHARS {
        let cut: String = flat.chars().take(SAMPLE_CHARS).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn line(text: &str, size: f32, font: &str, bold: bool, x0: f32) -> LineFeature {
        LineFeature {
            text: text.to_string(),
            bbox: BBox::new(x0, 0.0, x0 + 100.0, 10.0),
            font_size: size,
            font_name: font.to_string(),
            is_bold: bold,
            text_length: text.chars().count(),
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregation_and_order() {
        let mut report = FontReport::new();
        report.add_lines(&[
            line("Body one", 10.0, "Times", false, 72.2),
            line("Body two", 10.02, "Times", false, 71.8),
            line("Heading", 16.0, "Arial-Bold", true, 72.0),
            line("Aside", 10.0, "Arial", false, 72.0),
        ]);

        let rows = report.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].font_name, "Arial-Bold");
        assert_eq!(rows[0].font_size, "16.0");
        // Same size: name descending
        assert_eq!(rows[1].font_name, "Times");
        assert_eq!(rows[1].total_lines, 2);
        assert_eq!(rows[1].total_chars, 16);
        assert_eq!(rows[1].samples, "Body one | Body two");
        assert_eq!(rows[2].font_name, "Arial");
    }

    #[test]
    fn test_samples_truncated_and_capped() {
        let long = "x".repeat(100);
        let mut report = FontReport::new();
        for _ in 0..8 {
            report.add_line(&line(&long, 10.0, "Times", false, 72.0));
        }
        let rows = report.rows();
        let samples: Vec<&str> = rows[0].samples.split(" | ").collect();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0].len(), 73);
        assert!(samples[0].ends_with("..."));
        assert_eq!(rows[0].total_lines, 8);
    }

    #[test]
    fn test_csv_output() {
        let mut report = FontReport::new();
        let mut colored = line("Scope", 12.0, "Arial", true, 90.0);
        colored.font_color = 0x1F4E79;
        report.add_line(&colored);

        let csv = report.to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Font_Size,Font_Name,Is_Bold,Is_Italic,Is_Centered,X_Position_Approx,Font_Color,Total_Chars,Total_Lines,Sample_Text_Lines"
        );
        assert_eq!(
            lines.next().unwrap(),
            "12.0,Arial,true,false,false,90,#1f4e79,5,1,Scope"
        );
    }

    #[test]
    fn test_shared_report_merges() {
        let shared = SharedFontReport::new();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| shared.add_lines(&[line("Body", 10.0, "Times", false, 72.0)]));
            }
        });
        let report = shared.into_inner();
        assert_eq!(report.len(), 1);
        assert_eq!(report.rows()[0].total_lines, 4);
    }
}
