//! End-to-end outline inference over page records.

use std::collections::HashMap;

use pdfoutline::analysis::{
    assign_levels, clean_heading_text, extract_features, is_noise, ClassifierConfig,
    IndentBuckets, NoiseFilter, StyleKey,
};
use pdfoutline::{extract_outline, BBox, HeadingLevel, PageRecord, RawBlock, RawLine, RawSpan};

const BODY: &str = "body text that runs long enough to count toward the baseline and more";
const REGULAR: &str = "Helvetica";
const BOLD: &str = "Helvetica-Bold";

/// Builds page records one line per block.
struct Pages {
    pages: Vec<PageRecord>,
}

impl Pages {
    fn new(count: u32) -> Self {
        Self {
            pages: (1..=count).map(PageRecord::letter).collect(),
        }
    }

    fn line(mut self, page: u32, y: f32, x: f32, size: f32, font: &str, text: &str) -> Self {
        let width = text.chars().count() as f32 * size * 0.5;
        let line = RawLine::new(
            BBox::new(x, y, x + width, y + size),
            vec![RawSpan::new(text, size, font)],
        );
        self.pages[page as usize - 1].add_block(RawBlock::text(vec![line]));
        self
    }

    fn body(self, page: u32, y: f32) -> Self {
        self.line(page, y, 72.0, 10.0, REGULAR, BODY)
    }

    fn header(self, page: u32) -> Self {
        self.line(page, 30.0, 72.0, 9.0, REGULAR, "Acme Corporation Internal")
    }

    fn build(self) -> Vec<PageRecord> {
        self.pages
    }
}

fn report() -> Vec<PageRecord> {
    Pages::new(3)
        .header(1)
        .line(1, 60.0, 150.0, 24.0, BOLD, "Annual Operations Report")
        .line(1, 120.0, 72.0, 16.0, BOLD, "1 Introduction")
        .body(1, 140.0)
        .body(1, 152.0)
        .body(1, 164.0)
        .line(1, 190.0, 72.0, 13.0, BOLD, "1.1 Background")
        .body(1, 210.0)
        .body(1, 222.0)
        .header(2)
        .line(2, 72.0, 72.0, 16.0, BOLD, "2 Methods")
        .body(2, 92.0)
        .body(2, 104.0)
        .line(2, 150.0, 72.0, 13.0, BOLD, "2.1 Sampling")
        .body(2, 170.0)
        .body(2, 182.0)
        .header(3)
        .line(3, 72.0, 72.0, 16.0, BOLD, "3 Results")
        .body(3, 92.0)
        .line(3, 130.0, 90.0, 11.0, BOLD, "Regional breakdown")
        .body(3, 145.0)
        .build()
}

fn entries(pages: &[PageRecord]) -> Vec<(HeadingLevel, String, u32)> {
    extract_outline(pages)
        .outline
        .into_iter()
        .map(|e| (e.level, e.text, e.page))
        .collect()
}

#[test]
fn test_empty_input() {
    let outline = extract_outline(&[]);
    assert_eq!(outline.title, "");
    assert!(outline.outline.is_empty());
}

#[test]
fn test_report_outline() {
    let pages = report();
    let outline = extract_outline(&pages);

    assert_eq!(outline.title, "Annual Operations Report");
    assert_eq!(
        entries(&pages),
        vec![
            (HeadingLevel::H1, "1 Introduction".to_string(), 1),
            (HeadingLevel::H2, "1.1 Background".to_string(), 1),
            (HeadingLevel::H1, "2 Methods".to_string(), 2),
            (HeadingLevel::H2, "2.1 Sampling".to_string(), 2),
            (HeadingLevel::H1, "3 Results".to_string(), 3),
            (HeadingLevel::H3, "Regional breakdown".to_string(), 3),
        ]
    );
}

#[test]
fn test_running_header_never_emitted() {
    let outline = extract_outline(&report());
    assert!(outline
        .outline
        .iter()
        .all(|e| e.text != "Acme Corporation Internal"));
    assert_ne!(outline.title, "Acme Corporation Internal");
}

#[test]
fn test_outline_in_reading_order() {
    // Headings added out of order; the more prominent style sits lower on the page.
    let pages = Pages::new(2)
        .line(1, 50.0, 72.0, 22.0, BOLD, "Field Guide Overview")
        .line(2, 400.0, 72.0, 18.0, BOLD, "Late Section")
        .line(2, 100.0, 72.0, 14.0, BOLD, "Early Section")
        .body(2, 120.0)
        .body(2, 420.0)
        .line(1, 200.0, 72.0, 14.0, BOLD, "First Page Section")
        .build();

    let outline = extract_outline(&pages);
    let positions: Vec<(u32, &str)> = outline
        .outline
        .iter()
        .map(|e| (e.page, e.text.as_str()))
        .collect();
    assert_eq!(
        positions,
        vec![
            (1, "First Page Section"),
            (2, "Early Section"),
            (2, "Late Section"),
        ]
    );
}

#[test]
fn test_title_not_duplicated() {
    let pages = Pages::new(3)
        .line(1, 60.0, 72.0, 24.0, BOLD, "Market Study 2024")
        .body(1, 100.0)
        .body(1, 112.0)
        .line(2, 80.0, 72.0, 16.0, BOLD, "Methods Used")
        .body(2, 100.0)
        .line(3, 300.0, 72.0, 24.0, BOLD, "Market  Study 2024")
        .body(3, 330.0)
        .build();

    let outline = extract_outline(&pages);
    assert_eq!(outline.title, "Market Study 2024");
    assert!(outline.outline.iter().all(|e| e.text != outline.title));
    assert_eq!(outline.outline.len(), 1);
}

#[test]
fn test_emitted_text_is_not_noise() {
    let pages = Pages::new(1)
        .line(1, 40.0, 72.0, 22.0, BOLD, "Field Guide Overview")
        .line(1, 100.0, 72.0, 16.0, BOLD, "Page 3")
        .line(1, 130.0, 72.0, 16.0, BOLD, "42")
        .line(1, 160.0, 72.0, 16.0, BOLD, "Lorem ipsum dolor")
        .line(1, 190.0, 72.0, 16.0, BOLD, "——— ——— ———")
        .line(1, 220.0, 72.0, 16.0, BOLD, "Getting Started")
        .body(1, 240.0)
        .build();

    let outline = extract_outline(&pages);
    let texts: Vec<&str> = outline.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Getting Started"]);

    let filter = NoiseFilter::default();
    for entry in &outline.outline {
        assert!(!filter.is_noise(&entry.text));
        assert!(!is_noise(&clean_heading_text(&entry.text)));
    }
}

#[test]
fn test_sentence_never_heading() {
    let sentence = "We finished the survey work in eight months.";
    assert_eq!(sentence.split_whitespace().count(), 8);

    let pages = Pages::new(1)
        .line(1, 40.0, 72.0, 20.0, BOLD, "Project Plan Summary")
        .line(1, 120.0, 72.0, 36.0, BOLD, sentence)
        .body(1, 170.0)
        .build();

    let outline = extract_outline(&pages);
    assert_ne!(outline.title, sentence);
    assert!(outline.outline.iter().all(|e| e.text != sentence));
}

#[test]
fn test_repeated_line_excluded_as_furniture() {
    let mut builder = Pages::new(10);
    for page in 1..=10 {
        builder = builder
            .line(page, 100.0, 72.0, 16.0, BOLD, &format!("Section {} Overview", page))
            .body(page, 120.0)
            .body(page, 132.0);
        if page <= 6 {
            builder = builder.line(page, 750.0, 72.0, 16.0, BOLD, "Quarterly Compliance Bulletin");
        }
    }

    let outline = extract_outline(&builder.build());
    assert_eq!(outline.title, "Section 1 Overview");
    assert!(outline
        .outline
        .iter()
        .all(|e| e.text != "Quarterly Compliance Bulletin"));
    assert_eq!(outline.outline.len(), 9);
}

#[test]
fn test_single_large_line_is_title_only() {
    let pages = Pages::new(1)
        .line(1, 100.0, 72.0, 24.0, REGULAR, "Strategic Plan Overview")
        .build();

    let outline = extract_outline(&pages);
    assert_eq!(outline.title, "Strategic Plan Overview");
    assert!(outline.outline.is_empty());
}

#[test]
fn test_levels_monotonic_in_style_order() {
    let pages = report();
    let config = ClassifierConfig::default();
    let lines = extract_features(&pages, &config);
    let outline = extract_outline(&pages);

    let by_text: HashMap<&str, _> = lines.iter().map(|l| (l.text.as_str(), l)).collect();
    let buckets = IndentBuckets::cluster(
        outline.outline.iter().map(|e| by_text[e.text.as_str()].x0()),
        config.indent_cluster_gap,
    );
    let styled: Vec<(StyleKey, HeadingLevel)> = outline
        .outline
        .iter()
        .map(|e| (StyleKey::of(by_text[e.text.as_str()], &buckets), e.level))
        .collect();

    for (a, level_a) in &styled {
        for (b, level_b) in &styled {
            if a.prominence(b).is_lt() {
                assert!(level_a <= level_b, "{:?} ranks above {:?}", a, b);
            }
        }
    }

    // Same property straight from level assignment
    let keys: Vec<StyleKey> = styled.iter().map(|(k, _)| *k).collect();
    let levels = assign_levels(&keys, &config);
    for a in &keys {
        for b in &keys {
            if a.prominence(b).is_lt() {
                assert!(levels[a] <= levels[b]);
            }
        }
    }
}

#[test]
fn test_page_dump_json_input() {
    let json = r#"[
        {"page_number": 1, "width": 612, "height": 792, "blocks": [
            {"type": 0, "bbox": [150, 60, 450, 84], "lines": [
                {"bbox": [150, 60, 450, 84], "spans": [
                    {"text": "Design ", "size": 24.0, "font": "Arial-BoldMT", "color": 0},
                    {"text": "Review", "size": 24.0, "font": "Arial-BoldMT", "color": 0}
                ]}
            ]},
            {"type": 1, "bbox": [72, 100, 540, 300]},
            {"type": 0, "bbox": [72, 320, 300, 336], "lines": [
                {"bbox": [72, 320, 300, 336], "spans": [
                    {"text": "Scope and Goals", "size": 16.0, "font": "Arial-BoldMT", "color": 2048}
                ]}
            ]}
        ]}
    ]"#;

    let pages: Vec<PageRecord> = serde_json::from_str(json).unwrap();
    let outline = extract_outline(&pages);
    assert_eq!(outline.title, "Design Review");
    assert_eq!(
        entries(&pages),
        vec![(HeadingLevel::H1, "Scope and Goals".to_string(), 1)]
    );
}
