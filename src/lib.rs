//! # pdfoutline
//!
//! Title and heading outline inference for PDF documents.
//!
//! Works from visual evidence alone (font size, weight, color, position,
//! spacing and repetition across pages) and never reads embedded bookmarks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline_from_file, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline_from_file("report.pdf")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Input**: [`PageRecord`]s, either decoded from a PDF by [`PdfParser`]
//!   or loaded from a JSON dump produced by another extractor
//! - **Features**: one [`LineFeature`] per text line
//! - **Filtering**: running headers/footers, body baseline, noise
//! - **Classification**: title, candidates, styles, H1–H3 levels
//! - **Output**: `{"title": ..., "outline": [{"level", "text", "page"}]}`

pub mod analysis;
pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod report;

pub use analysis::{Classifier, ClassifierConfig, HeuristicClassifier, PredictorClassifier};
pub use batch::{BatchOptions, BatchSummary, DocumentReport, DocumentStatus};
pub use detect::{detect_input, is_pdf, InputFormat, PdfFormat};
pub use error::{Error, Result};
pub use model::{
    BBox, DocumentOutline, HeadingLevel, LineFeature, OutlineEntry, PageRecord, RawBlock, RawLine,
    RawSpan, UNTITLED,
};
pub use parser::{ErrorMode, PageSelection, ParseOptions, PdfParser};
pub use report::{FontReport, SharedFontReport};

use std::path::Path;

/// Infer the outline of a document from its page records.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline, PageRecord};
///
/// let outline = extract_outline(&[PageRecord::letter(1)]);
/// assert!(outline.outline.is_empty());
/// ```
pub fn extract_outline(pages: &[PageRecord]) -> DocumentOutline {
    Outliner::new().outline_pages(pages)
}

/// Load a PDF or page-record dump and infer its outline.
///
/// The title is not backfilled; see [`DocumentOutline::backfill_title`].
pub fn extract_outline_from_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    Outliner::new().outline_file(path)
}

/// Load page records from a PDF or a JSON page-record dump.
///
/// The format is detected from content. The page selection of `options`
/// applies to both kinds of input.
pub fn load_page_records<P: AsRef<Path>>(
    path: P,
    options: &ParseOptions,
) -> Result<Vec<PageRecord>> {
    let path = path.as_ref();
    match detect_input(path)? {
        InputFormat::Pdf(_) => PdfParser::open_with_options(path, options.clone())?.page_records(),
        InputFormat::PageDump => {
            let data = std::fs::read(path)?;
            let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&data);
            let mut pages: Vec<PageRecord> = serde_json::from_slice(data)?;
            number_by_position(&mut pages);
            Ok(pages
                .into_iter()
                .filter(|page| options.pages.includes(page.number))
                .collect())
        }
    }
}

/// Pages a dump left unnumbered take their 1-based position in the dump.
fn number_by_position(pages: &mut [PageRecord]) {
    for (i, page) in pages.iter_mut().enumerate() {
        if page.number == 0 {
            page.number = i as u32 + 1;
        }
    }
}

/// End-to-end outline extraction with configurable stages.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{ClassifierConfig, Outliner, ParseOptions};
///
/// let outliner = Outliner::new()
///     .with_config(ClassifierConfig::default().with_noise_max_words(15))
///     .with_parse_options(ParseOptions::new().lenient());
/// let outline = outliner.outline_file("report.pdf").unwrap();
/// ```
pub struct Outliner {
    config: ClassifierConfig,
    parse_options: ParseOptions,
    classifier: Box<dyn Classifier + Send + Sync>,
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new()
    }
}

impl Outliner {
    /// Heuristic classification with default thresholds.
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
            parse_options: ParseOptions::default(),
            classifier: Box::new(HeuristicClassifier::new()),
        }
    }

    /// Use custom thresholds for feature extraction and the heuristic classifier.
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.classifier = Box::new(HeuristicClassifier::with_config(config.clone()));
        self.config = config;
        self
    }

    /// Use custom PDF decoding options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Replace the classification strategy.
    pub fn with_classifier<C: Classifier + Send + Sync + 'static>(mut self, classifier: C) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Thresholds in use.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Decoding options in use.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    /// Classification strategy in use.
    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Per-line features of a document.
    pub fn features(&self, pages: &[PageRecord]) -> Vec<LineFeature> {
        analysis::extract_features(pages, &self.config)
    }

    /// Infer the outline of already-extracted lines.
    pub fn outline_lines(&self, lines: &[LineFeature], page_count: usize) -> DocumentOutline {
        let outline = self.classifier.classify(lines, page_count);
        log::debug!(
            "{} classifier: title {:?}, {} headings",
            self.classifier.name(),
            outline.title,
            outline.len()
        );
        outline
    }

    /// Infer the outline of a document from its page records.
    pub fn outline_pages(&self, pages: &[PageRecord]) -> DocumentOutline {
        let lines = self.features(pages);
        self.outline_lines(&lines, pages.len())
    }

    /// Load a PDF or page-record dump and infer its outline.
    pub fn outline_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentOutline> {
        let pages = load_page_records(path, &self.parse_options)?;
        Ok(self.outline_pages(&pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn heading_page() -> PageRecord {
        let mut page = PageRecord::letter(1);
        page.add_block(RawBlock::text(vec![RawLine::new(
            BBox::new(72.0, 60.0, 400.0, 84.0),
            vec![RawSpan::new("Quarterly Review", 24.0, "Helvetica-Bold")],
        )]));
        page
    }

    #[test]
    fn test_extract_outline_empty() {
        let outline = extract_outline(&[]);
        assert_eq!(outline.title, "");
        assert!(outline.outline.is_empty());
    }

    #[test]
    fn test_extract_outline_title_only() {
        let outline = extract_outline(&[heading_page()]);
        assert_eq!(outline.title, "Quarterly Review");
        assert!(outline.outline.is_empty());
    }

    #[test]
    fn test_load_page_dump_with_selection() {
        let pages = vec![heading_page(), PageRecord::letter(2), PageRecord::letter(3)];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&pages).unwrap().as_bytes())
            .unwrap();

        let options = ParseOptions::new().with_pages(PageSelection::Pages(vec![1, 3]));
        let loaded = load_page_records(file.path(), &options).unwrap();
        let numbers: Vec<u32> = loaded.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn test_load_unnumbered_dump() {
        let mut appendix = PageRecord::letter(1);
        appendix.add_block(RawBlock::text(vec![RawLine::new(
            BBox::new(72.0, 40.0, 400.0, 70.0),
            vec![RawSpan::new("Appendix Tables", 30.0, "Helvetica-Bold")],
        )]));
        let mut json = serde_json::to_value(vec![heading_page(), appendix]).unwrap();
        for page in json.as_array_mut().unwrap() {
            page.as_object_mut().unwrap().remove("number");
        }
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.to_string().as_bytes()).unwrap();

        let pages = load_page_records(file.path(), &ParseOptions::default()).unwrap();
        let numbers: Vec<u32> = pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2]);

        // The larger line on page 2 cannot take the title
        let outline = extract_outline(&pages);
        assert_eq!(outline.title, "Quarterly Review");
        assert!(outline.outline.iter().all(|entry| entry.page == 2));

        let options = ParseOptions::new().with_pages(PageSelection::Pages(vec![2]));
        let selected = load_page_records(file.path(), &options).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].number, 2);
    }

    #[test]
    fn test_load_rejects_unknown_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"plain text notes").unwrap();
        assert!(matches!(
            load_page_records(file.path(), &ParseOptions::default()),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_outliner_custom_classifier() {
        let outliner = Outliner::new().with_classifier(PredictorClassifier::new(
            |_: &analysis::ModelFeatures| {
                analysis::LinePrediction::new(analysis::LineLabel::Body, 0.0)
            },
        ));
        assert_eq!(outliner.classifier().name(), "predictor");
        assert_eq!(outliner.outline_pages(&[heading_page()]).title, UNTITLED);
    }
}
