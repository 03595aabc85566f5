//! Batch outline extraction over a directory of documents.
//!
//! Every `*.pdf` and `*.json` (page-record dump) in the input directory is
//! processed independently and written to `<stem>.json` in the output
//! directory. Inputs sharing a stem keep their extension in the output name
//! (`report.pdf.json`, `report.json.json`). A document that fails to load
//! gets a placeholder outline and never stops the rest of the batch. Input
//! files are never overwritten.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::{extract_features, Classifier, ClassifierConfig, HeuristicClassifier};
use crate::error::{Error, Result};
use crate::load_page_records;
use crate::model::DocumentOutline;
use crate::parser::ParseOptions;
use crate::render::{write_json, JsonFormat};
use crate::report::SharedFontReport;

const INPUT_EXTENSIONS: [&str; 2] = ["pdf", "json"];

/// Batch run settings.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for inputs (not recursive)
    pub input_dir: PathBuf,
    /// Directory receiving `<stem>.json` outputs; created if missing
    pub output_dir: PathBuf,
    /// Process documents in parallel
    pub parallel: bool,
    /// Write a font-style report across the batch to this CSV path
    pub font_report: Option<PathBuf>,
    /// PDF decoding options
    pub parse_options: ParseOptions,
    /// Classifier thresholds
    pub config: ClassifierConfig,
}

impl BatchOptions {
    /// Parallel run with default settings and no font report.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            parallel: true,
            font_report: None,
            parse_options: ParseOptions::default(),
            config: ClassifierConfig::default(),
        }
    }

    /// Process documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Write a font-style report to `path`.
    pub fn with_font_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_report = Some(path.into());
        self
    }

    /// Set PDF decoding options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set classifier thresholds.
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }
}

/// Outcome of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "lowercase")]
pub enum DocumentStatus {
    Ok,
    Failed(String),
}

/// Per-document result of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    /// Input file name
    pub file: String,
    #[serde(flatten)]
    pub status: DocumentStatus,
    /// Output file name, `None` when nothing was written
    pub output: Option<String>,
    /// Headings written (zero for failed documents)
    pub heading_count: usize,
    pub elapsed_ms: u64,
}

impl DocumentReport {
    pub fn is_ok(&self) -> bool {
        self.status == DocumentStatus::Ok
    }
}

/// Result of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    /// One report per input, in input order
    pub documents: Vec<DocumentReport>,
    pub elapsed_ms: u64,
}

impl BatchSummary {
    /// Documents processed successfully.
    pub fn succeeded(&self) -> usize {
        self.documents.iter().filter(|d| d.is_ok()).count()
    }

    /// Documents that fell back to a placeholder outline.
    pub fn failed(&self) -> usize {
        self.documents.len() - self.succeeded()
    }

    /// Headings written across the batch.
    pub fn heading_count(&self) -> usize {
        self.documents.iter().map(|d| d.heading_count).sum()
    }
}

/// Input files of a batch run, sorted by name.
pub fn collect_inputs(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(Error::Other(format!(
            "Input directory not found: {}",
            input_dir.display()
        )));
    }

    let mut inputs = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && has_input_extension(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Output file name for each input, in input order.
///
/// Stems are compared case-insensitively. A name still claimed by an
/// earlier input after disambiguation maps to `None`.
pub fn output_names(inputs: &[PathBuf]) -> Vec<Option<String>> {
    let mut stems: HashMap<String, usize> = HashMap::new();
    for path in inputs {
        *stems.entry(stem_key(path)).or_default() += 1;
    }

    let mut claimed = HashSet::new();
    inputs
        .iter()
        .map(|path| {
            let name = if stems[&stem_key(path)] > 1 {
                format!("{}.json", lossy(path.file_name()))
            } else {
                format!("{}.json", lossy(path.file_stem()))
            };
            claimed.insert(name.to_lowercase()).then_some(name)
        })
        .collect()
}

fn stem_key(path: &Path) -> String {
    lossy(path.file_stem()).to_lowercase()
}

fn lossy(part: Option<&std::ffi::OsStr>) -> String {
    part.map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            INPUT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Run a batch.
pub fn run(options: &BatchOptions) -> Result<BatchSummary> {
    run_with_progress(options, |_| {})
}

/// Run a batch, calling `on_done` after each document.
///
/// `on_done` may be called from worker threads.
pub fn run_with_progress<F>(options: &BatchOptions, on_done: F) -> Result<BatchSummary>
where
    F: Fn(&DocumentReport) + Sync,
{
    options.config.validate()?;
    let inputs = collect_inputs(&options.input_dir)?;
    fs::create_dir_all(&options.output_dir)?;

    log::info!(
        "Processing {} documents from {}",
        inputs.len(),
        options.input_dir.display()
    );

    let start = Instant::now();
    let classifier = HeuristicClassifier::with_config(options.config.clone());
    let fonts = options.font_report.as_ref().map(|_| SharedFontReport::new());

    let output_dir = fs::canonicalize(&options.output_dir)?;
    let protected: HashSet<PathBuf> = inputs
        .iter()
        .filter_map(|path| fs::canonicalize(path).ok())
        .collect();
    let targets: Vec<Target> = inputs
        .iter()
        .zip(output_names(&inputs))
        .map(|(path, name)| Target {
            input: path,
            output: name.map(|name| output_dir.join(name)),
        })
        .collect();

    let process = |target: &Target| {
        let report = process_document(target, &protected, options, &classifier, fonts.as_ref());
        on_done(&report);
        report
    };

    let documents: Vec<DocumentReport> = if options.parallel {
        targets.par_iter().map(process).collect()
    } else {
        targets.iter().map(process).collect()
    };

    if let (Some(path), Some(fonts)) = (&options.font_report, fonts) {
        let file = fs::File::create(path)?;
        fonts.into_inner().write_csv(file)?;
        log::info!("Font report written to {}", path.display());
    }

    let summary = BatchSummary {
        documents,
        elapsed_ms: start.elapsed().as_millis() as u64,
    };
    log::info!(
        "Batch done: {} ok, {} failed, {} headings in {} ms",
        summary.succeeded(),
        summary.failed(),
        summary.heading_count(),
        summary.elapsed_ms
    );

    Ok(summary)
}

struct Target<'a> {
    input: &'a Path,
    output: Option<PathBuf>,
}

fn process_document(
    target: &Target,
    protected: &HashSet<PathBuf>,
    options: &BatchOptions,
    classifier: &HeuristicClassifier,
    fonts: Option<&SharedFontReport>,
) -> DocumentReport {
    let start = Instant::now();
    let path = target.input;
    let file = lossy(path.file_name());
    let stem = lossy(path.file_stem());

    let output = match &target.output {
        Some(output) if protected.contains(output) => Err(format!(
            "Output {} would overwrite an input file",
            output.display()
        )),
        Some(output) => Ok(output),
        None => Err(format!("Output name for {} is already taken", file)),
    };
    let output = match output {
        Ok(output) => output,
        Err(reason) => {
            log::warn!("Skipping {}: {}", file, reason);
            return DocumentReport {
                file,
                status: DocumentStatus::Failed(reason),
                output: None,
                heading_count: 0,
                elapsed_ms: start.elapsed().as_millis() as u64,
            };
        }
    };

    let (mut outline, status) = match outline_document(path, options, classifier, fonts) {
        Ok(outline) => (outline, DocumentStatus::Ok),
        Err(e) => {
            log::warn!("Failed to process {}: {}", file, e);
            (DocumentOutline::untitled(), DocumentStatus::Failed(e.to_string()))
        }
    };

    if status == DocumentStatus::Ok {
        outline.backfill_title(&stem);
    }

    let (status, written) = match write_output(output, &outline) {
        Ok(()) => (status, Some(lossy(output.file_name()))),
        Err(e) => {
            log::warn!("Failed to write {}: {}", output.display(), e);
            (DocumentStatus::Failed(e.to_string()), None)
        }
    };

    let heading_count = match status {
        DocumentStatus::Ok => outline.len(),
        DocumentStatus::Failed(_) => 0,
    };

    DocumentReport {
        file,
        status,
        output: written,
        heading_count,
        elapsed_ms: start.elapsed().as_millis() as u64,
    }
}

fn outline_document(
    path: &Path,
    options: &BatchOptions,
    classifier: &HeuristicClassifier,
    fonts: Option<&SharedFontReport>,
) -> Result<DocumentOutline> {
    let pages = load_page_records(path, &options.parse_options)?;
    let lines = extract_features(&pages, &options.config);
    if let Some(fonts) = fonts {
        fonts.add_lines(&lines);
    }
    Ok(classifier.classify(&lines, pages.len()))
}

fn write_output(path: &Path, outline: &DocumentOutline) -> Result<()> {
    let file = fs::File::create(path)?;
    write_json(outline, JsonFormat::Pretty, std::io::BufWriter::new(file))
}
