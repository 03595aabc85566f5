//! pdfoutline CLI - PDF title and heading outline extraction

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{self, BatchOptions, DocumentStatus};
use pdfoutline::render::{to_json, JsonFormat};
use pdfoutline::{
    load_page_records, ClassifierConfig, FontReport, Outliner, PageSelection, ParseOptions,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer title and H1-H3 outline of PDF documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of one document
    Outline {
        /// Input PDF or page-record JSON dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Classifier thresholds as JSON
        #[arg(long, value_name = "FILE", env = "PDFOUTLINE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Extract outlines of every document in a directory
    Batch {
        /// Directory of PDFs and page-record dumps
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory receiving one JSON outline per document
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,

        /// Also write a font-style report as CSV
        #[arg(long, value_name = "FILE")]
        font_report: Option<PathBuf>,

        /// Classifier thresholds as JSON
        #[arg(long, value_name = "FILE", env = "PDFOUTLINE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Write the font-style report of one or more documents as CSV
    Fonts {
        /// Input PDFs or page-record JSON dumps
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump per-line features as JSON
    Features {
        /// Input PDF or page-record JSON dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            compact,
            pages,
            config,
        } => cmd_outline(
            &input,
            output.as_deref(),
            compact,
            pages.as_deref(),
            config.as_deref(),
        ),
        Commands::Batch {
            input,
            output,
            sequential,
            font_report,
            config,
        } => cmd_batch(&input, &output, sequential, font_report, config.as_deref()),
        Commands::Fonts { inputs, output } => cmd_fonts(&inputs, output.as_deref()),
        Commands::Features { input, output } => cmd_features(&input, output.as_deref()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<ClassifierConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            Ok(ClassifierConfig::from_json(&json)?)
        }
        None => Ok(ClassifierConfig::default()),
    }
}

fn parse_pages(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    match pages {
        Some(p) => Ok(PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?),
        None => Ok(PageSelection::All),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", content)?;
    }
    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;

    // Lenient so one undecodable page doesn't lose the whole outline
    let options = ParseOptions::new().lenient().with_pages(parse_pages(pages)?);
    let outliner = Outliner::new()
        .with_config(config)
        .with_parse_options(options);

    let mut outline = outliner.outline_file(input)?;
    outline.backfill_title(&file_stem(input));

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    write_or_print(output, &to_json(&outline, format)?)
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    sequential: bool,
    font_report: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = BatchOptions::new(input, output)
        .with_parallel(!sequential)
        .with_config(load_config(config)?)
        .with_parse_options(ParseOptions::new().lenient());
    if let Some(path) = font_report {
        options = options.with_font_report(path);
    }

    let total = batch::collect_inputs(input)?.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let summary = batch::run_with_progress(&options, |report| {
        pb.set_message(report.file.clone());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    println!("{}", "Batch Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for report in &summary.documents {
        match &report.status {
            DocumentStatus::Ok => println!(
                "  {} {} -> {} ({} headings, {} ms)",
                "✓".green(),
                report.file,
                report.output.as_deref().unwrap_or("-"),
                report.heading_count,
                report.elapsed_ms
            ),
            DocumentStatus::Failed(reason) => {
                println!("  {} {} ({})", "✗".red(), report.file, reason.dimmed())
            }
        }
    }
    println!();
    println!(
        "{} {} processed, {} failed, {} headings in {} ms",
        "Done!".green().bold(),
        summary.succeeded(),
        summary.failed(),
        summary.heading_count(),
        summary.elapsed_ms
    );
    println!("{}: {}", "Output".bold(), output.display());
    if let Some(path) = &options.font_report {
        println!("{}: {}", "Font report".bold(), path.display());
    }

    Ok(())
}

fn cmd_fonts(inputs: &[PathBuf], output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let options = ParseOptions::new().lenient();
    let outliner = Outliner::new();
    let mut report = FontReport::new();

    for input in inputs {
        let pages = load_page_records(input, &options)?;
        report.add_lines(&outliner.features(&pages));
    }

    match output {
        Some(path) => {
            report.write_csv(fs::File::create(path)?)?;
            println!(
                "{} {} ({} styles)",
                "Saved to".green(),
                path.display(),
                report.len()
            );
        }
        None => report.write_csv(std::io::stdout().lock())?,
    }

    Ok(())
}

fn cmd_features(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let pages = load_page_records(input, &ParseOptions::new().lenient())?;
    let lines = Outliner::new().features(&pages);
    write_or_print(output, &serde_json::to_string_pretty(&lines)?)
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline extraction tool");
    println!();
    println!("License: MIT");
}
