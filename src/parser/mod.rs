//! PDF parsing module.
//!
//! Produces [`PageRecord`](crate::model::PageRecord)s from PDF files for the
//! analysis pipeline.

mod layout;
mod options;
mod pdf_parser;

pub use options::{ErrorMode, PageSelection, ParseOptions};
pub use pdf_parser::PdfParser;
