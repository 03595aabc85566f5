//! PDF page-record producer using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::model::PageRecord;

use super::layout::PageLayout;
use super::options::{ErrorMode, ParseOptions};

/// US Letter, used when a page has no usable MediaBox.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// PDF document parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        detect_format_from_path(path)?;

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc, options)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_format_from_bytes(data)?;

        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc, options)
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_document(doc: LopdfDocument, options: ParseOptions) -> Result<Self> {
        // Still encrypted after load: content streams would decode to garbage
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc, options })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Read every selected page into a page record, in page order.
    ///
    /// In lenient mode a page that fails to decode is logged and skipped;
    /// in strict mode the first failure is returned.
    pub fn page_records(&self) -> Result<Vec<PageRecord>> {
        let layout = PageLayout::new(&self.doc);
        let pages = self.doc.get_pages();
        let mut records = Vec::with_capacity(pages.len());

        for (&number, &page_id) in pages.iter() {
            if !self.options.pages.includes(number) {
                continue;
            }

            let (width, height) = self.page_dimensions(page_id);
            match layout.page_record(number, page_id, width, height) {
                Ok(record) => records.push(record),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping page {}: {}", number, e);
                }
                Err(e) => return Err(e),
            }
        }

        log::debug!(
            "Read {} of {} pages",
            records.len(),
            pages.len()
        );

        Ok(records)
    }

    /// Read a single page (1-indexed).
    pub fn page_record(&self, number: u32) -> Result<PageRecord> {
        let pages = self.doc.get_pages();
        let page_id = *pages
            .get(&number)
            .ok_or(Error::PageOutOfRange(number, pages.len() as u32))?;

        let (width, height) = self.page_dimensions(page_id);
        PageLayout::new(&self.doc).page_record(number, page_id, width, height)
    }

    /// MediaBox width and height, inherited through the page tree.
    fn page_dimensions(&self, page_id: ObjectId) -> (f32, f32) {
        let mut current = Some(page_id);
        // Bounded walk: malformed trees can contain parent cycles
        for _ in 0..32 {
            let Some(id) = current else { break };
            let Ok(dict) = self.doc.get_dictionary(id) else {
                break;
            };

            if let Some(size) = dict
                .get(b"MediaBox")
                .ok()
                .and_then(|obj| self.resolve(obj).as_array().ok())
                .and_then(|array| media_box_size(array))
            {
                return size;
            }

            current = dict.get(b"Parent").and_then(Object::as_reference).ok();
        }

        DEFAULT_PAGE_SIZE
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(obj),
            _ => obj,
        }
    }
}

fn media_box_size(array: &[Object]) -> Option<(f32, f32)> {
    if array.len() < 4 {
        return None;
    }
    let mut values = [0.0f32; 4];
    for (slot, obj) in values.iter_mut().zip(array) {
        *slot = obj.as_float().ok()?;
    }
    let width = (values[2] - values[0]).abs();
    let height = (values[3] - values[1]).abs();
    (width > 0.0 && height > 0.0).then_some((width, height))
}
