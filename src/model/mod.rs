//! Data model for outline inference.
//!
//! Raw page records come in from a text extractor, line features are the
//! unit the heading engine reasons about, and the outline is what comes out.

mod feature;
mod outline;
mod page;

pub use feature::LineFeature;
pub use outline::{DocumentOutline, HeadingLevel, OutlineEntry, UNTITLED};
pub use page::{BBox, BlockKind, PageRecord, RawBlock, RawLine, RawSpan};
