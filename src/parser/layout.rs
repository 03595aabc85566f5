//! Positioned text extraction from PDF content streams.
//!
//! Interprets the text and color operators of a page's content stream into
//! spans, groups spans into lines by baseline and lines into blocks by
//! spacing, and emits a [`PageRecord`] in top-left page coordinates.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::{BBox, PageRecord, RawBlock, RawLine, RawSpan};

/// Average glyph advance as a fraction of the font size, used when glyph
/// widths are not read from the font.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Ascender and descender as fractions of the font size.
const ASCENT: f32 = 0.8;
const DESCENT: f32 = 0.2;

/// A run of text shown by one operator, in PDF user space (bottom-up y).
#[derive(Debug, Clone)]
pub(crate) struct TextSpan {
    pub text: String,
    /// Left edge
    pub x: f32,
    /// Baseline
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
    pub font_name: String,
    /// Fill color (0xRRGGBB)
    pub color: u32,
}

impl TextSpan {
    fn top(&self) -> f32 {
        self.y + self.font_size * ASCENT
    }

    fn bottom(&self) -> f32 {
        self.y - self.font_size * DESCENT
    }
}

/// Spans sharing a baseline, sorted by x.
#[derive(Debug, Clone)]
pub(crate) struct TextLine {
    pub spans: Vec<TextSpan>,
    /// Baseline of the first span
    pub y: f32,
    /// Leftmost x
    pub x: f32,
    /// Largest font size on the line
    pub font_size: f32,
}

impl TextLine {
    fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        let y = spans.first().map_or(0.0, |s| s.y);
        let x = spans.first().map_or(0.0, |s| s.x);
        let font_size = spans.iter().map(|s| s.font_size).fold(0.0, f32::max);

        Self {
            spans,
            y,
            x,
            font_size,
        }
    }

    /// Convert to a raw line in top-left coordinates, inserting word spaces
    /// where spans are separated by a visible gap.
    fn into_raw(self, page_height: f32) -> RawLine {
        let x0 = self.x;
        let x1 = self
            .spans
            .iter()
            .map(|s| s.x + s.width)
            .fold(x0, f32::max);
        let top = self.spans.iter().map(TextSpan::top).fold(f32::MIN, f32::max);
        let bottom = self
            .spans
            .iter()
            .map(TextSpan::bottom)
            .fold(f32::MAX, f32::min);
        let bbox = BBox::new(x0, page_height - top, x1, page_height - bottom);

        let mut raw_spans: Vec<RawSpan> = Vec::with_capacity(self.spans.len());
        let mut prev: Option<&TextSpan> = None;
        for span in &self.spans {
            let mut text = span.text.clone();
            if let Some(prev) = prev {
                if needs_space(prev, span) {
                    text.insert(0, ' ');
                }
            }
            raw_spans.push(
                RawSpan::new(text, span.font_size, span.font_name.clone()).with_color(span.color),
            );
            prev = Some(span);
        }

        RawLine::new(bbox, raw_spans)
    }
}

/// Whether a word space belongs between two adjacent spans.
fn needs_space(prev: &TextSpan, curr: &TextSpan) -> bool {
    let gap = curr.x - (prev.x + prev.width);

    let char_count = curr.text.chars().count();
    let avg_char_width = if char_count > 0 && curr.width > 0.0 {
        curr.width / char_count as f32
    } else {
        curr.font_size * AVG_GLYPH_WIDTH
    };
    if gap <= avg_char_width * 0.2 {
        return false;
    }

    let prev_last = prev.text.chars().last();
    let curr_first = curr.text.chars().next();
    if prev_last.is_some_and(char::is_whitespace) || curr_first.is_some_and(char::is_whitespace) {
        return false;
    }

    let both_spaceless = prev_last.is_some_and(is_spaceless_script_char)
        && curr_first.is_some_and(is_spaceless_script_char);
    !both_spaceless
}

/// Affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f32; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn translation(tx: f32, ty: f32) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        let mut m = [0.0; 6];
        for (slot, obj) in m.iter_mut().zip(operands) {
            *slot = get_number(obj)?;
        }
        Some(Matrix(m))
    }

    /// `self × other`
    fn then(&self, other: &Matrix) -> Matrix {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Matrix([
            a1 * a2 + b1 * c2,
            a1 * b2 + b1 * d2,
            c1 * a2 + d1 * c2,
            c1 * b2 + d1 * d2,
            e1 * a2 + f1 * c2 + e2,
            e1 * b2 + f1 * d2 + f2,
        ])
    }

    fn origin(&self) -> (f32, f32) {
        (self.0[4], self.0[5])
    }

    /// Vertical scale factor.
    fn vertical_scale(&self) -> f32 {
        (self.0[2] * self.0[2] + self.0[3] * self.0[3]).sqrt()
    }

    /// Horizontal scale factor.
    fn horizontal_scale(&self) -> f32 {
        (self.0[0] * self.0[0] + self.0[1] * self.0[1]).sqrt()
    }
}

/// Text object state: text matrix, line matrix and leading.
#[derive(Debug, Clone)]
struct TextState {
    matrix: Matrix,
    line_matrix: Matrix,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            leading: 0.0,
        }
    }
}

impl TextState {
    fn begin(&mut self) {
        self.matrix = Matrix::IDENTITY;
        self.line_matrix = Matrix::IDENTITY;
    }

    fn set(&mut self, m: Matrix) {
        self.matrix = m;
        self.line_matrix = m;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
        self.matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    /// Move the text position along the baseline after showing text.
    fn advance(&mut self, tx: f32) {
        self.matrix = Matrix::translation(tx, 0.0).then(&self.matrix);
    }
}

/// Graphics state saved by `q` and restored by `Q`.
#[derive(Debug, Clone, Copy)]
struct GraphicsState {
    ctm: Matrix,
    fill: u32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            fill: 0,
        }
    }
}

/// Font resource name -> base font name.
#[derive(Debug, Clone)]
struct FontInfo {
    name: String,
}

/// Page text extraction bound to one loaded document.
pub(crate) struct PageLayout<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> PageLayout<'a> {
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Build the page record for one page.
    pub fn page_record(
        &self,
        number: u32,
        page_id: ObjectId,
        width: f32,
        height: f32,
    ) -> Result<PageRecord> {
        let spans = self.extract_page_spans(page_id)?;
        let lines = group_spans_into_lines(spans);

        let mut page = PageRecord::new(number, width, height);
        for block_lines in group_lines_into_blocks(lines) {
            let raw_lines = block_lines
                .into_iter()
                .map(|line| line.into_raw(height))
                .collect();
            page.add_block(RawBlock::text(raw_lines));
        }

        log::debug!("Page {}: {} text blocks", number, page.blocks.len());

        Ok(page)
    }

    /// Extract positioned spans from a page.
    pub fn extract_page_spans(&self, page_id: ObjectId) -> Result<Vec<TextSpan>> {
        let lopdf_fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut fonts = HashMap::new();
        for (name, font) in &lopdf_fonts {
            let base_font = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| strip_subset_prefix(&String::from_utf8_lossy(n)).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            fonts.insert(name.clone(), FontInfo { name: base_font });
        }

        let content = self.get_page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }
        self.parse_content_stream(&content, &fonts, &lopdf_fonts)
    }

    /// Concatenated, decompressed content streams of a page. Empty when the
    /// page has no contents.
    fn get_page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => Ok(stream_data(s)),
                Ok(Object::Array(arr)) => Ok(self.concat_streams(arr)),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            },
            Object::Array(arr) => Ok(self.concat_streams(arr)),
            Object::Stream(s) => Ok(stream_data(s)),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in refs {
            if let Object::Reference(r) = obj {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    content.extend_from_slice(&stream_data(s));
                    content.push(b' ');
                }
            }
        }
        content
    }

    fn parse_content_stream(
        &self,
        content: &[u8],
        fonts: &HashMap<Vec<u8>, FontInfo>,
        lopdf_fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> Result<Vec<TextSpan>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut gs = GraphicsState::default();
        let mut gs_stack: Vec<GraphicsState> = Vec::new();
        let mut text = TextState::default();
        let mut in_text_block = false;
        let mut current_font = String::new();
        let mut current_font_key: Vec<u8> = Vec::new();
        let mut current_font_size: f32 = 12.0;

        for op in content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "q" => gs_stack.push(gs),
                "Q" => {
                    if let Some(saved) = gs_stack.pop() {
                        gs = saved;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        gs.ctm = m.then(&gs.ctm);
                    }
                }
                "g" | "rg" | "k" | "sc" | "scn" => {
                    if let Some(color) = fill_color(operands) {
                        gs.fill = color;
                    }
                }
                "BT" => {
                    in_text_block = true;
                    text.begin();
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if operands.len() >= 2 {
                        if let Object::Name(key) = &operands[0] {
                            current_font_key = key.clone();
                            current_font = fonts
                                .get(key.as_slice())
                                .map(|info| info.name.clone())
                                .unwrap_or_else(|| String::from_utf8_lossy(key).to_string());
                        }
                        current_font_size = get_number(&operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        text.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if operands.len() >= 2 {
                        let tx = get_number(&operands[0]).unwrap_or(0.0);
                        let ty = get_number(&operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            text.leading = -ty;
                        }
                        text.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        text.set(m);
                    }
                }
                "T*" => text.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        text.next_line();
                    }
                    if !in_text_block {
                        continue;
                    }

                    let encoding = lopdf_fonts
                        .get(&current_font_key)
                        .and_then(|f| f.get_font_encoding(self.doc).ok());
                    let decode = |bytes: &[u8]| match encoding {
                        Some(ref enc) => LopdfDocument::decode_text(enc, bytes).unwrap_or_default(),
                        None => decode_text_simple(bytes),
                    };

                    let (shown, advance) = match op.operator.as_str() {
                        "TJ" => match operands.first() {
                            Some(Object::Array(items)) => {
                                show_array(items, current_font_size, &decode)
                            }
                            _ => (String::new(), 0.0),
                        },
                        "\"" => show_string(operands.get(2), current_font_size, &decode),
                        _ => show_string(operands.first(), current_font_size, &decode),
                    };

                    let rendering = text.matrix.then(&gs.ctm);
                    if !shown.trim().is_empty() {
                        let (x, y) = rendering.origin();
                        spans.push(TextSpan {
                            text: shown,
                            x,
                            y,
                            width: advance * rendering.horizontal_scale(),
                            font_size: current_font_size * rendering.vertical_scale(),
                            font_name: current_font.clone(),
                            color: gs.fill,
                        });
                    }
                    text.advance(advance);
                }
                _ => {}
            }
        }

        Ok(spans)
    }
}

/// Decompressed stream content; unfiltered streams are returned as stored.
fn stream_data(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

/// Decode a single shown string; returns the text and its estimated advance
/// in unscaled text space.
fn show_string<F>(operand: Option<&Object>, font_size: f32, decode: &F) -> (String, f32)
where
    F: Fn(&[u8]) -> String,
{
    match operand {
        Some(Object::String(bytes, _)) => {
            let text = decode(bytes);
            let advance = text.chars().count() as f32 * font_size * AVG_GLYPH_WIDTH;
            (text, advance)
        }
        _ => (String::new(), 0.0),
    }
}

/// Decode a `TJ` array. Large negative adjustments are word breaks.
fn show_array<F>(items: &[Object], font_size: f32, decode: &F) -> (String, f32)
where
    F: Fn(&[u8]) -> String,
{
    // Adjustments are in thousandths of text space units
    const SPACE_THRESHOLD: f32 = 200.0;

    let mut combined = String::new();
    let mut advance = 0.0;

    for item in items {
        match item {
            Object::String(bytes, _) => {
                let decoded = decode(bytes);
                advance += decoded.chars().count() as f32 * font_size * AVG_GLYPH_WIDTH;
                combined.push_str(&decoded);
            }
            Object::Integer(_) | Object::Real(_) => {
                let adjustment = get_number(item).map_or(0.0, |n| -n);
                advance += adjustment / 1000.0 * font_size;
                let breaks_word = adjustment > SPACE_THRESHOLD
                    && combined
                        .chars()
                        .last()
                        .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                if breaks_word {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }

    (combined, advance)
}

/// Fill color from `g`, `rg`, `k`, `sc` or `scn` operands, by component count.
fn fill_color(operands: &[Object]) -> Option<u32> {
    let components: Vec<f32> = operands.iter().filter_map(get_number).collect();
    let (r, g, b) = match components.as_slice() {
        [gray] => (*gray, *gray, *gray),
        [r, g, b] => (*r, *g, *b),
        [c, m, y, k] => ((1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k)),
        _ => return None,
    };
    Some((channel(r) << 16) | (channel(g) << 8) | channel(b))
}

fn channel(value: f32) -> u32 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u32
}

/// Group spans into lines by baseline, within 30% of the font size.
pub(crate) fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    // PDF y grows upwards: top of page first, then left to right
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<TextLine> = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * 0.3;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(TextLine::from_spans(std::mem::take(&mut current)));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(TextLine::from_spans(current));
    }

    lines
}

/// Group consecutive lines into blocks, breaking on wide spacing, a font
/// size change or an indentation change.
pub(crate) fn group_lines_into_blocks(lines: Vec<TextLine>) -> Vec<Vec<TextLine>> {
    let avg_spacing = average_line_spacing(&lines);

    let mut blocks: Vec<Vec<TextLine>> = Vec::new();
    for line in lines {
        match blocks.last_mut() {
            Some(block)
                if block
                    .last()
                    .is_some_and(|prev| !should_break_block(prev, &line, avg_spacing)) =>
            {
                block.push(line)
            }
            _ => blocks.push(vec![line]),
        }
    }
    blocks
}

fn average_line_spacing(lines: &[TextLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break_block(prev: &TextLine, curr: &TextLine, avg_spacing: f32) -> bool {
    (prev.y - curr.y).abs() > avg_spacing * 1.5
        || (prev.font_size - curr.font_size).abs() > 1.0
        || (prev.x - curr.x).abs() > 20.0
}

/// "ABCDEF+Arial-BoldMT" -> "Arial-BoldMT"
fn strip_subset_prefix(name: &str) -> &str {
    match name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.chars().all(|c| c.is_ascii_uppercase()) => rest,
        _ => name,
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Scripts written without word spaces (Han, kana, CJK punctuation).
/// Hangul is excluded since Korean uses word spaces.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        || (0x3040..=0x309F).contains(&code)
        || (0x30A0..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}

/// Fallback decoding when the font has no usable encoding: UTF-16BE with
/// BOM, then UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, y: f32, size: f32) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            x,
            y,
            width: text.chars().count() as f32 * size * AVG_GLYPH_WIDTH,
            font_size: size,
            font_name: "Helvetica".to_string(),
            color: 0,
        }
    }

    #[test]
    fn test_line_grouping_tolerates_baseline_jitter() {
        let lines = group_spans_into_lines(vec![
            span("world", 130.0, 700.0, 12.0),
            span("Hello", 72.0, 701.5, 12.0),
            span("Next line", 72.0, 680.0, 12.0),
        ]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].text, "Hello");
        assert_eq!(lines[0].spans[1].text, "world");
    }

    #[test]
    fn test_raw_line_inserts_word_space() {
        let line = TextLine::from_spans(vec![
            span("Hello", 72.0, 700.0, 12.0),
            span("world", 120.0, 700.0, 12.0),
        ]);
        let raw = line.into_raw(792.0);
        let text: String = raw.spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "Hello world");
        // Top-left coordinates: baseline 700 with 12pt text
        assert!((raw.bbox.y0 - (792.0 - 709.6)).abs() < 0.01);
        assert!((raw.bbox.y1 - (792.0 - 697.6)).abs() < 0.01);
    }

    #[test]
    fn test_no_space_between_adjacent_cjk() {
        let line = TextLine::from_spans(vec![
            span("概", 72.0, 700.0, 12.0),
            span("要", 90.0, 700.0, 12.0),
        ]);
        let raw = line.into_raw(792.0);
        let text: String = raw.spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "概要");
    }

    #[test]
    fn test_block_breaks() {
        let lines = group_spans_into_lines(vec![
            span("Heading", 72.0, 720.0, 18.0),
            span("Body one", 72.0, 690.0, 11.0),
            span("Body two", 72.0, 677.0, 11.0),
            span("Body three", 72.0, 664.0, 11.0),
            span("Indented", 120.0, 651.0, 11.0),
        ]);
        let blocks = group_lines_into_blocks(lines);
        let sizes: Vec<_> = blocks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![1, 3, 1]);
    }

    #[test]
    fn test_fill_colors() {
        assert_eq!(fill_color(&[Object::Real(0.0)]), Some(0x000000));
        assert_eq!(fill_color(&[Object::Integer(1)]), Some(0xFFFFFF));
        assert_eq!(
            fill_color(&[Object::Real(1.0), Object::Real(0.0), Object::Real(0.0)]),
            Some(0xFF0000)
        );
        assert_eq!(
            fill_color(&[
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(1.0)
            ]),
            Some(0x000000)
        );
        assert_eq!(fill_color(&[Object::Name(b"P0".to_vec())]), None);
    }

    #[test]
    fn test_matrix_composition() {
        let tm = Matrix([2.0, 0.0, 0.0, 2.0, 10.0, 20.0]);
        let ctm = Matrix::translation(100.0, 200.0);
        let rendering = tm.then(&ctm);
        assert_eq!(rendering.origin(), (110.0, 220.0));
        assert_eq!(rendering.vertical_scale(), 2.0);
    }

    #[test]
    fn test_text_state_line_moves() {
        let mut state = TextState::default();
        state.set(Matrix::translation(72.0, 700.0));
        state.advance(50.0);
        state.leading = 14.0;
        state.next_line();
        // Next line starts from the line origin, not the advanced position
        assert_eq!(state.matrix.origin(), (72.0, 686.0));
    }

    #[test]
    fn test_tj_array_word_breaks() {
        let items = vec![
            Object::string_literal("Annual"),
            Object::Integer(-250),
            Object::string_literal("Report"),
            Object::Integer(-30),
            Object::string_literal("s"),
        ];
        let (text, _) = show_array(&items, 12.0, &|b: &[u8]| decode_text_simple(b));
        assert_eq!(text, "Annual Reports");
    }

    #[test]
    fn test_subset_prefix() {
        assert_eq!(strip_subset_prefix("ABCDEF+Arial-BoldMT"), "Arial-BoldMT");
        assert_eq!(strip_subset_prefix("Helvetica"), "Helvetica");
        assert_eq!(strip_subset_prefix("My+Font"), "My+Font");
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x41]), "A");
        assert_eq!(decode_text_simple(&[0xE9]), "é");
    }
}
