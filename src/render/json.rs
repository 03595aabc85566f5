//! JSON rendering for document outlines.

use std::io::Write;

use crate::error::{Error, Result};
use crate::model::DocumentOutline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to `{"title": ..., "outline": [...]}`.
///
/// Non-ASCII text is written verbatim, not escaped.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(outline),
        JsonFormat::Compact => serde_json::to_string(outline),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write an outline as JSON to a writer.
pub fn write_json<W: Write>(
    outline: &DocumentOutline,
    format: JsonFormat,
    mut writer: W,
) -> Result<()> {
    let json = to_json(outline, format)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    fn sample() -> DocumentOutline {
        DocumentOutline::new(
            "Rapport annuel",
            vec![
                OutlineEntry::new(HeadingLevel::H1, "Résumé", 1),
                OutlineEntry::new(HeadingLevel::H2, "概要", 2),
            ],
        )
    }

    #[test]
    fn test_to_json_compact_shape() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Rapport annuel","outline":[{"level":"H1","text":"Résumé","page":1},{"level":"H2","text":"概要","page":2}]}"#
        );
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"概要\""));
        let title_pos = json.find("\"title\"").unwrap();
        let outline_pos = json.find("\"outline\"").unwrap();
        assert!(title_pos < outline_pos);
    }

    #[test]
    fn test_empty_outline() {
        let json = to_json(&DocumentOutline::untitled(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"Untitled Document","outline":[]}"#);
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        write_json(&sample(), JsonFormat::Compact, &mut buf).unwrap();
        assert!(buf.ends_with(b"}\n"));
    }
}
