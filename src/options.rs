//! Extraction options.
//!
//! Every knob lives in one struct built through an infallible builder, so
//! callers set only what they care about and the defaults track the wire
//! formats. The defaults cover the standard layouts; the overrides exist for
//! containers produced by non-conforming writers (e.g. a document entry at a
//! vendor-specific path).

use once_cell::sync::Lazy;
use regex::Regex;

/// Default name of the document payload entry inside a document container.
pub const DEFAULT_DOCUMENT_ENTRY: &str = "word/document.xml";

/// Default name of the HTML payload entry inside a note bundle.
pub const DEFAULT_NOTE_ENTRY: &str = "index.html";

/// Default pattern matching slide entries inside a presentation container.
///
/// Unanchored: matches `ppt/slides/slide1.xml` as well as bare
/// `slides/slide1.xml`. Matching entries are taken in archive directory
/// order — the numeric suffix is never used for sorting.
pub const DEFAULT_SLIDE_PATTERN: &str = r"slides/slide(\d+)\.xml";

static SLIDE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_SLIDE_PATTERN).unwrap());

/// Options for an extraction call.
///
/// # Example
/// ```rust
/// use doc2text::ExtractOptions;
///
/// let options = ExtractOptions::builder()
///     .document_entry("word/document2.xml")
///     .build();
/// assert_eq!(options.document_entry, "word/document2.xml");
/// ```
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Entry name holding the document XML. Default: `word/document.xml`.
    pub document_entry: String,

    /// Entry name holding the note HTML. Default: `index.html`.
    pub note_entry: String,

    /// Pattern selecting slide entries. Default: `slides/slide(\d+)\.xml`.
    pub slide_pattern: Regex,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            document_entry: DEFAULT_DOCUMENT_ENTRY.to_string(),
            note_entry: DEFAULT_NOTE_ENTRY.to_string(),
            slide_pattern: SLIDE_PATTERN.clone(),
        }
    }
}

impl ExtractOptions {
    /// Create a new builder.
    pub fn builder() -> ExtractOptionsBuilder {
        ExtractOptionsBuilder {
            options: Self::default(),
        }
    }
}

/// Builder for [`ExtractOptions`].
#[derive(Debug)]
pub struct ExtractOptionsBuilder {
    options: ExtractOptions,
}

impl ExtractOptionsBuilder {
    pub fn document_entry(mut self, name: impl Into<String>) -> Self {
        self.options.document_entry = name.into();
        self
    }

    pub fn note_entry(mut self, name: impl Into<String>) -> Self {
        self.options.note_entry = name.into();
        self
    }

    pub fn slide_pattern(mut self, pattern: Regex) -> Self {
        self.options.slide_pattern = pattern;
        self
    }

    pub fn build(self) -> ExtractOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_wire_formats() {
        let o = ExtractOptions::default();
        assert_eq!(o.document_entry, "word/document.xml");
        assert_eq!(o.note_entry, "index.html");
        assert!(o.slide_pattern.is_match("ppt/slides/slide12.xml"));
        assert!(o.slide_pattern.is_match("slides/slide1.xml"));
        assert!(!o.slide_pattern.is_match("slides/slideMaster1.xml"));
        assert!(!o.slide_pattern.is_match("notesSlides/notesSlide1.xml"));
    }

    #[test]
    fn builder_overrides_stick() {
        let o = ExtractOptions::builder()
            .note_entry("note/body.html")
            .build();
        assert_eq!(o.note_entry, "note/body.html");
        assert_eq!(o.document_entry, "word/document.xml");
    }
}
