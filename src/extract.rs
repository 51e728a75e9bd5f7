//! Extraction entry points, one per supported container shape.
//!
//! Every function runs synchronously to completion on the calling thread
//! and owns all of its intermediate state, so concurrent extractions of
//! distinct documents on distinct threads are safe by construction. Either
//! the complete unit set comes back or an error does — never a partial
//! result.

use crate::error::ExtractError;
use crate::options::ExtractOptions;
use crate::output::{assemble, TextUnit};
use crate::pipeline::container::Container;
use crate::pipeline::xml::{is_junk, Fragment, Fragments};
use crate::pipeline::{charset, html};
use std::io::{BufReader, Read, Seek};
use tracing::{debug, info};

/// Extract paragraph units from a zip-packaged XML document container.
///
/// Opens the document entry (`word/document.xml` by default), streams its
/// run/paragraph fragments, and groups them per top-level paragraph. Runs
/// that are empty, whitespace-only, or non-breaking-space-only are dropped;
/// paragraphs left with no runs produce no unit.
///
/// # Errors
/// [`ExtractError::Archive`] for a corrupt container,
/// [`ExtractError::EntryNotFound`] when the document entry is absent, and
/// [`ExtractError::Decode`] for a malformed token stream.
pub fn extract_document<R: Read + Seek>(
    source: R,
    options: &ExtractOptions,
) -> Result<Vec<TextUnit>, ExtractError> {
    let mut container = Container::open(source)?;
    let entry = container.open_entry(&options.document_entry)?;
    let fragments = Fragments::new(BufReader::new(entry), options.document_entry.as_str());

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    for fragment in fragments {
        match fragment? {
            Fragment::Break => {
                if !current.is_empty() {
                    paragraphs.push(std::mem::take(&mut current));
                }
            }
            Fragment::Text(text) => {
                if !is_junk(&text) {
                    current.push_str(&text);
                    current.push('\n');
                }
            }
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    info!("extracted {} paragraph units", paragraphs.len());
    Ok(assemble(paragraphs))
}

/// Extract one unit per slide from a presentation container.
///
/// Slide entries are selected by name pattern and consumed in zip
/// central-directory order — an archive written as `slide1, slide3,
/// slide2` yields units in exactly that order. Within a slide, text runs
/// are concatenated and paragraph boundaries become literal newlines;
/// slides left with no content are skipped before positions are assigned.
pub fn extract_slides<R: Read + Seek>(
    source: R,
    options: &ExtractOptions,
) -> Result<Vec<TextUnit>, ExtractError> {
    let mut container = Container::open(source)?;
    let names = container.matching_entry_names(&options.slide_pattern)?;
    debug!("found {} slide entries", names.len());

    let mut slides: Vec<String> = Vec::new();
    for name in &names {
        let entry = container.open_entry(name)?;
        let fragments = Fragments::new(BufReader::new(entry), name.as_str());

        let mut content = String::new();
        for fragment in fragments {
            match fragment? {
                Fragment::Break => content.push('\n'),
                Fragment::Text(text) => {
                    if !is_junk(&text) {
                        content.push_str(&text);
                    }
                }
            }
        }
        if !content.is_empty() {
            slides.push(content);
        }
    }

    info!("extracted {} slide units", slides.len());
    Ok(assemble(slides))
}

/// Extract a zipped HTML note bundle into a single rendered unit.
///
/// Opens the note entry (`index.html` by default), normalizes its encoding
/// to UTF-8, and renders the HTML tree to layout-preserving plain text.
pub fn extract_note<R: Read + Seek>(
    source: R,
    options: &ExtractOptions,
) -> Result<Vec<TextUnit>, ExtractError> {
    let mut container = Container::open(source)?;
    let entry = container.open_entry(&options.note_entry)?;
    let markup = charset::normalize_to_utf8(entry)?;
    let text = html::render(&markup);

    info!("rendered note entry '{}' to {} bytes", options.note_entry, text.len());
    Ok(assemble(vec![text]))
}

/// Render a raw HTML byte stream to layout-preserving plain text.
///
/// The un-containered path: encoding normalization straight into the HTML
/// renderer. Returns the rendered string rather than positioned units.
pub fn extract_html<R: Read>(source: R) -> Result<String, ExtractError> {
    let markup = charset::normalize_to_utf8(source)?;
    Ok(html::render(&markup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn archive(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn document_junk_runs_are_dropped() {
        let xml = r#"<w:document xmlns:w="ns"><w:body>
            <w:p><w:r><w:t>Real</w:t></w:r><w:r><w:t>&#xa0;</w:t></w:r></w:p>
            <w:p><w:r><w:t>   </w:t></w:r></w:p>
        </w:body></w:document>"#;
        let source = archive(&[("word/document.xml", xml)]);
        let units = extract_document(source, &ExtractOptions::default()).unwrap();
        // The NBSP-only run vanishes, and the whitespace-only paragraph
        // produces no unit at all.
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].content, "Real\n");
        assert_eq!(units[0].total, 1);
    }

    #[test]
    fn document_missing_entry_yields_no_units() {
        let source = archive(&[("word/other.xml", "<doc/>")]);
        let err = extract_document(source, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, ExtractError::EntryNotFound { .. }));
    }

    #[test]
    fn slides_with_no_content_are_skipped() {
        let source = archive(&[
            ("ppt/slides/slide1.xml", "<s><t>kept</t></s>"),
            ("ppt/slides/slide2.xml", "<s><t>\u{a0}</t></s>"),
        ]);
        let units = extract_slides(source, &ExtractOptions::default()).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].content, "kept");
    }

    #[test]
    fn note_bundle_renders_single_unit() {
        let source = archive(&[(
            "index.html",
            "<html><body><p>note text</p><script>leak()</script></body></html>",
        )]);
        let units = extract_note(source, &ExtractOptions::default()).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].total, 1);
        assert!(units[0].content.contains("note text"));
        assert!(!units[0].content.contains("leak"));
    }

    #[test]
    fn raw_html_path_needs_no_container() {
        let text = extract_html("<body><p>plain</p></body>".as_bytes()).unwrap();
        assert_eq!(text, "plain\n");
    }
}
