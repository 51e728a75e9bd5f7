//! Streaming XML run/paragraph extraction.
//!
//! No tree is built. A [`Fragments`] iterator drives a token cursor over one
//! container entry and yields text runs and paragraph boundaries as they are
//! encountered:
//!
//! * entering an element locally named `t` followed by a character-data
//!   token yields that data verbatim as [`Fragment::Text`];
//! * entering an element locally named `p` yields [`Fragment::Break`], the
//!   paragraph-boundary marker (a literal newline when joined);
//! * every other token is ignored.
//!
//! The iterator is lazy, finite, and non-restartable. Any token error other
//! than end-of-stream is fatal and surfaces as [`ExtractError::Decode`] with
//! the entry name and byte offset.

use crate::error::ExtractError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

/// One unit of extracted XML text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Verbatim character data of one text run.
    Text(String),
    /// A paragraph boundary; renders as a single newline.
    Break,
}

/// True for text that carries no content: empty, whitespace-only, or
/// consisting solely of non-breaking-space characters. Such fragments are
/// dropped before joining into a unit's text.
pub fn is_junk(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{00a0}')
}

/// Lazy fragment sequence over one XML entry.
pub struct Fragments<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    entry: String,
    /// Set after `<t>`; the immediately following token must be character
    /// data for a run to be emitted.
    in_run: bool,
    done: bool,
}

impl<R: BufRead> Fragments<R> {
    /// Start extracting from `source`; `entry` names the origin for errors.
    pub fn new(source: R, entry: impl Into<String>) -> Self {
        Self {
            reader: Reader::from_reader(source),
            buf: Vec::new(),
            entry: entry.into(),
            in_run: false,
            done: false,
        }
    }

    fn fail(&mut self, detail: String) -> ExtractError {
        self.done = true;
        ExtractError::Decode {
            entry: self.entry.clone(),
            offset: self.reader.buffer_position() as u64,
            detail,
        }
    }
}

impl<R: BufRead> Iterator for Fragments<R> {
    type Item = Result<Fragment, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf) {
                Err(e) => return Some(Err(self.fail(e.to_string()))),
                Ok(Event::Eof) => {
                    self.done = true;
                    return None;
                }
                Ok(Event::Start(ref e)) => {
                    self.in_run = false;
                    match e.name().local_name().as_ref() {
                        b"t" => self.in_run = true,
                        b"p" => return Some(Ok(Fragment::Break)),
                        _ => {}
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    // Self-closing <t/> has no character data to emit.
                    self.in_run = false;
                    if e.name().local_name().as_ref() == b"p" {
                        return Some(Ok(Fragment::Break));
                    }
                }
                Ok(Event::Text(ref t)) if self.in_run => {
                    self.in_run = false;
                    match t.unescape() {
                        Ok(text) => return Some(Ok(Fragment::Text(text.into_owned()))),
                        Err(e) => return Some(Err(self.fail(e.to_string()))),
                    }
                }
                Ok(Event::CData(ref t)) if self.in_run => {
                    self.in_run = false;
                    let text = String::from_utf8_lossy(t.as_ref()).into_owned();
                    return Some(Ok(Fragment::Text(text)));
                }
                Ok(_) => self.in_run = false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(xml: &str) -> Vec<Fragment> {
        Fragments::new(xml.as_bytes(), "test.xml")
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn runs_and_breaks_in_document_order() {
        let xml = r#"<w:document xmlns:w="ns">
            <w:body>
              <w:p><w:r><w:t>Foo</w:t></w:r></w:p>
              <w:p><w:r><w:t>Bar</w:t></w:r></w:p>
            </w:body>
        </w:document>"#;
        assert_eq!(
            collect(xml),
            [
                Fragment::Break,
                Fragment::Text("Foo".into()),
                Fragment::Break,
                Fragment::Text("Bar".into()),
            ]
        );
    }

    #[test]
    fn run_requires_immediate_character_data() {
        // <t> wrapping another element first: no fragment for the wrapper,
        // and the nested element is not named t, so nothing is emitted.
        let xml = "<t><i>styled</i></t>";
        assert_eq!(collect(xml), []);
    }

    #[test]
    fn self_closing_paragraph_is_a_break() {
        assert_eq!(collect("<doc><p/></doc>"), [Fragment::Break]);
    }

    #[test]
    fn self_closing_run_emits_nothing_for_tail_text() {
        assert_eq!(collect("<doc><t/>tail</doc>"), []);
    }

    #[test]
    fn entities_are_unescaped() {
        assert_eq!(
            collect("<t>a &amp; b</t>"),
            [Fragment::Text("a & b".into())]
        );
    }

    #[test]
    fn whitespace_runs_are_preserved_verbatim() {
        // Junk filtering happens at grouping time, not here.
        assert_eq!(collect("<t>   </t>"), [Fragment::Text("   ".into())]);
    }

    #[test]
    fn malformed_stream_is_a_decode_error() {
        let mut iter = Fragments::new("<doc><p></doc>".as_bytes(), "bad.xml");
        let result: Result<Vec<Fragment>, ExtractError> = iter.by_ref().collect();
        let err = result.unwrap_err();
        match err {
            ExtractError::Decode { entry, .. } => assert_eq!(entry, "bad.xml"),
            other => panic!("expected Decode, got {other:?}"),
        }
        // Fatal: the sequence does not resume after an error.
        assert!(iter.next().is_none());
    }

    #[test]
    fn junk_detection() {
        assert!(is_junk(""));
        assert!(is_junk("   \n\t"));
        assert!(is_junk("\u{00a0}"));
        assert!(is_junk(" \u{00a0} "));
        assert!(!is_junk("x"));
        assert!(!is_junk(" x "));
    }
}
