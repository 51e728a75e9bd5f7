//! Error types for the doc2text library.
//!
//! One variant per failure class, so callers can match on *what went wrong*
//! rather than parsing message strings:
//!
//! * [`ExtractError::Archive`] — the zip central directory is corrupt; the
//!   container cannot be opened at all.
//! * [`ExtractError::EntryNotFound`] — the container opened fine but the
//!   expected payload entry is missing.
//! * [`ExtractError::Decode`] — the XML token stream inside an entry is
//!   malformed; carries the entry name and byte offset for diagnostics.
//! * [`ExtractError::UnsupportedEncoding`] — a charset label was sniffed or
//!   declared that no known encoding answers to.
//! * [`ExtractError::Parse`] — unrecoverable HTML parse failure. Rare in
//!   practice: the HTML front-end is lenient by design.
//! * [`ExtractError::Io`] — the underlying byte source failed.
//!
//! There are no retries and no partial results: either the complete unit set
//! is returned or one of these surfaces to the immediate caller.

use thiserror::Error;

/// All errors returned by the doc2text library.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The zip central directory could not be read.
    #[error("corrupt archive: {detail}")]
    Archive { detail: String },

    /// The container is valid but the expected entry is absent.
    #[error("entry not found in archive: '{name}'")]
    EntryNotFound { name: String },

    /// Malformed XML token stream inside a container entry.
    #[error("malformed XML in '{entry}' near byte {offset}: {detail}")]
    Decode {
        entry: String,
        offset: u64,
        detail: String,
    },

    /// A charset label that no supported encoding answers to.
    #[error("unsupported character encoding: '{label}'")]
    UnsupportedEncoding { label: String },

    /// The HTML front-end gave up on the input entirely.
    #[error("HTML parse failed: {detail}")]
    Parse { detail: String },

    /// The underlying byte source failed mid-read.
    #[error("I/O error reading source: {0}")]
    Io(#[from] std::io::Error),
}
