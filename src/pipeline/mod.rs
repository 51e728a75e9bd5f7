//! Pipeline stages for document-to-text extraction.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets a format
//! entry point compose only the stages its container actually needs.
//!
//! ## Data Flow
//!
//! ```text
//! container ──▶ raw bytes ──┬──▶ xml ─────────────────▶ units
//!   (zip)                   └──▶ charset ──▶ html ─────▶ text
//! ```
//!
//! 1. [`container`] — open a zip package, resolve named or pattern-matched
//!    entries in central-directory order
//! 2. [`xml`]       — stream run/paragraph fragments off an XML entry
//!    without building a tree
//! 3. [`charset`]   — sniff, transcode to UTF-8, strip the byte-order mark
//! 4. [`html`]      — walk the parsed HTML tree into layout-aware plain
//!    text with a value-threaded render context

pub mod charset;
pub mod container;
pub mod html;
pub mod xml;
