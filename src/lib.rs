//! # doc2text
//!
//! Extract plain, layout-preserving text from heterogeneous structured
//! document containers — zip-packaged XML document and presentation
//! formats, zipped HTML note bundles, and raw HTML — so a downstream
//! chunking component can split it for indexing and retrieval.
//!
//! ## Why layout-preserving?
//!
//! Chunkers split on structure. A splitter fed `"* one * two"` cannot tell
//! a list from a sentence; fed `"* one\n* two\n"` it can. Every newline in
//! this crate's output is a real structural boundary — paragraph end, list
//! item, table row — never decoration, so downstream components may split
//! on them with confidence.
//!
//! ## Pipeline Overview
//!
//! ```text
//! container (zip)
//!  │
//!  ├─ document entry      ──▶ XML fragment stream ──▶ paragraph units
//!  ├─ slide entries       ──▶ XML fragment stream ──▶ slide units
//!  └─ note entry (HTML)   ──▶ charset normalize ──▶ DOM render ──▶ one unit
//! raw HTML stream          ──▶ charset normalize ──▶ DOM render ──▶ string
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doc2text::{extract_document, ExtractOptions};
//! use std::fs::File;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = File::open("report.docx")?;
//!     let units = extract_document(file, &ExtractOptions::default())?;
//!     for unit in &units {
//!         println!("[{}/{}] {}", unit.position + 1, unit.total, unit.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! * Extraction is synchronous, single-threaded, and owns all per-call
//!   state; distinct documents extract safely on distinct threads.
//! * Either the complete unit set is returned or a structured
//!   [`ExtractError`] is — never a partial result.
//! * Identical input yields byte-identical output.
//! * `<script>`/`<style>` content and comments never reach HTML output.
//! * Slide units follow zip central-directory order, not numeric filename
//!   order.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod error;
pub mod extract;
pub mod options;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use error::ExtractError;
pub use extract::{extract_document, extract_html, extract_note, extract_slides};
pub use options::{ExtractOptions, ExtractOptionsBuilder};
pub use output::TextUnit;
