//! Output types: positioned text units handed to the chunking layer.
//!
//! Downstream splitters rely on two things: embedded newlines are real
//! structural boundaries, and `position`/`total` let them re-identify a unit
//! after chunking shuffles everything. Both derive from the extraction call
//! itself — nothing here persists across calls.

use serde::{Deserialize, Serialize};

/// One extracted logical unit: a document paragraph, a slide, or a whole
/// rendered note.
///
/// Invariant: within one extraction result, `total` equals the number of
/// units produced and `position` runs `0..total` contiguously in upstream
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    /// Extracted text. Newlines inside are structural, not decorative.
    pub content: String,
    /// Zero-based index of this unit in the extraction result.
    pub position: usize,
    /// Number of units in the extraction result this unit belongs to.
    pub total: usize,
}

/// Wrap extracted content strings into positioned units.
///
/// Purely mechanical: order is preserved exactly as produced upstream.
pub fn assemble(contents: Vec<String>) -> Vec<TextUnit> {
    let total = contents.len();
    contents
        .into_iter()
        .enumerate()
        .map(|(position, content)| TextUnit {
            content,
            position,
            total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_positions_are_contiguous() {
        let units = assemble(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(units.len(), 3);
        for (i, u) in units.iter().enumerate() {
            assert_eq!(u.position, i);
            assert_eq!(u.total, 3);
        }
        assert_eq!(units[1].content, "b");
    }

    #[test]
    fn assemble_empty_is_empty() {
        assert!(assemble(Vec::new()).is_empty());
    }

    #[test]
    fn unit_serialises_flat() {
        let unit = TextUnit {
            content: "Foo\n".into(),
            position: 0,
            total: 2,
        };
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(json["content"], "Foo\n");
        assert_eq!(json["position"], 0);
        assert_eq!(json["total"], 2);
    }
}
