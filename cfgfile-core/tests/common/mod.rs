//! Test infrastructure for the config parser
//!
//! Provides fixture loading, stochastic input generation and chunking helpers.

#![allow(dead_code)]

mod generators;
mod loader;

pub use generators::Gen;
pub use loader::{load_fixtures_by_name, ExpectedSection, TestCase};

use cfgfile_core::{Document, Result};

/// Parse `input` delivered in pieces of `size` bytes.
pub fn parse_in_chunks(input: &[u8], size: usize) -> Result<Document> {
    Document::parse_chunks(input.chunks(size.max(1)))
}

/// Parse `input` split at the given offsets.
pub fn parse_split_at(input: &[u8], cuts: &[usize]) -> Result<Document> {
    let mut pieces = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for &cut in cuts {
        let cut = cut.clamp(start, input.len());
        pieces.push(&input[start..cut]);
        start = cut;
    }
    pieces.push(&input[start..]);
    Document::parse_chunks(pieces)
}

/// `(section, key, value)` triples in file order.
pub fn pairs(doc: &Document) -> Vec<(String, String, String)> {
    let mut out = Vec::new();
    for section in doc.sections() {
        for id in section.entries() {
            if let Some(kv) = doc.get_keyvalue(*id) {
                out.push((
                    section.name().to_string(),
                    kv.key().to_string(),
                    kv.value().to_string(),
                ));
            }
        }
    }
    out
}
