//! Render record snapshots back to BibTeX-shaped source text.
//!
//! The output feeds display caches and previews, not persistence, so the
//! only hard requirement is determinism: the same snapshot always renders
//! to the same text. Body fields are emitted in name order.

use crate::entry::{Entry, CITE_KEY, ENTRY_TYPE};
use std::fmt::Write;

const FALLBACK_KIND: &str = "misc";

/// Serialize one record to source text.
pub fn write_entry(entry: &Entry) -> String {
    let mut out = String::new();
    let kind = entry.kind().unwrap_or(FALLBACK_KIND);

    let mut names: Vec<&str> = entry
        .fields()
        .keys()
        .map(String::as_str)
        .filter(|name| *name != ENTRY_TYPE && *name != CITE_KEY)
        .collect();
    names.sort_unstable();

    // Writing to a String cannot fail
    let _ = write!(out, "@{}{{{}", kind, entry.key());
    for name in names {
        let value = entry.get(name).unwrap_or("");
        let _ = write!(out, ",\n  {} = {{{}}}", name, value);
    }
    out.push_str("\n}");
    out
}
