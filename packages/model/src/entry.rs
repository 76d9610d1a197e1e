use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field name holding the record kind ("article", "book", ...).
pub const ENTRY_TYPE: &str = "ENTRYTYPE";

/// Field name holding the citation key.
pub const CITE_KEY: &str = "ID";

/// A complete record snapshot: one flat mapping from field names to values.
///
/// The record kind and citation key live in the map like any other field,
/// under [`ENTRY_TYPE`] and [`CITE_KEY`]. A field is either present with a
/// value (possibly empty) or absent; absent and empty are distinct states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry {
    fields: HashMap<String, String>,
}

impl Entry {
    /// Create an empty record of the given kind.
    pub fn new(kind: &str) -> Self {
        let mut fields = HashMap::new();
        fields.insert(ENTRY_TYPE.to_string(), kind.to_string());
        Self { fields }
    }

    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Builder-style field assignment, mostly for constructing fixtures.
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    /// Record kind, if the snapshot carries one.
    pub fn kind(&self) -> Option<&str> {
        self.get(ENTRY_TYPE)
    }

    /// Citation key; empty when unset.
    pub fn key(&self) -> &str {
        self.get(CITE_KEY).unwrap_or("")
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Write or remove one field. `None` removes it entirely, which is how
    /// an edit that introduced a field is unwound without leaving an empty
    /// value behind.
    pub fn set(&mut self, name: &str, value: Option<String>) {
        match value {
            Some(value) => {
                self.fields.insert(name.to_string(), value);
            }
            None => {
                self.fields.remove(name);
            }
        }
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
