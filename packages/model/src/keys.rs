//! Citation key proposal.
//!
//! Keys follow the common "surname + year" scheme: the first author's
//! surname, lowercased and stripped to alphanumerics, with the year
//! appended when the record has one. Collision handling is the
//! bibliography's job, which sees all keys.

use crate::entry::Entry;

/// Propose a citation key for a record, or `None` when the record names
/// neither an author nor an editor.
pub fn propose_key(entry: &Entry) -> Option<String> {
    let names = entry.get("author").or_else(|| entry.get("editor"))?;
    let mut key = surname(names)?;
    if let Some(year) = entry.get("year") {
        key.extend(year.chars().filter(|c| c.is_ascii_digit()));
    }
    Some(key)
}

/// Normalized surname of the first person in a BibTeX name list.
fn surname(names: &str) -> Option<String> {
    let first = names.split(" and ").next()?.trim();
    let raw = match first.split_once(',') {
        Some((last, _)) => last,
        None => first.rsplit(char::is_whitespace).next()?,
    };
    let normalized: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propose_from_comma_name() {
        let entry = Entry::new("article")
            .with_field("author", "Knuth, Donald E.")
            .with_field("year", "1984");
        assert_eq!(propose_key(&entry), Some("knuth1984".to_string()));
    }

    #[test]
    fn test_propose_from_plain_name() {
        let entry = Entry::new("article")
            .with_field("author", "Donald E. Knuth")
            .with_field("year", "1984");
        assert_eq!(propose_key(&entry), Some("knuth1984".to_string()));
    }

    #[test]
    fn test_propose_uses_first_author_only() {
        let entry = Entry::new("article")
            .with_field("author", "Aho, Alfred V. and Ullman, Jeffrey D.");
        assert_eq!(propose_key(&entry), Some("aho".to_string()));
    }

    #[test]
    fn test_propose_falls_back_to_editor() {
        let entry = Entry::new("book")
            .with_field("editor", "Steele, Guy")
            .with_field("year", "1990");
        assert_eq!(propose_key(&entry), Some("steele1990".to_string()));
    }

    #[test]
    fn test_propose_without_names() {
        let entry = Entry::new("misc").with_field("title", "Anonymous pamphlet");
        assert_eq!(propose_key(&entry), None);
    }

    #[test]
    fn test_year_keeps_digits_only() {
        let entry = Entry::new("article")
            .with_field("author", "Lamport, Leslie")
            .with_field("year", "c. 1994");
        assert_eq!(propose_key(&entry), Some("lamport1994".to_string()));
    }
}
