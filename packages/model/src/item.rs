use crate::entry::Entry;
use crate::id_generator::ItemId;
use crate::serializer::write_entry;

/// One bibliography row: a record snapshot plus everything the list view
/// derives from it.
///
/// Items are never removed from the registry; deletion hides them so that
/// their id stays resolvable for the whole session. The rendered source
/// text is cached and refreshed on every mutation.
#[derive(Debug, Clone)]
pub struct Item {
    id: ItemId,
    entry: Entry,
    hidden: bool,
    source: String,
}

impl Item {
    pub(crate) fn new(id: ItemId, entry: Entry) -> Self {
        let source = write_entry(&entry);
        Self {
            id,
            entry,
            hidden: false,
            source,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.entry.get(name)
    }

    pub fn key(&self) -> &str {
        self.entry.key()
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    /// Cached source rendering of the record.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn set_field(&mut self, name: &str, value: Option<String>) {
        self.entry.set(name, value);
        self.source = write_entry(&self.entry);
    }

    pub(crate) fn replace_entry(&mut self, entry: Entry) {
        self.entry = entry;
        self.source = write_entry(&self.entry);
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}
