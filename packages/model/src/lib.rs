pub mod bibliography;
pub mod entry;
pub mod error;
pub mod id_generator;
pub mod item;
pub mod keys;
pub mod serializer;

pub use bibliography::Bibliography;
pub use entry::{Entry, CITE_KEY, ENTRY_TYPE};
pub use error::{ModelError, ModelResult};
pub use id_generator::{document_seed, IdGenerator, ItemId};
pub use item::Item;
pub use keys::propose_key;
pub use serializer::write_entry;
