use thiserror::Error;

use crate::id_generator::ItemId;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
}

impl ModelError {
    pub fn unknown_item(id: &ItemId) -> Self {
        Self::UnknownItem(id.clone())
    }
}
