//! Error types for the editor

use bibworks_model::{ItemId, ModelError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Change targets an item no longer in the document: {0}")]
    StaleReference(ItemId),

    #[error("No open document named '{0}'")]
    UnknownDocument(String),

    #[error("Load finished without a result (loader dropped its notifier)")]
    LoadInterrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<ModelError> for EditorError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::UnknownItem(id) => EditorError::StaleReference(id),
        }
    }
}
