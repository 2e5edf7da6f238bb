use thiserror::Error;

use crate::alias::Alias;
use crate::path::Path;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageTreeError {
    #[error("path is invalid: \"{0}\"")]
    PathInvalid(Path),

    #[error("message is invalid: {0}")]
    InvalidMessage(String),

    #[error("alias \"{0}\" cannot be linked, it was never saved")]
    InvalidAlias(Alias),

    #[error("cursor of alias \"{0}\" not found")]
    UnknownAlias(Alias),

    #[error("cursor is invalid, wrong format: \"{0}\"")]
    InvalidCursorFormat(Path),

    #[error("path \"{0}\" holds a message, not a node")]
    PathConflict(Path),

    #[error("alias \"{0}\" refers back to itself")]
    AliasCycle(Alias),
}
