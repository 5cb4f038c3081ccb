use thiserror::Error;

use crate::{sheet::ActorKind, Attribute};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SheetError {
    #[error("attribute '{0}' has no value on this character")]
    AttributeNotFound(Attribute),

    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("item '{0}' not found")]
    ItemNotFound(String),

    #[error("unknown sheet field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' is not editable on a {kind} sheet")]
    UnsupportedField { field: String, kind: ActorKind },

    #[error("unknown roll type '{0}'")]
    InvalidRollType(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("character '{0}' is not in the store")]
    UnknownCharacter(String),

    #[error("write rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
