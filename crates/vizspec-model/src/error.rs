use thiserror::Error;

/// Errors raised while constructing model values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("invalid field id: {0:?}")]
    InvalidFieldId(String),
    #[error("duplicate field id in catalog: {0}")]
    DuplicateField(String),
    #[error("unknown aggregate: {0}")]
    UnknownAggregate(String),
    #[error("invalid spec JSON: {0}")]
    InvalidSpec(String),
    #[error("spec must be a JSON object, found {0}")]
    SpecNotObject(&'static str),
}

pub type Result<T> = std::result::Result<T, ModelError>;
