use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown sort direction '{value}' (expected asc, desc or none)")]
    UnknownSorting { value: String },
    #[error("duplicate field id: {id}")]
    DuplicateField { id: String },
    #[error("page limit must be greater than zero")]
    InvalidLimit,
}

pub type Result<T> = std::result::Result<T, ModelError>;
