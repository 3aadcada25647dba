use crate::storage::StoreError;
use docql::error::{GroupDecodeError, ParseError};
use thiserror::Error;

/// Errors raised while mapping values to or from documents
#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("passed value of type {found}, expected {expected}")]
    ShapeMismatch { expected: &'static str, found: &'static str },
    #[error("type mismatch at `{path}`: expected {expected}, found {found}")]
    TypeMismatch { path: String, expected: &'static str, found: String },
    #[error("failed to copy retrieved record {index}: {source}")]
    Copy { index: usize, source: Box<MapError> },
    #[error("value did not encode to a document")]
    NotADocument,
}

impl MapError {
    pub fn type_mismatch(expected: &'static str, found: &bson::Bson) -> Self {
        MapError::TypeMismatch { path: String::new(), expected, found: format!("{:?}", found.element_type()) }
    }

    /// Prefix the error location with an outer field name or index
    pub fn at(self, segment: impl std::fmt::Display) -> Self {
        match self {
            MapError::TypeMismatch { path, expected, found } => {
                let path = if path.is_empty() { segment.to_string() } else { format!("{}.{}", segment, path) };
                MapError::TypeMismatch { path, expected, found }
            }
            other => other,
        }
    }
}

#[derive(Debug, Error)]
pub enum HandleError {
    #[error("collection name should not be empty")]
    EmptyCollectionName,
    #[error("query has no destination rows")]
    MissingDestination,
    #[error("invalid where clause: {0}")]
    InvalidQuery(#[from] ParseError),
    #[error("mapping error: {0}")]
    Map(#[from] MapError),
    #[error("failed to decode grouped rows: {0}")]
    GroupDecode(#[from] GroupDecodeError),
    #[error("failed to retrieve the total count of records")]
    MissingCount,
    #[error("storage error: {0}")]
    Store(StoreError),
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<StoreError> for HandleError {
    fn from(err: StoreError) -> Self { HandleError::Store(err) }
}
