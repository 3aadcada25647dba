//! The storage collaborator. Drivers implement [`Store`] and [`Collection`]; connection
//! lifecycle is theirs to manage.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bson::Document;

pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait Store: Send + Sync {
    /// Opens a collection of the configured database
    async fn collection(&self, name: &str) -> Result<Arc<dyn Collection>, StoreError>;
}

#[async_trait]
pub trait Collection: Send + Sync {
    async fn find(&self, filter: Document, options: FindOptions) -> Result<Vec<Document>, StoreError>;

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>, StoreError>;

    async fn update_many(&self, filter: Document, update: Document) -> Result<UpdateResult, StoreError>;

    async fn insert_one(&self, document: Document) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    /// Zero means no limit
    pub limit: i64,
    pub skip: i64,
    pub sort: Document,
}

impl fmt::Display for FindOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{{limit: {}, skip: {}, sort: {}}}", self.limit, self.skip, self.sort) }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    pub matched: u64,
}
