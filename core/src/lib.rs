//! Generic document mapping and the read/write orchestration built on it.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod handle;
pub mod model;
pub mod query;
pub mod retag;
pub mod shape;
pub mod storage;

pub use config::DatabaseConfig;
pub use decode::{decode_into, Decode};
pub use encode::{encode_document, Encode};
pub use error::{HandleError, MapError};
pub use handle::{DocumentHandle, Sink, Source};
pub use model::Model;
pub use query::{Query, Record};
pub use shape::{Shape, Shaped};
pub use storage::{Collection, FindOptions, Store, StoreError, UpdateResult};
