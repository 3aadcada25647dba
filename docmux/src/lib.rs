//! # docmux
//!
//! docmux lets an application talk to a document database with a small SQL-like surface:
//! where clauses with `?` placeholders, group-by and order-by columns, and plain Rust structs
//! as rows.
//!
//! ## Core Concepts
//!
//! - **Where clause**: a boolean expression such as `value = ? and l2.value = ?`, compiled into a
//!   document filter by [`docql`]
//! - **Model**: a struct whose fields map to document keys through `#[docmux(...)]` annotations
//! - **Store / Collection**: the storage driver the handle talks to
//! - **DocumentHandle**: runs queries (`get`, `count`) and writes (`upsert`) against a store
//!
//! ## Example
//!
//! ```rust
//! use docmux::bson::{doc, Bson};
//! use docmux::Model;
//!
//! #[derive(Model, Debug, Default, PartialEq)]
//! pub struct Album {
//!     #[docmux("name")]
//!     title: String,
//!     #[docmux(omitempty)]
//!     year: i32,
//! }
//!
//! let row = docmux::core::encode_document(&Album { title: "Origin of Symmetry".into(), year: 0 })?;
//! assert_eq!(row, doc! { "name": "Origin of Symmetry" });
//!
//! let filter = docmux::docql::compile_where("name = ? and year >= ?", &[Bson::from("Origin of Symmetry"), Bson::from(2001)])?;
//! assert_eq!(
//!     filter,
//!     doc! { "$and": [
//!         { "name": { "$exists": true, "$eq": "Origin of Symmetry" } },
//!         { "year": { "$exists": true, "$gte": 2001_i64 } },
//!     ] }
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use bson;
pub use docmux_core as core;
#[cfg(feature = "derive")]
pub use docmux_derive as derive;
pub use docql;

// Re-export commonly used types
pub use docmux_core::{
    config::DatabaseConfig,
    decode::Decode,
    encode::Encode,
    error::{HandleError, MapError},
    handle::{DocumentHandle, Sink, Source},
    model::Model,
    query::{Query, Record},
    storage::{Collection, FindOptions, Store, StoreError, UpdateResult},
};
pub use docql::ast::OrderByColumn;

// Re-export the derive macro
#[cfg(feature = "derive")]
pub use docmux_derive::*;
