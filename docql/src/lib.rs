//! SQL-style where clauses, compiled to document-store filters and aggregation pipelines.

pub mod ast;
pub mod conversion;
pub mod error;
pub mod grammar;
pub mod literal;
pub mod parser;
pub mod pipeline;
pub mod selection;

pub use error::{GroupDecodeError, ParseError};
pub use parser::parse_selection;
pub use selection::filter::compile_where;
