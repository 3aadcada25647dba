//! Read and write requests handed to a [`crate::handle::DocumentHandle`].

use bson::{Bson, Document};
use docql::ast::OrderByColumn;

/// A read request: filter, grouping, ordering, paging and the rows to fill.
#[derive(Debug)]
pub struct Query<'a, T = Document> {
    pub rows: Option<&'a mut Vec<T>>,
    /// Where clause with `?` placeholders; empty selects everything
    pub where_clause: String,
    pub args: Vec<Bson>,
    pub group_by: Vec<String>,
    pub limit: i64,
    pub offset: i64,
    pub order_by: Vec<OrderByColumn>,
}

/// A write request: the row to store, and the where clause selecting documents it replaces.
/// An empty where clause always inserts.
#[derive(Debug)]
pub struct Record<'a, R: ?Sized> {
    pub row: &'a R,
    pub where_clause: String,
    pub args: Vec<Bson>,
}

impl<'a> Query<'a, Document> {
    /// A query without a destination, e.g. for a plain count
    pub fn new() -> Self { Self::with_rows(None) }
}

impl Default for Query<'_, Document> {
    fn default() -> Self { Self::new() }
}

impl<'a, T> Query<'a, T> {
    fn with_rows(rows: Option<&'a mut Vec<T>>) -> Self {
        Self { rows, where_clause: String::new(), args: Vec::new(), group_by: Vec::new(), limit: 0, offset: 0, order_by: Vec::new() }
    }

    /// A query whose results replace the contents of `rows`
    pub fn for_rows(rows: &'a mut Vec<T>) -> Self { Self::with_rows(Some(rows)) }

    pub fn filter(mut self, where_clause: impl Into<String>) -> Self {
        self.where_clause = where_clause.into();
        self
    }

    pub fn arg(mut self, arg: impl Into<Bson>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by.push(column.into());
        self
    }

    pub fn order_by(mut self, column: OrderByColumn) -> Self {
        self.order_by.push(column);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }
}

impl<'a, R: ?Sized> Record<'a, R> {
    pub fn new(row: &'a R) -> Self { Self { row, where_clause: String::new(), args: Vec::new() } }

    pub fn filter(mut self, where_clause: impl Into<String>) -> Self {
        self.where_clause = where_clause.into();
        self
    }

    pub fn arg(mut self, arg: impl Into<Bson>) -> Self {
        self.args.push(arg.into());
        self
    }
}
