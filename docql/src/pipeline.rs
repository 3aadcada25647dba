//! Aggregation pipelines for grouped reads and counts.

use crate::ast::OrderByColumn;
use crate::selection::{group::compile_group_by, sort::compile_order_by};
use bson::{doc, Document};
use tracing::debug;

/// `[$match?] [$group] [$sort?] [$skip?] [$limit?]`
///
/// `$match` is only emitted for a non-empty filter, `$skip` and `$limit` only when non-zero.
pub fn group_pipeline<S: AsRef<str>>(filter: &Document, group_by: &[S], order_by: &[OrderByColumn], offset: i64, limit: i64) -> Vec<Document> {
    let mut pipeline = Vec::new();
    if !filter.is_empty() {
        pipeline.push(doc! { "$match": filter.clone() });
    }
    pipeline.push(doc! { "$group": { "_id": compile_group_by(group_by) } });
    if !order_by.is_empty() {
        pipeline.push(doc! { "$sort": compile_order_by(order_by) });
    }
    if offset != 0 {
        pipeline.push(doc! { "$skip": offset });
    }
    if limit != 0 {
        pipeline.push(doc! { "$limit": limit });
    }
    debug!("group pipeline: {:?}", pipeline);
    pipeline
}

/// `[$match?]` followed by a grouped `$sum` count, or a plain `$count` without grouping.
pub fn count_pipeline<S: AsRef<str>>(filter: &Document, group_by: &[S]) -> Vec<Document> {
    let mut pipeline = Vec::new();
    if !filter.is_empty() {
        pipeline.push(doc! { "$match": filter.clone() });
    }
    let group = compile_group_by(group_by);
    if group.is_empty() {
        pipeline.push(doc! { "$count": "count" });
    } else {
        pipeline.push(doc! { "$group": { "_id": group, "count": { "$sum": 1 } } });
    }
    debug!("count pipeline: {:?}", pipeline);
    pipeline
}
