//! Grouping keys and grouped-result decoding.
//!
//! Dotted paths are not legal group keys, so `.` is written as `->` when a key enters a
//! `$group` stage and turned back into `.` when its results are read.

use crate::error::GroupDecodeError;
use bson::{Bson, Document};

const PATH_SEPARATOR: &str = ".";
const GROUP_KEY_SEPARATOR: &str = "->";

pub fn escape_group_key(path: &str) -> String { path.replace(PATH_SEPARATOR, GROUP_KEY_SEPARATOR) }
pub fn unescape_group_key(key: &str) -> String { key.replace(GROUP_KEY_SEPARATOR, PATH_SEPARATOR) }

/// Build the `_id` specification of a `$group` stage: each escaped path refers to its field.
pub fn compile_group_by<S: AsRef<str>>(columns: &[S]) -> Document {
    let mut spec = Document::new();
    for column in columns {
        let column = column.as_ref();
        spec.insert(escape_group_key(column), format!("${}", column));
    }
    spec
}

/// Replace every grouped row with its unescaped group identifier.
pub fn ungroup_rows(rows: Vec<Document>) -> Result<Vec<Document>, GroupDecodeError> {
    rows.into_iter().enumerate().map(|(index, mut row)| take_group(&mut row, index)).collect()
}

/// Turn each grouped count row into `{group: <unescaped group identifier>, count: <count>}`.
pub fn ungroup_counts(rows: Vec<Document>) -> Result<Vec<Document>, GroupDecodeError> {
    rows.into_iter()
        .enumerate()
        .map(|(index, mut row)| {
            let group = take_group(&mut row, index)?;
            let count = row.remove("count").unwrap_or(Bson::Null);
            let mut out = Document::new();
            out.insert("group", group);
            out.insert("count", count);
            Ok(out)
        })
        .collect()
}

fn take_group(row: &mut Document, index: usize) -> Result<Document, GroupDecodeError> {
    match row.remove("_id") {
        Some(Bson::Document(id)) => Ok(id.into_iter().map(|(key, value)| (unescape_group_key(&key), value)).collect()),
        _ => Err(GroupDecodeError::MissingGroupId { index }),
    }
}
