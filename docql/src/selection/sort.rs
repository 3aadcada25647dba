use crate::ast::OrderByColumn;
use bson::Document;

/// Build a sort specification, `1` for ascending and `-1` for descending, in column order.
pub fn compile_order_by(columns: &[OrderByColumn]) -> Document {
    let mut spec = Document::new();
    for column in columns {
        spec.insert(column.name.clone(), if column.desc { -1_i32 } else { 1_i32 });
    }
    spec
}
