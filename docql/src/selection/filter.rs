//! Compile a predicate into a document-store filter.
//!
//! Untranslatable nodes compile to `None` ("absent"). An absent child makes its whole `And`/`Or`
//! connective absent, rather than being elided.

use crate::ast::{ComparisonOperator, Expr, Predicate};
use crate::error::ParseError;
use crate::literal;
use crate::parser;
use bson::{doc, Bson, Document};
use tracing::debug;

impl ComparisonOperator {
    /// The filter operator for this comparison, if it has one
    pub fn filter_operator(&self) -> Option<&'static str> {
        match self {
            ComparisonOperator::Equal => Some("$eq"),
            ComparisonOperator::NotEqual => Some("$ne"),
            ComparisonOperator::GreaterThan => Some("$gt"),
            ComparisonOperator::LessThan => Some("$lt"),
            ComparisonOperator::GreaterThanOrEqual => Some("$gte"),
            ComparisonOperator::LessThanOrEqual => Some("$lte"),
            ComparisonOperator::Like | ComparisonOperator::NotLike | ComparisonOperator::In | ComparisonOperator::NotIn => None,
        }
    }
}

/// Bind `args` into `where_clause`, parse it, and compile the result.
///
/// An empty where clause is no filter at all. A syntax error is returned verbatim; an
/// untranslatable predicate yields an empty filter.
pub fn compile_where(where_clause: &str, args: &[Bson]) -> Result<Document, ParseError> {
    if where_clause.is_empty() {
        return Ok(Document::new());
    }

    let bound = parser::bind_placeholders(where_clause, args);
    let predicate = parser::parse_selection(&bound)?;
    let filter = compile_predicate(&predicate).unwrap_or_default();
    debug!("compiled where clause {:?} to filter {}", bound, filter);
    Ok(filter)
}

pub fn compile_predicate(predicate: &Predicate) -> Option<Document> {
    match predicate {
        Predicate::Comparison { left, operator, right } => compile_comparison(left, *operator, right),
        Predicate::And(left, right) => {
            let (left, right) = (compile_predicate(left)?, compile_predicate(right)?);
            Some(doc! { "$and": [left, right] })
        }
        Predicate::Or(left, right) => {
            let (left, right) = (compile_predicate(left)?, compile_predicate(right)?);
            Some(doc! { "$or": [left, right] })
        }
        Predicate::IsNull { .. } | Predicate::Not(_) | Predicate::Operand(_) => None,
    }
}

fn compile_comparison(left: &Expr, operator: ComparisonOperator, right: &Expr) -> Option<Document> {
    let op = operator.filter_operator()?;

    let field = match left {
        Expr::Identifier(identifier) => identifier.path(),
        _ => return None,
    };
    let value: Bson = match right {
        Expr::Literal(lit) => literal::coerce(lit)?.into(),
        _ => return None,
    };

    let mut predicate = doc! { "$exists": true };
    predicate.insert(op, value);
    let mut filter = Document::new();
    filter.insert(field, predicate);
    Some(filter)
}
