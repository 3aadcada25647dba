use crate::ast;
use crate::error::ParseError;
use crate::grammar::{self, Rule};
use bson::Bson;
use pest::iterators::{Pair, Pairs};
use pest::Parser;

/// Print a parse tree node and its children recursively
#[cfg(test)]
fn print_tree(pair: Pair<Rule>, indent: usize) {
    if matches!(pair.as_rule(), Rule::EOI) {
        return;
    }
    println!("{:indent$}{:?}: '{}'", "", pair.as_rule(), pair.as_str().trim(), indent = indent);
    for inner in pair.into_inner() {
        print_tree(inner, indent + 2);
    }
}

/// Substitute `?` placeholders with the textual rendering of `args`, positionally.
///
/// The text is split on every `?`; each fragment is followed by its argument. A `?` with no
/// argument left simply disappears, and surplus arguments are ignored.
pub fn bind_placeholders(where_clause: &str, args: &[Bson]) -> String {
    let fragments: Vec<&str> = where_clause.split('?').collect();
    let placeholders = fragments.len() - 1;

    let mut bound = String::with_capacity(where_clause.len());
    for (i, fragment) in fragments.into_iter().enumerate() {
        bound.push_str(fragment);
        if i < placeholders {
            if let Some(arg) = args.get(i) {
                bound.push_str(&render_arg(arg));
            }
        }
    }
    bound
}

/// Render a single placeholder argument as where-clause source text.
pub fn render_arg(arg: &Bson) -> String {
    match arg {
        Bson::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "''")),
        // NaN and the infinities have no literal form
        Bson::Double(f) if !f.is_finite() => "NULL".to_string(),
        // Debug keeps the fractional part, so 1.0 stays a float literal
        Bson::Double(f) => format!("{:?}", f),
        Bson::Int32(i) => i.to_string(),
        Bson::Int64(i) => i.to_string(),
        Bson::Boolean(b) => b.to_string(),
        Bson::Null => "NULL".to_string(),
        other => other.to_string(),
    }
}

/// Parse a selection expression into a predicate AST.
/// The selection must be a valid boolean expression; any syntax error fails the whole parse.
pub fn parse_selection(input: &str) -> Result<ast::Predicate, ParseError> {
    let pairs = grammar::DocqlParser::parse(Rule::Selection, input)?;

    #[cfg(test)]
    for pair in pairs.clone() {
        print_tree(pair, 0);
    }

    // Selection is silent, so the first pair is the Expr itself
    let expr = pairs.into_iter().next().ok_or(ParseError::EmptyExpression)?;
    if expr.as_rule() != Rule::Expr {
        return Err(ParseError::UnexpectedRule { expected: "Expr", got: expr.as_rule() });
    }

    parse_expr(expr)
}

/// Disjunction of one or more conjunctions, folded left
fn parse_expr(pair: Pair<Rule>) -> Result<ast::Predicate, ParseError> {
    fold_connective(pair.into_inner(), Rule::Or, parse_conjunction)
}

fn parse_conjunction(pair: Pair<Rule>) -> Result<ast::Predicate, ParseError> { fold_connective(pair.into_inner(), Rule::And, parse_unary) }

fn fold_connective(
    mut pairs: Pairs<Rule>,
    connective: Rule,
    operand: fn(Pair<Rule>) -> Result<ast::Predicate, ParseError>,
) -> Result<ast::Predicate, ParseError> {
    let first = pairs.next().ok_or(ParseError::MissingOperand("first"))?;
    let mut result = operand(first)?;

    while let Some(op) = pairs.next() {
        if op.as_rule() != connective {
            return Err(ParseError::UnexpectedRule { expected: "And or Or", got: op.as_rule() });
        }
        let right = operand(pairs.next().ok_or(ParseError::MissingOperand("right"))?)?;
        result = match connective {
            Rule::And => ast::Predicate::and(result, right),
            _ => ast::Predicate::or(result, right),
        };
    }

    Ok(result)
}

fn parse_unary(pair: Pair<Rule>) -> Result<ast::Predicate, ParseError> {
    match pair.as_rule() {
        Rule::Negation => {
            let mut inner = pair.into_inner();
            inner.next(); // Not
            let operand = inner.next().ok_or(ParseError::MissingOperand("negated"))?;
            Ok(ast::Predicate::Not(Box::new(parse_unary(operand)?)))
        }
        Rule::ExpressionInParentheses => {
            let inner = pair.into_inner().next().ok_or(ParseError::EmptyExpression)?;
            parse_expr(inner)
        }
        Rule::Comparison => {
            let mut inner = pair.into_inner();
            let left = parse_operand(inner.next().ok_or(ParseError::MissingOperand("left"))?)?;
            let op = inner.next().ok_or(ParseError::MissingOperand("operator"))?;
            let right = parse_operand(inner.next().ok_or(ParseError::MissingOperand("right"))?)?;
            let operator = match op.as_rule() {
                Rule::Eq => ast::ComparisonOperator::Equal,
                Rule::NotEq => ast::ComparisonOperator::NotEqual,
                Rule::Gt => ast::ComparisonOperator::GreaterThan,
                Rule::GtEq => ast::ComparisonOperator::GreaterThanOrEqual,
                Rule::Lt => ast::ComparisonOperator::LessThan,
                Rule::LtEq => ast::ComparisonOperator::LessThanOrEqual,
                other => return Err(ParseError::UnexpectedRule { expected: "comparison operator", got: other }),
            };
            Ok(ast::Predicate::comparison(left, operator, right))
        }
        Rule::IsNull => {
            let mut inner = pair.into_inner();
            let expr = parse_operand(inner.next().ok_or(ParseError::MissingOperand("left"))?)?;
            // Is, then an optional Not, then the NullLiteral
            let negated = inner.any(|p| p.as_rule() == Rule::Not);
            Ok(ast::Predicate::IsNull { expr: Box::new(expr), negated })
        }
        Rule::Membership => {
            let mut inner = pair.into_inner();
            let left = parse_operand(inner.next().ok_or(ParseError::MissingOperand("left"))?)?;
            let mut negated = false;
            let mut items = Vec::new();
            for p in inner {
                match p.as_rule() {
                    Rule::Not => negated = true,
                    Rule::In => {}
                    _ => items.push(parse_operand(p)?),
                }
            }
            let operator = if negated { ast::ComparisonOperator::NotIn } else { ast::ComparisonOperator::In };
            Ok(ast::Predicate::comparison(left, operator, ast::Expr::ExprList(items)))
        }
        Rule::Pattern => {
            let mut inner = pair.into_inner();
            let left = parse_operand(inner.next().ok_or(ParseError::MissingOperand("left"))?)?;
            let mut negated = false;
            let mut right = None;
            for p in inner {
                match p.as_rule() {
                    Rule::Not => negated = true,
                    Rule::Like => {}
                    _ => right = Some(parse_operand(p)?),
                }
            }
            let right = right.ok_or(ParseError::MissingOperand("pattern"))?;
            let operator = if negated { ast::ComparisonOperator::NotLike } else { ast::ComparisonOperator::Like };
            Ok(ast::Predicate::comparison(left, operator, right))
        }
        _ => Ok(ast::Predicate::Operand(Box::new(parse_operand(pair)?))),
    }
}

fn parse_operand(pair: Pair<Rule>) -> Result<ast::Expr, ParseError> {
    use ast::LiteralKind as K;
    let literal = |kind: K, value: &str| Ok(ast::Expr::Literal(ast::Literal::new(kind, value)));

    match pair.as_rule() {
        Rule::Path => Ok(ast::Expr::Identifier(ast::Identifier::new(pair.as_str()))),
        Rule::HexString => {
            let digits = pair.into_inner().next().map(|p| p.as_str()).unwrap_or_default();
            literal(K::Hex, digits)
        }
        Rule::HexNumber => literal(K::HexNumber, pair.as_str()),
        Rule::Integer => literal(K::Integer, pair.as_str()),
        Rule::Decimal => literal(K::Decimal, pair.as_str()),
        Rule::Float => literal(K::Float, pair.as_str()),
        Rule::Boolean => literal(K::Boolean, pair.as_str()),
        Rule::NullLiteral => literal(K::Null, pair.as_str()),
        Rule::SingleQuotedString | Rule::DoubleQuotedString => {
            let quote = if pair.as_rule() == Rule::SingleQuotedString { '\'' } else { '"' };
            let inner = pair.into_inner().next().map(|p| p.as_str()).unwrap_or_default();
            Ok(ast::Expr::Literal(ast::Literal::string(unescape(inner, quote))))
        }
        other => Err(ParseError::UnexpectedRule { expected: "identifier or literal", got: other }),
    }
}

/// Undo quote doubling and backslash escapes inside a quoted string literal
fn unescape(raw: &str, quote: char) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            c if c == quote && chars.peek() == Some(&quote) => {
                chars.next();
                out.push(quote);
            }
            c => out.push(c),
        }
    }
    out
}
