use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    Identifier(Identifier),
    ExprList(Vec<Expr>),
}

/// A literal token as written, tagged with its lexical class. Typing happens later, see [`crate::literal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Unescaped contents for strings, the digits for hex strings, the raw token otherwise.
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralKind {
    String,    // 'abc' or "abc"
    Hex,       // X'616263'
    HexNumber, // 0x1F
    Integer,   // 42
    Decimal,   // 4.2
    Float,     // 4.2e1
    Boolean,   // true / false
    Null,      // NULL
}

/// A possibly nested field reference, kept exactly as written (including any backtick quoting).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Comparison {
        left: Box<Expr>,
        operator: ComparisonOperator,
        right: Box<Expr>,
    },
    IsNull {
        expr: Box<Expr>,
        negated: bool,
    },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
    /// A bare operand used as a condition, e.g. `WHERE active`
    Operand(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Equal,              // =
    NotEqual,           // <> or !=
    GreaterThan,        // >
    GreaterThanOrEqual, // >=
    LessThan,           // <
    LessThanOrEqual,    // <=
    Like,               // LIKE
    NotLike,            // NOT LIKE
    In,                 // IN
    NotIn,              // NOT IN
}

/// `<column_name, sorting_order>` pair for ORDER BY
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderByColumn {
    pub name: String,
    /// True if the sorting order is descending.
    pub desc: bool,
}

impl Identifier {
    pub fn new(raw: impl Into<String>) -> Self { Self(raw.into()) }

    /// The dotted path with backtick quoting removed.
    pub fn path(&self) -> String { self.0.replace('`', "") }
}

impl Literal {
    pub fn new(kind: LiteralKind, value: impl Into<String>) -> Self { Self { kind, value: value.into() } }
    pub fn string(value: impl Into<String>) -> Self { Self::new(LiteralKind::String, value) }
    pub fn integer(value: impl Into<String>) -> Self { Self::new(LiteralKind::Integer, value) }
}

impl OrderByColumn {
    pub fn asc(name: impl Into<String>) -> Self { Self { name: name.into(), desc: false } }
    pub fn desc(name: impl Into<String>) -> Self { Self { name: name.into(), desc: true } }
}

impl From<Identifier> for Expr {
    fn from(identifier: Identifier) -> Self { Expr::Identifier(identifier) }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self { Expr::Literal(literal) }
}

impl Predicate {
    pub fn comparison(left: impl Into<Expr>, operator: ComparisonOperator, right: impl Into<Expr>) -> Self {
        Predicate::Comparison { left: Box::new(left.into()), operator, right: Box::new(right.into()) }
    }

    pub fn and(left: Predicate, right: Predicate) -> Self { Predicate::And(Box::new(left), Box::new(right)) }
    pub fn or(left: Predicate, right: Predicate) -> Self { Predicate::Or(Box::new(left), Box::new(right)) }
}
