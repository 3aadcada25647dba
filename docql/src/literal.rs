//! Coercion of where-clause literal tokens into typed values.
//!
//! Coercion never fails loudly: a token that cannot be represented yields `None`, which the
//! filter compiler treats as an absent comparison.

use crate::ast::{Literal, LiteralKind};
use bson::spec::BinarySubtype;
use bson::{Binary, Bson};

#[derive(Debug, Clone, PartialEq)]
pub enum TypedLiteral {
    String(String),
    Int64(i64),
    Float64(f64),
    Bool(bool),
    /// An `X'..'` literal, decoded from hexadecimal and read as UTF-8 text
    HexText(String),
    /// An `X'..'` literal whose bytes are not UTF-8
    HexBytes(Vec<u8>),
}

impl From<TypedLiteral> for Bson {
    fn from(literal: TypedLiteral) -> Self {
        match literal {
            TypedLiteral::String(s) | TypedLiteral::HexText(s) => Bson::String(s),
            TypedLiteral::Int64(i) => Bson::Int64(i),
            TypedLiteral::Float64(f) => Bson::Double(f),
            TypedLiteral::Bool(b) => Bson::Boolean(b),
            TypedLiteral::HexBytes(bytes) => Bson::Binary(Binary { subtype: BinarySubtype::Generic, bytes }),
        }
    }
}

/// Coerce a literal by its lexical class, or `None` when it is unrepresentable.
pub fn coerce(literal: &Literal) -> Option<TypedLiteral> {
    let raw = literal.value.as_str();
    match literal.kind {
        LiteralKind::String => Some(TypedLiteral::String(literal.value.clone())),
        LiteralKind::Hex => decode_hex(raw).map(|bytes| match String::from_utf8(bytes) {
            Ok(text) => TypedLiteral::HexText(text),
            Err(e) => TypedLiteral::HexBytes(e.into_bytes()),
        }),
        LiteralKind::Integer | LiteralKind::HexNumber => parse_int(raw).map(TypedLiteral::Int64),
        LiteralKind::Decimal | LiteralKind::Float => raw.parse::<f64>().ok().map(TypedLiteral::Float64),
        LiteralKind::Boolean => Some(TypedLiteral::Bool(raw.eq_ignore_ascii_case("true"))),
        LiteralKind::Null => None,
    }
}

/// Parse a signed 64-bit integer, inferring the base from its prefix:
/// `0x` hexadecimal, `0o` or a bare leading `0` octal, `0b` binary, decimal otherwise.
/// Underscores may separate digits.
pub fn parse_int(raw: &str) -> Option<i64> {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let lower = unsigned.to_ascii_lowercase();
    let (radix, digits, prefixed) = if let Some(d) = lower.strip_prefix("0x") {
        (16, d, true)
    } else if let Some(d) = lower.strip_prefix("0o") {
        (8, d, true)
    } else if let Some(d) = lower.strip_prefix("0b") {
        (2, d, true)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..], true)
    } else {
        (10, lower.as_str(), false)
    };

    if !valid_underscores(digits, prefixed) {
        return None;
    }
    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() || digits.starts_with(&['+', '-'][..]) {
        return None;
    }

    let magnitude = u64::from_str_radix(&digits, radix).ok()?;
    if negative {
        if magnitude == i64::MIN.unsigned_abs() {
            Some(i64::MIN)
        } else {
            i64::try_from(magnitude).ok().map(|v| -v)
        }
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// Underscores must sit between digits, or directly after a base prefix
fn valid_underscores(digits: &str, prefixed: bool) -> bool {
    if !digits.contains('_') {
        return true;
    }
    if digits.ends_with('_') || digits.contains("__") {
        return false;
    }
    prefixed || !digits.starts_with('_')
}

/// Decode an even-length string of hexadecimal digits
pub fn decode_hex(digits: &str) -> Option<Vec<u8>> {
    if digits.len() % 2 != 0 {
        return None;
    }
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16)?;
            let lo = (pair[1] as char).to_digit(16)?;
            Some((hi * 16 + lo) as u8)
        })
        .collect()
}
