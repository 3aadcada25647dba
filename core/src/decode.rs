//! Document to value decoding, and the typed copy of retrieved rows into a caller's destination.

use crate::error::MapError;
use crate::shape::Shaped;
use bson::{Bson, Document};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

pub trait Decode: Shaped + Sized {
    fn decode(value: Bson) -> Result<Self, MapError>;
}

/// Check that `T` can receive retrieved documents: it must be a record or a mapping.
pub fn check_destination<T: Shaped>() -> Result<(), MapError> {
    if T::SHAPE.is_document() {
        Ok(())
    } else {
        Err(MapError::ShapeMismatch { expected: "reference to a []struct or []map", found: std::any::type_name::<Vec<T>>() })
    }
}

/// Decode `rows` and replace the contents of `destination` with the result.
///
/// Every row is decoded before `destination` is touched, so on error it keeps its previous contents.
pub fn decode_into<T: Decode>(rows: Vec<Document>, destination: &mut Vec<T>) -> Result<(), MapError> {
    check_destination::<T>()?;
    let decoded = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| T::decode(Bson::Document(row)).map_err(|source| MapError::Copy { index, source: Box::new(source) }))
        .collect::<Result<Vec<T>, MapError>>()?;
    *destination = decoded;
    Ok(())
}

fn decode_integer<T: TryFrom<i64>>(value: Bson, expected: &'static str) -> Result<T, MapError> {
    let wide = match &value {
        Bson::Int32(i) => Some(i64::from(*i)),
        Bson::Int64(i) => Some(*i),
        // whole doubles only
        Bson::Double(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => Some(*f as i64),
        _ => None,
    };
    wide.and_then(|i| T::try_from(i).ok()).ok_or_else(|| MapError::type_mismatch(expected, &value))
}

macro_rules! decode_integers {
    ($($t:ty),* $(,)?) => {
        $(impl Decode for $t {
            fn decode(value: Bson) -> Result<Self, MapError> { decode_integer(value, stringify!($t)) }
        })*
    };
}

decode_integers!(i8, i16, i32, i64, isize, u8, u16, u32);

impl Decode for f64 {
    fn decode(value: Bson) -> Result<Self, MapError> {
        match value {
            Bson::Double(f) => Ok(f),
            Bson::Int32(i) => Ok(f64::from(i)),
            Bson::Int64(i) => Ok(i as f64),
            other => Err(MapError::type_mismatch("f64", &other)),
        }
    }
}

impl Decode for f32 {
    fn decode(value: Bson) -> Result<Self, MapError> {
        match value {
            Bson::Double(f) => Ok(f as f32),
            Bson::Int32(i) => Ok(i as f32),
            Bson::Int64(i) => Ok(i as f32),
            other => Err(MapError::type_mismatch("f32", &other)),
        }
    }
}

impl Decode for bool {
    fn decode(value: Bson) -> Result<Self, MapError> {
        match value {
            Bson::Boolean(b) => Ok(b),
            other => Err(MapError::type_mismatch("bool", &other)),
        }
    }
}

impl Decode for String {
    fn decode(value: Bson) -> Result<Self, MapError> {
        match value {
            Bson::String(s) | Bson::Symbol(s) => Ok(s),
            other => Err(MapError::type_mismatch("string", &other)),
        }
    }
}

impl Decode for bson::DateTime {
    fn decode(value: Bson) -> Result<Self, MapError> {
        match value {
            Bson::DateTime(dt) => Ok(dt),
            other => Err(MapError::type_mismatch("datetime", &other)),
        }
    }
}

impl Decode for bson::oid::ObjectId {
    fn decode(value: Bson) -> Result<Self, MapError> {
        match value {
            Bson::ObjectId(oid) => Ok(oid),
            other => Err(MapError::type_mismatch("object id", &other)),
        }
    }
}

impl Decode for Bson {
    fn decode(value: Bson) -> Result<Self, MapError> { Ok(value) }
}

impl Decode for Document {
    fn decode(value: Bson) -> Result<Self, MapError> {
        match value {
            Bson::Document(doc) => Ok(doc),
            other => Err(MapError::type_mismatch("document", &other)),
        }
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(value: Bson) -> Result<Self, MapError> { T::decode(value).map(Box::new) }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(value: Bson) -> Result<Self, MapError> {
        match value {
            Bson::Null | Bson::Undefined => Ok(None),
            other => T::decode(other).map(Some),
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(value: Bson) -> Result<Self, MapError> {
        match value {
            Bson::Array(items) => items.into_iter().enumerate().map(|(i, item)| T::decode(item).map_err(|e| e.at(i))).collect(),
            other => Err(MapError::type_mismatch("array", &other)),
        }
    }
}

impl<V: Decode, S: BuildHasher + Default> Decode for HashMap<String, V, S> {
    fn decode(value: Bson) -> Result<Self, MapError> { decode_entries(value).map(|entries| entries.collect()) }
}

impl<V: Decode> Decode for BTreeMap<String, V> {
    fn decode(value: Bson) -> Result<Self, MapError> { decode_entries(value).map(|entries| entries.collect()) }
}

fn decode_entries<V: Decode>(value: Bson) -> Result<impl Iterator<Item = (String, V)>, MapError> {
    let doc = Document::decode(value)?;
    let entries = doc
        .into_iter()
        .map(|(key, value)| match V::decode(value) {
            Ok(v) => Ok((key, v)),
            Err(e) => Err(e.at(key)),
        })
        .collect::<Result<Vec<_>, MapError>>()?;
    Ok(entries.into_iter())
}
