//! Value to document encoding.
//!
//! `encode` returns `None` for an absent value (an unset `Option`); absent values are skipped
//! wherever they appear. The `omit_empty` flag travels down through sequences and mappings,
//! where it drops empty elements. Records ignore the incoming flag and apply their own per-field
//! flags instead.

use crate::error::MapError;
use crate::shape::{Shape, Shaped};
use bson::{Bson, Document};
use std::collections::{BTreeMap, HashMap};

pub trait Encode: Shaped {
    fn encode(&self, omit_empty: bool) -> Option<Bson>;
}

/// Empty sequences and documents, and the zero value of each scalar type, are empty.
pub fn is_empty(value: &Bson) -> bool {
    match value {
        Bson::Array(items) => items.is_empty(),
        Bson::Document(doc) => doc.is_empty(),
        Bson::String(s) => s.is_empty(),
        Bson::Boolean(b) => !b,
        Bson::Int32(i) => *i == 0,
        Bson::Int64(i) => *i == 0,
        // bitwise, so -0.0 is not empty
        Bson::Double(f) => f.to_bits() == 0,
        _ => false,
    }
}

/// Encode a record or mapping into a document.
pub fn encode_document<T: Encode + ?Sized>(value: &T) -> Result<Document, MapError> {
    if !T::SHAPE.is_document() {
        return Err(MapError::ShapeMismatch { expected: "reference to a struct or map", found: std::any::type_name::<T>() });
    }
    match value.encode(false) {
        Some(Bson::Document(doc)) => Ok(doc),
        _ => Err(MapError::NotADocument),
    }
}

pub fn encode_sequence<'a, T: Encode + 'a>(items: impl IntoIterator<Item = &'a T>, omit_empty: bool) -> Bson {
    Bson::Array(items.into_iter().filter_map(|item| item.encode(omit_empty)).filter(|value| !(omit_empty && is_empty(value))).collect())
}

/// Encode key/value pairs in the order given
pub fn encode_entries<'a, V: Encode + 'a>(entries: impl IntoIterator<Item = (&'a String, &'a V)>, omit_empty: bool) -> Bson {
    let mut doc = Document::new();
    for (key, value) in entries {
        if let Some(encoded) = value.encode(omit_empty) {
            if omit_empty && is_empty(&encoded) {
                continue;
            }
            doc.insert(key.clone(), encoded);
        }
    }
    Bson::Document(doc)
}

macro_rules! encode_into_bson {
    ($($t:ty),* $(,)?) => {
        $(impl Encode for $t {
            fn encode(&self, _omit_empty: bool) -> Option<Bson> { Some(Bson::from(self.clone())) }
        })*
    };
}

encode_into_bson!(bool, i32, i64, f64, String, bson::DateTime, bson::oid::ObjectId);

macro_rules! encode_widened {
    ($($t:ty => $wide:ty),* $(,)?) => {
        $(impl Encode for $t {
            fn encode(&self, _omit_empty: bool) -> Option<Bson> { Some(Bson::from(<$wide>::from(*self))) }
        })*
    };
}

encode_widened!(i8 => i32, i16 => i32, u8 => i32, u16 => i32, u32 => i64, f32 => f64);

impl Encode for isize {
    // isize is at most 64 bits on every supported target
    fn encode(&self, _omit_empty: bool) -> Option<Bson> { Some(Bson::Int64(*self as i64)) }
}

impl Encode for str {
    fn encode(&self, _omit_empty: bool) -> Option<Bson> { Some(Bson::String(self.to_owned())) }
}

impl Encode for Bson {
    fn encode(&self, omit_empty: bool) -> Option<Bson> {
        match self {
            Bson::Array(items) => Some(encode_sequence(items, omit_empty)),
            Bson::Document(doc) => doc.encode(omit_empty),
            other => Some(other.clone()),
        }
    }
}

impl Encode for Document {
    // documents are already ordered, so keys keep their insertion order
    fn encode(&self, omit_empty: bool) -> Option<Bson> { Some(encode_entries(self.iter(), omit_empty)) }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, omit_empty: bool) -> Option<Bson> { (**self).encode(omit_empty) }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, omit_empty: bool) -> Option<Bson> { (**self).encode(omit_empty) }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, omit_empty: bool) -> Option<Bson> { self.as_ref()?.encode(omit_empty) }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, omit_empty: bool) -> Option<Bson> { Some(encode_sequence(self, omit_empty)) }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, omit_empty: bool) -> Option<Bson> { Some(encode_sequence(self, omit_empty)) }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(&self, omit_empty: bool) -> Option<Bson> { Some(encode_sequence(self, omit_empty)) }
}

impl<V: Encode, S> Encode for HashMap<String, V, S> {
    fn encode(&self, omit_empty: bool) -> Option<Bson> {
        // sorted so that repeated encodes produce identical key order
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        Some(encode_entries(entries, omit_empty))
    }
}

impl<V: Encode> Encode for BTreeMap<String, V> {
    fn encode(&self, omit_empty: bool) -> Option<Bson> { Some(encode_entries(self, omit_empty)) }
}
