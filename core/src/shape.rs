//! Shape tags for the generic document mapper.
//!
//! Every mappable type reports one of a small closed set of shapes. The mapper dispatches on
//! these rather than on runtime type information.

use bson::{Bson, Document};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Sequence,
    /// Key/value map with runtime keys
    Mapping,
    /// Struct with a fixed field table
    Record,
}

impl Shape {
    pub fn is_document(&self) -> bool { matches!(self, Shape::Mapping | Shape::Record) }
}

pub trait Shaped {
    const SHAPE: Shape;
}

macro_rules! scalar_shape {
    ($($t:ty),* $(,)?) => {
        $(impl Shaped for $t {
            const SHAPE: Shape = Shape::Scalar;
        })*
    };
}

scalar_shape!(bool, i8, i16, i32, i64, isize, u8, u16, u32, f32, f64, String, Bson, bson::DateTime, bson::oid::ObjectId);

impl Shaped for str {
    const SHAPE: Shape = Shape::Scalar;
}

impl<T: Shaped + ?Sized> Shaped for &T {
    const SHAPE: Shape = T::SHAPE;
}

impl<T: Shaped + ?Sized> Shaped for Box<T> {
    const SHAPE: Shape = T::SHAPE;
}

impl<T: Shaped> Shaped for Option<T> {
    const SHAPE: Shape = T::SHAPE;
}

impl<T: Shaped> Shaped for Vec<T> {
    const SHAPE: Shape = Shape::Sequence;
}

impl<T: Shaped> Shaped for [T] {
    const SHAPE: Shape = Shape::Sequence;
}

impl<T: Shaped, const N: usize> Shaped for [T; N] {
    const SHAPE: Shape = Shape::Sequence;
}

impl<V: Shaped, S> Shaped for HashMap<String, V, S> {
    const SHAPE: Shape = Shape::Mapping;
}

impl<V: Shaped> Shaped for BTreeMap<String, V> {
    const SHAPE: Shape = Shape::Mapping;
}

impl Shaped for Document {
    const SHAPE: Shape = Shape::Mapping;
}
