use crate::decode::Decode;
use crate::encode::{is_empty, Encode};
use crate::error::MapError;
use crate::retag::FieldTag;
use bson::{Bson, Document};
use tracing::trace;

/// A record type with a fixed field table, usually implemented with `#[derive(Model)]`.
///
/// Decoding starts from `Default`, so fields missing from a document keep their default value.
pub trait Model: Encode + Decode + Default {
    /// One entry per field, in declaration order
    const FIELDS: &'static [FieldTag];

    fn field_tag(field: &str) -> Option<&'static FieldTag> { Self::FIELDS.iter().find(|tag| tag.field == field) }

    /// The document key a field is stored under
    fn document_key(field: &str) -> Option<&'static str> { Self::field_tag(field).map(|tag| tag.name) }
}

/// Encode one record field into `doc` under its tag.
///
/// Absent values are skipped. An empty value is skipped when the tag says `omitempty`; for a
/// nested record the emptiness check applies to its encoded document.
pub fn encode_field<T: Encode + ?Sized>(doc: &mut Document, tag: &FieldTag, value: &T) {
    let Some(encoded) = value.encode(tag.omit_empty) else {
        trace!("skipping absent field {}", tag.field);
        return;
    };
    if tag.omit_empty && is_empty(&encoded) {
        trace!("omitting empty field {} ({})", tag.field, tag);
        return;
    }
    doc.insert(tag.name, encoded);
}

/// Take one record field out of `doc`. A missing or null entry yields `None`.
pub fn decode_field<T: Decode>(doc: &mut Document, tag: &FieldTag) -> Result<Option<T>, MapError> {
    match doc.remove(tag.name) {
        None | Some(Bson::Null) => Ok(None),
        Some(value) => T::decode(value).map(Some).map_err(|e| e.at(tag.name)),
    }
}

/// Unwrap the document a record decodes from
pub fn expect_document<T>(value: Bson) -> Result<Document, MapError> {
    match value {
        Bson::Document(doc) => Ok(doc),
        other => Err(MapError::TypeMismatch {
            path: String::new(),
            expected: std::any::type_name::<T>(),
            found: format!("{:?}", other.element_type()),
        }),
    }
}
