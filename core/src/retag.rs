//! Field annotations and their document-encoding equivalents.
//!
//! A record field carries at most one `docmux` annotation: an optional rename followed by
//! options, e.g. `"name,omitempty"`. Each field resolves to a [`FieldTag`], the entry consulted
//! by the encoder and decoder for that field. A field without an annotation keeps its declared
//! name and is never omitted.

use std::fmt;

/// Annotation namespace recognized on record fields
pub const TAG_NAMESPACE: &str = "docmux";
/// Annotation namespace of the document encoding the tags are rewritten into
pub const TARGET_NAMESPACE: &str = "bson";

pub const OMIT_EMPTY: &str = "omitempty";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub name: Option<String>,
    pub omit_empty: bool,
}

impl Annotation {
    /// Parse `"[name][,option]*"`. Unknown options are ignored.
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split(',');
        let name = parts.next().map(str::trim).filter(|name| !name.is_empty()).map(str::to_owned);
        let omit_empty = parts.any(|option| option.trim() == OMIT_EMPTY);
        Self { name, omit_empty }
    }

    /// Resolve this annotation for a field declared as `field`
    pub fn resolve(&self, field: &str) -> (String, bool) {
        (self.name.clone().unwrap_or_else(|| field.trim_start_matches("r#").to_owned()), self.omit_empty)
    }
}

/// The resolved annotation of one record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTag {
    /// Declared field name
    pub field: &'static str,
    /// Document key
    pub name: &'static str,
    pub omit_empty: bool,
}

impl FieldTag {
    pub const fn new(field: &'static str, name: &'static str, omit_empty: bool) -> Self { Self { field, name, omit_empty } }
}

/// A document key and its options, rendered in the target namespace
struct TargetTag<'a> {
    name: &'a str,
    omit_empty: bool,
}

impl fmt::Display for TargetTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\"{}", TARGET_NAMESPACE, self.name)?;
        if self.omit_empty {
            write!(f, ",{}", OMIT_EMPTY)?;
        }
        write!(f, "\"")
    }
}

/// Renders the equivalent target annotation, e.g. `bson:"value,omitempty"`
impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { TargetTag { name: self.name, omit_empty: self.omit_empty }.fmt(f) }
}

/// Rewrite a field's `docmux` annotation text into the target annotation text.
/// Fields without an annotation pass through with their declared name.
pub fn retag(field: &str, annotation: Option<&str>) -> String {
    let (name, omit_empty) = annotation.map(Annotation::parse).unwrap_or_default().resolve(field);
    TargetTag { name: &name, omit_empty }.to_string()
}
