mod common;

use std::collections::{BTreeMap, HashMap};

use common::*;
use docmux::bson::{doc, Bson, Document};
use docmux::core::retag::retag;
use docmux::core::{decode_into, encode_document, MapError};
use docmux::{Decode, Model};

#[test]
fn test_omit_empty_drops_empty_parent() -> anyhow::Result<()> {
    let row = L2 { value: "x".into(), l3: L3 { value: 0 } };
    assert_eq!(encode_document(&row)?, doc! { "value": "x" });

    let row = L2 { value: "x".into(), l3: L3 { value: 4 } };
    assert_eq!(encode_document(&row)?, doc! { "value": "x", "l3": { "value": 4 } });
    Ok(())
}

#[test]
fn test_fields_without_omit_empty_are_kept() -> anyhow::Result<()> {
    // `value` has no omitempty, `note` is absent and skipped rather than null
    let row = L1::default();
    assert_eq!(encode_document(&row)?, doc! { "value": "" });
    Ok(())
}

#[test]
fn test_encode_in_declaration_order() -> anyhow::Result<()> {
    let mut row = l1("a", "b", 3);
    row.tags = vec!["t1".into(), String::new(), "t2".into()];
    row.attrs = HashMap::from([("zeta".to_string(), 1), ("alpha".to_string(), 0), ("mid".to_string(), 2)]);
    row.note = Some("n".into());

    let doc = encode_document(&row)?;
    assert_eq!(
        doc,
        doc! {
            "value": "a",
            "l2": { "value": "b", "l3": { "value": 3 } },
            // omitempty flows into the sequence and the map
            "tags": ["t1", "t2"],
            "attrs": { "mid": 2_i64, "zeta": 1_i64 },
            "note": "n",
        }
    );
    assert_eq!(doc.keys().collect::<Vec<_>>(), ["value", "l2", "tags", "attrs", "note"]);
    Ok(())
}

#[test]
fn test_round_trip() -> anyhow::Result<()> {
    let mut original = l1("a", "b", 3);
    original.tags = vec!["t".into()];
    original.attrs = HashMap::from([("k".to_string(), 9)]);
    original.note = Some("n".into());

    let mut rows: Vec<L1> = Vec::new();
    decode_into(vec![encode_document(&original)?], &mut rows)?;
    assert_eq!(rows, vec![original]);
    Ok(())
}

#[test]
fn test_round_trip_of_omitted_fields() -> anyhow::Result<()> {
    // omitted zero values come back as their zero value
    let original = l1("a", "", 0);
    let encoded = encode_document(&original)?;
    assert_eq!(encoded, doc! { "value": "a", "l2": { "value": "" } });
    assert_eq!(L1::decode(Bson::Document(encoded))?, original);
    Ok(())
}

#[test]
fn test_hash_map_encoding_is_deterministic() -> anyhow::Result<()> {
    let mut map: HashMap<String, Bson> = HashMap::new();
    for key in ["delta", "alpha", "charlie", "bravo", "echo"] {
        map.insert(key.to_string(), Bson::String(key.to_uppercase()));
    }
    let first = encode_document(&map)?;
    let second = encode_document(&map)?;
    assert_eq!(first.keys().collect::<Vec<_>>(), ["alpha", "bravo", "charlie", "delta", "echo"]);
    assert_eq!(first.keys().collect::<Vec<_>>(), second.keys().collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_decode_into_maps() -> anyhow::Result<()> {
    let mut rows: Vec<BTreeMap<String, Bson>> = Vec::new();
    decode_into(vec![doc! { "b": 1, "a": { "x": true } }], &mut rows)?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("a"), Some(&Bson::Document(doc! { "x": true })));
    Ok(())
}

#[test]
fn test_decode_ignores_unknown_keys_and_nulls() -> anyhow::Result<()> {
    let decoded = L1::decode(Bson::Document(doc! { "value": "v", "note": Bson::Null, "unknown": 1, "l2": { "value": "w" } }))?;
    assert_eq!(decoded, l1("v", "w", 0));
    Ok(())
}

#[test]
fn test_decode_failure_is_a_copy_error() {
    let mut rows = vec![l1("keep", "", 0)];
    let err = decode_into(vec![doc! { "value": "ok" }, doc! { "value": "ok", "l2": { "l3": { "value": "three" } } }], &mut rows).unwrap_err();
    assert_eq!(
        err,
        MapError::Copy {
            index: 1,
            source: Box::new(MapError::TypeMismatch { path: "l2.l3.value".into(), expected: "i32", found: "String".into() })
        }
    );
    assert_eq!(rows, vec![l1("keep", "", 0)]);
}

#[test]
fn test_shape_mismatch_names_the_type() {
    let err = encode_document(&vec![1, 2, 3]).unwrap_err();
    assert!(matches!(err, MapError::ShapeMismatch { found, .. } if found.contains("Vec<i32>")));

    let mut rows: Vec<i64> = Vec::new();
    assert!(matches!(decode_into(vec![Document::new()], &mut rows), Err(MapError::ShapeMismatch { .. })));
}

#[test]
fn test_field_tags() {
    assert_eq!(L1::document_key("l2"), Some("l2"));
    assert_eq!(L1::document_key("note"), Some("note"));
    let rendered: Vec<String> = L1::FIELDS.iter().map(|tag| tag.to_string()).collect();
    assert_eq!(rendered, ["bson:\"value\"", "bson:\"l2,omitempty\"", "bson:\"tags,omitempty\"", "bson:\"attrs,omitempty\"", "bson:\"note\""]);

    // the derived table agrees with rewriting the annotation text directly
    let annotations = [Some("value"), Some("l2,omitempty"), Some(",omitempty"), Some("attrs,omitempty"), None];
    let rewritten: Vec<String> = L1::FIELDS.iter().zip(annotations).map(|(tag, text)| retag(tag.field, text)).collect();
    assert_eq!(rewritten, rendered);
}
