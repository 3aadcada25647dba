mod common;

use docmux::bson::{doc, Bson, Document};
use docql::ast::{ComparisonOperator, Expr, Identifier, Literal, Predicate};
use docql::parser::bind_placeholders;
use docql::pipeline::group_pipeline;
use docql::selection::filter::compile_predicate;
use docql::selection::group::ungroup_rows;
use docql::{compile_where, parse_selection};

#[test]
fn test_nested_path_scenario() -> anyhow::Result<()> {
    let filter = compile_where("value = ? and l2.value = ?", &["val34".into(), "val23".into()])?;
    assert_eq!(
        filter,
        doc! { "$and": [
            { "value": { "$exists": true, "$eq": "val34" } },
            { "l2.value": { "$exists": true, "$eq": "val23" } },
        ] }
    );
    Ok(())
}

#[test]
fn test_quoted_arguments_survive_binding() -> anyhow::Result<()> {
    let args: Vec<Bson> = vec!["it's a \\ path".into()];
    assert_eq!(bind_placeholders("name = ?", &args), "name = 'it''s a \\\\ path'");
    assert_eq!(compile_where("name = ?", &args)?, doc! { "name": { "$exists": true, "$eq": "it's a \\ path" } });
    Ok(())
}

#[test]
fn test_argument_types() -> anyhow::Result<()> {
    let filter = compile_where("a = ? and b = ? or c = ?", &[Bson::Boolean(false), Bson::Double(0.5), Bson::Int64(-7)])?;
    assert_eq!(
        filter,
        doc! { "$or": [
            { "$and": [
                { "a": { "$exists": true, "$eq": false } },
                { "b": { "$exists": true, "$eq": 0.5 } },
            ] },
            { "c": { "$exists": true, "$eq": -7_i64 } },
        ] }
    );
    Ok(())
}

#[test]
fn test_every_comparison_has_exists_guard() {
    let operators = [
        (ComparisonOperator::Equal, "$eq"),
        (ComparisonOperator::NotEqual, "$ne"),
        (ComparisonOperator::GreaterThan, "$gt"),
        (ComparisonOperator::GreaterThanOrEqual, "$gte"),
        (ComparisonOperator::LessThan, "$lt"),
        (ComparisonOperator::LessThanOrEqual, "$lte"),
    ];
    for (operator, op) in operators {
        let predicate = Predicate::comparison(Identifier::new("a.b"), operator, Literal::string("x"));
        let mut expected = doc! { "$exists": true };
        expected.insert(op, "x");
        assert_eq!(compile_predicate(&predicate), Some(doc! { "a.b": expected }));
    }
}

#[test]
fn test_connectives_are_all_or_nothing() {
    let present = Predicate::comparison(Identifier::new("a"), ComparisonOperator::Equal, Literal::integer("1"));
    let absent = Predicate::IsNull { expr: Box::new(Expr::Identifier(Identifier::new("b"))), negated: false };

    assert_eq!(compile_predicate(&Predicate::and(present.clone(), absent.clone())), None);
    assert_eq!(compile_predicate(&Predicate::and(absent.clone(), present.clone())), None);
    assert_eq!(compile_predicate(&Predicate::or(present.clone(), absent)), None);
    assert_eq!(
        compile_predicate(&Predicate::or(present.clone(), present)),
        Some(doc! { "$or": [{ "a": { "$exists": true, "$eq": 1_i64 } }, { "a": { "$exists": true, "$eq": 1_i64 } }] })
    );
}

#[test]
fn test_parse_then_compile_matches_compile_where() -> anyhow::Result<()> {
    let predicate = parse_selection("x >= 3 and (y = 'a' or y = 'b')")?;
    let expected = compile_where("x >= ? and (y = ? or y = ?)", &[3.into(), "a".into(), "b".into()])?;
    assert_eq!(compile_predicate(&predicate), Some(expected));
    Ok(())
}

#[test]
fn test_group_key_round_trip() -> anyhow::Result<()> {
    let pipeline = group_pipeline(&Document::new(), &["l2.l3.value"], &[], 0, 0);
    assert_eq!(pipeline, vec![doc! { "$group": { "_id": { "l2->l3->value": "$l2.l3.value" } } }]);

    // what the server sends back for that stage
    let rows = ungroup_rows(vec![doc! { "_id": { "l2->l3->value": 7 } }])?;
    assert_eq!(rows, vec![doc! { "l2.l3.value": 7 }]);
    Ok(())
}
