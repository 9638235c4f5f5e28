//! Mapper contract tests: projection, merge, and their documented
//! asymmetries.

use oxigraph::model::{Literal, NamedNode, Term};
use search_form_sync::{
    FormStore, ParamValue, QueryParams, form_store_to_query_params, query_params_to_form_store,
    vocab,
};

const FORM_TTL: &str = r#"
    @prefix search: <http://redpencil.data.gift/vocabularies/search-queries/> .
    @prefix sh: <http://www.w3.org/ns/shacl#> .
    @prefix fields: <http://example.org/fields/> .
    @prefix pred: <http://example.org/pred/> .

    fields:status search:emberQueryParameterKey "statusUri" ;
        sh:path pred:status .
    fields:admin search:emberQueryParameterKey "bestuurseenheidIds" ;
        sh:path pred:adminUnit .
"#;

fn node() -> NamedNode {
    NamedNode::new("http://example.org/queries/q1").unwrap()
}

fn pred(local: &str) -> NamedNode {
    NamedNode::new(format!("http://example.org/pred/{local}")).unwrap()
}

fn store_with_form() -> FormStore {
    let store = FormStore::new().unwrap();
    store.parse_turtle(FORM_TTL, vocab::FORM_GRAPH).unwrap();
    store
}

fn insert_source_literal(store: &FormStore, predicate: &NamedNode, value: &str) {
    let n = node();
    let term = Term::Literal(Literal::new_simple_literal(value));
    store
        .insert(
            n.as_ref().into(),
            predicate.as_ref(),
            term.as_ref(),
            vocab::SOURCE_GRAPH,
        )
        .unwrap();
}

#[test]
fn test_round_trip_joins_values_with_commas() {
    let store = store_with_form();
    let status = pred("status");
    insert_source_literal(&store, &status, "a");
    insert_source_literal(&store, &status, "b");

    let projected = form_store_to_query_params(&store, node().as_ref()).unwrap();
    let value = projected
        .query_params
        .get("statusUri")
        .and_then(|v| v.as_present())
        .expect("statusUri should be present");

    // Join order follows the store's iteration order; the value set is
    // what the contract pins down.
    let mut parts: Vec<_> = value.split(',').collect();
    parts.sort_unstable();
    assert_eq!(parts, vec!["a", "b"]);
}

#[test]
fn test_single_value_projects_verbatim() {
    let store = store_with_form();
    insert_source_literal(&store, &pred("status"), "sent");

    let projected = form_store_to_query_params(&store, node().as_ref()).unwrap();
    assert_eq!(
        projected.query_params.get("statusUri"),
        Some(&ParamValue::Present("sent".into()))
    );
}

#[test]
fn test_absence_yields_explicit_null_never_omission() {
    let store = store_with_form();
    insert_source_literal(&store, &pred("status"), "sent");
    // No values at all for bestuurseenheidIds.

    let projected = form_store_to_query_params(&store, node().as_ref()).unwrap();
    assert_eq!(
        projected.query_params.get("bestuurseenheidIds"),
        Some(&ParamValue::Absent)
    );

    let json = serde_json::to_value(&projected).unwrap();
    assert_eq!(json["queryParams"]["bestuurseenheidIds"], serde_json::Value::Null);
    assert_eq!(json["queryParams"]["statusUri"], "sent");
}

#[test]
fn test_projection_for_other_subject_sees_nothing() {
    let store = store_with_form();
    insert_source_literal(&store, &pred("status"), "sent");

    let other = NamedNode::new("http://example.org/queries/q2").unwrap();
    let projected = form_store_to_query_params(&store, other.as_ref()).unwrap();
    assert_eq!(
        projected.query_params.get("statusUri"),
        Some(&ParamValue::Absent)
    );
}

#[test]
fn test_merge_skips_unknown_keys() {
    let store = store_with_form();
    let mut params = QueryParams::new();
    params.set("bar", "x");

    query_params_to_form_store(&params, &store, node().as_ref()).unwrap();
    assert_eq!(store.graph_len(vocab::SOURCE_GRAPH).unwrap(), 0);
}

#[test]
fn test_merge_classifies_uris_and_literals() {
    let store = store_with_form();
    let mut params = QueryParams::new();
    params.set("statusUri", "http://example.org/statuses/sent");
    params.set("bestuurseenheidIds", "plain text");

    query_params_to_form_store(&params, &store, node().as_ref()).unwrap();

    let status_values = store
        .match_pattern(
            Some(node().as_ref().into()),
            Some(pred("status").as_ref()),
            None,
            vocab::SOURCE_GRAPH,
        )
        .unwrap();
    assert!(matches!(&status_values[..], [t] if matches!(t.object, Term::NamedNode(_))));

    let admin_values = store
        .match_pattern(
            Some(node().as_ref().into()),
            Some(pred("adminUnit").as_ref()),
            None,
            vocab::SOURCE_GRAPH,
        )
        .unwrap();
    assert!(matches!(&admin_values[..], [t] if matches!(t.object, Term::Literal(_))));
}

#[test]
fn test_merge_splits_on_comma() {
    let store = store_with_form();
    let mut params = QueryParams::new();
    params.set("bestuurseenheidIds", "a,b,c");

    query_params_to_form_store(&params, &store, node().as_ref()).unwrap();

    let values = store
        .match_pattern(
            Some(node().as_ref().into()),
            Some(pred("adminUnit").as_ref()),
            None,
            vocab::SOURCE_GRAPH,
        )
        .unwrap();
    assert_eq!(values.len(), 3);
}

#[test]
fn test_merge_skips_absent_and_empty_values() {
    let store = store_with_form();
    let mut params = QueryParams::new();
    params.set_absent("statusUri");
    params.set("bestuurseenheidIds", "");

    query_params_to_form_store(&params, &store, node().as_ref()).unwrap();
    assert_eq!(store.graph_len(vocab::SOURCE_GRAPH).unwrap(), 0);
}

#[test]
fn test_merge_is_additive_stale_values_survive() {
    // Documented non-idempotence: merge never clears a predicate's old
    // values, so an edit accumulates rather than replaces.
    let store = store_with_form();

    let mut first = QueryParams::new();
    first.set("statusUri", "old");
    query_params_to_form_store(&first, &store, node().as_ref()).unwrap();

    let mut second = QueryParams::new();
    second.set("statusUri", "new");
    query_params_to_form_store(&second, &store, node().as_ref()).unwrap();

    let values = store
        .match_pattern(
            Some(node().as_ref().into()),
            Some(pred("status").as_ref()),
            None,
            vocab::SOURCE_GRAPH,
        )
        .unwrap();
    assert_eq!(values.len(), 2, "stale value must survive the second merge");

    // Explicit overwrite is the caller's move:
    store.clear_graph(vocab::SOURCE_GRAPH).unwrap();
    query_params_to_form_store(&second, &store, node().as_ref()).unwrap();
    assert_eq!(store.graph_len(vocab::SOURCE_GRAPH).unwrap(), 1);
}

#[test]
fn test_duplicate_declarations_first_wins_on_merge() {
    // Two declarations share the parameter name; lookup is first-match,
    // so exactly one of the two paths receives the value.
    let form = r#"
        @prefix search: <http://redpencil.data.gift/vocabularies/search-queries/> .
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix fields: <http://example.org/fields/> .
        @prefix pred: <http://example.org/pred/> .

        fields:one search:emberQueryParameterKey "dup" ; sh:path pred:p1 .
        fields:two search:emberQueryParameterKey "dup" ; sh:path pred:p2 .
    "#;
    let store = FormStore::new().unwrap();
    store.parse_turtle(form, vocab::FORM_GRAPH).unwrap();

    let mut params = QueryParams::new();
    params.set("dup", "x");
    query_params_to_form_store(&params, &store, node().as_ref()).unwrap();

    assert_eq!(store.graph_len(vocab::SOURCE_GRAPH).unwrap(), 1);

    // Projection visits every declaration but keeps one entry per name.
    let projected = form_store_to_query_params(&store, node().as_ref()).unwrap();
    assert_eq!(projected.query_params.len(), 1);
}

#[test]
fn test_projection_without_declarations_is_empty_mapping() {
    let store = FormStore::new().unwrap();
    let projected = form_store_to_query_params(&store, node().as_ref()).unwrap();
    assert!(projected.query_params.is_empty());

    let json = serde_json::to_string(&projected).unwrap();
    assert_eq!(json, r#"{"queryParams":{}}"#);
}
