//! Bidirectional mapping between the source graph and the flat
//! query-parameter space.
//!
//! Both directions are driven by the mapping declarations loaded into the
//! form graph: pairs of triples
//! `(field, search:emberQueryParameterKey, "name")` and
//! `(field, sh:path, predicate)` binding an external parameter name to the
//! predicate whose values it mirrors on the subject-of-interest.

use oxigraph::model::{Literal, NamedNode, NamedNodeRef, Subject, Term};

use crate::error::SyncError;
use crate::params::{ProjectedParams, QueryParams};
use crate::store::FormStore;
use crate::uri::valid_uri;
use crate::vocab::{FORM_GRAPH, SOURCE_GRAPH, search, sh};

/// Project the source graph onto the query-parameter space.
///
/// Every declared parameter appears in the result: with the comma-joined
/// string of its values when the source graph holds any, or explicitly
/// absent when it holds none, so a stale router value never survives a
/// switch to another entity. With no declarations at all the result is an
/// empty mapping.
pub fn form_store_to_query_params(
    store: &FormStore,
    node: NamedNodeRef<'_>,
) -> Result<ProjectedParams, SyncError> {
    let mut params = QueryParams::new();
    let declarations =
        store.match_pattern(None, Some(search::QUERY_PARAMETER_KEY), None, FORM_GRAPH)?;
    for declaration in declarations {
        let name = term_string_value(&declaration.object);
        let Some(path) = declaration_path(store, &declaration.subject)? else {
            continue;
        };
        let values = store.match_pattern(
            Some(node.into()),
            Some(path.as_ref()),
            None,
            SOURCE_GRAPH,
        )?;
        if values.is_empty() {
            params.set_absent(name);
        } else {
            let joined = values
                .iter()
                .map(|triple| term_string_value(&triple.object))
                .collect::<Vec<_>>()
                .join(",");
            params.set(name, joined);
        }
    }
    Ok(ProjectedParams {
        query_params: params,
    })
}

/// Merge a query-parameter mapping into the source graph.
///
/// Additive only: pre-existing triples for a predicate are never removed
/// before new values are written, so a field edited to a different value
/// accumulates both the old and the new triple until the caller clears the
/// source graph (`FormStore::clear_graph` / `FormSession::reset_source`).
/// Keys with no mapping declaration, declarations without a usable
/// `sh:path`, and absent or empty values are all skipped silently.
pub fn query_params_to_form_store(
    params: &QueryParams,
    store: &FormStore,
    node: NamedNodeRef<'_>,
) -> Result<(), SyncError> {
    for (key, value) in params.iter() {
        let key_literal = Term::Literal(Literal::new_simple_literal(key.as_str()));
        let Some(declaration) = store.any(
            None,
            Some(search::QUERY_PARAMETER_KEY),
            Some(key_literal.as_ref()),
            FORM_GRAPH,
        )?
        else {
            tracing::debug!(key = %key, "no mapping declaration for parameter, skipping");
            continue;
        };
        let Some(path) = declaration_path(store, &declaration.subject)? else {
            continue;
        };
        let Some(raw) = value.as_present() else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        for value in raw.split(',') {
            let term = classify_value(value);
            store.insert(node.into(), path.as_ref(), term.as_ref(), SOURCE_GRAPH)?;
        }
    }
    Ok(())
}

/// Resolve the `sh:path` of a field declaration. Declarations with no path
/// triple, or whose path is not a named node, yield `None` and are skipped
/// by both directions.
fn declaration_path(store: &FormStore, field: &Subject) -> Result<Option<NamedNode>, SyncError> {
    let Some(triple) = store.any(Some(field.as_ref()), Some(sh::PATH), None, FORM_GRAPH)? else {
        return Ok(None);
    };
    match triple.object {
        Term::NamedNode(path) => Ok(Some(path)),
        _ => Ok(None),
    }
}

/// The plain string value of a term: IRI for named nodes, lexical form for
/// literals, label for blank nodes.
fn term_string_value(term: &Term) -> String {
    match term {
        Term::NamedNode(n) => n.as_str().to_owned(),
        Term::Literal(l) => l.value().to_owned(),
        Term::BlankNode(b) => b.as_str().to_owned(),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

fn classify_value(value: &str) -> Term {
    if valid_uri(value) {
        // A value can match the URI shape and still be no parseable IRI
        // (embedded spaces); those degrade to literals like everything else.
        if let Ok(node) = NamedNode::new(value) {
            return Term::NamedNode(node);
        }
    }
    Term::Literal(Literal::new_simple_literal(value))
}
