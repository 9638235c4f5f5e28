//! Typed facade over the oxigraph store.
//!
//! One `FormStore` backs one form-editing session. Triples are partitioned
//! into the three named graphs from [`crate::vocab`]: the form graph
//! (schema and mapping declarations), the meta graph (auxiliary metadata)
//! and the source graph (submission data). The facade narrows the store's
//! untyped quad surface to the handful of operations the sync layer needs:
//! parse Turtle into one graph, pattern matching, single-triple lookup,
//! insertion, graph clearing and a per-graph N-Triples dump.

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::{GraphNameRef, NamedNodeRef, QuadRef, SubjectRef, TermRef, Triple};
use oxigraph::store::Store;

use crate::error::SyncError;

/// In-memory triple store partitioned into the session's named graphs.
pub struct FormStore {
    store: Store,
}

impl FormStore {
    pub fn new() -> Result<Self, SyncError> {
        Ok(Self {
            store: Store::new().map_err(SyncError::store)?,
        })
    }

    /// Parse a Turtle document into `graph`.
    ///
    /// Additive: repeated parses of the same document duplicate nothing at
    /// the store level (quads are set-unique), but parsing different
    /// documents into one graph accumulates. A parse failure leaves the
    /// graph partially populated; there is no rollback.
    pub fn parse_turtle(&self, turtle: &str, graph: NamedNodeRef<'_>) -> Result<(), SyncError> {
        let parser = RdfParser::from_format(RdfFormat::Turtle)
            .without_named_graphs()
            .with_default_graph(graph.into_owned());
        self.store
            .load_from_reader(parser, turtle.as_bytes())
            .map_err(|e| SyncError::parse(graph, e))
    }

    /// All triples in `graph` matching the pattern. `None` positions are
    /// wildcards. Iteration order is the store's, and the mapper relies on
    /// it being stable within one session.
    pub fn match_pattern(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
        graph: NamedNodeRef<'_>,
    ) -> Result<Vec<Triple>, SyncError> {
        let mut triples = Vec::new();
        for quad in
            self.store
                .quads_for_pattern(subject, predicate, object, Some(graph.into()))
        {
            let quad = quad.map_err(SyncError::store)?;
            triples.push(Triple::new(quad.subject, quad.predicate, quad.object));
        }
        Ok(triples)
    }

    /// First triple in `graph` matching the pattern, if any.
    pub fn any(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
        graph: NamedNodeRef<'_>,
    ) -> Result<Option<Triple>, SyncError> {
        match self
            .store
            .quads_for_pattern(subject, predicate, object, Some(graph.into()))
            .next()
        {
            Some(Ok(quad)) => Ok(Some(Triple::new(quad.subject, quad.predicate, quad.object))),
            Some(Err(e)) => Err(SyncError::store(e)),
            None => Ok(None),
        }
    }

    /// Insert one triple into `graph`.
    pub fn insert(
        &self,
        subject: SubjectRef<'_>,
        predicate: NamedNodeRef<'_>,
        object: TermRef<'_>,
        graph: NamedNodeRef<'_>,
    ) -> Result<(), SyncError> {
        self.store
            .insert(QuadRef::new(subject, predicate, object, graph))
            .map_err(SyncError::store)?;
        Ok(())
    }

    /// Drop every triple in `graph`, leaving the other graphs untouched.
    /// This is the overwrite escape hatch for the additive merge.
    pub fn clear_graph(&self, graph: NamedNodeRef<'_>) -> Result<(), SyncError> {
        self.store
            .clear_graph(GraphNameRef::from(graph))
            .map_err(SyncError::store)
    }

    /// Serialize `graph` alone as N-Triples, graph label dropped.
    ///
    /// This is the merged-graph view the saver PUTs back: serializing the
    /// whole store instead would leak form and meta triples.
    pub fn dump_graph_ntriples(&self, graph: NamedNodeRef<'_>) -> Result<String, SyncError> {
        let buffer = self
            .store
            .dump_graph_to_writer(GraphNameRef::from(graph), RdfFormat::NTriples, Vec::new())
            .map_err(SyncError::serialize)?;
        String::from_utf8(buffer).map_err(SyncError::serialize)
    }

    /// Number of triples in `graph`.
    pub fn graph_len(&self, graph: NamedNodeRef<'_>) -> Result<usize, SyncError> {
        let mut count = 0;
        for quad in self
            .store
            .quads_for_pattern(None, None, None, Some(graph.into()))
        {
            quad.map_err(SyncError::store)?;
            count += 1;
        }
        Ok(count)
    }
}
