//! One form-editing session: a store, its three graphs, and the
//! subject-of-interest.
//!
//! Loading is sequenced form → meta → source, suspending on each fetch
//! with no overlap. The session exclusively owns its store; nothing else
//! mutates it while the session lives.

use oxigraph::model::{NamedNode, Subject};
use uuid::Uuid;

use crate::client::FormsClient;
use crate::error::SyncError;
use crate::mapper;
use crate::params::{ProjectedParams, QueryParams};
use crate::store::FormStore;
use crate::vocab::{FORM_GRAPH, SOURCE_BASE, SOURCE_GRAPH, form, rdf};

/// Which search query backs the session's source graph.
pub enum SourceQuery {
    /// A query that exists server-side. `id` addresses the REST resource,
    /// `uri` is the subject-of-interest inside the RDF payload; the two
    /// are distinct identifiers.
    Existing { id: String, uri: NamedNode },
    /// A query that has never been saved: a fresh subject IRI is minted
    /// locally and no fetch is made, since the server holds no triples
    /// for it yet.
    Fresh,
}

/// A loaded form-editing session.
pub struct FormSession {
    store: FormStore,
    form_node: Option<NamedNode>,
    source_node: NamedNode,
    query_id: Option<String>,
}

impl FormSession {
    /// Load a session: form definition, then metadata, then source data.
    ///
    /// After the form graph is parsed, the form node is discovered as the
    /// first `form:Form`-typed subject; a form document without one is
    /// tolerated and surfaces as `form_node() == None`.
    pub async fn load(
        client: &FormsClient,
        form_uuid: &str,
        source: SourceQuery,
    ) -> Result<Self, SyncError> {
        let store = FormStore::new()?;

        client.retrieve_form_data(form_uuid, &store).await?;
        let form_node = store
            .any(
                None,
                Some(rdf::TYPE),
                Some(form::FORM.into()),
                FORM_GRAPH,
            )?
            .and_then(|triple| match triple.subject {
                Subject::NamedNode(node) => Some(node),
                _ => None,
            });
        if form_node.is_none() {
            tracing::warn!(form_uuid, "form definition declares no form:Form node");
        }

        client.retrieve_meta_data(form_uuid, &store).await?;

        let (query_id, source_node) = match source {
            SourceQuery::Existing { id, uri } => {
                client.retrieve_source_data(&id, &store).await?;
                (Some(id), uri)
            }
            SourceQuery::Fresh => (None, mint_source_uri()),
        };

        Ok(Self {
            store,
            form_node,
            source_node,
            query_id,
        })
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    /// The `form:Form` node of the loaded definition, when one exists.
    pub fn form_node(&self) -> Option<&NamedNode> {
        self.form_node.as_ref()
    }

    /// The subject-of-interest whose attributes the mapper reads/writes.
    pub fn source_node(&self) -> &NamedNode {
        &self.source_node
    }

    /// REST id of the backing query; `None` for a fresh session.
    pub fn query_id(&self) -> Option<&str> {
        self.query_id.as_deref()
    }

    /// Project the source graph onto the query-parameter space.
    pub fn project(&self) -> Result<ProjectedParams, SyncError> {
        mapper::form_store_to_query_params(&self.store, self.source_node.as_ref())
    }

    /// Merge a parameter mapping into the source graph (additive; see
    /// [`mapper::query_params_to_form_store`]).
    pub fn merge(&self, params: &QueryParams) -> Result<(), SyncError> {
        mapper::query_params_to_form_store(params, &self.store, self.source_node.as_ref())
    }

    /// Clear the source graph. Call before [`Self::merge`] to get
    /// overwrite instead of accumulate semantics.
    pub fn reset_source(&self) -> Result<(), SyncError> {
        self.store.clear_graph(SOURCE_GRAPH)
    }

    /// Persist the source graph under the given query id.
    pub async fn save(&self, client: &FormsClient, query_id: &str) -> Result<(), SyncError> {
        client.save_source_data(query_id, &self.store).await
    }
}

/// Mint a subject IRI for a query that has never been saved.
fn mint_source_uri() -> NamedNode {
    NamedNode::new_unchecked(format!("{SOURCE_BASE}{}", Uuid::new_v4()))
}
