//! HTTP loaders for form schema, form metadata and source data.
//!
//! One `reqwest::Client` per `FormsClient`, built once with a request
//! timeout. Endpoints, methods and headers mirror the backing service
//! exactly:
//!
//! | operation | method | path | header |
//! |---|---|---|---|
//! | form schema | GET | `/search-query-forms/:uuid` | none |
//! | form metadata | GET | `/search-query-forms/:uuid/meta` | none |
//! | source data | GET | `/search-queries/:id` | `Accept: text/turtle` |
//! | save source | PUT | `/search-queries/:id` | `Content-Type: application/n-triples` |
//! | remove source | DELETE | `/search-queries/:id` | none |
//!
//! Failures propagate without retry. Loads are additive into their
//! designated graph; a repeated load against a non-empty store accumulates.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::config::ClientConfig;
use crate::error::SyncError;
use crate::store::FormStore;
use crate::vocab::{FORM_GRAPH, META_GRAPH, SOURCE_GRAPH};

/// Serialization the service speaks on reads.
pub const TURTLE: &str = "text/turtle";
/// Serialization the saver writes. The store's default dump format would
/// be Turtle; the service expects N-Triples on PUT, so the saver deviates
/// deliberately.
pub const N_TRIPLES: &str = "application/n-triples";

/// Client for the search-query-forms and search-queries resources.
#[derive(Debug, Clone)]
pub struct FormsClient {
    http: reqwest::Client,
    base_url: String,
}

impl FormsClient {
    pub fn new(config: &ClientConfig) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SyncError::Network {
                method: "CLIENT",
                url: config.base_url.clone(),
                error: e.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET the form definition and parse it into the form graph.
    pub async fn retrieve_form_data(
        &self,
        form_uuid: &str,
        store: &FormStore,
    ) -> Result<(), SyncError> {
        let url = format!("{}/search-query-forms/{}", self.base_url, form_uuid);
        tracing::debug!(%url, "loading form definition");
        let body = self.get_text(&url, None).await?;
        store.parse_turtle(&body, FORM_GRAPH)
    }

    /// GET the form metadata and parse it into the meta graph.
    pub async fn retrieve_meta_data(
        &self,
        form_uuid: &str,
        store: &FormStore,
    ) -> Result<(), SyncError> {
        let url = format!("{}/search-query-forms/{}/meta", self.base_url, form_uuid);
        tracing::debug!(%url, "loading form metadata");
        let body = self.get_text(&url, None).await?;
        store.parse_turtle(&body, META_GRAPH)
    }

    /// GET the submission data for one search query and parse it into the
    /// source graph.
    pub async fn retrieve_source_data(
        &self,
        query_id: &str,
        store: &FormStore,
    ) -> Result<(), SyncError> {
        let url = self.query_url(query_id);
        tracing::debug!(%url, "loading source data");
        let body = self.get_text(&url, Some(TURTLE)).await?;
        store.parse_turtle(&body, SOURCE_GRAPH)
    }

    /// PUT the source graph, serialized as N-Triples, back to the service.
    ///
    /// Serializes only the source graph's merged view; form and meta
    /// triples never leave the process.
    pub async fn save_source_data(
        &self,
        query_id: &str,
        store: &FormStore,
    ) -> Result<(), SyncError> {
        let url = self.query_url(query_id);
        let body = store.dump_graph_ntriples(SOURCE_GRAPH)?;
        tracing::debug!(%url, bytes = body.len(), "saving source data");
        let response = self
            .http
            .put(&url)
            .header(CONTENT_TYPE, N_TRIPLES)
            .body(body)
            .send()
            .await
            .map_err(|e| SyncError::network("PUT", &url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::UnexpectedStatus {
                method: "PUT",
                url,
                status,
            });
        }
        Ok(())
    }

    /// DELETE the search query resource. No body.
    pub async fn remove_source_data(&self, query_id: &str) -> Result<(), SyncError> {
        let url = self.query_url(query_id);
        tracing::debug!(%url, "removing source data");
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| SyncError::network("DELETE", &url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::UnexpectedStatus {
                method: "DELETE",
                url,
                status,
            });
        }
        Ok(())
    }

    fn query_url(&self, query_id: &str) -> String {
        format!("{}/search-queries/{}", self.base_url, query_id)
    }

    async fn get_text(&self, url: &str, accept: Option<&'static str>) -> Result<String, SyncError> {
        let mut request = self.http.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }
        let response = request
            .send()
            .await
            .map_err(|e| SyncError::network("GET", url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::UnexpectedStatus {
                method: "GET",
                url: url.to_string(),
                status,
            });
        }
        response
            .text()
            .await
            .map_err(|e| SyncError::network("GET", url, e))
    }
}
