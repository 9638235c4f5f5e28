//! RDF-backed search-query form synchronization.
//!
//! A form-editing session owns an in-memory triple store partitioned into
//! three named graphs: the form graph (schema plus mapping declarations),
//! the meta graph (auxiliary metadata) and the source graph (the
//! submission data for one subject-of-interest). Loaders populate the
//! graphs from the search-query service over HTTP; the mapper translates
//! bidirectionally between the source graph and the flat query-parameter
//! mapping owned by the host routing layer; only the source graph is ever
//! persisted back.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod params;
pub mod session;
pub mod store;
pub mod uri;
pub mod vocab;

pub use client::FormsClient;
pub use config::{CliArgs, ClientConfig};
pub use error::SyncError;
pub use logging::{LogFormat, LogOutput, LoggingConfig, init_logging};
pub use mapper::{form_store_to_query_params, query_params_to_form_store};
pub use params::{ParamValue, ProjectedParams, QueryParams};
pub use session::{FormSession, SourceQuery};
pub use store::FormStore;
pub use uri::valid_uri;
