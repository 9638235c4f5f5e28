//! RDF vocabulary constants and named-graph identifiers.
//!
//! Every IRI the crate reads or writes lives here, organized by vocabulary.
//! These are process-wide immutable constants, never constructed ad hoc at
//! call sites.

use oxigraph::model::NamedNodeRef;

/// RDF syntax namespace
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// Forms vocabulary namespace
pub const FORM_NS: &str = "http://lblod.data.gift/vocabularies/forms/";
/// SHACL namespace
pub const SH_NS: &str = "http://www.w3.org/ns/shacl#";
/// Search-queries vocabulary namespace
pub const SEARCH_NS: &str = "http://redpencil.data.gift/vocabularies/search-queries/";

/// Base IRI under which fresh search-query subjects are minted.
pub const SOURCE_BASE: &str = "http://lblod.data.gift/vocabularies/search-queries-toezicht/";

/// RDF vocabulary terms
pub mod rdf {
    use oxigraph::model::NamedNodeRef;

    /// rdf:type
    pub const TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
}

/// Forms vocabulary terms
pub mod form {
    use oxigraph::model::NamedNodeRef;

    /// form:Form, the class of form definitions
    pub const FORM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://lblod.data.gift/vocabularies/forms/Form");
}

/// SHACL vocabulary terms
pub mod sh {
    use oxigraph::model::NamedNodeRef;

    /// sh:path, links a field declaration to the predicate it governs
    pub const PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#path");
}

/// Search-queries vocabulary terms
pub mod search {
    use oxigraph::model::NamedNodeRef;

    /// search:emberQueryParameterKey, binds a field to a query-parameter name
    pub const QUERY_PARAMETER_KEY: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://redpencil.data.gift/vocabularies/search-queries/emberQueryParameterKey",
    );
}

/// Named graph holding the form definition (schema and mapping declarations).
pub const FORM_GRAPH: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://data.lblod.info/form");

/// Named graph holding auxiliary form metadata.
pub const META_GRAPH: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://data.lblod.info/metagraph");

/// Named graph holding the submission data for one subject-of-interest.
/// This is the only graph ever persisted back to the server.
pub const SOURCE_GRAPH: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://data.lblod.info/sourcegraph");
