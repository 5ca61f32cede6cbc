//! solr-relevance - relevance regression harness for a Solr catalog index
//!
//! Builds query parameters, sends them to an external search service and
//! asserts that expected records come back at expected ranks. Ranking and
//! indexing belong to the service; this crate only asks and checks.
//!
//! # Quick Start
//!
//! ```ignore
//! use solr_relevance::prelude::*;
//!
//! let client = SolrClient::new(&HarnessConfig::from_env()?)?;
//!
//! // "A Pale View of Hills" must rank b2151715 in the top two
//! client.default_search("b2151715", "A Pale View of Hills", 2)?;
//!
//! // Or build and check by hand
//! let resp = client.doc_ids_only(&title_query("time is a toy"))?;
//! assert_at_position(&resp, "b7113006", 3)?;
//! ```
//!
//! # Configuration
//!
//! `SOLR_URL`, or `SOLR_BASE_URL` + `SOLR_CORE`, optionally layered over a
//! TOML file named by `SOLR_RELEVANCE_CONFIG`. See [`HarnessConfig`].

pub use solr_relevance_client::*;
pub use solr_relevance_core::*;

/// Everything a relevance test usually needs
pub mod prelude {
    pub use solr_relevance_client::{ConnectionProfile, HarnessConfig, SolrClient};
    pub use solr_relevance_core::query::{
        author_query, default_query, limit_fields, title_and_author_query, title_query,
    };
    pub use solr_relevance_core::verify::{
        assert_at_position, assert_excluded, assert_max_count, assert_single,
    };
    pub use solr_relevance_core::{
        Error, FetchError, ResultDocument, SearchRequest, SearchResponse, DOC_IDS_FULL_TITLES,
        DOC_IDS_ONLY, DOC_IDS_SHORT_TITLES,
    };
}
