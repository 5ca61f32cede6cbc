//! Core types for Solr relevance regression tests
//!
//! This crate provides:
//! - SearchRequest and FieldPreset: the parameters of one GET
//! - Query builders for default, title, author and title+author searches
//! - SearchResponse/ResultDocument decoding from the service's JSON writer
//! - Rank-position, exclusion, count and cardinality assertions
//!
//! Nothing here performs I/O; see `solr-relevance-client` for the HTTP side.
//!
//! # Usage
//!
//! ```
//! use solr_relevance_core::{query, verify, SearchResponse, DOC_IDS_ONLY};
//!
//! let req = query::default_query("A Pale View of Hills").with_preset(&DOC_IDS_ONLY);
//! assert_eq!(req.get("fl"), Some("id"));
//!
//! let resp = SearchResponse::from_ids(["b2151715", "b0000002"]);
//! verify::assert_at_position(&resp, "b2151715", 2).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod query;
pub mod request;
pub mod response;
pub mod verify;

// Re-export commonly used types
pub use error::{Error, FetchError, Result};
pub use query::{
    author_query, default_query, limit_fields, title_and_author_query, title_query, QueryMode,
};
pub use request::{
    FieldPreset, SearchRequest, DOC_IDS_FULL_TITLES, DOC_IDS_ONLY, DOC_IDS_SHORT_TITLES,
    RESERVED_KEYS,
};
pub use response::{ResultDocument, SearchResponse};
pub use verify::{assert_at_position, assert_excluded, assert_max_count, assert_single};
