//! Error types for relevance checks
//!
//! Assertion mismatches and fetch failures share one [`Error`] enum so that
//! every check returns `Result<()>` and propagates with `?`. Fetch failures
//! are kept in their own [`FetchError`] type: a broken service is a hard
//! failure of the test run, not a relevance regression.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for relevance operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures talking to the search service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure (connection refused, DNS, reset, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// Service answered with a non-2xx status
    #[error("HTTP status {code} from {url}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Request URL without query string
        url: String,
    },

    /// Body was unreadable, not JSON, or missing `response.docs`/`response.numFound`
    #[error("decode error: {0}")]
    Decode(String),

    /// Fewer documents came back than the service reported as matching
    #[error("service returned {returned} of {num_found} matching documents")]
    PartialPage {
        /// Documents in the response body
        returned: usize,
        /// Total reported by the service
        num_found: u64,
    },
}

/// Error types for relevance checks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Request could not be completed or decoded
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Expected id missing from, or duplicated in, the first `max_position` results
    #[error(
        "expected {id} once in the first {max_position} results, found {occurrences} \
         (first rank in response: {actual_rank:?}); top results: {top:?}"
    )]
    Position {
        /// Expected document id
        id: String,
        /// Size of the truncated window
        max_position: usize,
        /// Occurrences of `id` inside the window
        occurrences: usize,
        /// 1-based rank of the first occurrence anywhere in the response
        actual_rank: Option<usize>,
        /// Ids inside the window, in rank order
        top: Vec<String>,
    },

    /// Id that must not appear was found
    #[error("expected {id} to be excluded, found at rank {rank}")]
    Exclusion {
        /// Excluded document id
        id: String,
        /// 1-based rank where it was found
        rank: usize,
    },

    /// Total result count is over the bound
    #[error("expected at most {max_count} results, found {num_found}")]
    Count {
        /// Inclusive upper bound
        max_count: u64,
        /// Total reported by the service
        num_found: u64,
    },

    /// By-id lookup did not return exactly one document
    #[error("lookup of {id} returned {found} documents, expected exactly one")]
    LookupCardinality {
        /// Looked-up id
        id: String,
        /// Number of documents the service reported
        found: u64,
    },

    /// Missing or malformed configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for relevance mismatches (position, exclusion, count, cardinality)
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            Error::Position { .. }
                | Error::Exclusion { .. }
                | Error::Count { .. }
                | Error::LookupCardinality { .. }
        )
    }

    /// True when the service could not be reached or understood
    pub fn is_fetch(&self) -> bool {
        matches!(self, Error::Fetch(_))
    }
}
