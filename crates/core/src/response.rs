//! Search results as returned by the service
//!
//! The service's JSON writer produces:
//!
//! ```json
//! {
//!   "responseHeader": { "status": 0, "QTime": 12 },
//!   "response": { "numFound": 3, "start": 0, "docs": [ { "id": "b2151715" } ] }
//! }
//! ```
//!
//! Only `response.docs` and `response.numFound` are required; everything else
//! is optional metadata.

use std::hash::{Hash, Hasher};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FetchError;

// ============================================================================
// ResultDocument
// ============================================================================

/// One ranked result
///
/// Identity is `id` alone: two documents with the same id are equal even if
/// they carry different display fields.
#[derive(Debug, Clone)]
pub struct ResultDocument {
    /// Document id
    pub id: String,
    /// Other requested fields (`title_245a_display`, ...)
    pub fields: Map<String, Value>,
}

impl ResultDocument {
    /// Bare id matcher with no display fields
    pub fn with_id(id: impl Into<String>) -> Self {
        ResultDocument {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// String value of a display field, if present
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    fn from_json(mut fields: Map<String, Value>, position: usize) -> Result<Self, FetchError> {
        let id = match fields.remove("id") {
            Some(Value::String(id)) => id,
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(FetchError::Decode(format!(
                    "document at rank {} has non-string id: {}",
                    position, other
                )))
            }
            None => {
                return Err(FetchError::Decode(format!(
                    "document at rank {} has no id field",
                    position
                )))
            }
        };
        Ok(ResultDocument { id, fields })
    }
}

impl PartialEq for ResultDocument {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResultDocument {}

impl Hash for ResultDocument {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// SearchResponse
// ============================================================================

/// Ranked results of one request
///
/// # Invariant
///
/// `docs` is in the order the service returned it. Ranks are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResponse {
    /// Returned documents in rank order
    pub docs: Vec<ResultDocument>,
    /// Total matches reported by the service, not just the returned page
    pub num_found: u64,
    /// Offset of the first returned document
    pub start: u64,
    /// `responseHeader.status`, when present
    pub status: Option<i64>,
    /// `responseHeader.QTime` in milliseconds, when present
    pub qtime_ms: Option<u64>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "responseHeader")]
    header: Option<Header>,
    response: Body,
}

#[derive(Deserialize)]
struct Header {
    status: Option<i64>,
    #[serde(rename = "QTime")]
    qtime: Option<u64>,
}

#[derive(Deserialize)]
struct Body {
    #[serde(rename = "numFound")]
    num_found: u64,
    #[serde(default)]
    start: u64,
    docs: Vec<Map<String, Value>>,
}

impl SearchResponse {
    /// Build a response directly, mainly for tests
    pub fn new(docs: Vec<ResultDocument>, num_found: u64) -> Self {
        SearchResponse {
            docs,
            num_found,
            ..Default::default()
        }
    }

    /// Response whose docs are bare ids in the given order and whose total is
    /// the number of ids
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let docs: Vec<ResultDocument> = ids.into_iter().map(ResultDocument::with_id).collect();
        let num_found = docs.len() as u64;
        SearchResponse::new(docs, num_found)
    }

    /// Decode a JSON body
    pub fn from_json_str(body: &str) -> Result<Self, FetchError> {
        let envelope: Envelope = serde_json::from_str(body).map_err(|e| {
            FetchError::Decode(format!(
                "invalid search response: {}: {}",
                e,
                &body[..floor_char_boundary(body, 200)]
            ))
        })?;

        let docs = envelope
            .response
            .docs
            .into_iter()
            .enumerate()
            .map(|(i, fields)| ResultDocument::from_json(fields, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let (status, qtime_ms) = match envelope.header {
            Some(h) => (h.status, h.qtime),
            None => (None, None),
        };

        Ok(SearchResponse {
            docs,
            num_found: envelope.response.num_found,
            start: envelope.response.start,
            status,
            qtime_ms,
        })
    }

    /// Number of returned documents (the page, not `num_found`)
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// True if no documents were returned
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Returned ids in rank order
    pub fn ids(&self) -> Vec<&str> {
        self.docs.iter().map(|d| d.id.as_str()).collect()
    }

    /// 1-based rank of the first document with `id`
    pub fn rank_of(&self, id: &str) -> Option<usize> {
        self.docs.iter().position(|d| d.id == id).map(|i| i + 1)
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}
