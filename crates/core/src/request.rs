//! Request parameters sent to the search service
//!
//! This module defines:
//! - SearchRequest: parameter name → value mapping for one HTTP round trip
//! - FieldPreset: canned `fl`/`facet` overrides that shrink responses
//!
//! Parameter values are never escaped or trimmed here. The service is the
//! validator of query syntax, including its own `{!...}` local-params DSL.

use std::collections::BTreeMap;

/// Query text parameter
pub const PARAM_Q: &str = "q";
/// Request handler selector (`qt=search` routes to the dismax handler)
pub const PARAM_QT: &str = "qt";
/// Field list returned per document
pub const PARAM_FL: &str = "fl";
/// Facet toggle
pub const PARAM_FACET: &str = "facet";
/// Outer query parser
pub const PARAM_DEF_TYPE: &str = "defType";
/// Response writer
pub const PARAM_WT: &str = "wt";
/// Page size; the service returns 10 documents when unset
pub const PARAM_ROWS: &str = "rows";

/// Keys that an override merge must never drop.
pub const RESERVED_KEYS: [&str; 5] = [PARAM_Q, PARAM_QT, PARAM_FL, PARAM_FACET, PARAM_DEF_TYPE];

// ============================================================================
// SearchRequest
// ============================================================================

/// Parameters for one GET against the search service
///
/// Iteration order is by key, so the same request always produces the same
/// query string.
///
/// # Invariant
///
/// Requests built by [`crate::query`] always carry `q`, and carry `qt` for
/// every non-default mode. Overrides are layered with [`SearchRequest::merged`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    params: BTreeMap<String, String>,
}

impl SearchRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a parameter, replacing any previous value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Whether the parameter is set
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// The `q` parameter, if set
    pub fn query(&self) -> Option<&str> {
        self.get(PARAM_Q)
    }

    /// Parameter names in iteration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Parameter pairs in iteration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if no parameter is set
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Ordered merge: every key of `defaults` first, then every key of
    /// `overrides`. A key present in both takes the override's value.
    ///
    /// Neither input is modified.
    pub fn merged(defaults: &SearchRequest, overrides: &SearchRequest) -> SearchRequest {
        let mut params = defaults.params.clone();
        for (key, value) in &overrides.params {
            params.insert(key.clone(), value.clone());
        }
        SearchRequest { params }
    }

    /// Copy of `self` asking for `rows` documents
    pub fn with_rows(&self, rows: u64) -> SearchRequest {
        SearchRequest::merged(self, &SearchRequest::new().with(PARAM_ROWS, rows.to_string()))
    }

    /// Copy of `self` with the preset's parameters applied as overrides
    pub fn with_preset(&self, preset: &FieldPreset) -> SearchRequest {
        SearchRequest::merged(self, &preset.to_request())
    }
}

impl<K, V> FromIterator<(K, V)> for SearchRequest
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        SearchRequest {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ============================================================================
// FieldPreset
// ============================================================================

/// Canned response-size reduction: a field list plus a facet toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPreset {
    /// Comma-separated `fl` value
    pub field_list: &'static str,
    /// When false, `facet=false` is sent
    pub include_facets: bool,
}

/// Documents carry only `id`; no facets
pub const DOC_IDS_ONLY: FieldPreset = FieldPreset {
    field_list: "id",
    include_facets: false,
};

/// Documents carry `id` and the short (245a) title; no facets
pub const DOC_IDS_SHORT_TITLES: FieldPreset = FieldPreset {
    field_list: "id,title_245a_display",
    include_facets: false,
};

/// Documents carry `id` and the full title; no facets
pub const DOC_IDS_FULL_TITLES: FieldPreset = FieldPreset {
    field_list: "id,title_full_display",
    include_facets: false,
};

impl FieldPreset {
    /// The preset as a bare override request
    pub fn to_request(&self) -> SearchRequest {
        let request = SearchRequest::new().with(PARAM_FL, self.field_list);
        if self.include_facets {
            request
        } else {
            request.with(PARAM_FACET, "false")
        }
    }
}
