//! Synchronous client for the search service
//!
//! One [`SolrClient`] holds one `ureq::Agent` for the whole test run; every
//! request reuses its connection pool. Requests are attempted once. Admin
//! files (`schema.xml`, `solrconfig.xml`) are fetched on first use and kept
//! for the life of the client.

use once_cell::sync::OnceCell;
use solr_relevance_core::query::{default_query, limit_fields};
use solr_relevance_core::request::PARAM_WT;
use solr_relevance_core::{
    verify, FetchError, ResultDocument, Result, SearchRequest, SearchResponse, DOC_IDS_ONLY,
};

use crate::config::{ConnectionProfile, HarnessConfig};

/// Handler serving raw config files
pub const ADMIN_FILE_HANDLER: &str = "admin/file/";

/// Log target for request tracing
const TARGET: &str = "solr_relevance::client";

/// Connection to one search service
pub struct SolrClient {
    agent: ureq::Agent,
    service_url: String,
    handler: String,
    schema_xml: OnceCell<String>,
    solrconfig_xml: OnceCell<String>,
}

impl std::fmt::Debug for SolrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolrClient")
            .field("service_url", &self.service_url)
            .field("handler", &self.handler)
            .field("schema_cached", &self.schema_xml.get().is_some())
            .field("solrconfig_cached", &self.solrconfig_xml.get().is_some())
            .finish()
    }
}

impl SolrClient {
    /// Create a client from a resolved config.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if no connection profile can be resolved.
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        let profile = config.profile()?;
        Ok(Self::with_profile(&profile, &config.handler))
    }

    /// Create a client for `profile` with `handler` as the default handler
    pub fn with_profile(profile: &ConnectionProfile, handler: &str) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(true)
            .build();
        let agent = ureq::Agent::new_with_config(config);

        let service_url = profile.service_url();
        tracing::info!(target: "solr_relevance::config", url = %service_url, handler, "Search service");

        Self {
            agent,
            service_url,
            handler: handler.trim_matches('/').to_string(),
            schema_xml: OnceCell::new(),
            solrconfig_xml: OnceCell::new(),
        }
    }

    /// Service URL without trailing slash
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Default handler path
    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// Full URL of `handler`, without query string
    pub fn handler_url(&self, handler: &str) -> String {
        format!("{}/{}", self.service_url, handler.trim_start_matches('/'))
    }

    /// GET `handler` with `params` and return the raw body
    fn get_text<'a>(
        &self,
        handler: &str,
        params: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> std::result::Result<String, FetchError> {
        let url = self.handler_url(handler);
        let mut request = self.agent.get(url.as_str());
        for (key, value) in params {
            request = request.query(key, value);
        }

        tracing::debug!(target: TARGET, url = %url, "GET");

        let mut response = request.call().map_err(|e| {
            let err = match e {
                ureq::Error::StatusCode(code) => FetchError::Status {
                    code,
                    url: url.clone(),
                },
                other => FetchError::Network(other.to_string()),
            };
            tracing::warn!(target: TARGET, url = %url, error = %err, "Request failed");
            err
        })?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| FetchError::Decode(format!("failed to read response from {}: {}", url, e)))
    }

    /// Send `request` to `handler` and decode the ranked results
    ///
    /// Parameters go out verbatim; `wt=json` is added only when the request
    /// does not choose its own writer.
    pub fn response(&self, request: &SearchRequest, handler: &str) -> Result<SearchResponse> {
        let params = request
            .iter()
            .chain((!request.contains(PARAM_WT)).then_some((PARAM_WT, "json")));

        let body = self.get_text(handler, params)?;
        let response = SearchResponse::from_json_str(&body)?;

        tracing::debug!(
            target: TARGET,
            handler,
            q = request.query().unwrap_or_default(),
            num_found = response.num_found,
            returned = response.len(),
            qtime_ms = ?response.qtime_ms,
            "Search response"
        );
        Ok(response)
    }

    /// [`response`](Self::response) against the configured default handler
    pub fn select(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.response(request, &self.handler)
    }

    /// Default handler, documents reduced to `id`, no facets
    pub fn doc_ids_only(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.select(&request.with_preset(&DOC_IDS_ONLY))
    }

    /// Fetch the one document with `id`
    ///
    /// Asks for every stored field (`fl=*`) with facets off, so the returned
    /// document carries its display fields.
    ///
    /// # Errors
    ///
    /// Returns `Error::LookupCardinality` when the service reports zero or
    /// more than one match.
    pub fn lookup(&self, id: &str) -> Result<ResultDocument> {
        let request = limit_fields(&default_query(&format!("{{!term f=id}}{}", id)), "*", false);
        let response = self.select(&request)?;
        verify::assert_single(&response, id)
    }

    /// Raw `schema.xml`, fetched once per client
    pub fn schema(&self) -> Result<&str> {
        self.admin_file(&self.schema_xml, "schema.xml")
    }

    /// Raw `solrconfig.xml`, fetched once per client
    pub fn solr_config(&self) -> Result<&str> {
        self.admin_file(&self.solrconfig_xml, "solrconfig.xml")
    }

    fn admin_file<'a>(&self, cell: &'a OnceCell<String>, file: &str) -> Result<&'a str> {
        let text = cell.get_or_try_init(|| {
            tracing::debug!(target: TARGET, file, "Fetching admin file");
            self.get_text(ADMIN_FILE_HANDLER, [("file", file), (PARAM_WT, "xml")])
        })?;
        Ok(text.as_str())
    }
}
