//! One-call relevance checks
//!
//! Each check builds a query, sends it through the ids-only preset and runs a
//! single assertion. Failures are logged with the ids that did come back so a
//! regression can be diagnosed from the test output alone.
//!
//! The service pages results (10 rows unless asked otherwise), so the rank and
//! exclusion checks set `rows` wide enough for the assertion they run.

use solr_relevance_core::query::{self, default_query, title_and_author_query, QueryMode};
use solr_relevance_core::request::PARAM_ROWS;
use solr_relevance_core::{verify, FetchError, Result, SearchRequest};

use crate::client::SolrClient;

const TARGET: &str = "solr_relevance::check";

impl SolrClient {
    /// `expected_id` within the first `max_position` results of `request`
    ///
    /// `rows` is raised to `max_position` when the request asks for fewer.
    pub fn expect_in_top(
        &self,
        request: &SearchRequest,
        expected_id: &str,
        max_position: usize,
    ) -> Result<()> {
        let window = max_position as u64;
        let rows = request
            .get(PARAM_ROWS)
            .and_then(|r| r.parse::<u64>().ok())
            .map_or(window, |r| r.max(window));
        let response = self.doc_ids_only(&request.with_rows(rows))?;
        verify::assert_at_position(&response, expected_id, max_position).map_err(|e| {
            tracing::warn!(
                target: TARGET,
                q = request.query().unwrap_or_default(),
                expected = expected_id,
                max_position,
                top = ?response.ids(),
                "Rank check failed"
            );
            e
        })
    }

    fn mode_search(
        &self,
        mode: QueryMode,
        expected_id: &str,
        text: &str,
        max_position: usize,
    ) -> Result<()> {
        tracing::trace!(target: TARGET, ?mode, expected = expected_id, max_position, "Rank check");
        self.expect_in_top(&query::build(mode, text), expected_id, max_position)
    }

    /// Plain query `text` ranks `expected_id` within the first `max_position`
    pub fn default_search(&self, expected_id: &str, text: &str, max_position: usize) -> Result<()> {
        self.mode_search(QueryMode::Default, expected_id, text, max_position)
    }

    /// Plain query `text` matches at most `max_count` documents in total
    pub fn default_search_max_docs(&self, text: &str, max_count: u64) -> Result<()> {
        let response = self.doc_ids_only(&default_query(text))?;
        verify::assert_max_count(&response, max_count).map_err(|e| {
            tracing::warn!(
                target: TARGET,
                q = text,
                max_count,
                num_found = response.num_found,
                "Count check failed"
            );
            e
        })
    }

    /// Plain query `text` never returns `excluded_id`, at any rank
    ///
    /// When the first page is short of `numFound`, the query is repeated with
    /// `rows = numFound`. A service that still returns a partial page fails
    /// with `FetchError::PartialPage` rather than passing on an unchecked tail.
    pub fn default_search_excludes(&self, excluded_id: &str, text: &str) -> Result<()> {
        let request = default_query(text);
        let mut response = self.doc_ids_only(&request)?;
        if (response.len() as u64) < response.num_found {
            response = self.doc_ids_only(&request.with_rows(response.num_found))?;
        }
        if (response.len() as u64) < response.num_found {
            return Err(FetchError::PartialPage {
                returned: response.len(),
                num_found: response.num_found,
            }
            .into());
        }

        verify::assert_excluded(&response, excluded_id).map_err(|e| {
            tracing::warn!(
                target: TARGET,
                q = text,
                excluded = excluded_id,
                num_found = response.num_found,
                "Exclusion check failed"
            );
            e
        })
    }

    /// Title-weighted query ranks `expected_id` within the first `max_position`
    pub fn title_search(&self, expected_id: &str, text: &str, max_position: usize) -> Result<()> {
        self.mode_search(QueryMode::Title, expected_id, text, max_position)
    }

    /// Author-weighted query ranks `expected_id` within the first `max_position`
    pub fn author_search(&self, expected_id: &str, text: &str, max_position: usize) -> Result<()> {
        self.mode_search(QueryMode::Author, expected_id, text, max_position)
    }

    /// Title AND author query ranks `expected_id` within the first `max_position`
    pub fn title_and_author_search(
        &self,
        expected_id: &str,
        title: &str,
        author: &str,
        max_position: usize,
    ) -> Result<()> {
        self.expect_in_top(
            &title_and_author_query(title, author),
            expected_id,
            max_position,
        )
    }
}
