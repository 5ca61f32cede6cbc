//! Query builders
//!
//! Each builder maps a search intent onto the exact parameters the catalog's
//! Solr configuration expects. The `$qf_*`/`$pf*_*` tokens are dereferenced
//! server-side against the field aliases defined in `solrconfig.xml`, so their
//! names are part of the contract with the service.

use crate::request::{SearchRequest, PARAM_DEF_TYPE, PARAM_FACET, PARAM_FL, PARAM_Q, PARAM_QT};

/// Handler selected by `qt` for field-weighted searches
pub const SEARCH_HANDLER: &str = "search";

/// Outer parser that treats `q` as a boolean expression
pub const LUCENE_PARSER: &str = "lucene";

/// Logical search intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// Handler defaults, plain `q`
    #[default]
    Default,
    /// Title-weighted dismax
    Title,
    /// Author-weighted dismax
    Author,
    /// Title clause AND author clause
    TitleAndAuthor,
}

/// `qf=$qf_<a> pf=$pf_<a> pf3=$pf3_<a> pf2=$pf2_<a>`
fn boost_fields(alias: &str) -> String {
    format!(
        "qf=$qf_{a} pf=$pf_{a} pf3=$pf3_{a} pf2=$pf2_{a}",
        a = alias
    )
}

fn weighted_query(alias: &str, text: &str) -> SearchRequest {
    SearchRequest::new()
        .with(PARAM_Q, format!("{{!{}}}{}", boost_fields(alias), text))
        .with(PARAM_QT, SEARCH_HANDLER)
}

/// Nested dismax clause with its own spellcheck dictionary
fn nested_clause(alias: &str, text: &str) -> String {
    format!(
        "_query_:\"{{!dismax spellcheck.dictionary={} {}}}{}\"",
        alias,
        boost_fields(alias),
        text
    )
}

/// Plain query against the default handler: `q = text`, nothing else
pub fn default_query(text: &str) -> SearchRequest {
    SearchRequest::new().with(PARAM_Q, text)
}

/// Title-weighted query routed to the `search` handler
///
/// ```
/// use solr_relevance_core::query::title_query;
///
/// let req = title_query("time is a toy");
/// assert_eq!(
///     req.get("q"),
///     Some("{!qf=$qf_title pf=$pf_title pf3=$pf3_title pf2=$pf2_title}time is a toy")
/// );
/// assert_eq!(req.get("qt"), Some("search"));
/// ```
pub fn title_query(text: &str) -> SearchRequest {
    weighted_query("title", text)
}

/// Author-weighted query routed to the `search` handler
pub fn author_query(text: &str) -> SearchRequest {
    weighted_query("author", text)
}

/// Boolean AND of an independently scored title clause and author clause
///
/// `defType=lucene` stops the handler from re-applying dismax to the composed
/// expression.
pub fn title_and_author_query(title: &str, author: &str) -> SearchRequest {
    let q = format!(
        "{} AND {}",
        nested_clause("title", title),
        nested_clause("author", author)
    );
    SearchRequest::new()
        .with(PARAM_Q, q)
        .with(PARAM_QT, SEARCH_HANDLER)
        .with(PARAM_DEF_TYPE, LUCENE_PARSER)
}

/// Build a request for `mode`
///
/// `TitleAndAuthor` uses `text` for both clauses; use
/// [`title_and_author_query`] when they differ.
pub fn build(mode: QueryMode, text: &str) -> SearchRequest {
    match mode {
        QueryMode::Default => default_query(text),
        QueryMode::Title => title_query(text),
        QueryMode::Author => author_query(text),
        QueryMode::TitleAndAuthor => title_and_author_query(text, text),
    }
}

/// Copy of `request` with `fl = field_list`, and `facet=false` unless facets
/// are wanted
pub fn limit_fields(request: &SearchRequest, field_list: &str, include_facets: bool) -> SearchRequest {
    let mut overrides = SearchRequest::new().with(PARAM_FL, field_list);
    if !include_facets {
        overrides = overrides.with(PARAM_FACET, "false");
    }
    SearchRequest::merged(request, &overrides)
}
