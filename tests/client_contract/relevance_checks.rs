//! One-call relevance checks

use crate::common::{paged_body, solr_body, Reply, StubSolr};
use solr_relevance::prelude::*;

#[test]
fn test_default_search_rank_window() {
    let stub = StubSolr::start(|_| Reply::json(solr_body(&["b1", "b2151715", "b3"], 3)));
    let client = stub.client();

    client
        .default_search("b2151715", "A Pale View of Hills", 2)
        .unwrap();

    let err = client
        .default_search("b2151715", "A Pale View of Hills", 1)
        .unwrap_err();
    assert!(err.is_assertion());
    match err {
        Error::Position {
            actual_rank, top, ..
        } => {
            assert_eq!(actual_rank, Some(2));
            assert_eq!(top, vec!["b1".to_string()]);
        }
        other => panic!("expected position error, got {:?}", other),
    }

    let req = stub.last_request();
    assert_eq!(req.param("q"), Some("A Pale View of Hills"));
    assert_eq!(req.param("fl"), Some("id"));
}

#[test]
fn test_default_search_max_docs_boundary() {
    let stub = StubSolr::start(|req| match req.param("q") {
        Some("at bound") => Reply::json(solr_body(&["a"], 200)),
        _ => Reply::json(solr_body(&["a"], 201)),
    });
    let client = stub.client();

    client.default_search_max_docs("at bound", 200).unwrap();
    assert_eq!(
        client.default_search_max_docs("slave trade in brazil", 200),
        Err(Error::Count {
            max_count: 200,
            num_found: 201
        })
    );
}

#[test]
fn test_default_search_excludes() {
    let stub = StubSolr::start(|_| Reply::json(solr_body(&["a", "b", "c"], 3)));
    let client = stub.client();

    client.default_search_excludes("z", "x").unwrap();
    assert!(matches!(
        client.default_search_excludes("c", "x"),
        Err(Error::Exclusion { rank: 3, .. })
    ));
}

#[test]
fn test_title_and_author_search_sends_lucene_expression() {
    let stub = StubSolr::start(|_| Reply::json(solr_body(&["b2041590"], 1)));
    let client = stub.client();

    client
        .title_and_author_search("b2041590", "remains of the day", "ishiguro", 1)
        .unwrap();

    let req = stub.last_request();
    assert_eq!(req.param("defType"), Some("lucene"));
    assert_eq!(req.param("qt"), Some("search"));
    let q = req.param("q").unwrap();
    assert!(q.contains("spellcheck.dictionary=title"));
    assert!(q.contains("spellcheck.dictionary=author"));
    assert!(q.contains("\" AND _query_:\""));
}

#[test]
fn test_author_search_uses_author_aliases() {
    let stub = StubSolr::start(|_| Reply::json(solr_body(&["b3459028"], 1)));
    let client = stub.client();

    client
        .author_search("b3459028", "browning christopher", 10)
        .unwrap();
    assert!(stub
        .last_request()
        .param("q")
        .unwrap()
        .starts_with("{!qf=$qf_author"));
}

#[test]
fn test_fetch_failure_is_not_an_assertion() {
    let stub = StubSolr::start(|_| Reply::text(502, "text/plain", "bad gateway"));
    let client = stub.client();

    let err = client.default_search("b2151715", "hills", 2).unwrap_err();
    assert!(err.is_fetch());
    assert!(!err.is_assertion());
}

// ============================================================================
// Paging
// ============================================================================

/// Twenty matches, "target" at rank 15
fn twenty_with_target_at_15() -> Vec<String> {
    (1..=20)
        .map(|i| if i == 15 { "target".to_string() } else { format!("b{}", i) })
        .collect()
}

#[test]
fn test_rank_check_asks_for_the_whole_window() {
    let ids = twenty_with_target_at_15();
    let stub = StubSolr::start(move |req| {
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        Reply::json(paged_body(&ids, req))
    });
    let client = stub.client();

    client.default_search("target", "x", 20).unwrap();
    assert_eq!(stub.last_request().param("rows"), Some("20"));

    match client.default_search("target", "x", 14) {
        Err(Error::Position {
            occurrences, top, ..
        }) => {
            assert_eq!(occurrences, 0);
            assert_eq!(top.len(), 14);
        }
        other => panic!("expected position error, got {:?}", other),
    }
}

#[test]
fn test_rank_check_keeps_wider_caller_rows() {
    let stub = StubSolr::start(|req| Reply::json(paged_body(&["a", "b", "c"], req)));
    let client = stub.client();

    client
        .expect_in_top(&title_query("x").with("rows", "50"), "b", 2)
        .unwrap();
    assert_eq!(stub.last_request().param("rows"), Some("50"));

    client
        .expect_in_top(&title_query("x").with("rows", "1"), "b", 2)
        .unwrap();
    assert_eq!(stub.last_request().param("rows"), Some("2"));
}

#[test]
fn test_excludes_checks_past_first_page() {
    let ids = twenty_with_target_at_15();
    let stub = StubSolr::start(move |req| {
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        Reply::json(paged_body(&ids, req))
    });
    let client = stub.client();

    assert_eq!(
        client.default_search_excludes("target", "x"),
        Err(Error::Exclusion {
            id: "target".to_string(),
            rank: 15
        })
    );

    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].param("rows"), None);
    assert_eq!(requests[1].param("rows"), Some("20"));

    client.default_search_excludes("b999", "x").unwrap();
}

#[test]
fn test_excludes_fails_on_capped_page() {
    // Service ignores rows and always answers with its first page
    let stub = StubSolr::start(|_| {
        let ids: Vec<String> = (1..=10).map(|i| format!("b{}", i)).collect();
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        Reply::json(solr_body(&ids, 20))
    });
    let client = stub.client();

    let err = client.default_search_excludes("target", "x").unwrap_err();
    assert!(err.is_fetch());
    assert_eq!(
        err,
        Error::Fetch(FetchError::PartialPage {
            returned: 10,
            num_found: 20
        })
    );
}
