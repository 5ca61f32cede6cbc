//! Relevance assertions over a decoded response
//!
//! All checks are read-only and all-or-nothing: they return `Ok(())` or the
//! matching [`Error`] variant, never a partial result.

use crate::error::{Error, Result};
use crate::response::{ResultDocument, SearchResponse};

/// `expected_id` must appear exactly once among the first `max_position`
/// results
///
/// The window is cut before counting, so a hit at rank `max_position + 1`
/// does not count. A duplicate inside the window is also a failure.
///
/// ```
/// use solr_relevance_core::{verify::assert_at_position, SearchResponse};
///
/// let resp = SearchResponse::from_ids(["b1", "b2151715", "b3"]);
/// assert!(assert_at_position(&resp, "b2151715", 2).is_ok());
/// assert!(assert_at_position(&resp, "b3", 2).is_err());
/// ```
pub fn assert_at_position(
    response: &SearchResponse,
    expected_id: &str,
    max_position: usize,
) -> Result<()> {
    let window = &response.docs[..max_position.min(response.docs.len())];
    let occurrences = window.iter().filter(|d| d.id == expected_id).count();

    if occurrences == 1 {
        return Ok(());
    }

    Err(Error::Position {
        id: expected_id.to_string(),
        max_position,
        occurrences,
        actual_rank: response.rank_of(expected_id),
        top: window.iter().map(|d| d.id.clone()).collect(),
    })
}

/// `excluded_id` must not appear anywhere in the returned documents
pub fn assert_excluded(response: &SearchResponse, excluded_id: &str) -> Result<()> {
    match response.rank_of(excluded_id) {
        None => Ok(()),
        Some(rank) => Err(Error::Exclusion {
            id: excluded_id.to_string(),
            rank,
        }),
    }
}

/// Total result count must be at most `max_count` (inclusive)
pub fn assert_max_count(response: &SearchResponse, max_count: u64) -> Result<()> {
    if response.num_found <= max_count {
        Ok(())
    } else {
        Err(Error::Count {
            max_count,
            num_found: response.num_found,
        })
    }
}

/// The response must hold exactly one document; returns it
///
/// Used for by-id lookups, where zero or many hits means the fixture is
/// broken.
pub fn assert_single(response: &SearchResponse, id: &str) -> Result<ResultDocument> {
    match response.docs.as_slice() {
        [doc] if response.num_found == 1 => Ok(doc.clone()),
        _ => Err(Error::LookupCardinality {
            id: id.to_string(),
            found: response.num_found.max(response.docs.len() as u64),
        }),
    }
}
