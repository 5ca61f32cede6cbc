//! HTTP side of the Solr relevance harness
//!
//! This crate provides:
//! - HarnessConfig / ConnectionProfile: where the service lives
//! - SolrClient: one long-lived connection, ranked-result fetches, by-id
//!   lookups and memoized admin files
//! - One-call relevance checks (`default_search`, `title_search`, ...)
//!
//! # Usage
//!
//! ```ignore
//! use solr_relevance_client::{HarnessConfig, SolrClient};
//!
//! let client = SolrClient::new(&HarnessConfig::from_env()?)?;
//! client.default_search("b2151715", "A Pale View of Hills", 2)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod relevance;

// Re-export commonly used types
pub use client::{SolrClient, ADMIN_FILE_HANDLER};
pub use config::{ConnectionProfile, HarnessConfig, DEFAULT_HANDLER};
