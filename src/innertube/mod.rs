//! YouTube Music search over the InnerTube web API
//!
//! This module provides the catalog search engine:
//! - Request building (filter/scope validation, `params` tokens)
//! - Response navigation and section classification
//! - Parsing raw result items into typed results
//! - Following shelf continuations up to a result limit
//! - Search suggestions
//!
//! # Architecture
//!
//! Raw JSON never leaves this module. The [`Transport`] trait is the only
//! network seam; [`SearchEngine`] drives everything else as pure functions
//! over `serde_json::Value`, producing the domain types in [`domain`].

pub mod client;
pub mod continuations;
pub mod domain;
pub mod engine;
pub mod navigation;
pub mod parser;
pub mod request;
pub mod sections;
pub mod suggestions;
pub mod traits;

pub use client::InnerTubeClient;
pub use domain::{
    ResultKind, ResultTypeLabels, SearchError, SearchFilter, SearchQuery, SearchResult,
    SearchScope, Suggestions, TransportError,
};
pub use engine::SearchEngine;
pub use traits::Transport;
