//! Search engine - orchestrates one catalog search end to end
//!
//! This is the high-level API:
//! 1. Validate the query and build the request
//! 2. Send it through the injected transport
//! 3. Locate and classify the result sections
//! 4. Parse each section, top-result card first
//! 5. For filtered searches, follow shelf continuations up to the limit

use std::time::Instant;

use super::continuations::paginate;
use super::domain::{ResultTypeLabels, SearchError, SearchQuery, SearchResult, Suggestions};
use super::parser::{parse_results, parse_top_result};
use super::request::{build_request, build_suggestions_request};
use super::sections::{Section, classify, locate_sections};
use super::suggestions::parse_suggestions;
use super::traits::Transport;

/// Search service over a transport
pub struct SearchEngine<T: Transport> {
    transport: T,
    labels: ResultTypeLabels,
}

impl<T: Transport> SearchEngine<T> {
    /// Create an engine with English result-type labels
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            labels: ResultTypeLabels::default(),
        }
    }

    /// Use localized result-type labels (must match the client language)
    pub fn with_labels(mut self, labels: ResultTypeLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run a search without a deadline
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError> {
        self.search_until(query, None).await
    }

    /// Run a search, giving up on further continuation pages once
    /// `deadline` has passed.
    ///
    /// Results keep server order. The first page is never truncated; only
    /// continuation pages are bounded by `query.limit`.
    pub async fn search_until(
        &self,
        query: &SearchQuery,
        deadline: Option<Instant>,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let request = build_request(query)?;
        tracing::info!(
            query = %query.text,
            filter = ?query.filter,
            scope = ?query.scope,
            limit = query.limit,
            "Searching"
        );

        let response = self
            .transport
            .send(request.endpoint, &request.body, "")
            .await?;

        let sections = locate_sections(&response, query.scope, query.filter.is_some());
        let blended = query.filter.is_none();
        let mut results = Vec::new();

        for section in sections {
            match classify(section, query.filter, query.scope, &self.labels) {
                Section::Card(card) => {
                    match parse_top_result(card.renderer, &self.labels) {
                        Some(top) => results.push(top),
                        None => tracing::debug!(
                            event = "PartialItemDropped",
                            "Top result card could not be parsed"
                        ),
                    }
                    results.extend(parse_results(card.items, None, card.category.as_deref(), true));
                }
                Section::Shelf(shelf) => {
                    let category = shelf.category.as_deref();
                    results.extend(parse_results(shelf.items, shelf.kind, category, blended));

                    // Unfiltered shelves only carry "show all" links, not tokens
                    if query.filter.is_some() {
                        let remaining = query.limit.saturating_sub(results.len());
                        let more = paginate(
                            &self.transport,
                            &request,
                            shelf.renderer,
                            remaining,
                            deadline,
                            |items| parse_results(items, shelf.kind, category, blended),
                        )
                        .await?;
                        results.extend(more);
                    }
                }
                Section::Unrecognized => {
                    tracing::debug!("Skipping unrecognized result section");
                }
            }
        }

        tracing::info!(count = results.len(), "Search complete");
        Ok(results)
    }

    /// Fetch autocomplete suggestions for a partial query
    pub async fn suggestions(
        &self,
        input: &str,
        detailed: bool,
    ) -> Result<Suggestions, SearchError> {
        let request = build_suggestions_request(input)?;
        let response = self
            .transport
            .send(request.endpoint, &request.body, "")
            .await?;

        Ok(parse_suggestions(&response, detailed))
    }
}
