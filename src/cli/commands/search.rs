//! Catalog search and suggestion commands.

use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::runtime::Runtime;

use crate::cli::output;
use crate::config::Config;
use crate::error::ResultExt;
use crate::innertube::{
    InnerTubeClient, SearchEngine, SearchError, SearchFilter, SearchQuery, SearchScope,
};

/// Search flags as given on the command line
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions<'a> {
    pub words: &'a [String],
    pub filter: Option<&'a str>,
    pub all: bool,
    pub scope: Option<&'a str>,
    pub limit: Option<usize>,
    pub ignore_spelling: bool,
}

/// Combine flags with config defaults.
///
/// The configured default filter only applies when no filter, no `--all`
/// and no uploads scope were given, since uploads cannot be filtered.
pub fn build_query(config: &Config, options: &SearchOptions<'_>) -> crate::error::Result<SearchQuery> {
    let scope = options
        .scope
        .map(str::parse::<SearchScope>)
        .transpose()?;

    let filter = match (options.filter, options.all) {
        (Some(name), _) => Some(name.parse::<SearchFilter>()?),
        (None, true) => None,
        (None, false) if scope == Some(SearchScope::Uploads) => None,
        (None, false) => config
            .search
            .filter()
            .with_context("Invalid search.default_filter in config")?,
    };

    let mut query = SearchQuery::new(options.words.join(" "))
        .with_limit(options.limit.unwrap_or(config.search.default_limit))
        .ignoring_spelling(options.ignore_spelling);
    query.filter = filter;
    query.scope = scope;

    Ok(query)
}

/// Search the catalog and return the results envelope
pub fn cmd_search(rt: &Runtime, config: &Config, options: &SearchOptions<'_>) -> anyhow::Result<Value> {
    let query = build_query(config, options)?;
    let client = InnerTubeClient::new(&config.client)
        .map_err(SearchError::from)
        .with_context("Failed to create InnerTube client")?;
    let engine = SearchEngine::new(client).with_labels(config.search.result_type_labels.clone());

    // Continuations stop once a request timeout's worth of time has passed
    let deadline = Instant::now() + Duration::from_secs(config.client.timeout_secs);

    let mut results = rt.block_on(engine.search_until(&query, Some(deadline)))?;
    results.truncate(query.limit);

    output::success_results(&results)
}

/// Fetch suggestions and return the results envelope
pub fn cmd_suggest(
    rt: &Runtime,
    config: &Config,
    words: &[String],
    detailed: bool,
) -> anyhow::Result<Value> {
    let client = InnerTubeClient::new(&config.client)
        .map_err(SearchError::from)
        .with_context("Failed to create InnerTube client")?;
    let engine = SearchEngine::new(client);

    let suggestions = rt.block_on(engine.suggestions(&words.join(" "), detailed))?;
    output::success_results(&suggestions)
}
