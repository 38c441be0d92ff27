//! Search request construction.
//!
//! Validates the filter/scope combination and maps it to the opaque `params`
//! token the server understands. Nothing here touches the network.

use serde_json::{Map, Value, json};

use super::domain::{SearchError, SearchFilter, SearchQuery, SearchScope};

pub const SEARCH_ENDPOINT: &str = "search";
pub const SUGGESTIONS_ENDPOINT: &str = "music/get_search_suggestions";

/// Prefix shared by all single-kind filters
const FILTERED_PARAM1: &str = "EgWKAQ";

/// A validated request, ready for the transport.
///
/// The body is reused verbatim for every continuation of the same search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub endpoint: &'static str,
    pub body: Value,
}

impl SearchRequest {
    /// The `params` token, if the combination needs one
    pub fn params(&self) -> Option<&str> {
        self.body.get("params").and_then(Value::as_str)
    }
}

/// Validate `query` and build its request payload
pub fn build_request(query: &SearchQuery) -> Result<SearchRequest, SearchError> {
    validate(query)?;

    let mut body = Map::new();
    body.insert("query".to_string(), Value::String(query.text.clone()));
    if let Some(params) = search_params(query.filter, query.scope, query.ignore_spelling) {
        body.insert("params".to_string(), Value::String(params));
    }

    Ok(SearchRequest {
        endpoint: SEARCH_ENDPOINT,
        body: Value::Object(body),
    })
}

/// Build the suggestion request body
pub fn build_suggestions_request(input: &str) -> Result<SearchRequest, SearchError> {
    if input.trim().is_empty() {
        return Err(SearchError::InvalidQuery(
            "search query cannot be empty".to_string(),
        ));
    }

    Ok(SearchRequest {
        endpoint: SUGGESTIONS_ENDPOINT,
        body: json!({ "input": input }),
    })
}

/// Reject queries the server cannot answer
pub fn validate(query: &SearchQuery) -> Result<(), SearchError> {
    if query.text.trim().is_empty() {
        return Err(SearchError::InvalidQuery(
            "search query cannot be empty".to_string(),
        ));
    }

    if query.limit == 0 {
        return Err(SearchError::InvalidQuery(
            "limit must be at least 1".to_string(),
        ));
    }

    match (query.scope, query.filter) {
        (Some(SearchScope::Uploads), Some(filter)) => Err(SearchError::IncompatibleFilterScope {
            filter,
            scope: SearchScope::Uploads,
        }),
        (Some(SearchScope::Library), Some(filter)) if filter.is_playlist_subtype() => {
            Err(SearchError::IncompatibleFilterScope {
                filter,
                scope: SearchScope::Library,
            })
        }
        _ => Ok(()),
    }
}

/// Map a filter/scope combination to the server's `params` token.
///
/// Returns `None` for a plain blended search.
pub fn search_params(
    filter: Option<SearchFilter>,
    scope: Option<SearchScope>,
    ignore_spelling: bool,
) -> Option<String> {
    match (scope, filter) {
        (Some(SearchScope::Uploads), _) => Some("agIYAw%3D%3D".to_string()),
        (Some(SearchScope::Library), None) => Some("agIYBA%3D%3D".to_string()),
        (Some(SearchScope::Library), Some(filter)) => Some(format!(
            "{FILTERED_PARAM1}{}AWoKEAUQCRADEAoYBA%3D%3D",
            filter_code(filter)
        )),
        (None, Some(SearchFilter::Playlists)) => {
            let suffix = if ignore_spelling {
                "MABCAggBagoQBBADEAkQBRAK"
            } else {
                "MABqChAEEAMQCRAFEAo%3D"
            };
            Some(format!("Eg-KAQwIABAAGAAgACgB{suffix}"))
        }
        (None, Some(filter)) if filter.is_playlist_subtype() => {
            let param2 = if filter == SearchFilter::FeaturedPlaylists {
                "Dg"
            } else {
                "EA"
            };
            let param3 = if ignore_spelling {
                "BQgIIAWoMEA4QChADEAQQCRAF"
            } else {
                "BagwQDhAKEAMQBBAJEAU%3D"
            };
            Some(format!("EgeKAQQoA{param2}{param3}"))
        }
        (None, Some(filter)) => {
            let param3 = if ignore_spelling {
                "AUICCAFqDBAOEAoQAxAEEAkQBQ%3D%3D"
            } else {
                "AWoMEA4QChADEAQQCRAF"
            };
            Some(format!("{FILTERED_PARAM1}{}{param3}", filter_code(filter)))
        }
        (None, None) if ignore_spelling => {
            Some("EhGKAQ4IARABGAEgASgAOAFAAUICCAE%3D".to_string())
        }
        (None, None) => None,
    }
}

/// Per-kind code embedded in filtered params
fn filter_code(filter: SearchFilter) -> &'static str {
    match filter {
        SearchFilter::Songs => "II",
        SearchFilter::Videos => "IQ",
        SearchFilter::Albums => "IY",
        SearchFilter::Artists => "Ig",
        SearchFilter::Playlists => "Io",
        SearchFilter::Profiles => "JY",
        SearchFilter::Podcasts => "JQ",
        SearchFilter::Episodes => "JI",
        // Only reachable through the library scope, which rejects these earlier
        SearchFilter::CommunityPlaylists | SearchFilter::FeaturedPlaylists => "Io",
    }
}
