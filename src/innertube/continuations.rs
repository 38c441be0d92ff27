//! Following shelf continuation tokens.
//!
//! A filtered shelf may end with a token for the next page. Each follow-up
//! request repeats the original body with the token in the query string and
//! answers with a `musicShelfContinuation` holder, which may carry the next
//! token in turn. Pages are fetched strictly one after another.

use std::time::Instant;

use serde_json::Value;

use super::domain::{SearchError, SearchResult};
use super::navigation::{CONTENTS, CONTINUATION_TOKEN, SHELF_CONTINUATION, nav, nav_array, nav_str};
use super::request::SearchRequest;
use super::traits::Transport;

/// Query-string suffix that asks for the page behind `token`
pub fn continuation_params(token: &str) -> String {
    format!("&ctoken={token}&continuation={token}")
}

/// Fetch follow-up pages of `shelf` until `remaining` results are gathered.
///
/// `shelf` is the renderer holding the first continuation token and
/// `parse_page` turns a page's raw items into results. Stops early when the
/// server sends an empty page, stops issuing tokens, or `deadline` passes;
/// whatever was gathered up to then is returned. Transport errors propagate
/// and are not retried.
pub async fn paginate<T, F>(
    transport: &T,
    request: &SearchRequest,
    shelf: &Value,
    remaining: usize,
    deadline: Option<Instant>,
    parse_page: F,
) -> Result<Vec<SearchResult>, SearchError>
where
    T: Transport + ?Sized,
    F: Fn(&[Value]) -> Vec<SearchResult>,
{
    let mut results = Vec::new();
    let mut token = nav_str(shelf, CONTINUATION_TOKEN).map(String::from);

    while let Some(current) = token.take() {
        if results.len() >= remaining {
            break;
        }

        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            tracing::warn!(
                gathered = results.len(),
                remaining,
                "Search deadline passed, returning partial results"
            );
            break;
        }

        let response = transport
            .send(request.endpoint, &request.body, &continuation_params(&current))
            .await?;

        let Some(holder) = nav(&response, SHELF_CONTINUATION) else {
            tracing::debug!("Continuation response has no shelf continuation");
            break;
        };

        let items = nav_array(holder, CONTENTS)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let page = parse_page(items);
        if page.is_empty() {
            break;
        }

        let room = remaining - results.len();
        tracing::debug!(page = page.len(), room, "Fetched continuation page");
        results.extend(page.into_iter().take(room));

        token = nav_str(holder, CONTINUATION_TOKEN).map(String::from);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::innertube::domain::{ResultKind, TransportError};
    use crate::innertube::parser::parse_results;
    use crate::innertube::traits::mocks::MockTransport;
    use crate::test_utils::{continuation_response, shelf_section, song_items};
    use serde_json::json;

    fn songs(items: &[Value]) -> Vec<SearchResult> {
        parse_results(items, Some(ResultKind::Song), None, false)
    }

    fn request() -> SearchRequest {
        SearchRequest {
            endpoint: "search",
            body: json!({"query": "faded", "params": "EgWKAQIIAWoMEA4QChADEAQQCRAF"}),
        }
    }

    fn shelf_with_token(token: Option<&str>) -> Value {
        shelf_section("Songs", vec![], token)["musicShelfRenderer"].clone()
    }

    #[test]
    fn test_continuation_params() {
        assert_eq!(continuation_params("abc"), "&ctoken=abc&continuation=abc");
    }

    #[tokio::test]
    async fn test_follows_tokens_and_reuses_body() {
        let transport = MockTransport::with_responses(vec![
            continuation_response(song_items("p2", 5), Some("t2")),
            continuation_response(song_items("p3", 5), None),
        ]);

        let results = paginate(
            &transport,
            &request(),
            &shelf_with_token(Some("t1")),
            100,
            None,
            songs,
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 10);
        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].additional_params, "&ctoken=t1&continuation=t1");
        assert_eq!(calls[1].additional_params, "&ctoken=t2&continuation=t2");
        assert!(calls.iter().all(|call| call.body == request().body));
    }

    #[tokio::test]
    async fn test_truncates_to_remaining() {
        let transport = MockTransport::with_responses(vec![continuation_response(
            song_items("p2", 20),
            Some("t2"),
        )]);

        let results = paginate(
            &transport,
            &request(),
            &shelf_with_token(Some("t1")),
            2,
            None,
            songs,
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_no_token_no_request() {
        let transport = MockTransport::default();
        let results = paginate(&transport, &request(), &shelf_with_token(None), 10, None, songs)
            .await
            .unwrap();

        assert!(results.is_empty());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stops_on_missing_holder_and_empty_page() {
        let transport = MockTransport::with_responses(vec![json!({"responseContext": {}})]);
        let results = paginate(
            &transport,
            &request(),
            &shelf_with_token(Some("t1")),
            10,
            None,
            songs,
        )
        .await
        .unwrap();
        assert!(results.is_empty());

        let transport =
            MockTransport::with_responses(vec![continuation_response(vec![], Some("t2"))]);
        let results = paginate(
            &transport,
            &request(),
            &shelf_with_token(Some("t1")),
            10,
            None,
            songs,
        )
        .await
        .unwrap();
        assert!(results.is_empty());
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_passed_deadline_returns_partial() {
        let transport = MockTransport::with_responses(vec![
            continuation_response(song_items("p2", 3), Some("t2")),
        ]);
        let past = Instant::now()
            .checked_sub(Duration::from_secs(1))
            .unwrap_or_else(Instant::now);

        let results = paginate(
            &transport,
            &request(),
            &shelf_with_token(Some("t1")),
            10,
            Some(past),
            songs,
        )
        .await
        .unwrap();

        assert!(results.is_empty());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let transport = MockTransport::with_error(TransportError::Status {
            status: 500,
            body: "oops".to_string(),
        });

        let err = paginate(
            &transport,
            &request(),
            &shelf_with_token(Some("t1")),
            10,
            None,
            songs,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            SearchError::Upstream(TransportError::Status { status: 500, .. })
        ));
        assert_eq!(transport.calls().len(), 1);
    }
}
