//! Search suggestion parsing.

use serde_json::Value;

use super::domain::{DetailedSuggestion, SuggestionRun, Suggestions};
use super::navigation::{Step, nav, nav_array, nav_str, runs_text};

const SUGGESTION_ENTRIES: &[Step] = &[
    Step::Key("contents"),
    Step::Index(0),
    Step::Key("searchSuggestionsSectionRenderer"),
    Step::Key("contents"),
];
const SUGGESTION_RUNS: &[Step] = &[Step::Key("suggestion"), Step::Key("runs")];
const SUGGESTION_QUERY: &[Step] = &[
    Step::Key("navigationEndpoint"),
    Step::Key("searchEndpoint"),
    Step::Key("query"),
];

/// Parse a `get_search_suggestions` response, in server order.
///
/// A response without a suggestion section yields an empty list.
pub fn parse_suggestions(response: &Value, detailed: bool) -> Suggestions {
    let renderers = nav_array(response, SUGGESTION_ENTRIES)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.get("searchSuggestionRenderer"));

    if detailed {
        Suggestions::Detailed(renderers.map(detailed_suggestion).collect())
    } else {
        Suggestions::Plain(renderers.map(plain_suggestion).collect())
    }
}

fn suggestion_runs(renderer: &Value) -> &[Value] {
    nav_array(renderer, SUGGESTION_RUNS)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn plain_suggestion(renderer: &Value) -> String {
    nav_str(renderer, SUGGESTION_QUERY)
        .map(String::from)
        .unwrap_or_else(|| runs_text(suggestion_runs(renderer)))
}

fn detailed_suggestion(renderer: &Value) -> DetailedSuggestion {
    let runs: Vec<SuggestionRun> = suggestion_runs(renderer)
        .iter()
        .map(|run| SuggestionRun {
            text: nav_str(run, &[Step::Key("text")])
                .unwrap_or_default()
                .to_string(),
            bold: nav(run, &[Step::Key("bold")])
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
        .collect();

    DetailedSuggestion {
        text: runs.iter().map(|run| run.text.as_str()).collect(),
        runs,
    }
}
