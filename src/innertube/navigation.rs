//! Declared navigation paths into untyped InnerTube JSON.
//!
//! Every lookup returns `None` when a step is missing instead of failing,
//! so callers branch on presence. Paths compose by chaining:
//!
//! ```ignore
//! let browse_id = nav(item, TITLE).and_then(|t| nav_str(t, NAVIGATION_BROWSE_ID));
//! ```

use serde_json::Value;

/// One step of a navigation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Object member
    Key(&'static str),
    /// Array element
    Index(usize),
}

use Step::{Index, Key};

pub const CONTENTS: &[Step] = &[Key("contents")];
pub const SECTION_LIST: &[Step] = &[Key("sectionListRenderer"), Key("contents")];
pub const TABS: &[Step] = &[Key("tabbedSearchResultsRenderer"), Key("tabs")];
pub const TAB_CONTENT: &[Step] = &[Key("tabRenderer"), Key("content")];

pub const MUSIC_SHELF: &[Step] = &[Key("musicShelfRenderer")];
pub const CARD_SHELF: &[Step] = &[Key("musicCardShelfRenderer")];
pub const ITEM_SECTION: &[Step] = &[Key("itemSectionRenderer")];
pub const MESSAGE_TEXT: &[Step] = &[
    Key("messageRenderer"),
    Key("text"),
    Key("runs"),
    Index(0),
    Key("text"),
];
pub const MRLIR: &[Step] = &[Key("musicResponsiveListItemRenderer")];

pub const TITLE: &[Step] = &[Key("title"), Key("runs"), Index(0)];
pub const TITLE_TEXT: &[Step] = &[Key("title"), Key("runs"), Index(0), Key("text")];
pub const TEXT_RUNS: &[Step] = &[Key("text"), Key("runs")];
pub const TEXT_RUN_TEXT: &[Step] = &[Key("text"), Key("runs"), Index(0), Key("text")];
pub const SUBTITLE: &[Step] = &[Key("subtitle"), Key("runs"), Index(0), Key("text")];
pub const SUBTITLE2: &[Step] = &[Key("subtitle"), Key("runs"), Index(2), Key("text")];
pub const SUBTITLE_RUNS: &[Step] = &[Key("subtitle"), Key("runs")];
pub const CARD_SHELF_TITLE: &[Step] = &[
    Key("header"),
    Key("musicCardShelfHeaderBasicRenderer"),
    Key("title"),
    Key("runs"),
    Index(0),
    Key("text"),
];

pub const NAVIGATION_BROWSE_ID: &[Step] = &[
    Key("navigationEndpoint"),
    Key("browseEndpoint"),
    Key("browseId"),
];
pub const NAVIGATION_VIDEO_ID: &[Step] = &[
    Key("navigationEndpoint"),
    Key("watchEndpoint"),
    Key("videoId"),
];
pub const NAVIGATION_PLAYLIST_ID: &[Step] = &[
    Key("navigationEndpoint"),
    Key("watchEndpoint"),
    Key("playlistId"),
];
pub const WATCH_VIDEO_ID: &[Step] = &[Key("watchEndpoint"), Key("videoId")];
pub const NAVIGATION_VIDEO_TYPE: &[Step] = &[
    Key("watchEndpoint"),
    Key("watchEndpointMusicSupportedConfigs"),
    Key("watchEndpointMusicConfig"),
    Key("musicVideoType"),
];
pub const PLAY_NAVIGATION: &[Step] = &[
    Key("overlay"),
    Key("musicItemThumbnailOverlayRenderer"),
    Key("content"),
    Key("musicPlayButtonRenderer"),
    Key("playNavigationEndpoint"),
];

pub const MENU_ITEMS: &[Step] = &[Key("menu"), Key("menuRenderer"), Key("items")];
pub const MENU_PLAYLIST_ID: &[Step] = &[
    Key("menu"),
    Key("menuRenderer"),
    Key("items"),
    Index(0),
    Key("menuNavigationItemRenderer"),
    Key("navigationEndpoint"),
    Key("watchPlaylistEndpoint"),
    Key("playlistId"),
];
pub const CARD_BUTTON_COMMAND: &[Step] = &[
    Key("buttons"),
    Index(0),
    Key("buttonRenderer"),
    Key("command"),
];
pub const BADGE_LABEL: &[Step] = &[
    Key("badges"),
    Index(0),
    Key("musicInlineBadgeRenderer"),
    Key("accessibilityData"),
    Key("accessibilityData"),
    Key("label"),
];
pub const LIVE_BADGE: &[Step] = &[Key("badges"), Index(0), Key("liveBadgeRenderer")];
pub const THUMBNAILS: &[Step] = &[
    Key("thumbnail"),
    Key("musicThumbnailRenderer"),
    Key("thumbnail"),
    Key("thumbnails"),
];

pub const CONTINUATION_TOKEN: &[Step] = &[
    Key("continuations"),
    Index(0),
    Key("nextContinuationData"),
    Key("continuation"),
];
pub const SHELF_CONTINUATION: &[Step] =
    &[Key("continuationContents"), Key("musicShelfContinuation")];

/// Follow `path` from `value`.
pub fn nav<'a>(value: &'a Value, path: &[Step]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, step| match step {
        Key(key) => current.get(*key),
        Index(index) => current.get(*index),
    })
}

/// Follow `path` and read a string.
pub fn nav_str<'a>(value: &'a Value, path: &[Step]) -> Option<&'a str> {
    nav(value, path).and_then(Value::as_str)
}

/// Follow `path` and read an array.
pub fn nav_array<'a>(value: &'a Value, path: &[Step]) -> Option<&'a Vec<Value>> {
    nav(value, path).and_then(Value::as_array)
}

/// Flex column `index` of a list item, only if it carries text runs
pub fn flex_column_item(item: &Value, index: usize) -> Option<&Value> {
    let column = item
        .get("flexColumns")?
        .get(index)?
        .get("musicResponsiveListItemFlexColumnRenderer")?;
    nav_array(column, TEXT_RUNS)?;
    Some(column)
}

/// Text of run `run_index` in flex column `index`
pub fn item_text(item: &Value, index: usize, run_index: usize) -> Option<&str> {
    let column = flex_column_item(item, index)?;
    nav_array(column, TEXT_RUNS)?
        .get(run_index)?
        .get("text")?
        .as_str()
}

/// Concatenated text of a runs array
pub fn runs_text(runs: &[Value]) -> String {
    runs.iter()
        .filter_map(|run| run.get("text").and_then(Value::as_str))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nav_follows_keys_and_indices() {
        let data = json!({"title": {"runs": [{"text": "Faded"}]}});
        assert_eq!(nav_str(&data, TITLE_TEXT), Some("Faded"));
    }

    #[test]
    fn test_nav_missing_step_is_none() {
        let data = json!({"title": {"runs": []}});
        assert!(nav(&data, TITLE_TEXT).is_none());
        assert!(nav(&json!(null), TITLE_TEXT).is_none());
        assert!(nav(&json!({"title": "flat"}), TITLE_TEXT).is_none());
    }

    #[test]
    fn test_nav_empty_path_is_identity() {
        let data = json!({"a": 1});
        assert_eq!(nav(&data, &[]), Some(&data));
    }

    #[test]
    fn test_flex_column_requires_runs() {
        let item = json!({
            "flexColumns": [
                {"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": [{"text": "A"}, {"text": " • "}, {"text": "B"}]}}},
                {"musicResponsiveListItemFlexColumnRenderer": {"text": {}}}
            ]
        });

        assert!(flex_column_item(&item, 0).is_some());
        assert!(flex_column_item(&item, 1).is_none());
        assert!(flex_column_item(&item, 5).is_none());
        assert_eq!(item_text(&item, 0, 2), Some("B"));
        assert_eq!(item_text(&item, 0, 3), None);
    }

    #[test]
    fn test_runs_text_concatenates() {
        let runs = vec![json!({"text": "fade", "bold": true}), json!({"text": "d"})];
        assert_eq!(runs_text(&runs), "faded");
    }
}
