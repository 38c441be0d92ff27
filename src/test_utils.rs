//! Test utilities and fixtures for ytmusic-dl tests.
//!
//! Builders for the InnerTube JSON shapes the parser reads, so tests state
//! only what matters to them.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{flat_response, shelf_section, song_items};
//!
//! let response = flat_response(vec![shelf_section("Songs", song_items("s", 3), None)]);
//! ```

use serde_json::{Value, json};

const ALAN_WALKER_ID: &str = "UCJrOtniJ0-NWz37R30urifQ";

/// Add the members of `extra` to `base`, replacing existing ones.
fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(target), Value::Object(members)) = (base.as_object_mut(), extra) {
        for (key, value) in members {
            target.insert(key, value);
        }
    }
    base
}

fn thumbnail() -> Value {
    json!({"musicThumbnailRenderer": {"thumbnail": {"thumbnails": [
        {"url": "https://lh3.googleusercontent.com/thumb=w60-h60", "width": 60, "height": 60}
    ]}}})
}

/// A plain text run
pub fn text_run(text: &str) -> Value {
    json!({ "text": text })
}

/// The " • " separator between subtitle values
pub fn separator() -> Value {
    text_run(" • ")
}

/// A run linking to a browse page (artist, album, ...)
pub fn browse_run(text: &str, browse_id: &str) -> Value {
    json!({
        "text": text,
        "navigationEndpoint": {"browseEndpoint": {"browseId": browse_id}}
    })
}

/// A `musicResponsiveListItemRenderer` item.
///
/// `columns` are the flex columns' runs, `extra` is merged into the renderer
/// and `play` adds a play button with `(video_id, music_video_type)`.
pub fn list_item(columns: Vec<Vec<Value>>, extra: Value, play: Option<(&str, &str)>) -> Value {
    let flex_columns: Vec<Value> = columns
        .into_iter()
        .map(|runs| json!({"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": runs}}}))
        .collect();

    let mut renderer = json!({
        "flexColumns": flex_columns,
        "thumbnail": thumbnail(),
    });

    if let Some((video_id, video_type)) = play {
        renderer = merge(renderer, json!({"overlay": {"musicItemThumbnailOverlayRenderer": {
            "content": {"musicPlayButtonRenderer": {"playNavigationEndpoint": {"watchEndpoint": {
                "videoId": video_id,
                "watchEndpointMusicSupportedConfigs": {"watchEndpointMusicConfig": {
                    "musicVideoType": video_type
                }}
            }}}}
        }}}));
    }

    json!({ "musicResponsiveListItemRenderer": merge(renderer, extra) })
}

/// A song as it appears in a songs shelf
pub fn song_item(video_id: &str, title: &str) -> Value {
    list_item(
        vec![
            vec![text_run(title)],
            vec![
                browse_run("Alan Walker", ALAN_WALKER_ID),
                separator(),
                browse_run("Faded", "MPREb_fade"),
                separator(),
                text_run("3:33"),
            ],
        ],
        json!({}),
        Some((video_id, "MUSIC_VIDEO_TYPE_ATV")),
    )
}

/// `count` songs with video ids `{prefix}-0`, `{prefix}-1`, ...
pub fn song_items(prefix: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| song_item(&format!("{prefix}-{i}"), &format!("Song {i}")))
        .collect()
}

pub fn video_item(video_id: &str, title: &str) -> Value {
    list_item(
        vec![
            vec![text_run(title)],
            vec![
                browse_run("Alan Walker", ALAN_WALKER_ID),
                separator(),
                text_run("3.6B views"),
                separator(),
                text_run("3:33"),
            ],
        ],
        json!({}),
        Some((video_id, "MUSIC_VIDEO_TYPE_OMV")),
    )
}

/// An explicit album released in 2018
pub fn album_item(browse_id: &str, title: &str) -> Value {
    let playlist_id = format!("OLAK5uy_{}", browse_id.trim_start_matches("MPREb_"));
    list_item(
        vec![
            vec![text_run(title)],
            vec![
                text_run("Album"),
                separator(),
                browse_run("Alan Walker", ALAN_WALKER_ID),
                separator(),
                text_run("2018"),
            ],
        ],
        json!({
            "navigationEndpoint": {"browseEndpoint": {"browseId": browse_id}},
            "badges": [{"musicInlineBadgeRenderer": {"accessibilityData": {
                "accessibilityData": {"label": "Explicit"}
            }}}],
            "overlay": {"musicItemThumbnailOverlayRenderer": {"content": {"musicPlayButtonRenderer": {
                "playNavigationEndpoint": {"watchPlaylistEndpoint": {"playlistId": playlist_id}}
            }}}}
        }),
        None,
    )
}

/// An artist with shuffle and radio menu entries
pub fn artist_item(browse_id: &str, name: &str) -> Value {
    list_item(
        vec![
            vec![text_run(name)],
            vec![text_run("Artist"), separator(), text_run("45.2M subscribers")],
        ],
        json!({
            "navigationEndpoint": {"browseEndpoint": {"browseId": browse_id}},
            "menu": {"menuRenderer": {"items": [
                {"menuNavigationItemRenderer": {
                    "icon": {"iconType": "MUSIC_SHUFFLE"},
                    "navigationEndpoint": {"watchPlaylistEndpoint": {"playlistId": "RDAOshuffle"}}
                }},
                {"menuNavigationItemRenderer": {
                    "icon": {"iconType": "MIX"},
                    "navigationEndpoint": {"watchPlaylistEndpoint": {"playlistId": "RDEMradio"}}
                }},
                {"menuServiceItemRenderer": {"icon": {"iconType": "ADD_TO_REMOTE_QUEUE"}}}
            ]}}
        }),
        None,
    )
}

/// A playlist as it appears in a filtered playlists shelf
pub fn playlist_item(browse_id: &str, title: &str) -> Value {
    list_item(
        vec![
            vec![text_run(title)],
            vec![text_run("Someone"), separator(), text_run("1,234 tracks")],
        ],
        json!({"navigationEndpoint": {"browseEndpoint": {"browseId": browse_id}}}),
        None,
    )
}

/// A dated podcast episode
pub fn episode_item(video_id: &str, title: &str) -> Value {
    list_item(
        vec![
            vec![text_run(title)],
            vec![
                text_run("Jan 1, 2024"),
                separator(),
                browse_run("The Show", "MPSPPLshow"),
            ],
        ],
        json!({}),
        Some((video_id, "MUSIC_VIDEO_TYPE_PODCAST_EPISODE")),
    )
}

/// A `messageRenderer` node (the card's "More from YouTube" header)
pub fn message_node(text: &str) -> Value {
    json!({"messageRenderer": {"text": {"runs": [{"text": text}]}}})
}

/// A top-result card renderer labelled `label` (the first subtitle run).
///
/// `extra` is merged into the renderer.
pub fn card_renderer(label: &str, title: &str, extra: Value) -> Value {
    let base = json!({
        "title": {"runs": [{"text": title}]},
        "subtitle": {"runs": [
            {"text": label},
            {"text": " • "},
            browse_run("Alan Walker", ALAN_WALKER_ID),
            {"text": " • "},
            {"text": "3:33"}
        ]},
        "header": {"musicCardShelfHeaderBasicRenderer": {"title": {"runs": [{"text": "Top result"}]}}},
        "thumbnail": thumbnail(),
    });
    merge(base, extra)
}

/// A card section wrapping `card` with secondary `contents`
pub fn card_section(card: Value, contents: Vec<Value>) -> Value {
    json!({ "musicCardShelfRenderer": merge(card, json!({ "contents": contents })) })
}

/// A shelf section, optionally ending with a continuation token
pub fn shelf_section(title: &str, items: Vec<Value>, token: Option<&str>) -> Value {
    let mut shelf = json!({
        "title": {"runs": [{"text": title}]},
        "contents": items,
    });
    if let Some(token) = token {
        shelf = merge(shelf, continuations(token));
    }
    json!({ "musicShelfRenderer": shelf })
}

fn continuations(token: &str) -> Value {
    json!({"continuations": [{"nextContinuationData": {"continuation": token}}]})
}

fn section_list(sections: Vec<Value>) -> Value {
    json!({"sectionListRenderer": {"contents": sections}})
}

/// A search response without tabs
pub fn flat_response(sections: Vec<Value>) -> Value {
    json!({ "contents": section_list(sections) })
}

/// A tabbed search response, one section list per tab
pub fn tabbed_response(tabs: Vec<Vec<Value>>) -> Value {
    let tabs: Vec<Value> = tabs
        .into_iter()
        .map(|sections| json!({"tabRenderer": {"content": section_list(sections)}}))
        .collect();
    json!({"contents": {"tabbedSearchResultsRenderer": {"tabs": tabs}}})
}

/// A continuation page
pub fn continuation_response(items: Vec<Value>, token: Option<&str>) -> Value {
    let mut holder = json!({ "contents": items });
    if let Some(token) = token {
        holder = merge(holder, continuations(token));
    }
    json!({"continuationContents": {"musicShelfContinuation": holder}})
}

/// A suggestions response; the typed `query` prefix is marked bold
pub fn suggestions_response(query: &str, suggestions: &[&str]) -> Value {
    let entries: Vec<Value> = suggestions
        .iter()
        .map(|suggestion| {
            let mut runs = Vec::new();
            match suggestion.strip_prefix(query) {
                Some(rest) => {
                    runs.push(json!({"text": query, "bold": true}));
                    if !rest.is_empty() {
                        runs.push(json!({ "text": rest }));
                    }
                }
                None => runs.push(json!({ "text": suggestion })),
            }
            json!({"searchSuggestionRenderer": {
                "suggestion": {"runs": runs},
                "navigationEndpoint": {"searchEndpoint": {"query": suggestion}}
            }})
        })
        .collect();

    json!({"contents": [{"searchSuggestionsSectionRenderer": {"contents": entries}}]})
}
