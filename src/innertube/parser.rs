//! Conversion of raw result items into typed [`SearchResult`]s.
//!
//! Items are `musicResponsiveListItemRenderer` nodes whose fields live in
//! "flex columns" of text runs. Which run holds what depends on the kind of
//! result and on whether the search was filtered, so every extractor works on
//! positions rather than names. Anything missing stays `None`; only an item
//! without its identifier or title is dropped.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Value, json};

use super::domain::{
    AlbumRef, AlbumResult, ArtistRef, ArtistResult, EpisodeResult, PlaylistResult,
    PodcastResult, ProfileResult, ResultKind, ResultTypeLabels, SearchResult, StationResult,
    Thumbnail, TrackResult,
};
use super::navigation::{
    BADGE_LABEL, CARD_BUTTON_COMMAND, CARD_SHELF_TITLE, LIVE_BADGE, MENU_ITEMS,
    MENU_PLAYLIST_ID, MRLIR, NAVIGATION_BROWSE_ID, NAVIGATION_PLAYLIST_ID, NAVIGATION_VIDEO_ID,
    NAVIGATION_VIDEO_TYPE, PLAY_NAVIGATION, SUBTITLE, SUBTITLE_RUNS, SUBTITLE2, TEXT_RUN_TEXT,
    TEXT_RUNS, THUMBNAILS, TITLE, TITLE_TEXT, WATCH_VIDEO_ID, flex_column_item, item_text, nav,
    nav_array, nav_str,
};

static VIEWS_REGEX: OnceLock<Regex> = OnceLock::new();
static DURATION_REGEX: OnceLock<Regex> = OnceLock::new();
static YEAR_REGEX: OnceLock<Regex> = OnceLock::new();

fn views_regex() -> &'static Regex {
    // The server separates number and magnitude with a non-breaking space
    VIEWS_REGEX.get_or_init(|| Regex::new(r"^\d([^ ])* [^ ]*$").expect("valid views regex"))
}

fn duration_regex() -> &'static Regex {
    DURATION_REGEX
        .get_or_init(|| Regex::new(r"^(\d+:)*\d+:\d+$").expect("valid duration regex"))
}

fn year_regex() -> &'static Regex {
    YEAR_REGEX.get_or_init(|| Regex::new(r"^\d{4}$").expect("valid year regex"))
}

const VIDEO_TYPE_ATV: &str = "MUSIC_VIDEO_TYPE_ATV";
const VIDEO_TYPE_PODCAST_EPISODE: &str = "MUSIC_VIDEO_TYPE_PODCAST_EPISODE";

/// Parse a list of shelf items.
///
/// `kind` is the shelf-level classification; `None` means each item's kind
/// is inferred from its own identifiers. `blended` marks items of an
/// unfiltered search, whose subtitles start with a "Type • " prefix.
/// Output keeps server order.
pub fn parse_results(
    items: &[Value],
    kind: Option<ResultKind>,
    category: Option<&str>,
    blended: bool,
) -> Vec<SearchResult> {
    let mut results = Vec::with_capacity(items.len());

    for item in items {
        let Some(data) = nav(item, MRLIR) else {
            tracing::debug!("Skipping shelf item without a list item renderer");
            continue;
        };

        match parse_search_result(data, kind, category, blended) {
            Some(result) => results.push(result),
            None => tracing::debug!(
                event = "PartialItemDropped",
                ?kind,
                category,
                "Dropping result without identifier or title"
            ),
        }
    }

    results
}

/// Parse one `musicResponsiveListItemRenderer`
pub fn parse_search_result(
    data: &Value,
    kind: Option<ResultKind>,
    category: Option<&str>,
    blended: bool,
) -> Option<SearchResult> {
    // Blended results carry a leading "Type • " prefix in the second column,
    // whether or not the shelf header told us the kind
    let default_offset = if blended || kind == Some(ResultKind::Album) {
        2
    } else {
        0
    };
    let kind = kind.unwrap_or_else(|| infer_item_kind(data));
    let category = category.map(String::from);

    match kind {
        ResultKind::Song => parse_track(data, category).map(SearchResult::Song),
        ResultKind::Video => parse_track(data, category).map(SearchResult::Video),
        ResultKind::Album => parse_album(data, category).map(SearchResult::Album),
        ResultKind::Artist => parse_artist(data, category).map(SearchResult::Artist),
        ResultKind::Playlist => {
            parse_playlist(data, category, default_offset).map(SearchResult::Playlist)
        }
        ResultKind::Profile => parse_profile(data, category).map(SearchResult::Profile),
        ResultKind::Podcast => {
            parse_podcast(data, category, default_offset).map(SearchResult::Podcast)
        }
        ResultKind::Episode => parse_episode(data, category).map(SearchResult::Episode),
        ResultKind::Station => parse_station(data, category).map(SearchResult::Station),
        ResultKind::Upload => parse_upload(data, category),
    }
}

/// Decide an item's kind from its browse id, falling back to the play
/// button's video type.
pub fn infer_item_kind(data: &Value) -> ResultKind {
    if let Some(browse_id) = nav_str(data, NAVIGATION_BROWSE_ID) {
        let by_prefix = [
            ("VM", ResultKind::Playlist),
            ("RD", ResultKind::Playlist),
            ("VL", ResultKind::Playlist),
            ("MPLA", ResultKind::Artist),
            ("UC", ResultKind::Artist),
            ("MPRE", ResultKind::Album),
            ("MPSP", ResultKind::Podcast),
            ("MPED", ResultKind::Episode),
        ]
        .into_iter()
        .find(|(prefix, _)| browse_id.starts_with(prefix));

        if let Some((_, kind)) = by_prefix {
            return kind;
        }
    }

    match play_video_type(data) {
        Some(VIDEO_TYPE_ATV) => ResultKind::Song,
        Some(VIDEO_TYPE_PODCAST_EPISODE) => ResultKind::Episode,
        _ => ResultKind::Video,
    }
}

/// Parse the highlighted result of a top-result card
pub fn parse_top_result(card: &Value, labels: &ResultTypeLabels) -> Option<SearchResult> {
    // The server labels albums by release type ("Album", "Single", "EP"...)
    let kind = labels
        .kind_for(nav_str(card, SUBTITLE)?)
        .unwrap_or(ResultKind::Album);
    let category = nav_str(card, CARD_SHELF_TITLE).map(String::from);
    let title = nav_str(card, TITLE_TEXT).map(String::from);
    let title_browse_id = nav(card, TITLE)
        .and_then(|run| nav_str(run, NAVIGATION_BROWSE_ID))
        .map(String::from);
    let subtitle_tail = nav_array(card, SUBTITLE_RUNS)
        .and_then(|runs| runs.get(2..))
        .unwrap_or_default();
    let thumbnails = parse_thumbnails(card);

    let result = match kind {
        ResultKind::Artist => SearchResult::Artist(ArtistResult {
            category,
            artist: title?,
            browse_id: title_browse_id?,
            subscribers: nav_str(card, SUBTITLE2).and_then(first_word),
            thumbnails,
            ..Default::default()
        }),
        ResultKind::Song | ResultKind::Video | ResultKind::Episode => {
            let on_tap = card.get("onTap");
            let video_id = on_tap.and_then(|tap| nav_str(tap, WATCH_VIDEO_ID))?.to_string();
            let video_type = on_tap
                .and_then(|tap| nav_str(tap, NAVIGATION_VIDEO_TYPE))
                .map(String::from);

            if kind == ResultKind::Episode {
                SearchResult::Episode(EpisodeResult {
                    category,
                    title: title?,
                    video_id,
                    video_type,
                    thumbnails,
                    ..Default::default()
                })
            } else {
                let runs = parse_song_runs(subtitle_tail);
                let track = TrackResult {
                    category,
                    title: title?,
                    video_id,
                    video_type,
                    artists: runs.artists,
                    album: runs.album,
                    views: runs.views,
                    year: runs.year,
                    duration: runs.duration,
                    duration_seconds: runs.duration_seconds,
                    is_explicit: nav(card, BADGE_LABEL).is_some(),
                    thumbnails,
                };
                if kind == ResultKind::Song {
                    SearchResult::Song(track)
                } else {
                    SearchResult::Video(track)
                }
            }
        }
        ResultKind::Album => {
            let runs = parse_song_runs(subtitle_tail);
            SearchResult::Album(AlbumResult {
                category,
                title: title?,
                browse_id: title_browse_id?,
                playlist_id: nav(card, CARD_BUTTON_COMMAND).and_then(watch_playlist_id),
                album_type: nav_str(card, SUBTITLE).map(String::from),
                artists: runs.artists,
                year: runs.year,
                duration: runs.duration,
                is_explicit: nav(card, BADGE_LABEL).is_some(),
                thumbnails,
            })
        }
        ResultKind::Playlist => {
            let author = parse_song_runs(subtitle_tail)
                .artists
                .into_iter()
                .next()
                .map(|artist| artist.name);
            let playlist_id = nav_str(card, MENU_PLAYLIST_ID).map(String::from);
            if title_browse_id.is_none() && playlist_id.is_none() {
                return None;
            }
            SearchResult::Playlist(PlaylistResult {
                category,
                title: title?,
                browse_id: title_browse_id,
                playlist_id,
                author,
                item_count: None,
                thumbnails,
            })
        }
        ResultKind::Profile => SearchResult::Profile(ProfileResult {
            category,
            title: title?,
            name: None,
            browse_id: title_browse_id?,
            thumbnails,
        }),
        ResultKind::Podcast => SearchResult::Podcast(PodcastResult {
            category,
            title: title?,
            browse_id: title_browse_id?,
            author: subtitle_tail
                .first()
                .and_then(|run| run.get("text"))
                .and_then(Value::as_str)
                .map(String::from),
            thumbnails,
        }),
        ResultKind::Station | ResultKind::Upload => return None,
    };

    Some(result)
}

/// Fields recovered from a song/video/album subtitle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SongRuns {
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
    pub views: Option<String>,
    pub duration: Option<String>,
    pub duration_seconds: Option<u64>,
    pub year: Option<String>,
}

/// Classify subtitle runs. Odd positions are always separators.
pub fn parse_song_runs(runs: &[Value]) -> SongRuns {
    let mut parsed = SongRuns::default();

    for (i, run) in runs.iter().enumerate().step_by(2) {
        let text = run.get("text").and_then(Value::as_str).unwrap_or_default();

        if run.get("navigationEndpoint").is_some() {
            let id = nav_str(run, NAVIGATION_BROWSE_ID).map(String::from);
            let is_album = id
                .as_deref()
                .is_some_and(|id| id.starts_with("MPRE") || id.contains("release_detail"));

            if is_album {
                parsed.album = Some(AlbumRef {
                    name: text.to_string(),
                    id,
                });
            } else {
                parsed.artists.push(ArtistRef {
                    name: text.to_string(),
                    id,
                });
            }
        } else if i > 0 && views_regex().is_match(text) {
            parsed.views = first_word(text);
        } else if duration_regex().is_match(text) {
            parsed.duration = Some(text.to_string());
            parsed.duration_seconds = parse_duration(text);
        } else if year_regex().is_match(text) {
            parsed.year = Some(text.to_string());
        } else {
            parsed.artists.push(ArtistRef {
                name: text.to_string(),
                id: None,
            });
        }
    }

    parsed
}

/// "h:mm:ss" / "m:ss" to seconds
pub fn parse_duration(duration: &str) -> Option<u64> {
    duration
        .trim()
        .split(':')
        .rev()
        .zip([1u64, 60, 3600])
        .try_fold(0u64, |total, (part, multiplier)| {
            Some(total + part.parse::<u64>().ok()? * multiplier)
        })
}

pub fn parse_thumbnails(data: &Value) -> Vec<Thumbnail> {
    nav_array(data, THUMBNAILS)
        .map(|thumbnails| {
            thumbnails
                .iter()
                .filter_map(|thumb| {
                    Some(Thumbnail {
                        url: thumb.get("url")?.as_str()?.to_string(),
                        width: dimension(thumb, "width"),
                        height: dimension(thumb, "height"),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn dimension(thumb: &Value, key: &str) -> Option<u32> {
    thumb
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

fn first_word(text: &str) -> Option<String> {
    text.split(' ')
        .next()
        .filter(|word| !word.is_empty())
        .map(String::from)
}

fn column_runs(data: &Value, index: usize) -> Option<&Vec<Value>> {
    flex_column_item(data, index).and_then(|column| nav_array(column, TEXT_RUNS))
}

fn play_endpoint(data: &Value) -> Option<&Value> {
    nav(data, PLAY_NAVIGATION)
}

fn play_video_type(data: &Value) -> Option<&str> {
    play_endpoint(data).and_then(|endpoint| nav_str(endpoint, NAVIGATION_VIDEO_TYPE))
}

/// Playlist id of a play command, whichever endpoint flavor it uses
fn watch_playlist_id(command: &Value) -> Option<String> {
    command
        .get("watchPlaylistEndpoint")
        .or_else(|| command.get("watchEndpoint"))
        .and_then(|endpoint| endpoint.get("playlistId"))
        .and_then(Value::as_str)
        .map(String::from)
}

fn title_of(data: &Value) -> Option<String> {
    item_text(data, 0, 0).map(String::from)
}

fn browse_id_of(data: &Value) -> Option<String> {
    nav_str(data, NAVIGATION_BROWSE_ID).map(String::from)
}

/// Runs of the second column plus the third one (if any), minus a leading
/// type specifier such as "Song" or "Single".
fn track_runs(data: &Value) -> SongRuns {
    let Some(first) = column_runs(data, 1) else {
        return SongRuns::default();
    };

    let mut runs = first.clone();
    if let Some(second) = column_runs(data, 2) {
        runs.push(json!({ "text": "" }));
        runs.extend(second.iter().cloned());
    }

    let type_specifier = runs
        .first()
        .and_then(Value::as_object)
        .is_some_and(|run| run.len() == 1);
    let offset = if type_specifier { 2 } else { 0 };

    parse_song_runs(runs.get(offset..).unwrap_or_default())
}

fn parse_track(data: &Value, category: Option<String>) -> Option<TrackResult> {
    let endpoint = play_endpoint(data);
    let video_id = endpoint.and_then(|e| nav_str(e, WATCH_VIDEO_ID))?.to_string();
    let runs = track_runs(data);

    Some(TrackResult {
        category,
        title: title_of(data)?,
        video_id,
        video_type: play_video_type(data).map(String::from),
        artists: runs.artists,
        album: runs.album,
        views: runs.views,
        year: runs.year,
        duration: runs.duration,
        duration_seconds: runs.duration_seconds,
        is_explicit: nav(data, BADGE_LABEL).is_some(),
        thumbnails: parse_thumbnails(data),
    })
}

fn parse_album(data: &Value, category: Option<String>) -> Option<AlbumResult> {
    let runs = track_runs(data);

    Some(AlbumResult {
        category,
        title: title_of(data)?,
        browse_id: browse_id_of(data)?,
        playlist_id: play_endpoint(data).and_then(watch_playlist_id),
        album_type: item_text(data, 1, 0).map(String::from),
        artists: runs.artists,
        year: runs.year,
        duration: runs.duration,
        is_explicit: nav(data, BADGE_LABEL).is_some(),
        thumbnails: parse_thumbnails(data),
    })
}

fn parse_artist(data: &Value, category: Option<String>) -> Option<ArtistResult> {
    let mut artist = ArtistResult {
        category,
        artist: title_of(data)?,
        browse_id: browse_id_of(data)?,
        subscribers: column_runs(data, 1)
            .and_then(|runs| runs.last())
            .and_then(|run| run.get("text"))
            .and_then(Value::as_str)
            .filter(|text| text.starts_with(|c: char| c.is_ascii_digit()))
            .and_then(first_word),
        thumbnails: parse_thumbnails(data),
        ..Default::default()
    };

    let menu_entries = nav_array(data, MENU_ITEMS)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.get("menuNavigationItemRenderer"));

    for entry in menu_entries {
        let icon = entry
            .get("icon")
            .and_then(|icon| icon.get("iconType"))
            .and_then(Value::as_str);
        let watch_id = entry.get("navigationEndpoint").and_then(watch_playlist_id);

        match icon {
            Some("MUSIC_SHUFFLE") => artist.shuffle_id = watch_id,
            Some("MIX") => artist.radio_id = watch_id,
            _ => {}
        }
    }

    Some(artist)
}

fn parse_playlist(
    data: &Value,
    category: Option<String>,
    default_offset: usize,
) -> Option<PlaylistResult> {
    let run_count = column_runs(data, 1).map_or(0, Vec::len);
    let has_author = run_count == default_offset + 3;
    let count_index = default_offset + if has_author { 2 } else { 0 };

    let browse_id = browse_id_of(data);
    let playlist_id = play_endpoint(data).and_then(watch_playlist_id);
    if browse_id.is_none() && playlist_id.is_none() {
        return None;
    }

    Some(PlaylistResult {
        category,
        title: title_of(data)?,
        browse_id,
        playlist_id,
        author: has_author
            .then(|| item_text(data, 1, default_offset))
            .flatten()
            .map(String::from),
        item_count: item_text(data, 1, count_index)
            .and_then(first_word)
            .and_then(|count| count.replace(',', "").parse().ok()),
        thumbnails: parse_thumbnails(data),
    })
}

fn parse_profile(data: &Value, category: Option<String>) -> Option<ProfileResult> {
    Some(ProfileResult {
        category,
        title: title_of(data)?,
        name: item_text(data, 1, 2).map(String::from),
        browse_id: browse_id_of(data)?,
        thumbnails: parse_thumbnails(data),
    })
}

fn parse_podcast(
    data: &Value,
    category: Option<String>,
    default_offset: usize,
) -> Option<PodcastResult> {
    Some(PodcastResult {
        category,
        title: title_of(data)?,
        browse_id: browse_id_of(data)?,
        author: item_text(data, 1, default_offset).map(String::from),
        thumbnails: parse_thumbnails(data),
    })
}

fn parse_episode(data: &Value, category: Option<String>) -> Option<EpisodeResult> {
    let endpoint = play_endpoint(data);
    let video_id = endpoint.and_then(|e| nav_str(e, WATCH_VIDEO_ID))?.to_string();

    let column = flex_column_item(data, 1);
    let has_date = column_runs(data, 1).is_some_and(|runs| runs.len() > 1);
    let podcast = column_runs(data, 1)
        .and_then(|runs| runs.get(if has_date { 2 } else { 0 }))
        .and_then(|run| {
            Some(ArtistRef {
                name: run.get("text")?.as_str()?.to_string(),
                id: nav_str(run, NAVIGATION_BROWSE_ID).map(String::from),
            })
        });

    Some(EpisodeResult {
        category,
        title: title_of(data)?,
        video_id,
        video_type: play_video_type(data).map(String::from),
        date: column
            .filter(|_| has_date)
            .and_then(|column| nav_str(column, TEXT_RUN_TEXT))
            .map(String::from),
        live: nav(data, LIVE_BADGE).is_some(),
        podcast,
        thumbnails: parse_thumbnails(data),
    })
}

fn parse_station(data: &Value, category: Option<String>) -> Option<StationResult> {
    Some(StationResult {
        category,
        title: title_of(data)?,
        video_id: nav_str(data, NAVIGATION_VIDEO_ID).map(String::from),
        playlist_id: nav_str(data, NAVIGATION_PLAYLIST_ID)?.to_string(),
        thumbnails: parse_thumbnails(data),
    })
}

/// Uploads resolve to a song (no browse id), an artist or an album
fn parse_upload(data: &Value, category: Option<String>) -> Option<SearchResult> {
    let title = title_of(data)?;
    let thumbnails = parse_thumbnails(data);

    let Some(browse_id) = browse_id_of(data) else {
        let first_run = column_runs(data, 0).and_then(|runs| runs.first());
        let video_id = first_run
            .and_then(|run| nav_str(run, NAVIGATION_VIDEO_ID))?
            .to_string();
        let runs = column_runs(data, 1)
            .map(|runs| parse_song_runs(runs))
            .unwrap_or_default();

        return Some(SearchResult::Song(TrackResult {
            category,
            title,
            video_id,
            artists: runs.artists,
            album: runs.album,
            views: runs.views,
            year: runs.year,
            duration: runs.duration,
            duration_seconds: runs.duration_seconds,
            thumbnails,
            ..Default::default()
        }));
    };

    if browse_id.contains("artist") {
        return Some(SearchResult::Artist(ArtistResult {
            category,
            artist: title,
            browse_id,
            thumbnails,
            ..Default::default()
        }));
    }

    let values: Vec<&str> = column_runs(data, 1)
        .into_iter()
        .flatten()
        .step_by(2)
        .filter_map(|run| run.get("text").and_then(Value::as_str))
        .collect();

    Some(SearchResult::Album(AlbumResult {
        category,
        title,
        browse_id,
        artists: values
            .get(1)
            .map(|name| {
                vec![ArtistRef {
                    name: name.to_string(),
                    id: None,
                }]
            })
            .unwrap_or_default(),
        // Upload albums expose a release date in place of the year
        year: values.get(2).map(|date| date.to_string()),
        thumbnails,
        ..Default::default()
    }))
}
