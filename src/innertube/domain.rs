//! Internal domain models for catalog search.
//!
//! These types are OUR types - they don't change when the InnerTube response
//! shape changes. Raw JSON nodes get converted into these types by the parser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Entity-type restriction for a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFilter {
    Albums,
    Artists,
    Playlists,
    CommunityPlaylists,
    FeaturedPlaylists,
    Songs,
    Videos,
    Profiles,
    Podcasts,
    Episodes,
}

impl SearchFilter {
    /// All filters, in the order the server documents them
    pub const ALL: [SearchFilter; 10] = [
        SearchFilter::Albums,
        SearchFilter::Artists,
        SearchFilter::Playlists,
        SearchFilter::CommunityPlaylists,
        SearchFilter::FeaturedPlaylists,
        SearchFilter::Songs,
        SearchFilter::Videos,
        SearchFilter::Profiles,
        SearchFilter::Podcasts,
        SearchFilter::Episodes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchFilter::Albums => "albums",
            SearchFilter::Artists => "artists",
            SearchFilter::Playlists => "playlists",
            SearchFilter::CommunityPlaylists => "community_playlists",
            SearchFilter::FeaturedPlaylists => "featured_playlists",
            SearchFilter::Songs => "songs",
            SearchFilter::Videos => "videos",
            SearchFilter::Profiles => "profiles",
            SearchFilter::Podcasts => "podcasts",
            SearchFilter::Episodes => "episodes",
        }
    }

    /// Community and featured playlists are subtypes of playlists
    pub fn is_playlist_subtype(self) -> bool {
        matches!(
            self,
            SearchFilter::CommunityPlaylists | SearchFilter::FeaturedPlaylists
        )
    }

    /// The kind every item in a filtered shelf parses as.
    ///
    /// Playlist subtypes canonicalize to [`ResultKind::Playlist`].
    pub fn result_kind(self) -> ResultKind {
        match self {
            SearchFilter::Albums => ResultKind::Album,
            SearchFilter::Artists => ResultKind::Artist,
            SearchFilter::Playlists
            | SearchFilter::CommunityPlaylists
            | SearchFilter::FeaturedPlaylists => ResultKind::Playlist,
            SearchFilter::Songs => ResultKind::Song,
            SearchFilter::Videos => ResultKind::Video,
            SearchFilter::Profiles => ResultKind::Profile,
            SearchFilter::Podcasts => ResultKind::Podcast,
            SearchFilter::Episodes => ResultKind::Episode,
        }
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchFilter {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchFilter::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| SearchError::InvalidFilter(s.to_string()))
    }
}

/// Restricts a search to the user's own library or uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    Library,
    Uploads,
}

impl SearchScope {
    pub const ALL: [SearchScope; 2] = [SearchScope::Library, SearchScope::Uploads];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchScope::Library => "library",
            SearchScope::Uploads => "uploads",
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchScope {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchScope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| SearchError::InvalidScope(s.to_string()))
    }
}

/// A search request as the caller describes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Query text (must not be blank)
    pub text: String,
    /// Restrict results to one entity kind
    pub filter: Option<SearchFilter>,
    /// Search the user's library or uploads instead of the catalog
    pub scope: Option<SearchScope>,
    /// Target number of results when following continuations
    pub limit: usize,
    /// Ask the server not to auto-correct the query spelling
    pub ignore_spelling: bool,
}

impl SearchQuery {
    /// Default result budget
    pub const DEFAULT_LIMIT: usize = 20;

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            filter: None,
            scope: None,
            limit: Self::DEFAULT_LIMIT,
            ignore_spelling: false,
        }
    }

    pub fn with_filter(mut self, filter: SearchFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn ignoring_spelling(mut self, ignore: bool) -> Self {
        self.ignore_spelling = ignore;
        self
    }
}

/// The kind a raw result item is parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    Song,
    Video,
    Album,
    Artist,
    Playlist,
    Profile,
    Podcast,
    Episode,
    Station,
    /// Synthetic marker for uploads; each item resolves to song, album or artist
    Upload,
}

/// Localized result-type labels as the server writes them in subtitles and
/// shelf headers, in the order artist, playlist, song, video, station,
/// profile, podcast, episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTypeLabels(pub Vec<String>);

impl ResultTypeLabels {
    const KINDS: [ResultKind; 8] = [
        ResultKind::Artist,
        ResultKind::Playlist,
        ResultKind::Song,
        ResultKind::Video,
        ResultKind::Station,
        ResultKind::Profile,
        ResultKind::Podcast,
        ResultKind::Episode,
    ];

    /// Look up a (singular) label. Case-insensitive.
    pub fn kind_for(&self, label: &str) -> Option<ResultKind> {
        let label = label.trim().to_lowercase();
        self.0
            .iter()
            .position(|l| l.to_lowercase() == label)
            .and_then(|i| Self::KINDS.get(i).copied())
    }
}

impl Default for ResultTypeLabels {
    fn default() -> Self {
        Self(
            [
                "artist", "playlist", "song", "video", "station", "profile", "podcast", "episode",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }
}

/// Artist or owner reference
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ArtistRef {
    pub name: String,
    pub id: Option<String>,
}

/// Album reference on a song or video
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlbumRef {
    pub name: String,
    pub id: Option<String>,
}

/// Thumbnail image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A playable song or video
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResult {
    pub category: Option<String>,
    pub title: String,
    pub video_id: String,
    pub video_type: Option<String>,
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
    pub views: Option<String>,
    pub year: Option<String>,
    /// Display duration, e.g. "3:32"
    pub duration: Option<String>,
    pub duration_seconds: Option<u64>,
    pub is_explicit: bool,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResult {
    pub category: Option<String>,
    pub title: String,
    pub browse_id: String,
    pub playlist_id: Option<String>,
    /// Release type label ("Album", "Single", "EP", ...)
    #[serde(rename = "type")]
    pub album_type: Option<String>,
    pub artists: Vec<ArtistRef>,
    pub year: Option<String>,
    pub duration: Option<String>,
    pub is_explicit: bool,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistResult {
    pub category: Option<String>,
    pub artist: String,
    pub browse_id: String,
    pub subscribers: Option<String>,
    pub shuffle_id: Option<String>,
    pub radio_id: Option<String>,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResult {
    pub category: Option<String>,
    pub title: String,
    pub browse_id: Option<String>,
    pub playlist_id: Option<String>,
    pub author: Option<String>,
    pub item_count: Option<u64>,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResult {
    pub category: Option<String>,
    pub title: String,
    /// Profile handle
    pub name: Option<String>,
    pub browse_id: String,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastResult {
    pub category: Option<String>,
    pub title: String,
    pub browse_id: String,
    pub author: Option<String>,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeResult {
    pub category: Option<String>,
    pub title: String,
    pub video_id: String,
    pub video_type: Option<String>,
    pub date: Option<String>,
    pub live: bool,
    pub podcast: Option<ArtistRef>,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResult {
    pub category: Option<String>,
    pub title: String,
    pub video_id: Option<String>,
    pub playlist_id: String,
    pub thumbnails: Vec<Thumbnail>,
}

/// A typed search result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "resultType", rename_all = "lowercase")]
pub enum SearchResult {
    Song(TrackResult),
    Video(TrackResult),
    Album(AlbumResult),
    Artist(ArtistResult),
    Playlist(PlaylistResult),
    Profile(ProfileResult),
    Podcast(PodcastResult),
    Episode(EpisodeResult),
    Station(StationResult),
}

impl SearchResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            SearchResult::Song(_) => ResultKind::Song,
            SearchResult::Video(_) => ResultKind::Video,
            SearchResult::Album(_) => ResultKind::Album,
            SearchResult::Artist(_) => ResultKind::Artist,
            SearchResult::Playlist(_) => ResultKind::Playlist,
            SearchResult::Profile(_) => ResultKind::Profile,
            SearchResult::Podcast(_) => ResultKind::Podcast,
            SearchResult::Episode(_) => ResultKind::Episode,
            SearchResult::Station(_) => ResultKind::Station,
        }
    }

    /// Display title (the artist name for artists)
    pub fn title(&self) -> &str {
        match self {
            SearchResult::Song(t) | SearchResult::Video(t) => &t.title,
            SearchResult::Album(a) => &a.title,
            SearchResult::Artist(a) => &a.artist,
            SearchResult::Playlist(p) => &p.title,
            SearchResult::Profile(p) => &p.title,
            SearchResult::Podcast(p) => &p.title,
            SearchResult::Episode(e) => &e.title,
            SearchResult::Station(s) => &s.title,
        }
    }

    /// Stable identifier of the entity
    pub fn id(&self) -> &str {
        match self {
            SearchResult::Song(t) | SearchResult::Video(t) => &t.video_id,
            SearchResult::Album(a) => &a.browse_id,
            SearchResult::Artist(a) => &a.browse_id,
            SearchResult::Playlist(p) => p
                .browse_id
                .as_deref()
                .or(p.playlist_id.as_deref())
                .unwrap_or_default(),
            SearchResult::Profile(p) => &p.browse_id,
            SearchResult::Podcast(p) => &p.browse_id,
            SearchResult::Episode(e) => &e.video_id,
            SearchResult::Station(s) => &s.playlist_id,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            SearchResult::Song(t) | SearchResult::Video(t) => t.category.as_deref(),
            SearchResult::Album(a) => a.category.as_deref(),
            SearchResult::Artist(a) => a.category.as_deref(),
            SearchResult::Playlist(p) => p.category.as_deref(),
            SearchResult::Profile(p) => p.category.as_deref(),
            SearchResult::Podcast(p) => p.category.as_deref(),
            SearchResult::Episode(e) => e.category.as_deref(),
            SearchResult::Station(s) => s.category.as_deref(),
        }
    }
}

/// One formatted run of a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRun {
    pub text: String,
    /// Whether the server marked this run as matching the typed query
    pub bold: bool,
}

/// A suggestion split into its formatted runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedSuggestion {
    pub text: String,
    pub runs: Vec<SuggestionRun>,
}

/// Parsed search suggestions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Suggestions {
    Plain(Vec<String>),
    Detailed(Vec<DetailedSuggestion>),
}

impl Suggestions {
    pub fn len(&self) -> usize {
        match self {
            Suggestions::Plain(s) => s.len(),
            Suggestions::Detailed(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Errors raised by the transport collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Errors that can occur while searching
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error(
        "Invalid filter provided: {0}. Please use one of the following filters or leave out the parameter: albums, artists, playlists, community_playlists, featured_playlists, songs, videos, profiles, podcasts, episodes"
    )]
    InvalidFilter(String),

    #[error(
        "Invalid scope provided: {0}. Please use one of the following scopes or leave out the parameter: library, uploads"
    )]
    InvalidScope(String),

    #[error("Filter {filter} cannot be used when searching {scope}")]
    IncompatibleFilterScope {
        filter: SearchFilter,
        scope: SearchScope,
    },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] TransportError),
}
