//! Locating and classifying result sections.
//!
//! The server answers the same logical query in one of two shapes: a tabbed
//! response (one tab per scope) or a flat one. Both reduce to an ordered list
//! of section nodes, and each section is either a top-result card, a shelf,
//! or something we don't recognize (skipped).

use serde_json::Value;

use super::domain::{ResultKind, ResultTypeLabels, SearchFilter, SearchScope};
use super::navigation::{
    CARD_SHELF, CONTENTS, CONTINUATION_TOKEN, ITEM_SECTION, MESSAGE_TEXT, MUSIC_SHELF,
    SECTION_LIST, TAB_CONTENT, TABS, TITLE_TEXT, nav, nav_array, nav_str,
};

/// Tab the server uses for a scope in tabbed responses.
///
/// A filtered search always lands on the first tab.
pub fn tab_index(scope: Option<SearchScope>, filter_present: bool) -> usize {
    match scope {
        _ if filter_present => 0,
        None => 0,
        Some(SearchScope::Library) => 1,
        Some(SearchScope::Uploads) => 2,
    }
}

/// Find the section nodes of a search response.
///
/// An empty list is the normal answer for a query without matches.
pub fn locate_sections(
    response: &Value,
    scope: Option<SearchScope>,
    filter_present: bool,
) -> Vec<&Value> {
    let Some(contents) = nav(response, CONTENTS) else {
        return Vec::new();
    };

    let results = if let Some(tabs) = nav_array(contents, TABS) {
        let index = tab_index(scope, filter_present);
        match tabs.get(index).and_then(|tab| nav(tab, TAB_CONTENT)) {
            Some(content) => content,
            None => {
                tracing::debug!("Tabbed response has no content at tab {}", index);
                return Vec::new();
            }
        }
    } else {
        contents
    };

    let Some(sections) = nav_array(results, SECTION_LIST) else {
        return Vec::new();
    };

    // A lone item section is the server's "no results" placeholder
    if sections.len() == 1 && nav(&sections[0], ITEM_SECTION).is_some() {
        return Vec::new();
    }

    sections.iter().collect()
}

/// A top-result card: one highlighted match plus related items
#[derive(Debug, Clone, PartialEq)]
pub struct CardSection<'a> {
    pub renderer: &'a Value,
    /// Secondary items, without the informational header
    pub items: &'a [Value],
    /// Text of the informational header, when the card has one
    pub category: Option<String>,
}

/// A (possibly paginated) list of results
#[derive(Debug, Clone, PartialEq)]
pub struct ShelfSection<'a> {
    pub renderer: &'a Value,
    pub items: &'a [Value],
    /// Shelf header text
    pub category: Option<String>,
    /// Kind every item parses as; `None` means infer per item
    pub kind: Option<ResultKind>,
}

impl ShelfSection<'_> {
    pub fn continuation_token(&self) -> Option<&str> {
        nav_str(self.renderer, CONTINUATION_TOKEN)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section<'a> {
    Card(CardSection<'a>),
    Shelf(ShelfSection<'a>),
    Unrecognized,
}

/// Classify one section node and infer the kind of its items
pub fn classify<'a>(
    section: &'a Value,
    filter: Option<SearchFilter>,
    scope: Option<SearchScope>,
    labels: &ResultTypeLabels,
) -> Section<'a> {
    if let Some(card) = nav(section, CARD_SHELF) {
        let contents = nav_array(card, CONTENTS).map(Vec::as_slice).unwrap_or_default();

        // The "more from YouTube" header is not always present
        let (category, items) = match contents.split_first() {
            Some((first, rest)) if first.get("messageRenderer").is_some() => {
                (nav_str(first, MESSAGE_TEXT).map(String::from), rest)
            }
            _ => (None, contents),
        };

        return Section::Card(CardSection {
            renderer: card,
            items,
            category,
        });
    }

    if let Some(shelf) = nav(section, MUSIC_SHELF) {
        let items = nav_array(shelf, CONTENTS).map(Vec::as_slice).unwrap_or_default();
        let category = nav_str(shelf, TITLE_TEXT).map(String::from);

        let kind = if scope == Some(SearchScope::Uploads) {
            Some(ResultKind::Upload)
        } else if let Some(filter) = filter {
            Some(filter.result_kind())
        } else {
            category
                .as_deref()
                .and_then(|label| infer_kind_from_label(label, labels))
        };

        return Section::Shelf(ShelfSection {
            renderer: shelf,
            items,
            category,
            kind,
        });
    }

    Section::Unrecognized
}

/// Infer a kind from a shelf header such as "Songs" or "Albums".
pub fn infer_kind_from_label(label: &str, labels: &ResultTypeLabels) -> Option<ResultKind> {
    let lower = label.trim().to_lowercase();
    let singular = lower.strip_suffix('s').unwrap_or(&lower);

    if let Some(kind) = labels.kind_for(singular) {
        return Some(kind);
    }

    if singular == "album" {
        Some(ResultKind::Album)
    } else if singular.ends_with("playlist") {
        Some(ResultKind::Playlist)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        card_section, flat_response, message_node, shelf_section, song_item, tabbed_response,
    };
    use serde_json::json;

    #[test]
    fn test_missing_contents_is_empty() {
        let response = json!({"responseContext": {}});
        assert!(locate_sections(&response, None, false).is_empty());
    }

    #[test]
    fn test_flat_response_sections() {
        let response = flat_response(vec![
            shelf_section("Songs", vec![song_item("a", "A")], None),
            shelf_section("Videos", vec![], None),
        ]);
        assert_eq!(locate_sections(&response, None, true).len(), 2);
    }

    #[test]
    fn test_tab_selection() {
        assert_eq!(tab_index(None, false), 0);
        assert_eq!(tab_index(Some(SearchScope::Library), false), 1);
        assert_eq!(tab_index(Some(SearchScope::Uploads), false), 2);
        assert_eq!(tab_index(Some(SearchScope::Library), true), 0);
    }

    #[test]
    fn test_tabbed_response_selects_scope_tab() {
        let response = tabbed_response(vec![
            vec![shelf_section("Catalog", vec![], None)],
            vec![
                shelf_section("Library", vec![], None),
                shelf_section("Library 2", vec![], None),
            ],
            vec![shelf_section("Uploads", vec![], None)],
        ]);

        let library = locate_sections(&response, Some(SearchScope::Library), false);
        assert_eq!(library.len(), 2);
        assert_eq!(
            nav(library[0], MUSIC_SHELF).and_then(|shelf| nav_str(shelf, TITLE_TEXT)),
            Some("Library")
        );

        assert_eq!(locate_sections(&response, Some(SearchScope::Uploads), false).len(), 1);
        assert_eq!(locate_sections(&response, None, false).len(), 1);
    }

    #[test]
    fn test_missing_tab_is_empty() {
        let response = tabbed_response(vec![vec![shelf_section("Catalog", vec![], None)]]);
        assert!(locate_sections(&response, Some(SearchScope::Uploads), false).is_empty());
    }

    #[test]
    fn test_placeholder_item_section_is_empty() {
        let response = json!({
            "contents": {"sectionListRenderer": {"contents": [
                {"itemSectionRenderer": {"contents": [{"messageRenderer": {}}]}}
            ]}}
        });
        assert!(locate_sections(&response, None, false).is_empty());
    }

    #[test]
    fn test_card_peels_message_header() {
        let section = card_section(
            json!({}),
            vec![
                message_node("More from YouTube"),
                song_item("a", "A"),
                song_item("b", "B"),
            ],
        );

        let Section::Card(card) = classify(&section, None, None, &ResultTypeLabels::default())
        else {
            panic!("expected card");
        };
        assert_eq!(card.category.as_deref(), Some("More from YouTube"));
        assert_eq!(card.items.len(), 2);
    }

    #[test]
    fn test_card_without_header() {
        let section = card_section(json!({}), vec![song_item("a", "A")]);

        let Section::Card(card) = classify(&section, None, None, &ResultTypeLabels::default())
        else {
            panic!("expected card");
        };
        assert!(card.category.is_none());
        assert_eq!(card.items.len(), 1);
    }

    #[test]
    fn test_shelf_infers_kind_from_header() {
        let section = shelf_section("Albums", vec![], None);
        let Section::Shelf(shelf) = classify(&section, None, None, &ResultTypeLabels::default())
        else {
            panic!("expected shelf");
        };
        assert_eq!(shelf.kind, Some(ResultKind::Album));
        assert_eq!(shelf.category.as_deref(), Some("Albums"));
    }

    #[test]
    fn test_filter_overrides_header() {
        let section = shelf_section("Top results", vec![], Some("token"));
        let Section::Shelf(shelf) = classify(
            &section,
            Some(SearchFilter::FeaturedPlaylists),
            None,
            &ResultTypeLabels::default(),
        ) else {
            panic!("expected shelf");
        };
        assert_eq!(shelf.kind, Some(ResultKind::Playlist));
        assert_eq!(shelf.continuation_token(), Some("token"));
    }

    #[test]
    fn test_uploads_forces_upload_kind() {
        let section = shelf_section("Songs", vec![], None);
        let Section::Shelf(shelf) = classify(
            &section,
            None,
            Some(SearchScope::Uploads),
            &ResultTypeLabels::default(),
        ) else {
            panic!("expected shelf");
        };
        assert_eq!(shelf.kind, Some(ResultKind::Upload));
    }

    #[test]
    fn test_unknown_section_shape() {
        let section = json!({"musicCarouselShelfRenderer": {}});
        assert_eq!(
            classify(&section, None, None, &ResultTypeLabels::default()),
            Section::Unrecognized
        );
    }

    #[test]
    fn test_label_inference() {
        let labels = ResultTypeLabels::default();
        assert_eq!(infer_kind_from_label("Songs", &labels), Some(ResultKind::Song));
        assert_eq!(infer_kind_from_label("Episodes", &labels), Some(ResultKind::Episode));
        assert_eq!(
            infer_kind_from_label("Community playlists", &labels),
            Some(ResultKind::Playlist)
        );
        assert_eq!(infer_kind_from_label("Top result", &labels), None);
    }
}
