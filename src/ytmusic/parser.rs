//! Extraction of the few fields we need from InnerTube response trees.

use serde_json::Value;

use crate::ytmusic::models::{LibraryPlaylist, SearchHit};

const SECTION_LIST: &str = "/contents/tabbedSearchResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents";
const LIBRARY_GRID: &str = "/contents/singleColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/gridRenderer";
const GRID_CONTINUATION: &str = "/continuationContents/gridContinuation";
const NEXT_CONTINUATION: &str = "/continuations/0/nextContinuationData/continuation";

fn text_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

/// Search hits in ranked order. Rows without a playable video id are dropped.
pub fn parse_search_results(response: &Value) -> Vec<SearchHit> {
    let Some(sections) = response.pointer(SECTION_LIST).and_then(Value::as_array) else {
        return Vec::new();
    };

    sections
        .iter()
        .filter_map(|section| section.pointer("/musicShelfRenderer/contents"))
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(|row| row.get("musicResponsiveListItemRenderer"))
        .filter_map(parse_search_row)
        .collect()
}

fn parse_search_row(row: &Value) -> Option<SearchHit> {
    let video_id = text_at(row, "/playlistItemData/videoId").or_else(|| {
        text_at(
            row,
            "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer/playNavigationEndpoint/watchEndpoint/videoId",
        )
    })?;

    let title = text_at(
        row,
        "/flexColumns/0/musicResponsiveListItemFlexColumnRenderer/text/runs/0/text",
    )
    .unwrap_or_default();

    Some(SearchHit {
        video_id: video_id.to_string(),
        title: title.to_string(),
    })
}

/// Library playlists and the continuation token of the first library page.
pub fn parse_library_page(response: &Value) -> (Vec<LibraryPlaylist>, Option<String>) {
    parse_grid(response.pointer(LIBRARY_GRID))
}

/// Library playlists and the continuation token of a follow-up page.
pub fn parse_library_continuation(response: &Value) -> (Vec<LibraryPlaylist>, Option<String>) {
    parse_grid(response.pointer(GRID_CONTINUATION))
}

fn parse_grid(grid: Option<&Value>) -> (Vec<LibraryPlaylist>, Option<String>) {
    let Some(grid) = grid else {
        return (Vec::new(), None);
    };

    let playlists: Vec<LibraryPlaylist> = grid
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_library_item).collect())
        .unwrap_or_default();

    let continuation = text_at(grid, NEXT_CONTINUATION).map(String::from);

    (playlists, continuation)
}

fn parse_library_item(item: &Value) -> Option<LibraryPlaylist> {
    let renderer = item.get("musicTwoRowItemRenderer")?;
    let title_run = renderer.pointer("/title/runs/0")?;

    // The "New playlist" tile has no VL browse id
    let browse_id = text_at(title_run, "/navigationEndpoint/browseEndpoint/browseId")?;
    let playlist_id = browse_id.strip_prefix("VL")?;

    Some(LibraryPlaylist {
        playlist_id: playlist_id.to_string(),
        title: text_at(title_run, "/text")?.to_string(),
    })
}

/// Playlist id returned by `playlist/create`.
pub fn parse_created_playlist(response: &Value) -> Option<String> {
    text_at(response, "/playlistId").map(String::from)
}

/// Whether a `browse/edit_playlist` call reports success.
pub fn edit_succeeded(response: &Value) -> bool {
    text_at(response, "/status") == Some("STATUS_SUCCEEDED")
}
