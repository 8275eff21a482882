#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use spotify2ytmusic::{
    AppError, DestinationApi, LibraryPlaylist, Result, SearchCategory, SearchHit, SourceApi,
    SourceItem, SourcePage, SourceTrack,
};

pub fn item(name: &str, artists: &[&str]) -> Option<SourceItem> {
    Some(SourceItem {
        track: Some(SourceTrack {
            name: Some(name.to_string()),
            artists: Some(artists.iter().map(|a| a.to_string()).collect()),
        }),
    })
}

pub fn hit(video_id: &str) -> SearchHit {
    SearchHit {
        video_id: video_id.to_string(),
        title: video_id.to_string(),
    }
}

/// In-memory source service. Each playlist is a list of pages served in order.
#[derive(Default)]
pub struct FakeSource {
    playlists: HashMap<String, Vec<Vec<Option<SourceItem>>>>,
    pub calls: AtomicUsize,
    pub offsets: Mutex<Vec<u32>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(mut self, id: &str, pages: Vec<Vec<Option<SourceItem>>>) -> Self {
        self.playlists.insert(id.to_string(), pages);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn pages(&self, playlist_id: &str) -> Result<&Vec<Vec<Option<SourceItem>>>> {
        self.playlists
            .get(playlist_id)
            .ok_or_else(|| AppError::Config(format!("Invalid playlist ID: {}", playlist_id)))
    }
}

#[async_trait]
impl SourceApi for FakeSource {
    async fn playlist_name(&self, playlist_id: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages(playlist_id)?;
        Ok(format!("Playlist {}", playlist_id))
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<SourcePage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.offsets.lock().unwrap().push(offset);

        let pages = self.pages(playlist_id)?;
        let index = (offset / limit) as usize;
        let items = pages.get(index).cloned().unwrap_or_default();
        let next = (index + 1 < pages.len()).then(|| format!("page-{}", index + 1));

        Ok(SourcePage { items, next })
    }
}

/// In-memory destination service that records every call.
#[derive(Default)]
pub struct FakeDestination {
    library: Vec<LibraryPlaylist>,
    songs: HashMap<String, Vec<SearchHit>>,
    videos: HashMap<String, Vec<SearchHit>>,
    /// Insert failures to produce per video id before succeeding
    insert_failures: Mutex<HashMap<String, u32>>,
    fail_create: bool,

    pub library_calls: AtomicUsize,
    pub created: Mutex<Vec<(String, String)>>,
    pub searches: Mutex<Vec<(String, SearchCategory)>>,
    pub inserts: Mutex<Vec<(String, String)>>,
}

impl FakeDestination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library_playlist(mut self, title: &str, playlist_id: &str) -> Self {
        self.library.push(LibraryPlaylist {
            playlist_id: playlist_id.to_string(),
            title: title.to_string(),
        });
        self
    }

    pub fn with_song(mut self, query: &str, video_id: &str) -> Self {
        self.songs.entry(query.to_string()).or_default().push(hit(video_id));
        self
    }

    pub fn with_video(mut self, query: &str, video_id: &str) -> Self {
        self.videos.entry(query.to_string()).or_default().push(hit(video_id));
        self
    }

    pub fn failing_inserts(self, video_id: &str, failures: u32) -> Self {
        self.insert_failures
            .lock()
            .unwrap()
            .insert(video_id.to_string(), failures);
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn create_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.lock().unwrap().len()
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }

    pub fn total_calls(&self) -> usize {
        self.library_calls.load(Ordering::SeqCst)
            + self.create_count()
            + self.search_count()
            + self.insert_count()
    }
}

#[async_trait]
impl DestinationApi for FakeDestination {
    async fn library_playlists(&self) -> Result<Vec<LibraryPlaylist>> {
        self.library_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.library.clone())
    }

    async fn create_playlist(&self, title: &str, description: &str) -> Result<String> {
        let mut created = self.created.lock().unwrap();
        created.push((title.to_string(), description.to_string()));

        if self.fail_create {
            return Err(AppError::YtMusicApi("playlist/create failed (500)".into()));
        }
        Ok(format!("PL{}", created.len()))
    }

    async fn search(&self, query: &str, category: SearchCategory) -> Result<Vec<SearchHit>> {
        self.searches
            .lock()
            .unwrap()
            .push((query.to_string(), category));

        let index = match category {
            SearchCategory::Songs => &self.songs,
            SearchCategory::Videos => &self.videos,
        };
        Ok(index.get(query).cloned().unwrap_or_default())
    }

    async fn add_playlist_item(&self, playlist_id: &str, video_id: &str) -> Result<()> {
        self.inserts
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), video_id.to_string()));

        let mut failures = self.insert_failures.lock().unwrap();
        match failures.get_mut(video_id) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(AppError::YtMusicApi("browse/edit_playlist failed (409)".into()))
            }
            _ => Ok(()),
        }
    }
}
