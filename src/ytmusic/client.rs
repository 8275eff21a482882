use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::music_api::DestinationApi;
use crate::ytmusic::auth::{self, OAuthCredentials, OAuthToken};
use crate::ytmusic::models::{LibraryPlaylist, SearchCategory, SearchHit};
use crate::ytmusic::parser;

const YTM_API_BASE: &str = "https://music.youtube.com/youtubei/v1";
const YTM_ORIGIN: &str = "https://music.youtube.com";
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct YtMusicClient {
    http_client: Client,
    oauth_file: PathBuf,
    credentials: Option<OAuthCredentials>,
    token: Mutex<OAuthToken>,
}

impl YtMusicClient {
    /// HTTP client shared by the InnerTube and OAuth calls.
    pub fn http_client() -> Result<Client> {
        Ok(Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?)
    }

    /// Load the token from `oauth_file`. Without `credentials` an expired
    /// token cannot be refreshed and requests will be rejected.
    pub async fn new(oauth_file: &Path, credentials: Option<OAuthCredentials>) -> Result<Self> {
        let token = OAuthToken::load(oauth_file)?;

        if token.is_expired() && credentials.is_none() {
            warn!(
                "OAuth token in {} has expired and no client credentials were given to refresh it",
                oauth_file.display()
            );
        }

        let client = Self {
            http_client: Self::http_client()?,
            oauth_file: oauth_file.to_path_buf(),
            credentials,
            token: Mutex::new(token),
        };

        // Fail early on a token we can neither use nor refresh
        client.access_token().await?;
        info!("Loaded YouTube Music credentials from {}", oauth_file.display());

        Ok(client)
    }

    async fn access_token(&self) -> Result<String> {
        let mut token = self.token.lock().await;

        if token.is_expired() {
            if let Some(credentials) = &self.credentials {
                debug!("YouTube Music token near expiry, refreshing");
                let refreshed = auth::refresh_token(&self.http_client, credentials, &token).await?;
                refreshed.save(&self.oauth_file)?;
                *token = refreshed;
            }
        }

        Ok(token.access_token.clone())
    }

    fn context() -> Value {
        json!({
            "client": {
                "clientName": "WEB_REMIX",
                "clientVersion": format!("1.{}.01.00", Utc::now().format("%Y%m%d")),
                "hl": "en",
            },
            "user": {},
        })
    }

    async fn send_request(
        &self,
        endpoint: &str,
        mut body: Value,
        additional_params: &str,
    ) -> Result<Value> {
        body["context"] = Self::context();

        let url = format!("{}/{}?alt=json{}", YTM_API_BASE, endpoint, additional_params);
        let access_token = self.access_token().await?;

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(access_token)
            .header("user-agent", USER_AGENT)
            .header("origin", YTM_ORIGIN)
            .header("x-origin", YTM_ORIGIN)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::YtMusicApi(format!(
                "{} failed ({}): {}",
                endpoint, status, error_text
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl DestinationApi for YtMusicClient {
    async fn library_playlists(&self) -> Result<Vec<LibraryPlaylist>> {
        let body = json!({"browseId": "FEmusic_liked_playlists"});

        let response = self.send_request("browse", body.clone(), "").await?;
        let (mut playlists, mut continuation) = parser::parse_library_page(&response);

        while let Some(token) = continuation {
            let token = urlencoding::encode(&token);
            let params = format!("&ctoken={0}&continuation={0}&type=next", token);

            let response = self.send_request("browse", body.clone(), &params).await?;
            let (page, next) = parser::parse_library_continuation(&response);

            if page.is_empty() {
                break;
            }
            playlists.extend(page);
            continuation = next;
        }

        info!("Found {} YouTube Music library playlists", playlists.len());
        Ok(playlists)
    }

    async fn create_playlist(&self, title: &str, description: &str) -> Result<String> {
        let body = json!({
            "title": title,
            "description": description,
            "privacyStatus": "PRIVATE",
        });

        let response = self.send_request("playlist/create", body, "").await?;

        let playlist_id = parser::parse_created_playlist(&response).ok_or_else(|| {
            AppError::YtMusicApi(format!("Failed to create playlist {}: no playlist id", title))
        })?;

        info!("Created YouTube Music playlist: {}", title);
        Ok(playlist_id)
    }

    async fn search(&self, query: &str, category: SearchCategory) -> Result<Vec<SearchHit>> {
        let body = json!({
            "query": query,
            "params": category.filter_params(),
        });

        let response = self.send_request("search", body, "").await?;
        let hits = parser::parse_search_results(&response);

        debug!("Search for {} in {} returned {} results", query, category, hits.len());
        Ok(hits)
    }

    async fn add_playlist_item(&self, playlist_id: &str, video_id: &str) -> Result<()> {
        let body = json!({
            "playlistId": playlist_id,
            "actions": [{
                "action": "ACTION_ADD_VIDEO",
                "addedVideoId": video_id,
                "dedupeOption": "DEDUPE_OPTION_SKIP",
            }],
        });

        let response = self.send_request("browse/edit_playlist", body, "").await?;

        if parser::edit_succeeded(&response) {
            Ok(())
        } else {
            Err(AppError::YtMusicApi(format!(
                "Failed to add {} to playlist {}: {}",
                video_id,
                playlist_id,
                response.get("status").unwrap_or(&Value::Null)
            )))
        }
    }
}
