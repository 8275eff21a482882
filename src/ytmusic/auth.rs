use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::error::{AppError, Result};

const GOOGLE_DEVICE_CODE_URL: &str = "https://oauth2.googleapis.com/device/code";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube";
const DEVICE_GRANT_TYPE: &str = "http://oauth.net/grant_type/device/1.0";

/// Seconds before expiry at which a token is treated as expired.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Google OAuth client used for the device flow and for refreshing tokens.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Token file contents, compatible with the `oauth.json` layout written by
/// other YouTube Music tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    /// Unix timestamp (seconds)
    pub expires_at: i64,
    #[serde(default)]
    pub expires_in: i64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_url: String,
    expires_in: u64,
    interval: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    refresh_token: Option<String>,
    #[serde(default)]
    scope: String,
    #[serde(default = "default_token_type")]
    token_type: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
}

impl TokenResponse {
    fn into_token(self, previous_refresh: Option<String>) -> OAuthToken {
        OAuthToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            token_type: self.token_type,
            scope: self.scope,
            expires_at: Utc::now().timestamp() + self.expires_in,
            expires_in: self.expires_in,
        }
    }
}

impl OAuthToken {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Auth(format!(
                "Cannot read OAuth file {} ({}). Run with --authenticate first.",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!("OAuth token written to {}", path.display());
        Ok(())
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now + EXPIRY_MARGIN_SECS >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }
}

/// Run the device authorization flow, printing the verification URL and code
/// for the user, and wait until access is granted.
pub async fn authenticate(http_client: &Client, credentials: &OAuthCredentials) -> Result<OAuthToken> {
    let device_auth = device_authorization(http_client, &credentials.client_id).await?;

    println!("\nYouTube Music Authentication Required");
    println!("=====================================");
    println!("Visit: {}", device_auth.verification_url);
    println!("Enter code: {}", device_auth.user_code);
    println!("\nWaiting for authentication...");

    let token = poll_for_token(
        http_client,
        credentials,
        &device_auth.device_code,
        device_auth.interval,
        device_auth.expires_in,
    )
    .await?;

    info!("Successfully authenticated with YouTube Music");

    Ok(token)
}

pub async fn refresh_token(
    http_client: &Client,
    credentials: &OAuthCredentials,
    token: &OAuthToken,
) -> Result<OAuthToken> {
    let refresh = token
        .refresh_token
        .clone()
        .ok_or_else(|| AppError::Auth("OAuth file has no refresh token".into()))?;

    let response = http_client
        .post(GOOGLE_TOKEN_URL)
        .form(&[
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh.as_str()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(AppError::Auth(format!("Token refresh failed: {}", error_text)));
    }

    let refreshed: TokenResponse = response
        .json()
        .await
        .map_err(|e| AppError::Auth(format!("Failed to parse token response: {}", e)))?;

    info!("Refreshed YouTube Music access token");

    Ok(refreshed.into_token(Some(refresh)))
}

async fn device_authorization(client: &Client, client_id: &str) -> Result<DeviceCodeResponse> {
    let response = client
        .post(GOOGLE_DEVICE_CODE_URL)
        .form(&[("client_id", client_id), ("scope", YOUTUBE_SCOPE)])
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(AppError::Auth(format!(
            "Device authorization failed: {}",
            error_text
        )));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Auth(format!("Failed to parse device auth response: {}", e)))
}

async fn poll_for_token(
    client: &Client,
    credentials: &OAuthCredentials,
    device_code: &str,
    interval: u64,
    expires_in: u64,
) -> Result<OAuthToken> {
    let start = Instant::now();
    let timeout = Duration::from_secs(expires_in);
    let mut interval = interval.max(1);

    loop {
        if start.elapsed() > timeout {
            return Err(AppError::Auth("Device authorization timed out".into()));
        }

        tokio::time::sleep(Duration::from_secs(interval)).await;

        let response = client
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("grant_type", DEVICE_GRANT_TYPE),
                ("code", device_code),
            ])
            .send()
            .await?;

        if response.status().is_success() {
            let token: TokenResponse = response
                .json()
                .await
                .map_err(|e| AppError::Auth(format!("Failed to parse token response: {}", e)))?;
            return Ok(token.into_token(None));
        }

        let error_text = response.text().await.unwrap_or_default();
        let error = serde_json::from_str::<TokenErrorResponse>(&error_text)
            .map(|e| e.error)
            .unwrap_or_default();

        match error.as_str() {
            "authorization_pending" => {}
            "slow_down" => interval += 5,
            _ => {
                return Err(AppError::Auth(format!("Token request failed: {}", error_text)));
            }
        }

        print!(".");
        io::stdout().flush().ok();
    }
}
