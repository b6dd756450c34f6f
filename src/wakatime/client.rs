// WakaTime API HTTP client.
// Handles authentication and request/response processing for stats fetches.

use reqwest::{Client, Response, StatusCode};

use crate::error::{DevcardsError, Result, UpstreamError};

use super::types::{StatsEnvelope, WakaStats};

const WAKATIME_API_BASE: &str = "https://wakatime.com/api/v1";

/// WakaTime API client with key-based authentication.
pub struct WakaTimeClient {
    client: Client,
    api_key: String,
}

impl WakaTimeClient {
    /// Create a new WakaTime client with the given API key.
    pub fn new(api_key: &str) -> Result<Self> {
        let client = Client::builder().build().map_err(DevcardsError::Http)?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
        })
    }

    /// Create a client from the WAKATIME_TOKEN environment variable.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("WAKATIME_TOKEN")
            .map_err(|_| DevcardsError::MissingToken("WAKATIME_TOKEN"))?;
        Self::new(&key)
    }

    /// Fetch a user's all-time stats, shaved to the cached record shape.
    pub async fn fetch_stats(&self, username: &str) -> Result<WakaStats> {
        let url = format!("{WAKATIME_API_BASE}/users/{username}/stats/all_time");
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.api_key, None::<&str>)
            .send()
            .await
            .map_err(DevcardsError::Http)?;

        let response = self.check_response(response).await?;
        let envelope: StatsEnvelope = response.json().await.map_err(DevcardsError::Http)?;
        Ok(envelope.data.into())
    }

    /// Check response status and convert failures to upstream errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(response),
            status => {
                let cause = response.text().await.unwrap_or_default();
                Err(UpstreamError::new(
                    format!(
                        "Error accessing WakaTime API: {}",
                        status.canonical_reason().unwrap_or("unknown status")
                    ),
                    cause,
                    status.as_u16(),
                )
                .into())
            }
        }
    }
}
