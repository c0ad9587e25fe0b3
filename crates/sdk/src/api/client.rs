use serde::de::DeserializeOwned;
use url::Url;

use crate::types::{Player, Position};

use super::{DraftRecord, ErrorBody, LeaderboardRecord, PlatformStats};

/// Client of the FanDraft REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the API served at `base_url`.
    pub fn try_new(base_url: &str) -> crate::Result<Self> {
        let base_url = Url::parse(base_url).map_err(crate::Error::custom)?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> crate::Result<T> {
        let url = self.base_url.join(path).map_err(crate::Error::custom)?;
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = match resp.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            return Err(crate::Error::custom(format!(
                "api error ({status}): {message}"
            )));
        }
        Ok(resp.json().await?)
    }

    /// Fetch the player catalog.
    pub async fn players(&self) -> crate::Result<Vec<Player>> {
        self.get("/api/players").await
    }

    /// Fetch the players of one position.
    pub async fn players_by_position(&self, position: Position) -> crate::Result<Vec<Player>> {
        self.get(&format!("/api/players/position/{position}")).await
    }

    /// Fetch all drafts.
    pub async fn drafts(&self) -> crate::Result<Vec<DraftRecord>> {
        self.get("/api/drafts").await
    }

    /// Fetch the top of the leaderboard.
    pub async fn leaderboard(&self) -> crate::Result<Vec<LeaderboardRecord>> {
        self.get("/api/leaderboard").await
    }

    /// Fetch platform stats.
    pub async fn stats(&self) -> crate::Result<PlatformStats> {
        self.get("/api/stats").await
    }
}
