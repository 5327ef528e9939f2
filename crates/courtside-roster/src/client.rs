//! HTTP client for the external sports-data API.
//!
//! Handles request construction, cursor pagination, and error
//! categorization. Every row passes through the shared normalization and
//! the sport's position filter, so roster and search callers see identical
//! record shapes.

use std::time::Duration;

use courtside_core::{Player, Sport};
use serde::Deserialize;
use tracing::{debug, info_span, Instrument};

use crate::{
    error::{Result, RosterError},
    normalize::normalize_player,
};

/// Page size for full roster pagination.
const ROSTER_PAGE_SIZE: u64 = 100;
/// Page size cap for live player search.
const SEARCH_PAGE_SIZE: u64 = 25;

/// Configuration for the sports-data API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the data source; sport path segments are appended.
    pub base_url: String,
    /// API key, sent in both `Authorization` and `X-Api-Key` headers.
    pub api_key: String,
    /// Timeout for each HTTP request.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.balldontlie.io".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(10),
            user_agent: "Courtside/1.0".to_string(),
        }
    }
}

/// Client for roster fetches and live player search.
#[derive(Debug, Clone)]
pub struct SportsClient {
    client: reqwest::Client,
    config: ClientConfig,
}

/// One page of the players listing.
#[derive(Debug, Deserialize)]
struct PlayersPage {
    #[serde(default)]
    data: Vec<serde_json::Value>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

/// Pagination metadata; the source stops sending `next_cursor` on the last
/// page.
#[derive(Debug, Deserialize)]
struct PageMeta {
    #[serde(default)]
    next_cursor: Option<u64>,
}

impl SportsClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::Configuration` if the base URL is empty or the
    /// HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(RosterError::configuration("base URL must not be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| RosterError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Fetches the complete roster for a sport.
    ///
    /// Follows the source's cursor pagination until no further cursor is
    /// returned, normalizes every row, applies the sport's position filter,
    /// and sorts by display name (case-insensitive). A failure on any page
    /// fails the whole fetch; no partial roster is ever returned.
    ///
    /// # Errors
    ///
    /// Returns the categorized error of the first failing page request.
    pub async fn fetch_roster(&self, sport: Sport) -> Result<Vec<Player>> {
        let span = info_span!("fetch_roster", sport = %sport);

        async move {
            let mut players = Vec::new();
            let mut cursor = None;
            let mut pages = 0u32;

            loop {
                let page = self.fetch_page(sport, cursor).await?;
                pages += 1;

                players.extend(
                    page.data
                        .iter()
                        .filter_map(normalize_player)
                        .filter(|player| sport.accepts_position(&player.position)),
                );

                cursor = page.meta.and_then(|meta| meta.next_cursor);
                if cursor.is_none() {
                    break;
                }
            }

            players.sort_by_key(|player| player.name.to_lowercase());

            debug!(pages, players = players.len(), "Roster fetch complete");
            Ok(players)
        }
        .instrument(span)
        .await
    }

    /// Searches players by name fragment.
    ///
    /// Issues a single request capped at 25 rows; results come back in
    /// source order with the same normalization and position filter as the
    /// roster path. Never cached.
    ///
    /// # Errors
    ///
    /// Returns the categorized error of the failed request.
    pub async fn search(&self, sport: Sport, query: &str) -> Result<Vec<Player>> {
        let url = self.players_url(sport);
        let per_page = SEARCH_PAGE_SIZE.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("search", query), ("per_page", per_page.as_str())])
            .header("Authorization", &self.config.api_key)
            .header("X-Api-Key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| self.categorize_send_error(&e))?;

        let page = self.parse_page(response).await?;

        Ok(page
            .data
            .iter()
            .filter_map(normalize_player)
            .filter(|player| sport.accepts_position(&player.position))
            .collect())
    }

    /// Fetches one page of the roster listing.
    async fn fetch_page(&self, sport: Sport, cursor: Option<u64>) -> Result<PlayersPage> {
        let url = self.players_url(sport);

        let mut request = self
            .client
            .get(&url)
            .query(&[("per_page", ROSTER_PAGE_SIZE.to_string())])
            .header("Authorization", &self.config.api_key)
            .header("X-Api-Key", &self.config.api_key);

        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor.to_string())]);
        }

        let response =
            request.send().await.map_err(|e| self.categorize_send_error(&e))?;

        self.parse_page(response).await
    }

    /// Maps a non-success status or undecodable body to a roster error.
    async fn parse_page(&self, response: reqwest::Response) -> Result<PlayersPage> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = truncate_body(&body);
            return Err(match status.as_u16() {
                code @ 400..=499 => RosterError::client_error(code, body),
                code => RosterError::server_error(code, body),
            });
        }

        response.json::<PlayersPage>().await.map_err(|e| RosterError::decode(e.to_string()))
    }

    fn players_url(&self, sport: Sport) -> String {
        format!("{}{}/players", self.config.base_url.trim_end_matches('/'), sport.api_path())
    }

    fn categorize_send_error(&self, error: &reqwest::Error) -> RosterError {
        if error.is_timeout() {
            RosterError::timeout(self.config.timeout.as_secs())
        } else if error.is_connect() {
            RosterError::network(format!("connection failed: {error}"))
        } else {
            RosterError::network(error.to_string())
        }
    }
}

/// Truncates an error body for logging; upstream error pages can be large.
fn truncate_body(body: &str) -> String {
    const MAX_ERROR_BODY: usize = 256;

    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated)", &body[..end])
    } else {
        body.to_string()
    }
}
