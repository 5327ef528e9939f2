//! Per-sport roster cache with time-bounded validity.
//!
//! Entries are built by a full paginated fetch, replaced wholesale, and
//! logically expire after the configured TTL; nothing is ever deleted.
//! Readers either see a complete list or no list at all.

use std::{collections::HashMap, sync::Arc, time::Duration};

use courtside_core::{Clock, Player, Sport};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{client::SportsClient, error::Result};

/// An immutable roster snapshot with its expiry instant.
#[derive(Debug, Clone)]
struct CacheEntry {
    players: Arc<Vec<Player>>,
    expires_at: std::time::Instant,
}

/// Roster cache keyed by sport.
///
/// Concurrency policy: entries live behind one async `RwLock`. Concurrent
/// callers hitting the same expired sport may each run a redundant full
/// fetch; the last writer wins and readers never observe a partially built
/// list. There is deliberately no single-flight guard.
#[derive(Debug)]
pub struct RosterCache {
    client: SportsClient,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entries: RwLock<HashMap<Sport, CacheEntry>>,
}

impl RosterCache {
    /// Creates a cache over the given client, clock, and TTL.
    pub fn new(client: SportsClient, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self { client, clock, ttl, entries: RwLock::new(HashMap::new()) }
    }

    /// Returns the roster for a sport, refreshing it if absent or expired.
    ///
    /// A refresh performs the full paginated fetch; on failure no cache
    /// state is mutated, so a previously stored entry keeps serving until
    /// it expires and an absent sport stays absent.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error when no valid entry exists and the
    /// refresh fails. Callers degrade to an empty list for end users.
    pub async fn get_or_refresh(&self, sport: Sport) -> Result<Arc<Vec<Player>>> {
        if let Some(players) = self.read_valid(sport).await {
            debug!(sport = %sport, players = players.len(), "Roster cache hit");
            return Ok(players);
        }

        let players = Arc::new(self.client.fetch_roster(sport).await?);

        let entry =
            CacheEntry { players: players.clone(), expires_at: self.clock.now() + self.ttl };
        self.entries.write().await.insert(sport, entry);

        info!(sport = %sport, players = players.len(), "Roster cache refreshed");
        Ok(players)
    }

    /// Live player search, passed through to the client.
    ///
    /// Search results are never cached; every call hits the data source.
    ///
    /// # Errors
    ///
    /// Propagates the search request error.
    pub async fn search(&self, sport: Sport, query: &str) -> Result<Vec<Player>> {
        self.client.search(sport, query).await
    }

    /// Number of players in the valid cache entry for a sport, if any.
    ///
    /// Expired entries report as absent. Used by the health endpoint.
    pub async fn cached_len(&self, sport: Sport) -> Option<usize> {
        self.read_valid(sport).await.map(|players| players.len())
    }

    async fn read_valid(&self, sport: Sport) -> Option<Arc<Vec<Player>>> {
        let entries = self.entries.read().await;
        entries
            .get(&sport)
            .filter(|entry| self.clock.now() < entry.expires_at)
            .map(|entry| entry.players.clone())
    }
}
