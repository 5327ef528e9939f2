//! Player records and sport categories.
//!
//! A [`Sport`] selects which sports-data API base path and position filter
//! apply; a [`Player`] is the normalized row shape shared by the roster
//! cache and live search.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position codes kept when filtering NFL rosters.
///
/// Non-skill positions (linemen, defense, special teams) are excluded from
/// autocomplete to keep the choice list useful.
pub const NFL_SKILL_POSITIONS: [&str; 5] = ["QB", "RB", "WR", "TE", "FB"];

/// A normalized player record.
///
/// Constructed fresh from each sports-data API response row and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Opaque identifier assigned by the external data source.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Team abbreviation; empty when the source has none.
    pub team: String,
    /// Uppercase position code; empty when the source has none.
    pub position: String,
}

impl Player {
    /// Builds the autocomplete label: `"{name} • {team}"`, with
    /// `" • {position}"` appended only when the position is non-empty.
    pub fn choice_label(&self) -> String {
        if self.position.is_empty() {
            format!("{} • {}", self.name, self.team)
        } else {
            format!("{} • {} • {}", self.name, self.team, self.position)
        }
    }
}

/// Sport category partitioning rosters, API paths, and filter rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    /// Basketball.
    Nba,
    /// American football.
    Nfl,
    /// Baseball.
    Mlb,
}

impl Sport {
    /// All supported sports, in cache-reporting order.
    pub const ALL: [Self; 3] = [Self::Nba, Self::Nfl, Self::Mlb];

    /// Derives the sport from a command name by prefix.
    ///
    /// `nbastats` selects NBA, `nflstats` NFL, `mlbstats` MLB. Unrecognized
    /// command names fall back to NBA.
    pub fn from_command_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.starts_with("nfl") {
            Self::Nfl
        } else if name.starts_with("mlb") {
            Self::Mlb
        } else {
            Self::Nba
        }
    }

    /// Path segment under the sports-data API base URL.
    pub fn api_path(self) -> &'static str {
        match self {
            Self::Nba => "/v1",
            Self::Nfl => "/nfl/v1",
            Self::Mlb => "/mlb/v1",
        }
    }

    /// Position allow-list for this sport, if one is defined.
    ///
    /// Only the NFL restricts positions; NBA and MLB rosters are kept whole.
    pub fn position_filter(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Nfl => Some(&NFL_SKILL_POSITIONS),
            Self::Nba | Self::Mlb => None,
        }
    }

    /// Returns true when `position` passes this sport's filter.
    ///
    /// Sports without a filter accept every position, including empty ones.
    pub fn accepts_position(self, position: &str) -> bool {
        match self.position_filter() {
            Some(allowed) => allowed.contains(&position),
            None => true,
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nba => write!(f, "nba"),
            Self::Nfl => write!(f, "nfl"),
            Self::Mlb => write!(f, "mlb"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sport_derived_from_command_prefix() {
        assert_eq!(Sport::from_command_name("nbastats"), Sport::Nba);
        assert_eq!(Sport::from_command_name("nflstats"), Sport::Nfl);
        assert_eq!(Sport::from_command_name("mlbstats"), Sport::Mlb);
        assert_eq!(Sport::from_command_name("NFLSTATS"), Sport::Nfl);
    }

    #[test]
    fn unrecognized_command_falls_back_to_nba() {
        assert_eq!(Sport::from_command_name("standings"), Sport::Nba);
        assert_eq!(Sport::from_command_name(""), Sport::Nba);
    }

    #[test]
    fn nfl_filter_excludes_non_skill_positions() {
        assert!(Sport::Nfl.accepts_position("QB"));
        assert!(Sport::Nfl.accepts_position("FB"));
        assert!(!Sport::Nfl.accepts_position("OT"));
        assert!(!Sport::Nfl.accepts_position(""));
    }

    #[test]
    fn unfiltered_sports_accept_everything() {
        assert!(Sport::Nba.accepts_position("C"));
        assert!(Sport::Nba.accepts_position(""));
        assert!(Sport::Mlb.accepts_position("SS"));
    }

    #[test]
    fn choice_label_omits_empty_position() {
        let with_position = Player {
            id: 1,
            name: "Patrick Mahomes".to_string(),
            team: "KC".to_string(),
            position: "QB".to_string(),
        };
        assert_eq!(with_position.choice_label(), "Patrick Mahomes • KC • QB");

        let without_position = Player {
            id: 2,
            name: "John Doe".to_string(),
            team: "LAL".to_string(),
            position: String::new(),
        };
        assert_eq!(without_position.choice_label(), "John Doe • LAL");
    }
}
