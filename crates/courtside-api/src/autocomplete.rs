//! Autocomplete resolution for player options.
//!
//! Derives the sport from the command name, extracts the focused `player`
//! option, and answers from the roster cache for short queries or a live
//! search once the user has typed enough characters.

use courtside_core::{
    interaction::MAX_CHOICES, Choice, InteractionData, InteractionOption, Player, Sport,
};
use courtside_roster::{Result, RosterCache};
use tracing::debug;

/// Minimum query length before a live search is issued.
pub const MIN_SEARCH_LEN: usize = 2;

/// Name of the option whose value is the search query.
pub const SEARCH_FIELD: &str = "player";

/// Resolves an autocomplete request into at most 25 choices.
///
/// Queries of [`MIN_SEARCH_LEN`] characters or more go to the live search;
/// shorter ones take the first 25 cached roster entries in stored order.
///
/// # Errors
///
/// Propagates roster or search failures; the dispatcher converts them to
/// an empty choice list so the typing UI stays responsive.
pub async fn resolve(roster: &RosterCache, data: &InteractionData) -> Result<Vec<Choice>> {
    let sport = Sport::from_command_name(&data.name);
    let query = focused_query(data);

    debug!(command = %data.name, sport = %sport, query = %query, "Resolving autocomplete");

    let players: Vec<Player> = if query.chars().count() >= MIN_SEARCH_LEN {
        roster.search(sport, &query).await?
    } else {
        roster.get_or_refresh(sport).await?.iter().take(MAX_CHOICES).cloned().collect()
    };

    Ok(players.iter().take(MAX_CHOICES).map(choice_for).collect())
}

/// Extracts the normalized query from the focused search option.
///
/// Missing option, wrong focus, or a non-string value all normalize to an
/// empty query, which routes to the cached-roster path.
fn focused_query(data: &InteractionData) -> String {
    data.options
        .iter()
        .find(|option| option.focused && option.name == SEARCH_FIELD)
        .and_then(InteractionOption::value_as_str)
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

fn choice_for(player: &Player) -> Choice {
    Choice { name: player.choice_label(), value: player.id.to_string() }
}
