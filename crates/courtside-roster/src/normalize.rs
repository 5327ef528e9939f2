//! Defensive normalization of sports-data API rows.
//!
//! The data source has shipped several row shapes across API versions and
//! sports. One explicit function owns the field-priority order so roster
//! and search results normalize identically:
//!
//! - name: `full_name`, then `first_name` + `last_name`, then `name`
//! - team: `team.abbreviation`, then `team_abbreviation`
//! - position: `position_abbreviation`, then `position`, then
//!   `primary_position`
//!
//! Rows without a numeric `id` or a usable name are skipped.

use courtside_core::Player;
use serde_json::Value;

/// Normalizes one API row into a [`Player`], or `None` if the row is
/// unusable.
pub fn normalize_player(row: &Value) -> Option<Player> {
    let id = row.get("id")?.as_i64()?;

    let name = extract_name(row)?;
    let team = extract_team(row);
    let position = extract_position(row);

    Some(Player { id, name, team, position })
}

fn extract_name(row: &Value) -> Option<String> {
    if let Some(full) = str_field(row, "full_name") {
        return Some(full);
    }

    let first = str_field(row, "first_name");
    let last = str_field(row, "last_name");
    match (first, last) {
        (Some(first), Some(last)) => return Some(format!("{first} {last}")),
        (Some(only), None) | (None, Some(only)) => return Some(only),
        (None, None) => {},
    }

    str_field(row, "name")
}

fn extract_team(row: &Value) -> String {
    row.get("team")
        .and_then(|team| team.get("abbreviation"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|abbr| !abbr.is_empty())
        .map(str::to_string)
        .or_else(|| str_field(row, "team_abbreviation"))
        .unwrap_or_default()
}

fn extract_position(row: &Value) -> String {
    str_field(row, "position_abbreviation")
        .or_else(|| str_field(row, "position"))
        .or_else(|| str_field(row, "primary_position"))
        .map(|position| position.to_uppercase())
        .unwrap_or_default()
}

/// Reads a trimmed, non-empty string field.
fn str_field(row: &Value, key: &str) -> Option<String> {
    row.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn normalizes_split_name_shape() {
        let row = json!({
            "id": 237,
            "first_name": "LeBron",
            "last_name": "James",
            "position": "F",
            "team": {"id": 14, "abbreviation": "LAL", "full_name": "Los Angeles Lakers"}
        });

        let player = normalize_player(&row).unwrap();
        assert_eq!(player.id, 237);
        assert_eq!(player.name, "LeBron James");
        assert_eq!(player.team, "LAL");
        assert_eq!(player.position, "F");
    }

    #[test]
    fn full_name_takes_priority_over_split_name() {
        let row = json!({
            "id": 1,
            "full_name": "Shohei Ohtani",
            "first_name": "Shohei",
            "last_name": "Ohtani",
            "team_abbreviation": "LAD"
        });

        let player = normalize_player(&row).unwrap();
        assert_eq!(player.name, "Shohei Ohtani");
        assert_eq!(player.team, "LAD");
    }

    #[test]
    fn flat_team_abbreviation_used_when_team_object_missing() {
        let row = json!({
            "id": 7,
            "name": "Justin Jefferson",
            "team_abbreviation": "MIN",
            "position_abbreviation": "wr"
        });

        let player = normalize_player(&row).unwrap();
        assert_eq!(player.team, "MIN");
        assert_eq!(player.position, "WR", "position codes are uppercased");
    }

    #[test]
    fn missing_team_and_position_become_empty() {
        let row = json!({"id": 3, "first_name": "Victor", "last_name": "Wembanyama"});

        let player = normalize_player(&row).unwrap();
        assert_eq!(player.team, "");
        assert_eq!(player.position, "");
    }

    #[test]
    fn rows_without_id_or_name_are_skipped() {
        assert!(normalize_player(&json!({"first_name": "No", "last_name": "Id"})).is_none());
        assert!(normalize_player(&json!({"id": 5})).is_none());
        assert!(normalize_player(&json!({"id": "not-a-number", "name": "X"})).is_none());
        assert!(normalize_player(&json!({"id": 5, "name": "   "})).is_none());
    }

    #[test]
    fn single_name_part_is_used_alone() {
        let row = json!({"id": 11, "first_name": "Neymar"});
        assert_eq!(normalize_player(&row).unwrap().name, "Neymar");
    }
}
