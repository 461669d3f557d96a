// Input records for the scoring engine: players, props and opponent defenses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Sentinel rank used when an opponent has no ranking for a position.
pub const UNRANKED_DEFENSE: u32 = 50;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Player positions across the supported leagues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
    #[serde(rename = "K")]
    Kicker,
    #[serde(rename = "PG")]
    PointGuard,
    #[serde(rename = "SG")]
    ShootingGuard,
    #[serde(rename = "SF")]
    SmallForward,
    #[serde(rename = "PF")]
    PowerForward,
    #[serde(rename = "C")]
    Center,
}

impl Position {
    /// Parse a position abbreviation ("QB", "sf", ...) into a Position.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" => Some(Position::Kicker),
            "PG" => Some(Position::PointGuard),
            "SG" => Some(Position::ShootingGuard),
            "SF" => Some(Position::SmallForward),
            "PF" => Some(Position::PowerForward),
            "C" => Some(Position::Center),
            _ => None,
        }
    }

    /// Abbreviation used for display and as the key into defensive ranks.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::SmallForward => "SF",
            Position::PowerForward => "PF",
            Position::Center => "C",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which side of the line a prop is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Over,
    Under,
}

impl Direction {
    /// Whether `value` lands on this side of `line`. A push satisfies neither.
    pub fn hits(&self, value: f64, line: f64) -> bool {
        match self {
            Direction::Over => value > line,
            Direction::Under => value < line,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Over => "OVER",
            Direction::Under => "UNDER",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A past prop on the same player and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct HistoricalProp {
    pub line: f64,
    pub result: f64,
    #[serde(rename = "type")]
    pub stat_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Player {
    pub name: String,
    pub team: String,
    pub position: Position,
    /// Per-game results for the prop's stat, oldest first.
    #[serde(default)]
    pub recent_stats: Vec<f64>,
    /// Season per-game averages keyed by stat type.
    #[serde(default)]
    pub season_stats: HashMap<String, f64>,
    /// Career per-game averages keyed by stat type.
    #[serde(default)]
    pub career_stats: HashMap<String, f64>,
    #[serde(default)]
    pub historical_props: Vec<HistoricalProp>,
}

impl Player {
    pub fn season_average(&self, stat_type: &str) -> f64 {
        self.season_stats.get(stat_type).copied().unwrap_or(0.0)
    }

    pub fn career_average(&self, stat_type: &str) -> f64 {
        self.career_stats.get(stat_type).copied().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Prop
// ---------------------------------------------------------------------------

fn neutral_sharp_action() -> f64 {
    50.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Prop {
    /// Stat category, e.g. "rushing" or "points".
    #[serde(rename = "type")]
    pub stat_type: String,
    pub line: f64,
    pub direction: Direction,
    /// American odds. Informational only.
    pub odds: i32,
    /// Display label such as "Rushing Yards".
    pub market: String,
    /// Signed points the line has moved since open.
    #[serde(default)]
    pub line_movement: f64,
    /// Share of sharp money, 0-100 with 50 as neutral.
    #[serde(default = "neutral_sharp_action")]
    pub sharp_action: f64,
}

// ---------------------------------------------------------------------------
// Opponent defense
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct OpponentDefense {
    /// Rank against each position abbreviation, 1 = best defense.
    #[serde(default)]
    pub ranks: HashMap<String, u32>,
    /// Per-game amount allowed, keyed by stat type.
    #[serde(default)]
    pub allowed: HashMap<String, f64>,
    /// Per-game touchdowns allowed, keyed by stat type.
    #[serde(default)]
    pub tds_allowed: HashMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
}

impl OpponentDefense {
    /// Rank against `position`, or [`UNRANKED_DEFENSE`] when unranked.
    pub fn rank_against(&self, position: Position) -> u32 {
        self.ranks
            .get(position.display_str())
            .copied()
            .unwrap_or(UNRANKED_DEFENSE)
    }

    pub fn allowed_for(&self, stat_type: &str) -> f64 {
        self.allowed.get(stat_type).copied().unwrap_or(0.0)
    }

    pub fn tds_allowed_for(&self, stat_type: &str) -> f64 {
        self.tds_allowed.get(stat_type).copied().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_round_trips_through_abbreviation() {
        for abbr in ["QB", "RB", "WR", "TE", "K", "PG", "SG", "SF", "PF", "C"] {
            let pos = Position::from_str_pos(abbr).expect("known position");
            assert_eq!(pos.display_str(), abbr);
        }
        assert_eq!(Position::from_str_pos(" sf "), Some(Position::SmallForward));
        assert_eq!(Position::from_str_pos("LB"), None);
    }

    #[test]
    fn direction_push_is_never_a_hit() {
        assert!(Direction::Over.hits(80.0, 79.5));
        assert!(!Direction::Over.hits(79.5, 79.5));
        assert!(Direction::Under.hits(79.0, 79.5));
        assert!(!Direction::Under.hits(79.5, 79.5));
    }

    #[test]
    fn defense_lookups_fall_back_to_defaults() {
        let mut defense = OpponentDefense::default();
        defense.ranks.insert("QB".into(), 12);
        defense.allowed.insert("rushing".into(), 89.0);

        assert_eq!(defense.rank_against(Position::Quarterback), 12);
        assert_eq!(defense.rank_against(Position::RunningBack), UNRANKED_DEFENSE);
        assert_eq!(defense.allowed_for("rushing"), 89.0);
        assert_eq!(defense.allowed_for("receiving"), 0.0);
        assert_eq!(defense.tds_allowed_for("rushing"), 0.0);
    }

    #[test]
    fn prop_market_fields_default_to_neutral() {
        let prop: Prop = toml::from_str(
            r#"
type = "rushing"
line = 79.5
direction = "under"
odds = -110
market = "Rushing Yards"
"#,
        )
        .expect("prop should parse");
        assert_eq!(prop.direction, Direction::Under);
        assert_eq!(prop.line_movement, 0.0);
        assert_eq!(prop.sharp_action, 50.0);
    }
}
