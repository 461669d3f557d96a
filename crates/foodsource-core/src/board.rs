// Scored prop board: scores a slate, buckets confidence into tiers and
// filters the result by league and position.

use serde::Serialize;

use crate::model::{OpponentDefense, Player, Position, Prop};
use crate::scoring::recent::trend_label;
use crate::scoring::{Analysis, ScoringEngine};
use crate::slate::{League, PropEntry, Slate};

/// Defense ranks at or better than this make a tough matchup in the summary.
const TOUGH_MATCHUP_RANK: u32 = 15;

// ---------------------------------------------------------------------------
// Confidence tier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// High at 70 and above, medium at 55 and above.
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 70 {
            ConfidenceTier::High
        } else if percentage >= 55 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "High Confidence",
            ConfidenceTier::Medium => "Medium Confidence",
            ConfidenceTier::Low => "Low Confidence",
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueFilter {
    All,
    Only(League),
}

impl LeagueFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(LeagueFilter::All),
            "nfl" => Some(LeagueFilter::Only(League::Nfl)),
            "nba" => Some(LeagueFilter::Only(League::Nba)),
            _ => None,
        }
    }

    pub fn matches(&self, league: League) -> bool {
        match self {
            LeagueFilter::All => true,
            LeagueFilter::Only(l) => *l == league,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionFilter {
    All,
    Only(Position),
}

impl PositionFilter {
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(PositionFilter::All);
        }
        Position::from_str_pos(s).map(PositionFilter::Only)
    }

    pub fn matches(&self, position: Position) -> bool {
        match self {
            PositionFilter::All => true,
            PositionFilter::Only(p) => *p == position,
        }
    }
}

// ---------------------------------------------------------------------------
// Scored props
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProp {
    pub id: String,
    pub league: League,
    pub player: Player,
    pub prop: Prop,
    pub opponent: OpponentDefense,
    pub confidence: u8,
    pub tier: ConfidenceTier,
    pub analysis: Analysis,
}

pub fn score_entry(entry: &PropEntry, engine: &ScoringEngine) -> ScoredProp {
    let report = engine.score(&entry.player, &entry.prop, &entry.opponent);
    ScoredProp {
        id: entry.id.clone(),
        league: entry.league,
        player: entry.player.clone(),
        prop: entry.prop.clone(),
        opponent: entry.opponent.clone(),
        confidence: report.percentage,
        tier: ConfidenceTier::from_percentage(report.percentage),
        analysis: report.analysis,
    }
}

/// Score every prop in slate order.
pub fn score_slate(slate: &Slate, engine: &ScoringEngine) -> Vec<ScoredProp> {
    slate
        .props
        .iter()
        .map(|entry| score_entry(entry, engine))
        .collect()
}

pub fn filter_props(
    props: &[ScoredProp],
    league: LeagueFilter,
    position: PositionFilter,
) -> Vec<&ScoredProp> {
    props
        .iter()
        .filter(|p| league.matches(p.league) && position.matches(p.player.position))
        .collect()
}

pub fn find_prop<'a>(props: &'a [ScoredProp], id: &str) -> Option<&'a ScoredProp> {
    props.iter().find(|p| p.id == id)
}

// ---------------------------------------------------------------------------
// Risk summary
// ---------------------------------------------------------------------------

/// Headline factors shown alongside a prop's confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyFactors {
    /// "Improving" or "Declining".
    pub recent_trend: &'static str,
    /// "Tough matchup" or "Favorable matchup".
    pub opponent_difficulty: &'static str,
    /// Hit rate on similar props, 0.0-1.0.
    pub historical_success_rate: f64,
}

pub fn key_factors(analysis: &Analysis) -> KeyFactors {
    let recent_trend = match trend_label(analysis.recent_performance.trend) {
        "improving" => "Improving",
        _ => "Declining",
    };
    let opponent_difficulty = if analysis.opponent_matchup.defense_rank <= TOUGH_MATCHUP_RANK {
        "Tough matchup"
    } else {
        "Favorable matchup"
    };
    KeyFactors {
        recent_trend,
        opponent_difficulty,
        historical_success_rate: analysis.historical_trends.historical_hit_rate,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
