// Recent-performance factor: hit rate and trend over the last few games.

use serde::Serialize;
use tracing::warn;

use crate::model::{Player, Prop};
use crate::scoring::clamp_confidence;
use crate::scoring::trend::trend_estimate;

/// Number of most recent games considered.
pub const RECENT_WINDOW: usize = 5;

/// Bonus applied when the recent average sits well clear of the line.
const CLEAR_PATTERN_BONUS: f64 = 10.0;
/// Distance from the line that counts as a clear pattern.
const CLEAR_PATTERN_MARGIN: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPerformance {
    pub confidence: f64,
    pub hit_rate: f64,
    pub average_performance: f64,
    pub trend: f64,
    pub games_analyzed: usize,
    pub reasoning: String,
}

/// Label for a trend value. A flat trend reads as "declining".
pub fn trend_label(trend: f64) -> &'static str {
    if trend > 0.0 {
        "improving"
    } else {
        "declining"
    }
}

/// The most recent [`RECENT_WINDOW`] results, oldest first.
pub fn recent_window(stats: &[f64]) -> &[f64] {
    &stats[stats.len().saturating_sub(RECENT_WINDOW)..]
}

pub fn analyze_recent_performance(player: &Player, prop: &Prop) -> RecentPerformance {
    let games = recent_window(&player.recent_stats);
    let games_analyzed = games.len();

    if games.is_empty() {
        warn!(player = %player.name, "no recent games; recent performance scored as 0");
        return RecentPerformance {
            confidence: 0.0,
            hit_rate: 0.0,
            average_performance: 0.0,
            trend: 0.0,
            games_analyzed: 0,
            reasoning: "No recent games available to analyze.".into(),
        };
    }

    let n = games_analyzed as f64;
    let hits = games
        .iter()
        .filter(|&&value| prop.direction.hits(value, prop.line))
        .count();
    let hit_rate = hits as f64 / n;
    let average_performance = games.iter().sum::<f64>() / n;
    let trend = trend_estimate(games);

    let mut confidence = hit_rate * 60.0 + trend.abs() * 20.0;
    if (average_performance - prop.line).abs() > CLEAR_PATTERN_MARGIN {
        confidence += CLEAR_PATTERN_BONUS;
    }

    RecentPerformance {
        confidence: clamp_confidence(confidence),
        hit_rate,
        average_performance,
        trend,
        games_analyzed,
        reasoning: format!(
            "Hit rate: {:.0}% in last {} games. Trend: {}.",
            hit_rate * 100.0,
            games_analyzed,
            trend_label(trend)
        ),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
