// Historical-trends factor: season form against career and results on similar lines.

use serde::Serialize;
use tracing::warn;

use crate::model::{HistoricalProp, Player, Prop};
use crate::scoring::clamp_confidence;

/// Maximum distance between lines for a past prop to count as similar.
pub const SIMILAR_LINE_TOLERANCE: f64 = 5.0;

/// Season-over-career ratio above which the player is in improved form.
const IMPROVED_FORM_RATIO: f64 = 1.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalTrends {
    pub confidence: f64,
    pub season_vs_career: f64,
    pub historical_hit_rate: f64,
    pub similar_props: usize,
    pub reasoning: String,
}

/// Season average divided by career average. A zero (or missing) career
/// average yields the neutral ratio 1.0.
pub fn season_vs_career(season: f64, career: f64) -> f64 {
    if career == 0.0 {
        return 1.0;
    }
    let ratio = season / career;
    if ratio.is_finite() {
        ratio
    } else {
        1.0
    }
}

/// Past props of the same stat type whose line is within
/// [`SIMILAR_LINE_TOLERANCE`] of the current one.
pub fn similar_props<'a>(history: &'a [HistoricalProp], prop: &Prop) -> Vec<&'a HistoricalProp> {
    history
        .iter()
        .filter(|p| p.stat_type == prop.stat_type && (p.line - prop.line).abs() <= SIMILAR_LINE_TOLERANCE)
        .collect()
}

/// Score a historical hit rate and form ratio. Bonuses stack: a hit rate
/// above 0.8 earns both the 0.6 and the 0.8 bonus.
pub fn historical_confidence(hit_rate: f64, season_vs_career: f64) -> f64 {
    let mut confidence = 50.0;
    if hit_rate > 0.6 {
        confidence += 20.0;
    }
    if hit_rate > 0.8 {
        confidence += 15.0;
    }
    if season_vs_career > IMPROVED_FORM_RATIO {
        confidence += 10.0;
    }
    clamp_confidence(confidence)
}

pub fn analyze_historical_trends(player: &Player, prop: &Prop) -> HistoricalTrends {
    let career = player.career_average(&prop.stat_type);
    if career == 0.0 {
        warn!(
            player = %player.name,
            stat = %prop.stat_type,
            "no career average; season vs career treated as neutral"
        );
    }
    let ratio = season_vs_career(player.season_average(&prop.stat_type), career);

    // Outcomes are judged against the current line, not each past prop's own line.
    let similar = similar_props(&player.historical_props, prop);
    let historical_hit_rate = if similar.is_empty() {
        0.0
    } else {
        let hits = similar
            .iter()
            .filter(|p| prop.direction.hits(p.result, prop.line))
            .count();
        hits as f64 / similar.len() as f64
    };

    HistoricalTrends {
        confidence: historical_confidence(historical_hit_rate, ratio),
        season_vs_career: ratio,
        historical_hit_rate,
        similar_props: similar.len(),
        reasoning: format!(
            "Historical hit rate: {:.0}% on similar props. Season vs career: {:.0}%.",
            historical_hit_rate * 100.0,
            ratio * 100.0
        ),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
