// Opponent-matchup factor: defensive rank against the position and volume allowed.

use serde::Serialize;

use crate::model::{OpponentDefense, Player, Prop};
use crate::scoring::clamp_confidence;

/// Ranks at or better than this are elite defenses.
const ELITE_DEFENSE_RANK: u32 = 10;
/// Ranks at or worse than this are exploitable defenses.
const WEAK_DEFENSE_RANK: u32 = 20;
/// Per-game volume above which the defense counts as generous.
const GENEROUS_ALLOWED: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentMatchup {
    pub confidence: f64,
    pub defense_rank: u32,
    pub yards_allowed: f64,
    pub touchdowns_allowed: f64,
    pub reasoning: String,
}

/// The generous-defense bonus ignores prop direction: an under on a
/// generous defense is rewarded the same as an over.
pub fn analyze_opponent_matchup(
    player: &Player,
    prop: &Prop,
    defense: &OpponentDefense,
) -> OpponentMatchup {
    let defense_rank = defense.rank_against(player.position);
    let yards_allowed = defense.allowed_for(&prop.stat_type);
    let touchdowns_allowed = defense.tds_allowed_for(&prop.stat_type);

    let mut confidence = 50.0;
    if defense_rank <= ELITE_DEFENSE_RANK {
        confidence -= 15.0;
    } else if defense_rank >= WEAK_DEFENSE_RANK {
        confidence += 20.0;
    }
    if yards_allowed > GENEROUS_ALLOWED {
        confidence += 10.0;
    }

    OpponentMatchup {
        confidence: clamp_confidence(confidence),
        defense_rank,
        yards_allowed,
        touchdowns_allowed,
        reasoning: format!(
            "Opponent defense ranks {}th vs {}s. Allows {} {} yards/game.",
            defense_rank, player.position, yards_allowed, prop.stat_type
        ),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
