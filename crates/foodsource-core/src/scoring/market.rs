// Market-efficiency factor: line movement and sharp money.

use serde::Serialize;

use crate::model::Prop;
use crate::scoring::clamp_confidence;

/// Line movement (points) that counts as significant.
const SIGNIFICANT_MOVE: f64 = 2.0;
const SHARP_HIGH: f64 = 70.0;
const SHARP_LOW: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEfficiency {
    pub confidence: f64,
    pub line_movement: f64,
    pub sharp_action: f64,
    pub reasoning: String,
}

/// Lopsided sharp action earns the bonus on either side of the market.
pub fn analyze_market_efficiency(prop: &Prop) -> MarketEfficiency {
    let line_movement = prop.line_movement;
    let sharp_action = prop.sharp_action;

    let mut confidence: f64 = 50.0;
    let mut reasoning = String::from("Market appears balanced.");

    if line_movement.abs() > SIGNIFICANT_MOVE {
        let up = line_movement > 0.0;
        confidence += if up { 10.0 } else { -10.0 };
        reasoning = format!(
            "Line moved {} {} points.",
            if up { "up" } else { "down" },
            line_movement.abs()
        );
    }

    if sharp_action > SHARP_HIGH || sharp_action < SHARP_LOW {
        confidence += 10.0;
        reasoning.push_str(" Sharp money indicating strong opinion.");
    }

    MarketEfficiency {
        confidence: clamp_confidence(confidence),
        line_movement,
        sharp_action,
        reasoning,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;

    fn prop(line_movement: f64, sharp_action: f64) -> Prop {
        Prop {
            stat_type: "points".into(),
            line: 22.5,
            direction: Direction::Over,
            odds: -115,
            market: "Total Points".into(),
            line_movement,
            sharp_action,
        }
    }

    #[test]
    fn quiet_market_is_balanced() {
        let m = analyze_market_efficiency(&prop(0.0, 50.0));
        assert_eq!(m.confidence, 50.0);
        assert_eq!(m.reasoning, "Market appears balanced.");
    }

    #[test]
    fn line_movement_beyond_two_points() {
        assert_eq!(analyze_market_efficiency(&prop(2.0, 50.0)).confidence, 50.0);
        assert_eq!(analyze_market_efficiency(&prop(-2.0, 50.0)).confidence, 50.0);

        let up = analyze_market_efficiency(&prop(3.5, 50.0));
        assert_eq!(up.confidence, 60.0);
        assert_eq!(up.reasoning, "Line moved up 3.5 points.");

        let down = analyze_market_efficiency(&prop(-3.0, 50.0));
        assert_eq!(down.confidence, 40.0);
        assert_eq!(down.reasoning, "Line moved down 3 points.");
    }

    #[test]
    fn sharp_action_bonus_either_side() {
        assert_eq!(analyze_market_efficiency(&prop(0.0, 71.0)).confidence, 60.0);
        assert_eq!(analyze_market_efficiency(&prop(0.0, 29.0)).confidence, 60.0);
        assert_eq!(analyze_market_efficiency(&prop(0.0, 70.0)).confidence, 50.0);
        assert_eq!(analyze_market_efficiency(&prop(0.0, 30.0)).confidence, 50.0);

        let m = analyze_market_efficiency(&prop(-4.0, 90.0));
        assert_eq!(m.confidence, 50.0);
        assert_eq!(
            m.reasoning,
            "Line moved down 4 points. Sharp money indicating strong opinion."
        );
    }

    #[test]
    fn confidence_stays_in_range() {
        for movement in [-1e6, -3.0, 0.0, 3.0, 1e6] {
            for sharp in [-50.0, 0.0, 50.0, 100.0, 500.0] {
                let c = analyze_market_efficiency(&prop(movement, sharp)).confidence;
                assert!((0.0..=100.0).contains(&c));
            }
        }
    }
}
