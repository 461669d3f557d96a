// Plain-text prop cards for the terminal.

use std::fmt::Write;

use foodsource_core::board::{ScoredProp, key_factors};
use foodsource_core::model::Direction;
use foodsource_core::scoring::Factor;

const BAR_WIDTH: usize = 20;

/// `[#########-----------]` scaled to a 0-100 confidence.
pub fn confidence_bar(percentage: u8) -> String {
    let filled = (usize::from(percentage.min(100)) * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn direction_icon(prop: &ScoredProp) -> &'static str {
    match prop.prop.direction {
        Direction::Over => "^",
        Direction::Under => "v",
    }
}

pub fn render_card(prop: &ScoredProp) -> String {
    let mut out = String::new();
    let a = &prop.analysis;

    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "{} ({} | {} | {})",
        prop.player.name, prop.player.team, prop.player.position, prop.league
    );
    let _ = writeln!(
        out,
        "  {} {} {}   Odds: {}",
        prop.prop.direction, prop.prop.line, prop.prop.market, prop.prop.odds
    );
    let _ = writeln!(
        out,
        "  Confidence: {}% {} {} ({})",
        prop.confidence,
        direction_icon(prop),
        confidence_bar(prop.confidence),
        prop.tier.label()
    );
    let _ = writeln!(
        out,
        "  Recent: hit rate {:.0}% over {} games, avg {:.1} {} per game",
        a.recent_performance.hit_rate * 100.0,
        a.recent_performance.games_analyzed,
        a.recent_performance.average_performance,
        prop.prop.market
    );
    for factor in Factor::ALL {
        let score = a
            .confidence(factor)
            .map(|c| format!("{c:>5.1}"))
            .unwrap_or_else(|| "  n/a".to_string());
        let _ = writeln!(out, "  {:<20} {}  {}", factor.label(), score, a.reasoning(factor));
    }

    let kf = key_factors(a);
    let _ = writeln!(
        out,
        "  Key factors: trend {}, {}, {:.0}% on similar props",
        kf.recent_trend,
        kf.opponent_difficulty.to_lowercase(),
        kf.historical_success_rate * 100.0
    );
    out
}

pub fn render_board(props: &[&ScoredProp]) -> String {
    if props.is_empty() {
        return "No props match the current filter.\n".to_string();
    }
    props
        .iter()
        .map(|p| render_card(p))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodsource_core::board::score_entry;
    use foodsource_core::model::{OpponentDefense, Player, Position, Prop};
    use foodsource_core::scoring::ScoringEngine;
    use foodsource_core::slate::{League, PropEntry};

    fn scored() -> ScoredProp {
        let entry = PropEntry {
            id: "lamar-jackson-rush".into(),
            league: League::Nfl,
            player: Player {
                name: "Lamar Jackson".into(),
                team: "Baltimore Ravens".into(),
                position: Position::Quarterback,
                recent_stats: vec![70.0, 13.0, 35.0, 48.0, 41.0],
                season_stats: Default::default(),
                career_stats: Default::default(),
                historical_props: vec![],
            },
            prop: Prop {
                stat_type: "rushing".into(),
                line: 79.5,
                direction: Direction::Under,
                odds: -110,
                market: "Rushing Yards".into(),
                line_movement: 0.0,
                sharp_action: 50.0,
            },
            opponent: OpponentDefense::default(),
        };
        score_entry(&entry, &ScoringEngine::default())
    }

    #[test]
    fn bar_scales_with_confidence() {
        assert_eq!(confidence_bar(0), format!("[{}]", "-".repeat(20)));
        assert_eq!(confidence_bar(100), format!("[{}]", "#".repeat(20)));
        assert_eq!(confidence_bar(50), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
    }

    #[test]
    fn card_shows_line_confidence_and_every_factor() {
        let prop = scored();
        let card = render_card(&prop);
        assert!(card.starts_with("Lamar Jackson (Baltimore Ravens | QB | NFL)"));
        assert!(card.contains("UNDER 79.5 Rushing Yards   Odds: -110"));
        assert!(card.contains(&format!("Confidence: {}%", prop.confidence)));
        for factor in Factor::ALL {
            assert!(card.contains(prop.analysis.reasoning(factor)));
        }
        assert!(card.contains("Key factors: trend Declining"));
    }

    #[test]
    fn empty_board_message() {
        assert_eq!(render_board(&[]), "No props match the current filter.\n");
    }
}
