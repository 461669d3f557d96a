// JSON and CSV exports of a scored board.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use foodsource_core::board::ScoredProp;
use foodsource_core::scoring::Factor;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BoardDocument<'a> {
    generated_at: DateTime<Utc>,
    props: &'a [&'a ScoredProp],
}

pub fn to_json(props: &[&ScoredProp], generated_at: DateTime<Utc>) -> anyhow::Result<String> {
    let doc = BoardDocument {
        generated_at,
        props,
    };
    serde_json::to_string_pretty(&doc).context("failed to serialize board as JSON")
}

/// One CSV row per prop. Factors without data are left blank.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    league: &'static str,
    player: &'a str,
    team: &'a str,
    position: &'static str,
    market: &'a str,
    direction: &'static str,
    line: f64,
    odds: i32,
    confidence: u8,
    tier: &'static str,
    recent_performance: Option<f64>,
    opponent_matchup: Option<f64>,
    historical_trends: Option<f64>,
    weather_factors: Option<f64>,
    venue_factors: Option<f64>,
    market_efficiency: Option<f64>,
}

impl<'a> CsvRow<'a> {
    fn from_prop(p: &'a ScoredProp) -> Self {
        let c = |f: Factor| p.analysis.confidence(f);
        CsvRow {
            id: &p.id,
            league: p.league.label(),
            player: &p.player.name,
            team: &p.player.team,
            position: p.player.position.display_str(),
            market: &p.prop.market,
            direction: p.prop.direction.label(),
            line: p.prop.line,
            odds: p.prop.odds,
            confidence: p.confidence,
            tier: p.tier.label(),
            recent_performance: c(Factor::RecentPerformance),
            opponent_matchup: c(Factor::OpponentMatchup),
            historical_trends: c(Factor::HistoricalTrends),
            weather_factors: c(Factor::WeatherFactors),
            venue_factors: c(Factor::VenueFactors),
            market_efficiency: c(Factor::MarketEfficiency),
        }
    }
}

pub fn to_csv(props: &[&ScoredProp]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for p in props {
        writer
            .serialize(CsvRow::from_prop(p))
            .with_context(|| format!("failed to write CSV row for {}", p.id))?;
    }
    let bytes = writer.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}
