// Confidence scoring engine: six independent factor analyzers combined by a
// fixed-weight aggregator into a single 0-100 percentage.

pub mod historical;
pub mod market;
pub mod matchup;
pub mod recent;
pub mod trend;
pub mod venue;
pub mod weather;

use serde::Serialize;
use tracing::debug;

use crate::config::{FactorWeights, ScoringConfig};
use crate::model::{OpponentDefense, Player, Prop};

use self::historical::{HistoricalTrends, analyze_historical_trends};
use self::market::{MarketEfficiency, analyze_market_efficiency};
use self::matchup::{OpponentMatchup, analyze_opponent_matchup};
use self::recent::{RecentPerformance, analyze_recent_performance};
use self::venue::{FixedVenue, VenueFactors, VenueProvider, analyze_venue_factors};
use self::weather::{FixedWeather, WeatherFactors, WeatherProvider, analyze_weather_factors};

/// Clamp a confidence into [0, 100]. NaN collapses to 0.
pub(crate) fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

// ---------------------------------------------------------------------------
// Factors
// ---------------------------------------------------------------------------

/// The six inputs to the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    RecentPerformance,
    OpponentMatchup,
    HistoricalTrends,
    WeatherFactors,
    VenueFactors,
    MarketEfficiency,
}

impl Factor {
    pub const ALL: [Factor; 6] = [
        Factor::RecentPerformance,
        Factor::OpponentMatchup,
        Factor::HistoricalTrends,
        Factor::WeatherFactors,
        Factor::VenueFactors,
        Factor::MarketEfficiency,
    ];

    /// Key used in serialized reports.
    pub fn key(&self) -> &'static str {
        match self {
            Factor::RecentPerformance => "recentPerformance",
            Factor::OpponentMatchup => "opponentMatchup",
            Factor::HistoricalTrends => "historicalTrends",
            Factor::WeatherFactors => "weatherFactors",
            Factor::VenueFactors => "venueFactors",
            Factor::MarketEfficiency => "marketEfficiency",
        }
    }

    /// Human-readable heading.
    pub fn label(&self) -> &'static str {
        match self {
            Factor::RecentPerformance => "Recent Performance",
            Factor::OpponentMatchup => "Opponent Matchup",
            Factor::HistoricalTrends => "Historical Trends",
            Factor::WeatherFactors => "Weather Conditions",
            Factor::VenueFactors => "Venue Factors",
            Factor::MarketEfficiency => "Market Analysis",
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Per-factor results for one scored prop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub recent_performance: RecentPerformance,
    pub opponent_matchup: OpponentMatchup,
    pub historical_trends: HistoricalTrends,
    pub weather_factors: WeatherFactors,
    pub venue_factors: VenueFactors,
    pub market_efficiency: MarketEfficiency,
}

impl Analysis {
    /// Confidence reported by `factor`, or `None` when the factor had no data.
    pub fn confidence(&self, factor: Factor) -> Option<f64> {
        match factor {
            Factor::RecentPerformance => Some(self.recent_performance.confidence),
            Factor::OpponentMatchup => Some(self.opponent_matchup.confidence),
            Factor::HistoricalTrends => Some(self.historical_trends.confidence),
            Factor::WeatherFactors => self.weather_factors.confidence,
            Factor::VenueFactors => self.venue_factors.confidence,
            Factor::MarketEfficiency => Some(self.market_efficiency.confidence),
        }
    }

    pub fn reasoning(&self, factor: Factor) -> &str {
        match factor {
            Factor::RecentPerformance => &self.recent_performance.reasoning,
            Factor::OpponentMatchup => &self.opponent_matchup.reasoning,
            Factor::HistoricalTrends => &self.historical_trends.reasoning,
            Factor::WeatherFactors => &self.weather_factors.reasoning,
            Factor::VenueFactors => &self.venue_factors.reasoning,
            Factor::MarketEfficiency => &self.market_efficiency.reasoning,
        }
    }

    /// Sum of `weight * confidence` over factors that reported a confidence.
    /// Weights of factors without a confidence are dropped, not redistributed.
    pub fn weighted_sum(&self, weights: &FactorWeights) -> f64 {
        Factor::ALL
            .iter()
            .filter_map(|&f| self.confidence(f).map(|c| c * weights.weight(f)))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceReport {
    /// `round(clamp(weighted_sum, 0, 100))`.
    pub percentage: u8,
    pub analysis: Analysis,
}

/// Collapse a weighted sum into the final integer percentage.
pub fn to_percentage(weighted_sum: f64) -> u8 {
    clamp_confidence(weighted_sum).round() as u8
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Immutable scoring configuration: factor weights plus the weather and
/// venue providers. Holds no per-call state.
pub struct ScoringEngine {
    weights: FactorWeights,
    weather: Box<dyn WeatherProvider>,
    venue: Box<dyn VenueProvider>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        ScoringEngine::new(
            FactorWeights::default(),
            FixedWeather::default(),
            FixedVenue::default(),
        )
    }
}

impl ScoringEngine {
    pub fn new(
        weights: FactorWeights,
        weather: impl WeatherProvider + 'static,
        venue: impl VenueProvider + 'static,
    ) -> Self {
        ScoringEngine {
            weights,
            weather: Box::new(weather),
            venue: Box::new(venue),
        }
    }

    /// Engine with configured weights and fixed placeholder conditions.
    pub fn from_config(config: &ScoringConfig) -> Self {
        ScoringEngine::new(
            config.weights.clone(),
            FixedWeather::new(config.weather.clone()),
            FixedVenue::new(config.venue.clone()),
        )
    }

    pub fn weights(&self) -> &FactorWeights {
        &self.weights
    }

    /// Run all six analyzers. Each sees only its own slice of the input.
    pub fn analyze(&self, player: &Player, prop: &Prop, defense: &OpponentDefense) -> Analysis {
        Analysis {
            recent_performance: analyze_recent_performance(player, prop),
            opponent_matchup: analyze_opponent_matchup(player, prop, defense),
            historical_trends: analyze_historical_trends(player, prop),
            weather_factors: analyze_weather_factors(self.weather.conditions(player, prop)),
            venue_factors: analyze_venue_factors(self.venue.venue(player, prop)),
            market_efficiency: analyze_market_efficiency(prop),
        }
    }

    pub fn score(&self, player: &Player, prop: &Prop, defense: &OpponentDefense) -> ConfidenceReport {
        let analysis = self.analyze(player, prop, defense);
        let weighted = analysis.weighted_sum(&self.weights);
        let percentage = to_percentage(weighted);
        debug!(
            player = %player.name,
            stat = %prop.stat_type,
            line = prop.line,
            direction = %prop.direction,
            weighted,
            percentage,
            "scored prop"
        );
        ConfidenceReport {
            percentage,
            analysis,
        }
    }
}

/// Score a prop with default weights and placeholder weather/venue data.
pub fn score(player: &Player, prop: &Prop, defense: &OpponentDefense) -> ConfidenceReport {
    ScoringEngine::default().score(player, prop, defense)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
