// Venue factor and the provider seam for stadium data.

use serde::{Deserialize, Serialize};

use crate::model::{Player, Prop};
use crate::scoring::clamp_confidence;

const HOME_BONUS: f64 = 8.0;
const DOME_BONUS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct VenueData {
    pub is_home: bool,
    #[serde(default)]
    pub dome: bool,
    /// Feet above sea level.
    #[serde(default)]
    pub altitude: f64,
    /// Decibels.
    #[serde(default)]
    pub crowd_noise: f64,
}

impl Default for VenueData {
    fn default() -> Self {
        VenueData {
            is_home: true,
            dome: false,
            altitude: 0.0,
            crowd_noise: 85.0,
        }
    }
}

/// Source of venue data for a prop's game. `None` marks the factor unavailable.
pub trait VenueProvider: Send + Sync {
    fn venue(&self, player: &Player, prop: &Prop) -> Option<VenueData>;
}

/// Provider that reports the same venue for every game.
#[derive(Debug, Clone, Default)]
pub struct FixedVenue {
    pub venue: VenueData,
}

impl FixedVenue {
    pub fn new(venue: VenueData) -> Self {
        FixedVenue { venue }
    }
}

impl VenueProvider for FixedVenue {
    fn venue(&self, _player: &Player, _prop: &Prop) -> Option<VenueData> {
        Some(self.venue.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueFactors {
    pub confidence: Option<f64>,
    pub venue_data: Option<VenueData>,
    pub reasoning: String,
}

pub fn analyze_venue_factors(venue: Option<VenueData>) -> VenueFactors {
    let Some(venue) = venue else {
        return VenueFactors {
            confidence: None,
            venue_data: None,
            reasoning: "Venue data unavailable.".into(),
        };
    };

    let mut confidence = 50.0;
    let mut reasoning = String::from("Standard venue conditions.");

    if venue.is_home {
        confidence += HOME_BONUS;
        reasoning = "Home field advantage provides +8% confidence boost.".into();
    }
    if venue.dome {
        confidence += DOME_BONUS;
        reasoning.push_str(" Dome venue favors passing performance.");
    }

    VenueFactors {
        confidence: Some(clamp_confidence(confidence)),
        venue_data: Some(venue),
        reasoning,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
