// Weather factor and the provider seam for game-time conditions.

use serde::{Deserialize, Serialize};

use crate::model::{Player, Prop};
use crate::scoring::clamp_confidence;

const HIGH_WIND_MPH: f64 = 15.0;
const FREEZING_F: f64 = 32.0;
const HOT_F: f64 = 85.0;

/// Game-time conditions at the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct WeatherConditions {
    /// Degrees Fahrenheit.
    pub temperature: f64,
    /// Miles per hour.
    pub wind_speed: f64,
    /// Inches expected during the game.
    #[serde(default)]
    pub precipitation: f64,
    #[serde(default)]
    pub dome: bool,
}

impl Default for WeatherConditions {
    fn default() -> Self {
        WeatherConditions {
            temperature: 72.0,
            wind_speed: 8.0,
            precipitation: 0.0,
            dome: false,
        }
    }
}

/// Source of weather conditions for a prop's game.
///
/// Returning `None` marks the weather factor as unavailable; the
/// aggregator then skips it.
pub trait WeatherProvider: Send + Sync {
    fn conditions(&self, player: &Player, prop: &Prop) -> Option<WeatherConditions>;
}

/// Provider that reports the same conditions for every game.
#[derive(Debug, Clone, Default)]
pub struct FixedWeather {
    pub conditions: WeatherConditions,
}

impl FixedWeather {
    pub fn new(conditions: WeatherConditions) -> Self {
        FixedWeather { conditions }
    }
}

impl WeatherProvider for FixedWeather {
    fn conditions(&self, _player: &Player, _prop: &Prop) -> Option<WeatherConditions> {
        Some(self.conditions.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherFactors {
    pub confidence: Option<f64>,
    pub conditions: Option<WeatherConditions>,
    pub reasoning: String,
}

pub fn analyze_weather_factors(conditions: Option<WeatherConditions>) -> WeatherFactors {
    let Some(conditions) = conditions else {
        return WeatherFactors {
            confidence: None,
            conditions: None,
            reasoning: "Weather data unavailable.".into(),
        };
    };

    let mut confidence = 50.0;
    let mut reasoning = String::from("Clear conditions, minimal weather impact.");

    if conditions.wind_speed > HIGH_WIND_MPH {
        confidence -= 10.0;
        reasoning = format!(
            "High winds ({} mph) may impact performance.",
            conditions.wind_speed
        );
    }

    if conditions.temperature < FREEZING_F || conditions.temperature > HOT_F {
        confidence -= 5.0;
        reasoning.push_str(&format!(
            " Extreme temperatures ({}°F) may affect play.",
            conditions.temperature
        ));
    }

    WeatherFactors {
        confidence: Some(clamp_confidence(confidence)),
        conditions: Some(conditions),
        reasoning,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(temperature: f64, wind_speed: f64) -> WeatherConditions {
        WeatherConditions {
            temperature,
            wind_speed,
            ..WeatherConditions::default()
        }
    }

    #[test]
    fn placeholder_conditions_are_neutral() {
        let w = analyze_weather_factors(Some(WeatherConditions::default()));
        assert_eq!(w.confidence, Some(50.0));
        assert_eq!(w.reasoning, "Clear conditions, minimal weather impact.");
    }

    #[test]
    fn wind_and_temperature_penalties_stack() {
        assert_eq!(analyze_weather_factors(Some(conditions(72.0, 16.0))).confidence, Some(40.0));
        assert_eq!(analyze_weather_factors(Some(conditions(72.0, 15.0))).confidence, Some(50.0));
        assert_eq!(analyze_weather_factors(Some(conditions(20.0, 8.0))).confidence, Some(45.0));
        assert_eq!(analyze_weather_factors(Some(conditions(90.0, 8.0))).confidence, Some(45.0));

        let both = analyze_weather_factors(Some(conditions(20.0, 22.0)));
        assert_eq!(both.confidence, Some(35.0));
        assert_eq!(
            both.reasoning,
            "High winds (22 mph) may impact performance. Extreme temperatures (20°F) may affect play."
        );
    }

    #[test]
    fn boundary_temperatures_are_not_extreme() {
        assert_eq!(analyze_weather_factors(Some(conditions(32.0, 0.0))).confidence, Some(50.0));
        assert_eq!(analyze_weather_factors(Some(conditions(85.0, 0.0))).confidence, Some(50.0));
    }

    #[test]
    fn missing_conditions_carry_no_confidence() {
        let w = analyze_weather_factors(None);
        assert!(w.confidence.is_none());
        assert!(w.conditions.is_none());
    }
}
