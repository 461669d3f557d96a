// Configuration loading and parsing (scoring.toml, display.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::board::{LeagueFilter, PositionFilter};
use crate::scoring::Factor;
use crate::scoring::venue::VenueData;
use crate::scoring::weather::WeatherConditions;

/// Allowed drift of the weight total away from 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub display: DisplayConfig,
    pub data_paths: DataPaths,
}

// ---------------------------------------------------------------------------
// scoring.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire scoring.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ScoringFile {
    weights: FactorWeights,
    #[serde(default)]
    weather: WeatherConditions,
    #[serde(default)]
    venue: VenueData,
    data: DataPaths,
}

/// Everything the scoring engine is built from.
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    pub weights: FactorWeights,
    /// Conditions reported by the fixed weather provider.
    pub weather: WeatherConditions,
    /// Venue reported by the fixed venue provider.
    pub venue: VenueData,
}

/// Weight of each factor in the aggregate. Must sum to 1.0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FactorWeights {
    pub recent_performance: f64,
    pub opponent_matchup: f64,
    pub historical_trends: f64,
    pub weather_factors: f64,
    pub venue_factors: f64,
    pub market_efficiency: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        FactorWeights {
            recent_performance: 0.25,
            opponent_matchup: 0.20,
            historical_trends: 0.20,
            weather_factors: 0.10,
            venue_factors: 0.15,
            market_efficiency: 0.10,
        }
    }
}

impl FactorWeights {
    pub fn weight(&self, factor: Factor) -> f64 {
        match factor {
            Factor::RecentPerformance => self.recent_performance,
            Factor::OpponentMatchup => self.opponent_matchup,
            Factor::HistoricalTrends => self.historical_trends,
            Factor::WeatherFactors => self.weather_factors,
            Factor::VenueFactors => self.venue_factors,
            Factor::MarketEfficiency => self.market_efficiency,
        }
    }

    pub fn total(&self) -> f64 {
        Factor::ALL.iter().map(|&f| self.weight(f)).sum()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub slate: String,
}

// ---------------------------------------------------------------------------
// display.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct DisplayFile {
    display: DisplayConfig,
}

/// How the board is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn all_filter() -> String {
    "all".into()
}

fn text_format() -> OutputFormat {
    OutputFormat::Text
}

/// Defaults for the board view; command-line arguments override them.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// "all", "nfl" or "nba".
    #[serde(default = "all_filter")]
    pub league: String,
    /// "all" or a position abbreviation.
    #[serde(default = "all_filter")]
    pub position: String,
    #[serde(default = "text_format")]
    pub format: OutputFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            league: all_filter(),
            position: all_filter(),
            format: text_format(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/scoring.toml` and
/// (optionally) `config/display.toml`, relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- scoring.toml (required) ---
    let scoring_path = config_dir.join("scoring.toml");
    let scoring_text = read_file(&scoring_path)?;
    let scoring_file: ScoringFile =
        toml::from_str(&scoring_text).map_err(|e| ConfigError::ParseError {
            path: scoring_path.clone(),
            source: e,
        })?;

    // --- display.toml (optional) ---
    let display_path = config_dir.join("display.toml");
    let display = if display_path.exists() {
        let display_text = read_file(&display_path)?;
        let display_file: DisplayFile =
            toml::from_str(&display_text).map_err(|e| ConfigError::ParseError {
                path: display_path.clone(),
                source: e,
            })?;
        display_file.display
    } else {
        DisplayConfig::default()
    };

    let config = Config {
        scoring: ScoringConfig {
            weights: scoring_file.weights,
            weather: scoring_file.weather,
            venue: scoring_file.venue,
        },
        display,
        data_paths: scoring_file.data,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    copied.sort();
    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let w = &config.scoring.weights;
    for factor in Factor::ALL {
        let val = w.weight(factor);
        if !val.is_finite() || val < 0.0 {
            return Err(ConfigError::ValidationError {
                field: format!("weights.{}", weight_key(factor)),
                message: format!("must be a finite value >= 0, got {val}"),
            });
        }
    }
    let total = w.total();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::ValidationError {
            field: "weights".into(),
            message: format!("must sum to 1.0, got {total}"),
        });
    }

    let weather = &config.scoring.weather;
    if !weather.temperature.is_finite() {
        return Err(ConfigError::ValidationError {
            field: "weather.temperature".into(),
            message: format!("must be finite, got {}", weather.temperature),
        });
    }
    if !weather.wind_speed.is_finite() || weather.wind_speed < 0.0 {
        return Err(ConfigError::ValidationError {
            field: "weather.wind_speed".into(),
            message: format!("must be >= 0, got {}", weather.wind_speed),
        });
    }

    if config.data_paths.slate.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.slate".into(),
            message: "must not be empty".into(),
        });
    }

    if LeagueFilter::parse(&config.display.league).is_none() {
        return Err(ConfigError::ValidationError {
            field: "display.league".into(),
            message: format!("expected all, nfl or nba, got `{}`", config.display.league),
        });
    }
    if PositionFilter::parse(&config.display.position).is_none() {
        return Err(ConfigError::ValidationError {
            field: "display.position".into(),
            message: format!("unknown position `{}`", config.display.position),
        });
    }

    Ok(())
}

/// TOML key of a factor's weight.
fn weight_key(factor: Factor) -> &'static str {
    match factor {
        Factor::RecentPerformance => "recent_performance",
        Factor::OpponentMatchup => "opponent_matchup",
        Factor::HistoricalTrends => "historical_trends",
        Factor::WeatherFactors => "weather_factors",
        Factor::VenueFactors => "venue_factors",
        Factor::MarketEfficiency => "market_efficiency",
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Workspace root, which holds `defaults/`.
    fn project_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    /// Fresh temp dir with `config/` containing a copy of the default scoring.toml.
    fn temp_base(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::copy(
            project_root().join("defaults/scoring.toml"),
            tmp.join("config/scoring.toml"),
        )
        .unwrap();
        tmp
    }

    fn expect_validation_field(err: ConfigError, expected: &str) {
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_valid_config_from_project_files() {
        let tmp = std::env::temp_dir().join("foodsource_config_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        let defaults = tmp.join("defaults");
        fs::create_dir_all(&defaults).unwrap();
        for name in ["scoring.toml", "display.toml"] {
            fs::copy(project_root().join("defaults").join(name), defaults.join(name)).unwrap();
        }

        ensure_config_files(&tmp).expect("should copy default configs");
        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(config.scoring.weights, FactorWeights::default());
        assert_eq!(config.scoring.weather, WeatherConditions::default());
        assert_eq!(config.scoring.venue, VenueData::default());
        assert_eq!(config.data_paths.slate, "data/slate.toml");
        assert_eq!(config.display.league, "all");
        assert_eq!(config.display.position, "all");
        assert_eq!(config.display.format, OutputFormat::Text);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_display_toml_is_ok() {
        let tmp = temp_base("foodsource_config_no_display");
        let config = load_config_from(&tmp).expect("should load without display.toml");
        assert_eq!(config.display.format, OutputFormat::Text);
        assert_eq!(config.display.league, "all");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn display_toml_overrides_defaults() {
        let tmp = temp_base("foodsource_config_display");
        fs::write(
            tmp.join("config/display.toml"),
            "[display]\nleague = \"nba\"\nposition = \"SF\"\nformat = \"json\"\n",
        )
        .unwrap();
        let config = load_config_from(&tmp).expect("should load display.toml");
        assert_eq!(config.display.league, "nba");
        assert_eq!(config.display.position, "SF");
        assert_eq!(config.display.format, OutputFormat::Json);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_unknown_display_position() {
        let tmp = temp_base("foodsource_config_bad_position");
        fs::write(
            tmp.join("config/display.toml"),
            "[display]\nposition = \"LB\"\n",
        )
        .unwrap();
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "display.position");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_negative_weight() {
        let tmp = temp_base("foodsource_config_negative_weight");
        let text = fs::read_to_string(tmp.join("config/scoring.toml")).unwrap();
        let modified = text
            .replace("venue_factors = 0.15", "venue_factors = -0.15")
            .replace("recent_performance = 0.25", "recent_performance = 0.55");
        fs::write(tmp.join("config/scoring.toml"), modified).unwrap();
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "weights.venue_factors");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let tmp = temp_base("foodsource_config_weight_sum");
        let text = fs::read_to_string(tmp.join("config/scoring.toml")).unwrap();
        let modified = text.replace("market_efficiency = 0.10", "market_efficiency = 0.30");
        fs::write(tmp.join("config/scoring.toml"), modified).unwrap();
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "weights");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_negative_wind_speed() {
        let tmp = temp_base("foodsource_config_wind");
        let text = fs::read_to_string(tmp.join("config/scoring.toml")).unwrap();
        let modified = text.replace("wind_speed = 8.0", "wind_speed = -1.0");
        fs::write(tmp.join("config/scoring.toml"), modified).unwrap();
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "weather.wind_speed");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn weather_and_venue_sections_are_optional() {
        let tmp = temp_base("foodsource_config_minimal");
        fs::write(
            tmp.join("config/scoring.toml"),
            r#"
[weights]
recent_performance = 0.25
opponent_matchup = 0.20
historical_trends = 0.20
weather_factors = 0.10
venue_factors = 0.15
market_efficiency = 0.10

[data]
slate = "elsewhere/slate.toml"
"#,
        )
        .unwrap();
        let config = load_config_from(&tmp).expect("minimal scoring.toml should load");
        assert_eq!(config.scoring.weather, WeatherConditions::default());
        assert_eq!(config.scoring.venue, VenueData::default());
        assert_eq!(config.data_paths.slate, "elsewhere/slate.toml");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_scoring_toml() {
        let tmp = std::env::temp_dir().join("foodsource_config_missing_scoring");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("scoring.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = temp_base("foodsource_config_invalid_toml");
        fs::write(tmp.join("config/scoring.toml"), "this is not valid [[[ toml").unwrap();
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("scoring.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_and_skips_examples() {
        let tmp = std::env::temp_dir().join("foodsource_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();

        let root = project_root();
        fs::copy(root.join("defaults/scoring.toml"), defaults_dir.join("scoring.toml")).unwrap();
        fs::copy(root.join("defaults/display.toml"), defaults_dir.join("display.toml")).unwrap();
        fs::write(defaults_dir.join("display.toml.example"), "[display]\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 2);
        assert!(tmp.join("config/scoring.toml").exists());
        assert!(tmp.join("config/display.toml").exists());
        assert!(!tmp.join("config/display.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("foodsource_config_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();

        let root = project_root();
        fs::copy(root.join("defaults/scoring.toml"), defaults_dir.join("scoring.toml")).unwrap();
        fs::copy(root.join("defaults/display.toml"), defaults_dir.join("display.toml")).unwrap();
        fs::write(config_dir.join("scoring.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(copied[0].ends_with("display.toml"));
        let content = fs::read_to_string(config_dir.join("scoring.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("foodsource_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }
}
