// Prop slate loading: the list of props to score, read from a TOML file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::warn;

use crate::model::{OpponentDefense, Player, Prop};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Nfl,
    Nba,
}

impl League {
    pub fn label(&self) -> &'static str {
        match self {
            League::Nfl => "NFL",
            League::Nba => "NBA",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One prop to score, with everything the engine needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropEntry {
    pub id: String,
    pub league: League,
    pub player: Player,
    pub prop: Prop,
    #[serde(default)]
    pub opponent: OpponentDefense,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Slate {
    #[serde(default)]
    pub props: Vec<PropEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum SlateError {
    #[error("failed to read slate {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse slate {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

/// Parse slate TOML text. `origin` names the source in error messages.
pub fn parse_slate(text: &str, origin: &str) -> Result<Slate, SlateError> {
    let slate: Slate = toml::from_str(text).map_err(|e| SlateError::Parse {
        path: origin.to_string(),
        source: e,
    })?;
    validate_slate(&slate)?;
    Ok(slate)
}

pub fn load_slate(path: &Path) -> Result<Slate, SlateError> {
    let text = std::fs::read_to_string(path).map_err(|e| SlateError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_slate(&text, &path.display().to_string())
}

fn validate_slate(slate: &Slate) -> Result<(), SlateError> {
    let mut seen = HashSet::new();
    for entry in &slate.props {
        if entry.id.trim().is_empty() {
            return Err(SlateError::Validation(format!(
                "prop for {} has an empty id",
                entry.player.name
            )));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(SlateError::Validation(format!("duplicate prop id `{}`", entry.id)));
        }
        if !entry.prop.line.is_finite() {
            return Err(SlateError::Validation(format!(
                "prop `{}` has a non-finite line",
                entry.id
            )));
        }
        if entry.player.recent_stats.is_empty() {
            warn!(id = %entry.id, "prop has no recent stats");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
