
//! Engine configuration.

use crate::expr::operator::Rounding;
use crate::parsing::pratt::DEFAULT_MAX_DEPTH;
use crate::staged::StagedEvaluator;

use clap::ValueEnum;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use std::fs;
use std::path::Path;

/// Which evaluator turns equation text into a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Engine {
  /// Tokenize, build a tree with the Pratt parser, and walk it.
  Pratt,
  /// Split into members and reduce tier by tier.
  #[default]
  Staged,
  /// Run both, returning the tree result if they agree.
  CrossChecked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
  pub engine: Engine,
  /// Decimal places kept by multiplication, division, roots, powers,
  /// and logarithms.
  pub precision: u32,
  pub max_depth: usize,
  pub cursor_marker: char,
  /// Largest difference tolerated between the two evaluators in
  /// [`Engine::CrossChecked`] mode.
  pub cross_check_tolerance: f64,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
  #[error("Failed to read settings file {path}: {source}")]
  Io { path: String, source: std::io::Error },
  #[error("Invalid settings: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineSettings {
  pub const DEFAULT_CURSOR_MARKER: char = '|';

  pub fn rounding(&self) -> Rounding {
    Rounding::new(self.precision)
  }

  pub fn staged_evaluator(&self) -> StagedEvaluator {
    StagedEvaluator::new(self.rounding(), self.max_depth)
  }

  /// Parses settings from JSON. Missing fields take their default
  /// values.
  pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
    Ok(serde_json::from_str(json)?)
  }

  pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
      path: path.display().to_string(),
      source,
    })?;
    Self::from_json_str(&json)
  }
}

impl Default for EngineSettings {
  fn default() -> Self {
    Self {
      engine: Engine::default(),
      precision: Rounding::DEFAULT_DECIMAL_PLACES,
      max_depth: DEFAULT_MAX_DEPTH,
      cursor_marker: Self::DEFAULT_CURSOR_MARKER,
      cross_check_tolerance: 1e-9,
    }
  }
}
