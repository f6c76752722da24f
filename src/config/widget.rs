//! Widget configuration - roster location, ranking and presentation

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::assets::AssetPaths;
use crate::domain::matching::{ScoringWeights, DEFAULT_MAX_RESULTS};
use crate::domain::presentation::PresenterConfig;

const MAX_RESULTS_LIMIT: usize = 20;
const MAX_VISIBLE_TAGS: usize = 12;

/// Widget configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfig {
    /// Roster JSON file
    #[serde(default = "default_roster_path")]
    pub roster_path: PathBuf,

    /// Therapists shown on the results page
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Specialty tags per card before "+N more"
    #[serde(default = "default_visible_tag_count")]
    pub visible_tag_count: usize,

    /// Drop therapists sharing no specialty with the user's concerns
    #[serde(default = "default_require_specialty_overlap")]
    pub require_specialty_overlap: bool,

    #[serde(default)]
    pub weights: ScoringWeights,

    #[serde(default)]
    pub assets: AssetPaths,
}

impl WidgetConfig {
    pub fn presenter_config(&self) -> PresenterConfig {
        PresenterConfig {
            visible_tag_count: self.visible_tag_count,
        }
    }

    /// Validate widget configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.roster_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRosterPath);
        }
        if self.max_results == 0 || self.max_results > MAX_RESULTS_LIMIT {
            return Err(ValidationError::OutOfRange {
                field: "max_results",
                min: 1,
                max: MAX_RESULTS_LIMIT,
            });
        }
        if self.visible_tag_count == 0 || self.visible_tag_count > MAX_VISIBLE_TAGS {
            return Err(ValidationError::OutOfRange {
                field: "visible_tag_count",
                min: 1,
                max: MAX_VISIBLE_TAGS,
            });
        }
        if self.weights.specialty_match == 0 {
            return Err(ValidationError::ZeroSpecialtyWeight);
        }
        Ok(())
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            roster_path: default_roster_path(),
            max_results: default_max_results(),
            visible_tag_count: default_visible_tag_count(),
            require_specialty_overlap: default_require_specialty_overlap(),
            weights: ScoringWeights::default(),
            assets: AssetPaths::default(),
        }
    }
}

fn default_roster_path() -> PathBuf {
    PathBuf::from("data/therapists.json")
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_visible_tag_count() -> usize {
    3
}

fn default_require_specialty_overlap() -> bool {
    true
}
