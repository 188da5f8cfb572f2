//! Configuration management for the career gap analyzer

use crate::error::{CareerGapError, Result};
use crate::processing::market_stats::StatisticsOptions;
use crate::processing::path_finder::PathFinderOptions;
use crate::processing::transition::{SkillDifficulty, TierTable, TransitionEstimator};
use crate::processing::vocabulary::{SkillCategory, SkillVocabulary};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub vocabulary: VocabularyConfig,
    pub analysis: AnalysisConfig,
    pub transition: TransitionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub dataset_path: PathBuf,
    pub cache_ttl_secs: u64,
    pub enable_caching: bool,
    pub exclude_zero_salary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Minimum Jaro-Winkler similarity for "did you mean" suggestions
    pub suggestion_threshold: f64,
    /// Replaces the built-in vocabulary when non-empty
    #[serde(default)]
    pub custom_categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub top_n: usize,
    pub top_companies: usize,
    pub top_categories: usize,
    pub sample_titles: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_scan_limit: Option<usize>,
    pub max_bridge_roles: usize,
    pub role_skill_sample: usize,
    pub profile_skill_sample: usize,
    pub profile_top_skills: usize,
    pub max_experience_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub industry_growth_rate: f64,
    pub skills_premium: f64,
    pub tiers: TierTable,
    pub difficulty: SkillDifficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                dataset_path: PathBuf::from("data").join("SGJobData.csv"),
                cache_ttl_secs: 3600,
                enable_caching: true,
                exclude_zero_salary: false,
            },
            vocabulary: VocabularyConfig {
                suggestion_threshold: 0.85,
                custom_categories: Vec::new(),
            },
            analysis: AnalysisConfig {
                top_n: 10,
                top_companies: 5,
                top_categories: 8,
                sample_titles: 10,
                candidate_scan_limit: Some(500),
                max_bridge_roles: 3,
                role_skill_sample: 20,
                profile_skill_sample: 50,
                profile_top_skills: 8,
                max_experience_years: 15,
            },
            transition: TransitionConfig {
                industry_growth_rate: 0.08,
                skills_premium: 1.15,
                tiers: TierTable::default(),
                difficulty: SkillDifficulty::default(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| CareerGapError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CareerGapError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("career-gap")
            .join("config.toml")
    }

    /// Reject values the analytics cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.vocabulary.suggestion_threshold) {
            return Err(CareerGapError::Configuration(format!(
                "vocabulary.suggestion_threshold must be 0-1, got {}",
                self.vocabulary.suggestion_threshold
            )));
        }
        if !self.transition.industry_growth_rate.is_finite() || self.transition.industry_growth_rate <= -1.0 {
            return Err(CareerGapError::Configuration(format!(
                "transition.industry_growth_rate must be greater than -1, got {}",
                self.transition.industry_growth_rate
            )));
        }
        if !self.transition.skills_premium.is_finite() || self.transition.skills_premium <= 0.0 {
            return Err(CareerGapError::Configuration(format!(
                "transition.skills_premium must be positive, got {}",
                self.transition.skills_premium
            )));
        }
        Ok(())
    }

    /// The configured vocabulary, or the built-in one
    pub fn skill_vocabulary(&self) -> SkillVocabulary {
        if self.vocabulary.custom_categories.is_empty() {
            SkillVocabulary::builtin().clone()
        } else {
            SkillVocabulary::new(self.vocabulary.custom_categories.clone())
        }
    }

    pub fn statistics_options(&self) -> StatisticsOptions {
        StatisticsOptions {
            top_n: self.analysis.top_n,
            top_companies: self.analysis.top_companies,
            exclude_zero_salary: self.data.exclude_zero_salary,
        }
    }

    pub fn path_finder_options(&self) -> PathFinderOptions {
        PathFinderOptions {
            sample_titles: self.analysis.sample_titles,
            scan_limit: self.analysis.candidate_scan_limit,
            max_gaps: self.analysis.max_bridge_roles,
        }
    }

    pub fn transition_estimator(&self) -> TransitionEstimator {
        TransitionEstimator {
            tiers: self.transition.tiers,
            industry_growth_rate: self.transition.industry_growth_rate,
            skills_premium: self.transition.skills_premium,
        }
    }
}
