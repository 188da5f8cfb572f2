//! Main analysis engine combining statistics, skill matching, and transition estimates

use crate::config::{AnalysisConfig, Config};
use crate::error::Result;
use crate::processing::market_stats::{
    ExperienceBucket, ExperienceLevel, ExperienceSalaryPoint, MarketStatistics, RoleStatistics,
    StatisticsOptions, ValueCount,
};
use crate::processing::match_engine::{compare, SkillComparison};
use crate::processing::path_finder::{BridgeRole, PathFinderOptions, StepwisePathFinder};
use crate::processing::record::{JobTable, RoleFilter};
use crate::processing::skill_extractor::{SkillCount, SkillExtractor};
use crate::processing::transition::{
    salary_milestones, ComplexityTier, SalaryJump, SalaryMilestone, SkillDifficulty,
    TransitionDifficulty, TransitionEstimate, TransitionEstimator,
};
use crate::processing::vocabulary::SkillVocabulary;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Titles scanned when ranking the skills of a role or category
const SKILL_SCAN_TITLES: usize = 100;

/// Main analysis engine that coordinates all analysis components
pub struct CareerAnalyzer {
    table: Arc<JobTable>,
    vocabulary: SkillVocabulary,
    extractor: SkillExtractor,
    estimator: TransitionEstimator,
    difficulty: SkillDifficulty,
    statistics: StatisticsOptions,
    paths: PathFinderOptions,
    analysis: AnalysisConfig,
    suggestion_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub total_postings: usize,
    pub top_categories: Vec<ValueCount>,
    pub experience_distribution: Vec<ExperienceBucket>,
    pub salary_by_experience: Vec<ExperienceSalaryPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleGapRequest {
    pub current_role: String,
    pub target_role: String,
    /// Skills the user already has; empty means every target skill is a gap
    pub user_skills: Vec<String>,
    pub current_salary: f64,
    pub years_to_target: Option<f64>,
}

/// A user-entered skill missing from the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSuggestion {
    pub input: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleGapAnalysis {
    pub current_role: String,
    pub target_role: String,
    pub current_statistics: Option<RoleStatistics>,
    pub target_statistics: RoleStatistics,
    pub current_role_skills: Vec<String>,
    pub target_role_skills: Vec<String>,
    pub comparison: SkillComparison,
    pub unrecognized_skills: Vec<SkillSuggestion>,
    pub estimate: TransitionEstimate,
    /// Absent when the target role has no salary data
    pub salary_jump: Option<SalaryJump>,
    pub milestones: Vec<SalaryMilestone>,
    pub bridge_roles: Vec<BridgeRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub role: String,
    pub years_experience: f64,
    pub current_salary: f64,
    pub user_skills: Vec<String>,
}

/// Where a user sits among postings for their own role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePosition {
    pub role: String,
    pub openings: usize,
    pub peer_median_salary: Option<f64>,
    /// Current salary minus the peer median
    pub salary_difference: Option<f64>,
    pub peer_median_experience: f64,
    pub experience_difference: f64,
    pub experience_level: ExperienceLevel,
    pub top_skills: Vec<SkillCount>,
    pub comparison: SkillComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchRequest {
    pub target: RoleFilter,
    pub years_in_field: f64,
    pub user_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchAssessment {
    pub target: RoleFilter,
    pub openings: usize,
    pub mean_salary: Option<f64>,
    pub mean_experience: Option<f64>,
    pub difficulty: TransitionDifficulty,
    pub required_skills: Vec<String>,
    pub comparison: SkillComparison,
    pub tier: ComplexityTier,
    pub timeline_months: u32,
}

impl CareerAnalyzer {
    pub fn new(table: Arc<JobTable>, config: &Config) -> Result<Self> {
        let vocabulary = config.skill_vocabulary();
        let extractor = SkillExtractor::new(&vocabulary)?;
        info!(
            "Analyzer ready: {} records, {} vocabulary skills",
            table.len(),
            extractor.skill_count()
        );

        Ok(Self {
            table,
            vocabulary,
            extractor,
            estimator: config.transition_estimator(),
            difficulty: config.transition.difficulty.clone(),
            statistics: config.statistics_options(),
            paths: config.path_finder_options(),
            analysis: config.analysis.clone(),
            suggestion_threshold: config.vocabulary.suggestion_threshold,
        })
    }

    pub fn table(&self) -> &JobTable {
        &self.table
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn extractor(&self) -> &SkillExtractor {
        &self.extractor
    }

    pub fn estimator(&self) -> &TransitionEstimator {
        &self.estimator
    }

    pub fn path_finder_options(&self) -> &PathFinderOptions {
        &self.paths
    }

    fn market(&self) -> MarketStatistics<'_> {
        MarketStatistics::new(&self.table, self.statistics.clone())
    }

    pub fn market_overview(&self) -> MarketOverview {
        let market = self.market();
        MarketOverview {
            total_postings: self.table.len(),
            top_categories: market.category_counts(self.analysis.top_categories),
            experience_distribution: market.experience_distribution(),
            salary_by_experience: market.salary_by_experience(self.analysis.max_experience_years),
        }
    }

    pub fn role_statistics(&self, keyword: &str) -> Option<RoleStatistics> {
        self.market().role_stats(keyword)
    }

    pub fn category_statistics(&self, category: &str) -> Option<RoleStatistics> {
        self.market().category_stats(category)
    }

    /// Gap analysis between two roles. `None` when no posting matches the target.
    pub fn role_gap_analysis(&self, request: &RoleGapRequest) -> Option<RoleGapAnalysis> {
        let market = self.market();
        let target_statistics = market.role_stats(&request.target_role)?;
        let current_statistics = market.role_stats(&request.current_role);

        let current_role_skills = self.sampled_role_skills(&request.current_role);
        let target_role_skills = self.sampled_role_skills(&request.target_role);

        if request.user_skills.is_empty() {
            debug!("No user skills given, every target skill is a gap");
        }
        let comparison = compare(&request.user_skills, &target_role_skills);

        let tier = ComplexityTier::infer(&comparison.gaps, &self.difficulty);
        let estimate = self.estimator.estimate(
            comparison.gaps.len(),
            tier,
            request.current_salary,
            request.years_to_target,
        );

        let salary_jump = target_statistics
            .salary
            .as_ref()
            .map(|salary| SalaryJump::between(request.current_salary, salary.mean));

        let bridge_roles = self.bridge_roles(&request.current_role, &request.target_role);

        Some(RoleGapAnalysis {
            current_role: request.current_role.clone(),
            target_role: request.target_role.clone(),
            current_statistics,
            target_statistics,
            current_role_skills,
            target_role_skills,
            comparison,
            unrecognized_skills: self.unrecognized_skills(&request.user_skills),
            estimate,
            salary_jump,
            milestones: salary_milestones(request.current_salary),
            bridge_roles,
        })
    }

    /// Position among peers in the same role. `None` when the role has no postings.
    pub fn profile_position(&self, request: &ProfileRequest) -> Option<ProfilePosition> {
        let stats = self.market().role_stats(&request.role)?;

        let titles = self
            .table
            .titles_matching(&request.role, self.analysis.profile_skill_sample);
        let mut top_skills = self.extractor.skill_frequencies(titles);
        top_skills.truncate(self.analysis.profile_top_skills);

        let comparison = compare(&request.user_skills, top_skills.iter().map(|s| s.skill.as_str()));
        let peer_median_salary = stats.salary.as_ref().map(|s| s.median);

        Some(ProfilePosition {
            role: request.role.clone(),
            openings: stats.count,
            peer_median_salary,
            salary_difference: peer_median_salary.map(|median| request.current_salary - median),
            peer_median_experience: stats.experience.median,
            experience_difference: request.years_experience - stats.experience.median,
            experience_level: ExperienceLevel::from_years(request.years_experience),
            top_skills,
            comparison,
        })
    }

    /// Feasibility of moving into a new domain. Required skills are the most
    /// frequent skills in the domain's postings.
    pub fn switch_assessment(&self, request: &SwitchRequest) -> SwitchAssessment {
        let stats = self.market().compute(&request.target);

        let required: Vec<SkillCount> = self.skills_for(&request.target);
        let required_skills: Vec<String> = required.into_iter().map(|s| s.skill).collect();

        let comparison = compare(&request.user_skills, &required_skills);
        let tier = ComplexityTier::infer(&comparison.gaps, &self.difficulty);
        let timeline_months = self.estimator.estimate_timeline_months(comparison.gaps.len(), tier);

        let mean_experience = stats.as_ref().map(|s| s.experience.mean);

        SwitchAssessment {
            target: request.target.clone(),
            openings: stats.as_ref().map_or(0, |s| s.count),
            mean_salary: stats.as_ref().and_then(|s| s.salary.as_ref()).map(|s| s.mean),
            mean_experience,
            difficulty: TransitionDifficulty::assess(request.years_in_field, mean_experience),
            required_skills,
            comparison,
            tier,
            timeline_months,
        }
    }

    pub fn bridge_roles(&self, current_role: &str, target_role: &str) -> Vec<BridgeRole> {
        StepwisePathFinder::new(&self.table, &self.extractor, self.paths.clone())
            .find_stepping_stones(current_role, target_role)
    }

    /// Bridge search with explicit limits, e.g. from the command line
    pub fn bridge_roles_with(&self, current_role: &str, target_role: &str, options: PathFinderOptions) -> Vec<BridgeRole> {
        StepwisePathFinder::new(&self.table, &self.extractor, options)
            .find_stepping_stones(current_role, target_role)
    }

    pub fn skills_for_role(&self, role: &str) -> Vec<SkillCount> {
        self.skills_for(&RoleFilter::title(role))
    }

    pub fn skills_for_category(&self, category: &str) -> Vec<SkillCount> {
        self.skills_for(&RoleFilter::category(category))
    }

    fn skills_for(&self, filter: &RoleFilter) -> Vec<SkillCount> {
        let titles = self
            .table
            .filter(filter)
            .into_iter()
            .take(SKILL_SCAN_TITLES)
            .map(|r| r.title.as_str());
        let mut frequencies = self.extractor.skill_frequencies(titles);
        frequencies.truncate(self.analysis.top_n);
        frequencies
    }

    fn sampled_role_skills(&self, role: &str) -> Vec<String> {
        let titles = self.table.titles_matching(role, self.analysis.role_skill_sample);
        self.extractor.extract_all(titles).into_iter().collect()
    }

    fn unrecognized_skills(&self, skills: &[String]) -> Vec<SkillSuggestion> {
        skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && !self.vocabulary.contains(s))
            .map(|s| SkillSuggestion {
                input: s.to_string(),
                suggestion: self
                    .vocabulary
                    .suggest(s, self.suggestion_threshold)
                    .map(str::to_string),
            })
            .collect()
    }
}
