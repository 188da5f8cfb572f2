//! Timeline and salary projections for a role transition
//!
//! All estimates are deterministic functions of their inputs and the
//! configured growth parameters.

use crate::error::CareerGapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_INDUSTRY_GROWTH_RATE: f64 = 0.08;
pub const SKILLS_PREMIUM: f64 = 1.15;

/// Milestone multipliers applied to the current salary
const SALARY_MILESTONES: [(&str, f64); 4] = [
    ("Current", 1.0),
    ("With Key Skills (3-6mo)", 1.15),
    ("Promoted (12mo)", 1.35),
    ("Senior Role (24mo)", 1.65),
];

/// How hard the missing skills are to pick up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
}

impl ComplexityTier {
    /// Hardest tier any gap falls in; gaps not in the table count as low
    pub fn infer<I>(gaps: I, difficulty: &SkillDifficulty) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut tier = ComplexityTier::Low;
        for gap in gaps {
            let gap = gap.as_ref();
            if contains_ignore_case(&difficulty.high, gap) {
                return ComplexityTier::High;
            }
            if contains_ignore_case(&difficulty.medium, gap) {
                tier = ComplexityTier::Medium;
            }
        }
        tier
    }
}

impl fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplexityTier::Low => write!(f, "low"),
            ComplexityTier::Medium => write!(f, "medium"),
            ComplexityTier::High => write!(f, "high"),
        }
    }
}

impl FromStr for ComplexityTier {
    type Err = CareerGapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ComplexityTier::Low),
            "medium" => Ok(ComplexityTier::Medium),
            "high" => Ok(ComplexityTier::High),
            other => Err(CareerGapError::InvalidInput(format!(
                "Unknown complexity tier: {}. Supported: low, medium, high",
                other
            ))),
        }
    }
}

/// Floor duration and per-skill cost of one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierParameters {
    pub floor_months: u32,
    pub weeks_per_skill: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    pub low: TierParameters,
    pub medium: TierParameters,
    pub high: TierParameters,
}

impl TierTable {
    pub fn get(&self, tier: ComplexityTier) -> TierParameters {
        match tier {
            ComplexityTier::Low => self.low,
            ComplexityTier::Medium => self.medium,
            ComplexityTier::High => self.high,
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            low: TierParameters { floor_months: 3, weeks_per_skill: 4 },
            medium: TierParameters { floor_months: 6, weeks_per_skill: 6 },
            high: TierParameters { floor_months: 12, weeks_per_skill: 8 },
        }
    }
}

/// Skills known to be easy, moderate, or hard to learn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDifficulty {
    pub low: Vec<String>,
    pub medium: Vec<String>,
    pub high: Vec<String>,
}

impl Default for SkillDifficulty {
    fn default() -> Self {
        let list = |skills: &[&str]| -> Vec<String> { skills.iter().map(|s| s.to_string()).collect() };
        Self {
            low: list(&["SQL", "Excel", "Communication", "Problem Solving"]),
            medium: list(&["Python", "JavaScript", "Project Management", "Leadership"]),
            high: list(&["Kubernetes", "Machine Learning", "System Design", "Cloud Architecture"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEstimate {
    pub gap_count: usize,
    pub tier: ComplexityTier,
    pub timeline_months: u32,
    pub current_salary: f64,
    pub years_to_target: f64,
    pub projected_salary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryMilestone {
    pub label: String,
    pub multiplier: f64,
    pub salary: f64,
}

/// Difference between the current salary and a target role's mean salary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryJump {
    pub absolute: f64,
    /// 0 when the current salary is 0
    pub percentage: f64,
}

impl SalaryJump {
    pub fn between(current_salary: f64, target_salary: f64) -> Self {
        let absolute = target_salary - current_salary;
        let percentage = if current_salary > 0.0 {
            absolute / current_salary * 100.0
        } else {
            0.0
        };
        Self { absolute, percentage }
    }
}

/// Feasibility of a domain switch given years already spent in a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDifficulty {
    LowModerate,
    Moderate,
    Challenging,
}

impl TransitionDifficulty {
    /// Compare years of experience to the target domain's mean requirement.
    /// Without target data the switch is rated moderate.
    pub fn assess(years_in_field: f64, target_mean_experience: Option<f64>) -> Self {
        match target_mean_experience {
            None => TransitionDifficulty::Moderate,
            Some(target) if years_in_field >= target * 0.5 => TransitionDifficulty::LowModerate,
            Some(target) if years_in_field >= target * 0.3 => TransitionDifficulty::Moderate,
            Some(_) => TransitionDifficulty::Challenging,
        }
    }
}

impl fmt::Display for TransitionDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionDifficulty::LowModerate => write!(f, "Low-Moderate"),
            TransitionDifficulty::Moderate => write!(f, "Moderate"),
            TransitionDifficulty::Challenging => write!(f, "Challenging"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEstimator {
    pub tiers: TierTable,
    pub industry_growth_rate: f64,
    pub skills_premium: f64,
}

impl Default for TransitionEstimator {
    fn default() -> Self {
        Self {
            tiers: TierTable::default(),
            industry_growth_rate: DEFAULT_INDUSTRY_GROWTH_RATE,
            skills_premium: SKILLS_PREMIUM,
        }
    }
}

impl TransitionEstimator {
    /// `max(floor_months, gaps * weeks_per_skill / 4)`, truncated to whole months
    pub fn estimate_timeline_months(&self, skill_gap_count: usize, tier: ComplexityTier) -> u32 {
        let params = self.tiers.get(tier);
        let learning_months = skill_gap_count as f64 * params.weeks_per_skill as f64 / 4.0;
        (params.floor_months as f64).max(learning_months) as u32
    }

    /// Salary after the skills premium and compounded industry growth
    pub fn estimate_salary_growth(&self, current_salary: f64, years_to_target: f64) -> f64 {
        project_salary(
            current_salary,
            years_to_target,
            self.industry_growth_rate,
            self.skills_premium,
        )
    }

    /// Combined timeline and salary estimate. Without an explicit horizon the
    /// salary is projected over the estimated timeline.
    pub fn estimate(
        &self,
        skill_gap_count: usize,
        tier: ComplexityTier,
        current_salary: f64,
        years_to_target: Option<f64>,
    ) -> TransitionEstimate {
        let timeline_months = self.estimate_timeline_months(skill_gap_count, tier);
        let years_to_target = years_to_target.unwrap_or(timeline_months as f64 / 12.0);

        TransitionEstimate {
            gap_count: skill_gap_count,
            tier,
            timeline_months,
            current_salary,
            years_to_target,
            projected_salary: self.estimate_salary_growth(current_salary, years_to_target),
        }
    }
}

/// `round(current * 1.15 * (1 + rate)^years)`
pub fn estimate_salary_growth(current_salary: f64, years_to_target: f64, industry_growth_rate: f64) -> f64 {
    project_salary(current_salary, years_to_target, industry_growth_rate, SKILLS_PREMIUM)
}

fn project_salary(current_salary: f64, years: f64, growth_rate: f64, premium: f64) -> f64 {
    if !current_salary.is_finite() || current_salary <= 0.0 {
        return 0.0;
    }
    let projected = current_salary * premium * (1.0 + growth_rate).powf(years);
    if projected.is_finite() {
        projected.round()
    } else {
        0.0
    }
}

/// Salary at each career milestone, from the current salary upward
pub fn salary_milestones(current_salary: f64) -> Vec<SalaryMilestone> {
    SALARY_MILESTONES
        .iter()
        .map(|&(label, multiplier)| SalaryMilestone {
            label: label.to_string(),
            multiplier,
            salary: current_salary.max(0.0) * multiplier,
        })
        .collect()
}

fn contains_ignore_case(list: &[String], skill: &str) -> bool {
    list.iter().any(|s| s.eq_ignore_ascii_case(skill.trim()))
}
