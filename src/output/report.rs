//! Report envelope and the section layout shared by the text formatters

use crate::processing::analyzer::{
    MarketOverview, ProfilePosition, RoleGapAnalysis, SwitchAssessment,
};
use crate::processing::market_stats::{RoleStatistics, ValueCount};
use crate::processing::path_finder::BridgeRole;
use crate::processing::record::RoleFilter;
use crate::processing::skill_extractor::SkillCount;
use crate::processing::transition::{SalaryMilestone, TransitionEstimate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single analysis result plus generation metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub body: ReportBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the analyzer used
    pub version: String,

    /// Dataset the analysis ran against
    pub dataset: String,

    /// Normalized records in the dataset
    pub records: usize,
}

/// Analysis payload. `None` results render as "insufficient data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportBody {
    MarketOverview {
        overview: MarketOverview,
    },
    Statistics {
        filter: RoleFilter,
        statistics: Option<RoleStatistics>,
    },
    RoleGap {
        current_role: String,
        target_role: String,
        analysis: Option<RoleGapAnalysis>,
    },
    BridgeRoles {
        current_role: String,
        target_role: String,
        bridges: Vec<BridgeRole>,
    },
    Estimate {
        estimate: TransitionEstimate,
        milestones: Vec<SalaryMilestone>,
    },
    Profile {
        role: String,
        position: Option<ProfilePosition>,
    },
    Switch {
        assessment: SwitchAssessment,
    },
    Skills {
        filter: RoleFilter,
        skills: Vec<SkillCount>,
    },
}

/// Titled block of rows, rendered by the console and Markdown formatters
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Field { label: String, value: String },
    Item(String),
    Note(String),
}

impl Report {
    pub fn new(dataset: impl Into<String>, records: usize, body: ReportBody) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                dataset: dataset.into(),
                records,
            },
            body,
        }
    }

    pub fn title(&self) -> String {
        match &self.body {
            ReportBody::MarketOverview { .. } => "Job Market Overview".to_string(),
            ReportBody::Statistics { filter, .. } => format!("Market Statistics: {}", describe_filter(filter)),
            ReportBody::RoleGap { current_role, target_role, .. } => {
                format!("Career Gap: {} -> {}", current_role, target_role)
            }
            ReportBody::BridgeRoles { current_role, target_role, .. } => {
                format!("Career Path: {} -> {}", current_role, target_role)
            }
            ReportBody::Estimate { .. } => "Transition Estimate".to_string(),
            ReportBody::Profile { role, .. } => format!("Profile Position: {}", role),
            ReportBody::Switch { assessment } => format!("Career Switch: {}", describe_filter(&assessment.target)),
            ReportBody::Skills { filter, .. } => format!("Top Skills: {}", describe_filter(filter)),
        }
    }

    /// Body laid out as titled sections
    pub fn sections(&self) -> Vec<Section> {
        match &self.body {
            ReportBody::MarketOverview { overview } => overview_sections(overview),
            ReportBody::Statistics { statistics, .. } => match statistics {
                Some(stats) => statistics_sections("Statistics", stats),
                None => vec![insufficient_data("Statistics")],
            },
            ReportBody::RoleGap { analysis, .. } => match analysis {
                Some(analysis) => role_gap_sections(analysis),
                None => vec![insufficient_data("Target Role")],
            },
            ReportBody::BridgeRoles { bridges, .. } => vec![bridge_section(bridges)],
            ReportBody::Estimate { estimate, milestones } => {
                vec![estimate_section(estimate), milestone_section(milestones)]
            }
            ReportBody::Profile { position, .. } => match position {
                Some(position) => profile_sections(position),
                None => vec![insufficient_data("Peers")],
            },
            ReportBody::Switch { assessment } => switch_sections(assessment),
            ReportBody::Skills { skills, .. } => vec![Section {
                title: "Skills".to_string(),
                rows: if skills.is_empty() {
                    vec![Row::note("No vocabulary skills found in matching titles")]
                } else {
                    skills
                        .iter()
                        .map(|s| Row::item(format!("{} ({})", s.skill, s.count)))
                        .collect()
                },
            }],
        }
    }
}

impl Row {
    fn field(label: &str, value: impl Into<String>) -> Self {
        Row::Field {
            label: label.to_string(),
            value: value.into(),
        }
    }

    fn item(text: impl Into<String>) -> Self {
        Row::Item(text.into())
    }

    fn note(text: impl Into<String>) -> Self {
        Row::Note(text.into())
    }
}

pub fn describe_filter(filter: &RoleFilter) -> String {
    match filter {
        RoleFilter::TitleContains(keyword) => format!("titles containing \"{}\"", keyword),
        RoleFilter::CategoryEquals(category) => format!("category \"{}\"", category),
    }
}

/// Whole-dollar amount with thousands separators, e.g. `$12,345`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

fn insufficient_data(title: &str) -> Section {
    Section {
        title: title.to_string(),
        rows: vec![Row::note("Insufficient data: no postings match this query")],
    }
}

fn list_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}

fn value_counts(title: &str, counts: &[ValueCount]) -> Section {
    Section {
        title: title.to_string(),
        rows: counts
            .iter()
            .map(|c| Row::item(format!("{} ({})", c.value, c.count)))
            .collect(),
    }
}

fn overview_sections(overview: &MarketOverview) -> Vec<Section> {
    vec![
        Section {
            title: "Market".to_string(),
            rows: vec![Row::field("Total postings", overview.total_postings.to_string())],
        },
        value_counts("Top Categories", &overview.top_categories),
        Section {
            title: "Experience Required".to_string(),
            rows: overview
                .experience_distribution
                .iter()
                .map(|b| Row::field(&b.label, b.count.to_string()))
                .collect(),
        },
        Section {
            title: "Salary by Experience".to_string(),
            rows: overview
                .salary_by_experience
                .iter()
                .map(|p| {
                    Row::field(
                        &format!("{} years", p.years),
                        format!("{} ({} postings)", format_currency(p.mean_salary), p.count),
                    )
                })
                .collect(),
        },
    ]
}

fn statistics_sections(title: &str, stats: &RoleStatistics) -> Vec<Section> {
    let mut summary = vec![Row::field("Postings", stats.count.to_string())];
    match &stats.salary {
        Some(salary) => {
            summary.push(Row::field("Mean salary", format_currency(salary.mean)));
            summary.push(Row::field("Median salary", format_currency(salary.median)));
            summary.push(Row::field(
                "Salary range",
                format!("{} - {}", format_currency(salary.min), format_currency(salary.max)),
            ));
        }
        None => summary.push(Row::note("No salary data")),
    }
    summary.push(Row::field(
        "Experience",
        format!(
            "mean {:.1}, median {:.1} years (range {}-{})",
            stats.experience.mean, stats.experience.median, stats.experience.min, stats.experience.max
        ),
    ));

    vec![
        Section {
            title: title.to_string(),
            rows: summary,
        },
        value_counts("Top Companies", &stats.top_companies),
        value_counts("Position Levels", &stats.position_levels),
        value_counts("Employment Types", &stats.employment_types),
        value_counts("Job Status", &stats.job_statuses),
    ]
}

fn estimate_section(estimate: &TransitionEstimate) -> Section {
    Section {
        title: "Transition Estimate".to_string(),
        rows: vec![
            Row::field("Skill gaps", estimate.gap_count.to_string()),
            Row::field("Complexity", estimate.tier.to_string()),
            Row::field("Timeline", format!("{} months", estimate.timeline_months)),
            Row::field(
                "Projected salary",
                format!(
                    "{} after {:.1} years",
                    format_currency(estimate.projected_salary),
                    estimate.years_to_target
                ),
            ),
        ],
    }
}

fn milestone_section(milestones: &[SalaryMilestone]) -> Section {
    Section {
        title: "Salary Milestones".to_string(),
        rows: milestones
            .iter()
            .map(|m| Row::field(&m.label, format_currency(m.salary)))
            .collect(),
    }
}

fn bridge_section(bridges: &[BridgeRole]) -> Section {
    let rows = if bridges.is_empty() {
        vec![Row::note("No bridge roles share enough skills with both roles")]
    } else {
        bridges
            .iter()
            .map(|b| {
                Row::item(format!(
                    "{} (shares {} current, {} target skills)",
                    b.title, b.overlap_current, b.overlap_target
                ))
            })
            .collect()
    };
    Section {
        title: "Bridge Roles".to_string(),
        rows,
    }
}

fn role_gap_sections(analysis: &RoleGapAnalysis) -> Vec<Section> {
    let mut skills = vec![
        Row::field("Match", format!("{:.1}%", analysis.comparison.match_percentage)),
        Row::field("You have", list_or_none(&analysis.comparison.overlap)),
        Row::field("To learn", list_or_none(&analysis.comparison.gaps)),
    ];
    for unrecognized in &analysis.unrecognized_skills {
        let note = match &unrecognized.suggestion {
            Some(suggestion) => format!("\"{}\" is not a known skill; did you mean {}?", unrecognized.input, suggestion),
            None => format!("\"{}\" is not a known skill", unrecognized.input),
        };
        skills.push(Row::note(note));
    }

    let mut sections = Vec::new();
    match &analysis.current_statistics {
        Some(stats) => sections.extend(statistics_sections("Current Role", stats).into_iter().take(1)),
        None => sections.push(insufficient_data("Current Role")),
    }
    sections.extend(statistics_sections("Target Role", &analysis.target_statistics).into_iter().take(2));
    sections.push(Section {
        title: "Skills".to_string(),
        rows: skills,
    });
    sections.push(estimate_section(&analysis.estimate));

    if let Some(jump) = &analysis.salary_jump {
        sections.push(Section {
            title: "Salary Jump".to_string(),
            rows: vec![
                Row::field("Difference", format_currency(jump.absolute)),
                Row::field("Change", format!("{:+.1}%", jump.percentage)),
            ],
        });
    }
    sections.push(milestone_section(&analysis.milestones));
    sections.push(bridge_section(&analysis.bridge_roles));
    sections
}

fn profile_sections(position: &ProfilePosition) -> Vec<Section> {
    let salary_rows = match (position.peer_median_salary, position.salary_difference) {
        (Some(median), Some(difference)) => vec![
            Row::field("Peer median salary", format_currency(median)),
            Row::field("Your difference", format_currency(difference)),
        ],
        _ => vec![Row::note("No salary data for peers")],
    };

    let mut rows = vec![Row::field("Openings", position.openings.to_string())];
    rows.extend(salary_rows);
    rows.push(Row::field(
        "Peer median experience",
        format!("{:.1} years", position.peer_median_experience),
    ));
    rows.push(Row::field(
        "Your difference",
        format!("{:+.1} years", position.experience_difference),
    ));
    rows.push(Row::field("Experience level", position.experience_level.to_string()));

    vec![
        Section {
            title: "Position".to_string(),
            rows,
        },
        Section {
            title: "Top Skills in Role".to_string(),
            rows: position
                .top_skills
                .iter()
                .map(|s| Row::item(format!("{} ({})", s.skill, s.count)))
                .collect(),
        },
        Section {
            title: "Your Skills".to_string(),
            rows: vec![
                Row::field("Match", format!("{:.1}%", position.comparison.match_percentage)),
                Row::field("To learn", list_or_none(&position.comparison.gaps)),
            ],
        },
    ]
}

fn switch_sections(assessment: &SwitchAssessment) -> Vec<Section> {
    let mut rows = vec![Row::field("Openings", assessment.openings.to_string())];
    if let Some(salary) = assessment.mean_salary {
        rows.push(Row::field("Mean salary", format_currency(salary)));
    }
    if let Some(years) = assessment.mean_experience {
        rows.push(Row::field("Mean experience", format!("{:.1} years", years)));
    }
    if assessment.openings == 0 {
        rows.push(Row::note("Insufficient data: no postings match this domain"));
    }
    rows.push(Row::field("Difficulty", assessment.difficulty.to_string()));

    vec![
        Section {
            title: "Target Domain".to_string(),
            rows,
        },
        Section {
            title: "Skills".to_string(),
            rows: vec![
                Row::field("Required", list_or_none(&assessment.required_skills)),
                Row::field("Match", format!("{:.1}%", assessment.comparison.match_percentage)),
                Row::field("To learn", list_or_none(&assessment.comparison.gaps)),
                Row::field("Complexity", assessment.tier.to_string()),
                Row::field("Timeline", format!("{} months", assessment.timeline_months)),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::transition::ComplexityTier;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1234.0), "$1,234");
        assert_eq!(format_currency(1234567.0), "$1,234,567");
        assert_eq!(format_currency(-1500.0), "-$1,500");
    }

    #[test]
    fn test_missing_results_render_insufficient_data() {
        let report = Report::new(
            "jobs.csv",
            0,
            ReportBody::Profile {
                role: "Astronaut".to_string(),
                position: None,
            },
        );

        let sections = report.sections();
        assert_eq!(sections.len(), 1);
        assert!(matches!(&sections[0].rows[0], Row::Note(note) if note.starts_with("Insufficient data")));
    }

    #[test]
    fn test_estimate_sections() {
        let report = Report::new(
            "jobs.csv",
            10,
            ReportBody::Estimate {
                estimate: TransitionEstimate {
                    gap_count: 2,
                    tier: ComplexityTier::Medium,
                    timeline_months: 6,
                    current_salary: 5000.0,
                    years_to_target: 0.5,
                    projected_salary: 5975.0,
                },
                milestones: crate::processing::transition::salary_milestones(5000.0),
            },
        );

        let sections = report.sections();
        assert_eq!(report.title(), "Transition Estimate");
        assert_eq!(sections.len(), 2);
        assert!(sections[0].rows.contains(&Row::field("Timeline", "6 months")));
        assert_eq!(sections[1].rows.len(), 4);
    }

    #[test]
    fn test_body_is_tagged_in_json() {
        let report = Report::new(
            "jobs.csv",
            1,
            ReportBody::Skills {
                filter: RoleFilter::title("Analyst"),
                skills: vec![SkillCount {
                    skill: "SQL".to_string(),
                    count: 1,
                }],
            },
        );

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["body"]["kind"], "skills");
        assert_eq!(value["body"]["filter"]["kind"], "title_contains");
        assert_eq!(value["metadata"]["records"], 1);
    }
}
