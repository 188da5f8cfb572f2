//! CLI interface for the career gap analyzer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "career-gap")]
#[command(about = "Job-market analytics and career transition planning")]
#[command(long_about = "Analyze a job-posting dataset: market statistics, skill gaps between roles, transition timelines, salary projections, and bridge roles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Job-posting CSV dataset (overrides the configured path)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Output format: console, json, markdown
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(short, long, global = true)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Market overview: categories, experience, salary by experience
    Overview,

    /// Statistics for titles containing a keyword
    Role {
        /// Title keyword, matched case-insensitively
        keyword: String,
    },

    /// Statistics for one industry category
    Category {
        /// Category name, matched exactly
        name: String,
    },

    /// Skill gap and transition plan between two roles
    Gap {
        /// Current role keyword
        #[arg(long)]
        from: String,

        /// Target role keyword
        #[arg(long)]
        to: String,

        /// Your skills, comma separated
        #[arg(long, default_value = "")]
        skills: String,

        /// Current monthly salary
        #[arg(long, default_value_t = 0.0)]
        salary: f64,

        /// Years over which to project salary growth
        #[arg(long)]
        years: Option<f64>,
    },

    /// Bridge roles sharing skills with both the current and target role
    Path {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        /// Maximum bridge roles to return
        #[arg(long)]
        max: Option<usize>,

        /// Scan every distinct title instead of the configured prefix
        #[arg(long)]
        full_scan: bool,
    },

    /// Timeline and salary estimate for a number of skill gaps
    Estimate {
        /// Number of skills to learn
        #[arg(long)]
        gaps: usize,

        /// Complexity tier: low, medium, high
        #[arg(long, default_value = "medium")]
        tier: String,

        #[arg(long, default_value_t = 0.0)]
        salary: f64,

        #[arg(long)]
        years: Option<f64>,
    },

    /// Compare yourself with peers in your role
    Profile {
        #[arg(long)]
        role: String,

        /// Years of experience
        #[arg(long)]
        experience: f64,

        #[arg(long, default_value_t = 0.0)]
        salary: f64,

        #[arg(long, default_value = "")]
        skills: String,
    },

    /// Assess switching into a new domain
    Switch {
        /// Target industry category
        #[arg(long, conflicts_with = "role", required_unless_present = "role")]
        category: Option<String>,

        /// Target role keyword
        #[arg(long)]
        role: Option<String>,

        /// Years spent in your current field
        #[arg(long)]
        years: f64,

        #[arg(long, default_value = "")]
        skills: String,
    },

    /// Most frequent skills for a role or category
    Skills {
        /// Role keyword
        #[arg(long, conflicts_with = "category", required_unless_present = "category")]
        role: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Split a comma-separated skill list, dropping blanks
pub fn parse_skill_list(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
