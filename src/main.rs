//! Career gap analyzer: job-market analytics and career transition planning

use anyhow::Context;
use career_gap::cli::{self, Cli, Commands, ConfigAction};
use career_gap::config::Config;
use career_gap::error::CareerGapError;
use career_gap::input::DatasetManager;
use career_gap::output::formatter::{save_report_to_file, ReportGenerator};
use career_gap::output::report::{Report, ReportBody};
use career_gap::processing::analyzer::{CareerAnalyzer, ProfileRequest, RoleGapRequest, SwitchRequest};
use career_gap::processing::path_finder::PathFinderOptions;
use career_gap::processing::record::RoleFilter;
use career_gap::processing::transition::{salary_milestones, ComplexityTier};
use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli) {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // config subcommands run before loading so a broken file can be reset
    if let Commands::Config { action } = &cli.command {
        return run_config(action.as_ref(), &config_path);
    }

    let config = load_config(&config_path)?;

    let format = match &cli.output {
        Some(output) => cli::parse_output_format(output).map_err(CareerGapError::InvalidInput)?,
        None => config.output.format,
    };

    let dataset_path = cli.data.clone().unwrap_or_else(|| config.data.dataset_path.clone());
    let mut datasets = DatasetManager::new()
        .with_cache(config.data.enable_caching)
        .with_ttl(Duration::from_secs(config.data.cache_ttl_secs));
    let table = datasets
        .load(&dataset_path)
        .with_context(|| format!("Failed to load dataset {}", dataset_path.display()))?;

    if table.is_empty() {
        return Err(CareerGapError::Dataset(format!("No usable records in {}", dataset_path.display())).into());
    }

    let records = table.len();
    let analyzer = CareerAnalyzer::new(Arc::clone(&table), &config)?;
    let body = build_report_body(cli.command, &analyzer)?;
    let report = Report::new(dataset_path.display().to_string(), records, body);

    let generator = ReportGenerator::with_options(config.output.color_output, true, true);
    let content = generator.generate_report(&report, &format)?;

    match &cli.save {
        Some(path) => {
            // saved files never carry terminal color codes
            let plain = ReportGenerator::with_options(false, true, true).generate_report(&report, &format)?;
            save_report_to_file(&plain, path)?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

fn build_report_body(command: Commands, analyzer: &CareerAnalyzer) -> career_gap::Result<ReportBody> {
    let body = match command {
        Commands::Overview => ReportBody::MarketOverview {
            overview: analyzer.market_overview(),
        },

        Commands::Role { keyword } => ReportBody::Statistics {
            statistics: analyzer.role_statistics(&keyword),
            filter: RoleFilter::title(keyword),
        },

        Commands::Category { name } => ReportBody::Statistics {
            statistics: analyzer.category_statistics(&name),
            filter: RoleFilter::category(name),
        },

        Commands::Gap { from, to, skills, salary, years } => {
            info!("Analyzing gap from '{}' to '{}'", from, to);
            let request = RoleGapRequest {
                current_role: from.clone(),
                target_role: to.clone(),
                user_skills: cli::parse_skill_list(&skills),
                current_salary: salary,
                years_to_target: years,
            };
            ReportBody::RoleGap {
                analysis: analyzer.role_gap_analysis(&request),
                current_role: from,
                target_role: to,
            }
        }

        Commands::Path { from, to, max, full_scan } => {
            let defaults = analyzer.path_finder_options().clone();
            let options = PathFinderOptions {
                max_gaps: max.unwrap_or(defaults.max_gaps),
                scan_limit: if full_scan { None } else { defaults.scan_limit },
                ..defaults
            };
            ReportBody::BridgeRoles {
                bridges: analyzer.bridge_roles_with(&from, &to, options),
                current_role: from,
                target_role: to,
            }
        }

        Commands::Estimate { gaps, tier, salary, years } => {
            let tier: ComplexityTier = tier.parse()?;
            ReportBody::Estimate {
                estimate: analyzer.estimator().estimate(gaps, tier, salary, years),
                milestones: salary_milestones(salary),
            }
        }

        Commands::Profile { role, experience, salary, skills } => {
            let request = ProfileRequest {
                role: role.clone(),
                years_experience: experience,
                current_salary: salary,
                user_skills: cli::parse_skill_list(&skills),
            };
            ReportBody::Profile {
                position: analyzer.profile_position(&request),
                role,
            }
        }

        Commands::Switch { category, role, years, skills } => {
            let target = match (category, role) {
                (Some(category), _) => RoleFilter::category(category),
                (None, Some(role)) => RoleFilter::title(role),
                (None, None) => {
                    return Err(CareerGapError::InvalidInput("switch needs --category or --role".to_string()))
                }
            };
            let request = SwitchRequest {
                target,
                years_in_field: years,
                user_skills: cli::parse_skill_list(&skills),
            };
            ReportBody::Switch {
                assessment: analyzer.switch_assessment(&request),
            }
        }

        Commands::Skills { role, category } => match (role, category) {
            (Some(role), _) => ReportBody::Skills {
                skills: analyzer.skills_for_role(&role),
                filter: RoleFilter::title(role),
            },
            (None, Some(category)) => ReportBody::Skills {
                skills: analyzer.skills_for_category(&category),
                filter: RoleFilter::category(category),
            },
            (None, None) => {
                return Err(CareerGapError::InvalidInput("skills needs --role or --category".to_string()))
            }
        },

        Commands::Config { .. } => {
            return Err(CareerGapError::InvalidInput("config is handled before loading data".to_string()))
        }
    };

    Ok(body)
}

fn load_config(config_path: &Path) -> anyhow::Result<Config> {
    Config::load_from(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
}

fn run_config(action: Option<&ConfigAction>, config_path: &Path) -> anyhow::Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let config = load_config(config_path)?;
            let content = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
            println!("# {}\n{}", config_path.display(), content);
        }
        Some(ConfigAction::Path) => {
            println!("{}", config_path.display());
        }
        Some(ConfigAction::Reset) => {
            Config::default().save_to(config_path)?;
            info!("Configuration reset: {}", config_path.display());
        }
    }
    Ok(())
}
