//! Career gap analyzer library: job-market statistics, skill gaps, and
//! transition estimates over a normalized job-posting dataset

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{CareerGapError, Result};
pub use input::DatasetManager;
pub use processing::analyzer::CareerAnalyzer;
pub use processing::match_engine::{identify_gaps, match_percentage};
pub use processing::normalizer::RecordNormalizer;
pub use processing::path_finder::StepwisePathFinder;
pub use processing::record::{JobRecord, JobTable, RoleFilter};
pub use processing::skill_extractor::SkillExtractor;
pub use processing::transition::TransitionEstimator;
