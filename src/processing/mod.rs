//! Analytics core: normalization, skill matching, statistics, and transition estimates

pub mod analyzer;
pub mod market_stats;
pub mod match_engine;
pub mod normalizer;
pub mod path_finder;
pub mod record;
pub mod skill_extractor;
pub mod transition;
pub mod vocabulary;
