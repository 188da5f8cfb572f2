//! Heuristic search for bridge roles between a current and a target role
//!
//! This is an approximation, not a shortest-path search: there are no weighted
//! edges and no transitive steps. A candidate title qualifies when its extracted
//! skills overlap the sampled skills of both roles by more than one tag.

use crate::processing::record::JobTable;
use crate::processing::skill_extractor::{SkillExtractor, SkillSet};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathFinderOptions {
    /// Matching titles sampled per role to build its skill profile
    pub sample_titles: usize,
    /// Prefix of the distinct-title list scanned for candidates; `None` scans all
    pub scan_limit: Option<usize>,
    /// Maximum number of bridge roles returned
    pub max_gaps: usize,
}

impl Default for PathFinderOptions {
    fn default() -> Self {
        Self {
            sample_titles: 10,
            scan_limit: Some(500),
            max_gaps: 3,
        }
    }
}

/// An intermediate title sharing skills with both ends of a transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRole {
    pub title: String,
    pub overlap_current: usize,
    pub overlap_target: usize,
}

impl BridgeRole {
    pub fn total_overlap(&self) -> usize {
        self.overlap_current + self.overlap_target
    }
}

pub struct StepwisePathFinder<'a> {
    table: &'a JobTable,
    extractor: &'a SkillExtractor,
    options: PathFinderOptions,
}

impl<'a> StepwisePathFinder<'a> {
    pub fn new(table: &'a JobTable, extractor: &'a SkillExtractor, options: PathFinderOptions) -> Self {
        Self {
            table,
            extractor,
            options,
        }
    }

    /// Up to `max_gaps` bridge roles, best total overlap first. Equal totals
    /// keep scan order.
    pub fn find_stepping_stones(&self, current_role: &str, target_role: &str) -> Vec<BridgeRole> {
        let current_sample = self.sample_skills(current_role);
        let target_sample = self.sample_skills(target_role);

        if current_sample.len() < 2 || target_sample.len() < 2 {
            debug!(
                "Too few sampled skills for '{}' ({}) or '{}' ({})",
                current_role,
                current_sample.len(),
                target_role,
                target_sample.len()
            );
            return Vec::new();
        }

        let titles = self.table.distinct_titles();
        let scan = self.options.scan_limit.unwrap_or(titles.len()).min(titles.len());

        let mut candidates: Vec<BridgeRole> = titles[..scan]
            .iter()
            .filter_map(|title| {
                let skills = self.extractor.extract(*title);
                let overlap_current = skills.intersection(&current_sample).count();
                let overlap_target = skills.intersection(&target_sample).count();

                (overlap_current > 1 && overlap_target > 1).then(|| BridgeRole {
                    title: title.to_string(),
                    overlap_current,
                    overlap_target,
                })
            })
            .collect();

        debug!("{} bridge candidates in {} scanned titles", candidates.len(), scan);

        // sort_by is stable, so ties stay in scan order
        candidates.sort_by(|a, b| b.total_overlap().cmp(&a.total_overlap()));
        candidates.truncate(self.options.max_gaps);
        candidates
    }

    /// Union of skills in the first `sample_titles` titles containing `role`
    fn sample_skills(&self, role: &str) -> SkillSet {
        let titles = self.table.titles_matching(role, self.options.sample_titles);
        self.extractor.extract_all(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::record::test_support::job;

    fn table() -> JobTable {
        [
            "QA Engineer (Selenium, Python, SQL)",
            "Data Scientist - Python, SQL, Machine Learning",
            "Python SQL Test Automation Engineer",
            "Selenium Python Data Analysis Engineer",
            "Python SQL Machine Learning Analyst",
            "Office Administrator",
            "QA Engineer (Selenium, Python, SQL)",
        ]
        .iter()
        .map(|t| job(t, "Engineering", 2, 3000.0, 5000.0))
        .collect()
    }

    #[test]
    fn test_finds_bridges_ranked_by_total_overlap() {
        let table = table();
        let extractor = SkillExtractor::builtin().unwrap();
        let finder = StepwisePathFinder::new(&table, &extractor, PathFinderOptions::default());

        let bridges = finder.find_stepping_stones("QA Engineer", "Data Scientist");

        assert!(!bridges.is_empty());
        assert!(bridges.len() <= 3);
        for bridge in &bridges {
            assert!(bridge.overlap_current > 1);
            assert!(bridge.overlap_target > 1);
        }
        for pair in bridges.windows(2) {
            assert!(pair[0].total_overlap() >= pair[1].total_overlap());
        }
        assert!(!bridges.iter().any(|b| b.title == "Office Administrator"));
    }

    #[test]
    fn test_respects_max_gaps() {
        let table = table();
        let extractor = SkillExtractor::builtin().unwrap();
        let options = PathFinderOptions {
            max_gaps: 1,
            ..PathFinderOptions::default()
        };
        let finder = StepwisePathFinder::new(&table, &extractor, options);

        assert_eq!(finder.find_stepping_stones("QA Engineer", "Data Scientist").len(), 1);
    }

    #[test]
    fn test_ties_keep_scan_order() {
        let table: JobTable = ["Python SQL Developer", "SQL Python Engineer", "Python SQL Lead"]
            .iter()
            .map(|t| job(t, "IT", 1, 0.0, 0.0))
            .collect();
        let extractor = SkillExtractor::builtin().unwrap();
        let finder = StepwisePathFinder::new(&table, &extractor, PathFinderOptions::default());

        let bridges = finder.find_stepping_stones("Developer", "Lead");
        let titles: Vec<&str> = bridges.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Python SQL Developer", "SQL Python Engineer", "Python SQL Lead"]);
    }

    #[test]
    fn test_scan_limit_bounds_candidates() {
        let table = table();
        let extractor = SkillExtractor::builtin().unwrap();
        let options = PathFinderOptions {
            scan_limit: Some(1),
            max_gaps: 10,
            ..PathFinderOptions::default()
        };
        let finder = StepwisePathFinder::new(&table, &extractor, options);

        let bridges = finder.find_stepping_stones("QA Engineer", "Data Scientist");
        assert!(bridges.len() <= 1);
    }

    #[test]
    fn test_unknown_roles_yield_nothing() {
        let table = table();
        let extractor = SkillExtractor::builtin().unwrap();
        let finder = StepwisePathFinder::new(&table, &extractor, PathFinderOptions::default());

        assert!(finder.find_stepping_stones("Astronaut", "Data Scientist").is_empty());
        assert!(finder.find_stepping_stones("QA Engineer", "Astronaut").is_empty());
    }
}
