//! Skill-set comparison: match percentage, overlap, and gaps

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Overlap and gaps of a user's skills against a target skill set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillComparison {
    /// Target skills the user already has, in the target's casing
    pub overlap: Vec<String>,
    /// Target skills the user is missing, in the target's casing
    pub gaps: Vec<String>,
    pub match_percentage: f64,
}

/// Percentage of `job_skills` covered by `user_skills`, rounded to one decimal.
///
/// Comparison is case-insensitive on trimmed tags. A job with no listed skills
/// is a full match. A blank tag is an ordinary skill the user can lack.
pub fn match_percentage<U, J>(user_skills: U, job_skills: J) -> f64
where
    U: IntoIterator,
    U::Item: AsRef<str>,
    J: IntoIterator,
    J::Item: AsRef<str>,
{
    let user = lowercase_set(user_skills);
    let job = lowercase_set(job_skills);

    if job.is_empty() {
        return 100.0;
    }

    let matches = job.intersection(&user).count();
    round_one_decimal(matches as f64 / job.len() as f64 * 100.0)
}

/// Target skills absent from the user's skills, case-insensitively.
///
/// Gaps are ordered by their lowercase form, so `["b", "C", "a"]` comes back as
/// `["a", "b", "C"]`. Each gap keeps the casing it first had in `target_skills`.
pub fn identify_gaps<U, T>(user_skills: U, target_skills: T) -> Vec<String>
where
    U: IntoIterator,
    U::Item: AsRef<str>,
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let user = lowercase_set(user_skills);
    canonical_targets(target_skills)
        .into_iter()
        .filter(|(key, _)| !user.contains(key))
        .map(|(_, skill)| skill)
        .collect()
}

/// Full comparison of user skills against a target set. Overlap and gaps use
/// the same ordering and casing as [`identify_gaps`].
pub fn compare<U, T>(user_skills: U, target_skills: T) -> SkillComparison
where
    U: IntoIterator,
    U::Item: AsRef<str>,
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let user = lowercase_set(user_skills);
    let targets = canonical_targets(target_skills);

    let (overlap, gaps): (Vec<_>, Vec<_>) =
        targets.into_iter().partition(|(key, _)| user.contains(key));

    let match_percentage = if overlap.is_empty() && gaps.is_empty() {
        100.0
    } else {
        round_one_decimal(overlap.len() as f64 / (overlap.len() + gaps.len()) as f64 * 100.0)
    };

    SkillComparison {
        overlap: overlap.into_iter().map(|(_, s)| s).collect(),
        gaps: gaps.into_iter().map(|(_, s)| s).collect(),
        match_percentage,
    }
}

fn lowercase_set<I>(skills: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    skills
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .collect()
}

// lowercase key -> first-seen spelling, ordered by key
fn canonical_targets<I>(skills: I) -> BTreeMap<String, String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut targets = BTreeMap::new();
    for skill in skills {
        let skill = skill.as_ref().trim();
        targets
            .entry(skill.to_lowercase())
            .or_insert_with(|| skill.to_string());
    }
    targets
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_empty_user_skills() {
        assert_eq!(match_percentage(NONE, ["Python", "SQL"]), 0.0);
        assert_eq!(match_percentage(NONE, NONE), 100.0);
    }

    #[test]
    fn test_empty_job_skills_is_full_match() {
        assert_eq!(match_percentage(["Python"], NONE), 100.0);
    }

    #[test]
    fn test_match_percentage_is_case_insensitive_and_rounded() {
        assert_eq!(match_percentage(["python", "SQL"], ["Python", "sql", "AWS"]), 66.7);
        assert_eq!(match_percentage(["Python"], ["python", "PYTHON"]), 100.0);
        assert_eq!(match_percentage(["Docker"], ["AWS", "Azure", "GCP"]), 0.0);
    }

    #[test]
    fn test_identify_gaps_sorted() {
        let gaps = identify_gaps(["python"], ["SQL", "Python", "AWS", "Docker"]);
        assert_eq!(gaps, vec!["AWS", "Docker", "SQL"]);
    }

    #[test]
    fn test_gaps_ordered_by_lowercase_form() {
        assert_eq!(identify_gaps(NONE, ["b", "C", "a"]), vec!["a", "b", "C"]);
        assert_eq!(identify_gaps(["A"], ["sql", "Aws", "a", "Docker"]), vec!["Aws", "Docker", "sql"]);

        let comparison = compare(["c"], ["b", "C", "a"]);
        assert_eq!(comparison.overlap, vec!["C"]);
        assert_eq!(comparison.gaps, vec!["a", "b"]);
    }

    #[test]
    fn test_blank_job_skill_is_not_a_full_match() {
        assert_eq!(match_percentage(NONE, [" "]), 0.0);
        assert_eq!(match_percentage([""], [" "]), 100.0);
        assert_eq!(match_percentage(["Python"], ["Python", "  "]), 50.0);

        let comparison = compare(NONE, [" "]);
        assert_eq!(comparison.gaps, vec![""]);
        assert_eq!(comparison.match_percentage, 0.0);
    }

    #[test]
    fn test_gaps_plus_overlap_reconstruct_target() {
        let user = ["Python", "communication", "Excel"];
        let target = ["Python", "SQL", "Communication", "Tableau"];

        let gaps = identify_gaps(user, target);
        let user_lower: HashSet<String> = user.iter().map(|s| s.to_lowercase()).collect();
        let overlap: Vec<String> = target
            .iter()
            .filter(|t| user_lower.contains(&t.to_lowercase()))
            .map(|t| t.to_string())
            .collect();

        let mut rebuilt: Vec<String> = gaps.iter().chain(overlap.iter()).map(|s| s.to_lowercase()).collect();
        rebuilt.sort();
        let mut expected: Vec<String> = target.iter().map(|s| s.to_lowercase()).collect();
        expected.sort();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_compare() {
        let comparison = compare(["sql", "Leadership"], ["SQL", "Python", "Leadership", "AWS"]);

        assert_eq!(comparison.overlap, vec!["Leadership", "SQL"]);
        assert_eq!(comparison.gaps, vec!["AWS", "Python"]);
        assert_eq!(comparison.match_percentage, 50.0);
        assert_eq!(
            comparison.match_percentage,
            match_percentage(["sql", "Leadership"], ["SQL", "Python", "Leadership", "AWS"])
        );
    }

    #[test]
    fn test_compare_empty_target() {
        let comparison = compare(["Python"], NONE);
        assert!(comparison.overlap.is_empty());
        assert!(comparison.gaps.is_empty());
        assert_eq!(comparison.match_percentage, 100.0);
    }
}
