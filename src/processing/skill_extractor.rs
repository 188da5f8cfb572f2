//! Keyword-based skill extraction from free text
//!
//! A tag matches when the uppercased text contains the uppercased tag as a
//! contiguous substring. There is no word-boundary check, so short tags
//! over-match: "Go" is found in "Google", "AI" in "Maintenance", "Java" in
//! "JavaScript". Downstream statistics depend on this behavior.

use crate::error::{CareerGapError, Result};
use crate::processing::vocabulary::SkillVocabulary;
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A set of canonical skill tags
pub type SkillSet = BTreeSet<String>;

/// How often a skill was extracted across a batch of texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

pub struct SkillExtractor {
    matcher: AhoCorasick,
    skills: Vec<String>,
}

impl SkillExtractor {
    /// Build an extractor over the given vocabulary
    pub fn new(vocabulary: &SkillVocabulary) -> Result<Self> {
        let skills = vocabulary.skills().to_vec();
        let patterns: Vec<String> = skills.iter().map(|s| s.to_uppercase()).collect();

        // Overlapping search needs the standard match semantics.
        let matcher = AhoCorasick::builder()
            .match_kind(aho_corasick::MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| {
                CareerGapError::AnalysisFailed(format!("Failed to build skill matcher: {}", e))
            })?;

        Ok(Self { matcher, skills })
    }

    /// Extractor over the built-in vocabulary
    pub fn builtin() -> Result<Self> {
        Self::new(SkillVocabulary::builtin())
    }

    /// Skills mentioned in `text`. Absent text yields an empty set.
    pub fn extract<'a>(&self, text: impl Into<Option<&'a str>>) -> SkillSet {
        let Some(text) = text.into() else {
            return SkillSet::new();
        };

        let upper = text.to_uppercase();
        self.matcher
            .find_overlapping_iter(&upper)
            .map(|mat| self.skills[mat.pattern().as_usize()].clone())
            .collect()
    }

    /// Union of the skills found in each text
    pub fn extract_all<'a, I>(&self, texts: I) -> SkillSet
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts.into_iter().flat_map(|t| self.extract(t)).collect()
    }

    /// Count, per skill, how many texts mention it. Sorted by count
    /// descending, then by skill name.
    pub fn skill_frequencies<'a, I>(&self, texts: I) -> Vec<SkillCount>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for text in texts {
            for skill in self.extract(text) {
                *counts.entry(skill).or_insert(0) += 1;
            }
        }

        let mut frequencies: Vec<SkillCount> = counts
            .into_iter()
            .map(|(skill, count)| SkillCount { skill, count })
            .collect();
        frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.skill.cmp(&b.skill)));
        frequencies
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}
