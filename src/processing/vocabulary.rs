//! Categorized skill vocabulary

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strsim::jaro_winkler;

/// A named group of canonical skill tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

impl SkillCategory {
    pub fn new(name: &str, skills: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Immutable skill vocabulary. Lookups are case-insensitive; output keeps the
/// canonical casing of the first occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillVocabulary {
    categories: Vec<SkillCategory>,
    skills: Vec<String>,
    skill_category: Vec<usize>,
    index: HashMap<String, usize>,
}

static BUILTIN: Lazy<SkillVocabulary> = Lazy::new(|| SkillVocabulary::new(builtin_categories()));

impl SkillVocabulary {
    /// Build a vocabulary. Blank tags are dropped and a tag listed more than
    /// once (in any casing) keeps its first spelling and category.
    pub fn new(categories: Vec<SkillCategory>) -> Self {
        let mut skills = Vec::new();
        let mut skill_category = Vec::new();
        let mut index = HashMap::new();

        for (category_idx, category) in categories.iter().enumerate() {
            for skill in &category.skills {
                let skill = skill.trim();
                if skill.is_empty() {
                    continue;
                }
                let key = skill.to_lowercase();
                if index.contains_key(&key) {
                    continue;
                }
                index.insert(key, skills.len());
                skills.push(skill.to_string());
                skill_category.push(category_idx);
            }
        }

        Self {
            categories,
            skills,
            skill_category,
            index,
        }
    }

    /// The process-wide built-in vocabulary
    pub fn builtin() -> &'static SkillVocabulary {
        &BUILTIN
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    /// Flattened, de-duplicated canonical tags
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.index.contains_key(&skill.trim().to_lowercase())
    }

    /// Canonical casing of a tag, if it is in the vocabulary
    pub fn canonicalize(&self, skill: &str) -> Option<&str> {
        self.index
            .get(&skill.trim().to_lowercase())
            .map(|&i| self.skills[i].as_str())
    }

    /// Category name a tag belongs to
    pub fn category_of(&self, skill: &str) -> Option<&str> {
        self.index
            .get(&skill.trim().to_lowercase())
            .map(|&i| self.categories[self.skill_category[i]].name.as_str())
    }

    /// Closest tag by Jaro-Winkler similarity, if any reaches `threshold`
    pub fn suggest(&self, skill: &str, threshold: f64) -> Option<&str> {
        let needle = skill.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let mut best: Option<(f64, &str)> = None;
        for candidate in &self.skills {
            let score = jaro_winkler(&needle, &candidate.to_lowercase());
            if score >= threshold && best.map_or(true, |(b, _)| score > b) {
                best = Some((score, candidate.as_str()));
            }
        }
        best.map(|(_, s)| s)
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        SkillVocabulary::builtin().clone()
    }
}

fn builtin_categories() -> Vec<SkillCategory> {
    vec![
        SkillCategory::new(
            "Programming Languages",
            &[
                "Python", "Java", "C++", "C#", "JavaScript", "TypeScript", "Ruby", "PHP", "Swift",
                "Kotlin", "Go", "Rust",
            ],
        ),
        SkillCategory::new(
            "Web Technologies",
            &[
                "React", "Vue.js", "Angular", "Node.js", "Django", "Flask", "Spring Boot",
                "ASP.NET", "Express.js", "Next.js",
            ],
        ),
        SkillCategory::new(
            "Database & Data",
            &[
                "SQL", "PostgreSQL", "MySQL", "MongoDB", "Redis", "Elasticsearch", "Oracle",
                "Cassandra", "Data Science", "Data Analysis", "Analytics", "Tableau", "Power BI",
            ],
        ),
        SkillCategory::new(
            "Cloud & DevOps",
            &[
                "AWS", "Azure", "GCP", "Docker", "Kubernetes", "CI/CD", "Jenkins", "GitLab",
                "GitHub", "DevOps", "Infrastructure as Code", "Terraform", "Ansible",
            ],
        ),
        SkillCategory::new(
            "Machine Learning & AI",
            &[
                "Machine Learning", "Deep Learning", "AI", "TensorFlow", "PyTorch", "NLP",
                "Computer Vision", "Scikit-learn",
            ],
        ),
        SkillCategory::new(
            "Methods & Frameworks",
            &["Agile", "Scrum", "Kanban", "Waterfall", "REST API", "GraphQL", "Microservices"],
        ),
        SkillCategory::new(
            "Leadership & Management",
            &[
                "Leadership", "Management", "Team Lead", "Technical Lead", "Project Management",
                "Product Management", "Mentoring",
            ],
        ),
        SkillCategory::new(
            "Quality & Testing",
            &[
                "QA", "SDET", "Test Automation", "Selenium", "Pytest", "Unit Testing",
                "Integration Testing", "Regression Testing",
            ],
        ),
        SkillCategory::new(
            "Systems & Architecture",
            &[
                "System Design", "Microservices", "Architecture", "Distributed Systems",
                "High Availability", "Scalability",
            ],
        ),
        SkillCategory::new(
            "Soft Skills",
            &[
                "Communication", "Problem Solving", "Critical Thinking", "Collaboration",
                "Presentation", "Negotiation", "Adaptability",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_vocabulary() {
        let vocab = SkillVocabulary::builtin();
        assert_eq!(vocab.categories().len(), 10);
        // "Microservices" is listed twice and kept once
        assert_eq!(
            vocab.skills().iter().filter(|s| s.as_str() == "Microservices").count(),
            1
        );
        assert_eq!(vocab.category_of("microservices"), Some("Methods & Frameworks"));
    }

    #[test]
    fn test_canonicalize_is_case_insensitive() {
        let vocab = SkillVocabulary::builtin();
        assert_eq!(vocab.canonicalize("python"), Some("Python"));
        assert_eq!(vocab.canonicalize("  KUBERNETES "), Some("Kubernetes"));
        assert_eq!(vocab.canonicalize("Cobol"), None);
        assert!(vocab.contains("power bi"));
    }

    #[test]
    fn test_suggest_closest_skill() {
        let vocab = SkillVocabulary::builtin();
        assert_eq!(vocab.suggest("Kubernets", 0.85), Some("Kubernetes"));
        assert_eq!(vocab.suggest("Pythn", 0.85), Some("Python"));
        assert_eq!(vocab.suggest("zzzz", 0.85), None);
        assert_eq!(vocab.suggest("", 0.0), None);
    }

    #[test]
    fn test_custom_vocabulary_drops_blank_and_duplicate_tags() {
        let vocab = SkillVocabulary::new(vec![
            SkillCategory::new("A", &["Rust", " ", "rust"]),
            SkillCategory::new("B", &["RUST", "Go"]),
        ]);
        assert_eq!(vocab.skills(), &["Rust".to_string(), "Go".to_string()]);
        assert_eq!(vocab.category_of("rust"), Some("A"));
        assert_eq!(vocab.category_of("go"), Some("B"));
    }
}
