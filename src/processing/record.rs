//! Normalized job records and the read-only table that holds them

use crate::input::raw_record::{columns, RawRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One job posting after type coercion and default-filling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub minimum_years_experience: u32,
    pub salary_minimum: f64,
    pub salary_maximum: f64,
    pub primary_category: String,
    pub position_level: String,
    pub employment_type: String,
    pub company_name: String,
    pub job_status: String,
}

impl JobRecord {
    /// Midpoint of the salary bounds. Always derived, never stored.
    pub fn average_salary(&self) -> f64 {
        (self.salary_minimum + self.salary_maximum) / 2.0
    }

    /// True when neither salary bound was provided
    pub fn has_zero_salary(&self) -> bool {
        self.salary_minimum == 0.0 && self.salary_maximum == 0.0
    }

    /// Re-encode as a raw row in the dataset's own column layout
    pub fn to_raw(&self) -> RawRecord {
        let categories = serde_json::json!([{ "category": self.primary_category }]).to_string();

        RawRecord::new()
            .with_field(columns::TITLE, self.title.as_str())
            .with_field(
                columns::MINIMUM_YEARS_EXPERIENCE,
                self.minimum_years_experience.to_string(),
            )
            .with_field(columns::SALARY_MINIMUM, self.salary_minimum.to_string())
            .with_field(columns::SALARY_MAXIMUM, self.salary_maximum.to_string())
            .with_field(columns::CATEGORIES, categories)
            .with_field(columns::POSITION_LEVELS, self.position_level.as_str())
            .with_field(columns::EMPLOYMENT_TYPES, self.employment_type.as_str())
            .with_field(columns::COMPANY_NAME, self.company_name.as_str())
            .with_field(columns::JOB_STATUS, self.job_status.as_str())
    }
}

/// Predicate selecting the records a statistic is computed over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RoleFilter {
    /// Case-insensitive substring match against the title
    TitleContains(String),
    /// Exact match against the primary category
    CategoryEquals(String),
}

impl RoleFilter {
    pub fn title(keyword: impl Into<String>) -> Self {
        RoleFilter::TitleContains(keyword.into())
    }

    pub fn category(category: impl Into<String>) -> Self {
        RoleFilter::CategoryEquals(category.into())
    }

    pub fn matches(&self, record: &JobRecord) -> bool {
        match self {
            RoleFilter::TitleContains(keyword) => {
                record.title.to_lowercase().contains(&keyword.to_lowercase())
            }
            RoleFilter::CategoryEquals(category) => record.primary_category == *category,
        }
    }
}

/// The normalized dataset. Built once per session and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTable {
    records: Vec<JobRecord>,
}

impl JobTable {
    pub fn new(records: Vec<JobRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobRecord> {
        self.records.iter()
    }

    /// Records matching the filter, in dataset order
    pub fn filter(&self, filter: &RoleFilter) -> Vec<&JobRecord> {
        match filter {
            RoleFilter::TitleContains(keyword) => {
                let needle = keyword.to_lowercase();
                self.records
                    .iter()
                    .filter(|r| r.title.to_lowercase().contains(&needle))
                    .collect()
            }
            RoleFilter::CategoryEquals(_) => {
                self.records.iter().filter(|r| filter.matches(r)).collect()
            }
        }
    }

    /// Titles of the first `limit` records whose title contains `keyword`
    pub fn titles_matching(&self, keyword: &str, limit: usize) -> Vec<&str> {
        self.filter(&RoleFilter::title(keyword))
            .into_iter()
            .take(limit)
            .map(|r| r.title.as_str())
            .collect()
    }

    /// Titles of the first `limit` records in `category`
    pub fn titles_in_category(&self, category: &str, limit: usize) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.primary_category == category)
            .take(limit)
            .map(|r| r.title.as_str())
            .collect()
    }

    /// Distinct titles in order of first appearance
    pub fn distinct_titles(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.title.as_str())
            .filter(|title| seen.insert(*title))
            .collect()
    }

    /// Distinct primary categories in order of first appearance
    pub fn distinct_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.primary_category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }
}

impl FromIterator<JobRecord> for JobTable {
    fn from_iter<I: IntoIterator<Item = JobRecord>>(iter: I) -> Self {
        JobTable::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn job(title: &str, category: &str, years: u32, min: f64, max: f64) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            minimum_years_experience: years,
            salary_minimum: min,
            salary_maximum: max,
            primary_category: category.to_string(),
            position_level: "Executive".to_string(),
            employment_type: "Full Time".to_string(),
            company_name: "Acme Pte Ltd".to_string(),
            job_status: "Open".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::job;
    use super::*;

    fn sample_table() -> JobTable {
        vec![
            job("QA Engineer", "Engineering", 2, 3000.0, 5000.0),
            job("Senior QA Engineer", "Engineering", 5, 5000.0, 7000.0),
            job("Data Analyst", "Information Technology", 1, 3500.0, 4500.0),
            job("QA Engineer", "Engineering", 3, 3200.0, 5200.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_average_salary_is_derived() {
        let record = job("Developer", "IT", 0, 4000.0, 6000.0);
        assert_eq!(record.average_salary(), 5000.0);

        let unpaid = job("Volunteer", "IT", 0, 0.0, 0.0);
        assert_eq!(unpaid.average_salary(), 0.0);
        assert!(unpaid.has_zero_salary());
    }

    #[test]
    fn test_title_filter_is_case_insensitive() {
        let table = sample_table();
        let matches = table.filter(&RoleFilter::title("qa engineer"));
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let table = sample_table();
        assert_eq!(table.filter(&RoleFilter::category("Engineering")).len(), 3);
        assert_eq!(table.filter(&RoleFilter::category("engineering")).len(), 0);
    }

    #[test]
    fn test_distinct_titles_keep_first_appearance_order() {
        let table = sample_table();
        assert_eq!(
            table.distinct_titles(),
            vec!["QA Engineer", "Senior QA Engineer", "Data Analyst"]
        );
    }

    #[test]
    fn test_titles_matching_respects_limit() {
        let table = sample_table();
        assert_eq!(table.titles_matching("QA", 2), vec!["QA Engineer", "Senior QA Engineer"]);
        assert_eq!(table.titles_in_category("Engineering", 10).len(), 3);
    }
}
