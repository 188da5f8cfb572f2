//! Raw tabular records as they arrive from the dataset

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column names of the job-posting dataset
pub mod columns {
    pub const TITLE: &str = "title";
    pub const MINIMUM_YEARS_EXPERIENCE: &str = "minimumYearsExperience";
    pub const SALARY_MINIMUM: &str = "salary_minimum";
    pub const SALARY_MAXIMUM: &str = "salary_maximum";
    pub const CATEGORIES: &str = "categories";
    pub const POSITION_LEVELS: &str = "positionLevels";
    pub const COMPANY_NAME: &str = "postedCompany_name";
    pub const JOB_STATUS: &str = "status_jobStatus";
    pub const EMPLOYMENT_TYPES: &str = "employmentTypes";

    /// Columns the loader expects to find in the header row
    pub const REQUIRED: [&str; 9] = [
        TITLE,
        MINIMUM_YEARS_EXPERIENCE,
        SALARY_MINIMUM,
        SALARY_MAXIMUM,
        CATEGORIES,
        POSITION_LEVELS,
        COMPANY_NAME,
        JOB_STATUS,
        EMPLOYMENT_TYPES,
    ];
}

/// One unprocessed row: field name to possibly-missing, possibly-malformed text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a field value. Blank cells count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cells_are_absent() {
        let record = RawRecord::new()
            .with_field(columns::TITLE, "   ")
            .with_field(columns::POSITION_LEVELS, "");

        assert_eq!(record.get(columns::TITLE), None);
        assert_eq!(record.get(columns::POSITION_LEVELS), None);
        assert_eq!(record.get(columns::COMPANY_NAME), None);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_values_are_trimmed() {
        let record: RawRecord = vec![(columns::TITLE, "  QA Engineer ")].into_iter().collect();
        assert_eq!(record.get(columns::TITLE), Some("QA Engineer"));
    }
}
