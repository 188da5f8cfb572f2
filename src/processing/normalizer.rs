//! Record normalization: numeric coercion, category extraction, default-filling
//!
//! Malformed values are never errors here. Every bad number becomes 0 and every
//! unreadable category becomes [`UNKNOWN_CATEGORY`].

use crate::input::raw_record::{columns, RawRecord};
use crate::processing::record::{JobRecord, JobTable};
use log::debug;

pub const UNKNOWN_POSITION: &str = "Unknown Position";
pub const UNKNOWN_CATEGORY: &str = "Unknown";
pub const NOT_SPECIFIED: &str = "Not Specified";

pub struct RecordNormalizer;

impl RecordNormalizer {
    /// Normalize a single raw row
    pub fn normalize(raw: &RawRecord) -> JobRecord {
        JobRecord {
            title: raw
                .get(columns::TITLE)
                .unwrap_or(UNKNOWN_POSITION)
                .to_string(),
            minimum_years_experience: Self::clean_experience(
                raw.get(columns::MINIMUM_YEARS_EXPERIENCE),
            ),
            salary_minimum: Self::clean_salary(raw.get(columns::SALARY_MINIMUM)),
            salary_maximum: Self::clean_salary(raw.get(columns::SALARY_MAXIMUM)),
            primary_category: Self::extract_category(raw.get(columns::CATEGORIES)),
            position_level: raw
                .get(columns::POSITION_LEVELS)
                .unwrap_or(NOT_SPECIFIED)
                .to_string(),
            employment_type: Self::text(raw, columns::EMPLOYMENT_TYPES),
            company_name: Self::text(raw, columns::COMPANY_NAME),
            job_status: Self::text(raw, columns::JOB_STATUS),
        }
    }

    /// Normalize a whole dataset into a fresh table
    pub fn normalize_all<'a, I>(raws: I) -> JobTable
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        let table: JobTable = raws.into_iter().map(Self::normalize).collect();
        debug!("Normalized {} job records", table.len());
        table
    }

    /// Parse whole years of experience. Fractions truncate; anything
    /// unparseable, negative, or non-finite becomes 0.
    pub fn clean_experience(value: Option<&str>) -> u32 {
        match Self::parse_number(value) {
            Some(years) => years.trunc() as u32,
            None => 0,
        }
    }

    /// Parse a salary figure; anything unparseable, negative, or non-finite becomes 0
    pub fn clean_salary(value: Option<&str>) -> f64 {
        Self::parse_number(value).unwrap_or(0.0)
    }

    /// First category of a JSON-like list such as `[{'category': 'Engineering'}]`.
    ///
    /// Single quotes are read as double quotes. A value that is not a non-empty
    /// list, or whose first entry lacks a string `category`, yields "Unknown".
    pub fn extract_category(value: Option<&str>) -> String {
        let Some(text) = value else {
            return UNKNOWN_CATEGORY.to_string();
        };

        let parsed: serde_json::Value = match serde_json::from_str(&text.replace('\'', "\"")) {
            Ok(parsed) => parsed,
            Err(_) => return UNKNOWN_CATEGORY.to_string(),
        };

        parsed
            .as_array()
            .and_then(|entries| entries.first())
            .and_then(|first| first.get("category"))
            .and_then(|category| category.as_str())
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(UNKNOWN_CATEGORY)
            .to_string()
    }

    fn parse_number(value: Option<&str>) -> Option<f64> {
        value?
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && *n >= 0.0)
    }

    fn text(raw: &RawRecord, column: &str) -> String {
        raw.get(column).unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_raw() -> RawRecord {
        RawRecord::new()
            .with_field(columns::TITLE, "Senior Python Developer")
            .with_field(columns::MINIMUM_YEARS_EXPERIENCE, "5")
            .with_field(columns::SALARY_MINIMUM, "6000")
            .with_field(columns::SALARY_MAXIMUM, "9000")
            .with_field(
                columns::CATEGORIES,
                "[{'id': 21, 'category': 'Information Technology'}, {'id': 13, 'category': 'Engineering'}]",
            )
            .with_field(columns::POSITION_LEVELS, "Senior Executive")
            .with_field(columns::EMPLOYMENT_TYPES, "Permanent")
            .with_field(columns::COMPANY_NAME, "Acme Pte Ltd")
            .with_field(columns::JOB_STATUS, "Open")
    }

    #[test]
    fn test_normalize_full_record() {
        let record = RecordNormalizer::normalize(&full_raw());

        assert_eq!(record.title, "Senior Python Developer");
        assert_eq!(record.minimum_years_experience, 5);
        assert_eq!(record.salary_minimum, 6000.0);
        assert_eq!(record.salary_maximum, 9000.0);
        assert_eq!(record.average_salary(), 7500.0);
        assert_eq!(record.primary_category, "Information Technology");
        assert_eq!(record.position_level, "Senior Executive");
        assert_eq!(record.employment_type, "Permanent");
        assert_eq!(record.company_name, "Acme Pte Ltd");
        assert_eq!(record.job_status, "Open");
    }

    #[test]
    fn test_defaults_for_empty_record() {
        let record = RecordNormalizer::normalize(&RawRecord::new());

        assert_eq!(record.title, UNKNOWN_POSITION);
        assert_eq!(record.minimum_years_experience, 0);
        assert_eq!(record.salary_minimum, 0.0);
        assert_eq!(record.salary_maximum, 0.0);
        assert_eq!(record.average_salary(), 0.0);
        assert_eq!(record.primary_category, UNKNOWN_CATEGORY);
        assert_eq!(record.position_level, NOT_SPECIFIED);
        assert_eq!(record.company_name, "");
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(RecordNormalizer::clean_experience(Some("abc")), 0);
        assert_eq!(RecordNormalizer::clean_experience(Some("7.0")), 7);
        assert_eq!(RecordNormalizer::clean_experience(Some("3.9")), 3);
        assert_eq!(RecordNormalizer::clean_experience(Some("-2")), 0);
        assert_eq!(RecordNormalizer::clean_experience(None), 0);

        assert_eq!(RecordNormalizer::clean_salary(Some("4500.50")), 4500.5);
        assert_eq!(RecordNormalizer::clean_salary(Some("n/a")), 0.0);
        assert_eq!(RecordNormalizer::clean_salary(Some("NaN")), 0.0);
        assert_eq!(RecordNormalizer::clean_salary(Some("inf")), 0.0);
        assert_eq!(RecordNormalizer::clean_salary(None), 0.0);
    }

    #[test]
    fn test_category_extraction() {
        assert_eq!(
            RecordNormalizer::extract_category(Some("[{'category': 'Engineering'}]")),
            "Engineering"
        );
        assert_eq!(
            RecordNormalizer::extract_category(Some(r#"[{"category": "Sales"}]"#)),
            "Sales"
        );
        assert_eq!(RecordNormalizer::extract_category(None), UNKNOWN_CATEGORY);
        assert_eq!(RecordNormalizer::extract_category(Some("[]")), UNKNOWN_CATEGORY);
        assert_eq!(RecordNormalizer::extract_category(Some("{not json")), UNKNOWN_CATEGORY);
        assert_eq!(
            RecordNormalizer::extract_category(Some("[{'id': 3}]")),
            UNKNOWN_CATEGORY
        );
        assert_eq!(
            RecordNormalizer::extract_category(Some("{'category': 'Engineering'}")),
            UNKNOWN_CATEGORY
        );
    }

    #[test]
    fn test_apostrophe_in_category_is_unreadable() {
        // The relaxed quoting turns the apostrophe into a stray double quote.
        assert_eq!(
            RecordNormalizer::extract_category(Some("[{'category': 'Children's Wear'}]")),
            UNKNOWN_CATEGORY
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for raw in [full_raw(), RawRecord::new(), RawRecord::new().with_field(columns::SALARY_MINIMUM, "x")] {
            let once = RecordNormalizer::normalize(&raw);
            let twice = RecordNormalizer::normalize(&once.to_raw());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_normalize_all() {
        let raws = vec![full_raw(), RawRecord::new()];
        let table = RecordNormalizer::normalize_all(&raws);

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].title, UNKNOWN_POSITION);
    }
}
