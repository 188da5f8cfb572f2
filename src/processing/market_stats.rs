//! Market statistics over filtered subsets of the job table
//!
//! Nothing here is persisted; every call recomputes from the table. An empty
//! filter result is reported as `None`, never as a statistics object of zeros.

use crate::processing::record::{JobRecord, JobTable, RoleFilter};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Knobs for statistics computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsOptions {
    /// Length of the status, position level, and employment type tables
    pub top_n: usize,
    /// Length of the company table
    pub top_companies: usize,
    /// Leave records without any salary out of salary aggregates
    pub exclude_zero_salary: bool,
}

impl Default for StatisticsOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            top_companies: 5,
            exclude_zero_salary: false,
        }
    }
}

/// One row of a frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySummary {
    /// Number of records the salary figures were computed over
    pub sample_size: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Mean of the lower salary bound
    pub mean_minimum: f64,
    /// Mean of the upper salary bound
    pub mean_maximum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceSummary {
    pub mean: f64,
    pub median: f64,
    pub min: u32,
    pub max: u32,
}

/// Descriptive statistics for the records matching a filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleStatistics {
    pub filter: RoleFilter,
    pub count: usize,
    /// `None` only when zero-salary records are excluded and nothing remains
    pub salary: Option<SalarySummary>,
    pub experience: ExperienceSummary,
    pub top_companies: Vec<ValueCount>,
    pub job_statuses: Vec<ValueCount>,
    pub position_levels: Vec<ValueCount>,
    pub employment_types: Vec<ValueCount>,
}

/// Mean salary and posting count for one year of required experience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceSalaryPoint {
    pub years: u32,
    pub mean_salary: f64,
    pub count: usize,
}

/// Posting count within an inclusive range of required experience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceBucket {
    pub label: String,
    pub min_years: u32,
    pub max_years: u32,
    pub count: usize,
}

const EXPERIENCE_BUCKETS: [(u32, u32); 4] = [(0, 2), (3, 5), (6, 10), (11, 20)];

/// Career stage implied by years of experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Early,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn from_years(years: f64) -> Self {
        if years < 2.0 {
            ExperienceLevel::Entry
        } else if years < 5.0 {
            ExperienceLevel::Early
        } else if years < 10.0 {
            ExperienceLevel::Mid
        } else {
            ExperienceLevel::Senior
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry Level (0-2 years)",
            ExperienceLevel::Early => "Early Career (2-5 years)",
            ExperienceLevel::Mid => "Mid Career (5-10 years)",
            ExperienceLevel::Senior => "Senior (10+ years)",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub struct MarketStatistics<'a> {
    table: &'a JobTable,
    options: StatisticsOptions,
}

impl<'a> MarketStatistics<'a> {
    pub fn new(table: &'a JobTable, options: StatisticsOptions) -> Self {
        Self { table, options }
    }

    /// Statistics for titles containing `keyword`, case-insensitively
    pub fn role_stats(&self, keyword: &str) -> Option<RoleStatistics> {
        self.compute(&RoleFilter::title(keyword))
    }

    /// Statistics for one primary category
    pub fn category_stats(&self, category: &str) -> Option<RoleStatistics> {
        self.compute(&RoleFilter::category(category))
    }

    /// Statistics for every record matching `filter`; `None` when none match
    pub fn compute(&self, filter: &RoleFilter) -> Option<RoleStatistics> {
        let records = self.table.filter(filter);
        if records.is_empty() {
            return None;
        }

        Some(RoleStatistics {
            filter: filter.clone(),
            count: records.len(),
            salary: self.salary_summary(&records),
            experience: experience_summary(&records),
            top_companies: frequency_table(
                records.iter().map(|r| r.company_name.as_str()),
                self.options.top_companies,
            ),
            job_statuses: frequency_table(
                records.iter().map(|r| r.job_status.as_str()),
                self.options.top_n,
            ),
            position_levels: frequency_table(
                records.iter().map(|r| r.position_level.as_str()),
                self.options.top_n,
            ),
            employment_types: frequency_table(
                records.iter().map(|r| r.employment_type.as_str()),
                self.options.top_n,
            ),
        })
    }

    /// Posting counts per primary category, largest first
    pub fn category_counts(&self, limit: usize) -> Vec<ValueCount> {
        frequency_table(
            self.table.iter().map(|r| r.primary_category.as_str()),
            limit,
        )
    }

    /// Mean average-salary per exact year of required experience, up to `max_years`
    pub fn salary_by_experience(&self, max_years: u32) -> Vec<ExperienceSalaryPoint> {
        let mut groups: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
        for record in self.table.iter() {
            if record.minimum_years_experience > max_years || !self.counts_for_salary(record) {
                continue;
            }
            let entry = groups.entry(record.minimum_years_experience).or_insert((0.0, 0));
            entry.0 += record.average_salary();
            entry.1 += 1;
        }

        groups
            .into_iter()
            .map(|(years, (sum, count))| ExperienceSalaryPoint {
                years,
                mean_salary: sum / count as f64,
                count,
            })
            .collect()
    }

    /// Posting counts in the 0-2, 3-5, 6-10 and 11-20 year ranges. Postings
    /// asking for more than 20 years fall outside every bucket.
    pub fn experience_distribution(&self) -> Vec<ExperienceBucket> {
        EXPERIENCE_BUCKETS
            .iter()
            .map(|&(min_years, max_years)| ExperienceBucket {
                label: format!("{}-{} years", min_years, max_years),
                min_years,
                max_years,
                count: self
                    .table
                    .iter()
                    .filter(|r| (min_years..=max_years).contains(&r.minimum_years_experience))
                    .count(),
            })
            .collect()
    }

    fn counts_for_salary(&self, record: &JobRecord) -> bool {
        !(self.options.exclude_zero_salary && record.has_zero_salary())
    }

    fn salary_summary(&self, records: &[&JobRecord]) -> Option<SalarySummary> {
        let paid: Vec<&JobRecord> = records
            .iter()
            .copied()
            .filter(|r| self.counts_for_salary(r))
            .collect();
        if paid.is_empty() {
            return None;
        }

        let averages: Vec<f64> = paid.iter().map(|r| r.average_salary()).collect();
        let n = paid.len() as f64;

        Some(SalarySummary {
            sample_size: paid.len(),
            mean: averages.iter().sum::<f64>() / n,
            median: median(&averages),
            min: averages.iter().copied().fold(f64::INFINITY, f64::min),
            max: averages.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean_minimum: paid.iter().map(|r| r.salary_minimum).sum::<f64>() / n,
            mean_maximum: paid.iter().map(|r| r.salary_maximum).sum::<f64>() / n,
        })
    }
}

fn experience_summary(records: &[&JobRecord]) -> ExperienceSummary {
    let years: Vec<f64> = records
        .iter()
        .map(|r| r.minimum_years_experience as f64)
        .collect();

    ExperienceSummary {
        mean: years.iter().sum::<f64>() / years.len() as f64,
        median: median(&years),
        min: records
            .iter()
            .map(|r| r.minimum_years_experience)
            .min()
            .unwrap_or(0),
        max: records
            .iter()
            .map(|r| r.minimum_years_experience)
            .max()
            .unwrap_or(0),
    }
}

/// Median of a non-empty slice; the mean of the middle pair for even lengths
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Count values, drop blanks, sort by count descending (ties keep first
/// appearance order), and keep the top `limit`
pub fn frequency_table<'v, I>(values: I, limit: usize) -> Vec<ValueCount>
where
    I: IntoIterator<Item = &'v str>,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut table: Vec<ValueCount> = Vec::new();

    for value in values {
        if value.trim().is_empty() {
            continue;
        }
        match positions.get(value) {
            Some(&i) => table[i].count += 1,
            None => {
                positions.insert(value, table.len());
                table.push(ValueCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    table.sort_by(|a, b| b.count.cmp(&a.count));
    table.truncate(limit);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::record::test_support::job;

    fn sample_table() -> JobTable {
        let mut records = vec![
            job("QA Engineer", "Engineering", 2, 3000.0, 5000.0),
            job("Senior QA Engineer", "Engineering", 6, 6000.0, 8000.0),
            job("QA Engineer", "Engineering", 1, 0.0, 0.0),
            job("Data Analyst", "Information Technology", 3, 4000.0, 6000.0),
        ];
        records[1].company_name = "Globex".to_string();
        records[3].company_name = "Globex".to_string();
        records[2].job_status = "Closed".to_string();
        records.into_iter().collect()
    }

    #[test]
    fn test_role_stats() {
        let table = sample_table();
        let stats = MarketStatistics::new(&table, StatisticsOptions::default())
            .role_stats("qa")
            .unwrap();

        assert_eq!(stats.count, 3);
        let salary = stats.salary.unwrap();
        // the zero-salary posting still counts
        assert_eq!(salary.sample_size, 3);
        assert_eq!(salary.mean, (4000.0 + 7000.0 + 0.0) / 3.0);
        assert_eq!(salary.median, 4000.0);
        assert_eq!(salary.min, 0.0);
        assert_eq!(salary.max, 7000.0);
        assert_eq!(salary.mean_minimum, 3000.0);

        assert_eq!(stats.experience.mean, 3.0);
        assert_eq!(stats.experience.min, 1);
        assert_eq!(stats.experience.max, 6);

        assert_eq!(stats.top_companies[0], ValueCount { value: "Acme Pte Ltd".to_string(), count: 2 });
        assert_eq!(stats.job_statuses.len(), 2);
    }

    #[test]
    fn test_excluding_zero_salary_records() {
        let table = sample_table();
        let options = StatisticsOptions {
            exclude_zero_salary: true,
            ..StatisticsOptions::default()
        };
        let stats = MarketStatistics::new(&table, options).role_stats("QA").unwrap();

        assert_eq!(stats.count, 3);
        let salary = stats.salary.unwrap();
        assert_eq!(salary.sample_size, 2);
        assert_eq!(salary.mean, 5500.0);
    }

    #[test]
    fn test_only_zero_salary_records_excluded_gives_no_salary() {
        let table: JobTable = vec![job("Intern", "Engineering", 0, 0.0, 0.0)].into_iter().collect();
        let options = StatisticsOptions {
            exclude_zero_salary: true,
            ..StatisticsOptions::default()
        };
        let stats = MarketStatistics::new(&table, options).role_stats("Intern").unwrap();
        assert_eq!(stats.count, 1);
        assert!(stats.salary.is_none());
    }

    #[test]
    fn test_empty_filter_is_none() {
        let table = sample_table();
        let market = MarketStatistics::new(&table, StatisticsOptions::default());

        assert!(market.role_stats("Astronaut").is_none());
        assert!(market.category_stats("Aerospace").is_none());
        assert!(MarketStatistics::new(&JobTable::default(), StatisticsOptions::default())
            .role_stats("")
            .is_none());
    }

    #[test]
    fn test_category_stats() {
        let table = sample_table();
        let stats = MarketStatistics::new(&table, StatisticsOptions::default())
            .category_stats("Information Technology")
            .unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.salary.unwrap().mean, 5000.0);
        assert_eq!(stats.employment_types[0].value, "Full Time");
    }

    #[test]
    fn test_frequency_table_sorting_and_truncation() {
        let values = ["b", "a", "a", "", "c", "b", "a", "  "];
        let table = frequency_table(values, 2);

        assert_eq!(table.len(), 2);
        assert_eq!(table[0], ValueCount { value: "a".to_string(), count: 3 });
        assert_eq!(table[1], ValueCount { value: "b".to_string(), count: 2 });
    }

    #[test]
    fn test_frequency_ties_keep_first_appearance() {
        let table = frequency_table(["x", "y", "z"], 10);
        let order: Vec<&str> = table.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(order, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
    }

    #[test]
    fn test_market_overview_helpers() {
        let table = sample_table();
        let market = MarketStatistics::new(&table, StatisticsOptions::default());

        let categories = market.category_counts(8);
        assert_eq!(categories[0], ValueCount { value: "Engineering".to_string(), count: 3 });

        let by_experience = market.salary_by_experience(5);
        let years: Vec<u32> = by_experience.iter().map(|p| p.years).collect();
        assert_eq!(years, vec![1, 2, 3]);
        assert_eq!(by_experience[1].mean_salary, 4000.0);

        let buckets = market.experience_distribution();
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].count, 1);
        assert_eq!(buckets[2].count, 1);
        assert_eq!(buckets[3].count, 0);
    }

    #[test]
    fn test_experience_levels() {
        assert_eq!(ExperienceLevel::from_years(0.0), ExperienceLevel::Entry);
        assert_eq!(ExperienceLevel::from_years(2.0), ExperienceLevel::Early);
        assert_eq!(ExperienceLevel::from_years(9.5), ExperienceLevel::Mid);
        assert_eq!(ExperienceLevel::from_years(10.0), ExperienceLevel::Senior);
        assert_eq!(ExperienceLevel::Mid.to_string(), "Mid Career (5-10 years)");
    }
}
