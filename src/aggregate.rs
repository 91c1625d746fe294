//! Per-continent reduction of the cleaned records and the derived ratio
//! feature.

use std::collections::BTreeMap;

use crate::models::{CovidRecord, GroupSummary};

/// Group records by continent and take the column-wise maximum of every
/// other column: numeric max for numbers and month, latest date for the
/// date, lexicographic max for location. One output row per distinct
/// continent, in ascending continent order.
pub fn group_max_by_continent(records: &[CovidRecord]) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<String, GroupSummary> = BTreeMap::new();
    for record in records {
        let summary = groups
            .entry(record.continent.clone())
            .or_insert_with(|| seed(record));
        if record.location > summary.location {
            summary.location = record.location.clone();
        }
        if record.date > summary.date {
            summary.date = record.date;
        }
        summary.total_cases = summary.total_cases.max(record.total_cases);
        summary.total_deaths = summary.total_deaths.max(record.total_deaths);
        summary.gdp_per_capita = summary.gdp_per_capita.max(record.gdp_per_capita);
        summary.human_development_index = summary
            .human_development_index
            .max(record.human_development_index);
        summary.month = summary.month.max(record.month);
    }
    groups.into_values().collect()
}

fn seed(record: &CovidRecord) -> GroupSummary {
    GroupSummary {
        continent: record.continent.clone(),
        location: record.location.clone(),
        date: record.date,
        total_cases: record.total_cases,
        total_deaths: record.total_deaths,
        gdp_per_capita: record.gdp_per_capita,
        human_development_index: record.human_development_index,
        month: record.month,
        total_deaths_to_total_cases: f64::NAN,
    }
}

/// Ratio of aggregated deaths to aggregated cases per row. Plain float
/// division: zero cases yield infinity, zero over zero yields NaN.
pub fn derive_death_case_ratio(summaries: &mut [GroupSummary]) {
    for summary in summaries {
        summary.total_deaths_to_total_cases = summary.total_deaths / summary.total_cases;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn record(
        continent: &str,
        location: &str,
        date: (i32, u32, u32),
        total_cases: f64,
        total_deaths: f64,
    ) -> CovidRecord {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        CovidRecord {
            continent: continent.to_string(),
            location: location.to_string(),
            date,
            total_cases,
            total_deaths,
            gdp_per_capita: 1000.0,
            human_development_index: 0.5,
            month: date.month(),
        }
    }

    #[test]
    fn aggregates_the_documented_example() {
        let records = vec![
            record("Asia", "Afghanistan", (2020, 1, 5), 100.0, 10.0),
            record("Asia", "India", (2020, 2, 10), 200.0, 50.0),
            record("Europe", "France", (2020, 3, 15), 300.0, 30.0),
        ];
        let mut summaries = group_max_by_continent(&records);
        derive_death_case_ratio(&mut summaries);

        assert_eq!(summaries.len(), 2);
        let asia = &summaries[0];
        assert_eq!(asia.continent, "Asia");
        assert_eq!(asia.total_cases, 200.0);
        assert_eq!(asia.total_deaths, 50.0);
        assert_eq!(asia.total_deaths_to_total_cases, 0.25);
        let europe = &summaries[1];
        assert_eq!(europe.continent, "Europe");
        assert_eq!(europe.total_cases, 300.0);
        assert_eq!(europe.total_deaths, 30.0);
        assert_eq!(europe.total_deaths_to_total_cases, 0.1);
    }

    #[test]
    fn output_is_one_row_per_continent_in_ascending_order() {
        let records = vec![
            record("Oceania", "Fiji", (2020, 5, 1), 10.0, 1.0),
            record("Africa", "Nigeria", (2020, 5, 1), 20.0, 2.0),
            record("Africa", "Kenya", (2020, 6, 1), 30.0, 3.0),
        ];
        let summaries = group_max_by_continent(&records);
        let continents: Vec<&str> = summaries.iter().map(|s| s.continent.as_str()).collect();
        assert_eq!(continents, vec!["Africa", "Oceania"]);
    }

    #[test]
    fn every_field_dominates_the_group_members() {
        let records = vec![
            record("Asia", "India", (2020, 2, 10), 200.0, 50.0),
            record("Asia", "Zimbabwe-not-really", (2020, 1, 5), 500.0, 10.0),
            record("Asia", "Afghanistan", (2021, 7, 1), 100.0, 80.0),
        ];
        let summaries = group_max_by_continent(&records);
        assert_eq!(summaries.len(), 1);
        let asia = &summaries[0];
        for r in &records {
            assert!(asia.total_cases >= r.total_cases);
            assert!(asia.total_deaths >= r.total_deaths);
            assert!(asia.date >= r.date);
            assert!(asia.month >= r.month);
            assert!(asia.location.as_str() >= r.location.as_str());
        }
        // the per-column max mixes rows: location comes from one record,
        // cases and deaths from others
        assert_eq!(asia.location, "Zimbabwe-not-really");
        assert_eq!(asia.total_cases, 500.0);
        assert_eq!(asia.total_deaths, 80.0);
        assert_eq!(asia.month, 7);
    }

    #[test]
    fn ratio_of_zero_over_zero_is_nan_not_an_error() {
        let records = vec![record("Asia", "India", (2020, 1, 1), 0.0, 0.0)];
        let mut summaries = group_max_by_continent(&records);
        derive_death_case_ratio(&mut summaries);
        assert!(summaries[0].total_deaths_to_total_cases.is_nan());
    }

    #[test]
    fn ratio_with_zero_cases_is_infinite() {
        let records = vec![record("Asia", "India", (2020, 1, 1), 0.0, 5.0)];
        let mut summaries = group_max_by_continent(&records);
        derive_death_case_ratio(&mut summaries);
        assert!(summaries[0].total_deaths_to_total_cases.is_infinite());
    }
}
