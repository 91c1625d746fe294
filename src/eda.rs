//! Read-only descriptive statistics over a [`Frame`]. Nothing here mutates
//! the table; the caller decides what to print.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use chrono::NaiveDate;
use itertools::Itertools;
use ordered_float::NotNan;
use statrs::statistics::{Data, Distribution, OrderStatistics, Statistics};

use crate::frame::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Date,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Date => "date",
            ColumnType::Text => "text",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct ColumnInfo {
    pub name: String,
    pub non_missing: usize,
    pub dtype: ColumnType,
}

#[derive(Debug)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Classify a column from its raw cells. A column with no values at all
/// reports as Float, the convention for all-missing numeric data.
pub fn infer_dtype(values: &[&str]) -> ColumnType {
    let present: Vec<&str> = values.iter().copied().filter(|v| !v.is_empty()).collect();
    if present.is_empty() {
        return ColumnType::Float;
    }
    if present.iter().all(|v| v.parse::<i64>().is_ok()) {
        return ColumnType::Integer;
    }
    if present.iter().all(|v| v.parse::<f64>().is_ok()) {
        return ColumnType::Float;
    }
    if present
        .iter()
        .all(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").is_ok())
    {
        return ColumnType::Date;
    }
    ColumnType::Text
}

pub fn dtypes(frame: &Frame) -> Vec<(String, ColumnType)> {
    column_values(frame)
        .map(|(name, values)| (name, infer_dtype(&values)))
        .collect()
}

/// Per-column non-missing counts alongside the inferred type.
pub fn info(frame: &Frame) -> Vec<ColumnInfo> {
    column_values(frame)
        .map(|(name, values)| ColumnInfo {
            non_missing: values.iter().filter(|v| !v.is_empty()).count(),
            dtype: infer_dtype(&values),
            name,
        })
        .collect()
}

pub fn missing_counts(frame: &Frame) -> Vec<(String, usize)> {
    column_values(frame)
        .map(|(name, values)| {
            let missing = values.iter().filter(|v| v.is_empty()).count();
            (name, missing)
        })
        .collect()
}

/// Summary statistics for every numeric column, missing cells skipped.
pub fn describe(frame: &Frame) -> Vec<ColumnSummary> {
    let mut summaries = Vec::new();
    for (name, values) in column_values(frame) {
        match infer_dtype(&values) {
            ColumnType::Integer | ColumnType::Float => {}
            _ => continue,
        }
        let numbers: Vec<f64> = values.iter().filter_map(|v| v.parse::<f64>().ok()).collect();
        if numbers.is_empty() {
            continue;
        }
        let count = numbers.len();
        let min = numbers.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = numbers.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mut data = Data::new(numbers);
        summaries.push(ColumnSummary {
            name,
            count,
            mean: data.mean().unwrap_or(f64::NAN),
            std_dev: data.std_dev().unwrap_or(f64::NAN),
            min,
            q1: data.quantile(0.25),
            median: data.quantile(0.5),
            q3: data.quantile(0.75),
            max,
        });
    }
    summaries
}

/// Number of distinct non-missing values in a column.
pub fn distinct_count(frame: &Frame, column: &str) -> Result<usize, Box<dyn Error>> {
    Ok(frame
        .column(column)?
        .into_iter()
        .filter(|v| !v.is_empty())
        .unique()
        .count())
}

/// Modal value of a column. Ties resolve to the value seen first in row
/// order, so the answer is stable across runs.
pub fn most_frequent(frame: &Frame, column: &str) -> Result<Option<String>, Box<dyn Error>> {
    let values = frame.column(column)?;
    let mut tallies: HashMap<&str, (usize, usize)> = HashMap::new();
    for (i, &value) in values.iter().enumerate() {
        if value.is_empty() {
            continue;
        }
        let entry = tallies.entry(value).or_insert((0, i));
        entry.0 += 1;
    }
    Ok(tallies
        .into_iter()
        .max_by_key(|&(_, (count, first_seen))| (count, Reverse(first_seen)))
        .map(|(value, _)| value.to_string()))
}

pub fn column_max(frame: &Frame, column: &str) -> Result<f64, Box<dyn Error>> {
    Ok(frame
        .numeric_column(column)?
        .into_iter()
        .flatten()
        .fold(f64::NAN, f64::max))
}

pub fn column_mean(frame: &Frame, column: &str) -> Result<f64, Box<dyn Error>> {
    let values: Vec<f64> = frame.numeric_column(column)?.into_iter().flatten().collect();
    Ok(values.mean())
}

/// (q1, median, q3) of the non-missing values; NaN triple if the column is
/// entirely missing.
pub fn quartiles(frame: &Frame, column: &str) -> Result<(f64, f64, f64), Box<dyn Error>> {
    let values: Vec<f64> = frame.numeric_column(column)?.into_iter().flatten().collect();
    if values.is_empty() {
        return Ok((f64::NAN, f64::NAN, f64::NAN));
    }
    let mut data = Data::new(values);
    Ok((data.quantile(0.25), data.quantile(0.5), data.quantile(0.75)))
}

/// Value of `category_column` on the row holding the global maximum of
/// `value_column`. Ties resolve to the earliest row.
pub fn category_at_max(
    frame: &Frame,
    value_column: &str,
    category_column: &str,
) -> Result<Option<String>, Box<dyn Error>> {
    let values = frame.numeric_column(value_column)?;
    let categories = frame.column(category_column)?;
    let best = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.and_then(|x| NotNan::new(x).ok()).map(|n| (i, n)))
        .max_by_key(|&(i, n)| (n, Reverse(i)));
    Ok(best.map(|(i, _)| categories[i].to_string()))
}

/// Value of `category_column` on the row holding the global minimum of
/// `value_column`. Ties resolve to the earliest row.
pub fn category_at_min(
    frame: &Frame,
    value_column: &str,
    category_column: &str,
) -> Result<Option<String>, Box<dyn Error>> {
    let values = frame.numeric_column(value_column)?;
    let categories = frame.column(category_column)?;
    let best = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.and_then(|x| NotNan::new(x).ok()).map(|n| (i, n)))
        .min_by_key(|&(i, n)| (n, i));
    Ok(best.map(|(i, _)| categories[i].to_string()))
}

fn column_values<'a>(frame: &'a Frame) -> impl Iterator<Item = (String, Vec<&'a str>)> {
    frame.headers().iter().enumerate().map(move |(i, name)| {
        let values: Vec<&str> = frame
            .rows()
            .iter()
            .map(|row| row.get(i).unwrap_or(""))
            .collect();
        (name.to_string(), values)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::read_csv;

    fn sample() -> Frame {
        let data = "\
continent,location,date,total_cases
Asia,India,2020-01-05,100
Asia,China,2020-01-06,200
Europe,France,2020-01-07,
Asia,India,2020-01-08,400
";
        read_csv(data.as_bytes()).unwrap()
    }

    #[test]
    fn dtype_inference_covers_all_classes() {
        assert_eq!(infer_dtype(&["1", "2", ""]), ColumnType::Integer);
        assert_eq!(infer_dtype(&["1.5", "2"]), ColumnType::Float);
        assert_eq!(infer_dtype(&["2020-01-05", "2021-12-31"]), ColumnType::Date);
        assert_eq!(infer_dtype(&["Asia", "2020-01-05"]), ColumnType::Text);
        assert_eq!(infer_dtype(&["", ""]), ColumnType::Float);
    }

    #[test]
    fn info_counts_non_missing_cells() {
        let info = info(&sample());
        let cases = info.iter().find(|c| c.name == "total_cases").unwrap();
        assert_eq!(cases.non_missing, 3);
        assert_eq!(cases.dtype, ColumnType::Integer);
        let date = info.iter().find(|c| c.name == "date").unwrap();
        assert_eq!(date.dtype, ColumnType::Date);
    }

    #[test]
    fn missing_counts_reports_empty_cells() {
        let counts = missing_counts(&sample());
        let cases = counts.iter().find(|(name, _)| name == "total_cases").unwrap();
        assert_eq!(cases.1, 1);
    }

    #[test]
    fn distinct_count_skips_missing_and_duplicates() {
        assert_eq!(distinct_count(&sample(), "location").unwrap(), 3);
        assert_eq!(distinct_count(&sample(), "total_cases").unwrap(), 3);
    }

    #[test]
    fn most_frequent_picks_the_modal_value() {
        assert_eq!(
            most_frequent(&sample(), "continent").unwrap(),
            Some("Asia".to_string())
        );
    }

    #[test]
    fn most_frequent_breaks_ties_by_first_occurrence() {
        let data = "c\nb\na\nb\na\n";
        let frame = read_csv(data.as_bytes()).unwrap();
        assert_eq!(most_frequent(&frame, "c").unwrap(), Some("b".to_string()));
    }

    #[test]
    fn max_and_mean_skip_missing_values() {
        let frame = sample();
        assert_eq!(column_max(&frame, "total_cases").unwrap(), 400.0);
        let mean = column_mean(&frame, "total_cases").unwrap();
        assert!((mean - (700.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn quartiles_are_ordered_and_bounded() {
        let data = "v\n1\n2\n3\n4\n5\n";
        let frame = read_csv(data.as_bytes()).unwrap();
        let (q1, median, q3) = quartiles(&frame, "v").unwrap();
        assert_eq!(median, 3.0);
        assert!(q1 <= median && median <= q3);
        assert!(q1 >= 1.0 && q3 <= 5.0);
    }

    #[test]
    fn quartiles_of_all_missing_column_are_nan() {
        let data = "v\n\n\n";
        let frame = read_csv(data.as_bytes()).unwrap();
        let (q1, median, q3) = quartiles(&frame, "v").unwrap();
        assert!(q1.is_nan() && median.is_nan() && q3.is_nan());
    }

    #[test]
    fn category_at_extremes_follows_the_value_column() {
        let frame = sample();
        assert_eq!(
            category_at_max(&frame, "total_cases", "location").unwrap(),
            Some("India".to_string())
        );
        assert_eq!(
            category_at_min(&frame, "total_cases", "continent").unwrap(),
            Some("Asia".to_string())
        );
    }

    #[test]
    fn category_at_max_ties_resolve_to_earliest_row() {
        let data = "v,c\n5,a\n5,b\n";
        let frame = read_csv(data.as_bytes()).unwrap();
        assert_eq!(
            category_at_max(&frame, "v", "c").unwrap(),
            Some("a".to_string())
        );
    }

    #[test]
    fn describe_summarizes_numeric_columns_only() {
        let summaries = describe(&sample());
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["total_cases"]);
        let cases = &summaries[0];
        assert_eq!(cases.count, 3);
        assert_eq!(cases.min, 100.0);
        assert_eq!(cases.max, 400.0);
        assert!((cases.mean - (700.0 / 3.0)).abs() < 1e-9);
    }
}
