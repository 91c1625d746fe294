use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;

use crate::frame::Frame;

/// Columns the wrangling stages keep from the raw dataset.
pub const SELECTED_COLUMNS: [&str; 7] = [
    "continent",
    "location",
    "date",
    "total_cases",
    "total_deaths",
    "gdp_per_capita",
    "human_development_index",
];

/// A cleaned table row as it comes off the CSV. Only valid after the
/// cleaning passes: every cell is present, numerics parse, the date is
/// still raw text.
#[derive(Debug, Deserialize)]
pub struct CovidRow {
    pub continent: String,
    pub location: String,
    pub date: String,
    pub total_cases: f64,
    pub total_deaths: f64,
    pub gdp_per_capita: f64,
    pub human_development_index: f64,
}

/// A fully parsed row with the calendar date and its derived month.
#[derive(Debug, Clone, PartialEq)]
pub struct CovidRecord {
    pub continent: String,
    pub location: String,
    pub date: NaiveDate,
    pub total_cases: f64,
    pub total_deaths: f64,
    pub gdp_per_capita: f64,
    pub human_development_index: f64,
    pub month: u32,
}

/// One row per continent: column-wise maxima plus the deaths-to-cases
/// ratio. Field order is the output CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub continent: String,
    pub location: String,
    pub date: NaiveDate,
    pub total_cases: f64,
    pub total_deaths: f64,
    pub gdp_per_capita: f64,
    pub human_development_index: f64,
    pub month: u32,
    pub total_deaths_to_total_cases: f64,
}

/// Parse a `YYYY-MM-DD` date cell. The cleaning stage fills missing cells
/// with the literal `0`, which maps to the epoch, the same date a numeric
/// zero timestamp denotes. Anything else unparseable is an error.
pub fn parse_date(text: &str) -> Result<NaiveDate, Box<dyn Error>> {
    if text == "0" {
        return NaiveDate::from_ymd_opt(1970, 1, 1).ok_or_else(|| "invalid epoch date".into());
    }
    Ok(NaiveDate::parse_from_str(text, "%Y-%m-%d")?)
}

impl TryFrom<CovidRow> for CovidRecord {
    type Error = Box<dyn Error>;

    fn try_from(row: CovidRow) -> Result<Self, Self::Error> {
        let date = parse_date(&row.date)?;
        Ok(CovidRecord {
            continent: row.continent,
            location: row.location,
            date,
            total_cases: row.total_cases,
            total_deaths: row.total_deaths,
            gdp_per_capita: row.gdp_per_capita,
            human_development_index: row.human_development_index,
            month: date.month(),
        })
    }
}

/// Decode a cleaned frame into typed records, deriving the month column.
pub fn to_records(frame: &Frame) -> Result<Vec<CovidRecord>, Box<dyn Error>> {
    let mut records = Vec::with_capacity(frame.rows().len());
    for row in frame.rows() {
        let raw: CovidRow = row.deserialize(Some(frame.headers()))?;
        records.push(CovidRecord::try_from(raw)?);
    }
    Ok(records)
}
