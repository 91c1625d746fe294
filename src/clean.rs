//! Cleaning passes over the raw table, applied in a fixed order:
//! duplicates out, rows without the required key out, remaining gaps filled.

use std::collections::HashSet;

use csv::StringRecord;
use std::error::Error;

use crate::frame::Frame;

/// Remove rows that are full duplicates of an earlier row, keeping the
/// first occurrence.
pub fn drop_duplicates(frame: Frame) -> Frame {
    let (headers, rows) = frame.into_parts();
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let rows: Vec<StringRecord> = rows
        .into_iter()
        .filter(|row| seen.insert(row.iter().map(str::to_string).collect()))
        .collect();
    Frame::new(headers, rows)
}

/// Remove rows where the designated required column is missing.
pub fn drop_missing(frame: Frame, column: &str) -> Result<Frame, Box<dyn Error>> {
    let idx = frame.index_of(column)?;
    let (headers, rows) = frame.into_parts();
    let rows: Vec<StringRecord> = rows
        .into_iter()
        .filter(|row| !row.get(idx).unwrap_or("").is_empty())
        .collect();
    Ok(Frame::new(headers, rows))
}

/// Replace every remaining missing cell with `fill`, across all columns
/// alike. The grouped table downstream expects the literal `"0"` here.
pub fn fill_missing(frame: Frame, fill: &str) -> Frame {
    let (headers, rows) = frame.into_parts();
    let rows: Vec<StringRecord> = rows
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|cell| if cell.is_empty() { fill } else { cell })
                .collect()
        })
        .collect();
    Frame::new(headers, rows)
}
