//! CSV persistence for the aggregated table.

use std::error::Error;

use csv::{ReaderBuilder, WriterBuilder};

use crate::models::GroupSummary;

/// Write the aggregated table to `path`: header row from the field names,
/// one row per continent, no index column.
pub fn write_groupby_csv(path: &str, summaries: &[GroupSummary]) -> Result<(), Box<dyn Error>> {
    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read an aggregated table back from disk.
pub fn read_groupby_csv(path: &str) -> Result<Vec<GroupSummary>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut summaries = Vec::new();
    for result in reader.deserialize() {
        summaries.push(result?);
    }
    Ok(summaries)
}
