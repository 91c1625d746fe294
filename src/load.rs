use std::error::Error;
use std::io::Read;

use crate::frame::Frame;

/// Download the dataset CSV and collect it into a [`Frame`].
/// Network errors, non-success status codes and malformed CSV all propagate.
pub fn fetch_csv(url: &str) -> Result<Frame, Box<dyn Error>> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    read_csv(response)
}

pub fn read_csv<R: Read>(input: R) -> Result<Frame, Box<dyn Error>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);
    Frame::from_csv_reader(reader)
}
