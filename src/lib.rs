//! Exploratory analysis pipeline for a COVID-19 dataset: fetch the CSV,
//! inspect it, clean it, aggregate per continent, then render charts and a
//! CSV artifact.

pub mod aggregate;
pub mod clean;
pub mod eda;
pub mod frame;
pub mod load;
pub mod models;
pub mod output;
pub mod visualize;
