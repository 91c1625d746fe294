use std::error::Error;

use covid_eda::{aggregate, clean, eda, load, models, output, visualize};

fn main() -> Result<(), Box<dyn Error>> {
    let url = "https://raw.githubusercontent.com/SR1608/Datasets/main/covid-data.csv";
    let groupby_csv = "df_groupby.csv";

    // 1. Load the dataset
    println!("Downloading dataset from {}", url);
    let df = load::fetch_csv(url)?;

    // 2. High level overview
    let (rows, cols) = df.shape();
    println!("Rows: {}, Columns: {}", rows, cols);

    println!("\nColumns:");
    for info in eda::info(&df) {
        println!(
            "{:<45} {:>8} non-missing   {}",
            info.name, info.non_missing, info.dtype
        );
    }

    println!("\nSummary statistics (numeric columns):");
    for s in eda::describe(&df) {
        println!(
            "{:<45} count={:<7} mean={:<15.3} std={:<15.3} min={:<13.3} q1={:<13.3} median={:<13.3} q3={:<13.3} max={:.3}",
            s.name, s.count, s.mean, s.std_dev, s.min, s.q1, s.median, s.q3, s.max
        );
    }

    // 3. Low level queries
    println!();
    println!(
        "Distinct locations: {}",
        eda::distinct_count(&df, "location")?
    );
    match eda::most_frequent(&df, "continent")? {
        Some(continent) => println!("Most frequent continent: {}", continent),
        None => println!("Most frequent continent: n/a"),
    }
    println!("Max total_cases: {:.3}", eda::column_max(&df, "total_cases")?);
    println!(
        "Mean total_cases: {:.3}",
        eda::column_mean(&df, "total_cases")?
    );
    let (q1, median, q3) = eda::quartiles(&df, "total_deaths")?;
    println!(
        "total_deaths quartiles: q1={:.3} median={:.3} q3={:.3}",
        q1, median, q3
    );
    if let Some(continent) = eda::category_at_max(&df, "human_development_index", "continent")? {
        println!("Continent with max human_development_index: {}", continent);
    }
    if let Some(continent) = eda::category_at_min(&df, "gdp_per_capita", "continent")? {
        println!("Continent with min gdp_per_capita: {}", continent);
    }

    // 4. Keep only the columns the analysis needs
    let df = df.select(&models::SELECTED_COLUMNS)?;

    // 5. Clean: duplicates, missing report, required continent, zero fill
    let df = clean::drop_duplicates(df);
    println!("\nMissing values per column:");
    for (name, missing) in eda::missing_counts(&df) {
        println!("{:<30} {}", name, missing);
    }
    let df = clean::drop_missing(df, "continent")?;
    let df = clean::fill_missing(df, "0");
    let (rows, cols) = df.shape();
    println!("After cleaning: {} rows, {} columns", rows, cols);

    // 6. Parse dates and derive the month column
    let records = models::to_records(&df)?;

    // 7./8. Per-continent maxima plus the deaths-to-cases ratio
    let mut summaries = aggregate::group_max_by_continent(&records);
    aggregate::derive_death_case_ratio(&mut summaries);
    println!("Aggregated {} continents", summaries.len());

    // 9. Charts
    let gdp: Vec<f64> = summaries.iter().map(|s| s.gdp_per_capita).collect();
    let cases: Vec<f64> = summaries.iter().map(|s| s.total_cases).collect();
    let continents: Vec<String> = summaries.iter().map(|s| s.continent.clone()).collect();
    visualize::histogram(
        &gdp,
        "Histogram of GDP per Capita",
        "gdp_per_capita",
        "gdp_per_capita_histogram.png",
    )?;
    visualize::scatter(
        &gdp,
        &cases,
        "Total Cases vs GDP per Capita",
        "gdp_per_capita",
        "total_cases",
        "total_cases_vs_gdp.png",
    )?;
    visualize::pairplot(&summaries, "pairplot.png")?;
    visualize::bar_chart(
        &continents,
        &cases,
        "Total Cases by Continent",
        "total_cases",
        "total_cases_by_continent.png",
    )?;

    // 10. Persist the aggregated table
    output::write_groupby_csv(groupby_csv, &summaries)?;
    println!("Aggregated table written to {}", groupby_csv);

    Ok(())
}
