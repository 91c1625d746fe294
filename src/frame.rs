use csv::StringRecord;
use std::error::Error;
use std::io::Read;

/// In-memory table: a header row plus data rows in load order.
/// A missing value is an empty cell.
pub struct Frame {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Frame {
    pub fn new(headers: StringRecord, rows: Vec<StringRecord>) -> Self {
        Self { headers, rows }
    }

    pub fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, Box<dyn Error>> {
        let headers = reader.headers()?.clone();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?);
        }
        Ok(Self { headers, rows })
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn into_parts(self) -> (StringRecord, Vec<StringRecord>) {
        (self.headers, self.rows)
    }

    pub fn index_of(&self, name: &str) -> Result<usize, Box<dyn Error>> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| format!("column '{}' not found", name).into())
    }

    pub fn column(&self, name: &str) -> Result<Vec<&str>, Box<dyn Error>> {
        let idx = self.index_of(name)?;
        Ok(self.rows.iter().map(|row| row.get(idx).unwrap_or("")).collect())
    }

    /// Numeric view of a column; missing or unparseable cells become `None`.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, Box<dyn Error>> {
        Ok(self
            .column(name)?
            .into_iter()
            .map(|cell| cell.parse::<f64>().ok())
            .collect())
    }

    /// Restrict the table to exactly the named columns, in the given order.
    /// Row order and count are preserved.
    pub fn select(&self, names: &[&str]) -> Result<Frame, Box<dyn Error>> {
        let indices = names
            .iter()
            .map(|name| self.index_of(name))
            .collect::<Result<Vec<_>, _>>()?;
        let headers: StringRecord = names.iter().collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row.get(i).unwrap_or("")).collect())
            .collect();
        Ok(Frame { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frame {
        let data = "a,b,c\n1,x,10\n2,y,\n3,z,30\n";
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes());
        Frame::from_csv_reader(reader).unwrap()
    }

    #[test]
    fn shape_counts_rows_and_columns() {
        assert_eq!(sample().shape(), (3, 3));
    }

    #[test]
    fn select_restricts_columns_and_keeps_rows() {
        let projected = sample().select(&["c", "a"]).unwrap();
        assert_eq!(projected.shape(), (3, 2));
        let names: Vec<&str> = projected.headers().iter().collect();
        assert_eq!(names, vec!["c", "a"]);
        assert_eq!(projected.rows()[0].get(0), Some("10"));
        assert_eq!(projected.rows()[0].get(1), Some("1"));
        assert_eq!(projected.rows()[2].get(0), Some("30"));
    }

    #[test]
    fn select_unknown_column_is_an_error() {
        assert!(sample().select(&["a", "nope"]).is_err());
    }

    #[test]
    fn numeric_column_maps_missing_to_none() {
        let values = sample().numeric_column("c").unwrap();
        assert_eq!(values, vec![Some(10.0), None, Some(30.0)]);
    }

    #[test]
    fn column_lookup_by_unknown_name_fails() {
        assert!(sample().column("missing").is_err());
    }
}
