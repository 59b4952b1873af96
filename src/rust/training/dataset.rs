use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::{debug, info};

/// Cell values read as missing, in addition to the empty field.
const MISSING_MARKERS: [&str; 19] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null", "",
];

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Dataset file '{0}' does not exist")]
    NotFound(String),
    #[error("Dataset file '{0}' is empty; no columns to parse")]
    Empty(String),
    #[error("Failed to parse dataset '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// How the first CSV record is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    /// The first record names the columns
    FirstRow,
    /// Every record is data; columns are named `col0`, `col1`, ...
    None,
}

/// A loaded CSV: named columns and rows of optional cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Builds a table, padding short rows with missing cells.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|cell| cell.as_deref()))
    }

    /// Pairs of cells from two columns, skipping rows where either is missing.
    /// Returns the pairs and the number of rows skipped.
    pub fn complete_pairs(&self, first: usize, second: usize) -> (Vec<(&str, &str)>, usize) {
        let mut pairs = Vec::with_capacity(self.rows.len());
        let mut dropped = 0;
        for (a, b) in self.column_values(first).zip(self.column_values(second)) {
            match (a, b) {
                (Some(a), Some(b)) => pairs.push((a, b)),
                _ => dropped += 1,
            }
        }
        (pairs, dropped)
    }
}

/// Reads a CSV file into a `Table`.
///
/// # Errors
/// * `NotFound` if the file does not exist
/// * `Empty` if the file holds no records at all
/// * `Parse` if the CSV is malformed
pub fn read_csv<P: AsRef<Path>>(path: P, header: HeaderMode) -> Result<Table, DatasetError> {
    let path = path.as_ref();
    let name = path.display().to_string();
    if !path.exists() {
        return Err(DatasetError::NotFound(name));
    }
    let file = File::open(path)?;
    read_csv_from_reader(file, header, &name)
}

/// Reads CSV data from any reader; `source_name` is only used in errors.
pub fn read_csv_from_reader<R: Read>(
    reader: R,
    header: HeaderMode,
    source_name: &str,
) -> Result<Table, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records: Vec<Vec<Option<String>>> = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(|source| DatasetError::Parse {
            path: source_name.to_string(),
            source,
        })?;
        records.push(
            record
                .iter()
                .map(|field| parse_cell(&String::from_utf8_lossy(field)))
                .collect(),
        );
    }

    if records.is_empty() {
        return Err(DatasetError::Empty(source_name.to_string()));
    }

    let width = records.iter().map(Vec::len).max().unwrap_or(0);
    let columns = match header {
        HeaderMode::FirstRow => header_names(records.remove(0), width),
        HeaderMode::None => (0..width).map(|i| format!("col{}", i)).collect(),
    };

    info!(
        "Loaded {} rows x {} columns from '{}' ({:?} header)",
        records.len(),
        columns.len(),
        source_name,
        header
    );
    debug!("Columns: {:?}", columns);
    Ok(Table::new(columns, records))
}

fn parse_cell(field: &str) -> Option<String> {
    if MISSING_MARKERS.contains(&field) {
        None
    } else {
        Some(field.to_string())
    }
}

/// Names for a header record: blank names become `Unnamed: i` and repeated
/// names get a `.n` suffix.
fn header_names(record: Vec<Option<String>>, width: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(width);
    for i in 0..width {
        let base = record
            .get(i)
            .cloned()
            .flatten()
            .unwrap_or_else(|| format!("Unnamed: {}", i));
        let mut name = base.clone();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        names.push(name);
    }
    names
}
