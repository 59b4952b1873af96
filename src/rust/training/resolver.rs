use std::collections::{HashMap, HashSet};

use log::{info, warn};

use super::dataset::{DatasetError, Table};

/// Column names accepted for the text field, in priority order.
pub const TEXT_CANDIDATES: [&str; 4] = ["text", "tweet", "message", "content"];
/// Column names accepted for the label field, in priority order.
pub const LABEL_CANDIDATES: [&str; 3] = ["label", "sentiment", "class"];
/// Values that mark a column as holding sentiment classes.
pub const SENTIMENT_TOKENS: [&str; 7] = [
    "positive", "negative", "neutral", "irrelevant", "pos", "neg", "neu",
];

/// Stringified form of a missing cell when measuring text length.
const MISSING_CELL_TEXT: &str = "nan";

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Could not detect the text and label columns automatically. Columns found: {columns:?}")]
    Undetected { columns: Vec<String> },
    #[error("Expected columns such as 'text' and 'label' were not found and the headerless reload failed ({reason}). Columns found: {columns:?}")]
    ReloadFailed { columns: Vec<String>, reason: String },
}

impl ResolveError {
    /// Columns that were present when resolution gave up.
    pub fn columns(&self) -> &[String] {
        match self {
            ResolveError::Undetected { columns } | ResolveError::ReloadFailed { columns, .. } => columns,
        }
    }
}

/// A table with its text and label columns identified.
#[derive(Debug, Clone)]
pub struct ResolvedDataset {
    pub text_column: String,
    pub label_column: String,
    pub table: Table,
    /// Whether the columns came from the headerless content heuristics
    pub used_fallback: bool,
}

impl ResolvedDataset {
    /// `(text, label)` pairs with incomplete rows removed, plus the number of
    /// rows removed.
    pub fn training_pairs(&self) -> (Vec<(&str, &str)>, usize) {
        match (
            self.table.column_index(&self.text_column),
            self.table.column_index(&self.label_column),
        ) {
            (Some(text), Some(label)) => self.table.complete_pairs(text, label),
            _ => (Vec::new(), self.table.num_rows()),
        }
    }
}

/// First candidate present among the table's columns, compared
/// case-insensitively. Returns the column's actual name.
pub fn find_column(table: &Table, candidates: &[&str]) -> Option<String> {
    let lowered: HashMap<String, &String> = table
        .columns()
        .iter()
        .map(|c| (c.to_lowercase(), c))
        .collect();
    candidates
        .iter()
        .find_map(|candidate| lowered.get(&candidate.to_lowercase()).map(|c| (*c).clone()))
}

/// First column whose distinct lower-cased values include a sentiment token.
pub fn detect_label_column(table: &Table) -> Option<String> {
    table
        .columns()
        .iter()
        .enumerate()
        .find(|(index, _)| {
            let distinct: HashSet<String> = table
                .column_values(*index)
                .flatten()
                .map(str::to_lowercase)
                .collect();
            SENTIMENT_TOKENS.iter().any(|token| distinct.contains(*token))
        })
        .map(|(_, name)| name.clone())
}

/// Column with the longest mean value length; ties go to the earliest column.
pub fn detect_text_column(table: &Table) -> Option<String> {
    let mut best: Option<(&String, f64)> = None;
    for (index, name) in table.columns().iter().enumerate() {
        let score = mean_length(table, index);
        match best {
            Some((_, current)) if score <= current => {}
            _ => best = Some((name, score)),
        }
    }
    best.map(|(name, _)| name.clone())
}

fn mean_length(table: &Table, index: usize) -> f64 {
    if table.num_rows() == 0 {
        return 0.0;
    }
    let total: usize = table
        .column_values(index)
        .map(|cell| cell.unwrap_or(MISSING_CELL_TEXT).chars().count())
        .sum();
    total as f64 / table.num_rows() as f64
}

/// Identifies the text and label columns of `table`.
///
/// Column names are tried first. If either column cannot be named, the data
/// is reloaded without a header via `reload_headerless` and the columns are
/// inferred from their contents instead.
pub fn resolve_columns<F>(table: Table, reload_headerless: F) -> Result<ResolvedDataset, ResolveError>
where
    F: FnOnce() -> Result<Table, DatasetError>,
{
    let text_column = find_column(&table, &TEXT_CANDIDATES);
    let label_column = find_column(&table, &LABEL_CANDIDATES);

    if let (Some(text_column), Some(label_column)) = (text_column, label_column) {
        info!("Using columns '{}' (text) and '{}' (label)", text_column, label_column);
        return Ok(ResolvedDataset {
            text_column,
            label_column,
            table,
            used_fallback: false,
        });
    }

    warn!(
        "No text/label column names among {:?}; inferring columns from content",
        table.columns()
    );
    let headerless = reload_headerless().map_err(|e| ResolveError::ReloadFailed {
        columns: table.columns().to_vec(),
        reason: e.to_string(),
    })?;

    let label_column = detect_label_column(&headerless);
    let text_column = detect_text_column(&headerless);

    match (text_column, label_column) {
        (Some(text_column), Some(label_column)) => {
            info!(
                "Detected columns '{}' (text) and '{}' (label)",
                text_column, label_column
            );
            Ok(ResolvedDataset {
                text_column,
                label_column,
                table: headerless,
                used_fallback: true,
            })
        }
        _ => Err(ResolveError::Undetected {
            columns: headerless.columns().to_vec(),
        }),
    }
}
