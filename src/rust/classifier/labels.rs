use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized label for classes that read as positive sentiment.
pub const POSITIVE: &str = "positivo";
/// Normalized label for classes that read as negative sentiment.
pub const NEGATIVE: &str = "negativo";

const POSITIVE_MARKERS: [&str; 3] = ["pos", "positive", "positivo"];
const NEGATIVE_MARKERS: [&str; 3] = ["neg", "negative", "negativo"];

/// A class the model was trained on.
///
/// A label column whose non-missing values all parse as numbers yields
/// `Numeric` classes; anything else keeps every value as `Text`. The class
/// set of a fitted model is always homogeneous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassLabel {
    Numeric(f64),
    Text(String),
}

impl ClassLabel {
    /// Types a raw label column in one pass.
    ///
    /// # Example
    /// ```
    /// use sentimiento::ClassLabel;
    ///
    /// let labels = ClassLabel::from_raw_values(&["1", "0", "1"]);
    /// assert_eq!(labels[0], ClassLabel::Numeric(1.0));
    ///
    /// let labels = ClassLabel::from_raw_values(&["positive", "0"]);
    /// assert_eq!(labels[1], ClassLabel::Text("0".to_string()));
    /// ```
    pub fn from_raw_values<S: AsRef<str>>(values: &[S]) -> Vec<ClassLabel> {
        let numeric: Option<Vec<f64>> = values
            .iter()
            .map(|v| parse_number(v.as_ref()))
            .collect();

        match numeric {
            Some(numbers) if !numbers.is_empty() => {
                numbers.into_iter().map(ClassLabel::Numeric).collect()
            }
            _ => values
                .iter()
                .map(|v| ClassLabel::Text(v.as_ref().to_string()))
                .collect(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ClassLabel::Numeric(_))
    }

    /// Total order used to sort the class set: numbers ascending, text by
    /// code point.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ClassLabel::Numeric(a), ClassLabel::Numeric(b)) => a.total_cmp(b),
            (ClassLabel::Text(a), ClassLabel::Text(b)) => a.cmp(b),
            (ClassLabel::Numeric(_), ClassLabel::Text(_)) => Ordering::Less,
            (ClassLabel::Text(_), ClassLabel::Numeric(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassLabel::Numeric(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            ClassLabel::Numeric(v) => write!(f, "{}", v),
            ClassLabel::Text(s) => f.write_str(s),
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Maps a predicted class to the label reported to callers.
///
/// Numeric classes are read as binary sentiment: `1` is positive, any other
/// number negative. Text classes are searched case-insensitively for positive
/// markers first, then negative ones; a class matching neither (e.g.
/// `neutral`) is passed through unchanged.
pub fn normalize_label(class: &ClassLabel) -> String {
    match class {
        ClassLabel::Numeric(v) => {
            if *v == 1.0 {
                POSITIVE.to_string()
            } else {
                NEGATIVE.to_string()
            }
        }
        ClassLabel::Text(raw) => {
            let lowered = raw.to_lowercase();
            if POSITIVE_MARKERS.iter().any(|m| lowered.contains(m)) {
                POSITIVE.to_string()
            } else if NEGATIVE_MARKERS.iter().any(|m| lowered.contains(m)) {
                NEGATIVE.to_string()
            } else {
                raw.clone()
            }
        }
    }
}
