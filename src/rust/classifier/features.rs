use std::collections::HashMap;

/// Sparse bag-of-words vector: `(feature index, count)` pairs sorted by index.
pub type FeatureCounts = Vec<(usize, f64)>;

/// Provides bag-of-words feature extraction.
///
/// Implemented by the fitted vectorizer and by anything that wraps one, so
/// callers holding a `Predictor` can inspect tokenization without reaching
/// into its artifacts.
pub trait TextFeatures {
    /// Returns the fitted token to feature index map
    fn vocabulary(&self) -> &HashMap<String, usize>;

    /// Splits text into the tokens the vocabulary is keyed by
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Converts text into sparse token counts. Out-of-vocabulary tokens are
    /// dropped.
    fn transform(&self, text: &str) -> FeatureCounts;

    /// Number of features, i.e. the width of every count vector
    fn vocabulary_size(&self) -> usize {
        self.vocabulary().len()
    }

    fn feature_index(&self, token: &str) -> Option<usize> {
        self.vocabulary().get(token).copied()
    }

    /// Counts the tokens of `text`, known or not.
    fn count_tokens(&self, text: &str) -> usize {
        self.tokenize(text).len()
    }
}
