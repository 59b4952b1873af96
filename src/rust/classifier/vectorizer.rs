use std::collections::{BTreeMap, BTreeSet, HashMap};

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::features::{FeatureCounts, TextFeatures};

lazy_static! {
    /// Tokens are runs of two or more word characters.
    static ref TOKEN_PATTERN: Regex = Regex::new(r"(?u)\b\w\w+\b")
        .expect("token pattern is a valid regex");
}

/// A bag-of-words vectorizer mapping tokens to fixed feature indices.
///
/// The vocabulary is sorted lexicographically at fit time, so the feature
/// index of a token only depends on the set of training tokens. Once fitted
/// the vectorizer is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountVectorizer {
    vocabulary: HashMap<String, usize>,
    lowercase: bool,
}

impl CountVectorizer {
    /// Learns the vocabulary of `documents`.
    ///
    /// # Arguments
    /// * `documents` - The training texts
    /// * `lowercase` - Whether tokens are case folded before counting
    ///
    /// # Errors
    /// Returns `VocabularyError` if no document contains a single token.
    pub fn fit<S: AsRef<str>>(documents: &[S], lowercase: bool) -> Result<Self, ClassifierError> {
        let mut tokens = BTreeSet::new();
        for document in documents {
            tokens.extend(tokenize(document.as_ref(), lowercase));
        }

        if tokens.is_empty() {
            return Err(ClassifierError::VocabularyError(
                "empty vocabulary; the documents contain no tokens".into(),
            ));
        }

        let vocabulary: HashMap<String, usize> = tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| (token, index))
            .collect();
        info!("Fitted vocabulary with {} tokens", vocabulary.len());

        Ok(Self { vocabulary, lowercase })
    }

    /// Fits the vocabulary and returns the count vectors of the same documents.
    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
        lowercase: bool,
    ) -> Result<(Self, Vec<FeatureCounts>), ClassifierError> {
        let vectorizer = Self::fit(documents, lowercase)?;
        let counts = documents
            .iter()
            .map(|d| vectorizer.transform(d.as_ref()))
            .collect();
        Ok((vectorizer, counts))
    }

    pub fn lowercase(&self) -> bool {
        self.lowercase
    }

    /// Tokens in feature-index order.
    pub fn feature_names(&self) -> Vec<&str> {
        let mut names: Vec<(&str, usize)> = self
            .vocabulary
            .iter()
            .map(|(token, &index)| (token.as_str(), index))
            .collect();
        names.sort_by_key(|&(_, index)| index);
        names.into_iter().map(|(token, _)| token).collect()
    }
}

impl TextFeatures for CountVectorizer {
    fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text, self.lowercase)
    }

    fn transform(&self, text: &str) -> FeatureCounts {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        let mut unknown = 0usize;
        for token in self.tokenize(text) {
            match self.vocabulary.get(&token) {
                Some(&index) => *counts.entry(index).or_insert(0.0) += 1.0,
                None => unknown += 1,
            }
        }
        if unknown > 0 {
            debug!("Ignored {} out-of-vocabulary tokens", unknown);
        }
        counts.into_iter().collect()
    }
}

fn tokenize(text: &str, lowercase: bool) -> Vec<String> {
    let source = if lowercase {
        std::borrow::Cow::Owned(text.to_lowercase())
    } else {
        std::borrow::Cow::Borrowed(text)
    };
    TOKEN_PATTERN
        .find_iter(&source)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = CountVectorizer::fit(&["the cat sat", "a dog ran"], true).unwrap();
        assert_eq!(vectorizer.feature_names(), vec!["cat", "dog", "ran", "sat", "the"]);
    }

    #[test]
    fn test_single_character_tokens_are_skipped() {
        let vectorizer = CountVectorizer::fit(&["I love this"], true).unwrap();
        assert_eq!(vectorizer.vocabulary_size(), 2);
        assert!(vectorizer.feature_index("i").is_none());
    }

    #[test]
    fn test_transform_counts_repeated_tokens() {
        let vectorizer = CountVectorizer::fit(&["good good bad"], true).unwrap();
        let counts = vectorizer.transform("good GOOD good bad");
        assert_eq!(counts, vec![(0, 1.0), (1, 3.0)]);
    }

    #[test]
    fn test_out_of_vocabulary_tokens_are_ignored() {
        let vectorizer = CountVectorizer::fit(&["good bad"], true).unwrap();
        assert!(vectorizer.transform("completely unseen words").is_empty());
        assert!(vectorizer.transform("").is_empty());
    }

    #[test]
    fn test_case_is_preserved_when_requested() {
        let vectorizer = CountVectorizer::fit(&["Love love"], false).unwrap();
        assert_eq!(vectorizer.vocabulary_size(), 2);
        assert_eq!(vectorizer.transform("love"), vec![(1, 1.0)]);
    }

    #[test]
    fn test_unicode_words() {
        let vectorizer = CountVectorizer::fit(&["película increíble"], true).unwrap();
        assert!(vectorizer.feature_index("película").is_some());
        assert!(vectorizer.feature_index("increíble").is_some());
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let result = CountVectorizer::fit(&["a b c", ""], true);
        assert!(matches!(result, Err(ClassifierError::VocabularyError(_))));
    }
}
