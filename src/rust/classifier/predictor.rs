use std::collections::HashMap;

use log::{debug, info, warn};
use ndarray::Array1;
use serde::Serialize;

use super::error::ClassifierError;
use super::features::{FeatureCounts, TextFeatures};
use super::labels::{normalize_label, ClassLabel};
use super::model::MultinomialNb;
use super::utils::round_to;
use super::vectorizer::CountVectorizer;
use crate::artifacts::{ArtifactError, ArtifactStore};

/// Decimal digits kept in the reported confidence, per serving adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Four digits, used by the HTTP API
    Http,
    /// Five digits, used by the command line
    Cli,
}

impl Precision {
    pub fn digits(self) -> u32 {
        match self {
            Precision::Http => 4,
            Precision::Cli => 5,
        }
    }
}

/// Where the reported confidence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceSource {
    /// Posterior of the predicted class itself
    PredictedClass,
    /// The predicted class could not be located in the class list; the
    /// largest posterior was reported instead
    MaxProbabilityFallback,
}

/// A single classification, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub input: String,
    pub prediction: String,
    pub confidence: f64,
    #[serde(skip)]
    pub source: ConfidenceSource,
}

/// Information about the loaded artifacts
#[derive(Debug, Clone)]
pub struct PredictorInfo {
    /// Classes as they appear in the training data
    pub class_labels: Vec<String>,
    /// Number of classes the model was trained on
    pub num_classes: usize,
    /// Number of tokens in the fitted vocabulary
    pub vocabulary_size: usize,
    /// Whether the vocabulary was built from case-folded text
    pub lowercase_vocabulary: bool,
    /// Smoothing the model was fitted with
    pub alpha: f64,
}

/// The immutable inference context: a fitted vectorizer and model.
///
/// Built once at startup and shared read-only by every request handler
/// (wrap it in `Arc` or `actix_web::web::Data`).
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use sentimiento::{ClassLabel, CountVectorizer, MultinomialNb, Precision, Predictor, TextFeatures};
///
/// let documents = ["I love this", "I hate this"];
/// let (vectorizer, counts) = CountVectorizer::fit_transform(&documents, true)?;
/// let labels = ClassLabel::from_raw_values(&["positive", "negative"]);
/// let model = MultinomialNb::fit(&counts, &labels, vectorizer.vocabulary_size(), 1.0)?;
/// let predictor = Predictor::new(vectorizer, model)?;
///
/// let prediction = predictor.predict("I love this", Precision::Http);
/// assert_eq!(prediction.prediction, "positivo");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Predictor {
    vectorizer: CountVectorizer,
    model: MultinomialNb,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Predictor>();
    }
};

impl TextFeatures for Predictor {
    fn vocabulary(&self) -> &HashMap<String, usize> {
        self.vectorizer.vocabulary()
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        self.vectorizer.tokenize(text)
    }

    fn transform(&self, text: &str) -> FeatureCounts {
        self.vectorizer.transform(text)
    }
}

impl Predictor {
    /// Pairs a vectorizer with a model fitted on its feature space.
    ///
    /// # Errors
    /// Returns `ModelError` if the model was fitted on a feature space of a
    /// different width than the vectorizer's vocabulary.
    pub fn new(vectorizer: CountVectorizer, model: MultinomialNb) -> Result<Self, ClassifierError> {
        if vectorizer.vocabulary_size() != model.n_features() {
            return Err(ClassifierError::ModelError(format!(
                "vectorizer has {} features but the model expects {}",
                vectorizer.vocabulary_size(),
                model.n_features()
            )));
        }
        Ok(Self { vectorizer, model })
    }

    /// Loads both artifacts from `store`.
    pub fn load(store: &ArtifactStore) -> Result<Self, ArtifactError> {
        let (vectorizer, model) = store.load()?;
        let predictor = Self::new(vectorizer, model)?;
        info!(
            "Predictor ready: {} classes, {} features",
            predictor.model.classes().len(),
            predictor.vectorizer.vocabulary_size()
        );
        Ok(predictor)
    }

    pub fn model(&self) -> &MultinomialNb {
        &self.model
    }

    pub fn vectorizer(&self) -> &CountVectorizer {
        &self.vectorizer
    }

    /// Returns information about the loaded artifacts
    pub fn info(&self) -> PredictorInfo {
        PredictorInfo {
            class_labels: self.model.classes().iter().map(ToString::to_string).collect(),
            num_classes: self.model.classes().len(),
            vocabulary_size: self.vectorizer.vocabulary_size(),
            lowercase_vocabulary: self.vectorizer.lowercase(),
            alpha: self.model.alpha(),
        }
    }

    /// Classifies `text` and reports the normalized label and its confidence.
    ///
    /// The text is case folded before vectorization. Empty text is valid and
    /// is scored on the class priors alone.
    pub fn predict(&self, text: &str, precision: Precision) -> Prediction {
        let clean = text.to_lowercase();
        let features = self.vectorizer.transform(&clean);
        let posterior = self.model.posterior(&features);

        let (confidence, source) =
            lookup_confidence(self.model.classes(), &posterior.probabilities, &posterior.predicted);
        if source == ConfidenceSource::MaxProbabilityFallback {
            warn!("Predicted class {} not found among model classes", posterior.predicted);
        }

        let prediction = normalize_label(&posterior.predicted);
        debug!("Classified {:?} as {} ({})", text, posterior.predicted, prediction);

        Prediction {
            input: text.to_string(),
            prediction,
            confidence: round_to(confidence, precision.digits()),
            source,
        }
    }
}

/// Finds the posterior of `predicted` in `probabilities`, falling back to the
/// largest posterior if the class cannot be located.
pub fn lookup_confidence(
    classes: &[ClassLabel],
    probabilities: &Array1<f64>,
    predicted: &ClassLabel,
) -> (f64, ConfidenceSource) {
    let found = classes
        .iter()
        .position(|c| c == predicted)
        .and_then(|index| probabilities.get(index).copied());

    match found {
        Some(p) => (p, ConfidenceSource::PredictedClass),
        None => {
            let max = probabilities.iter().copied().fold(0.0, f64::max);
            (max, ConfidenceSource::MaxProbabilityFallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::labels::{NEGATIVE, POSITIVE};
    use ndarray::array;

    fn text(s: &str) -> ClassLabel {
        ClassLabel::Text(s.to_string())
    }

    fn setup_predictor(documents: &[&str], labels: &[&str]) -> Predictor {
        let (vectorizer, counts) = CountVectorizer::fit_transform(documents, true).unwrap();
        let labels = ClassLabel::from_raw_values(labels);
        let model = MultinomialNb::fit(&counts, &labels, vectorizer.vocabulary_size(), 1.0).unwrap();
        Predictor::new(vectorizer, model).unwrap()
    }

    #[test]
    fn test_predict_positive() {
        let predictor = setup_predictor(&["I love this", "I hate this"], &["positive", "negative"]);
        let prediction = predictor.predict("I love this", Precision::Http);
        assert_eq!(prediction.input, "I love this");
        assert_eq!(prediction.prediction, POSITIVE);
        assert_eq!(prediction.confidence, 0.6667);
        assert_eq!(prediction.source, ConfidenceSource::PredictedClass);
    }

    #[test]
    fn test_precision_per_adapter() {
        let predictor = setup_predictor(&["I love this", "I hate this"], &["positive", "negative"]);
        assert_eq!(predictor.predict("love", Precision::Http).confidence, 0.6667);
        assert_eq!(predictor.predict("love", Precision::Cli).confidence, 0.66667);
    }

    #[test]
    fn test_input_is_case_folded() {
        let predictor = setup_predictor(&["I love this", "I hate this"], &["positive", "negative"]);
        let upper = predictor.predict("LOVE", Precision::Cli);
        let lower = predictor.predict("love", Precision::Cli);
        assert_eq!(upper.prediction, lower.prediction);
        assert_eq!(upper.confidence, lower.confidence);
        assert_eq!(upper.input, "LOVE");
    }

    #[test]
    fn test_numeric_classes() {
        let predictor = setup_predictor(&["great movie", "awful movie"], &["1", "0"]);
        assert_eq!(predictor.predict("great", Precision::Http).prediction, POSITIVE);
        assert_eq!(predictor.predict("awful", Precision::Http).prediction, NEGATIVE);
    }

    #[test]
    fn test_unmatched_class_passes_through() {
        let predictor = setup_predictor(
            &["fine okay whatever", "love love", "hate hate"],
            &["Neutral", "Positive", "Negative"],
        );
        assert_eq!(predictor.predict("whatever okay", Precision::Http).prediction, "Neutral");
    }

    #[test]
    fn test_mismatched_artifacts_are_rejected() {
        let (vectorizer, _) = CountVectorizer::fit_transform(&["one two three"], true).unwrap();
        let model = MultinomialNb::fit(&[vec![(0, 1.0)]], &[text("x")], 1, 1.0).unwrap();
        assert!(matches!(
            Predictor::new(vectorizer, model),
            Err(ClassifierError::ModelError(_))
        ));
    }

    #[test]
    fn test_lookup_confidence_uses_predicted_class() {
        let classes = vec![text("negative"), text("positive")];
        let (confidence, source) = lookup_confidence(&classes, &array![0.3, 0.7], &text("negative"));
        assert_eq!(confidence, 0.3);
        assert_eq!(source, ConfidenceSource::PredictedClass);
    }

    #[test]
    fn test_lookup_confidence_falls_back_to_max() {
        let classes = vec![text("negative"), text("positive")];
        let (confidence, source) = lookup_confidence(&classes, &array![0.3, 0.7], &text("neutral"));
        assert_eq!(confidence, 0.7);
        assert_eq!(source, ConfidenceSource::MaxProbabilityFallback);

        let (confidence, source) = lookup_confidence(&classes, &array![0.9], &text("positive"));
        assert_eq!(confidence, 0.9);
        assert_eq!(source, ConfidenceSource::MaxProbabilityFallback);
    }

    #[test]
    fn test_info() {
        let predictor = setup_predictor(&["I love this", "I hate this"], &["positive", "negative"]);
        let info = predictor.info();
        assert_eq!(info.num_classes, 2);
        assert_eq!(info.class_labels, vec!["negative", "positive"]);
        assert_eq!(info.vocabulary_size, 3);
        assert!(info.lowercase_vocabulary);
    }
}
