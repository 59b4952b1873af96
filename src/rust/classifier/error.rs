use std::fmt;

/// Represents the different types of errors that can occur while fitting or
/// querying the bag-of-words classifier.
#[derive(Debug)]
pub enum ClassifierError {
    /// Error occurred while building the vocabulary
    VocabularyError(String),
    /// Error occurred while fitting the naive Bayes model
    TrainingError(String),
    /// The vectorizer and the model do not describe the same feature space
    ModelError(String),
    /// Error occurred due to invalid input parameters
    ValidationError(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VocabularyError(msg) => write!(f, "Vocabulary error: {}", msg),
            Self::TrainingError(msg) => write!(f, "Training error: {}", msg),
            Self::ModelError(msg) => write!(f, "Model error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}
