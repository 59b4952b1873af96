use std::path::PathBuf;

use super::trainer::{Trainer, TrainingError};
use crate::artifacts::ArtifactStore;
use crate::classifier::DEFAULT_ALPHA;
use crate::config::{DEFAULT_DATASET_PATH, DEFAULT_MODELS_DIR};

/// Settings of a training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// CSV file to train on
    pub dataset_path: PathBuf,
    /// Additive smoothing for the naive Bayes model
    pub alpha: f64,
    /// Whether the vocabulary is built from case-folded text. Inference
    /// always case folds its input.
    pub lowercase: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            alpha: DEFAULT_ALPHA,
            lowercase: true,
        }
    }
}

/// A builder for constructing a `Trainer` with a fluent interface.
#[derive(Default, Debug)]
pub struct TrainerBuilder {
    config: TrainingConfig,
    store: Option<ArtifactStore>,
}

impl TrainerBuilder {
    /// Creates a builder with the default dataset path, models directory and
    /// smoothing.
    ///
    /// # Example
    /// ```
    /// use sentimiento::TrainerBuilder;
    ///
    /// let trainer = TrainerBuilder::new()
    ///     .with_dataset("data/dataset.csv")
    ///     .with_models_dir("models")
    ///     .build();
    /// assert!(trainer.is_ok());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CSV file to train on
    pub fn with_dataset(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.dataset_path = path.into();
        self
    }

    /// Sets where the fitted artifacts are written
    pub fn with_models_dir(mut self, models_dir: impl Into<PathBuf>) -> Self {
        self.store = Some(ArtifactStore::new(models_dir.into()));
        self
    }

    pub fn with_artifact_store(mut self, store: ArtifactStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the naive Bayes smoothing
    ///
    /// # Errors
    /// Returns `Config` if `alpha` is not a positive finite number.
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self, TrainingError> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(TrainingError::Config(format!(
                "alpha must be a positive number, got {}",
                alpha
            )));
        }
        self.config.alpha = alpha;
        Ok(self)
    }

    /// Keeps the training text's case when building the vocabulary.
    ///
    /// Inference still lower-cases its input, so capitalized training tokens
    /// can never be matched at prediction time.
    pub fn preserve_case(mut self, preserve: bool) -> Self {
        self.config.lowercase = !preserve;
        self
    }

    pub fn build(self) -> Result<Trainer, TrainingError> {
        if self.config.dataset_path.as_os_str().is_empty() {
            return Err(TrainingError::Config("dataset path cannot be empty".into()));
        }
        let store = self
            .store
            .unwrap_or_else(|| ArtifactStore::new(DEFAULT_MODELS_DIR));
        if store.models_dir().as_os_str().is_empty() {
            return Err(TrainingError::Config("models directory cannot be empty".into()));
        }
        Ok(Trainer::new(self.config, store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let trainer = TrainerBuilder::new().build().unwrap();
        assert_eq!(trainer.config(), &TrainingConfig::default());
        assert!(trainer.store().models_dir().ends_with(DEFAULT_MODELS_DIR));
    }

    #[test]
    fn test_alpha_validation() {
        assert!(TrainerBuilder::new().with_alpha(0.0).is_err());
        assert!(TrainerBuilder::new().with_alpha(-1.0).is_err());
        assert!(TrainerBuilder::new().with_alpha(f64::NAN).is_err());
        assert!(TrainerBuilder::new().with_alpha(0.5).is_ok());
    }

    #[test]
    fn test_empty_paths_are_rejected() {
        assert!(matches!(
            TrainerBuilder::new().with_dataset("").build(),
            Err(TrainingError::Config(_))
        ));
        assert!(matches!(
            TrainerBuilder::new().with_models_dir("").build(),
            Err(TrainingError::Config(_))
        ));
    }

    #[test]
    fn test_preserve_case() {
        let trainer = TrainerBuilder::new().preserve_case(true).build().unwrap();
        assert!(!trainer.config().lowercase);
    }
}
