use log::{info, warn};

use super::builder::{TrainerBuilder, TrainingConfig};
use super::dataset::{self, DatasetError, HeaderMode};
use super::resolver::{self, ResolveError, ResolvedDataset};
use crate::artifacts::{ArtifactError, ArtifactStore};
use crate::classifier::{ClassLabel, ClassifierError, CountVectorizer, MultinomialNb, TextFeatures};

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("No usable rows: all {0} rows are missing their text or their label")]
    NoUsableRows(usize),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error("Invalid training configuration: {0}")]
    Config(String),
}

/// A vectorizer and model fitted together, not yet persisted.
#[derive(Debug, Clone)]
pub struct FittedArtifacts {
    pub vectorizer: CountVectorizer,
    pub model: MultinomialNb,
}

/// Summary of a finished training run
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub text_column: String,
    pub label_column: String,
    /// Whether the columns were inferred from a headerless reload
    pub used_fallback: bool,
    pub rows_used: usize,
    pub rows_dropped: usize,
    pub vocabulary_size: usize,
    /// Classes as they appear in the dataset
    pub classes: Vec<String>,
}

/// Fits the vectorizer and the naive Bayes model from a CSV dataset and
/// persists both.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
    store: ArtifactStore,
}

impl Trainer {
    /// Creates a new TrainerBuilder for fluent construction
    pub fn builder() -> TrainerBuilder {
        TrainerBuilder::new()
    }

    pub(crate) fn new(config: TrainingConfig, store: ArtifactStore) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Runs the whole pipeline: load, resolve columns, fit, persist.
    ///
    /// Nothing is written unless every earlier step succeeded; on success any
    /// previous artifacts are overwritten.
    pub fn train(&self) -> Result<TrainingReport, TrainingError> {
        let path = &self.config.dataset_path;
        info!("Training from {:?}", path);

        let table = dataset::read_csv(path, HeaderMode::FirstRow)?;
        let resolved = resolver::resolve_columns(table, || dataset::read_csv(path, HeaderMode::None))?;

        let (fitted, report) = self.fit_with_report(&resolved)?;
        self.store.save(&fitted.vectorizer, &fitted.model)?;

        info!(
            "Training complete: {} rows used, {} dropped, {} classes",
            report.rows_used,
            report.rows_dropped,
            report.classes.len()
        );
        Ok(report)
    }

    /// Fits both artifacts on an already resolved dataset without persisting
    /// them.
    pub fn fit(&self, resolved: &ResolvedDataset) -> Result<FittedArtifacts, TrainingError> {
        self.fit_with_report(resolved).map(|(fitted, _)| fitted)
    }

    fn fit_with_report(
        &self,
        resolved: &ResolvedDataset,
    ) -> Result<(FittedArtifacts, TrainingReport), TrainingError> {
        let (pairs, rows_dropped) = resolved.training_pairs();
        if pairs.is_empty() {
            return Err(TrainingError::NoUsableRows(rows_dropped));
        }
        if rows_dropped > 0 {
            warn!("Dropped {} rows with a missing text or label", rows_dropped);
        }

        let (texts, raw_labels): (Vec<&str>, Vec<&str>) = pairs.into_iter().unzip();
        let labels = ClassLabel::from_raw_values(&raw_labels);

        let (vectorizer, counts) = CountVectorizer::fit_transform(&texts, self.config.lowercase)?;
        let model = MultinomialNb::fit(
            &counts,
            &labels,
            vectorizer.vocabulary_size(),
            self.config.alpha,
        )?;

        let report = TrainingReport {
            text_column: resolved.text_column.clone(),
            label_column: resolved.label_column.clone(),
            used_fallback: resolved.used_fallback,
            rows_used: texts.len(),
            rows_dropped,
            vocabulary_size: vectorizer.vocabulary_size(),
            classes: model.classes().iter().map(ToString::to_string).collect(),
        };
        Ok((FittedArtifacts { vectorizer, model }, report))
    }
}
