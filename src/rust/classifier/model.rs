use log::info;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::features::FeatureCounts;
use super::labels::ClassLabel;
use super::utils::{argmax, softmax_from_log};

/// Additive (Laplace) smoothing applied to every feature count.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Multinomial naive Bayes over bag-of-words counts.
///
/// Classes are kept sorted; every per-class array is indexed in that order.
/// The model is immutable once fitted and safe to share across threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    classes: Vec<ClassLabel>,
    class_count: Array1<f64>,
    class_log_prior: Array1<f64>,
    feature_log_prob: Array2<f64>,
    alpha: f64,
}

/// Result of scoring one document.
#[derive(Debug, Clone)]
pub struct Posterior {
    /// The class with the highest joint log likelihood
    pub predicted: ClassLabel,
    /// Posterior probability per class, in `classes()` order
    pub probabilities: Array1<f64>,
}

impl MultinomialNb {
    /// Fits class priors and smoothed per-class token distributions.
    ///
    /// # Arguments
    /// * `samples` - One sparse count vector per document
    /// * `labels` - The class of each document
    /// * `n_features` - Width of the feature space (the vocabulary size)
    /// * `alpha` - Additive smoothing, must be positive
    pub fn fit(
        samples: &[FeatureCounts],
        labels: &[ClassLabel],
        n_features: usize,
        alpha: f64,
    ) -> Result<Self, ClassifierError> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(ClassifierError::ValidationError(format!(
                "alpha must be a positive number, got {}",
                alpha
            )));
        }
        if samples.len() != labels.len() {
            return Err(ClassifierError::TrainingError(format!(
                "found {} samples but {} labels",
                samples.len(),
                labels.len()
            )));
        }
        if samples.is_empty() {
            return Err(ClassifierError::TrainingError("no training samples".into()));
        }
        if n_features == 0 {
            return Err(ClassifierError::TrainingError("feature space is empty".into()));
        }

        let mut classes: Vec<ClassLabel> = Vec::new();
        for label in labels {
            if !classes.contains(label) {
                classes.push(label.clone());
            }
        }
        classes.sort_by(ClassLabel::total_cmp);

        let mut class_count = Array1::<f64>::zeros(classes.len());
        let mut feature_count = Array2::<f64>::zeros((classes.len(), n_features));
        for (sample, label) in samples.iter().zip(labels) {
            let class_index = classes
                .iter()
                .position(|c| c == label)
                .ok_or_else(|| ClassifierError::TrainingError(format!("unknown class {}", label)))?;
            class_count[class_index] += 1.0;
            for &(feature, count) in sample {
                if feature >= n_features {
                    return Err(ClassifierError::TrainingError(format!(
                        "feature index {} outside a feature space of {}",
                        feature, n_features
                    )));
                }
                feature_count[[class_index, feature]] += count;
            }
        }

        let smoothed = &feature_count + alpha;
        let totals = smoothed.sum_axis(Axis(1)).mapv(f64::ln).insert_axis(Axis(1));
        let feature_log_prob = &smoothed.mapv(f64::ln) - &totals;
        let class_log_prior = class_count.mapv(f64::ln) - class_count.sum().ln();

        info!(
            "Fitted naive Bayes on {} samples, {} classes, {} features",
            samples.len(),
            classes.len(),
            n_features
        );

        Ok(Self {
            classes,
            class_count,
            class_log_prior,
            feature_log_prob,
            alpha,
        })
    }

    pub fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.feature_log_prob.ncols()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of training documents seen per class.
    pub fn class_count(&self) -> &Array1<f64> {
        &self.class_count
    }

    /// Unnormalized `log P(c) + sum(count * log P(token | c))` per class.
    pub fn joint_log_likelihood(&self, sample: &FeatureCounts) -> Array1<f64> {
        let mut jll = self.class_log_prior.clone();
        for &(feature, count) in sample {
            if feature < self.n_features() {
                jll.scaled_add(count, &self.feature_log_prob.column(feature));
            }
        }
        jll
    }

    pub fn predict_proba(&self, sample: &FeatureCounts) -> Array1<f64> {
        softmax_from_log(&self.joint_log_likelihood(sample))
    }

    pub fn predict(&self, sample: &FeatureCounts) -> &ClassLabel {
        let jll = self.joint_log_likelihood(sample);
        // A fitted model always has at least one class.
        &self.classes[argmax(&jll).unwrap_or(0)]
    }

    /// Predicted class and the full posterior vector from a single pass.
    pub fn posterior(&self, sample: &FeatureCounts) -> Posterior {
        let jll = self.joint_log_likelihood(sample);
        let index = argmax(&jll).unwrap_or(0);
        Posterior {
            predicted: self.classes[index].clone(),
            probabilities: softmax_from_log(&jll),
        }
    }
}
