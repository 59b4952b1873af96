mod error;
mod features;
mod labels;
mod model;
mod predictor;
mod utils;
mod vectorizer;

pub use error::ClassifierError;
pub use features::{FeatureCounts, TextFeatures};
pub use labels::{normalize_label, ClassLabel, NEGATIVE, POSITIVE};
pub use model::{MultinomialNb, Posterior, DEFAULT_ALPHA};
pub use predictor::{lookup_confidence, ConfidenceSource, Precision, Prediction, Predictor, PredictorInfo};
pub use vectorizer::CountVectorizer;
