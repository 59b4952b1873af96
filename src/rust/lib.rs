//! A bag-of-words naive Bayes sentiment classifier, trained from a labeled
//! CSV file and served from the command line or over HTTP.
//!
//! # Training
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use sentimiento::Trainer;
//!
//! let report = Trainer::builder()
//!     .with_dataset("data/dataset.csv")
//!     .with_models_dir("models")
//!     .build()?
//!     .train()?;
//! println!("Trained on {} rows", report.rows_used);
//! # Ok(())
//! # }
//! ```
//!
//! The text and label columns are found by name (`text`, `tweet`, `message`,
//! `content` / `label`, `sentiment`, `class`) or, failing that, by reading
//! the file without a header and inspecting the values.
//!
//! # Prediction
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use sentimiento::{ArtifactStore, Precision, Predictor};
//!
//! let predictor = Predictor::load(&ArtifactStore::new("models"))?;
//! let prediction = predictor.predict("What a great day", Precision::Cli);
//! println!("{} ({})", prediction.prediction, prediction.confidence);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! `Predictor` is immutable after loading and `Send + Sync`; share it with
//! `Arc` (the HTTP server wraps it in `web::Data`).

pub mod artifacts;
pub mod classifier;
pub mod config;
pub mod server;
pub mod training;

pub use artifacts::{ArtifactError, ArtifactStore};
pub use classifier::{
    normalize_label, ClassLabel, ClassifierError, ConfidenceSource, CountVectorizer, MultinomialNb,
    Precision, Prediction, Predictor, PredictorInfo, TextFeatures,
};
pub use config::AppConfig;
pub use training::{Trainer, TrainerBuilder, TrainingConfig, TrainingError, TrainingReport};

pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
