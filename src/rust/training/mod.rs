pub mod builder;
pub mod dataset;
pub mod resolver;
mod trainer;

pub use builder::{TrainerBuilder, TrainingConfig};
pub use dataset::{read_csv, DatasetError, HeaderMode, Table};
pub use resolver::{resolve_columns, ResolveError, ResolvedDataset};
pub use trainer::{FittedArtifacts, Trainer, TrainingError, TrainingReport};
