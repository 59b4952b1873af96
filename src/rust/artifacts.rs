use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::classifier::{ClassifierError, CountVectorizer, MultinomialNb};

/// File name of the serialized vectorizer inside the models directory.
pub const VECTORIZER_FILE: &str = "vectorizer.bin";
/// File name of the serialized classifier inside the models directory.
pub const MODEL_FILE: &str = "model.bin";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error in {path}: {source}")]
    SerializationError {
        path: String,
        #[source]
        source: bincode::Error,
    },
    #[error("Inconsistent artifacts: {0}")]
    Inconsistent(#[from] ClassifierError),
}

/// Reads and writes the trained vectorizer and model.
///
/// Artifacts are plain `bincode` dumps at fixed names inside one directory.
/// Saving overwrites whatever was there before. Both files are staged next to
/// their final names first, so a failed save leaves the previous pair intact.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    models_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(models_dir: P) -> Self {
        Self {
            models_dir: models_dir.as_ref().to_path_buf(),
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.models_dir.join(VECTORIZER_FILE)
    }

    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join(MODEL_FILE)
    }

    pub fn is_trained(&self) -> bool {
        let model_path = self.model_path();
        let vectorizer_path = self.vectorizer_path();
        log::debug!("Checking for trained artifacts:");
        log::debug!("  Model path: {:?} (exists: {})", model_path, model_path.exists());
        log::debug!("  Vectorizer path: {:?} (exists: {})", vectorizer_path, vectorizer_path.exists());
        model_path.exists() && vectorizer_path.exists()
    }

    /// Persists both artifacts, creating the models directory if needed.
    pub fn save(&self, vectorizer: &CountVectorizer, model: &MultinomialNb) -> Result<(), ArtifactError> {
        log::info!("Creating models directory at {:?}", self.models_dir);
        fs::create_dir_all(&self.models_dir)?;

        let model_path = self.model_path();
        let vectorizer_path = self.vectorizer_path();
        let model_staged = staging_path(&model_path);
        let vectorizer_staged = staging_path(&vectorizer_path);

        let staged = write_artifact(&model_staged, model)
            .and_then(|_| write_artifact(&vectorizer_staged, vectorizer));
        if let Err(e) = staged {
            let _ = fs::remove_file(&model_staged);
            let _ = fs::remove_file(&vectorizer_staged);
            return Err(e);
        }

        fs::rename(&vectorizer_staged, &vectorizer_path)?;
        fs::rename(&model_staged, &model_path)?;
        log::info!("Model and vectorizer saved to {:?}", self.models_dir);
        Ok(())
    }

    /// Loads both artifacts. Missing or undecodable files are errors.
    pub fn load(&self) -> Result<(CountVectorizer, MultinomialNb), ArtifactError> {
        let vectorizer = read_artifact(&self.vectorizer_path())?;
        let model = read_artifact(&self.model_path())?;
        Ok((vectorizer, model))
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let encoded = bincode::serialize(value).map_err(|source| ArtifactError::SerializationError {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("Writing {} bytes to {:?}", encoded.len(), path);
    fs::write(path, encoded)?;
    Ok(())
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    log::info!("Read {} bytes from {:?}", bytes.len(), path);
    bincode::deserialize(&bytes).map_err(|source| ArtifactError::SerializationError {
        path: path.display().to_string(),
        source,
    })
}
