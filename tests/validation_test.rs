use sentimiento::training::{DatasetError, ResolveError};
use sentimiento::{ArtifactError, ArtifactStore, Predictor, Trainer, TrainingError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_dataset(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("dataset.csv");
    fs::write(&path, contents).expect("write dataset");
    path
}

fn trainer_for(dir: &TempDir, dataset: &Path) -> Trainer {
    Trainer::builder()
        .with_dataset(dataset)
        .with_models_dir(dir.path().join("models"))
        .build()
        .expect("Failed to create trainer")
}

#[test]
fn test_missing_dataset() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let trainer = trainer_for(&dir, &dir.path().join("nope.csv"));

    let result = trainer.train();
    assert!(matches!(result, Err(TrainingError::Dataset(DatasetError::NotFound(_)))));
    assert!(!trainer.store().is_trained());
    Ok(())
}

#[test]
fn test_empty_dataset() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let dataset = write_dataset(dir.path(), "");
    let trainer = trainer_for(&dir, &dataset);

    let result = trainer.train();
    assert!(matches!(result, Err(TrainingError::Dataset(DatasetError::Empty(_)))));
    assert!(!trainer.store().is_trained());
    Ok(())
}

#[test]
fn test_undetectable_columns() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let dataset = write_dataset(dir.path(), "id,body\n1,some text\n2,more text\n");
    let trainer = trainer_for(&dir, &dataset);

    match trainer.train() {
        Err(TrainingError::Resolve(err @ ResolveError::Undetected { .. })) => {
            assert_eq!(err.columns(), &["col0", "col1"]);
            assert!(err.to_string().contains("Columns found"));
        }
        other => panic!("expected a resolve error, got {:?}", other),
    }
    assert!(!trainer.store().is_trained());
    Ok(())
}

#[test]
fn test_header_only_dataset() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let dataset = write_dataset(dir.path(), "text,label\n");
    let trainer = trainer_for(&dir, &dataset);

    assert!(matches!(trainer.train(), Err(TrainingError::NoUsableRows(0))));
    assert!(!trainer.store().is_trained());
    Ok(())
}

#[test]
fn test_failed_run_keeps_previous_artifacts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let dataset = write_dataset(dir.path(), "text,label\nlove it,positive\nhate it,negative\n");
    let trainer = trainer_for(&dir, &dataset);
    trainer.train()?;
    let before = fs::read(trainer.store().model_path())?;

    fs::write(&dataset, "id,body\n1,text\n")?;
    assert!(trainer.train().is_err());
    assert_eq!(fs::read(trainer.store().model_path())?, before);
    Ok(())
}

#[test]
fn test_invalid_alpha() {
    let result = Trainer::builder().with_alpha(0.0);
    assert!(matches!(result, Err(TrainingError::Config(_))));
}

#[test]
fn test_loading_without_artifacts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let result = Predictor::load(&ArtifactStore::new(dir.path()));
    assert!(matches!(result, Err(ArtifactError::NotFound(_))));
    Ok(())
}

#[test]
fn test_loading_corrupt_artifacts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = ArtifactStore::new(dir.path());
    fs::write(store.vectorizer_path(), "not a vectorizer")?;
    fs::write(store.model_path(), "not a model")?;

    let result = Predictor::load(&store);
    assert!(matches!(result, Err(ArtifactError::SerializationError { .. })));
    Ok(())
}
