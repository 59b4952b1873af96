use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{error, info};
use std::time::Instant;

use sentimiento::classifier::DEFAULT_ALPHA;
use sentimiento::{AppConfig, Precision, Predictor, Trainer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the trained model and vectorizer
    #[arg(long, global = true)]
    models_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train the classifier from a labeled CSV file
    Train {
        /// CSV file to train on
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Additive smoothing for naive Bayes
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,
        /// Build the vocabulary from the text's original case
        #[arg(long)]
        preserve_case: bool,
    },
    /// Classify the given words, joined by spaces
    Predict {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Serve the HTTP API
    Serve {
        /// Address to bind, e.g. 127.0.0.1:8000
        #[arg(long)]
        bind: Option<String>,
    },
    /// Show what the trained model knows
    Info,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    sentimiento::init_logger();
    let args = Args::parse();
    let config = AppConfig::from_env().with_models_dir(args.models_dir);

    match args.command {
        Command::Train {
            dataset,
            alpha,
            preserve_case,
        } => train(config.with_dataset_path(dataset), alpha, preserve_case).await,
        Command::Predict { words } => predict(&config, &words),
        Command::Serve { bind } => serve(config.with_bind_address(bind)).await,
        Command::Info => show_info(&config),
    }
}

async fn train(config: AppConfig, alpha: f64, preserve_case: bool) -> anyhow::Result<()> {
    let trainer = Trainer::builder()
        .with_dataset(config.dataset_path.clone())
        .with_artifact_store(config.artifact_store())
        .with_alpha(alpha)?
        .preserve_case(preserve_case)
        .build()?;

    let start_time = Instant::now();
    let result = tokio::task::spawn_blocking(move || trainer.train())
        .await
        .context("training task panicked")?;

    match result {
        Ok(report) => {
            info!("Training took {:.2?}", start_time.elapsed());
            if report.used_fallback {
                println!("No column names matched; columns were inferred from the data.");
            }
            println!(
                "Trained on {} rows ({} dropped) using '{}' as text and '{}' as label.",
                report.rows_used, report.rows_dropped, report.text_column, report.label_column
            );
            println!("Classes: {}", report.classes.join(", "));
            println!("Model and vectorizer saved to {}", config.models_dir.display());
        }
        Err(e) => {
            // A failed run leaves the process healthy; it only produces no artifacts.
            error!("Training failed: {}", e);
            println!("Training aborted: {}", e);
        }
    }
    Ok(())
}

fn predict(config: &AppConfig, words: &[String]) -> anyhow::Result<()> {
    let predictor = Predictor::load(&config.artifact_store())
        .context("failed to load the trained artifacts; run `sentimiento train` first")?;

    let text = if words.is_empty() {
        " ".to_string()
    } else {
        words.join(" ")
    };
    let prediction = predictor.predict(&text, Precision::Cli);
    println!("{}", serde_json::to_string(&prediction)?);
    Ok(())
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let predictor = Predictor::load(&config.artifact_store())
        .context("failed to load the trained artifacts; run `sentimiento train` first")?;
    sentimiento::server::run(predictor, &config.bind_address)
        .await
        .with_context(|| format!("server on {} failed", config.bind_address))
}

fn show_info(config: &AppConfig) -> anyhow::Result<()> {
    let predictor = Predictor::load(&config.artifact_store())
        .context("failed to load the trained artifacts; run `sentimiento train` first")?;
    let info = predictor.info();

    println!("Artifacts: {}", config.models_dir.display());
    println!("Classes ({}): {}", info.num_classes, info.class_labels.join(", "));
    println!("Vocabulary size: {}", info.vocabulary_size);
    println!("Case-folded vocabulary: {}", info.lowercase_vocabulary);
    println!("Smoothing (alpha): {}", info.alpha);
    Ok(())
}
