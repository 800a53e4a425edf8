// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// `clap`, hands work to Layer 2 (application) and prints the
// results. No training or inference logic lives here.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, DownloadArgs, EvaluateArgs, PredictArgs, SummaryArgs, TrainArgs};

use crate::domain::review::Prediction;

#[derive(Parser, Debug)]
#[command(
    name = "imdb-bilstm",
    version,
    about = "Train a bidirectional LSTM on IMDB reviews, then classify review sentiment."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Download(args) => run_download(args),
            Commands::Train(args)    => run_train(args),
            Commands::Evaluate(args) => run_evaluate(args),
            Commands::Predict(args)  => run_predict(args),
            Commands::Summary(args)  => run_summary(args),
        }
    }
}

fn run_download(args: DownloadArgs) -> Result<()> {
    use crate::application::download_use_case::DownloadUseCase;

    let paths = DownloadUseCase::new(args.data_dir).execute()?;
    println!("Reviews:    {}", paths.reviews_dir.display());
    println!("Word index: {}", paths.word_index.display());
    Ok(())
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training with data in: {}", args.data_dir);
    let checkpoint_dir = args.checkpoint_dir.clone();

    let outcome = TrainUseCase::new(args.into()).execute()?;

    println!(
        "\nTrained on {} reviews, validated on {}.",
        outcome.train_samples, outcome.val_samples
    );
    println!("Test Loss: {:.4}", outcome.test.loss);
    println!("Test Accuracy: {:.4}", outcome.test.accuracy);
    println!();
    print_predictions(&outcome.examples);
    println!("\nCheckpoints saved to: {checkpoint_dir}");
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    let report = EvaluateUseCase::new(args.checkpoint_dir, args.data_dir, args.max_reviews, args.backend)
        .execute()?;
    println!("Test Loss: {:.4}", report.loss);
    println!("Test Accuracy: {:.4}", report.accuracy);
    println!("Reviews: {}", report.samples);
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let results = PredictUseCase::new(args.checkpoint_dir, args.backend).execute(args.text)?;
    print_predictions(&results);
    Ok(())
}

fn run_summary(args: SummaryArgs) -> Result<()> {
    use crate::application::summary_use_case::SummaryUseCase;

    let fallback = (&args).into();
    let summary  = SummaryUseCase::new(args.checkpoint_dir, fallback).execute()?;
    println!("{summary}");
    Ok(())
}

fn print_predictions(results: &[(String, Prediction)]) {
    for (text, prediction) in results {
        println!("Review: {text}");
        println!(
            "Sentiment: {} (probability {:.4})",
            prediction.sentiment, prediction.probability
        );
    }
}
