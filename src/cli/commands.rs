// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands `download`, `train`, `evaluate`,
// `predict` and `summary` and all their configurable flags.

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::data::padding::PadSide;
use crate::ml::backend::BackendKind;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the IMDB review corpus and the word index
    Download(DownloadArgs),

    /// Train the BiLSTM sentiment classifier
    Train(TrainArgs),

    /// Score the latest checkpoint on the test split
    Evaluate(EvaluateArgs),

    /// Classify review texts with the latest checkpoint
    Predict(PredictArgs),

    /// Print the layer table of the model
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Where the corpus and word index are stored
    #[arg(long, default_value = "data")]
    pub data_dir: String,
}

/// Model shape flags, shared by `train` and `summary`
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Only the (vocab_size - 3) most frequent words get their own index
    #[arg(long, default_value_t = 10_000)]
    pub vocab_size: usize,

    /// Every review is padded or truncated to this many tokens
    #[arg(long, default_value_t = 200)]
    pub max_len: usize,

    #[arg(long, default_value_t = 128)]
    pub embedding_dim: usize,

    /// Hidden units per LSTM direction
    #[arg(long, default_value_t = 64)]
    pub lstm_units: usize,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    /// Directory to save checkpoints, tokenizer, config and metrics
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Where padding goes when a review is short
    #[arg(long, value_enum, default_value_t = PadSide::Pre)]
    pub padding: PadSide,

    /// Which end is cut when a review is long
    #[arg(long, value_enum, default_value_t = PadSide::Pre)]
    pub truncating: PadSide,

    #[arg(long, default_value_t = 3)]
    pub epochs: usize,

    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Fraction of the training split held out for validation
    #[arg(long, default_value_t = 0.2)]
    pub validation_split: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Read at most this many reviews per split
    #[arg(long)]
    pub max_reviews: Option<usize>,

    /// Data loader worker threads
    #[arg(long, default_value_t = 1)]
    pub num_workers: usize,

    #[arg(long, value_enum, default_value_t = BackendKind::Ndarray)]
    pub backend: BackendKind,

    /// Fail instead of downloading missing inputs
    #[arg(long)]
    pub no_download: bool,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_dir:         a.data_dir,
            checkpoint_dir:   a.checkpoint_dir,
            vocab_size:       a.model.vocab_size,
            max_len:          a.model.max_len,
            padding:          a.padding,
            truncating:       a.truncating,
            embedding_dim:    a.model.embedding_dim,
            lstm_units:       a.model.lstm_units,
            epochs:           a.epochs,
            batch_size:       a.batch_size,
            lr:               a.lr,
            validation_split: a.validation_split,
            seed:             a.seed,
            max_reviews:      a.max_reviews,
            num_workers:      a.num_workers,
            backend:          a.backend,
            download:         !a.no_download,
        }
    }
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Defaults to the data directory used for training
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(long)]
    pub max_reviews: Option<usize>,

    #[arg(long, value_enum, default_value_t = BackendKind::Ndarray)]
    pub backend: BackendKind,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Review text to classify; repeat for several. Without it the
    /// two built-in example reviews are scored.
    #[arg(long)]
    pub text: Vec<String>,

    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    #[arg(long, value_enum, default_value_t = BackendKind::Ndarray)]
    pub backend: BackendKind,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// A saved config here takes precedence over the flags below
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    #[command(flatten)]
    pub model: ModelArgs,
}

impl From<&SummaryArgs> for TrainConfig {
    fn from(a: &SummaryArgs) -> Self {
        TrainConfig {
            checkpoint_dir: a.checkpoint_dir.clone(),
            vocab_size:     a.model.vocab_size,
            max_len:        a.model.max_len,
            embedding_dim:  a.model.embedding_dim,
            lstm_units:     a.model.lstm_units,
            ..TrainConfig::default()
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> Commands {
        let mut full = vec!["imdb-bilstm"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap().command
    }

    #[test]
    fn test_train_defaults_match_config_defaults() {
        let Commands::Train(args) = parse(&["train"]) else { panic!("expected train") };
        let cfg: TrainConfig = args.into();
        let def = TrainConfig::default();

        assert_eq!(cfg.vocab_size, def.vocab_size);
        assert_eq!(cfg.max_len, def.max_len);
        assert_eq!(cfg.embedding_dim, def.embedding_dim);
        assert_eq!(cfg.lstm_units, def.lstm_units);
        assert_eq!(cfg.epochs, def.epochs);
        assert_eq!(cfg.batch_size, def.batch_size);
        assert_eq!(cfg.padding, PadSide::Pre);
        assert_eq!(cfg.seed, 42);
        assert!(cfg.download);
    }

    #[test]
    fn test_train_flags_override() {
        let Commands::Train(args) = parse(&[
            "train", "--epochs", "5", "--padding", "post", "--backend", "wgpu",
            "--no-download", "--max-reviews", "100",
        ]) else {
            panic!("expected train")
        };
        let cfg: TrainConfig = args.into();

        assert_eq!(cfg.epochs, 5);
        assert_eq!(cfg.padding, PadSide::Post);
        assert_eq!(cfg.backend, BackendKind::Wgpu);
        assert_eq!(cfg.max_reviews, Some(100));
        assert!(!cfg.download);
    }

    #[test]
    fn test_predict_collects_repeated_text() {
        let Commands::Predict(args) = parse(&["predict", "--text", "good", "--text", "bad"]) else {
            panic!("expected predict")
        };
        assert_eq!(args.text, vec!["good".to_string(), "bad".to_string()]);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        assert!(Cli::try_parse_from(["imdb-bilstm", "train", "--backend", "tpu"]).is_err());
    }
}
