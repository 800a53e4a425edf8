// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full pipeline in order:
//
//   Step 1: Validate hyper-parameters
//   Step 2: Download reviews + word index   (Layer 6 - infra)
//   Step 3: Clear old weights, build tokenizer (Layer 6 - infra)
//   Step 4: Load train / test reviews       (Layer 4 - data)
//   Step 5: Encode and pad                  (Layer 4 - data)
//   Step 6: Split train / validation        (Layer 4 - data)
//   Step 7: Save config, open metrics CSV   (Layer 6 - infra)
//   Step 8: Train, evaluate, run examples   (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::{bail, Result};
use std::path::Path;
use burn::{module::AutodiffModule, tensor::backend::AutodiffBackend};
use serde::{Deserialize, Serialize};

use crate::application::predict_use_case::EXAMPLE_REVIEWS;
use crate::data::{
    dataset::SentimentDataset,
    encoder::ReviewEncoder,
    loader::AclImdbLoader,
    padding::{PadSide, Padder},
    splitter::{shuffle_and_take, split_train_val},
};
use crate::domain::review::{DatasetSplit, Prediction};
use crate::domain::traits::{ReviewSource, SentimentPredictor};
use crate::infra::{
    checkpoint::CheckpointManager,
    downloader::{DatasetPaths, Downloader},
    metrics::MetricsLogger,
    tokenizer_store::TokenizerStore,
};
use crate::ml::{
    backend::{BackendKind, CpuTrainBackend, GpuTrainBackend},
    evaluator::{evaluate, EvalReport},
    inferencer::Inferencer,
    model::SentimentModelConfig,
    trainer::run_training,
};

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Saved next to the
// checkpoints so evaluation and inference can rebuild the exact
// same model and the exact same text encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub data_dir:         String,
    pub checkpoint_dir:   String,
    pub vocab_size:       usize,
    pub max_len:          usize,
    pub padding:          PadSide,
    pub truncating:       PadSide,
    pub embedding_dim:    usize,
    pub lstm_units:       usize,
    pub epochs:           usize,
    pub batch_size:       usize,
    pub lr:               f64,
    pub validation_split: f64,
    pub seed:             u64,
    /// Cap on reviews read per split, for quick experiments
    pub max_reviews:      Option<usize>,
    pub num_workers:      usize,
    pub backend:          BackendKind,
    /// Fetch missing inputs over the network before training
    pub download:         bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_dir:         "data".to_string(),
            checkpoint_dir:   "checkpoints".to_string(),
            vocab_size:       10_000,
            max_len:          200,
            padding:          PadSide::Pre,
            truncating:       PadSide::Pre,
            embedding_dim:    128,
            lstm_units:       64,
            epochs:           3,
            batch_size:       64,
            lr:               1e-3,
            validation_split: 0.2,
            seed:             42,
            max_reviews:      None,
            num_workers:      1,
            backend:          BackendKind::Ndarray,
            download:         true,
        }
    }
}

impl TrainConfig {
    pub fn model_config(&self) -> SentimentModelConfig {
        SentimentModelConfig::new(self.vocab_size)
            .with_embedding_dim(self.embedding_dim)
            .with_lstm_units(self.lstm_units)
    }

    pub fn padder(&self) -> Padder {
        Padder::new(self.max_len, self.padding, self.truncating)
    }

    /// Reject settings that would fail deep inside a run.
    pub fn validate(&self) -> Result<()> {
        if self.vocab_size <= 4 {
            bail!("vocab_size must be greater than 4 (indices 0-3 are reserved), got {}", self.vocab_size);
        }
        if self.max_len == 0 {
            bail!("max_len must be at least 1");
        }
        if self.batch_size == 0 {
            bail!("batch_size must be at least 1");
        }
        if self.epochs == 0 {
            bail!("epochs must be at least 1");
        }
        if self.embedding_dim == 0 || self.lstm_units == 0 {
            bail!("embedding_dim and lstm_units must be at least 1");
        }
        if !(0.0..1.0).contains(&self.validation_split) {
            bail!("validation_split must be in [0, 1), got {}", self.validation_split);
        }
        if !(self.lr > 0.0) {
            bail!("lr must be positive, got {}", self.lr);
        }
        Ok(())
    }
}

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub train_samples: usize,
    pub val_samples:   usize,
    pub test:          EvalReport,
    /// The hard-coded example reviews and their predictions
    pub examples:      Vec<(String, Prediction)>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

/// Encoded inputs shared by every backend
struct PreparedData {
    train:   SentimentDataset,
    val:     SentimentDataset,
    test:    SentimentDataset,
    encoder: ReviewEncoder,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<TrainOutcome> {
        let cfg = &self.config;

        // ── Step 1: Validate ──────────────────────────────────────────────────
        cfg.validate()?;

        // ── Step 2: Inputs on disk ────────────────────────────────────────────
        let paths = if cfg.download {
            Downloader::new(&cfg.data_dir)?.ensure_all()?
        } else {
            DatasetPaths::under(Path::new(&cfg.data_dir))
        };

        // ── Step 3: Tokenizer from the word index ─────────────────────────────
        // Always rebuilt: vocab_size may differ from the previous run.
        // The previous run's weights go first, so no later failure can
        // leave them next to a config or tokenizer of another shape.
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.clear_checkpoints()?;
        let tokenizer = TokenizerStore::new(&cfg.checkpoint_dir)
            .build_and_save(&paths.word_index, cfg.vocab_size)?;
        let encoder = ReviewEncoder::new(tokenizer, cfg.padder(), cfg.vocab_size);

        // ── Step 4: Load reviews ──────────────────────────────────────────────
        let loader        = AclImdbLoader::new(&paths.reviews_dir);
        let train_reviews = shuffle_and_take(loader.load_split(DatasetSplit::Train)?, cfg.max_reviews, cfg.seed);
        let test_reviews  = shuffle_and_take(loader.load_split(DatasetSplit::Test)?,  cfg.max_reviews, cfg.seed);

        // ── Step 5: Encode and pad ────────────────────────────────────────────
        tracing::info!(
            "Encoding {} train and {} test reviews (max_len={})",
            train_reviews.len(), test_reviews.len(), cfg.max_len
        );
        let train_samples = SentimentDataset::from_reviews(&train_reviews, &encoder)?.into_samples();
        let test          = SentimentDataset::from_reviews(&test_reviews,  &encoder)?;

        // ── Step 6: Train / validation split ──────────────────────────────────
        let (train, val) = split_train_val(train_samples, 1.0 - cfg.validation_split, cfg.seed);
        let train = SentimentDataset::new(train);
        let val   = SentimentDataset::new(val);
        tracing::info!(
            "Split: {} train ({} positive), {} validation, {} test",
            train.sample_count(), train.positive_count(), val.sample_count(), test.sample_count()
        );
        if train.sample_count() == 0 {
            bail!("No training reviews found under '{}'", paths.reviews_dir.display());
        }

        // ── Step 7: Persist config, start metrics ─────────────────────────────
        ckpt_manager.save_config(cfg)?;
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;

        // ── Step 8: Train on the selected backend ─────────────────────────────
        let data = PreparedData { train, val, test, encoder };
        match cfg.backend {
            BackendKind::Ndarray => self.train_on::<CpuTrainBackend>(Default::default(), data, &ckpt_manager, &metrics),
            BackendKind::Wgpu    => self.train_on::<GpuTrainBackend>(Default::default(), data, &ckpt_manager, &metrics),
        }
    }

    fn train_on<B: AutodiffBackend>(
        &self,
        device:       B::Device,
        data:         PreparedData,
        ckpt_manager: &CheckpointManager,
        metrics:      &MetricsLogger,
    ) -> Result<TrainOutcome> {
        let cfg = &self.config;
        let train_samples = data.train.sample_count();
        let val_samples   = data.val.sample_count();

        let model = run_training::<B>(cfg, data.train, data.val, ckpt_manager, metrics, device.clone())?;

        // Evaluation and inference never need gradients
        let model = model.valid();
        let test  = evaluate(&model, data.test, cfg.batch_size, cfg.num_workers, &device);
        tracing::info!("Test loss={:.4} accuracy={:.4}", test.loss, test.accuracy);

        let inferencer = Inferencer::new(model, data.encoder, device);
        let texts: Vec<String> = EXAMPLE_REVIEWS.iter().map(|s| s.to_string()).collect();
        let predictions = inferencer.predict_all(&texts)?;

        Ok(TrainOutcome {
            train_samples,
            val_samples,
            test,
            examples: texts.into_iter().zip(predictions).collect(),
        })
    }
}
