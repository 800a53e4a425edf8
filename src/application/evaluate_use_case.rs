// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Re-scores a saved checkpoint on the test split, using the
// tokenizer and padding settings saved with it.

use anyhow::Result;
use burn::prelude::Backend;
use std::path::Path;

use crate::application::train_use_case::TrainConfig;
use crate::data::{dataset::SentimentDataset, encoder::ReviewEncoder, loader::AclImdbLoader, splitter::shuffle_and_take};
use crate::domain::review::DatasetSplit;
use crate::domain::traits::ReviewSource;
use crate::infra::{checkpoint::CheckpointManager, downloader::DatasetPaths, tokenizer_store::TokenizerStore};
use crate::ml::{
    backend::{BackendKind, CpuBackend, GpuBackend},
    evaluator::{evaluate, EvalReport},
    model::SentimentModel,
};

pub struct EvaluateUseCase {
    checkpoint_dir: String,
    /// Overrides the data directory recorded at training time
    data_dir:       Option<String>,
    max_reviews:    Option<usize>,
    backend:        BackendKind,
}

impl EvaluateUseCase {
    pub fn new(
        checkpoint_dir: impl Into<String>,
        data_dir:       Option<String>,
        max_reviews:    Option<usize>,
        backend:        BackendKind,
    ) -> Self {
        Self { checkpoint_dir: checkpoint_dir.into(), data_dir, max_reviews, backend }
    }

    pub fn execute(&self) -> Result<EvalReport> {
        let ckpt = CheckpointManager::new(&self.checkpoint_dir);
        let cfg  = ckpt.load_config()?;

        let data_dir = self.data_dir.clone().unwrap_or_else(|| cfg.data_dir.clone());
        let paths    = DatasetPaths::under(Path::new(&data_dir));
        let reviews  = AclImdbLoader::new(&paths.reviews_dir).load_split(DatasetSplit::Test)?;
        let reviews  = shuffle_and_take(reviews, self.max_reviews, cfg.seed);

        let tokenizer = TokenizerStore::new(&self.checkpoint_dir).load()?;
        let encoder   = ReviewEncoder::new(tokenizer, cfg.padder(), cfg.vocab_size);
        let test      = SentimentDataset::from_reviews(&reviews, &encoder)?;
        tracing::info!("Evaluating on {} test reviews", test.sample_count());

        match self.backend {
            BackendKind::Ndarray => evaluate_on::<CpuBackend>(Default::default(), &ckpt, &cfg, test),
            BackendKind::Wgpu    => evaluate_on::<GpuBackend>(Default::default(), &ckpt, &cfg, test),
        }
    }
}

fn evaluate_on<B: Backend>(
    device: B::Device,
    ckpt:   &CheckpointManager,
    cfg:    &TrainConfig,
    test:   SentimentDataset,
) -> Result<EvalReport> {
    let model: SentimentModel<B> = cfg.model_config().init(&device);
    let model = ckpt.load_model(model, &device)?;
    Ok(evaluate(&model, test, cfg.batch_size, cfg.num_workers, &device))
}
