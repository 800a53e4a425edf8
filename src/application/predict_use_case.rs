use anyhow::Result;
use burn::prelude::Backend;

use crate::domain::review::Prediction;
use crate::domain::traits::SentimentPredictor;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::{
    backend::{BackendKind, CpuBackend, GpuBackend},
    inferencer::Inferencer,
};

/// Scored after every training run, and by `predict` when no text is given
pub const EXAMPLE_REVIEWS: [&str; 2] = [
    "This movie was fantastic! The acting was great and the plot was thrilling.",
    "This movie was terrible. The plot made no sense and the acting was awful.",
];

pub struct PredictUseCase {
    checkpoint_dir: String,
    backend:        BackendKind,
}

impl PredictUseCase {
    pub fn new(checkpoint_dir: impl Into<String>, backend: BackendKind) -> Self {
        Self { checkpoint_dir: checkpoint_dir.into(), backend }
    }

    /// Score `texts`, or the built-in examples when `texts` is empty.
    pub fn execute(&self, texts: Vec<String>) -> Result<Vec<(String, Prediction)>> {
        let texts = if texts.is_empty() {
            EXAMPLE_REVIEWS.iter().map(|s| s.to_string()).collect()
        } else {
            texts
        };

        let predictions = match self.backend {
            BackendKind::Ndarray => self.predict_on::<CpuBackend>(Default::default(), &texts)?,
            BackendKind::Wgpu    => self.predict_on::<GpuBackend>(Default::default(), &texts)?,
        };
        Ok(texts.into_iter().zip(predictions).collect())
    }

    fn predict_on<B: Backend>(&self, device: B::Device, texts: &[String]) -> Result<Vec<Prediction>> {
        let ckpt       = CheckpointManager::new(&self.checkpoint_dir);
        let tok_store  = TokenizerStore::new(&self.checkpoint_dir);
        let inferencer = Inferencer::<B>::from_checkpoint(&ckpt, &tok_store, device)?;
        inferencer.predict_all(texts)
    }
}
