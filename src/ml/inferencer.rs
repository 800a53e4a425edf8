// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Free text → probability of a positive review.
//
// The text goes through exactly the same ReviewEncoder as the
// training data (same cleaning, same vocabulary, same start
// token, same padding), otherwise the model would be scoring
// sequences it was never trained on.
use anyhow::{anyhow, Result};
use burn::prelude::*;

use crate::data::encoder::ReviewEncoder;
use crate::domain::review::Prediction;
use crate::domain::traits::SentimentPredictor;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::model::SentimentModel;

pub struct Inferencer<B: Backend> {
    model:   SentimentModel<B>,
    encoder: ReviewEncoder,
    device:  B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn new(model: SentimentModel<B>, encoder: ReviewEncoder, device: B::Device) -> Self {
        Self { model, encoder, device }
    }

    /// Rebuild the model described by `train_config.json` and load the
    /// latest checkpoint into it.
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        tok_store:    &TokenizerStore,
        device:       B::Device,
    ) -> Result<Self> {
        let cfg       = ckpt_manager.load_config()?;
        let tokenizer = tok_store.load()?;
        let model: SentimentModel<B> = cfg.model_config().init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");

        let encoder = ReviewEncoder::new(tokenizer, cfg.padder(), cfg.vocab_size);
        Ok(Self::new(model, encoder, device))
    }

    pub fn model(&self) -> &SentimentModel<B> {
        &self.model
    }

    /// Score several texts in one forward pass.
    pub fn predict_batch(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let max_len = self.encoder.padder().max_len;
        let mut flat: Vec<i32> = Vec::with_capacity(texts.len() * max_len);
        for text in texts {
            let ids = self.encoder.encode_padded(text)?;
            tracing::debug!("Encoded '{}' → {} tokens", text, ids.iter().filter(|&&i| i != 0).count());
            flat.extend(ids.iter().map(|&id| id as i32));
        }

        let input = Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([texts.len(), max_len]);

        let probabilities: Vec<f32> = self
            .model
            .forward_probabilities(input)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow!("Cannot read model output: {e:?}"))?;

        Ok(probabilities.into_iter().map(Prediction::from_probability).collect())
    }
}

impl<B: Backend> SentimentPredictor for Inferencer<B> {
    fn predict(&self, text: &str) -> Result<Prediction> {
        self.predict_batch(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Model returned no prediction"))
    }

    fn predict_all(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        self.predict_batch(texts)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::data::padding::{PadSide, Padder};
    use crate::infra::tokenizer_store::tokenizer_from_word_index;
    use crate::ml::backend::CpuBackend;
    use crate::ml::model::SentimentModelConfig;

    fn inferencer() -> Inferencer<CpuBackend> {
        let word_index: HashMap<String, u32> =
            [("good", 1), ("bad", 2)].into_iter().map(|(w, r)| (w.to_string(), r)).collect();
        let tokenizer = tokenizer_from_word_index(&word_index, 12).unwrap();
        let encoder   = ReviewEncoder::new(tokenizer, Padder::new(8, PadSide::Pre, PadSide::Pre), 12);
        let device    = Default::default();
        let model     = SentimentModelConfig::new(12)
            .with_embedding_dim(4)
            .with_lstm_units(2)
            .init::<CpuBackend>(&device);
        Inferencer::new(model, encoder, device)
    }

    #[test]
    fn test_one_prediction_per_text() {
        let inf   = inferencer();
        let texts = vec!["good good".to_string(), "bad".to_string(), String::new()];
        let preds = inf.predict_all(&texts).unwrap();
        assert_eq!(preds.len(), 3);
        for p in preds {
            assert!(p.probability > 0.0 && p.probability < 1.0);
            assert_eq!(p.sentiment, crate::domain::review::Sentiment::from_probability(p.probability));
        }
    }

    #[test]
    fn test_single_prediction_matches_batch() {
        let inf    = inferencer();
        let single = inf.predict("good movie").unwrap();
        let batch  = inf.predict_batch(&["good movie".to_string(), "bad".to_string()]).unwrap();
        assert!((single.probability - batch[0].probability).abs() < 1e-5);
    }

    #[test]
    fn test_empty_input_list() {
        assert!(inferencer().predict_batch(&[]).unwrap().is_empty());
    }
}
