use anyhow::Result;

use crate::application::train_use_case::TrainConfig;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::{backend::CpuBackend, model::ModelSummary};

pub struct SummaryUseCase {
    checkpoint_dir: String,
    fallback:       TrainConfig,
}

impl SummaryUseCase {
    /// `fallback` describes the model when the checkpoint directory
    /// holds no saved config.
    pub fn new(checkpoint_dir: impl Into<String>, fallback: TrainConfig) -> Self {
        Self { checkpoint_dir: checkpoint_dir.into(), fallback }
    }

    pub fn execute(&self) -> Result<ModelSummary> {
        let ckpt = CheckpointManager::new(&self.checkpoint_dir);
        // A config that exists but does not parse is an error, not a fallback
        let cfg = if ckpt.has_config() {
            ckpt.load_config()?
        } else {
            tracing::debug!("No saved config in '{}', summarising the given hyper-parameters", self.checkpoint_dir);
            self.fallback.clone()
        };
        cfg.validate()?;

        let model = cfg.model_config().init::<CpuBackend>(&Default::default());
        Ok(model.summary(cfg.max_len))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_without_checkpoint_uses_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = TrainConfig { vocab_size: 100, embedding_dim: 8, lstm_units: 4, ..TrainConfig::default() };

        let summary = SummaryUseCase::new(tmp.path().to_string_lossy(), cfg).execute().unwrap();
        assert_eq!(summary.layers[0].params, 100 * 8);
        assert_eq!(summary.layers[0].output_shape, "(None, 200, 8)");
    }

    #[test]
    fn test_summary_prefers_saved_config() {
        let tmp  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(tmp.path().to_string_lossy());
        ckpt.save_config(&TrainConfig { vocab_size: 50, embedding_dim: 2, lstm_units: 2, ..TrainConfig::default() })
            .unwrap();

        let summary = SummaryUseCase::new(tmp.path().to_string_lossy(), TrainConfig::default())
            .execute()
            .unwrap();
        assert_eq!(summary.layers[0].params, 50 * 2);
    }

    #[test]
    fn test_malformed_saved_config_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("train_config.json"), "{ not json").unwrap();

        let err = SummaryUseCase::new(tmp.path().to_string_lossy(), TrainConfig::default())
            .execute()
            .unwrap_err();
        assert!(format!("{err:#}").contains("Malformed config"));
    }
}
