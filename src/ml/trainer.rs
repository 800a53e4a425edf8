// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Epoch loop over Burn's DataLoader with Adam and binary
// cross-entropy.
//
// Generic over the autodiff backend so the same loop runs on
// Autodiff<NdArray> (CPU, tests) and Autodiff<Wgpu> (GPU):
//   - training batches live on B (gradients tracked)
//   - model.valid() returns the model on B::InnerBackend,
//     so validation batches are built for the inner backend
//
// After every epoch:
//   - one summary line is printed
//   - the same numbers are appended to metrics.csv
//   - the weights are checkpointed
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::ReviewBatcher, dataset::SentimentDataset};
use crate::infra::{checkpoint::CheckpointManager, metrics::{EpochMetrics, MetricsLogger}};
use crate::ml::evaluator::{count_correct, evaluate_loader, EvalAccumulator};
use crate::ml::model::SentimentModel;

/// Matches the epsilon Keras uses for Adam
const ADAM_EPSILON: f32 = 1e-7;

pub fn run_training<B: AutodiffBackend>(
    cfg:           &TrainConfig,
    train_dataset: SentimentDataset,
    val_dataset:   SentimentDataset,
    ckpt_manager:  &CheckpointManager,
    metrics:       &MetricsLogger,
    device:        B::Device,
) -> Result<SentimentModel<B>> {
    tracing::info!("Using device: {:?}", device);

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: SentimentModel<B> = cfg.model_config().init(&device);
    tracing::info!(
        "Model ready: vocab={}, embedding_dim={}, lstm_units={} ({} parameters)",
        cfg.vocab_size, cfg.embedding_dim, cfg.lstm_units, model.num_params()
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let mut optim = AdamConfig::new()
        .with_epsilon(ADAM_EPSILON)
        .init::<B, SentimentModel<B>>();

    let batches_per_epoch = train_dataset.sample_count().div_ceil(cfg.batch_size.max(1));

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_loader = DataLoaderBuilder::new(ReviewBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(cfg.num_workers)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    let val_loader = DataLoaderBuilder::new(ReviewBatcher::<B::InnerBackend>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .num_workers(cfg.num_workers)
        .build(val_dataset);

    let style = ProgressStyle::with_template(
        "{prefix} [{bar:30}] {pos}/{len} batches {msg}",
    )?
    .progress_chars("=> ");

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let bar = ProgressBar::new(batches_per_epoch as u64)
            .with_style(style.clone())
            .with_prefix(format!("Epoch {epoch}/{}", cfg.epochs));

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_acc = EvalAccumulator::default();

        for batch in train_loader.iter() {
            let batch_size = batch.labels.dims()[0];
            let (loss, logits) = model.forward_loss(batch.input_ids, batch.labels.clone());

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_acc.add(loss_val, count_correct(logits, batch.labels), batch_size);

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);

            bar.set_message(format!("loss={loss_val:.4}"));
            bar.inc(1);
        }
        bar.finish_and_clear();
        let train = train_acc.report();

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();
        let val = evaluate_loader(&model_valid, val_loader.as_ref());

        println!(
            "Epoch {:>3}/{} | loss={:.4} | accuracy={:.4} | val_loss={:.4} | val_accuracy={:.4}",
            epoch, cfg.epochs, train.loss, train.accuracy, val.loss, val.accuracy,
        );

        metrics.log(&EpochMetrics::new(epoch, train.loss, train.accuracy, val.loss, val.accuracy))?;
        ckpt_manager.save_model(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete! Metrics written to '{}'", metrics.csv_path().display());
    Ok(model)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::data::dataset::ReviewSample;
    use crate::ml::backend::CpuTrainBackend;
    use crate::ml::model::SentimentModelConfig;

    /// Positive reviews are full of token 5, negative ones of token 6.
    fn separable_samples(n: usize) -> Vec<ReviewSample> {
        (0..n)
            .map(|i| {
                let label = (i % 2) as u8;
                let word  = if label == 1 { 5 } else { 6 };
                ReviewSample { input_ids: vec![0, 1, word, 7, word, word], label }
            })
            .collect()
    }

    fn tensors(
        samples: &[ReviewSample],
        device:  &<CpuTrainBackend as Backend>::Device,
    ) -> (Tensor<CpuTrainBackend, 2, Int>, Tensor<CpuTrainBackend, 1, Int>) {
        use burn::data::dataloader::batcher::Batcher;
        let batch = ReviewBatcher::<CpuTrainBackend>::new(device.clone()).batch(samples.to_vec());
        (batch.input_ids, batch.labels)
    }

    #[test]
    fn test_adam_steps_reduce_loss_on_separable_data() {
        let device  = Default::default();
        let samples = separable_samples(16);
        let (ids, labels) = tensors(&samples, &device);

        let mut model = SentimentModelConfig::new(10)
            .with_embedding_dim(8)
            .with_lstm_units(4)
            .init::<CpuTrainBackend>(&device);
        let mut optim = AdamConfig::new().init::<CpuTrainBackend, SentimentModel<CpuTrainBackend>>();

        let (initial, _) = model.forward_loss(ids.clone(), labels.clone());
        let initial: f64 = initial.into_scalar().elem();

        for _ in 0..40 {
            let (loss, _) = model.forward_loss(ids.clone(), labels.clone());
            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(0.05, model, grads);
        }

        let (last, _) = model.forward_loss(ids, labels);
        let last: f64 = last.into_scalar().elem();
        assert!(last < initial, "loss did not drop: {initial} → {last}");
    }

    #[test]
    fn test_run_training_writes_checkpoints_and_metrics() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_string_lossy().to_string();

        let cfg = TrainConfig {
            checkpoint_dir: dir.clone(),
            vocab_size:     10,
            max_len:        6,
            embedding_dim:  4,
            lstm_units:     3,
            epochs:         2,
            batch_size:     4,
            lr:             1e-2,
            ..TrainConfig::default()
        };
        let ckpt    = CheckpointManager::new(&dir);
        let metrics = MetricsLogger::new(&dir).unwrap();

        let model = run_training::<CpuTrainBackend>(
            &cfg,
            SentimentDataset::new(separable_samples(10)),
            SentimentDataset::new(separable_samples(4)),
            &ckpt,
            &metrics,
            Default::default(),
        )
        .unwrap();

        assert_eq!(model.lstm_units, 3);
        assert!(tmp.path().join("model_epoch_1.mpk.gz").exists());
        assert!(tmp.path().join("model_epoch_2.mpk.gz").exists());
        assert_eq!(fs::read_to_string(tmp.path().join("latest_epoch.json")).unwrap().trim(), "2");

        let csv = fs::read_to_string(metrics.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 3); // header + 2 epochs
    }
}
