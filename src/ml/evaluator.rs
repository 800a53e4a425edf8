// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Runs a trained model over a whole dataset without updating it
// and reports the mean binary cross-entropy and the accuracy.
//
// Loss is weighted by batch size so the last, possibly smaller,
// batch does not count more than its share of reviews.
//
// A review counts as predicted positive when sigmoid(logit) >= 0.5,
// which is the same as logit >= 0.

use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::data::{batcher::{ReviewBatch, ReviewBatcher}, dataset::SentimentDataset};
use crate::ml::model::SentimentModel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    /// Mean binary cross-entropy per review (NaN for an empty dataset)
    pub loss:     f64,
    /// Fraction of reviews classified correctly, in [0, 1]
    pub accuracy: f64,
    pub samples:  usize,
}

/// Running sums for one pass over a data loader.
#[derive(Debug, Default, Clone, Copy)]
pub struct EvalAccumulator {
    loss_sum: f64,
    correct:  usize,
    samples:  usize,
}

impl EvalAccumulator {
    pub fn add(&mut self, batch_loss: f64, correct: usize, batch_size: usize) {
        self.loss_sum += batch_loss * batch_size as f64;
        self.correct  += correct;
        self.samples  += batch_size;
    }

    pub fn report(&self) -> EvalReport {
        if self.samples == 0 {
            return EvalReport { loss: f64::NAN, accuracy: 0.0, samples: 0 };
        }
        EvalReport {
            loss:     self.loss_sum / self.samples as f64,
            accuracy: self.correct as f64 / self.samples as f64,
            samples:  self.samples,
        }
    }
}

/// Number of reviews whose thresholded prediction matches the label.
pub fn count_correct<B: Backend>(logits: Tensor<B, 1>, labels: Tensor<B, 1, Int>) -> usize {
    let correct: i64 = logits
        .greater_equal_elem(0.0)
        .int()
        .equal(labels)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    correct as usize
}

/// Evaluate over every batch an existing loader yields.
pub fn evaluate_loader<B: Backend>(
    model:  &SentimentModel<B>,
    loader: &dyn DataLoader<ReviewBatch<B>>,
) -> EvalReport {
    let mut acc = EvalAccumulator::default();

    for batch in loader.iter() {
        let batch_size = batch.labels.dims()[0];
        let (loss, logits) = model.forward_loss(batch.input_ids, batch.labels.clone());
        let batch_loss: f64 = loss.into_scalar().elem::<f64>();
        acc.add(batch_loss, count_correct(logits, batch.labels), batch_size);
    }

    acc.report()
}

/// Build a loader for `dataset` and evaluate over it.
pub fn evaluate<B: Backend>(
    model:       &SentimentModel<B>,
    dataset:     SentimentDataset,
    batch_size:  usize,
    num_workers: usize,
    device:      &B::Device,
) -> EvalReport {
    let loader = DataLoaderBuilder::new(ReviewBatcher::<B>::new(device.clone()))
        .batch_size(batch_size)
        .num_workers(num_workers)
        .build(dataset);

    let report = evaluate_loader(model, loader.as_ref());
    tracing::debug!(
        "Evaluated {} reviews: loss={:.4} accuracy={:.4}",
        report.samples, report.loss, report.accuracy
    );
    report
}
