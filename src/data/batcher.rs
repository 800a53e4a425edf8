// ============================================================
// Layer 4 — Review Batcher
// ============================================================
// Implements Burn's Batcher trait to turn a Vec<ReviewSample>
// into tensors.
//
//   Input:  N samples, each padded to max_len tokens
//   Output: input_ids [N, max_len], labels [N]
//
// Every sample is already padded to the same length, so the
// token ids can be flattened and reshaped without any further
// padding logic here.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::ReviewSample;

/// A batch of reviews ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct ReviewBatch<B: Backend> {
    /// Token ID sequences — shape: [batch_size, max_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// Ground truth labels (0 or 1) — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct ReviewBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ReviewBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<ReviewSample, ReviewBatch<B>> for ReviewBatcher<B> {
    fn batch(&self, items: Vec<ReviewSample>) -> ReviewBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map(|s| s.input_ids.len()).unwrap_or(0);

        // Vec<Vec<u32>> → Vec<i32> (Burn builds Int tensors from i32)
        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input_ids.iter().map(|&x| x as i32))
            .collect();

        let labels: Vec<i32> = items.iter().map(|s| s.label as i32).collect();

        let input_ids = Tensor::<B, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        ReviewBatch { input_ids, labels }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes_and_values() {
        let device  = Default::default();
        let batcher = ReviewBatcher::<NdArray>::new(device);
        let items = vec![
            ReviewSample { input_ids: vec![0, 0, 1, 5], label: 1 },
            ReviewSample { input_ids: vec![0, 1, 7, 9], label: 0 },
            ReviewSample { input_ids: vec![1, 4, 4, 2], label: 1 },
        ];

        let batch = batcher.batch(items);
        assert_eq!(batch.input_ids.dims(), [3, 4]);
        assert_eq!(batch.labels.dims(), [3]);

        let ids: Vec<i64> = batch.input_ids.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(ids, vec![0, 0, 1, 5, 0, 1, 7, 9, 1, 4, 4, 2]);
        let labels: Vec<i64> = batch.labels.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(labels, vec![1, 0, 1]);
    }
}
