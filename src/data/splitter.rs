// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Shuffles samples and splits them into:
//   - Training set:   used to update model weights
//   - Validation set: reported after every epoch, never trained on
//
// The review files are grouped by label (all negatives, then all
// positives), so a split without shuffling would leave the
// validation set with a single class.
//
// The shuffle is seeded so a run can be reproduced exactly.
//
// Reference: rand crate documentation (SliceRandom, SeedableRng)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with `seed` and split into (train, validation).
///
/// `train_fraction` is the share kept for training, e.g. 0.8 = 80%.
pub fn split_train_val<T>(
    mut samples:    Vec<T>,
    train_fraction: f64,
    seed:           u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;
    let split_at = split_at.min(total);

    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation ({}% / {}%)",
        samples.len(),
        val.len(),
        (samples.len() * 100) / total.max(1),
        (val.len()     * 100) / total.max(1),
    );

    (samples, val)
}

/// Shuffle with `seed` and keep at most `limit` items.
/// `None` keeps everything (still shuffled).
pub fn shuffle_and_take<T>(mut items: Vec<T>, limit: Option<usize>, seed: u64) -> Vec<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}
