use anyhow::{Context, Result};
use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::encoder::ReviewEncoder;
use crate::domain::review::Review;

/// One encoded, fixed-length review and its 0/1 label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSample {
    pub input_ids: Vec<u32>,
    pub label:     u8,
}

pub struct SentimentDataset {
    samples: Vec<ReviewSample>,
}

impl SentimentDataset {
    pub fn new(samples: Vec<ReviewSample>) -> Self { Self { samples } }

    /// Encode and pad every review.
    pub fn from_reviews(reviews: &[Review], encoder: &ReviewEncoder) -> Result<Self> {
        let samples = reviews
            .iter()
            .map(|r| {
                Ok(ReviewSample {
                    input_ids: encoder
                        .encode_padded(&r.text)
                        .with_context(|| format!("Cannot encode review '{}'", r.source))?,
                    label:     r.sentiment.label(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(samples))
    }

    pub fn sample_count(&self) -> usize { self.samples.len() }

    pub fn positive_count(&self) -> usize {
        self.samples.iter().filter(|s| s.label == 1).count()
    }

    pub fn into_samples(self) -> Vec<ReviewSample> { self.samples }
}

impl Dataset<ReviewSample> for SentimentDataset {
    fn get(&self, index: usize) -> Option<ReviewSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
