// ============================================================
// Layer 4 — Sequence Padding
// ============================================================
// Reviews have wildly different lengths, but a batch tensor is
// rectangular. Every encoded review is therefore forced to
// exactly `max_len` tokens:
//
//   too long  → truncated   (Pre: drop the head, keep the tail)
//                            (Post: keep the head, drop the tail)
//   too short → padded with PAD_INDEX
//                            (Pre: zeros on the left)
//                            (Post: zeros on the right)
//
// Pre/Pre is the default. With pre-padding the last real token
// sits in the last position, right where the forward LSTM
// direction finishes.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::data::encoder::PAD_INDEX;

/// Which end of the sequence padding or truncation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PadSide {
    Pre,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padder {
    pub max_len:    usize,
    pub padding:    PadSide,
    pub truncating: PadSide,
}

impl Padder {
    pub fn new(max_len: usize, padding: PadSide, truncating: PadSide) -> Self {
        Self { max_len, padding, truncating }
    }

    /// Return a copy of `ids` with exactly `max_len` entries.
    pub fn pad(&self, ids: &[u32]) -> Vec<u32> {
        let kept: &[u32] = if ids.len() > self.max_len {
            match self.truncating {
                PadSide::Pre  => &ids[ids.len() - self.max_len..],
                PadSide::Post => &ids[..self.max_len],
            }
        } else {
            ids
        };

        let fill = self.max_len - kept.len();
        let mut out = Vec::with_capacity(self.max_len);
        match self.padding {
            PadSide::Pre => {
                out.resize(fill, PAD_INDEX);
                out.extend_from_slice(kept);
            }
            PadSide::Post => {
                out.extend_from_slice(kept);
                out.resize(self.max_len, PAD_INDEX);
            }
        }
        out
    }
}
