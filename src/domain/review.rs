// ============================================================
// Layer 3 — Review Domain Types
// ============================================================
// A movie review is a piece of free text with a binary label:
//   0 = negative, 1 = positive
//
// The label set is closed, so it is modelled as an enum rather
// than a bare integer. Conversion from a raw u8 is fallible and
// is the only place where an out-of-range label can be rejected.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Binary sentiment of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    /// Probability at or above which a prediction counts as positive
    pub const DECISION_THRESHOLD: f32 = 0.5;

    /// The integer label used by the model (0 or 1)
    pub fn label(self) -> u8 {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Positive => 1,
        }
    }

    /// Map a sigmoid output to a sentiment
    pub fn from_probability(probability: f32) -> Self {
        if probability >= Self::DECISION_THRESHOLD {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    /// Name of the sub-directory holding reviews with this label
    /// in the Large Movie Review dataset layout
    pub fn dir_name(self) -> &'static str {
        match self {
            Sentiment::Negative => "neg",
            Sentiment::Positive => "pos",
        }
    }
}

impl TryFrom<u8> for Sentiment {
    type Error = anyhow::Error;

    fn try_from(label: u8) -> Result<Self> {
        match label {
            0 => Ok(Sentiment::Negative),
            1 => Ok(Sentiment::Positive),
            other => bail!("Invalid sentiment label {other}: expected 0 or 1"),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Positive => write!(f, "positive"),
        }
    }
}

/// Which half of the corpus to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSplit {
    Train,
    Test,
}

impl DatasetSplit {
    pub fn dir_name(self) -> &'static str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Test  => "test",
        }
    }
}

/// A raw review loaded from disk, before any tokenisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// File name the review came from, kept for traceability
    pub source: String,

    /// The full review text, markup included
    pub text: String,

    pub sentiment: Sentiment,
}

impl Review {
    pub fn new(source: impl Into<String>, text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
            sentiment,
        }
    }
}

/// The model's verdict on one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Sigmoid output in (0, 1): the probability the text is positive
    pub probability: f32,
    pub sentiment:   Sentiment,
}

impl Prediction {
    pub fn from_probability(probability: f32) -> Self {
        Self {
            probability,
            sentiment: Sentiment::from_probability(probability),
        }
    }
}
