// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to review corpora and to trained
// models through these traits, never through concrete types.
//
//   - AclImdbLoader implements ReviewSource
//   - Inferencer    implements SentimentPredictor
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::review::{DatasetSplit, Prediction, Review};

// ─── ReviewSource ─────────────────────────────────────────────────────────────
/// Any component that can produce labelled reviews for a split.
pub trait ReviewSource {
    /// Load every review of the given split.
    fn load_split(&self, split: DatasetSplit) -> Result<Vec<Review>>;
}

// ─── SentimentPredictor ───────────────────────────────────────────────────────
/// Any component that can score free text.
pub trait SentimentPredictor {
    fn predict(&self, text: &str) -> Result<Prediction>;

    /// Score several texts. The default runs them one at a time.
    fn predict_all(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        texts.iter().map(|t| self.predict(t)).collect()
    }
}
