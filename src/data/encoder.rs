// ============================================================
// Layer 4 — Review Encoder
// ============================================================
// Converts a review into the integer sequence the model reads.
//
// Index layout (shared with the word-index table):
//   0            padding
//   1            start of sequence, prepended to every review
//   2            out-of-vocabulary word
//   3            unused
//   rank + 3     the word with frequency rank `rank` (1-based)
//
// Only indices below `vocab_size` are kept; every rarer word is
// collapsed onto the out-of-vocabulary index. The tokenizer built
// by TokenizerStore already honours this cut-off, the clamp here
// only guards against a tokenizer built for a larger vocabulary.

use anyhow::{anyhow, Result};
use tokenizers::Tokenizer;

use crate::data::{padding::Padder, preprocessor::Preprocessor};

pub const PAD_INDEX:    u32 = 0;
pub const START_INDEX:  u32 = 1;
pub const OOV_INDEX:    u32 = 2;
pub const UNUSED_INDEX: u32 = 3;

/// Offset added to a word's frequency rank to get its index
pub const INDEX_FROM: u32 = 3;

/// Index for the word of frequency rank `rank`, or None when the
/// word falls outside the `vocab_size` most frequent words.
pub fn index_for_rank(rank: u32, vocab_size: usize) -> Option<u32> {
    let index = rank.checked_add(INDEX_FROM)?;
    ((index as usize) < vocab_size).then_some(index)
}

#[derive(Clone)]
pub struct ReviewEncoder {
    tokenizer:    Tokenizer,
    preprocessor: Preprocessor,
    padder:       Padder,
    vocab_size:   usize,
}

impl ReviewEncoder {
    pub fn new(tokenizer: Tokenizer, padder: Padder, vocab_size: usize) -> Self {
        Self {
            tokenizer,
            preprocessor: Preprocessor::new(),
            padder,
            vocab_size,
        }
    }

    pub fn padder(&self) -> &Padder {
        &self.padder
    }

    /// Clean, tokenise and look up every word. The result starts with
    /// START_INDEX and is not padded.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let cleaned = self.preprocessor.clean(text);
        let encoding = self
            .tokenizer
            .encode(cleaned.as_str(), false)
            .map_err(|e| anyhow!("Tokenisation error: {e}"))?;

        let mut ids = Vec::with_capacity(encoding.get_ids().len() + 1);
        ids.push(START_INDEX);
        ids.extend(encoding.get_ids().iter().map(|&id| {
            if (id as usize) < self.vocab_size { id } else { OOV_INDEX }
        }));
        Ok(ids)
    }

    /// `encode` followed by padding/truncation to the fixed length.
    pub fn encode_padded(&self, text: &str) -> Result<Vec<u32>> {
        Ok(self.padder.pad(&self.encode(text)?))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::data::padding::PadSide;
    use crate::infra::tokenizer_store::tokenizer_from_word_index;

    fn test_encoder(vocab_size: usize, max_len: usize) -> ReviewEncoder {
        let word_index: HashMap<String, u32> = [
            ("the", 1), ("movie", 2), ("was", 3), ("great", 4), ("don't", 5), ("boring", 9),
        ]
        .into_iter()
        .map(|(w, r)| (w.to_string(), r))
        .collect();
        let tokenizer = tokenizer_from_word_index(&word_index, vocab_size).unwrap();
        ReviewEncoder::new(tokenizer, Padder::new(max_len, PadSide::Pre, PadSide::Pre), vocab_size)
    }

    #[test]
    fn test_rank_offset_and_cutoff() {
        assert_eq!(index_for_rank(1, 10_000), Some(4));
        assert_eq!(index_for_rank(9_996, 10_000), Some(9_999));
        assert_eq!(index_for_rank(9_997, 10_000), None);
    }

    #[test]
    fn test_encode_prepends_start_and_offsets_ranks() {
        let enc = test_encoder(100, 10);
        assert_eq!(enc.encode("The movie was GREAT!").unwrap(), vec![1, 4, 5, 6, 7]);
    }

    #[test]
    fn test_unknown_and_rare_words_become_oov() {
        // "boring" has rank 9 → index 12, outside a 10-word vocabulary
        let enc = test_encoder(10, 10);
        assert_eq!(enc.encode("the zzzz boring").unwrap(), vec![1, 4, 2, 2]);
    }

    #[test]
    fn test_contractions_survive_cleaning() {
        let enc = test_encoder(100, 10);
        assert_eq!(enc.encode("Don't!").unwrap(), vec![1, 8]);
    }

    #[test]
    fn test_encode_padded_has_fixed_length() {
        let enc = test_encoder(100, 8);
        let ids = enc.encode_padded("the movie").unwrap();
        assert_eq!(ids, vec![0, 0, 0, 0, 0, 1, 4, 5]);
    }
}
