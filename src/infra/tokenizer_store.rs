// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// The vocabulary is not learned here. It comes from the IMDB
// word-index table (word → frequency rank, 1 = most frequent).
// That table is turned into a HuggingFace WordLevel tokenizer:
//
//   [PAD]    → 0
//   [START]  → 1
//   [UNK]    → 2      (every word outside the vocabulary)
//   [UNUSED] → 3
//   word     → rank + 3   for the vocab_size - 4 most frequent words
//
// The tokenizer JSON is assembled by hand and parsed with
// Tokenizer::from_str, so no trainer is involved. Text is
// cleaned by the Preprocessor before it reaches the tokenizer,
// so splitting on whitespace is enough.
//
// Reference: HuggingFace tokenizers — WordLevel model

use anyhow::{anyhow, Context, Result};
use std::{collections::HashMap, fs, path::{Path, PathBuf}, str::FromStr};
use tokenizers::Tokenizer;

use crate::data::encoder::{index_for_rank, OOV_INDEX, PAD_INDEX, START_INDEX, UNUSED_INDEX};

const TOKENIZER_FILE: &str = "tokenizer.json";

const SPECIAL_TOKENS: [(&str, u32); 4] = [
    ("[PAD]",    PAD_INDEX),
    ("[START]",  START_INDEX),
    ("[UNK]",    OOV_INDEX),
    ("[UNUSED]", UNUSED_INDEX),
];

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKENIZER_FILE)
    }

    /// Load a previously saved tokenizer from JSON file
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.path();
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow!(
                "Cannot load tokenizer from '{}': {}. Have you run 'train' first?",
                path.display(), e
            ))
    }

    /// Build the tokenizer from a word-index file and save it,
    /// replacing any tokenizer already in the directory.
    pub fn build_and_save(&self, word_index_path: &Path, vocab_size: usize) -> Result<Tokenizer> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let word_index = read_word_index(word_index_path)?;
        let tokenizer  = tokenizer_from_word_index(&word_index, vocab_size)?;

        let tok_path = self.path();
        tokenizer
            .save(&tok_path, true)
            .map_err(|e| anyhow!("Cannot write '{}': {e}", tok_path.display()))?;

        tracing::info!(
            "Tokenizer built with vocab_size={} from {} indexed words, saved to '{}'",
            vocab_size,
            word_index.len(),
            tok_path.display()
        );

        Ok(tokenizer)
    }
}

/// Read `imdb_word_index.json`: a flat JSON object of word → rank.
pub fn read_word_index(path: &Path) -> Result<HashMap<String, u32>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read word index '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Malformed word index '{}'", path.display()))
}

/// Build an in-memory tokenizer without touching the disk.
pub fn tokenizer_from_word_index(
    word_index: &HashMap<String, u32>,
    vocab_size: usize,
) -> Result<Tokenizer> {
    let json = tokenizer_json(word_index, vocab_size);
    Tokenizer::from_str(&json.to_string())
        .map_err(|e| anyhow!("Cannot build tokenizer: {e}"))
}

/// HuggingFace tokenizer JSON for a WordLevel model over the
/// `vocab_size` most frequent words.
fn tokenizer_json(word_index: &HashMap<String, u32>, vocab_size: usize) -> serde_json::Value {
    let mut vocab = serde_json::Map::new();
    for (token, id) in SPECIAL_TOKENS {
        vocab.insert(token.to_string(), serde_json::json!(id));
    }
    for (word, &rank) in word_index {
        if let Some(index) = index_for_rank(rank, vocab_size) {
            vocab.insert(word.clone(), serde_json::json!(index));
        }
    }

    let added_tokens: Vec<serde_json::Value> = SPECIAL_TOKENS
        .iter()
        .map(|(token, id)| serde_json::json!({
            "id": id, "content": token, "single_word": false, "lstrip": false,
            "rstrip": false, "normalized": false, "special": true
        }))
        .collect();

    serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": added_tokens,
        "normalizer": null,
        "pre_tokenizer": { "type": "WhitespaceSplit" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "[UNK]"
        }
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> HashMap<String, u32> {
        [("the", 1), ("and", 2), ("film", 19), ("rare", 500)]
            .into_iter()
            .map(|(w, r)| (w.to_string(), r))
            .collect()
    }

    #[test]
    fn test_vocabulary_respects_cutoff() {
        let tok = tokenizer_from_word_index(&sample_index(), 30).unwrap();
        assert_eq!(tok.token_to_id("the"),  Some(4));
        assert_eq!(tok.token_to_id("film"), Some(22));
        assert_eq!(tok.token_to_id("rare"), None);
        assert_eq!(tok.token_to_id("[UNK]"), Some(OOV_INDEX));
    }

    #[test]
    fn test_unknown_words_map_to_oov() {
        let tok = tokenizer_from_word_index(&sample_index(), 30).unwrap();
        let enc = tok.encode("the rare zebra film", false).unwrap();
        assert_eq!(enc.get_ids(), &[4, OOV_INDEX, OOV_INDEX, 22]);
    }

    #[test]
    fn test_build_and_save_then_load() {
        let tmp   = tempfile::tempdir().unwrap();
        let index = tmp.path().join("imdb_word_index.json");
        fs::write(&index, serde_json::to_string(&sample_index()).unwrap()).unwrap();

        let store = TokenizerStore::new(tmp.path().join("ckpt").to_string_lossy());
        let built = store.build_and_save(&index, 30).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(built.token_to_id("and"), loaded.token_to_id("and"));
        assert_eq!(loaded.token_to_id("and"), Some(5));
    }

    #[test]
    fn test_malformed_word_index_is_an_error() {
        let tmp   = tempfile::tempdir().unwrap();
        let index = tmp.path().join("bad.json");
        fs::write(&index, "[1, 2, 3]").unwrap();
        assert!(read_word_index(&index).is_err());
    }
}
