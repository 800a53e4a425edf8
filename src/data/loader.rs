// ============================================================
// Layer 4 — Large Movie Review Dataset Loader
// ============================================================
// Reads the directory layout of the Stanford Large Movie Review
// dataset (aclImdb):
//
//   aclImdb/
//     train/
//       pos/  12500 × <id>_<rating>.txt
//       neg/  12500 × <id>_<rating>.txt
//       unsup/                        ← unlabelled, ignored
//     test/
//       pos/  neg/
//
// The label comes from the directory name, so only the two
// labelled sub-directories are read. Files are visited in sorted
// order so that two runs with the same seed see the same data.
//
// Reference: Rust Book §9 (Error Handling), §12 (I/O)

use anyhow::{bail, Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::domain::review::{DatasetSplit, Review, Sentiment};
use crate::domain::traits::ReviewSource;

pub struct AclImdbLoader {
    /// Path to the `aclImdb` directory
    root: PathBuf,
}

impl AclImdbLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ReviewSource for AclImdbLoader {
    fn load_split(&self, split: DatasetSplit) -> Result<Vec<Review>> {
        let split_dir = self.root.join(split.dir_name());
        if !split_dir.is_dir() {
            bail!(
                "Dataset directory '{}' not found. Run 'imdb-bilstm download' first \
                 or pass --data-dir pointing at the folder that contains 'aclImdb'.",
                split_dir.display()
            );
        }

        let mut reviews = Vec::new();
        for sentiment in [Sentiment::Negative, Sentiment::Positive] {
            let dir = split_dir.join(sentiment.dir_name());
            let before = reviews.len();
            load_label_dir(&dir, sentiment, &mut reviews)?;
            tracing::debug!(
                "Loaded {} {} reviews from '{}'",
                reviews.len() - before,
                sentiment,
                dir.display()
            );
        }

        tracing::info!(
            "Loaded {} {} reviews from '{}'",
            reviews.len(),
            split.dir_name(),
            split_dir.display()
        );
        Ok(reviews)
    }
}

/// Read every `.txt` file in `dir` as a review with the given label.
/// A file that cannot be read is logged and skipped.
fn load_label_dir(dir: &Path, sentiment: Sentiment, out: &mut Vec<Review>) -> Result<()> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Cannot read directory '{}'", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("txt"))
        .collect();
    paths.sort();

    for path in paths {
        match fs::read_to_string(&path) {
            Ok(text) => {
                let source = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("unknown")
                    .to_string();
                out.push(Review::new(source, text, sentiment));
            }
            Err(e) => tracing::warn!("Skipping '{}': {}", path.display(), e),
        }
    }
    Ok(())
}
