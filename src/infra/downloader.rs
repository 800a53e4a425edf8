// ============================================================
// Layer 6 — Dataset Downloader
// ============================================================
// Two files are needed before training can start:
//
//   1. aclImdb_v1.tar.gz      (~80 MB) the Large Movie Review
//                              dataset, 25k train + 25k test
//                              reviews, unpacked to <data_dir>/aclImdb
//   2. imdb_word_index.json   word → frequency rank, the table
//                              that defines the vocabulary
//
// Each file is fetched only if it is not already on disk. The
// archive is streamed to a `.part` file and unpacked into a
// scratch directory; both are renamed only when complete, so an
// interrupted download or unpack is never mistaken for a finished one.
//
// Reference: reqwest blocking client, flate2 + tar

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    time::Duration,
};

use crate::domain::review::{DatasetSplit, Sentiment};

pub const ACL_IMDB_URL: &str = "https://ai.stanford.edu/~amaas/data/sentiment/aclImdb_v1.tar.gz";
pub const WORD_INDEX_URL: &str =
    "https://storage.googleapis.com/tensorflow/tf-keras-datasets/imdb_word_index.json";

const ARCHIVE_FILE:    &str = "aclImdb_v1.tar.gz";
const DATASET_DIR:     &str = "aclImdb";
const WORD_INDEX_FILE: &str = "imdb_word_index.json";
const UNPACK_DIR:      &str = "aclImdb.unpacking";

/// Paths of the two inputs once they are on disk
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    /// The `aclImdb` directory
    pub reviews_dir: PathBuf,
    pub word_index:  PathBuf,
}

impl DatasetPaths {
    /// Where the inputs live under `data_dir`, whether or not they exist yet.
    pub fn under(data_dir: &Path) -> Self {
        Self {
            reviews_dir: data_dir.join(DATASET_DIR),
            word_index:  data_dir.join(WORD_INDEX_FILE),
        }
    }

    /// True when every labelled split directory exists.
    pub fn has_reviews(&self) -> bool {
        [DatasetSplit::Train, DatasetSplit::Test].iter().all(|split| {
            [Sentiment::Negative, Sentiment::Positive].iter().all(|sentiment| {
                self.reviews_dir.join(split.dir_name()).join(sentiment.dir_name()).is_dir()
            })
        })
    }
}

pub struct Downloader {
    data_dir: PathBuf,
    client:   reqwest::blocking::Client,
}

impl Downloader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("imdb-bilstm/", env!("CARGO_PKG_VERSION")))
            // The archive is large; the default 30s total timeout is far too short
            .timeout(Duration::from_secs(60 * 60))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { data_dir: data_dir.into(), client })
    }

    /// Download whatever is missing and return the paths of both inputs.
    pub fn ensure_all(&self) -> Result<DatasetPaths> {
        fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("Cannot create '{}'", self.data_dir.display()))?;

        let paths = DatasetPaths::under(&self.data_dir);
        self.ensure_word_index(&paths.word_index)?;
        self.ensure_reviews(&paths)?;
        Ok(paths)
    }

    fn ensure_word_index(&self, target: &Path) -> Result<()> {
        if target.is_file() {
            tracing::info!("Word index already present at '{}'", target.display());
            return Ok(());
        }
        self.download_to(WORD_INDEX_URL, target)
    }

    fn ensure_reviews(&self, paths: &DatasetPaths) -> Result<()> {
        let reviews_dir = &paths.reviews_dir;
        if paths.has_reviews() {
            tracing::info!("Reviews already present at '{}'", reviews_dir.display());
            return Ok(());
        }
        if reviews_dir.exists() {
            tracing::warn!("'{}' is incomplete, unpacking it again", reviews_dir.display());
            fs::remove_dir_all(reviews_dir)
                .with_context(|| format!("Cannot remove '{}'", reviews_dir.display()))?;
        }

        let archive = self.data_dir.join(ARCHIVE_FILE);
        if !archive.is_file() {
            self.download_to(ACL_IMDB_URL, &archive)?;
        }

        // Unpack beside the target, then move the finished tree into place
        let scratch = self.data_dir.join(UNPACK_DIR);
        if scratch.exists() {
            fs::remove_dir_all(&scratch)
                .with_context(|| format!("Cannot remove '{}'", scratch.display()))?;
        }

        tracing::info!("Unpacking '{}'", archive.display());
        let file = fs::File::open(&archive)
            .with_context(|| format!("Cannot open '{}'", archive.display()))?;
        unpack_tar_gz(file, &scratch)?;

        let unpacked = DatasetPaths::under(&scratch);
        if !unpacked.has_reviews() {
            bail!(
                "Archive '{}' did not contain a complete '{}' directory",
                archive.display(),
                DATASET_DIR
            );
        }
        fs::rename(&unpacked.reviews_dir, reviews_dir)
            .with_context(|| format!("Cannot move reviews to '{}'", reviews_dir.display()))?;
        fs::remove_dir_all(&scratch)
            .with_context(|| format!("Cannot remove '{}'", scratch.display()))?;
        Ok(())
    }

    /// Stream `url` into `target`, showing a byte progress bar.
    fn download_to(&self, url: &str, target: &Path) -> Result<()> {
        tracing::info!("Downloading {url}");
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Download of {url} failed with HTTP {status}");
        }

        let bar = match response.content_length() {
            Some(len) => ProgressBar::new(len).with_style(
                ProgressStyle::with_template("{msg} [{bar:30}] {bytes}/{total_bytes} ({eta})")?
                    .progress_chars("=> "),
            ),
            None => ProgressBar::new_spinner(),
        };
        bar.set_message(
            target.file_name().and_then(|n| n.to_str()).unwrap_or("download").to_string(),
        );

        let partial = target.with_extension("part");
        let mut out = fs::File::create(&partial)
            .with_context(|| format!("Cannot create '{}'", partial.display()))?;
        let bytes = io::copy(&mut bar.wrap_read(response), &mut out)
            .with_context(|| format!("Download of {url} was interrupted"))?;
        bar.finish_and_clear();

        fs::rename(&partial, target)
            .with_context(|| format!("Cannot move download to '{}'", target.display()))?;
        tracing::info!("Saved {} bytes to '{}'", bytes, target.display());
        Ok(())
    }
}

/// Unpack a gzip-compressed tar stream into `dest`.
pub fn unpack_tar_gz<R: Read>(reader: R, dest: &Path) -> Result<()> {
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    archive
        .unpack(dest)
        .with_context(|| format!("Cannot unpack archive into '{}'", dest.display()))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};

    fn tar_gz_with(files: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        for (path, body) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(body.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, path, body.as_bytes()).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn test_unpacks_dataset_layout() {
        let tmp     = tempfile::tempdir().unwrap();
        let archive = tar_gz_with(&[
            ("aclImdb/train/pos/0_9.txt", "great"),
            ("aclImdb/test/neg/1_1.txt",  "awful"),
        ]);

        unpack_tar_gz(archive.as_slice(), tmp.path()).unwrap();

        let root = tmp.path().join("aclImdb");
        assert_eq!(fs::read_to_string(root.join("train/pos/0_9.txt")).unwrap(), "great");
        assert_eq!(fs::read_to_string(root.join("test/neg/1_1.txt")).unwrap(), "awful");
    }

    #[test]
    fn test_corrupt_archive_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(unpack_tar_gz(&b"not a gzip stream"[..], tmp.path()).is_err());
    }

    const FULL_LAYOUT: [(&str, &str); 4] = [
        ("aclImdb/train/pos/0_9.txt", "great"),
        ("aclImdb/train/neg/1_2.txt", "awful"),
        ("aclImdb/test/pos/2_8.txt",  "loved it"),
        ("aclImdb/test/neg/3_1.txt",  "boring"),
    ];

    fn write_full_layout(data_dir: &Path) {
        for (path, body) in FULL_LAYOUT {
            let file = data_dir.join(path);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, body).unwrap();
        }
    }

    #[test]
    fn test_existing_inputs_need_no_network() {
        let tmp = tempfile::tempdir().unwrap();
        write_full_layout(tmp.path());
        fs::write(tmp.path().join("imdb_word_index.json"), "{}").unwrap();

        let paths = Downloader::new(tmp.path()).unwrap().ensure_all().unwrap();
        assert!(paths.has_reviews());
        assert_eq!(paths.reviews_dir, tmp.path().join("aclImdb"));
    }

    #[test]
    fn test_partial_tree_is_unpacked_again() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("aclImdb/train/neg")).unwrap();
        fs::write(tmp.path().join("imdb_word_index.json"), "{}").unwrap();
        // Archive already on disk, so nothing is fetched
        fs::write(tmp.path().join(ARCHIVE_FILE), tar_gz_with(&FULL_LAYOUT)).unwrap();

        let paths = Downloader::new(tmp.path()).unwrap().ensure_all().unwrap();

        assert!(paths.has_reviews());
        assert_eq!(fs::read_to_string(paths.reviews_dir.join("test/neg/3_1.txt")).unwrap(), "boring");
        assert!(!tmp.path().join(UNPACK_DIR).exists());
    }

    #[test]
    fn test_archive_without_full_layout_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("imdb_word_index.json"), "{}").unwrap();
        fs::write(tmp.path().join(ARCHIVE_FILE), tar_gz_with(&FULL_LAYOUT[..1])).unwrap();

        let err = Downloader::new(tmp.path()).unwrap().ensure_all().unwrap_err();
        assert!(err.to_string().contains("complete"));
        assert!(!tmp.path().join("aclImdb").exists());
    }
}
