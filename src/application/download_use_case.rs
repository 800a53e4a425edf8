use anyhow::Result;

use crate::infra::downloader::{DatasetPaths, Downloader};

pub struct DownloadUseCase {
    data_dir: String,
}

impl DownloadUseCase {
    pub fn new(data_dir: impl Into<String>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn execute(&self) -> Result<DatasetPaths> {
        Downloader::new(&self.data_dir)?.ensure_all()
    }
}
