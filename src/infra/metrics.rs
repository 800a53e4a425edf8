// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch.
//
// Output file: checkpoints/metrics.csv
//
//   epoch,loss,accuracy,val_loss,val_accuracy
//   1,0.512300,0.742000,0.401200,0.823000
//   2,0.301100,0.878000,0.352900,0.851000
//
// A new training run starts a new file.
//
// How to read the metrics:
//   - loss should decrease each epoch
//   - val_loss rising while loss keeps falling → overfitting

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

const HEADER: &str = "epoch,loss,accuracy,val_loss,val_accuracy";

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean binary cross-entropy over the training reviews
    pub loss: f64,

    /// Fraction of training reviews classified correctly
    pub accuracy: f64,

    pub val_loss: f64,

    pub val_accuracy: f64,
}

impl EpochMetrics {
    pub fn new(
        epoch:        usize,
        loss:         f64,
        accuracy:     f64,
        val_loss:     f64,
        val_accuracy: f64,
    ) -> Self {
        Self { epoch, loss, accuracy, val_loss, val_accuracy }
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create `<dir>/metrics.csv` (replacing an older one) and write the header.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");
        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "{HEADER}")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6}",
            m.epoch,
            m.loss,
            m.accuracy,
            m.val_loss,
            m.val_accuracy,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.loss,
            m.val_loss,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_then_one_row_per_epoch() {
        let tmp    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(tmp.path().to_string_lossy()).unwrap();
        logger.log(&EpochMetrics::new(1, 0.5, 0.75, 0.45, 0.8)).unwrap();
        logger.log(&EpochMetrics::new(2, 0.3, 0.875, 0.4, 0.85)).unwrap();

        let csv   = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec![
            HEADER,
            "1,0.500000,0.750000,0.450000,0.800000",
            "2,0.300000,0.875000,0.400000,0.850000",
        ]);
    }

    #[test]
    fn test_new_run_replaces_old_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_string_lossy().to_string();
        MetricsLogger::new(dir.clone()).unwrap()
            .log(&EpochMetrics::new(1, 0.5, 0.5, 0.5, 0.5)).unwrap();

        let fresh = MetricsLogger::new(dir).unwrap();
        assert_eq!(fs::read_to_string(fresh.csv_path()).unwrap().lines().count(), 1);
    }
}
