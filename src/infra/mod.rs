// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that touch the disk or the network:
//
//   downloader.rs      — Fetches the review archive and the
//                        word-index table over HTTP and unpacks
//                        the archive. Skips anything already
//                        present on disk.
//
//   checkpoint.rs      — Saving and loading model weights with
//                        Burn's CompactRecorder, plus the
//                        TrainConfig JSON needed to rebuild the
//                        model for inference.
//
//   tokenizer_store.rs — Turns the word-index table into a
//                        word-level tokenizer and persists it,
//                        so training and inference share one
//                        vocabulary.
//
//   metrics.rs         — Per-epoch metrics CSV.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Dataset and word-index download
pub mod downloader;

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Tokenizer building, saving, and loading
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;
