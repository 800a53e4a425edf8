// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the review files on disk and the integer
// tensor batches the model consumes.
//
//   aclImdb/{train,test}/{pos,neg}/*.txt
//       │
//       ▼
//   AclImdbLoader     → reads files, labels them from the dir name
//       │
//       ▼
//   Preprocessor      → lowercases, drops markup and punctuation
//       │
//       ▼
//   ReviewEncoder     → word → index lookup, start token prepended
//       │
//       ▼
//   Padder            → pads / truncates to a fixed length
//       │
//       ▼
//   SentimentDataset  → implements Burn's Dataset trait
//       │
//       ▼
//   ReviewBatcher     → stacks samples into [batch, max_len] tensors
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the Large Movie Review dataset directory layout
pub mod loader;

/// Cleans raw review text before tokenisation
pub mod preprocessor;

/// Turns cleaned text into word indices
pub mod encoder;

/// Fixed-length padding and truncation
pub mod padding;

/// Implements Burn's Dataset trait for encoded reviews
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/validation sets
pub mod splitter;
