// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here.
//
//   backend.rs    — which Burn backend runs the tensors
//                   (ndarray on the CPU, wgpu on the GPU)
//
//   model.rs      — Embedding → BiLSTM → Linear(1) + sigmoid
//
//   trainer.rs    — epoch loop: forward, binary cross-entropy,
//                   backward, Adam step, validation, checkpoint
//
//   evaluator.rs  — loss and accuracy over a whole dataset
//
//   inferencer.rs — free text → probability of a positive review
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM
//            Schuster & Paliwal (1997) Bidirectional RNNs

pub mod backend;

/// BiLSTM sentiment classifier
pub mod model;

/// Full training loop with validation and checkpointing
pub mod trainer;

/// Dataset-level loss / accuracy
pub mod evaluator;

/// Loads a checkpoint and scores free text
pub mod inferencer;
