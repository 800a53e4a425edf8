// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case wires the other layers together for one goal.
//
// Rules for this layer:
//   - No tensor math or model code here (Layer 5)
//   - No printing here (Layer 1)
//   - No direct file or network access (Layers 4 and 6)
//   - Only workflow coordination
//
// Burn picks the backend at compile time through a type
// parameter, while the user picks it at run time with
// --backend. The use cases bridge the two with a `match` that
// calls a generic `*_on::<Backend>` method.

// Fetch the review archive and the word index
pub mod download_use_case;

// load/pad → build → train → evaluate → example predictions
pub mod train_use_case;

// Test-set loss and accuracy of a saved checkpoint
pub mod evaluate_use_case;

// Free-text sentiment from a saved checkpoint
pub mod predict_use_case;

// Layer table and parameter counts
pub mod summary_use_case;
