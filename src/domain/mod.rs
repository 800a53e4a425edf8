// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that describe what the
// system is about: movie reviews, their sentiment, and the
// predictions made about them.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// A raw review with its sentiment, and the prediction type
pub mod review;

// Core abstractions (traits) that other layers implement
pub mod traits;
