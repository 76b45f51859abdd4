//! Input/output surfaces around the generative core

/// Command-line interface and batch runner
pub mod cli;
/// Compile-time constants for every subsystem
pub mod configuration;
/// Error types and result alias
pub mod error;
/// PNG preview export
pub mod image;
/// JSON metadata export
pub mod metadata;
/// Batch progress display
pub mod progress;
