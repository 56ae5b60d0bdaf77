//! Input/output operations and error handling

/// Command-line interface and generation orchestration
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG export
pub mod image;
/// Progress bars and diagnostics
pub mod progress;
/// Text rendering
pub mod render;
/// Animated GIF capture
pub mod visualization;
