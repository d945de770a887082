//! Record/replay infrastructure for deterministic testing.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;

/// Port name used for generation service interactions.
pub const GENERATION_PORT: &str = "generation_service";
/// Method name used for generation service interactions.
pub const GENERATE_METHOD: &str = "generate";
