//! Adapter implementations for port traits.
//!
//! - `live/` — Real service, filesystem, and terminal implementations
//! - `recording/` — Record generation calls to cassettes
//! - `replaying/` — Replay generation calls from cassettes

pub mod live;
pub mod recording;
pub mod replaying;
