//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_generator;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::ImageError;

/// Outcome of a replayed call: a recorded value or a recorded error message.
pub(crate) enum Replayed<T> {
    Ok(T),
    Err(String),
}

/// Retrieve and decode the next recorded output for a port and method.
///
/// # Errors
///
/// Returns an error if the cassette is exhausted or the output does not
/// decode as `T`.
pub(crate) fn next_replayed<T: serde::de::DeserializeOwned>(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<Replayed<T>, ImageError> {
    let output = {
        let mut guard = replayer
            .lock()
            .map_err(|e| ImageError::Config(format!("Replayer lock poisoned: {e}")))?;
        guard.next_interaction(port, method)?.output
    };

    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err_val.as_str().unwrap_or("replayed error").to_string();
        return Ok(Replayed::Err(msg));
    }
    let value = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(value)
        .map(Replayed::Ok)
        .map_err(|e| ImageError::Config(format!("Unreadable {port}::{method} output: {e}")))
}
