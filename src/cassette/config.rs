//! Loading cassettes from disk.

use std::path::Path;

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use crate::error::ImageError;

/// Environment variable naming a cassette to replay instead of calling the service.
pub const REPLAY_ENV: &str = "IMAGEGEN_REPLAY";
/// Environment variable that turns on recording (`1` or `true`).
pub const RECORD_ENV: &str = "IMAGEGEN_REC";

/// Load a cassette file and create a replayer.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, ImageError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ImageError::Config(format!("Failed to read cassette file {}: {e}", path.display()))
    })?;
    let cassette: Cassette = serde_yaml::from_str(&content).map_err(|e| {
        ImageError::Config(format!("Failed to parse cassette file {}: {e}", path.display()))
    })?;
    log::info!(
        "replaying cassette '{}' ({} interactions)",
        cassette.name,
        cassette.interactions.len()
    );
    Ok(CassetteReplayer::new(&cassette))
}

/// Whether the recording switch is set to an enabled value.
#[must_use]
pub fn recording_enabled(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use crate::cassette::{GENERATE_METHOD, GENERATION_PORT};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn load_valid_cassette() {
        let dir = std::env::temp_dir().join("imagegen_cassette_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.cassette.yaml");

        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: GENERATION_PORT.into(),
                method: GENERATE_METHOD.into(),
                input: json!({"prompt": "a cat"}),
                output: json!({"Ok": {"imageUrl": "https://example.com/a.png"}}),
            }],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let mut replayer = load_cassette(&path).unwrap();
        let interaction = replayer.next_interaction(GENERATION_PORT, GENERATE_METHOD).unwrap();
        assert_eq!(interaction.seq, 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_nonexistent_fails() {
        let err = load_cassette(Path::new("/nonexistent/cassette.yaml")).unwrap_err();
        assert!(matches!(err, ImageError::Config(_)));
    }

    #[test]
    fn recording_switch_values() {
        assert!(recording_enabled(Some("1")));
        assert!(recording_enabled(Some("true")));
        assert!(!recording_enabled(Some("yes")));
        assert!(!recording_enabled(None));
    }
}
