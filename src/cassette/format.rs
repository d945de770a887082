//! On-disk cassette layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session of port interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable session name.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Interactions in recording order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Global sequence number within the cassette.
    pub seq: u64,
    /// Port name, e.g. `generation_service`.
    pub port: String,
    /// Method name on the port.
    pub method: String,
    /// Serialized call input.
    pub input: serde_json::Value,
    /// Serialized outcome: `{"Ok": ...}` or `{"Err": "..."}`.
    pub output: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_handwritten_yaml() {
        let yaml = r#"
name: handwritten
recorded_at: "2026-01-01T00:00:00Z"
commit: test
interactions:
  - seq: 0
    port: generation_service
    method: generate
    input:
      prompt: a cat
    output:
      Err: rate limited
"#;
        let cassette: Cassette = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cassette.name, "handwritten");
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].input["prompt"], "a cat");
        assert_eq!(cassette.interactions[0].output["Err"], "rate limited");
    }
}
