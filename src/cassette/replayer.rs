//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};
use crate::error::ImageError;

/// Serves a cassette's interactions in order, one queue per `port::method`.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<String, VecDeque<Interaction>>,
}

fn queue_key(port: &str, method: &str) -> String {
    format!("{port}::{method}")
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<String, VecDeque<Interaction>> = HashMap::new();
        let mut ordered = cassette.interactions.clone();
        ordered.sort_by_key(|i| i.seq);
        for interaction in ordered {
            queues
                .entry(queue_key(&interaction.port, &interaction.method))
                .or_default()
                .push_back(interaction);
        }
        Self { queues }
    }

    /// Take the next interaction recorded for `port::method`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Config`] when nothing (more) was recorded for
    /// that pair, listing the pairs the cassette does contain.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, ImageError> {
        let key = queue_key(port, method);
        if let Some(interaction) = self.queues.get_mut(&key).and_then(VecDeque::pop_front) {
            return Ok(interaction);
        }

        let mut available: Vec<&str> = self
            .queues
            .iter()
            .filter(|(_, q)| !q.is_empty())
            .map(|(k, _)| k.as_str())
            .collect();
        available.sort_unstable();
        Err(ImageError::Config(format!(
            "Cassette exhausted: nothing left for {key}. Remaining: [{}]",
            available.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::{GENERATE_METHOD, GENERATION_PORT};
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, prompt: &str) -> Interaction {
        Interaction {
            seq,
            port: GENERATION_PORT.into(),
            method: GENERATE_METHOD.into(),
            input: json!({"prompt": prompt}),
            output: json!({"Ok": {"imageUrl": format!("https://example.com/{seq}.png")}}),
        }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), commit: "abc".into(), interactions }
    }

    #[test]
    fn replay_in_seq_order() {
        let cassette = make_cassette(vec![interaction(1, "second"), interaction(0, "first")]);
        let mut replayer = CassetteReplayer::new(&cassette);

        let first = replayer.next_interaction(GENERATION_PORT, GENERATE_METHOD).unwrap();
        assert_eq!(first.input["prompt"], "first");

        let second = replayer.next_interaction(GENERATION_PORT, GENERATE_METHOD).unwrap();
        assert_eq!(second.input["prompt"], "second");
    }

    #[test]
    fn exhausted_replayer_errors() {
        let mut replayer = CassetteReplayer::new(&make_cassette(vec![interaction(0, "only")]));
        assert!(replayer.next_interaction(GENERATION_PORT, GENERATE_METHOD).is_ok());

        let err = replayer.next_interaction(GENERATION_PORT, GENERATE_METHOD).unwrap_err();
        assert!(err.to_string().contains("Cassette exhausted"));
    }

    #[test]
    fn unknown_port_lists_remaining_pairs() {
        let mut replayer = CassetteReplayer::new(&make_cassette(vec![interaction(0, "x")]));
        let err = replayer.next_interaction("unknown", "method").unwrap_err();
        assert!(err.to_string().contains("generation_service::generate"));
    }
}
