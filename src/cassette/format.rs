//! Cassette data structures for recording and replaying interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`"fs"`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Free-form provenance label, e.g. the build tool version.
    pub commit: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_keeps_nested_json_output() {
        let cassette = Cassette {
            name: "reply-tree".into(),
            recorded_at: Utc::now(),
            commit: "cmake-3.28".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "fs".into(),
                method: "list_dir".into(),
                input: json!({"path": "/build/.cmake/api/v1/reply"}),
                output: json!({"ok": ["codemodel-v2-1.json", "index-1.json"]}),
            }],
        };
        let yaml = serde_yaml::to_string(&cassette).expect("serialize");
        let deserialized: Cassette = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(deserialized.interactions[0].output["ok"][1], "index-1.json");
        assert_eq!(cassette, deserialized);
    }
}
