use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Versioned storage key for the persisted progress record.
/// Bump the suffix whenever the record shape changes; old keys are simply
/// never read, so incompatible data cannot be misparsed.
pub const STORAGE_KEY: &str = "glint.progress.v2";

/// The persisted discovery progress for one browser.
///
/// Wire shape: `{ "found": { "<marker id>": "<ISO-8601>" }, "completedAt"?: "<ISO-8601>" }`.
/// `found` is append-only within a session; `completed_at` is stamped exactly
/// once, in the same mutation that inserts the final id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Discovered marker ids mapped to their discovery timestamps.
    #[serde(default)]
    pub found: BTreeMap<String, String>,
    /// Set if and only if every catalog marker has been found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl ProgressRecord {
    /// Parse a persisted record, failing soft: anything that does not match
    /// the current shape yields the empty record instead of an error.
    pub fn from_json_lossy(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(record) => record,
            Err(err) => {
                log::warn!("discarding unreadable progress record: {err}");
                Self::default()
            }
        }
    }

    /// Serialize for persistence.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
