//! Engine bookkeeping stored on a character.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Typed property bag.
///
/// Keys the engine itself relies on are fields; anything authored content
/// wants to remember goes into `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterProperties {
    /// When the last new-day interstitial was shown.
    #[serde(default)]
    pub last_new_day: Option<DateTime<Utc>>,
    /// Open extension map for author content.
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl CharacterProperties {
    /// Records that a new day began at `at`.
    pub fn set_last_new_day(&mut self, at: DateTime<Utc>) {
        self.last_new_day = Some(at);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// Stores an author value, returning the previous one.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Option<serde_json::Value> {
        self.extra.insert(key.into(), value.into())
    }
}
