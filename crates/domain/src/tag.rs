//! RFID badge record.

use serde::{Deserialize, Serialize};

/// RFID badge assigned to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Badge identifier printed on the card.
    pub id: String,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the badge can start sessions.
    #[serde(default)]
    pub active: bool,
}

impl Tag {
    /// Returns the badge row seeded into the form for a brand-new user.
    #[must_use]
    pub fn default_badge() -> Self {
        Self {
            id: String::new(),
            description: None,
            active: true,
        }
    }
}
