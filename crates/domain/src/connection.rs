//! Third-party integration connections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Connector identifier of the Concur expense integration.
pub const CONCUR_CONNECTOR_ID: &str = "concur";

/// Link between a user and a third-party integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationConnection {
    /// Connection identifier.
    pub id: String,
    /// Which integration this connection belongs to.
    pub connector_id: String,
    /// When the connection was established.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Expiry of the delegated authorization, absent when never granted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
}

impl IntegrationConnection {
    /// Returns whether the connection is valid at `now`.
    ///
    /// Valid iff `valid_until` is present and strictly in the future; a
    /// connection expiring exactly at `now` is already invalid.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.valid_until, Some(valid_until) if valid_until > now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn connection(valid_until: Option<chrono::DateTime<Utc>>) -> IntegrationConnection {
        IntegrationConnection {
            id: "C1".to_owned(),
            connector_id: CONCUR_CONNECTOR_ID.to_owned(),
            created_at: None,
            valid_until,
        }
    }

    #[test]
    fn future_expiry_is_valid() {
        let now = Utc::now();
        assert!(connection(Some(now + Duration::hours(1))).is_valid_at(now));
    }

    #[test]
    fn past_expiry_is_invalid() {
        let now = Utc::now();
        assert!(!connection(Some(now - Duration::seconds(1))).is_valid_at(now));
    }

    #[test]
    fn expiry_exactly_now_is_invalid() {
        let now = Utc::now();
        assert!(!connection(Some(now)).is_valid_at(now));
    }

    #[test]
    fn missing_expiry_is_invalid() {
        assert!(!connection(None).is_valid_at(Utc::now()));
    }
}
