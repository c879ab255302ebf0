//! Charging transaction rows as displayed in the back-office tables.

use serde::{Deserialize, Serialize};

/// Severity of accumulated inactivity during a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InactivityStatus {
    /// Inactivity within the expected range.
    #[default]
    #[serde(rename = "I")]
    Info,
    /// Inactivity getting significant.
    #[serde(rename = "W")]
    Warning,
    /// Vehicle occupied the connector well past the end of charge.
    #[serde(rename = "E")]
    Error,
}

/// Final measures recorded when a session completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStop {
    /// Seconds without energy delivery over the whole session.
    pub total_inactivity_secs: u64,
    /// Total session duration in seconds.
    pub total_duration_secs: u64,
    /// Inactivity severity at stop time.
    #[serde(default)]
    pub inactivity_status: InactivityStatus,
}

/// A charging transaction row.
///
/// The `stop` record and the `current_*` fields are mutually exclusive: a
/// finalized session carries `stop`, an in-progress one carries the live
/// counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction identifier.
    pub id: String,
    /// Live seconds without energy delivery.
    #[serde(default)]
    pub current_total_inactivity_secs: u64,
    /// Live session duration in seconds.
    #[serde(default)]
    pub current_total_duration_secs: u64,
    /// Live inactivity severity.
    #[serde(default)]
    pub current_inactivity_status: InactivityStatus,
    /// Final measures, present once the session completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<TransactionStop>,
}
