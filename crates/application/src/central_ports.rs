//! Ports to the central server.
//!
//! The transport implementation maps wire-level status codes to the typed
//! error kinds in `voltdesk-core`; callers here never see numeric codes.

use async_trait::async_trait;

use voltdesk_core::AppResult;
use voltdesk_domain::{
    IntegrationConnection, PricingSettings, RefundSettings, TenantComponent, User, UserId,
};

/// Status value the central server returns for accepted writes.
pub const REST_RESPONSE_SUCCESS: &str = "Success";

/// Outcome envelope of a write call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Wire status, [`REST_RESPONSE_SUCCESS`] when accepted.
    pub status: String,
    /// Identifier assigned by the server, present on create responses.
    pub id: Option<String>,
}

impl ActionResponse {
    /// Returns a success response carrying an assigned identifier.
    #[must_use]
    pub fn success_with_id(id: impl Into<String>) -> Self {
        Self {
            status: REST_RESPONSE_SUCCESS.to_owned(),
            id: Some(id.into()),
        }
    }

    /// Returns a success response without an identifier.
    #[must_use]
    pub fn success() -> Self {
        Self {
            status: REST_RESPONSE_SUCCESS.to_owned(),
            id: None,
        }
    }

    /// Returns whether the server accepted the write.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == REST_RESPONSE_SUCCESS
    }
}

/// Image payload attached to a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserImage {
    /// Owning user identifier.
    pub id: String,
    /// Image as a data URL, absent when the user has no picture.
    pub image: Option<String>,
}

/// Event on the change-notification stream.
///
/// The stream itself is owned externally; this layer only consumes events
/// delivered on a channel for the lifetime of the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotification {
    /// Identifier of the record that changed.
    pub subject_id: String,
}

/// Remote user record operations.
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Fetches a user by identifier.
    ///
    /// Fails with `NotFound` when the server does not know the record,
    /// `Unexpected` otherwise.
    async fn fetch_user(&self, user_id: &UserId) -> AppResult<User>;

    /// Fetches the profile picture of a user, if one is stored.
    async fn fetch_user_image(&self, user_id: &UserId) -> AppResult<Option<UserImage>>;

    /// Creates a user record. The response carries the assigned identifier.
    ///
    /// Fails with `DuplicateEmail`, `DuplicateTagId` or `Unexpected`.
    async fn create_user(&self, user: &User) -> AppResult<ActionResponse>;

    /// Updates an existing user record.
    ///
    /// Fails with `DuplicateEmail`, `DuplicateTagId`, `EntityGone` or
    /// `Unexpected`.
    async fn update_user(&self, user: &User) -> AppResult<ActionResponse>;
}

/// Remote transaction attribution operations.
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    /// Counts sessions not yet attributed to the user's badges.
    async fn count_unassigned(&self, user_id: &UserId) -> AppResult<u64>;

    /// Attributes the unassigned sessions to the user. Single-shot.
    async fn assign_transactions(&self, user_id: &UserId) -> AppResult<ActionResponse>;
}

/// Remote integration connection operations.
#[async_trait]
pub trait ConnectionGateway: Send + Sync {
    /// Lists the third-party connections of a user.
    async fn fetch_connections(&self, user_id: &UserId)
    -> AppResult<Vec<IntegrationConnection>>;

    /// Revokes a connection by identifier.
    async fn delete_connection(&self, connection_id: &str) -> AppResult<ActionResponse>;
}

/// Remote tenant settings operations.
#[async_trait]
pub trait SettingsGateway: Send + Sync {
    /// Fetches the refund settings record, if the tenant has one.
    async fn fetch_refund_settings(&self) -> AppResult<Option<RefundSettings>>;

    /// Fetches the pricing settings record, if the tenant has one.
    async fn fetch_pricing_settings(&self) -> AppResult<Option<PricingSettings>>;
}

/// Tenant capability gate.
///
/// Capability activation is known at session start, so the gate is
/// synchronous.
pub trait CapabilityGate: Send + Sync {
    /// Returns whether the tenant enabled the capability.
    fn is_active(&self, component: TenantComponent) -> bool;
}
