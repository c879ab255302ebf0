//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod address;
mod connection;
mod notifications;
mod settings;
mod tag;
mod transaction;
mod user;

pub use address::Address;
pub use connection::{CONCUR_CONNECTOR_ID, IntegrationConnection};
pub use notifications::{
    NotificationFlags, RoleNotificationBundle, UserNotifications, role_notification_bundle,
};
pub use settings::{
    ConcurRefundSetting, PricingSettingContent, PricingSettings, PricingSettingsType,
    RefundSettingContent, RefundSettings, TenantComponent,
};
pub use tag::Tag;
pub use transaction::{InactivityStatus, Transaction, TransactionStop};
pub use user::{
    ActorIdentity, PASSWORD_MIN_LENGTH, User, UserId, UserRole, UserStatus, available_roles,
    validate_cost_center, validate_email, validate_password, validate_phone, validate_plate_id,
};
