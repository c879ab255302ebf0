//! Per-user notification preferences and the role policy table.

use serde::{Deserialize, Serialize};

use crate::UserRole;

/// Notification record as exchanged with the central server.
///
/// Every key is optional on the wire: legacy records predate some events and
/// simply omit them. Resolution to concrete booleans happens per flag in
/// [`NotificationFlags::from_wire`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNotifications {
    /// Charging session started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_session_started: Option<bool>,
    /// Optimal charge level reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_optimal_charge_reached: Option<bool>,
    /// Charge finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_end_of_charge: Option<bool>,
    /// Session closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_end_of_session: Option<bool>,
    /// Account status changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_user_account_status_changed: Option<bool>,
    /// Vehicle plugged but session never started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_session_not_started: Option<bool>,
    /// Account unused for a long period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_user_account_inactivity: Option<bool>,
    /// Car catalog synchronization failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_car_catalog_synchronization_failed: Option<bool>,
    /// Unknown badge presented at a station.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_unknown_user_badged: Option<bool>,
    /// Charging station reported a faulted connector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_charging_station_status_error: Option<bool>,
    /// New charging station registered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_charging_station_registered: Option<bool>,
    /// Charging stations lost their backend connection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_offline_charging_stations: Option<bool>,
    /// Roaming status patch failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_ocpi_patch_status_error: Option<bool>,
    /// Vehicle connected but session not started in time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_preparing_session_not_started: Option<bool>,
    /// Mail relay authentication failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_smtp_auth_error: Option<bool>,
    /// Billing user synchronization failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_billing_user_synchronization_failed: Option<bool>,
}

/// Fully-resolved notification flag set, one boolean per notifiable event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationFlags {
    /// Charging session started.
    pub session_started: bool,
    /// Optimal charge level reached.
    pub optimal_charge_reached: bool,
    /// Charge finished.
    pub end_of_charge: bool,
    /// Session closed.
    pub end_of_session: bool,
    /// Account status changed.
    pub user_account_status_changed: bool,
    /// Vehicle plugged but session never started.
    pub session_not_started: bool,
    /// Account unused for a long period.
    pub user_account_inactivity: bool,
    /// Car catalog synchronization failed.
    pub car_catalog_synchronization_failed: bool,
    /// Unknown badge presented at a station.
    pub unknown_user_badged: bool,
    /// Charging station reported a faulted connector.
    pub charging_station_status_error: bool,
    /// New charging station registered.
    pub charging_station_registered: bool,
    /// Charging stations lost their backend connection.
    pub offline_charging_stations: bool,
    /// Roaming status patch failed.
    pub ocpi_patch_status_error: bool,
    /// Vehicle connected but session not started in time.
    pub preparing_session_not_started: bool,
    /// Mail relay authentication failed.
    pub smtp_auth_error: bool,
    /// Billing user synchronization failed.
    pub billing_user_synchronization_failed: bool,
}

impl NotificationFlags {
    /// Resolves a wire record into concrete flags.
    ///
    /// Each flag resolves independently: the entity's value when the key is
    /// present, `false` otherwise — including when the whole record is
    /// missing.
    #[must_use]
    pub fn from_wire(wire: Option<&UserNotifications>) -> Self {
        let flag = |select: fn(&UserNotifications) -> Option<bool>| {
            wire.and_then(select).unwrap_or(false)
        };

        Self {
            session_started: flag(|wire| wire.send_session_started),
            optimal_charge_reached: flag(|wire| wire.send_optimal_charge_reached),
            end_of_charge: flag(|wire| wire.send_end_of_charge),
            end_of_session: flag(|wire| wire.send_end_of_session),
            user_account_status_changed: flag(|wire| wire.send_user_account_status_changed),
            session_not_started: flag(|wire| wire.send_session_not_started),
            user_account_inactivity: flag(|wire| wire.send_user_account_inactivity),
            car_catalog_synchronization_failed: flag(|wire| {
                wire.send_car_catalog_synchronization_failed
            }),
            unknown_user_badged: flag(|wire| wire.send_unknown_user_badged),
            charging_station_status_error: flag(|wire| wire.send_charging_station_status_error),
            charging_station_registered: flag(|wire| wire.send_charging_station_registered),
            offline_charging_stations: flag(|wire| wire.send_offline_charging_stations),
            ocpi_patch_status_error: flag(|wire| wire.send_ocpi_patch_status_error),
            preparing_session_not_started: flag(|wire| wire.send_preparing_session_not_started),
            smtp_auth_error: flag(|wire| wire.send_smtp_auth_error),
            billing_user_synchronization_failed: flag(|wire| {
                wire.send_billing_user_synchronization_failed
            }),
        }
    }

    /// Converts the resolved flags back into a wire record with every key
    /// present.
    #[must_use]
    pub fn to_wire(&self) -> UserNotifications {
        UserNotifications {
            send_session_started: Some(self.session_started),
            send_optimal_charge_reached: Some(self.optimal_charge_reached),
            send_end_of_charge: Some(self.end_of_charge),
            send_end_of_session: Some(self.end_of_session),
            send_user_account_status_changed: Some(self.user_account_status_changed),
            send_session_not_started: Some(self.session_not_started),
            send_user_account_inactivity: Some(self.user_account_inactivity),
            send_car_catalog_synchronization_failed: Some(
                self.car_catalog_synchronization_failed,
            ),
            send_unknown_user_badged: Some(self.unknown_user_badged),
            send_charging_station_status_error: Some(self.charging_station_status_error),
            send_charging_station_registered: Some(self.charging_station_registered),
            send_offline_charging_stations: Some(self.offline_charging_stations),
            send_ocpi_patch_status_error: Some(self.ocpi_patch_status_error),
            send_preparing_session_not_started: Some(self.preparing_session_not_started),
            send_smtp_auth_error: Some(self.smtp_auth_error),
            send_billing_user_synchronization_failed: Some(
                self.billing_user_synchronization_failed,
            ),
        }
    }

    /// Default flag set for a freshly opened form: user-facing events on,
    /// administrative events off.
    #[must_use]
    pub fn form_defaults() -> Self {
        Self {
            session_started: true,
            optimal_charge_reached: true,
            end_of_charge: true,
            end_of_session: true,
            user_account_status_changed: true,
            session_not_started: true,
            user_account_inactivity: true,
            car_catalog_synchronization_failed: true,
            ..Self::default()
        }
    }

    /// Flag set with every event enabled.
    #[must_use]
    pub fn all_on() -> Self {
        Self {
            session_started: true,
            optimal_charge_reached: true,
            end_of_charge: true,
            end_of_session: true,
            user_account_status_changed: true,
            session_not_started: true,
            user_account_inactivity: true,
            car_catalog_synchronization_failed: true,
            unknown_user_badged: true,
            charging_station_status_error: true,
            charging_station_registered: true,
            offline_charging_stations: true,
            ocpi_patch_status_error: true,
            preparing_session_not_started: true,
            smtp_auth_error: true,
            billing_user_synchronization_failed: true,
        }
    }

    /// Flag set with every event disabled.
    #[must_use]
    pub fn all_off() -> Self {
        Self::default()
    }
}

/// Notification bundle attached to a role by policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleNotificationBundle {
    /// Master notification switch.
    pub notifications_active: bool,
    /// The full flag set for the role.
    pub flags: NotificationFlags,
}

/// Returns the static notification bundle for a role.
///
/// Selecting a role replaces the entire flag set with this bundle, never a
/// partial merge. The table is not user-editable.
#[must_use]
pub fn role_notification_bundle(role: UserRole) -> RoleNotificationBundle {
    match role {
        UserRole::Admin => RoleNotificationBundle {
            notifications_active: true,
            flags: NotificationFlags::all_on(),
        },
        UserRole::Basic | UserRole::SuperAdmin => RoleNotificationBundle {
            notifications_active: true,
            flags: NotificationFlags::form_defaults(),
        },
        UserRole::Demo => RoleNotificationBundle {
            notifications_active: false,
            flags: NotificationFlags::all_off(),
        },
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn missing_record_resolves_every_flag_to_false() {
        let flags = NotificationFlags::from_wire(None);
        assert_eq!(flags, NotificationFlags::all_off());
    }

    #[test]
    fn absent_keys_resolve_to_false_independently() {
        let wire = UserNotifications {
            send_end_of_charge: Some(true),
            send_smtp_auth_error: Some(true),
            ..UserNotifications::default()
        };

        let flags = NotificationFlags::from_wire(Some(&wire));
        assert!(flags.end_of_charge);
        assert!(flags.smtp_auth_error);
        assert!(!flags.session_started);
        assert!(!flags.unknown_user_badged);
    }

    #[test]
    fn wire_round_trip_makes_every_key_present() {
        let wire = NotificationFlags::form_defaults().to_wire();
        assert_eq!(wire.send_session_started, Some(true));
        assert_eq!(wire.send_smtp_auth_error, Some(false));
        assert_eq!(
            NotificationFlags::from_wire(Some(&wire)),
            NotificationFlags::form_defaults()
        );
    }

    #[test]
    fn demo_bundle_disables_everything() {
        let bundle = role_notification_bundle(UserRole::Demo);
        assert!(!bundle.notifications_active);
        assert_eq!(bundle.flags, NotificationFlags::all_off());
    }

    #[test]
    fn admin_bundle_includes_administrative_events() {
        let bundle = role_notification_bundle(UserRole::Admin);
        assert!(bundle.flags.unknown_user_badged);
        assert!(bundle.flags.billing_user_synchronization_failed);
    }

    #[test]
    fn basic_bundle_excludes_administrative_events() {
        let bundle = role_notification_bundle(UserRole::Basic);
        assert!(bundle.flags.session_started);
        assert!(!bundle.flags.unknown_user_badged);
        assert!(!bundle.flags.smtp_auth_error);
    }

    proptest! {
        #[test]
        fn role_bundle_is_idempotent(index in 0usize..4) {
            let role = [
                UserRole::SuperAdmin,
                UserRole::Admin,
                UserRole::Basic,
                UserRole::Demo,
            ][index];
            prop_assert_eq!(
                role_notification_bundle(role),
                role_notification_bundle(role)
            );
        }
    }
}
