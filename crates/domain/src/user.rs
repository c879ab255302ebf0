//! User domain types and field validation rules.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use voltdesk_core::{AppError, AppResult};

use crate::{Address, Tag, UserNotifications};

/// Unique identifier for a user record.
///
/// Assigned by the central server on creation; a user that has never been
/// saved has no identifier. Opaque to this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a user identifier from a server-assigned value.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::validation("id", "identifier must not be empty"));
        }

        Ok(Self(value))
    }

    /// Returns the underlying identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Cross-tenant operator.
    #[serde(rename = "S")]
    SuperAdmin,
    /// Tenant administrator.
    #[serde(rename = "A")]
    Admin,
    /// Regular account.
    #[serde(rename = "B")]
    Basic,
    /// Read-only demonstration account.
    #[serde(rename = "D")]
    Demo,
}

impl UserRole {
    /// Returns the wire letter for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "S",
            Self::Admin => "A",
            Self::Basic => "B",
            Self::Demo => "D",
        }
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "S" => Ok(Self::SuperAdmin),
            "A" => Ok(Self::Admin),
            "B" => Ok(Self::Basic),
            "D" => Ok(Self::Demo),
            _ => Err(AppError::validation(
                "role",
                format!("unknown user role '{value}'"),
            )),
        }
    }
}

/// Lifecycle status of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    /// Account can log in and charge.
    #[serde(rename = "A")]
    Active,
    /// Account was blocked by an administrator.
    #[serde(rename = "B")]
    Blocked,
    /// Account was deactivated.
    #[serde(rename = "I")]
    Inactive,
    /// Account is locked after failed logins.
    #[serde(rename = "L")]
    Locked,
    /// Account awaits email confirmation.
    #[serde(rename = "P")]
    Pending,
}

impl UserStatus {
    /// Returns the wire letter for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "A",
            Self::Blocked => "B",
            Self::Inactive => "I",
            Self::Locked => "L",
            Self::Pending => "P",
        }
    }
}

impl FromStr for UserStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "A" => Ok(Self::Active),
            "B" => Ok(Self::Blocked),
            "I" => Ok(Self::Inactive),
            "L" => Ok(Self::Locked),
            "P" => Ok(Self::Pending),
            _ => Err(AppError::validation(
                "status",
                format!("unknown user status '{value}'"),
            )),
        }
    }
}

/// Returns the roles an operator with the given role may assign.
///
/// Super admins manage other super admins; tenant admins manage everything
/// below them; everyone else can only produce basic accounts.
#[must_use]
pub fn available_roles(acting: UserRole) -> &'static [UserRole] {
    match acting {
        UserRole::SuperAdmin => &[UserRole::SuperAdmin],
        UserRole::Admin => &[UserRole::Admin, UserRole::Basic, UserRole::Demo],
        UserRole::Basic | UserRole::Demo => &[UserRole::Basic],
    }
}

/// The user record exchanged with the central server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned identifier, absent until the record is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// Whether this tenant issued the record (false for roaming users).
    #[serde(default = "default_issuer")]
    pub issuer: bool,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Landline phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Mobile phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    /// Internal company number.
    #[serde(rename = "iNumber", skip_serializing_if = "Option::is_none")]
    pub i_number: Option<String>,
    /// Accounting cost center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    /// Vehicle plate identifier.
    #[serde(rename = "plateID", skip_serializing_if = "Option::is_none")]
    pub plate_id: Option<String>,
    /// Account status.
    pub status: UserStatus,
    /// Account role.
    pub role: UserRole,
    /// Preferred locale, e.g. `en_US`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// RFID badges assigned to the user.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Profile picture as a data URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Master switch for notifications; absent on legacy records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_active: Option<bool>,
    /// Per-event notification record; keys may be individually absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<UserNotifications>,
    /// New plaintext password, only present on writes that change it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

fn default_issuer() -> bool {
    true
}

/// The authenticated operator working in the back office.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorIdentity {
    subject: String,
    role: UserRole,
    site_admin: bool,
}

impl ActorIdentity {
    /// Creates an identity from session data.
    #[must_use]
    pub fn new(subject: impl Into<String>, role: UserRole, site_admin: bool) -> Self {
        Self {
            subject: subject.into(),
            role,
            site_admin,
        }
    }

    /// Returns the stable subject identifier of the operator.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the operator's role.
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Returns whether the operator is a tenant administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::SuperAdmin)
    }

    /// Returns whether the operator is a cross-tenant super admin.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role == UserRole::SuperAdmin
    }

    /// Returns whether the operator holds a basic account.
    #[must_use]
    pub fn is_basic(&self) -> bool {
        self.role == UserRole::Basic
    }

    /// Returns whether the operator administrates at least one site.
    #[must_use]
    pub fn has_sites_admin_rights(&self) -> bool {
        self.site_admin
    }
}

/// Validates an email address structurally: exactly one `@`, non-empty local
/// part, and a domain with at least one dot.
pub fn validate_email(value: &str) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("email", "email must not be empty"));
    }

    let parts: Vec<&str> = trimmed.splitn(2, '@').collect();
    if parts.len() != 2 || parts[1].contains('@') {
        return Err(AppError::validation(
            "email",
            "email must contain exactly one '@'",
        ));
    }

    if parts[0].is_empty() {
        return Err(AppError::validation(
            "email",
            "email local part must not be empty",
        ));
    }

    if parts[1].is_empty() || !parts[1].contains('.') {
        return Err(AppError::validation(
            "email",
            "email domain must contain at least one '.'",
        ));
    }

    Ok(())
}

/// Validates a phone number: optional leading `+`, 10 to 15 digits, single
/// spaces allowed between digit groups.
pub fn validate_phone(field: &'static str, value: &str) -> AppResult<()> {
    let digits_part = value.strip_prefix('+').unwrap_or(value);
    if digits_part.ends_with(' ') || digits_part.starts_with(' ') || digits_part.contains("  ") {
        return Err(AppError::validation(field, "phone number is malformed"));
    }

    let mut digit_count = 0usize;
    for character in digits_part.chars() {
        match character {
            '0'..='9' => digit_count += 1,
            ' ' => {}
            _ => {
                return Err(AppError::validation(
                    field,
                    format!("phone number contains invalid character '{character}'"),
                ));
            }
        }
    }

    if !(10..=15).contains(&digit_count) {
        return Err(AppError::validation(
            field,
            "phone number must contain 10 to 15 digits",
        ));
    }

    Ok(())
}

/// Validates a vehicle plate identifier: uppercase letters, digits and `-`.
pub fn validate_plate_id(value: &str) -> AppResult<()> {
    let valid = value
        .chars()
        .all(|character| character.is_ascii_uppercase() || character.is_ascii_digit() || character == '-');
    if !valid {
        return Err(AppError::validation(
            "plateID",
            "plate identifier accepts only uppercase letters, digits and '-'",
        ));
    }

    Ok(())
}

/// Validates a cost center: digits only.
pub fn validate_cost_center(value: &str) -> AppResult<()> {
    if !value.chars().all(|character| character.is_ascii_digit()) {
        return Err(AppError::validation(
            "costCenter",
            "cost center accepts only digits",
        ));
    }

    Ok(())
}

/// Minimum password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Validates a plaintext password: at least [`PASSWORD_MIN_LENGTH`]
/// characters, one uppercase, one lowercase, one digit, one special
/// character, no whitespace.
pub fn validate_password(value: &str) -> AppResult<()> {
    if value.chars().any(char::is_whitespace) {
        return Err(AppError::validation(
            "password",
            "password must not contain spaces",
        ));
    }

    if value.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(AppError::validation(
            "password",
            format!("password must be at least {PASSWORD_MIN_LENGTH} characters"),
        ));
    }

    let has_upper = value.chars().any(|character| character.is_ascii_uppercase());
    let has_lower = value.chars().any(|character| character.is_ascii_lowercase());
    let has_digit = value.chars().any(|character| character.is_ascii_digit());
    let has_special = value
        .chars()
        .any(|character| !character.is_ascii_alphanumeric());

    if !(has_upper && has_lower && has_digit && has_special) {
        return Err(AppError::validation(
            "password",
            "password needs an uppercase letter, a lowercase letter, a digit and a special character",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_user_id_is_rejected() {
        assert!(UserId::new("  ").is_err());
    }

    #[test]
    fn role_letters_round_trip() {
        for role in [
            UserRole::SuperAdmin,
            UserRole::Admin,
            UserRole::Basic,
            UserRole::Demo,
        ] {
            assert_eq!(role.as_str().parse::<UserRole>().ok(), Some(role));
        }
    }

    #[test]
    fn unknown_status_letter_is_rejected() {
        assert!("X".parse::<UserStatus>().is_err());
    }

    #[test]
    fn admin_can_assign_demo_but_not_super_admin() {
        let roles = available_roles(UserRole::Admin);
        assert!(roles.contains(&UserRole::Demo));
        assert!(!roles.contains(&UserRole::SuperAdmin));
    }

    #[test]
    fn valid_email_is_accepted() {
        assert!(validate_email("operator@example.com").is_ok());
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(validate_email("operator@nodot").is_err());
    }

    #[test]
    fn email_with_two_at_signs_is_rejected() {
        assert!(validate_email("a@b@example.com").is_err());
    }

    #[test]
    fn international_phone_is_accepted() {
        assert!(validate_phone("phone", "+33 6 12 34 56 78").is_ok());
    }

    #[test]
    fn short_phone_is_rejected() {
        assert!(validate_phone("phone", "12345").is_err());
    }

    #[test]
    fn phone_with_letters_is_rejected() {
        assert!(validate_phone("mobile", "06 CALL ME NOW").is_err());
    }

    #[test]
    fn plate_id_accepts_uppercase_and_dashes() {
        assert!(validate_plate_id("AB-123-CD").is_ok());
    }

    #[test]
    fn plate_id_rejects_lowercase() {
        assert!(validate_plate_id("ab-123").is_err());
    }

    #[test]
    fn cost_center_rejects_letters() {
        assert!(validate_cost_center("12A4").is_err());
        assert!(validate_cost_center("001234").is_ok());
    }

    #[test]
    fn weak_passwords_are_rejected() {
        assert!(validate_password("Short1!").is_err());
        assert!(validate_password("alllowercase1!").is_err());
        assert!(validate_password("NoDigits!!").is_err());
        assert!(validate_password("With Space1!").is_err());
    }

    #[test]
    fn strong_password_is_accepted() {
        assert!(validate_password("Str0ng&Secret").is_ok());
    }
}
