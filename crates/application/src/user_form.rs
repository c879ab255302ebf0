//! Editable form model mirroring a user record.
//!
//! The form is created together with the editing surface, populated from a
//! loaded record by [`UserFormModel::bind_from_entity`], mutated by operator
//! input, and collected back into a record by
//! [`UserFormModel::collect_to_entity`]. A dirty flag tracks whether the
//! operator changed anything since the last load; the host's navigation
//! guard reads it to decide whether leaving needs a warning.

use voltdesk_core::{AppError, AppResult};
use voltdesk_domain::{
    ActorIdentity, Address, NotificationFlags, Tag, User, UserId, UserRole, UserStatus,
    role_notification_bundle, validate_cost_center, validate_email, validate_password,
    validate_phone, validate_plate_id,
};

/// Placeholder shown while a user has no profile picture.
pub const USER_NO_PICTURE: &str = "assets/img/theme/no-photo.png";

/// Form state for the user editing surface.
#[derive(Debug, Clone)]
pub struct UserFormModel {
    id: Option<UserId>,
    issuer: bool,
    name: String,
    first_name: String,
    email: String,
    original_email: Option<String>,
    phone: String,
    mobile: String,
    i_number: String,
    plate_id: String,
    cost_center: String,
    status: UserStatus,
    role: UserRole,
    locale: String,
    password: String,
    repeat_password: String,
    notifications_active: bool,
    notifications: NotificationFlags,
    tags: Vec<Tag>,
    address: Option<Address>,
    image: String,
    tags_required: bool,
    dirty: bool,
}

impl UserFormModel {
    /// Creates a fresh form with the defaults for a new user.
    ///
    /// The default role depends on who is editing: super admins create super
    /// admins, everyone else creates basic accounts. Badge requiredness is
    /// waived for super-admin and basic operators. A default badge row is
    /// seeded so a new user can charge right away.
    #[must_use]
    pub fn new(acting: &ActorIdentity, current_locale: impl Into<String>) -> Self {
        Self {
            id: None,
            issuer: true,
            name: String::new(),
            first_name: String::new(),
            email: String::new(),
            original_email: None,
            phone: String::new(),
            mobile: String::new(),
            i_number: String::new(),
            plate_id: String::new(),
            cost_center: String::new(),
            status: UserStatus::Active,
            role: if acting.is_super_admin() {
                UserRole::SuperAdmin
            } else {
                UserRole::Basic
            },
            locale: current_locale.into(),
            password: String::new(),
            repeat_password: String::new(),
            notifications_active: true,
            notifications: NotificationFlags::form_defaults(),
            tags: vec![Tag::default_badge()],
            address: None,
            image: USER_NO_PICTURE.to_owned(),
            tags_required: !(acting.is_super_admin() || acting.is_basic()),
            dirty: false,
        }
    }

    /// Populates the form from a loaded record.
    ///
    /// Scalar fields present and non-empty on the record overwrite the form
    /// value; absent or empty ones keep their current default. Notification
    /// flags resolve per flag, absent keys to `false`. Password fields are
    /// cleared and the form becomes pristine.
    pub fn bind_from_entity(&mut self, user: &User) {
        if let Some(id) = &user.id {
            self.id = Some(id.clone());
        }
        self.issuer = user.issuer;
        if let Some(name) = non_empty(&user.name) {
            self.name = name.to_uppercase();
        }
        if let Some(first_name) = non_empty(&user.first_name) {
            self.first_name = first_name.to_owned();
        }
        if let Some(email) = non_empty(&user.email) {
            self.email = email.to_owned();
            self.original_email = Some(email.to_owned());
        }
        if let Some(phone) = non_empty(&user.phone) {
            self.phone = phone.to_owned();
        }
        if let Some(mobile) = non_empty(&user.mobile) {
            self.mobile = mobile.to_owned();
        }
        if let Some(i_number) = non_empty(&user.i_number) {
            self.i_number = i_number.to_owned();
        }
        if let Some(cost_center) = non_empty(&user.cost_center) {
            self.cost_center = cost_center.to_owned();
        }
        if let Some(plate_id) = non_empty(&user.plate_id) {
            self.plate_id = plate_id.to_owned();
        }
        self.status = user.status;
        self.role = user.role;
        if let Some(locale) = non_empty(&user.locale) {
            self.locale = locale.to_owned();
        }
        if !user.tags.is_empty() {
            self.tags = user.tags.clone();
        }
        if let Some(notifications_active) = user.notifications_active {
            self.notifications_active = notifications_active;
        }
        self.notifications = NotificationFlags::from_wire(user.notifications.as_ref());
        if let Some(address) = &user.address {
            self.address = Some(address.clone());
        }
        self.password.clear();
        self.repeat_password.clear();
        self.dirty = false;
    }

    /// Replaces the whole notification bundle with the role's policy set.
    pub fn apply_role_policy(&mut self, role: UserRole) {
        let bundle = role_notification_bundle(role);
        self.role = role;
        self.notifications_active = bundle.notifications_active;
        self.notifications = bundle.flags;
        self.dirty = true;
    }

    /// Validates the form and reconstructs the user record, re-attaching the
    /// image side channel and the badge list.
    pub fn collect_to_entity(&self) -> AppResult<User> {
        self.validate()?;

        Ok(User {
            id: self.id.clone(),
            issuer: self.issuer,
            name: owned_non_empty(&self.name),
            first_name: owned_non_empty(&self.first_name),
            email: owned_non_empty(&self.email),
            phone: owned_non_empty(&self.phone),
            mobile: owned_non_empty(&self.mobile),
            i_number: owned_non_empty(&self.i_number),
            cost_center: owned_non_empty(&self.cost_center),
            plate_id: owned_non_empty(&self.plate_id),
            status: self.status,
            role: self.role,
            locale: owned_non_empty(&self.locale),
            address: self.address.clone(),
            tags: self.tags.clone(),
            image: self.entity_image(),
            notifications_active: Some(self.notifications_active),
            notifications: Some(self.notifications.to_wire()),
            password: owned_non_empty(&self.password),
        })
    }

    /// Validates every field rule; the first violation names its field.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("name", "last name is required"));
        }
        if self.first_name.trim().is_empty() {
            return Err(AppError::validation("firstName", "first name is required"));
        }
        if self.email.trim().is_empty() {
            return Err(AppError::validation("email", "email is required"));
        }
        validate_email(&self.email)?;
        if self.locale.trim().is_empty() {
            return Err(AppError::validation("locale", "locale is required"));
        }
        if !self.phone.is_empty() {
            validate_phone("phone", &self.phone)?;
        }
        if !self.mobile.is_empty() {
            validate_phone("mobile", &self.mobile)?;
        }
        if !self.plate_id.is_empty() {
            validate_plate_id(&self.plate_id)?;
        }
        if !self.cost_center.is_empty() {
            validate_cost_center(&self.cost_center)?;
        }
        if self.tags_required && self.tags.is_empty() {
            return Err(AppError::validation("tags", "at least one badge is required"));
        }
        if !self.password.is_empty() || !self.repeat_password.is_empty() {
            if self.password != self.repeat_password {
                return Err(AppError::Mismatch {
                    first: "password",
                    second: "repeatPassword",
                });
            }
            validate_password(&self.password)?;
        }

        Ok(())
    }

    /// Attaches a new profile picture, enforcing the configured size limit.
    pub fn set_image(&mut self, data_url: impl Into<String>, max_kb: u64) -> AppResult<()> {
        let data_url = data_url.into();
        if data_url.len() as u64 > max_kb.saturating_mul(1024) {
            return Err(AppError::validation(
                "image",
                format!("picture exceeds the maximum of {max_kb} kB"),
            ));
        }

        self.image = data_url;
        self.dirty = true;
        Ok(())
    }

    /// Drops the profile picture, reverting to the placeholder.
    pub fn clear_image(&mut self) {
        self.image = USER_NO_PICTURE.to_owned();
        self.dirty = true;
    }

    // Loader-side image replacement, no dirty tracking.
    pub(crate) fn set_loaded_image(&mut self, value: String) {
        self.image = value;
    }

    fn entity_image(&self) -> Option<String> {
        (!self.image.is_empty() && self.image != USER_NO_PICTURE).then(|| self.image.clone())
    }

    /// Marks the form as unchanged.
    pub fn mark_pristine(&mut self) {
        self.dirty = false;
    }

    /// Returns whether the operator changed anything since the last load.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the tracked record identifier, if bound to an existing user.
    #[must_use]
    pub fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    /// Returns the last name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the email field.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the email the record was loaded with.
    #[must_use]
    pub fn original_email(&self) -> Option<&str> {
        self.original_email.as_deref()
    }

    /// Returns the status field.
    #[must_use]
    pub fn status(&self) -> UserStatus {
        self.status
    }

    /// Returns the role field.
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the locale field.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns the master notification switch.
    #[must_use]
    pub fn notifications_active(&self) -> bool {
        self.notifications_active
    }

    /// Returns the resolved notification flags.
    #[must_use]
    pub fn notifications(&self) -> &NotificationFlags {
        &self.notifications
    }

    /// Returns the badge rows.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the postal address, if one is set.
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Returns the current image value (data URL or placeholder).
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Sets the last name.
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.dirty = true;
    }

    /// Sets the first name.
    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.first_name = value.into();
        self.dirty = true;
    }

    /// Sets the email field.
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.dirty = true;
    }

    /// Sets the landline phone field.
    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.phone = value.into();
        self.dirty = true;
    }

    /// Sets the mobile phone field.
    pub fn set_mobile(&mut self, value: impl Into<String>) {
        self.mobile = value.into();
        self.dirty = true;
    }

    /// Sets the internal company number.
    pub fn set_i_number(&mut self, value: impl Into<String>) {
        self.i_number = value.into();
        self.dirty = true;
    }

    /// Sets the plate identifier.
    pub fn set_plate_id(&mut self, value: impl Into<String>) {
        self.plate_id = value.into();
        self.dirty = true;
    }

    /// Sets the cost center.
    pub fn set_cost_center(&mut self, value: impl Into<String>) {
        self.cost_center = value.into();
        self.dirty = true;
    }

    /// Sets the account status.
    pub fn set_status(&mut self, value: UserStatus) {
        self.status = value;
        self.dirty = true;
    }

    /// Sets the locale.
    pub fn set_locale(&mut self, value: impl Into<String>) {
        self.locale = value.into();
        self.dirty = true;
    }

    /// Sets the password field.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.dirty = true;
    }

    /// Sets the password confirmation field.
    pub fn set_repeat_password(&mut self, value: impl Into<String>) {
        self.repeat_password = value.into();
        self.dirty = true;
    }

    /// Sets the master notification switch.
    pub fn set_notifications_active(&mut self, value: bool) {
        self.notifications_active = value;
        self.dirty = true;
    }

    /// Replaces the notification flags.
    pub fn set_notification_flags(&mut self, value: NotificationFlags) {
        self.notifications = value;
        self.dirty = true;
    }

    /// Replaces the badge rows.
    pub fn set_tags(&mut self, value: Vec<Tag>) {
        self.tags = value;
        self.dirty = true;
    }

    /// Replaces the postal address.
    pub fn set_address(&mut self, value: Option<Address>) {
        self.address = value;
        self.dirty = true;
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn owned_non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use voltdesk_domain::UserNotifications;

    use super::*;

    fn admin_actor() -> ActorIdentity {
        ActorIdentity::new("op-1", UserRole::Admin, false)
    }

    fn loaded_user() -> User {
        User {
            id: UserId::new("U1").ok(),
            issuer: true,
            name: Some("DOE".to_owned()),
            first_name: Some("Jane".to_owned()),
            email: Some("jane.doe@example.com".to_owned()),
            phone: Some("+33 1 23 45 67 89".to_owned()),
            mobile: None,
            i_number: Some("I-42".to_owned()),
            cost_center: Some("1234".to_owned()),
            plate_id: Some("AB-123-CD".to_owned()),
            status: UserStatus::Active,
            role: UserRole::Basic,
            locale: Some("fr_FR".to_owned()),
            address: None,
            tags: vec![Tag {
                id: "TAG1".to_owned(),
                description: Some("main badge".to_owned()),
                active: true,
            }],
            image: None,
            notifications_active: Some(true),
            notifications: Some(UserNotifications {
                send_session_started: Some(true),
                ..UserNotifications::default()
            }),
            password: None,
        }
    }

    #[test]
    fn fresh_form_defaults_depend_on_acting_role() {
        let super_admin = ActorIdentity::new("op-0", UserRole::SuperAdmin, false);
        let form = UserFormModel::new(&super_admin, "en_US");
        assert_eq!(form.role(), UserRole::SuperAdmin);

        let form = UserFormModel::new(&admin_actor(), "en_US");
        assert_eq!(form.role(), UserRole::Basic);
        assert_eq!(form.status(), UserStatus::Active);
        assert_eq!(form.tags().len(), 1);
        assert!(!form.is_dirty());
    }

    #[test]
    fn binding_sets_present_fields_and_keeps_defaults_for_absent_ones() {
        let mut form = UserFormModel::new(&admin_actor(), "en_US");
        form.bind_from_entity(&loaded_user());

        assert_eq!(form.name(), "DOE");
        assert_eq!(form.first_name(), "Jane");
        assert_eq!(form.original_email(), Some("jane.doe@example.com"));
        assert_eq!(form.locale(), "fr_FR");
        // mobile was absent on the record: the default survives
        assert!(form.collect_to_entity().is_ok_and(|user| user.mobile.is_none()));
    }

    #[test]
    fn binding_uppercases_the_last_name() {
        let mut user = loaded_user();
        user.name = Some("doe".to_owned());
        let mut form = UserFormModel::new(&admin_actor(), "en_US");
        form.bind_from_entity(&user);
        assert_eq!(form.name(), "DOE");
    }

    #[test]
    fn binding_resolves_absent_notification_keys_to_false_per_flag() {
        let mut form = UserFormModel::new(&admin_actor(), "en_US");
        form.bind_from_entity(&loaded_user());

        assert!(form.notifications().session_started);
        assert!(!form.notifications().end_of_charge);
        assert!(!form.notifications().unknown_user_badged);
    }

    #[test]
    fn binding_without_notification_record_clears_every_flag() {
        let mut user = loaded_user();
        user.notifications = None;
        let mut form = UserFormModel::new(&admin_actor(), "en_US");
        form.bind_from_entity(&user);

        assert_eq!(*form.notifications(), NotificationFlags::all_off());
    }

    #[test]
    fn binding_marks_pristine_and_mutation_marks_dirty() {
        let mut form = UserFormModel::new(&admin_actor(), "en_US");
        form.set_email("someone@example.com");
        assert!(form.is_dirty());

        form.bind_from_entity(&loaded_user());
        assert!(!form.is_dirty());

        form.set_first_name("John");
        assert!(form.is_dirty());
    }

    #[test]
    fn role_policy_overwrites_the_whole_bundle() {
        let mut form = UserFormModel::new(&admin_actor(), "en_US");
        form.apply_role_policy(UserRole::Admin);
        assert!(form.notifications().unknown_user_badged);

        form.apply_role_policy(UserRole::Demo);
        assert!(!form.notifications_active());
        assert_eq!(*form.notifications(), NotificationFlags::all_off());
    }

    #[test]
    fn role_policy_is_idempotent() {
        let mut once = UserFormModel::new(&admin_actor(), "en_US");
        once.apply_role_policy(UserRole::Basic);
        let mut twice = once.clone();
        twice.apply_role_policy(UserRole::Basic);
        assert_eq!(*once.notifications(), *twice.notifications());
        assert_eq!(once.notifications_active(), twice.notifications_active());
    }

    #[test]
    fn round_trip_preserves_populated_fields() {
        let user = loaded_user();
        let mut form = UserFormModel::new(&admin_actor(), "en_US");
        form.bind_from_entity(&user);

        let collected = form.collect_to_entity();
        assert!(collected.is_ok());
        let collected = collected.unwrap_or_else(|_| unreachable!());
        assert_eq!(collected.id, user.id);
        assert_eq!(collected.name, user.name);
        assert_eq!(collected.first_name, user.first_name);
        assert_eq!(collected.email, user.email);
        assert_eq!(collected.phone, user.phone);
        assert_eq!(collected.i_number, user.i_number);
        assert_eq!(collected.cost_center, user.cost_center);
        assert_eq!(collected.plate_id, user.plate_id);
        assert_eq!(collected.locale, user.locale);
        assert_eq!(collected.tags, user.tags);
    }

    #[test]
    fn validation_names_the_first_offending_field() {
        let form = UserFormModel::new(&admin_actor(), "en_US");
        let error = form.validate();
        assert!(matches!(
            error,
            Err(AppError::Validation { field: "name", .. })
        ));
    }

    #[test]
    fn badge_requiredness_follows_the_acting_role() {
        let mut form = UserFormModel::new(&admin_actor(), "en_US");
        form.bind_from_entity(&loaded_user());
        form.set_tags(Vec::new());
        assert!(matches!(
            form.validate(),
            Err(AppError::Validation { field: "tags", .. })
        ));

        let basic = ActorIdentity::new("op-2", UserRole::Basic, false);
        let mut form = UserFormModel::new(&basic, "en_US");
        form.bind_from_entity(&loaded_user());
        form.set_tags(Vec::new());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn differing_passwords_are_a_mismatch() {
        let mut form = UserFormModel::new(&admin_actor(), "en_US");
        form.bind_from_entity(&loaded_user());
        form.set_password("Str0ng&Secret");
        form.set_repeat_password("Str0ng&Other");
        assert!(matches!(form.validate(), Err(AppError::Mismatch { .. })));
    }

    #[test]
    fn equal_passwords_must_still_be_strong() {
        let mut form = UserFormModel::new(&admin_actor(), "en_US");
        form.bind_from_entity(&loaded_user());
        form.set_password("weak");
        form.set_repeat_password("weak");
        assert!(matches!(
            form.validate(),
            Err(AppError::Validation { field: "password", .. })
        ));
    }

    #[test]
    fn oversized_picture_is_rejected() {
        let mut form = UserFormModel::new(&admin_actor(), "en_US");
        let result = form.set_image("x".repeat(2048), 1);
        assert!(matches!(
            result,
            Err(AppError::Validation { field: "image", .. })
        ));
    }

    #[test]
    fn placeholder_image_never_reaches_the_entity() {
        let mut form = UserFormModel::new(&admin_actor(), "en_US");
        form.bind_from_entity(&loaded_user());
        assert!(form.collect_to_entity().is_ok_and(|user| user.image.is_none()));

        let attached = form.set_image("data:image/png;base64,QUJD", 100);
        assert!(attached.is_ok());
        assert!(form.collect_to_entity().is_ok_and(|user| user.image.is_some()));
    }
}
