use voltdesk_core::AppError;

use crate::ConfirmRequest;

use super::*;

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Whether the record was created rather than updated.
    pub created: bool,
    /// The record identifier (freshly assigned on create).
    pub user_id: UserId,
    /// Whether the hosting dialog should close now.
    pub close_dialog: bool,
}

impl UserEditor {
    /// Validates the form and writes the record to the central server.
    ///
    /// Creates when no identifier is tracked yet, updates otherwise. On
    /// create success the server-assigned identifier is adopted, so every
    /// later save becomes an update. Validation failures abort locally; no
    /// remote call is made and no retry happens anywhere. A successful write
    /// marks the form pristine and triggers reconciliation of unassigned
    /// transactions.
    pub async fn save(&mut self) -> AppResult<SaveOutcome> {
        let user = self.form.collect_to_entity()?;

        match self.current_user_id.clone() {
            Some(user_id) => self.update_user(user, user_id).await,
            None => self.create_user(user).await,
        }
    }

    async fn create_user(&mut self, mut user: User) -> AppResult<SaveOutcome> {
        let response = match self.users.create_user(&user).await {
            Ok(response) => response,
            Err(error) => return Err(self.fail_write(error, false).await),
        };

        if !response.is_success() {
            self.messenger.error("users.create_error", None).await;
            return Err(AppError::Unexpected(
                "user creation rejected by the central server".to_owned(),
            ));
        }

        let assigned = response.id.ok_or_else(|| {
            AppError::Unexpected("create response did not carry the assigned identifier".to_owned())
        })?;
        let user_id = UserId::new(assigned)?;
        user.id = Some(user_id.clone());
        self.current_user_id = Some(user_id.clone());

        self.messenger
            .success("users.create_success", Some(full_name(&user)))
            .await;
        self.form.mark_pristine();
        let close_dialog = self.reconcile_unassigned(&user).await;
        self.user = Some(user);

        Ok(SaveOutcome {
            created: true,
            user_id,
            close_dialog,
        })
    }

    async fn update_user(&mut self, mut user: User, user_id: UserId) -> AppResult<SaveOutcome> {
        user.id = Some(user_id.clone());

        let response = match self.users.update_user(&user).await {
            Ok(response) => response,
            Err(error) => return Err(self.fail_write(error, true).await),
        };

        if !response.is_success() {
            self.messenger.error("users.update_error", None).await;
            return Err(AppError::Unexpected(
                "user update rejected by the central server".to_owned(),
            ));
        }

        self.messenger
            .success("users.update_success", Some(full_name(&user)))
            .await;
        self.form.mark_pristine();
        let close_dialog = self.reconcile_unassigned(&user).await;
        self.user = Some(user);

        Ok(SaveOutcome {
            created: false,
            user_id,
            close_dialog,
        })
    }

    async fn fail_write(&self, error: AppError, updating: bool) -> AppError {
        let message_key = match &error {
            AppError::DuplicateEmail(_) => "authentication.email_already_exists",
            AppError::DuplicateTagId(_) => "users.user_tag_id_already_used",
            AppError::EntityGone(_) => "users.user_do_not_exist",
            _ if updating => "users.update_error",
            _ => "users.create_error",
        };
        self.messenger
            .error(message_key, Some(error.to_string()))
            .await;
        error
    }

    /// Post-save reconciliation of transactions not yet attributed to the
    /// user. Admin-only; single-shot and non-transactional — a failed
    /// reassignment leaves the transactions unassigned with no retry.
    ///
    /// Returns whether the hosting dialog should close.
    async fn reconcile_unassigned(&mut self, user: &User) -> bool {
        if !self.actor.is_admin() {
            return self.in_dialog;
        }
        let Some(user_id) = user.id.clone() else {
            return self.in_dialog;
        };

        let count = match self.transactions.count_unassigned(&user_id).await {
            Ok(count) => count,
            Err(error) => {
                self.messenger
                    .error("users.update_error", Some(error.to_string()))
                    .await;
                return false;
            }
        };

        if count == 0 {
            return self.in_dialog;
        }

        let confirmed = self
            .prompt
            .confirm(ConfirmRequest {
                title_key: "users.assign_transactions_title".to_owned(),
                message_key: "users.assign_transactions_confirm".to_owned(),
                count: Some(count),
            })
            .await;
        if confirmed {
            self.assign_transactions(user, &user_id).await;
        }

        self.in_dialog
    }

    async fn assign_transactions(&self, user: &User, user_id: &UserId) {
        match self.transactions.assign_transactions(user_id).await {
            Ok(response) if response.is_success() => {
                self.messenger
                    .success("users.assign_transactions_success", Some(full_name(user)))
                    .await;
            }
            Ok(_) => {
                self.messenger
                    .error("users.assign_transactions_error", None)
                    .await;
            }
            Err(error) => {
                self.messenger
                    .error("users.assign_transactions_error", Some(error.to_string()))
                    .await;
            }
        }
    }
}

fn full_name(user: &User) -> String {
    format!(
        "{} {}",
        user.first_name.as_deref().unwrap_or_default(),
        user.name.as_deref().unwrap_or_default()
    )
}
