//! Ports to the hosting UI shell.
//!
//! Dialogs, toasts and table refreshes are owned by the host; the services
//! here only talk to these traits.

use async_trait::async_trait;

use voltdesk_core::AppResult;

/// Displays translated messages to the operator.
///
/// Message keys are resolved by the host's translation subsystem; `detail`
/// carries preformatted parameters such as the user's full name.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Shows a success message.
    async fn success(&self, message_key: &str, detail: Option<String>);

    /// Shows an error message.
    async fn error(&self, message_key: &str, detail: Option<String>);
}

/// A yes/no confirmation to put in front of the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    /// Title message key.
    pub title_key: String,
    /// Body message key.
    pub message_key: String,
    /// Count interpolated into the body, when the question carries one.
    pub count: Option<u64>,
}

/// Asks the operator yes/no questions.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Returns `true` when the operator answered yes.
    async fn confirm(&self, request: ConfirmRequest) -> bool;
}

/// Entity editing dialogs the host can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityDialog {
    /// The user editing dialog.
    User,
    /// The tenant editing dialog.
    Tenant,
}

/// Opens entity dialogs in the host shell.
#[async_trait]
pub trait DialogLauncher: Send + Sync {
    /// Opens the creation dialog for an entity and resolves when it closes.
    async fn open_create_dialog(&self, dialog: EntityDialog) -> AppResult<()>;
}

/// Reloads the data table that spawned an action.
#[async_trait]
pub trait TableRefresher: Send + Sync {
    /// Re-runs the table query.
    async fn refresh(&self) -> AppResult<()>;
}
