//! Action descriptors for the generic data table.
//!
//! A descriptor binds a toolbar button to the creation dialog of one entity
//! type. Descriptors are immutable and stateless; each execution opens a
//! fresh dialog and refreshes the table afterwards when a refresher is
//! supplied.

use voltdesk_core::AppResult;

use crate::{DialogLauncher, EntityDialog, TableRefresher};

/// Identifier of a table action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableActionId {
    /// Opens the user creation dialog.
    CreateUser,
    /// Opens the tenant creation dialog.
    CreateTenant,
}

impl TableActionId {
    /// Returns the stable identifier string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateUser => "create_user",
            Self::CreateTenant => "create_tenant",
        }
    }
}

/// Immutable descriptor of a table action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableActionDef {
    /// Button identifier.
    pub id: TableActionId,
    /// Toolbar icon name.
    pub icon: &'static str,
    /// Button label message key.
    pub name_key: &'static str,
    /// Tooltip message key.
    pub tooltip_key: &'static str,
    /// Dialog the action opens.
    pub dialog: EntityDialog,
}

impl TableActionDef {
    /// Opens the bound creation dialog and refreshes the table afterwards.
    pub async fn execute(
        &self,
        dialogs: &dyn DialogLauncher,
        refresher: Option<&dyn TableRefresher>,
    ) -> AppResult<()> {
        dialogs.open_create_dialog(self.dialog).await?;
        if let Some(refresher) = refresher {
            refresher.refresh().await?;
        }

        Ok(())
    }
}

fn create_action(id: TableActionId, dialog: EntityDialog) -> TableActionDef {
    TableActionDef {
        id,
        icon: "add",
        name_key: "general.create",
        tooltip_key: "general.tooltips.create",
        dialog,
    }
}

/// Returns the descriptor of the user creation action.
#[must_use]
pub fn create_user_action() -> TableActionDef {
    create_action(TableActionId::CreateUser, EntityDialog::User)
}

/// Returns the descriptor of the tenant creation action.
#[must_use]
pub fn create_tenant_action() -> TableActionDef {
    create_action(TableActionId::CreateTenant, EntityDialog::Tenant)
}
