//! User editing surface service.
//!
//! Owns the form model and the loaded state slices, and orchestrates the
//! remote calls behind the editing surface: initial load, create/update,
//! post-save transaction reconciliation, and refund account management.
//! Every collaborator is injected; the hosting shell only drives the public
//! methods and renders the state.

use std::sync::Arc;

use chrono::Utc;
use voltdesk_core::AppResult;
use voltdesk_domain::{
    ActorIdentity, CONCUR_CONNECTOR_ID, IntegrationConnection, PricingSettingsType,
    RefundSettings, TenantComponent, User, UserId, UserRole, available_roles,
};

use crate::{
    CapabilityGate, ConfirmationPrompt, ConnectionGateway, Messenger, SettingsGateway,
    TransactionGateway, UserFormModel, UserGateway,
};

/// Injected collaborators of the editing surface.
#[derive(Clone)]
pub struct UserEditorPorts {
    /// User record operations.
    pub users: Arc<dyn UserGateway>,
    /// Transaction attribution operations.
    pub transactions: Arc<dyn TransactionGateway>,
    /// Integration connection operations.
    pub connections: Arc<dyn ConnectionGateway>,
    /// Tenant settings operations.
    pub settings: Arc<dyn SettingsGateway>,
    /// Tenant capability gate.
    pub capabilities: Arc<dyn CapabilityGate>,
    /// Message display.
    pub messenger: Arc<dyn Messenger>,
    /// Yes/no confirmations.
    pub prompt: Arc<dyn ConfirmationPrompt>,
}

/// Opening parameters of the editing surface.
#[derive(Debug, Clone)]
pub struct UserEditorConfig {
    /// The operator working in the surface.
    pub actor: ActorIdentity,
    /// Identifier of the record to edit, `None` when creating.
    pub current_user_id: Option<UserId>,
    /// Locale preselected for new users.
    pub current_locale: String,
    /// Whether the surface is hosted in a dialog that can be closed.
    pub in_dialog: bool,
    /// Maximum accepted profile picture size.
    pub max_picture_kb: u64,
}

/// Refund-capability state fetched alongside a load.
#[derive(Debug, Default)]
struct RefundSlices {
    settings: Option<RefundSettings>,
    connections: Vec<IntegrationConnection>,
}

/// Stateful service behind the user editing surface.
pub struct UserEditor {
    users: Arc<dyn UserGateway>,
    transactions: Arc<dyn TransactionGateway>,
    connections: Arc<dyn ConnectionGateway>,
    settings: Arc<dyn SettingsGateway>,
    capabilities: Arc<dyn CapabilityGate>,
    messenger: Arc<dyn Messenger>,
    prompt: Arc<dyn ConfirmationPrompt>,
    actor: ActorIdentity,
    in_dialog: bool,
    max_picture_kb: u64,
    current_user_id: Option<UserId>,
    form: UserFormModel,
    user: Option<User>,
    refund_settings: Option<RefundSettings>,
    integration_connections: Vec<IntegrationConnection>,
    refund_connection: Option<IntegrationConnection>,
    refund_connection_valid: bool,
    can_see_invoice: bool,
}

impl UserEditor {
    /// Opens an editing surface.
    ///
    /// Builds the fresh form and checks invoice visibility against the
    /// pricing settings. Call [`UserEditor::load`] afterwards to populate an
    /// existing record.
    pub async fn open(ports: UserEditorPorts, config: UserEditorConfig) -> Self {
        let form = UserFormModel::new(&config.actor, config.current_locale);
        let mut editor = Self {
            users: ports.users,
            transactions: ports.transactions,
            connections: ports.connections,
            settings: ports.settings,
            capabilities: ports.capabilities,
            messenger: ports.messenger,
            prompt: ports.prompt,
            actor: config.actor,
            in_dialog: config.in_dialog,
            max_picture_kb: config.max_picture_kb,
            current_user_id: config.current_user_id,
            form,
            user: None,
            refund_settings: None,
            integration_connections: Vec::new(),
            refund_connection: None,
            refund_connection_valid: false,
            can_see_invoice: false,
        };
        editor.check_invoice_visibility().await;
        editor
    }

    async fn check_invoice_visibility(&mut self) {
        if !self.capabilities.is_active(TenantComponent::Pricing) {
            return;
        }

        match self.settings.fetch_pricing_settings().await {
            Ok(Some(settings)) => {
                self.can_see_invoice =
                    settings.pricing_type() == Some(PricingSettingsType::ConvergentCharging);
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(error = %error, "pricing settings fetch failed, invoice stays hidden");
            }
        }
    }

    async fn fetch_refund_slices(&self, user_id: &UserId) -> RefundSlices {
        if !self.capabilities.is_active(TenantComponent::Refund) {
            return RefundSlices::default();
        }

        let (settings, connections) = tokio::join!(
            self.settings.fetch_refund_settings(),
            self.connections.fetch_connections(user_id),
        );

        let settings = match settings {
            Ok(settings) => settings,
            Err(error) => {
                tracing::warn!(error = %error, "refund settings fetch failed");
                None
            }
        };
        let connections = match connections {
            Ok(connections) => connections,
            Err(error) => {
                tracing::warn!(error = %error, "integration connections fetch failed");
                Vec::new()
            }
        };

        RefundSlices {
            settings,
            connections,
        }
    }

    fn apply_refund_slices(&mut self, slices: RefundSlices) {
        self.refund_settings = slices.settings;
        self.refund_connection = slices
            .connections
            .iter()
            .find(|connection| connection.connector_id == CONCUR_CONNECTOR_ID)
            .cloned();
        self.refund_connection_valid = self
            .refund_connection
            .as_ref()
            .is_some_and(|connection| connection.is_valid_at(Utc::now()));
        self.integration_connections = slices.connections;
    }

    /// Attaches a new profile picture from the operator's file selection.
    pub async fn attach_image(&mut self, data_url: impl Into<String>) -> AppResult<()> {
        let max_kb = self.max_picture_kb;
        if let Err(error) = self.form.set_image(data_url, max_kb) {
            self.messenger
                .error("users.picture_size_error", Some(format!("max {max_kb} kB")))
                .await;
            return Err(error);
        }

        Ok(())
    }

    /// Drops the profile picture.
    pub fn clear_image(&mut self) {
        self.form.clear_image();
    }

    /// Retargets the surface at another record identifier.
    pub fn set_current_user_id(&mut self, user_id: Option<UserId>) {
        self.current_user_id = user_id;
    }

    /// Returns the tracked record identifier.
    #[must_use]
    pub fn current_user_id(&self) -> Option<&UserId> {
        self.current_user_id.as_ref()
    }

    /// Returns the form model.
    #[must_use]
    pub fn form(&self) -> &UserFormModel {
        &self.form
    }

    /// Returns the form model for mutation by the surface controls.
    pub fn form_mut(&mut self) -> &mut UserFormModel {
        &mut self.form
    }

    /// Returns the operator working in the surface.
    #[must_use]
    pub fn actor(&self) -> &ActorIdentity {
        &self.actor
    }

    /// Returns the roles the operator may assign in the role dropdown.
    #[must_use]
    pub fn assignable_roles(&self) -> &'static [UserRole] {
        available_roles(self.actor.role())
    }

    /// Returns the last loaded record.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Returns the refund settings slice.
    #[must_use]
    pub fn refund_settings(&self) -> Option<&RefundSettings> {
        self.refund_settings.as_ref()
    }

    /// Returns every integration connection of the user.
    #[must_use]
    pub fn integration_connections(&self) -> &[IntegrationConnection] {
        &self.integration_connections
    }

    /// Returns the Concur connection, if the user linked one.
    #[must_use]
    pub fn refund_connection(&self) -> Option<&IntegrationConnection> {
        self.refund_connection.as_ref()
    }

    /// Returns whether the Concur connection is currently valid.
    #[must_use]
    pub fn is_refund_connection_valid(&self) -> bool {
        self.refund_connection_valid
    }

    /// Returns whether the invoice section is visible.
    #[must_use]
    pub fn can_see_invoice(&self) -> bool {
        self.can_see_invoice
    }
}

mod load;
mod refund;
mod save;
mod watch;

pub use save::SaveOutcome;
