//! Application services and ports for the back-office editing surfaces.

#![forbid(unsafe_code)]

mod central_ports;
mod table_actions;
mod transaction_cells;
mod ui_ports;
mod user_editor;
mod user_form;

pub use central_ports::{
    ActionResponse, CapabilityGate, ChangeNotification, ConnectionGateway, REST_RESPONSE_SUCCESS,
    SettingsGateway, TransactionGateway, UserGateway, UserImage,
};
pub use table_actions::{
    TableActionDef, TableActionId, create_tenant_action, create_user_action,
};
pub use transaction_cells::{InactivityCell, format_duration, format_inactivity, inactivity_cell};
pub use ui_ports::{
    ConfirmRequest, ConfirmationPrompt, DialogLauncher, EntityDialog, Messenger, TableRefresher,
};
pub use user_editor::{SaveOutcome, UserEditor, UserEditorConfig, UserEditorPorts};
pub use user_form::{USER_NO_PICTURE, UserFormModel};
