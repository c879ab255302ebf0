use serde_json::json;
use url::Url;
use voltdesk_core::{AppError, AppResult};

use super::*;

impl UserEditor {
    /// Revokes the user's Concur connection.
    ///
    /// Best-effort: the outcome is surfaced as a message and the refund
    /// slices are re-fetched afterwards either way, so the surface reflects
    /// the server's view.
    pub async fn revoke_refund_account(&mut self) {
        let Some(connection) = self.refund_connection.clone() else {
            return;
        };

        match self.connections.delete_connection(&connection.id).await {
            Ok(response) if response.is_success() => {
                self.messenger
                    .success("settings.refund.concur.revoke_success", None)
                    .await;
            }
            Ok(_) => {
                self.messenger
                    .error("settings.refund.concur.revoke_error", None)
                    .await;
            }
            Err(error) => {
                self.messenger
                    .error("settings.refund.concur.revoke_error", Some(error.to_string()))
                    .await;
            }
        }

        if let Some(user_id) = self.current_user_id.clone() {
            let slices = self.fetch_refund_slices(&user_id).await;
            self.apply_refund_slices(slices);
        }
    }

    /// Builds the Concur OAuth authorization URL for linking the account.
    ///
    /// Fails when the tenant has no Concur refund configuration; the state
    /// parameter carries the connector, the settings record and the user so
    /// the callback page can finish the link.
    pub async fn concur_authorize_url(&self, return_url: &str) -> AppResult<Url> {
        let concur = self
            .refund_settings
            .as_ref()
            .and_then(|settings| settings.concur().map(|concur| (settings.id.as_str(), concur)));
        let Some((settings_id, concur)) = concur else {
            self.messenger
                .error(
                    "transactions.notification.refund.tenant_concur_connection_invalid",
                    None,
                )
                .await;
            return Err(AppError::NotFound(
                "tenant has no concur refund settings".to_owned(),
            ));
        };

        let state = json!({
            "connector": CONCUR_CONNECTOR_ID,
            "appId": settings_id,
            "userId": self.current_user_id.as_ref().map(UserId::as_str),
        });

        Url::parse_with_params(
            &format!("{}/oauth2/v0/authorize", concur.authentication_url),
            &[
                ("client_id", concur.client_id.as_str()),
                ("response_type", "code"),
                ("scope", "EXPRPT"),
                ("redirect_uri", return_url),
                ("state", state.to_string().as_str()),
            ],
        )
        .map_err(|error| AppError::Unexpected(format!("invalid concur authorization url: {error}")))
    }

    /// Returns the Concur expense API URL, when the tenant configured one.
    #[must_use]
    pub fn refund_api_url(&self) -> Option<&str> {
        self.refund_settings
            .as_ref()
            .and_then(RefundSettings::concur)
            .map(|concur| concur.api_url.as_str())
    }
}
