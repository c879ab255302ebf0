//! REST client for the central server.
//!
//! Implements the remote gateways of the application layer against the
//! central server's action-style REST API. Wire status codes are mapped to
//! the typed error kinds here; nothing above this layer sees a numeric code.

use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use url::Url;

use voltdesk_application::{
    ActionResponse, ConnectionGateway, SettingsGateway, TransactionGateway, UserGateway,
    UserImage,
};
use voltdesk_core::{AppError, AppResult};
use voltdesk_domain::{
    IntegrationConnection, PricingSettings, RefundSettings, TenantComponent, User, UserId,
};

use crate::ClientConfig;

/// Wire status: the email address is already registered.
const STATUS_EMAIL_ALREADY_EXISTS: u16 = 510;
/// Wire status: the badge identifier is already assigned.
const STATUS_TAG_ALREADY_USED: u16 = 540;
/// Wire status: the object does not exist.
const STATUS_OBJECT_DOES_NOT_EXIST: u16 = 550;

/// Maps a wire status from a read call to a typed error.
fn read_error_from_status(status: u16, what: &str) -> AppError {
    match status {
        STATUS_OBJECT_DOES_NOT_EXIST => AppError::NotFound(what.to_owned()),
        _ => AppError::Unexpected(format!(
            "central server returned status {status} reading {what}"
        )),
    }
}

/// Maps a wire status from a write call to a typed error.
fn write_error_from_status(status: u16, what: &str) -> AppError {
    match status {
        STATUS_EMAIL_ALREADY_EXISTS => AppError::DuplicateEmail(what.to_owned()),
        STATUS_TAG_ALREADY_USED => AppError::DuplicateTagId(what.to_owned()),
        STATUS_OBJECT_DOES_NOT_EXIST => AppError::EntityGone(what.to_owned()),
        _ => AppError::Unexpected(format!(
            "central server returned status {status} writing {what}"
        )),
    }
}

fn transport_error(error: reqwest::Error) -> AppError {
    AppError::Unexpected(format!("central server unreachable: {error}"))
}

fn decode_error(error: reqwest::Error) -> AppError {
    AppError::Unexpected(format!("malformed central server response: {error}"))
}

/// List envelope of the central server.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct DataResult<T> {
    #[serde(default)]
    result: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireActionResponse {
    status: String,
    #[serde(default)]
    id: Option<String>,
}

impl From<WireActionResponse> for ActionResponse {
    fn from(value: WireActionResponse) -> Self {
        Self {
            status: value.status,
            id: value.id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUserImage {
    id: String,
    #[serde(default)]
    image: Option<String>,
}

/// HTTP implementation of the central server gateways.
pub struct RestCentralServerClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl RestCentralServerClient {
    /// Creates a client from the runtime configuration.
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = &config.auth_token {
            let value = header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|error| AppError::Unexpected(format!("invalid auth token: {error}")))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|error| {
                AppError::Unexpected(format!("could not build the http client: {error}"))
            })?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self, action: &str) -> AppResult<Url> {
        self.base_url.join(action).map_err(|error| {
            AppError::Unexpected(format!("invalid endpoint '{action}': {error}"))
        })
    }

    async fn write_action(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> AppResult<ActionResponse> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(write_error_from_status(status.as_u16(), what));
        }

        let wire: WireActionResponse = response.json().await.map_err(decode_error)?;
        Ok(wire.into())
    }
}

#[async_trait]
impl UserGateway for RestCentralServerClient {
    async fn fetch_user(&self, user_id: &UserId) -> AppResult<User> {
        let response = self
            .http_client
            .get(self.endpoint("User")?)
            .query(&[("ID", user_id.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(read_error_from_status(
                status.as_u16(),
                &format!("user '{user_id}'"),
            ));
        }

        response.json::<User>().await.map_err(decode_error)
    }

    async fn fetch_user_image(&self, user_id: &UserId) -> AppResult<Option<UserImage>> {
        let response = self
            .http_client
            .get(self.endpoint("UserImage")?)
            .query(&[("ID", user_id.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.as_u16() == STATUS_OBJECT_DOES_NOT_EXIST {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(read_error_from_status(
                status.as_u16(),
                &format!("image of user '{user_id}'"),
            ));
        }

        let wire: WireUserImage = response.json().await.map_err(decode_error)?;
        Ok(Some(UserImage {
            id: wire.id,
            image: wire.image,
        }))
    }

    async fn create_user(&self, user: &User) -> AppResult<ActionResponse> {
        let request = self
            .http_client
            .post(self.endpoint("UserCreate")?)
            .json(user);
        self.write_action(request, "new user").await
    }

    async fn update_user(&self, user: &User) -> AppResult<ActionResponse> {
        let what = match &user.id {
            Some(user_id) => format!("user '{user_id}'"),
            None => "user".to_owned(),
        };
        let request = self
            .http_client
            .put(self.endpoint("UserUpdate")?)
            .json(user);
        self.write_action(request, &what).await
    }
}

#[async_trait]
impl TransactionGateway for RestCentralServerClient {
    async fn count_unassigned(&self, user_id: &UserId) -> AppResult<u64> {
        let response = self
            .http_client
            .get(self.endpoint("UnassignedTransactionsCount")?)
            .query(&[("UserID", user_id.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(read_error_from_status(
                status.as_u16(),
                "unassigned transactions count",
            ));
        }

        response.json::<u64>().await.map_err(decode_error)
    }

    async fn assign_transactions(&self, user_id: &UserId) -> AppResult<ActionResponse> {
        let request = self
            .http_client
            .put(self.endpoint("AssignTransactionsToUser")?)
            .query(&[("UserID", user_id.as_str())]);
        self.write_action(request, "transaction assignment").await
    }
}

#[async_trait]
impl ConnectionGateway for RestCentralServerClient {
    async fn fetch_connections(
        &self,
        user_id: &UserId,
    ) -> AppResult<Vec<IntegrationConnection>> {
        let response = self
            .http_client
            .get(self.endpoint("IntegrationConnections")?)
            .query(&[("userId", user_id.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(read_error_from_status(
                status.as_u16(),
                "integration connections",
            ));
        }

        let data: DataResult<IntegrationConnection> =
            response.json().await.map_err(decode_error)?;
        Ok(data.result)
    }

    async fn delete_connection(&self, connection_id: &str) -> AppResult<ActionResponse> {
        let request = self
            .http_client
            .delete(self.endpoint("IntegrationConnectionDelete")?)
            .query(&[("ID", connection_id)]);
        self.write_action(request, &format!("connection '{connection_id}'"))
            .await
    }
}

#[async_trait]
impl SettingsGateway for RestCentralServerClient {
    async fn fetch_refund_settings(&self) -> AppResult<Option<RefundSettings>> {
        let data: DataResult<RefundSettings> =
            self.fetch_settings(TenantComponent::Refund).await?;
        Ok(data.result.into_iter().next())
    }

    async fn fetch_pricing_settings(&self) -> AppResult<Option<PricingSettings>> {
        let data: DataResult<PricingSettings> =
            self.fetch_settings(TenantComponent::Pricing).await?;
        Ok(data.result.into_iter().next())
    }
}

impl RestCentralServerClient {
    async fn fetch_settings<T>(&self, component: TenantComponent) -> AppResult<DataResult<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http_client
            .get(self.endpoint("Setting")?)
            .query(&[("Identifier", component.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(read_error_from_status(
                status.as_u16(),
                &format!("{} settings", component.as_str()),
            ));
        }

        response.json().await.map_err(decode_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_maps_missing_object_to_not_found() {
        let error = read_error_from_status(STATUS_OBJECT_DOES_NOT_EXIST, "user 'U1'");
        assert!(matches!(error, AppError::NotFound(_)));
    }

    #[test]
    fn read_maps_anything_else_to_unexpected() {
        assert!(matches!(
            read_error_from_status(500, "user 'U1'"),
            AppError::Unexpected(_)
        ));
        assert!(matches!(
            read_error_from_status(STATUS_EMAIL_ALREADY_EXISTS, "user 'U1'"),
            AppError::Unexpected(_)
        ));
    }

    #[test]
    fn write_maps_the_duplicate_and_gone_statuses() {
        assert!(matches!(
            write_error_from_status(STATUS_EMAIL_ALREADY_EXISTS, "new user"),
            AppError::DuplicateEmail(_)
        ));
        assert!(matches!(
            write_error_from_status(STATUS_TAG_ALREADY_USED, "new user"),
            AppError::DuplicateTagId(_)
        ));
        assert!(matches!(
            write_error_from_status(STATUS_OBJECT_DOES_NOT_EXIST, "user 'U1'"),
            AppError::EntityGone(_)
        ));
        assert!(matches!(
            write_error_from_status(503, "user 'U1'"),
            AppError::Unexpected(_)
        ));
    }

    #[test]
    fn action_response_envelope_parses() {
        let wire: Result<WireActionResponse, _> =
            serde_json::from_str(r#"{"status":"Success","id":"U9"}"#);
        assert!(wire.is_ok());
        let response: ActionResponse = wire.unwrap_or_else(|_| unreachable!()).into();
        assert!(response.is_success());
        assert_eq!(response.id.as_deref(), Some("U9"));
    }

    #[test]
    fn list_envelope_defaults_to_empty() {
        let data: Result<DataResult<IntegrationConnection>, _> =
            serde_json::from_str(r#"{"count":0}"#);
        assert!(data.is_ok_and(|data| data.result.is_empty()));
    }

    #[test]
    fn endpoints_join_under_the_base_path() {
        let config = ClientConfig::from_parts(
            "https://evs.example.com/client/api",
            None,
            None,
            None,
            None,
        );
        assert!(config.is_ok());
        let client = RestCentralServerClient::new(&config.unwrap_or_else(|_| unreachable!()));
        assert!(client.is_ok());
        let client = client.unwrap_or_else(|_| unreachable!());
        assert_eq!(
            client.endpoint("UserCreate").ok().map(String::from),
            Some("https://evs.example.com/client/api/UserCreate".to_owned())
        );
    }
}
