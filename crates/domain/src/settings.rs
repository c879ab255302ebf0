//! Tenant capabilities and their settings records.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use voltdesk_core::AppError;

/// Optional capability that a tenant can enable.
///
/// Gates both UI sections and the remote calls backing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TenantComponent {
    /// Session pricing.
    Pricing,
    /// Expense refunding through a third-party integration.
    Refund,
    /// Invoicing through a billing provider.
    Billing,
    /// Sites and site areas.
    Organization,
    /// Usage analytics.
    Analytics,
    /// Consumption statistics.
    Statistics,
    /// Smart charging.
    SmartCharging,
}

impl TenantComponent {
    /// Returns the wire identifier of the capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pricing => "pricing",
            Self::Refund => "refund",
            Self::Billing => "billing",
            Self::Organization => "organization",
            Self::Analytics => "analytics",
            Self::Statistics => "statistics",
            Self::SmartCharging => "smartCharging",
        }
    }
}

impl FromStr for TenantComponent {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pricing" => Ok(Self::Pricing),
            "refund" => Ok(Self::Refund),
            "billing" => Ok(Self::Billing),
            "organization" => Ok(Self::Organization),
            "analytics" => Ok(Self::Analytics),
            "statistics" => Ok(Self::Statistics),
            "smartCharging" => Ok(Self::SmartCharging),
            _ => Err(AppError::Unexpected(format!(
                "unknown tenant component '{value}'"
            ))),
        }
    }
}

/// Concur integration parameters inside the refund settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcurRefundSetting {
    /// OAuth authorization server base URL.
    pub authentication_url: String,
    /// Expense API base URL.
    pub api_url: String,
    /// OAuth client identifier.
    pub client_id: String,
    /// Concur application URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_url: Option<String>,
}

/// Content payload of the refund settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundSettingContent {
    /// Refund provider discriminator.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Concur parameters when the provider is Concur.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concur: Option<ConcurRefundSetting>,
}

/// Refund settings record of the tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundSettings {
    /// Settings record identifier.
    pub id: String,
    /// Provider-specific content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<RefundSettingContent>,
}

impl RefundSettings {
    /// Returns the Concur parameters, if the tenant configured them.
    #[must_use]
    pub fn concur(&self) -> Option<&ConcurRefundSetting> {
        self.content.as_ref().and_then(|content| content.concur.as_ref())
    }
}

/// Pricing model configured for the tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingSettingsType {
    /// Flat per-kWh pricing.
    #[serde(rename = "simple")]
    Simple,
    /// Rating through an external convergent charging system.
    #[serde(rename = "convergentCharging")]
    ConvergentCharging,
}

/// Content payload of the pricing settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSettingContent {
    /// Pricing model discriminator.
    #[serde(rename = "type")]
    pub pricing_type: PricingSettingsType,
}

/// Pricing settings record of the tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSettings {
    /// Settings record identifier.
    pub id: String,
    /// Pricing model content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PricingSettingContent>,
}

impl PricingSettings {
    /// Returns the configured pricing model, if any.
    #[must_use]
    pub fn pricing_type(&self) -> Option<PricingSettingsType> {
        self.content.as_ref().map(|content| content.pricing_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_identifiers_round_trip() {
        for component in [
            TenantComponent::Pricing,
            TenantComponent::Refund,
            TenantComponent::Billing,
            TenantComponent::Organization,
            TenantComponent::Analytics,
            TenantComponent::Statistics,
            TenantComponent::SmartCharging,
        ] {
            assert_eq!(
                component.as_str().parse::<TenantComponent>().ok(),
                Some(component)
            );
        }
    }

    #[test]
    fn refund_settings_expose_concur_content() {
        let settings = RefundSettings {
            id: "S1".to_owned(),
            content: Some(RefundSettingContent {
                content_type: "concur".to_owned(),
                concur: Some(ConcurRefundSetting {
                    authentication_url: "https://auth.example.com".to_owned(),
                    api_url: "https://api.example.com".to_owned(),
                    client_id: "client-1".to_owned(),
                    app_url: None,
                }),
            }),
        };
        assert_eq!(
            settings.concur().map(|concur| concur.client_id.as_str()),
            Some("client-1")
        );
    }

    #[test]
    fn refund_settings_without_content_have_no_concur() {
        let settings = RefundSettings {
            id: "S1".to_owned(),
            content: None,
        };
        assert!(settings.concur().is_none());
    }

    #[test]
    fn pricing_type_parses_from_wire_json() {
        let settings: Result<PricingSettings, _> = serde_json::from_str(
            r#"{"id":"P1","content":{"type":"convergentCharging"}}"#,
        );
        assert_eq!(
            settings.ok().and_then(|settings| settings.pricing_type()),
            Some(PricingSettingsType::ConvergentCharging)
        );
    }
}
