//! Permission presets (admin API).
//!
//! Create and update send a JSON document instead of form parameters
//! because the permission tree does not fit bracket notation.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{AffiseClient, Audience, ClientError, Payload, Response};
use crate::encoding::ToParams;
use crate::types::{Permissions, Preset, UserType};

#[derive(Debug, Deserialize)]
struct PresetsResponse {
    #[serde(default)]
    presets: Vec<Preset>,
}

#[derive(Debug, Deserialize)]
struct PresetResponse {
    #[serde(default)]
    preset: Preset,
}

/// Options for [`AdminPresetService::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct PresetListOpts {
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
}

impl ToParams for PresetListOpts {}

/// Body of [`AdminPresetService::create`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetCreateOpts {
    /// Preset name.
    pub name: String,
    /// Full permission scope.
    pub permissions: Permissions,
    /// User type the preset applies to.
    #[serde(rename = "type")]
    pub kind: UserType,
}

/// Body of [`AdminPresetService::update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PresetUpdateOpts {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Permissions to apply.
    pub permissions: Permissions,
}

/// Preset endpoints of the admin API.
#[derive(Debug, Clone, Copy)]
pub struct AdminPresetService<'a> {
    client: &'a AffiseClient,
}

impl<'a> AdminPresetService<'a> {
    pub(crate) const fn new(client: &'a AffiseClient) -> Self {
        Self { client }
    }

    /// Lists presets.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list(&self, opts: &PresetListOpts) -> Result<(Vec<Preset>, Response), ClientError> {
        let (body, response): (PresetsResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.1/presets", Audience::Admin, opts)
            .await?;
        Ok((body.presets, response))
    }

    /// Creates a preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized, the request fails
    /// or the API reports a failure.
    pub async fn create(&self, opts: &PresetCreateOpts) -> Result<(Preset, Response), ClientError> {
        let (body, response): (PresetResponse, _) = self
            .client
            .fetch(Method::POST, "/3.1/presets", Audience::Admin, Payload::json(opts)?)
            .await?;
        Ok((body.preset, response))
    }

    /// Updates a preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized, the request fails
    /// or the API reports a failure.
    pub async fn update(
        &self,
        id: &str,
        opts: &PresetUpdateOpts,
    ) -> Result<(Preset, Response), ClientError> {
        let path = format!("/3.1/presets/{id}");
        let (body, response): (PresetResponse, _) = self
            .client
            .fetch(Method::POST, &path, Audience::Admin, Payload::json(opts)?)
            .await?;
        Ok((body.preset, response))
    }

    /// Deletes a preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn delete(&self, id: &str) -> Result<Response, ClientError> {
        let path = format!("/3.1/presets/{id}");
        self.client
            .send(Method::DELETE, &path, Audience::Admin, Payload::Empty)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::services::test_support::{client, form_body};

    #[test]
    fn test_create_body_is_json() {
        let opts = PresetCreateOpts {
            name: "Support".to_string(),
            permissions: json!({"offer": {"read": true}}).into(),
            kind: UserType::AffiliateManager,
        };
        let request = client()
            .new_request(
                Method::POST,
                "/3.1/presets",
                Audience::Admin,
                Payload::json(&opts).expect("payload"),
            )
            .expect("request");

        assert_eq!(request.headers()["content-type"], "application/json");
        let body: serde_json::Value = serde_json::from_str(&form_body(&request)).expect("json");
        assert_eq!(
            body,
            json!({
                "name": "Support",
                "permissions": {"offer": {"read": true}},
                "type": "affiliate_manager"
            })
        );
    }

    #[test]
    fn test_update_body_skips_missing_name() {
        let opts = PresetUpdateOpts {
            name: None,
            permissions: json!({}).into(),
        };
        let body = serde_json::to_value(&opts).expect("json");
        assert_eq!(body, json!({"permissions": {}}));
    }

    #[test]
    fn test_preset_decodes() {
        let body: PresetResponse = serde_json::from_str(
            r#"{"status":1,"preset":{"id":"5a1","name":"Default","permissions":{"stats":1}}}"#,
        )
        .expect("preset");
        assert_eq!(body.preset.name, "Default");
        assert!(body.preset.permissions.is_some());
    }
}
