//! Conversion editing and import (admin API).
//!
//! The API echoes the submitted values back in `data`, so the option
//! structs double as the returned records.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::client::{AffiseClient, Audience, ClientError, Response};
use crate::encoding::{EncodeError, EncodedParams, ParamEncoder, ToParams};

/// Conversion edit, sent to and returned by [`AdminConversionService::edit`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionEdit {
    /// Conversion IDs.
    pub ids: Vec<String>,
    /// `confirmed`, `pending`, `declined`, `not_found` or `hold`.
    pub status: Option<String>,
    /// Currency code.
    pub currency: Option<String>,
    /// Affiliate payout.
    pub payouts: Option<Decimal>,
    /// Revenue.
    pub revenue: Option<Decimal>,
    /// Comment.
    pub comment: Option<String>,
}

impl ToParams for ConversionEdit {}

/// Conversion import, sent to and returned by
/// [`AdminConversionService::import`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionImport {
    /// Offer ID.
    pub offer: u64,
    /// Affiliate ID.
    #[serde(rename = "pid")]
    pub affiliate_id: u64,
    /// Affiliate side conversion ID.
    pub action_id: Option<String>,
    /// Click ID.
    pub click_id: Option<String>,
    /// Goal number.
    pub goal: Option<u32>,
    /// Visitor IP.
    pub ip: Option<String>,
    /// Visitor user agent.
    pub ua: Option<String>,
    /// Comment.
    pub comment: Option<String>,
    /// Payout amount for percent payouts.
    pub sum: Option<Decimal>,
    /// `confirmed`, `pending`, `declined`, `not_found` or `hold`.
    pub status: Option<String>,
    /// Custom field 1.
    pub custom_field_1: Option<String>,
    /// Custom field 2.
    pub custom_field_2: Option<String>,
    /// Custom field 3.
    pub custom_field_3: Option<String>,
    /// Custom field 4.
    pub custom_field_4: Option<String>,
    /// Custom field 5.
    pub custom_field_5: Option<String>,
    /// Custom field 6.
    pub custom_field_6: Option<String>,
    /// Custom field 7.
    pub custom_field_7: Option<String>,
}

impl ToParams for ConversionImport {}

/// Batch import sent as `list[i][field]`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionImportList {
    /// Conversions to import.
    #[serde(skip)]
    pub list: Vec<ConversionImport>,
}

impl ToParams for ConversionImportList {
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        encoder.encode_slice("list", &self.list)
    }
}

#[derive(Debug, Deserialize)]
struct DataResponse<T> {
    #[serde(default)]
    data: T,
}

#[derive(Debug, Default, Deserialize)]
struct ImportedList {
    #[serde(default)]
    list: Vec<ConversionImport>,
}

/// Conversion endpoints of the admin API.
#[derive(Debug, Clone, Copy)]
pub struct AdminConversionService<'a> {
    client: &'a AffiseClient,
}

impl<'a> AdminConversionService<'a> {
    pub(crate) const fn new(client: &'a AffiseClient) -> Self {
        Self { client }
    }

    /// Edits conversions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn edit(&self, opts: &ConversionEdit) -> Result<(ConversionEdit, Response), ClientError> {
        let (body, response): (DataResponse<ConversionEdit>, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/admin/conversion/edit", Audience::Admin, opts)
            .await?;
        Ok((body.data, response))
    }

    /// Imports a single conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn import(
        &self,
        opts: &ConversionImport,
    ) -> Result<(ConversionImport, Response), ClientError> {
        let (body, response): (DataResponse<ConversionImport>, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/admin/conversion/import", Audience::Admin, opts)
            .await?;
        Ok((body.data, response))
    }

    /// Imports several conversions at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn import_list(
        &self,
        opts: &ConversionImportList,
    ) -> Result<(Vec<ConversionImport>, Response), ClientError> {
        let (body, response): (DataResponse<ImportedList>, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/admin/conversions/import", Audience::Admin, opts)
            .await?;
        Ok((body.data.list, response))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::services::test_support::client;

    #[test]
    fn test_edit_opts() {
        let opts = ConversionEdit {
            ids: vec!["59359e1d7e28feb7568b456a".to_string()],
            payouts: Some(Decimal::new(25, 1)),
            ..Default::default()
        };
        let params = client().encode(&opts).expect("encode");
        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, vec!["ids", "payouts"]);
        assert_eq!(params.get("payouts"), Some("2.5"));
    }

    #[test]
    fn test_import_list_opts() {
        let opts = ConversionImportList {
            list: vec![
                ConversionImport {
                    offer: 1000,
                    affiliate_id: 500,
                    ..Default::default()
                },
                ConversionImport {
                    offer: 1001,
                    affiliate_id: 501,
                    click_id: Some("abc".to_string()),
                    ..Default::default()
                },
            ],
        };
        let params = client().encode(&opts).expect("encode");
        assert_eq!(params.get("list[0][offer]"), Some("1000"));
        assert_eq!(params.get("list[0][pid]"), Some("500"));
        assert_eq!(params.get("list[1][click_id]"), Some("abc"));
        assert!(!params.contains_key("list[0][click_id]"));
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn test_import_echo_decodes() {
        let body: DataResponse<ConversionImport> =
            serde_json::from_str(r#"{"status":1,"data":{"offer":1000,"pid":500,"goal":2}}"#)
                .expect("import");
        assert_eq!(body.data.offer, 1000);
        assert_eq!(body.data.affiliate_id, 500);
        assert_eq!(body.data.goal, Some(2));
    }
}
