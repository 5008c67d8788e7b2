//! Advertiser invoices (admin API).
//!
//! Invoices travel in the envelope's `message` field, which on success
//! holds the payload instead of a text.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{AffiseClient, Audience, ClientError, Payload, Response};
use crate::encoding::{EncodeError, EncodedParams, ParamEncoder, ToParams};
use crate::types::{Invoice, InvoiceDetail};

#[derive(Debug, Deserialize)]
struct InvoiceResponse {
    #[serde(default)]
    message: Invoice,
}

#[derive(Debug, Deserialize)]
struct InvoicesResponse {
    #[serde(default)]
    message: Vec<Invoice>,
}

/// Options for [`AdminBillingService::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceListOpts {
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
    /// `paid` or `unpaid`.
    pub status: Option<String>,
    /// Start of the period.
    pub start_date: Option<String>,
    /// End of the period.
    pub end_date: Option<String>,
}

impl ToParams for InvoiceListOpts {}

/// Options for [`AdminBillingService::create`] and
/// [`AdminBillingService::update`].
///
/// `supplier_id` is always required, `currency` on create only; the API
/// ignores a currency sent on update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceOpts {
    /// Advertiser ID.
    pub supplier_id: String,
    /// Start of the invoiced period.
    pub start_date: Option<String>,
    /// End of the invoiced period.
    pub end_date: Option<String>,
    /// `paid` or `unpaid`.
    pub status: Option<String>,
    /// One of the active currencies.
    pub currency: Option<String>,
    /// Comment.
    pub comment: Option<String>,
    /// Invoice lines, sent as `detail[i][field]`.
    #[serde(skip)]
    pub details: Vec<InvoiceDetail>,
}

impl ToParams for InvoiceOpts {
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        let params = encoder.encode(self)?;
        Ok(params.merged(encoder.encode_slice("detail", &self.details)?))
    }
}

/// Invoice endpoints of the admin API.
#[derive(Debug, Clone, Copy)]
pub struct AdminBillingService<'a> {
    client: &'a AffiseClient,
}

impl<'a> AdminBillingService<'a> {
    pub(crate) const fn new(client: &'a AffiseClient) -> Self {
        Self { client }
    }

    /// Lists invoices.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list(&self, opts: &InvoiceListOpts) -> Result<(Vec<Invoice>, Response), ClientError> {
        let (body, response): (InvoicesResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.0/admin/advertiser-invoices", Audience::Admin, opts)
            .await?;
        Ok((body.message, response))
    }

    /// Gets an invoice by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn get(&self, number: u64) -> Result<(Invoice, Response), ClientError> {
        let path = format!("/3.0/admin/advertiser-invoice/{number}");
        let (body, response): (InvoiceResponse, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.message, response))
    }

    /// Creates an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn create(&self, opts: &InvoiceOpts) -> Result<(Invoice, Response), ClientError> {
        let (body, response): (InvoiceResponse, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/admin/advertiser-invoice", Audience::Admin, opts)
            .await?;
        Ok((body.message, response))
    }

    /// Updates an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn update(
        &self,
        number: u64,
        opts: &InvoiceOpts,
    ) -> Result<(Invoice, Response), ClientError> {
        let path = format!("/3.0/admin/advertiser-invoice/{number}");
        let (body, response): (InvoiceResponse, _) = self
            .client
            .fetch_opts(Method::POST, &path, Audience::Admin, opts)
            .await?;
        Ok((body.message, response))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::services::test_support::client;

    #[test]
    fn test_invoice_opts_details() {
        let opts = InvoiceOpts {
            supplier_id: "5a".to_string(),
            currency: Some("USD".to_string()),
            details: vec![
                InvoiceDetail {
                    offer_id: 936,
                    payout_type: "RPA".to_string(),
                    actions: 3,
                    amount: Decimal::new(1250, 2),
                    comment: String::new(),
                },
                InvoiceDetail {
                    offer_id: 937,
                    amount: Decimal::from(7),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let params = client().encode(&opts).expect("encode");
        assert_eq!(params.get("supplier_id"), Some("5a"));
        assert_eq!(params.get("currency"), Some("USD"));
        assert_eq!(params.get("detail[0][offer_id]"), Some("936"));
        assert_eq!(params.get("detail[0][amount]"), Some("12.50"));
        assert_eq!(params.get("detail[1][amount]"), Some("7"));
        assert_eq!(params.get("detail[1][comment]"), Some(""));
        assert!(!params.contains_key("details"));
    }

    #[test]
    fn test_invoice_opts_without_details() {
        let opts = InvoiceOpts {
            supplier_id: "5a".to_string(),
            ..Default::default()
        };
        let params = client().encode(&opts).expect("encode");
        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, vec!["supplier_id"]);
    }

    #[test]
    fn test_invoice_payload_decodes_from_message() {
        let body: InvoicesResponse = serde_json::from_str(
            r#"{"status":1,"message":[{"number":12,"supplier_id":"5a","detail":[{"offer_id":1,"amount":5}]}]}"#,
        )
        .expect("invoices");
        assert_eq!(body.message.len(), 1);
        assert_eq!(body.message[0].number, 12);
        assert_eq!(body.message[0].detail[0].amount, Decimal::from(5));
    }
}
