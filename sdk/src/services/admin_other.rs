//! Reference data, tickets, pixels and smartlink categories (admin API).

use std::collections::HashMap;

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::client::{AffiseClient, Audience, ClientError, Payload, Response};
use crate::encoding::{
    comma_separated_ints, comma_separated_strings, EncodeError, EncodedParams, ParamEncoder,
    ToParams,
};
use crate::types::primitives::keyed_values;
use crate::types::reference::OffersCount;
use crate::types::{
    City, CustomField, Domain, ExtendedCurrency, PaymentSystem, Pixel, SmartLinkCategory, Ticket,
};

#[derive(Debug, Deserialize)]
struct CitiesResponse {
    #[serde(default)]
    cities: Vec<City>,
}

#[derive(Debug, Deserialize)]
struct TypesResponse {
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BrowsersResponse {
    #[serde(default)]
    browsers: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct QuotesResponse<T> {
    #[serde(default)]
    quotes: T,
}

#[derive(Debug, Deserialize)]
struct PaymentSystemsResponse {
    #[serde(default)]
    payment_systems: Vec<PaymentSystem>,
}

#[derive(Debug, Deserialize)]
struct FieldsResponse {
    #[serde(default)]
    fields: Vec<CustomField>,
}

#[derive(Debug, Deserialize)]
struct DomainsResponse {
    #[serde(default)]
    domains: Vec<Domain>,
}

#[derive(Debug, Deserialize)]
struct TicketResponse {
    #[serde(default)]
    ticket: Ticket,
}

#[derive(Debug, Deserialize)]
struct TicketsResponse {
    #[serde(default)]
    tickets: Vec<Ticket>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PixelsResponse {
    /// Keyed by pixel ID, which each value repeats in `id`.
    #[serde(default, deserialize_with = "keyed_values")]
    pub(crate) pixel: Vec<Pixel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PixelResponse {
    #[serde(default)]
    pub(crate) pixel: Pixel,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DataResponse<T> {
    #[serde(default)]
    pub(crate) data: T,
}

/// Options for [`AdminOtherService::list_cities`].
///
/// Countries and codes are sent as comma separated values.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CityListOpts {
    /// Search text.
    pub q: Option<String>,
    /// City codes.
    #[serde(skip)]
    pub code: Vec<u64>,
    /// Country codes.
    #[serde(skip)]
    pub country: Vec<String>,
}

impl ToParams for CityListOpts {
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        let mut params = encoder.encode(self)?;
        if !self.country.is_empty() {
            params.set("country", comma_separated_strings(&self.country));
        }
        if !self.code.is_empty() {
            params.set("code", comma_separated_ints(&self.code));
        }
        Ok(params)
    }
}

/// Options for [`AdminOtherService::list_currencies`] and
/// [`AdminOtherService::list_currencies_extended`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CurrencyListOpts {
    /// `1` to skip inactive currencies.
    pub get_only_active: Option<u8>,
}

impl ToParams for CurrencyListOpts {}

/// Options for [`AdminOtherService::list_tickets`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketListOpts {
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
    /// Ticket status.
    pub status: Option<String>,
}

impl ToParams for TicketListOpts {}

/// Options for [`AdminOtherService::approve_ticket`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketDecisionOpts {
    /// `approve` or `reject`.
    #[serde(rename = "do")]
    pub action: Option<String>,
}

impl ToParams for TicketDecisionOpts {}

/// Options for [`AdminOtherService::create_pixel`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminPixelCreateOpts {
    /// Affiliate ID.
    #[serde(rename = "pid")]
    pub affiliate_id: u64,
    /// Offer ID.
    pub offer_id: u64,
    /// Name.
    pub name: String,
    /// Pixel code.
    pub code: String,
    /// `javascript`, `iframe` or `image`.
    pub code_type: String,
    /// `1` to activate the pixel.
    pub is_active: Option<u8>,
    /// Moderation status.
    pub moderation_status: Option<u8>,
}

impl ToParams for AdminPixelCreateOpts {}

/// Options for updating a pixel.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PixelUpdateOpts {
    /// Name.
    pub name: Option<String>,
    /// Pixel code.
    pub code: Option<String>,
    /// `javascript`, `iframe` or `image`.
    pub code_type: Option<String>,
    /// `1` to activate the pixel; admin only.
    pub is_active: Option<u8>,
    /// Moderation status; admin only.
    pub moderation_status: Option<u8>,
}

impl ToParams for PixelUpdateOpts {}

/// Options for listing smartlink categories.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SmartLinkCategoryListOpts {
    /// Category IDs.
    pub id: Vec<String>,
    /// Name filter; admin only.
    pub name: Option<String>,
}

impl ToParams for SmartLinkCategoryListOpts {}

/// Options for creating or updating a smartlink category.
///
/// `name` is required on create.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SmartLinkCategoryOpts {
    /// Name.
    pub name: Option<String>,
    /// Tracking domain ID.
    pub domain_id: Option<u64>,
    /// Description.
    pub description: Option<String>,
}

impl ToParams for SmartLinkCategoryOpts {}

/// Reference data and miscellaneous endpoints of the admin API.
#[derive(Debug, Clone, Copy)]
pub struct AdminOtherService<'a> {
    client: &'a AffiseClient,
}

impl<'a> AdminOtherService<'a> {
    pub(crate) const fn new(client: &'a AffiseClient) -> Self {
        Self { client }
    }

    /// Lists cities.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_cities(&self, opts: &CityListOpts) -> Result<(Vec<City>, Response), ClientError> {
        let (body, response): (CitiesResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.1/cities", Audience::Admin, opts)
            .await?;
        Ok((body.cities, response))
    }

    /// Lists device types.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_devices(&self) -> Result<(Vec<String>, Response), ClientError> {
        let (body, response): (TypesResponse, _) = self
            .client
            .fetch(Method::GET, "/3.1/devices", Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.types, response))
    }

    /// Lists browsers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_browsers(&self) -> Result<(Vec<String>, Response), ClientError> {
        let (body, response): (BrowsersResponse, _) = self
            .client
            .fetch(Method::GET, "/3.1/browsers", Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.browsers, response))
    }

    /// Lists exchange rates keyed by currency code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_currencies(
        &self,
        opts: &CurrencyListOpts,
    ) -> Result<(HashMap<String, Decimal>, Response), ClientError> {
        let (body, response): (QuotesResponse<HashMap<String, Decimal>>, _) =
            self.currencies(opts, false).await?;
        Ok((body.quotes, response))
    }

    /// Lists currencies with their platform settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_currencies_extended(
        &self,
        opts: &CurrencyListOpts,
    ) -> Result<(Vec<ExtendedCurrency>, Response), ClientError> {
        let (body, response): (QuotesResponse<Vec<ExtendedCurrency>>, _) =
            self.currencies(opts, true).await?;
        Ok((body.quotes, response))
    }

    async fn currencies<T: serde::de::DeserializeOwned>(
        &self,
        opts: &CurrencyListOpts,
        extended: bool,
    ) -> Result<(T, Response), ClientError> {
        let mut params = self.client.encode(opts)?;
        params.set("extended", if extended { "1" } else { "0" });
        self.client
            .fetch(Method::GET, "/3.0/admin/currency", Audience::Admin, Payload::Query(params))
            .await
    }

    /// Lists payment systems.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_payment_systems(&self) -> Result<(Vec<PaymentSystem>, Response), ClientError> {
        let (body, response): (PaymentSystemsResponse, _) = self
            .client
            .fetch(Method::GET, "/3.0/admin/payment_systems", Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.payment_systems, response))
    }

    /// Lists affiliate custom fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_custom_fields(&self) -> Result<(Vec<CustomField>, Response), ClientError> {
        let (body, response): (FieldsResponse, _) = self
            .client
            .fetch(Method::GET, "/3.0/admin/custom_fields", Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.fields, response))
    }

    /// Lists tracking domains.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_domains(&self) -> Result<(Vec<Domain>, Response), ClientError> {
        let (body, response): (DomainsResponse, _) = self
            .client
            .fetch(Method::GET, "/3.0/admin/domains", Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.domains, response))
    }

    /// Gets a ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn get_ticket(&self, id: &str) -> Result<(Ticket, Response), ClientError> {
        let path = format!("/3.0/admin/ticket/{id}");
        let (body, response): (TicketResponse, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.ticket, response))
    }

    /// Lists tickets.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_tickets(&self, opts: &TicketListOpts) -> Result<(Vec<Ticket>, Response), ClientError> {
        let (body, response): (TicketsResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.0/admin/tickets", Audience::Admin, opts)
            .await?;
        Ok((body.tickets, response))
    }

    /// Approves or rejects an offer access ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn approve_ticket(
        &self,
        id: &str,
        opts: &TicketDecisionOpts,
    ) -> Result<Response, ClientError> {
        let path = format!("/3.0/admin/ticket/{id}/offer");
        let params = self.client.encode(opts)?;
        self.client
            .send(Method::POST, &path, Audience::Admin, Payload::Form(params))
            .await
    }

    /// Lists the pixels of an affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_pixels(&self, affiliate_id: u64) -> Result<(Vec<Pixel>, Response), ClientError> {
        let path = format!("/3.0/partner/pixels/{affiliate_id}");
        let (body, response): (PixelsResponse, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.pixel, response))
    }

    /// Creates a pixel for an affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn create_pixel(
        &self,
        opts: &AdminPixelCreateOpts,
    ) -> Result<(Pixel, Response), ClientError> {
        let (body, response): (PixelResponse, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/partner/pixel", Audience::Admin, opts)
            .await?;
        Ok((body.pixel, response))
    }

    /// Updates a pixel.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn update_pixel(
        &self,
        id: u64,
        opts: &PixelUpdateOpts,
    ) -> Result<(Pixel, Response), ClientError> {
        let path = format!("/3.0/partner/pixel/{id}");
        let (body, response): (PixelResponse, _) = self
            .client
            .fetch_opts(Method::POST, &path, Audience::Admin, opts)
            .await?;
        Ok((body.pixel, response))
    }

    /// Deletes a pixel and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn delete_pixel(&self, id: u64) -> Result<(Pixel, Response), ClientError> {
        let path = format!("/3.0/partner/pixel/{id}/remove");
        let (body, response): (PixelResponse, _) = self
            .client
            .fetch(Method::DELETE, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.pixel, response))
    }

    /// Lists smartlink categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_smartlink_categories(
        &self,
        opts: &SmartLinkCategoryListOpts,
    ) -> Result<(Vec<SmartLinkCategory>, Response), ClientError> {
        let (body, response): (DataResponse<Vec<SmartLinkCategory>>, _) = self
            .client
            .fetch_opts(Method::GET, "/3.0/admin/smartlink/categories", Audience::Admin, opts)
            .await?;
        Ok((body.data, response))
    }

    /// Creates a smartlink category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn create_smartlink_category(
        &self,
        opts: &SmartLinkCategoryOpts,
    ) -> Result<(SmartLinkCategory, Response), ClientError> {
        let (body, response): (DataResponse<SmartLinkCategory>, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/admin/smartlink/category", Audience::Admin, opts)
            .await?;
        Ok((body.data, response))
    }

    /// Updates a smartlink category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn update_smartlink_category(
        &self,
        id: &str,
        opts: &SmartLinkCategoryOpts,
    ) -> Result<(SmartLinkCategory, Response), ClientError> {
        let path = format!("/3.0/admin/smartlink/category/{id}");
        let (body, response): (DataResponse<SmartLinkCategory>, _) = self
            .client
            .fetch_opts(Method::POST, &path, Audience::Admin, opts)
            .await?;
        Ok((body.data, response))
    }

    /// Deletes a smartlink category and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn delete_smartlink_category(
        &self,
        id: &str,
    ) -> Result<(SmartLinkCategory, Response), ClientError> {
        let path = format!("/3.0/admin/smartlink/category/{id}/remove");
        let (body, response): (DataResponse<SmartLinkCategory>, _) = self
            .client
            .fetch(Method::POST, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.data, response))
    }

    /// Counts the offers of a smartlink category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn smartlink_offers_count(&self, id: &str) -> Result<(u64, Response), ClientError> {
        let path = format!("/3.0/admin/smartlink/category/{id}/offers-count");
        let (body, response): (DataResponse<OffersCount>, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.data.count, response))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::services::test_support::client;

    #[test]
    fn test_city_opts_comma_joined() {
        let opts = CityListOpts {
            q: Some("Ber".to_string()),
            code: vec![1, 2],
            country: vec!["DE".to_string(), "UA".to_string()],
        };
        let request = client()
            .new_request_opts(Method::GET, "/3.1/cities", Audience::Admin, &opts)
            .expect("request");
        assert_eq!(
            request.url().query(),
            Some("code=1%2C2&country=DE%2CUA&q=Ber")
        );
    }

    #[test]
    fn test_city_opts_omit_empty_lists() {
        let params = client().encode(&CityListOpts::default()).expect("encode");
        assert!(params.is_empty());
    }

    #[test]
    fn test_ticket_decision_renamed() {
        let opts = TicketDecisionOpts {
            action: Some("approve".to_string()),
        };
        let params = client().encode(&opts).expect("encode");
        assert_eq!(params.get("do"), Some("approve"));
    }

    #[test]
    fn test_quotes_plain_and_extended() {
        let plain: QuotesResponse<HashMap<String, Decimal>> =
            serde_json::from_str(r#"{"status":1,"quotes":{"EUR":"1.08","RUB":0.011}}"#)
                .expect("plain");
        assert_eq!(plain.quotes["EUR"], Decimal::new(108, 2));

        let extended: QuotesResponse<Vec<ExtendedCurrency>> =
            serde_json::from_str(r#"{"status":1,"quotes":[{"_id":1,"code":"USD","rate":1}]}"#)
                .expect("extended");
        assert_eq!(extended.quotes[0].code, "USD");
    }

    #[test]
    fn test_pixels_keyed_by_id() {
        let body: PixelsResponse = serde_json::from_str(
            r#"{"status":1,"pixel":{"12":{"id":12,"pid":"610"},"9":{"id":9,"pid":610}}}"#,
        )
        .expect("pixels");
        let ids: Vec<u64> = body.pixel.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![12, 9]);
    }
}
