//! Offer catalogue (public API).

use std::collections::BTreeMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{AffiseClient, Audience, ClientError, Payload, Response};
use crate::encoding::{EncodeError, EncodedParams, ParamEncoder, ToParams};
use crate::types::{Category, Offer};

#[derive(Debug, Deserialize)]
struct OffersResponse {
    #[serde(default)]
    offers: Vec<Offer>,
}

#[derive(Debug, Deserialize)]
struct OfferResponse {
    #[serde(default)]
    offer: Offer,
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    categories: Vec<Category>,
}

/// Options for [`OfferService::list`].
///
/// `status`, `advertiser` and `privacy` are only honoured for admin keys.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OfferListOpts {
    /// Search by title and ID.
    pub q: Option<String>,
    /// String offer IDs.
    pub ids: Vec<String>,
    /// Numeric offer IDs.
    pub int_id: Vec<u64>,
    /// Country codes.
    pub countries: Vec<String>,
    /// Platforms: `web`, `wp`, `ios`, `android`.
    pub os: Vec<String>,
    /// Category IDs.
    pub categories: Vec<String>,
    /// Sort direction by field, sent as `sort[field]=asc|desc`.
    #[serde(skip)]
    pub sort: BTreeMap<String, String>,
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
    /// `active`, `stopped` or `suspended`.
    pub status: Vec<String>,
    /// Advertiser IDs.
    pub advertiser: Vec<String>,
    /// Privacy levels: public `0`, premoderated `1`, private `2`.
    pub privacy: Vec<u8>,
    /// Only offers updated since this date (`YYYY-MM-DD`).
    pub updated_at: Option<String>,
    /// `1` for top offers only.
    pub is_top: Option<u8>,
    /// Bundle ID.
    pub bundle_id: Option<String>,
}

impl ToParams for OfferListOpts {
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        Ok(encoder.encode(self)?.merged(encoder.encode_map("sort", &self.sort)?))
    }
}

/// Options for [`OfferService::list_categories`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryListOpts {
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
}

impl ToParams for CategoryListOpts {}

/// Offer endpoints of the public API.
#[derive(Debug, Clone, Copy)]
pub struct OfferService<'a> {
    client: &'a AffiseClient,
}

impl<'a> OfferService<'a> {
    pub(crate) const fn new(client: &'a AffiseClient) -> Self {
        Self { client }
    }

    /// Lists offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list(&self, opts: &OfferListOpts) -> Result<(Vec<Offer>, Response), ClientError> {
        let (body, response): (OffersResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.0/offers", Audience::Public, opts)
            .await?;
        Ok((body.offers, response))
    }

    /// Gets an offer by its numeric ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn get(&self, id: u64) -> Result<(Offer, Response), ClientError> {
        let path = format!("/3.0/offer/{id}");
        let (body, response): (OfferResponse, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Public, Payload::Empty)
            .await?;
        Ok((body.offer, response))
    }

    /// Lists offer categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_categories(
        &self,
        opts: &CategoryListOpts,
    ) -> Result<(Vec<Category>, Response), ClientError> {
        let (body, response): (CategoriesResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.0/offer/categories", Audience::Public, opts)
            .await?;
        Ok((body.categories, response))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::services::test_support::client;

    #[test]
    fn test_list_opts_repeat_lists() {
        let opts = OfferListOpts {
            int_id: vec![1, 2],
            privacy: vec![0, 2],
            is_top: Some(1),
            ..Default::default()
        };
        let params = client().encode(&opts).expect("encode");
        assert_eq!(params.get_all("int_id"), ["1", "2"]);
        assert_eq!(params.get_all("privacy"), ["0", "2"]);
        assert_eq!(params.get("is_top"), Some("1"));
        assert!(!params.contains_key("q"));
        assert!(!params.contains_key("status"));
    }

    #[test]
    fn test_list_opts_sort_map() {
        let mut opts = OfferListOpts::default();
        opts.sort.insert("epc".to_string(), "desc".to_string());
        let params = client().encode(&opts).expect("encode");
        assert_eq!(params.get("sort[epc]"), Some("desc"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_get_targets_public_host() {
        let request = client()
            .new_request(Method::GET, "/3.0/offer/7", Audience::Public, Payload::Empty)
            .expect("request");
        assert_eq!(request.url().as_str(), "https://api.example.com/3.0/offer/7");
        assert_eq!(request.headers()["api-key"], "test-key");
    }
}
