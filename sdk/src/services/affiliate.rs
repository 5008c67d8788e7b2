//! Affiliate self-service endpoints (public API).
//!
//! Postback and pixel options are shared with the admin services, which
//! hit the same paths on the admin host.

use std::collections::BTreeMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{AffiseClient, Audience, ClientError, Payload, Response};
use crate::encoding::{EncodeError, EncodedParams, ParamEncoder, ToParams};
use crate::types::primitives::keyed_values;
use crate::types::reference::OffersCount;
use crate::types::{Affiliate, Balance, NewsItem, Offer, Pixel, Postback, SmartLinkCategory, User};

use super::admin_affiliate::{
    AffiliatePostbackOpts, PostbackEditOpts, PostbackIdsOpts, PostbackResponse, ReferralsResponse,
};
use super::admin_other::{
    DataResponse, PixelResponse, PixelUpdateOpts, PixelsResponse, SmartLinkCategoryListOpts,
};

#[derive(Debug, Deserialize)]
struct MeResponse {
    #[serde(default)]
    user: User,
}

#[derive(Debug, Deserialize)]
struct OffersResponse {
    #[serde(default)]
    offers: Vec<Offer>,
}

#[derive(Debug, Deserialize)]
struct NewsListResponse {
    /// Keyed by news ID, which each value repeats in `_id`.
    #[serde(default, deserialize_with = "keyed_values")]
    items: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    news: NewsItem,
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    #[serde(default)]
    balance: Balance,
}

/// Options for [`AffiliateService::list_offers`] and
/// [`AffiliateService::list_live_offers`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct AffiliateOfferListOpts {
    /// Search by title and ID.
    pub q: Option<String>,
    /// String offer IDs.
    pub ids: Vec<String>,
    /// Numeric offer IDs.
    pub int_id: Vec<u64>,
    /// Country codes.
    pub countries: Vec<String>,
    /// Category IDs.
    pub categories: Vec<String>,
    /// Sort direction by field, sent as `sort[field]=asc|desc`. Fields are
    /// `id`, `title`, `cr` and `epc`.
    #[serde(skip)]
    pub sort: BTreeMap<String, String>,
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
}

impl ToParams for AffiliateOfferListOpts {
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        Ok(encoder.encode(self)?.merged(encoder.encode_map("sort", &self.sort)?))
    }
}

/// Options for [`AffiliateService::activate_offer`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct OfferActivationOpts {
    /// Offer ID.
    pub offer_id: u64,
    /// Request comment.
    pub comment: String,
}

impl ToParams for OfferActivationOpts {}

/// Options for [`AffiliateService::list_news`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewsListOpts {
    /// Limit of entities, at most 100.
    pub limit: Option<u32>,
    /// Offset.
    pub skip: Option<u32>,
    /// `1` for pinned news only, `0` for the rest.
    pub fixed: Option<u8>,
}

impl ToParams for NewsListOpts {}

/// Options for [`AffiliateService::create_pixel`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct PixelCreateOpts {
    /// Offer ID.
    pub offer_id: u64,
    /// Name.
    pub name: String,
    /// Pixel code.
    pub code: String,
    /// `javascript`, `iframe` or `image`.
    pub code_type: String,
}

impl ToParams for PixelCreateOpts {}

/// Endpoints available to an affiliate API key.
#[derive(Debug, Clone, Copy)]
pub struct AffiliateService<'a> {
    client: &'a AffiseClient,
}

impl<'a> AffiliateService<'a> {
    pub(crate) const fn new(client: &'a AffiseClient) -> Self {
        Self { client }
    }

    /// Gets the account the API key belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn me(&self) -> Result<(User, Response), ClientError> {
        let (body, response): (MeResponse, _) = self
            .client
            .fetch(Method::GET, "/3.1/partner/me", Audience::Public, Payload::Empty)
            .await?;
        Ok((body.user, response))
    }

    /// Lists offers available to the affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_offers(
        &self,
        opts: &AffiliateOfferListOpts,
    ) -> Result<(Vec<Offer>, Response), ClientError> {
        self.offers("/3.0/partner/offers", opts).await
    }

    /// Lists live offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_live_offers(
        &self,
        opts: &AffiliateOfferListOpts,
    ) -> Result<(Vec<Offer>, Response), ClientError> {
        self.offers("/3.0/partner/live-offers", opts).await
    }

    async fn offers(
        &self,
        path: &str,
        opts: &AffiliateOfferListOpts,
    ) -> Result<(Vec<Offer>, Response), ClientError> {
        let (body, response): (OffersResponse, _) = self
            .client
            .fetch_opts(Method::GET, path, Audience::Public, opts)
            .await?;
        Ok((body.offers, response))
    }

    /// Requests access to an offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn activate_offer(&self, opts: &OfferActivationOpts) -> Result<Response, ClientError> {
        let params = self.client.encode(opts)?;
        self.client
            .send(
                Method::POST,
                "/3.0/partner/activation/offer",
                Audience::Public,
                Payload::Form(params),
            )
            .await
    }

    /// Adds a postback.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn create_postback(
        &self,
        opts: &AffiliatePostbackOpts,
    ) -> Result<(Postback, Response), ClientError> {
        let (body, response): (PostbackResponse, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/partner/postback", Audience::Public, opts)
            .await?;
        Ok((body.postback, response))
    }

    /// Edits a postback.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn update_postback(
        &self,
        id: u64,
        opts: &PostbackEditOpts,
    ) -> Result<(Postback, Response), ClientError> {
        let path = format!("/3.0/partner/postback/{id}");
        let (body, response): (PostbackResponse, _) = self
            .client
            .fetch_opts(Method::POST, &path, Audience::Public, opts)
            .await?;
        Ok((body.postback, response))
    }

    /// Deletes a postback and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn delete_postback(&self, id: u64) -> Result<(Postback, Response), ClientError> {
        let path = format!("/3.0/partner/postback/{id}/remove");
        let (body, response): (PostbackResponse, _) = self
            .client
            .fetch(Method::DELETE, &path, Audience::Public, Payload::Empty)
            .await?;
        Ok((body.postback, response))
    }

    /// Deletes every postback of the given affiliates.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn delete_postbacks_by_affiliates(
        &self,
        opts: &PostbackIdsOpts,
    ) -> Result<Response, ClientError> {
        let params = self.client.encode(opts)?;
        self.client
            .send(
                Method::DELETE,
                "/3.0/partner/postbacks/by-affiliates",
                Audience::Public,
                Payload::Query(params),
            )
            .await
    }

    /// Deletes every postback of the given offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn delete_postbacks_by_offers(
        &self,
        opts: &PostbackIdsOpts,
    ) -> Result<Response, ClientError> {
        let params = self.client.encode(opts)?;
        self.client
            .send(
                Method::DELETE,
                "/3.0/partner/postbacks/by-offers",
                Audience::Public,
                Payload::Query(params),
            )
            .await
    }

    /// Lists news in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_news(&self, opts: &NewsListOpts) -> Result<(Vec<NewsItem>, Response), ClientError> {
        let (body, response): (NewsListResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.0/news", Audience::Public, opts)
            .await?;
        Ok((body.items, response))
    }

    /// Gets a news item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn get_news(&self, id: &str) -> Result<(NewsItem, Response), ClientError> {
        let path = format!("/3.0/news/{id}");
        let (body, response): (NewsResponse, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Public, Payload::Empty)
            .await?;
        Ok((body.news, response))
    }

    /// Lists the affiliate's pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_pixels(&self) -> Result<(Vec<Pixel>, Response), ClientError> {
        let (body, response): (PixelsResponse, _) = self
            .client
            .fetch(Method::GET, "/3.0/partner/pixels", Audience::Public, Payload::Empty)
            .await?;
        Ok((body.pixel, response))
    }

    /// Creates a pixel.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn create_pixel(&self, opts: &PixelCreateOpts) -> Result<(Pixel, Response), ClientError> {
        let (body, response): (PixelResponse, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/partner/pixel", Audience::Public, opts)
            .await?;
        Ok((body.pixel, response))
    }

    /// Updates a pixel.
    ///
    /// Moderation fields of [`PixelUpdateOpts`] are ignored for affiliates.
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
            .fetch_opts(Method::POST, &path, Audience::Public, opts)
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
            .fetch(Method::DELETE, &path, Audience::Public, Payload::Empty)
            .await?;
        Ok((body.pixel, response))
    }

    /// Gets the balance per currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn balance(&self) -> Result<(Balance, Response), ClientError> {
        let (body, response): (BalanceResponse, _) = self
            .client
            .fetch(Method::GET, "/3.0/balance", Audience::Public, Payload::Empty)
            .await?;
        Ok((body.balance, response))
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
            .fetch_opts(
                Method::GET,
                "/3.0/partner/smartlink/categories",
                Audience::Public,
                opts,
            )
            .await?;
        Ok((body.data, response))
    }

    /// Counts the offers of a smartlink category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn smartlink_offers_count(&self, id: &str) -> Result<(u64, Response), ClientError> {
        let path = format!("/3.0/partner/smartlink/category/{id}/offers-count");
        let (body, response): (DataResponse<OffersCount>, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Public, Payload::Empty)
            .await?;
        Ok((body.data.count, response))
    }

    /// Lists the referrals of an affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn referrals(&self, affiliate_id: u64) -> Result<(Vec<Affiliate>, Response), ClientError> {
        let path = format!("/3.0/admin/partner/{affiliate_id}/referrals");
        let (body, response): (ReferralsResponse, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Public, Payload::Empty)
            .await?;
        Ok((body.referrals, response))
    }
}
