//! Advertiser management (admin API).

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{AffiseClient, Audience, ClientError, Payload, Response};
use crate::encoding::ToParams;
use crate::types::Advertiser;

#[derive(Debug, Deserialize)]
struct AdvertiserResponse {
    #[serde(default)]
    advertiser: Advertiser,
}

#[derive(Debug, Deserialize)]
struct AdvertisersResponse {
    #[serde(default)]
    advertisers: Vec<Advertiser>,
}

/// Options for [`AdminAdvertiserService::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdvertiserListOpts {
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
    /// Sort field: `_id`, `title` or `email`.
    pub order: Option<String>,
    /// `asc` or `desc`.
    #[serde(rename = "orderType")]
    pub order_type: Option<String>,
    /// Only advertisers updated since this date (`YYYY-MM-DD`).
    pub updated_at: Option<String>,
}

impl ToParams for AdvertiserListOpts {}

/// Options for [`AdminAdvertiserService::create`] and
/// [`AdminAdvertiserService::update`].
///
/// `title` is required on create.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdvertiserOpts {
    /// Company name.
    pub title: Option<String>,
    /// Contact person name.
    pub contact: Option<String>,
    /// IM or Skype.
    pub skype: Option<String>,
    /// Manager ID.
    pub manager: Option<String>,
    /// Site URL.
    pub url: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Allowed IPs, one address or range per line.
    pub allowed_ip: Option<String>,
    /// Note, applied on update only.
    pub note: Option<String>,
    /// Main address line.
    pub address_1: Option<String>,
    /// Additional address line.
    pub address_2: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Country in ISO format.
    pub country: Option<String>,
    /// Zip code.
    pub zip_code: Option<String>,
    /// VAT code.
    pub vat_code: Option<String>,
    /// Comma separated sub1 values.
    pub sub_account_1: Option<String>,
    /// Comma separated sub2 values.
    pub sub_account_2: Option<String>,
    /// `1` to block the sub1 values instead of allowing them.
    pub sub_account_1_except: Option<u8>,
    /// `1` to block the sub2 values instead of allowing them.
    pub sub_account_2_except: Option<u8>,
    /// `true` or `false`.
    pub consider_personal_targeting_only: Option<String>,
    /// Tags; on update they replace the previous ones.
    pub tags: Vec<String>,
}

impl ToParams for AdvertiserOpts {}

/// Options for connecting an affiliate to advertisers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdvertiserAffiliateOpts {
    /// Advertiser IDs.
    pub advertisers_id: Vec<String>,
    /// Affiliate ID.
    #[serde(rename = "pid")]
    pub affiliate_id: u64,
}

impl ToParams for AdvertiserAffiliateOpts {}

/// Advertiser endpoints of the admin API.
#[derive(Debug, Clone, Copy)]
pub struct AdminAdvertiserService<'a> {
    client: &'a AffiseClient,
}

impl<'a> AdminAdvertiserService<'a> {
    pub(crate) const fn new(client: &'a AffiseClient) -> Self {
        Self { client }
    }

    /// Gets an advertiser by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn get(&self, id: &str) -> Result<(Advertiser, Response), ClientError> {
        let path = format!("/3.0/admin/advertiser/{id}");
        let (body, response): (AdvertiserResponse, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.advertiser, response))
    }

    /// Lists advertisers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list(
        &self,
        opts: &AdvertiserListOpts,
    ) -> Result<(Vec<Advertiser>, Response), ClientError> {
        let (body, response): (AdvertisersResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.0/admin/advertisers", Audience::Admin, opts)
            .await?;
        Ok((body.advertisers, response))
    }

    /// Creates an advertiser.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn create(
        &self,
        opts: &AdvertiserOpts,
    ) -> Result<(Advertiser, Response), ClientError> {
        let (body, response): (AdvertiserResponse, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/admin/advertiser", Audience::Admin, opts)
            .await?;
        Ok((body.advertiser, response))
    }

    /// Updates an advertiser.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn update(
        &self,
        id: &str,
        opts: &AdvertiserOpts,
    ) -> Result<(Advertiser, Response), ClientError> {
        let path = format!("/3.0/admin/advertiser/{id}");
        let (body, response): (AdvertiserResponse, _) = self
            .client
            .fetch_opts(Method::POST, &path, Audience::Admin, opts)
            .await?;
        Ok((body.advertiser, response))
    }

    /// Sends the advertiser a new password by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn send_password(&self, id: &str) -> Result<Response, ClientError> {
        let path = format!("/3.0/admin/advertiser/{id}/sendpass");
        self.client
            .send(Method::POST, &path, Audience::Admin, Payload::Empty)
            .await
    }

    /// Connects an affiliate to advertisers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn enable_affiliate(
        &self,
        opts: &AdvertiserAffiliateOpts,
    ) -> Result<Response, ClientError> {
        self.toggle_affiliate("/3.0/admin/advertiser/enable-affiliate", opts)
            .await
    }

    /// Disconnects an affiliate from advertisers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn disable_affiliate(
        &self,
        opts: &AdvertiserAffiliateOpts,
    ) -> Result<Response, ClientError> {
        self.toggle_affiliate("/3.0/admin/advertiser/disable-affiliate", opts)
            .await
    }

    async fn toggle_affiliate(
        &self,
        path: &str,
        opts: &AdvertiserAffiliateOpts,
    ) -> Result<Response, ClientError> {
        let request = self
            .client
            .new_request_opts(Method::POST, path, Audience::Admin, opts)?;
        self.client.execute(request).await
    }
}
