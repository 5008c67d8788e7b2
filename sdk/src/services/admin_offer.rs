//! Offer management (admin API).

mod nested;

use std::collections::BTreeMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{AffiseClient, Audience, ClientError, Payload, Response};
use crate::encoding::{EncodeError, EncodedParams, ParamEncoder, ToParams};
use crate::types::{Category, Offer, Source};

pub use nested::{
    CapOpts, CommissionTierOpts, IspRestrictionOpts, LandingOpts, OfferNestedOpts,
    OsRestrictionOpts, OsTargeting, PaymentOpts, TargetingGroup, UrlWeight,
};

#[derive(Debug, Deserialize)]
struct CountResponse {
    #[serde(default)]
    count: u64,
}

#[derive(Debug, Deserialize)]
struct OfferResponse {
    #[serde(default)]
    offer: Offer,
}

#[derive(Debug, Deserialize)]
struct SourcesResponse {
    #[serde(default)]
    sources: Vec<Source>,
}

#[derive(Debug, Deserialize)]
struct SourceResponse {
    #[serde(default)]
    source: Source,
}

#[derive(Debug, Deserialize)]
struct CategoryResponse {
    #[serde(default)]
    category: Category,
}

#[derive(Debug, Deserialize)]
struct RemovedResponse {
    #[serde(default)]
    removed: Vec<u64>,
}

/// Flat offer settings shared by create and update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OfferSettings {
    /// Cross postback URL.
    pub cross_postback_url: Option<String>,
    /// Macro URL.
    pub macro_url: Option<String>,
    /// Preview URL.
    pub url_preview: Option<String>,
    /// Trafficback URL.
    pub trafficback_url: Option<String>,
    /// Tracking domain ID.
    pub domain_url: Option<u64>,
    /// Stop date.
    #[serde(rename = "stopDate")]
    pub stop_date: Option<String>,
    /// Creative files.
    #[serde(rename = "creativeFiles")]
    pub creative_files: Vec<String>,
    /// Creative URLs.
    #[serde(rename = "creativeUrls")]
    pub creative_urls: Vec<String>,
    /// Creative download links.
    #[serde(rename = "creativeDownloads")]
    pub creative_downloads: Vec<String>,
    /// Source IDs.
    pub sources: Vec<String>,
    /// Logo.
    pub logo: Option<String>,
    /// `active`, `stopped` or `suspended`.
    pub status: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// `public`, `protected` or `private`.
    pub privacy: Option<String>,
    /// `1` to mark the offer as top.
    pub is_top: Option<u8>,
    /// `1` for a CPI offer.
    pub is_cpi: Option<u8>,
    /// Cap usage percentage that triggers a notice.
    pub notice_percent_overcap: Option<u32>,
    /// `1` to restrict traffic to the payment countries.
    pub strictly_country: Option<u8>,
    /// Allowed connection type.
    pub strictly_connection_type: Option<String>,
    /// Allowed operating systems.
    pub strictly_os: Vec<String>,
    /// Allowed devices.
    pub strictly_devices: Vec<String>,
    /// Allowed device brands.
    pub strictly_brands: Vec<String>,
    /// Conversion statuses counted by caps.
    pub caps_status: Vec<String>,
    /// Timezone of caps.
    pub caps_timezone: Option<String>,
    /// `1` to enable commission tiers.
    pub enabled_commission_tiers: Option<u8>,
    /// Hold period in days.
    pub hold_period: Option<u32>,
    /// Category IDs.
    pub categories: Vec<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Allowed IPs.
    pub allowed_ip: Option<String>,
    /// Disallowed IPs.
    pub disallowed_ip: Option<String>,
    /// `1` to allow deeplinks.
    pub allow_deeplink: Option<u8>,
    /// `1` to hide the referer.
    pub hide_referer: Option<u8>,
    /// Redirect type.
    pub redirect_type: Option<String>,
    /// Start time.
    pub start_at: Option<String>,
    /// `1` to notify affiliates.
    pub send_emails: Option<u8>,
    /// `1` to redirect traffic over cap.
    pub is_redirect_overcap: Option<u8>,
    /// `1` to hide payments from affiliates.
    pub hide_payments: Option<u8>,
    /// Click session lifetime.
    pub click_session: Option<String>,
    /// Minimal click session lifetime.
    pub minimal_click_session: Option<String>,
    /// Comma separated sub1 values.
    pub sub_account_1: Option<String>,
    /// Comma separated sub2 values.
    pub sub_account_2: Option<String>,
    /// `1` to block the sub1 values.
    pub sub_account_1_except: Option<u8>,
    /// `1` to block the sub2 values.
    pub sub_account_2_except: Option<u8>,
    /// Smartlink category IDs.
    pub smartlink_categories: Vec<String>,
    /// `1` to accept unique IPs only.
    #[serde(rename = "uniqIpOnly")]
    pub uniq_ip_only: Option<u8>,
    /// `1` to reject conversions from repeated IPs.
    #[serde(rename = "rejectNotUniqIp")]
    pub reject_not_uniq_ip: Option<u8>,
    /// Allowed ISPs.
    pub strictly_isp: Vec<String>,
    /// External offer ID.
    pub external_offer_id: Option<String>,
    /// Bundle ID.
    pub bundle_id: Option<String>,
    /// Note for affiliates.
    pub note_aff: Option<String>,
    /// Note for sales.
    pub note_sales: Option<String>,
    /// `1` to hide caps from affiliates.
    pub hide_caps: Option<u8>,
    /// `1` to search for empty subs.
    pub search_empty_sub: Option<u8>,
    /// Goal receiving conversions over cap.
    pub caps_goal_overcap: Option<String>,
    /// `1` to allow impressions.
    pub allow_impressions: Option<u8>,
    /// Impressions URL.
    pub impressions_url: Option<String>,
    /// `true` or `false`.
    pub consider_personal_targeting_only: Option<String>,
}

/// Options for [`AdminOfferService::create`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct OfferCreateOpts {
    /// Title.
    pub title: String,
    /// Advertiser ID.
    pub advertiser: String,
    /// Tracking URL.
    pub url: String,
    /// Flat settings.
    #[serde(flatten)]
    pub settings: OfferSettings,
    /// Bracketed settings.
    #[serde(skip)]
    pub nested: OfferNestedOpts,
}

impl ToParams for OfferCreateOpts {
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        Ok(encoder.encode(self)?.merged(self.nested.to_params(encoder)?))
    }
}

/// Options for [`AdminOfferService::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct OfferUpdateOpts {
    /// Title.
    pub title: Option<String>,
    /// Advertiser ID.
    pub advertiser: Option<String>,
    /// Tracking URL.
    pub url: Option<String>,
    /// Flat settings.
    #[serde(flatten)]
    pub settings: OfferSettings,
    /// Bracketed settings.
    #[serde(skip)]
    pub nested: OfferNestedOpts,
}

impl ToParams for OfferUpdateOpts {
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        Ok(encoder.encode(self)?.merged(self.nested.to_params(encoder)?))
    }
}

fn indexed_ids(params: &mut EncodedParams, alias: &str, ids: &[u64]) {
    for (i, id) in ids.iter().enumerate() {
        params.set(format!("{alias}[{i}]"), id.to_string());
    }
}

/// Offer IDs sent as `offer_id[i]`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OfferIdsOpts {
    /// Offer IDs.
    #[serde(skip)]
    pub offer_id: Vec<u64>,
}

impl ToParams for OfferIdsOpts {
    fn to_params(&self, _: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        let mut params = EncodedParams::new();
        indexed_ids(&mut params, "offer_id", &self.offer_id);
        Ok(params)
    }
}

/// Source titles keyed by language code, sent as `title_lang[xx]`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceOpts {
    /// Titles keyed by language code.
    #[serde(skip)]
    pub title_lang: BTreeMap<String, String>,
}

impl ToParams for SourceOpts {
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        encoder.encode_map("title_lang", &self.title_lang)
    }
}

/// Options for creating or renaming a category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryOpts {
    /// Title.
    pub title: String,
}

impl ToParams for CategoryOpts {}

/// Options for connecting an affiliate to offers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OfferAffiliateOpts {
    /// Affiliate ID.
    #[serde(rename = "pid")]
    pub affiliate_id: u64,
    /// `1` to notify the affiliate. Always sent.
    pub notice: u8,
    /// Offer IDs.
    #[serde(skip)]
    pub offer_id: Vec<u64>,
}

impl ToParams for OfferAffiliateOpts {
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        let mut params = encoder.encode(self)?;
        indexed_ids(&mut params, "offer_id", &self.offer_id);
        Ok(params)
    }
}

/// Options for [`AdminOfferService::mass_update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct OfferMassUpdateOpts {
    /// Offer IDs.
    #[serde(skip)]
    pub offer_id: Vec<u64>,
    /// New status.
    pub status: Option<String>,
    /// New privacy.
    pub privacy: Option<String>,
}

impl ToParams for OfferMassUpdateOpts {
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        let mut params = encoder.encode(self)?;
        indexed_ids(&mut params, "offer_id", &self.offer_id);
        Ok(params)
    }
}

/// Creative IDs sent as `creatives[i]`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RemoveCreativesOpts {
    /// Creative IDs.
    #[serde(skip)]
    pub creatives: Vec<u64>,
}

impl ToParams for RemoveCreativesOpts {
    fn to_params(&self, _: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        let mut params = EncodedParams::new();
        indexed_ids(&mut params, "creatives", &self.creatives);
        Ok(params)
    }
}

/// Offer endpoints of the admin API.
#[derive(Debug, Clone, Copy)]
pub struct AdminOfferService<'a> {
    client: &'a AffiseClient,
}

impl<'a> AdminOfferService<'a> {
    pub(crate) const fn new(client: &'a AffiseClient) -> Self {
        Self { client }
    }

    /// Gets the number of active offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn count(&self) -> Result<(u64, Response), ClientError> {
        let (body, response): (CountResponse, _) = self
            .client
            .fetch(Method::GET, "/3.0/offers/count", Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.count, response))
    }

    /// Creates an offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn create(&self, opts: &OfferCreateOpts) -> Result<(Offer, Response), ClientError> {
        let (body, response): (OfferResponse, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/admin/offer", Audience::Admin, opts)
            .await?;
        Ok((body.offer, response))
    }

    /// Updates an offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn update(
        &self,
        id: u64,
        opts: &OfferUpdateOpts,
    ) -> Result<(Offer, Response), ClientError> {
        let path = format!("/3.0/admin/offer/{id}");
        let (body, response): (OfferResponse, _) = self
            .client
            .fetch_opts(Method::POST, &path, Audience::Admin, opts)
            .await?;
        Ok((body.offer, response))
    }

    /// Deletes offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn delete(&self, opts: &OfferIdsOpts) -> Result<Response, ClientError> {
        self.post_params("/3.0/admin/offer/delete", opts).await
    }

    /// Lists traffic sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_sources(&self) -> Result<(Vec<Source>, Response), ClientError> {
        let (body, response): (SourcesResponse, _) = self
            .client
            .fetch(Method::GET, "/3.0/admin/offer/sources", Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.sources, response))
    }

    /// Creates a traffic source.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn create_source(&self, opts: &SourceOpts) -> Result<(Source, Response), ClientError> {
        let (body, response): (SourceResponse, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/admin/offer/source", Audience::Admin, opts)
            .await?;
        Ok((body.source, response))
    }

    /// Updates a traffic source.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn update_source(
        &self,
        id: &str,
        opts: &SourceOpts,
    ) -> Result<(Source, Response), ClientError> {
        let path = format!("/3.0/admin/offer/source/{id}");
        let (body, response): (SourceResponse, _) = self
            .client
            .fetch_opts(Method::POST, &path, Audience::Admin, opts)
            .await?;
        Ok((body.source, response))
    }

    /// Deletes a traffic source and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn delete_source(&self, id: &str) -> Result<(Source, Response), ClientError> {
        let path = format!("/3.0/admin/offer/source/{id}");
        let (body, response): (SourceResponse, _) = self
            .client
            .fetch(Method::DELETE, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.source, response))
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn create_category(
        &self,
        opts: &CategoryOpts,
    ) -> Result<(Category, Response), ClientError> {
        let (body, response): (CategoryResponse, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/admin/category", Audience::Admin, opts)
            .await?;
        Ok((body.category, response))
    }

    /// Renames a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn update_category(
        &self,
        id: &str,
        opts: &CategoryOpts,
    ) -> Result<(Category, Response), ClientError> {
        let path = format!("/3.0/admin/category/{id}");
        let (body, response): (CategoryResponse, _) = self
            .client
            .fetch_opts(Method::POST, &path, Audience::Admin, opts)
            .await?;
        Ok((body.category, response))
    }

    /// Connects an affiliate to offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn enable_affiliate(&self, opts: &OfferAffiliateOpts) -> Result<Response, ClientError> {
        self.post_params("/3.0/offer/enable-affiliate", opts).await
    }

    /// Disconnects an affiliate from offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn disable_affiliate(&self, opts: &OfferAffiliateOpts) -> Result<Response, ClientError> {
        self.post_params("/3.0/offer/disable-affiliate", opts).await
    }

    /// Changes status or privacy of several offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn mass_update(&self, opts: &OfferMassUpdateOpts) -> Result<Response, ClientError> {
        self.post_params("/3.0/admin/offer/mass-update", opts).await
    }

    /// Disconnects every affiliate from a private or protected offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn disable_affiliates(&self, offer_id: &str) -> Result<Response, ClientError> {
        let path = format!("/3.0/admin/offer/{offer_id}/disable-affiliates");
        self.client
            .send(Method::POST, &path, Audience::Admin, Payload::Empty)
            .await
    }

    /// Disconnects every private or protected offer from an affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn disable_offers(&self, affiliate_id: u64) -> Result<Response, ClientError> {
        let path = format!("/3.0/admin/affiliate/{affiliate_id}/disable-offers");
        self.client
            .send(Method::POST, &path, Audience::Admin, Payload::Empty)
            .await
    }

    /// Removes creatives from an offer and returns the removed IDs.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn remove_creatives(
        &self,
        offer_id: &str,
        opts: &RemoveCreativesOpts,
    ) -> Result<(Vec<u64>, Response), ClientError> {
        let path = format!("/3.0/admin/offer/{offer_id}/remove-creative");
        let (body, response): (RemovedResponse, _) = self
            .client
            .fetch_opts(Method::DELETE, &path, Audience::Admin, opts)
            .await?;
        Ok((body.removed, response))
    }

    async fn post_params<O: ToParams>(&self, path: &str, opts: &O) -> Result<Response, ClientError> {
        let params = self.client.encode(opts)?;
        self.client
            .send(Method::POST, path, Audience::Admin, Payload::Form(params))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::services::test_support::{client, form_body};

    #[test]
    fn test_create_opts_merges_flat_and_nested() {
        let opts = OfferCreateOpts {
            title: "Offer".to_string(),
            advertiser: "5a".to_string(),
            url: "https://example.com".to_string(),
            settings: OfferSettings {
                stop_date: Some("2025-01-01".to_string()),
                uniq_ip_only: Some(1),
                ..Default::default()
            },
            nested: OfferNestedOpts {
                caps: vec![CapOpts {
                    value: Some(Decimal::from(10)),
                    ..Default::default()
                }],
                ..Default::default()
            },
        };
        let params = client().encode(&opts).expect("encode");
        assert_eq!(params.get("title"), Some("Offer"));
        assert_eq!(params.get("stopDate"), Some("2025-01-01"));
        assert_eq!(params.get("uniqIpOnly"), Some("1"));
        assert_eq!(params.get("caps[0][value]"), Some("10"));
        assert!(!params.contains_key("nested"));
        assert!(!params.contains_key("settings"));
    }

    #[test]
    fn test_update_opts_only_set_fields() {
        let opts = OfferUpdateOpts {
            settings: OfferSettings {
                status: Some("active".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let params = client().encode(&opts).expect("encode");
        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, vec!["status"]);
    }

    #[test]
    fn test_affiliate_opts_indexed_offers() {
        let opts = OfferAffiliateOpts {
            affiliate_id: 610,
            notice: 0,
            offer_id: vec![936, 937],
        };
        let request = client()
            .new_request_opts(Method::POST, "/3.0/offer/enable-affiliate", Audience::Admin, &opts)
            .expect("request");
        assert_eq!(
            form_body(&request),
            "notice=0&offer_id%5B0%5D=936&offer_id%5B1%5D=937&pid=610"
        );
    }

    #[test]
    fn test_mass_update_opts() {
        let opts = OfferMassUpdateOpts {
            offer_id: vec![1],
            privacy: Some("private".to_string()),
            ..Default::default()
        };
        let params = client().encode(&opts).expect("encode");
        assert_eq!(params.get("offer_id[0]"), Some("1"));
        assert_eq!(params.get("privacy"), Some("private"));
        assert!(!params.contains_key("status"));
    }

    #[test]
    fn test_remove_creatives_in_query() {
        let opts = RemoveCreativesOpts {
            creatives: vec![4, 5],
        };
        let request = client()
            .new_request_opts(
                Method::DELETE,
                "/3.0/admin/offer/936/remove-creative",
                Audience::Admin,
                &opts,
            )
            .expect("request");
        assert_eq!(
            request.url().query(),
            Some("creatives%5B0%5D=4&creatives%5B1%5D=5")
        );
    }

    #[test]
    fn test_source_opts_title_lang() {
        let mut title_lang = BTreeMap::new();
        title_lang.insert("en".to_string(), "Search".to_string());
        let params = client().encode(&SourceOpts { title_lang }).expect("encode");
        assert_eq!(params.get("title_lang[en]"), Some("Search"));
        assert_eq!(params.len(), 1);
    }
}
