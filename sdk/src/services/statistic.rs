//! Statistics and reports.
//!
//! Most reports share [`StatFilter`], which is sent as `filter[...]` keys.
//! The `getby*` reports only differ by their path and are reached through
//! [`StatisticService::get_by`] with a [`StatGrouping`].

use std::fmt;

use chrono::NaiveDate;
use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::client::{AffiseClient, Audience, ClientError, Payload, Response};
use crate::encoding::{comma_separated_ints, EncodeError, EncodedParams, ParamEncoder, ToParams};
use crate::types::{Click, Conversion, RefPayment, RetentionRate, Stat, StatCap, StatPostback, Sub, TimeToAction};

fn join_commas<S: Serializer>(values: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&values.join(","))
}

/// Filter shared by the aggregated reports.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatFilter {
    /// First day, `YYYY-MM-DD`.
    #[serde(rename = "filter[date_from]")]
    pub date_from: String,
    /// Last day, `YYYY-MM-DD`.
    #[serde(rename = "filter[date_to]")]
    pub date_to: String,
    /// Currency codes; all currencies when empty.
    #[serde(rename = "filter[currency]")]
    pub currency: Vec<String>,
    /// Advertiser IDs.
    #[serde(rename = "filter[advertiser]")]
    pub advertiser: Vec<String>,
    /// Offer IDs.
    #[serde(rename = "filter[offer]")]
    pub offer: Vec<u64>,
    /// Manager IDs.
    #[serde(rename = "filter[manager]")]
    pub manager: Vec<String>,
    /// Advertiser manager IDs.
    #[serde(rename = "filter[advertiser_manager_id]")]
    pub advertiser_manager_id: Vec<String>,
    /// Affiliate IDs; admin only.
    #[serde(rename = "filter[partner]")]
    pub partner: Vec<String>,
    /// Country codes.
    #[serde(rename = "filter[country]")]
    pub country: Vec<String>,
    /// Operating systems.
    #[serde(rename = "filter[os]")]
    pub os: Vec<String>,
    /// Goal.
    #[serde(rename = "filter[goal]")]
    pub goal: Vec<String>,
    /// Sub 1.
    #[serde(rename = "filter[sub1]")]
    pub sub1: Vec<String>,
    /// Sub 2.
    #[serde(rename = "filter[sub2]")]
    pub sub2: Vec<String>,
    /// Sub 3.
    #[serde(rename = "filter[sub3]")]
    pub sub3: Vec<String>,
    /// Sub 4.
    #[serde(rename = "filter[sub4]")]
    pub sub4: Vec<String>,
    /// Sub 5.
    #[serde(rename = "filter[sub5]")]
    pub sub5: Vec<String>,
    /// Sub 6.
    #[serde(rename = "filter[sub6]")]
    pub sub6: Vec<String>,
    /// Sub 7.
    #[serde(rename = "filter[sub7]")]
    pub sub7: Vec<String>,
    /// Sub 8.
    #[serde(rename = "filter[sub8]")]
    pub sub8: Vec<String>,
    /// Device types.
    #[serde(rename = "filter[device]")]
    pub device: Vec<String>,
    /// Smartlink category IDs, only with the `smart_id` slice.
    #[serde(rename = "filter[smart_id]")]
    pub smart_id: Vec<String>,
    /// `1` to drop rows without conversions.
    #[serde(rename = "filter[nonzero]")]
    pub nonzero: Option<u8>,
    /// Advertiser tags, sent comma separated.
    #[serde(
        rename = "filter[advertiser_tag]",
        serialize_with = "join_commas",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub advertiser_tag: Vec<String>,
    /// Affiliate tags, sent comma separated.
    #[serde(
        rename = "filter[affiliate_tag]",
        serialize_with = "join_commas",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub affiliate_tag: Vec<String>,
    /// Offer tags, sent comma separated.
    #[serde(
        rename = "filter[offer_tag]",
        serialize_with = "join_commas",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub offer_tag: Vec<String>,
}

impl StatFilter {
    /// Filter covering `date_from..=date_to`.
    #[must_use]
    pub fn between(date_from: impl Into<String>, date_to: impl Into<String>) -> Self {
        Self {
            date_from: date_from.into(),
            date_to: date_to.into(),
            ..Self::default()
        }
    }

    /// Same as [`between`](Self::between) with typed dates.
    #[must_use]
    pub fn between_dates(date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self::between(
            date_from.format("%Y-%m-%d").to_string(),
            date_to.format("%Y-%m-%d").to_string(),
        )
    }
}

/// Options for [`StatisticService::custom`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomStatOpts {
    /// Report filter.
    #[serde(flatten)]
    pub filter: StatFilter,
    /// Grouping slices, for example `day` or `offer`. At least one is required.
    pub slice: Vec<String>,
    /// Locale of city names: `en`, `ru` or `es`.
    pub locale: Option<String>,
    /// Conversion types to output.
    #[serde(rename = "conversionTypes")]
    pub conversion_types: Vec<String>,
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
    /// `asc` or `desc`.
    #[serde(rename = "orderType")]
    pub order_type: Option<String>,
    /// Fields to sort by.
    pub order: Vec<String>,
    /// Timezone name, for example `Europe/Berlin`.
    pub timezone: Option<String>,
}

impl ToParams for CustomStatOpts {}

/// Options for the [`StatGrouping`] reports.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedStatOpts {
    /// Report filter.
    #[serde(flatten)]
    pub filter: StatFilter,
    /// Locale of city names: `en`, `ru` or `es`.
    pub locale: Option<String>,
    /// Timezone name, for example `Europe/Berlin`.
    pub timezone: Option<String>,
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
    /// `asc` or `desc`.
    #[serde(rename = "orderType")]
    pub order_type: Option<String>,
}

impl ToParams for GroupedStatOpts {}

/// Grouping of the `getby*` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatGrouping {
    /// Day.
    Date,
    /// Hour.
    Hour,
    /// Sub values.
    Sub,
    /// Offer.
    Program,
    /// Advertiser.
    Advertiser,
    /// Advertiser manager.
    AccountManager,
    /// Affiliate manager.
    AffiliateManager,
    /// Affiliate.
    Partner,
    /// Affiliate and day.
    PartnerByDate,
    /// Country.
    Countries,
    /// Browser.
    Browsers,
    /// Browser version.
    BrowserVersions,
    /// Landing.
    Landing,
    /// Prelanding.
    Prelanding,
    /// Mobile carrier.
    MobileCarrier,
    /// Connection type.
    ConnectionType,
    /// Operating system.
    Os,
    /// OS version.
    OsVersions,
    /// Goal.
    Goal,
    /// City.
    Cities,
    /// Device type.
    Devices,
    /// Device model.
    DeviceModels,
    /// Trafficback reason.
    Trafficback,
}

impl StatGrouping {
    /// Every grouping, in documentation order.
    pub const ALL: [Self; 23] = [
        Self::Date,
        Self::Hour,
        Self::Sub,
        Self::Program,
        Self::Advertiser,
        Self::AccountManager,
        Self::AffiliateManager,
        Self::Partner,
        Self::PartnerByDate,
        Self::Countries,
        Self::Browsers,
        Self::BrowserVersions,
        Self::Landing,
        Self::Prelanding,
        Self::MobileCarrier,
        Self::ConnectionType,
        Self::Os,
        Self::OsVersions,
        Self::Goal,
        Self::Cities,
        Self::Devices,
        Self::DeviceModels,
        Self::Trafficback,
    ];

    /// Path segment following `getby`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Hour => "hour",
            Self::Sub => "sub",
            Self::Program => "program",
            Self::Advertiser => "advertiser",
            Self::AccountManager => "accountmanager",
            Self::AffiliateManager => "affiliatemanager",
            Self::Partner => "partner",
            Self::PartnerByDate => "partnerbydate",
            Self::Countries => "countries",
            Self::Browsers => "browsers",
            Self::BrowserVersions => "browsersversion",
            Self::Landing => "landing",
            Self::Prelanding => "prelanding",
            Self::MobileCarrier => "mobilecarrier",
            Self::ConnectionType => "connectiontype",
            Self::Os => "os",
            Self::OsVersions => "versions",
            Self::Goal => "goal",
            Self::Cities => "cities",
            Self::Devices => "devices",
            Self::DeviceModels => "devicemodels",
            Self::Trafficback => "trafficback",
        }
    }

    /// Report path.
    #[must_use]
    pub fn path(self) -> String {
        format!("/3.0/stats/getby{}", self.as_str())
    }

    /// Builds the request of this report without sending it.
    ///
    /// # Errors
    ///
    /// Returns an error if `opts` cannot be encoded or no public base URL is
    /// configured.
    pub fn request(
        self,
        client: &AffiseClient,
        opts: &GroupedStatOpts,
    ) -> Result<reqwest::Request, ClientError> {
        let params = client.encode(opts)?;
        client.new_request(Method::GET, &self.path(), Audience::Public, Payload::Query(params))
    }
}

impl fmt::Display for StatGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`StatisticService::conversions`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionListOpts {
    /// First day, `YYYY-MM-DD`; a week ago when absent.
    pub date_from: Option<String>,
    /// Last day, `YYYY-MM-DD`; today when absent.
    pub date_to: Option<String>,
    /// Only conversions updated since this day.
    pub update_from_date: Option<String>,
    /// Only conversions updated since this hour.
    pub update_from_hour: Option<u8>,
    /// Confirmed `1`, pending `2`, declined `3`, not found `4`, hold `5`.
    pub status: Vec<u8>,
    /// Offer IDs.
    pub offer: Vec<u64>,
    /// Advertiser IDs.
    pub advertiser: Vec<String>,
    /// Country codes.
    pub country: Vec<String>,
    /// Browser.
    pub browser: Option<String>,
    /// Conversion ID.
    pub action_id: Option<String>,
    /// Click ID.
    pub clickid: Option<String>,
    /// Operating systems.
    pub os: Option<String>,
    /// Goal.
    pub goal: Option<String>,
    /// `tablet`, `desktop` or `mobile`.
    pub device: Option<String>,
    /// Affiliate payout.
    pub payouts: Option<Decimal>,
    /// Currency ID.
    pub currency: Option<u64>,
    /// Hour, only for a one day period.
    pub hour: Option<u8>,
    /// Timezone name, for example `Europe/Berlin`.
    pub timezone: Option<String>,
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
    /// Sub ID 1.
    pub subid1: Option<String>,
    /// Sub ID 2.
    pub subid2: Option<String>,
    /// Sub ID 3.
    pub subid3: Option<String>,
    /// Sub ID 4.
    pub subid4: Option<String>,
    /// Sub ID 5.
    pub subid5: Option<String>,
    /// Affiliate IDs; admin only.
    pub partner: Vec<u64>,
    /// Revenue; admin only.
    pub revenue: Option<Decimal>,
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
    /// `1` to skip mapping of related entities on large exports.
    pub raw_export: Option<u8>,
}

impl ToParams for ConversionListOpts {}

/// Options for [`StatisticService::clicks`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClickListOpts {
    /// First day, `YYYY-MM-DD`.
    pub date_from: String,
    /// Last day, `YYYY-MM-DD`.
    pub date_to: String,
    /// Hour, only for a one day period.
    pub hour: Option<u8>,
    /// Offer IDs.
    pub offer: Vec<u64>,
    /// Affiliate IDs.
    pub partner: Vec<u64>,
    /// Country codes.
    pub country: Vec<String>,
    /// Advertiser IDs; admin only.
    pub advertisers: Vec<String>,
    /// Timezone name.
    pub timezone: Option<String>,
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
}

impl ToParams for ClickListOpts {}

/// Options for [`StatisticService::referral_payments`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReferralPaymentOpts {
    /// First day, `DD-MM-YYYY`.
    pub date_from: String,
    /// Last day, `DD-MM-YYYY`.
    pub date_to: String,
    /// Affiliate ID.
    #[serde(rename = "pid")]
    pub affiliate_id: Option<u64>,
    /// Referral affiliate ID.
    #[serde(rename = "ref")]
    pub referral: Option<u64>,
    /// Payouts `0`, paid `1`, pending `2`.
    pub is_paid: Option<u8>,
    /// `1` for active referrals.
    pub status: Option<u8>,
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
    /// Currency ID.
    pub currency: Option<u64>,
}

impl ToParams for ReferralPaymentOpts {}

/// Options for [`StatisticService::find_subs`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct FindSubsOpts {
    /// Sub 1.
    pub sub1: Option<String>,
    /// Sub 2.
    pub sub2: Option<String>,
    /// Sub 3.
    pub sub3: Option<String>,
    /// Sub 4.
    pub sub4: Option<String>,
    /// Sub 5.
    pub sub5: Option<String>,
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
}

impl ToParams for FindSubsOpts {}

/// Options for [`StatisticService::server_postbacks`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerPostbackOpts {
    /// First day, `YYYY-MM-DD`.
    pub date_from: String,
    /// Last day, `YYYY-MM-DD`.
    pub date_to: String,
    /// Offer IDs.
    pub offer: Vec<u64>,
    /// Affiliate IDs.
    pub partner: Vec<u64>,
    /// Advertiser IDs.
    pub supplier: Vec<String>,
    /// Conversion ID.
    pub action_id: Option<String>,
    /// Click ID.
    pub click_id: Option<String>,
    /// Goal.
    pub goal: Option<String>,
    /// Status.
    pub status: Option<String>,
    /// Timezone name.
    pub timezone: Option<String>,
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
}

impl ToParams for ServerPostbackOpts {}

/// Options for [`StatisticService::affiliate_postbacks`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct AffiliatePostbackStatOpts {
    /// First day, `YYYY-MM-DD`.
    pub date_from: String,
    /// Last day, `YYYY-MM-DD`.
    pub date_to: String,
    /// Offer IDs.
    pub offer: Vec<u64>,
    /// Affiliate IDs.
    pub partner: Vec<u64>,
    /// Goal.
    pub goal: Option<String>,
    /// Status.
    pub status: Option<u8>,
    /// HTTP status code returned by the affiliate.
    pub http_code: Option<u16>,
    /// Timezone name.
    pub timezone: Option<String>,
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
}

impl ToParams for AffiliatePostbackStatOpts {}

/// Options for [`StatisticService::caps`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CapStatOpts {
    /// Offer IDs, at least one.
    pub offer_id: Vec<u64>,
}

impl ToParams for CapStatOpts {}

/// Options for [`StatisticService::retention_rate`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetentionRateOpts {
    /// First day, `YYYY-MM-DD`.
    pub date_from: String,
    /// Last day, `YYYY-MM-DD`.
    pub date_to: String,
    /// Offer ID.
    pub offer: u64,
    /// Goal the retention is measured from.
    pub base_event: String,
    /// Goals counted as retained.
    pub events: Vec<String>,
    /// Affiliate ID.
    pub affiliate_id: Option<u64>,
    /// Timezone name.
    pub timezone: Option<String>,
}

impl ToParams for RetentionRateOpts {}

/// Options for [`StatisticService::time_to_action`].
///
/// Affiliate IDs are sent as one comma separated value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimeToActionOpts {
    /// First day, `YYYY-MM-DD`.
    pub date_from: String,
    /// Last day, `YYYY-MM-DD`.
    pub date_to: String,
    /// Offer ID.
    pub offer_id: u64,
    /// Timezone name, required by this report.
    pub timezone: String,
    /// Goal name.
    pub goal: Option<String>,
    /// Affiliate IDs, sent comma separated.
    #[serde(skip)]
    pub affiliate_ids: Vec<u64>,
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
}

impl ToParams for TimeToActionOpts {
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        let mut params = encoder.encode(self)?;
        if !self.affiliate_ids.is_empty() {
            params.set("affiliate_ids", comma_separated_ints(&self.affiliate_ids));
        }
        Ok(params)
    }
}

#[derive(Debug, Serialize)]
struct ConversionIdOpts<'a> {
    id: &'a str,
}

impl ToParams for ConversionIdOpts<'_> {}

#[derive(Debug, Deserialize)]
struct StatsResponse<T> {
    #[serde(default)]
    stats: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ConversionResponse {
    #[serde(default)]
    conversion: Conversion,
}

#[derive(Debug, Deserialize)]
struct ConversionsResponse {
    #[serde(default)]
    conversions: Vec<Conversion>,
}

#[derive(Debug, Deserialize)]
struct ClicksResponse {
    #[serde(default)]
    clicks: Vec<Click>,
}

#[derive(Debug, Deserialize)]
struct RefPaymentsResponse {
    #[serde(default)]
    ref_payments: Vec<RefPayment>,
}

#[derive(Debug, Deserialize)]
struct SubsResponse {
    #[serde(default)]
    subs: Vec<Sub>,
}

#[derive(Debug, Deserialize)]
struct PostbacksResponse {
    #[serde(default)]
    postbacks: Vec<StatPostback>,
}

#[derive(Debug, Deserialize)]
struct TimeToActionResponse {
    #[serde(default)]
    data: Vec<TimeToAction>,
}

/// Statistics endpoints.
///
/// Reports marked admin only fail with an API error for affiliate keys.
#[derive(Debug, Clone, Copy)]
pub struct StatisticService<'a> {
    client: &'a AffiseClient,
}

impl<'a> StatisticService<'a> {
    pub(crate) const fn new(client: &'a AffiseClient) -> Self {
        Self { client }
    }

    async fn get<T, O>(&self, path: &str, opts: &O) -> Result<(T, Response), ClientError>
    where
        T: serde::de::DeserializeOwned,
        O: ?Sized + ToParams,
    {
        self.client
            .fetch_opts(Method::GET, path, Audience::Public, opts)
            .await
    }

    /// Gets a custom report grouped by the requested slices.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn custom(&self, opts: &CustomStatOpts) -> Result<(Vec<Stat>, Response), ClientError> {
        let (body, response): (StatsResponse<Stat>, _) = self.get("/3.0/stats/custom", opts).await?;
        Ok((body.stats, response))
    }

    /// Gets a single conversion. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn conversion_by_id(&self, id: &str) -> Result<(Conversion, Response), ClientError> {
        let (body, response): (ConversionResponse, _) = self
            .get("/3.0/stats/conversionsbyid", &ConversionIdOpts { id })
            .await?;
        Ok((body.conversion, response))
    }

    /// Lists conversions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn conversions(
        &self,
        opts: &ConversionListOpts,
    ) -> Result<(Vec<Conversion>, Response), ClientError> {
        let (body, response): (ConversionsResponse, _) =
            self.get("/3.0/stats/conversions", opts).await?;
        Ok((body.conversions, response))
    }

    /// Lists clicks. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn clicks(&self, opts: &ClickListOpts) -> Result<(Vec<Click>, Response), ClientError> {
        let (body, response): (ClicksResponse, _) = self.get("/3.0/stats/clicks", opts).await?;
        Ok((body.clicks, response))
    }

    /// Gets a report grouped by `grouping`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn get_by(
        &self,
        grouping: StatGrouping,
        opts: &GroupedStatOpts,
    ) -> Result<(Vec<Stat>, Response), ClientError> {
        let (body, response): (StatsResponse<Stat>, _) = self.get(&grouping.path(), opts).await?;
        Ok((body.stats, response))
    }

    /// Lists referral payments.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn referral_payments(
        &self,
        opts: &ReferralPaymentOpts,
    ) -> Result<(Vec<RefPayment>, Response), ClientError> {
        let (body, response): (RefPaymentsResponse, _) =
            self.get("/3.0/stats/getreferralpayments", opts).await?;
        Ok((body.ref_payments, response))
    }

    /// Finds sub values. Affiliate keys only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn find_subs(&self, opts: &FindSubsOpts) -> Result<(Vec<Sub>, Response), ClientError> {
        let (body, response): (SubsResponse, _) = self.get("/3.0/stats/find-subs", opts).await?;
        Ok((body.subs, response))
    }

    /// Lists incoming server postbacks. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn server_postbacks(
        &self,
        opts: &ServerPostbackOpts,
    ) -> Result<(Vec<StatPostback>, Response), ClientError> {
        let (body, response): (PostbacksResponse, _) =
            self.get("/3.0/stats/serverpostbacks", opts).await?;
        Ok((body.postbacks, response))
    }

    /// Lists postbacks sent to affiliates. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn affiliate_postbacks(
        &self,
        opts: &AffiliatePostbackStatOpts,
    ) -> Result<(Vec<StatPostback>, Response), ClientError> {
        let (body, response): (PostbacksResponse, _) =
            self.get("/3.0/stats/affiliatepostbacks", opts).await?;
        Ok((body.postbacks, response))
    }

    /// Gets cap progress per offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn caps(&self, opts: &CapStatOpts) -> Result<(Vec<StatCap>, Response), ClientError> {
        let (body, response): (StatsResponse<StatCap>, _) = self.get("/3.1/stats/caps", opts).await?;
        Ok((body.stats, response))
    }

    /// Gets the retention rate report.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn retention_rate(
        &self,
        opts: &RetentionRateOpts,
    ) -> Result<(Vec<RetentionRate>, Response), ClientError> {
        let (body, response): (StatsResponse<RetentionRate>, _) =
            self.get("/3.0/stats/retentionrate", opts).await?;
        Ok((body.stats, response))
    }

    /// Gets the time to action report.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn time_to_action(
        &self,
        opts: &TimeToActionOpts,
    ) -> Result<(Vec<TimeToAction>, Response), ClientError> {
        let (body, response): (TimeToActionResponse, _) =
            self.get("/3.0/stats/time-to-action", opts).await?;
        Ok((body.data, response))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::services::test_support::client;

    #[test]
    fn test_filter_keys() {
        let mut filter = StatFilter::between("2024-01-01", "2024-01-31");
        filter.offer = vec![10, 11];
        filter.nonzero = Some(1);
        filter.affiliate_tag = vec!["vip".to_string(), "new".to_string()];
        let opts = CustomStatOpts {
            filter,
            slice: vec!["day".to_string(), "offer".to_string()],
            order_type: Some("desc".to_string()),
            ..Default::default()
        };

        let params = client().encode(&opts).expect("encode");
        assert_eq!(params.get("filter[date_from]"), Some("2024-01-01"));
        assert_eq!(params.get("filter[date_to]"), Some("2024-01-31"));
        assert_eq!(params.get_all("filter[offer]"), ["10", "11"]);
        assert_eq!(params.get("filter[nonzero]"), Some("1"));
        assert_eq!(params.get("filter[affiliate_tag]"), Some("vip,new"));
        assert!(!params.contains_key("filter[offer_tag]"));
        assert_eq!(params.get_all("slice"), ["day", "offer"]);
        assert_eq!(params.get("orderType"), Some("desc"));
        assert_eq!(params.len(), 7);
    }

    #[test]
    fn test_empty_dates_still_sent() {
        let params = client().encode(&GroupedStatOpts::default()).expect("encode");
        assert_eq!(params.get("filter[date_from]"), Some(""));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_filter_between_dates() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 1).expect("date");
        let to = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
        let filter = StatFilter::between_dates(from, to);
        assert_eq!(filter.date_from, "2024-03-01");
        assert_eq!(filter.date_to, "2024-03-09");
    }

    #[test]
    fn test_grouping_paths_unique() {
        let paths: HashSet<String> = StatGrouping::ALL.iter().map(|g| g.path()).collect();
        assert_eq!(paths.len(), StatGrouping::ALL.len());
        assert_eq!(StatGrouping::BrowserVersions.path(), "/3.0/stats/getbybrowsersversion");
        assert_eq!(StatGrouping::OsVersions.path(), "/3.0/stats/getbyversions");
    }

    #[test]
    fn test_grouping_request() {
        let opts = GroupedStatOpts {
            filter: StatFilter::between("2024-02-01", "2024-02-02"),
            limit: Some(5),
            ..Default::default()
        };
        let request = StatGrouping::Goal.request(&client(), &opts).expect("request");
        assert_eq!(request.url().path(), "/3.0/stats/getbygoal");
        assert_eq!(
            request.url().query(),
            Some("filter%5Bdate_from%5D=2024-02-01&filter%5Bdate_to%5D=2024-02-02&limit=5")
        );
    }

    #[test]
    fn test_time_to_action_ids_joined() {
        let opts = TimeToActionOpts {
            date_from: "2024-01-01".to_string(),
            date_to: "2024-01-02".to_string(),
            offer_id: 3,
            timezone: "UTC".to_string(),
            affiliate_ids: vec![1, 2, 3],
            ..Default::default()
        };
        let params = client().encode(&opts).expect("encode");
        assert_eq!(params.get("affiliate_ids"), Some("1,2,3"));
        assert_eq!(params.get("offer_id"), Some("3"));
    }

    #[test]
    fn test_conversion_money_as_string() {
        let opts = ConversionListOpts {
            payouts: Some(Decimal::new(150, 2)),
            status: vec![1, 5],
            ..Default::default()
        };
        let params = client().encode(&opts).expect("encode");
        assert_eq!(params.get("payouts"), Some("1.50"));
        assert_eq!(params.get_all("status"), ["1", "5"]);
    }
}
