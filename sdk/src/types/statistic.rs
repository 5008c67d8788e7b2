//! Statistics types.
//!
//! Conversions, clicks and the aggregated rows returned by the slice
//! reports.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::advertiser::Advertiser;
use super::affiliate::{Affiliate, ObjectId, SplitTimestamp};
use super::offer::Offer;
use super::primitives::u64_from_str_or_int;

/// Conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conversion {
    /// Conversion ID.
    pub id: String,
    /// Action ID.
    pub action_id: String,
    /// Status.
    pub status: String,
    /// Advertiser side conversion ID.
    pub conversion_id: String,
    /// Callback ID.
    pub cbid: String,
    /// Currency code.
    pub currency: String,
    /// Offer.
    pub offer: Option<Offer>,
    /// Offer ID.
    pub offer_id: u64,
    /// Goal.
    pub goal: String,
    /// Visitor IP.
    pub ip: String,
    /// Country in ISO format.
    pub country: String,
    /// Country name.
    pub country_name: String,
    /// District.
    pub district: String,
    /// City.
    pub city: String,
    /// City ID.
    pub city_id: u64,
    /// ISP code.
    pub isp_code: String,
    /// Visitor user agent.
    pub ua: String,
    /// Browser.
    pub browser: String,
    /// Operating system.
    pub os: String,
    /// Device.
    pub device: String,
    /// Device type.
    pub device_type: String,
    /// Sub 1.
    pub sub1: String,
    /// Sub 2.
    pub sub2: String,
    /// Sub 3.
    pub sub3: String,
    /// Sub 4.
    pub sub4: String,
    /// Sub 5.
    pub sub5: String,
    /// Sub 6.
    pub sub6: String,
    /// Sub 7.
    pub sub7: String,
    /// Sub 8.
    pub sub8: String,
    /// Custom field 1.
    pub custom_field_1: String,
    /// Custom field 2.
    pub custom_field_2: String,
    /// Custom field 3.
    pub custom_field_3: String,
    /// Custom field 4.
    pub custom_field_4: String,
    /// Custom field 5.
    pub custom_field_5: String,
    /// Custom field 6.
    pub custom_field_6: String,
    /// Custom field 7.
    pub custom_field_7: String,
    /// Comment.
    pub comment: String,
    /// Creation time.
    pub created_at: String,
    /// Click time.
    pub click_time: String,
    /// Referrer.
    pub referrer: String,
    /// Last update time.
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    /// Click ID.
    pub clickid: String,
    /// Affiliate.
    pub partner: Option<Affiliate>,
    /// Advertiser ID.
    #[serde(rename = "supplier_id")]
    pub advertiser_id: String,
    /// Affiliate ID.
    #[serde(rename = "partner_id")]
    pub affiliate_id: u64,
    /// Goal value.
    pub goal_value: String,
    /// Sum.
    pub sum: f64,
    /// Revenue.
    pub revenue: f64,
    /// Payouts.
    pub payouts: f64,
    /// Earnings.
    pub earnings: f64,
    /// Advertiser.
    pub advertiser: Option<Advertiser>,
    /// Payment type.
    pub payment_type: String,
    /// Payment status.
    pub payment_status: String,
    /// Paid flag.
    pub is_paid: String,
    /// iOS advertising ID.
    pub ios_idfa: String,
    /// Android ID.
    pub android_id: String,
    /// Price.
    pub price: f64,
    /// Landing ID.
    pub landing_id: u64,
    /// Prelanding ID.
    pub prelanding_id: u64,
    /// Currency ID; shape varies.
    pub currency_id: serde_json::Value,
    /// Fraud check result; shape varies.
    pub forensiq: serde_json::Value,
    /// Hold expiry; shape varies.
    pub hold_date_expire: serde_json::Value,
}

/// Click.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Click {
    /// Click ID.
    pub id: String,
    /// Visitor IP.
    pub ip: String,
    /// Visitor user agent.
    pub ua: String,
    /// Country in ISO format.
    pub country: String,
    /// City.
    pub city: String,
    /// Device.
    pub device: String,
    /// Operating system.
    pub os: String,
    /// Browser.
    pub browser: String,
    /// Referrer.
    pub referrer: String,
    /// Sub 1.
    pub sub1: String,
    /// Sub 2.
    pub sub2: String,
    /// Sub 3.
    pub sub3: String,
    /// Sub 4.
    pub sub4: String,
    /// Sub 5.
    pub sub5: String,
    /// Sub 6.
    pub sub6: String,
    /// Sub 7.
    pub sub7: String,
    /// Sub 8.
    pub sub8: String,
    /// Offer.
    pub offer: Option<Offer>,
    /// Conversion ID.
    pub conversion_id: String,
    /// iOS advertising ID.
    pub ios_idfa: String,
    /// Android ID.
    pub android_id: String,
    /// Creation time.
    pub created_at: String,
    /// Whether the click is unique.
    pub uniq: bool,
    /// Callback ID.
    pub cbid: String,
    /// Affiliate ID.
    #[serde(rename = "partner_id")]
    pub affiliate_id: u64,
    /// Affiliate.
    pub partner: Option<Affiliate>,
}

/// Manager reference inside a statistics slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerRef {
    /// Manager ID.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

/// Landing details attached to landing reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingInfo {
    /// URL.
    pub url: String,
    /// Preview URL.
    pub preview_url: String,
    /// Title.
    pub title: String,
}

/// Dimensions a statistics row is grouped by. Only the dimensions of the
/// requested report are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatSlice {
    /// Year.
    pub year: Option<i32>,
    /// Quarter.
    pub quarter: Option<u32>,
    /// Month.
    pub month: Option<u32>,
    /// Day of month.
    pub day: Option<u32>,
    /// Hour.
    pub hour: Option<u32>,
    /// Country code.
    pub country: Option<String>,
    /// Operating system.
    pub os: Option<String>,
    /// OS version.
    pub os_version: Option<String>,
    /// Device type.
    pub device: Option<String>,
    /// Device model.
    pub device_model: Option<String>,
    /// Browser.
    pub browser: Option<String>,
    /// Browser version.
    pub browser_version: Option<String>,
    /// Landing ID.
    pub landing: Option<String>,
    /// Prelanding ID; sent as a number or a string.
    pub prelanding: Option<serde_json::Value>,
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
    /// Goal.
    pub goal: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Mobile carrier.
    pub isp: Option<String>,
    /// Connection type.
    pub conn_type: Option<String>,
    /// Trafficback reason.
    pub trafficback_reason: Option<String>,
    /// Offer.
    pub offer: Option<Offer>,
    /// Advertiser.
    pub advertiser: Option<Advertiser>,
    /// Advertiser manager.
    pub advertiser_manager_id: Option<ManagerRef>,
    /// Affiliate manager.
    pub affiliate_manager_id: Option<ManagerRef>,
    /// Affiliate.
    pub affiliate: Option<Affiliate>,
}

/// Traffic counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatTraffic {
    /// Raw clicks.
    pub raw: String,
    /// Unique clicks.
    pub uniq: String,
}

/// Action counters for one conversion status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatAction {
    /// Revenue.
    pub revenue: f64,
    /// Charge.
    pub charge: f64,
    /// Earnings.
    pub earning: f64,
    /// Actions without a payout.
    pub null: f64,
    /// Count.
    pub count: f64,
}

/// Statistics row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    /// Grouping dimensions.
    pub slice: StatSlice,
    /// Traffic counters.
    pub traffic: StatTraffic,
    /// Action counters keyed by conversion status.
    pub actions: HashMap<String, StatAction>,
    /// Conversion ratio.
    pub ratio: String,
    /// Earnings per click.
    pub epc: f64,
    /// Landing details keyed by landing ID.
    pub landings_info: HashMap<String, LandingInfo>,
}

/// Referral payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefPayment {
    /// Affiliate ID.
    #[serde(rename = "pid", deserialize_with = "u64_from_str_or_int")]
    pub affiliate_id: u64,
    /// Referral affiliate ID.
    #[serde(rename = "ref")]
    pub referral: String,
    /// Status.
    pub status: String,
    /// Paid flag.
    pub is_paid: String,
    /// Currency code.
    pub currency: String,
    /// Count.
    pub count: String,
    /// Latest payment time.
    pub max_created_at: String,
    /// Referral registration date.
    pub date_registration_partner: String,
    /// Total revenue.
    pub sum_revenue: String,
}

/// Sub values found by a sub search, keyed by sub name.
pub type Sub = HashMap<String, String>;

/// Affiliate reference inside a tracked click.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackPartner {
    /// ID.
    pub id: String,
    /// Login.
    pub login: String,
    /// Email.
    pub email: String,
}

/// Click a postback was sent for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    /// ID.
    pub id: String,
    /// IP address.
    pub ip: String,
    /// User agent.
    pub ua: String,
    /// Country code.
    pub country: String,
    /// City.
    pub city: String,
    /// Device type.
    pub device: String,
    /// Operating system.
    pub os: String,
    /// Browser.
    pub browser: String,
    /// Offer.
    pub offer: Option<Offer>,
    /// Referrer.
    pub referrer: String,
    /// Click ID.
    pub click_id: String,
    /// Sub 1.
    pub sub1: String,
    /// Sub 2.
    pub sub2: String,
    /// Sub 3.
    pub sub3: String,
    /// Sub 4.
    pub sub4: String,
    /// Sub 5.
    pub sub5: String,
    /// Offer ID.
    pub offer_id: String,
    /// Creation time.
    pub created_at: String,
    /// `1` for a unique click.
    pub uniq: i32,
    /// Affiliate.
    pub partner: TrackPartner,
    /// Conversion ID.
    pub conversion_id: serde_json::Value,
    /// iOS advertising ID.
    pub ios_idfa: serde_json::Value,
    /// Android ID.
    pub android_id: serde_json::Value,
    /// Callback ID.
    pub cbid: serde_json::Value,
}

/// Query parameters of a logged postback request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostbackQuery {
    /// Click ID.
    pub clickid: String,
}

/// Logged server or affiliate postback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatPostback {
    /// ID.
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Query parameters.
    #[serde(rename = "_get")]
    pub query: PostbackQuery,
    /// Form fields.
    #[serde(rename = "_post")]
    pub form: Vec<serde_json::Value>,
    /// Date.
    pub date: SplitTimestamp,
    /// Raw query string.
    pub get: String,
    /// Raw form body.
    pub post: String,
    /// Server data.
    pub server: String,
    /// Response body.
    pub response: String,
    /// Click.
    pub track: Option<Track>,
    /// Affiliate ID.
    #[serde(rename = "pid", deserialize_with = "u64_from_str_or_int")]
    pub affiliate_id: u64,
    /// Lead ID.
    pub lead_id: String,
    /// HTTP status code.
    pub http_code: i32,
    /// Postback URL.
    pub postback_url: String,
    /// Offer ID.
    pub offer_id: u64,
    /// Job ID.
    pub job_id: String,
    /// Goal.
    pub goal: String,
    /// Status.
    pub status: i32,
}

/// Retention rate row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionRate {
    /// Affiliate ID.
    pub affiliate_id: u64,
    /// Date.
    pub date: String,
    /// Install retention.
    pub rr_install: f64,
    /// Retention of the first extra goal.
    pub rr_other1: f64,
    /// Retention of the second extra goal.
    pub rr_other2: f64,
    /// Installs.
    pub install_count: f64,
}

/// Time to action row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeToAction {
    /// Affiliate ID.
    pub affiliate_id: u64,
    /// Clicks.
    pub clicks: u64,
    /// Conversions.
    pub total_conversions: u64,
    /// Actions within 30 seconds.
    pub tta_30: u64,
    /// Actions within 10 minutes.
    pub tta_600: u64,
    /// Actions after 10 minutes.
    pub tta_inf: u64,
}

/// Progress of one cap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapProgress {
    /// ID.
    pub id: String,
    /// Period.
    pub timeframe: String,
    /// Cap type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Cap value.
    pub value: f64,
    /// Current value.
    pub current_value: f64,
    /// Whether the value is what remains.
    pub is_remaining: bool,
    /// Value after reset.
    pub reset_to_value: f64,
    /// Affiliate scope.
    pub affiliate_type: String,
    /// Affiliate IDs.
    pub affiliates: Vec<u64>,
    /// Goals.
    pub goals: Vec<HashMap<String, String>>,
    /// Goal scope.
    pub goal_type: String,
    /// Country codes.
    pub countries: Vec<String>,
    /// Country scope.
    pub country_type: String,
}

/// Cap progress of an offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatCap {
    /// Offer ID.
    pub offer_id: u64,
    /// Caps.
    pub stats: Vec<CapProgress>,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_row() {
        let stat: Stat = serde_json::from_str(
            r#"{
                "slice": {"year": 2024, "month": 3, "day": 1, "prelanding": 0},
                "traffic": {"raw": "120", "uniq": "80"},
                "actions": {"confirmed": {"revenue": 12.5, "count": 3}},
                "ratio": "2.5",
                "epc": 0.1
            }"#,
        )
        .expect("stat");

        assert_eq!(stat.slice.year, Some(2024));
        assert_eq!(stat.slice.day, Some(1));
        assert!(stat.slice.country.is_none());
        assert_eq!(stat.traffic.raw, "120");
        assert!((stat.actions["confirmed"].revenue - 12.5).abs() < f64::EPSILON);
        assert!(stat.landings_info.is_empty());
    }

    #[test]
    fn test_stat_postback() {
        let postback: StatPostback = serde_json::from_str(
            r#"{"_id": {"$id": "abc"}, "_get": {"clickid": "c1"}, "_post": [], "pid": 610, "http_code": 200}"#,
        )
        .expect("postback");
        assert_eq!(postback.id.id, "abc");
        assert_eq!(postback.query.clickid, "c1");
        assert_eq!(postback.affiliate_id, 610);
        assert!(postback.track.is_none());
    }

    #[test]
    fn test_conversion_renamed_fields() {
        let conversion: Conversion = serde_json::from_str(
            r#"{"id": "c1", "supplier_id": "adv1", "partner_id": 610, "updatedAt": "2024-01-01", "payouts": 1.25}"#,
        )
        .expect("conversion");
        assert_eq!(conversion.advertiser_id, "adv1");
        assert_eq!(conversion.affiliate_id, 610);
        assert_eq!(conversion.updated_at, "2024-01-01");
        assert!(conversion.offer.is_none());
    }
}
