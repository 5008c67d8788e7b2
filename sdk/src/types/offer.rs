//! Offer types.
//!
//! Provides the offer model and the nested structures the API returns
//! with it.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::SubAccount;
use super::reference::City;

/// Traffic source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    /// Source ID.
    pub id: String,
    /// Title.
    pub title: String,
    /// Localized titles keyed by language code.
    pub title_lang: HashMap<String, String>,
    /// Whether the source is allowed.
    pub allowed: i32,
}

/// Offer category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    /// Category ID.
    pub id: String,
    /// Title.
    pub title: String,
}

/// Payout rule of an offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    /// Affiliates the payment applies to (personal payments only).
    pub partners: Vec<u64>,
    /// Countries in ISO format.
    pub countries: Vec<String>,
    /// Whether `countries` are excluded.
    pub country_exclude: bool,
    /// Cities.
    pub cities: Vec<City>,
    /// Device types.
    pub devices: Vec<String>,
    /// Operating systems.
    pub os: Vec<String>,
    /// Goal value.
    pub goal: String,
    /// Amount charged to the advertiser.
    pub total: Decimal,
    /// Amount paid to the affiliate.
    pub revenue: Decimal,
    /// Currency code.
    pub currency: String,
    /// Payment type: `fixed`, `percent` or `mixed`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Title.
    pub title: String,
    /// URL.
    pub url: String,
    /// Whether region targeting is attached.
    pub with_regions: bool,
}

/// Landing page of an offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Landing {
    /// Title.
    pub title: String,
    /// Tracking URL.
    pub url: String,
    /// Preview URL.
    pub url_preview: String,
    /// `landing` or `transit`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// ISP restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Isp {
    /// Country in ISO format.
    pub country: String,
    /// ISP name.
    pub name: String,
}

/// Cap of an offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cap {
    /// `day`, `month` or `all`.
    pub period: String,
    /// `budget`, `conversions` or `clicks`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Cap value.
    pub value: Decimal,
    /// `all`, `each` or `exact`.
    pub goal_type: String,
    /// Goals the cap applies to; shape varies between API versions.
    pub goals: serde_json::Value,
    /// `all`, `each` or `exact`.
    pub affiliate_type: String,
    /// Affiliates the cap applies to.
    pub affiliates: Vec<u64>,
    /// `all`, `each` or `exact`.
    pub country_type: String,
    /// Country codes.
    pub country: Vec<String>,
}

/// Commission tier of an offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommissionTier {
    /// `day`, `week`, `month` or `all`.
    pub timeframe: String,
    /// `budget` or `conversions`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Threshold value.
    pub value: Decimal,
    /// Modifier amount.
    pub modifier_value: Decimal,
    /// `by_fix`, `by_percent`, `to_fix` or `to_percent`.
    pub modifier_type: String,
    /// Goals counted towards the threshold.
    pub goals: Vec<String>,
    /// Goals the modifier applies to.
    pub target_goals: Vec<String>,
    /// `all`, `each` or `exact`.
    pub affiliate_type: String,
    /// Affiliates the tier applies to.
    pub affiliates: Vec<u64>,
    /// `payout`, `total` or `payout_and_total`.
    pub modifier_payment_type: String,
    /// Conversion statuses counted.
    pub conversion_status: Vec<String>,
}

/// Offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Offer {
    /// Internal numeric ID.
    pub id: u64,
    /// Offer ID.
    pub offer_id: String,
    /// Advertiser ID.
    pub advertiser: String,
    /// External offer ID.
    pub external_offer_id: String,
    /// Application bundle ID.
    pub bundle_id: String,
    /// Whether payments are hidden from affiliates.
    pub hide_payments: bool,
    /// Title.
    pub title: String,
    /// Tracking URL with macros.
    pub macro_url: String,
    /// Tracking URL.
    pub url: String,
    /// Cross postback URL.
    pub cross_postback_url: String,
    /// Preview URL.
    pub url_preview: String,
    /// Preview URL.
    pub preview_url: String,
    /// Tracking domain URL.
    pub domain_url: String,
    /// Whether HTTPS is used.
    pub use_https: bool,
    /// Whether HTTP is used.
    pub use_http: bool,
    /// Localized descriptions keyed by language code.
    pub description_lang: HashMap<String, String>,
    /// Traffic sources.
    pub sources: Vec<Source>,
    /// Logo URL.
    pub logo: String,
    /// Logo source.
    pub logo_source: String,
    /// Status.
    pub status: String,
    /// Tags.
    pub tags: Vec<String>,
    /// Privacy level.
    pub privacy: String,
    /// Whether the offer is marked as top.
    pub is_top: i32,
    /// Payout rules.
    pub payments: Vec<Payment>,
    /// Personal payout rules.
    pub partner_payments: Vec<Payment>,
    /// Landing pages.
    pub landings: Vec<Landing>,
    /// Strict country targeting flag.
    pub strictly_country: i32,
    /// Allowed operating systems.
    pub strictly_os: Vec<String>,
    /// Allowed device brands.
    pub strictly_brands: Vec<String>,
    /// Allowed connection type.
    pub strictly_connection_type: String,
    /// Whether overcap traffic is redirected.
    pub is_redirect_overcap: bool,
    /// Overcap notification threshold in percent.
    pub notice_percent_overcap: i32,
    /// Hold period in days.
    pub hold_period: i32,
    /// Category IDs.
    pub categories: Vec<String>,
    /// Categories.
    pub full_categories: Vec<Category>,
    /// Conversion rate.
    pub cr: f64,
    /// Earnings per click.
    pub epc: f64,
    /// Notes.
    pub notes: String,
    /// Allowed IPs.
    pub allowed_ip: String,
    /// Disallowed IPs.
    pub disallowed_ip: String,
    /// Postback password hash.
    pub hash_password: String,
    /// Whether deep links are allowed.
    pub allow_deeplink: i32,
    /// Whether the referer is hidden.
    pub hide_referer: i32,
    /// Start date.
    pub start_at: String,
    /// Stop date.
    pub stop_at: String,
    /// Whether affiliates are connected automatically.
    pub auto_offer_connect: i32,
    /// Whether affiliates need approval.
    pub required_approval: bool,
    /// Whether this is a CPI offer.
    pub is_cpi: bool,
    /// Localized KPI texts keyed by language code.
    pub kpi: HashMap<String, String>,
    /// Sub restrictions.
    pub sub_restrictions: Vec<HashMap<String, String>>,
    /// Creative IDs.
    pub creatives: Vec<u64>,
    /// Creatives archive; shape varies.
    pub creatives_zip: serde_json::Value,
    /// Sub accounts keyed by sub name.
    pub sub_accounts: HashMap<String, SubAccount>,
    /// Redirect type.
    pub redirect_type: String,
    /// Caps.
    pub caps: Vec<Cap>,
    /// Commission tiers.
    pub commission_tiers: Vec<CommissionTier>,
    /// Timezone used by caps.
    pub caps_timezone: String,
    /// Allowed ISPs.
    pub strictly_isp: Vec<String>,
    /// ISP restrictions.
    pub restriction_isp: Vec<Isp>,
    /// Allowed devices.
    pub strictly_devices: Vec<String>,
    /// Whether postback status choice is disabled.
    pub disabled_choice_postback_status: bool,
    /// Last update time.
    pub updated_at: String,
    /// Creation time.
    pub created_at: String,
    /// Cap statuses.
    pub caps_status: Vec<String>,
    /// Whether empty subs are searched.
    pub search_empty_sub: i32,
    /// Whether impressions are allowed.
    pub allow_impressions: bool,
    /// Smartlink category IDs.
    pub smartlink_categories: Vec<String>,
    /// Click session lifetime.
    pub click_session: String,
    /// Minimal click session lifetime.
    pub minimal_click_session: String,
    /// Whether an IO document is attached.
    pub io_document: bool,
    /// Whether only unique IPs are counted.
    pub uniq_ip_only: bool,
    /// Whether non unique IPs are rejected.
    pub reject_not_uniq_ip: bool,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_partial_json() {
        let offer: Offer = serde_json::from_str(
            r#"{
                "id": 42,
                "offer_id": "5bd0e0c6d1bb3b1b008b4567",
                "title": "Demo offer",
                "payments": [{"countries": ["US"], "total": 1.5, "revenue": "1.2", "currency": "USD", "type": "fixed"}],
                "caps": [{"period": "day", "type": "conversions", "value": 100, "goals": {"1": "1"}}],
                "sub_accounts": {"sub1": {"value": "x", "except": 0}},
                "unknown_field": true
            }"#,
        )
        .expect("offer");

        assert_eq!(offer.id, 42);
        assert_eq!(offer.title, "Demo offer");
        assert_eq!(offer.payments.len(), 1);
        assert_eq!(offer.payments[0].total, Decimal::new(15, 1));
        assert_eq!(offer.payments[0].revenue, Decimal::new(12, 1));
        assert_eq!(offer.payments[0].kind, "fixed");
        assert_eq!(offer.caps[0].value, Decimal::from(100));
        assert!(offer.caps[0].goals.is_object());
        assert!(!offer.sub_accounts["sub1"].except.value());
        assert!(offer.landings.is_empty());
    }
}
