//! Indexed and keyed offer settings.
//!
//! These settings cannot be expressed as flat `name=value` pairs. They are
//! sent in bracket notation, for example `caps[0][goals][]=1` or
//! `targeting[0][region][allow][US][]=5`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::encoding::{EncodeError, EncodedParams, ParamEncoder};

/// Payment rule, sent as `payments[i][...]` or `partner_payments[i][...]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaymentOpts {
    /// Affiliate IDs the rule is limited to.
    #[serde(rename = "partners[]")]
    pub partners: Vec<u64>,
    /// Country codes.
    #[serde(rename = "countries[]")]
    pub countries: Vec<String>,
    /// `1` to apply the rule everywhere except `countries`.
    pub country_exclude: Option<u8>,
    /// City IDs.
    #[serde(rename = "cities[]")]
    pub cities: Vec<u64>,
    /// Device types.
    #[serde(rename = "devices[]")]
    pub devices: Vec<String>,
    /// Operating systems.
    #[serde(rename = "os[]")]
    pub os: Vec<String>,
    /// Goal value.
    pub goal: Option<String>,
    /// Affiliate payout.
    pub total: Option<Decimal>,
    /// Advertiser revenue.
    pub revenue: Option<Decimal>,
    /// Currency code.
    pub currency: Option<String>,
    /// `fixed`, `percent` or `mixed`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Title.
    pub title: Option<String>,
    /// Goal URL.
    pub url: Option<String>,
    /// `1` if the rule also targets regions.
    pub with_regions: Option<u8>,
}

/// Landing page, sent as `landings[i][...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LandingOpts {
    /// Title.
    pub title: String,
    /// Landing URL.
    pub url: String,
    /// Preview URL.
    pub url_preview: Option<String>,
    /// `landing` or `prelanding`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// OS restriction, sent as `restriction_os[i][...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OsRestrictionOpts {
    /// OS name.
    pub os: String,
    /// Versions, optionally prefixed with `>=` or `<`. May be empty.
    #[serde(rename = "versions[]")]
    pub versions: Vec<String>,
}

/// ISP restriction, sent as `restriction_isp[i][...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IspRestrictionOpts {
    /// Country in ISO format.
    pub country: String,
    /// ISP name.
    pub name: String,
}

/// Cap, sent as `caps[i][...]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CapOpts {
    /// `day`, `month` or `all`.
    pub period: Option<String>,
    /// `conversions` or `budget`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Cap value.
    pub value: Option<Decimal>,
    /// `all`, `each` or `exact`.
    pub goal_type: Option<String>,
    /// Goal values the cap counts.
    #[serde(rename = "goals[]")]
    pub goals: Vec<String>,
    /// `all`, `each` or `exact`.
    pub affiliate_type: Option<String>,
    /// Affiliate IDs the cap counts.
    #[serde(rename = "affiliates[]")]
    pub affiliates: Vec<u64>,
    /// `any`, `each` or `exact`.
    pub country_type: Option<String>,
    /// Country codes the cap counts.
    #[serde(rename = "country[]")]
    pub country: Vec<String>,
}

/// Commission tier, sent as `commission_tiers[i][...]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommissionTierOpts {
    /// Timeframe the conversions are counted over.
    pub timeframe: Option<String>,
    /// `conversions` or `revenue`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Threshold.
    pub value: Option<Decimal>,
    /// Payout modifier.
    pub modifier_value: Option<Decimal>,
    /// `fixed` or `percent`.
    pub modifier_type: Option<String>,
    /// Goals counted toward the threshold.
    #[serde(rename = "goals[]")]
    pub goals: Vec<String>,
    /// Goals whose payout is modified.
    #[serde(rename = "target_goals[]")]
    pub target_goals: Vec<String>,
    /// `all` or `exact`.
    pub affiliate_type: Option<String>,
    /// Affiliate IDs.
    #[serde(rename = "affiliates[]")]
    pub affiliates: Vec<u64>,
    /// Payment kind the modifier applies to.
    pub modifier_payment_type: Option<String>,
    /// Conversion statuses counted.
    #[serde(rename = "conversion_status[]")]
    pub conversion_status: Vec<String>,
}

/// OS targeting rule, sent as `os[allow][j][...]` inside a targeting group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OsTargeting {
    /// OS name.
    pub name: String,
    /// Version comparison, for example `GTE`.
    pub comparison: Option<String>,
    /// Version.
    pub version: Option<String>,
}

/// Weighted redirect URL, sent as `urls[j][...]` inside a targeting group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlWeight {
    /// Redirect URL.
    pub url: String,
    /// Weight.
    pub weight: Option<u32>,
}

/// Targeting group, sent as `targeting[i][...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetingGroup {
    /// Allowed country codes.
    #[serde(rename = "country[allow][]")]
    pub country_allow: Vec<String>,
    /// Denied country codes.
    #[serde(rename = "country[deny][]")]
    pub country_deny: Vec<String>,
    /// Allowed IPs, ranges or masks.
    #[serde(rename = "ip[allow][]")]
    pub ip_allow: Vec<String>,
    /// Denied IPs, ranges or masks.
    #[serde(rename = "ip[deny][]")]
    pub ip_deny: Vec<String>,
    /// Allowed browsers.
    #[serde(rename = "browser[allow][]")]
    pub browser_allow: Vec<String>,
    /// Denied browsers.
    #[serde(rename = "browser[deny][]")]
    pub browser_deny: Vec<String>,
    /// Allowed device brands.
    #[serde(rename = "brand[allow][]")]
    pub brand_allow: Vec<String>,
    /// Denied device brands.
    #[serde(rename = "brand[deny][]")]
    pub brand_deny: Vec<String>,
    /// Allowed device types.
    #[serde(rename = "device_type[]")]
    pub device_type: Vec<String>,
    /// Allowed connection types.
    #[serde(rename = "connection[]")]
    pub connection: Vec<String>,
    /// Affiliates the group applies to.
    #[serde(rename = "affiliate_id[]")]
    pub affiliate_id: Vec<u64>,
    /// `1` to block proxy traffic.
    pub block_proxy: Option<u8>,
    /// Redirect URL of the group.
    pub url: Option<String>,
    /// Allowed region IDs keyed by country code.
    #[serde(skip)]
    pub region_allow: BTreeMap<String, Vec<u64>>,
    /// Denied region IDs keyed by country code.
    #[serde(skip)]
    pub region_deny: BTreeMap<String, Vec<u64>>,
    /// Allowed city IDs keyed by country code.
    #[serde(skip)]
    pub city_allow: BTreeMap<String, Vec<u64>>,
    /// Denied city IDs keyed by country code.
    #[serde(skip)]
    pub city_deny: BTreeMap<String, Vec<u64>>,
    /// Allowed ISPs keyed by country code.
    #[serde(skip)]
    pub isp_allow: BTreeMap<String, Vec<String>>,
    /// Allowed sub values keyed by sub name.
    #[serde(skip)]
    pub sub_allow: BTreeMap<String, Vec<String>>,
    /// Denied sub values keyed by sub name.
    #[serde(skip)]
    pub sub_deny: BTreeMap<String, Vec<String>>,
    /// Denied sub combinations keyed by group name, then sub name.
    #[serde(skip)]
    pub sub_deny_groups: BTreeMap<String, BTreeMap<String, String>>,
    /// Allowed operating systems.
    #[serde(skip)]
    pub os_allow: Vec<OsTargeting>,
    /// Weighted redirect URLs.
    #[serde(skip)]
    pub urls: Vec<UrlWeight>,
}

fn keyed_lists<V: ToString>(params: &mut EncodedParams, prefix: &str, src: &BTreeMap<String, Vec<V>>) {
    for (key, values) in src {
        for value in values {
            params.append(format!("{prefix}[{key}][]"), value.to_string());
        }
    }
}

impl TargetingGroup {
    /// Encodes the group with keys relative to `targeting[i]`.
    ///
    /// # Errors
    ///
    /// Returns an error if a nested rule cannot be encoded.
    pub fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        let mut params = encoder.encode(self)?;

        keyed_lists(&mut params, "region[allow]", &self.region_allow);
        keyed_lists(&mut params, "region[deny]", &self.region_deny);
        keyed_lists(&mut params, "city[allow]", &self.city_allow);
        keyed_lists(&mut params, "city[deny]", &self.city_deny);
        keyed_lists(&mut params, "isp[allow]", &self.isp_allow);
        keyed_lists(&mut params, "sub[allow]", &self.sub_allow);
        keyed_lists(&mut params, "sub[deny]", &self.sub_deny);

        for (group, subs) in &self.sub_deny_groups {
            params.merge(encoder.encode_map(&format!("sub[deny_groups][{group}]"), subs)?);
        }

        params.merge(encoder.encode_slice("os[allow]", &self.os_allow)?);
        params.merge(encoder.encode_slice("urls", &self.urls)?);

        Ok(params)
    }
}

/// Offer settings that need bracket notation; shared by offer create and
/// update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferNestedOpts {
    /// Descriptions keyed by language code, sent as `description_lang[xx]`.
    pub description_lang: BTreeMap<String, String>,
    /// KPI texts keyed by language code, sent as `kpi[xx]`.
    pub kpi: BTreeMap<String, String>,
    /// Advertiser payments.
    pub payments: Vec<PaymentOpts>,
    /// Affiliate specific payments.
    pub partner_payments: Vec<PaymentOpts>,
    /// Landing pages.
    pub landings: Vec<LandingOpts>,
    /// OS restrictions.
    pub restriction_os: Vec<OsRestrictionOpts>,
    /// ISP restrictions.
    pub restriction_isp: Vec<IspRestrictionOpts>,
    /// Caps.
    pub caps: Vec<CapOpts>,
    /// Commission tiers.
    pub commission_tiers: Vec<CommissionTierOpts>,
    /// Targeting groups.
    pub targeting: Vec<TargetingGroup>,
    /// Sub restrictions, each a map of sub name to value.
    pub sub_restrictions: Vec<BTreeMap<String, String>>,
}

impl OfferNestedOpts {
    /// Encodes every nested setting.
    ///
    /// Empty collections produce no keys.
    ///
    /// # Errors
    ///
    /// Returns an error if an element cannot be encoded.
    pub fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        let mut params = encoder.encode_map("description_lang", &self.description_lang)?;
        params.merge(encoder.encode_map("kpi", &self.kpi)?);
        params.merge(encoder.encode_slice("payments", &self.payments)?);
        params.merge(encoder.encode_slice("partner_payments", &self.partner_payments)?);
        params.merge(encoder.encode_slice("landings", &self.landings)?);
        params.merge(encoder.encode_slice("restriction_os", &self.restriction_os)?);
        params.merge(encoder.encode_slice("restriction_isp", &self.restriction_isp)?);
        params.merge(encoder.encode_slice("caps", &self.caps)?);
        params.merge(encoder.encode_slice("commission_tiers", &self.commission_tiers)?);

        for (i, group) in self.targeting.iter().enumerate() {
            params.merge(group.to_params(encoder)?.nest(&format!("targeting[{i}]")));
        }
        for (i, subs) in self.sub_restrictions.iter().enumerate() {
            params.merge(encoder.encode_map(&format!("sub_restrictions[{i}]"), subs)?);
        }

        Ok(params)
    }
}
