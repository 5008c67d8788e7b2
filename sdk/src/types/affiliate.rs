//! Affiliate types.
//!
//! Affiliates are called partners on the wire; both names refer to the
//! same account.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::{u64_from_str_or_int, SubAccount};

/// Balance in one currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceItem {
    /// Total balance.
    pub balance: Decimal,
    /// Amount on hold.
    pub hold: Decimal,
    /// Amount available for payout.
    pub available: Decimal,
}

/// Balances keyed by currency code.
pub type Balance = HashMap<String, BalanceItem>;

/// Manager assigned to an affiliate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manager {
    /// Manager ID.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Working hours.
    pub work_hours: String,
    /// Email.
    pub email: String,
    /// Skype.
    pub skype: String,
    /// API key.
    pub api_key: String,
    /// Roles.
    pub roles: Vec<String>,
    /// Last update time.
    pub updated_at: String,
}

/// Payment system of an affiliate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSystem {
    /// Payment system ID.
    pub id: u64,
    /// Label.
    pub lang_label: String,
    /// Currency code.
    pub currency: String,
    /// Payment fields; either a map of values or a list of field
    /// descriptions depending on the endpoint.
    pub fields: serde_json::Value,
}

/// Custom field of an affiliate profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomField {
    /// Field ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Whether the field is required.
    pub required: bool,
    /// Label.
    pub lang_label: String,
    /// Localized label; a string or a map.
    pub label: serde_json::Value,
    /// Value.
    pub value: serde_json::Value,
}

/// Affiliate account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Affiliate {
    /// Affiliate ID.
    pub id: u64,
    /// Creation time.
    pub created_at: String,
    /// Last update time.
    pub updated_at: String,
    /// Email.
    pub email: String,
    /// Company name.
    pub login: String,
    /// Referral percentage.
    pub ref_percent: String,
    /// Name.
    pub name: String,
    /// Notes.
    pub notes: String,
    /// Assigned manager.
    pub manager: Manager,
    /// Status.
    pub status: String,
    /// Payment systems.
    pub payment_systems: Vec<PaymentSystem>,
    /// Custom fields.
    #[serde(rename = "customFields")]
    pub custom_fields: Vec<CustomField>,
    /// Balances.
    pub balance: Balance,
    /// Number of connected offers.
    #[serde(rename = "offersCount")]
    pub offers_count: u64,
    /// API key.
    pub api_key: String,
    /// Main address.
    pub address_1: String,
    /// Additional address.
    pub address_2: String,
    /// City.
    pub city: String,
    /// Country in ISO format.
    pub country: String,
    /// Zip code.
    pub zip_code: String,
    /// Phone.
    pub phone: String,
    /// Referrer ID.
    #[serde(rename = "ref")]
    pub referrer: String,
    /// Sub accounts keyed by sub name.
    pub sub_accounts: HashMap<String, SubAccount>,
    /// Contact person.
    #[serde(rename = "contactPerson")]
    pub contact_person: String,
}

/// Affiliate postback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Postback {
    /// Postback ID.
    pub id: u64,
    /// Postback URL.
    pub url: String,
    /// Conversion status that triggers the postback.
    pub status: String,
    /// Goal value.
    pub goal: String,
    /// Creation time.
    pub created: String,
    /// Last update time.
    pub updated_at: String,
    /// Forced flag.
    pub forced: String,
    /// Affiliate ID.
    #[serde(rename = "pid", deserialize_with = "u64_from_str_or_int")]
    pub affiliate_id: u64,
}

/// Object ID of a news item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectId {
    /// Hex ID.
    #[serde(rename = "$id")]
    pub id: String,
}

/// Timestamp split into seconds and microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitTimestamp {
    /// Seconds since the epoch.
    pub sec: i64,
    /// Microseconds.
    pub usec: i64,
}

impl SplitTimestamp {
    /// Converts to a UTC date time. Returns `None` when out of range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.usec.checked_mul(1_000)?).ok()?;
        DateTime::from_timestamp(self.sec, nanos)
    }
}

/// News item shown to affiliates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    /// News ID.
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Title.
    pub title: String,
    /// Short description.
    pub small_desc: String,
    /// Full description.
    pub desc: String,
    /// Status.
    pub status: i32,
    /// Creation time.
    pub created_at: SplitTimestamp,
}
