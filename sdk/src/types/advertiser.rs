//! Advertiser types.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::SubAccount;

/// Account manager attached to an advertiser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvertiserManager {
    /// Manager ID.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email.
    pub email: String,
    /// Skype.
    pub skype: String,
    /// Roles.
    pub roles: Vec<String>,
    /// API key.
    pub api_key: String,
    /// Creation time.
    pub created_at: String,
}

/// Advertiser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Advertiser {
    /// Advertiser ID.
    pub id: String,
    /// Company name.
    pub title: String,
    /// Contact person.
    pub contact: String,
    /// Email.
    pub email: String,
    /// Site URL.
    pub url: String,
    /// Manager ID.
    pub manager: String,
    /// Manager details.
    pub manager_obj: Option<AdvertiserManager>,
    /// Allowed IPs.
    pub allowed_ip: Vec<String>,
    /// Disallowed IPs.
    pub disallowed_ip: Vec<String>,
    /// Skype.
    pub skype: String,
    /// Note.
    pub note: String,
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
    /// VAT code.
    pub vat_code: String,
    /// Sub accounts keyed by sub name.
    pub sub_accounts: HashMap<String, SubAccount>,
    /// Postback password hash.
    pub hash_password: String,
    /// Whether only personal targeting is considered.
    pub consider_personal_targeting_only: bool,
}

/// Line of an advertiser invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceDetail {
    /// Offer ID.
    pub offer_id: u64,
    /// Payout type.
    pub payout_type: String,
    /// Number of actions.
    pub actions: u64,
    /// Amount.
    pub amount: Decimal,
    /// Comment.
    pub comment: String,
}

/// Advertiser invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    /// Invoice number.
    pub number: u64,
    /// Advertiser ID.
    pub supplier_id: String,
    /// Creation time.
    pub created_at: String,
    /// Last update time.
    pub updated_at: String,
    /// Start of the invoiced period.
    pub start_date: String,
    /// End of the invoiced period.
    pub end_date: String,
    /// `paid` or `unpaid`.
    pub status: String,
    /// Invoice lines.
    pub detail: Vec<InvoiceDetail>,
    /// Currency code.
    pub currency: String,
    /// Comment.
    pub comment: String,
}
