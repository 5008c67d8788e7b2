//! Admin user and permission preset types.

use serde::{Deserialize, Serialize};

/// Administrator.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
/// Affiliate manager.
pub const ROLE_MANAGER_AFFILIATE: &str = "ROLE_MANAGER_AFFILIATE";
/// Sales manager.
pub const ROLE_MANAGER_SALES: &str = "ROLE_MANAGER_SALES";
/// Offer section.
pub const ROLE_SECTION_OFFER: &str = "ROLE_SECTION_OFFER";
/// Supplier section.
pub const ROLE_SECTION_SUPPLIER: &str = "ROLE_SECTION_SUPPLIER";
/// Dashboard section.
pub const ROLE_SECTION_DASHBOARD: &str = "ROLE_SECTION_DASHBOARD";
/// News section.
pub const ROLE_SECTION_NEWS: &str = "ROLE_SECTION_NEWS";
/// Category section.
pub const ROLE_SECTION_CATEGORY: &str = "ROLE_SECTION_CATEGORY";
/// Affiliate section.
pub const ROLE_SECTION_PARTNER: &str = "ROLE_SECTION_PARTNER";
/// Billing section.
pub const ROLE_SECTION_PAYMENT: &str = "ROLE_SECTION_PAYMENT";
/// Ticket section.
pub const ROLE_SECTION_TICKET: &str = "ROLE_SECTION_TICKET";
/// Statistics section.
pub const ROLE_SECTION_STATS: &str = "ROLE_SECTION_STATS";
/// Daily statistics.
pub const ROLE_SECTION_STATS_COMMON: &str = "ROLE_SECTION_STATS_COMMON";
/// Conversion statistics.
pub const ROLE_SECTION_STATS_CONVERSION: &str = "ROLE_SECTION_STATS_CONVERSION";
/// Supplier statistics.
pub const ROLE_SECTION_STATS_SUPPLIER: &str = "ROLE_SECTION_STATS_SUPPLIER";
/// Offer statistics.
pub const ROLE_SECTION_STATS_OFFER: &str = "ROLE_SECTION_STATS_OFFER";
/// Country statistics.
pub const ROLE_SECTION_STATS_COUNTRY: &str = "ROLE_SECTION_STATS_COUNTRY";
/// City statistics.
pub const ROLE_SECTION_STATS_CITY: &str = "ROLE_SECTION_STATS_CITY";
/// OS statistics.
pub const ROLE_SECTION_STATS_OS: &str = "ROLE_SECTION_STATS_OS";
/// Goal statistics.
pub const ROLE_SECTION_STATS_GOAL: &str = "ROLE_SECTION_STATS_GOAL";
/// Device statistics.
pub const ROLE_SECTION_STATS_DEVICE: &str = "ROLE_SECTION_STATS_DEVICE";
/// Cap statistics.
pub const ROLE_SECTION_STATS_LIMITS: &str = "ROLE_SECTION_STATS_LIMITS";
/// Affiliate postback statistics.
pub const ROLE_SECTION_STATS_PARTNER_POSTBACK: &str = "ROLE_SECTION_STATS_PARTNER_POSTBACK";
/// Server postback statistics.
pub const ROLE_SECTION_STATS_SERVER_POSTBACK: &str = "ROLE_SECTION_STATS_SERVER_POSTBACK";
/// Automation section.
pub const ROLE_SECTION_AUTOMATION: &str = "ROLE_SECTION_AUTOMATION";
/// Comparison report.
pub const ROLE_SECTION_STATS_COMPARISON: &str = "ROLE_SECTION_STATS_COMPARISON";

/// Kind of admin user, also used as the preset type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// Administrator.
    CommonManager,
    /// Affiliate manager.
    AffiliateManager,
    /// Account manager.
    AccountManager,
}

impl UserType {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CommonManager => "common_manager",
            Self::AffiliateManager => "affiliate_manager",
            Self::AccountManager => "account_manager",
        }
    }
}

/// Permission tree of a user or preset.
///
/// The structure is large and changes between API versions, so it is kept
/// as raw JSON and passed back unchanged on updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(pub serde_json::Value);

impl From<serde_json::Value> for Permissions {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Admin user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// User ID.
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
    /// Working hours.
    pub work_hours: String,
    /// Last update time.
    pub updated_at: String,
    /// Creation time.
    pub created_at: String,
    /// Last login time.
    pub last_login_at: String,
    /// User type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Avatar URL.
    pub avatar: String,
    /// Info.
    pub info: String,
    /// Password, only returned right after it was generated.
    pub password: String,
    /// Permissions.
    pub permissions: Option<Permissions>,
}

/// Permission preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    /// Preset ID.
    pub id: String,
    /// Name.
    pub name: String,
    /// Permissions.
    pub permissions: Option<Permissions>,
    /// Creation time.
    pub created_at: String,
    /// Last update time.
    pub updated_at: String,
}
