//! Reference data and small platform entities.
//!
//! Geography, tracking domains, currencies, tickets, pixels and smartlink
//! categories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::affiliate::Affiliate;
use super::offer::Offer;
use super::primitives::u64_from_str_or_int;

/// Country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    /// Country in ISO format.
    pub code: String,
    /// Name.
    pub name: String,
}

/// Region of a country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    /// Region ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Country in ISO format.
    pub country_code: String,
}

/// City.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    /// Country in ISO format.
    pub country_code: String,
    /// City ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Region code.
    pub region_code: String,
}

/// Tracking domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    /// Domain ID.
    pub id: u64,
    /// Domain URL.
    pub url: String,
    /// Whether HTTPS is used.
    pub use_https: bool,
}

/// Currency with its platform settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedCurrency {
    /// Currency ID.
    #[serde(rename = "_id")]
    pub id: u64,
    /// Currency code.
    pub code: String,
    /// Whether the currency is active.
    pub active: bool,
    /// Whether this is the platform default.
    pub default: bool,
    /// Exchange rate.
    pub rate: Decimal,
    /// Minimal payout.
    pub min_payment: Decimal,
    /// Whether this is a crypto currency.
    pub is_crypto: bool,
}

/// Comment counters of a ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketComments {
    /// Number of answers.
    pub answers: u64,
    /// Number of unread answers.
    pub unread: u64,
}

/// Support or offer access ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ticket {
    /// Ticket ID.
    pub id: String,
    /// Status.
    pub status: String,
    /// Ticket type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Creation time.
    pub created: String,
    /// Last update time.
    pub updated: String,
    /// Attachment URLs.
    pub attachments: Vec<String>,
    /// Comment counters.
    pub comments: TicketComments,
    /// Affiliate who opened the ticket.
    pub partner: Affiliate,
    /// Offer the ticket is about.
    pub offer: Offer,
}

/// Affiliate pixel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pixel {
    /// Pixel ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Pixel code.
    pub code: String,
    /// `javascript`, `iframe` or `image`.
    pub code_type: String,
    /// Offer ID.
    pub offer_id: String,
    /// Affiliate ID.
    #[serde(rename = "pid", deserialize_with = "u64_from_str_or_int")]
    pub affiliate_id: u64,
    /// Active flag.
    pub is_active: String,
    /// Moderation status.
    pub moderation_status: String,
    /// Creation time.
    pub created_at: String,
    /// Last update time.
    pub updated_at: String,
}

/// Smartlink category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartLinkCategory {
    /// Category ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Name.
    pub name: String,
    /// Tracking domain.
    pub domain: String,
    /// Description.
    pub description: String,
    /// Creation time.
    pub created_at: String,
    /// Last update time.
    pub updated_at: String,
}

/// Number of offers in a smartlink category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct OffersCount {
    pub count: u64,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_quoted_pid() {
        let pixel: Pixel = serde_json::from_str(
            r#"{"id": 1, "name": "px", "code_type": "image", "offer_id": "936", "pid": "610"}"#,
        )
        .expect("pixel");
        assert_eq!(pixel.affiliate_id, 610);
        assert_eq!(pixel.offer_id, "936");
    }

    #[test]
    fn test_extended_currency() {
        let currency: ExtendedCurrency = serde_json::from_str(
            r#"{"_id": 2, "code": "EUR", "active": true, "rate": "1.0842", "min_payment": 50}"#,
        )
        .expect("currency");
        assert_eq!(currency.id, 2);
        assert_eq!(currency.rate, Decimal::new(10842, 4));
        assert_eq!(currency.min_payment, Decimal::from(50));
        assert!(!currency.is_crypto);
    }
}
