//! Resource services.
//!
//! Each service is a lightweight handle borrowing an [`AffiseClient`];
//! create one per call site with the accessor of the same name:
//!
//! ```rust,ignore
//! let (advertisers, _) = client.admin_advertiser().list(&Default::default()).await?;
//! let (me, _) = client.affiliate().me().await?;
//! ```
//!
//! Services prefixed with `admin_` target the admin base URL, the others the
//! public one.

pub mod admin_advertiser;
pub mod admin_billing;
pub mod admin_conversion;
pub mod admin_affiliate;
pub mod admin_offer;
pub mod admin_other;
pub mod admin_preset;
pub mod admin_user;
pub mod affiliate;
pub mod offer;
pub mod other;
pub mod statistic;

use crate::client::AffiseClient;

pub use admin_advertiser::AdminAdvertiserService;
pub use admin_affiliate::AdminAffiliateService;
pub use admin_billing::AdminBillingService;
pub use admin_conversion::AdminConversionService;
pub use admin_offer::AdminOfferService;
pub use admin_other::AdminOtherService;
pub use admin_preset::AdminPresetService;
pub use admin_user::AdminUserService;
pub use affiliate::AffiliateService;
pub use offer::OfferService;
pub use other::OtherService;
pub use statistic::StatisticService;

impl AffiseClient {
    /// Advertiser management.
    #[must_use]
    pub const fn admin_advertiser(&self) -> AdminAdvertiserService<'_> {
        AdminAdvertiserService::new(self)
    }

    /// Advertiser invoices.
    #[must_use]
    pub const fn admin_billing(&self) -> AdminBillingService<'_> {
        AdminBillingService::new(self)
    }

    /// Conversion editing and import.
    #[must_use]
    pub const fn admin_conversion(&self) -> AdminConversionService<'_> {
        AdminConversionService::new(self)
    }

    /// Affiliate management.
    #[must_use]
    pub const fn admin_affiliate(&self) -> AdminAffiliateService<'_> {
        AdminAffiliateService::new(self)
    }

    /// Offer management.
    #[must_use]
    pub const fn admin_offer(&self) -> AdminOfferService<'_> {
        AdminOfferService::new(self)
    }

    /// Reference data, tickets, pixels and smartlink categories.
    #[must_use]
    pub const fn admin_other(&self) -> AdminOtherService<'_> {
        AdminOtherService::new(self)
    }

    /// Permission presets.
    #[must_use]
    pub const fn admin_preset(&self) -> AdminPresetService<'_> {
        AdminPresetService::new(self)
    }

    /// Admin users.
    #[must_use]
    pub const fn admin_user(&self) -> AdminUserService<'_> {
        AdminUserService::new(self)
    }

    /// Affiliate self-service API.
    #[must_use]
    pub const fn affiliate(&self) -> AffiliateService<'_> {
        AffiliateService::new(self)
    }

    /// Public offer catalogue.
    #[must_use]
    pub const fn offer(&self) -> OfferService<'_> {
        OfferService::new(self)
    }

    /// Public reference data.
    #[must_use]
    pub const fn other(&self) -> OtherService<'_> {
        OtherService::new(self)
    }

    /// Statistics.
    #[must_use]
    pub const fn statistic(&self) -> StatisticService<'_> {
        StatisticService::new(self)
    }
}


#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::client::{Audience, ClientConfig, ClientError};

    #[test]
    fn test_admin_service_without_admin_url() {
        let config = ClientConfig::new("test-key").with_base_url("https://api.example.com");
        let client = AffiseClient::new(config).expect("client");

        let result = tokio_test::block_on(client.admin_other().list_devices());
        assert!(matches!(result, Err(ClientError::MissingBaseUrl(Audience::Admin))));
    }

    #[test]
    fn test_public_service_without_base_url() {
        let config = ClientConfig::new("test-key").with_admin_url("https://admin.example.com");
        let client = AffiseClient::new(config).expect("client");

        let result = tokio_test::block_on(client.other().list_countries());
        assert!(matches!(result, Err(ClientError::MissingBaseUrl(Audience::Public))));
    }
}
