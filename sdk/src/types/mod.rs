//! Domain models returned by the Affise API.
//!
//! Every model tolerates missing fields: absent keys take their default
//! value, unknown keys are ignored.

pub mod advertiser;
pub mod affiliate;
pub mod offer;
pub mod primitives;
pub mod reference;
pub mod statistic;
pub mod user;

pub use advertiser::{Advertiser, AdvertiserManager, Invoice, InvoiceDetail};
pub use affiliate::{
    Affiliate, Balance, BalanceItem, CustomField, Manager, NewsItem, ObjectId, PaymentSystem,
    Postback, SplitTimestamp,
};
pub use offer::{Cap, Category, CommissionTier, Isp, Landing, Offer, Payment, Source};
pub use primitives::{FlexBool, SubAccount};
pub use reference::{
    City, Country, Domain, ExtendedCurrency, Pixel, Region, SmartLinkCategory, Ticket,
    TicketComments,
};
pub use statistic::{
    CapProgress, Click, Conversion, LandingInfo, ManagerRef, RefPayment, RetentionRate, Stat,
    StatAction, StatCap, StatPostback, StatSlice, StatTraffic, Sub, TimeToAction, Track,
};
pub use user::{Permissions, Preset, User, UserType};
