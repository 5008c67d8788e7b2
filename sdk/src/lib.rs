//! Affise SDK - Rust client library for the Affise affiliate platform.
//!
//! This crate wraps the Affise REST API: the public (affiliate) endpoints
//! and the admin endpoints, each served from its own base URL.
//!
//! # Modules
//!
//! - [`client`] - [`AffiseClient`], configuration, responses and errors
//! - [`encoding`] - Conversion of option structs into query and form parameters
//! - [`services`] - One handle per resource group (`client.offer()`, `client.statistic()`...)
//! - [`types`] - Models returned by the API
//!
//! # Example
//!
//! ```rust,no_run
//! use affise_sdk::{AffiseClient, ClientConfig};
//! use affise_sdk::services::statistic::{GroupedStatOpts, StatFilter, StatGrouping};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("your-api-key")
//!         .with_base_url("https://api-demo.affise.com");
//!     let client = AffiseClient::new(config)?;
//!
//!     let opts = GroupedStatOpts {
//!         filter: StatFilter::between("2024-01-01", "2024-01-31"),
//!         ..Default::default()
//!     };
//!     let (rows, _) = client.statistic().get_by(StatGrouping::Date, &opts).await?;
//!     println!("{} rows", rows.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod encoding;
pub mod services;
pub mod types;

pub use client::{AffiseClient, Audience, ClientConfig, ClientError, Payload, Response};
pub use encoding::{EncodeError, EncodedParams, ParamEncoder, ToParams};
