//! HTTP client for the Affise REST API.
//!
//! This module provides the request pipeline shared by every service:
//! build → encode → send → buffer → parse envelope → classify → decode.
//!
//! # Example
//!
//! ```rust,ignore
//! use affise_sdk::client::{AffiseClient, ClientConfig};
//! use affise_sdk::services::offer::OfferListOpts;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("my-api-key")
//!         .with_base_url("https://api-demo.affise.com")
//!         .with_admin_url("https://api-demo.affise.com");
//!     let client = AffiseClient::new(config)?;
//!
//!     let opts = OfferListOpts { limit: Some(10), ..Default::default() };
//!     let (offers, response) = client.offer().list(&opts).await?;
//!     println!("Found {} offers, page {:?}", offers.len(), response.pagination());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod response;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::{AffiseClient, Audience, Payload};
pub use response::{check_response, Meta, Pagination, Response, ResponseError};
