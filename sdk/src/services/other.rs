//! Public reference data.

use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{AffiseClient, Audience, ClientError, Payload, Response};
use crate::encoding::ToParams;
use crate::types::{Country, Isp, Region};

#[derive(Debug, Deserialize)]
struct IspsResponse {
    #[serde(default)]
    isps: Vec<Isp>,
}

#[derive(Debug, Deserialize)]
struct CountriesResponse {
    #[serde(default)]
    countries: Vec<Country>,
}

#[derive(Debug, Deserialize)]
struct RegionsResponse {
    #[serde(default)]
    regions: Vec<Region>,
}

#[derive(Debug, Deserialize)]
struct TypesResponse {
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct VendorsResponse {
    #[serde(default)]
    vendors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OsesResponse {
    #[serde(default)]
    oses: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct VersionsResponse {
    #[serde(default)]
    versions: Vec<String>,
}

/// Options for [`OtherService::list_isp`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct IspListOpts {
    /// Country code, for example `US`.
    pub country: String,
    /// Search query.
    pub q: Option<String>,
}

impl ToParams for IspListOpts {}

/// Options for [`OtherService::list_regions`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegionListOpts {
    /// Country code, for example `US`.
    pub country: String,
}

impl ToParams for RegionListOpts {}

/// Options for [`OtherService::list_vendors`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct VendorListOpts {
    /// Search query.
    pub q: Option<String>,
}

impl ToParams for VendorListOpts {}

/// Reference data shared by every API key.
#[derive(Debug, Clone, Copy)]
pub struct OtherService<'a> {
    client: &'a AffiseClient,
}

impl<'a> OtherService<'a> {
    pub(crate) const fn new(client: &'a AffiseClient) -> Self {
        Self { client }
    }

    /// Lists internet service providers of a country.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_isp(&self, opts: &IspListOpts) -> Result<(Vec<Isp>, Response), ClientError> {
        let (body, response): (IspsResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.1/isp", Audience::Public, opts)
            .await?;
        Ok((body.isps, response))
    }

    /// Lists countries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_countries(&self) -> Result<(Vec<Country>, Response), ClientError> {
        let (body, response): (CountriesResponse, _) = self
            .client
            .fetch(Method::GET, "/3.1/countries", Audience::Public, Payload::Empty)
            .await?;
        Ok((body.countries, response))
    }

    /// Lists regions of a country.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_regions(&self, opts: &RegionListOpts) -> Result<(Vec<Region>, Response), ClientError> {
        let (body, response): (RegionsResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.1/regions", Audience::Public, opts)
            .await?;
        Ok((body.regions, response))
    }

    /// Lists connection types.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_connection_types(&self) -> Result<(Vec<String>, Response), ClientError> {
        let (body, response): (TypesResponse, _) = self
            .client
            .fetch(Method::GET, "/3.1/connection-types", Audience::Public, Payload::Empty)
            .await?;
        Ok((body.types, response))
    }

    /// Lists device vendors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_vendors(&self, opts: &VendorListOpts) -> Result<(Vec<String>, Response), ClientError> {
        let (body, response): (VendorsResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.1/vendors", Audience::Public, opts)
            .await?;
        Ok((body.vendors, response))
    }

    /// Lists operating systems keyed by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_os(&self) -> Result<(HashMap<String, String>, Response), ClientError> {
        let (body, response): (OsesResponse, _) = self
            .client
            .fetch(Method::GET, "/3.1/oses", Audience::Public, Payload::Empty)
            .await?;
        Ok((body.oses, response))
    }

    /// Lists the known versions of an operating system.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_os_versions(&self, os: &str) -> Result<(Vec<String>, Response), ClientError> {
        let path = format!("/3.1/oses/{os}");
        let (body, response): (VersionsResponse, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Public, Payload::Empty)
            .await?;
        Ok((body.versions, response))
    }
}
