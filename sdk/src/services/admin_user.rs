//! Admin users (admin API).

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{AffiseClient, Audience, ClientError, Payload, Response};
use crate::encoding::ToParams;
use crate::types::{Permissions, User, UserType};

#[derive(Debug, Deserialize)]
struct UsersResponse {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    user: User,
}

#[derive(Debug, Deserialize)]
struct PermissionsResponse {
    #[serde(default)]
    permissions: Permissions,
}

/// Options for [`AdminUserService::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserListOpts {
    /// Page of entities.
    pub page: Option<u32>,
    /// Limit of entities.
    pub limit: Option<u32>,
    /// Only users updated since this date (`YYYY-MM-DD`).
    pub updated_at: Option<String>,
    /// Search query.
    pub q: Option<String>,
}

impl ToParams for UserListOpts {}

/// Options for [`AdminUserService::create`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserCreateOpts {
    /// Email.
    pub email: String,
    /// Password, at least six characters.
    pub password: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Roles, see the `ROLE_*` constants.
    pub roles: Vec<String>,
    /// Skype.
    pub skype: Option<String>,
    /// Working hours.
    pub work_hours: Option<String>,
    /// Base64 encoded jpeg avatar.
    pub avatar: Option<String>,
}

impl ToParams for UserCreateOpts {}

/// Options for [`AdminUserService::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdateOpts {
    /// Email.
    pub email: Option<String>,
    /// Password, at least six characters.
    pub password: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Roles, see the `ROLE_*` constants.
    pub roles: Vec<String>,
    /// Skype.
    pub skype: Option<String>,
    /// Working hours.
    pub work_hours: Option<String>,
    /// User type.
    #[serde(rename = "type")]
    pub kind: Option<UserType>,
    /// Base64 encoded jpeg avatar.
    pub avatar: Option<String>,
}

impl ToParams for UserUpdateOpts {}

/// Options for [`AdminUserService::change_password`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPasswordOpts {
    /// New password, at least six characters.
    pub password: String,
}

impl ToParams for UserPasswordOpts {}

#[derive(Debug, Serialize)]
struct PermissionsBody<'a> {
    permissions: &'a Permissions,
}

/// User endpoints of the admin API.
#[derive(Debug, Clone, Copy)]
pub struct AdminUserService<'a> {
    client: &'a AffiseClient,
}

impl<'a> AdminUserService<'a> {
    pub(crate) const fn new(client: &'a AffiseClient) -> Self {
        Self { client }
    }

    /// Lists users.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list(&self, opts: &UserListOpts) -> Result<(Vec<User>, Response), ClientError> {
        let (body, response): (UsersResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.0/admin/users", Audience::Admin, opts)
            .await?;
        Ok((body.users, response))
    }

    /// Gets a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn get(&self, id: &str) -> Result<(User, Response), ClientError> {
        let path = format!("/3.0/admin/user/{id}");
        let (body, response): (UserResponse, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.user, response))
    }

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn create(&self, opts: &UserCreateOpts) -> Result<(User, Response), ClientError> {
        self.post_user("/3.0/admin/user", opts).await
    }

    /// Updates a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn update(&self, id: &str, opts: &UserUpdateOpts) -> Result<(User, Response), ClientError> {
        self.post_user(&format!("/3.0/admin/user/{id}"), opts).await
    }

    /// Generates a new API key for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn change_api_key(&self, id: &str) -> Result<(User, Response), ClientError> {
        let path = format!("/3.0/admin/user/api_key/{id}");
        let (body, response): (UserResponse, _) = self
            .client
            .fetch(Method::POST, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.user, response))
    }

    /// Changes the password of a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn change_password(
        &self,
        id: &str,
        opts: &UserPasswordOpts,
    ) -> Result<(User, Response), ClientError> {
        self.post_user(&format!("/3.0/admin/user/{id}/password"), opts).await
    }

    /// Replaces the permissions of a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized, the request fails
    /// or the API reports a failure.
    pub async fn update_permissions(
        &self,
        id: &str,
        permissions: &Permissions,
    ) -> Result<(Permissions, Response), ClientError> {
        let path = format!("/3.1/user/{id}/permissions");
        let payload = Payload::json(&PermissionsBody { permissions })?;
        let (body, response): (PermissionsResponse, _) = self
            .client
            .fetch(Method::POST, &path, Audience::Admin, payload)
            .await?;
        Ok((body.permissions, response))
    }

    async fn post_user<O: ToParams>(&self, path: &str, opts: &O) -> Result<(User, Response), ClientError> {
        let (body, response): (UserResponse, _) = self
            .client
            .fetch_opts(Method::POST, path, Audience::Admin, opts)
            .await?;
        Ok((body.user, response))
    }
}
