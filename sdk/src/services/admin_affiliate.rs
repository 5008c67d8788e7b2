//! Affiliate management (admin API).

use std::collections::BTreeMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{AffiseClient, Audience, ClientError, Payload, Response};
use crate::encoding::{comma_separated_ints, EncodeError, EncodedParams, ParamEncoder, ToParams};
use crate::types::primitives::keyed_values;
use crate::types::{Affiliate, Postback, User};

#[derive(Debug, Deserialize)]
struct PartnerResponse {
    #[serde(default)]
    partner: Affiliate,
}

#[derive(Debug, Deserialize)]
struct PartnersResponse {
    #[serde(default)]
    partners: Vec<Affiliate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostbackResponse {
    #[serde(default)]
    pub(crate) postback: Postback,
}

#[derive(Debug, Deserialize)]
struct PostbacksResponse {
    #[serde(default)]
    postbacks: Vec<Postback>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    user: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReferralsResponse {
    /// Keyed by affiliate ID, which each value repeats in `id`.
    #[serde(default, deserialize_with = "keyed_values")]
    pub(crate) referrals: Vec<Affiliate>,
}

/// Options for [`AdminAffiliateService::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct AffiliateListOpts {
    /// Affiliate IDs.
    pub id: Vec<u64>,
    /// `1` to include balances.
    pub with_balance: Option<u8>,
    /// Limit of entities.
    pub limit: Option<u32>,
    /// Page of entities.
    pub page: Option<u32>,
    /// Only affiliates updated since this date (`YYYY-MM-DD`).
    pub updated_at: Option<String>,
    /// `0` inactive, `1` active, `2` banned, `3` on moderation.
    pub status_partner: Option<String>,
}

impl ToParams for AffiliateListOpts {}

/// Payment system attached to an affiliate on create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentSystemOpts {
    /// Payment system ID from the payment systems list.
    pub system_id: u64,
    /// Currency code.
    pub currency: String,
    /// Field values keyed by field ID.
    pub fields: BTreeMap<String, String>,
}

fn payment_system_params(params: &mut EncodedParams, systems: &[PaymentSystemOpts]) {
    for (i, system) in systems.iter().enumerate() {
        params.set(format!("payment_systems[{i}][currency]"), system.currency.as_str());
        params.set(format!("payment_systems[{i}][system_id]"), system.system_id.to_string());
        for (key, value) in &system.fields {
            params.set(format!("payment_systems[{i}][fields][{key}]"), value.as_str());
        }
    }
}

/// Options for [`AdminAffiliateService::create`] and
/// [`AdminAffiliateService::update`].
///
/// `email`, `password` and `country` are required on create.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AffiliateOpts {
    /// Email.
    pub email: Option<String>,
    /// Password.
    pub password: Option<String>,
    /// Country in ISO format.
    pub country: Option<String>,
    /// Company name.
    pub login: Option<String>,
    /// Contact person.
    pub contact_person: Option<String>,
    /// Referral percentage.
    pub ref_percent: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// `not active`, `active`, `banned` or `on moderation`.
    pub status: Option<String>,
    /// Manager ID.
    pub manager_id: Option<String>,
    /// Custom field values.
    pub custom_fields: Vec<String>,
    /// Referrer affiliate ID.
    #[serde(rename = "ref")]
    pub referrer: Option<u64>,
    /// Comma separated sub1 values.
    pub sub_account_1: Option<String>,
    /// Comma separated sub2 values.
    pub sub_account_2: Option<String>,
    /// `1` to block the sub1 values.
    pub sub_account_1_except: Option<u8>,
    /// `1` to block the sub2 values.
    pub sub_account_2_except: Option<u8>,
    /// `1` to send a welcome email; create only.
    pub notify: Option<u8>,
    /// Tipalti payee ID.
    pub tipalti_payee_id: Option<u64>,
    /// Tags; on update they replace the previous ones.
    pub tags: Vec<String>,
    /// Payment systems, sent as `payment_systems[i][...]`.
    #[serde(skip)]
    pub payment_systems: Vec<PaymentSystemOpts>,
}

impl ToParams for AffiliateOpts {
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        let mut params = encoder.encode(self)?;
        payment_system_params(&mut params, &self.payment_systems);
        Ok(params)
    }
}

/// Options for [`AdminAffiliateService::mass_update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct AffiliateMassUpdateOpts {
    /// Affiliate IDs.
    pub id: Vec<u64>,
    /// Manager ID.
    pub manager_id: Option<String>,
    /// `not active`, `active`, `banned` or `on moderation`.
    pub status: Option<String>,
}

impl ToParams for AffiliateMassUpdateOpts {}

/// Options for creating a postback on behalf of an affiliate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AffiliatePostbackOpts {
    /// Offer ID; absent for a global postback.
    pub offer_id: Option<u64>,
    /// Postback URL.
    pub url: String,
    /// `by_creating`, `confirmed`, `pending`, `declined`, `hold` or `not_found`.
    pub status: Option<String>,
    /// Goal value.
    pub goal: Option<String>,
    /// Affiliate ID.
    #[serde(rename = "pid")]
    pub affiliate_id: u64,
}

impl ToParams for AffiliatePostbackOpts {}

/// Options for editing a postback.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostbackEditOpts {
    /// Postback URL.
    pub url: String,
    /// `by_creating`, `confirmed`, `pending`, `declined`, `hold` or `not_found`.
    pub status: Option<String>,
    /// Goal value.
    pub goal: Option<String>,
}

impl ToParams for PostbackEditOpts {}

/// IDs whose postbacks are deleted, sent as one comma separated value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostbackIdsOpts {
    /// Affiliate or offer IDs.
    #[serde(skip)]
    pub ids: Vec<u64>,
}

impl ToParams for PostbackIdsOpts {
    fn to_params(&self, _: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        let mut params = EncodedParams::new();
        params.append("ids", comma_separated_ints(&self.ids));
        Ok(params)
    }
}

/// Options for [`AdminAffiliateService::list_postbacks`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostbackListOpts {
    /// Affiliate ID.
    #[serde(rename = "partner_id")]
    pub affiliate_id: u64,
    /// Limit of entities.
    pub limit: Option<u32>,
    /// Page of entities.
    pub page: Option<u32>,
}

impl ToParams for PostbackListOpts {}

/// Options for [`AdminAffiliateService::update_locale`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocaleOpts {
    /// Language.
    pub lang: Option<String>,
    /// Timezone.
    pub timezone: Option<String>,
}

impl ToParams for LocaleOpts {}

/// Affiliate endpoints of the admin API.
#[derive(Debug, Clone, Copy)]
pub struct AdminAffiliateService<'a> {
    client: &'a AffiseClient,
}

impl<'a> AdminAffiliateService<'a> {
    pub(crate) const fn new(client: &'a AffiseClient) -> Self {
        Self { client }
    }

    /// Gets an affiliate by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn get(&self, id: u64) -> Result<(Affiliate, Response), ClientError> {
        let path = format!("/3.0/admin/partner/{id}");
        let (body, response): (PartnerResponse, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.partner, response))
    }

    /// Lists affiliates.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list(&self, opts: &AffiliateListOpts) -> Result<(Vec<Affiliate>, Response), ClientError> {
        let (body, response): (PartnersResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.0/admin/partners", Audience::Admin, opts)
            .await?;
        Ok((body.partners, response))
    }

    /// Creates an affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn create(&self, opts: &AffiliateOpts) -> Result<(Affiliate, Response), ClientError> {
        let (body, response): (PartnerResponse, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/admin/partner", Audience::Admin, opts)
            .await?;
        Ok((body.partner, response))
    }

    /// Updates an affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn update(
        &self,
        id: u64,
        opts: &AffiliateOpts,
    ) -> Result<(Affiliate, Response), ClientError> {
        let path = format!("/3.0/admin/partner/{id}");
        let (body, response): (PartnerResponse, _) = self
            .client
            .fetch_opts(Method::POST, &path, Audience::Admin, opts)
            .await?;
        Ok((body.partner, response))
    }

    /// Updates several affiliates at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn mass_update(&self, opts: &AffiliateMassUpdateOpts) -> Result<Response, ClientError> {
        let params = self.client.encode(opts)?;
        self.client
            .send(
                Method::POST,
                "/3.0/admin/partners/mass-update",
                Audience::Admin,
                Payload::Form(params),
            )
            .await
    }

    /// Generates a new password for an affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn change_password(&self, id: u64) -> Result<(Affiliate, Response), ClientError> {
        let path = format!("/3.0/admin/partner/password/{id}");
        let (body, response): (PartnerResponse, _) = self
            .client
            .fetch(Method::POST, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.partner, response))
    }

    /// Creates a postback for an affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn add_postback(
        &self,
        opts: &AffiliatePostbackOpts,
    ) -> Result<(Postback, Response), ClientError> {
        let (body, response): (PostbackResponse, _) = self
            .client
            .fetch_opts(Method::POST, "/3.0/partner/postback", Audience::Admin, opts)
            .await?;
        Ok((body.postback, response))
    }

    /// Edits a postback.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn edit_postback(
        &self,
        id: u64,
        opts: &PostbackEditOpts,
    ) -> Result<(Postback, Response), ClientError> {
        let path = format!("/3.0/partner/postback/{id}");
        let (body, response): (PostbackResponse, _) = self
            .client
            .fetch_opts(Method::POST, &path, Audience::Admin, opts)
            .await?;
        Ok((body.postback, response))
    }

    /// Deletes a postback and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn delete_postback(&self, id: u64) -> Result<(Postback, Response), ClientError> {
        let path = format!("/3.0/partner/postback/{id}/remove");
        let (body, response): (PostbackResponse, _) = self
            .client
            .fetch(Method::DELETE, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.postback, response))
    }

    /// Deletes every postback of the given affiliates.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn delete_postbacks_by_affiliates(
        &self,
        opts: &PostbackIdsOpts,
    ) -> Result<Response, ClientError> {
        let request = self.client.new_request_opts(
            Method::DELETE,
            "/3.0/partner/postbacks/by-affiliates",
            Audience::Admin,
            opts,
        )?;
        self.client.execute(request).await
    }

    /// Deletes every postback of the given offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn delete_postbacks_by_offers(
        &self,
        opts: &PostbackIdsOpts,
    ) -> Result<Response, ClientError> {
        let request = self.client.new_request_opts(
            Method::DELETE,
            "/3.0/partner/postbacks/by-offers",
            Audience::Admin,
            opts,
        )?;
        self.client.execute(request).await
    }

    /// Lists the postbacks of an affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn list_postbacks(
        &self,
        opts: &PostbackListOpts,
    ) -> Result<(Vec<Postback>, Response), ClientError> {
        let (body, response): (PostbacksResponse, _) = self
            .client
            .fetch_opts(Method::GET, "/3.0/admin/postbacks", Audience::Admin, opts)
            .await?;
        Ok((body.postbacks, response))
    }

    /// Regenerates the API key of the calling affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn change_api_key(&self) -> Result<(User, Response), ClientError> {
        let (body, response): (UserResponse, _) = self
            .client
            .fetch(Method::POST, "/3.1/partner/api_key", Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.user, response))
    }

    /// Updates the language and timezone of an affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn update_locale(&self, id: u64, opts: &LocaleOpts) -> Result<Response, ClientError> {
        let path = format!("/3.0/admin/partner/{id}/locale");
        let params = self.client.encode(opts)?;
        self.client
            .send(Method::POST, &path, Audience::Admin, Payload::Form(params))
            .await
    }

    /// Gets the referrals of an affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports a failure.
    pub async fn get_referrals(&self, id: u64) -> Result<(Vec<Affiliate>, Response), ClientError> {
        let path = format!("/3.0/admin/partner/{id}/referrals");
        let (body, response): (ReferralsResponse, _) = self
            .client
            .fetch(Method::GET, &path, Audience::Admin, Payload::Empty)
            .await?;
        Ok((body.referrals, response))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::services::test_support::{client, form_body};

    #[test]
    fn test_create_opts_payment_systems() {
        let mut fields = BTreeMap::new();
        fields.insert("4".to_string(), "wallet".to_string());
        let opts = AffiliateOpts {
            email: Some("partner@example.com".to_string()),
            password: Some("secret".to_string()),
            country: Some("DE".to_string()),
            referrer: Some(5),
            payment_systems: vec![PaymentSystemOpts {
                system_id: 2,
                currency: "USD".to_string(),
                fields,
            }],
            ..Default::default()
        };
        let params = client().encode(&opts).expect("encode");
        assert_eq!(params.get("ref"), Some("5"));
        assert_eq!(params.get("payment_systems[0][currency]"), Some("USD"));
        assert_eq!(params.get("payment_systems[0][system_id]"), Some("2"));
        assert_eq!(params.get("payment_systems[0][fields][4]"), Some("wallet"));
        assert!(!params.contains_key("payment_systems"));
    }

    #[test]
    fn test_postback_ids_comma_joined() {
        let opts = PostbackIdsOpts { ids: vec![1, 2, 3] };
        let request = client()
            .new_request_opts(
                Method::DELETE,
                "/3.0/partner/postbacks/by-offers",
                Audience::Admin,
                &opts,
            )
            .expect("request");
        assert_eq!(request.url().query(), Some("ids=1%2C2%2C3"));
        assert_eq!(form_body(&request), "");
    }

    #[test]
    fn test_list_opts_repeat_ids() {
        let opts = AffiliateListOpts {
            id: vec![10, 11],
            with_balance: Some(1),
            ..Default::default()
        };
        let params = client().encode(&opts).expect("encode");
        assert_eq!(params.get_all("id"), ["10", "11"]);
        assert_eq!(params.get("with_balance"), Some("1"));
    }

    #[test]
    fn test_referrals_from_keyed_object() {
        let body: ReferralsResponse = serde_json::from_str(
            r#"{"status":1,"referrals":{"7":{"id":7,"email":"a@example.com"},"3":{"id":3}}}"#,
        )
        .expect("referrals");
        let ids: Vec<u64> = body.referrals.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![7, 3]);
        assert_eq!(body.referrals[0].email, "a@example.com");
    }
}
