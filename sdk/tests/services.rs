//! Service calls end to end: request shape on the wire and decoded results.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use affise_sdk::services::admin_affiliate::PostbackIdsOpts;
use affise_sdk::services::admin_billing::InvoiceListOpts;
use affise_sdk::services::admin_offer::{CapOpts, OfferCreateOpts, OfferNestedOpts, PaymentOpts};
use affise_sdk::services::admin_other::CurrencyListOpts;
use affise_sdk::services::admin_preset::PresetCreateOpts;
use affise_sdk::services::affiliate::NewsListOpts;
use affise_sdk::services::statistic::{GroupedStatOpts, StatFilter, StatGrouping};
use affise_sdk::types::user::{Permissions, UserType};
use axum::http::{Method, StatusCode};
use common::{pairs, MockServer};
use rust_decimal::Decimal;
use serde_json::json;

fn pair(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}

#[tokio::test]
async fn test_offer_create_sends_bracketed_form() {
    let server = MockServer::start().await;
    server.on_json(
        Method::POST,
        "/3.0/admin/offer",
        StatusCode::OK,
        r#"{"status":1,"offer":{"id":1070,"offer_id":"abc","title":"Sweepstakes"}}"#,
    );

    let opts = OfferCreateOpts {
        title: "Sweepstakes".to_string(),
        advertiser: "5a0b1c2d".to_string(),
        url: "https://tracker.example.com/{clickid}".to_string(),
        settings: Default::default(),
        nested: OfferNestedOpts {
            payments: vec![PaymentOpts {
                countries: vec!["US".to_string(), "CA".to_string()],
                total: Some(Decimal::new(25, 1)),
                currency: Some("USD".to_string()),
                kind: Some("fixed".to_string()),
                ..Default::default()
            }],
            caps: vec![CapOpts {
                period: Some("day".to_string()),
                value: Some(Decimal::from(50)),
                ..Default::default()
            }],
            ..Default::default()
        },
    };
    let (offer, _) = server.client().admin_offer().create(&opts).await.expect("create");
    assert_eq!(offer.id, 1070);

    let request = server.only_request();
    assert_eq!(request.headers["content-type"], "application/x-www-form-urlencoded");
    assert!(request.query.is_none());
    assert_eq!(
        pairs(&request.body),
        vec![
            pair("advertiser", "5a0b1c2d"),
            pair("caps[0][period]", "day"),
            pair("caps[0][value]", "50"),
            pair("payments[0][countries][]", "CA"),
            pair("payments[0][countries][]", "US"),
            pair("payments[0][currency]", "USD"),
            pair("payments[0][total]", "2.5"),
            pair("payments[0][type]", "fixed"),
            pair("title", "Sweepstakes"),
            pair("url", "https://tracker.example.com/{clickid}"),
        ]
    );
}

#[tokio::test]
async fn test_stats_get_by_date() {
    let server = MockServer::start().await;
    server.on_fixture(Method::GET, "/3.0/stats/getbydate", "stats_getbydate.json");

    let mut filter = StatFilter::between("2024-01-30", "2024-01-31");
    filter.offer = vec![1066];
    let opts = GroupedStatOpts {
        filter,
        ..Default::default()
    };
    let (stats, response) = server
        .client()
        .statistic()
        .get_by(StatGrouping::Date, &opts)
        .await
        .expect("stats");

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].slice.day, Some(30));
    assert_eq!(stats[0].traffic.raw, "1520");
    assert_eq!(stats[0].actions["confirmed"].count, 17.0);
    assert_eq!(stats[1].actions.len(), 1);
    assert_eq!(response.pagination().map(|p| p.next_page), Some(None));

    let request = server.only_request();
    assert_eq!(
        pairs(request.query.as_deref().expect("query")),
        vec![
            pair("filter[date_from]", "2024-01-30"),
            pair("filter[date_to]", "2024-01-31"),
            pair("filter[offer]", "1066"),
        ]
    );
}

#[tokio::test]
async fn test_news_keeps_document_order() {
    let server = MockServer::start().await;
    server.on_fixture(Method::GET, "/3.0/news", "news_list.json");

    let opts = NewsListOpts {
        limit: Some(2),
        ..Default::default()
    };
    let (items, _) = server.client().affiliate().list_news(&opts).await.expect("news");

    let titles: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["New offers for Q1", "Holiday schedule"]);
    let ids: Vec<&str> = items.iter().map(|item| item.id.id.as_str()).collect();
    assert_eq!(ids, ["65a0f1c2e4b0a1b2c3d4e5f7", "65a0f1c2e4b0a1b2c3d4e5f6"]);
    assert_eq!(server.only_request().query.as_deref(), Some("limit=2"));
}

#[tokio::test]
async fn test_invoices_from_message_field() {
    let server = MockServer::start().await;
    server.on_fixture(Method::GET, "/3.0/admin/advertiser-invoices", "invoices_list.json");

    let opts = InvoiceListOpts {
        status: Some("unpaid".to_string()),
        ..Default::default()
    };
    let (invoices, response) = server.client().admin_billing().list(&opts).await.expect("invoices");

    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].number, 17);
    assert_eq!(invoices[0].status, "unpaid");
    assert_eq!(response.meta_message(), "");
    assert_eq!(server.only_request().query.as_deref(), Some("status=unpaid"));
}

#[tokio::test]
async fn test_preset_create_sends_json() {
    let server = MockServer::start().await;
    server.on_json(
        Method::POST,
        "/3.1/presets",
        StatusCode::OK,
        r#"{"status":1,"preset":{"id":"p1","name":"Support"}}"#,
    );

    let opts = PresetCreateOpts {
        name: "Support".to_string(),
        permissions: Permissions::from(json!({"stats": {"general": "read"}})),
        kind: UserType::AccountManager,
    };
    let (preset, _) = server.client().admin_preset().create(&opts).await.expect("preset");
    assert_eq!(preset.id, "p1");

    let request = server.only_request();
    assert_eq!(request.headers["content-type"], "application/json");
    let body: serde_json::Value = serde_json::from_str(&request.body).expect("json body");
    assert_eq!(
        body,
        json!({
            "name": "Support",
            "permissions": {"stats": {"general": "read"}},
            "type": "account_manager"
        })
    );
}

#[tokio::test]
async fn test_extended_currencies() {
    let server = MockServer::start().await;
    server.on_json(
        Method::GET,
        "/3.0/admin/currency",
        StatusCode::OK,
        r#"{"status":1,"quotes":[{"_id":1,"code":"USD","active":true,"default":true,"rate":"1.0"}]}"#,
    );

    let opts = CurrencyListOpts {
        get_only_active: Some(1),
    };
    let (currencies, _) = server
        .client()
        .admin_other()
        .list_currencies_extended(&opts)
        .await
        .expect("currencies");

    assert_eq!(currencies.len(), 1);
    assert_eq!(currencies[0].code, "USD");
    assert_eq!(currencies[0].rate, Decimal::ONE);
    assert_eq!(
        pairs(server.only_request().query.as_deref().expect("query")),
        vec![pair("extended", "1"), pair("get_only_active", "1")]
    );
}

#[tokio::test]
async fn test_delete_postbacks_by_offers_uses_query() {
    let server = MockServer::start().await;
    server.on_json(
        Method::DELETE,
        "/3.0/partner/postbacks/by-offers",
        StatusCode::OK,
        r#"{"status":1}"#,
    );

    let opts = PostbackIdsOpts { ids: vec![1, 2] };
    server
        .client()
        .affiliate()
        .delete_postbacks_by_offers(&opts)
        .await
        .expect("delete");

    let request = server.only_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.query.as_deref(), Some("ids=1%2C2"));
    assert!(request.body.is_empty());
}
