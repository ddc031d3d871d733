#![allow(clippy::unwrap_used)]
// Integration tests for `JournalClient` using wiremock.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{basic_auth, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use journal_api::models::{Expansion, KeyRef};
use journal_api::{ApiHosts, Clock, Error, JournalClient, Locale, LocalizedText, Region};

// ── Helpers ─────────────────────────────────────────────────────────

struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    fn new() -> Arc<Self> {
        Arc::new(Self(Mutex::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap(),
        )))
    }

    fn advance(&self, secs: i64) {
        *self.0.lock().unwrap() += TimeDelta::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

fn hosts(server: &MockServer) -> ApiHosts {
    ApiHosts::Custom {
        token_url: Url::parse(&format!("{}/oauth/token", server.uri())).unwrap(),
        api_base: Url::parse(&server.uri()).unwrap(),
    }
}

fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

async fn setup() -> (MockServer, JournalClient) {
    let server = MockServer::start().await;
    let client = JournalClient::with_client(reqwest::Client::new(), Region::Kr, hosts(&server)).unwrap();
    client.configure("client-id", secret("client-secret")).await;
    (server, client)
}

async fn setup_with_clock() -> (MockServer, JournalClient, Arc<ManualClock>) {
    let server = MockServer::start().await;
    let clock = ManualClock::new();
    let client = JournalClient::with_client(reqwest::Client::new(), Region::Kr, hosts(&server))
        .unwrap()
        .with_clock(clock.clone());
    client.configure("client-id", secret("client-secret")).await;
    (server, client, clock)
}

async fn mount_token(server: &MockServer, token: &str, expires_in: i64, times: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(basic_auth("client-id", "client-secret"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "bearer",
            "expires_in": expires_in,
            "sub": "client-id"
        })))
        .expect(times)
        .mount(server)
        .await;
}

fn instance_json(id: u64, name: &str, expansion_id: u64, kind: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "expansion": { "id": expansion_id, "name": "Expansion" },
        "category": { "type": kind },
        "encounters": [{ "id": id * 10, "name": format!("{name} Boss") }],
        "modes": [{ "mode": { "type": "NORMAL", "name": "Normal" }, "players": 5, "is_tracked": true }]
    })
}

async fn mount_instance_index(server: &MockServer, ids: &[u64]) {
    let instances: Vec<_> = ids
        .iter()
        .map(|id| json!({ "id": id, "name": format!("Instance {id}") }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/data/wow/journal-instance/index"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "instances": instances })))
        .mount(server)
        .await;
}

async fn mount_instance(server: &MockServer, id: u64, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/data/wow/journal-instance/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Token lifecycle ─────────────────────────────────────────────────

#[tokio::test]
async fn test_token_reused_across_requests() {
    let (server, client) = setup().await;
    mount_token(&server, "tok-1", 86_399, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/wow/journal-expansion/index"))
        .and(query_param("access_token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tiers": [] })))
        .expect(3)
        .mount(&server)
        .await;

    for _ in 0..3 {
        client.list_expansions(Locale::KoKr).await.unwrap();
    }
}

#[tokio::test]
async fn test_concurrent_cold_requests_share_one_exchange() {
    let (server, client) = setup().await;
    mount_token(&server, "tok-1", 86_399, 1).await;

    let (a, b, c) = tokio::join!(
        client.tokens().get_token(),
        client.tokens().get_token(),
        client.tokens().get_token(),
    );
    assert_eq!(a.unwrap().expose_secret(), "tok-1");
    assert_eq!(b.unwrap().expose_secret(), "tok-1");
    assert_eq!(c.unwrap().expose_secret(), "tok-1");
}

#[tokio::test]
async fn test_token_refreshed_inside_expiry_margin() {
    let (server, client, clock) = setup_with_clock().await;
    mount_token(&server, "tok", 3600, 2).await;

    let first = client.verify().await.unwrap();
    assert_eq!(first, clock.now() + TimeDelta::seconds(3600));

    // Still outside the five-minute margin.
    clock.advance(3600 - 301);
    assert_eq!(client.verify().await.unwrap(), first);

    // Inside the margin: exchange again.
    clock.advance(2);
    let second = client.verify().await.unwrap();
    assert!(second > first);
}

#[tokio::test]
async fn test_short_lived_token_is_never_cached() {
    let (server, client) = setup().await;
    mount_token(&server, "tok", 120, 2).await;

    client.tokens().get_token().await.unwrap();
    client.tokens().get_token().await.unwrap();
}

#[tokio::test]
async fn test_configure_invalidates_cached_token() {
    let (server, client) = setup().await;
    mount_token(&server, "tok", 86_399, 2).await;

    client.tokens().get_token().await.unwrap();
    assert!(client.tokens().cached_expiry().await.is_some());

    client.configure("client-id", secret("client-secret")).await;
    assert!(client.tokens().cached_expiry().await.is_none());
    client.tokens().get_token().await.unwrap();
}

#[tokio::test]
async fn test_rejected_credentials_are_authentication_error() {
    let server = MockServer::start().await;
    let client = JournalClient::with_client(reqwest::Client::new(), Region::Kr, hosts(&server)).unwrap();
    client.configure("client-id", secret("wrong")).await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client",
            "error_description": "Invalid client or Invalid client credentials"
        })))
        .mount(&server)
        .await;

    let result = client.list_expansions(Locale::KoKr).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(client.tokens().cached_expiry().await.is_none());
}

#[tokio::test]
async fn test_empty_credentials_fail_without_network() {
    let server = MockServer::start().await;
    let client = JournalClient::with_client(reqwest::Client::new(), Region::Kr, hosts(&server)).unwrap();

    let result = client.tokens().get_token().await;
    assert!(matches!(result, Err(Error::Configuration { .. })));

    client.configure("", secret("client-secret")).await;
    assert!(!client.is_authenticated().await);
    let result = client.list_expansions(Locale::KoKr).await;
    assert!(matches!(result, Err(Error::Configuration { .. })));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_out_of_range_lifetime_is_authentication_error() {
    let (server, client) = setup().await;
    mount_token(&server, "tok", 1_000_000_000_000_000, 1).await;

    let result = client.tokens().get_token().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(client.tokens().cached_expiry().await.is_none());
}

// ── Request contract ────────────────────────────────────────────────

#[tokio::test]
async fn test_requests_carry_namespace_and_locale() {
    let (server, mut client) = setup().await;
    mount_token(&server, "tok", 86_399, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/wow/journal-expansion/index"))
        .and(query_param("namespace", "static-kr"))
        .and(query_param("locale", "ko_KR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tiers": [{ "id": 68, "name": "클래식" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/wow/journal-expansion/index"))
        .and(query_param("namespace", "static-eu"))
        .and(query_param("locale", "de_DE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tiers": [{ "id": 68, "name": "Classic" }]
        })))
        .mount(&server)
        .await;

    let kr = client.list_expansions(Locale::KoKr).await.unwrap();
    assert_eq!(kr[0].name.get(Locale::KoKr), Some("클래식"));

    client.set_region(Region::Eu).await.unwrap();
    assert_eq!(client.namespace(), "static-eu");
    let eu = client.list_expansions(Locale::DeDe).await.unwrap();
    assert_eq!(eu[0].name.get(Locale::DeDe), Some("Classic"));
}

#[tokio::test]
async fn test_expansions_returned_verbatim() {
    let (server, client) = setup().await;
    mount_token(&server, "tok", 86_399, 1).await;

    let href = |id: u64| {
        format!("https://us.api.blizzard.com/data/wow/journal-expansion/{id}?namespace=static-us")
    };
    Mock::given(method("GET"))
        .and(path("/data/wow/journal-expansion/index"))
        .and(query_param("locale", "en_US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_links": { "self": { "href": "ignored" } },
            "tiers": [
                { "key": { "href": href(68) }, "name": "Classic", "id": 68 },
                { "key": { "href": href(70) }, "name": "Burning Crusade", "id": 70 },
                { "name": "Current Season", "id": 505 }
            ]
        })))
        .mount(&server)
        .await;

    let tiers = client.list_expansions(Locale::EnUs).await.unwrap();
    assert_eq!(
        tiers,
        vec![
            Expansion {
                id: 68,
                name: LocalizedText::from("Classic"),
                key: Some(KeyRef { href: href(68) }),
            },
            Expansion {
                id: 70,
                name: LocalizedText::from("Burning Crusade"),
                key: Some(KeyRef { href: href(70) }),
            },
            Expansion {
                id: 505,
                name: LocalizedText::from("Current Season"),
                key: None,
            },
        ]
    );
}

#[tokio::test]
async fn test_missing_tiers_is_empty_list() {
    let (server, client) = setup().await;
    mount_token(&server, "tok", 86_399, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/wow/journal-expansion/index"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "_links": {} })))
        .mount(&server)
        .await;

    assert!(client.list_expansions(Locale::EnUs).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_api_error_carries_status_and_endpoint() {
    let (server, client) = setup().await;
    mount_token(&server, "tok", 86_399, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/wow/journal-encounter/999999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 404,
            "type": "BLZWEBAPI00000404",
            "detail": "Not Found"
        })))
        .mount(&server)
        .await;

    let err = client
        .get_encounter_detail(999_999, Locale::EnUs)
        .await
        .unwrap_err();
    match &err {
        Error::Api {
            status,
            endpoint,
            message,
        } => {
            assert_eq!(*status, 404);
            assert_eq!(endpoint, "/data/wow/journal-encounter/999999");
            assert!(message.contains("Not Found"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;
    mount_token(&server, "tok", 86_399, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/wow/journal-encounter/89"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client.get_encounter_detail(89, Locale::EnUs).await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

// ── Instances by expansion ──────────────────────────────────────────

#[tokio::test]
async fn test_instances_filtered_by_expansion_in_index_order() {
    let (server, client) = setup().await;
    mount_token(&server, "tok", 86_399, 1).await;
    mount_instance_index(&server, &[63, 64, 65, 66]).await;

    mount_instance(&server, 63, instance_json(63, "Deadmines", 68, "DUNGEON")).await;
    mount_instance(&server, 64, instance_json(64, "Karazhan", 70, "RAID")).await;
    mount_instance(&server, 65, instance_json(65, "Molten Core", 68, "RAID")).await;
    mount_instance(&server, 66, instance_json(66, "Wailing Caverns", 68, "DUNGEON")).await;

    let instances = client
        .list_instances_for_expansion(68, Locale::EnUs)
        .await
        .unwrap();
    let ids: Vec<u64> = instances.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![63, 65, 66]);
    assert_eq!(instances[1].name_in(Locale::EnUs), "Molten Core");
}

#[tokio::test]
async fn test_failed_instance_detail_is_skipped() {
    let (server, client) = setup().await;
    mount_token(&server, "tok", 86_399, 1).await;
    mount_instance_index(&server, &[1, 2, 3]).await;

    mount_instance(&server, 1, instance_json(1, "One", 68, "DUNGEON")).await;
    Mock::given(method("GET"))
        .and(path("/data/wow/journal-instance/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_instance(&server, 3, instance_json(3, "Three", 68, "RAID")).await;

    let instances = client
        .list_instances_for_expansion(68, Locale::EnUs)
        .await
        .unwrap();
    let ids: Vec<u64> = instances.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_index_failure_aborts_listing() {
    let (server, client) = setup().await;
    mount_token(&server, "tok", 86_399, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/wow/journal-instance/index"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client.list_instances_for_expansion(68, Locale::EnUs).await;
    assert!(matches!(result, Err(Error::Api { status: 503, .. })));
}

#[tokio::test]
async fn test_rejected_token_refresh_aborts_listing() {
    let (server, client) = setup().await;

    // The first token is too short-lived to cache, and every later
    // exchange is rejected.
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "short",
            "token_type": "bearer",
            "expires_in": 60
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client"
        })))
        .mount(&server)
        .await;

    mount_instance_index(&server, &[63, 66]).await;
    mount_instance(&server, 63, instance_json(63, "Deadmines", 68, "DUNGEON")).await;
    mount_instance(&server, 66, instance_json(66, "Wailing Caverns", 68, "DUNGEON")).await;

    let result = client.list_instances_for_expansion(68, Locale::EnUs).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_no_matching_instances_is_empty() {
    let (server, client) = setup().await;
    mount_token(&server, "tok", 86_399, 1).await;
    mount_instance_index(&server, &[63]).await;
    mount_instance(&server, 63, instance_json(63, "Deadmines", 68, "DUNGEON")).await;

    let instances = client
        .list_instances_for_expansion(503, Locale::EnUs)
        .await
        .unwrap();
    assert!(instances.is_empty());
}

// ── Encounters ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_encounter_detail_with_sections() {
    let (server, client) = setup().await;
    mount_token(&server, "tok", 86_399, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/wow/journal-encounter/89"))
        .and(query_param("locale", "en_US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 89,
            "name": "Glubtok",
            "description": "A foreman for the Defias Brotherhood.",
            "creatures": [{ "id": 40, "name": "Glubtok", "creature_display": { "id": 31 } }],
            "items": [{ "id": 1, "item": { "id": 5195, "name": "Gold-flecked Gloves" } }],
            "sections": [{
                "id": 2000,
                "title": "Stages",
                "sections": [{
                    "id": 2001,
                    "title": "Blink",
                    "body_text": "Glubtok teleports.",
                    "spell": { "id": 87925, "name": "Blink" }
                }]
            }],
            "instance": { "id": 63, "name": "Deadmines" },
            "category": { "type": "DUNGEON" },
            "modes": []
        })))
        .mount(&server)
        .await;

    let detail = client.get_encounter_detail(89, Locale::EnUs).await.unwrap();
    assert_eq!(detail.name.get(Locale::EnUs), Some("Glubtok"));
    assert_eq!(detail.instance.id, 63);
    assert_eq!(detail.items[0].item.id, 5195);
    assert_eq!(detail.sections[0].sections[0].spell.as_ref().unwrap().id, 87925);
}
