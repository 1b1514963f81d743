use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn catalog_body() -> serde_json::Value {
    serde_json::json!({
        "locations": [
            {
                "id": "loc-1",
                "name": "Everett Walk-In Clinic",
                "address_plain": "1700 13th St, Everett, WA 98201",
                "coordinates": {"lat": 47.979, "lng": -122.2021},
                "is_urgent_care": true,
                "services": [
                    {"name": "other", "values": [{"val": "X-Ray"}]}
                ]
            },
            {
                "id": "loc-2",
                "name": "Portland Express Care"
            }
        ]
    })
}

fn client() -> CatalogClient {
    CatalogClient::new(5, "carefinder-test/0.1", 2, 0).unwrap()
}

#[tokio::test]
async fn fetch_facilities_parses_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .mount(&server)
        .await;

    let facilities = client()
        .fetch_facilities(&format!("{}/locations", server.uri()))
        .await
        .unwrap();

    assert_eq!(facilities.len(), 2);
    assert_eq!(facilities[0].id, "loc-1");
    assert!(facilities[0].is_urgent_care);
    assert!(facilities[0].coordinate().is_some());
    assert!(facilities[1].coordinate().is_none());
}

#[tokio::test]
async fn fetch_facilities_missing_locations_key_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let facilities = client()
        .fetch_facilities(&format!("{}/locations", server.uri()))
        .await
        .unwrap();
    assert!(facilities.is_empty());
}

#[tokio::test]
async fn fetch_facilities_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client()
        .fetch_facilities(&format!("{}/locations", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }), "got: {err:?}");
}

#[tokio::test]
async fn fetch_facilities_500_is_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client()
        .fetch_facilities(&format!("{}/locations", server.uri()))
        .await
        .unwrap_err();
    assert!(
        matches!(err, CatalogError::UnexpectedStatus { status: 500, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_facilities_retries_429_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .mount(&server)
        .await;

    let facilities = client()
        .fetch_facilities(&format!("{}/locations", server.uri()))
        .await
        .unwrap();
    assert_eq!(facilities.len(), 2);
}

#[tokio::test]
async fn fetch_facilities_malformed_json_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client()
        .fetch_facilities(&format!("{}/locations", server.uri()))
        .await
        .unwrap_err();
    assert!(
        matches!(err, CatalogError::Deserialize { .. }),
        "got: {err:?}"
    );
}
