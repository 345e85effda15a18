use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{not_found, TestGateway, LIST_ID};
use mailchimp_gateway::SubscriberGateway;

#[tokio::test]
async fn ping_returns_true_when_the_list_is_reachable() {
    let test_gateway = TestGateway::spawn().await;

    Mock::given(method("GET"))
        .and(path(format!("/lists/{}", LIST_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": LIST_ID, "name": "Newsletter"})),
        )
        .expect(1)
        .mount(&test_gateway.mailchimp_server)
        .await;

    assert!(test_gateway.gateway.ping(None).await);
}

#[tokio::test]
async fn ping_returns_false_when_the_api_key_is_rejected() {
    let test_gateway = TestGateway::spawn().await;

    Mock::given(method("GET"))
        .and(path(format!("/lists/{}", LIST_ID)))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "title": "API Key Invalid",
            "status": 401,
            "detail": "Your API key may be invalid, or you've attempted to access the wrong datacenter."
        })))
        .expect(1)
        .mount(&test_gateway.mailchimp_server)
        .await;

    assert!(!test_gateway.gateway.ping(Some(LIST_ID)).await);
}

#[tokio::test]
async fn ping_returns_false_when_the_list_does_not_exist() {
    let test_gateway = TestGateway::spawn().await;

    Mock::given(method("GET"))
        .and(path("/lists/unknown"))
        .respond_with(not_found())
        .expect(1)
        .mount(&test_gateway.mailchimp_server)
        .await;

    assert!(!test_gateway.gateway.ping(Some("unknown")).await);
}

#[tokio::test]
async fn ping_keeps_the_list_id_inside_its_path_segment() {
    let test_gateway = TestGateway::spawn().await;

    Mock::given(method("GET"))
        .and(path("/lists/abc%2F123%3Fx=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc/123?x=1"})))
        .expect(1)
        .mount(&test_gateway.mailchimp_server)
        .await;

    assert!(test_gateway.gateway.ping(Some("abc/123?x=1")).await);
}
