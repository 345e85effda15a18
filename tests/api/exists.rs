use std::time;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{member_path, not_found, TestGateway, LIST_ID};
use mailchimp_gateway::SubscriberGateway;

#[tokio::test]
async fn exists_returns_true_when_the_member_is_found() {
    let test_gateway = TestGateway::spawn().await;

    test_gateway.mount_member("frank@test.com", "subscribed").await;

    assert!(
        test_gateway
            .gateway
            .exists("frank@test.com", Some(LIST_ID))
            .await
    );
}

#[tokio::test]
async fn exists_ignores_the_email_letter_case() {
    let test_gateway = TestGateway::spawn().await;

    test_gateway.mount_member("frank@test.com", "subscribed").await;

    assert!(
        test_gateway
            .gateway
            .exists("Frank@Test.COM", Some(LIST_ID))
            .await
    );
}

#[tokio::test]
async fn exists_returns_false_when_the_member_is_not_found() {
    let test_gateway = TestGateway::spawn().await;

    Mock::given(method("GET"))
        .and(path(member_path(LIST_ID, "frank@test.com")))
        .respond_with(not_found())
        .expect(1)
        .mount(&test_gateway.mailchimp_server)
        .await;

    assert!(
        !test_gateway
            .gateway
            .exists("frank@test.com", Some(LIST_ID))
            .await
    );
}

#[tokio::test]
async fn exists_returns_false_when_the_api_fails() {
    let test_gateway = TestGateway::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&test_gateway.mailchimp_server)
        .await;

    assert!(
        !test_gateway
            .gateway
            .exists("frank@test.com", Some(LIST_ID))
            .await
    );
}

#[tokio::test]
async fn exists_returns_false_when_the_api_takes_too_long() {
    let test_gateway = TestGateway::spawn().await;
    let gateway = test_gateway
        .gateway
        .with_timeout(time::Duration::from_millis(100));

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(time::Duration::from_millis(300)))
        .expect(1)
        .mount(&test_gateway.mailchimp_server)
        .await;

    assert!(!gateway.exists("frank@test.com", Some(LIST_ID)).await);
}

#[tokio::test]
async fn exists_returns_false_for_an_empty_record() {
    let test_gateway = TestGateway::spawn().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&test_gateway.mailchimp_server)
        .await;

    assert!(
        !test_gateway
            .gateway
            .exists("frank@test.com", Some(LIST_ID))
            .await
    );
}

#[tokio::test]
async fn exists_falls_back_to_the_default_list() {
    let test_gateway = TestGateway::spawn().await;

    test_gateway.mount_member("frank@test.com", "subscribed").await;

    assert!(test_gateway.gateway.exists("frank@test.com", None).await);
}

#[tokio::test]
async fn exists_uses_the_given_list_over_the_default_one() {
    let test_gateway = TestGateway::spawn().await;

    Mock::given(method("GET"))
        .and(path(member_path("other-list", "frank@test.com")))
        .respond_with(not_found())
        .expect(1)
        .mount(&test_gateway.mailchimp_server)
        .await;
    test_gateway.mount_member("frank@test.com", "subscribed").await;

    assert!(
        !test_gateway
            .gateway
            .exists("frank@test.com", Some("other-list"))
            .await
    );
}
