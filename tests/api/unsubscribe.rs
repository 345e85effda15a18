use claim::{assert_err, assert_ok};
use serde_json::json;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{member_path, TestGateway, LIST_ID};
use mailchimp_gateway::SubscriberGateway;

#[tokio::test]
async fn unsubscribe_patches_the_member_status() {
    let test_gateway = TestGateway::spawn().await;

    Mock::given(method("PATCH"))
        .and(path(member_path(LIST_ID, "Frank@Test.com")))
        .and(body_json(json!({"status": "unsubscribed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "unsubscribed"})))
        .expect(1)
        .mount(&test_gateway.mailchimp_server)
        .await;

    assert_ok!(
        test_gateway
            .gateway
            .unsubscribe("frank@test.com", Some(LIST_ID))
            .await
    );
}

#[tokio::test]
async fn unsubscribe_an_unsubscribed_member_still_succeeds() {
    let test_gateway = TestGateway::spawn().await;

    Mock::given(method("PATCH"))
        .and(path(member_path(LIST_ID, "frank@test.com")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "unsubscribed"})))
        .expect(2)
        .mount(&test_gateway.mailchimp_server)
        .await;

    for _ in 0..2 {
        assert_ok!(
            test_gateway
                .gateway
                .unsubscribe("frank@test.com", None)
                .await
        );
    }
}

#[tokio::test]
async fn unsubscribe_fails_if_the_api_returns_500() {
    let test_gateway = TestGateway::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&test_gateway.mailchimp_server)
        .await;

    assert_err!(
        test_gateway
            .gateway
            .unsubscribe("frank@test.com", Some(LIST_ID))
            .await
    );
}
