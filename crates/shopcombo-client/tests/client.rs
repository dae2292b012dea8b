//! Integration tests for `ComboClient` and `acquire_combo` using wiremock HTTP mocks.

use shopcombo_client::{acquire_combo, ComboClient, ComboError, ComboRequest, Invalidity};
use shopcombo_core::{build_search_term, Category};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT_PATH: &str = "/mwvideos/api/product_combo_generator";

fn test_client(server: &MockServer) -> ComboClient {
    ComboClient::new(
        &format!("{}{ENDPOINT_PATH}", server.uri()),
        30,
        "shopcombo-test/0.1",
    )
    .expect("client construction should not fail")
}

fn combo_body(total: &str, utilization: &str) -> serde_json::Value {
    serde_json::json!({
        "status": 1,
        "result": {
            "search_intent": "electronics",
            "total_budget": "250",
            "combo_name": "Gadget Starter",
            "products": [
                {
                    "product_name": "Wireless Earbuds",
                    "category": "Electronics - Audio",
                    "allocated_price": "120.00",
                    "description": "Noise cancelling",
                    "features": ["ANC"],
                    "why_included": "Commute"
                },
                {
                    "product_name": "Phone Stand",
                    "category": "Electronics - Accessories",
                    "allocated_price": "115.50",
                    "description": "Foldable",
                    "features": [],
                    "why_included": "Desk"
                }
            ],
            "total_estimated_price": total,
            "budget_utilization": utilization,
            "combo_description": "Small upgrades for every day",
            "use_cases": ["Work"],
            "alternative_combos": [],
            "recommendations": "None"
        }
    })
}

#[tokio::test]
async fn generate_posts_form_encoded_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "search_term=I+want+electronics+products&budget=250",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(combo_body("235.50", "94%")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request =
        ComboRequest::new(build_search_term(Category::Electronics, ""), 250.0).unwrap();
    let payload = client.generate(&request).await.expect("should succeed");

    assert!(payload.is_success());
    let result = payload.result.expect("result present");
    assert_eq!(result.combo_name.as_deref(), Some("Gadget Starter"));
    assert_eq!(result.products.as_ref().map(Vec::len), Some(2));
}

#[tokio::test]
async fn end_to_end_electronics_scenario() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(combo_body("235.50", "94%")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request =
        ComboRequest::new(build_search_term(Category::Electronics, ""), 250.0).unwrap();
    let combo = acquire_combo(&client, &request).await.expect("valid combo");

    assert!((combo.total_price - 235.5).abs() < f64::EPSILON);
    assert_eq!(combo.savings_percentage, 6);
    assert_eq!(combo.items.len(), 2);
    assert_eq!(combo.explanation, "Small upgrades for every day");
}

#[tokio::test]
async fn non_success_status_value_is_invalid_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": 0, "message": "busy"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = ComboRequest::new("gifts", 50.0).unwrap();
    let err = acquire_combo(&client, &request).await.unwrap_err();

    match err {
        ComboError::InvalidStatus { status } => assert_eq!(status, "0"),
        other => panic!("expected InvalidStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn non_2xx_response_is_unexpected_status_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = ComboRequest::new("gifts", 50.0).unwrap();
    let err = acquire_combo(&client, &request).await.unwrap_err();

    assert!(matches!(err, ComboError::UnexpectedStatus { status: 503, .. }));
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = ComboRequest::new("gifts", 50.0).unwrap();
    let err = client.generate(&request).await.unwrap_err();

    assert!(matches!(err, ComboError::Deserialize { .. }));
}

#[tokio::test]
async fn success_without_result_is_rejected_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = ComboRequest::new("gifts", 50.0).unwrap();
    let err = acquire_combo(&client, &request).await.unwrap_err();

    assert!(matches!(err, ComboError::MissingResult));
}

#[tokio::test]
async fn corrupt_numbers_are_retried_until_valid() {
    let server = MockServer::start().await;

    // First two responses carry garbage totals, third is clean.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(combo_body("N/A", "94%")))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(combo_body("199.99", "80%")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = ComboRequest::new("tech gifts", 250.0).unwrap();
    let combo = acquire_combo(&client, &request).await.expect("third attempt valid");

    assert!((combo.total_price - 199.99).abs() < f64::EPSILON);
    assert_eq!(combo.savings_percentage, 20);
}

#[tokio::test]
async fn three_corrupt_responses_fail_after_exactly_three_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(combo_body("tbd", "94%")))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = ComboRequest::new("tech gifts", 250.0).unwrap();
    let err = acquire_combo(&client, &request).await.unwrap_err();

    assert!(matches!(
        err,
        ComboError::Generation {
            attempts: 3,
            cause: Invalidity::TotalPrice { .. }
        }
    ));
}

#[test]
fn invalid_endpoint_is_rejected() {
    let result = ComboClient::new("not a url", 30, "ua");
    assert!(matches!(result, Err(ComboError::InvalidRequest(_))));
}
