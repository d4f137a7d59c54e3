//! HTTP contract tests for [`dialogflow_client::DialogflowClient`] and the service-account token
//! exchange, against wiremock servers. No Google endpoints are contacted.

use std::sync::Arc;

use dialogflow_client::{
    DialogflowClient, ServiceAccountKey, ServiceAccountTokenSource, StaticTokenSource,
    TokenSource,
};
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_KEY_PEM: &str = include_str!("fixtures/test_key.pem");

fn client_for(server: &MockServer) -> DialogflowClient {
    DialogflowClient::new(
        "newagent",
        Arc::new(StaticTokenSource("ya29.test".to_string())),
    )
    .with_api_url(server.uri())
}

/// **Test: detectIntent sends the session path, bearer token and text input; reads fulfillment and fallback flag.**
#[tokio::test]
async fn test_detect_intent_matched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/newagent/agent/sessions/tg-42:detectIntent"))
        .and(header("authorization", "Bearer ya29.test"))
        .and(body_json(serde_json::json!({
            "queryInput": {"text": {"text": "Как сделать возврат?", "languageCode": "ru"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "responseId": "r1",
            "queryResult": {
                "queryText": "Как сделать возврат?",
                "fulfillmentText": "Для возврата обратитесь в поддержку",
                "intent": {"name": "projects/newagent/agent/intents/1", "displayName": "refund"},
                "intentDetectionConfidence": 0.87
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .detect_intent("tg-42", "Как сделать возврат?", "ru")
        .await
        .unwrap();

    assert_eq!(result.fulfillment_text, "Для возврата обратитесь в поддержку");
    assert!(!result.is_fallback());
    assert_eq!(result.intent.unwrap().display_name, "refund");
}

/// **Test: fallback intent is reported through is_fallback().**
#[tokio::test]
async fn test_detect_intent_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/newagent/agent/sessions/vk-7:detectIntent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "queryResult": {
                "fulfillmentText": "Извините, я не понял",
                "intent": {"displayName": "Default Fallback Intent", "isFallback": true}
            }
        })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .detect_intent("vk-7", "ывфаывп", "ru")
        .await
        .unwrap();
    assert!(result.is_fallback());
}

/// **Test: Google error envelope becomes an error carrying status and message.**
#[tokio::test]
async fn test_detect_intent_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {"code": 403, "message": "IAM permission denied", "status": "PERMISSION_DENIED"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .detect_intent("tg-1", "hi", "ru")
        .await
        .unwrap_err();
    let text = err.to_string();
    assert!(text.contains("PERMISSION_DENIED"));
    assert!(text.contains("IAM permission denied"));
}

/// **Test: a 200 response without queryResult is malformed.**
#[tokio::test]
async fn test_detect_intent_missing_query_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"responseId": "x"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .detect_intent("tg-1", "hi", "ru")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("queryResult"));
}

/// **Test: the service-account source posts a signed JWT assertion and caches the token.**
#[tokio::test]
async fn test_service_account_token_exchange_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .and(body_string_contains("assertion=ey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.fresh",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let key_json = serde_json::json!({
        "type": "service_account",
        "project_id": "newagent",
        "client_email": "relay@newagent.iam.gserviceaccount.com",
        "private_key": TEST_KEY_PEM,
        "token_uri": format!("{}/token", server.uri()),
    });
    let dir = tempfile::tempdir().unwrap();
    let key_path = dir.path().join("key.json");
    std::fs::write(&key_path, key_json.to_string()).unwrap();

    let key = ServiceAccountKey::from_file(&key_path).unwrap();
    assert_eq!(key.project_id.as_deref(), Some("newagent"));
    let source = ServiceAccountTokenSource::new(key).unwrap();

    assert_eq!(source.access_token().await.unwrap(), "ya29.fresh");
    assert_eq!(source.access_token().await.unwrap(), "ya29.fresh");
}

/// **Test: a rejected token exchange surfaces as an authentication error from detect_intent.**
#[tokio::test]
async fn test_token_rejection_fails_detect_intent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let key = ServiceAccountKey::from_json(
        &serde_json::json!({
            "client_email": "relay@newagent.iam.gserviceaccount.com",
            "private_key": TEST_KEY_PEM,
            "token_uri": format!("{}/token", server.uri()),
        })
        .to_string(),
    )
    .unwrap();
    let client = DialogflowClient::new(
        "newagent",
        Arc::new(ServiceAccountTokenSource::new(key).unwrap()),
    )
    .with_api_url(server.uri());

    let err = client.detect_intent("tg-1", "hi", "ru").await.unwrap_err();
    assert!(format!("{:#}", err).contains("invalid_grant"));
}

/// **Test: a missing key file is an error.**
#[test]
fn test_from_key_file_missing() {
    assert!(DialogflowClient::from_key_file("newagent", "/nonexistent/key.json").is_err());
}

/// **Test: list_intents follows nextPageToken; create passes languageCode.**
#[tokio::test]
async fn test_list_and_create_intents() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/newagent/agent/intents"))
        .and(query_param("pageToken", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "intents": [{"name": "projects/newagent/agent/intents/3", "displayName": "faq"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/newagent/agent/intents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "intents": [
                {"name": "projects/newagent/agent/intents/1", "displayName": "Default Welcome Intent"},
                {"name": "projects/newagent/agent/intents/2", "displayName": "Default Fallback Intent", "isFallback": true}
            ],
            "nextPageToken": "p2"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/projects/newagent/agent/intents"))
        .and(query_param("languageCode", "ru"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "projects/newagent/agent/intents/9", "displayName": "new_one"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let intents = client.list_intents().await.unwrap();
    let names: Vec<&str> = intents.iter().map(|i| i.display_name.as_str()).collect();
    assert_eq!(names, vec!["Default Welcome Intent", "Default Fallback Intent", "faq"]);

    let created = client
        .create_intent(
            &dialogflow_client::NewIntent::from_qa("new_one", &["q".to_string()], "a"),
            "ru",
        )
        .await
        .unwrap();
    assert_eq!(created.name, "projects/newagent/agent/intents/9");
}

/// **Test: delete refuses names outside the project.**
#[tokio::test]
async fn test_delete_rejects_foreign_intent() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .delete_intent("projects/other/agent/intents/1")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("does not belong"));
}
