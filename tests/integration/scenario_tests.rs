//! Scenario selection integration tests

use super::common::*;
use serde_json::json;

use dp_mock_server::scenario::Endpoint;

/// One concrete request per endpoint path
fn concrete_paths() -> Vec<(Endpoint, String)> {
    Endpoint::ALL
        .iter()
        .flat_map(|ep| {
            ep.paths()
                .iter()
                .map(move |p| (*ep, p.replace("{model}", "gemini-1.5-flash")))
        })
        .collect()
}

async fn send(server: &TestServer, endpoint: Endpoint, path: &str, key: Option<&str>) -> reqwest::Response {
    let method = reqwest::Method::from_bytes(endpoint.method().as_str().as_bytes()).unwrap();
    let mut request = server.client.request(method, server.url(path));
    if let Some(key) = key {
        request = request.bearer_auth(key);
    }
    request.send().await.unwrap()
}

#[tokio::test]
async fn test_missing_selector_returns_endpoint_specific_400() {
    let server = TestServer::spawn().await;

    for (endpoint, path) in concrete_paths() {
        let response = send(&server, endpoint, &path, None).await;
        assert_status(&response, 400);
        let body = json_body(response).await;
        assert_eq!(
            body,
            json!({"error": format!("No test scenario triggered for {} endpoint", endpoint.label())}),
            "miss body for {}",
            path
        );
    }
}

#[tokio::test]
async fn test_unknown_selector_returns_400() {
    let server = TestServer::spawn().await;

    for (endpoint, path) in concrete_paths() {
        let response = send(&server, endpoint, &path, Some("NO_SUCH_SCENARIO")).await;
        assert_status(&response, 400);
    }
}

#[tokio::test]
async fn test_selector_is_case_sensitive() {
    let server = TestServer::spawn().await;
    let response = server.post_with_key("/v1/chat/completions", "auth_failure_openai").await;
    assert_status(&response, 400);
}

#[tokio::test]
async fn test_openai_auth_failure_body() {
    let server = TestServer::spawn().await;

    let response = server.post_with_key("/v1/chat/completions", "AUTH_FAILURE_OPENAI").await;
    assert_status(&response, 401);
    assert_content_type(&response, "application/json");
    assert_eq!(
        json_body(response).await,
        json!({"error": {"message": "Invalid Authentication", "type": "invalid_request_error", "code": 401}})
    );
}

#[tokio::test]
async fn test_anthropic_auth_failure_body() {
    let server = TestServer::spawn().await;

    let response = server.post_with_api_key("/v1/messages", "AUTH_FAILURE_ANTHROPIC").await;
    assert_status(&response, 401);
    assert_eq!(
        json_body(response).await,
        json!({"type": "error", "message": "Authentication Error"})
    );
}

#[tokio::test]
async fn test_gemini_auth_failure_via_query_key() {
    let server = TestServer::spawn().await;

    for action in ["generateContent", "streamGenerateContent", "countTokens"] {
        let path = format!("/v1/models/gemini-pro:{}?key=AUTH_FAILURE_GEMINI", action);
        let response = server.post(&path).await;
        assert_status(&response, 401);
        assert_eq!(
            json_body(response).await,
            json!({"error": {"message": "Invalid Authentication", "code": 401}})
        );
    }
}

#[tokio::test]
async fn test_authorization_header_wins_over_query() {
    let server = TestServer::spawn().await;

    let response = server
        .post_with_key("/v1/chat/completions?key=AUTH_FAILURE_OPENAI", "RATE_LIMIT_COMPLETION")
        .await;
    assert_status(&response, 429);
}

#[tokio::test]
async fn test_rate_limit_bodies() {
    let server = TestServer::spawn().await;
    let expected = json!({"error": {"message": "Rate limit exceeded", "type": "rate_limit_error", "code": 429}});

    let response = server.post_with_key("/chat/completions", "RATE_LIMIT_COMPLETION").await;
    assert_status(&response, 429);
    assert_eq!(json_body(response).await, expected);

    let response = server.get_with_key("/v1/models", "RATE_LIMIT_LIST_MODELS").await;
    assert_status(&response, 429);
    assert_eq!(json_body(response).await, expected);
}

#[tokio::test]
async fn test_non_json_error() {
    let server = TestServer::spawn().await;

    let response = server.post_with_key("/v1/chat/completions", "NON_JSON_ERROR").await;
    assert_status(&response, 500);
    assert_content_type(&response, "text/html");
    let body = response.text().await.unwrap();
    assert_eq!(body, "<html><body><h1>500 Internal Server Error</h1></body></html>");
    assert!(serde_json::from_str::<serde_json::Value>(&body).is_err());
}

#[tokio::test]
async fn test_empty_model_list() {
    let server = TestServer::spawn().await;

    let response = server.get_with_key("/models", "EMPTY_LIST").await;
    assert_status(&response, 200);
    assert_eq!(json_body(response).await, json!({"object": "list", "data": []}));
}

#[tokio::test]
async fn test_list_models_auth_failures_by_family() {
    let server = TestServer::spawn().await;

    for key in ["AUTH_FAILURE_OPENAI", "AUTH_FAILURE_GEMINI"] {
        let response = server.get_with_key("/v1/models", key).await;
        assert_status(&response, 401);
        assert_eq!(json_body(response).await["error"]["type"], "invalid_request_error");
    }

    let response = server.get_with_key("/v1/models", "AUTH_FAILURE_ANTHROPIC").await;
    assert_status(&response, 401);
    assert_eq!(json_body(response).await["type"], "error");
}

#[tokio::test]
async fn test_scenario_keys_are_endpoint_scoped() {
    let server = TestServer::spawn().await;

    // A Gemini key means nothing on the Anthropic messages endpoint
    let response = server.post_with_key("/v1/messages", "AUTH_FAILURE_GEMINI").await;
    assert_status(&response, 400);

    // A chat key means nothing on the list endpoint
    let response = server.get_with_key("/v1/models", "RATE_LIMIT_COMPLETION").await;
    assert_status(&response, 400);
}

#[tokio::test]
async fn test_count_tokens_auth_failures() {
    let server = TestServer::spawn().await;

    let response = server
        .post_with_api_key("/v1/messages/count_tokens", "AUTH_FAILURE_ANTHROPIC")
        .await;
    assert_status(&response, 401);
    assert_eq!(json_body(response).await["message"], "Authentication Error");
}

#[tokio::test]
async fn test_every_scenario_is_stable_across_repeats() {
    let server = TestServer::spawn().await;
    let catalog = dp_mock_server::catalog();

    for table in catalog.tables() {
        let endpoint = table.endpoint();
        let path = endpoint.paths()[0].replace("{model}", "gemini-pro");

        for entry in table.entries() {
            // Upload outcomes depend on the body; covered in upload_tests
            let Some(expected) = entry.behavior.fixed_status() else {
                continue;
            };

            let mut bodies = Vec::new();
            for _ in 0..3 {
                let response = send(&server, endpoint, &path, Some(entry.key)).await;
                assert_eq!(response.status().as_u16(), expected.as_u16(), "{} on {}", entry.key, path);
                bodies.push(response.bytes().await.unwrap());
            }
            assert!(bodies.windows(2).all(|w| w[0] == w[1]), "{} on {}", entry.key, path);
        }
    }
}

#[tokio::test]
async fn test_unknown_routes() {
    let server = TestServer::spawn().await;

    assert_status(&server.get("/health").await, 404);
    assert_status(&server.post("/v2/messages").await, 404);
    assert_status(&server.get("/_control/status:full").await, 404);
}

#[tokio::test]
async fn test_unknown_action_falls_back_to_path_endpoint() {
    let server = TestServer::spawn().await;

    let response = server.post("/v1/messages:batch").await;
    assert_status(&response, 400);
    assert_eq!(
        json_body(response).await,
        json!({"error": "No test scenario triggered for Anthropic completions endpoint"})
    );

    let response = server.post("/v1/models/gemini-pro:embedContent").await;
    assert_status(&response, 400);
    assert_eq!(
        json_body(response).await,
        json!({"error": "No test scenario triggered for Gemini completions endpoint"})
    );

    let response = server.post_with_api_key("/v1/messages:create", "AUTH_FAILURE_ANTHROPIC").await;
    assert_status(&response, 401);
}
