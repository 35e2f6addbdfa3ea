//! Streaming endpoint integration tests

use super::common::*;
use futures::StreamExt;

/// Split an event-stream body into its events
fn events(body: &str) -> Vec<(Option<&str>, &str)> {
    body.split("\n\n")
        .filter(|block| !block.is_empty())
        .map(|block| {
            let mut event = None;
            let mut data = "";
            for line in block.lines() {
                if let Some(name) = line.strip_prefix("event: ") {
                    event = Some(name);
                } else if let Some(payload) = line.strip_prefix("data: ") {
                    data = payload;
                }
            }
            (event, data)
        })
        .collect()
}

#[tokio::test]
async fn test_abrupt_stream_is_truncated() {
    let server = TestServer::spawn().await;

    let response = server.post_with_key("/v1/chat/completions", "ABRUPT_STREAM").await;
    assert_status(&response, 200);
    assert_content_type(&response, "text/event-stream");

    let body = response.text().await.unwrap();
    assert!(!body.contains("[DONE]"), "Abrupt stream must not finish");
    assert!(body.ends_with(r#"data: {"id":"truncated_chunk", "content":"partial"#));

    let first = body.split("\n\n").next().unwrap();
    let payload = first.strip_prefix("data: ").unwrap();
    let chunk: serde_json::Value = serde_json::from_str(payload).unwrap();
    assert_eq!(chunk["id"], "chatcmpl-123");
    assert_eq!(chunk["choices"][0]["delta"]["role"], "assistant");
    assert_eq!(chunk["choices"][1], serde_json::json!({"finish_reason": null}));
}

#[tokio::test]
async fn test_abrupt_stream_arrives_in_pieces() {
    let server = TestServer::spawn().await;

    let response = server.post_with_key("/v1/chat/completions", "ABRUPT_STREAM").await;
    let mut stream = response.bytes_stream();

    // The first frame is written before the pause, so it arrives on its own
    let first = stream.next().await.unwrap().unwrap();
    assert!(first.starts_with(b"data: {\"id\":\"chatcmpl-123\""));

    let mut rest = Vec::new();
    while let Some(chunk) = stream.next().await {
        rest.extend_from_slice(&chunk.unwrap());
    }
    assert!(String::from_utf8(rest).unwrap().contains("truncated_chunk"));
}

#[tokio::test]
async fn test_anthropic_ping_stream() {
    let server = TestServer::spawn().await;

    let response = server.post_with_api_key("/v1/messages", "STREAM_PING_ANTHROPIC").await;
    assert_status(&response, 200);
    assert_content_type(&response, "text/event-stream");

    let body = response.text().await.unwrap();
    let events = events(&body);
    let names: Vec<_> = events.iter().map(|(name, _)| name.unwrap_or("")).collect();

    assert_eq!(names.iter().filter(|n| **n == "ping").count(), 1);
    let ping = names.iter().position(|n| *n == "ping").unwrap();
    assert_eq!(names[ping - 1], "content_block_delta");
    assert_eq!(names[ping + 1], "content_block_delta");
    assert_eq!(&names[names.len() - 2..], ["message_delta", "message_stop"]);

    let text: String = events
        .iter()
        .filter(|(name, _)| *name == Some("content_block_delta"))
        .map(|(_, data)| {
            let value: serde_json::Value = serde_json::from_str(data).unwrap();
            value["delta"]["text"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(text, "Hello World!");
}

#[tokio::test]
async fn test_anthropic_stream_error() {
    let server = TestServer::spawn().await;

    let response = server.post_with_key("/messages", "STREAM_ERROR_ANTHROPIC").await;
    assert_status(&response, 200);

    let body = response.text().await.unwrap();
    let events = events(&body);
    let (last_name, last_data) = events.last().unwrap();

    assert_eq!(*last_name, Some("error"));
    assert!(last_data.contains("Simulated mid-stream error."));
    assert!(events.iter().all(|(name, _)| *name != Some("message_stop")));
    assert!(body.contains("claude-3-haiku-20240307"));
}

#[tokio::test]
async fn test_stream_is_identical_across_requests() {
    let server = TestServer::spawn().await;

    let first = server
        .post_with_api_key("/v1/messages", "STREAM_PING_ANTHROPIC")
        .await
        .bytes()
        .await
        .unwrap();
    let second = server
        .post_with_api_key("/v1/messages", "STREAM_PING_ANTHROPIC")
        .await
        .bytes()
        .await
        .unwrap();
    assert_eq!(first, second);
}
