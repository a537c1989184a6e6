use modelprobe_llm::{
    Content, LlmError, Message, OpenAIClient, ResponseRequest, ResponseStreamEvent, ResponsesClient,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

struct CapturedRequest {
    head: String,
    body: String,
}

/// Accept one connection, record the request, reply with a canned response
async fn serve_once(
    status_line: &'static str,
    content_type: &'static str,
    body: &'static str,
) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let captured = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            content_type,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        captured
    });

    (format!("http://{}/v1", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the full request arrived");
        buf.extend_from_slice(&chunk[..n]);

        let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let body_start = head_end + 4;
        let body_len = content_length(&head);

        if buf.len() >= body_start + body_len {
            let body = String::from_utf8_lossy(&buf[body_start..body_start + body_len]).to_string();
            return CapturedRequest { head, body };
        }
    }
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

fn probe_request() -> ResponseRequest {
    ResponseRequest::new(
        "gpt-5",
        vec![
            Message::empty_system(),
            Message::human(Content::input_text("What model are you?")),
        ],
    )
}

const SSE_BODY: &str = concat!(
    "event: response.created\n",
    "data: {\"type\":\"response.created\",\"sequence_number\":0,\"response\":{\"id\":\"resp_1\",\"status\":\"in_progress\",\"output\":[]}}\n\n",
    "event: response.output_text.delta\n",
    "data: {\"type\":\"response.output_text.delta\",\"sequence_number\":1,\"item_id\":\"msg_1\",\"output_index\":0,\"content_index\":0,\"delta\":\"Hi\"}\n\n",
    "event: response.output_text.delta\n",
    "data: {\"type\":\"response.output_text.delta\",\"sequence_number\":2,\"item_id\":\"msg_1\",\"output_index\":0,\"content_index\":0,\"delta\":\" there\"}\n\n",
    "event: response.completed\n",
    "data: {\"type\":\"response.completed\",\"sequence_number\":3,\"response\":{\"id\":\"resp_1\",\"status\":\"completed\",\"model\":\"gpt-5\",\"output\":[{\"type\":\"message\",\"id\":\"msg_1\",\"role\":\"assistant\",\"content\":[{\"type\":\"output_text\",\"text\":\"Hi there\"}]}],\"usage\":{\"input_tokens\":10,\"output_tokens\":2,\"total_tokens\":12}}}\n\n",
);

#[tokio::test]
async fn test_stream_response_over_http() {
    let (base_url, server) = serve_once("200 OK", "text/event-stream", SSE_BODY).await;

    let client = OpenAIClient::builder()
        .api_key("test-key")
        .base_url(base_url)
        .build()
        .unwrap();

    let mut stream = client.stream_response(probe_request()).await.unwrap();

    let mut deltas = Vec::new();
    let mut completed = 0;
    while let Some(event) = stream.next_event().await {
        match event.unwrap() {
            ResponseStreamEvent::OutputTextDelta { delta, .. } => deltas.push(delta),
            ResponseStreamEvent::Completed { .. } => completed += 1,
            _ => {}
        }
    }
    assert_eq!(deltas, vec!["Hi", " there"]);
    assert_eq!(completed, 1);

    let response = stream.final_response().await.unwrap();
    assert_eq!(response.id, "resp_1");
    assert_eq!(response.message_text().as_deref(), Some("Hi there"));
    assert_eq!(response.usage.map(|u| u.total_tokens), Some(12));

    let captured = server.await.unwrap();
    let head = captured.head.to_lowercase();
    assert!(head.starts_with("post /v1/responses "));
    assert!(head.contains("authorization: bearer test-key"));
    assert!(head.contains("accept: text/event-stream"));

    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body["model"], "gpt-5");
    assert_eq!(body["stream"], true);
    assert_eq!(body["store"], false);
    assert_eq!(body["input"].as_array().unwrap().len(), 2);
    assert_eq!(body["input"][0]["role"], "system");
    assert_eq!(body["input"][1]["role"], "user");
    assert_eq!(body["input"][1]["content"][0]["text"], "What model are you?");
    assert!(body.get("instructions").is_none());
}

#[tokio::test]
async fn test_unauthorized_is_api_error() {
    let (base_url, server) = serve_once(
        "401 Unauthorized",
        "application/json",
        r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#,
    )
    .await;

    let client = OpenAIClient::builder()
        .api_key("wrong-key")
        .base_url(base_url)
        .build()
        .unwrap();

    let err = client.stream_response(probe_request()).await.unwrap_err();

    match &err {
        LlmError::Api { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
    assert!(err.is_auth());

    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    // Bind then drop to get a port nobody is listening on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = OpenAIClient::builder()
        .api_key("test-key")
        .base_url(format!("http://{}/v1", addr))
        .build()
        .unwrap();

    let err = client.stream_response(probe_request()).await.unwrap_err();
    assert!(matches!(err, LlmError::Transport(_)));
}
