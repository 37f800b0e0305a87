use photo_restore_lib::{
    build_restore_prompt, restore_photo, save_data_url, swap_faces, Flow, RestoreError,
    RestoreSettings, ServiceConfig, Smile, DEFAULT_IMAGE_MODEL, FACE_SWAP_PROMPT,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SOURCE: &str = "data:image/jpeg;base64,U09VUkNF";
const TARGET: &str = "data:image/png;base64,VEFSR0VU";

fn generate_path() -> String {
    format!("/{DEFAULT_IMAGE_MODEL}:generateContent")
}

fn config(server: &MockServer) -> ServiceConfig {
    ServiceConfig::default()
        .with_api_key("test-key")
        .with_endpoint(server.uri())
}

fn image_response(mime_type: &str, data: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    { "text": "Here is the restored photo." },
                    { "inlineData": { "mimeType": mime_type, "data": data } }
                ]
            },
            "finishReason": "STOP",
            "index": 0
        }],
        "modelVersion": "gemini-2.5-flash-image",
        "responseId": "resp-1"
    })
}

async fn sent_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("request recording");
    assert_eq!(requests.len(), 1);
    serde_json::from_slice(&requests[0].body).expect("json body")
}

#[tokio::test]
async fn restore_sends_image_then_prompt_and_returns_data_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("image/png", "UkVTVE9SRUQ=")))
        .expect(1)
        .mount(&server)
        .await;

    let settings = RestoreSettings {
        colorize: true,
        smile: Smile::AddSmile,
        ..RestoreSettings::default()
    };

    let result = restore_photo(&config(&server), SOURCE, &settings)
        .await
        .expect("restore should succeed");

    assert_eq!(result, "data:image/png;base64,UkVTVE9SRUQ=");

    let body = sent_body(&server).await;
    assert_eq!(
        body,
        json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "inlineData": { "mimeType": "image/jpeg", "data": "U09VUkNF" } },
                    { "text": build_restore_prompt(&settings) }
                ]
            }],
            "generationConfig": { "responseModalities": ["IMAGE"] }
        })
    );
}

#[tokio::test]
async fn swap_sends_face_then_body_then_fixed_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("image/jpeg", "U1dBUA==")))
        .expect(1)
        .mount(&server)
        .await;

    let result = swap_faces(&config(&server), SOURCE, TARGET)
        .await
        .expect("swap should succeed");
    assert_eq!(result, "data:image/jpeg;base64,U1dBUA==");

    let body = sent_body(&server).await;
    let parts = body["contents"][0]["parts"].as_array().expect("parts");
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0]["inlineData"]["data"], "U09VUkNF");
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
    assert_eq!(parts[1]["inlineData"]["data"], "VEFSR0VU");
    assert_eq!(parts[2]["text"], FACE_SWAP_PROMPT);
}

#[tokio::test]
async fn face_swap_bad_request_is_reported_as_content_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "Request contains an invalid argument.", "status": "INVALID_ARGUMENT" }
        })))
        .mount(&server)
        .await;

    let err = swap_faces(&config(&server), SOURCE, TARGET)
        .await
        .expect_err("400 should fail");
    assert!(matches!(err, RestoreError::ContentRejected(_)), "{err:?}");

    let err = restore_photo(&config(&server), SOURCE, &RestoreSettings::default())
        .await
        .expect_err("400 should fail");
    assert!(matches!(err, RestoreError::RestoreFailed(_)), "{err:?}");
}

#[tokio::test]
async fn server_error_maps_to_generic_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let err = swap_faces(&config(&server), SOURCE, TARGET)
        .await
        .expect_err("500 should fail");
    assert!(matches!(err, RestoreError::SwapFailed(_)), "{err:?}");
    assert_eq!(
        err.to_string(),
        "Failed to swap faces. Please check the logs for more details."
    );
}

#[tokio::test]
async fn undecodable_body_is_a_service_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = restore_photo(&config(&server), SOURCE, &RestoreSettings::default())
        .await
        .expect_err("html should fail");
    assert!(matches!(err, RestoreError::RestoreFailed(_)), "{err:?}");
}

#[tokio::test]
async fn text_only_reply_is_a_refusal_not_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "I can't edit photos of real people." }] },
                "finishReason": "IMAGE_SAFETY"
            }]
        })))
        .mount(&server)
        .await;

    let err = restore_photo(&config(&server), SOURCE, &RestoreSettings::default())
        .await
        .expect_err("no image should fail");

    match err {
        RestoreError::NoImageGenerated { reason } => {
            assert_eq!(reason.as_deref(), Some("IMAGE_SAFETY"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_candidates_is_a_refusal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let err = swap_faces(&config(&server), SOURCE, TARGET)
        .await
        .expect_err("no image should fail");
    assert!(
        matches!(err, RestoreError::NoImageGenerated { reason: Some(ref r) } if r == "SAFETY"),
        "{err:?}"
    );
}

#[tokio::test]
async fn missing_key_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("image/png", "AAAA")))
        .expect(0)
        .mount(&server)
        .await;

    let config = ServiceConfig::default().with_endpoint(server.uri());

    let err = restore_photo(&config, SOURCE, &RestoreSettings::recommended())
        .await
        .expect_err("missing key");
    assert!(matches!(err, RestoreError::MissingApiKey));
    assert!(err.is_precondition());

    let err = swap_faces(&config, SOURCE, TARGET)
        .await
        .expect_err("missing key");
    assert!(matches!(err, RestoreError::MissingApiKey));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn result_is_saved_under_the_flow_download_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("image/png", "aGk=")))
        .mount(&server)
        .await;

    let result = restore_photo(&config(&server), SOURCE, &RestoreSettings::default())
        .await
        .expect("restore should succeed");

    let dir = tempfile::tempdir().unwrap();
    let saved = save_data_url(dir.path(), Flow::Restore.download_file_name(), &result)
        .await
        .unwrap();

    assert_eq!(saved, dir.path().join("restored-photo.png"));
    assert_eq!(std::fs::read(saved).unwrap(), b"hi");
}
