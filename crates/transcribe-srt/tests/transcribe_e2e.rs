mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use murmur_stt_engine::EngineConfig;
use tower::ServiceExt;
use transcribe_srt::{ServiceConfig, router};

use common::mock_engine::MockEngine;
use common::{multipart_body, multipart_content_type};

struct TestService {
    app: Router,
    upload_dir: tempfile::TempDir,
    _fixture_dir: tempfile::TempDir,
}

fn service_with_fixture(fixture_json: Option<&str>) -> TestService {
    let upload_dir = tempfile::tempdir().unwrap();
    let fixture_dir = tempfile::tempdir().unwrap();

    let model_path = fixture_dir.path().join("model.json");
    if let Some(json) = fixture_json {
        std::fs::write(&model_path, json).unwrap();
    }

    let config = ServiceConfig::new(upload_dir.path(), EngineConfig::new(&model_path));
    TestService {
        app: router::<MockEngine>(config),
        upload_dir,
        _fixture_dir: fixture_dir,
    }
}

async fn post_transcribe(app: Router, body: Vec<u8>) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri("/transcribe")
        .header(header::CONTENT_TYPE, multipart_content_type())
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn leftover_files(dir: &tempfile::TempDir) -> Vec<String> {
    std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

const SHORT_CLIP_FIXTURE: &str = r#"{
    "segments": [
        {"start": 0.0, "end": 2.5, "text": " hi", "words": []}
    ],
    "language": "en",
    "language_probability": 0.98
}"#;

#[tokio::test]
async fn valid_audio_yields_a_single_block_srt() {
    let service = service_with_fixture(Some(SHORT_CLIP_FIXTURE));

    let body = multipart_body("file", Some("clip.wav"), b"RIFF fake audio");
    let (status, bytes) = post_transcribe(service.app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "1\n00:00:00,000 --> 00:00:02,500\nhi\n\n"
    );

    // The uploaded audio is gone; only the generated SRT remains.
    let leftovers = leftover_files(&service.upload_dir);
    assert_eq!(leftovers.len(), 1);
    assert!(leftovers[0].ends_with(".srt"), "unexpected file: {leftovers:?}");
}

#[tokio::test]
async fn srt_response_suggests_an_attachment_download() {
    let service = service_with_fixture(Some(SHORT_CLIP_FIXTURE));

    let body = multipart_body("file", Some("clip.wav"), b"RIFF fake audio");
    let request = Request::builder()
        .method("POST")
        .uri("/transcribe")
        .header(header::CONTENT_TYPE, multipart_content_type())
        .body(Body::from(body))
        .unwrap();
    let response = service.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/x-subrip"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\""));
    assert!(disposition.ends_with(".srt\""));
}

#[tokio::test]
async fn missing_file_part_is_a_400_and_leaves_no_temp_files() {
    let service = service_with_fixture(Some(SHORT_CLIP_FIXTURE));

    let body = multipart_body("not_file", Some("clip.wav"), b"RIFF");
    let (status, bytes) = post_transcribe(service.app, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, serde_json::json!({ "error": "No file part" }));
    assert!(leftover_files(&service.upload_dir).is_empty());
}

#[tokio::test]
async fn missing_filename_is_a_400() {
    let service = service_with_fixture(Some(SHORT_CLIP_FIXTURE));

    let body = multipart_body("file", None, b"RIFF");
    let (status, bytes) = post_transcribe(service.app, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, serde_json::json!({ "error": "No selected file" }));
    assert!(leftover_files(&service.upload_dir).is_empty());
}

#[tokio::test]
async fn empty_upload_is_a_400() {
    let service = service_with_fixture(Some(SHORT_CLIP_FIXTURE));

    let body = multipart_body("file", Some("clip.wav"), b"");
    let (status, bytes) = post_transcribe(service.app, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, serde_json::json!({ "error": "No selected file" }));
    assert!(leftover_files(&service.upload_dir).is_empty());
}

#[tokio::test]
async fn model_load_failure_is_a_500_and_cleans_up_the_upload() {
    // No fixture file on disk: MockEngine::load fails like a missing
    // device would.
    let service = service_with_fixture(None);

    let body = multipart_body("file", Some("clip.wav"), b"RIFF");
    let (status, bytes) = post_transcribe(service.app, body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("model unavailable"), "got: {message}");
    assert!(leftover_files(&service.upload_dir).is_empty());
}

#[tokio::test]
async fn transcription_failure_is_a_500_with_the_engine_message() {
    let service = service_with_fixture(Some(r#"{"fail": "corrupt audio stream"}"#));

    let body = multipart_body("file", Some("clip.wav"), b"not really audio");
    let (status, bytes) = post_transcribe(service.app, body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("corrupt audio stream"), "got: {message}");
    assert!(leftover_files(&service.upload_dir).is_empty());
}

#[tokio::test]
async fn splitting_policy_is_reachable_through_configuration() {
    let upload_dir = tempfile::tempdir().unwrap();
    let fixture_dir = tempfile::tempdir().unwrap();
    let model_path = fixture_dir.path().join("model.json");
    std::fs::write(
        &model_path,
        r#"{
            "segments": [
                {"start": 0.0, "end": 10.0, "text": "a b c", "words": [
                    {"start": 0.0, "end": 2.0, "text": "a "},
                    {"start": 2.0, "end": 9.0, "text": "b "},
                    {"start": 9.0, "end": 10.0, "text": "c"}
                ]}
            ],
            "language": "en",
            "language_probability": 0.9
        }"#,
    )
    .unwrap();

    let mut config = ServiceConfig::new(upload_dir.path(), EngineConfig::new(&model_path));
    config.max_segment_duration = Some(8.0);
    let app = router::<MockEngine>(config);

    let body = multipart_body("file", Some("clip.wav"), b"RIFF");
    let (status, bytes) = post_transcribe(app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "1\n00:00:00,000 --> 00:00:02,000\na\n\n\
         2\n00:00:02,000 --> 00:00:10,000\nb c\n\n"
    );
}

#[tokio::test]
async fn timed_out_request_is_a_500_and_eventually_leaves_nothing_behind() {
    let upload_dir = tempfile::tempdir().unwrap();
    let fixture_dir = tempfile::tempdir().unwrap();
    let model_path = fixture_dir.path().join("model.json");
    std::fs::write(
        &model_path,
        format!(r#"{{"delay_ms": 500, "transcription": {SHORT_CLIP_FIXTURE}}}"#),
    )
    .unwrap();

    let mut config = ServiceConfig::new(upload_dir.path(), EngineConfig::new(&model_path));
    config.transcribe_timeout = Some(std::time::Duration::from_millis(50));
    let app = router::<MockEngine>(config);

    let body = multipart_body("file", Some("clip.wav"), b"RIFF");
    let (status, bytes) = post_transcribe(app, body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("timed out"), "got: {message}");

    // The run keeps going after the response; once it finishes, the
    // SRT it wrote is discarded along with the audio the upload guard
    // already removed.
    for _ in 0..100 {
        if leftover_files(&upload_dir).is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    assert!(leftover_files(&upload_dir).is_empty());
}

#[tokio::test]
async fn health_endpoint_answers() {
    let service = service_with_fixture(Some(SHORT_CLIP_FIXTURE));

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = service.app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
