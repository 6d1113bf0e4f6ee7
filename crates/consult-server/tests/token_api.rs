use axum::body::Body;
use axum::http::{Request, StatusCode};
use consult_server::{app, AppState};
use consult_types::{AgentProfile, DEFAULT_LLM_MODEL};
use consult_voice::{LiveKitConfig, VoiceService};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const URL: &str = "ws://localhost:7880";
const KEY: &str = "devkey";
const SECRET: &str = "devsecret";

/// Client dir that does not exist, so no static fallback is mounted.
const NO_CLIENT_DIR: &str = "client/dist-missing";

fn test_app(livekit: LiveKitConfig, model: Option<&str>) -> axum::Router {
    let state = AppState {
        voice: Arc::new(VoiceService::new(livekit)),
        agent: AgentProfile::with_model(model),
    };
    app(state, NO_CLIENT_DIR)
}

fn configured_app() -> axum::Router {
    test_app(LiveKitConfig::new(URL, KEY, SECRET), None)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[derive(Deserialize)]
struct Claims {
    sub: String,
    video: VideoClaims,
}

#[derive(Deserialize)]
struct VideoClaims {
    room: String,
    #[serde(rename = "roomJoin")]
    room_join: bool,
    #[serde(rename = "canPublish")]
    can_publish: bool,
    #[serde(rename = "canSubscribe")]
    can_subscribe: bool,
}

fn decode_claims(token: &str) -> Claims {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    let key = DecodingKey::from_secret(SECRET.as_bytes());
    decode::<Claims>(token, &key, &validation)
        .expect("failed to decode token")
        .claims
}

#[tokio::test]
async fn health_check_returns_ok() {
    let (status, body) = get(configured_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn token_issued_for_requested_room_and_identity() {
    let (status, body) = get(
        configured_app(),
        "/token?room=consult-1&identity=web-abc123",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    let token = json["token"].as_str().expect("token field");
    assert!(!token.is_empty());
    assert_eq!(token.split('.').count(), 3, "expected a three-part JWT");

    let claims = decode_claims(token);
    assert_eq!(claims.sub, "web-abc123");
    assert_eq!(claims.video.room, "consult-1");
    assert!(claims.video.room_join);
    assert!(claims.video.can_publish);
    assert!(claims.video.can_subscribe);
}

#[tokio::test]
async fn token_defaults_room_and_identity_when_omitted() {
    let (status, body) = get(configured_app(), "/token").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    let claims = decode_claims(json["token"].as_str().unwrap());
    assert_eq!(claims.video.room, "consult");
    assert!(claims.sub.starts_with("u-"));
}

#[tokio::test]
async fn empty_query_values_are_treated_as_absent() {
    let (status, body) = get(configured_app(), "/token?room=&identity=").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    let claims = decode_claims(json["token"].as_str().unwrap());
    assert_eq!(claims.video.room, "consult");
    assert!(claims.sub.starts_with("u-"));
}

#[tokio::test]
async fn unconfigured_service_returns_503_not_a_token() {
    for livekit in [
        LiveKitConfig::default(),
        LiveKitConfig::new(URL, KEY, ""),
        LiveKitConfig::new("", KEY, SECRET),
    ] {
        let (status, body) = get(test_app(livekit, None), "/token?room=consult-1").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("voice_not_configured"), "body: {text}");
        assert!(!text.contains("\"token\""), "must never return a token");
    }
}

#[tokio::test]
async fn agent_profile_is_served_read_only() {
    let (status, body) = get(configured_app(), "/api/agent/profile").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["DOMAIN"], "UK Immigration only");
    assert_eq!(json["VAD"], "SILERO");
    assert_eq!(json["LLM"], format!("GROQ {DEFAULT_LLM_MODEL}"));
    assert_eq!(json["TURN_DETECTION"], true);
    assert_eq!(json["NOISE_CANCELLATION"], true);
}

#[tokio::test]
async fn agent_profile_honors_model_override() {
    let app = test_app(
        LiveKitConfig::new(URL, KEY, SECRET),
        Some("llama-3.3-70b-versatile"),
    );
    let (status, body) = get(app, "/api/agent/profile").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["LLM"], "GROQ llama-3.3-70b-versatile");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = get(configured_app(), "/api/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
