use consult_voice::{LiveKitConfig, VoiceService};

const DEFAULT_URL: &str = "ws://localhost:7880";
const DEFAULT_KEY: &str = "devkey";
const DEFAULT_SECRET: &str = "devsecret";

fn service() -> VoiceService {
    VoiceService::new(LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET))
}

#[test]
fn generate_join_token_produces_jwt() {
    let token = service()
        .generate_join_token("consult-1", "web-abc123", "web-abc123")
        .expect("failed to generate token");

    assert!(!token.is_empty());
    assert_eq!(token.split('.').count(), 3, "expected a three-part JWT");
}

#[test]
fn token_grants_room_scoped_permissions() {
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use serde::Deserialize;

    let token = service()
        .generate_join_token("perm-room", "user-perm", "Perm User")
        .expect("failed to generate token");

    #[derive(Deserialize)]
    struct Claims {
        iss: String,
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
        #[serde(rename = "canPublishData")]
        can_publish_data: bool,
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    let key = DecodingKey::from_secret(DEFAULT_SECRET.as_bytes());
    let token_data = decode::<Claims>(&token, &key, &validation).expect("failed to decode token");

    assert_eq!(token_data.claims.iss, DEFAULT_KEY);
    assert_eq!(token_data.claims.sub, "user-perm");
    assert_eq!(token_data.claims.video.room, "perm-room");
    assert!(token_data.claims.video.room_join);
    assert!(token_data.claims.video.can_publish);
    assert!(token_data.claims.video.can_subscribe);
    assert!(token_data.claims.video.can_publish_data);
}

#[test]
fn disabled_without_full_credentials() {
    let missing_secret =
        VoiceService::new(LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, ""));
    assert!(!missing_secret.is_enabled());
    assert!(missing_secret
        .generate_join_token("room", "id", "id")
        .is_err());

    let missing_url = VoiceService::new(LiveKitConfig::new("", DEFAULT_KEY, DEFAULT_SECRET));
    assert!(!missing_url.is_enabled());

    assert!(service().is_enabled());
}

#[test]
fn config_defaults_ttl_from_toml() {
    let toml_str = r#"
        url = "ws://localhost:7880"
        api_key = "key"
        api_secret = "secret"
    "#;

    let config: LiveKitConfig = toml::from_str(toml_str).expect("parse TOML");
    assert_eq!(config.token_ttl_seconds, 600);
}

#[test]
fn debug_redacts_secret() {
    let config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, "super-secret");
    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[REDACTED]"));
}

#[test]
fn serialize_skips_secret() {
    let config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, "super-secret");
    let json = serde_json::to_value(&config).expect("serialize");
    assert!(json.get("api_secret").is_none());
    assert_eq!(json["api_key"], DEFAULT_KEY);
}
