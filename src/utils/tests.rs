use super::error::{MalformedFrame, PubSubError};
use super::logging;

#[test]
fn logging_init_accepts_levels() {
    // Should not panic
    logging::init("info");
    logging::init("debug");
    logging::init("warn");
}

#[test]
fn parse_level_falls_back_to_info() {
    assert_eq!(logging::parse_level("WARNING"), tracing::Level::WARN);
    assert_eq!(logging::parse_level(" trace "), tracing::Level::TRACE);
    assert_eq!(logging::parse_level("verbose"), tracing::Level::INFO);
}

#[test]
fn superseded_error_names_the_address() {
    let err = PubSubError::Superseded {
        address: "ws://grill.local:1880/ws".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "connection attempt to ws://grill.local:1880/ws was superseded"
    );
}

#[test]
fn encode_error_converts_from_serde() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: PubSubError = serde_err.into();
    assert!(matches!(err, PubSubError::Encode(_)));
    assert!(MalformedFrame::MissingTopic.to_string().contains("topic"));
}
