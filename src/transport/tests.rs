use crate::transport::message::{InboundEnvelope, OutboundFrame};
use crate::transport::session::{self, Session};
use crate::utils::MalformedFrame;
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::accept_async;
use tungstenite::protocol::Message as WsMessage;

#[test]
fn test_encode_subscribe_intent() {
    let frame = OutboundFrame::subscribe("grill/temp");
    assert_eq!(
        frame.encode().unwrap(),
        r#"{"action":"subscribe","topic":"grill/temp"}"#
    );
}

#[test]
fn test_encode_unsubscribe_intent() {
    let frame = OutboundFrame::unsubscribe("grill/fan");
    assert_eq!(
        frame.encode().unwrap(),
        r#"{"action":"unsubscribe","topic":"grill/fan"}"#
    );
}

#[test]
fn test_encode_publish_keeps_payload_as_string() {
    let frame = OutboundFrame::publish("grill/settings/update", r#"{"tempUnit":"F"}"#);
    let encoded: serde_json::Value = serde_json::from_str(&frame.encode().unwrap()).unwrap();
    assert_eq!(
        encoded,
        json!({"topic": "grill/settings/update", "payload": "{\"tempUnit\":\"F\"}"})
    );
}

#[test]
fn test_parse_string_payload() {
    let env = InboundEnvelope::parse(r#"{"topic":"grill/temp","payload":"225"}"#).unwrap();
    assert_eq!(env.topic, "grill/temp");
    assert_eq!(env.payload, "225");
}

#[test]
fn test_parse_structured_payload_becomes_json_text() {
    let env =
        InboundEnvelope::parse(r#"{"topic":"grill/system/info","payload":{"uptime":"3h"}}"#)
            .unwrap();
    assert_eq!(env.payload, r#"{"uptime":"3h"}"#);

    let env = InboundEnvelope::parse(r#"{"topic":"grill/temp","payload":231.5}"#).unwrap();
    assert_eq!(env.payload, "231.5");

    let env = InboundEnvelope::parse(r#"{"topic":"grill/temp","payload":null}"#).unwrap();
    assert_eq!(env.payload, "null");
}

#[test]
fn test_parse_rejects_malformed_frames() {
    assert!(matches!(
        InboundEnvelope::parse("not json"),
        Err(MalformedFrame::InvalidJson(_))
    ));
    assert!(matches!(
        InboundEnvelope::parse("[1,2,3]"),
        Err(MalformedFrame::NotAnObject)
    ));
    assert!(matches!(
        InboundEnvelope::parse(r#"{"payload":"225"}"#),
        Err(MalformedFrame::MissingTopic)
    ));
    assert!(matches!(
        InboundEnvelope::parse(r#"{"topic":"","payload":"225"}"#),
        Err(MalformedFrame::MissingTopic)
    ));
    assert!(matches!(
        InboundEnvelope::parse(r#"{"topic":42,"payload":"225"}"#),
        Err(MalformedFrame::MissingTopic)
    ));
    assert!(matches!(
        InboundEnvelope::parse(r#"{"topic":"grill/temp"}"#),
        Err(MalformedFrame::MissingPayload)
    ));
}

#[tokio::test]
async fn test_open_fails_without_listener() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = session::open(&format!("ws://{addr}/ws")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_session_forwards_frames_both_ways() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (seen_tx, mut seen_rx) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(WsMessage::text(r#"{"topic":"grill/fan","payload":"40"}"#))
            .await
            .unwrap();
        while let Some(Ok(msg)) = ws.next().await {
            if let WsMessage::Text(text) = msg {
                seen_tx.send(text.as_str().to_string()).unwrap();
            }
        }
    });

    let stream = session::open(&format!("ws://{addr}/ws")).await.unwrap();
    let (in_tx, mut in_rx) = mpsc::unbounded_channel::<String>();
    let session = Session::start(
        "test",
        stream,
        move |text| {
            let _ = in_tx.send(text.to_string());
        },
        || {},
    );
    assert!(session.id.starts_with("session-"));

    assert!(session.send(&OutboundFrame::subscribe("grill/temp")));
    assert!(session.send(&OutboundFrame::publish("grill/command", "getStatus")));

    let first = timeout(Duration::from_secs(2), seen_rx.recv()).await.unwrap().unwrap();
    let second = timeout(Duration::from_secs(2), seen_rx.recv()).await.unwrap().unwrap();
    assert_eq!(first, r#"{"action":"subscribe","topic":"grill/temp"}"#);
    assert_eq!(second, r#"{"topic":"grill/command","payload":"getStatus"}"#);

    let inbound = timeout(Duration::from_secs(2), in_rx.recv()).await.unwrap().unwrap();
    assert_eq!(inbound, r#"{"topic":"grill/fan","payload":"40"}"#);

    let writer = session.close().expect("writer handle");
    timeout(Duration::from_secs(2), writer)
        .await
        .expect("writer did not finish after close")
        .unwrap();
}

#[tokio::test]
async fn test_backend_close_fires_on_closed() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.close(None).await.unwrap();
    });

    let stream = session::open(&format!("ws://{addr}/ws")).await.unwrap();
    let (closed_tx, closed_rx) = tokio::sync::oneshot::channel::<()>();
    let _session = Session::start("test", stream, |_| {}, move || {
        let _ = closed_tx.send(());
    });

    timeout(Duration::from_secs(2), closed_rx)
        .await
        .expect("on_closed not called")
        .unwrap();
}
