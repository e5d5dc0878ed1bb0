mod common;

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn connect_returns_profile_and_records_session() -> Result<()> {
    let server = common::spawn_server().await?;
    let user_id = server.register("anna@example.com", "secret1").await?;

    let (status, body) = server.connect(user_id, 4).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["serverName"], "DE-BER-01");
    assert!(body["vpnIp"].as_str().unwrap().starts_with("10.8."));
    assert!(body["connectionId"].as_i64().is_some());

    let config = body["config"].as_str().unwrap();
    assert!(config.contains("client"));
    assert!(config.contains("AES-256-GCM"));
    let decoded = STANDARD.decode(body["configBase64"].as_str().unwrap())?;
    assert_eq!(String::from_utf8(decoded)?, config);

    let filename = body["downloadFilename"].as_str().unwrap();
    assert!(filename.starts_with("securevpn-") && filename.ends_with(".ovpn"));

    let configs = server.store.configs().await;
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].config_content, config);
    assert_eq!(configs[0].config_type, "OpenVPN");
    Ok(())
}

#[tokio::test]
async fn connect_honours_requested_options() -> Result<()> {
    let server = common::spawn_server().await?;
    let user_id = server.register("opts@example.com", "secret1").await?;

    let (status, body) = server
        .post(
            "/vpn-connect",
            json!({
                "action": "connect",
                "userId": user_id.to_string(),
                "serverId": "1",
                "protocol": "WireGuard",
                "encryption": "ChaCha20"
            }),
        )
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert!(body["config"].as_str().unwrap().contains("ChaCha20"));
    let configs = server.store.configs().await;
    assert_eq!(configs[0].config_type, "WireGuard");
    assert_eq!(configs[0].encryption, "ChaCha20");
    Ok(())
}

#[tokio::test]
async fn unknown_server_or_user_writes_nothing() -> Result<()> {
    let server = common::spawn_server().await?;
    let user_id = server.register("lost@example.com", "secret1").await?;

    let (status, body) = server.connect(user_id, 999).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Сервер не найден");

    let (status, body) = server.connect(4242, 1).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Пользователь не найден");

    assert!(server.store.connections().await.is_empty());
    assert!(server.store.configs().await.is_empty());
    assert_eq!(server.store.log_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn disconnect_closes_exactly_once() -> Result<()> {
    let server = common::spawn_server().await?;
    let user_id = server.register("once@example.com", "secret1").await?;
    let (_, body) = server.connect(user_id, 2).await?;
    let connection_id = body["connectionId"].as_i64().unwrap();

    let (status, body) = server.disconnect(connection_id, user_id).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Отключено от VPN");

    let connections = server.store.connections().await;
    assert_eq!(connections[0].connection_status, "disconnected");
    assert!(connections[0].disconnected_at.is_some());

    let (status, body) = server.disconnect(connection_id, user_id).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Соединение не найдено");
    assert_eq!(server.logs(user_id).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn disconnect_requires_owner() -> Result<()> {
    let server = common::spawn_server().await?;
    let owner = server.register("owner@example.com", "secret1").await?;
    let other = server.register("other@example.com", "secret1").await?;
    let (_, body) = server.connect(owner, 3).await?;
    let connection_id = body["connectionId"].as_i64().unwrap();

    let (status, _) = server.disconnect(connection_id, other).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(server.store.connections().await[0].is_open());
    assert!(server.logs(other).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_connect_requests_are_400() -> Result<()> {
    let server = common::spawn_server().await?;

    let cases = [
        json!({ "action": "connect", "serverId": 1 }),
        json!({ "action": "connect", "userId": "abc", "serverId": 1 }),
        json!({ "action": "connect", "userId": 1, "serverId": 1, "protocol": "x".repeat(21) }),
        json!({ "action": "reconnect", "userId": 1, "serverId": 1 }),
        json!({ "action": "disconnect", "userId": 1 }),
    ];

    for body in cases {
        let (status, response) = server.post("/vpn-connect", body.clone()).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response["success"], false);
    }
    Ok(())
}
