mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn connect_and_disconnect_are_logged_newest_first() -> Result<()> {
    let server = common::spawn_server().await?;
    let user_id = server.register("logs@example.com", "secret1").await?;

    let (_, body) = server.connect(user_id, 5).await?;
    let logs = server.logs(user_id).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["event"], "Подключено");
    assert_eq!(logs[0]["details"], "Защищенное соединение установлено (AES-256-GCM)");

    let connection_id = body["connectionId"].as_i64().unwrap();
    server.disconnect(connection_id, user_id).await?;

    let logs = server.logs(user_id).await?;
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["event"], "Отключение");
    assert_eq!(logs[0]["details"], "Соединение безопасно закрыто");
    assert_eq!(logs[1]["event"], "Подключено");

    let timestamp = logs[0]["timestamp"].as_str().unwrap();
    assert_eq!(timestamp.len(), 8);
    assert_eq!(timestamp.matches(':').count(), 2);
    Ok(())
}

#[tokio::test]
async fn logs_are_capped_at_fifty() -> Result<()> {
    let server = common::spawn_server().await?;
    let user_id = server.register("busy@example.com", "secret1").await?;

    for _ in 0..30 {
        let (_, body) = server.connect(user_id, 1).await?;
        server.disconnect(body["connectionId"].as_i64().unwrap(), user_id).await?;
    }

    assert_eq!(server.logs(user_id).await?.len(), 50);
    assert_eq!(server.store.log_count().await, 60);
    Ok(())
}

#[tokio::test]
async fn logs_are_scoped_to_user() -> Result<()> {
    let server = common::spawn_server().await?;
    let first = server.register("first@example.com", "secret1").await?;
    let second = server.register("second@example.com", "secret1").await?;

    server.connect(first, 1).await?;

    assert_eq!(server.logs(first).await?.len(), 1);
    assert!(server.logs(second).await?.is_empty());
    assert!(server.logs(9999).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_or_invalid_user_id_is_400() -> Result<()> {
    let server = common::spawn_server().await?;

    for path in ["/vpn-logs", "/vpn-logs?userId=", "/vpn-logs?userId=abc"] {
        let (status, body) = server.get(path).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body["success"], false);
    }
    Ok(())
}

#[tokio::test]
async fn unparseable_query_gets_json_error() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = server.get("/vpn-logs?userId=1&userId=2").await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["error"].as_str().unwrap().contains("userId"));
    Ok(())
}
