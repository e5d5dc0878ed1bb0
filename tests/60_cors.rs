mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};

#[tokio::test]
async fn preflight_is_empty_200_with_cors_headers() -> Result<()> {
    let server = common::spawn_server().await?;

    for path in ["/vpn-auth", "/vpn-connect", "/vpn-servers", "/vpn-logs"] {
        let res = server
            .client
            .request(Method::OPTIONS, server.url(path))
            .header("origin", "https://app.example.com")
            .header("access-control-request-method", "POST")
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::OK, "{path}");
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        let methods = res.headers()["access-control-allow-methods"].to_str()?.to_string();
        assert!(methods.contains("POST") && methods.contains("OPTIONS"), "{methods}");
        assert!(res.bytes().await?.is_empty(), "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn regular_responses_carry_allow_origin() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .get(server.url("/vpn-servers"))
        .header("origin", "https://app.example.com")
        .send()
        .await?;

    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    Ok(())
}

#[tokio::test]
async fn wrong_method_is_405_json() -> Result<()> {
    let server = common::spawn_server().await?;

    let cases = [
        (Method::GET, "/vpn-auth"),
        (Method::GET, "/vpn-connect"),
        (Method::POST, "/vpn-servers"),
        (Method::DELETE, "/vpn-logs"),
    ];

    for (method, path) in cases {
        let res = server.client.request(method.clone(), server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {path}");
        let body: serde_json::Value = res.json().await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
    }
    Ok(())
}
