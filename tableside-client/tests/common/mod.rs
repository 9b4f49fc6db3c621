#![allow(dead_code)]

use axum::Router;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tableside_client::{ApiClient, ClientConfig, MemoryTokenStore};

/// Serve `app` on an ephemeral port
pub async fn serve(app: Router) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

pub fn config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::new(format!("http://{addr}"))
        .with_ws_url(format!("ws://{addr}/ws"))
        .with_reconnect_delay(Duration::from_millis(50))
        .with_app_origin("https://order.example.com")
}

pub fn client(addr: SocketAddr) -> anyhow::Result<(ApiClient, Arc<MemoryTokenStore>)> {
    tableside_client::logger::init_logger(Some("debug"));
    let store = Arc::new(MemoryTokenStore::new());
    let api = ApiClient::new(&config(addr), store.clone())?;
    Ok((api, store))
}

/// Unsigned admin token for the given restaurant
pub fn admin_token(restaurant_id: i64) -> String {
    let claims = format!(r#"{{"sub":"owner","restaurantId":{restaurant_id},"role":"ADMIN"}}"#);
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims)
    )
}

pub fn order_json(id: i64, table: &str, status: &str, time: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "restaurantId": 1,
        "tableNumber": table,
        "status": status,
        "orderTime": time,
        "items": [{"menuItemId": 4, "menuItemName": "Masala Dosa", "quantity": 2}]
    })
}
