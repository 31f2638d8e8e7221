use std::net::SocketAddr;
use std::time::Duration;

use huntwheel_server::build_app;
use huntwheel_server::config::{RevealConfig, ServerConfig};

pub struct TestServer {
    pub addr: SocketAddr,
    _server: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with zero reveal delay and no settings file.
    pub async fn new() -> Self {
        Self::from_config(Self::base_config(0)).await
    }

    /// Start a test server with a specific reveal delay in milliseconds.
    pub async fn with_reveal_delay(delay_ms: u64) -> Self {
        Self::from_config(Self::base_config(delay_ms)).await
    }

    fn base_config(delay_ms: u64) -> ServerConfig {
        ServerConfig {
            // Empty path disables preference persistence in tests.
            settings_path: String::new(),
            reveal: RevealConfig { delay_ms },
            ..ServerConfig::default()
        }
    }

    pub async fn from_config(config: ServerConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (app, _state) = build_app(config);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            _server: handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}/api/v1{path}", self.addr)
    }
}

/// Fetch the session snapshot as JSON.
pub async fn get_state(client: &reqwest::Client, server: &TestServer) -> serde_json::Value {
    client
        .get(server.url("/state"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

/// Poll until the session is idle with every player revealed, or panic
/// after `max_attempts`.
pub async fn wait_for_run_complete(
    client: &reqwest::Client,
    server: &TestServer,
    max_attempts: usize,
) -> serde_json::Value {
    for _ in 0..max_attempts {
        let state = get_state(client, server).await;
        let idle = state["phase"] == "idle";
        let all_revealed = state["players"]
            .as_array()
            .unwrap()
            .iter()
            .all(|p| p["revealed"] == true && !p["weapon"].is_null());
        if idle && all_revealed {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("assignment run did not complete in time");
}
