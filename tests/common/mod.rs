//! Shared utilities for integration tests.

use std::net::SocketAddr;

use greeter::observability::REQUESTS_TOTAL;
use greeter::{GreeterConfig, HttpServer, Shutdown};
use tokio::net::TcpListener;

/// A greeter running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    /// Bind `127.0.0.1:0` and serve `config` in the background.
    pub async fn start(config: GreeterConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config);
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        Self { addr, shutdown }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config with `GREETING` resolved from `value` instead of the process env.
pub fn config_with_greeting(value: Option<&str>) -> GreeterConfig {
    GreeterConfig::default().apply_env_from(|key| {
        (key == greeter::config::GREETING_ENV_VAR)
            .then(|| value.map(str::to_string))
            .flatten()
    })
}

/// Extract `hello_requests_total` from a Prometheus exposition body.
#[allow(dead_code)]
pub fn counter_value(rendered: &str) -> Option<u64> {
    rendered
        .lines()
        .find_map(|line| line.strip_prefix(REQUESTS_TOTAL)?.strip_prefix(' '))
        .and_then(|value| value.trim().parse().ok())
}
