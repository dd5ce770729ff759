//! Shared utilities for integration tests.

use std::io::Write;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{routing::get, Router};
use configinfo::config::ServerConfig;
use configinfo::http::HttpServer;
use configinfo::lifecycle::Shutdown;
use tempfile::NamedTempFile;
use tokio::net::TcpListener;

pub const CONF_FILE_TEXT: &str = "
[section1]
option1 = value1
option2 = value2
[section2]
option1 = value1
option2 = value2
";

/// A server running on an ephemeral port, stopped on drop of `shutdown`.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub conf_file: NamedTempFile,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn write_conf(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Start the server wrapping a fake app that answers `FAKE APP` on `/`.
pub async fn start_server(public_config: &str, conf_text: &str) -> TestServer {
    let conf_file = write_conf(conf_text);

    let mut config = ServerConfig::default();
    config.config_info.public_config = Some(public_config.into());
    config.config_info.config_file = Some(conf_file.path().to_path_buf());

    let inner = Router::new().route("/", get(|| async { "FAKE APP" }));
    let server = HttpServer::new(config, inner).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        shutdown,
        conf_file,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
