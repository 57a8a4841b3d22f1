use anyhow::Context as _;
use std::process::{Child, Command};
use std::time::Duration;

pub use esign_test_support::{KillOnDrop, MockBackend};

#[allow(dead_code)]
pub fn pick_unused_port() -> anyhow::Result<u16> {
    esign_test_support::pick_unused_port()
}

#[allow(dead_code)]
pub async fn wait_http_ok(url: &str, timeout_dur: Duration) -> anyhow::Result<()> {
    esign_test_support::wait_http_ok(url, timeout_dur).await
}

/// Spawn the server binary in streamable HTTP mode against `api_url`.
///
/// `envs` lets individual tests inject fallback credentials.
#[allow(dead_code)]
pub fn spawn_server(port: u16, api_url: &str, envs: &[(&str, &str)]) -> anyhow::Result<Child> {
    let bin = env!("CARGO_BIN_EXE_esign-mcp");
    let mut cmd = Command::new(bin);
    cmd.arg("--http")
        .arg("--port")
        .arg(port.to_string())
        .arg("--api-url")
        .arg(api_url)
        .arg("--log-level")
        .arg("info");
    clear_server_env(&mut cmd);
    for (k, v) in envs {
        cmd.env(k, v);
    }
    cmd.spawn().context("spawn esign-mcp")
}

/// Strip every environment variable the binary reads, so ambient values
/// from the test runner's environment cannot perturb the child.
pub fn clear_server_env(cmd: &mut Command) {
    for var in [
        "ESIGN_HTTP_SERVER",
        "HOST",
        "PORT",
        "ESIGN_API_URL",
        "ESIGN_API_KEY",
        "ESIGN_CLIENT_KEY",
        "ESIGN_TIMEOUT_SECS",
        "ESIGN_LOG_LEVEL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
}
