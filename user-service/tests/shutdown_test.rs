//! Runs the real binary and checks that termination signals stop it cleanly.
#![cfg(unix)]

use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .expect("Failed to find a free port")
}

fn start_server(port: u16) -> Child {
    Command::new(env!("CARGO_BIN_EXE_user-service"))
        .env("PORT", port.to_string())
        .env("LOG_LEVEL", "error")
        .env("RUST_LOG", "error")
        .env_remove("METRICS_PORT")
        .env_remove("OTLP_ENDPOINT")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to start user-service binary")
}

async fn wait_until_ready(port: u16) {
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/health", port);
    let deadline = Instant::now() + Duration::from_secs(10);

    while Instant::now() < deadline {
        if let Ok(response) = client.get(&url).send().await {
            if response.status().is_success() {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("user-service did not become ready on port {}", port);
}

fn send_signal(child: &Child, signal: &str) {
    let status = Command::new("kill")
        .arg(format!("-{}", signal))
        .arg(child.id().to_string())
        .status()
        .expect("Failed to run kill");
    assert!(status.success());
}

fn wait_for_exit(child: &mut Child) -> std::process::ExitStatus {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(status) = child.try_wait().expect("Failed to poll child") {
            return status;
        }
        if Instant::now() >= deadline {
            child.kill().ok();
            panic!("user-service did not exit after signal");
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

async fn assert_exits_cleanly_on(signal: &str) {
    let port = free_port();
    let mut child = start_server(port);
    wait_until_ready(port).await;

    send_signal(&child, signal);
    let status = wait_for_exit(&mut child);
    assert_eq!(status.code(), Some(0), "exit status after {}", signal);

    let refused = reqwest::Client::new()
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(1))
        .send()
        .await;
    assert!(refused.is_err(), "server still answering after {}", signal);
}

#[tokio::test]
async fn sigterm_exits_with_code_zero() {
    assert_exits_cleanly_on("TERM").await;
}

#[tokio::test]
async fn sigint_exits_with_code_zero() {
    assert_exits_cleanly_on("INT").await;
}
