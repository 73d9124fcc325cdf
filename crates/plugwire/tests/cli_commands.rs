#![cfg(feature = "cli")]

mod common;

use std::process::{Command, Output};
use std::time::Duration;

use serde_json::json;

use common::{spawn_plug, sysinfo, Reply};

async fn plugwire(args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_plugwire"))
            .env_remove("PLUGWIRE_HOST")
            .env_remove("PLUGWIRE_PORT")
            .env_remove("PLUGWIRE_TIMEOUT")
            .args(args)
            .output()
            .expect("plugwire should run")
    })
    .await
    .unwrap()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn get_model_prints_raw_value() {
    let device = spawn_plug(|_| Reply::Json(sysinfo(1, 0))).await;
    let port = device.port.to_string();

    let output = plugwire(args(&[
        "--format", "raw", "get", "model", "--host", "127.0.0.1", "--port", &port,
    ]))
    .await;

    assert!(output.status.success(), "{output:?}");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "HS110(EU)");
}

#[tokio::test]
async fn power_on_reports_success_as_json() {
    let device = spawn_plug(|_| {
        Reply::Json(json!({"system": {"set_relay_state": {"err_code": 0}}}))
    })
    .await;
    let port = device.port.to_string();

    let output = plugwire(args(&[
        "--format", "json", "power", "on", "--host", "127.0.0.1", "--port", &port,
    ]))
    .await;

    assert!(output.status.success(), "{output:?}");
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("power should emit json");
    assert_eq!(payload["operation"], "power");
    assert_eq!(payload["ok"], true);
    assert_eq!(
        device.requests(),
        vec![json!({"system": {"set_relay_state": {"state": 1}}})]
    );
}

#[tokio::test]
async fn protocol_error_exits_with_failure() {
    let device = spawn_plug(|_| {
        Reply::Json(json!({"system": {"set_led_off": {"err_code": -3}}}))
    })
    .await;
    let port = device.port.to_string();

    let output = plugwire(args(&["led", "off", "--host", "127.0.0.1", "--port", &port])).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("err_code -3"));
}

#[tokio::test]
async fn silent_device_exits_with_timeout_code() {
    let device = spawn_plug(|_| Reply::Silent).await;
    let port = device.port.to_string();

    let output = plugwire(args(&[
        "get", "time", "--host", "127.0.0.1", "--port", &port, "--timeout", "100ms",
    ]))
    .await;

    assert_eq!(output.status.code(), Some(124));
    assert!(device.wait_for_hangups(1, Duration::from_secs(1)).await);
}

#[tokio::test]
async fn send_requires_static_command() {
    let output = plugwire(args(&[
        "send", "set_power_state", "--host", "127.0.0.1", "--port", "9",
    ]))
    .await;
    assert_eq!(output.status.code(), Some(64));
}

#[tokio::test]
async fn refused_connection_exits_with_transport_code() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port().to_string();
    drop(listener);

    let output = plugwire(args(&["send", "time", "--host", "127.0.0.1", "--port", &port])).await;
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn version_prints_package_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_plugwire"))
        .arg("version")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("plugwire {}", env!("CARGO_PKG_VERSION"))
    );
}
