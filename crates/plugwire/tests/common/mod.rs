//! In-process simulated plug for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::BytesMut;
use futures_util::{SinkExt, StreamExt};
use plugwire::frame::{encode_frame, PlugCodec, RESPONSE_KEY};
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_util::codec::Framed;

/// How the simulated plug answers one request.
pub enum Reply {
    /// One well-formed response frame.
    Json(Value),
    /// A response frame whose body is arbitrary bytes.
    Body(Vec<u8>),
    /// The response frame delivered in two writes, `pause` apart.
    Split {
        body: Value,
        at: usize,
        pause: Duration,
    },
    /// Never answer; wait for the client to hang up.
    Silent,
}

pub struct SimulatedPlug {
    pub port: u16,
    requests: Arc<Mutex<Vec<Value>>>,
    hangups: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl SimulatedPlug {
    /// Every request received so far, parsed.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of connections the client closed while the plug stayed silent.
    pub fn hangups(&self) -> usize {
        self.hangups.load(Ordering::SeqCst)
    }

    /// Wait until the client has hung up on `count` silent connections.
    pub async fn wait_for_hangups(&self, count: usize, limit: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        while tokio::time::Instant::now() < deadline {
            if self.hangups() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.hangups() >= count
    }
}

impl Drop for SimulatedPlug {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Listen on an ephemeral loopback port and answer each connection's single
/// request with `reply`.
pub async fn spawn_plug<F>(reply: F) -> SimulatedPlug
where
    F: Fn(&Value) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let hangups = Arc::new(AtomicUsize::new(0));
    let reply = Arc::new(reply);

    let handle = {
        let requests = Arc::clone(&requests);
        let hangups = Arc::clone(&hangups);
        tokio::spawn(async move {
            while let Ok((sock, _)) = listener.accept().await {
                let reply = Arc::clone(&reply);
                let requests = Arc::clone(&requests);
                let hangups = Arc::clone(&hangups);
                tokio::spawn(async move {
                    serve(sock, reply.as_ref(), &requests, &hangups).await;
                });
            }
        })
    };

    SimulatedPlug {
        port,
        requests,
        hangups,
        handle,
    }
}

async fn serve<F>(
    sock: TcpStream,
    reply: &F,
    requests: &Mutex<Vec<Value>>,
    hangups: &AtomicUsize,
) where
    F: Fn(&Value) -> Reply,
{
    let mut framed = Framed::new(sock, PlugCodec::device());
    let Some(Ok(body)) = framed.next().await else {
        return;
    };
    let request: Value = serde_json::from_slice(&body).unwrap();
    requests.lock().unwrap().push(request.clone());

    match reply(&request) {
        Reply::Json(body) => {
            framed.send(body.to_string().into_bytes()).await.unwrap();
        }
        Reply::Body(body) => {
            framed.send(body).await.unwrap();
        }
        Reply::Split { body, at, pause } => {
            let mut wire = BytesMut::new();
            encode_frame(body.to_string().as_bytes(), RESPONSE_KEY, &mut wire).unwrap();
            let mut sock = framed.into_inner();
            sock.write_all(&wire[..at]).await.unwrap();
            sock.flush().await.unwrap();
            tokio::time::sleep(pause).await;
            sock.write_all(&wire[at..]).await.unwrap();
            sock.flush().await.unwrap();
        }
        Reply::Silent => {
            // A well-behaved client closes the connection when its idle window expires.
            while let Some(Ok(_)) = framed.next().await {}
            hangups.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Answer like an HS110 with the given relay and LED state.
pub fn sysinfo(relay_state: i64, led_off: i64) -> Value {
    serde_json::json!({
        "system": {"get_sysinfo": {
            "sw_ver": "1.5.4 Build 180815 Rel.121440",
            "model": "HS110(EU)",
            "alias": "Desk lamp",
            "relay_state": relay_state,
            "led_off": led_off,
            "deviceId": "8006ABCDEF0123456789",
            "err_code": 0
        }}
    })
}
