use std::future::Future;
use std::time::Duration;

use bytes::BytesMut;
use plugwire_command::Command;
use plugwire_frame::{declared_length, PlugCodec};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_util::codec::{Decoder, Encoder};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::response::Response;
use crate::state::SessionState;

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;

/// Connect to `host:port`, send `command` and return the parsed response.
pub async fn exchange(
    host: &str,
    port: u16,
    config: SessionConfig,
    command: &Command,
) -> Result<Response> {
    Session::new(host, port, config).exchange(command).await
}

/// Owns one connection for exactly one request/response exchange.
///
/// The connection exists only between `Connecting` and the terminal state;
/// it is dropped on every terminal transition, and dropping an already
/// released connection is a no-op.
#[derive(Debug)]
pub struct Session {
    host: String,
    port: u16,
    config: SessionConfig,
    codec: PlugCodec,
    state: SessionState,
    terminal: Option<SessionState>,
    stream: Option<TcpStream>,
    buf: BytesMut,
    cancel: Option<CancellationToken>,
}

impl Session {
    /// Create an idle session for `host:port`.
    pub fn new(host: impl Into<String>, port: u16, config: SessionConfig) -> Self {
        let codec = config.codec();
        Self {
            host: host.into(),
            port,
            config,
            codec,
            state: SessionState::Idle,
            terminal: None,
            stream: None,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            cancel: None,
        }
    }

    /// Abort the exchange when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The terminal state the exchange ended in, once it has ended.
    pub fn terminal_state(&self) -> Option<SessionState> {
        self.terminal
    }

    /// True when no connection is held.
    pub fn is_released(&self) -> bool {
        self.stream.is_none()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run the session's single exchange.
    ///
    /// A second call fails with [`SessionError::AlreadyUsed`] without touching
    /// the network.
    pub async fn exchange(&mut self, command: &Command) -> Result<Response> {
        if self.state != SessionState::Idle {
            return Err(SessionError::AlreadyUsed);
        }

        let outcome = match self.cancel.clone() {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => Err(SessionError::Cancelled),
                    res = self.drive(command) => res,
                }
            }
            None => self.drive(command).await,
        };

        let terminal = match &outcome {
            Ok(_) => SessionState::Completed,
            Err(SessionError::Timeout(_)) => SessionState::TimedOut,
            Err(SessionError::Cancelled) => SessionState::Cancelled,
            Err(_) => SessionState::Errored,
        };
        if let Err(err) = &outcome {
            warn!(host = %self.host, port = self.port, error = %err, "exchange failed");
        }
        self.finish(terminal);
        outcome
    }

    async fn drive(&mut self, command: &Command) -> Result<Response> {
        let idle = self.config.idle_window();

        self.transition(SessionState::Connecting);
        let stream = within(idle, plugwire_transport::connect(&self.host, self.port)).await??;
        self.stream = Some(stream);

        self.transition(SessionState::Sending);
        let mut wire = BytesMut::new();
        self.codec.encode(command.to_bytes(), &mut wire)?;
        let Some(stream) = self.stream.as_mut() else {
            return Err(SessionError::ConnectionClosed);
        };
        // Write side stays open until the response frame is in.
        within(idle, async {
            stream.write_all(&wire).await?;
            stream.flush().await
        })
        .await??;
        debug!(command = %command.id(), bytes = wire.len(), "request sent");

        self.transition(SessionState::AwaitingResponse);
        loop {
            if let Some(body) = self.codec.decode(&mut self.buf)? {
                debug!(bytes = body.len(), trailing = self.buf.len(), "response frame assembled");
                return Response::from_slice(&body);
            }

            let Some(stream) = self.stream.as_mut() else {
                return Err(SessionError::ConnectionClosed);
            };
            let read = within(idle, stream.read_buf(&mut self.buf)).await??;
            if read == 0 {
                return Err(SessionError::ConnectionClosed);
            }
            debug!(
                read,
                buffered = self.buf.len(),
                declared = ?declared_length(&self.buf),
                "response bytes received"
            );
        }
    }

    /// Drop the connection. Returns false if it was already released.
    pub fn release(&mut self) -> bool {
        match self.stream.take() {
            Some(stream) => {
                drop(stream);
                debug!(host = %self.host, port = self.port, "connection released");
                true
            }
            None => false,
        }
    }

    fn finish(&mut self, terminal: SessionState) {
        self.transition(terminal);
        self.terminal = Some(terminal);
        self.release();
        self.transition(SessionState::Closed);
    }

    fn transition(&mut self, next: SessionState) {
        debug!(
            host = %self.host,
            port = self.port,
            from = %self.state,
            to = %next,
            "session transition"
        );
        self.state = next;
    }
}

/// Await `fut`, failing with [`SessionError::Timeout`] once `idle` elapses.
async fn within<F: Future>(idle: Option<Duration>, fut: F) -> Result<F::Output> {
    match idle {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| SessionError::Timeout(limit)),
        None => Ok(fut.await),
    }
}
