use tokio::net::{lookup_host, TcpSocket, TcpStream};
use tracing::{debug, info};

use crate::error::{Result, TransportError};

/// Port the device listens on for framed control requests.
pub const DEFAULT_PORT: u16 = 9999;

/// Connect to a device at `host:port`.
///
/// Every resolved address is tried in order; the last failure is returned if
/// none accepts. Keep-alive is disabled on the socket because a connection
/// only ever carries a single request/response exchange.
pub async fn connect(host: &str, port: u16) -> Result<TcpStream> {
    let addr = format!("{host}:{port}");
    let candidates: Vec<_> = lookup_host((host, port))
        .await
        .map_err(|source| TransportError::Resolve {
            addr: addr.clone(),
            source,
        })?
        .collect();

    if candidates.is_empty() {
        return Err(TransportError::Resolve {
            addr,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses resolved"),
        });
    }

    let mut last_err = None;
    for remote in candidates {
        let socket = if remote.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        };
        let socket = socket.map_err(|source| TransportError::Connect {
            addr: addr.clone(),
            source,
        })?;
        socket
            .set_keepalive(false)
            .map_err(|source| TransportError::Connect {
                addr: addr.clone(),
                source,
            })?;

        match socket.connect(remote).await {
            Ok(stream) => {
                info!(%remote, "connected to device");
                return Ok(stream);
            }
            Err(source) => {
                debug!(%remote, error = %source, "connect attempt failed");
                last_err = Some(source);
            }
        }
    }

    Err(TransportError::Connect {
        addr,
        source: last_err.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotConnected, "no connect attempt made")
        }),
    })
}
