use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{Result, TransportError};

/// How long address discovery may take before it is reported as unresolved.
pub const DEFAULT_ADDRESS_TIMEOUT: Duration = Duration::from_secs(1);

/// Documentation-range destinations used to pick a route. `connect` on a UDP
/// socket sends no packets.
const ROUTE_TARGET_V4: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 9999);
const ROUTE_TARGET_V6: SocketAddr = SocketAddr::new(
    IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)),
    9999,
);

/// Determine the caller's own address on the local network.
pub async fn local_address() -> Result<IpAddr> {
    local_address_with_timeout(DEFAULT_ADDRESS_TIMEOUT).await
}

/// Determine the caller's own address, giving up after `limit`.
///
/// IPv4 is tried first, then IPv6. Any failure, as well as an unspecified
/// result, is reported as [`TransportError::AddressUnresolved`].
pub async fn local_address_with_timeout(limit: Duration) -> Result<IpAddr> {
    match timeout(limit, routed_address()).await {
        Ok(Ok(ip)) if !ip.is_unspecified() => Ok(ip),
        Ok(Ok(_)) => Err(TransportError::AddressUnresolved(limit)),
        Ok(Err(err)) => {
            debug!(error = %err, "local address discovery failed");
            Err(TransportError::AddressUnresolved(limit))
        }
        Err(_) => Err(TransportError::AddressUnresolved(limit)),
    }
}

async fn routed_address() -> std::io::Result<IpAddr> {
    match source_address(Ipv4Addr::UNSPECIFIED.into(), ROUTE_TARGET_V4).await {
        Ok(ip) if !ip.is_unspecified() => Ok(ip),
        v4 => {
            debug!(result = ?v4, "no IPv4 route, trying IPv6");
            source_address(Ipv6Addr::UNSPECIFIED.into(), ROUTE_TARGET_V6).await
        }
    }
}

/// Source address the kernel picks for `target`. `IpAddr` carries no
/// interface scope, so link-local results come back bare.
async fn source_address(bind: IpAddr, target: SocketAddr) -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind((bind, 0)).await?;
    socket.connect(target).await?;
    Ok(socket.local_addr()?.ip())
}
