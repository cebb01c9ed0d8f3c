use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::debug;
use url::Url;

use crate::config::{PORT_CONNECT_TIMEOUT_MS, WAIT_POLL_INTERVAL_MS};
use crate::validator::ContractChecker;

/// Resolve the backend's socket address from the base URL. `None` when the
/// host doesn't resolve (the HTTP poll still runs without the port precheck).
pub fn backend_addr(url: &Url) -> Option<SocketAddr> {
    let host = url.host_str()?;
    let port = url.port_or_known_default()?;
    (host, port).to_socket_addrs().ok()?.next()
}

/// Check if something is listening on the backend's TCP port.
pub fn is_port_open(addr: SocketAddr) -> bool {
    let domain = match addr {
        SocketAddr::V4(_) => socket2::Domain::IPV4,
        SocketAddr::V6(_) => socket2::Domain::IPV6,
    };

    let socket = match socket2::Socket::new(
        domain,
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    ) {
        Ok(s) => s,
        Err(_) => return false,
    };

    socket
        .connect_timeout(
            &addr.into(),
            Duration::from_millis(PORT_CONNECT_TIMEOUT_MS),
        )
        .is_ok()
}

/// Wait for the backend to accept TCP connections and answer /ping.
/// Returns true if it became ready within the timeout.
pub async fn wait_for_backend(
    checker: &ContractChecker,
    addr: Option<SocketAddr>,
    timeout_secs: u64,
) -> bool {
    let deadline = Duration::from_secs(timeout_secs);
    let interval = Duration::from_millis(WAIT_POLL_INTERVAL_MS);

    let result = timeout(deadline, async {
        loop {
            // Cheap TCP check first; only ping once something is listening
            let port_ready = addr.map(is_port_open).unwrap_or(true);
            if port_ready && checker.ping().await.is_ok() {
                debug!("Backend is responding");
                return true;
            }
            sleep(interval).await;
        }
    })
    .await;

    result.unwrap_or(false)
}
