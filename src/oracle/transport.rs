//! One-shot UDP request/response transport.
//!
//! Each call opens a fresh unconnected socket on an ephemeral local port,
//! sends the message as a single datagram, waits for one reply up to a
//! bounded timeout, and releases the socket on every exit path. There is no
//! persistent connection state; a reply belongs to the most recently sent
//! request because each request gets its own socket.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

/// Receive buffer size. The protocol's payloads are short command lines;
/// anything beyond this bound is out of scope.
pub const MAX_DATAGRAM_LEN: usize = 1024;

/// Default bounded wait for a reply.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Error type for transport failures.
///
/// None of these are fatal to the caller: a failed metric query degrades to
/// a sentinel value, a failed location update is dropped and corrected by
/// the next one.
#[derive(Debug)]
pub enum TransportError {
    /// Creating the local UDP endpoint failed.
    SocketCreation(io::Error),
    /// The configured oracle host/port did not resolve to an address.
    AddressResolution(String),
    /// The send itself failed.
    Send(io::Error),
    /// The datagram was only partially accepted by the kernel.
    ShortWrite { sent: usize, expected: usize },
    /// No reply arrived within the configured timeout.
    Timeout,
    /// Receiving the reply failed.
    Receive(io::Error),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::SocketCreation(e) => write!(f, "failed to create UDP socket: {}", e),
            TransportError::AddressResolution(target) => {
                write!(f, "failed to resolve oracle address {}", target)
            }
            TransportError::Send(e) => write!(f, "failed to send datagram: {}", e),
            TransportError::ShortWrite { sent, expected } => {
                write!(f, "short datagram write: {} of {} bytes", sent, expected)
            }
            TransportError::Timeout => write!(f, "timed out waiting for reply"),
            TransportError::Receive(e) => write!(f, "failed to receive reply: {}", e),
        }
    }
}

impl std::error::Error for TransportError {}

/// Resolve an oracle host/port pair to a socket address.
///
/// Accepts dotted IPs as well as hostnames; the first resolved address is
/// used.
pub fn resolve(host: &str, port: u16) -> Result<SocketAddr, TransportError> {
    (host, port)
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .ok_or_else(|| TransportError::AddressResolution(format!("{}:{}", host, port)))
}

/// Perform exactly one send-then-receive cycle against the oracle.
///
/// # Parameters
///
/// * `server` - The oracle's UDP endpoint
/// * `message` - The full command line; sent as a single datagram
/// * `timeout` - Bounded wait for the reply; a zero timeout fails
///   immediately with [`TransportError::Timeout`]
///
/// # Returns
///
/// The reply payload decoded as text, or the transport failure. The local
/// socket is closed before returning in either case.
pub fn send_recv(server: SocketAddr, message: &str, timeout: Duration) -> Result<String, TransportError> {
    let socket = UdpSocket::bind(("0.0.0.0", 0)).map_err(TransportError::SocketCreation)?;

    let sent = socket
        .send_to(message.as_bytes(), server)
        .map_err(TransportError::Send)?;
    if sent != message.len() {
        return Err(TransportError::ShortWrite {
            sent,
            expected: message.len(),
        });
    }

    if timeout.is_zero() {
        return Err(TransportError::Timeout);
    }
    socket.set_read_timeout(Some(timeout)).map_err(TransportError::Receive)?;

    let mut buf = [0u8; MAX_DATAGRAM_LEN];
    match socket.recv_from(&mut buf) {
        Ok((len, _from)) => Ok(String::from_utf8_lossy(&buf[..len]).into_owned()),
        Err(e) if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::TimedOut => {
            Err(TransportError::Timeout)
        }
        Err(e) => Err(TransportError::Receive(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn exchanges_one_datagram_pair() {
        let server = UdpSocket::bind("127.0.0.1:0").unwrap();
        let addr = server.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let mut buf = [0u8; MAX_DATAGRAM_LEN];
            let (len, from) = server.recv_from(&mut buf).unwrap();
            let request = String::from_utf8_lossy(&buf[..len]).into_owned();
            server.send_to(b"PONG", from).unwrap();
            request
        });

        let reply = send_recv(addr, "PING", Duration::from_secs(2)).unwrap();
        assert_eq!(reply, "PONG");
        assert_eq!(handle.join().unwrap(), "PING");
    }

    #[test]
    fn silent_server_times_out_within_bound() {
        // Bind a socket that never answers
        let server = UdpSocket::bind("127.0.0.1:0").unwrap();
        let addr = server.local_addr().unwrap();

        let start = Instant::now();
        let result = send_recv(addr, "PING", Duration::from_millis(100));
        assert!(matches!(result, Err(TransportError::Timeout)));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn zero_timeout_fails_without_waiting() {
        let server = UdpSocket::bind("127.0.0.1:0").unwrap();
        let addr = server.local_addr().unwrap();
        let result = send_recv(addr, "PING", Duration::ZERO);
        assert!(matches!(result, Err(TransportError::Timeout)));
    }

    #[test]
    fn unresolvable_host_is_reported() {
        let err = resolve("name.invalid.", 8103).unwrap_err();
        assert!(matches!(err, TransportError::AddressResolution(_)));
    }

    #[test]
    fn dotted_ip_resolves_without_lookup() {
        let addr = resolve("127.0.0.1", 8103).unwrap();
        assert_eq!(addr.port(), 8103);
        assert!(addr.ip().is_loopback());
    }
}
