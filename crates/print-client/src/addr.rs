//! Network printer address resolution.
//!
//! Configured network printers give an address as `IP`, `IP:PORT`,
//! `hostname` or `hostname:PORT`. The port defaults to 9100.

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use crate::PrintError;

/// Default raw printing port (JetDirect / RAW).
pub const DEFAULT_PORT: u16 = 9100;

/// Resolve a configured printer address to a `SocketAddr`.
///
/// Literal addresses are parsed without touching DNS. Hostnames take the
/// first resolved address, so a dual-stack host uses whatever the resolver
/// lists first.
pub fn resolve_printer_addr(input: &str) -> Result<SocketAddr, PrintError> {
    let input = input.trim();
    if input.is_empty() || input.contains(char::is_whitespace) {
        return Err(PrintError::InvalidAddress(input.to_string()));
    }

    if let Ok(addr) = input.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = input.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    // host:port first, then the bare host on the default port.
    if let Ok(mut addrs) = input.to_socket_addrs()
        && let Some(addr) = addrs.next()
    {
        return Ok(addr);
    }
    if let Ok(mut addrs) = (input, DEFAULT_PORT).to_socket_addrs()
        && let Some(addr) = addrs.next()
    {
        return Ok(addr);
    }

    Err(PrintError::NoAddressFound(input.to_string()))
}
