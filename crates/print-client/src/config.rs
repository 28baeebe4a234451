//! Configuration types for the print client.

use std::time::Duration;

/// Transport configuration for network printers.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Network timeout settings.
    pub timeouts: PrinterTimeouts,
}

impl PrinterConfig {
    /// Configuration with the given timeouts.
    pub fn with_timeouts(timeouts: PrinterTimeouts) -> Self {
        Self { timeouts }
    }
}

/// Timeout settings for printer connections.
///
/// Defaults are tuned for LAN-connected label printers:
/// - `connect`: 5s (generous for LAN, might be tight for VPN)
/// - `write`: 30s (a label is small, but a busy printer may stall its
///   receive buffer)
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterTimeouts {
    /// Maximum time to wait for the TCP connection to establish.
    pub connect: Duration,
    /// Maximum time to wait for a write to complete.
    pub write: Duration,
}

impl PrinterTimeouts {
    /// Explicit connect and write timeouts.
    pub fn new(connect: Duration, write: Duration) -> Self {
        Self { connect, write }
    }
}

impl Default for PrinterTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            write: Duration::from_secs(30),
        }
    }
}
