//! Printer output for woodtag labels.
//!
//! A [`PrinterSink`] lists the destinations a [`PrintSubsystem`] offers,
//! binds one, and sends a serialized label to it exactly once. Subsystems
//! shipped here are CUPS queues ([`CupsSubsystem`]) and configured network
//! printers on raw TCP port 9100 ([`NetworkSubsystem`]). Everything is
//! synchronous (`std::net`, `std::process`), with no async runtime.

#[cfg(feature = "tcp")]
mod addr;
mod config;
mod cups;
mod destination;
mod error;
#[cfg(feature = "tcp")]
mod network;
mod sink;
mod subsystem;
#[cfg(feature = "tcp")]
mod tcp;

#[cfg(feature = "tcp")]
pub use addr::{DEFAULT_PORT, resolve_printer_addr};
pub use config::{PrinterConfig, PrinterTimeouts};
pub use cups::{CupsSubsystem, parse_lpstat};
pub use destination::{Destination, DestinationKind, DestinationSelector};
pub use error::PrintError;
#[cfg(feature = "tcp")]
pub use network::{NetworkPrinter, NetworkSubsystem};
pub use sink::{PrinterSink, SinkState};
pub use subsystem::{CombinedSubsystem, PrintSubsystem};
#[cfg(feature = "tcp")]
pub use tcp::TcpPrinter;

// ── Traits ──────────────────────────────────────────────────────────────

/// Raw byte output to one printer. Every transport implements this.
pub trait Printer: Send {
    /// Send raw bytes to the printer.
    fn send_raw(&mut self, data: &[u8]) -> Result<(), PrintError>;

    /// Send a label stream (convenience wrapper over `send_raw`).
    fn send_zpl(&mut self, zpl: &str) -> Result<(), PrintError> {
        self.send_raw(zpl.as_bytes())
    }
}
