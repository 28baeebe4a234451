//! Network printers reached over raw TCP.

use tracing::debug;

use crate::{
    Destination, DestinationKind, PrintError, PrintSubsystem, Printer, PrinterConfig, TcpPrinter,
};

/// A configured network printer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct NetworkPrinter {
    /// Destination name shown in listings and used for selection.
    pub name: String,
    /// `IP`, `IP:PORT`, `hostname` or `hostname:PORT`.
    pub address: String,
}

/// A fixed set of network printers.
///
/// The listing comes from configuration, so it never fails and never probes
/// the network. Reachability is discovered when a job is sent.
#[derive(Debug, Clone)]
pub struct NetworkSubsystem {
    printers: Vec<NetworkPrinter>,
    config: PrinterConfig,
}

impl NetworkSubsystem {
    /// Build from configured printers. Names must be non-empty and unique.
    pub fn new(printers: Vec<NetworkPrinter>, config: PrinterConfig) -> Result<Self, PrintError> {
        for (i, printer) in printers.iter().enumerate() {
            if printer.name.trim().is_empty() {
                return Err(PrintError::InvalidConfig(format!(
                    "network printer #{} has an empty name",
                    i + 1
                )));
            }
            if printers[..i].iter().any(|p| p.name == printer.name) {
                return Err(PrintError::InvalidConfig(format!(
                    "network printer '{}' is configured twice",
                    printer.name
                )));
            }
        }
        Ok(Self { printers, config })
    }

    /// Configured printers.
    pub fn printers(&self) -> &[NetworkPrinter] {
        &self.printers
    }
}

impl PrintSubsystem for NetworkSubsystem {
    fn list_destinations(&mut self) -> Result<Vec<Destination>, PrintError> {
        Ok(self
            .printers
            .iter()
            .map(|p| Destination::network(p.name.as_str()))
            .collect())
    }

    fn open(&mut self, destination: &Destination) -> Result<Box<dyn Printer>, PrintError> {
        let printer = self
            .printers
            .iter()
            .find(|p| {
                destination.kind() == DestinationKind::Network && p.name == destination.name()
            })
            .ok_or_else(|| PrintError::UnknownDestination(destination.name().to_string()))?;
        debug!(name = %printer.name, address = %printer.address, "opening network printer");
        Ok(Box::new(TcpPrinter::connect(&printer.address, &self.config)?))
    }
}
