//! The seam between a [`PrinterSink`](crate::PrinterSink) and whatever
//! actually owns the printers.

use tracing::debug;

use crate::{Destination, PrintError, Printer};

/// A printing subsystem: enumerates destinations and opens one for output.
///
/// Implementations must not cache listings between calls; a sink asks again
/// for every print attempt.
pub trait PrintSubsystem {
    /// Current destinations, in subsystem order.
    fn list_destinations(&mut self) -> Result<Vec<Destination>, PrintError>;

    /// Open `destination` for raw output.
    ///
    /// Returns [`PrintError::UnknownDestination`] when the destination does
    /// not belong to this subsystem.
    fn open(&mut self, destination: &Destination) -> Result<Box<dyn Printer>, PrintError>;
}

impl<S: PrintSubsystem + ?Sized> PrintSubsystem for Box<S> {
    fn list_destinations(&mut self) -> Result<Vec<Destination>, PrintError> {
        (**self).list_destinations()
    }

    fn open(&mut self, destination: &Destination) -> Result<Box<dyn Printer>, PrintError> {
        (**self).open(destination)
    }
}

/// Several subsystems presented as one.
///
/// Listings are concatenated in member order. `open` asks each member in
/// turn and uses the first that recognises the destination.
#[derive(Default)]
pub struct CombinedSubsystem {
    members: Vec<Box<dyn PrintSubsystem>>,
}

impl CombinedSubsystem {
    /// An empty combination (lists nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member.
    pub fn with(mut self, member: Box<dyn PrintSubsystem>) -> Self {
        self.members.push(member);
        self
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// `true` when there are no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl PrintSubsystem for CombinedSubsystem {
    fn list_destinations(&mut self) -> Result<Vec<Destination>, PrintError> {
        let mut all = Vec::new();
        for member in &mut self.members {
            all.extend(member.list_destinations()?);
        }
        debug!(count = all.len(), "listed destinations");
        Ok(all)
    }

    fn open(&mut self, destination: &Destination) -> Result<Box<dyn Printer>, PrintError> {
        for member in &mut self.members {
            match member.open(destination) {
                Err(PrintError::UnknownDestination(_)) => continue,
                other => return other,
            }
        }
        Err(PrintError::UnknownDestination(destination.name().to_string()))
    }
}
