//! One document's trip to a printer.
//!
//! A [`PrinterSink`] moves through `Unbound → Bound → Printed`. It enters
//! `Failed` only when the subsystem itself cannot be queried; that state is
//! terminal. Nothing here retries: a resend may print a duplicate label, so
//! the caller decides.

use std::fmt;

use tracing::{info, instrument, warn};

use crate::{Destination, DestinationSelector, PrintError, PrintSubsystem};

/// Where a sink is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkState {
    /// No destination chosen yet.
    Unbound,
    /// Ready to send to this destination.
    Bound(Destination),
    /// The document was accepted by this destination.
    Printed(Destination),
    /// The subsystem could not be queried.
    Failed,
}

impl fmt::Display for SinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkState::Unbound => write!(f, "unbound"),
            SinkState::Bound(d) => write!(f, "bound to {d}"),
            SinkState::Printed(d) => write!(f, "printed on {d}"),
            SinkState::Failed => write!(f, "failed"),
        }
    }
}

/// Binds one destination and sends one serialized document to it.
///
/// Create a fresh sink per document.
pub struct PrinterSink<S: PrintSubsystem> {
    subsystem: S,
    state: SinkState,
}

impl<S: PrintSubsystem> PrinterSink<S> {
    /// An unbound sink over `subsystem`.
    pub fn new(subsystem: S) -> Self {
        Self {
            subsystem,
            state: SinkState::Unbound,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &SinkState {
        &self.state
    }

    /// The bound (or printed-on) destination, if any.
    pub fn destination(&self) -> Option<&Destination> {
        match &self.state {
            SinkState::Bound(d) | SinkState::Printed(d) => Some(d),
            SinkState::Unbound | SinkState::Failed => None,
        }
    }

    /// The underlying subsystem.
    pub fn subsystem(&self) -> &S {
        &self.subsystem
    }

    /// Ask the subsystem for its current destinations.
    ///
    /// Every call queries again. A subsystem error moves the sink to
    /// [`SinkState::Failed`] and is returned as-is.
    pub fn list_destinations(&mut self) -> Result<Vec<Destination>, PrintError> {
        if self.state == SinkState::Failed {
            return Err(PrintError::SinkFailed);
        }
        self.subsystem.list_destinations().inspect_err(|e| {
            warn!(error = %e, "listing destinations failed");
            self.state = SinkState::Failed;
        })
    }

    /// Choose a destination from a fresh listing.
    ///
    /// An empty listing fails with [`PrintError::NoDestination`] and leaves
    /// the sink as it was; so does a selector naming an absent destination.
    /// Rebinding a bound sink is allowed until it has printed.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn bind(&mut self, selector: &DestinationSelector) -> Result<Destination, PrintError> {
        match &self.state {
            SinkState::Unbound | SinkState::Bound(_) => {}
            SinkState::Printed(d) => return Err(PrintError::AlreadyPrinted(d.name().to_string())),
            SinkState::Failed => return Err(PrintError::SinkFailed),
        }

        let destinations = self.list_destinations()?;
        let chosen = selector.select(&destinations)?.clone();
        if destinations.len() > 1 && *selector == DestinationSelector::First {
            warn!(
                count = destinations.len(),
                chosen = %chosen,
                "several destinations available, taking the first listed"
            );
        }
        info!(destination = %chosen, "bound");
        self.state = SinkState::Bound(chosen.clone());
        Ok(chosen)
    }

    /// Write `data` to the bound destination.
    ///
    /// On success the sink is [`SinkState::Printed`] and refuses further
    /// sends. On failure the error is returned unchanged and the sink stays
    /// bound, so the caller may choose to send again.
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    pub fn send(&mut self, data: &[u8]) -> Result<Destination, PrintError> {
        let destination = match &self.state {
            SinkState::Bound(d) => d.clone(),
            SinkState::Unbound => return Err(PrintError::NotBound),
            SinkState::Printed(d) => return Err(PrintError::AlreadyPrinted(d.name().to_string())),
            SinkState::Failed => return Err(PrintError::SinkFailed),
        };

        let mut printer = self.subsystem.open(&destination)?;
        printer.send_raw(data)?;

        info!(destination = %destination, "document sent");
        self.state = SinkState::Printed(destination.clone());
        Ok(destination)
    }
}
