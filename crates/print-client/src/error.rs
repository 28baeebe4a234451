//! Typed error types for the print client.

use std::io;
use std::time::Duration;

/// Printer error conditions, categorized by type.
///
/// Each variant carries enough context to produce a helpful error message.
/// Use [`PrintError::requires_operator()`] to separate conditions that need
/// someone at the printer from those a caller may choose to retry.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    // -- Destinations --
    /// The subsystem reported no destinations at bind time.
    #[error("no printer destinations available")]
    NoDestination,

    /// The requested destination is not in the current listing.
    #[error("no printer destination named '{0}'")]
    UnknownDestination(String),

    /// Enumerating destinations or submitting a job to the print
    /// subsystem failed outright.
    #[error("{subsystem} print subsystem failed: {details}")]
    SubsystemFailed {
        /// Which subsystem (`cups`, `network`).
        subsystem: &'static str,
        /// Human-readable description of the failure.
        details: String,
    },

    /// The destination refused the job.
    #[error("job rejected by '{destination}': {details}")]
    JobRejected {
        /// Destination name.
        destination: String,
        /// What the subsystem reported.
        details: String,
    },

    // -- Sink lifecycle --
    /// `send` was called before a successful `bind`.
    #[error("printer sink is not bound to a destination")]
    NotBound,

    /// The sink already delivered its document.
    #[error("document already printed on '{0}'")]
    AlreadyPrinted(String),

    /// The sink entered the failed state and accepts no further calls.
    #[error("printer sink has failed")]
    SinkFailed,

    // -- Connection --
    /// The printer actively refused the connection (e.g. port not open).
    #[error("connection refused: {addr}")]
    ConnectionRefused {
        /// The address that was attempted.
        addr: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// TCP connect timed out before the printer responded.
    #[error("connection timed out: {addr} ({timeout:?})")]
    ConnectionTimeout {
        /// The address that was attempted.
        addr: String,
        /// The configured timeout that elapsed.
        timeout: Duration,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Connection failed for a reason other than refusal or timeout.
    #[error("connection failed: {addr}")]
    ConnectionFailed {
        /// The address that was attempted.
        addr: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    // -- Address --
    /// The provided address string could not be parsed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// DNS resolution found no addresses for the given hostname.
    #[error("no address found for hostname: {0}")]
    NoAddressFound(String),

    // -- I/O --
    /// Writing data to the printer failed.
    #[error("write failed: {0}")]
    WriteFailed(#[source] io::Error),

    // -- Configuration --
    /// An invalid configuration was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PrintError {
    /// Returns `true` when nothing will change until someone acts on the
    /// printer or its configuration (plug it in, add a queue, fix an
    /// address). Such errors must be surfaced, never retried in a loop.
    ///
    /// Transient output failures (timeouts, broken writes) return `false`;
    /// whether to resend is the caller's decision since a resend may print
    /// a duplicate label. Lifecycle misuse (`NotBound`, `AlreadyPrinted`)
    /// also returns `false`.
    pub fn requires_operator(&self) -> bool {
        matches!(
            self,
            PrintError::NoDestination
                | PrintError::UnknownDestination(_)
                | PrintError::SubsystemFailed { .. }
                | PrintError::JobRejected { .. }
                | PrintError::SinkFailed
                | PrintError::ConnectionRefused { .. }
                | PrintError::InvalidAddress(_)
                | PrintError::NoAddressFound(_)
                | PrintError::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_errors() {
        assert!(PrintError::NoDestination.requires_operator());
        assert!(PrintError::UnknownDestination("zebra".into()).requires_operator());
        assert!(
            PrintError::SubsystemFailed {
                subsystem: "cups",
                details: "lpstat not found".into(),
            }
            .requires_operator()
        );
        assert!(
            PrintError::ConnectionRefused {
                addr: "x".into(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "test"),
            }
            .requires_operator()
        );
        assert!(PrintError::SinkFailed.requires_operator());
        assert!(PrintError::InvalidConfig("test".into()).requires_operator());
    }

    #[test]
    fn caller_decides_errors() {
        assert!(
            !PrintError::ConnectionTimeout {
                addr: "x".into(),
                timeout: Duration::from_secs(1),
                source: io::Error::new(io::ErrorKind::TimedOut, "test"),
            }
            .requires_operator()
        );
        assert!(
            !PrintError::WriteFailed(io::Error::new(io::ErrorKind::BrokenPipe, "test"))
                .requires_operator()
        );
        assert!(
            !PrintError::ConnectionFailed {
                addr: "x".into(),
                source: io::Error::other("test"),
            }
            .requires_operator()
        );
        assert!(!PrintError::NotBound.requires_operator());
        assert!(!PrintError::AlreadyPrinted("zebra".into()).requires_operator());
    }

    #[test]
    fn messages_name_the_destination() {
        assert_eq!(
            PrintError::UnknownDestination("Zebra_ZD420".into()).to_string(),
            "no printer destination named 'Zebra_ZD420'"
        );
        assert_eq!(
            PrintError::JobRejected {
                destination: "Zebra_ZD420".into(),
                details: "printer is disabled".into(),
            }
            .to_string(),
            "job rejected by 'Zebra_ZD420': printer is disabled"
        );
    }
}
