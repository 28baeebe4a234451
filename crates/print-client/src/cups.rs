//! CUPS queues, driven through the `lpstat` and `lp` command-line tools.
//!
//! Jobs are submitted with `-o raw` so the label markup reaches the printer
//! untouched by any driver filter.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::{info, instrument, warn};

use crate::{Destination, DestinationKind, PrintError, PrintSubsystem, Printer};

const SUBSYSTEM: &str = "cups";

/// The local CUPS spooler.
#[derive(Debug, Clone)]
pub struct CupsSubsystem {
    lpstat: OsString,
    lp: OsString,
}

impl Default for CupsSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CupsSubsystem {
    /// Use `lpstat` and `lp` from `PATH`.
    pub fn new() -> Self {
        Self::with_programs("lpstat", "lp")
    }

    /// Use specific `lpstat` and `lp` executables.
    pub fn with_programs(lpstat: impl Into<OsString>, lp: impl Into<OsString>) -> Self {
        Self {
            lpstat: lpstat.into(),
            lp: lp.into(),
        }
    }
}

impl PrintSubsystem for CupsSubsystem {
    #[instrument(skip(self))]
    fn list_destinations(&mut self) -> Result<Vec<Destination>, PrintError> {
        let output = match Command::new(&self.lpstat)
            .arg("-p")
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            // No CUPS client tools on this host: no queues, not a failure.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    lpstat = %self.lpstat.to_string_lossy(),
                    "lpstat not found, skipping CUPS queues"
                );
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(PrintError::SubsystemFailed {
                    subsystem: SUBSYSTEM,
                    details: format!("cannot run {}: {e}", self.lpstat.to_string_lossy()),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // lpstat exits non-zero when no queue has been added yet.
            if stderr.contains("No destinations added") {
                return Ok(Vec::new());
            }
            warn!(status = %output.status, "lpstat failed");
            return Err(PrintError::SubsystemFailed {
                subsystem: SUBSYSTEM,
                details: format!("lpstat exited with {}: {}", output.status, stderr.trim()),
            });
        }

        Ok(parse_lpstat(&String::from_utf8_lossy(&output.stdout)))
    }

    fn open(&mut self, destination: &Destination) -> Result<Box<dyn Printer>, PrintError> {
        if destination.kind() != DestinationKind::Queue {
            return Err(PrintError::UnknownDestination(destination.name().to_string()));
        }
        Ok(Box::new(CupsQueue {
            lp: self.lp.clone(),
            queue: destination.name().to_string(),
        }))
    }
}

/// Queue names from `lpstat -p` output.
///
/// Each queue is reported on a line of the form
/// `printer NAME is idle.  enabled since ...`; continuation lines are
/// indented and skipped.
pub fn parse_lpstat(stdout: &str) -> Vec<Destination> {
    stdout
        .lines()
        .filter_map(|line| line.strip_prefix("printer "))
        .filter_map(|rest| rest.split_whitespace().next())
        .map(Destination::queue)
        .collect()
}

/// One CUPS queue opened for a raw job.
struct CupsQueue {
    lp: OsString,
    queue: String,
}

impl Printer for CupsQueue {
    #[instrument(skip(self, data), fields(queue = %self.queue, bytes = data.len()))]
    fn send_raw(&mut self, data: &[u8]) -> Result<(), PrintError> {
        let mut child = Command::new(&self.lp)
            .args(["-d", &self.queue, "-o", "raw"])
            .env("LC_ALL", "C")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PrintError::SubsystemFailed {
                subsystem: SUBSYSTEM,
                details: format!("cannot run {}: {e}", self.lp.to_string_lossy()),
            })?;

        // Close stdin before waiting so lp sees end of input.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(data),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|e| PrintError::SubsystemFailed {
                subsystem: SUBSYSTEM,
                details: format!("lp did not finish: {e}"),
            })?;
        written.map_err(PrintError::WriteFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let details = match stderr.trim() {
                "" => format!("lp exited with {}", output.status),
                msg => msg.to_string(),
            };
            return Err(PrintError::JobRejected {
                destination: self.queue.clone(),
                details,
            });
        }

        info!(job = %String::from_utf8_lossy(&output.stdout).trim(), "job submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_queue_lines() {
        let stdout = "\
printer Zebra_ZD420 is idle.  enabled since Tue 14 Oct 2025 09:12:01 AM CEST
printer Office_Laser disabled since Mon 13 Oct 2025 05:00:00 PM CEST -
\treason unknown
";
        let names: Vec<String> = parse_lpstat(stdout)
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, ["Zebra_ZD420", "Office_Laser"]);
    }

    #[test]
    fn empty_output_has_no_queues() {
        assert!(parse_lpstat("").is_empty());
        assert!(parse_lpstat("scheduler is running\n").is_empty());
    }

    #[test]
    fn network_destinations_are_not_ours() {
        let mut cups = CupsSubsystem::new();
        assert!(matches!(
            cups.open(&Destination::network("workshop")),
            Err(PrintError::UnknownDestination(_))
        ));
    }

    #[test]
    fn missing_lpstat_lists_no_queues() {
        let mut cups = CupsSubsystem::with_programs("/nonexistent/lpstat", "/nonexistent/lp");
        assert_eq!(cups.list_destinations().unwrap(), Vec::new());
    }
}
