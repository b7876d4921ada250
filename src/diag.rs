//! Diagnostic sink - fire-and-forget reports from the control loop.
//!
//! The pure logic never logs on its own; it hands a [`Diagnostic`] to
//! whatever sink the caller supplies. On target that is [`DefmtLog`], on
//! the host a plain `Vec<Diagnostic>` collects entries for assertions.

use crate::error::{Error, FetchError};

/// Something worth reporting that does not stop the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Diagnostic {
    /// Display did not initialise; the firmware halts after this.
    DisplayInit,
    /// MPU-6050 did not initialise; the firmware halts after this.
    SensorInit,
    /// One sensor read failed; the tick ran with a zero sample.
    SensorRead,
    /// WiFi association or DHCP timed out.
    WifiJoin,
    /// A submit did not produce a response.
    FetchFailed(FetchError),
    /// The response did not fit and was cut after `lines` lines.
    ResponseTruncated { lines: usize },
    /// A key was selected while the input buffer was full.
    InputFull,
    /// Pushing the frame to the panel failed.
    RenderFailed,
}

impl From<Error> for Diagnostic {
    fn from(e: Error) -> Self {
        match e {
            Error::DisplayInit => Diagnostic::DisplayInit,
            Error::SensorInit => Diagnostic::SensorInit,
            Error::WifiJoin => Diagnostic::WifiJoin,
        }
    }
}

/// Destination for [`Diagnostic`] entries. Never read back by the core.
pub trait DiagnosticSink {
    fn record(&mut self, entry: Diagnostic);
}

impl DiagnosticSink for alloc::vec::Vec<Diagnostic> {
    fn record(&mut self, entry: Diagnostic) {
        self.push(entry);
    }
}

/// Sink that writes every entry to the defmt log.
#[cfg(feature = "defmt")]
pub struct DefmtLog;

#[cfg(feature = "defmt")]
impl DiagnosticSink for DefmtLog {
    fn record(&mut self, entry: Diagnostic) {
        match entry {
            Diagnostic::DisplayInit | Diagnostic::SensorInit => {
                defmt::error!("Diag: {}", entry)
            }
            Diagnostic::ResponseTruncated { .. } | Diagnostic::InputFull => {
                defmt::info!("Diag: {}", entry)
            }
            _ => defmt::warn!("Diag: {}", entry),
        }
    }
}
