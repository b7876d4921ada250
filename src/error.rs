//! Unified error types for tiltkey.
//!
//! Error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used during startup.
///
/// Display and sensor failures are fatal: the firmware halts. A failed
/// WiFi join is only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Peripherals
    /// I²C transaction to the display failed during init.
    DisplayInit,

    /// MPU-6050 did not answer or reported an unexpected identity.
    SensorInit,

    // Network
    /// WiFi association or DHCP did not complete before the timeout.
    WifiJoin,
}

/// Why a fetch did not produce a response text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// DNS, TCP, TLS or HTTP framing failure.
    Transport,

    /// The server answered with a status other than 200.
    Status(u16),

    /// The body is not valid JSON (or not the expected shape).
    MalformedJson,

    /// JSON parsed but `candidates[0].content.parts[0].text` is absent.
    MissingText,

    /// The request body could not be serialized.
    Encode,
}

impl core::fmt::Display for FetchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FetchError::Transport => f.write_str("transport error"),
            FetchError::Status(code) => write!(f, "HTTP status {}", code),
            FetchError::MalformedJson => f.write_str("malformed JSON response"),
            FetchError::MissingText => f.write_str("response has no text"),
            FetchError::Encode => f.write_str("request encoding failed"),
        }
    }
}
