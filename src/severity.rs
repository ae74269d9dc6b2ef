//! Severity scale shared with the OpenTelemetry log data model.
//!
//! Six bands (TRACE, DEBUG, INFO, WARN, ERROR, FATAL) of four sub-levels
//! each, numbered 1..=24. The numbers match OpenTelemetry's
//! `SeverityNumber`, so ordering and range checks work on the raw value.

use crate::error::{RecordError, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[rustfmt::skip]
const NAMES: [&str; 24] = [
    "TRACE", "TRACE2", "TRACE3", "TRACE4",
    "DEBUG", "DEBUG2", "DEBUG3", "DEBUG4",
    "INFO", "INFO2", "INFO3", "INFO4",
    "WARN", "WARN2", "WARN3", "WARN4",
    "ERROR", "ERROR2", "ERROR3", "ERROR4",
    "FATAL", "FATAL2", "FATAL3", "FATAL4",
];

/// A validated severity level in `1..=24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Severity(u8);

impl Severity {
    pub const TRACE: Severity = Severity(1);
    pub const TRACE2: Severity = Severity(2);
    pub const TRACE3: Severity = Severity(3);
    pub const TRACE4: Severity = Severity(4);
    pub const DEBUG: Severity = Severity(5);
    pub const DEBUG2: Severity = Severity(6);
    pub const DEBUG3: Severity = Severity(7);
    pub const DEBUG4: Severity = Severity(8);
    pub const INFO: Severity = Severity(9);
    pub const INFO2: Severity = Severity(10);
    pub const INFO3: Severity = Severity(11);
    pub const INFO4: Severity = Severity(12);
    pub const WARN: Severity = Severity(13);
    pub const WARN2: Severity = Severity(14);
    pub const WARN3: Severity = Severity(15);
    pub const WARN4: Severity = Severity(16);
    pub const ERROR: Severity = Severity(17);
    pub const ERROR2: Severity = Severity(18);
    pub const ERROR3: Severity = Severity(19);
    pub const ERROR4: Severity = Severity(20);
    pub const FATAL: Severity = Severity(21);
    pub const FATAL2: Severity = Severity(22);
    pub const FATAL3: Severity = Severity(23);
    pub const FATAL4: Severity = Severity(24);

    /// Validate a raw severity number.
    ///
    /// **Returns**
    /// - `Ok(Severity)` for values in `1..=24`.
    /// - `Err(RecordError::InvalidSeverity)` for anything else.
    pub fn new(value: i32) -> Result<Self> {
        if (1..=24).contains(&value) {
            Ok(Severity(value as u8))
        } else {
            Err(RecordError::InvalidSeverity(value))
        }
    }

    /// Raw severity number.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Canonical uppercase name, e.g. `"WARN3"`.
    pub fn name(self) -> Option<&'static str> {
        (self.0 as usize)
            .checked_sub(1)
            .and_then(|idx| NAMES.get(idx))
            .copied()
    }

    /// Exact lookup of a canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| Severity(idx as u8 + 1))
    }

    /// Band this level belongs to.
    pub fn band(self) -> Band {
        match self.0 {
            1..=4 => Band::Trace,
            5..=8 => Band::Debug,
            9..=12 => Band::Info,
            13..=16 => Band::Warn,
            17..=20 => Band::Error,
            _ => Band::Fatal,
        }
    }

    /// Position inside the band, `1..=4`.
    pub fn sub_level(self) -> u8 {
        (self.0 - 1) % 4 + 1
    }

    /// All 24 levels in ascending order.
    pub fn all() -> impl Iterator<Item = Severity> {
        (1..=24u8).map(Severity)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unnamed values render empty rather than failing.
        f.write_str(self.name().unwrap_or(""))
    }
}

impl TryFrom<i32> for Severity {
    type Error = RecordError;

    fn try_from(value: i32) -> Result<Self> {
        Severity::new(value)
    }
}

impl From<Severity> for i32 {
    fn from(severity: Severity) -> Self {
        i32::from(severity.0)
    }
}

/// Error returned when a string does not name a severity level.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown severity name: {0:?}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    /// Lenient parse used for configuration: surrounding whitespace and
    /// casing are ignored.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Severity::from_name(&s.trim().to_uppercase()).ok_or_else(|| UnknownSeverity(s.to_string()))
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name().unwrap_or(""))
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Severity::from_name(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown severity name {name:?}")))
    }
}

/// One of the six named groups of four severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Band {
    pub fn as_str(self) -> &'static str {
        match self {
            Band::Trace => "TRACE",
            Band::Debug => "DEBUG",
            Band::Info => "INFO",
            Band::Warn => "WARN",
            Band::Error => "ERROR",
            Band::Fatal => "FATAL",
        }
    }

    /// `tracing` has no fatal level, so FATAL shares ERROR.
    pub fn tracing_level(self) -> tracing::Level {
        match self {
            Band::Trace => tracing::Level::TRACE,
            Band::Debug => tracing::Level::DEBUG,
            Band::Info => tracing::Level::INFO,
            Band::Warn => tracing::Level::WARN,
            Band::Error | Band::Fatal => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
