//! JSON wire format.
//!
//! ```json
//! {
//!   "Severity": "INFO",
//!   "Code": "FILECREATED",
//!   "Message": "new file created",
//!   "When": 1700000000,
//!   "Attributes": {"filename": "Readme.md", "lines": 42}
//! }
//! ```
//!
//! `Severity` travels as its canonical name and `When` as whole seconds
//! since the Unix epoch. `Attributes` may be `null` or missing, which both
//! decode to "no attributes".

use crate::error::{RecordError, Result};
use crate::record::{Attributes, StructuredError};
use crate::severity::Severity;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireRecord {
    severity: Severity,
    code: String,
    message: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    when: DateTime<Utc>,
    #[serde(default)]
    attributes: Option<Attributes>,
}

impl From<StructuredError> for WireRecord {
    fn from(err: StructuredError) -> Self {
        WireRecord {
            severity: err.severity,
            code: err.code,
            message: err.message,
            when: err.when,
            attributes: err.attributes,
        }
    }
}

impl From<WireRecord> for StructuredError {
    fn from(wire: WireRecord) -> Self {
        StructuredError {
            severity: wire.severity,
            code: wire.code.to_uppercase(),
            message: wire.message,
            when: wire.when.trunc_subsecs(0),
            attributes: wire.attributes,
        }
    }
}

impl Serialize for StructuredError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        WireRecord::from(self.clone()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StructuredError {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        WireRecord::deserialize(deserializer).map(StructuredError::from)
    }
}

impl StructuredError {
    /// Encode the record as a JSON payload.
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(RecordError::Encoding)
    }

    /// Encode the record as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(RecordError::Encoding)
    }

    /// Decode a payload produced by [`StructuredError::to_payload`] or any
    /// producer following the same shape.
    ///
    /// **Returns**
    /// - `Err(RecordError::Decoding)` for malformed JSON, missing required
    ///   fields, wrong field types, unknown severity names or timestamps
    ///   outside the representable range.
    pub fn from_payload(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(RecordError::Decoding)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(RecordError::Decoding)
    }
}
