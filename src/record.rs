use crate::clock::{Clock, SystemClock};
use crate::error::{RecordError, Result};
use crate::severity::Severity;
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Supplementary key/value context attached to a record.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Severity-classified error/event record, shaped after the OpenTelemetry
/// log data model.
///
/// A record is immutable once built: the code is stored uppercase, the
/// timestamp is taken from the clock exactly once and truncated to whole
/// seconds, and there are no setters. `attributes` distinguishes "none
/// given" (`None`) from an empty map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredError {
    pub(crate) severity: Severity,
    pub(crate) code: String,
    pub(crate) message: String,
    pub(crate) when: DateTime<Utc>,
    pub(crate) attributes: Option<Attributes>,
}

impl StructuredError {
    /// Build a record stamped with the system clock.
    ///
    /// **Parameters**
    /// - `severity`: raw level or a [`Severity`] constant.
    /// - `code`: machine-readable identifier, normalized to uppercase.
    /// - `message`: free-text description, stored verbatim.
    /// - `attributes`: optional context, stored verbatim.
    ///
    /// **Returns**
    /// - `Err(RecordError::InvalidSeverity)` when `severity` is outside
    ///   `1..=24`; no record is produced.
    pub fn new(
        severity: impl Into<i32>,
        code: impl AsRef<str>,
        message: impl Into<String>,
        attributes: Option<Attributes>,
    ) -> Result<Self> {
        Self::new_with_clock(&SystemClock, severity, code, message, attributes)
    }

    /// Same as [`StructuredError::new`] but reads the timestamp from `clock`.
    pub fn new_with_clock(
        clock: &dyn Clock,
        severity: impl Into<i32>,
        code: impl AsRef<str>,
        message: impl Into<String>,
        attributes: Option<Attributes>,
    ) -> Result<Self> {
        let severity = Severity::new(severity.into())?;
        Ok(Self {
            severity,
            code: code.as_ref().to_uppercase(),
            message: message.into(),
            when: clock.now().trunc_subsecs(0),
            attributes,
        })
    }

    /// Start a builder for attaching attributes one at a time.
    ///
    /// ```
    /// use structured_error::{Severity, StructuredError};
    ///
    /// let err = StructuredError::builder(Severity::INFO, "filecreated", "new file created")
    ///     .attribute("filename", "Readme.md")
    ///     .attribute("lines", 42)
    ///     .build()
    ///     .unwrap();
    /// assert!(err.is_error_code("FileCreated"));
    /// ```
    pub fn builder(
        severity: impl Into<i32>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> StructuredErrorBuilder {
        StructuredErrorBuilder {
            severity: severity.into(),
            code: code.into(),
            message: message.into(),
            attributes: None,
            clock: None,
            encode_error: None,
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn when(&self) -> DateTime<Utc> {
        self.when
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        self.attributes.as_ref()
    }

    /// Case-insensitive comparison against the stored code.
    pub fn is_error_code(&self, candidate: &str) -> bool {
        self.code == candidate.to_uppercase()
    }
}

/// Renders `<SEVERITY>: <CODE> at <timestamp>, <message>[ : k=v, ...]`.
///
/// The suffix is written whenever attributes are present, even if the
/// map is empty.
impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} at {}, {}",
            self.severity,
            self.code,
            self.when.format("%a, %d %b %Y %H:%M:%S GMT"),
            self.message
        )?;

        if let Some(attributes) = &self.attributes {
            f.write_str(" : ")?;
            for (idx, (key, value)) in attributes.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                match value {
                    serde_json::Value::String(s) => write!(f, "{key}={s}")?,
                    other => write!(f, "{key}={other}")?,
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for StructuredError {}

/// Consuming builder returned by [`StructuredError::builder`].
pub struct StructuredErrorBuilder {
    severity: i32,
    code: String,
    message: String,
    attributes: Option<Attributes>,
    clock: Option<Arc<dyn Clock>>,
    encode_error: Option<serde_json::Error>,
}

impl fmt::Debug for StructuredErrorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredErrorBuilder")
            .field("severity", &self.severity)
            .field("code", &self.code)
            .field("message", &self.message)
            .field("attributes", &self.attributes)
            .field("clock", &self.clock.as_ref().map(|_| "<custom>"))
            .field("encode_error", &self.encode_error)
            .finish()
    }
}

impl StructuredErrorBuilder {
    /// Attach one attribute. The value is converted with
    /// [`serde_json::to_value`]; the first conversion failure is kept and
    /// returned by [`build`](Self::build) as [`RecordError::Encoding`].
    pub fn attribute(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.attributes
                    .get_or_insert_with(Attributes::new)
                    .insert(key.into(), v);
            }
            Err(e) => {
                self.encode_error.get_or_insert(e);
            }
        }
        self
    }

    /// Replace the attribute map wholesale.
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// **Returns**
    /// - `Err(RecordError::Encoding)` if an attribute failed to convert.
    /// - `Err(RecordError::InvalidSeverity)` for an out-of-range severity.
    pub fn build(self) -> Result<StructuredError> {
        if let Some(e) = self.encode_error {
            return Err(RecordError::Encoding(e));
        }
        let clock: &dyn Clock = match &self.clock {
            Some(clock) => clock.as_ref(),
            None => &SystemClock,
        };
        StructuredError::new_with_clock(
            clock,
            self.severity,
            self.code,
            self.message,
            self.attributes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed() -> FixedClock {
        FixedClock(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
    }

    fn file_attributes() -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("filename".to_string(), json!("Readme.md"));
        attrs.insert("lines".to_string(), json!(42));
        attrs
    }

    #[test]
    fn construction_normalizes_code() {
        let err = StructuredError::new(Severity::INFO, "filecreated", "new file created", None).unwrap();
        assert_eq!(err.severity(), Severity::INFO);
        assert_eq!(err.code(), "FILECREATED");
        assert_eq!(err.message(), "new file created");
        assert!(err.attributes().is_none());
    }

    #[test]
    fn construction_rejects_unknown_severity() {
        let err = StructuredError::new(999, "x", "y", None).unwrap_err();
        assert!(matches!(err, RecordError::InvalidSeverity(999)));
        assert!(StructuredError::new(0, "x", "y", None).is_err());
        assert!(StructuredError::new(25, "x", "y", None).is_err());
    }

    #[test]
    fn is_error_code_ignores_case() {
        let err = StructuredError::new(Severity::INFO, "FileCreated", "m", None).unwrap();
        assert!(err.is_error_code("filecreated"));
        assert!(err.is_error_code("FILECREATED"));
        assert!(err.is_error_code("fileCREATED"));
        assert!(!err.is_error_code("filedeleted"));
    }

    #[test]
    fn timestamp_comes_from_clock_without_subseconds() {
        let at = Utc.timestamp_opt(1_700_000_000, 987_654_321).unwrap();
        let err = StructuredError::new_with_clock(&FixedClock(at), Severity::WARN, "c", "m", None).unwrap();
        assert_eq!(err.when().timestamp(), 1_700_000_000);
        assert_eq!(err.when().timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn system_clock_stamps_now() {
        let before = Utc::now().timestamp();
        let err = StructuredError::new(Severity::INFO, "c", "m", None).unwrap();
        let after = Utc::now().timestamp();
        assert!(err.when().timestamp() >= before && err.when().timestamp() <= after);
    }

    #[test]
    fn render_with_attributes() {
        let err = StructuredError::new_with_clock(
            &fixed(),
            Severity::INFO,
            "filecreated",
            "new file created",
            Some(file_attributes()),
        )
        .unwrap();
        assert_eq!(
            err.to_string(),
            "INFO: FILECREATED at Tue, 14 Nov 2023 22:13:20 GMT, new file created : filename=Readme.md, lines=42"
        );
    }

    #[test]
    fn render_nil_and_empty_attributes_differ() {
        let none = StructuredError::new_with_clock(&fixed(), Severity::ERROR, "c", "m", None).unwrap();
        let empty =
            StructuredError::new_with_clock(&fixed(), Severity::ERROR, "c", "m", Some(Attributes::new())).unwrap();

        assert_eq!(none.to_string(), "ERROR: C at Tue, 14 Nov 2023 22:13:20 GMT, m");
        assert_eq!(empty.to_string(), "ERROR: C at Tue, 14 Nov 2023 22:13:20 GMT, m : ");
    }

    #[test]
    fn render_structured_values_as_json() {
        let mut attrs = Attributes::new();
        attrs.insert("flags".to_string(), json!([1, 2]));
        attrs.insert("ok".to_string(), json!(false));
        attrs.insert("owner".to_string(), json!({"id": 7}));
        attrs.insert("none".to_string(), serde_json::Value::Null);
        let err = StructuredError::new_with_clock(&fixed(), Severity::DEBUG2, "c", "m", Some(attrs)).unwrap();
        let s = err.to_string();
        assert!(s.starts_with("DEBUG2: C at "));
        assert!(s.contains("flags=[1,2]"));
        assert!(s.contains("ok=false"));
        assert!(s.contains("owner={\"id\":7}"));
        assert!(s.contains("none=null"));
    }

    #[test]
    fn message_is_not_a_format_string() {
        let err = StructuredError::new_with_clock(&fixed(), Severity::INFO, "c", "100% {done}", None).unwrap();
        assert!(err.to_string().ends_with(", 100% {done}"));
    }

    #[test]
    fn every_severity_renders_its_name() {
        for sev in Severity::all() {
            let err = StructuredError::new(sev, "c", "m", None).unwrap();
            let prefix = format!("{}: C at ", sev.name().unwrap());
            assert!(err.to_string().starts_with(&prefix));
        }
    }

    #[test]
    fn builder_collects_attributes() {
        let err = StructuredError::builder(Severity::INFO, "filecreated", "new file created")
            .attribute("filename", "Readme.md")
            .attribute("lines", 42)
            .clock(Arc::new(fixed()))
            .build()
            .unwrap();

        let direct = StructuredError::new_with_clock(
            &fixed(),
            Severity::INFO,
            "filecreated",
            "new file created",
            Some(file_attributes()),
        )
        .unwrap();
        assert_eq!(err, direct);
    }

    #[test]
    fn builder_without_attributes_keeps_none() {
        let err = StructuredError::builder(Severity::TRACE, "c", "m").build().unwrap();
        assert!(err.attributes().is_none());

        let err = StructuredError::builder(40, "c", "m").build().unwrap_err();
        assert!(matches!(err, RecordError::InvalidSeverity(40)));
    }

    #[test]
    fn builder_reports_unencodable_attribute() {
        let mut bad = std::collections::HashMap::new();
        bad.insert((1, 2), 3);
        let err = StructuredError::builder(Severity::INFO, "c", "m")
            .attribute("bad", bad)
            .attribute("ok", 1)
            .build()
            .unwrap_err();
        assert!(matches!(err, RecordError::Encoding(_)));
    }

    #[test]
    fn builder_error_survives_later_attributes() {
        let mut bad = std::collections::HashMap::new();
        bad.insert((1, 2), 3);
        let builder = StructuredError::builder(Severity::INFO, "c", "m")
            .attribute("bad", bad)
            .attributes(Attributes::new());
        assert!(format!("{builder:?}").contains("encode_error: Some"));
        assert!(matches!(builder.build(), Err(RecordError::Encoding(_))));
    }

    #[test]
    fn builder_debug_lists_fields() {
        let builder = StructuredError::builder(Severity::WARN, "disk", "low space")
            .attribute("free_mb", 12)
            .clock(Arc::new(fixed()));
        let dbg = format!("{builder:?}");
        assert!(dbg.starts_with("StructuredErrorBuilder"));
        assert!(dbg.contains("\"disk\""));
        assert!(dbg.contains("free_mb"));
        assert!(dbg.contains("<custom>"));
        assert!(dbg.contains("encode_error: None"));
    }

    #[test]
    fn record_is_a_std_error() {
        let err = StructuredError::new(Severity::FATAL, "boom", "it broke", None).unwrap();
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
        assert!(boxed.source().is_none());
        assert!(boxed.to_string().starts_with("FATAL: BOOM"));
    }
}
