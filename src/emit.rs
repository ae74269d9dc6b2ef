use crate::record::StructuredError;
use crate::severity::Band;
use tracing::Level;

impl StructuredError {
    /// Forward the record to `tracing` at the level of its severity band.
    ///
    /// The event carries `severity`, `code`, `when` (Unix seconds) and, if
    /// present, `attributes` as compact JSON. The record's message becomes
    /// the event message. FATAL records are emitted at `ERROR`.
    pub fn emit(&self) {
        // `Value`'s Display writes compact JSON and cannot fail.
        let attributes = self.attributes.as_ref().map(|attrs| {
            attrs
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<serde_json::Value>()
        });
        let severity = self.severity;
        let code = self.code.as_str();
        let when = self.when.timestamp();
        let message = self.message.as_str();

        macro_rules! emit_at {
            ($level:expr) => {
                tracing::event!(
                    $level,
                    severity = %severity,
                    code = %code,
                    when = when,
                    attributes = attributes.as_ref().map(tracing::field::display),
                    "{}",
                    message
                )
            };
        }

        match severity.band() {
            Band::Trace => emit_at!(Level::TRACE),
            Band::Debug => emit_at!(Level::DEBUG),
            Band::Info => emit_at!(Level::INFO),
            Band::Warn => emit_at!(Level::WARN),
            Band::Error | Band::Fatal => emit_at!(Level::ERROR),
        }
    }
}
