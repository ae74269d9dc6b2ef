pub mod clock;
pub mod error;
pub mod record;
pub mod severity;

mod emit;
mod payload;

pub mod env;
pub mod init;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{RecordError, Result};
pub use record::{Attributes, StructuredError, StructuredErrorBuilder};
pub use severity::{Band, Severity, UnknownSeverity};
