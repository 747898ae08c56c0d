pub mod error;
pub mod publication;
pub mod roster;

pub use error::{Error, Result};
pub use publication::{JsonSink, PublicationRecord, RecordSink, XlsxSink};
pub use roster::{RosterEntry, RosterReader, require_identifier, resolve};
