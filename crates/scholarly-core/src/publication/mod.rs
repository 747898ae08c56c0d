mod sink;
mod types;

pub use sink::{JsonSink, RecordSink, XlsxSink};
pub use types::*;
