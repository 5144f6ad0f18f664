//! Bulk CSV import of training sessions.

mod csv;
mod pipeline;

pub use self::csv::{export_sessions, parse_sessions};
pub use self::pipeline::{BulkImporter, ImportReport, IMPORT_BATCH_SIZE};
