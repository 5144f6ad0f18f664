//! Batched submission of imported sessions with post-import reconciliation.

use std::sync::Arc;

use log::{debug, warn};

use crate::errors::{Error, Result};
use crate::records::RecordRepository;
use crate::sessions::Session;

use super::csv::parse_sessions;

/// Rows submitted per store round-trip.
pub const IMPORT_BATCH_SIZE: usize = 500;

/// Progress report for a bulk import.
///
/// Batches commit independently, so a failed run still reports how far it
/// got; `error` carries the first batch-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported_rows: usize,
    pub batches_committed: usize,
    pub total_batches: usize,
    pub error: Option<String>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.imported_rows == self.total_rows
    }
}

/// Validates, normalizes and submits CSV text through the session
/// repository's bulk path.
pub struct BulkImporter {
    sessions: Arc<RecordRepository<Session>>,
}

impl BulkImporter {
    pub fn new(sessions: Arc<RecordRepository<Session>>) -> Self {
        Self { sessions }
    }

    /// Runs the pipeline: parse and normalize every row up front, submit in
    /// fixed-size batches sequentially, stop at the first batch failure
    /// (prior batches stay committed), then re-list from the store rather
    /// than trusting accumulated state.
    pub async fn run(&self, text: &str) -> Result<ImportReport> {
        let drafts = parse_sessions(text)?;
        let total_rows = drafts.len();
        let total_batches = drafts.len().div_ceil(IMPORT_BATCH_SIZE);

        let mut report = ImportReport {
            total_rows,
            imported_rows: 0,
            batches_committed: 0,
            total_batches,
            error: None,
        };

        for batch in drafts.chunks(IMPORT_BATCH_SIZE) {
            match self.sessions.insert_many(batch).await {
                Ok(written) => {
                    report.imported_rows += written;
                    report.batches_committed += 1;
                }
                Err(Error::SignedOut) => return Err(Error::SignedOut),
                Err(err) => {
                    warn!(
                        "import stopped at batch {}/{}: {}",
                        report.batches_committed + 1,
                        total_batches,
                        err
                    );
                    report.error = Some(err.to_string());
                    break;
                }
            }
        }

        // reconciliation: committed batches are authoritative state now
        if let Err(err) = self.sessions.refresh().await {
            warn!("post-import refresh failed: {}", err);
            report.error.get_or_insert(err.to_string());
        }

        debug!(
            "import finished: {}/{} rows in {}/{} batches",
            report.imported_rows, report.total_rows, report.batches_committed, report.total_batches
        );
        Ok(report)
    }
}
