//! Top-level wiring of repositories and derived views.

use std::sync::Arc;

use crate::bests::PersonalBestTracker;
use crate::identity::IdentityProvider;
use crate::imports::BulkImporter;
use crate::records::{PersonalBestStore, RecordRepository, RecordStore};
use crate::results::SwimResult;
use crate::sessions::Session;

/// Everything the hosting application needs, built once from an explicitly
/// constructed store client and identity provider. A single client instance
/// usually implements all three store contracts and is passed here three
/// times; repositories never reach for process-wide state.
pub struct SyncContext {
    pub sessions: Arc<RecordRepository<Session>>,
    pub results: Arc<RecordRepository<SwimResult>>,
    pub personal_bests: PersonalBestTracker,
    pub importer: BulkImporter,
}

impl SyncContext {
    pub fn new(
        session_store: Arc<dyn RecordStore<Session>>,
        result_store: Arc<dyn RecordStore<SwimResult>>,
        best_store: Arc<dyn PersonalBestStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let sessions = Arc::new(RecordRepository::new(session_store, Arc::clone(&identity)));
        let results = Arc::new(RecordRepository::new(result_store, Arc::clone(&identity)));
        let personal_bests =
            PersonalBestTracker::new(Arc::clone(&results), best_store, identity);
        let importer = BulkImporter::new(Arc::clone(&sessions));

        Self {
            sessions,
            results,
            personal_bests,
            importer,
        }
    }
}
