//! Optimistic repository over one owner's synced records.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};

use log::{debug, warn};

use crate::errors::{Error, Result};
use crate::identity::IdentityProvider;

use super::model::{MutationOutcome, OwnedRecord, RecordDraft, RecordId};
use super::store::RecordStore;

/// Authoritative-as-known local copy of one owner's records.
///
/// Mutations apply optimistically before the remote round-trip and roll back
/// on failure, so a failed operation leaves the collection exactly at its
/// pre-call state. The collection is held newest-first: refreshes take the
/// store's date-descending order and optimistic inserts go to the front.
///
/// A second mutation for an id whose round-trip is still outstanding is
/// rejected with [`Error::MutationInFlight`] before any optimistic apply.
/// Locks are only held for the synchronous apply/rollback steps, never
/// across the store call.
pub struct RecordRepository<R: OwnedRecord> {
    store: Arc<dyn RecordStore<R>>,
    identity: Arc<dyn IdentityProvider>,
    records: RwLock<Vec<R>>,
    in_flight: Mutex<HashSet<RecordId>>,
}

impl<R: OwnedRecord> RecordRepository<R> {
    pub fn new(store: Arc<dyn RecordStore<R>>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            store,
            identity,
            records: RwLock::new(Vec::new()),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Current in-memory state, newest first, including pending rows.
    pub fn list(&self) -> Vec<R> {
        self.records.read().unwrap().clone()
    }

    fn owner(&self) -> Result<String> {
        self.identity.current_owner().ok_or(Error::SignedOut)
    }

    fn begin_mutation(&self, id: &RecordId) -> Result<()> {
        let mut in_flight = self.in_flight.lock().unwrap();
        if !in_flight.insert(id.clone()) {
            return Err(Error::MutationInFlight(id.to_string()));
        }
        Ok(())
    }

    fn end_mutation(&self, id: &RecordId) {
        self.in_flight.lock().unwrap().remove(id);
    }

    /// Replaces local state with the store's authoritative listing.
    pub async fn refresh(&self) -> Result<Vec<R>> {
        let owner = self.owner()?;
        let rows = self.store.list_by_owner(&owner, None).await?;
        debug!("refreshed {} rows from {}", rows.len(), R::TABLE);
        *self.records.write().unwrap() = rows.clone();
        Ok(rows)
    }

    /// Validates and normalizes the draft, inserts a pending row at the
    /// front of the collection, then submits it to the store. On success the
    /// pending row is replaced by the confirmed record; on failure it is
    /// removed and the store's message surfaced.
    pub async fn create(&self, draft: R::Draft) -> Result<R> {
        let owner = self.owner()?;
        let draft = draft.normalized()?;

        let temp_id = RecordId::pending();
        self.begin_mutation(&temp_id)?;
        let optimistic = R::from_draft(&owner, temp_id.clone(), &draft);
        self.records.write().unwrap().insert(0, optimistic);

        let result = match self.store.insert(&owner, &draft).await {
            Ok(confirmed) => {
                let mut records = self.records.write().unwrap();
                if let Some(slot) = records.iter_mut().find(|record| record.id() == &temp_id) {
                    *slot = confirmed.clone();
                }
                Ok(confirmed)
            }
            Err(err) => {
                warn!("insert into {} failed, removing pending row: {}", R::TABLE, err);
                self.records
                    .write()
                    .unwrap()
                    .retain(|record| record.id() != &temp_id);
                Err(err)
            }
        };
        self.end_mutation(&temp_id);
        result
    }

    /// Replaces the record in place optimistically, then submits the update.
    /// On failure the captured pre-mutation record is restored at its
    /// original position; no partial state is exposed.
    pub async fn update(&self, id: &RecordId, draft: R::Draft) -> Result<R> {
        let owner = self.owner()?;
        let draft = draft.normalized()?;
        self.begin_mutation(id)?;

        let replacement = R::from_draft(&owner, id.clone(), &draft);
        let previous = {
            let mut records = self.records.write().unwrap();
            match records.iter().position(|record| record.id() == id) {
                Some(position) => {
                    let previous = records[position].clone();
                    records[position] = replacement.clone();
                    Some(previous)
                }
                None => None,
            }
        };
        let Some(previous) = previous else {
            self.end_mutation(id);
            return Err(Error::validation(format!("unknown record {id}")));
        };

        let result = match self.store.update(id.as_str(), &draft).await {
            Ok(()) => Ok(replacement),
            Err(err) => {
                warn!("update of {} {} failed, restoring previous row: {}", R::TABLE, id, err);
                let mut records = self.records.write().unwrap();
                if let Some(slot) = records.iter_mut().find(|record| record.id() == id) {
                    *slot = previous;
                }
                Err(err)
            }
        };
        self.end_mutation(id);
        result
    }

    /// Destructive-action gate: an unconfirmed delete performs no mutation
    /// and no network call. A confirmed delete removes the record
    /// optimistically and restores it at its original index on failure.
    pub async fn delete(&self, id: &RecordId, confirmed: bool) -> Result<MutationOutcome> {
        if !confirmed {
            debug!("delete of {} {} declined by caller", R::TABLE, id);
            return Ok(MutationOutcome::Cancelled);
        }
        self.owner()?;
        self.begin_mutation(id)?;

        let removed = {
            let mut records = self.records.write().unwrap();
            let position = records.iter().position(|record| record.id() == id);
            position.map(|position| (position, records.remove(position)))
        };
        let Some((position, record)) = removed else {
            self.end_mutation(id);
            return Err(Error::validation(format!("unknown record {id}")));
        };

        let result = match self.store.delete(id.as_str()).await {
            Ok(()) => Ok(MutationOutcome::Applied),
            Err(err) => {
                warn!("delete of {} {} failed, restoring row: {}", R::TABLE, id, err);
                let mut records = self.records.write().unwrap();
                let position = position.min(records.len());
                records.insert(position, record);
                Err(err)
            }
        };
        self.end_mutation(id);
        result
    }

    /// Bulk path used by the import pipeline: no optimistic apply, the
    /// caller reconciles with [`refresh`](Self::refresh) afterwards.
    pub async fn insert_many(&self, drafts: &[R::Draft]) -> Result<usize> {
        let owner = self.owner()?;
        let mut normalized = Vec::with_capacity(drafts.len());
        for draft in drafts {
            normalized.push(draft.normalized()?);
        }
        self.store.insert_many(&owner, &normalized).await
    }
}
