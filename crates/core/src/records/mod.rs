//! Generic optimistic repository over one owner's synced record collections.

mod model;
mod repository;
mod store;

pub use model::{MutationOutcome, OwnedRecord, RecordDraft, RecordId};
pub use repository::RecordRepository;
pub use store::{PersonalBestStore, RecordStore};
