//! Record identity and draft contracts shared by the synced collections.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::errors::Result;

/// Identifier for a synced record.
///
/// Optimistically created rows carry a `Pending` temp id until the store
/// confirms them; rows read back from the store are always `Confirmed`.
/// Keeping the two states distinct makes rollback and replacement
/// unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Pending(String),
    Confirmed(String),
}

impl RecordId {
    /// Fresh temp id for an optimistic insert.
    pub fn pending() -> Self {
        Self::Pending(Uuid::new_v4().to_string())
    }

    pub fn confirmed(id: impl Into<String>) -> Self {
        Self::Confirmed(id.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending(id) | Self::Confirmed(id) => id,
        }
    }

    /// True until the store has acknowledged the row.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// On the wire the id is the bare server string; the pending/confirmed split
// exists only in memory.
impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Self::Confirmed(String::deserialize(deserializer)?))
    }
}

/// Outcome of a gated destructive mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// The caller declined the destructive-action gate; nothing ran.
    Cancelled,
}

/// Mutation payload for a synced record type.
pub trait RecordDraft: Clone + Send + Sync + Serialize + 'static {
    /// Applies the clamping/defaulting rules for this entity, or rejects
    /// drafts no clamp can repair.
    fn normalized(&self) -> Result<Self>;
}

/// A record owned by exactly one user and synced through a
/// [`RecordStore`](super::RecordStore).
pub trait OwnedRecord:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    type Draft: RecordDraft;

    /// Store table this record lives in.
    const TABLE: &'static str;

    fn id(&self) -> &RecordId;

    /// Builds the optimistic in-memory row for a not-yet-confirmed draft.
    fn from_draft(owner: &str, id: RecordId, draft: &Self::Draft) -> Self;
}
