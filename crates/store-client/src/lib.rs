//! reqwest-based implementation of the swimlog store contracts.
//!
//! [`RestStoreClient`] implements
//! [`RecordStore`](swimlog_core::records::RecordStore) for both record types
//! and [`PersonalBestStore`](swimlog_core::records::PersonalBestStore), so a
//! single instance wires the whole
//! [`SyncContext`](swimlog_core::SyncContext).

mod client;
mod error;

pub use client::{RestStoreClient, StoreConfig};
pub use error::{Result, StoreClientError};
