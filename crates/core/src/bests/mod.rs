//! Personal-best derived view.

mod model;
mod tracker;

pub use model::PersonalBest;
pub use tracker::{
    derive_personal_bests, PersonalBestTracker, REMOTE_RECONCILE_INTERVAL_SECS,
};
