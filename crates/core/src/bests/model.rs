//! Personal-best row model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::stroke::Stroke;

/// Best recorded time for one (stroke, distance) pair.
///
/// A derived view: a pure function of the competition results, never
/// mutated directly. Exactly one row exists per key present in the results,
/// holding the minimum time with ties broken by earliest date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalBest {
    pub owner: String,
    pub stroke: Stroke,
    pub distance_meters: i64,
    pub time_seconds: f64,
    pub date: NaiveDate,
    pub meet: String,
}
