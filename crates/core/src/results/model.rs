//! Competition result model and draft normalization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::records::{OwnedRecord, RecordDraft, RecordId};
use crate::stroke::Stroke;
use crate::utils::{none_if_blank, parse_date};

/// Stored competition result row. Times keep sub-second precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwimResult {
    pub id: RecordId,
    pub owner: String,
    pub date: NaiveDate,
    pub meet: String,
    pub distance_meters: i64,
    pub stroke: Stroke,
    pub time_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Mutation payload for a competition result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDraft {
    pub date: NaiveDate,
    pub meet: String,
    pub distance_meters: i64,
    pub stroke: Stroke,
    pub time_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ResultDraft {
    /// Builds a draft from raw text fields: an unreadable distance falls
    /// back to 50, an unreadable time to 40 seconds.
    pub fn from_fields(
        date: &str,
        meet: &str,
        distance: &str,
        stroke: &str,
        time: &str,
        location: &str,
        notes: &str,
    ) -> Result<Self> {
        let stroke = Stroke::parse(stroke)
            .ok_or_else(|| Error::validation(format!("unknown stroke '{}'", stroke.trim())))?;
        let draft = Self {
            date: parse_date(date)?,
            meet: meet.trim().to_string(),
            distance_meters: distance.trim().parse().unwrap_or(50),
            stroke,
            time_seconds: time.trim().parse().unwrap_or(40.0),
            location: none_if_blank(location),
            notes: none_if_blank(notes),
        };
        draft.normalized()
    }
}

impl RecordDraft for ResultDraft {
    fn normalized(&self) -> Result<Self> {
        if !self.stroke.is_competition() {
            return Err(Error::validation(
                "Drill is not a valid competition stroke",
            ));
        }
        if self.meet.trim().is_empty() {
            return Err(Error::validation("meet is required"));
        }
        let mut draft = self.clone();
        draft.distance_meters = draft.distance_meters.max(25);
        draft.time_seconds = if draft.time_seconds.is_finite() {
            draft.time_seconds.max(1.0)
        } else {
            40.0
        };
        Ok(draft)
    }
}

impl OwnedRecord for SwimResult {
    type Draft = ResultDraft;

    const TABLE: &'static str = "competition_results";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(owner: &str, id: RecordId, draft: &ResultDraft) -> Self {
        Self {
            id,
            owner: owner.to_string(),
            date: draft.date,
            meet: draft.meet.clone(),
            distance_meters: draft.distance_meters,
            stroke: draft.stroke,
            time_seconds: draft.time_seconds,
            location: draft.location.clone(),
            notes: draft.notes.clone(),
        }
    }
}
