//! Training session model and draft normalization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::records::{OwnedRecord, RecordDraft, RecordId};
use crate::stroke::Stroke;
use crate::utils::{none_if_blank, parse_date};

/// Stored training session row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: RecordId,
    pub owner: String,
    pub date: NaiveDate,
    pub distance_meters: i64,
    pub duration_minutes: f64,
    pub stroke: Stroke,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perceived_effort: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Mutation payload for a training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub date: NaiveDate,
    pub distance_meters: i64,
    pub duration_minutes: f64,
    pub stroke: Stroke,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perceived_effort: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SessionDraft {
    /// Builds a draft from raw text fields, applying the non-numeric
    /// defaulting rules: distance and duration fall back to 0, an unreadable
    /// effort is dropped. An unknown stroke is rejected at this boundary;
    /// only the import pipeline substitutes `Free`.
    pub fn from_fields(
        date: &str,
        distance: &str,
        duration: &str,
        stroke: &str,
        effort: &str,
        notes: &str,
    ) -> Result<Self> {
        let stroke = Stroke::parse(stroke)
            .ok_or_else(|| Error::validation(format!("unknown stroke '{}'", stroke.trim())))?;
        let draft = Self {
            date: parse_date(date)?,
            distance_meters: distance.trim().parse().unwrap_or(0),
            duration_minutes: duration.trim().parse().unwrap_or(0.0),
            stroke,
            perceived_effort: effort.trim().parse().ok(),
            notes: none_if_blank(notes),
        };
        draft.normalized()
    }
}

impl RecordDraft for SessionDraft {
    fn normalized(&self) -> Result<Self> {
        let mut draft = self.clone();
        draft.distance_meters = draft.distance_meters.max(0);
        draft.duration_minutes = if draft.duration_minutes.is_finite() {
            draft.duration_minutes.max(0.0)
        } else {
            0.0
        };
        draft.perceived_effort = draft.perceived_effort.map(|effort| effort.clamp(1, 10));
        Ok(draft)
    }
}

impl OwnedRecord for Session {
    type Draft = SessionDraft;

    const TABLE: &'static str = "training_sessions";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(owner: &str, id: RecordId, draft: &SessionDraft) -> Self {
        Self {
            id,
            owner: owner.to_string(),
            date: draft.date,
            distance_meters: draft.distance_meters,
            duration_minutes: draft.duration_minutes,
            stroke: draft.stroke,
            perceived_effort: draft.perceived_effort,
            notes: draft.notes.clone(),
        }
    }
}
