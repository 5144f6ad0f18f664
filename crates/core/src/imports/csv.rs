//! CSV parsing and export for training sessions.

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::debug;

use crate::errors::{Error, Result};
use crate::records::RecordDraft;
use crate::sessions::{Session, SessionDraft};
use crate::stroke::Stroke;
use crate::utils::{none_if_blank, parse_date};

/// Parses import text into normalized session drafts.
///
/// The header row is required; recognized columns (case-insensitive) are
/// `date`, `distance_m`/`distance`, `duration_min`/`duration`, `stroke`,
/// `rpe` and `notes`. Missing numeric fields default to 0 and an unknown
/// stroke defaults to `Free`. A file with zero data rows is rejected whole.
pub fn parse_sessions(text: &str) -> Result<Vec<SessionDraft>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| Error::validation(format!("invalid header row: {err}")))?
        .clone();
    let column = |names: &[&str]| {
        headers
            .iter()
            .position(|header| names.iter().any(|name| header.eq_ignore_ascii_case(name)))
    };
    let date_col = column(&["date"]);
    let distance_col = column(&["distance_m", "distance"]);
    let duration_col = column(&["duration_min", "duration"]);
    let stroke_col = column(&["stroke"]);
    let rpe_col = column(&["rpe"]);
    let notes_col = column(&["notes"]);

    let mut drafts = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // header is line 1, first data row line 2
        let line = index + 2;
        let record =
            record.map_err(|err| Error::validation(format!("line {line}: {err}")))?;
        let field = |col: Option<usize>| field_at(&record, col);

        let date = parse_date(field(date_col)).map_err(|_| {
            Error::validation(format!("line {line}: missing or invalid date '{}'", field(date_col)))
        })?;
        let draft = SessionDraft {
            date,
            distance_meters: field(distance_col).parse().unwrap_or(0),
            duration_minutes: field(duration_col).parse().unwrap_or(0.0),
            stroke: Stroke::parse(field(stroke_col)).unwrap_or(Stroke::Free),
            perceived_effort: field(rpe_col).parse().ok(),
            notes: none_if_blank(field(notes_col)),
        };
        drafts.push(draft.normalized()?);
    }

    if drafts.is_empty() {
        return Err(Error::validation("no rows found"));
    }
    debug!("parsed {} session rows from import text", drafts.len());
    Ok(drafts)
}

fn field_at<'a>(record: &'a StringRecord, col: Option<usize>) -> &'a str {
    col.and_then(|index| record.get(index)).unwrap_or("")
}

/// Renders sessions to the interchange format
/// `date,distance_m,duration_min,stroke,rpe,notes`, one session per line.
/// Commas inside notes are replaced by spaces so every session stays on one
/// unquoted line.
pub fn export_sessions(sessions: &[Session]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(Vec::new());

    writer
        .write_record(["date", "distance_m", "duration_min", "stroke", "rpe", "notes"])
        .map_err(|err| Error::validation(format!("export failed: {err}")))?;
    for session in sessions {
        writer
            .write_record(&[
                session.date.to_string(),
                session.distance_meters.to_string(),
                session.duration_minutes.to_string(),
                session.stroke.to_string(),
                session
                    .perceived_effort
                    .map(|effort| effort.to_string())
                    .unwrap_or_default(),
                session
                    .notes
                    .as_deref()
                    .unwrap_or("")
                    .replace(',', " "),
            ])
            .map_err(|err| Error::validation(format!("export failed: {err}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| Error::validation(format!("export failed: {err}")))?;
    String::from_utf8(bytes).map_err(|err| Error::validation(format!("export failed: {err}")))
}

#[cfg(test)]
mod tests {
    use crate::records::{OwnedRecord, RecordId};

    use super::*;

    #[test]
    fn parses_the_documented_interchange_row() {
        let drafts = parse_sessions(
            "date,distance_m,duration_min,stroke,rpe,notes\n2024-05-01,1500,25,Free,6,steady\n",
        )
        .expect("well-formed import");

        assert_eq!(drafts.len(), 1);
        let draft = &drafts[0];
        assert_eq!(draft.date.to_string(), "2024-05-01");
        assert_eq!(draft.distance_meters, 1500);
        assert_eq!(draft.duration_minutes, 25.0);
        assert_eq!(draft.stroke, Stroke::Free);
        assert_eq!(draft.perceived_effort, Some(6));
        assert_eq!(draft.notes.as_deref(), Some("steady"));
    }

    #[test]
    fn header_matching_is_case_insensitive_with_aliases() {
        let drafts = parse_sessions(
            "DATE,Distance,Duration,STROKE,rpe,notes\n2024-05-01,800,20,back,,\n",
        )
        .expect("aliased headers accepted");
        assert_eq!(drafts[0].distance_meters, 800);
        assert_eq!(drafts[0].stroke, Stroke::Back);
        assert_eq!(drafts[0].perceived_effort, None);
    }

    #[test]
    fn unknown_stroke_defaults_to_free_and_numbers_to_zero() {
        let drafts = parse_sessions(
            "date,distance_m,duration_min,stroke,rpe,notes\n2024-05-01,n/a,,sidestroke,junk,\n",
        )
        .expect("lenient row accepted");
        assert_eq!(drafts[0].stroke, Stroke::Free);
        assert_eq!(drafts[0].distance_meters, 0);
        assert_eq!(drafts[0].duration_minutes, 0.0);
    }

    #[test]
    fn header_only_text_is_rejected_whole() {
        let err = parse_sessions("date,distance_m,duration_min,stroke,rpe,notes\n")
            .expect_err("no data rows");
        assert_eq!(err.to_string(), "validation error: no rows found");
    }

    #[test]
    fn bad_date_is_reported_with_its_line() {
        let err = parse_sessions(
            "date,distance_m,duration_min,stroke,rpe,notes\n05/01/2024,1500,25,Free,6,\n",
        )
        .expect_err("bad date rejected");
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn export_round_trips_and_flattens_note_commas() {
        let session = Session::from_draft(
            "swimmer-1",
            RecordId::confirmed("srv-1"),
            &SessionDraft {
                date: "2024-05-01".parse().expect("test date"),
                distance_meters: 1500,
                duration_minutes: 25.0,
                stroke: Stroke::Free,
                perceived_effort: Some(6),
                notes: Some("steady, felt strong".to_string()),
            },
        );

        let text = export_sessions(&[session]).expect("export succeeds");
        assert_eq!(
            text,
            "date,distance_m,duration_min,stroke,rpe,notes\n2024-05-01,1500,25,Free,6,steady  felt strong\n"
        );

        let drafts = parse_sessions(&text).expect("exported text re-imports");
        assert_eq!(drafts[0].distance_meters, 1500);
    }
}
