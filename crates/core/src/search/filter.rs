//! Pure filter → paginate projection.

use crate::sessions::Session;

/// Default page size for the session list view.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Record types the text filter can inspect.
pub trait Searchable {
    /// Renderings of the searchable fields, matched case-insensitively.
    fn search_fields(&self) -> Vec<String>;
}

impl Searchable for Session {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.date.to_string(),
            self.distance_meters.to_string(),
            self.duration_minutes.to_string(),
            self.stroke.to_string(),
        ];
        if let Some(notes) = &self.notes {
            fields.push(notes.clone());
        }
        fields
    }
}

/// Filters by case-insensitive substring match (any field suffices; an
/// empty query keeps every record), then slices the requested page. An
/// out-of-range page yields an empty sequence, not an error. Input order is
/// preserved.
pub fn view<T: Searchable + Clone>(
    records: &[T],
    query: &str,
    page_index: usize,
    page_size: usize,
) -> Vec<T> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            needle.is_empty()
                || record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .skip(page_index.saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::records::{OwnedRecord, RecordId};
    use crate::sessions::SessionDraft;
    use crate::stroke::Stroke;

    use super::*;

    fn session(id: &str, date: &str, stroke: Stroke, notes: Option<&str>) -> Session {
        Session::from_draft(
            "swimmer-1",
            RecordId::confirmed(id),
            &SessionDraft {
                date: date.parse().expect("test date"),
                distance_meters: 1500,
                duration_minutes: 25.0,
                stroke,
                perceived_effort: None,
                notes: notes.map(str::to_string),
            },
        )
    }

    fn fixture() -> Vec<Session> {
        vec![
            session("a", "2024-05-03", Stroke::Fly, None),
            session("b", "2024-05-02", Stroke::Free, Some("felt strong")),
            session("c", "2024-05-01", Stroke::Free, Some("fly drills at the end")),
            session("d", "2024-04-30", Stroke::Back, None),
        ]
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let records = fixture();
        let page = view(&records, "FLY", 0, DEFAULT_PAGE_SIZE);
        // stroke match on "a", notes match on "c"; input order preserved
        let ids: Vec<&str> = page.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn empty_query_keeps_every_record() {
        let records = fixture();
        assert_eq!(view(&records, "", 0, DEFAULT_PAGE_SIZE).len(), records.len());
    }

    #[test]
    fn date_and_distance_renderings_are_searchable() {
        let records = fixture();
        assert_eq!(view(&records, "2024-04", 0, 50).len(), 1);
        assert_eq!(view(&records, "1500", 0, 50).len(), records.len());
    }

    #[test]
    fn pagination_slices_deterministically() {
        let records = fixture();
        let first = view(&records, "", 0, 3);
        let second = view(&records, "", 1, 3);
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id.as_str(), "d");
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let records = fixture();
        assert!(view(&records, "", 7, 50).is_empty());
    }
}
