//! Personal-best derivation and remote reconciliation.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::errors::{Error, Result};
use crate::identity::IdentityProvider;
use crate::records::{PersonalBestStore, RecordRepository};
use crate::results::SwimResult;
use crate::stroke::Stroke;

use super::model::PersonalBest;

/// Cadence for reconciling the locally derived view against the store's
/// precomputed one.
pub const REMOTE_RECONCILE_INTERVAL_SECS: u64 = 300;

/// One best per (stroke, distance): minimum time, ties broken by earliest
/// date. Output is ordered by stroke then distance for determinism.
pub fn derive_personal_bests(results: &[SwimResult]) -> Vec<PersonalBest> {
    let mut best_by_key: HashMap<(Stroke, i64), &SwimResult> = HashMap::new();
    for result in results {
        let key = (result.stroke, result.distance_meters);
        match best_by_key.get(&key) {
            Some(current) if !beats(result, current) => {}
            _ => {
                best_by_key.insert(key, result);
            }
        }
    }

    let mut bests: Vec<PersonalBest> = best_by_key
        .into_values()
        .map(PersonalBest::from)
        .collect();
    bests.sort_by(|a, b| {
        a.stroke
            .cmp(&b.stroke)
            .then(a.distance_meters.cmp(&b.distance_meters))
    });
    bests
}

fn beats(candidate: &SwimResult, current: &SwimResult) -> bool {
    match candidate.time_seconds.total_cmp(&current.time_seconds) {
        Ordering::Less => true,
        Ordering::Equal => candidate.date < current.date,
        Ordering::Greater => false,
    }
}

impl From<&SwimResult> for PersonalBest {
    fn from(result: &SwimResult) -> Self {
        Self {
            owner: result.owner.clone(),
            stroke: result.stroke,
            distance_meters: result.distance_meters,
            time_seconds: result.time_seconds,
            date: result.date,
            meet: result.meet.clone(),
        }
    }
}

/// Keeps the personal-best view consistent with the result collection.
///
/// The view is derived locally from the in-memory results, so it is correct
/// immediately after every successful result mutation; the store's
/// precomputed view is only consulted on the reconciliation cadence. This
/// removes any dependency on the remote view's recomputation latency.
pub struct PersonalBestTracker {
    results: Arc<RecordRepository<SwimResult>>,
    store: Arc<dyn PersonalBestStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl PersonalBestTracker {
    pub fn new(
        results: Arc<RecordRepository<SwimResult>>,
        store: Arc<dyn PersonalBestStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            results,
            store,
            identity,
        }
    }

    /// Derived from the live in-memory result collection.
    pub fn current(&self) -> Vec<PersonalBest> {
        derive_personal_bests(&self.results.list())
    }

    /// Authoritative re-fetch of the store's precomputed view.
    pub async fn refresh_remote(&self) -> Result<Vec<PersonalBest>> {
        let owner = self.identity.current_owner().ok_or(Error::SignedOut)?;
        let bests = self.store.list_personal_bests(&owner).await?;
        debug!("fetched {} personal bests from remote view", bests.len());
        Ok(bests)
    }
}

#[cfg(test)]
mod tests {
    use crate::records::{OwnedRecord, RecordId};
    use crate::results::ResultDraft;

    use super::*;

    fn result(stroke: Stroke, distance: i64, time: f64, date: &str) -> SwimResult {
        SwimResult::from_draft(
            "swimmer-1",
            RecordId::confirmed(format!("{stroke}-{distance}-{date}")),
            &ResultDraft {
                date: date.parse().expect("test date"),
                meet: "Test Meet".to_string(),
                distance_meters: distance,
                stroke,
                time_seconds: time,
                location: None,
                notes: None,
            },
        )
    }

    #[test]
    fn minimum_time_wins_per_key() {
        let results = vec![
            result(Stroke::Free, 50, 28.10, "2024-01-01"),
            result(Stroke::Free, 50, 27.95, "2024-02-01"),
            result(Stroke::Free, 100, 61.20, "2024-01-15"),
        ];

        let bests = derive_personal_bests(&results);
        assert_eq!(bests.len(), 2);
        assert_eq!(bests[0].distance_meters, 50);
        assert_eq!(bests[0].time_seconds, 27.95);
        assert_eq!(bests[0].date.to_string(), "2024-02-01");
        assert_eq!(bests[1].distance_meters, 100);
    }

    #[test]
    fn exact_ties_prefer_earliest_date() {
        let results = vec![
            result(Stroke::Fly, 100, 59.80, "2024-03-01"),
            result(Stroke::Fly, 100, 59.80, "2024-01-01"),
        ];

        let bests = derive_personal_bests(&results);
        assert_eq!(bests.len(), 1);
        assert_eq!(bests[0].date.to_string(), "2024-01-01");
    }

    #[test]
    fn output_is_ordered_by_stroke_then_distance() {
        let results = vec![
            result(Stroke::Im, 200, 150.0, "2024-01-01"),
            result(Stroke::Free, 100, 61.0, "2024-01-01"),
            result(Stroke::Free, 50, 28.0, "2024-01-01"),
            result(Stroke::Back, 50, 32.0, "2024-01-01"),
        ];

        let keys: Vec<(Stroke, i64)> = derive_personal_bests(&results)
            .iter()
            .map(|best| (best.stroke, best.distance_meters))
            .collect();
        assert_eq!(
            keys,
            vec![
                (Stroke::Free, 50),
                (Stroke::Free, 100),
                (Stroke::Back, 50),
                (Stroke::Im, 200),
            ]
        );
    }

    #[test]
    fn empty_results_derive_empty_view() {
        assert!(derive_personal_bests(&[]).is_empty());
    }

    mod tracker {
        use async_trait::async_trait;

        use crate::identity::StaticIdentity;
        use crate::records::RecordStore;

        use super::*;

        struct ResultStore;

        #[async_trait]
        impl RecordStore<SwimResult> for ResultStore {
            async fn list_by_owner(
                &self,
                _owner: &str,
                _limit: Option<u32>,
            ) -> crate::Result<Vec<SwimResult>> {
                Ok(Vec::new())
            }

            async fn insert(
                &self,
                owner: &str,
                draft: &ResultDraft,
            ) -> crate::Result<SwimResult> {
                Ok(SwimResult::from_draft(
                    owner,
                    RecordId::confirmed(format!("srv-{}", draft.time_seconds)),
                    draft,
                ))
            }

            async fn insert_many(
                &self,
                _owner: &str,
                drafts: &[ResultDraft],
            ) -> crate::Result<usize> {
                Ok(drafts.len())
            }

            async fn update(&self, _id: &str, _draft: &ResultDraft) -> crate::Result<()> {
                Ok(())
            }

            async fn delete(&self, _id: &str) -> crate::Result<()> {
                Ok(())
            }
        }

        #[async_trait]
        impl PersonalBestStore for ResultStore {
            async fn list_personal_bests(
                &self,
                owner: &str,
            ) -> crate::Result<Vec<PersonalBest>> {
                Ok(vec![PersonalBest {
                    owner: owner.to_string(),
                    stroke: Stroke::Free,
                    distance_meters: 50,
                    time_seconds: 27.95,
                    date: "2024-02-01".parse().expect("test date"),
                    meet: "Winter Invitational".to_string(),
                }])
            }
        }

        fn result_draft(time: f64, date: &str) -> ResultDraft {
            ResultDraft {
                date: date.parse().expect("test date"),
                meet: "Winter Invitational".to_string(),
                distance_meters: 50,
                stroke: Stroke::Free,
                time_seconds: time,
                location: None,
                notes: None,
            }
        }

        #[tokio::test]
        async fn view_is_consistent_immediately_after_result_mutations() {
            let store = Arc::new(ResultStore);
            let identity = Arc::new(StaticIdentity::signed_in("swimmer-1"));
            let results = Arc::new(crate::records::RecordRepository::new(
                Arc::clone(&store) as Arc<dyn RecordStore<SwimResult>>,
                identity.clone() as Arc<dyn crate::identity::IdentityProvider>,
            ));
            let tracker = PersonalBestTracker::new(
                Arc::clone(&results),
                Arc::clone(&store) as Arc<dyn PersonalBestStore>,
                identity,
            );

            assert!(tracker.current().is_empty());

            results
                .create(result_draft(28.10, "2024-01-01"))
                .await
                .expect("first result");
            assert_eq!(tracker.current()[0].time_seconds, 28.10);

            results
                .create(result_draft(27.95, "2024-02-01"))
                .await
                .expect("faster result");
            let bests = tracker.current();
            assert_eq!(bests.len(), 1);
            assert_eq!(bests[0].time_seconds, 27.95);
            assert_eq!(bests[0].date.to_string(), "2024-02-01");
        }

        #[tokio::test]
        async fn remote_reconciliation_reads_the_precomputed_view() {
            let store = Arc::new(ResultStore);
            let identity = Arc::new(StaticIdentity::signed_in("swimmer-1"));
            let results = Arc::new(crate::records::RecordRepository::new(
                Arc::clone(&store) as Arc<dyn RecordStore<SwimResult>>,
                identity.clone() as Arc<dyn crate::identity::IdentityProvider>,
            ));
            let tracker = PersonalBestTracker::new(
                results,
                Arc::clone(&store) as Arc<dyn PersonalBestStore>,
                identity,
            );

            let bests = tracker.refresh_remote().await.expect("view fetch");
            assert_eq!(bests.len(), 1);
            assert_eq!(bests[0].meet, "Winter Invitational");
        }

        #[tokio::test]
        async fn signed_out_reconciliation_is_rejected() {
            let store = Arc::new(ResultStore);
            let signed_out = Arc::new(StaticIdentity::signed_out());
            let results = Arc::new(crate::records::RecordRepository::new(
                Arc::clone(&store) as Arc<dyn RecordStore<SwimResult>>,
                signed_out.clone() as Arc<dyn crate::identity::IdentityProvider>,
            ));
            let tracker = PersonalBestTracker::new(
                results,
                store as Arc<dyn PersonalBestStore>,
                signed_out,
            );

            let err = tracker.refresh_remote().await.expect_err("needs sign-in");
            assert!(matches!(err, Error::SignedOut));
        }
    }
}
