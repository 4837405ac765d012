//! In-memory fixture backend.
//!
//! Nine pre-built triangles, one per seed 1..=9, all completed. Every call
//! sleeps for a short fixed delay so callers exercise the same async
//! calling convention the live store imposes.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{StorageError, TriangleOption, TriangleRepository};
use crate::generate::{derive_params, generate};
use crate::model::{LanePosition, Triangle, TriangleKind, TriangleStatus};

const FIXTURE_SEEDS: [u32; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

const KINDS: [TriangleKind; 9] = [
    TriangleKind::Paid,
    TriangleKind::Reported,
    TriangleKind::Incurred,
    TriangleKind::Case,
    TriangleKind::Ibnr,
    TriangleKind::Ultimate,
    TriangleKind::Paid,
    TriangleKind::Reported,
    TriangleKind::Incurred,
];

const NAMES: [&str; 9] = [
    "Paid Q2 2024",
    "Reported Q2 2024",
    "Incurred Q2 2024",
    "Case Q3 2024",
    "IBNR Q3 2024",
    "Ultimate Q3 2024",
    "Paid Q4 2024",
    "Reported Q4 2024",
    "Incurred Q4 2024",
];

const VALUATIONS: [&str; 3] = ["val-2024-q2", "val-2024-q3", "val-2024-q4"];

const DEV_FACTOR_LABELS: [&str; 4] = ["12_24", "24_36", "36_48", "48_60"];
const DEV_FACTOR_BASE: [f64; 4] = [1.45, 1.18, 1.08, 1.03];

pub struct FixtureTriangleStore {
    triangles: Vec<Triangle>,
    delay: Duration,
}

impl FixtureTriangleStore {
    pub fn new() -> Self {
        Self::with_delay_ms(10)
    }

    pub fn with_delay_ms(delay_ms: u64) -> Self {
        let mut triangles: Vec<Triangle> =
            FIXTURE_SEEDS.iter().enumerate().map(|(i, &seed)| build_triangle(i, seed)).collect();
        // Stored newest-first so find_all is a straight clone.
        triangles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self { triangles, delay: Duration::from_millis(delay_ms) }
    }

    async fn settle(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for FixtureTriangleStore {
    fn default() -> Self {
        Self::new()
    }
}

fn build_triangle(index: usize, seed: u32) -> Triangle {
    let (multiplier, _) = derive_params(seed);
    let gentle = 0.95 + multiplier * 0.1;
    let development_factors: BTreeMap<String, f64> = DEV_FACTOR_LABELS
        .iter()
        .zip(DEV_FACTOR_BASE.iter())
        .map(|(&label, &base)| (label.to_string(), base * gentle))
        .collect();

    // Deterministic creation instants one day apart; later index, later record.
    let created_at =
        DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(19_900 + index as i64);

    Triangle {
        id: format!("tri-{:03}", index + 1),
        valuation_id: VALUATIONS[index / 3].to_string(),
        name: NAMES[index].to_string(),
        kind: KINDS[index],
        position: match index % 3 {
            0 => LanePosition::Left,
            1 => LanePosition::Center,
            _ => LanePosition::Right,
        },
        status: TriangleStatus::Completed,
        chart_data: Some(generate(seed)),
        development_factors,
        ultimate_values: None,
        created_at,
        updated_at: created_at,
    }
}

#[async_trait]
impl TriangleRepository for FixtureTriangleStore {
    async fn find_all(&self) -> Result<Vec<Triangle>, StorageError> {
        self.settle().await;
        Ok(self.triangles.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Triangle>, StorageError> {
        self.settle().await;
        Ok(self.triangles.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Triangle>, StorageError> {
        self.settle().await;
        Ok(self.triangles.iter().find(|t| t.name == name).cloned())
    }

    async fn find_by_valuation_id(
        &self,
        valuation_id: &str,
    ) -> Result<Vec<Triangle>, StorageError> {
        self.settle().await;
        let mut hits: Vec<Triangle> =
            self.triangles.iter().filter(|t| t.valuation_id == valuation_id).cloned().collect();
        hits.sort_by_key(|t| t.position);
        Ok(hits)
    }

    async fn find_all_completed(&self) -> Result<Vec<TriangleOption>, StorageError> {
        self.settle().await;
        Ok(self
            .triangles
            .iter()
            .filter(|t| t.status == TriangleStatus::Completed)
            .map(|t| TriangleOption { value: t.name.clone(), label: t.name.clone() })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FixtureTriangleStore {
        // No artificial latency in unit tests.
        FixtureTriangleStore::with_delay_ms(0)
    }

    #[tokio::test]
    async fn nine_completed_options() {
        let repo = store();
        let options = repo.find_all_completed().await.unwrap();
        assert_eq!(options.len(), 9);
        for opt in &options {
            assert_eq!(opt.value, opt.label);
        }
    }

    #[tokio::test]
    async fn find_all_is_newest_first() {
        let repo = store();
        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0].id, "tri-009");
        for pair in all.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn name_round_trip() {
        let repo = store();
        for t in repo.find_all().await.unwrap() {
            let hit = repo.find_by_name(&t.name).await.unwrap();
            assert_eq!(hit, Some(t));
        }
        assert_eq!(repo.find_by_name("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn valuation_listing_ordered_by_lane() {
        let repo = store();
        let run = repo.find_by_valuation_id("val-2024-q3").await.unwrap();
        assert_eq!(run.len(), 3);
        assert_eq!(
            run.iter().map(|t| t.position).collect::<Vec<_>>(),
            vec![LanePosition::Left, LanePosition::Center, LanePosition::Right]
        );
    }

    #[tokio::test]
    async fn fixtures_carry_chart_data_and_factors() {
        let repo = store();
        for t in repo.find_all().await.unwrap() {
            assert!(t.chart_data.is_some(), "{} missing chart data", t.id);
            assert_eq!(t.development_factors.len(), 4);
            for factor in t.development_factors.values() {
                assert!(*factor > 1.0);
            }
            assert!(t.ultimate_values.is_none());
        }
    }

    #[test]
    fn construction_is_deterministic() {
        let a = FixtureTriangleStore::with_delay_ms(0);
        let b = FixtureTriangleStore::with_delay_ms(0);
        assert_eq!(a.triangles, b.triangles);
    }
}
