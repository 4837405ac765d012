//! Core entities: loss-development triangles and the chart-ready data
//! bundles attached to them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriangleKind {
    Paid,
    Reported,
    Incurred,
    Case,
    Ibnr,
    Ultimate,
}

impl TriangleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriangleKind::Paid => "paid",
            TriangleKind::Reported => "reported",
            TriangleKind::Incurred => "incurred",
            TriangleKind::Case => "case",
            TriangleKind::Ibnr => "ibnr",
            TriangleKind::Ultimate => "ultimate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(TriangleKind::Paid),
            "reported" => Some(TriangleKind::Reported),
            "incurred" => Some(TriangleKind::Incurred),
            "case" => Some(TriangleKind::Case),
            "ibnr" => Some(TriangleKind::Ibnr),
            "ultimate" => Some(TriangleKind::Ultimate),
            _ => None,
        }
    }
}

/// Rendering-lane hint. Ordering (left < center < right) drives the
/// per-valuation listing order, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanePosition {
    Left,
    Center,
    Right,
}

impl LanePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanePosition::Left => "left",
            LanePosition::Center => "center",
            LanePosition::Right => "right",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(LanePosition::Left),
            "center" => Some(LanePosition::Center),
            "right" => Some(LanePosition::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriangleStatus {
    Completed,
    Add,
    PendingReview,
    InProgress,
    Error,
}

impl TriangleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriangleStatus::Completed => "completed",
            TriangleStatus::Add => "add",
            TriangleStatus::PendingReview => "pending_review",
            TriangleStatus::InProgress => "in_progress",
            TriangleStatus::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(TriangleStatus::Completed),
            "add" => Some(TriangleStatus::Add),
            "pending_review" => Some(TriangleStatus::PendingReview),
            "in_progress" => Some(TriangleStatus::InProgress),
            "error" => Some(TriangleStatus::Error),
            _ => None,
        }
    }
}

/// One cell of the development heatmap: cumulative value for an
/// experience period at a given development lag (months).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub period: String,
    pub lag: u32,
    pub value: f64,
}

/// Growth-curve point: development lag on x, cumulative percent developed on y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: u32,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountainPoint {
    pub period: String,
    pub value: f64,
}

/// Age-to-age link ratio between two adjacent development lags,
/// keyed by an interval label like "0_3".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeToAgePoint {
    pub interval: String,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessPoint {
    pub period: String,
    pub pct: f64,
}

/// Latest-diagonal view: premium volume and loss ratio per period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RightEdgePoint {
    pub period: String,
    pub premium: f64,
    pub ratio: f64,
}

/// The six chart-ready sub-series a triangle may carry. Fixed fields
/// rather than an open map so every known chart kind is covered at
/// compile time; each field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDataBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<Vec<HeatmapCell>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_curve: Option<Vec<CurvePoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mountain: Option<Vec<MountainPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_to_age: Option<Vec<AgeToAgePoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_completeness: Option<Vec<CompletenessPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_edge: Option<Vec<RightEdgePoint>>,
}

/// An actuarial loss-development dataset. Read-only from this crate's
/// perspective; records are produced by an upstream ingestion process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub id: String,
    pub valuation_id: String,
    pub name: String,
    pub kind: TriangleKind,
    pub position: LanePosition,
    pub status: TriangleStatus,
    pub chart_data: Option<ChartDataBundle>,
    /// Development-interval label ("12_24") to positive link factor.
    pub development_factors: BTreeMap<String, f64>,
    /// No current producer; always `None` in fixture data.
    pub ultimate_values: Option<BTreeMap<String, f64>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for s in [
            TriangleStatus::Completed,
            TriangleStatus::Add,
            TriangleStatus::PendingReview,
            TriangleStatus::InProgress,
            TriangleStatus::Error,
        ] {
            assert_eq!(TriangleStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(TriangleStatus::parse("bogus"), None);
    }

    #[test]
    fn lane_order_is_left_center_right() {
        assert!(LanePosition::Left < LanePosition::Center);
        assert!(LanePosition::Center < LanePosition::Right);
    }

    #[test]
    fn empty_bundle_serializes_to_empty_object() {
        let bundle = ChartDataBundle::default();
        let json = serde_json::to_string(&bundle).unwrap();
        assert_eq!(json, "{}");
    }
}
