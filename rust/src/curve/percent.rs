//! Percentage view of the S-curve.
//!
//! Every monetary value is divided by the contract's final cumulative planned
//! total. A zero total yields zero percentages rather than NaN or infinity.

use super::accumulation::CurvePoint;
use super::cutoff::ChartPoint;

/// `value` as a percentage of `total`, or 0 when `total` is zero.
pub fn percent_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

/// Final cumulative planned value (0 for an empty curve).
pub fn planned_total(points: &[CurvePoint]) -> f64 {
    points.last().map_or(0.0, |p| p.planned_cumulative)
}

pub fn curve_to_percent(points: &[CurvePoint], total: f64) -> Vec<CurvePoint> {
    let pct = |v: f64| percent_of(v, total);
    points
        .iter()
        .map(|p| CurvePoint {
            month: p.month.clone(),
            planned: pct(p.planned),
            actual: pct(p.actual),
            paid: pct(p.paid),
            planned_cumulative: pct(p.planned_cumulative),
            actual_cumulative: pct(p.actual_cumulative),
            paid_cumulative: pct(p.paid_cumulative),
        })
        .collect()
}

/// Suppressed (`None`) values stay suppressed.
pub fn chart_to_percent(points: &[ChartPoint], total: f64) -> Vec<ChartPoint> {
    let pct = |v: f64| percent_of(v, total);
    points
        .iter()
        .map(|p| ChartPoint {
            month: p.month.clone(),
            planned: pct(p.planned),
            planned_cumulative: pct(p.planned_cumulative),
            actual: p.actual.map(pct),
            paid: p.paid.map(pct),
            actual_cumulative: p.actual_cumulative.map(pct),
            paid_cumulative: p.paid_cumulative.map(pct),
            after_cutoff: p.after_cutoff,
        })
        .collect()
}
