//! Display cutoff: hide actual/paid data for months that have not happened.
//!
//! The cutoff is the later of the current contract month and the last month
//! with actual work recorded, so backfilled or pre-entered actuals still show.
//! The planned series is never cut.

use chrono::NaiveDate;
use pyo3::prelude::*;

use crate::models::ContractPeriod;
use crate::months::months_since_start;

use super::accumulation::CurvePoint;

/// A curve point ready for plotting; `None` means "draw nothing here".
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartPoint {
    #[pyo3(get)]
    pub month: String,
    #[pyo3(get)]
    pub planned: f64,
    #[pyo3(get)]
    pub planned_cumulative: f64,
    #[pyo3(get)]
    pub actual: Option<f64>,
    #[pyo3(get)]
    pub paid: Option<f64>,
    #[pyo3(get)]
    pub actual_cumulative: Option<f64>,
    #[pyo3(get)]
    pub paid_cumulative: Option<f64>,
    /// Month lies after the display cutoff.
    #[pyo3(get)]
    pub after_cutoff: bool,
}

#[pymethods]
impl ChartPoint {
    fn __repr__(&self) -> String {
        format!(
            "ChartPoint(month={:?}, planned_cumulative={}, actual_cumulative={:?}, after_cutoff={})",
            self.month, self.planned_cumulative, self.actual_cumulative, self.after_cutoff
        )
    }
}

/// 1-based number of the last month whose actual/paid data is displayed.
///
/// The current contract month is clamped to `[1, months]`; the last month with
/// a positive actual amount can push the cutoff further. Returns 0 only for a
/// contract without months.
pub fn display_cutoff(points: &[CurvePoint], period: &ContractPeriod, today: NaiveDate) -> usize {
    let n = points.len();
    if n == 0 {
        return 0;
    }

    let current = months_since_start(period, today).clamp(1, n as i64) as usize;
    let last_with_actual = points
        .iter()
        .rposition(|p| p.actual > 0.0)
        .map_or(0, |idx| idx + 1);

    current.max(last_with_actual)
}

/// Chart-ready series: months after `cutoff` (1-based) lose their actual and
/// paid values, per-period and cumulative. Months up to the cutoff are copied
/// unchanged.
pub fn chart_points(points: &[CurvePoint], cutoff: usize) -> Vec<ChartPoint> {
    points
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let shown = idx < cutoff;
            let keep = |v: f64| shown.then_some(v);
            ChartPoint {
                month: p.month.clone(),
                planned: p.planned,
                planned_cumulative: p.planned_cumulative,
                actual: keep(p.actual),
                paid: keep(p.paid),
                actual_cumulative: keep(p.actual_cumulative),
                paid_cumulative: keep(p.paid_cumulative),
                after_cutoff: !shown,
            }
        })
        .collect()
}

/// Table/tooltip series: months after `cutoff` report zero actual and paid
/// for the period, and their cumulative values hold at the cutoff month.
pub fn held_points(points: &[CurvePoint], cutoff: usize) -> Vec<CurvePoint> {
    let held = cutoff
        .checked_sub(1)
        .and_then(|idx| points.get(idx))
        .map_or((0.0, 0.0), |p| (p.actual_cumulative, p.paid_cumulative));

    points
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            if idx < cutoff {
                p.clone()
            } else {
                CurvePoint {
                    actual: 0.0,
                    paid: 0.0,
                    actual_cumulative: held.0,
                    paid_cumulative: held.1,
                    ..p.clone()
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_points(actual: &[f64]) -> Vec<CurvePoint> {
        let mut acc = (0.0, 0.0);
        actual
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                acc.0 += 100.0;
                acc.1 += a;
                CurvePoint {
                    month: format!("M{}", i + 1),
                    planned: 100.0,
                    actual: a,
                    paid: a / 2.0,
                    planned_cumulative: acc.0,
                    actual_cumulative: acc.1,
                    paid_cumulative: acc.1 / 2.0,
                }
            })
            .collect()
    }

    fn period(months: usize) -> ContractPeriod {
        ContractPeriod::try_new(1, 2024, months).unwrap()
    }

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_cutoff_follows_calendar() {
        let points = make_points(&[10.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(display_cutoff(&points, &period(6), make_date(2024, 3, 10)), 3);
    }

    #[test]
    fn test_cutoff_clamped_to_contract() {
        let points = make_points(&[0.0; 6]);
        assert_eq!(display_cutoff(&points, &period(6), make_date(2023, 6, 1)), 1);
        assert_eq!(display_cutoff(&points, &period(6), make_date(2030, 1, 1)), 6);
    }

    #[test]
    fn test_cutoff_extends_to_entered_actuals() {
        let points = make_points(&[10.0, 10.0, 0.0, 0.0, 5.0, 0.0]);
        assert_eq!(display_cutoff(&points, &period(6), make_date(2024, 2, 1)), 5);
    }

    #[test]
    fn test_cutoff_without_months() {
        assert_eq!(display_cutoff(&[], &period(0), make_date(2024, 2, 1)), 0);
    }

    #[test]
    fn test_chart_points_suppress_after_cutoff() {
        let points = make_points(&[10.0, 20.0, 30.0, 0.0]);
        let chart = chart_points(&points, 2);

        for (idx, (c, p)) in chart.iter().zip(&points).enumerate() {
            assert_eq!(c.planned, p.planned);
            assert_eq!(c.planned_cumulative, p.planned_cumulative);
            if idx < 2 {
                assert!(!c.after_cutoff);
                assert_eq!(c.actual, Some(p.actual));
                assert_eq!(c.paid, Some(p.paid));
                assert_eq!(c.actual_cumulative, Some(p.actual_cumulative));
                assert_eq!(c.paid_cumulative, Some(p.paid_cumulative));
            } else {
                assert!(c.after_cutoff);
                assert_eq!(c.actual, None);
                assert_eq!(c.paid, None);
                assert_eq!(c.actual_cumulative, None);
                assert_eq!(c.paid_cumulative, None);
            }
        }
    }

    #[test]
    fn test_held_points_flatten_after_cutoff() {
        let points = make_points(&[10.0, 20.0, 30.0, 40.0]);
        let held = held_points(&points, 2);

        assert_eq!(held[1], points[1]);
        assert_eq!(held[2].actual, 0.0);
        assert_eq!(held[2].paid, 0.0);
        assert_eq!(held[2].actual_cumulative, 30.0);
        assert_eq!(held[3].actual_cumulative, 30.0);
        assert_eq!(held[3].paid_cumulative, 15.0);
        assert_eq!(held[3].planned_cumulative, 400.0);
    }

    #[test]
    fn test_held_points_with_zero_cutoff() {
        let points = make_points(&[10.0]);
        let held = held_points(&points, 0);
        assert_eq!(held[0].actual_cumulative, 0.0);
    }
}
