//! Monthly and cumulative planned/actual/paid series.

use pyo3::prelude::*;

use crate::models::{ContractPeriod, MonthlyPayment, Service};
use crate::months::month_labels;

/// One contract month of the S-curve.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurvePoint {
    #[pyo3(get)]
    pub month: String,
    #[pyo3(get)]
    pub planned: f64,
    #[pyo3(get)]
    pub actual: f64,
    #[pyo3(get)]
    pub paid: f64,
    #[pyo3(get)]
    pub planned_cumulative: f64,
    #[pyo3(get)]
    pub actual_cumulative: f64,
    #[pyo3(get)]
    pub paid_cumulative: f64,
}

#[pymethods]
impl CurvePoint {
    fn __repr__(&self) -> String {
        format!(
            "CurvePoint(month={:?}, planned_cumulative={}, actual_cumulative={}, paid_cumulative={})",
            self.month, self.planned_cumulative, self.actual_cumulative, self.paid_cumulative
        )
    }
}

/// Aggregate all services into one point per contract month.
///
/// Planned and actual come from the services' measurements; measurements
/// beyond the contract length are ignored. Paid comes from the contract-level
/// payments, keyed by 1-based month order; payments outside the contract are
/// ignored and several payments for the same month add up.
pub fn build_s_curve(
    services: &[Service],
    payments: &[MonthlyPayment],
    period: &ContractPeriod,
) -> Vec<CurvePoint> {
    let n = period.months;
    let mut points: Vec<CurvePoint> = month_labels(period)
        .into_iter()
        .map(|month| CurvePoint {
            month,
            ..Default::default()
        })
        .collect();

    for service in services {
        for (point, measurement) in points.iter_mut().zip(&service.measurements) {
            point.planned += measurement.planned;
            point.actual += measurement.actual;
        }
    }

    for payment in payments {
        let Some(idx) = (payment.order as usize).checked_sub(1) else {
            continue;
        };
        if idx < n {
            points[idx].paid += payment.amount;
        }
    }

    let (mut planned, mut actual, mut paid) = (0.0, 0.0, 0.0);
    for point in &mut points {
        planned += point.planned;
        actual += point.actual;
        paid += point.paid;
        point.planned_cumulative = planned;
        point.actual_cumulative = actual;
        point.paid_cumulative = paid;
    }

    points
}
