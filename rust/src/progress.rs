//! Per-service progress against a reference measurement (Gantt view).

use pyo3::prelude::*;

use crate::curve::percent_of;
use crate::models::Service;

/// Progress of one service; month indices are 0-based.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceProgress {
    #[pyo3(get)]
    pub id: String,
    #[pyo3(get)]
    pub item: String,
    #[pyo3(get)]
    pub first_planned_month: Option<usize>,
    #[pyo3(get)]
    pub last_planned_month: Option<usize>,
    #[pyo3(get)]
    pub first_actual_month: Option<usize>,
    #[pyo3(get)]
    pub last_actual_month: Option<usize>,
    #[pyo3(get)]
    pub total_planned: f64,
    #[pyo3(get)]
    pub total_actual: f64,
    /// Planned total as a percentage of the contracted value
    #[pyo3(get)]
    pub planned_percent: f64,
    /// Actual total as a percentage of the contracted value
    #[pyo3(get)]
    pub actual_percent: f64,
    /// Planned amount for the months before the reference measurement
    #[pyo3(get)]
    pub planned_to_reference: f64,
    #[pyo3(get)]
    pub planned_to_reference_percent: f64,
}

impl ServiceProgress {
    /// Number of months from the first to the last planned month.
    pub fn planned_span(&self) -> usize {
        match (self.first_planned_month, self.last_planned_month) {
            (Some(first), Some(last)) => last - first + 1,
            _ => 0,
        }
    }
}

#[pymethods]
impl ServiceProgress {
    /// Whether executed work keeps up with the plan up to the reference.
    #[getter]
    pub fn on_track(&self) -> bool {
        self.actual_percent >= self.planned_to_reference_percent
    }

    /// Fill (0..=1) of the month's bar cell when the actual percentage is laid
    /// out from the first planned month across the planned span.
    pub fn actual_fill(&self, month: usize) -> f64 {
        let Some(first) = self.first_planned_month else {
            return 0.0;
        };
        if self.actual_percent <= 0.0 || month < first || month >= first + self.planned_span() {
            return 0.0;
        }
        let filled = self.planned_span() as f64 * self.actual_percent / 100.0;
        let position = (month - first) as f64;
        if position < filled.floor() {
            1.0
        } else if position < filled {
            filled - position
        } else {
            0.0
        }
    }

    /// Offset, in months from the first planned month, of the target marker
    /// (planned-to-reference laid out across the planned span).
    pub fn target_offset(&self) -> f64 {
        self.planned_span() as f64 * self.planned_to_reference_percent / 100.0
    }

    fn __repr__(&self) -> String {
        format!(
            "ServiceProgress(id={:?}, planned_percent={:.1}, actual_percent={:.1}, target_percent={:.1})",
            self.id, self.planned_percent, self.actual_percent, self.planned_to_reference_percent
        )
    }
}

/// Progress of `service` against the 1-based `reference_month`.
///
/// Months strictly before the reference count towards the target; a reference
/// of 0 therefore sets no target.
pub fn service_progress(service: &Service, reference_month: usize) -> ServiceProgress {
    let mut progress = ServiceProgress {
        id: service.id.clone(),
        item: service.item.clone(),
        ..Default::default()
    };

    for (idx, measurement) in service.measurements.iter().enumerate() {
        if measurement.planned > 0.0 {
            progress.first_planned_month.get_or_insert(idx);
            progress.last_planned_month = Some(idx);
            progress.total_planned += measurement.planned;
        }
        if measurement.actual > 0.0 {
            progress.first_actual_month.get_or_insert(idx);
            progress.last_actual_month = Some(idx);
            progress.total_actual += measurement.actual;
        }
        if idx < reference_month {
            progress.planned_to_reference += measurement.planned;
        }
    }

    let value = service.total_value;
    progress.planned_percent = percent_of(progress.total_planned, value);
    progress.actual_percent = percent_of(progress.total_actual, value);
    progress.planned_to_reference_percent = percent_of(progress.planned_to_reference, value);
    progress
}
