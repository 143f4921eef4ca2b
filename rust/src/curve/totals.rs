//! Contract-wide totals shown next to the S-curve.

use pyo3::prelude::*;

use crate::models::{MonthlyPayment, Service};

use super::percent::percent_of;

#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContractTotals {
    #[pyo3(get)]
    pub planned: f64,
    #[pyo3(get)]
    pub actual: f64,
    #[pyo3(get)]
    pub paid: f64,
    /// Sum of the services' contracted values
    #[pyo3(get)]
    pub contract_value: f64,
    /// Actual as a percentage of planned
    #[pyo3(get)]
    pub actual_percent: f64,
    /// Paid as a percentage of actual
    #[pyo3(get)]
    pub paid_percent: f64,
}

#[pymethods]
impl ContractTotals {
    fn __repr__(&self) -> String {
        format!(
            "ContractTotals(planned={}, actual={}, paid={}, actual_percent={:.2})",
            self.planned, self.actual, self.paid, self.actual_percent
        )
    }
}

/// Sum every measurement of every service and every contract payment.
///
/// Unlike the S-curve, totals are not bounded by the contract length.
pub fn contract_totals(services: &[Service], payments: &[MonthlyPayment]) -> ContractTotals {
    let mut totals = ContractTotals::default();

    for service in services {
        totals.contract_value += service.total_value;
        for measurement in &service.measurements {
            totals.planned += measurement.planned;
            totals.actual += measurement.actual;
        }
    }
    totals.paid = payments.iter().map(|p| p.amount).sum();

    totals.actual_percent = percent_of(totals.actual, totals.planned);
    totals.paid_percent = percent_of(totals.paid, totals.actual);
    totals
}
