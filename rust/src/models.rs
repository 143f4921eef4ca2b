//! Core data types supplied by the contract management layer.

use pyo3::prelude::*;
use thiserror::Error;

/// Errors raised when constructing a contract period.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Start month must be between 1 and 12, got {0}")]
    InvalidStartMonth(u32),
}

/// One month of a service: planned and actually executed amounts.
///
/// Payments are not recorded here; they are issued per period for the whole
/// contract (see `MonthlyPayment`).
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Measurement {
    /// Month label, e.g. "Jan/2024"
    #[pyo3(get, set)]
    pub month: String,
    #[pyo3(get, set)]
    pub planned: f64,
    #[pyo3(get, set)]
    pub actual: f64,
}

impl Measurement {
    pub fn new(month: impl Into<String>, planned: f64, actual: f64) -> Self {
        Self {
            month: month.into(),
            planned,
            actual,
        }
    }
}

#[pymethods]
impl Measurement {
    #[new]
    #[pyo3(signature = (month, planned=0.0, actual=0.0))]
    fn py_new(month: String, planned: f64, actual: f64) -> Self {
        Self::new(month, planned, actual)
    }

    fn __repr__(&self) -> String {
        format!(
            "Measurement(month={:?}, planned={}, actual={})",
            self.month, self.planned, self.actual
        )
    }
}

/// A contracted service (one line item of work).
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Service {
    #[pyo3(get, set)]
    pub id: String,
    /// Ordering label, e.g. "1.2.3"
    #[pyo3(get, set)]
    pub item: String,
    /// Description of the work
    #[pyo3(get, set)]
    pub name: String,
    /// One entry per contract month, in calendar order
    #[pyo3(get, set)]
    pub measurements: Vec<Measurement>,
    /// Contracted value: the sum of all planned amounts
    #[pyo3(get, set)]
    pub total_value: f64,
}

impl Service {
    /// Build a service, computing its contracted value from the measurements.
    pub fn new(
        id: impl Into<String>,
        item: impl Into<String>,
        name: impl Into<String>,
        measurements: Vec<Measurement>,
    ) -> Self {
        let total_value = measurements.iter().map(|m| m.planned).sum();
        Self {
            id: id.into(),
            item: item.into(),
            name: name.into(),
            measurements,
            total_value,
        }
    }
}

#[pymethods]
impl Service {
    #[new]
    #[pyo3(signature = (id, item, name, measurements))]
    fn py_new(id: String, item: String, name: String, measurements: Vec<Measurement>) -> Self {
        Self::new(id, item, name, measurements)
    }

    fn __repr__(&self) -> String {
        format!(
            "Service(id={:?}, item={:?}, months={}, total_value={})",
            self.id,
            self.item,
            self.measurements.len(),
            self.total_value
        )
    }
}

/// Amount paid for the whole contract in one month.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonthlyPayment {
    /// 1-based month order within the contract
    #[pyo3(get, set)]
    pub order: u32,
    #[pyo3(get, set)]
    pub amount: f64,
}

impl MonthlyPayment {
    pub fn new(order: u32, amount: f64) -> Self {
        Self { order, amount }
    }
}

#[pymethods]
impl MonthlyPayment {
    #[new]
    fn py_new(order: u32, amount: f64) -> Self {
        Self::new(order, amount)
    }

    fn __repr__(&self) -> String {
        format!("MonthlyPayment(order={}, amount={})", self.order, self.amount)
    }
}

/// Calendar span of a contract.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractPeriod {
    /// First month, 1-12
    #[pyo3(get)]
    pub start_month: u32,
    #[pyo3(get)]
    pub start_year: i32,
    /// Number of contract months
    #[pyo3(get)]
    pub months: usize,
}

impl ContractPeriod {
    pub fn try_new(start_month: u32, start_year: i32, months: usize) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&start_month) {
            return Err(PeriodError::InvalidStartMonth(start_month));
        }
        Ok(Self {
            start_month,
            start_year,
            months,
        })
    }
}

#[pymethods]
impl ContractPeriod {
    #[new]
    fn py_new(start_month: u32, start_year: i32, months: usize) -> PyResult<Self> {
        Self::try_new(start_month, start_year, months)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "ContractPeriod(start={:02}/{}, months={})",
            self.start_month, self.start_year, self.months
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_total_value_is_sum_of_planned() {
        let service = Service::new(
            "s1",
            "1.1",
            "Fundação",
            vec![
                Measurement::new("Jan/2024", 100.0, 80.0),
                Measurement::new("Fev/2024", 250.5, 0.0),
                Measurement::new("Mar/2024", 0.0, 0.0),
            ],
        );
        assert!((service.total_value - 350.5).abs() < 1e-9);
    }

    #[test]
    fn test_service_without_measurements() {
        let service = Service::new("s1", "1", "Vazio", vec![]);
        assert_eq!(service.total_value, 0.0);
    }

    #[test]
    fn test_period_validation() {
        assert!(ContractPeriod::try_new(1, 2024, 12).is_ok());
        assert!(ContractPeriod::try_new(12, 2024, 1).is_ok());
        assert_eq!(
            ContractPeriod::try_new(0, 2024, 12),
            Err(PeriodError::InvalidStartMonth(0))
        );
        assert_eq!(
            ContractPeriod::try_new(13, 2024, 12),
            Err(PeriodError::InvalidStartMonth(13))
        );
    }
}
