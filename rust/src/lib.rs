//! Rust implementation of the contract progress engines.
//!
//! Two independent, pure computations over a contract's services:
//! critical path scheduling of the services' planned spans, and the S-curve
//! of cumulative planned/actual/paid value with its display cutoff.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::collections::HashMap;

pub mod critical_path;
mod config;
pub mod curve;
mod interner;
pub mod logging;
mod models;
pub mod months;
pub mod progress;
pub mod sorting;

pub use config::{ConfigError, CurveConfig, CyclePolicy, ScheduleConfig, ViewMode};
pub use critical_path::{
    calculate_critical_path, derive_activities, derive_activity, schedule, Activity,
    CriticalPathError, CriticalPathResult, DependencyMap, ScheduleError, ScheduledActivity,
    TimelineCell,
};
pub use curve::{
    build_s_curve, contract_totals, display_cutoff, project_curve, ChartPoint, ContractTotals,
    CurvePoint, CurveProjection,
};
pub use models::{ContractPeriod, Measurement, MonthlyPayment, PeriodError, Service};
pub use progress::{service_progress, ServiceProgress};
pub use sorting::{compare_items, sort_by_item, ItemLabel};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Compute early/late dates, slack and the critical flag for each activity.
///
/// # Raises
/// * ValueError if the cycle policy is unknown, or is "reject" and the
///   predecessor graph has a cycle
#[pyfunction]
#[pyo3(signature = (activities, config=None))]
fn compute_critical_path(
    activities: Vec<Activity>,
    config: Option<ScheduleConfig>,
) -> PyResult<CriticalPathResult> {
    let config = config.unwrap_or_default();
    schedule(&activities, &config).map_err(value_error)
}

/// Derive scheduler activities from services and their declared predecessors.
#[pyfunction]
#[pyo3(name = "derive_activities", signature = (services, dependencies=HashMap::new()))]
fn py_derive_activities(
    services: Vec<Service>,
    dependencies: HashMap<String, Vec<String>>,
) -> Vec<Activity> {
    let dependencies: DependencyMap = dependencies.into_iter().collect();
    derive_activities(&services, &dependencies)
}

/// Derive activities from services and run the critical path calculation.
///
/// # Raises
/// * ValueError under the same conditions as `compute_critical_path`
#[pyfunction]
#[pyo3(signature = (services, dependencies=HashMap::new(), config=None))]
fn schedule_services(
    services: Vec<Service>,
    dependencies: HashMap<String, Vec<String>>,
    config: Option<ScheduleConfig>,
) -> PyResult<CriticalPathResult> {
    let activities = py_derive_activities(services, dependencies);
    compute_critical_path(activities, config)
}

/// Monthly and cumulative planned/actual/paid series, without any cutoff.
#[pyfunction]
#[pyo3(name = "build_s_curve", signature = (services, period, payments=Vec::new()))]
fn py_build_s_curve(
    services: Vec<Service>,
    period: ContractPeriod,
    payments: Vec<MonthlyPayment>,
) -> Vec<CurvePoint> {
    build_s_curve(&services, &payments, &period)
}

/// Build the S-curve and apply the display cutoff and view mode.
///
/// `today` defaults to the local date.
///
/// # Raises
/// * ValueError if the view mode is unknown
#[pyfunction]
#[pyo3(signature = (services, period, payments=Vec::new(), today=None, config=None))]
fn project_s_curve(
    services: Vec<Service>,
    period: ContractPeriod,
    payments: Vec<MonthlyPayment>,
    today: Option<NaiveDate>,
    config: Option<CurveConfig>,
) -> PyResult<CurveProjection> {
    let config = config.unwrap_or_default();
    project_curve(
        &services,
        &payments,
        &period,
        today.unwrap_or_else(self::today),
        &config,
    )
    .map_err(value_error)
}

/// 1-based last month whose actual/paid data should be displayed.
#[pyfunction]
#[pyo3(name = "display_cutoff", signature = (services, period, today=None))]
fn py_display_cutoff(
    services: Vec<Service>,
    period: ContractPeriod,
    today: Option<NaiveDate>,
) -> usize {
    let points = build_s_curve(&services, &[], &period);
    display_cutoff(&points, &period, today.unwrap_or_else(self::today))
}

/// Contract-wide planned/actual/paid totals.
#[pyfunction]
#[pyo3(name = "contract_totals", signature = (services, payments=Vec::new()))]
fn py_contract_totals(services: Vec<Service>, payments: Vec<MonthlyPayment>) -> ContractTotals {
    contract_totals(&services, &payments)
}

/// Progress of one service against a 1-based reference measurement.
#[pyfunction]
#[pyo3(name = "service_progress", signature = (service, reference_month=1))]
fn py_service_progress(service: Service, reference_month: usize) -> ServiceProgress {
    service_progress(&service, reference_month)
}

/// "Mmm/YYYY" labels for `count` months starting at the given month.
///
/// # Raises
/// * ValueError if `start_month` is not in 1..=12
#[pyfunction]
#[pyo3(name = "month_labels")]
fn py_month_labels(start_month: u32, start_year: i32, count: usize) -> PyResult<Vec<String>> {
    let period = ContractPeriod::try_new(start_month, start_year, count).map_err(value_error)?;
    Ok(months::month_labels(&period))
}

/// Item labels in natural order.
#[pyfunction]
fn sort_items(mut items: Vec<String>) -> Vec<String> {
    sort_by_item(&mut items);
    items
}

/// Scheduled activities in natural item order (presentation only).
#[pyfunction]
fn sort_activities(mut activities: Vec<ScheduledActivity>) -> Vec<ScheduledActivity> {
    sort_by_item(&mut activities);
    activities
}

/// The medicao.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Measurement>()?;
    m.add_class::<Service>()?;
    m.add_class::<MonthlyPayment>()?;
    m.add_class::<ContractPeriod>()?;

    // Config types
    m.add_class::<ScheduleConfig>()?;
    m.add_class::<CurveConfig>()?;

    // Result types
    m.add_class::<Activity>()?;
    m.add_class::<ScheduledActivity>()?;
    m.add_class::<CriticalPathResult>()?;
    m.add_class::<CurvePoint>()?;
    m.add_class::<ChartPoint>()?;
    m.add_class::<CurveProjection>()?;
    m.add_class::<ContractTotals>()?;
    m.add_class::<ServiceProgress>()?;

    // Critical path
    m.add_function(wrap_pyfunction!(compute_critical_path, m)?)?;
    m.add_function(wrap_pyfunction!(py_derive_activities, m)?)?;
    m.add_function(wrap_pyfunction!(schedule_services, m)?)?;

    // S-curve
    m.add_function(wrap_pyfunction!(py_build_s_curve, m)?)?;
    m.add_function(wrap_pyfunction!(project_s_curve, m)?)?;
    m.add_function(wrap_pyfunction!(py_display_cutoff, m)?)?;
    m.add_function(wrap_pyfunction!(py_contract_totals, m)?)?;

    // Presentation helpers
    m.add_function(wrap_pyfunction!(py_service_progress, m)?)?;
    m.add_function(wrap_pyfunction!(py_month_labels, m)?)?;
    m.add_function(wrap_pyfunction!(sort_items, m)?)?;
    m.add_function(wrap_pyfunction!(sort_activities, m)?)?;

    Ok(())
}
