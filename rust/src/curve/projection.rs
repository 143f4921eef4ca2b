//! Configured S-curve projection: accumulation, cutoff and unit conversion.

use chrono::NaiveDate;
use pyo3::prelude::*;

use crate::config::{ConfigError, CurveConfig, ViewMode};
use crate::models::{ContractPeriod, MonthlyPayment, Service};
use crate::{log_passes, log_summary};

use super::accumulation::{build_s_curve, CurvePoint};
use super::cutoff::{chart_points, display_cutoff, held_points, ChartPoint};
use super::percent::{chart_to_percent, curve_to_percent, planned_total};

/// Everything a view needs to draw the S-curve.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveProjection {
    /// Unfiltered series in the configured unit.
    #[pyo3(get)]
    pub points: Vec<CurvePoint>,
    /// Series with actual/paid held flat after the cutoff, in the configured unit.
    #[pyo3(get)]
    pub held: Vec<CurvePoint>,
    /// Plot series with actual/paid suppressed after the cutoff, in the configured unit.
    #[pyo3(get)]
    pub chart: Vec<ChartPoint>,
    /// 1-based last month with visible actual/paid data.
    #[pyo3(get)]
    pub cutoff: usize,
    /// Final cumulative planned value, in money.
    #[pyo3(get)]
    pub planned_total: f64,
}

#[pymethods]
impl CurveProjection {
    fn __repr__(&self) -> String {
        format!(
            "CurveProjection(months={}, cutoff={}, planned_total={})",
            self.points.len(),
            self.cutoff,
            self.planned_total
        )
    }
}

/// Build the S-curve and apply the display policy from `config`.
///
/// The cutoff is decided on monetary values before any unit conversion, so
/// a contract with no planned value still keeps its entered actuals visible.
/// With `apply_cutoff` disabled every month is shown.
///
/// # Errors
/// * `ConfigError::UnknownViewMode` if `config.view_mode` does not parse
pub fn project_curve(
    services: &[Service],
    payments: &[MonthlyPayment],
    period: &ContractPeriod,
    today: NaiveDate,
    config: &CurveConfig,
) -> Result<CurveProjection, ConfigError> {
    let mode = config.mode()?;
    let verbosity = config.verbosity;

    let points = build_s_curve(services, payments, period);
    let total = planned_total(&points);

    let cutoff = if config.apply_cutoff {
        display_cutoff(&points, period, today)
    } else {
        points.len()
    };
    log_passes!(
        verbosity,
        "S-curve cutoff at month {} of {} (today {})",
        cutoff,
        points.len(),
        today
    );

    let held = held_points(&points, cutoff);
    let chart = chart_points(&points, cutoff);

    let projection = match mode {
        ViewMode::Real => CurveProjection {
            points,
            held,
            chart,
            cutoff,
            planned_total: total,
        },
        ViewMode::Percent => CurveProjection {
            points: curve_to_percent(&points, total),
            held: curve_to_percent(&held, total),
            chart: chart_to_percent(&chart, total),
            cutoff,
            planned_total: total,
        },
    };

    log_summary!(
        verbosity,
        "S-curve: {} services, {} months, planned total {:.2}, mode {:?}",
        services.len(),
        projection.points.len(),
        total,
        mode
    );

    Ok(projection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;

    fn make_service(id: &str, planned: &[f64], actual: &[f64]) -> Service {
        let measurements = planned
            .iter()
            .zip(actual)
            .map(|(&p, &a)| Measurement::new("", p, a))
            .collect();
        Service::new(id, id, id, measurements)
    }

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample() -> (Vec<Service>, ContractPeriod) {
        let services = vec![
            make_service("a", &[100.0, 100.0, 100.0], &[100.0, 50.0, 0.0]),
            make_service("b", &[100.0, 100.0, 100.0], &[100.0, 100.0, 0.0]),
        ];
        (services, ContractPeriod::try_new(1, 2024, 3).unwrap())
    }

    #[test]
    fn test_real_mode_projection() {
        let (services, period) = sample();
        let projection = project_curve(
            &services,
            &[],
            &period,
            make_date(2024, 1, 20),
            &CurveConfig::default(),
        )
        .unwrap();

        // Today is month 1 but actuals exist through month 2
        assert_eq!(projection.cutoff, 2);
        assert_eq!(projection.planned_total, 600.0);
        assert_eq!(projection.chart[1].actual_cumulative, Some(350.0));
        assert_eq!(projection.chart[2].actual_cumulative, None);
        assert_eq!(projection.chart[2].planned_cumulative, 600.0);
        assert_eq!(projection.held[2].actual_cumulative, 350.0);
        assert_eq!(projection.points[2].actual_cumulative, 350.0);
    }

    #[test]
    fn test_percent_mode_projection() {
        let (services, period) = sample();
        let config = CurveConfig {
            view_mode: "percentual".to_string(),
            ..CurveConfig::default()
        };
        let projection =
            project_curve(&services, &[], &period, make_date(2024, 1, 20), &config).unwrap();

        assert!((projection.points[2].planned_cumulative - 100.0).abs() < 1e-9);
        assert!((projection.chart[2].planned_cumulative - 100.0).abs() < 1e-9);
        let actual = projection.chart[1].actual_cumulative.unwrap();
        assert!((actual - 350.0 / 6.0).abs() < 1e-9);
        assert_eq!(projection.planned_total, 600.0);
    }

    #[test]
    fn test_cutoff_disabled_shows_everything() {
        let (services, period) = sample();
        let config = CurveConfig {
            apply_cutoff: false,
            ..CurveConfig::default()
        };
        let projection =
            project_curve(&services, &[], &period, make_date(2020, 1, 1), &config).unwrap();
        assert_eq!(projection.cutoff, 3);
        assert!(projection.chart.iter().all(|p| !p.after_cutoff));
    }

    #[test]
    fn test_unknown_view_mode() {
        let (services, period) = sample();
        let config = CurveConfig {
            view_mode: "money".to_string(),
            ..CurveConfig::default()
        };
        let err = project_curve(&services, &[], &period, make_date(2024, 1, 1), &config)
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownViewMode("money".to_string()));
    }

    #[test]
    fn test_no_services() {
        let period = ContractPeriod::try_new(6, 2024, 2).unwrap();
        let projection = project_curve(
            &[],
            &[],
            &period,
            make_date(2024, 6, 1),
            &CurveConfig::default(),
        )
        .unwrap();
        assert_eq!(projection.points.len(), 2);
        assert_eq!(projection.planned_total, 0.0);
        assert_eq!(projection.cutoff, 1);
    }
}
