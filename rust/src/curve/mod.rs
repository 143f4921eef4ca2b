//! S-curve projection of planned, actual and paid contract value.

mod accumulation;
mod cutoff;
mod percent;
mod projection;
mod totals;

pub use accumulation::{build_s_curve, CurvePoint};
pub use cutoff::{chart_points, display_cutoff, held_points, ChartPoint};
pub use percent::{chart_to_percent, curve_to_percent, percent_of, planned_total};
pub use projection::{project_curve, CurveProjection};
pub use totals::{contract_totals, ContractTotals};
