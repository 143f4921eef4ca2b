//! Calendar arithmetic over contract months.

use chrono::{Datelike, NaiveDate};

use crate::models::ContractPeriod;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Sequential "Mmm/YYYY" labels, one per contract month.
///
/// Labels are for display only; nothing numeric depends on them.
pub fn month_labels(period: &ContractPeriod) -> Vec<String> {
    let mut month = period.start_month.saturating_sub(1) as usize % 12;
    let mut year = period.start_year;

    (0..period.months)
        .map(|_| {
            let label = format!("{}/{}", MONTH_ABBREVIATIONS[month], year);
            month += 1;
            if month == 12 {
                month = 0;
                year += 1;
            }
            label
        })
        .collect()
}

/// 1-based number of the contract month that contains `today`.
///
/// Not clamped: a date before the contract start yields zero or a negative
/// number, a date after the end yields more than `period.months`.
pub fn months_since_start(period: &ContractPeriod, today: NaiveDate) -> i64 {
    let years = i64::from(today.year()) - i64::from(period.start_year);
    let months = i64::from(today.month()) - i64::from(period.start_month);
    years * 12 + months + 1
}
