//! Per-month Gantt cells for scheduled activities.

use super::types::ScheduledActivity;

/// What a scheduled activity occupies in one month column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineCell {
    /// Between early start (inclusive) and early finish (exclusive).
    Scheduled,
    /// Between early finish and late finish: the activity may slip here.
    Float,
    Idle,
}

impl TimelineCell {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Float => "float",
            Self::Idle => "idle",
        }
    }
}

impl ScheduledActivity {
    pub fn cell(&self, month: i64) -> TimelineCell {
        if month >= self.early_start && month < self.early_finish {
            TimelineCell::Scheduled
        } else if month >= self.early_finish && month < self.late_finish {
            TimelineCell::Float
        } else {
            TimelineCell::Idle
        }
    }

    /// One cell per contract month, starting at month 0.
    pub fn timeline(&self, months: usize) -> Vec<TimelineCell> {
        (0..months as i64).map(|m| self.cell(m)).collect()
    }
}
