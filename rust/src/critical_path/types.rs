//! Types for critical path scheduling.

use pyo3::prelude::*;

use crate::sorting::ItemLabel;

/// An activity as seen by the scheduler.
///
/// Offsets are contract month indices (0-based); `duration` is in months and
/// is expected to be at least 1.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activity {
    #[pyo3(get, set)]
    pub id: String,
    /// Display label, used only for presentation ordering.
    #[pyo3(get, set)]
    pub item: String,
    /// First month with planned work.
    #[pyo3(get, set)]
    pub start: i64,
    /// Last month with planned work.
    #[pyo3(get, set)]
    pub last_month: i64,
    #[pyo3(get, set)]
    pub duration: i64,
    /// Ids of activities that must finish before this one starts.
    #[pyo3(get, set)]
    pub predecessors: Vec<String>,
}

impl Activity {
    pub fn new(
        id: impl Into<String>,
        start: i64,
        duration: i64,
        predecessors: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            item: String::new(),
            start,
            last_month: start + duration - 1,
            duration,
            predecessors,
        }
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = item.into();
        self
    }
}

#[pymethods]
impl Activity {
    #[new]
    #[pyo3(signature = (id, start, duration, predecessors=Vec::new(), item=String::new()))]
    fn py_new(
        id: String,
        start: i64,
        duration: i64,
        predecessors: Vec<String>,
        item: String,
    ) -> Self {
        Self::new(id, start, duration, predecessors).with_item(item)
    }

    fn __repr__(&self) -> String {
        format!(
            "Activity(id={:?}, start={}, duration={}, predecessors={:?})",
            self.id, self.start, self.duration, self.predecessors
        )
    }
}

/// An activity with its early/late dates, slack and critical flag.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledActivity {
    #[pyo3(get)]
    pub id: String,
    #[pyo3(get)]
    pub item: String,
    #[pyo3(get)]
    pub start: i64,
    #[pyo3(get)]
    pub duration: i64,
    #[pyo3(get)]
    pub predecessors: Vec<String>,
    #[pyo3(get)]
    pub early_start: i64,
    #[pyo3(get)]
    pub early_finish: i64,
    #[pyo3(get)]
    pub late_start: i64,
    #[pyo3(get)]
    pub late_finish: i64,
    /// Total slack: late_start - early_start.
    #[pyo3(get)]
    pub slack: i64,
    #[pyo3(get)]
    pub critical: bool,
}

#[pymethods]
impl ScheduledActivity {
    /// Gantt cells ("scheduled", "float", "idle") for the first `months` months.
    #[pyo3(name = "timeline")]
    fn py_timeline(&self, months: usize) -> Vec<&'static str> {
        self.timeline(months).iter().map(|c| c.as_str()).collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduledActivity(id={:?}, es={}, ef={}, ls={}, lf={}, slack={}, critical={})",
            self.id,
            self.early_start,
            self.early_finish,
            self.late_start,
            self.late_finish,
            self.slack,
            self.critical
        )
    }
}

impl ItemLabel for ScheduledActivity {
    fn item(&self) -> &str {
        &self.item
    }
}

/// Output of a critical path calculation.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CriticalPathResult {
    /// One entry per distinct input id, in input order.
    #[pyo3(get)]
    pub activities: Vec<ScheduledActivity>,
    /// Maximum early finish over all activities (0 when there are none).
    #[pyo3(get)]
    pub project_finish: i64,
    /// Activities reached again while still being computed, i.e. members of a
    /// predecessor cycle whose dates are provisional. Input order.
    #[pyo3(get)]
    pub cyclic_activities: Vec<String>,
}

impl CriticalPathResult {
    pub fn get(&self, id: &str) -> Option<&ScheduledActivity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn critical(&self) -> impl Iterator<Item = &ScheduledActivity> {
        self.activities.iter().filter(|a| a.critical)
    }
}

#[pymethods]
impl CriticalPathResult {
    /// Critical activities in input order.
    fn critical_activities(&self) -> Vec<ScheduledActivity> {
        self.critical().cloned().collect()
    }

    /// Whether a critical path is worth presenting.
    ///
    /// Without any declared dependency every activity is trivially its own
    /// path, so a path is only reported when dependencies were declared.
    pub fn has_critical_path(&self, dependencies_declared: bool) -> bool {
        dependencies_declared && self.critical().next().is_some()
    }

    fn __repr__(&self) -> String {
        format!(
            "CriticalPathResult(activities={}, project_finish={}, critical={})",
            self.activities.len(),
            self.project_finish,
            self.critical().count()
        )
    }
}

/// Traversal state of one activity within a single pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodeState {
    Unvisited,
    /// On the current traversal stack; reaching it again closes a cycle.
    InProgress,
    Done,
}
