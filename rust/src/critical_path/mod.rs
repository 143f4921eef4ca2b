//! Critical path scheduling over service activities.
//!
//! Activities are derived from the planned span of each service; user-declared
//! predecessor edges are supplied by the caller. The engine computes early and
//! late dates, total slack and the critical flag for every activity.

mod calculation;
mod derive;
mod timeline;
mod types;

pub use calculation::{
    calculate_critical_path, schedule, CriticalPathError, ScheduleError, PROVISIONAL_EARLY_FINISH,
};
pub use derive::{derive_activities, derive_activity, DependencyMap};
pub use timeline::TimelineCell;
pub use types::{Activity, CriticalPathResult, ScheduledActivity};
