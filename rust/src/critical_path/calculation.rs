//! Critical path calculation using forward and backward passes.
//!
//! Both passes are memoized depth-first traversals with an explicit stack and
//! a tri-state per activity (unvisited / in progress / done). Reaching an
//! activity that is still in progress means the predecessor graph has a
//! cycle; depending on `CyclePolicy` the traversal either fails or uses the
//! provisional value documented on each pass and carries on.

use thiserror::Error;

use crate::config::{CyclePolicy, ScheduleConfig};
use crate::interner::{ActivityIdx, ActivityIndex};
use crate::{log_passes, log_summary, log_trace};

use super::types::{Activity, CriticalPathResult, NodeState, ScheduledActivity};

/// Early finish used for a predecessor that is still being computed.
pub const PROVISIONAL_EARLY_FINISH: i64 = 0;

/// Errors from critical path calculation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriticalPathError {
    #[error("Circular dependency detected at activity {activity_id}")]
    CircularDependency { activity_id: String },
}

/// Dependency graph over dense activity indices.
struct ActivityGraph<'a> {
    index: ActivityIndex,
    /// Input activity for each index (first occurrence of its id).
    activities: Vec<&'a Activity>,
    predecessors: Vec<Vec<ActivityIdx>>,
    successors: Vec<Vec<ActivityIdx>>,
}

impl<'a> ActivityGraph<'a> {
    fn build(activities: &'a [Activity], verbosity: u8) -> Self {
        let mut index = ActivityIndex::with_capacity(activities.len());
        let mut kept: Vec<&Activity> = Vec::with_capacity(activities.len());

        for activity in activities {
            if index.insert(&activity.id).is_some() {
                kept.push(activity);
            } else {
                log_summary!(
                    verbosity,
                    "Duplicate activity id {:?} ignored (first occurrence kept)",
                    activity.id
                );
            }
        }

        let n = kept.len();
        let mut predecessors: Vec<Vec<ActivityIdx>> = vec![Vec::new(); n];
        let mut successors: Vec<Vec<ActivityIdx>> = vec![Vec::new(); n];

        for (idx, activity) in kept.iter().enumerate() {
            for pred_id in &activity.predecessors {
                match index.get(pred_id) {
                    Some(pred) => {
                        predecessors[idx].push(pred);
                        successors[pred as usize].push(idx as ActivityIdx);
                    }
                    None => {
                        log_trace!(
                            verbosity,
                            "{}: unknown predecessor {:?} ignored",
                            activity.id,
                            pred_id
                        );
                    }
                }
            }
        }

        Self {
            index,
            activities: kept,
            predecessors,
            successors,
        }
    }

    fn len(&self) -> usize {
        self.activities.len()
    }

    fn id(&self, idx: usize) -> &str {
        self.index.id(idx as ActivityIdx).unwrap_or_default()
    }
}

#[derive(Clone, Copy)]
struct Frame {
    node: usize,
    next_edge: usize,
    acc: i64,
}

/// One memoized traversal direction.
struct Pass<'g> {
    name: &'static str,
    adjacency: &'g [Vec<ActivityIdx>],
    /// Starting value of the fold over neighbours.
    seed: i64,
    /// Value reported for a neighbour that is still in progress.
    provisional: i64,
    combine: fn(i64, i64) -> i64,
}

struct PassOutcome {
    /// Nodes on a cycle closed during the pass (may repeat).
    cycle_members: Vec<usize>,
}

impl Pass<'_> {
    /// Visit every node, folding each node's neighbour values with `combine`
    /// and handing the fold to `finish`, which returns the node's own value.
    ///
    /// Roots are seeded in index order; memoization makes the result
    /// independent of that order on acyclic graphs.
    fn run<F>(
        &self,
        policy: CyclePolicy,
        verbosity: u8,
        mut finish: F,
    ) -> Result<PassOutcome, usize>
    where
        F: FnMut(usize, i64) -> i64,
    {
        let n = self.adjacency.len();
        let mut state = vec![NodeState::Unvisited; n];
        let mut values = vec![self.provisional; n];
        let mut cycle_members = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();

        for root in 0..n {
            if state[root] != NodeState::Unvisited {
                continue;
            }
            state[root] = NodeState::InProgress;
            stack.push(Frame {
                node: root,
                next_edge: 0,
                acc: self.seed,
            });

            while let Some(top) = stack.len().checked_sub(1) {
                let frame = stack[top];
                match self.adjacency[frame.node].get(frame.next_edge).copied() {
                    Some(neighbor) => {
                        let neighbor = neighbor as usize;
                        stack[top].next_edge += 1;
                        match state[neighbor] {
                            NodeState::Done => {
                                stack[top].acc = (self.combine)(frame.acc, values[neighbor]);
                            }
                            NodeState::InProgress => {
                                if policy == CyclePolicy::Reject {
                                    return Err(neighbor);
                                }
                                log_trace!(
                                    verbosity,
                                    "{} pass: node {} revisited in progress, using {}",
                                    self.name,
                                    neighbor,
                                    self.provisional
                                );
                                // The cycle is the stack segment from `neighbor` up
                                let from = stack
                                    .iter()
                                    .rposition(|f| f.node == neighbor)
                                    .unwrap_or(top);
                                cycle_members.extend(stack[from..].iter().map(|f| f.node));
                                stack[top].acc = (self.combine)(frame.acc, values[neighbor]);
                            }
                            NodeState::Unvisited => {
                                state[neighbor] = NodeState::InProgress;
                                stack.push(Frame {
                                    node: neighbor,
                                    next_edge: 0,
                                    acc: self.seed,
                                });
                            }
                        }
                    }
                    None => {
                        stack.pop();
                        let value = finish(frame.node, frame.acc);
                        values[frame.node] = value;
                        state[frame.node] = NodeState::Done;
                        if let Some(parent) = stack.last_mut() {
                            parent.acc = (self.combine)(parent.acc, value);
                        }
                    }
                }
            }
        }

        Ok(PassOutcome { cycle_members })
    }
}

/// Run the forward and backward passes over `activities`.
///
/// Forward pass: `ES = max(start, max EF of predecessors)`, `EF = ES + duration`.
/// Backward pass: `LF = min LS of successors` (project finish when there are
/// none), `LS = LF - duration`. Slack is `LS - ES`; zero slack is critical.
///
/// Predecessor ids that do not name an activity in the list are ignored.
/// Duplicate ids keep their first occurrence.
///
/// With `CyclePolicy::Tolerate` a cycle never fails the calculation: a
/// predecessor still in progress contributes an early finish of 0 and a
/// successor still in progress contributes a late start equal to the project
/// finish. Affected ids are listed in `CriticalPathResult::cyclic_activities`.
///
/// # Errors
/// * `CriticalPathError::CircularDependency` when the policy is
///   `CyclePolicy::Reject` and the predecessor graph has a cycle
pub fn calculate_critical_path(
    activities: &[Activity],
    policy: CyclePolicy,
    verbosity: u8,
) -> Result<CriticalPathResult, CriticalPathError> {
    let graph = ActivityGraph::build(activities, verbosity);
    let n = graph.len();

    if n == 0 {
        return Ok(CriticalPathResult::default());
    }

    let cycle_error = |idx: usize| {
        log_summary!(verbosity, "Circular dependency at {:?}", graph.id(idx));
        CriticalPathError::CircularDependency {
            activity_id: graph.id(idx).to_string(),
        }
    };

    // Forward pass: early start / early finish
    let mut early_start = vec![0i64; n];
    let mut early_finish = vec![PROVISIONAL_EARLY_FINISH; n];
    let forward = Pass {
        name: "forward",
        adjacency: &graph.predecessors,
        seed: 0,
        provisional: PROVISIONAL_EARLY_FINISH,
        combine: i64::max,
    };
    let forward_outcome = forward
        .run(policy, verbosity, |node, max_pred_finish| {
            let activity = graph.activities[node];
            early_start[node] = max_pred_finish.max(activity.start);
            early_finish[node] = early_start[node] + activity.duration;
            log_trace!(
                verbosity,
                "forward {}: ES={} EF={}",
                activity.id,
                early_start[node],
                early_finish[node]
            );
            early_finish[node]
        })
        .map_err(cycle_error)?;

    let project_finish = early_finish.iter().copied().max().unwrap_or(0);
    log_passes!(verbosity, "Forward pass done, project finish {}", project_finish);

    // Backward pass: late finish / late start
    let mut late_start = vec![project_finish; n];
    let mut late_finish = vec![project_finish; n];
    let backward = Pass {
        name: "backward",
        adjacency: &graph.successors,
        seed: project_finish,
        provisional: project_finish,
        combine: i64::min,
    };
    let backward_outcome = backward
        .run(policy, verbosity, |node, min_succ_start| {
            let activity = graph.activities[node];
            late_finish[node] = if graph.successors[node].is_empty() {
                project_finish
            } else {
                min_succ_start
            };
            late_start[node] = late_finish[node] - activity.duration;
            log_trace!(
                verbosity,
                "backward {}: LS={} LF={}",
                activity.id,
                late_start[node],
                late_finish[node]
            );
            late_start[node]
        })
        .map_err(cycle_error)?;

    let mut cyclic = vec![false; n];
    for &node in forward_outcome
        .cycle_members
        .iter()
        .chain(backward_outcome.cycle_members.iter())
    {
        cyclic[node] = true;
    }
    let cyclic_activities: Vec<String> = (0..n)
        .filter(|&idx| cyclic[idx])
        .map(|idx| graph.id(idx).to_string())
        .collect();

    if !cyclic_activities.is_empty() {
        log_summary!(
            verbosity,
            "Cycle tolerated, provisional dates for {:?}",
            cyclic_activities
        );
    }

    let scheduled: Vec<ScheduledActivity> = graph
        .activities
        .iter()
        .enumerate()
        .map(|(idx, activity)| {
            let slack = late_start[idx] - early_start[idx];
            ScheduledActivity {
                id: activity.id.clone(),
                item: activity.item.clone(),
                start: activity.start,
                duration: activity.duration,
                predecessors: activity.predecessors.clone(),
                early_start: early_start[idx],
                early_finish: early_finish[idx],
                late_start: late_start[idx],
                late_finish: late_finish[idx],
                slack,
                critical: slack == 0,
            }
        })
        .collect();

    log_summary!(
        verbosity,
        "Critical path: {} activities, {} critical, finish at month {}",
        scheduled.len(),
        scheduled.iter().filter(|a| a.critical).count(),
        project_finish
    );

    Ok(CriticalPathResult {
        activities: scheduled,
        project_finish,
        cyclic_activities,
    })
}

/// Run the critical path calculation with a configuration object.
///
/// # Errors
/// * `ScheduleError::Config` if the cycle policy string is unknown
/// * `ScheduleError::CriticalPath` if the policy rejects a cyclic graph
pub fn schedule(
    activities: &[Activity],
    config: &ScheduleConfig,
) -> Result<CriticalPathResult, ScheduleError> {
    let policy = config.policy()?;
    Ok(calculate_critical_path(activities, policy, config.verbosity)?)
}

/// Errors from a configured scheduling run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error(transparent)]
    CriticalPath(#[from] CriticalPathError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_activity(id: &str, start: i64, duration: i64, preds: &[&str]) -> Activity {
        Activity::new(
            id,
            start,
            duration,
            preds.iter().map(|p| p.to_string()).collect(),
        )
    }

    fn tolerate(activities: &[Activity]) -> CriticalPathResult {
        calculate_critical_path(activities, CyclePolicy::Tolerate, 0).unwrap()
    }

    fn dates(result: &CriticalPathResult, id: &str) -> (i64, i64, i64, i64, i64) {
        let a = result.get(id).unwrap();
        (a.early_start, a.early_finish, a.late_start, a.late_finish, a.slack)
    }

    #[test]
    fn test_empty_input() {
        let result = tolerate(&[]);
        assert!(result.activities.is_empty());
        assert_eq!(result.project_finish, 0);
        assert!(result.cyclic_activities.is_empty());
    }

    #[test]
    fn test_simple_chain_is_fully_critical() {
        let activities = vec![
            make_activity("a", 0, 2, &[]),
            make_activity("b", 0, 3, &["a"]),
            make_activity("c", 0, 1, &["a", "b"]),
        ];
        let result = tolerate(&activities);

        assert_eq!(result.project_finish, 6);
        assert_eq!(dates(&result, "a"), (0, 2, 0, 2, 0));
        assert_eq!(dates(&result, "b"), (2, 5, 2, 5, 0));
        assert_eq!(dates(&result, "c"), (5, 6, 5, 6, 0));
        assert!(result.activities.iter().all(|a| a.critical));
    }

    #[test]
    fn test_parallel_branch_has_slack() {
        // a -> b (long) -> d, a -> c (short) -> d
        let activities = vec![
            make_activity("a", 0, 1, &[]),
            make_activity("b", 0, 4, &["a"]),
            make_activity("c", 0, 1, &["a"]),
            make_activity("d", 0, 2, &["b", "c"]),
        ];
        let result = tolerate(&activities);

        assert_eq!(result.project_finish, 7);
        assert_eq!(dates(&result, "c"), (1, 2, 4, 5, 3));
        assert!(!result.get("c").unwrap().critical);
        let critical: Vec<&str> = result.critical().map(|a| a.id.as_str()).collect();
        assert_eq!(critical, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_planned_start_delays_early_start() {
        let activities = vec![
            make_activity("a", 0, 2, &[]),
            make_activity("b", 5, 1, &["a"]),
        ];
        let result = tolerate(&activities);
        assert_eq!(dates(&result, "b"), (5, 6, 5, 6, 0));
        // a finishes at 2 but b does not start before 5
        assert_eq!(dates(&result, "a"), (0, 2, 3, 5, 3));
    }

    #[test]
    fn test_no_predecessors_start_at_planned_start() {
        let activities = vec![
            make_activity("a", 3, 2, &[]),
            make_activity("b", 1, 1, &[]),
        ];
        let result = tolerate(&activities);
        assert_eq!(result.get("a").unwrap().early_start, 3);
        assert_eq!(result.get("b").unwrap().early_start, 1);
        // Neither has successors: both finish late at the project finish
        assert_eq!(result.get("a").unwrap().late_finish, 5);
        assert_eq!(result.get("b").unwrap().late_finish, 5);
        assert_eq!(result.get("b").unwrap().slack, 3);
    }

    #[test]
    fn test_dangling_predecessor_is_ignored() {
        let activities = vec![make_activity("a", 1, 2, &["ghost"])];
        let result = tolerate(&activities);
        assert_eq!(dates(&result, "a"), (1, 3, 1, 3, 0));
        assert!(result.cyclic_activities.is_empty());
    }

    #[test]
    fn test_input_order_does_not_change_dag_result() {
        let forward = vec![
            make_activity("a", 0, 1, &[]),
            make_activity("b", 0, 4, &["a"]),
            make_activity("c", 0, 1, &["a"]),
            make_activity("d", 0, 2, &["b", "c"]),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let r1 = tolerate(&forward);
        let r2 = tolerate(&reversed);
        for id in ["a", "b", "c", "d"] {
            assert_eq!(dates(&r1, id), dates(&r2, id));
        }
        // Output follows input order
        assert_eq!(r2.activities[0].id, "d");
    }

    #[test]
    fn test_dag_invariants() {
        let activities = vec![
            make_activity("a", 0, 2, &[]),
            make_activity("b", 1, 3, &["a"]),
            make_activity("c", 0, 1, &[]),
            make_activity("d", 2, 2, &["c"]),
            make_activity("e", 0, 1, &["b", "d"]),
            make_activity("f", 7, 1, &["c"]),
        ];
        let result = tolerate(&activities);
        let has_successor = |id: &str| {
            activities
                .iter()
                .any(|a| a.predecessors.iter().any(|p| p == id))
        };

        for a in &result.activities {
            assert_eq!(a.early_finish, a.early_start + a.duration);
            assert_eq!(a.late_start, a.late_finish - a.duration);
            assert!(a.slack >= 0, "{} has negative slack", a.id);
            if a.predecessors.is_empty() {
                assert_eq!(a.early_start, a.start);
            }
            if !has_successor(&a.id) {
                assert_eq!(a.late_finish, result.project_finish);
            }
        }
        assert!(result.critical().next().is_some());
    }

    #[test]
    fn test_mutual_cycle_terminates_when_tolerated() {
        let activities = vec![
            make_activity("a", 0, 2, &["b"]),
            make_activity("b", 0, 3, &["a"]),
        ];
        let result = tolerate(&activities);

        // a is seeded first: b sees a in progress (EF 0), so b = [0, 3), a = [3, 5)
        assert_eq!(result.get("b").unwrap().early_start, 0);
        assert_eq!(result.get("a").unwrap().early_start, 3);
        assert_eq!(result.project_finish, 5);
        assert_eq!(result.cyclic_activities, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_self_reference_terminates_when_tolerated() {
        let activities = vec![make_activity("a", 1, 2, &["a"])];
        let result = tolerate(&activities);
        assert_eq!(dates(&result, "a"), (1, 3, 1, 3, 0));
        assert_eq!(result.cyclic_activities, vec!["a".to_string()]);
    }

    #[test]
    fn test_cycle_rejected_by_policy() {
        let activities = vec![
            make_activity("a", 0, 1, &[]),
            make_activity("b", 0, 1, &["a", "c"]),
            make_activity("c", 0, 1, &["b"]),
        ];
        let err = calculate_critical_path(&activities, CyclePolicy::Reject, 0).unwrap_err();
        assert_eq!(
            err,
            CriticalPathError::CircularDependency {
                activity_id: "b".to_string()
            }
        );
        assert!(err.to_string().contains("b"));
    }

    #[test]
    fn test_reject_policy_accepts_dag() {
        let activities = vec![
            make_activity("a", 0, 1, &[]),
            make_activity("b", 0, 1, &["a"]),
        ];
        let result = calculate_critical_path(&activities, CyclePolicy::Reject, 0).unwrap();
        assert_eq!(result.project_finish, 2);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let activities = vec![
            make_activity("a", 0, 2, &[]),
            make_activity("a", 0, 9, &[]),
        ];
        let result = tolerate(&activities);
        assert_eq!(result.activities.len(), 1);
        assert_eq!(result.project_finish, 2);
    }

    #[test]
    fn test_schedule_with_config() {
        let activities = vec![make_activity("a", 0, 1, &["a"])];

        let rejecting = ScheduleConfig {
            cycle_policy: "reject".to_string(),
            verbosity: 0,
        };
        assert!(matches!(
            schedule(&activities, &rejecting),
            Err(ScheduleError::CriticalPath(_))
        ));

        let unknown = ScheduleConfig {
            cycle_policy: "whatever".to_string(),
            verbosity: 0,
        };
        assert!(matches!(
            schedule(&activities, &unknown),
            Err(ScheduleError::Config(_))
        ));

        assert!(schedule(&activities, &ScheduleConfig::default()).is_ok());
    }
}
