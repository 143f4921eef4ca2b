//! Derivation of scheduler activities from service measurements.

use rustc_hash::FxHashMap;

use crate::models::Service;

use super::types::Activity;

/// Declared predecessors per activity id, as persisted by the caller.
pub type DependencyMap = FxHashMap<String, Vec<String>>;

/// Turn a service into a scheduler activity.
///
/// The activity spans from the first to the last month with a positive
/// planned amount. A service with no planned month starts at 0 and still
/// occupies one month.
pub fn derive_activity(service: &Service, predecessors: &[String]) -> Activity {
    let mut planned_months = service
        .measurements
        .iter()
        .enumerate()
        .filter(|(_, m)| m.planned > 0.0)
        .map(|(idx, _)| idx as i64);

    let first = planned_months.next();
    let last = planned_months.last().or(first);

    let start = first.unwrap_or(0);
    let last_month = last.unwrap_or(0);
    let duration = (last_month - start + 1).max(1);

    Activity {
        id: service.id.clone(),
        item: service.item.clone(),
        start,
        last_month,
        duration,
        predecessors: predecessors.to_vec(),
    }
}

/// Derive activities for every service, in input order.
///
/// Services without an entry in `dependencies` get no predecessors.
pub fn derive_activities(services: &[Service], dependencies: &DependencyMap) -> Vec<Activity> {
    services
        .iter()
        .map(|service| {
            let predecessors = dependencies
                .get(&service.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            derive_activity(service, predecessors)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;

    fn make_service(id: &str, planned: &[f64]) -> Service {
        let measurements = planned
            .iter()
            .enumerate()
            .map(|(i, &p)| Measurement::new(format!("M{}", i + 1), p, 0.0))
            .collect();
        Service::new(id, id, format!("Serviço {}", id), measurements)
    }

    #[test]
    fn test_span_from_first_to_last_planned_month() {
        let service = make_service("a", &[0.0, 100.0, 0.0, 50.0, 0.0]);
        let activity = derive_activity(&service, &[]);
        assert_eq!(activity.start, 1);
        assert_eq!(activity.last_month, 3);
        assert_eq!(activity.duration, 3);
    }

    #[test]
    fn test_single_planned_month() {
        let activity = derive_activity(&make_service("a", &[0.0, 0.0, 10.0]), &[]);
        assert_eq!((activity.start, activity.last_month, activity.duration), (2, 2, 1));
    }

    #[test]
    fn test_no_planned_month_occupies_one_period() {
        let activity = derive_activity(&make_service("a", &[0.0, 0.0]), &[]);
        assert_eq!((activity.start, activity.last_month, activity.duration), (0, 0, 1));

        let empty = derive_activity(&make_service("b", &[]), &[]);
        assert_eq!(empty.duration, 1);
    }

    #[test]
    fn test_predecessors_come_from_dependency_map() {
        let services = vec![
            make_service("a", &[10.0]),
            make_service("b", &[0.0, 10.0]),
        ];
        let mut dependencies = DependencyMap::default();
        dependencies.insert("b".to_string(), vec!["a".to_string()]);

        let activities = derive_activities(&services, &dependencies);
        assert_eq!(activities.len(), 2);
        assert!(activities[0].predecessors.is_empty());
        assert_eq!(activities[1].predecessors, vec!["a".to_string()]);
        assert_eq!(activities[1].item, "b");
    }
}
