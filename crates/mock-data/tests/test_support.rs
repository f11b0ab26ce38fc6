//! Shared fixtures and graph assertions for mock-data integration tests.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, TimeZone, Utc};
use mock_data::{FixedClock, GenerationConfig, IncidentStatus, MockDatabase, TargetType};

/// Returns the instant every integration test pins "now" to.
#[must_use]
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .unwrap_or_default()
}

/// A clock frozen at [`reference_time`].
#[must_use]
pub fn fixed_clock() -> FixedClock {
    FixedClock::new(reference_time())
}

/// A configuration with every count set to one.
#[must_use]
pub const fn all_ones() -> GenerationConfig {
    GenerationConfig {
        orgs: 1,
        users_per_org: 1,
        projects_per_org: 1,
        dashboards_per_project: 1,
        widgets_per_dashboard: 1,
        metrics_per_project: 1,
        samples_per_metric: 1,
        alerts_per_project: 1,
        incidents_per_alert: 1,
        suites_per_project: 1,
        runs_per_suite: 1,
        permissions_per_user: 1,
        feature_flags: 1,
        audit_logs: 1,
    }
}

/// Asserts that every foreign key resolves and that scoped references stay
/// inside their owning organization or project.
///
/// # Panics
///
/// Panics with the offending record when a reference is broken.
pub fn assert_graph_integrity(db: &MockDatabase) {
    let org_ids: HashSet<&str> = db.orgs.iter().map(|org| org.id.as_str()).collect();
    let user_org: HashMap<&str, &str> = db
        .users
        .iter()
        .map(|user| (user.id.as_str(), user.org_id.as_str()))
        .collect();
    let project_org: HashMap<&str, &str> = db
        .projects
        .iter()
        .map(|project| (project.id.as_str(), project.org_id.as_str()))
        .collect();
    let dashboard_project: HashMap<&str, &str> = db
        .dashboards
        .iter()
        .map(|dashboard| (dashboard.id.as_str(), dashboard.project_id.as_str()))
        .collect();
    let metric_project: HashMap<&str, &str> = db
        .metrics
        .iter()
        .map(|metric| (metric.id.as_str(), metric.project_id.as_str()))
        .collect();
    let widget_ids: HashSet<&str> = db.widgets.iter().map(|widget| widget.id.as_str()).collect();
    let alert_ids: HashSet<&str> = db.alerts.iter().map(|alert| alert.id.as_str()).collect();
    let suite_ids: HashSet<&str> = db.eval_suites.iter().map(|suite| suite.id.as_str()).collect();

    for user in &db.users {
        assert!(org_ids.contains(user.org_id.as_str()), "dangling user org: {user:?}");
    }
    for project in &db.projects {
        assert!(org_ids.contains(project.org_id.as_str()), "dangling project org: {project:?}");
    }
    for dashboard in &db.dashboards {
        let org = project_org.get(dashboard.project_id.as_str());
        assert!(org.is_some(), "dangling dashboard project: {dashboard:?}");
        if let Some(owner) = &dashboard.owner_user_id {
            assert_eq!(user_org.get(owner.as_str()), org, "owner outside org: {dashboard:?}");
        }
    }
    for widget in &db.widgets {
        let project = dashboard_project.get(widget.dashboard_id.as_str());
        assert!(project.is_some(), "dangling widget dashboard: {widget:?}");
        if let Some(metric) = &widget.metric_id {
            assert_eq!(metric_project.get(metric.as_str()), project, "widget metric: {widget:?}");
        }
    }
    for metric in &db.metrics {
        assert!(project_org.contains_key(metric.project_id.as_str()), "metric: {metric:?}");
    }
    for sample in &db.metric_samples {
        assert!(metric_project.contains_key(sample.metric_id.as_str()), "sample: {sample:?}");
    }
    for alert in &db.alerts {
        let project = alert.project_id.as_str();
        assert!(project_org.contains_key(project), "alert: {alert:?}");
        if let Some(metric) = &alert.metric_id {
            assert_eq!(
                metric_project.get(metric.as_str()).copied(),
                Some(project),
                "alert metric: {alert:?}"
            );
        }
    }
    for incident in &db.incidents {
        assert!(alert_ids.contains(incident.alert_id()), "incident: {incident:?}");
    }
    for suite in &db.eval_suites {
        assert!(project_org.contains_key(suite.project_id.as_str()), "suite: {suite:?}");
    }
    for run in &db.eval_runs {
        assert!(suite_ids.contains(run.suite_id.as_str()), "run: {run:?}");
    }
    for permission in &db.permissions {
        let org = user_org.get(permission.user_id.as_str());
        assert!(org.is_some(), "dangling permission user: {permission:?}");
        assert_eq!(
            project_org.get(permission.project_id.as_str()),
            org,
            "permission crosses org: {permission:?}"
        );
        assert!(!permission.scopes.is_empty(), "empty scopes: {permission:?}");
    }
    for flag in &db.feature_flags {
        assert!(
            flag.enabled_for_orgs.iter().all(|org| org_ids.contains(org.as_str())),
            "flag targets unknown org: {flag:?}"
        );
    }
    for entry in &db.audit_logs {
        if let Some(actor) = &entry.actor_user_id {
            let actor_org = user_org.get(actor.as_str()).copied();
            assert!(actor_org.is_some(), "dangling audit actor: {entry:?}");
            assert_eq!(entry.org_id.as_deref(), actor_org, "audit org: {entry:?}");
        }
        if let (Some(kind), Some(target)) = (entry.target_type, &entry.target_id) {
            let target = target.as_str();
            let exists = match kind {
                TargetType::Project => project_org.contains_key(target),
                TargetType::Dashboard => dashboard_project.contains_key(target),
                TargetType::Widget => widget_ids.contains(target),
                TargetType::Alert => alert_ids.contains(target),
            };
            assert!(exists, "dangling audit target: {entry:?}");
        }
    }
}

/// Asserts that identifiers are unique across the whole snapshot and that
/// incident timestamps are causally ordered.
///
/// # Panics
///
/// Panics with the offending record on the first violation.
pub fn assert_record_invariants(db: &MockDatabase) {
    let ids: Vec<&str> = db
        .orgs
        .iter()
        .map(|org| org.id.as_str())
        .chain(db.users.iter().map(|user| user.id.as_str()))
        .chain(db.projects.iter().map(|project| project.id.as_str()))
        .chain(db.dashboards.iter().map(|dashboard| dashboard.id.as_str()))
        .chain(db.widgets.iter().map(|widget| widget.id.as_str()))
        .chain(db.metrics.iter().map(|metric| metric.id.as_str()))
        .chain(db.alerts.iter().map(|alert| alert.id.as_str()))
        .chain(db.incidents.iter().map(mock_data::Incident::id))
        .chain(db.eval_suites.iter().map(|suite| suite.id.as_str()))
        .chain(db.eval_runs.iter().map(|run| run.id.as_str()))
        .chain(db.audit_logs.iter().map(|entry| entry.id.as_str()))
        .collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len(), "identifiers repeat");

    for incident in &db.incidents {
        match (incident.status(), incident.resolved_at()) {
            (IncidentStatus::Open, None) => {}
            (IncidentStatus::Resolved, Some(resolved_at)) => {
                assert!(resolved_at > incident.opened_at(), "resolved early: {incident:?}");
            }
            _ => panic!("incident status and resolution disagree: {incident:?}"),
        }
    }
}
