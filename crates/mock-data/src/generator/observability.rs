//! Dashboards, metrics and the alerting chain built on top of them.

use std::collections::BTreeSet;
use std::num::NonZeroU32;

use chrono::Days;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, trace};

use super::{chance, group_by, members, past_offset_minutes};
use crate::catalog::{
    ALERT_NAMES, ALERT_WINDOWS, DASHBOARD_NAMES, ENVIRONMENTS, METRICS, REGIONS, WIDGET_TITLES,
    WIDGET_TYPES,
};
use crate::context::{GenerationContext, IdPrefix};
use crate::error::GenerationError;
use crate::model::{
    Alert, Dashboard, Incident, Metric, MetricSample, Project, User, Widget, WidgetFilters,
};
use crate::sampling::{MAX_RESAMPLE_ATTEMPTS, Sampled, sample_excluding};

const DASHBOARD_ACTIVE_PERCENT: u32 = 95;
const WIDGET_VISIBLE_PERCENT: u32 = 95;
const WIDGET_ARCHIVED_PERCENT: u32 = 5;
const ALERT_ENABLED_PERCENT: u32 = 90;
const ALERT_FIRED_PERCENT: u32 = 60;
const INCIDENT_RESOLVED_PERCENT: u32 = 50;

/// Half-open range of daily sample counts.
const SAMPLE_COUNT_RANGE: std::ops::Range<u32> = 80..200_000;
/// Half-open range of alert thresholds.
const THRESHOLD_RANGE: std::ops::Range<u32> = 50..1000;

/// Generates `dashboards_per_project` dashboards for every project.
///
/// Owners are drawn from the users of the project's organization; a
/// dashboard of an organization without users has no owner.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyCatalog`] if the dashboard-name catalog
/// is empty.
pub fn generate_dashboards(
    ctx: &mut GenerationContext,
    projects: &[Project],
    users: &[User],
    dashboards_per_project: usize,
) -> Result<Vec<Dashboard>, GenerationError> {
    let users_by_org = group_by(users, |user| user.org_id.as_str());

    let mut dashboards = Vec::with_capacity(projects.len().saturating_mul(dashboards_per_project));
    for project in projects {
        let org_users = members(&users_by_org, &project.org_id);
        for _ in 0..dashboards_per_project {
            let owner_user_id = org_users.choose(ctx.rng()).map(|user| user.id.clone());
            dashboards.push(Dashboard {
                id: ctx.next_id(IdPrefix::Dashboard),
                project_id: project.id.clone(),
                name: DASHBOARD_NAMES.pick(ctx.rng())?.to_owned(),
                owner_user_id,
                active: chance(ctx.rng(), DASHBOARD_ACTIVE_PERCENT),
            });
        }
    }

    debug!(count = dashboards.len(), "generated dashboards");
    Ok(dashboards)
}

/// Generates `metrics_per_project` metrics for every project.
///
/// Metric names avoid repeating inside a project on a best-effort basis.
/// When a project asks for more metrics than the catalog holds, repeats are
/// accepted once the retry budget is spent.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyCatalog`] if the metric catalog is empty
/// and a metric is requested.
pub fn generate_metrics(
    ctx: &mut GenerationContext,
    projects: &[Project],
    metrics_per_project: usize,
) -> Result<Vec<Metric>, GenerationError> {
    let mut metrics = Vec::with_capacity(projects.len().saturating_mul(metrics_per_project));
    for project in projects {
        let mut used = BTreeSet::new();
        for _ in 0..metrics_per_project {
            let sampled = sample_excluding(
                ctx.rng(),
                METRICS.entries(),
                &used,
                |definition| definition.name,
                MAX_RESAMPLE_ATTEMPTS,
            )
            .ok_or(GenerationError::EmptyCatalog {
                catalog: METRICS.name(),
            })?;
            if let Sampled::Duplicate(definition) = sampled {
                trace!(
                    project_id = %project.id,
                    metric = definition.name,
                    "accepted duplicate metric name"
                );
            }
            let definition = sampled.into_inner();
            used.insert(definition.name);

            metrics.push(Metric {
                id: ctx.next_id(IdPrefix::Metric),
                project_id: project.id.clone(),
                name: definition.name.to_owned(),
                retention_days: definition.retention_days,
                status: definition.status,
            });
        }
    }

    debug!(count = metrics.len(), "generated metrics");
    Ok(metrics)
}

/// Generates `samples_per_metric` consecutive daily samples per metric.
///
/// Samples of one metric are ordered oldest first and the last one falls on
/// the reference day, so the dates form a gapless run.
///
/// # Errors
///
/// Returns [`GenerationError::DateOutOfRange`] if the earliest day precedes
/// the representable calendar.
pub fn generate_metric_samples(
    ctx: &mut GenerationContext,
    metrics: &[Metric],
    samples_per_metric: usize,
) -> Result<Vec<MetricSample>, GenerationError> {
    let today = ctx.today();

    let mut samples = Vec::with_capacity(metrics.len().saturating_mul(samples_per_metric));
    for metric in metrics {
        for days_back in (0..samples_per_metric).rev() {
            let days = u64::try_from(days_back).unwrap_or(u64::MAX);
            let date = today
                .checked_sub_days(Days::new(days))
                .ok_or(GenerationError::DateOutOfRange { days })?;
            samples.push(MetricSample {
                metric_id: metric.id.clone(),
                date,
                count: ctx.rng().random_range(SAMPLE_COUNT_RANGE),
            });
        }
    }

    debug!(count = samples.len(), "generated metric samples");
    Ok(samples)
}

/// Generates `widgets_per_dashboard` widgets for every dashboard.
///
/// A widget's metric is drawn from the metrics of its dashboard's project;
/// when that project has none the widget has no metric.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyCatalog`] if a widget catalog is empty.
pub fn generate_widgets(
    ctx: &mut GenerationContext,
    dashboards: &[Dashboard],
    metrics: &[Metric],
    widgets_per_dashboard: usize,
) -> Result<Vec<Widget>, GenerationError> {
    let metrics_by_project = group_by(metrics, |metric| metric.project_id.as_str());

    let mut widgets = Vec::with_capacity(dashboards.len().saturating_mul(widgets_per_dashboard));
    for dashboard in dashboards {
        let project_metrics = members(&metrics_by_project, &dashboard.project_id);
        for _ in 0..widgets_per_dashboard {
            let metric_id = project_metrics
                .choose(ctx.rng())
                .map(|metric| metric.id.clone());
            widgets.push(Widget {
                id: ctx.next_id(IdPrefix::Widget),
                dashboard_id: dashboard.id.clone(),
                widget_type: WIDGET_TYPES.pick(ctx.rng())?,
                metric_id,
                title: WIDGET_TITLES.pick(ctx.rng())?.to_owned(),
                filters: WidgetFilters {
                    env: ENVIRONMENTS.pick(ctx.rng())?,
                    region: vec![REGIONS.pick(ctx.rng())?],
                },
                visible: chance(ctx.rng(), WIDGET_VISIBLE_PERCENT),
                archived: chance(ctx.rng(), WIDGET_ARCHIVED_PERCENT),
            });
        }
    }

    debug!(count = widgets.len(), "generated widgets");
    Ok(widgets)
}

/// Generates `alerts_per_project` alert rules for every project.
///
/// The watched metric belongs to the same project, or is absent when the
/// project has no metrics. Roughly three in five alerts have fired within
/// the last eight days.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyCatalog`] if an alert catalog is empty,
/// or [`GenerationError::TimestampOutOfRange`] if a firing time cannot be
/// represented.
pub fn generate_alerts(
    ctx: &mut GenerationContext,
    projects: &[Project],
    metrics: &[Metric],
    alerts_per_project: usize,
) -> Result<Vec<Alert>, GenerationError> {
    let metrics_by_project = group_by(metrics, |metric| metric.project_id.as_str());

    let mut alerts = Vec::with_capacity(projects.len().saturating_mul(alerts_per_project));
    for project in projects {
        let project_metrics = members(&metrics_by_project, &project.id);
        for _ in 0..alerts_per_project {
            let metric_id = project_metrics
                .choose(ctx.rng())
                .map(|metric| metric.id.clone());
            let last_fired_at = if chance(ctx.rng(), ALERT_FIRED_PERCENT) {
                let age = past_offset_minutes(ctx.rng(), 7, 0..=1440);
                Some(ctx.minutes_ago(age)?)
            } else {
                None
            };
            alerts.push(Alert {
                id: ctx.next_id(IdPrefix::Alert),
                project_id: project.id.clone(),
                name: ALERT_NAMES.pick(ctx.rng())?.to_owned(),
                metric_id,
                threshold: ctx.rng().random_range(THRESHOLD_RANGE),
                window: ALERT_WINDOWS.pick(ctx.rng())?,
                enabled: chance(ctx.rng(), ALERT_ENABLED_PERCENT),
                last_fired_at,
            });
        }
    }

    debug!(count = alerts.len(), "generated alerts");
    Ok(alerts)
}

/// Generates `incidents_per_alert` incidents for every alert.
///
/// Incidents open between ten minutes and about seventeen days before the
/// reference instant; half of them are resolved five to 180 minutes later.
///
/// # Errors
///
/// Returns [`GenerationError::TimestampOutOfRange`] if a timestamp cannot
/// be represented.
pub fn generate_incidents(
    ctx: &mut GenerationContext,
    alerts: &[Alert],
    incidents_per_alert: usize,
) -> Result<Vec<Incident>, GenerationError> {
    let mut incidents = Vec::with_capacity(alerts.len().saturating_mul(incidents_per_alert));
    for alert in alerts {
        for _ in 0..incidents_per_alert {
            let age = past_offset_minutes(ctx.rng(), 10, 10..=10_000);
            let opened_at = ctx.minutes_ago(age)?;
            let id = ctx.next_id(IdPrefix::Incident);
            let incident = if chance(ctx.rng(), INCIDENT_RESOLVED_PERCENT) {
                // 5..=180 minutes.
                let minutes_to_resolve =
                    NonZeroU32::MIN.saturating_add(ctx.rng().random_range(4..=179));
                Incident::resolved(id, alert.id.clone(), opened_at, minutes_to_resolve)?
            } else {
                Incident::open(id, alert.id.clone(), opened_at)
            };
            incidents.push(incident);
        }
    }

    debug!(count = incidents.len(), "generated incidents");
    Ok(incidents)
}
