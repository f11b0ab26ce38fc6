//! Entity generators and the graph assembler.
//!
//! Each `generate_*` function consumes its parent collections and threads
//! the shared [`GenerationContext`]. Cross references are drawn only from
//! candidates that share the parent's ancestor; when there is none the
//! reference is `None` rather than dangling.
//!
//! [`generate`] runs the generators in dependency order:
//! orgs, users, projects, dashboards, metrics, metric samples, widgets,
//! alerts, incidents, eval suites, eval runs, permissions, feature flags and
//! finally audit logs.

mod audit;
mod evaluation;
mod observability;
mod tenancy;

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use mockable::Clock;
use rand::Rng;
use tracing::{debug, info_span};

pub use audit::{AuditSources, generate_audit_logs};
pub use evaluation::{generate_eval_runs, generate_eval_suites};
pub use observability::{
    generate_alerts, generate_dashboards, generate_incidents, generate_metric_samples,
    generate_metrics, generate_widgets,
};
pub use tenancy::{
    generate_feature_flags, generate_orgs, generate_permissions, generate_projects,
    generate_users,
};

use crate::config::GenerationConfig;
use crate::context::GenerationContext;
use crate::error::GenerationError;
use crate::model::MockDatabase;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Generates a complete, referentially consistent snapshot.
///
/// The clock is read exactly once; every timestamp in the snapshot is an
/// offset from that instant truncated to whole seconds. The same seed,
/// configuration and instant always produce an identical snapshot.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidConfig`] when a planned collection size
/// overflows, or another [`GenerationError`] if a derived timestamp leaves
/// the representable range. No partial snapshot is returned.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use mock_data::{FixedClock, GenerationConfig, generate};
///
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("valid"));
/// let config = GenerationConfig::default();
///
/// let db = generate(42, &config, &clock).expect("generated");
/// assert_eq!(db.users.len(), 6);
/// assert_eq!(db, generate(42, &config, &clock).expect("generated"));
/// ```
pub fn generate(
    seed: u64,
    config: &GenerationConfig,
    clock: &dyn Clock,
) -> Result<MockDatabase, GenerationError> {
    let span = info_span!("generate", seed);
    let _entered = span.enter();

    let planned = config.validate()?;
    debug!(?planned, "validated configuration");

    let mut ctx = GenerationContext::new(seed, clock.utc());

    let orgs = generate_orgs(&mut ctx, config.orgs)?;
    let users = generate_users(&mut ctx, &orgs, config.users_per_org)?;
    let projects = generate_projects(&mut ctx, &orgs, config.projects_per_org)?;
    let dashboards =
        generate_dashboards(&mut ctx, &projects, &users, config.dashboards_per_project)?;
    let metrics = generate_metrics(&mut ctx, &projects, config.metrics_per_project)?;
    let metric_samples = generate_metric_samples(&mut ctx, &metrics, config.samples_per_metric)?;
    let widgets = generate_widgets(&mut ctx, &dashboards, &metrics, config.widgets_per_dashboard)?;
    let alerts = generate_alerts(&mut ctx, &projects, &metrics, config.alerts_per_project)?;
    let incidents = generate_incidents(&mut ctx, &alerts, config.incidents_per_alert)?;
    let eval_suites = generate_eval_suites(&mut ctx, &projects, config.suites_per_project)?;
    let eval_runs = generate_eval_runs(&mut ctx, &eval_suites, config.runs_per_suite)?;
    let permissions =
        generate_permissions(&mut ctx, &projects, &users, config.permissions_per_user)?;
    let feature_flags = generate_feature_flags(&mut ctx, &orgs, config.feature_flags)?;
    let audit_logs = generate_audit_logs(
        &mut ctx,
        AuditSources {
            orgs: &orgs,
            users: &users,
            projects: &projects,
            dashboards: &dashboards,
            widgets: &widgets,
            alerts: &alerts,
        },
        config.audit_logs,
    )?;

    Ok(MockDatabase {
        orgs,
        users,
        projects,
        permissions,
        feature_flags,
        dashboards,
        widgets,
        metrics,
        metric_samples,
        alerts,
        incidents,
        eval_suites,
        eval_runs,
        audit_logs,
    })
}

/// Returns `true` with probability `percent / 100`.
fn chance<R: Rng + ?Sized>(rng: &mut R, percent: u32) -> bool {
    rng.random_ratio(percent, 100)
}

/// Draws an age of up to `max_days` whole days plus a minute offset from
/// `minutes`, expressed in minutes.
fn past_offset_minutes<R: Rng + ?Sized>(
    rng: &mut R,
    max_days: i64,
    minutes: RangeInclusive<i64>,
) -> i64 {
    let days = rng.random_range(0..=max_days);
    days * MINUTES_PER_DAY + rng.random_range(minutes)
}

/// Groups `items` by a borrowed string key, preserving input order inside
/// each group.
fn group_by<'a, T, F>(items: &'a [T], key: F) -> BTreeMap<&'a str, Vec<&'a T>>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut groups: BTreeMap<&'a str, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

/// Returns the members of group `key`, or an empty slice.
fn members<'m, 'a, T>(groups: &'m BTreeMap<&'a str, Vec<&'a T>>, key: &str) -> &'m [&'a T] {
    groups.get(key).map(Vec::as_slice).unwrap_or_default()
}
