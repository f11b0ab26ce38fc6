//! Cardinality parameters for a generation run.
//!
//! [`GenerationConfig`] holds validated, non-negative counts. External
//! surfaces (CLI flags, preset files) speak [`RawCounts`], whose signed,
//! optional values are checked once when converted; a negative count is a
//! configuration error and is never clamped.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-collection cardinalities. Defaults match the documented CLI
/// defaults.
///
/// # Example
///
/// ```
/// use mock_data::GenerationConfig;
///
/// let config = GenerationConfig {
///     orgs: 1,
///     ..GenerationConfig::default()
/// };
/// assert_eq!(config.users_per_org, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Organizations (default 2).
    pub orgs: usize,
    /// Users per organization (default 3).
    pub users_per_org: usize,
    /// Projects per organization (default 2).
    pub projects_per_org: usize,
    /// Dashboards per project (default 1).
    pub dashboards_per_project: usize,
    /// Widgets per dashboard (default 2).
    pub widgets_per_dashboard: usize,
    /// Metrics per project (default 2).
    pub metrics_per_project: usize,
    /// Daily samples per metric (default 5).
    pub samples_per_metric: usize,
    /// Alerts per project (default 1).
    pub alerts_per_project: usize,
    /// Incidents per alert (default 1).
    pub incidents_per_alert: usize,
    /// Eval suites per project (default 1).
    pub suites_per_project: usize,
    /// Eval runs per suite (default 2).
    pub runs_per_suite: usize,
    /// Project permissions per user, capped by the org's projects (default 2).
    pub permissions_per_user: usize,
    /// Feature flags in total (default 3).
    pub feature_flags: usize,
    /// Audit log entries in total (default 10).
    pub audit_logs: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            orgs: 2,
            users_per_org: 3,
            projects_per_org: 2,
            dashboards_per_project: 1,
            widgets_per_dashboard: 2,
            metrics_per_project: 2,
            samples_per_metric: 5,
            alerts_per_project: 1,
            incidents_per_alert: 1,
            suites_per_project: 1,
            runs_per_suite: 2,
            permissions_per_user: 2,
            feature_flags: 3,
            audit_logs: 10,
        }
    }
}

/// Planned record counts of the fan-out collections.
///
/// `permissions` is an upper bound: a user is granted at most one binding
/// per project of their organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedSizes {
    /// Users across all organizations.
    pub users: usize,
    /// Projects across all organizations.
    pub projects: usize,
    /// Dashboards across all projects.
    pub dashboards: usize,
    /// Widgets across all dashboards.
    pub widgets: usize,
    /// Metrics across all projects.
    pub metrics: usize,
    /// Samples across all metrics.
    pub metric_samples: usize,
    /// Alerts across all projects.
    pub alerts: usize,
    /// Incidents across all alerts.
    pub incidents: usize,
    /// Eval suites across all projects.
    pub eval_suites: usize,
    /// Eval runs across all suites.
    pub eval_runs: usize,
    /// Upper bound on permission bindings.
    pub permissions: usize,
}

impl GenerationConfig {
    /// Checks that every planned collection size is representable and
    /// returns the sizes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CardinalityOverflow`] naming the first
    /// collection whose size overflows.
    pub fn validate(&self) -> Result<PlannedSizes, ConfigError> {
        let users = fan_out("users", self.orgs, self.users_per_org)?;
        let projects = fan_out("projects", self.orgs, self.projects_per_org)?;
        let dashboards = fan_out("dashboards", projects, self.dashboards_per_project)?;
        let widgets = fan_out("widgets", dashboards, self.widgets_per_dashboard)?;
        let metrics = fan_out("metrics", projects, self.metrics_per_project)?;
        let metric_samples = fan_out("metric_samples", metrics, self.samples_per_metric)?;
        let alerts = fan_out("alerts", projects, self.alerts_per_project)?;
        let incidents = fan_out("incidents", alerts, self.incidents_per_alert)?;
        let eval_suites = fan_out("eval_suites", projects, self.suites_per_project)?;
        let eval_runs = fan_out("eval_runs", eval_suites, self.runs_per_suite)?;
        let permissions = fan_out("permissions", users, self.permissions_per_user)?;

        Ok(PlannedSizes {
            users,
            projects,
            dashboards,
            widgets,
            metrics,
            metric_samples,
            alerts,
            incidents,
            eval_suites,
            eval_runs,
            permissions,
        })
    }
}

fn fan_out(collection: &'static str, parents: usize, per_parent: usize) -> Result<usize, ConfigError> {
    parents
        .checked_mul(per_parent)
        .ok_or(ConfigError::CardinalityOverflow { collection })
}

/// Unvalidated, optional counts as supplied by an external surface.
///
/// Unset fields fall back to a base configuration when resolved.
///
/// # Example
///
/// ```
/// use mock_data::{ConfigError, GenerationConfig, RawCounts};
///
/// let raw = RawCounts {
///     orgs: Some(-1),
///     ..RawCounts::default()
/// };
/// assert_eq!(
///     GenerationConfig::try_from(raw),
///     Err(ConfigError::NegativeCount { parameter: "orgs", value: -1 })
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawCounts {
    /// Organizations.
    pub orgs: Option<i64>,
    /// Users per organization.
    pub users_per_org: Option<i64>,
    /// Projects per organization.
    pub projects_per_org: Option<i64>,
    /// Dashboards per project.
    pub dashboards_per_project: Option<i64>,
    /// Widgets per dashboard.
    pub widgets_per_dashboard: Option<i64>,
    /// Metrics per project.
    pub metrics_per_project: Option<i64>,
    /// Daily samples per metric.
    pub samples_per_metric: Option<i64>,
    /// Alerts per project.
    pub alerts_per_project: Option<i64>,
    /// Incidents per alert.
    pub incidents_per_alert: Option<i64>,
    /// Eval suites per project.
    pub suites_per_project: Option<i64>,
    /// Eval runs per suite.
    pub runs_per_suite: Option<i64>,
    /// Project permissions per user.
    pub permissions_per_user: Option<i64>,
    /// Feature flags in total.
    pub feature_flags: Option<i64>,
    /// Audit log entries in total.
    pub audit_logs: Option<i64>,
}

impl RawCounts {
    /// Validates the set values, taking unset ones from `base`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeCount`] for the first negative value,
    /// or [`ConfigError::CardinalityOverflow`] when the resulting sizes
    /// overflow.
    pub fn resolve(self, base: GenerationConfig) -> Result<GenerationConfig, ConfigError> {
        let config = GenerationConfig {
            orgs: count("orgs", self.orgs, base.orgs)?,
            users_per_org: count("users_per_org", self.users_per_org, base.users_per_org)?,
            projects_per_org: count(
                "projects_per_org",
                self.projects_per_org,
                base.projects_per_org,
            )?,
            dashboards_per_project: count(
                "dashboards_per_project",
                self.dashboards_per_project,
                base.dashboards_per_project,
            )?,
            widgets_per_dashboard: count(
                "widgets_per_dashboard",
                self.widgets_per_dashboard,
                base.widgets_per_dashboard,
            )?,
            metrics_per_project: count(
                "metrics_per_project",
                self.metrics_per_project,
                base.metrics_per_project,
            )?,
            samples_per_metric: count(
                "samples_per_metric",
                self.samples_per_metric,
                base.samples_per_metric,
            )?,
            alerts_per_project: count(
                "alerts_per_project",
                self.alerts_per_project,
                base.alerts_per_project,
            )?,
            incidents_per_alert: count(
                "incidents_per_alert",
                self.incidents_per_alert,
                base.incidents_per_alert,
            )?,
            suites_per_project: count(
                "suites_per_project",
                self.suites_per_project,
                base.suites_per_project,
            )?,
            runs_per_suite: count("runs_per_suite", self.runs_per_suite, base.runs_per_suite)?,
            permissions_per_user: count(
                "permissions_per_user",
                self.permissions_per_user,
                base.permissions_per_user,
            )?,
            feature_flags: count("feature_flags", self.feature_flags, base.feature_flags)?,
            audit_logs: count("audit_logs", self.audit_logs, base.audit_logs)?,
        };
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<RawCounts> for GenerationConfig {
    type Error = ConfigError;

    fn try_from(raw: RawCounts) -> Result<Self, Self::Error> {
        raw.resolve(Self::default())
    }
}

fn count(parameter: &'static str, raw: Option<i64>, fallback: usize) -> Result<usize, ConfigError> {
    raw.map_or(Ok(fallback), |value| {
        usize::try_from(value).map_err(|_| ConfigError::NegativeCount { parameter, value })
    })
}
