//! Static reference tables sampled during generation.
//!
//! Tables are wrapped in [`Catalog`] so a draw from an empty table surfaces
//! as a typed error instead of a panic.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::GenerationError;
use crate::model::{
    AlertWindow, Environment, MetricStatus, Plan, Region, RunStatus, Scope, TargetType,
    WidgetType,
};

/// A named, immutable reference table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Catalog<T: 'static> {
    name: &'static str,
    entries: &'static [T],
}

impl<T: Copy> Catalog<T> {
    pub(crate) const fn new(name: &'static str, entries: &'static [T]) -> Self {
        Self { name, entries }
    }

    pub(crate) const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) const fn entries(&self) -> &'static [T] {
        self.entries
    }

    /// Draws one entry uniformly.
    pub(crate) fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<T, GenerationError> {
        self.entries
            .choose(rng)
            .copied()
            .ok_or(GenerationError::EmptyCatalog { catalog: self.name })
    }
}

/// First names for generated users; shuffled once per run.
pub(crate) const FIRST_NAMES: Catalog<&str> = Catalog::new(
    "first_names",
    &[
        "Alex", "Jordan", "Taylor", "Casey", "Riley", "Morgan", "Sam", "Jamie", "Cameron",
        "Avery", "Drew", "Quinn", "Reese", "Rowan", "Skyler", "Parker", "Elliot", "Hayden",
        "Emerson", "Blake", "Logan", "Harper", "Finley", "Sage", "Remy", "Dakota", "Tatum",
        "Emery", "Kendall", "Robin",
    ],
);

/// Organization names used before falling back to synthesized company names.
pub(crate) const ORG_NAMES: Catalog<&str> = Catalog::new(
    "org_names",
    &[
        "Acme Inc",
        "Globex",
        "Initech",
        "Umbrella",
        "Hooli",
        "Stark Industries",
        "Wayne Enterprises",
        "Wonka Labs",
        "Aperture Science",
        "Cyberdyne Systems",
        "Tyrell Corp",
        "Vehement Capital",
        "Gekko & Co",
        "Massive Dynamic",
        "Soylent Works",
        "Monarch Solutions",
        "Octan Energy",
    ],
);

pub(crate) const PLANS: Catalog<Plan> =
    Catalog::new("plans", &[Plan::Free, Plan::Pro, Plan::Enterprise]);

pub(crate) const PROJECT_NAMES: Catalog<&str> = Catalog::new(
    "project_names",
    &[
        "Checkout",
        "Billing",
        "Growth",
        "Data Platform",
        "Observability",
        "Mobile App",
        "Web Revamp",
        "Fraud Engine",
        "ML Platform",
        "Realtime Chat",
        "Reporting",
        "Docs",
        "API Gateway",
        "Auth",
    ],
);

pub(crate) const DASHBOARD_NAMES: Catalog<&str> = Catalog::new(
    "dashboard_names",
    &[
        "Ops Overview",
        "Product KPIs",
        "Oncall",
        "SRE Board",
        "Release Readiness",
    ],
);

/// A metric template: name, retention and lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MetricDefinition {
    pub(crate) name: &'static str,
    pub(crate) retention_days: u32,
    pub(crate) status: MetricStatus,
}

const fn active_metric(name: &'static str, retention_days: u32) -> MetricDefinition {
    MetricDefinition {
        name,
        retention_days,
        status: MetricStatus::Active,
    }
}

pub(crate) const METRICS: Catalog<MetricDefinition> = Catalog::new(
    "metrics",
    &[
        active_metric("http_latency_ms", 30),
        active_metric("error_rate_pct", 60),
        active_metric("requests_per_minute", 14),
        active_metric("cpu_usage_pct", 7),
        active_metric("memory_usage_mb", 30),
        active_metric("db_conn_pool_busy_pct", 30),
    ],
);

pub(crate) const WIDGET_TYPES: Catalog<WidgetType> = Catalog::new(
    "widget_types",
    &[
        WidgetType::Timeseries,
        WidgetType::Stat,
        WidgetType::Table,
        WidgetType::Bar,
    ],
);

pub(crate) const WIDGET_TITLES: Catalog<&str> = Catalog::new(
    "widget_titles",
    &[
        "Latency P95",
        "Error rate",
        "Traffic",
        "CPU usage",
        "Memory usage",
        "DB pool busy",
    ],
);

pub(crate) const ENVIRONMENTS: Catalog<Environment> = Catalog::new(
    "environments",
    &[Environment::Prod, Environment::Staging, Environment::Dev],
);

pub(crate) const REGIONS: Catalog<Region> = Catalog::new(
    "regions",
    &[
        Region::UsEast,
        Region::UsWest,
        Region::EuWest,
        Region::ApSouth,
    ],
);

pub(crate) const ALERT_NAMES: Catalog<&str> = Catalog::new(
    "alert_names",
    &[
        "High latency",
        "Error rate spike",
        "High CPU",
        "High memory",
        "RPM drop",
    ],
);

pub(crate) const ALERT_WINDOWS: Catalog<AlertWindow> = Catalog::new(
    "alert_windows",
    &[
        AlertWindow::OneMinute,
        AlertWindow::FiveMinutes,
        AlertWindow::FifteenMinutes,
        AlertWindow::OneHour,
    ],
);

pub(crate) const EVAL_SUITE_NAMES: Catalog<&str> = Catalog::new(
    "eval_suite_names",
    &[
        "Bot Regression",
        "Smoke Suite",
        "Latency Suite",
        "Alert Rules QA",
    ],
);

pub(crate) const RUN_STATUSES: Catalog<RunStatus> = Catalog::new(
    "run_statuses",
    &[
        RunStatus::Queued,
        RunStatus::Running,
        RunStatus::Passed,
        RunStatus::Failed,
    ],
);

pub(crate) const SCOPES: Catalog<Scope> = Catalog::new(
    "scopes",
    &[
        Scope::Viewer,
        Scope::DashboardWrite,
        Scope::AlertWrite,
        Scope::MetricWrite,
        Scope::ProjectAdmin,
    ],
);

/// Feature flag keys issued before synthesized `custom.flag_<n>` keys.
pub(crate) const FEATURE_FLAG_KEYS: Catalog<&str> = Catalog::new(
    "feature_flag_keys",
    &[
        "widgets.grid_v2",
        "dashboards.public_share",
        "alerts.auto_mute",
        "metrics.rollup_v3",
        "projects.bulk_edit",
        "rbac.granular",
        "eval.live_compare",
        "ui.dark_mode",
        "api.tokens_v2",
    ],
);

/// Every audit action, used when no target exists.
pub(crate) const AUDIT_ACTIONS: Catalog<&str> = Catalog::new(
    "audit_actions",
    &[
        "project.created",
        "project.archived",
        "dashboard.created",
        "dashboard.renamed",
        "widget.created",
        "widget.updated",
        "widget.deleted",
        "alert.created",
        "alert.updated",
        "alert.triggered",
    ],
);

/// Audit actions applicable to one kind of target.
pub(crate) const fn audit_actions_for(target: TargetType) -> Catalog<&'static str> {
    match target {
        TargetType::Project => {
            Catalog::new("project_actions", &["project.created", "project.archived"])
        }
        TargetType::Dashboard => Catalog::new(
            "dashboard_actions",
            &["dashboard.created", "dashboard.renamed"],
        ),
        TargetType::Widget => Catalog::new(
            "widget_actions",
            &["widget.created", "widget.updated", "widget.deleted"],
        ),
        TargetType::Alert => Catalog::new(
            "alert_actions",
            &["alert.created", "alert.updated", "alert.triggered"],
        ),
    }
}
