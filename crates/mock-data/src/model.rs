//! Generated entity records and the assembled snapshot.
//!
//! Records are plain values created once during a run and never mutated
//! afterwards. Field names serialize in `snake_case` so the JSON document
//! mirrors the relational column names consumers expect.

use std::num::NonZeroU32;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::context::offset_minutes;
use crate::error::{GenerationError, OutputError};

/// A whole-second UTC instant serialized as ISO 8601 with an explicit offset,
/// for example `2026-03-14T09:26:53+00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub(crate) const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Returns the underlying instant.
    #[must_use]
    pub const fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, false))
    }
}

/// Billing plan of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Free tier.
    Free,
    /// Paid tier.
    Pro,
    /// Contracted tier.
    Enterprise,
}

/// An organization (tenant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Org {
    /// `org_<n>` identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Billing plan.
    pub plan: Plan,
    /// Whether the organization is active.
    pub active: bool,
}

/// Role of a user within their organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Organization administrator; exactly one per organization.
    Admin,
    /// Regular member.
    Member,
    /// Read-only user.
    Viewer,
}

/// A user belonging to one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// `usr_<n>` identifier.
    pub id: String,
    /// Owning organization.
    pub org_id: String,
    /// Email address on the organization's domain.
    pub email: String,
    /// First name.
    pub name: String,
    /// Role within the organization.
    pub role: Role,
    /// Whether the account is active.
    pub active: bool,
}

/// Project visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to organization members only.
    Private,
    /// Publicly visible.
    Public,
}

/// A project owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    /// `prj_<n>` identifier.
    pub id: String,
    /// Owning organization.
    pub org_id: String,
    /// Project name.
    pub name: String,
    /// Visibility setting.
    pub visibility: Visibility,
    /// Whether the project is active.
    pub active: bool,
}

/// A dashboard inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// `db_<n>` identifier.
    pub id: String,
    /// Owning project.
    pub project_id: String,
    /// Dashboard name.
    pub name: String,
    /// Owner drawn from the project's organization, if it has users.
    pub owner_user_id: Option<String>,
    /// Whether the dashboard is active.
    pub active: bool,
}

/// Lifecycle state of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    /// Collecting samples.
    Active,
    /// No longer collected.
    Archived,
}

/// A metric tracked for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    /// `m_<n>` identifier.
    pub id: String,
    /// Owning project.
    pub project_id: String,
    /// Metric name, unique within the project on a best-effort basis.
    pub name: String,
    /// Retention window in days.
    pub retention_days: u32,
    /// Lifecycle state.
    pub status: MetricStatus,
}

/// One daily aggregate of a metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricSample {
    /// Sampled metric.
    pub metric_id: String,
    /// Calendar day of the aggregate.
    pub date: NaiveDate,
    /// Aggregated count for the day.
    pub count: u32,
}

/// Visualization kind of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    /// Line chart over time.
    Timeseries,
    /// Single value.
    Stat,
    /// Tabular view.
    Table,
    /// Bar chart.
    Bar,
}

/// Deployment environment filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production.
    Prod,
    /// Staging.
    Staging,
    /// Development.
    Dev,
}

/// Region filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    /// `us-east`.
    UsEast,
    /// `us-west`.
    UsWest,
    /// `eu-west`.
    EuWest,
    /// `ap-south`.
    ApSouth,
}

/// Filters applied to a widget's query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetFilters {
    /// Environment the widget is scoped to.
    pub env: Environment,
    /// Regions the widget is scoped to.
    pub region: Vec<Region>,
}

/// A widget placed on a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Widget {
    /// `w_<n>` identifier.
    pub id: String,
    /// Owning dashboard.
    pub dashboard_id: String,
    /// Visualization kind.
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    /// Metric from the dashboard's project, if that project has metrics.
    pub metric_id: Option<String>,
    /// Widget title.
    pub title: String,
    /// Query filters.
    pub filters: WidgetFilters,
    /// Whether the widget is shown.
    pub visible: bool,
    /// Whether the widget is archived.
    pub archived: bool,
}

/// Evaluation window of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertWindow {
    /// One minute.
    #[serde(rename = "1m")]
    OneMinute,
    /// Five minutes.
    #[serde(rename = "5m")]
    FiveMinutes,
    /// Fifteen minutes.
    #[serde(rename = "15m")]
    FifteenMinutes,
    /// One hour.
    #[serde(rename = "1h")]
    OneHour,
}

/// An alert rule defined on a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// `al_<n>` identifier.
    pub id: String,
    /// Owning project.
    pub project_id: String,
    /// Alert name.
    pub name: String,
    /// Watched metric from the same project, if the project has metrics.
    pub metric_id: Option<String>,
    /// Firing threshold.
    pub threshold: u32,
    /// Evaluation window.
    pub window: AlertWindow,
    /// Whether the rule is enabled.
    pub enabled: bool,
    /// Last time the alert fired, if ever.
    pub last_fired_at: Option<Timestamp>,
}

/// Incident state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    /// Still open.
    Open,
    /// Resolved; `resolved_at` is set.
    Resolved,
}

/// An incident raised by an alert.
///
/// Status and resolution time are set together by [`Incident::open`] and
/// [`Incident::resolved`]; a resolved incident always closes strictly after
/// it opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Incident {
    id: String,
    alert_id: String,
    status: IncidentStatus,
    opened_at: Timestamp,
    resolved_at: Option<Timestamp>,
}

impl Incident {
    /// Creates an open incident.
    #[must_use]
    pub fn open(id: String, alert_id: String, opened_at: Timestamp) -> Self {
        Self {
            id,
            alert_id,
            status: IncidentStatus::Open,
            opened_at,
            resolved_at: None,
        }
    }

    /// Creates an incident resolved `minutes_to_resolve` after it opened.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::TimestampOutOfRange`] if the resolution
    /// time is not representable.
    pub fn resolved(
        id: String,
        alert_id: String,
        opened_at: Timestamp,
        minutes_to_resolve: NonZeroU32,
    ) -> Result<Self, GenerationError> {
        let resolved_at = offset_minutes(
            opened_at.as_datetime(),
            i64::from(minutes_to_resolve.get()),
        )?;
        Ok(Self {
            id,
            alert_id,
            status: IncidentStatus::Resolved,
            opened_at,
            resolved_at: Some(Timestamp::new(resolved_at)),
        })
    }

    /// Returns the `inc_<n>` identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the alert that raised the incident.
    #[must_use]
    pub fn alert_id(&self) -> &str {
        &self.alert_id
    }

    /// Returns the incident state.
    #[must_use]
    pub const fn status(&self) -> IncidentStatus {
        self.status
    }

    /// Returns when the incident opened.
    #[must_use]
    pub const fn opened_at(&self) -> Timestamp {
        self.opened_at
    }

    /// Returns when the incident was resolved, if it was.
    #[must_use]
    pub const fn resolved_at(&self) -> Option<Timestamp> {
        self.resolved_at
    }
}

/// Whether an eval suite is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiteStatus {
    /// Runs are scheduled.
    Active,
    /// Runs are paused.
    Disabled,
}

/// A test/eval suite attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvalSuite {
    /// `es_<n>` identifier.
    pub id: String,
    /// Owning project.
    pub project_id: String,
    /// Suite name.
    pub name: String,
    /// Scheduling state.
    pub status: SuiteStatus,
}

/// Outcome state of an eval run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Waiting for a worker.
    Queued,
    /// In progress.
    Running,
    /// Completed successfully.
    Passed,
    /// Completed with failures.
    Failed,
}

/// One execution of an eval suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvalRun {
    /// `er_<n>` identifier.
    pub id: String,
    /// Executed suite.
    pub suite_id: String,
    /// Outcome state.
    pub status: RunStatus,
    /// When the run was created.
    pub created_at: Timestamp,
}

/// Permission scope granted on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Scope {
    /// Read access.
    #[serde(rename = "viewer")]
    Viewer,
    /// Edit dashboards.
    #[serde(rename = "dashboard:write")]
    DashboardWrite,
    /// Edit alerts.
    #[serde(rename = "alert:write")]
    AlertWrite,
    /// Edit metrics.
    #[serde(rename = "metric:write")]
    MetricWrite,
    /// Administer the project.
    #[serde(rename = "project:admin")]
    ProjectAdmin,
}

/// Scopes granted to a user on a project of their organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Permission {
    /// Grantee.
    pub user_id: String,
    /// Project in the grantee's organization.
    pub project_id: String,
    /// Distinct granted scopes.
    pub scopes: Vec<Scope>,
}

/// A feature flag with per-organization targeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureFlag {
    /// Flag key.
    pub key: String,
    /// Organizations the flag is targeted at.
    pub enabled_for_orgs: Vec<String>,
    /// Global switch.
    pub enabled: bool,
}

/// Kind of record an audit log entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// A project.
    Project,
    /// A dashboard.
    Dashboard,
    /// A widget.
    Widget,
    /// An alert.
    Alert,
}

/// An audit trail entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditLog {
    /// `aud_<n>` identifier.
    pub id: String,
    /// Organization of the actor, or the first organization without one.
    pub org_id: Option<String>,
    /// Acting user, if any users exist.
    pub actor_user_id: Option<String>,
    /// Dotted action name such as `widget.updated`.
    pub action: String,
    /// Kind of the target record, if any targets exist.
    pub target_type: Option<TargetType>,
    /// Target record, if any targets exist.
    pub target_id: Option<String>,
    /// When the action happened.
    pub at: Timestamp,
}

/// The complete generated snapshot, one field per collection.
///
/// Serializes to a JSON object whose keys are the collection names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MockDatabase {
    /// Organizations.
    pub orgs: Vec<Org>,
    /// Users.
    pub users: Vec<User>,
    /// Projects.
    pub projects: Vec<Project>,
    /// Project permissions.
    pub permissions: Vec<Permission>,
    /// Feature flags.
    pub feature_flags: Vec<FeatureFlag>,
    /// Dashboards.
    pub dashboards: Vec<Dashboard>,
    /// Widgets.
    pub widgets: Vec<Widget>,
    /// Metrics.
    pub metrics: Vec<Metric>,
    /// Daily metric samples.
    pub metric_samples: Vec<MetricSample>,
    /// Alerts.
    pub alerts: Vec<Alert>,
    /// Incidents.
    pub incidents: Vec<Incident>,
    /// Eval suites.
    pub eval_suites: Vec<EvalSuite>,
    /// Eval runs.
    pub eval_runs: Vec<EvalRun>,
    /// Audit log entries.
    pub audit_logs: Vec<AuditLog>,
}

impl MockDatabase {
    /// Returns `(collection name, record count)` pairs in output order.
    #[must_use]
    pub fn summary(&self) -> [(&'static str, usize); 14] {
        [
            ("orgs", self.orgs.len()),
            ("users", self.users.len()),
            ("projects", self.projects.len()),
            ("permissions", self.permissions.len()),
            ("feature_flags", self.feature_flags.len()),
            ("dashboards", self.dashboards.len()),
            ("widgets", self.widgets.len()),
            ("metrics", self.metrics.len()),
            ("metric_samples", self.metric_samples.len()),
            ("alerts", self.alerts.len()),
            ("incidents", self.incidents.len()),
            ("eval_suites", self.eval_suites.len()),
            ("eval_runs", self.eval_runs.len()),
            ("audit_logs", self.audit_logs.len()),
        ]
    }

    /// Encodes the snapshot as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::EncodeError`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, OutputError> {
        serde_json::to_string_pretty(self).map_err(|e| OutputError::EncodeError {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn opened_at() -> Timestamp {
        Timestamp::new(
            Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
                .single()
                .expect("valid fixture timestamp"),
        )
    }

    #[rstest]
    fn timestamp_serializes_with_explicit_offset(opened_at: Timestamp) {
        let encoded = serde_json::to_string(&opened_at).expect("serialize");
        assert_eq!(encoded, "\"2026-03-14T09:26:53+00:00\"");
    }

    #[rstest]
    fn open_incident_has_no_resolution(opened_at: Timestamp) {
        let incident = Incident::open("inc_1".to_owned(), "al_1".to_owned(), opened_at);

        assert_eq!(incident.status(), IncidentStatus::Open);
        assert_eq!(incident.resolved_at(), None);
    }

    #[rstest]
    fn resolved_incident_closes_after_opening(opened_at: Timestamp) {
        let minutes = NonZeroU32::new(5).expect("non-zero");
        let incident = Incident::resolved("inc_1".to_owned(), "al_1".to_owned(), opened_at, minutes)
            .expect("in range");

        assert_eq!(incident.status(), IncidentStatus::Resolved);
        let resolved_at = incident.resolved_at().expect("resolved");
        assert!(resolved_at > incident.opened_at());
    }

    #[rstest]
    fn incident_serializes_flat(opened_at: Timestamp) {
        let incident = Incident::open("inc_4".to_owned(), "al_2".to_owned(), opened_at);
        let value = serde_json::to_value(&incident).expect("serialize");

        assert_eq!(
            value,
            json!({
                "id": "inc_4",
                "alert_id": "al_2",
                "status": "open",
                "opened_at": "2026-03-14T09:26:53+00:00",
                "resolved_at": null
            })
        );
    }

    #[test]
    fn widget_serializes_type_and_filters() {
        let widget = Widget {
            id: "w_1".to_owned(),
            dashboard_id: "db_1".to_owned(),
            widget_type: WidgetType::Timeseries,
            metric_id: None,
            title: "Traffic".to_owned(),
            filters: WidgetFilters {
                env: Environment::Staging,
                region: vec![Region::EuWest],
            },
            visible: true,
            archived: false,
        };
        let value = serde_json::to_value(&widget).expect("serialize");

        assert_eq!(value["type"], "timeseries");
        assert_eq!(value["metric_id"], serde_json::Value::Null);
        assert_eq!(value["filters"], json!({"env": "staging", "region": ["eu-west"]}));
    }

    #[rstest]
    #[case(Scope::Viewer, "\"viewer\"")]
    #[case(Scope::DashboardWrite, "\"dashboard:write\"")]
    #[case(Scope::ProjectAdmin, "\"project:admin\"")]
    fn scopes_serialize_with_colon_names(#[case] scope: Scope, #[case] expected: &str) {
        assert_eq!(serde_json::to_string(&scope).expect("serialize"), expected);
    }

    #[test]
    fn alert_windows_serialize_as_durations() {
        let encoded = serde_json::to_string(&[
            AlertWindow::OneMinute,
            AlertWindow::FiveMinutes,
            AlertWindow::FifteenMinutes,
            AlertWindow::OneHour,
        ])
        .expect("serialize");
        assert_eq!(encoded, r#"["1m","5m","15m","1h"]"#);
    }

    #[test]
    fn empty_database_serializes_every_collection_key() {
        let db = MockDatabase {
            orgs: vec![],
            users: vec![],
            projects: vec![],
            permissions: vec![],
            feature_flags: vec![],
            dashboards: vec![],
            widgets: vec![],
            metrics: vec![],
            metric_samples: vec![],
            alerts: vec![],
            incidents: vec![],
            eval_suites: vec![],
            eval_runs: vec![],
            audit_logs: vec![],
        };
        let value = serde_json::to_value(&db).expect("serialize");
        let keys: Vec<_> = value
            .as_object()
            .expect("object")
            .keys()
            .cloned()
            .collect();

        let expected: Vec<_> = db.summary().iter().map(|(name, _)| (*name).to_owned()).collect();
        let mut sorted_expected = expected.clone();
        sorted_expected.sort();
        let mut sorted_keys = keys;
        sorted_keys.sort();
        assert_eq!(sorted_keys, sorted_expected);
        assert!(db.summary().iter().all(|(_, count)| *count == 0));
    }
}
