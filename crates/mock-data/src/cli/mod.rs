//! Command-line surface for generating a snapshot file.
//!
//! The binary delegates to [`resolve`] and [`run`] so argument handling and
//! preset layering can be exercised in tests without spawning a process.
//! Every flag falls back to a `MOCK_DATA_*` environment variable.

mod error;

use std::path::PathBuf;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::{Args, Parser};
use mockable::Clock;

pub use self::error::CliError;
use crate::atomic_io::write_snapshot;
use crate::clock::FixedClock;
use crate::config::{GenerationConfig, RawCounts};
use crate::generator::generate;
use crate::registry::PresetRegistry;

/// Seed used when neither a flag nor a preset supplies one.
pub const DEFAULT_SEED: u64 = 42;

/// `mock-data-generate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mock-data-generate",
    about = "Generate a mock JSON database with consistent relationships",
    version
)]
pub struct CliArgs {
    /// Output JSON path.
    #[arg(long, value_name = "path", env = "MOCK_DATA_OUT", default_value = "mock_db.json")]
    pub out: Utf8PathBuf,
    /// Random seed for reproducibility (default 42, or the preset's seed).
    #[arg(long, value_name = "seed", env = "MOCK_DATA_SEED")]
    pub seed: Option<u64>,
    /// Preset registry JSON file.
    #[arg(long, value_name = "path", env = "MOCK_DATA_REGISTRY", requires = "preset")]
    pub registry: Option<PathBuf>,
    /// Preset to load from the registry; explicit count flags override it.
    #[arg(long, value_name = "name", env = "MOCK_DATA_PRESET", requires = "registry")]
    pub preset: Option<String>,
    /// Pin "now" to an RFC 3339 instant instead of reading the system clock.
    #[arg(
        long = "reference-time",
        value_name = "rfc3339",
        env = "MOCK_DATA_REFERENCE_TIME",
        value_parser = parse_reference_time
    )]
    pub reference_time: Option<DateTime<Utc>>,
    /// Emit logs as JSON lines.
    #[arg(long = "log-json", env = "MOCK_DATA_LOG_JSON")]
    pub log_json: bool,
    /// Collection counts.
    #[command(flatten)]
    pub counts: CountArgs,
}

/// Count flags. Values are signed so negative input is reported as a
/// configuration error instead of a parse failure.
#[derive(Debug, Clone, Default, Args)]
pub struct CountArgs {
    /// Organizations.
    #[arg(long, env = "MOCK_DATA_ORGS", allow_negative_numbers = true)]
    pub orgs: Option<i64>,
    /// Users per organization.
    #[arg(long, env = "MOCK_DATA_USERS_PER_ORG", allow_negative_numbers = true)]
    pub users_per_org: Option<i64>,
    /// Projects per organization.
    #[arg(long, env = "MOCK_DATA_PROJECTS_PER_ORG", allow_negative_numbers = true)]
    pub projects_per_org: Option<i64>,
    /// Dashboards per project.
    #[arg(long, env = "MOCK_DATA_DASHBOARDS_PER_PROJECT", allow_negative_numbers = true)]
    pub dashboards_per_project: Option<i64>,
    /// Widgets per dashboard.
    #[arg(long, env = "MOCK_DATA_WIDGETS_PER_DASHBOARD", allow_negative_numbers = true)]
    pub widgets_per_dashboard: Option<i64>,
    /// Metrics per project.
    #[arg(long, env = "MOCK_DATA_METRICS_PER_PROJECT", allow_negative_numbers = true)]
    pub metrics_per_project: Option<i64>,
    /// Daily samples per metric.
    #[arg(long, env = "MOCK_DATA_SAMPLES_PER_METRIC", allow_negative_numbers = true)]
    pub samples_per_metric: Option<i64>,
    /// Alerts per project.
    #[arg(long, env = "MOCK_DATA_ALERTS_PER_PROJECT", allow_negative_numbers = true)]
    pub alerts_per_project: Option<i64>,
    /// Incidents per alert.
    #[arg(long, env = "MOCK_DATA_INCIDENTS_PER_ALERT", allow_negative_numbers = true)]
    pub incidents_per_alert: Option<i64>,
    /// Eval suites per project.
    #[arg(long, env = "MOCK_DATA_SUITES_PER_PROJECT", allow_negative_numbers = true)]
    pub suites_per_project: Option<i64>,
    /// Eval runs per suite.
    #[arg(long, env = "MOCK_DATA_RUNS_PER_SUITE", allow_negative_numbers = true)]
    pub runs_per_suite: Option<i64>,
    /// Project permissions per user.
    #[arg(long, env = "MOCK_DATA_PERMISSIONS_PER_USER", allow_negative_numbers = true)]
    pub permissions_per_user: Option<i64>,
    /// Feature flags in total.
    #[arg(long, env = "MOCK_DATA_FEATURE_FLAGS", allow_negative_numbers = true)]
    pub feature_flags: Option<i64>,
    /// Audit log entries in total.
    #[arg(long, env = "MOCK_DATA_AUDIT_LOGS", allow_negative_numbers = true)]
    pub audit_logs: Option<i64>,
}

impl From<&CountArgs> for RawCounts {
    fn from(args: &CountArgs) -> Self {
        Self {
            orgs: args.orgs,
            users_per_org: args.users_per_org,
            projects_per_org: args.projects_per_org,
            dashboards_per_project: args.dashboards_per_project,
            widgets_per_dashboard: args.widgets_per_dashboard,
            metrics_per_project: args.metrics_per_project,
            samples_per_metric: args.samples_per_metric,
            alerts_per_project: args.alerts_per_project,
            incidents_per_alert: args.incidents_per_alert,
            suites_per_project: args.suites_per_project,
            runs_per_suite: args.runs_per_suite,
            permissions_per_user: args.permissions_per_user,
            feature_flags: args.feature_flags,
            audit_logs: args.audit_logs,
        }
    }
}

/// Fully resolved inputs of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    /// RNG seed.
    pub seed: u64,
    /// Validated collection counts.
    pub config: GenerationConfig,
    /// Pinned reference instant, if any.
    pub reference_time: Option<DateTime<Utc>>,
    /// Output JSON path.
    pub out: Utf8PathBuf,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Path the snapshot was written to.
    pub out: Utf8PathBuf,
    /// Seed the snapshot was generated from.
    pub seed: u64,
    /// Record count per collection, in output order.
    pub summary: [(&'static str, usize); 14],
}

/// Layers explicit flags over the selected preset and the defaults.
///
/// # Errors
///
/// Returns [`CliError`] when the registry cannot be loaded, the preset is
/// unknown, or the resulting counts are invalid.
///
/// # Example
///
/// ```
/// use clap::Parser;
/// use mock_data::cli::{CliArgs, resolve};
///
/// let args = CliArgs::try_parse_from(["mock-data-generate", "--orgs", "5"]).expect("parse");
/// let plan = resolve(&args).expect("resolve");
///
/// assert_eq!(plan.seed, 42);
/// assert_eq!(plan.config.orgs, 5);
/// assert_eq!(plan.config.users_per_org, 3);
/// ```
pub fn resolve(args: &CliArgs) -> Result<RunPlan, CliError> {
    let (base_seed, base_config) = match (&args.registry, &args.preset) {
        (Some(path), Some(name)) => {
            let registry = PresetRegistry::from_file(path)?;
            let preset = registry.find_preset(name)?;
            (preset.seed(), *preset.config())
        }
        _ => (DEFAULT_SEED, GenerationConfig::default()),
    };
    let config = RawCounts::from(&args.counts).resolve(base_config)?;

    Ok(RunPlan {
        seed: args.seed.unwrap_or(base_seed),
        config,
        reference_time: args.reference_time,
        out: args.out.clone(),
    })
}

/// Resolves the arguments, generates a snapshot and writes it atomically.
///
/// `clock` supplies "now" unless `--reference-time` pins it.
///
/// # Errors
///
/// Returns [`CliError`] when resolution, generation or the write fails.
pub fn run(args: &CliArgs, clock: &dyn Clock) -> Result<RunReport, CliError> {
    let plan = resolve(args)?;

    let pinned;
    let effective_clock: &dyn Clock = match plan.reference_time {
        Some(instant) => {
            pinned = FixedClock::new(instant);
            &pinned
        }
        None => clock,
    };

    let db = generate(plan.seed, &plan.config, effective_clock)?;
    write_snapshot(&plan.out, &db)?;

    Ok(RunReport {
        out: plan.out,
        seed: plan.seed,
        summary: db.summary(),
    })
}

fn parse_reference_time(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|error| format!("invalid RFC 3339 timestamp '{raw}': {error}"))
}
