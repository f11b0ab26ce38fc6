//! Deterministic relational mock data for a multi-tenant observability
//! product.
//!
//! The crate builds a self-consistent snapshot of fourteen related
//! collections (organizations, users, projects, dashboards, widgets,
//! metrics, alerts, incidents, eval suites and more) from a single RNG seed,
//! a set of collection counts and one reference instant. Every foreign key
//! points at an existing record, and scoped references never cross their
//! owning organization or project.
//!
//! # Overview
//!
//! - [`GenerationConfig`] holds the collection counts; [`RawCounts`] accepts
//!   untrusted signed input and rejects negatives.
//! - [`generate`] assembles a [`MockDatabase`] in dependency order.
//! - [`PresetRegistry`] loads named seed and count presets from JSON.
//! - [`write_snapshot`] writes the snapshot atomically as indented JSON.
//! - [`cli`] wires all of the above into the `mock-data-generate` binary.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use mock_data::{FixedClock, GenerationConfig, generate};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).single().expect("valid"));
//! let config = GenerationConfig {
//!     orgs: 1,
//!     ..GenerationConfig::default()
//! };
//!
//! let db = generate(42, &config, &clock).expect("generation succeeds");
//!
//! assert_eq!(db.orgs.len(), 1);
//! assert_eq!(db.users.len(), 3);
//! assert!(db.users.iter().all(|user| user.org_id == db.orgs[0].id));
//! ```

mod atomic_io;
mod catalog;
pub mod cli;
mod clock;
mod config;
mod context;
mod error;
mod generator;
mod model;
mod registry;
mod sampling;
mod slug;

pub use atomic_io::write_snapshot;
pub use clock::FixedClock;
pub use config::{GenerationConfig, PlannedSizes, RawCounts};
pub use context::{GenerationContext, IdFactory, IdPrefix};
pub use error::{ConfigError, GenerationError, OutputError, RegistryError};
pub use generator::{
    AuditSources, generate, generate_alerts, generate_audit_logs, generate_dashboards,
    generate_eval_runs, generate_eval_suites, generate_feature_flags, generate_incidents,
    generate_metric_samples, generate_metrics, generate_orgs, generate_permissions,
    generate_projects, generate_users, generate_widgets,
};
pub use model::{
    Alert, AlertWindow, AuditLog, Dashboard, Environment, EvalRun, EvalSuite, FeatureFlag,
    Incident, IncidentStatus, Metric, MetricSample, MetricStatus, MockDatabase, Org, Permission,
    Plan, Project, Region, Role, RunStatus, Scope, SuiteStatus, TargetType, Timestamp, User,
    Visibility, Widget, WidgetFilters, WidgetType,
};
pub use registry::{Preset, PresetRegistry};
pub use sampling::{MAX_RESAMPLE_ATTEMPTS, Sampled, sample_excluding};
pub use slug::domain_slug;
