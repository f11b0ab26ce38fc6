//! Explicit generation state: seeded randomness, identifier counters and the
//! pinned reference instant.
//!
//! Every generator receives the same [`GenerationContext`] by mutable
//! reference. Nothing in the crate reads ambient randomness or the wall clock
//! during a run, so two contexts built from the same seed and reference
//! instant drive identical output.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, SubsecRound, TimeDelta, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::model::Timestamp;

/// Identifier namespaces, one per entity collection that carries an `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdPrefix {
    /// Organizations (`org_<n>`).
    Org,
    /// Users (`usr_<n>`).
    User,
    /// Projects (`prj_<n>`).
    Project,
    /// Dashboards (`db_<n>`).
    Dashboard,
    /// Metrics (`m_<n>`).
    Metric,
    /// Widgets (`w_<n>`).
    Widget,
    /// Alerts (`al_<n>`).
    Alert,
    /// Incidents (`inc_<n>`).
    Incident,
    /// Eval suites (`es_<n>`).
    EvalSuite,
    /// Eval runs (`er_<n>`).
    EvalRun,
    /// Audit log entries (`aud_<n>`).
    AuditLog,
}

impl IdPrefix {
    /// Every prefix, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Org,
        Self::User,
        Self::Project,
        Self::Dashboard,
        Self::Metric,
        Self::Widget,
        Self::Alert,
        Self::Incident,
        Self::EvalSuite,
        Self::EvalRun,
        Self::AuditLog,
    ];

    /// Returns the textual prefix written before the underscore.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Org => "org",
            Self::User => "usr",
            Self::Project => "prj",
            Self::Dashboard => "db",
            Self::Metric => "m",
            Self::Widget => "w",
            Self::Alert => "al",
            Self::Incident => "inc",
            Self::EvalSuite => "es",
            Self::EvalRun => "er",
            Self::AuditLog => "aud",
        }
    }
}

impl fmt::Display for IdPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issues `<prefix>_<n>` identifiers with an independent counter per prefix.
///
/// Counters start at 1 and advance by exactly one per issuance, so a value is
/// never reused for a prefix within one factory's lifetime.
///
/// # Example
///
/// ```
/// use mock_data::{IdFactory, IdPrefix};
///
/// let mut ids = IdFactory::default();
/// assert_eq!(ids.next(IdPrefix::Org), "org_1");
/// assert_eq!(ids.next(IdPrefix::User), "usr_1");
/// assert_eq!(ids.next(IdPrefix::Org), "org_2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdFactory {
    counters: BTreeMap<IdPrefix, u64>,
}

impl IdFactory {
    /// Issues the next identifier for `prefix`.
    pub fn next(&mut self, prefix: IdPrefix) -> String {
        let counter = self.counters.entry(prefix).or_insert(0);
        *counter += 1;
        format!("{prefix}_{counter}")
    }

    /// Returns how many identifiers have been issued for `prefix`.
    #[must_use]
    pub fn issued(&self, prefix: IdPrefix) -> u64 {
        self.counters.get(&prefix).copied().unwrap_or(0)
    }
}

/// State threaded through every generator during a single run.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use mock_data::{GenerationContext, IdPrefix};
///
/// let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).single().expect("valid");
/// let mut ctx = GenerationContext::new(42, now);
///
/// assert_eq!(ctx.next_id(IdPrefix::Alert), "al_1");
/// assert_eq!(ctx.reference_time(), now);
/// ```
#[derive(Debug, Clone)]
pub struct GenerationContext {
    rng: ChaCha8Rng,
    ids: IdFactory,
    reference_time: DateTime<Utc>,
}

impl GenerationContext {
    /// Seeds a fresh context.
    ///
    /// The reference instant is truncated to whole seconds so every derived
    /// timestamp carries second precision.
    #[must_use]
    pub fn new(seed: u64, reference_time: DateTime<Utc>) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            ids: IdFactory::default(),
            reference_time: reference_time.trunc_subsecs(0),
        }
    }

    /// Returns the shared random stream.
    pub const fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Issues the next identifier for `prefix`.
    pub fn next_id(&mut self, prefix: IdPrefix) -> String {
        self.ids.next(prefix)
    }

    /// Returns the identifier factory for inspection.
    #[must_use]
    pub const fn ids(&self) -> &IdFactory {
        &self.ids
    }

    /// Returns the pinned "now" of this run.
    #[must_use]
    pub const fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }

    /// Returns the calendar date of the reference instant.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.reference_time.date_naive()
    }

    /// Returns the reference instant moved back by `minutes`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::TimestampOutOfRange`] when the result is not
    /// representable.
    pub fn minutes_ago(&self, minutes: i64) -> Result<Timestamp, GenerationError> {
        offset_minutes(self.reference_time, minutes.saturating_neg()).map(Timestamp::new)
    }
}

/// Adds a signed number of minutes to `instant`.
pub(crate) fn offset_minutes(
    instant: DateTime<Utc>,
    minutes: i64,
) -> Result<DateTime<Utc>, GenerationError> {
    TimeDelta::try_minutes(minutes)
        .and_then(|delta| instant.checked_add_signed(delta))
        .ok_or(GenerationError::TimestampOutOfRange { minutes })
}
