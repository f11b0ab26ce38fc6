//! Audit trail entries referencing the rest of the graph.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::catalog::{AUDIT_ACTIONS, audit_actions_for};
use crate::context::{GenerationContext, IdPrefix};
use crate::error::GenerationError;
use crate::model::{Alert, AuditLog, Dashboard, Org, Project, TargetType, User, Widget};

/// Largest age of an audit entry, in minutes.
const MAX_AUDIT_AGE_MINUTES: i64 = 10_000;

/// Collections an audit entry may reference.
#[derive(Debug, Clone, Copy)]
pub struct AuditSources<'a> {
    /// Organizations; the first one owns actor-less entries.
    pub orgs: &'a [Org],
    /// Candidate actors.
    pub users: &'a [User],
    /// Candidate project targets.
    pub projects: &'a [Project],
    /// Candidate dashboard targets.
    pub dashboards: &'a [Dashboard],
    /// Candidate widget targets.
    pub widgets: &'a [Widget],
    /// Candidate alert targets.
    pub alerts: &'a [Alert],
}

impl<'a> AuditSources<'a> {
    fn targets(&self) -> Vec<(TargetType, &'a str)> {
        let projects = self.projects.iter().map(|p| (TargetType::Project, p.id.as_str()));
        let dashboards = self
            .dashboards
            .iter()
            .map(|d| (TargetType::Dashboard, d.id.as_str()));
        let widgets = self.widgets.iter().map(|w| (TargetType::Widget, w.id.as_str()));
        let alerts = self.alerts.iter().map(|a| (TargetType::Alert, a.id.as_str()));
        projects.chain(dashboards).chain(widgets).chain(alerts).collect()
    }
}

/// Generates `count` audit entries.
///
/// Actor and target are drawn uniformly from the sources; the action matches
/// the target's kind. The entry's organization is the actor's, falling back
/// to the first organization when there are no users.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyCatalog`] if an action catalog is empty,
/// or [`GenerationError::TimestampOutOfRange`] if a time cannot be
/// represented.
pub fn generate_audit_logs(
    ctx: &mut GenerationContext,
    sources: AuditSources<'_>,
    count: usize,
) -> Result<Vec<AuditLog>, GenerationError> {
    let targets = sources.targets();

    let mut logs = Vec::with_capacity(count);
    for _ in 0..count {
        let actor = sources.users.choose(ctx.rng());
        let target = targets.choose(ctx.rng()).copied();
        let action = match target {
            Some((kind, _)) => audit_actions_for(kind).pick(ctx.rng())?,
            None => AUDIT_ACTIONS.pick(ctx.rng())?,
        };
        let age = ctx.rng().random_range(0..=MAX_AUDIT_AGE_MINUTES);
        let at = ctx.minutes_ago(age)?;
        let org_id = actor
            .map(|user| user.org_id.clone())
            .or_else(|| sources.orgs.first().map(|org| org.id.clone()));

        logs.push(AuditLog {
            id: ctx.next_id(IdPrefix::AuditLog),
            org_id,
            actor_user_id: actor.map(|user| user.id.clone()),
            action: action.to_owned(),
            target_type: target.map(|(kind, _)| kind),
            target_id: target.map(|(_, id)| id.to_owned()),
            at,
        });
    }

    debug!(count = logs.len(), "generated audit logs");
    Ok(logs)
}
