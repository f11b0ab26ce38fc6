//! Organizations, their users and projects, and the access records that
//! span them.

use std::collections::BTreeSet;

use fake::Fake;
use fake::faker::company::raw::CompanyName;
use fake::locales::EN;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use super::{chance, group_by, members};
use crate::catalog::{FEATURE_FLAG_KEYS, FIRST_NAMES, ORG_NAMES, PLANS, PROJECT_NAMES, SCOPES};
use crate::context::{GenerationContext, IdPrefix};
use crate::error::GenerationError;
use crate::model::{FeatureFlag, Org, Permission, Project, Role, User, Visibility};
use crate::sampling::{MAX_RESAMPLE_ATTEMPTS, Sampled, sample_excluding, select_subset};
use crate::slug::domain_slug;

const ORG_ACTIVE_PERCENT: u32 = 97;
const MEMBER_PERCENT: u32 = 80;
const USER_ACTIVE_PERCENT: u32 = 98;
const PRIVATE_PROJECT_PERCENT: u32 = 75;
const PROJECT_ACTIVE_PERCENT: u32 = 95;
const MIN_SCOPES: usize = 1;
const MAX_SCOPES: usize = 3;
const FLAG_TARGETS_ORG_PERCENT: u32 = 40;
const FLAG_ENABLED_PERCENT: u32 = 60;

/// Generates `count` organizations.
///
/// Names come from the shuffled name catalog; once it is exhausted further
/// names are synthesized company names.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyCatalog`] if the plan catalog is empty.
pub fn generate_orgs(
    ctx: &mut GenerationContext,
    count: usize,
) -> Result<Vec<Org>, GenerationError> {
    let mut names = ORG_NAMES.entries().to_vec();
    names.shuffle(ctx.rng());

    let mut orgs = Vec::with_capacity(count);
    for index in 0..count {
        let name = match names.get(index) {
            Some(name) => (*name).to_owned(),
            None => CompanyName(EN).fake_with_rng(ctx.rng()),
        };
        orgs.push(Org {
            id: ctx.next_id(IdPrefix::Org),
            name,
            plan: PLANS.pick(ctx.rng())?,
            active: chance(ctx.rng(), ORG_ACTIVE_PERCENT),
        });
    }

    debug!(count = orgs.len(), "generated orgs");
    Ok(orgs)
}

/// Generates `users_per_org` users for every organization.
///
/// The first user of each organization is its admin. First names cycle
/// through a pool shuffled once per run; the email local part appends a
/// run-wide running index so addresses stay unique.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyCatalog`] if the first-name catalog is
/// empty and at least one user is requested.
pub fn generate_users(
    ctx: &mut GenerationContext,
    orgs: &[Org],
    users_per_org: usize,
) -> Result<Vec<User>, GenerationError> {
    let mut name_pool = FIRST_NAMES.entries().to_vec();
    name_pool.shuffle(ctx.rng());
    let mut names = name_pool.iter().cycle().zip(1_usize..);

    let mut users = Vec::with_capacity(orgs.len().saturating_mul(users_per_org));
    for org in orgs {
        let domain = domain_slug(&org.name);
        for position in 0..users_per_org {
            let id = ctx.next_id(IdPrefix::User);
            let (first, running_index) = names.next().ok_or(GenerationError::EmptyCatalog {
                catalog: FIRST_NAMES.name(),
            })?;
            let role = if position == 0 {
                Role::Admin
            } else if chance(ctx.rng(), MEMBER_PERCENT) {
                Role::Member
            } else {
                Role::Viewer
            };
            users.push(User {
                id,
                org_id: org.id.clone(),
                email: format!("{}{running_index}@{domain}.com", first.to_lowercase()),
                name: (*first).to_owned(),
                role,
                active: chance(ctx.rng(), USER_ACTIVE_PERCENT),
            });
        }
    }

    debug!(count = users.len(), "generated users");
    Ok(users)
}

/// Generates `projects_per_org` projects for every organization.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyCatalog`] if the project-name catalog is
/// empty.
pub fn generate_projects(
    ctx: &mut GenerationContext,
    orgs: &[Org],
    projects_per_org: usize,
) -> Result<Vec<Project>, GenerationError> {
    let mut projects = Vec::with_capacity(orgs.len().saturating_mul(projects_per_org));
    for org in orgs {
        for _ in 0..projects_per_org {
            let visibility = if chance(ctx.rng(), PRIVATE_PROJECT_PERCENT) {
                Visibility::Private
            } else {
                Visibility::Public
            };
            projects.push(Project {
                id: ctx.next_id(IdPrefix::Project),
                org_id: org.id.clone(),
                name: PROJECT_NAMES.pick(ctx.rng())?.to_owned(),
                visibility,
                active: chance(ctx.rng(), PROJECT_ACTIVE_PERCENT),
            });
        }
    }

    debug!(count = projects.len(), "generated projects");
    Ok(projects)
}

/// Grants each user up to `permissions_per_user` project bindings within
/// their organization.
///
/// A user never receives more bindings than their organization has
/// projects. Bindings avoid repeating a project for the same user on a
/// best-effort basis; after the retry budget a repeat is accepted. Each
/// binding carries one to three distinct scopes.
///
/// # Errors
///
/// This generator draws only from in-memory collections and currently
/// always succeeds; the `Result` keeps its signature aligned with the
/// other generators.
pub fn generate_permissions(
    ctx: &mut GenerationContext,
    projects: &[Project],
    users: &[User],
    permissions_per_user: usize,
) -> Result<Vec<Permission>, GenerationError> {
    let projects_by_org = group_by(projects, |project| project.org_id.as_str());

    let mut permissions = Vec::new();
    for user in users {
        let available = members(&projects_by_org, &user.org_id);
        let mut chosen = BTreeSet::new();
        for _ in 0..permissions_per_user.min(available.len()) {
            let Some(sampled) = sample_excluding(
                ctx.rng(),
                available,
                &chosen,
                |project| project.id.as_str(),
                MAX_RESAMPLE_ATTEMPTS,
            ) else {
                break;
            };
            if let Sampled::Duplicate(project) = sampled {
                trace!(
                    user_id = %user.id,
                    project_id = %project.id,
                    "accepted duplicate permission binding"
                );
            }
            let project = sampled.into_inner();
            chosen.insert(project.id.as_str());

            permissions.push(Permission {
                user_id: user.id.clone(),
                project_id: project.id.clone(),
                scopes: select_subset(ctx.rng(), SCOPES.entries(), MIN_SCOPES, MAX_SCOPES),
            });
        }
    }

    debug!(count = permissions.len(), "generated permissions");
    Ok(permissions)
}

/// Generates `count` feature flags, each targeted at a random subset of
/// organizations.
///
/// Keys are taken from the flag catalog in order, then synthesized as
/// `custom.flag_<n>` with `n` the one-based flag position.
///
/// # Errors
///
/// This generator currently always succeeds.
pub fn generate_feature_flags(
    ctx: &mut GenerationContext,
    orgs: &[Org],
    count: usize,
) -> Result<Vec<FeatureFlag>, GenerationError> {
    let mut flags = Vec::with_capacity(count);
    for index in 0..count {
        let key = FEATURE_FLAG_KEYS.entries().get(index).map_or_else(
            || format!("custom.flag_{}", index.saturating_add(1)),
            |key| (*key).to_owned(),
        );
        let enabled_for_orgs = orgs
            .iter()
            .filter(|_| chance(ctx.rng(), FLAG_TARGETS_ORG_PERCENT))
            .map(|org| org.id.clone())
            .collect();
        flags.push(FeatureFlag {
            key,
            enabled_for_orgs,
            enabled: chance(ctx.rng(), FLAG_ENABLED_PERCENT),
        });
    }

    debug!(count = flags.len(), "generated feature flags");
    Ok(flags)
}
