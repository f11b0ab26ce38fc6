//! Eval suites and their runs.

use tracing::debug;

use super::{chance, past_offset_minutes};
use crate::catalog::{EVAL_SUITE_NAMES, RUN_STATUSES};
use crate::context::{GenerationContext, IdPrefix};
use crate::error::GenerationError;
use crate::model::{EvalRun, EvalSuite, Project, SuiteStatus};

const SUITE_ACTIVE_PERCENT: u32 = 90;

/// Generates `suites_per_project` eval suites for every project.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyCatalog`] if the suite-name catalog is
/// empty.
pub fn generate_eval_suites(
    ctx: &mut GenerationContext,
    projects: &[Project],
    suites_per_project: usize,
) -> Result<Vec<EvalSuite>, GenerationError> {
    let mut suites = Vec::with_capacity(projects.len().saturating_mul(suites_per_project));
    for project in projects {
        for _ in 0..suites_per_project {
            let status = if chance(ctx.rng(), SUITE_ACTIVE_PERCENT) {
                SuiteStatus::Active
            } else {
                SuiteStatus::Disabled
            };
            suites.push(EvalSuite {
                id: ctx.next_id(IdPrefix::EvalSuite),
                project_id: project.id.clone(),
                name: EVAL_SUITE_NAMES.pick(ctx.rng())?.to_owned(),
                status,
            });
        }
    }

    debug!(count = suites.len(), "generated eval suites");
    Ok(suites)
}

/// Generates `runs_per_suite` runs for every suite, created within the last
/// five and a half days.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyCatalog`] if the run-status catalog is
/// empty, or [`GenerationError::TimestampOutOfRange`] if a creation time
/// cannot be represented.
pub fn generate_eval_runs(
    ctx: &mut GenerationContext,
    suites: &[EvalSuite],
    runs_per_suite: usize,
) -> Result<Vec<EvalRun>, GenerationError> {
    let mut runs = Vec::with_capacity(suites.len().saturating_mul(runs_per_suite));
    for suite in suites {
        for _ in 0..runs_per_suite {
            let age = past_offset_minutes(ctx.rng(), 5, 0..=720);
            let created_at = ctx.minutes_ago(age)?;
            runs.push(EvalRun {
                id: ctx.next_id(IdPrefix::EvalRun),
                suite_id: suite.id.clone(),
                status: RUN_STATUSES.pick(ctx.rng())?,
                created_at,
            });
        }
    }

    debug!(count = runs.len(), "generated eval runs");
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use rstest::rstest;

    use super::*;
    use crate::generator::tests::{context, reference_time};
    use crate::generator::{generate_orgs, generate_projects};

    #[rstest]
    fn suites_and_runs_chain_to_projects(mut context: GenerationContext) {
        let orgs = generate_orgs(&mut context, 2).expect("orgs");
        let projects = generate_projects(&mut context, &orgs, 2).expect("projects");
        let suites = generate_eval_suites(&mut context, &projects, 2).expect("suites");
        let runs = generate_eval_runs(&mut context, &suites, 3).expect("runs");

        assert_eq!(suites.len(), 8);
        assert_eq!(runs.len(), 24);
        for suite in &suites {
            assert!(projects.iter().any(|p| p.id == suite.project_id));
            assert_eq!(runs.iter().filter(|r| r.suite_id == suite.id).count(), 3);
        }
        let ids: Vec<_> = runs.iter().take(2).map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["er_1", "er_2"]);
    }

    #[rstest]
    fn runs_are_created_in_the_recent_past(mut context: GenerationContext) {
        let orgs = generate_orgs(&mut context, 1).expect("orgs");
        let projects = generate_projects(&mut context, &orgs, 1).expect("projects");
        let suites = generate_eval_suites(&mut context, &projects, 1).expect("suites");
        let runs = generate_eval_runs(&mut context, &suites, 50).expect("runs");

        let now = reference_time();
        let oldest = TimeDelta::days(5) + TimeDelta::minutes(720);
        for run in &runs {
            let age = now - run.created_at.as_datetime();
            assert!(age >= TimeDelta::zero() && age <= oldest, "age {age}");
        }
    }

    #[rstest]
    fn no_projects_means_no_suites(mut context: GenerationContext) {
        let suites = generate_eval_suites(&mut context, &[], 4).expect("suites");
        assert!(suites.is_empty());
    }
}
