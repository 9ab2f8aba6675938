use std::sync::Arc;

use tracing::{debug, warn};
use unifft_hal::{
    api::AnyPlan,
    error::{FftError, Result},
    layouts::{BackendId, BackendParameters, Context, Desc, Feedback, SelectStrategy, TargetParameters, TransformParameters},
};

use crate::{PlanCache, Registry};

/// Builds a plan with the first engine of [`Registry::default`] that accepts it.
pub fn make_plan(ctx: &Context, transform: &TransformParameters, target: &TargetParameters) -> Result<Arc<dyn AnyPlan>> {
    make_plan_with(&Registry::default(), ctx, transform, target)
}

pub fn make_plan_with(
    registry: &Registry,
    ctx: &Context,
    transform: &TransformParameters,
    target: &TargetParameters,
) -> Result<Arc<dyn AnyPlan>> {
    let desc: Desc = Desc::new(ctx, transform, target)?;
    plan_for_desc(registry, ctx, &desc)
}

/// Walks the descriptor's backend candidates and returns the first plan built.
///
/// Candidates are the requested order filtered by the mask, followed by the
/// remaining mask members. Unregistered candidates and refusals are recorded
/// as [`Feedback`]; when no candidate succeeds the feedback is returned in
/// [`FftError::PlanCreation`].
pub fn plan_for_desc(registry: &Registry, ctx: &Context, desc: &Desc) -> Result<Arc<dyn AnyPlan>> {
    let params: &BackendParameters = desc.backend_parameters();
    let candidates: Vec<BackendId> = params.candidates();

    if params.strategy == SelectStrategy::Best {
        warn!(?candidates, "best backend selection is not implemented");
        return Err(FftError::PlanCreation(
            candidates
                .into_iter()
                .map(|backend| Feedback {
                    backend,
                    message: "best selection strategy is not implemented".into(),
                })
                .collect(),
        ));
    }

    let mut feedback: Vec<Feedback> = Vec::with_capacity(candidates.len());
    for backend in candidates {
        let Some(factory) = registry.get(backend) else {
            debug!(%backend, "backend not registered");
            feedback.push(Feedback {
                backend,
                message: "backend is not registered".into(),
            });
            continue;
        };

        match factory(ctx, desc) {
            Ok(plan) => {
                debug!(%backend, refused = feedback.len(), "backend selected");
                return Ok(plan);
            }
            Err(err) => {
                debug!(%backend, %err, "backend refused plan");
                feedback.push(Feedback {
                    backend,
                    message: err.to_string(),
                });
            }
        }
    }

    warn!(mode = %desc.execution_mode(), attempts = feedback.len(), "no backend could build the plan");
    Err(FftError::PlanCreation(feedback))
}

/// Returns the cached plan for the descriptor, building and caching it on a miss.
pub fn make_plan_cached(
    cache: &mut PlanCache,
    registry: &Registry,
    ctx: &Context,
    transform: &TransformParameters,
    target: &TargetParameters,
) -> Result<Arc<dyn AnyPlan>> {
    let desc: Desc = Desc::new(ctx, transform, target)?;
    if let Some(plan) = cache.find(&desc) {
        return Ok(plan);
    }
    let plan: Arc<dyn AnyPlan> = plan_for_desc(registry, ctx, &desc)?;
    cache.insert(plan.clone());
    Ok(plan)
}
