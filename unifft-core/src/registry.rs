use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

use unifft_backend::{FftRef, FftRustFft};
use unifft_hal::{
    api::{AnyPlan, PlanNew},
    error::Result,
    layouts::{Backend, BackendId, Context, Desc, Plan},
};
use utils::Map;

/// Builds a backend-erased plan for a validated descriptor.
pub type PlanFactory = fn(&Context, &Desc) -> Result<Arc<dyn AnyPlan>>;

/// Factory of the engine `B`.
pub fn factory<B>() -> PlanFactory
where
    B: Backend,
    Plan<B>: PlanNew<B> + AnyPlan,
{
    build::<B>
}

fn build<B>(ctx: &Context, desc: &Desc) -> Result<Arc<dyn AnyPlan>>
where
    B: Backend,
    Plan<B>: PlanNew<B> + AnyPlan,
{
    let plan: Plan<B> = Plan::<B>::new(ctx, desc.clone())?;
    Ok(Arc::new(plan))
}

/// Engines [`make_plan_with`](crate::make_plan_with) may pick from.
///
/// At most one factory is held per [`BackendId`]; registering an id again
/// replaces the previous factory.
#[derive(Clone)]
pub struct Registry {
    factories: Map<BackendId, PlanFactory>,
}

impl Registry {
    /// Registry without any engine.
    pub fn empty() -> Self {
        Self { factories: Map::new() }
    }

    /// Registers `B` under [`Backend::ID`].
    pub fn register<B>(&mut self) -> &mut Self
    where
        B: Backend,
        Plan<B>: PlanNew<B> + AnyPlan,
    {
        self.register_factory(B::ID, factory::<B>())
    }

    pub fn register_factory(&mut self, id: BackendId, factory: PlanFactory) -> &mut Self {
        self.factories.insert(id, factory);
        self
    }

    pub fn with<B>(mut self) -> Self
    where
        B: Backend,
        Plan<B>: PlanNew<B> + AnyPlan,
    {
        self.register::<B>();
        self
    }

    pub fn unregister(&mut self, id: BackendId) -> Option<PlanFactory> {
        self.factories.remove(&id)
    }

    pub fn get(&self, id: BackendId) -> Option<PlanFactory> {
        self.factories.get(&id).copied()
    }

    pub fn contains(&self, id: BackendId) -> bool {
        self.factories.contains_key(&id)
    }

    /// Registered ids in [`BackendId`] declaration order.
    pub fn ids(&self) -> Vec<BackendId> {
        let mut ids: Vec<BackendId> = self.factories.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for Registry {
    /// The in-process engines: `reference` and `rustfft`.
    fn default() -> Self {
        Registry::empty().with::<FftRef>().with::<FftRustFft>()
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("backends", &self.ids()).finish()
    }
}

#[cfg(test)]
mod tests {
    use unifft_backend::FftRef;
    use unifft_hal::layouts::BackendId;

    use super::Registry;

    #[test]
    fn default_holds_in_process_engines() {
        let registry: Registry = Registry::default();
        assert_eq!(registry.ids(), vec![BackendId::Reference, BackendId::RustFft]);
        assert!(registry.get(BackendId::Mkl).is_none());
    }

    #[test]
    fn register_and_unregister() {
        let mut registry: Registry = Registry::empty();
        assert!(registry.ids().is_empty());
        registry.register::<FftRef>();
        assert!(registry.contains(BackendId::Reference));
        assert!(registry.unregister(BackendId::Reference).is_some());
        assert!(!registry.contains(BackendId::Reference));
        assert!(registry.unregister(BackendId::Reference).is_none());
    }
}
