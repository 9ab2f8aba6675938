use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

use tracing::debug;
use unifft_hal::{
    api::{AnyPlan, PlanInfos},
    error::{FftError, Result},
    layouts::Desc,
};
use utils::Map;

struct Slot {
    plan: Arc<dyn AnyPlan>,
    last_used: u64,
}

/// Least-recently-used store of built plans, keyed by their [`Desc`].
///
/// The cache never holds more than [`PlanCache::max_size`] plans: inserting
/// into a full cache first evicts the plan that was inserted or found the
/// longest ago. Plans are shared, so an evicted plan stays usable by anyone
/// still holding it.
pub struct PlanCache {
    slots: Map<Desc, Slot>,
    max_size: usize,
    clock: u64,
}

impl PlanCache {
    /// No bound on the number of plans.
    pub const UNBOUNDED: usize = usize::MAX;

    pub fn new() -> Self {
        Self {
            slots: Map::new(),
            max_size: Self::UNBOUNDED,
            clock: 0,
        }
    }

    pub fn with_max_size(max_size: usize) -> Result<Self> {
        let mut cache: PlanCache = PlanCache::new();
        cache.max_size = check_max_size(max_size)?;
        Ok(cache)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Changes the bound, evicting least recently used plans until it holds.
    pub fn set_max_size(&mut self, max_size: usize) -> Result<()> {
        self.max_size = check_max_size(max_size)?;
        while self.slots.len() > self.max_size {
            self.evict();
        }
        Ok(())
    }

    /// Stores `plan` under its descriptor as the most recently used entry.
    ///
    /// Returns the plan it replaces, if one was cached for an equal descriptor.
    pub fn insert(&mut self, plan: Arc<dyn AnyPlan>) -> Option<Arc<dyn AnyPlan>> {
        let desc: Desc = plan.desc().clone();
        let last_used: u64 = self.tick();

        if let Some(slot) = self.slots.get_mut(&desc) {
            slot.last_used = last_used;
            return Some(std::mem::replace(&mut slot.plan, plan));
        }

        if self.slots.len() >= self.max_size {
            self.evict();
        }
        self.slots.insert(desc, Slot { plan, last_used });
        None
    }

    /// Looks up a plan and marks it as the most recently used entry.
    pub fn find(&mut self, desc: &Desc) -> Option<Arc<dyn AnyPlan>> {
        let last_used: u64 = self.tick();
        let slot: &mut Slot = self.slots.get_mut(desc)?;
        slot.last_used = last_used;
        Some(slot.plan.clone())
    }

    /// Whether a plan is cached for `desc`, without touching its recency.
    pub fn contains(&self, desc: &Desc) -> bool {
        self.slots.contains_key(desc)
    }

    pub fn erase(&mut self, desc: &Desc) -> Option<Arc<dyn AnyPlan>> {
        self.slots.remove(desc).map(|slot| slot.plan)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Moves every plan of `other` into `self`, leaving `other` empty.
    ///
    /// Fails without touching either cache when the two sizes together exceed
    /// this cache's bound. Moved plans keep their relative recency and become
    /// more recent than the plans already held.
    pub fn merge(&mut self, other: &mut PlanCache) -> Result<()> {
        if self.len().saturating_add(other.len()) > self.max_size {
            return Err(FftError::Cache(format!(
                "merging {} plans into {} would exceed the limit of {}",
                other.len(),
                self.len(),
                self.max_size
            )));
        }

        let mut incoming: Vec<(Desc, Slot)> = other.slots.drain().collect();
        incoming.sort_by_key(|(_, slot)| slot.last_used);
        for (_, slot) in incoming {
            self.insert(slot.plan);
        }
        Ok(())
    }

    /// Cached descriptors, most recently used first.
    pub fn descs(&self) -> Vec<&Desc> {
        let mut entries: Vec<(&Desc, u64)> = self.slots.iter().map(|(desc, slot)| (desc, slot.last_used)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.into_iter().map(|(desc, _)| desc).collect()
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict(&mut self) {
        let oldest: Option<Desc> = self
            .slots
            .iter()
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(desc, _)| desc.clone());
        if let Some(desc) = oldest {
            if let Some(slot) = self.slots.remove(&desc) {
                debug!(backend = %slot.plan.backend(), shape = ?desc.shape(), "evicted plan from cache");
            }
        }
    }
}

fn check_max_size(max_size: usize) -> Result<usize> {
    if max_size == 0 {
        return Err(FftError::Cache("maximum size must be greater than zero".into()));
    }
    Ok(max_size)
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for PlanCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let max_size: Option<usize> = (self.max_size != Self::UNBOUNDED).then_some(self.max_size);
        f.debug_struct("PlanCache")
            .field("len", &self.len())
            .field("max_size", &max_size)
            .finish()
    }
}
