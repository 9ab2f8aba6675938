use std::sync::Arc;

use proptest::prelude::*;
use unifft_backend::FftRef;
use unifft_core::PlanCache;
use unifft_hal::{
    api::{AnyPlan, PlanNew},
    error::FftError,
    layouts::{Context, Desc, DftType, Plan, TargetParameters, TransformParameters},
};

fn desc(n: usize) -> Desc {
    let transform: TransformParameters = TransformParameters::dft(&[n], &[0], DftType::C2C);
    Desc::new(&Context::new(), &transform, &TargetParameters::cpu()).unwrap()
}

fn plan(n: usize) -> Arc<dyn AnyPlan> {
    Arc::new(Plan::<FftRef>::new(&Context::new(), desc(n)).unwrap())
}

fn extents(cache: &PlanCache) -> Vec<usize> {
    cache.descs().iter().map(|d| d.shape()[0]).collect()
}

#[test]
fn least_recently_used_is_evicted() {
    let mut cache: PlanCache = PlanCache::with_max_size(2).unwrap();
    assert!(cache.insert(plan(2)).is_none());
    assert!(cache.insert(plan(3)).is_none());
    assert!(cache.find(&desc(2)).is_some());

    cache.insert(plan(4));
    assert_eq!(cache.len(), 2);
    assert!(!cache.contains(&desc(3)));
    assert_eq!(extents(&cache), vec![4, 2]);
    assert!(cache.find(&desc(3)).is_none());
}

#[test]
fn equal_descriptor_replaces_and_promotes() {
    let mut cache: PlanCache = PlanCache::with_max_size(2).unwrap();
    cache.insert(plan(2));
    cache.insert(plan(3));
    assert!(cache.insert(plan(2)).is_some());
    assert_eq!(cache.len(), 2);
    assert_eq!(extents(&cache), vec![2, 3]);
}

#[test]
fn shrinking_evicts_oldest() {
    let mut cache: PlanCache = PlanCache::new();
    assert_eq!(cache.max_size(), PlanCache::UNBOUNDED);
    for n in 2..6 {
        cache.insert(plan(n));
    }
    cache.set_max_size(1).unwrap();
    assert_eq!(extents(&cache), vec![5]);

    assert!(matches!(cache.set_max_size(0).unwrap_err(), FftError::Cache(_)));
    assert_eq!(cache.max_size(), 1);
    assert!(matches!(PlanCache::with_max_size(0).unwrap_err(), FftError::Cache(_)));
}

#[test]
fn erase_and_clear() {
    let mut cache: PlanCache = PlanCache::default();
    cache.insert(plan(2));
    cache.insert(plan(3));
    assert!(cache.erase(&desc(2)).is_some());
    assert!(cache.erase(&desc(2)).is_none());
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn merge_respects_capacity() {
    let mut cache: PlanCache = PlanCache::with_max_size(3).unwrap();
    cache.insert(plan(2));
    cache.insert(plan(3));

    let mut other: PlanCache = PlanCache::new();
    other.insert(plan(4));
    other.insert(plan(5));
    assert!(matches!(cache.merge(&mut other).unwrap_err(), FftError::Cache(_)));
    assert_eq!(cache.len(), 2);
    assert_eq!(other.len(), 2);

    other.erase(&desc(5));
    cache.merge(&mut other).unwrap();
    assert!(other.is_empty());
    assert_eq!(extents(&cache), vec![4, 3, 2]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bound_holds_and_latest_survives(max_size in 1usize..4, ops in prop::collection::vec(1usize..8, 1..24)) {
        let mut cache: PlanCache = PlanCache::with_max_size(max_size).unwrap();
        for &n in &ops {
            cache.insert(plan(n));
            prop_assert!(cache.len() <= max_size);
            prop_assert!(cache.contains(&desc(n)));
            prop_assert_eq!(cache.descs()[0].shape()[0], n);
        }
    }
}
