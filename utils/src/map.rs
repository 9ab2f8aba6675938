use std::hash::Hash;

use fnv::FnvHashMap;

/// FNV-hashed map, used for capability tables, the engine registry and the
/// plan cache.
#[derive(Clone, Debug)]
pub struct Map<K, V>(pub FnvHashMap<K, V>);

impl<K: Eq + Hash, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> Map<K, V> {
    pub fn new() -> Self {
        Self(FnvHashMap::<K, V>::default())
    }

    pub fn insert(&mut self, k: K, data: V) -> Option<V> {
        self.0.insert(k, data)
    }

    pub fn get(&self, k: &K) -> Option<&V> {
        self.0.get(k)
    }

    pub fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        self.0.get_mut(k)
    }

    pub fn remove(&mut self, k: &K) -> Option<V> {
        self.0.remove(k)
    }

    pub fn contains_key(&self, k: &K) -> bool {
        self.0.contains_key(k)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (K, V)> + '_ {
        self.0.drain()
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::Map;

    #[test]
    fn insert_get_remove() {
        let mut map: Map<u8, &str> = Map::new();
        assert!(map.is_empty());
        assert_eq!(map.insert(1, "one"), None);
        assert_eq!(map.insert(1, "uno"), Some("one"));
        assert_eq!(map.get(&1), Some(&"uno"));
        if let Some(v) = map.get_mut(&1) {
            *v = "eins";
        }
        assert_eq!(map.get(&1), Some(&"eins"));
        assert!(map.contains_key(&1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove(&1), Some("eins"));
        assert!(map.get(&1).is_none());
    }

    #[test]
    fn collect_from_pairs() {
        let mut map: Map<u8, u8> = [(1, 2), (3, 4)].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&3), Some(&4));
        let mut drained: Vec<(u8, u8)> = map.clone().drain().collect();
        drained.sort();
        assert_eq!(drained, vec![(1, 2), (3, 4)]);
        map.clear();
        assert!(map.is_empty());
    }
}
