//! Bounded fitness cache keyed by the bit pattern of the decision vector.

use std::collections::{HashMap, VecDeque};

/// First-in first-out fitness cache.
///
/// Keys are the raw bit patterns of the decision vector, so `0.0` and
/// `-0.0` are distinct entries and only bit-identical vectors hit.
#[derive(Debug, Clone)]
pub(crate) struct FitnessCache {
    capacity: usize,
    entries: HashMap<Vec<u64>, Vec<f64>>,
    order: VecDeque<Vec<u64>>,
    hits: u64,
}

impl FitnessCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::with_capacity(capacity.max(1)),
            order: VecDeque::with_capacity(capacity.max(1)),
            hits: 0,
        }
    }

    fn key(x: &[f64]) -> Vec<u64> {
        x.iter().map(|v| v.to_bits()).collect()
    }

    /// Looks up `x`, counting a hit when found.
    pub(crate) fn get(&mut self, x: &[f64]) -> Option<Vec<f64>> {
        let found = self.entries.get(&Self::key(x)).cloned();
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    pub(crate) fn insert(&mut self, x: &[f64], f: &[f64]) {
        let key = Self::key(x);
        if self.entries.contains_key(&key) {
            return;
        }
        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, f.to_vec());
    }

    pub(crate) fn hits(&self) -> u64 {
        self.hits
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_and_miss() {
        let mut cache = FitnessCache::new(4);
        assert!(cache.get(&[1.0, 2.0]).is_none());
        cache.insert(&[1.0, 2.0], &[3.0]);
        assert_eq!(cache.get(&[1.0, 2.0]), Some(vec![3.0]));
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_eviction_is_fifo() {
        let mut cache = FitnessCache::new(2);
        cache.insert(&[1.0], &[1.0]);
        cache.insert(&[2.0], &[2.0]);
        cache.insert(&[3.0], &[3.0]);
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&[1.0]).is_none());
        assert!(cache.get(&[2.0]).is_some());
        assert!(cache.get(&[3.0]).is_some());
    }

    #[test]
    fn test_signed_zero_is_distinct() {
        let mut cache = FitnessCache::new(2);
        cache.insert(&[0.0], &[1.0]);
        assert!(cache.get(&[-0.0]).is_none());
    }
}
