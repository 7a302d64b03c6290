//! Lock-sharded concurrent map.
//!
//! Keys are routed to one of a fixed number of buckets by hash, and every
//! bucket has its own lock. Two operations only contend when their keys land
//! in the same bucket. The map backs both the relevance accumulator of
//! parallel ranking and the inverted index, whose per-word deletions are fanned
//! out across the worker pool on removal.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use parking_lot::{MappedRwLockWriteGuard, RwLock, RwLockWriteGuard};

type Shard<K, V> = RwLock<HashMap<K, V>>;

pub struct ShardedMap<K, V> {
    shards: Box<[Shard<K, V>]>,
    hasher: RandomState,
}

impl<K: Hash + Eq, V> ShardedMap<K, V> {
    /// A map with `shard_count` buckets (at least one).
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1)).map(|_| RwLock::new(HashMap::new())).collect();
        ShardedMap { shards, hasher: RandomState::new() }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard<Q>(&self, key: &Q) -> &Shard<K, V>
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        let index = (self.hasher.hash_one(key) % self.shards.len() as u64) as usize;
        &self.shards[index]
    }

    /// Exclusive access to the value under `key`, inserting the default first
    /// if it is missing. The bucket stays locked until the guard is dropped.
    pub fn access(&self, key: K) -> MappedRwLockWriteGuard<'_, V>
    where
        V: Default,
    {
        let shard = self.shard(&key);
        RwLockWriteGuard::map(shard.write(), |map| map.entry(key).or_default())
    }

    /// Runs `f` on the value under `key` with its bucket read-locked.
    pub fn read<Q, R>(&self, key: &Q, f: impl FnOnce(&V) -> R) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let shard = self.shard(key).read();
        shard.get(key).map(f)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.shard(key).read().contains_key(key)
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.shard(&key).write().insert(key, value)
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.shard(key).write().remove(key)
    }

    /// Runs `f` on the value under `key` and drops the entry when `f` returns
    /// false, all under one lock. Returns whether the key was present.
    pub fn retain_entry<Q>(&self, key: &Q, f: impl FnOnce(&mut V) -> bool) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut shard = self.shard(key).write();
        let Some(value) = shard.get_mut(key) else {
            return false;
        };
        if !f(value) {
            shard.remove(key);
        }
        true
    }

    /// Total entry count. Only exact while no other thread is writing.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    /// Visits every entry, one bucket at a time under its read lock.
    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        for shard in self.shards.iter() {
            for (key, value) in shard.read().iter() {
                f(key, value);
            }
        }
    }

    /// Ordered snapshot of all buckets.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        K: Ord + Clone,
        V: Clone,
    {
        let mut result = BTreeMap::new();
        self.for_each(|key, value| {
            result.insert(key.clone(), value.clone());
        });
        result
    }

    /// Drains all buckets into one ordered map.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V>
    where
        K: Ord,
    {
        self.shards
            .into_vec()
            .into_iter()
            .flat_map(|shard| shard.into_inner())
            .collect()
    }
}
