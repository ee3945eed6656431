use std::iter::FusedIterator;

use collections::{DynamicArray, HashFunction, List, hash_function_1, linked_list};
use log::{debug, trace};

use crate::{
    CHAINING_MAX_LOAD, DEFAULT_CAPACITY, HashMapEngine,
    prime::{next_prime, prime_capacity},
};

/// Hash map with separate chaining: every bucket is a linked list of the
/// keys hashing to its index.
#[derive(Debug)]
pub struct ChainingMap<V> {
    buckets: DynamicArray<List<V>>,
    size: usize,
    hash_function: HashFunction,
}

impl<V> Default for ChainingMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, hash_function_1)
    }
}

impl<V> ChainingMap<V> {
    /// Creates a new map with the first prime at or above `capacity` buckets
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        Self::with_buckets(next_prime(capacity), hash_function)
    }

    fn with_buckets(capacity: usize, hash_function: HashFunction) -> Self {
        Self {
            buckets: DynamicArray::with_length(capacity, List::new),
            size: 0,
            hash_function,
        }
    }

    /// Iterates bucket by bucket, each chain head to tail
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            map: self,
            chain: self.buckets.get(0).ok().map(List::iter),
            bucket_idx: 0,
        }
    }

    // [private]

    fn idx(&self, key: &str) -> usize {
        (self.hash_function)(key) % self.buckets.length()
    }

    fn bucket(&self, key: &str) -> Option<&List<V>> {
        self.buckets.get(self.idx(key)).ok()
    }

    fn bucket_mut(&mut self, key: &str) -> Option<&mut List<V>> {
        let i = self.idx(key);
        self.buckets.get_mut(i).ok()
    }
}

impl<V> HashMapEngine<V> for ChainingMap<V> {
    fn put<S: Into<String>>(&mut self, key: S, value: V) -> Option<V> {
        let key = key.into();

        if let Some(node) = self.bucket_mut(&key).and_then(|b| b.contains_mut(&key)) {
            return Some(std::mem::replace(&mut node.value, value));
        }

        if (self.size + 1) as f64 / self.capacity() as f64 >= CHAINING_MAX_LOAD {
            self.resize_table(self.capacity() * 2);
        }

        let i = self.idx(&key);
        if let Ok(bucket) = self.buckets.get_mut(i) {
            trace!(target: "put", "appending {key:?} to bucket {i}");
            bucket.insert(key, value);
            self.size += 1;
        }
        None
    }

    fn get(&self, key: &str) -> Option<&V> {
        self.bucket(key)?.contains(key).map(|n| &n.value)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.bucket_mut(key)?.contains_mut(key).map(|n| &mut n.value)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let node = self.bucket_mut(key)?.remove(key)?;
        trace!(target: "remove", "unlinked {key:?}");
        self.size -= 1;
        Some(node.value)
    }

    fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            *bucket = List::new();
        }
        self.size = 0;
    }

    fn len(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.buckets.length()
    }

    fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_empty()).count()
    }

    /// A request for zero buckets is ignored
    fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            debug!(target: "resize_table", "ignoring request for {new_capacity} buckets");
            return;
        }

        let capacity = prime_capacity(new_capacity);
        debug!(target: "resize_table", "rehashing {} entries: {} -> {capacity} buckets", self.size, self.capacity());

        let mut rebuilt = Self::with_buckets(capacity, self.hash_function);
        for bucket in std::mem::take(&mut self.buckets) {
            for node in bucket {
                let (key, value) = node.into_pair();
                rebuilt.put(key, value);
            }
        }

        *self = rebuilt;
    }

    fn get_keys_and_values(&self) -> DynamicArray<(&str, &V)> {
        self.iter().collect()
    }
}

impl<V: std::fmt::Debug> std::fmt::Display for ChainingMap<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, bucket) in self.buckets.iter().enumerate() {
            writeln!(f, "{i}: {bucket:?}")?;
        }
        Ok(())
    }
}

impl<'a, V> IntoIterator for &'a ChainingMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// [iterators]

pub struct Iter<'a, V> {
    map: &'a ChainingMap<V>,
    chain: Option<linked_list::Iter<'a, V>>,
    bucket_idx: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.as_mut().and_then(|chain| chain.next()) {
                return Some((node.key.as_str(), &node.value));
            }
            self.bucket_idx += 1;
            self.chain = Some(self.map.buckets.get(self.bucket_idx).ok()?.iter());
        }
    }
}

impl<V> FusedIterator for Iter<'_, V> {}
