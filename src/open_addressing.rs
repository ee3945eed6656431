use std::iter::FusedIterator;

use collections::{DynamicArray, HashFunction, hash_function_1};
use log::{debug, trace};

use crate::{
    DEFAULT_CAPACITY, HashMapEngine, OPEN_ADDRESSING_MAX_LOAD,
    prime::{next_prime, prime_capacity},
};

#[derive(Debug)]
struct Entry<V> {
    key: String,
    value: V,
}

/// A slot is never reused for a different key without passing through
/// `Tombstone`, which lookups skip but never stop at
#[derive(Debug)]
enum Slot<V> {
    Empty,
    Tombstone,
    Occupied(Entry<V>),
}

/// Where the probe sequence for a key ended
enum Probe {
    /// Slot holding the key
    Found(usize),
    /// First slot the key could be inserted into
    Vacant(usize),
    /// Every distinct probe position is occupied by another key
    Exhausted,
}

/// Hash map with quadratic probing over a prime-sized slot array.
#[derive(Debug)]
pub struct OpenAddressingMap<V> {
    slots: DynamicArray<Slot<V>>,
    size: usize,
    hash_function: HashFunction,
}

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, hash_function_1)
    }
}

impl<V> OpenAddressingMap<V> {
    /// Creates an empty map with the first prime at or above `capacity` slots
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        Self::with_slots(next_prime(capacity), hash_function)
    }

    fn with_slots(capacity: usize, hash_function: HashFunction) -> Self {
        Self {
            slots: DynamicArray::with_length(capacity, || Slot::Empty),
            size: 0,
            hash_function,
        }
    }

    /// Lazily yields every live pair in ascending slot order
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: &self.slots,
            index: 0,
        }
    }

    // [private]

    /// Walks `initial + j^2 (mod capacity)` for `j = 0, 1, ...`.
    ///
    /// Tombstones are remembered as insertion candidates but the walk
    /// continues past them, so a key is found even if it was inserted
    /// behind a slot that was later vacated. The squares repeat with
    /// period `capacity`, which bounds the walk.
    fn probe(&self, key: &str) -> Probe {
        let capacity = self.slots.length();
        let initial = (self.hash_function)(key) % capacity;
        let mut first_free = None;
        let mut offset = 0;

        for j in 0..capacity {
            let index = (initial + offset) % capacity;
            match self.slots.get(index) {
                Ok(Slot::Empty) => return Probe::Vacant(first_free.unwrap_or(index)),
                Ok(Slot::Tombstone) => {
                    first_free.get_or_insert(index);
                }
                Ok(Slot::Occupied(entry)) if entry.key == key => return Probe::Found(index),
                Ok(Slot::Occupied(_)) => {}
                Err(_) => break,
            }
            // (j + 1)^2 = j^2 + 2j + 1
            offset = (offset + 2 * j + 1) % capacity;
        }

        first_free.map_or(Probe::Exhausted, Probe::Vacant)
    }

    fn entry(&self, index: usize) -> Option<&Entry<V>> {
        match self.slots.get(index) {
            Ok(Slot::Occupied(entry)) => Some(entry),
            _ => None,
        }
    }

    fn entry_mut(&mut self, index: usize) -> Option<&mut Entry<V>> {
        match self.slots.get_mut(index) {
            Ok(Slot::Occupied(entry)) => Some(entry),
            _ => None,
        }
    }

    fn find(&self, key: &str) -> Option<usize> {
        match self.probe(key) {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Whether inserting one more key would reach the load threshold
    fn needs_grow(&self) -> bool {
        (self.size + 1) as f64 / self.slots.length() as f64 >= OPEN_ADDRESSING_MAX_LOAD
    }
}

impl<V> HashMapEngine<V> for OpenAddressingMap<V> {
    fn put<S: Into<String>>(&mut self, key: S, value: V) -> Option<V> {
        let key = key.into();

        if let Some(index) = self.find(&key) {
            if let Some(entry) = self.entry_mut(index) {
                trace!(target: "put", "updating {key:?} in slot {index}");
                return Some(std::mem::replace(&mut entry.value, value));
            }
        }

        if self.needs_grow() {
            self.resize_table(self.capacity() * 2);
        }

        match self.probe(&key) {
            Probe::Vacant(index) => {
                trace!(target: "put", "inserting {key:?} into slot {index}");
                if let Ok(slot) = self.slots.get_mut(index) {
                    *slot = Slot::Occupied(Entry { key, value });
                    self.size += 1;
                }
                None
            }
            // the key was absent above and a resize only moves live keys
            Probe::Found(index) => {
                debug_assert!(false, "{key:?} appeared in slot {index} during a resize");
                self.entry_mut(index)
                    .map(|entry| std::mem::replace(&mut entry.value, value))
            }
            Probe::Exhausted => {
                debug!(target: "put", "probe sequence exhausted for {key:?}, forcing a resize");
                self.resize_table(self.capacity() * 2);
                self.put(key, value)
            }
        }
    }

    fn get(&self, key: &str) -> Option<&V> {
        self.find(key)
            .and_then(|index| self.entry(index))
            .map(|entry| &entry.value)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find(key)?;
        self.entry_mut(index).map(|entry| &mut entry.value)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find(key)?;
        let slot = self.slots.get_mut(index).ok()?;

        match std::mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(entry) => {
                trace!(target: "remove", "tombstoned {key:?} in slot {index}");
                self.size -= 1;
                Some(entry.value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.size = 0;
    }

    fn len(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.slots.length()
    }

    /// Counts never-used slots and tombstones alike
    fn empty_buckets(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| !matches!(slot, Slot::Occupied(_)))
            .count()
    }

    /// Requests below the current size are ignored.
    ///
    /// Live entries are re-inserted into a separately built table which
    /// then replaces this one; tombstones are not carried over.
    fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            debug!(target: "resize_table", "ignoring request for {new_capacity} slots, holding {} entries", self.size);
            return;
        }

        let capacity = prime_capacity(new_capacity);
        debug!(target: "resize_table", "rehashing {} entries: {} -> {capacity} slots", self.size, self.capacity());

        let mut rebuilt = Self::with_slots(capacity, self.hash_function);
        for slot in std::mem::take(&mut self.slots) {
            if let Slot::Occupied(Entry { key, value }) = slot {
                rebuilt.put(key, value);
            }
        }

        *self = rebuilt;
    }

    fn get_keys_and_values(&self) -> DynamicArray<(&str, &V)> {
        self.iter().collect()
    }
}

impl<V: std::fmt::Debug> std::fmt::Display for OpenAddressingMap<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{i}: None")?,
                Slot::Tombstone => writeln!(f, "{i}: Tombstone")?,
                Slot::Occupied(entry) => writeln!(f, "{i}: <{}, {:?}>", entry.key, entry.value)?,
            }
        }
        Ok(())
    }
}

impl<'a, V> IntoIterator for &'a OpenAddressingMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// [iterators]

/// Cursor over the slot array; once past the end it stays exhausted
pub struct Iter<'a, V> {
    slots: &'a DynamicArray<Slot<V>>,
    index: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // out of bounds marks the end of the table
            let slot = self.slots.get(self.index).ok()?;
            self.index += 1;
            if let Slot::Occupied(entry) = slot {
                return Some((entry.key.as_str(), &entry.value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.length().saturating_sub(self.index)))
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

#[cfg(test)]
mod test {
    use super::*;
    use collections::hash_function_2;

    /// Every key lands on the same initial slot
    fn constant_hash(_: &str) -> usize {
        0
    }

    #[test]
    fn insert() {
        let mut t = OpenAddressingMap::new(10, hash_function_1);
        assert_eq!(t.capacity(), 11);

        let old = t.put("foo", "bar");
        assert_eq!(old, None);
        assert_eq!(t.len(), 1);

        let old = t.put("foo", "baz");
        assert_eq!(old, Some("bar"));
        assert_eq!(t.len(), 1);

        t.put("peti", "is a baby");
        t.put("sina", "is a tiny baby");

        assert_eq!(t.len(), 3);
        assert_eq!(t.get("foo"), Some(&"baz"));
        assert_eq!(t.get("sina"), Some(&"is a tiny baby"));
    }

    #[test]
    fn quadratic_probe_positions() {
        let mut t = OpenAddressingMap::new(11, constant_hash);
        for k in ["a", "b", "c", "d"] {
            t.put(k, ());
        }

        // offsets 0, 1, 4, 9
        let occupied: Vec<usize> = t
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Slot::Occupied(_)))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(occupied, [0, 1, 4, 9]);
    }

    #[test]
    fn probe_skips_tombstones() {
        let mut t = OpenAddressingMap::new(11, constant_hash);
        t.put("a", 1);
        t.put("b", 2);
        t.put("c", 3);

        assert_eq!(t.remove("a"), Some(1));
        assert_eq!(t.remove("b"), Some(2));
        assert_eq!(t.get("c"), Some(&3));
        assert!(t.contains_key("c"));
        assert!(!t.contains_key("a"));
        assert_eq!(t.len(), 1);
        assert_eq!(t.empty_buckets(), 10);
    }

    #[test]
    fn tombstone_reused_without_duplicating() {
        let mut t = OpenAddressingMap::new(11, constant_hash);
        t.put("a", 1);
        t.put("b", 2);
        t.remove("a");

        // "b" sits behind the tombstone and must be updated in place
        assert_eq!(t.put("b", 20), Some(2));
        assert_eq!(t.len(), 1);
        assert_eq!(t.iter().count(), 1);

        // a new key takes the first free slot, the tombstone
        t.put("c", 3);
        assert!(matches!(t.slots.get(0), Ok(Slot::Occupied(e)) if e.key == "c"));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn lookups_terminate_with_no_empty_slots() {
        let mut t = OpenAddressingMap::new(3, hash_function_2);
        t.put("x", 0);
        t.remove("x");
        // fill every slot with tombstones without triggering a rebuild
        for i in 0..t.capacity() {
            if let Ok(slot) = t.slots.get_mut(i) {
                *slot = Slot::Tombstone;
            }
        }

        assert_eq!(t.get("missing"), None);
        assert_eq!(t.remove("missing"), None);
        t.put("y", 1);
        assert_eq!(t.get("y"), Some(&1));
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut t: OpenAddressingMap<i32> = OpenAddressingMap::default();
        assert_eq!(t.remove("ghost"), None);
        t.put("real", 1);
        assert_eq!(t.remove("ghost"), None);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn grows_before_half_full() {
        let mut t = OpenAddressingMap::new(11, hash_function_1);
        for i in 0..5 {
            t.put(format!("k{i}"), i);
        }
        assert_eq!(t.capacity(), 11);

        t.put("k5", 5);
        assert_eq!(t.capacity(), 23);
        assert!(t.table_load() < 0.5);

        for i in 0..6 {
            assert_eq!(t.get(&format!("k{i}")), Some(&i));
        }
    }

    #[test]
    fn insert_across_grow_keeps_every_value() {
        let mut t = OpenAddressingMap::new(3, constant_hash);
        for i in 0..20 {
            assert_eq!(t.put(format!("k{i}"), i), None);
            assert_eq!(t.len(), i + 1);
        }

        for i in 0..20 {
            assert_eq!(t.put(format!("k{i}"), i * 10), Some(i));
        }
        assert_eq!(t.len(), 20);
        assert_eq!(t.iter().count(), 20);
    }

    #[test]
    fn resize_drops_tombstones() {
        let mut t = OpenAddressingMap::new(11, hash_function_1);
        for i in 0..5 {
            t.put(format!("k{i}"), i);
        }
        t.remove("k1");
        t.remove("k3");
        assert_eq!(t.empty_buckets(), 11 - 3);

        t.resize_table(11);
        assert_eq!(t.capacity(), 11);
        assert!(t.slots.iter().all(|s| !matches!(s, Slot::Tombstone)));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn resize_below_size_ignored() {
        let mut t = OpenAddressingMap::new(11, hash_function_1);
        for i in 0..4 {
            t.put(format!("k{i}"), i);
        }

        t.resize_table(3);
        assert_eq!(t.capacity(), 11);

        // equal to size is allowed, then the rebuilt table grows itself
        t.resize_table(4);
        assert_eq!(t.len(), 4);
        assert!(t.table_load() < 0.5);
        assert_eq!(t.get("k2"), Some(&2));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut t = OpenAddressingMap::new(30, hash_function_2);
        for i in 0..10 {
            t.put(format!("{i}"), i);
        }
        let capacity = t.capacity();

        t.clear();
        assert_eq!(t.len(), 0);
        assert_eq!(t.capacity(), capacity);
        assert_eq!(t.empty_buckets(), capacity);
        assert_eq!(t.get("3"), None);
    }

    #[test]
    fn iter() {
        let mut h = OpenAddressingMap::default();

        for i in 0..32 {
            h.put(format!("{}", i), i);
        }
        h.remove("7");

        let mut it = h.iter();
        let mut seen: Vec<i32> = it.by_ref().map(|(_, v)| *v).collect();
        assert!(it.next().is_none());

        seen.sort();
        let expected: Vec<i32> = (0..32).filter(|&i| i != 7).collect();
        assert_eq!(seen, expected);
        assert_eq!(h.get_keys_and_values().length(), 31);
    }

    #[test]
    fn display() {
        let mut t = OpenAddressingMap::new(3, constant_hash);
        t.put("a", 1);
        t.remove("a");

        assert_eq!(t.to_string(), "0: Tombstone\n1: None\n2: None\n");
        t.put("b", 2);
        assert_eq!(t.to_string(), "0: <b, 2>\n1: None\n2: None\n");
    }
}
