//! Two string-keyed hash maps built from scratch on top of the
//! `collections` containers:
//!
//! - [`OpenAddressingMap`]: one flat slot array, quadratic probing,
//!   tombstones for deletion, kept below half full.
//! - [`ChainingMap`]: an array of linked-list buckets, kept below one
//!   entry per bucket on average.
//!
//! Both keep their capacity prime (see [`prime`]) and grow by doubling
//! before an insertion would reach their load threshold. They share the
//! [`HashMapEngine`] interface, so either can back the same caller.
//! [`find_mode`] uses a [`ChainingMap`] as a frequency table.

pub mod chaining;
pub mod error;
mod mode;
pub mod open_addressing;
pub mod prime;

pub use chaining::ChainingMap;
pub use collections::{DynamicArray, HashFunction, hash_function_1, hash_function_2};
pub use error::ModeError;
pub use mode::{find_mode, find_mode_with};
pub use open_addressing::OpenAddressingMap;

/// Capacity requested by `Default` and by [`find_mode`]
pub const DEFAULT_CAPACITY: usize = 11;

/// An open addressing table grows before its load factor would reach this
pub const OPEN_ADDRESSING_MAX_LOAD: f64 = 0.5;

/// A chaining table grows before its load factor would reach this
pub const CHAINING_MAX_LOAD: f64 = 1.0;

/// Operations shared by both collision-resolution strategies.
pub trait HashMapEngine<V> {
    /// Inserts or updates `key`, returning the value it replaced
    fn put<S: Into<String>>(&mut self, key: S, value: V) -> Option<V>;

    fn get(&self, key: &str) -> Option<&V>;

    fn get_mut(&mut self, key: &str) -> Option<&mut V>;

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning its value; absent keys are a no-op
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Drops every entry, keeping the capacity
    fn clear(&mut self);

    /// Number of live entries
    fn len(&self) -> usize;

    /// Shorthand for `self.len() == 0`
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots or buckets, always prime
    fn capacity(&self) -> usize;

    /// Live entries per slot or bucket
    fn table_load(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    fn empty_buckets(&self) -> usize;

    /// Rebuilds the table with (at least) `new_capacity` slots, rounded up
    /// to a prime. Invalid targets leave the table untouched
    fn resize_table(&mut self, new_capacity: usize);

    /// Every live pair, in table order
    fn get_keys_and_values(&self) -> DynamicArray<(&str, &V)>;
}
