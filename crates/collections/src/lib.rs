//! Backing containers for the hash maps: a growable indexable array,
//! a singly linked list used as a bucket chain, and two string hash functions.

mod dynamic_array;
pub mod hash;
pub mod linked_list;
mod macros;

use thiserror::Error;

pub use dynamic_array::DynamicArray;
pub use hash::{HashFunction, hash_function_1, hash_function_2};
pub use linked_list::{List, Node};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CollectionError {
    /// Index past the end of the backing storage
    #[error("index out of bounds, got: {index}, valid range: 0..{length}")]
    OutOfBounds { index: usize, length: usize },
}
