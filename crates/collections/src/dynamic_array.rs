use crate::CollectionError;

/// Growable, index-addressable storage.
///
/// Unlike slice indexing, `get` and `set` never panic:
/// reading or writing past the end reports [`CollectionError::OutOfBounds`]
#[derive(Clone, PartialEq, Eq)]
pub struct DynamicArray<T> {
    data: Vec<T>,
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynamicArray<T> {
    /// Creates a new, empty array
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an array of `len` elements, each produced by `fill`
    pub fn with_length<F>(len: usize, mut fill: F) -> Self
    where
        F: FnMut() -> T,
    {
        let mut data = Vec::with_capacity(len);
        for _ in 0..len {
            data.push(fill());
        }
        Self { data }
    }

    pub fn append(&mut self, item: T) {
        self.data.push(item);
    }

    pub fn length(&self) -> usize {
        self.data.len()
    }

    /// Shorthand for `self.length() == 0`
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        let length = self.length();
        self.data
            .get(index)
            .ok_or(CollectionError::OutOfBounds { index, length })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, CollectionError> {
        let length = self.length();
        self.data
            .get_mut(index)
            .ok_or(CollectionError::OutOfBounds { index, length })
    }

    /// Overwrites the element at `index`, dropping the old one
    pub fn set(&mut self, index: usize, item: T) -> Result<(), CollectionError> {
        *self.get_mut(index)? = item;
        Ok(())
    }

    // [adapters]

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
