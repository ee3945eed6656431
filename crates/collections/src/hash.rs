/// Maps a key to a non-negative integer; the maps reduce it modulo their capacity
pub type HashFunction = fn(&str) -> usize;

/// Sum of the key's byte values
pub fn hash_function_1(key: &str) -> usize {
    key.bytes()
        .fold(0usize, |hash, b| hash.wrapping_add(b as usize))
}

/// Sum of each byte weighted by its 1-based position,
/// so anagrams no longer collide
pub fn hash_function_2(key: &str) -> usize {
    key.bytes().enumerate().fold(0usize, |hash, (i, b)| {
        hash.wrapping_add((i + 1).wrapping_mul(b as usize))
    })
}
