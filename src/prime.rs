//! Prime table sizing shared by both map variants.

/// Returns the first prime found scanning odd numbers upward from `n`.
///
/// # Note
///
/// Even inputs start the scan at `n + 1`, so `next_prime(2) == 3`
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Trial division by odd factors up to `sqrt(n)`
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor = 3;
    while factor * factor <= n {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}

/// Capacity a resize request rounds to: kept as is when already prime
pub(crate) fn prime_capacity(requested: usize) -> usize {
    if is_prime(requested) {
        requested
    } else {
        next_prime(requested)
    }
}
