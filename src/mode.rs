use collections::{DynamicArray, HashFunction, hash_function_1};
use log::debug;

use crate::{ChainingMap, DEFAULT_CAPACITY, HashMapEngine, error::ModeError};

/// Returns the most frequent value(s) of `values` and how often they occur.
///
/// Ties are all reported, in the frequency table's enumeration order.
///
/// # Errors
///
/// [`ModeError::EmptyInput`] if `values` yields nothing
pub fn find_mode<I, S>(values: I) -> Result<(DynamicArray<String>, usize), ModeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    find_mode_with(values, DEFAULT_CAPACITY, hash_function_1)
}

/// [`find_mode`] with an explicitly sized frequency table
pub fn find_mode_with<I, S>(
    values: I,
    capacity: usize,
    hash_function: HashFunction,
) -> Result<(DynamicArray<String>, usize), ModeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: ChainingMap<usize> = ChainingMap::new(capacity, hash_function);
    for value in values {
        let value = value.as_ref();
        match counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                counts.put(value, 1);
            }
        }
    }

    if counts.is_empty() {
        return Err(ModeError::EmptyInput);
    }
    debug!(target: "find_mode", "{} distinct values in {} buckets", counts.len(), counts.capacity());

    let mut mode = DynamicArray::new();
    let mut frequency = 0;
    for (value, &count) in counts.iter() {
        if count == frequency {
            mode.append(value.to_string());
        } else if count > frequency {
            mode = DynamicArray::new();
            mode.append(value.to_string());
            frequency = count;
        }
    }

    Ok((mode, frequency))
}

#[cfg(test)]
mod test {
    use super::*;
    use collections::hash_function_2;

    fn sorted(values: DynamicArray<String>) -> Vec<String> {
        let mut v: Vec<String> = values.into_iter().collect();
        v.sort();
        v
    }

    #[test]
    fn single_mode() {
        let (mode, frequency) = find_mode(["y", "y", "x", "z", "y"]).unwrap();
        assert_eq!(sorted(mode), ["y"]);
        assert_eq!(frequency, 3);
    }

    #[test]
    fn tie() {
        let (mode, frequency) = find_mode(["a", "b", "a", "b"]).unwrap();
        assert_eq!(sorted(mode), ["a", "b"]);
        assert_eq!(frequency, 2);
    }

    #[test]
    fn all_distinct() {
        let words: Vec<String> = (0..50).map(|i| format!("w{i}")).collect();
        let (mode, frequency) = find_mode(&words).unwrap();
        assert_eq!(mode.length(), 50);
        assert_eq!(frequency, 1);
    }

    #[test]
    fn single_value() {
        let (mode, frequency) = find_mode(vec!["only".to_string()]).unwrap();
        assert_eq!(sorted(mode), ["only"]);
        assert_eq!(frequency, 1);
    }

    #[test]
    fn counts_accumulate() {
        let mut words = vec!["once"];
        words.extend(std::iter::repeat_n("often", 40));
        words.extend(std::iter::repeat_n("twice", 2));

        let (mode, frequency) = find_mode(words).unwrap();
        assert_eq!(sorted(mode), ["often"]);
        assert_eq!(frequency, 40);
    }

    #[test]
    fn empty() {
        let none: [&str; 0] = [];
        assert_eq!(find_mode(none), Err(ModeError::EmptyInput));
    }

    #[test]
    fn tiny_table_grows() {
        let input = ["Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu"];
        let (mode, frequency) = find_mode_with(input, 1, hash_function_2).unwrap();
        assert_eq!(sorted(mode), ["Mint"]);
        assert_eq!(frequency, 3);
    }
}
