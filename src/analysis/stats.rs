//! Small statistics helpers.

/// Round to one decimal place, absorbing floating-point noise in sizes.
pub fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Most frequent value. Ties go to the value seen first.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: PartialEq + Copy,
    I: IntoIterator<Item = T>,
{
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    // max_by_key returns the last maximum; reverse so the first seen wins
    counts
        .into_iter()
        .rev()
        .max_by_key(|(_, count)| *count)
        .map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(11.9999), 12.0);
        assert_eq!(round1(10.04), 10.0);
        assert_eq!(round1(10.06), 10.1);
    }

    #[test]
    fn test_mode() {
        assert_eq!(mode([10.0, 12.0, 10.0]), Some(10.0));
        assert_eq!(mode(Vec::<f32>::new()), None);
    }

    #[test]
    fn test_mode_tie_prefers_first_seen() {
        assert_eq!(mode([14.0, 9.0, 9.0, 14.0]), Some(14.0));
        assert_eq!(mode([3u32, 7, 7, 3]), Some(3));
    }
}
