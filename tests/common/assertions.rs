//! Assertion utilities for testing.
//!
//! Floating-point comparisons and set-based result checks.

use std::collections::HashSet;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that a list of codes holds exactly the expected set, ignoring order.
///
/// # Panics
///
/// Panics on duplicates or if the sets differ.
pub fn assert_same_codes<S: AsRef<str>>(actual: &[S], expected: &[&str]) {
    let actual_set: HashSet<&str> = actual.iter().map(|s| s.as_ref()).collect();
    assert_eq!(
        actual_set.len(),
        actual.len(),
        "Duplicate codes in result: {:?}",
        actual.iter().map(|s| s.as_ref()).collect::<Vec<_>>()
    );
    let expected_set: HashSet<&str> = expected.iter().copied().collect();
    assert_eq!(actual_set, expected_set);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0 + 1e-12, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_same_codes() {
        assert_same_codes(&["JFK", "EWR"], &["EWR", "JFK"]);
    }
}
