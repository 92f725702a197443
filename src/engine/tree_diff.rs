//! Compares two linearized node sequences index by index and renders both
//! sides when they disagree, so the first structural divergence between two
//! large trees is easy to spot.
use std::fmt::Display;

use thiserror::Error;

/// Compares actual against expected element-wise using the elements' own
/// equality. Purely a diagnostic aid, the rendered listings carry no
/// behavior beyond message construction.
pub fn assert_sequences_equal<T: PartialEq + Display>(
    actual: &[T],
    expected: &[T],
) -> Result<(), TreeDiffError> {
    if actual.len() != expected.len() {
        return Err(TreeDiffError::SizeMismatch {
            actual_len: actual.len(),
            expected_len: expected.len(),
            listing: format_sequences(actual, expected),
        });
    }
    if actual != expected {
        return Err(TreeDiffError::NotEqualAt {
            index: differing_index(actual, expected),
            listing: format_sequences(actual, expected),
        });
    }
    Ok(())
}

fn differing_index<T: PartialEq>(actual: &[T], expected: &[T]) -> usize {
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        if a != e {
            return i;
        }
    }
    actual.len()
}

fn format_sequences<T: Display>(actual: &[T], expected: &[T]) -> String {
    format!(
        "Actual [{}]:\n    {}\nExpected [{}]:\n    {}\n",
        actual.len(),
        join_lines(actual),
        expected.len(),
        join_lines(expected)
    )
}

fn join_lines<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("\n    ")
}

#[derive(Debug, Error)]
pub enum TreeDiffError {
    #[error("Sequences not equal in size, actual {actual_len} vs expected {expected_len}\n{listing}")]
    SizeMismatch {
        actual_len: usize,
        expected_len: usize,
        listing: String,
    },
    #[error("Sequences not equal at index {index}\n{listing}")]
    NotEqualAt { index: usize, listing: String },
}
