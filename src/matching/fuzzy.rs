//! Graded, order-preserving matching of a (possibly incomplete) program
//! against a target sequence.

use tracing::debug;

use super::same_identity;
use crate::language::{Pattern, ProgramNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub matched_count: usize,
    pub total_count: usize,
    pub percentage: u8,
}

impl FuzzyMatch {
    /// Every target element was found, in order.
    pub fn is_complete(&self) -> bool {
        self.total_count > 0 && self.matched_count == self.total_count
    }
}

/// Result of scoring a program against every candidate pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult<'p> {
    pub percentage: u8,
    pub matched_count: usize,
    pub total_count: usize,
    pub best_pattern: Option<&'p Pattern>,
}

/// Find the target's elements in the student sequence in order, skipping
/// any student elements in between. The score is the length of the target
/// prefix reached: once an element cannot be found in what remains of the
/// student sequence, nothing after it counts either.
pub fn fuzzy_match(student: &[ProgramNode], target: &[ProgramNode]) -> FuzzyMatch {
    let mut cursor = 0;

    for node in student {
        if cursor == target.len() {
            break;
        }
        if same_identity(node, &target[cursor]) {
            cursor += 1;
        }
    }

    FuzzyMatch {
        matched_count: cursor,
        total_count: target.len(),
        percentage: percentage(cursor, target.len()),
    }
}

pub(crate) fn percentage(matched: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let value = (matched * 100) / total;
    value.min(100) as u8
}

/// Score the student against each pattern's full sequence and keep the
/// best. Equal percentages go to the lower priority rank, then to whichever
/// pattern was listed first.
pub fn best_pattern_match<'p>(student: &[ProgramNode], patterns: &'p [Pattern]) -> MatchResult<'p> {
    let mut best: Option<(&'p Pattern, FuzzyMatch)> = None;

    for pattern in patterns {
        let result = fuzzy_match(student, &pattern.full_sequence);
        debug!(
            "Pattern '{}' matched {}/{} ({}%)",
            pattern.name, result.matched_count, result.total_count, result.percentage
        );

        let better = match &best {
            None => true,
            Some((current, score)) => {
                result.percentage > score.percentage
                    || (result.percentage == score.percentage
                        && pattern.priority_rank < current.priority_rank)
            }
        };

        if better {
            best = Some((pattern, result));
        }
    }

    match best {
        Some((pattern, result)) => MatchResult {
            percentage: result.percentage,
            matched_count: result.matched_count,
            total_count: result.total_count,
            best_pattern: Some(pattern),
        },
        None => MatchResult {
            percentage: 0,
            matched_count: 0,
            total_count: 0,
            best_pattern: None,
        },
    }
}
