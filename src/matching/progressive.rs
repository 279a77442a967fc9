//! Progress through a pattern measured against three nested checkpoints:
//! the first authored checkpoint, the first two together, and the complete
//! solution.

use tracing::debug;

use super::fuzzy::{fuzzy_match, FuzzyMatch};
use super::hints::contains_in_order;
use crate::language::{Pattern, ProgramNode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckpointMatch {
    pub checkpoint1: bool,
    pub checkpoint2: bool,
    pub checkpoint3: bool,
    pub matched_checkpoint_count: u8,
}

impl CheckpointMatch {
    /// Build a result from the three direct checks, forcing earlier
    /// checkpoints on when a later one is reached so that progress shown to
    /// the learner never goes backwards.
    fn from_checks(one: bool, two: bool, three: bool) -> CheckpointMatch {
        let two = two || three;
        let one = one || two;

        let matched_checkpoint_count = if three {
            3
        } else if two {
            2
        } else if one {
            1
        } else {
            0
        };

        CheckpointMatch {
            checkpoint1: one,
            checkpoint2: two,
            checkpoint3: three,
            matched_checkpoint_count,
        }
    }
}

/// The pattern selected as furthest along, with its checkpoint result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressiveMatch<'p> {
    pub pattern: &'p Pattern,
    pub result: CheckpointMatch,
}

/// Target for the second checkpoint. Checkpoints are normally authored
/// cumulatively, in which case the second already contains the first;
/// otherwise the two are joined.
fn combined(first: &[ProgramNode], second: &[ProgramNode]) -> Vec<ProgramNode> {
    if contains_in_order(second, first) {
        second.to_vec()
    } else {
        let mut joined = first.to_vec();
        joined.extend_from_slice(second);
        joined
    }
}

fn reached(student: &[ProgramNode], target: Option<&[ProgramNode]>) -> bool {
    match target {
        Some(target) => fuzzy_match(student, target).is_complete(),
        None => false,
    }
}

pub fn progressive_match(student: &[ProgramNode], pattern: &Pattern) -> CheckpointMatch {
    let first = pattern
        .checkpoints
        .first()
        .map(|checkpoint| {
            checkpoint
                .sequence
                .as_slice()
        });

    let second = match (
        first,
        pattern
            .checkpoints
            .get(1),
    ) {
        (Some(first), Some(second)) => Some(combined(first, &second.sequence)),
        (None, Some(second)) => Some(
            second
                .sequence
                .clone(),
        ),
        (_, None) => None,
    };

    let one = reached(student, first);
    let two = reached(student, second.as_deref());
    let three = reached(student, Some(&pattern.full_sequence));

    CheckpointMatch::from_checks(one, two, three)
}

/// Choose the pattern the learner is furthest along. Patterns are examined
/// in priority order and the scan stops at the first full match. Equal
/// checkpoint counts at equal rank go to the pattern with the higher
/// percentage against its full sequence, then to whichever came first.
pub fn best_progressive_match<'p>(student: &[ProgramNode], patterns: &'p [Pattern]) -> Option<ProgressiveMatch<'p>> {
    let mut ordered: Vec<&'p Pattern> = patterns
        .iter()
        .collect();
    ordered.sort_by_key(|pattern| pattern.priority_rank);

    let mut best: Option<(ProgressiveMatch<'p>, FuzzyMatch)> = None;

    for pattern in ordered {
        let result = progressive_match(student, pattern);
        let score = fuzzy_match(student, &pattern.full_sequence);

        debug!(
            "Pattern '{}' reached checkpoint {}",
            pattern.name, result.matched_checkpoint_count
        );

        let better = match &best {
            None => true,
            Some((current, current_score)) => {
                let count = result.matched_checkpoint_count;
                let other = current
                    .result
                    .matched_checkpoint_count;

                count > other
                    || (count == other
                        && pattern.priority_rank
                            == current
                                .pattern
                                .priority_rank
                        && score.percentage > current_score.percentage)
            }
        };

        if better {
            best = Some((ProgressiveMatch { pattern, result }, score));
        }

        if result.checkpoint3 {
            break;
        }
    }

    best.map(|(selected, _)| selected)
}
