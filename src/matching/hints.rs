//! Selection of the single next hint for a learner working towards a
//! chosen pattern.

use tracing::debug;

use super::same_identity;
use crate::language::{Pattern, ProgramNode};

pub const COMPLETE_MESSAGE: &str = "Pattern complete!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hint<'p> {
    /// Index of the first checkpoint not yet satisfied, or the number of
    /// checkpoints when all of them are.
    pub step_index: usize,
    pub message: &'p str,
    pub is_complete: bool,
    /// Node ids the hint refers to, for highlighting in the editor.
    pub highlight: Vec<&'p str>,
}

/// True when every element of `target` appears in `student`, in order, with
/// anything else allowed in between. An element with a body only appears
/// where a student element of the same identity contains that body in the
/// same way.
pub fn contains_in_order(student: &[ProgramNode], target: &[ProgramNode]) -> bool {
    let mut remaining = student.iter();

    'targets: for wanted in target {
        for node in remaining.by_ref() {
            if encloses(node, wanted) {
                continue 'targets;
            }
        }
        return false;
    }

    true
}

fn encloses(node: &ProgramNode, wanted: &ProgramNode) -> bool {
    if !same_identity(node, wanted) {
        return false;
    }

    if let Some(body) = wanted.body() {
        match node.body() {
            Some(have) if contains_in_order(have, body) => {}
            _ => return false,
        }
    }

    if let Some(alternate) = wanted.alternate() {
        match node.alternate() {
            Some(have) if contains_in_order(have, alternate) => {}
            _ => return false,
        }
    }

    true
}

/// Work out which checkpoint the learner is on, and the hint for it.
pub fn next_hint<'p>(student: &[ProgramNode], pattern: &'p Pattern) -> Hint<'p> {
    next_hint_with(student, pattern, COMPLETE_MESSAGE)
}

/// As [`next_hint`], with the message given once every checkpoint is
/// satisfied supplied by the caller.
pub fn next_hint_with<'p>(student: &[ProgramNode], pattern: &'p Pattern, complete: &'p str) -> Hint<'p> {
    for (i, checkpoint) in pattern
        .checkpoints
        .iter()
        .enumerate()
    {
        if !contains_in_order(student, &checkpoint.sequence) {
            debug!("Pattern '{}' stopped at step {}", pattern.name, i);
            return Hint {
                step_index: i,
                message: &checkpoint.hint,
                is_complete: false,
                highlight: checkpoint
                    .highlight
                    .iter()
                    .map(String::as_str)
                    .collect(),
            };
        }
    }

    Hint {
        step_index: pattern
            .checkpoints
            .len(),
        message: complete,
        is_complete: true,
        highlight: Vec::new(),
    }
}
