//! Instructor-authored reference solutions, already normalized.

use std::collections::BTreeSet;

use super::ProgramNode;

/// A reference solution for a puzzle. Several patterns may be accepted for
/// the same level; `priority_rank` orders them when they match equally well,
/// lower being preferred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    pub priority_rank: i32,
    pub full_sequence: Vec<ProgramNode>,
    pub checkpoints: Vec<Checkpoint>,
    pub reward_key: String,
}

/// A partial solution marking one step of progress towards a pattern. Each
/// checkpoint contains the previous one, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub sequence: Vec<ProgramNode>,
    pub hint: String,
    pub highlight: BTreeSet<String>,
}

impl Pattern {
    pub fn new(name: impl Into<String>, full_sequence: Vec<ProgramNode>) -> Pattern {
        Pattern {
            name: name.into(),
            priority_rank: 0,
            full_sequence,
            checkpoints: Vec::new(),
            reward_key: String::new(),
        }
    }

    pub fn with_rank(mut self, rank: i32) -> Pattern {
        self.priority_rank = rank;
        self
    }

    pub fn with_checkpoint(mut self, checkpoint: Checkpoint) -> Pattern {
        self.checkpoints
            .push(checkpoint);
        self
    }
}

impl Checkpoint {
    pub fn new(sequence: Vec<ProgramNode>, hint: impl Into<String>) -> Checkpoint {
        Checkpoint {
            sequence,
            hint: hint.into(),
            highlight: BTreeSet::new(),
        }
    }
}
