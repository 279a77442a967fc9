//! Comparison of normalized programs against reference patterns

mod exact;
mod fuzzy;
mod hints;
mod progressive;

pub use exact::*;
pub use fuzzy::{best_pattern_match, fuzzy_match, FuzzyMatch, MatchResult};
pub use hints::*;
pub use progressive::*;

use crate::language::ProgramNode;

/// Whether `node` stands for the same operation as `target`: the kinds are
/// equal, and any name the target specifies is the same on the node.
/// Nothing nested is examined.
pub(crate) fn same_identity(node: &ProgramNode, target: &ProgramNode) -> bool {
    if node.kind() != target.kind() {
        return false;
    }

    if let Some(name) = target.variable_name() {
        if node.variable_name() != Some(name) {
            return false;
        }
    }

    if let Some(name) = target.procedure_name() {
        if node.procedure_name() != Some(name) {
            return false;
        }
    }

    true
}
