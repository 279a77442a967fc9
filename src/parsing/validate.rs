//! Checking that a program written as pseudocode is the same program as one
//! assembled from blocks.

use tracing::debug;

use super::rewrite::promote_implicit_else;
use crate::language::*;
use crate::matching::{first_difference, Mismatch, Path, Step};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    /// The first disagreement, when there is one.
    pub error: Option<Mismatch>,
}

/// Compare the block form of a program (authoritative) against its
/// pseudocode form. Both sides are put through the implicit-else rewrite
/// first, so either way of writing an early exit compares equal.
pub fn validate_equivalence(blocks: &[ProgramNode], text: &[ProgramNode]) -> Validation {
    let blocks = promote_implicit_else(blocks.to_vec());
    let text = promote_implicit_else(text.to_vec());

    match compare_sequences(&blocks, &text, &Path::root()) {
        None => Validation {
            valid: true,
            error: None,
        },
        Some(mismatch) => {
            debug!("Pseudocode differs from blocks {}", mismatch);
            Validation {
                valid: false,
                error: Some(mismatch),
            }
        }
    }
}

/// Pseudocode statements that may be present without a counterpart in the
/// blocks: declarations and writes into containers.
fn is_skippable(node: &ProgramNode) -> bool {
    matches!(
        node.kind(),
        Kind::Assignment | Kind::Call(Builtin::Append) | Kind::Call(Builtin::Set)
    )
}

fn is_logical(source: &str) -> bool {
    let re = regex!(r"(?:&&|\|\||\band\b|\bor\b)");
    re.is_match(source)
}

fn is_negated(source: &str) -> bool {
    let re = regex!(r"^\s*(?:!|not\b)");
    re.is_match(source)
}

/// Pairs of different kinds that are nonetheless accepted as the same
/// thing. Only consulted once the kinds are known to differ.
fn equivalent(one: &ProgramNode, two: &ProgramNode) -> bool {
    fn directed(one: &ProgramNode, two: &ProgramNode) -> bool {
        match (one.kind(), two.kind()) {
            (Kind::Repeat, Kind::For) => true,
            (Kind::Compare, Kind::Combine) => one
                .source_text()
                .map(is_logical)
                .unwrap_or(false),
            (Kind::Compare, Kind::Negate) => one
                .source_text()
                .map(is_negated)
                .unwrap_or(false),
            _ => false,
        }
    }

    directed(one, two) || directed(two, one)
}

/// Walk the two sequences together. Skippable pseudocode statements that
/// do not line up with the next block are passed over; nothing is ever
/// revisited. The reported position is the one on the block side.
fn compare_sequences(expected: &[ProgramNode], found: &[ProgramNode], path: &Path) -> Option<Mismatch> {
    let mut i = 0;
    let mut j = 0;
    let mut skipped: Option<Mismatch> = None;

    loop {
        let here = path.statement(i);
        match (expected.get(i), found.get(j)) {
            (None, None) => return None,
            (Some(one), Some(two)) => match compare_pair(one, two, &here) {
                None => {
                    skipped = None;
                    i += 1;
                    j += 1;
                }
                Some(mismatch) => {
                    if is_skippable(two) {
                        skipped.get_or_insert(mismatch);
                        j += 1;
                    } else {
                        return Some(skipped.unwrap_or(mismatch));
                    }
                }
            },
            (None, Some(two)) => {
                if is_skippable(two) {
                    j += 1;
                } else {
                    return Some(skipped.unwrap_or_else(|| Mismatch::new(here, None, Some(two))));
                }
            }
            (Some(one), None) => {
                return Some(skipped.unwrap_or_else(|| Mismatch::new(here, Some(one), None)));
            }
        }
    }
}

fn compare_pair(expected: &ProgramNode, found: &ProgramNode, path: &Path) -> Option<Mismatch> {
    let different = || Some(Mismatch::new(path.clone(), Some(expected), Some(found)));

    let same_kind = expected.kind() == found.kind();
    if !same_kind && !equivalent(expected, found) {
        return different();
    }

    if same_kind {
        if let Some(name) = expected.variable_name() {
            if found.variable_name() != Some(name) {
                return different();
            }
        }
        if let Some(name) = expected.procedure_name() {
            if found.procedure_name() != Some(name) {
                return different();
            }
        }
    }

    // a condition kept as text stands in for whatever it contains
    let opaque = expected
        .source_text()
        .is_some()
        || found
            .source_text()
            .is_some();

    // loop bounds are written in different conventions on the two sides,
    // inclusive `from .. to` in blocks and exclusive `range(..)` in text
    let counted = expected.kind() == Kind::For;

    if same_kind && !opaque && !counted {
        if let Some(mismatch) = compare_inputs(&expected.inputs, &found.inputs, path) {
            return Some(mismatch);
        }
    }

    if let (Some(one), Some(two)) = (expected.body(), found.body()) {
        if let Some(mismatch) = compare_sequences(one, two, &path.then(Step::Body)) {
            return Some(mismatch);
        }
    }

    let here = path.then(Step::Else);
    if expected.has_implicit_else() || found.has_implicit_else() {
        return first_difference(
            expected
                .alternate()
                .unwrap_or(&[]),
            found
                .alternate()
                .unwrap_or(&[]),
            &here,
        );
    }

    match (expected.alternate(), found.alternate()) {
        (Some(one), Some(two)) => compare_sequences(one, two, &here),
        (None, None) => None,
        (one, two) => Some(Mismatch::new(
            here,
            one.and_then(|nodes| nodes.first()),
            two.and_then(|nodes| nodes.first()),
        )),
    }
}

fn compare_inputs(expected: &[ProgramNode], found: &[ProgramNode], path: &Path) -> Option<Mismatch> {
    let longest = expected
        .len()
        .max(found.len());

    for i in 0..longest {
        let here = path.then(Step::Input(i));
        match (expected.get(i), found.get(i)) {
            (Some(one), Some(two)) => {
                if let Some(mismatch) = compare_pair(one, two, &here) {
                    return Some(mismatch);
                }
            }
            (one, two) => return Some(Mismatch::new(here, one, two)),
        }
    }

    None
}
