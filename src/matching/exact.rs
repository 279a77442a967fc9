//! Strict structural equality, used to decide whether a program *is* a
//! solution rather than whether it is close to one.

use std::fmt;

use crate::language::{Kind, Pattern, ProgramNode};

/// One step from a sequence into a nested position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Statement(usize),
    Body,
    Else,
    Input(usize),
}

/// Location of a node within nested sequences, from the top level down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(pub Vec<Step>);

impl Path {
    pub fn root() -> Path {
        Path(Vec::new())
    }

    pub fn then(&self, step: Step) -> Path {
        let mut steps = self
            .0
            .clone();
        steps.push(step);
        Path(steps)
    }

    pub fn statement(&self, i: usize) -> Path {
        self.then(Step::Statement(i))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self
            .0
            .is_empty()
        {
            return write!(f, "top level");
        }

        let mut first = true;
        for step in &self.0 {
            if !first {
                write!(f, " › ")?;
            }
            first = false;

            match step {
                Step::Statement(i) => write!(f, "statement {}", i + 1)?,
                Step::Body => write!(f, "body")?,
                Step::Else => write!(f, "else")?,
                Step::Input(i) => write!(f, "input {}", i + 1)?,
            }
        }
        Ok(())
    }
}

/// What was expected or found at a position: the node's kind, plus its name
/// when the kind has one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub kind: Kind,
    pub name: Option<String>,
}

impl Label {
    pub fn of(node: &ProgramNode) -> Label {
        Label {
            kind: node.kind(),
            name: node
                .name()
                .map(str::to_string),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} '{}'", self.kind, name),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// The first position at which two programs disagree. Either side is None
/// when that program ran out of statements at this position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub path: Path,
    pub expected: Option<Label>,
    pub found: Option<Label>,
}

impl Mismatch {
    pub fn new(path: Path, expected: Option<&ProgramNode>, found: Option<&ProgramNode>) -> Mismatch {
        Mismatch {
            path,
            expected: expected.map(Label::of),
            found: found.map(Label::of),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}: expected ", self.path)?;
        match &self.expected {
            Some(label) => write!(f, "{}", label)?,
            None => write!(f, "nothing more")?,
        }
        write!(f, ", found ")?;
        match &self.found {
            Some(label) => write!(f, "{}", label),
            None => write!(f, "nothing"),
        }
    }
}

/// True when `student` has exactly the structure of `target`.
pub fn exactly_equals(student: &[ProgramNode], target: &[ProgramNode]) -> bool {
    first_difference(target, student, &Path::root()).is_none()
}

/// Walk two sequences in lockstep and report the first disagreement.
/// `expected` is the authoritative side: names it carries must be matched.
pub fn first_difference(expected: &[ProgramNode], found: &[ProgramNode], path: &Path) -> Option<Mismatch> {
    let longest = expected
        .len()
        .max(found.len());

    for i in 0..longest {
        let here = path.statement(i);
        match (expected.get(i), found.get(i)) {
            (Some(one), Some(two)) => {
                if let Some(mismatch) = node_difference(one, two, &here) {
                    return Some(mismatch);
                }
            }
            (one, two) => return Some(Mismatch::new(here, one, two)),
        }
    }

    None
}

fn node_difference(expected: &ProgramNode, found: &ProgramNode, path: &Path) -> Option<Mismatch> {
    if expected.kind() != found.kind() {
        return Some(Mismatch::new(path.clone(), Some(expected), Some(found)));
    }

    if let Some(name) = expected.variable_name() {
        if found.variable_name() != Some(name) {
            return Some(Mismatch::new(path.clone(), Some(expected), Some(found)));
        }
    }

    if let Some(name) = expected.procedure_name() {
        if found.procedure_name() != Some(name) {
            return Some(Mismatch::new(path.clone(), Some(expected), Some(found)));
        }
    }

    // inputs, compared position by position
    let longest = expected
        .inputs
        .len()
        .max(
            found
                .inputs
                .len(),
        );
    for i in 0..longest {
        let here = path.then(Step::Input(i));
        match (expected.inputs.get(i), found.inputs.get(i)) {
            (Some(one), Some(two)) => {
                if let Some(mismatch) = node_difference(one, two, &here) {
                    return Some(mismatch);
                }
            }
            (one, two) => return Some(Mismatch::new(here, one, two)),
        }
    }

    // kinds are equal, so body presence is equal too
    if let (Some(one), Some(two)) = (expected.body(), found.body()) {
        if let Some(mismatch) = first_difference(one, two, &path.then(Step::Body)) {
            return Some(mismatch);
        }
    }

    match (expected.alternate(), found.alternate()) {
        (Some(one), Some(two)) => first_difference(one, two, &path.then(Step::Else)),
        (None, None) => None,
        (one, two) => Some(Mismatch::new(
            path.then(Step::Else),
            one.and_then(|nodes| nodes.first()),
            two.and_then(|nodes| nodes.first()),
        )),
    }
}

/// The pattern the student has solved exactly, if any. Patterns are tried
/// in priority order, so the reward token returned to the caller is the
/// preferred one when a program happens to satisfy several.
pub fn solved<'p>(student: &[ProgramNode], patterns: &'p [Pattern]) -> Option<&'p Pattern> {
    let mut ordered: Vec<&Pattern> = patterns
        .iter()
        .collect();
    ordered.sort_by_key(|pattern| pattern.priority_rank);

    ordered
        .into_iter()
        .find(|pattern| exactly_equals(student, &pattern.full_sequence))
}
