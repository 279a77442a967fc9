//! Structural matching of learner programs against reference solutions.
//!
//! A program arrives either as a saved block document or as pseudocode. Both
//! are reduced to the same sequence of [`language::ProgramNode`]s, which is
//! then compared against a puzzle's [`language::Pattern`]s: exactly, by
//! percentage, by checkpoint, and for the single next hint.

#[macro_use]
mod regex;

pub mod document;
pub mod language;
pub mod matching;
pub mod normalize;
pub mod parsing;
pub mod puzzle;
