//! Puzzle files: the reference solutions an instructor authored for a
//! level, each with its ordered checkpoints and their hints.
//!
//! Programs in a puzzle file are written either as pseudocode or as a saved
//! block document:
//!
//! ```json
//! {
//!     "complete_message": "Well done!",
//!     "patterns": [
//!         {
//!             "name": "loop",
//!             "priority": 1,
//!             "reward": "gold_star",
//!             "solution": "repeat(3) {\n    move_forward()\n}\ncollect()",
//!             "checkpoints": [
//!                 { "hint": "Start with a repeat block", "highlight": ["repeat"],
//!                   "program": "repeat(3) {\n}" }
//!             ]
//!         }
//!     ]
//! }
//! ```

use serde::Deserialize;
use tracing::{debug, warn};

use crate::document::BlockDocument;
use crate::language::{Checkpoint, Pattern, ProgramNode};
use crate::matching::COMPLETE_MESSAGE;
use crate::normalize::normalize_document;
use crate::parsing::{parse_with_errors, ParsingError};

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Puzzle {
    #[serde(default)]
    pub patterns: Vec<PatternSource>,
    #[serde(default)]
    pub complete_message: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PatternSource {
    pub name: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub reward: String,
    pub solution: ProgramSource,
    #[serde(default)]
    pub checkpoints: Vec<CheckpointSource>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CheckpointSource {
    pub hint: String,
    #[serde(default)]
    pub highlight: Vec<String>,
    pub program: ProgramSource,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProgramSource {
    Pseudocode(String),
    Blocks(BlockDocument),
}

impl ProgramSource {
    /// Normalize the program. Unlike a learner's program, an authored one
    /// that does not parse is a mistake worth reporting.
    pub fn normalize(&self) -> Result<Vec<ProgramNode>, ParsingError> {
        match self {
            ProgramSource::Pseudocode(text) => parse_with_errors(text),
            ProgramSource::Blocks(document) => Ok(normalize_document(document, None)),
        }
    }
}

impl Puzzle {
    pub fn from_json(content: &str) -> Result<Puzzle, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// The text shown once every checkpoint of a pattern is satisfied.
    pub fn complete_message(&self) -> &str {
        self.complete_message
            .as_deref()
            .unwrap_or(COMPLETE_MESSAGE)
    }

    /// Normalize every authored pattern, in the order written.
    pub fn patterns(&self) -> Result<Vec<Pattern>, ParsingError> {
        self.patterns
            .iter()
            .map(|source| {
                source
                    .to_pattern()
                    .inspect_err(|error| {
                        warn!("Pattern '{}' does not parse: {}", source.name, error.message());
                    })
            })
            .collect()
    }
}

impl PatternSource {
    fn to_pattern(&self) -> Result<Pattern, ParsingError> {
        let mut pattern = Pattern::new(
            self.name
                .as_str(),
            self.solution
                .normalize()?,
        )
        .with_rank(self.priority);
        pattern.reward_key = self
            .reward
            .clone();

        for source in &self.checkpoints {
            let mut checkpoint = Checkpoint::new(
                source
                    .program
                    .normalize()?,
                source
                    .hint
                    .as_str(),
            );
            checkpoint
                .highlight
                .extend(
                    source
                        .highlight
                        .iter()
                        .cloned(),
                );
            pattern = pattern.with_checkpoint(checkpoint);
        }

        debug!(
            "Loaded pattern '{}' with {} checkpoint{}",
            pattern.name,
            pattern
                .checkpoints
                .len(),
            if pattern
                .checkpoints
                .len()
                == 1
            {
                ""
            } else {
                "s"
            }
        );

        Ok(pattern)
    }
}
