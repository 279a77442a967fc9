//! parser for learner pseudocode

use std::path::Path;
use tracing::debug;

use crate::language::{LoadingError, ProgramNode};

mod expression;
mod parser;
mod rewrite;
mod validate;

pub use parser::ParsingError;
pub use rewrite::promote_implicit_else;
pub use validate::{validate_equivalence, Validation};

/// Read a file and return an owned String. We pass that ownership back to the
/// main function so that anything parsed from it can borrow from it.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse pseudocode into a normalized program, or report the first problem
/// encountered.
pub fn parse_with_errors(content: &str) -> Result<Vec<ProgramNode>, ParsingError> {
    let mut input = parser::Parser::new();
    input.initialize(content);

    let result = input.read_statements();
    match &result {
        Ok(nodes) => {
            debug!(
                "Found {} statement{}",
                nodes.len(),
                if nodes.len() == 1 { "" } else { "s" }
            );
        }
        Err(error) => {
            debug!("error: {:?}", error);
        }
    }
    result
}

/// Parse pseudocode into a normalized program. Text that does not parse,
/// which is the normal state of a program still being typed, gives no
/// statements at all.
pub fn parse_pseudocode(content: &str) -> Vec<ProgramNode> {
    parse_with_errors(content).unwrap_or_default()
}
