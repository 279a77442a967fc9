use blockcheck::matching::Mismatch;
use blockcheck::parsing::ParsingError;
use owo_colors::OwoColorize;

/// Generate problem and detail messages for parsing errors, with a short
/// example of what the parser would have accepted.
pub fn generate_error_message(error: &ParsingError) -> (String, String) {
    match error {
        ParsingError::IllegalParserState(_) => (
            "Illegal parser state".to_string(),
            "Internal parser error. This should not have happened! Sorry.".to_string(),
        ),
        ParsingError::Unrecognized(_) => (
            "Unrecognized statement".to_string(),
            format!(
                r#"
Each line must be a single statement: a call such as {}, an
assignment such as {}, or the start of a block such as {}.
                "#,
                "move_forward()".bright_blue(),
                "count = 0".bright_blue(),
                "repeat(3) {".bright_blue()
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::Expected(_, value) => (
            format!("Expected {}", value),
            format!("The parser was looking for {} but found something else.", value),
        ),
        ParsingError::UnclosedBlock(_) => (
            "Unclosed block".to_string(),
            format!(
                r#"
Every {} that opens the body of an if, loop, or function needs a
matching {} to close it. This block is still open at the end of the
program.
                "#,
                "{".bright_blue(),
                "}".bright_blue()
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::UnexpectedBrace(_) => (
            "Unexpected closing brace".to_string(),
            format!(
                "There is no open block for this {} to close.",
                "}".bright_blue()
            ),
        ),
        ParsingError::DanglingElse(_) => (
            "Else without if".to_string(),
            format!(
                r#"
An {} must directly follow the closing brace of an {} block:

    {}
                "#,
                "else".bright_blue(),
                "if".bright_blue(),
                "if path_ahead() { move_forward() } else { turn_left() }".bright_blue()
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::InvalidExpression(_) => (
            "Invalid expression".to_string(),
            format!(
                r#"
Values are built from names, numbers, quoted text, calls, and the
operators {} {} {} {}, combined with {} and {}.
                "#,
                "+".bright_blue(),
                "-".bright_blue(),
                "==".bright_blue(),
                "<".bright_blue(),
                "and".bright_blue(),
                "or".bright_blue()
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::InvalidLoop(_) => (
            "Invalid loop".to_string(),
            format!(
                r#"
A loop header can take any of these forms:

    {}
    {}
    {}
    {}
                "#,
                "for i in range(3) {".bright_blue(),
                "for i from 1 to 10 by 2 {".bright_blue(),
                "for (let i = 0; i < 5; i++) {".bright_blue(),
                "for node in neighbors(current) {".bright_blue()
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::InvalidFunction(_) => (
            "Invalid function definition".to_string(),
            format!(
                "A function is defined with a name and parenthesized parameters, as in {}",
                "def explore(node) {".bright_blue()
            ),
        ),
        ParsingError::InvalidIdentifier(_, name) => (
            format!("Invalid identifier '{}'", name),
            format!(
                r#"
Names start with a letter or underscore, followed by letters, digits, or
underscores. For example {}, {}, or {}.
                "#,
                "visited".bright_blue(),
                "next_node".bright_blue(),
                "step2".bright_blue()
            )
            .trim_ascii()
            .to_string(),
        ),
    }
}

/// Problem and detail messages for pseudocode that parses but is not the
/// same program as the blocks.
pub fn generate_mismatch_message(mismatch: &Mismatch) -> (String, String) {
    let expected = match &mismatch.expected {
        Some(label) => label.to_string(),
        None => "nothing more".to_string(),
    };
    let found = match &mismatch.found {
        Some(label) => label.to_string(),
        None => "nothing".to_string(),
    };

    (
        "Pseudocode does not match the blocks".to_string(),
        format!(
            "At {} the blocks have {} but the pseudocode has {}.",
            mismatch
                .path
                .bold(),
            expected.bright_blue(),
            found.bright_red()
        ),
    )
}
