use super::messages::{generate_error_message, generate_mismatch_message};
use blockcheck::language::LoadingError;
use blockcheck::matching::Mismatch;
use blockcheck::parsing::ParsingError;
use owo_colors::OwoColorize;
use std::path::Path;

/// Format a parsing error with full details including source code context
pub fn full_parsing_error<'i>(error: &ParsingError, filename: &'i Path, source: &'i str) -> String {
    let (problem, details) = generate_error_message(error);
    let offset = error.offset();

    let i = calculate_line_number(source, offset);
    let j = calculate_column_number(source, offset);

    let code = source
        .lines()
        .nth(i)
        .unwrap_or("?");
    let line = i + 1;
    let column = j + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    format!(
        r#"
{}: {}:{}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}

{}
        "#,
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        column,
        problem.bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
        '^'.bright_red(),
        details
    )
    .trim_ascii()
    .to_string()
}

/// Format a parsing error with concise single-line output
pub fn concise_parsing_error<'i>(error: &ParsingError, filename: &'i Path, source: &'i str) -> String {
    let (problem, _) = generate_error_message(error);
    let offset = error.offset();
    let i = calculate_line_number(source, offset);
    let j = calculate_column_number(source, offset);
    let line = i + 1;
    let column = j + 1;

    format!(
        "{}: {}:{}:{} {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        column,
        problem.bold(),
    )
}

/// Format a cross-representation mismatch. There is no single offset to
/// point at; the path locates the statement instead.
pub fn full_mismatch(mismatch: &Mismatch, filename: &Path) -> String {
    let (problem, details) = generate_mismatch_message(mismatch);

    format!(
        "{}: {} {}\n\n{}",
        "error".bright_red(),
        filename.to_string_lossy(),
        problem.bold(),
        details
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    let mut message = format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    );
    if !error
        .details
        .is_empty()
    {
        message.push_str(&format!(" ({})", error.details));
    }
    message
}

// Helper functions for line/column calculation

/// Clamp an offset to the content and back onto a character boundary.
fn boundary(content: &str, offset: usize) -> usize {
    let mut offset = offset.min(content.len());
    while !content.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn calculate_line_number(content: &str, offset: usize) -> usize {
    content[..boundary(content, offset)]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
}

fn calculate_column_number(content: &str, offset: usize) -> usize {
    let offset = boundary(content, offset);
    let before = &content[..offset];
    match before.rfind('\n') {
        Some(start) => content[start + 1..offset]
            .chars()
            .count(),
        None => before
            .chars()
            .count(),
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn line_and_column() {
        let source = "move_forward()\n  turn_left(\n";
        assert_eq!(calculate_line_number(source, 0), 0);
        assert_eq!(calculate_line_number(source, 17), 1);
        assert_eq!(calculate_column_number(source, 17), 2);
        assert_eq!(calculate_column_number(source, 3), 3);
        // past the end is clamped rather than panicking
        assert_eq!(calculate_line_number(source, 500), 2);
    }

    #[test]
    fn offsets_inside_characters() {
        let source = "for aéé in range(1 2) {\n}";
        assert_eq!(calculate_line_number(source, 6), 0);
        assert_eq!(calculate_column_number(source, 6), 5);

        let error = ParsingError::InvalidExpression(6);
        let message = full_parsing_error(&error, Path::new("mid.txt"), source);
        assert!(message.contains("mid.txt:1:6"));
    }

    #[test]
    fn concise_mentions_location() {
        let source = "move_forward()\n}";
        let error = ParsingError::UnexpectedBrace(15);
        let message = concise_parsing_error(&error, Path::new("code.txt"), source);
        assert!(message.contains("code.txt:2:1"));
    }
}
