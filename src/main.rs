use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::{debug, info, Level};

use blockcheck::document::BlockDocument;
use blockcheck::language::{LoadingError, Pattern, ProgramNode};
use blockcheck::matching::{best_pattern_match, best_progressive_match, next_hint_with, solved};
use blockcheck::normalize::normalize_document;
use blockcheck::parsing::{self, parse_with_errors, validate_equivalence};
use blockcheck::puzzle::Puzzle;

mod output;
mod problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("blockcheck")
        .version(VERSION)
        .propagate_version(true)
        .about("Compare a learner's program against a puzzle's reference solutions.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log each matching decision to standard error."),
        )
        .subcommand(
            Command::new("match")
                .about("Report how closely a program matches the puzzle's patterns")
                .arg(
                    Arg::new("puzzle")
                        .required(true)
                        .help("The puzzle file (JSON) holding the reference patterns."),
                )
                .arg(
                    Arg::new("program")
                        .required(true)
                        .help("The learner's program, as a saved block document (.json) or as pseudocode."),
                ),
        )
        .subcommand(
            Command::new("hint")
                .about("Show the next hint towards a pattern")
                .arg(
                    Arg::new("pattern")
                        .long("pattern")
                        .help("Name of the pattern to work towards. Defaults to the one the program is furthest along."),
                )
                .arg(
                    Arg::new("puzzle")
                        .required(true)
                        .help("The puzzle file (JSON) holding the reference patterns."),
                )
                .arg(
                    Arg::new("program")
                        .required(true)
                        .help("The learner's program, as a saved block document (.json) or as pseudocode."),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check that pseudocode is the same program as a block document")
                .arg(
                    Arg::new("blocks")
                        .required(true)
                        .help("The saved block document (JSON)."),
                )
                .arg(
                    Arg::new("code")
                        .required(true)
                        .help("The pseudocode file."),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Print the normalized form of a program as JSON")
                .arg(
                    Arg::new("program")
                        .required(true)
                        .help("The program, as a saved block document (.json) or as pseudocode."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match matches.subcommand() {
        Some(("match", submatches)) => run_match(submatches),
        Some(("hint", submatches)) => run_hint(submatches),
        Some(("validate", submatches)) => run_validate(submatches),
        Some(("parse", submatches)) => run_parse(submatches),
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: blockcheck [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn filename<'a>(submatches: &'a ArgMatches, name: &str) -> &'a Path {
    match submatches.get_one::<String>(name) {
        Some(value) => Path::new(value),
        None => {
            eprintln!("{}: missing argument '{}'", "error".bright_red(), name);
            std::process::exit(1);
        }
    }
}

fn read(filename: &Path) -> String {
    match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    }
}

fn is_block_document(filename: &Path) -> bool {
    filename
        .extension()
        .map(|extension| extension == "json")
        .unwrap_or(false)
}

fn read_blocks(filename: &Path, content: &str) -> Vec<ProgramNode> {
    match BlockDocument::from_json(content) {
        Ok(document) => normalize_document(&document, None),
        Err(error) => {
            let error = LoadingError {
                problem: "Invalid block document".to_string(),
                details: error.to_string(),
                filename,
            };
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    }
}

/// A learner's program. Pseudocode that does not parse is a program still
/// being written, and matches as an empty one; where it stopped parsing is
/// noted on one line.
fn read_program(filename: &Path) -> Vec<ProgramNode> {
    let content = read(filename);
    if is_block_document(filename) {
        return read_blocks(filename, &content);
    }

    match parse_with_errors(&content) {
        Ok(nodes) => nodes,
        Err(error) => {
            eprintln!("{}", problem::concise_parsing_error(&error, filename, &content));
            Vec::new()
        }
    }
}

/// Pseudocode that is expected to be complete; failing to parse is shown
/// to the user with the offending line.
fn read_pseudocode(filename: &Path) -> Vec<ProgramNode> {
    let content = read(filename);
    match parse_with_errors(&content) {
        Ok(nodes) => nodes,
        Err(error) => {
            eprintln!("{}", problem::full_parsing_error(&error, filename, &content));
            std::process::exit(1);
        }
    }
}

fn read_puzzle(filename: &Path) -> (Puzzle, Vec<Pattern>) {
    let content = read(filename);

    let puzzle = match Puzzle::from_json(&content) {
        Ok(puzzle) => puzzle,
        Err(error) => {
            let error = LoadingError {
                problem: "Invalid puzzle file".to_string(),
                details: error.to_string(),
                filename,
            };
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    };

    match puzzle.patterns() {
        Ok(patterns) => {
            info!("Loaded {} patterns from {}", patterns.len(), filename.display());
            (puzzle, patterns)
        }
        Err(error) => {
            let error = LoadingError {
                problem: "Pattern does not parse".to_string(),
                details: error.message(),
                filename,
            };
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    }
}

fn print_report(result: Result<String, tinytemplate::error::Error>) {
    match result {
        Ok(text) => print!("{}", text),
        Err(error) => {
            eprintln!("{}: unable to render report: {}", "error".bright_red(), error);
            std::process::exit(1);
        }
    }
}

fn run_match(submatches: &ArgMatches) {
    let (_, patterns) = read_puzzle(filename(submatches, "puzzle"));
    let program = filename(submatches, "program");
    let student = read_program(program);

    let exact = solved(&student, &patterns);
    let best = best_pattern_match(&student, &patterns);
    let progress = best_progressive_match(&student, &patterns);

    let report = output::MatchReport {
        program: program
            .to_string_lossy()
            .to_string(),
        statements: student.len(),
        plural: student.len() != 1,
        solved: exact.map(|pattern| output::Solved {
            name: pattern
                .name
                .clone(),
            reward: pattern
                .reward_key
                .clone(),
        }),
        best: best
            .best_pattern
            .map(|pattern| output::Closest {
                name: pattern
                    .name
                    .clone(),
                percentage: best.percentage,
                matched: best.matched_count,
                total: best.total_count,
            }),
        progress: progress.map(|selected| output::Progress {
            name: selected
                .pattern
                .name
                .clone(),
            reached: selected
                .result
                .matched_checkpoint_count,
        }),
    };

    print_report(output::match_report(&report));
}

fn run_hint(submatches: &ArgMatches) {
    let (puzzle, patterns) = read_puzzle(filename(submatches, "puzzle"));
    let student = read_program(filename(submatches, "program"));

    let pattern = match submatches.get_one::<String>("pattern") {
        Some(name) => patterns
            .iter()
            .find(|pattern| &pattern.name == name),
        None => best_progressive_match(&student, &patterns).map(|selected| selected.pattern),
    };

    let pattern = match pattern {
        Some(pattern) => pattern,
        None => {
            eprintln!("{}: no matching pattern in puzzle", "error".bright_red());
            std::process::exit(1);
        }
    };

    debug!("Giving hints towards '{}'", pattern.name);
    let hint = next_hint_with(&student, pattern, puzzle.complete_message());

    let report = output::HintReport {
        pattern: pattern
            .name
            .clone(),
        step: if hint.is_complete {
            hint.step_index
        } else {
            hint.step_index + 1
        },
        steps: pattern
            .checkpoints
            .len(),
        message: hint
            .message
            .to_string(),
        complete: hint.is_complete,
        highlight: hint
            .highlight
            .join(", "),
    };

    print_report(output::hint_report(&report));
}

fn run_validate(submatches: &ArgMatches) {
    let blocks = filename(submatches, "blocks");
    let code = filename(submatches, "code");

    let content = read(blocks);
    let expected = read_blocks(blocks, &content);
    let found = read_pseudocode(code);

    let validation = validate_equivalence(&expected, &found);
    match validation.error {
        None => {
            let report = output::ValidReport {
                code: code
                    .to_string_lossy()
                    .to_string(),
                blocks: blocks
                    .to_string_lossy()
                    .to_string(),
            };
            print_report(output::valid_report(&report));
        }
        Some(mismatch) => {
            eprintln!("{}", problem::full_mismatch(&mismatch, code));
            std::process::exit(1);
        }
    }
}

fn run_parse(submatches: &ArgMatches) {
    let program = filename(submatches, "program");
    let nodes = if is_block_document(program) {
        let content = read(program);
        read_blocks(program, &content)
    } else {
        read_pseudocode(program)
    };

    match serde_json::to_string_pretty(&nodes) {
        Ok(json) => println!("{}", json),
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            std::process::exit(1);
        }
    }
}
