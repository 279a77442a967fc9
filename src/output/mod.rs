//! Report generation for the blockcheck command line

use serde::Serialize;
use tinytemplate::{error::Error, TinyTemplate};
use tracing::debug;

static MATCH: &str = r#"{program}: {statements} statement{{ if plural }}s{{ endif }}
{{ if solved }}solved: {solved.name}{{ if solved.reward }} (reward {solved.reward}){{ endif }}
{{ else }}not yet solved
{{ endif }}{{ if best }}closest: {best.name} at {best.percentage}% ({best.matched} of {best.total})
{{ endif }}{{ if progress }}progress: {progress.name}, checkpoint {progress.reached} of 3
{{ endif }}"#;

static HINT: &str = r#"{pattern}: step {step} of {steps}{{ if complete }} (complete){{ endif }}
hint: {message}
{{ if highlight }}highlight: {highlight}
{{ endif }}"#;

static VALID: &str = r#"{code}: same program as {blocks}
"#;

#[derive(Serialize)]
pub struct MatchReport {
    pub program: String,
    pub statements: usize,
    pub plural: bool,
    pub solved: Option<Solved>,
    pub best: Option<Closest>,
    pub progress: Option<Progress>,
}

#[derive(Serialize)]
pub struct Solved {
    pub name: String,
    pub reward: String,
}

#[derive(Serialize)]
pub struct Closest {
    pub name: String,
    pub percentage: u8,
    pub matched: usize,
    pub total: usize,
}

#[derive(Serialize)]
pub struct Progress {
    pub name: String,
    pub reached: u8,
}

#[derive(Serialize)]
pub struct HintReport {
    pub pattern: String,
    /// One-based, for people.
    pub step: usize,
    pub steps: usize,
    pub message: String,
    pub complete: bool,
    pub highlight: String,
}

#[derive(Serialize)]
pub struct ValidReport {
    pub code: String,
    pub blocks: String,
}

fn render<C: Serialize>(name: &'static str, template: &'static str, context: &C) -> Result<String, Error> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(name, template)?;

    let rendered = tt.render(name, context)?;
    debug!("Rendered {} report, {} bytes", name, rendered.len());
    Ok(rendered)
}

pub fn match_report(context: &MatchReport) -> Result<String, Error> {
    render("match", MATCH, context)
}

pub fn hint_report(context: &HintReport) -> Result<String, Error> {
    render("hint", HINT, context)
}

pub fn valid_report(context: &ValidReport) -> Result<String, Error> {
    render("valid", VALID, context)
}
