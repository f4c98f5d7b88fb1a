use anyhow::{Context, Result};
use inquire::Text;

use crate::error::PipelineError;
use crate::ui::cli::args::Answer;

pub const FOLLOW_UP_PROMPT: &str = "Do you want to test with a new instance? [Yes/No]";

/// Accepts `yes` or `no` in any casing; anything else is an error, not a
/// retry.
pub fn parse_answer(raw: &str) -> Result<Answer, PipelineError> {
    match raw.trim().to_lowercase().as_str() {
        "yes" => Ok(Answer::Yes),
        "no" => Ok(Answer::No),
        _ => Err(PipelineError::user_input(raw.trim())),
    }
}

pub fn ask_follow_up() -> Result<Answer> {
    let raw = Text::new(FOLLOW_UP_PROMPT)
        .prompt()
        .context("failed while reading the follow-up answer")?;
    Ok(parse_answer(&raw)?)
}
