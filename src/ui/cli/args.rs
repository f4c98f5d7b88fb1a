use std::path::PathBuf;

use clap::{Parser, ValueEnum, ValueHint};

use crate::schema::{DEFAULT_FOLDS, DEFAULT_MAX_ROWS, DEFAULT_SEED};
use crate::tasks::PipelineConfig;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Trains and cross-validates a decision tree on a hawks capture export"
)]
pub struct Cli {
    /// Raw semicolon-delimited export to ingest
    #[arg(
        long,
        default_value = "Hawks.csv",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub input: PathBuf,

    /// Where to write the transcoded relation
    #[arg(
        long,
        default_value = "Hawks.arff",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub output: PathBuf,

    /// Cross-validation folds
    #[arg(
        long,
        default_value_t = DEFAULT_FOLDS as u64,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(2..),
    )]
    pub folds: u64,

    /// Seed for the fold shuffle
    #[arg(long, default_value_t = DEFAULT_SEED, value_name = "SEED")]
    pub seed: u64,

    /// Ingest at most this many data rows
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_ROWS as u64,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub max_rows: u64,

    /// Answer the follow-up prompt without waiting for input
    #[arg(long, value_enum, ignore_case = true, value_name = "ANSWER")]
    pub answer: Option<Answer>,

    /// Classify these comma-separated measurements instead of the built-in
    /// sample
    #[arg(long, value_name = "VALUES")]
    pub candidate: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Answer {
    Yes,
    No,
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            csv_path: self.input.clone(),
            arff_path: self.output.clone(),
            folds: self.folds as usize,
            seed: self.seed,
            max_rows: self.max_rows as usize,
        }
    }
}
