use anyhow::{Context, Result};
use clap::Parser;

use talon::prediction::classify_new_record;
use talon::tasks::{Pipeline, PipelineRun};
use talon::ui::cli::args::{Answer, Cli};
use talon::ui::cli::prompt::ask_follow_up;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_MAGENTA: &str = "\x1b[35m";
const FG_GREY: &str = "\x1b[90m";

/// The worked example from the capture log: a Cooper's hawk.
const SAMPLE_INSTANCE: [&str; 6] = ["265", "470", "18.7", "23.5", "220", "CH"];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let pipeline = Pipeline::new(cli.pipeline_config());
    let config = pipeline.config();

    println!("{BOLD}{FG_CYAN}▶ Hawks Species Classification{RESET}");
    println!(
        "{DIM}input={}{RESET}  {DIM}folds={}{RESET}  {DIM}seed={}{RESET}  {DIM}max_rows={}{RESET}  {}",
        config.csv_path.display(),
        config.folds,
        config.seed,
        config.max_rows,
        timestamp_now()
    );
    println!(
        "{FG_GREY}────────────────────────────────────────────────────────────────────────{RESET}"
    );

    let run = pipeline.run().context("classification pipeline failed")?;

    println!(
        "{FG_GREEN}✔{RESET} Transcoded {} rows into {}",
        run.rows_transcoded,
        cli.output.display()
    );
    println!(
        "{FG_GREEN}✔{RESET} Loaded {} instances × {} attributes from relation '{}'",
        run.dataset.number_of_instances(),
        run.dataset.header().number_of_attributes(),
        run.dataset.header().relation_name()
    );
    println!(
        "{FG_GREEN}✔{RESET} Selected {} attributes for training",
        run.table.header().number_of_attributes()
    );
    println!(
        "{FG_GREEN}✔{RESET} Trained a {}-node tree ({} leaves) in {:.3}s",
        run.classifier.tree_size(),
        run.classifier.number_of_leaves(),
        run.training_seconds
    );
    println!(
        "{FG_GREEN}✔{RESET} Cross-validated {} folds (seed {}) in {:.3}s",
        run.evaluation.folds, run.evaluation.seed, run.evaluation.cpu_seconds
    );

    print_report(&run);

    let answer = match (cli.answer, &cli.candidate) {
        (Some(answer), _) => answer,
        (None, Some(_)) => Answer::Yes,
        (None, None) => ask_follow_up()?,
    };

    match answer {
        Answer::Yes => {
            let tokens: Vec<&str> = match &cli.candidate {
                Some(raw) => raw.split(',').map(str::trim).collect(),
                None => SAMPLE_INSTANCE.to_vec(),
            };
            classify_candidate(&run, &tokens)?;
        }
        Answer::No => println!("Terminating...."),
    }

    Ok(())
}

fn print_report(run: &PipelineRun) {
    println!();
    println!("{}", run.evaluation);
    println!();
    println!("{}", run.evaluation.model_description);
    println!();
    println!(
        "Accuracy : {:.4}",
        100.0 * run.evaluation.confusion.accuracy()
    );
    println!("Recall : {:.4}", run.evaluation.confusion.weighted_recall());
    println!(
        "Precision : {:.4}",
        run.evaluation.confusion.weighted_precision()
    );
    println!(
        "F1-Score : {:.4}",
        run.evaluation.confusion.weighted_f1_score()
    );
    println!();
}

fn classify_candidate(run: &PipelineRun, tokens: &[&str]) -> Result<()> {
    println!("{BOLD}{FG_CYAN}▶ Classifying new instance{RESET}");
    let prediction = classify_new_record(&run.classifier, run.table.header(), tokens)
        .context("failed to classify the candidate instance")?;

    println!("Instance  : {}", prediction.record.join(","));
    if let Some(actual) = &prediction.actual {
        println!("Declared  : {DIM}{actual}{RESET}");
    }
    println!(
        "Predicted : {BOLD}{FG_MAGENTA}{}{RESET}",
        prediction.predicted
    );
    if let Some(actual) = &prediction.actual {
        println!("{actual}\t{}", prediction.predicted);
    }
    Ok(())
}

fn timestamp_now() -> String {
    use chrono::{Local, SecondsFormat};
    let now = Local::now();
    format!(
        "{DIM}{}{}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        RESET
    )
}
