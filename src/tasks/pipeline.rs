use crate::arff::{convert_csv_to_arff, load_dataset};
use crate::classifiers::{Classifier, DecisionTree};
use crate::core::dataset::Dataset;
use crate::error::PipelineError;
use crate::evaluation::{CrossValidation, EvaluationResult};
use crate::filters::RemoveAttributes;
use crate::schema::{
    DEFAULT_FOLDS, DEFAULT_MAX_ROWS, DEFAULT_SEED, IRRELEVANT_ATTRIBUTE_INDICES, hawks_header,
};
use cpu_time::ThreadTime;
use std::path::PathBuf;

pub struct PipelineConfig {
    pub csv_path: PathBuf,
    pub arff_path: PathBuf,
    pub folds: usize,
    pub seed: u64,
    pub max_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("Hawks.csv"),
            arff_path: PathBuf::from("Hawks.arff"),
            folds: DEFAULT_FOLDS,
            seed: DEFAULT_SEED,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// Everything one pass produces, kept around so the caller can report each
/// stage and classify follow-up candidates with the trained model.
#[derive(Debug)]
pub struct PipelineRun {
    pub rows_transcoded: usize,
    pub dataset: Dataset,
    pub table: Dataset,
    pub classifier: DecisionTree,
    pub evaluation: EvaluationResult,
    pub training_seconds: f64,
}

/// The full batch flow: transcode the raw export, load it back as a typed
/// table, drop the circumstantial columns, grow a tree and cross-validate
/// it.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Pipeline {
        Pipeline { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self) -> Result<PipelineRun, PipelineError> {
        let expected_header = hawks_header();
        let rows_transcoded = convert_csv_to_arff(
            &self.config.csv_path,
            &self.config.arff_path,
            &expected_header,
            self.config.max_rows,
        )?;

        let dataset = load_dataset(&self.config.arff_path)?;
        if let Some(mismatch) = expected_header.first_mismatch_against(dataset.header()) {
            return Err(PipelineError::schema(format!(
                "loaded relation does not match the hawks layout: {mismatch}"
            )));
        }

        let filter = RemoveAttributes::new(&IRRELEVANT_ATTRIBUTE_INDICES);
        let table = filter.apply(&dataset)?;

        let clock = ThreadTime::now();
        let classifier = DecisionTree::train(&table)?;
        let training_seconds = clock.elapsed().as_secs_f64();

        let validation = CrossValidation::new(self.config.folds, self.config.seed)?;
        let mut evaluation = validation.evaluate::<DecisionTree>(&table)?;
        evaluation.model_description = classifier.to_string();

        Ok(PipelineRun {
            rows_transcoded,
            dataset,
            table,
            classifier,
            evaluation,
            training_seconds,
        })
    }
}
