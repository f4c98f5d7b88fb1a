use crate::classifiers::Classifier;
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::error::PipelineError;
use crate::evaluation::confusion_matrix::ConfusionMatrix;
use crate::evaluation::result::EvaluationResult;
use cpu_time::ThreadTime;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Stratified k-fold evaluation. A fixed seed makes the shuffle, the fold
/// membership and therefore every reported figure reproducible.
#[derive(Debug)]
pub struct CrossValidation {
    folds: usize,
    seed: u64,
}

impl CrossValidation {
    pub fn new(folds: usize, seed: u64) -> Result<CrossValidation, PipelineError> {
        if folds < 2 {
            return Err(PipelineError::schema(format!(
                "cross-validation needs at least 2 folds, got {folds}"
            )));
        }
        Ok(CrossValidation { folds, seed })
    }

    pub fn folds(&self) -> usize {
        self.folds
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Trains one model per fold on the other folds and scores it on the
    /// held-out one, accumulating a single confusion matrix.
    pub fn evaluate<C: Classifier>(
        &self,
        dataset: &Dataset,
    ) -> Result<EvaluationResult, PipelineError> {
        let labels = dataset.header().class_labels().ok_or_else(|| {
            PipelineError::schema(format!(
                "relation '{}' has no nominal class to stratify on",
                dataset.header().relation_name()
            ))
        })?;

        let clock = ThreadTime::now();
        let fold_rows = self.stratified_folds(dataset)?;
        let mut confusion = ConfusionMatrix::new(labels);

        for held_out in 0..self.folds {
            let training_rows: Vec<usize> = fold_rows
                .iter()
                .enumerate()
                .filter(|&(fold, _)| fold != held_out)
                .flat_map(|(_, rows)| rows.iter().copied())
                .collect();
            let training = Self::subset(dataset, &training_rows);
            let classifier = C::train(&training)?;

            for &row in &fold_rows[held_out] {
                let instance = &dataset.instances()[row];
                let Some(actual) = instance.class_value() else {
                    continue;
                };
                if let Some(predicted) = classifier.predict(instance) {
                    confusion.record(actual as usize, predicted, instance.weight())?;
                }
            }
        }

        Ok(EvaluationResult {
            folds: self.folds,
            seed: self.seed,
            confusion,
            model_description: String::new(),
            cpu_seconds: clock.elapsed().as_secs_f64(),
        })
    }

    /// Shuffles the row order with the configured seed, groups rows by
    /// class, then deals them round-robin so every fold sees the full class
    /// mix.
    fn stratified_folds(&self, dataset: &Dataset) -> Result<Vec<Vec<usize>>, PipelineError> {
        let n = dataset.number_of_instances();
        if self.folds > n {
            return Err(PipelineError::schema(format!(
                "cannot split {n} instances into {} folds",
                self.folds
            )));
        }
        let num_classes = dataset.header().number_of_classes();

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); num_classes];
        for row in indices {
            let class = dataset.instances()[row]
                .class_value()
                .map(|value| value as usize)
                .filter(|&class| class < num_classes)
                .ok_or_else(|| {
                    PipelineError::schema(format!(
                        "instance {} has no class label; stratified folding needs labeled rows",
                        row + 1
                    ))
                })?;
            by_class[class].push(row);
        }

        let mut folds: Vec<Vec<usize>> = vec![Vec::new(); self.folds];
        let mut cursor = 0;
        for class_rows in by_class {
            for row in class_rows {
                folds[cursor].push(row);
                cursor = (cursor + 1) % self.folds;
            }
        }
        Ok(folds)
    }

    fn subset(dataset: &Dataset, rows: &[usize]) -> Dataset {
        let instances = rows
            .iter()
            .map(|&row| dataset.instances()[row].clone())
            .collect();
        Dataset::with_instances(std::sync::Arc::clone(dataset.header()), instances)
    }
}

/// Replays a trained classifier over a labeled table and tallies the hits
/// and misses.
pub fn score<C: Classifier>(
    classifier: &C,
    dataset: &Dataset,
) -> Result<ConfusionMatrix, PipelineError> {
    let labels = dataset.header().class_labels().ok_or_else(|| {
        PipelineError::schema(format!(
            "relation '{}' has no nominal class to score against",
            dataset.header().relation_name()
        ))
    })?;
    let mut confusion = ConfusionMatrix::new(labels);
    for instance in dataset.instances() {
        let Some(actual) = instance.class_value() else {
            continue;
        };
        if let Some(predicted) = classifier.predict(instance) {
            confusion.record(actual as usize, predicted, instance.weight())?;
        }
    }
    Ok(confusion)
}
