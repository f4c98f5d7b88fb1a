use crate::error::PipelineError;
use std::fmt;

/// Weighted confusion counts, rows indexed by the actual class and columns
/// by the predicted one.
#[derive(Clone, Debug)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    counts: Vec<Vec<f64>>,
}

impl ConfusionMatrix {
    pub fn new(labels: Vec<String>) -> ConfusionMatrix {
        let n = labels.len();
        ConfusionMatrix {
            labels,
            counts: vec![vec![0.0; n]; n],
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn number_of_classes(&self) -> usize {
        self.labels.len()
    }

    pub fn count(&self, actual: usize, predicted: usize) -> f64 {
        self.counts
            .get(actual)
            .and_then(|row| row.get(predicted))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn record(
        &mut self,
        actual: usize,
        predicted: usize,
        weight: f64,
    ) -> Result<(), PipelineError> {
        let n = self.number_of_classes();
        if actual >= n || predicted >= n {
            return Err(PipelineError::schema(format!(
                "prediction pair ({actual}, {predicted}) is outside the {n}-class domain"
            )));
        }
        self.counts[actual][predicted] += weight;
        Ok(())
    }

    pub fn merge(&mut self, other: &ConfusionMatrix) -> Result<(), PipelineError> {
        if self.labels != other.labels {
            return Err(PipelineError::schema(
                "cannot merge confusion matrices over different class domains",
            ));
        }
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            for (cell, add) in mine.iter_mut().zip(theirs) {
                *cell += add;
            }
        }
        Ok(())
    }

    pub fn total(&self) -> f64 {
        self.counts.iter().flatten().sum()
    }

    pub fn correct(&self) -> f64 {
        (0..self.number_of_classes())
            .map(|index| self.counts[index][index])
            .sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total > 0.0 { self.correct() / total } else { 0.0 }
    }

    fn actual_total(&self, class: usize) -> f64 {
        self.counts[class].iter().sum()
    }

    fn predicted_total(&self, class: usize) -> f64 {
        self.counts.iter().map(|row| row[class]).sum()
    }

    /// Fraction of class members that were found. 0 when the class never
    /// occurs.
    pub fn recall(&self, class: usize) -> f64 {
        let actual = self.actual_total(class);
        if actual > 0.0 {
            self.counts[class][class] / actual
        } else {
            0.0
        }
    }

    /// Fraction of predictions for the class that were right. 0 when the
    /// class is never predicted.
    pub fn precision(&self, class: usize) -> f64 {
        let predicted = self.predicted_total(class);
        if predicted > 0.0 {
            self.counts[class][class] / predicted
        } else {
            0.0
        }
    }

    pub fn f1_score(&self, class: usize) -> f64 {
        let precision = self.precision(class);
        let recall = self.recall(class);
        if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        }
    }

    fn weighted_average(&self, metric: impl Fn(usize) -> f64) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        (0..self.number_of_classes())
            .map(|class| self.actual_total(class) / total * metric(class))
            .sum()
    }

    pub fn weighted_recall(&self) -> f64 {
        self.weighted_average(|class| self.recall(class))
    }

    pub fn weighted_precision(&self) -> f64 {
        self.weighted_average(|class| self.precision(class))
    }

    pub fn weighted_f1_score(&self) -> f64 {
        self.weighted_average(|class| self.f1_score(class))
    }

    fn class_letter(index: usize) -> char {
        if index < 26 {
            (b'a' + index as u8) as char
        } else {
            '?'
        }
    }

    fn format_cell(value: f64) -> String {
        if value.fract() == 0.0 {
            format!("{}", value as i64)
        } else {
            format!("{value:.2}")
        }
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.number_of_classes();
        let cells: Vec<Vec<String>> = self
            .counts
            .iter()
            .map(|row| row.iter().map(|&c| Self::format_cell(c)).collect())
            .collect();
        let width = cells
            .iter()
            .flatten()
            .map(String::len)
            .max()
            .unwrap_or(1)
            .max(2)
            + 2;

        writeln!(f, "=== Confusion Matrix ===")?;
        writeln!(f)?;
        for index in 0..n {
            write!(f, "{:>width$}", Self::class_letter(index))?;
        }
        writeln!(f, "   <-- classified as")?;
        for (index, row) in cells.iter().enumerate() {
            for cell in row {
                write!(f, "{cell:>width$}")?;
            }
            writeln!(
                f,
                " | {} = {}",
                Self::class_letter(index),
                self.labels[index]
            )?;
        }
        Ok(())
    }
}
