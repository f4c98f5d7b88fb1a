use crate::evaluation::confusion_matrix::ConfusionMatrix;
use std::fmt;

/// Outcome of one cross-validated run. CPU time is informational only; the
/// counted figures are fully determined by the dataset, fold count and seed.
#[derive(Debug)]
pub struct EvaluationResult {
    pub folds: usize,
    pub seed: u64,
    pub confusion: ConfusionMatrix,
    /// Rendering of the model trained on the whole table. The fold loop only
    /// ever sees per-fold models, so the owner of both attaches this.
    pub model_description: String,
    pub cpu_seconds: f64,
}

impl EvaluationResult {
    pub fn summary(&self) -> String {
        let total = self.confusion.total();
        let correct = self.confusion.correct();
        let incorrect = total - correct;
        let percent = |part: f64| {
            if total > 0.0 { 100.0 * part / total } else { 0.0 }
        };

        let mut out = String::new();
        out.push_str("Results\n");
        out.push_str("======\n\n");
        out.push_str(&Self::summary_line(
            "Correctly Classified Instances",
            correct,
            Some(percent(correct)),
        ));
        out.push_str(&Self::summary_line(
            "Incorrectly Classified Instances",
            incorrect,
            Some(percent(incorrect)),
        ));
        out.push_str(&Self::summary_line(
            "Total Number of Instances",
            total,
            None,
        ));
        out
    }

    fn summary_line(name: &str, count: f64, percent: Option<f64>) -> String {
        let mut line = format!("{name:<36}{:>10}", Self::format_count(count));
        if let Some(value) = percent {
            line.push_str(&format!("{value:>14.4} %"));
        }
        line.push('\n');
        line
    }

    fn format_count(value: f64) -> String {
        if value.fract() == 0.0 {
            format!("{}", value as i64)
        } else {
            format!("{value:.4}")
        }
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.summary(), self.confusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_counts() -> EvaluationResult {
        let mut confusion = ConfusionMatrix::new(vec![
            "CH".to_string(),
            "RT".to_string(),
            "SS".to_string(),
        ]);
        confusion.record(0, 0, 60.0).unwrap();
        confusion.record(1, 1, 30.0).unwrap();
        confusion.record(2, 2, 5.0).unwrap();
        confusion.record(0, 1, 5.0).unwrap();
        EvaluationResult {
            folds: 10,
            seed: 1,
            confusion,
            model_description: "stub model".to_string(),
            cpu_seconds: 0.01,
        }
    }

    #[test]
    fn test_summary_lists_correct_incorrect_and_total() {
        let summary = result_with_counts().summary();

        assert!(summary.starts_with("Results\n======\n\n"));
        assert!(summary.contains("Correctly Classified Instances"));
        assert!(summary.contains("95"));
        assert!(summary.contains("Incorrectly Classified Instances"));
        assert!(summary.contains("5.0000 %"));
        assert!(summary.contains("Total Number of Instances"));
        assert!(summary.contains("100"));
    }

    #[test]
    fn test_display_appends_the_confusion_matrix() {
        let rendering = result_with_counts().to_string();
        assert!(rendering.contains("Results"));
        assert!(rendering.contains("=== Confusion Matrix ==="));
    }
}
