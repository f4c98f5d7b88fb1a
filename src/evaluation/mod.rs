mod confusion_matrix;
mod cross_validation;
mod result;

pub use confusion_matrix::ConfusionMatrix;
pub use cross_validation::{CrossValidation, score};
pub use result::EvaluationResult;
