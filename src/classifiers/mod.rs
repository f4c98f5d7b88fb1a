mod classifier;
mod decision_tree;

pub use classifier::{Classifier, max_index};
pub use decision_tree::DecisionTree;
