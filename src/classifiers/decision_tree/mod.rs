mod decision_tree;
mod node;
mod split_criteria;

pub use decision_tree::DecisionTree;
