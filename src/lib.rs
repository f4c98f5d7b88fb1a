pub mod arff;
pub mod classifiers;
pub mod core;
pub mod error;
pub mod evaluation;
pub mod filters;
pub mod prediction;
pub mod schema;
pub mod tasks;
pub mod ui;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
