mod pipeline;

pub use pipeline::{Pipeline, PipelineConfig, PipelineRun};
