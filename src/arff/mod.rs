mod reader;
mod writer;

pub use reader::load_dataset;
pub use writer::{convert_csv_to_arff, transcode_line};
