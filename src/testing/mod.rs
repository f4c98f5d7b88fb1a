mod fixtures;

pub use fixtures::{
    raw_hawks_csv, separable_table, training_header, training_instance, write_temp_file,
};
