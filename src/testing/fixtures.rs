use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::DenseInstance;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub fn write_temp_file(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("tempfile");
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

/// A miniature raw export: the real column header plus one row per species,
/// semicolon-delimited, comma decimals, and one `; ;` gap (missing sex).
pub fn raw_hawks_csv() -> String {
    [
        "id;month;day;year;captureTime;releaseTime;age;sex;wing;weight;culmen;hallux;tail;species",
        "1;9;19;1992;13:30;14:02;I; ;385;920;25,7;30,1;219;RT",
        "2;9;22;1992;10:30;10:50;I;F;265;470;18,7;23,5;220;CH",
        "3;9;23;1992;12:45;13:00;I;M;170;170;12,5;14,3;151;SS",
    ]
    .join("\n")
}

/// The post-selection table shape: the five body measurements plus species.
pub fn training_header() -> Arc<InstanceHeader> {
    let attributes: Vec<AttributeRef> = vec![
        Arc::new(NumericAttribute::new("wing")),
        Arc::new(NumericAttribute::new("weight")),
        Arc::new(NumericAttribute::new("culmen")),
        Arc::new(NumericAttribute::new("hallux")),
        Arc::new(NumericAttribute::new("tail")),
        Arc::new(NominalAttribute::from_labels("species", &["CH", "RT", "SS"])),
    ];
    Arc::new(InstanceHeader::new("hawks".to_string(), attributes, 5))
}

pub fn training_instance(
    header: &Arc<InstanceHeader>,
    measurements: [f64; 5],
    class_index: usize,
) -> DenseInstance {
    let mut values = measurements.to_vec();
    values.push(class_index as f64);
    DenseInstance::new(Arc::clone(header), values, 1.0)
}

/// Thirty rows, ten per species, cleanly separable on wing length
/// (CH around 250-270, RT around 350-380, SS around 150-170).
pub fn separable_table() -> Dataset {
    let header = training_header();
    let mut rows = Vec::with_capacity(30);
    for i in 0..10 {
        let spread = i as f64;
        rows.push(training_instance(
            &header,
            [250.0 + 2.0 * spread, 450.0 + 5.0 * spread, 18.0, 23.0, 215.0 + spread],
            0,
        ));
        rows.push(training_instance(
            &header,
            [350.0 + 3.0 * spread, 900.0 + 10.0 * spread, 26.0, 30.0, 220.0 + spread],
            1,
        ));
        rows.push(training_instance(
            &header,
            [150.0 + 2.0 * spread, 160.0 + 3.0 * spread, 12.0, 14.0, 150.0 + spread],
            2,
        ));
    }
    Dataset::with_instances(header, rows)
}
