use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute, TimeAttribute};
use crate::core::instance_header::InstanceHeader;
use std::sync::Arc;

pub const RELATION_NAME: &str = "hawks";

/// 1-based positions stripped before training, Weka `Remove -R` style:
/// `id` is an identifier, the capture date/time fields are circumstantial,
/// and `age`/`sex` are the sparsely recorded nominals. Only the five body
/// measurements and the species label survive.
pub const IRRELEVANT_ATTRIBUTE_INDICES: [usize; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

/// Row cap of the source export; lines past it are ignored.
pub const DEFAULT_MAX_ROWS: usize = 891;

pub const DEFAULT_FOLDS: usize = 10;

pub const DEFAULT_SEED: u64 = 1;

/// The fixed 14-attribute layout of the hawks export, in column order.
/// Everything that reads or writes hawk records derives its shape from
/// this header; the final attribute is the classification target.
pub fn hawks_header() -> Arc<InstanceHeader> {
    let mut attributes: Vec<AttributeRef> = Vec::with_capacity(14);

    for name in ["id", "month", "day", "year"] {
        attributes.push(Arc::new(NumericAttribute::new(name)));
    }
    attributes.push(Arc::new(TimeAttribute::new("captureTime", "HH:mm")));
    attributes.push(Arc::new(TimeAttribute::new("releaseTime", "HH:mm")));
    attributes.push(Arc::new(NominalAttribute::from_labels("age", &["I", "A"])));
    attributes.push(Arc::new(NominalAttribute::from_labels("sex", &["F", "M"])));
    for name in ["wing", "weight", "culmen", "hallux", "tail"] {
        attributes.push(Arc::new(NumericAttribute::new(name)));
    }
    attributes.push(Arc::new(NominalAttribute::from_labels(
        "species",
        &["CH", "RT", "SS"],
    )));

    let class_index = attributes.len() - 1;
    Arc::new(InstanceHeader::new(
        RELATION_NAME.to_string(),
        attributes,
        class_index,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_declares_the_fourteen_columns_in_order() {
        let header = hawks_header();

        let names: Vec<String> = header.attributes.iter().map(|a| a.name()).collect();
        assert_eq!(
            names,
            vec![
                "id",
                "month",
                "day",
                "year",
                "captureTime",
                "releaseTime",
                "age",
                "sex",
                "wing",
                "weight",
                "culmen",
                "hallux",
                "tail",
                "species"
            ]
        );
    }

    #[test]
    fn test_species_is_the_class_attribute() {
        let header = hawks_header();

        assert_eq!(header.class_index(), 13);
        assert_eq!(header.number_of_classes(), 3);
        assert_eq!(
            header.class_labels(),
            Some(vec!["CH".to_string(), "RT".to_string(), "SS".to_string()])
        );
    }

    #[test]
    fn test_time_columns_carry_the_capture_pattern() {
        let header = hawks_header();

        assert_eq!(
            header.attribute_at_index(4).map(|a| a.arff_representation()),
            Some("@attribute captureTime DATE \"HH:mm\"".to_string())
        );
        assert_eq!(
            header.attribute_at_index(5).map(|a| a.arff_representation()),
            Some("@attribute releaseTime DATE \"HH:mm\"".to_string())
        );
    }

    #[test]
    fn test_removal_set_targets_the_first_eight_columns() {
        assert_eq!(IRRELEVANT_ATTRIBUTE_INDICES.len(), 8);
        assert_eq!(IRRELEVANT_ATTRIBUTE_INDICES[0], 1);
        assert_eq!(IRRELEVANT_ATTRIBUTE_INDICES[7], 8);
        // the class position is untouched
        assert!(!IRRELEVANT_ATTRIBUTE_INDICES.contains(&14));
    }
}
