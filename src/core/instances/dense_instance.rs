use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct DenseInstance {
    header: Arc<InstanceHeader>,
    values: Vec<f64>,
    weight: f64,
}

impl DenseInstance {
    pub fn new(header: Arc<InstanceHeader>, values: Vec<f64>, weight: f64) -> DenseInstance {
        DenseInstance {
            header,
            values,
            weight,
        }
    }
}

impl Instance for DenseInstance {
    fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn number_of_attributes(&self) -> usize {
        self.values.len()
    }

    fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }
}

impl fmt::Display for DenseInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells = Vec::with_capacity(self.values.len());
        for (index, value) in self.values.iter().enumerate() {
            match self.header.attribute_at_index(index) {
                Some(attribute) => cells.push(attribute.format_value(*value)),
                None => cells.push(format!("{value}")),
            }
        }
        write!(f, "{}", cells.join(","))
    }
}

impl fmt::Debug for DenseInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseInstance")
            .field("values", &self.values)
            .field("weight", &self.weight)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
    use std::sync::Arc;

    fn header() -> Arc<InstanceHeader> {
        let attributes: Vec<AttributeRef> = vec![
            Arc::new(NumericAttribute::new("wing")),
            Arc::new(NumericAttribute::new("culmen")),
            Arc::new(NominalAttribute::from_labels("species", &["CH", "RT", "SS"])),
        ];
        Arc::new(InstanceHeader::new("hawks".to_string(), attributes, 2))
    }

    #[test]
    fn test_value_access_and_class_value() {
        let instance = DenseInstance::new(header(), vec![265.0, 18.7, 0.0], 1.0);

        assert_eq!(instance.value_at_index(1), Some(18.7));
        assert_eq!(instance.value_at_index(7), None);
        assert_eq!(instance.class_index(), 2);
        assert_eq!(instance.class_value(), Some(0.0));
        assert!(!instance.is_class_missing());
        assert_eq!(instance.number_of_classes(), 3);
    }

    #[test]
    fn test_missing_cells_are_nan() {
        let instance = DenseInstance::new(header(), vec![265.0, f64::NAN, f64::NAN], 1.0);

        assert!(instance.is_missing_at_index(1));
        assert!(instance.is_missing_at_index(9));
        assert!(instance.class_value().is_none());
        assert!(instance.is_class_missing());
    }

    #[test]
    fn test_display_formats_cells_by_attribute_kind() {
        let instance = DenseInstance::new(header(), vec![265.0, 18.7, 0.0], 1.0);
        assert_eq!(instance.to_string(), "265,18.7,CH");

        let gaps = DenseInstance::new(header(), vec![265.0, f64::NAN, 2.0], 1.0);
        assert_eq!(gaps.to_string(), "265,?,SS");
    }
}
