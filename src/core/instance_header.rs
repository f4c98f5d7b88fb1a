use crate::core::attributes::{Attribute, AttributeRef, NominalAttribute};
use std::fmt;

pub struct InstanceHeader {
    relation_name: String,
    pub attributes: Vec<AttributeRef>,
    class_index: usize,
}

impl InstanceHeader {
    pub fn new(
        relation_name: String,
        attributes: Vec<AttributeRef>,
        class_index: usize,
    ) -> InstanceHeader {
        InstanceHeader {
            relation_name,
            attributes,
            class_index,
        }
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        if index < self.attributes.len() {
            Some(self.attributes[index].as_ref())
        } else {
            None
        }
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        for (i, attr) in self.attributes.iter().enumerate() {
            if attr.name() == name {
                return Some(i);
            }
        }
        None
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn class_attribute(&self) -> Option<&dyn Attribute> {
        self.attribute_at_index(self.class_index)
    }

    pub fn number_of_classes(&self) -> usize {
        if self.class_index < self.attributes.len() {
            if let Some(nominal_attr) = self.attributes[self.class_index]
                .as_any()
                .downcast_ref::<NominalAttribute>()
            {
                return nominal_attr.number_of_values();
            }
        }
        0
    }

    /// Labels of the class domain, or `None` when the class is not nominal.
    pub fn class_labels(&self) -> Option<Vec<String>> {
        self.attributes
            .get(self.class_index)?
            .as_any()
            .downcast_ref::<NominalAttribute>()
            .map(|nominal| nominal.values.clone())
    }

    /// First point where `self` and `other` disagree on attribute order,
    /// names or declarations, described for error reporting.
    pub fn first_mismatch_against(&self, other: &InstanceHeader) -> Option<String> {
        if self.number_of_attributes() != other.number_of_attributes() {
            return Some(format!(
                "expected {} attributes, found {}",
                self.number_of_attributes(),
                other.number_of_attributes()
            ));
        }
        for (index, (a, b)) in self
            .attributes
            .iter()
            .zip(other.attributes.iter())
            .enumerate()
        {
            if a.arff_representation() != b.arff_representation() {
                return Some(format!(
                    "attribute {} should be '{}', found '{}'",
                    index + 1,
                    a.arff_representation(),
                    b.arff_representation()
                ));
            }
        }
        if self.class_index != other.class_index {
            return Some(format!(
                "class index should be {}, found {}",
                self.class_index, other.class_index
            ));
        }
        None
    }
}

impl fmt::Debug for InstanceHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceHeader")
            .field("relation_name", &self.relation_name)
            .field("class_index", &self.class_index)
            .field("n_attributes", &self.attributes.len())
            .finish()
    }
}
