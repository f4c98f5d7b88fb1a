use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::error::PipelineError;
use std::fmt;
use std::sync::Arc;

/// An in-memory table: one shared header plus owned rows. Rows are only
/// appended, never edited in place; column changes produce a new table.
pub struct Dataset {
    header: Arc<InstanceHeader>,
    instances: Vec<DenseInstance>,
}

impl Dataset {
    pub fn new(header: Arc<InstanceHeader>) -> Dataset {
        Dataset {
            header,
            instances: Vec::new(),
        }
    }

    pub fn with_instances(header: Arc<InstanceHeader>, instances: Vec<DenseInstance>) -> Dataset {
        Dataset { header, instances }
    }

    pub fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    pub fn instances(&self) -> &[DenseInstance] {
        &self.instances
    }

    pub fn number_of_instances(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn add_instance(&mut self, instance: DenseInstance) -> Result<(), PipelineError> {
        let expected = self.header.number_of_attributes();
        let found = instance.number_of_attributes();
        if found != expected {
            return Err(PipelineError::schema(format!(
                "row has {} values but relation '{}' declares {} attributes",
                found,
                self.header.relation_name(),
                expected
            )));
        }
        self.instances.push(instance);
        Ok(())
    }

    /// Class weight per label index, sized by the class domain. Rows with a
    /// missing class are not counted.
    pub fn class_distribution(&self) -> Vec<f64> {
        let mut distribution = vec![0.0; self.header.number_of_classes()];
        for instance in &self.instances {
            if let Some(class_value) = instance.class_value() {
                let index = class_value as usize;
                if index < distribution.len() {
                    distribution[index] += instance.weight();
                }
            }
        }
        distribution
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("relation_name", &self.header.relation_name())
            .field("n_instances", &self.instances.len())
            .field("n_attributes", &self.header.number_of_attributes())
            .finish()
    }
}
