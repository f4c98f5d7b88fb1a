use crate::core::attributes::AttributeRef;
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::error::PipelineError;
use std::sync::Arc;

/// Drops columns by fixed 1-based position, Weka `Remove -R` style. Purely
/// positional; cell values are never consulted.
pub struct RemoveAttributes {
    indices: Vec<usize>,
}

impl RemoveAttributes {
    pub fn new(indices: &[usize]) -> RemoveAttributes {
        let mut indices = indices.to_vec();
        indices.sort_unstable();
        indices.dedup();
        RemoveAttributes { indices }
    }

    pub fn apply(&self, dataset: &Dataset) -> Result<Dataset, PipelineError> {
        let header = dataset.header();
        let attribute_count = header.number_of_attributes();

        for &index in &self.indices {
            if index == 0 || index > attribute_count {
                return Err(PipelineError::schema(format!(
                    "cannot remove attribute {index}: relation '{}' has attributes 1..={}",
                    header.relation_name(),
                    attribute_count
                )));
            }
            if index - 1 == header.class_index() {
                return Err(PipelineError::schema(format!(
                    "cannot remove the class attribute '{}'",
                    header
                        .attribute_at_index(index - 1)
                        .map(|a| a.name())
                        .unwrap_or_default()
                )));
            }
        }

        let kept: Vec<usize> = (0..attribute_count)
            .filter(|i| !self.indices.contains(&(i + 1)))
            .collect();

        let attributes: Vec<AttributeRef> = kept
            .iter()
            .map(|&i| Arc::clone(&header.attributes[i]))
            .collect();
        let class_index = kept
            .iter()
            .position(|&i| i == header.class_index())
            .ok_or_else(|| PipelineError::schema("the class attribute was filtered away"))?;

        let new_header = Arc::new(InstanceHeader::new(
            header.relation_name().to_string(),
            attributes,
            class_index,
        ));

        let instances = dataset
            .instances()
            .iter()
            .map(|instance| {
                let values = instance.to_vec();
                let projected: Vec<f64> = kept.iter().map(|&i| values[i]).collect();
                DenseInstance::new(Arc::clone(&new_header), projected, instance.weight())
            })
            .collect();

        Ok(Dataset::with_instances(new_header, instances))
    }
}
