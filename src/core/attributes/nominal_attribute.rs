use crate::core::attributes::Attribute;
use std::any::Any;
use std::collections::HashMap;

#[derive(Clone)]
pub struct NominalAttribute {
    pub name: String,
    pub values: Vec<String>,
    label_to_index: HashMap<String, usize>,
}

impl NominalAttribute {
    pub fn with_values<S: Into<String>>(name: S, values: Vec<String>) -> NominalAttribute {
        let label_to_index = values
            .iter()
            .enumerate()
            .map(|(index, label)| (label.clone(), index))
            .collect();

        NominalAttribute {
            name: name.into(),
            values,
            label_to_index,
        }
    }

    pub fn from_labels<S: Into<String>>(name: S, labels: &[&str]) -> NominalAttribute {
        Self::with_values(name, labels.iter().map(|l| l.to_string()).collect())
    }

    pub fn index_of_value(&self, v: &str) -> Option<usize> {
        self.label_to_index.get(v).copied()
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn number_of_values(&self) -> usize {
        self.values.len()
    }
}

impl Attribute for NominalAttribute {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn arff_representation(&self) -> String {
        format!("@attribute {} {{ {} }}", self.name, self.values.join(", "))
    }

    fn parse_token(&self, raw: &str) -> Result<f64, String> {
        match self.index_of_value(raw) {
            Some(index) => Ok(index as f64),
            None => Err(format!(
                "label '{}' is not in the domain of '{}'",
                raw, self.name
            )),
        }
    }

    fn format_value(&self, value: f64) -> String {
        if value.is_nan() || value < 0.0 {
            return "?".to_string();
        }
        match self.value_at(value as usize) {
            Some(label) => label.to_string(),
            None => "?".to_string(),
        }
    }
}
