use crate::core::attributes::Attribute;
use std::any::Any;

#[derive(Clone)]
pub struct NumericAttribute {
    pub name: String,
}

impl NumericAttribute {
    pub fn new<S: Into<String>>(name: S) -> NumericAttribute {
        NumericAttribute { name: name.into() }
    }
}

impl Attribute for NumericAttribute {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn arff_representation(&self) -> String {
        format!("@attribute {} numeric", self.name)
    }

    fn parse_token(&self, raw: &str) -> Result<f64, String> {
        raw.parse::<f64>()
            .map_err(|_| format!("'{}' is not a numeric value for '{}'", raw, self.name))
    }

    fn format_value(&self, value: f64) -> String {
        if value.is_nan() {
            return "?".to_string();
        }
        format!("{value}")
    }
}
