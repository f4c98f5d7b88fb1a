use crate::core::attributes::Attribute;
use chrono::{NaiveTime, Timelike};
use std::any::Any;

/// A time-of-day attribute declared in ARFF as `@attribute name DATE "..."`.
/// Cells hold minutes since midnight. Patterns use the Weka placeholders
/// `HH`, `mm` and `ss`; anything else is kept literally.
#[derive(Clone)]
pub struct TimeAttribute {
    pub name: String,
    pub pattern: String,
}

impl TimeAttribute {
    pub fn new<S: Into<String>>(name: S, pattern: S) -> TimeAttribute {
        TimeAttribute {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    fn chrono_pattern(&self) -> String {
        self.pattern
            .replace("HH", "%H")
            .replace("mm", "%M")
            .replace("ss", "%S")
    }
}

impl Attribute for TimeAttribute {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn arff_representation(&self) -> String {
        format!("@attribute {} DATE \"{}\"", self.name, self.pattern)
    }

    fn parse_token(&self, raw: &str) -> Result<f64, String> {
        let time = NaiveTime::parse_from_str(raw, &self.chrono_pattern()).map_err(|_| {
            format!(
                "'{}' does not match the '{}' pattern of '{}'",
                raw, self.pattern, self.name
            )
        })?;
        Ok((time.hour() * 60 + time.minute()) as f64)
    }

    fn format_value(&self, value: f64) -> String {
        if value.is_nan() || value < 0.0 {
            return "?".to_string();
        }
        let minutes = value as u32;
        match NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0) {
            Some(time) => time.format(&self.chrono_pattern()).to_string(),
            None => "?".to_string(),
        }
    }
}
