use std::any::Any;
use std::sync::Arc;

pub type AttributeRef = Arc<dyn Attribute + Send + Sync>;

/// One column of the schema. Cells are stored as `f64` regardless of kind;
/// each kind decides how raw text maps into that encoding and back.
pub trait Attribute: Any + Send + Sync {
    fn name(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn arff_representation(&self) -> String;

    /// Parses one raw data token into the cell encoding. The missing marker
    /// `?` is handled by callers before this is reached. Errors are short
    /// reasons; callers attach line/attribute context.
    fn parse_token(&self, raw: &str) -> Result<f64, String>;

    /// Renders a cell back to the text form `parse_token` accepts.
    fn format_value(&self, value: f64) -> String;
}
