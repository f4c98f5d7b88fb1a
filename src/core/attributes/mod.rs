mod attribute;
mod nominal_attribute;
mod numeric_attribute;
mod time_attribute;

pub use attribute::{Attribute, AttributeRef};
pub use nominal_attribute::NominalAttribute;
pub use numeric_attribute::NumericAttribute;
pub use time_attribute::TimeAttribute;
