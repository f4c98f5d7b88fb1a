mod remove_attributes;

pub use remove_attributes::RemoveAttributes;
