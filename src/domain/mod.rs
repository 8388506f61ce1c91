//! Domain layer: the catalog template model and value objects.

pub mod entities;
pub mod value_objects;
