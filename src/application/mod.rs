//! Application layer: replacement, serialization and the init use case.

pub mod services;
pub mod use_cases;
