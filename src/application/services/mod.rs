pub mod compose_serializer;
pub mod post_processor;
pub mod replacement_engine;
pub mod value_resolver;
