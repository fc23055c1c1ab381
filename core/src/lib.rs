pub mod engine;
pub mod resolver;
