/// Configuration defaults, deserialization and validation.
pub mod config;
