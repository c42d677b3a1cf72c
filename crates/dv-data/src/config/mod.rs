//! Source configuration module

pub mod null_handling;
pub mod source_config;

pub use null_handling::NullConfig;
pub use source_config::SourceConfig;
