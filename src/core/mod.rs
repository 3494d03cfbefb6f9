// Public modules
pub mod catalog;
pub mod cleanup;
pub mod error;
pub mod format;
pub mod generate;
pub mod manifest;
pub mod materialize;
pub mod template;
pub mod transpile;

// Public modules for CLI access
pub mod defaults;
pub mod paths;

// Re-export common types for convenience
pub use catalog::{ExtensionType, Template};
pub use error::{Error, ErrorCode, Result};
