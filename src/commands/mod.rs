// Command handlers module
pub mod config;
pub mod fields;
pub mod snapshot;

// Re-exports for cleaner imports
pub use fields::execute as fields;
pub use snapshot::execute as snapshot;
