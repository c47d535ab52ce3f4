// Platform-specific data sources behind the probes

pub mod drm;
pub mod graphics;
pub mod kernel;
pub mod macos;
pub mod memory;
pub mod power;
pub mod process;
pub mod windows;

pub use graphics::RawDisplay;
