//! Configuration loading for qapflow

mod loader;

pub use loader::load_config;
