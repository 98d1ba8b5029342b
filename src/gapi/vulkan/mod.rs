pub mod config;
pub mod core;
pub mod entry;
pub mod errors;
pub mod extensions;
pub mod instance;
