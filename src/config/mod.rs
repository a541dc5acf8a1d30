//! Configuration management for hce-uid.
//!
//! Provides XDG-compliant paths and the application settings file.

mod settings;

pub use settings::{AppSettings, HardwareSettings, Paths};
