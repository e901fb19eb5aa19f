//! Configuration module for lrcsync.
//!
//! Handles loading and saving the TOML settings file.

mod settings;

pub use settings::{DocumentSettings, GeneralSettings, PlaybackSettings, Settings};
