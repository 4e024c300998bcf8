//! hdrslim Core
//!
//! Core types, configuration and errors shared by the hdrslim resolver and CLI.

pub mod config;
pub mod error;
pub mod location;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use location::Location;
pub use types::*;
