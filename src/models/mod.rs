//! Models Module - Data Structures & Configuration
//!
//! Result shapes, errors and configuration shared by every other module.

pub mod config;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
