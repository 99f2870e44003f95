//! Utils Module - Helper Functions & Shared Utilities

pub mod cache;
pub mod clock;
pub mod constants;
pub mod validation;

pub use cache::*;
pub use clock::*;
pub use constants::*;
pub use validation::*;
