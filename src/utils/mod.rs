//! Utility modules shared across the generator.

pub mod exec;
pub mod html;
pub mod mime;
pub mod path;
