//! Schema module - Configuration types for fields, generators, and searches.

mod config;

pub use config::*;
