//! sdd-system - Spec-driven development CLI
//!
//! Tech pack resolution, validation, and routing for the SDD plugin.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod techpack;
pub mod utils;

pub use error::{Result, SddError};
