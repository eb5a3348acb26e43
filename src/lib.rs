//! stalecheck - upstream dependency staleness checker library
//!
//! This library provides the core functionality for:
//! - Extracting which packages of an upstream Cargo project a downstream
//!   project depends on directly
//! - Checking those packages against the latest stable releases on crates.io

pub mod checker;
pub mod cli;
pub mod domain;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
