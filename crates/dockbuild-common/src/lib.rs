//! # dockbuild-common
//!
//! Shared error definitions, layout configuration, and constants
//! used across the docker-build workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate.

pub mod config;
pub mod constants;
pub mod error;
