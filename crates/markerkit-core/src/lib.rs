//! markerkit core: project root discovery, project layout and configuration
//! and errors.
//!
//! This crate has no internal markerkit dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`config`]: TOML configuration
//! - [`util`]: Path utilities, root resolver and project layout

#![doc = include_str!("../README.md")]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod config;
pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use config::Config;
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::layout::{PathRole, ProjectPaths};
pub use util::resolver::{RootResolver, find_project_root, project_paths};
