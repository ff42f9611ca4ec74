//! Path utilities and project root discovery.
//!
//! # Modules
//!
//! - [`layout`]: The fixed project directory layout
//! - [`paths`]: Generic path utilities (absolute resolution, tilde expansion, marker search)
//! - [`resolver`]: Configurable project root resolution

pub mod layout;
pub mod paths;
pub mod resolver;
