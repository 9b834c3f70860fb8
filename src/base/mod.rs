//! Foundation types for the edmkit toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Span`] - Line/column locations of CSDL syntax nodes
//! - [`Name`] - Cheap-to-clone identifier strings
//!
//! This module has NO dependencies on other edmkit modules.

mod position;

pub use position::{Position, Span};

/// An identifier or qualified name. Inline for short names, shared otherwise.
pub type Name = smol_str::SmolStr;
