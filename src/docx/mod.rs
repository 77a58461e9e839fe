//! Minimal WordprocessingML package layer.
//!
//! This crate does not model documents as an object tree; fragments are
//! produced as complete docx packages and later merged block by block.
//! The layer is intentionally small: one package abstraction over the OPC
//! container, raw-markup builders for the handful of constructs the
//! renderers emit, and a shared embedded stylesheet.

mod package;
pub mod styles;
pub mod xml;

pub use package::{Package, Relationship, REL_TYPE_IMAGE};
