//! Content model: fragments and the data they carry.

mod fragment;
mod table;

pub use fragment::{Fragment, MarkupKind};
pub use table::{DataRow, TabularData};

/// Variables visible to every fragment's render step. Fragment-local data
/// wins over shared context on key collisions.
pub type SharedContext = serde_json::Map<String, serde_json::Value>;
