//! Core types and traits for grove.
//!
//! This crate provides the fundamental data structures shared by the
//! grove crates: the field-name configuration, node identifiers, the
//! [`Record`] capability trait for flat input rows, assembled tree nodes,
//! and the [`Forest`] container returned by a build.

mod config;
mod error;
mod forest;
mod key;
mod node;
mod record;
pub mod render;

pub use config::{TreeConfig, TreeConfigBuilder};
pub use error::{BuildWarning, TreeError, TreeResult, WarningKind};
pub use forest::{Forest, ForestStats};
pub use key::{FloatKey, NodeKey};
pub use node::TreeNode;
pub use record::Record;
pub use render::{ForestView, MAX_RENDER_DEPTH, NodeView, check_render_depth, to_json_value};
