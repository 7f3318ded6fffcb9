//! Forest assembly engine for grove.
//!
//! Turns a flat sequence of records, each carrying an identifier and an
//! optional parent identifier, into an ordered forest of [`TreeNode`]s.
//!
//! A build runs in two phases:
//!
//! 1. **Index** - one stable pass groups records by parent identifier and
//!    sorts each sibling group by weight (unweighted records last, ties in
//!    input order).
//! 2. **Assemble** - starting from the group whose parent equals the root
//!    sentinel, records are materialized top-down on an explicit work stack,
//!    honoring the configured depth limit.
//!
//! Malformed input never fails a build. Records whose parent is missing are
//! left out, links that would nest a record under itself are dropped, and a
//! repeated identifier yields a single node. Each case is reported in
//! [`Forest::warnings`].
//!
//! ```rust,ignore
//! use grove_build::build;
//! use grove_core::{NodeKey, TreeConfig};
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"id": 1, "parentId": 0, "name": "root", "weight": 0}),
//!     json!({"id": 2, "parentId": 1, "name": "a", "weight": 2}),
//!     json!({"id": 3, "parentId": 1, "name": "b", "weight": 1}),
//! ];
//! let roots = build(&records, Some(&NodeKey::from(0)), &TreeConfig::default())?;
//!
//! assert_eq!(roots[0].children[0].name.as_deref(), Some("b"));
//! ```

mod assemble;
mod builder;
mod entry;
mod index;

pub use builder::{ForestBuilder, build, build_forest};

// Re-export core types
pub use grove_core::{Forest, NodeKey, Record, TreeConfig, TreeError, TreeNode};
