//! Read-only queries over an assembled forest.
//!
//! Every operation takes the root slice returned by `grove_build::build` (or
//! [`grove_core::Forest::roots`]) and walks it without recursion, so chains
//! of any depth are safe.

mod filter;
mod search;
mod walk;

pub use filter::filter;
pub use search::{ancestors, find, find_mut, path_ids, path_names};
pub use walk::{BreadthFirst, Iter, count, flatten, height, iter, iter_breadth_first, walk};
