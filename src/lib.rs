//! Ordered collections backed by a red black tree.
//!
//! `red_black_tree` provides a duplicate-admitting engine, `RedBlackTree<T>`, together with
//! `RedBlackMap<K, V>`, `RedBlackSet<T>` and `RedBlackMultiset<T>` built on top of it. Every
//! collection hands out bidirectional cursors and supports `lower_bound`, `upper_bound` and
//! `equal_range` queries in `O(log n)` time.
//!
//! Nodes are stored in a `TypedArena`, which allocates fixed-size chunks and recycles freed
//! blocks. Fallible variants such as `RedBlackTree::try_insert` report allocation failure
//! through `Error` instead of aborting.

pub mod arena;
mod entry;
mod error;
pub mod red_black_tree;

pub use crate::error::{Error, Result};
