//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! `RedBlackTree<T>` is the engine: it admits equal values and hands out bidirectional cursors.
//! `RedBlackMap<K, V>`, `RedBlackSet<T>` and `RedBlackMultiset<T>` are thin wrappers that add key
//! projection or a duplicate admission policy on top of it.

mod cursor;
mod map;
mod multiset;
mod node;
mod set;
mod tree;

pub use self::cursor::{Cursor, IntoIter, Iter};
pub use self::map::{
    MapCursor, RedBlackMap, RedBlackMapIntoIter, RedBlackMapIter, RedBlackMapKeys,
    RedBlackMapValues,
};
pub use self::multiset::RedBlackMultiset;
pub use self::set::RedBlackSet;
pub use self::tree::RedBlackTree;
