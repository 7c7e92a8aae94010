use crate::arena::{Handle, TypedArena};
use crate::error::{Error, Result};
use crate::red_black_tree::cursor::{Cursor, IntoIter, Iter};
use crate::red_black_tree::node::{Color, Node, Side};
use log::{trace, warn};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

const DEFAULT_CHUNK_SIZE: usize = 64;

/// An ordered collection of values backed by a red black tree.
///
/// A red black tree is a self-balancing binary search tree in which every node is colored red or
/// black. The root is black, no red node has a red child, and every path from a node down to an
/// empty link passes through the same number of black nodes, which bounds the height of the tree
/// by `2 * log2(n + 1)`. Insertions and removals restore these rules with at most three rotations.
///
/// Nodes live in a `TypedArena` and refer to each other by handle, so parent links never dangle
/// and tearing down a tree never recurses. Equal values are admitted; they are kept in insertion
/// order. Uniqueness, when required, is left to `RedBlackSet` and `RedBlackMap`.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// tree.insert(3);
/// tree.insert(1);
/// tree.insert(3);
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3, &3]);
///
/// assert_eq!(tree.lower_bound(&2).get(), Some(&3));
/// assert!(tree.upper_bound(&3).is_end());
///
/// assert_eq!(tree.remove(&3), Some(3));
/// assert_eq!(tree.remove(&2), None);
/// ```
pub struct RedBlackTree<T> {
    pub(super) arena: TypedArena<Node<T>>,
    pub(super) root: Option<Handle>,
    pub(super) max: Option<Handle>,
    len: usize,
}

impl<T> RedBlackTree<T> {
    /// Constructs a new, empty `RedBlackTree<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackTree<T>` whose nodes are allocated `chunk_size` at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::with_chunk_size(1024);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackTree {
            arena: TypedArena::new(chunk_size),
            root: None,
            max: None,
            len: 0,
        }
    }

    fn node(&self, handle: Handle) -> &Node<T> {
        &self.arena[handle]
    }

    fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        &mut self.arena[handle]
    }

    // Empty links are black leaves.
    fn color(&self, link: Option<Handle>) -> Color {
        link.map_or(Color::Black, |handle| self.node(handle).color)
    }

    fn set_color(&mut self, link: Option<Handle>, color: Color) {
        if let Some(handle) = link {
            self.node_mut(handle).color = color;
        }
    }

    // precondition: the node has a parent
    fn side_of(&self, handle: Handle) -> Side {
        let parent = self
            .node(handle)
            .parent
            .expect("Expected node to have a parent.");
        if self.node(parent).left == Some(handle) {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub(super) fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.node(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// Returns the in-order neighbour of a node in the direction of `side`: the successor for
    /// `Side::Right` and the predecessor for `Side::Left`.
    pub(super) fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.node(handle).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }
        let mut curr = handle;
        while let Some(parent) = self.node(curr).parent {
            if self.node(parent).child(side) != Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    pub(super) fn first_handle(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    pub(super) fn value(&self, handle: Handle) -> &T {
        &self.node(handle).value
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut T {
        &mut self.node_mut(handle).value
    }

    pub(crate) fn cursor(&self, position: Option<Handle>) -> Cursor<'_, T> {
        Cursor::new(self, position)
    }

    // Replaces `old` as the child of `parent` with `new`. A missing parent means `old` is the
    // root.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let node = self.node_mut(parent);
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            },
        }
    }

    // Rotates the subtree rooted at `handle` towards `side`: the child on the opposite side takes
    // its place and `handle` becomes that child's `side` child. In-order sequence is preserved.
    fn rotate(&mut self, handle: Handle, side: Side) {
        trace!("rotating {:?} towards {:?}", handle, side);
        let pivot = self
            .node(handle)
            .child(side.opposite())
            .expect("Expected a child to rotate into place.");
        let inner = self.node(pivot).child(side);
        *self.node_mut(handle).child_mut(side.opposite()) = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(handle);
        }

        let parent = self.node(handle).parent;
        self.node_mut(pivot).parent = parent;
        self.replace_child(parent, handle, Some(pivot));

        *self.node_mut(pivot).child_mut(side) = Some(handle);
        self.node_mut(handle).parent = Some(pivot);
    }

    // Puts `new` in the position of `old` in the tree. The children of `old` are untouched.
    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.node(old).parent;
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.node_mut(new).parent = parent;
        }
    }

    fn insert_fixup(&mut self, mut curr: Handle) {
        loop {
            let mut parent = match self.node(curr).parent {
                Some(parent) if self.node(parent).color == Color::Red => parent,
                _ => break,
            };
            let grandparent = self
                .node(parent)
                .parent
                .expect("Expected a red node to have a parent.");
            let side = self.side_of(parent);
            let uncle = self.node(grandparent).child(side.opposite());

            if self.color(uncle) == Color::Red {
                self.set_color(Some(parent), Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                curr = grandparent;
                continue;
            }

            if self.node(parent).child(side.opposite()) == Some(curr) {
                self.rotate(parent, side);
                curr = parent;
                parent = self
                    .node(curr)
                    .parent
                    .expect("Expected rotated node to have a parent.");
            }
            self.set_color(Some(parent), Color::Black);
            self.set_color(Some(grandparent), Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    // Repairs the black deficiency carried by `curr` after a black node was spliced out. `curr`
    // may be an empty link, so its parent is tracked separately.
    fn remove_fixup(&mut self, mut curr: Option<Handle>, mut parent: Option<Handle>) {
        while curr != self.root && self.color(curr) == Color::Black {
            let curr_parent = parent.expect("Expected a non-root node to have a parent.");
            let side = if self.node(curr_parent).left == curr {
                Side::Left
            } else {
                Side::Right
            };
            let mut sibling = self.sibling(curr_parent, side);

            if self.node(sibling).color == Color::Red {
                self.set_color(Some(sibling), Color::Black);
                self.set_color(Some(curr_parent), Color::Red);
                self.rotate(curr_parent, side);
                sibling = self.sibling(curr_parent, side);
            }

            let near = self.node(sibling).child(side);
            let far = self.node(sibling).child(side.opposite());
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                self.set_color(Some(sibling), Color::Red);
                curr = Some(curr_parent);
                parent = self.node(curr_parent).parent;
                continue;
            }

            if self.color(far) == Color::Black {
                self.set_color(near, Color::Black);
                self.set_color(Some(sibling), Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = self.sibling(curr_parent, side);
            }

            let parent_color = self.node(curr_parent).color;
            self.set_color(Some(sibling), parent_color);
            self.set_color(Some(curr_parent), Color::Black);
            let far = self.node(sibling).child(side.opposite());
            self.set_color(far, Color::Black);
            self.rotate(curr_parent, side);
            curr = self.root;
        }

        self.set_color(curr, Color::Black);
    }

    // precondition: the subtree opposite `side` under `parent` is non-empty, which black-height
    // uniformity guarantees while a deficiency is being repaired
    fn sibling(&self, parent: Handle, side: Side) -> Handle {
        self.node(parent)
            .child(side.opposite())
            .expect("Expected a doubly black node to have a sibling.")
    }

    pub(crate) fn remove_handle(&mut self, handle: Handle) -> T {
        if self.max == Some(handle) {
            self.max = self.step(handle, Side::Left);
        }

        let Node {
            left,
            right,
            parent,
            color,
            ..
        } = *self.node(handle);
        let mut removed_color = color;

        let (child, child_parent) = match (left, right) {
            (None, _) => {
                self.transplant(handle, right);
                (right, parent)
            },
            (_, None) => {
                self.transplant(handle, left);
                (left, parent)
            },
            (Some(left), Some(right)) => {
                let successor = self.extreme(right, Side::Left);
                removed_color = self.node(successor).color;
                let child = self.node(successor).right;
                let child_parent = if self.node(successor).parent == Some(handle) {
                    Some(successor)
                } else {
                    let successor_parent = self.node(successor).parent;
                    self.transplant(successor, child);
                    self.node_mut(successor).right = Some(right);
                    self.node_mut(right).parent = Some(successor);
                    successor_parent
                };
                self.transplant(handle, Some(successor));
                self.node_mut(successor).left = Some(left);
                self.node_mut(left).parent = Some(successor);
                self.node_mut(successor).color = color;
                (child, child_parent)
            },
        };

        let value = self.arena.free(handle).value;
        self.len -= 1;

        if removed_color == Color::Black {
            self.remove_fixup(child, child_parent);
        }
        value
    }

    fn search_handle_by<F>(&self, mut f: F) -> Option<Handle>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = self.node(handle);
            curr = match f(&node.value) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.right,
                Ordering::Greater => node.left,
            };
        }
        None
    }

    pub(crate) fn lower_bound_handle_by<F>(&self, mut f: F) -> Option<Handle>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut curr = self.root;
        let mut ret = None;
        while let Some(handle) = curr {
            let node = self.node(handle);
            if f(&node.value) == Ordering::Less {
                curr = node.right;
            } else {
                ret = Some(handle);
                curr = node.left;
            }
        }
        ret
    }

    pub(crate) fn upper_bound_handle_by<F>(&self, mut f: F) -> Option<Handle>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut curr = self.root;
        let mut ret = None;
        while let Some(handle) = curr {
            let node = self.node(handle);
            if f(&node.value) == Ordering::Greater {
                ret = Some(handle);
                curr = node.left;
            } else {
                curr = node.right;
            }
        }
        ret
    }

    // Returns the leftmost element equal to the target, which is the earliest inserted one.
    pub(crate) fn first_match_handle_by<F>(&self, mut f: F) -> Option<Handle>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.lower_bound_handle_by(&mut f)
            .filter(|&handle| f(self.value(handle)) == Ordering::Equal)
    }

    pub(crate) fn insert_handle(&mut self, value: T) -> Result<Handle>
    where
        T: Ord,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = self.node(handle);
            side = if value < node.value {
                Side::Left
            } else {
                Side::Right
            };
            parent = Some(handle);
            curr = node.child(side);
        }

        let handle = match self.arena.try_allocate(Node::new(value, parent)) {
            Ok(handle) => handle,
            Err(err) => {
                warn!("failed to allocate a node for a tree of {} values: {}", self.len, err);
                return Err(Error::from(err));
            },
        };
        match parent {
            None => self.root = Some(handle),
            Some(parent) => *self.node_mut(parent).child_mut(side) = Some(handle),
        }
        if parent.is_none() || (parent == self.max && side == Side::Right) {
            self.max = Some(handle);
        }
        self.len += 1;

        self.insert_fixup(handle);
        Ok(handle)
    }

    /// Inserts a value into the tree and returns a cursor pointing at it. Values equal to
    /// existing ones are placed after them.
    ///
    /// # Panics
    ///
    /// Panics if memory for the node cannot be allocated. See `try_insert`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.insert(1).get(), Some(&1));
    /// assert_eq!(tree.insert(1).peek_prev(), Some(&1));
    /// ```
    pub fn insert(&mut self, value: T) -> Cursor<'_, T>
    where
        T: Ord,
    {
        match self.insert_handle(value) {
            Ok(handle) => Cursor::new(self, Some(handle)),
            Err(err) => panic!("Error: {}.", err),
        }
    }

    /// Inserts a value into the tree and returns a cursor pointing at it. Returns
    /// `Error::AllocationFailure` and leaves the tree unchanged if the node cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.try_insert(1).unwrap().get(), Some(&1));
    /// ```
    pub fn try_insert(&mut self, value: T) -> Result<Cursor<'_, T>>
    where
        T: Ord,
    {
        let handle = self.insert_handle(value)?;
        Ok(Cursor::new(self, Some(handle)))
    }

    /// Inserts every value of an iterator, stopping at the first allocation failure. Values
    /// inserted before the failure are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.try_extend(vec![3, 1, 2]).unwrap();
    /// assert_eq!(tree.len(), 3);
    /// ```
    pub fn try_extend<I>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Ord,
    {
        for value in iter {
            self.insert_handle(value)?;
        }
        Ok(())
    }

    /// Removes the first value equal to a particular key and returns it. Returns `None` and leaves
    /// the tree untouched if no such value exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_by(|value| value.borrow().cmp(key))
    }

    /// Removes the first value for which `f` returns `Ordering::Equal`. `f` returns the ordering
    /// of a value relative to the target and must be consistent with the order of the tree.
    pub fn remove_by<F>(&mut self, f: F) -> Option<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let handle = self.first_match_handle_by(f)?;
        Some(self.remove_handle(handle))
    }

    /// Removes and returns the minimum value of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    /// assert_eq!(tree.pop_first(), Some(1));
    /// assert_eq!(tree.pop_first(), Some(2));
    /// assert_eq!(tree.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        let handle = self.first_handle()?;
        Some(self.remove_handle(handle))
    }

    /// Removes and returns the maximum value of the tree. Returns `None` if the tree is empty.
    pub fn pop_last(&mut self) -> Option<T> {
        let handle = self.max?;
        Some(self.remove_handle(handle))
    }

    /// Returns a cursor pointing at a value equal to a particular key, or the end cursor if no
    /// such value exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.search(&1).get(), Some(&1));
    /// assert_eq!(tree.search(&2), tree.end());
    /// ```
    pub fn search<Q>(&self, key: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search_by(|value| value.borrow().cmp(key))
    }

    /// Returns a cursor pointing at a value for which `f` returns `Ordering::Equal`, or the end
    /// cursor if no such value exists.
    pub fn search_by<F>(&self, f: F) -> Cursor<'_, T>
    where
        F: FnMut(&T) -> Ordering,
    {
        Cursor::new(self, self.search_handle_by(f))
    }

    /// Returns an immutable reference to a value equal to a particular key. Returns `None` if
    /// such a value does not exist.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).get()
    }

    /// Checks if a value equal to a particular key exists in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search_handle_by(|value| value.borrow().cmp(key)).is_some()
    }

    /// Returns a cursor pointing at the first value that is not less than a particular key, or
    /// the end cursor if no such value exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = vec![1, 3, 5, 7].into_iter().collect();
    /// assert_eq!(tree.lower_bound(&4).get(), Some(&5));
    /// assert_eq!(tree.lower_bound(&5).get(), Some(&5));
    /// assert!(tree.lower_bound(&8).is_end());
    /// ```
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lower_bound_by(|value| value.borrow().cmp(key))
    }

    /// Returns a cursor pointing at the first value for which `f` does not return
    /// `Ordering::Less`, or the end cursor if no such value exists.
    pub fn lower_bound_by<F>(&self, f: F) -> Cursor<'_, T>
    where
        F: FnMut(&T) -> Ordering,
    {
        Cursor::new(self, self.lower_bound_handle_by(f))
    }

    /// Returns a cursor pointing at the first value that is greater than a particular key, or the
    /// end cursor if no such value exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = vec![1, 3, 5, 7].into_iter().collect();
    /// assert_eq!(tree.upper_bound(&5).get(), Some(&7));
    /// assert_eq!(tree.upper_bound(&0).get(), Some(&1));
    /// assert!(tree.upper_bound(&7).is_end());
    /// ```
    pub fn upper_bound<Q>(&self, key: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.upper_bound_by(|value| value.borrow().cmp(key))
    }

    /// Returns a cursor pointing at the first value for which `f` returns `Ordering::Greater`,
    /// or the end cursor if no such value exists.
    pub fn upper_bound_by<F>(&self, f: F) -> Cursor<'_, T>
    where
        F: FnMut(&T) -> Ordering,
    {
        Cursor::new(self, self.upper_bound_handle_by(f))
    }

    /// Returns the half-open range of values equal to a particular key as a pair of cursors
    /// `(lower_bound(key), upper_bound(key))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = vec![1, 3, 5, 7].into_iter().collect();
    /// let (lower, upper) = tree.equal_range(&3);
    /// assert_eq!(lower.get(), Some(&3));
    /// assert_eq!(upper.get(), Some(&5));
    ///
    /// let (lower, upper) = tree.equal_range(&4);
    /// assert_eq!(lower, upper);
    /// ```
    pub fn equal_range<Q>(&self, key: &Q) -> (Cursor<'_, T>, Cursor<'_, T>)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.equal_range_by(|value| value.borrow().cmp(key))
    }

    /// Returns `(lower_bound_by(f), upper_bound_by(f))`.
    pub fn equal_range_by<F>(&self, mut f: F) -> (Cursor<'_, T>, Cursor<'_, T>)
    where
        F: FnMut(&T) -> Ordering,
    {
        let lower = self.lower_bound_handle_by(&mut f);
        let upper = self.upper_bound_handle_by(&mut f);
        (Cursor::new(self, lower), Cursor::new(self, upper))
    }

    /// Returns the minimum value of the tree. Returns `None` if the tree is empty.
    pub fn first(&self) -> Option<&T> {
        self.first_handle().map(|handle| self.value(handle))
    }

    /// Returns the maximum value of the tree in constant time. Returns `None` if the tree is
    /// empty.
    pub fn last(&self) -> Option<&T> {
        self.max.map(|handle| self.value(handle))
    }

    /// Returns a cursor pointing at the minimum value, or the end cursor if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = vec![2, 1].into_iter().collect();
    /// let mut cursor = tree.begin();
    /// assert_eq!(cursor.get(), Some(&1));
    /// cursor.move_next();
    /// assert_eq!(cursor.get(), Some(&2));
    /// cursor.move_next();
    /// assert_eq!(cursor, tree.end());
    /// ```
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.first_handle())
    }

    /// Returns the cursor positioned one past the maximum value. Moving it backwards lands on the
    /// maximum value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = vec![2, 1].into_iter().collect();
    /// let mut cursor = tree.end();
    /// cursor.move_prev();
    /// assert_eq!(cursor.get(), Some(&2));
    /// ```
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, None)
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an upper bound on the number of values a tree can hold, derived from the size of
    /// a node and the largest possible allocation.
    pub fn max_size(&self) -> usize {
        isize::max_value() as usize / mem::size_of::<Node<T>>()
    }

    /// Clears the tree, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert!(tree.begin().is_end());
    /// ```
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.max = None;
        self.len = 0;
    }

    /// Returns an iterator over the tree. The iterator yields values in order and walks parent
    /// links, so it needs no auxiliary stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = vec![3, 1, 2].into_iter().collect();
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next_back(), Some(&3));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RedBlackTree<T>
where
    T: Clone + Ord,
{
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> PartialEq for RedBlackTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &RedBlackTree<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for RedBlackTree<T> where T: Eq {}

impl<T> fmt::Debug for RedBlackTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> IntoIterator for RedBlackTree<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a RedBlackTree<T>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
