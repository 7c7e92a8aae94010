use crate::arena::Handle;
use crate::red_black_tree::node::Side;
use crate::red_black_tree::tree::RedBlackTree;
use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

/// A bidirectional cursor over the values of a `RedBlackTree<T>`.
///
/// A cursor points either at a value or at the end position one past the maximum value. Moving
/// follows parent links, so a cursor holds nothing but its position and a reference to the tree.
/// Moving forwards from the end position stays there, moving backwards from it lands on the
/// maximum value, and moving backwards from the minimum value reaches the end position.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackTree;
///
/// let tree: RedBlackTree<u32> = vec![1, 2, 3].into_iter().collect();
///
/// let mut cursor = tree.search(&2);
/// assert_eq!(cursor.peek_prev(), Some(&1));
/// assert_eq!(cursor.peek_next(), Some(&3));
///
/// cursor.move_next();
/// cursor.move_next();
/// assert!(cursor.is_end());
/// assert_eq!(cursor.get(), None);
/// ```
pub struct Cursor<'a, T> {
    tree: &'a RedBlackTree<T>,
    current: Option<Handle>,
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(tree: &'a RedBlackTree<T>, current: Option<Handle>) -> Self {
        Cursor { tree, current }
    }

    /// Returns a reference to the value at the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        let tree = self.tree;
        self.current.map(|handle| tree.value(handle))
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves the cursor to the in-order successor of its value.
    pub fn move_next(&mut self) {
        if let Some(handle) = self.current {
            self.current = self.tree.step(handle, Side::Right);
        }
    }

    /// Moves the cursor to the in-order predecessor of its value. From the end position the
    /// cursor moves to the maximum value.
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            None => self.tree.max,
            Some(handle) => self.tree.step(handle, Side::Left),
        };
    }

    /// Returns the value the cursor would point at after `move_next`.
    pub fn peek_next(&self) -> Option<&'a T> {
        let mut cursor = *self;
        cursor.move_next();
        cursor.get()
    }

    /// Returns the value the cursor would point at after `move_prev`.
    pub fn peek_prev(&self) -> Option<&'a T> {
        let mut cursor = *self;
        cursor.move_prev();
        cursor.get()
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Cursor<'a, T>) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T> fmt::Debug for Cursor<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

/// An iterator for `RedBlackTree<T>`.
///
/// This iterator traverses the elements of the tree in-order from both ends and yields immutable
/// references.
pub struct Iter<'a, T> {
    tree: &'a RedBlackTree<T>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(tree: &'a RedBlackTree<T>) -> Self {
        Iter {
            tree,
            front: tree.first_handle(),
            back: tree.max,
            remaining: tree.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.front = self.tree.step(handle, Side::Right);
        self.remaining -= 1;
        Some(self.tree.value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.back = self.tree.step(handle, Side::Left);
        self.remaining -= 1;
        Some(self.tree.value(handle))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> where T: 'a {}

impl<'a, T> FusedIterator for Iter<'a, T> where T: 'a {}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// An owning iterator for `RedBlackTree<T>`.
///
/// This iterator traverses the elements of the tree in-order and yields owned values.
pub struct IntoIter<T> {
    tree: RedBlackTree<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(tree: RedBlackTree<T>) -> Self {
        IntoIter { tree }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree.pop_last()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
